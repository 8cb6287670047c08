use crate::config::ScoutConfig;
use crate::scrapers::traits::PageSource;
use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Page source backed by headless Chrome. Listing content is rendered
/// client-side, so the final DOM is read rather than the server response.
pub struct BrowserPageSource {
    browser: Browser,
    page_load_timeout: Duration,
    settle_delay: Duration,
}

impl BrowserPageSource {
    /// Launch headless Chrome
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        info!("Launching headless Chrome...");

        let user_agent = format!("--user-agent={}", config.user_agent);
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .ignore_certificate_errors(true)
            .args(vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new(user_agent.as_str()),
            ])
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self {
            browser,
            page_load_timeout: Duration::from_secs(config.page_load_timeout_secs),
            settle_delay: Duration::from_secs(config.settle_delay_secs),
        })
    }

    fn render(&self, tab: &Tab, url: &str) -> Result<String> {
        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;

        info!("Waiting for page to load...");
        tab.wait_for_element_with_custom_timeout("body", self.page_load_timeout)
            .context("Timed out waiting for page body")?;

        // Listing cards are rendered after the body appears
        thread::sleep(self.settle_delay);

        let title = tab.get_title().unwrap_or_default();
        info!("Page title: {}", title);
        info!("Current URL: {}", tab.get_url());

        let html = tab.get_content().context("Failed to read rendered page")?;
        debug!("Rendered page is {} bytes", html.len());
        Ok(html)
    }
}

impl PageSource for BrowserPageSource {
    fn fetch(&self, url: &str) -> Result<String> {
        info!("Opening browser and navigating to {}...", url);
        let tab = self.browser.new_tab().context("Failed to open browser tab")?;

        let result = self.render(&tab, url);

        if let Err(e) = tab.close(true) {
            warn!("Failed to close browser tab cleanly: {}", e);
        }

        result
    }
}
