use std::{ffi::OsStr, sync::Arc};

use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use tracing::debug;

use crate::{config::BrowserConfig, error::SessionError};

use super::{Locator, RenderedElement, RenderingSession, SessionLauncher};

const VISIBILITY_CHECK: &str = "function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return style.visibility !== 'hidden' && style.display !== 'none'
        && rect.width > 0 && rect.height > 0;
}";

/// Launches one headless Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: BrowserConfig,
}

impl ChromeLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

impl SessionLauncher for ChromeLauncher {
    fn launch(&self) -> Result<Box<dyn RenderingSession>, SessionError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((self.config.window_width, self.config.window_height)))
            .path(self.config.chrome_path.clone())
            .args(vec![OsStr::new("--disable-gpu")])
            .build()
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| SessionError::Launch(format!("{e:#}")))?;
        let tab = browser.new_tab().map_err(SessionError::from_chrome)?;
        tab.set_user_agent(&self.config.user_agent, None, None).map_err(SessionError::from_chrome)?;

        debug!(
            width = self.config.window_width,
            height = self.config.window_height,
            "chrome session launched"
        );

        Ok(Box::new(ChromeSession { browser: Some(browser), tab: Some(tab) }))
    }
}

struct ChromeSession {
    browser: Option<Browser>,
    tab: Option<Arc<Tab>>,
}

impl ChromeSession {
    fn tab(&self) -> Result<&Tab, SessionError> {
        self.tab.as_deref().ok_or(SessionError::Released)
    }
}

impl RenderingSession for ChromeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.tab()?.navigate_to(url).map_err(SessionError::from_chrome)?;
        Ok(())
    }

    fn ready_state(&self) -> Result<String, SessionError> {
        let result = self
            .tab()?
            .evaluate("document.readyState", false)
            .map_err(SessionError::from_chrome)?;

        Ok(result.value.and_then(|v| v.as_str().map(str::to_owned)).unwrap_or_default())
    }

    fn find_visible(
        &self,
        locator: &Locator,
    ) -> Result<Option<Box<dyn RenderedElement + '_>>, SessionError> {
        let tab = self.tab()?;
        let found = match locator {
            Locator::XPath(expr) => tab.find_element_by_xpath(expr),
            Locator::Css(expr) => tab.find_element(expr),
        };

        let element = match found.map_err(SessionError::from_chrome) {
            Ok(element) => element,
            Err(SessionError::ElementNotFound(_)) => return Ok(None),
            Err(other) => return Err(other),
        };

        if is_visible(&element)? {
            Ok(Some(Box::new(ChromeElement(element))))
        } else {
            Ok(None)
        }
    }

    fn release(&mut self) {
        self.tab = None;
        // Dropping the browser kills the child process.
        self.browser = None;
    }
}

fn is_visible(element: &Element<'_>) -> Result<bool, SessionError> {
    let result = element
        .call_js_fn(VISIBILITY_CHECK, vec![], false)
        .map_err(SessionError::from_chrome)?;

    Ok(matches!(result.value, Some(serde_json::Value::Bool(true))))
}

struct ChromeElement<'a>(Element<'a>);

impl RenderedElement for ChromeElement<'_> {
    fn text(&self) -> Result<String, SessionError> {
        self.0.get_inner_text().map_err(SessionError::from_chrome)
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        self.0.get_attribute_value(name).map_err(SessionError::from_chrome)
    }

    fn find_all(&self, tag: &str) -> Result<Vec<Box<dyn RenderedElement + '_>>, SessionError> {
        match self.0.find_elements(tag).map_err(SessionError::from_chrome) {
            Ok(elements) => Ok(elements
                .into_iter()
                .map(|element| Box::new(ChromeElement(element)) as Box<dyn RenderedElement + '_>)
                .collect()),
            Err(SessionError::ElementNotFound(_)) => Ok(Vec::new()),
            Err(other) => Err(other),
        }
    }
}
