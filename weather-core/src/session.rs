//! Browser rendering sessions.
//!
//! A session is created per request, driven through navigate/wait/read and
//! torn down exactly once. The wait helpers sit on top of two cheap checks
//! (`ready_state` and `find_visible`) and poll them with a sleep between
//! attempts until they succeed or time out.

use std::{fmt, time::Duration};

use headless_chrome::util::Wait;
use tracing::debug;

use crate::error::SessionError;

pub mod chrome;
#[cfg(test)]
pub(crate) mod fake;

pub use chrome::ChromeLauncher;

/// Identifies one element in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    XPath(&'static str),
    Css(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(expr) => write!(f, "xpath `{expr}`"),
            Locator::Css(expr) => write!(f, "css `{expr}`"),
        }
    }
}

/// Read access to an element of the rendered page.
pub trait RenderedElement {
    /// Rendered text of the element, untrimmed.
    fn text(&self) -> Result<String, SessionError>;

    fn attribute(&self, name: &str) -> Result<Option<String>, SessionError>;

    /// Descendants with the given tag name, in document order. Empty when
    /// there are none.
    fn find_all(&self, tag: &str) -> Result<Vec<Box<dyn RenderedElement + '_>>, SessionError>;
}

pub trait RenderingSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Current `document.readyState`.
    fn ready_state(&self) -> Result<String, SessionError>;

    /// The element matched by `locator` if it is present and visible right
    /// now, `None` otherwise.
    fn find_visible(
        &self,
        locator: &Locator,
    ) -> Result<Option<Box<dyn RenderedElement + '_>>, SessionError>;

    /// Terminate the underlying browser. Later calls are no-ops.
    fn release(&mut self);

    /// Wait for `document.readyState` to reach `complete`.
    ///
    /// A failed state read counts as "not ready yet": the page's execution
    /// context is torn down and rebuilt while a navigation is in flight.
    /// Only a released session ends the wait early.
    fn wait_until_document_ready(&self, timeout: Duration) -> Result<(), SessionError> {
        let ready = poll_until(timeout, || match self.ready_state() {
            Ok(state) => Ok((state == "complete").then_some(())),
            Err(SessionError::Released) => Err(SessionError::Released),
            Err(err) => {
                debug!(error = %err, "document state not readable yet");
                Ok(None)
            }
        });
        ready.map_err(|err| timeout_detail(err, || format!("document not ready after {timeout:?}")))
    }

    fn wait_for_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Box<dyn RenderedElement + '_>, SessionError> {
        let found = poll_until(timeout, || self.find_visible(locator));
        found.map_err(|err| {
            timeout_detail(err, || format!("{locator} not visible after {timeout:?}"))
        })
    }
}

/// Creates a fresh, isolated session for each request.
pub trait SessionLauncher: Send + Sync + fmt::Debug {
    fn launch(&self) -> Result<Box<dyn RenderingSession>, SessionError>;
}

/// Poll `attempt` until it yields a value. An error ends the wait early.
fn poll_until<T>(
    timeout: Duration,
    mut attempt: impl FnMut() -> Result<Option<T>, SessionError>,
) -> Result<T, SessionError> {
    Wait::with_timeout(timeout)
        .until(|| attempt().transpose())
        .map_err(|_| SessionError::Timeout(String::new()))?
}

fn timeout_detail(err: SessionError, detail: impl FnOnce() -> String) -> SessionError {
    match err {
        SessionError::Timeout(_) => SessionError::Timeout(detail()),
        other => other,
    }
}

/// Owns a session and releases it exactly once, on drop at the latest.
pub struct SessionGuard {
    session: Box<dyn RenderingSession>,
    released: bool,
}

impl SessionGuard {
    pub fn new(session: Box<dyn RenderingSession>) -> Self {
        Self { session, released: false }
    }

    pub fn session(&self) -> &dyn RenderingSession {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> &mut dyn RenderingSession {
        self.session.as_mut()
    }

    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.session.release();
            debug!("rendering session released");
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release_once();
    }
}
