//! In-memory rendering backend for tests.

use std::{
    cell::Cell,
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::error::SessionError;

use super::{Locator, RenderedElement, RenderingSession, SessionLauncher};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    text: String,
    attributes: HashMap<String, String>,
    children: Vec<(String, FakeElement)>,
}

impl FakeElement {
    pub(crate) fn with_text(text: &str) -> Self {
        Self { text: text.to_string(), ..Self::default() }
    }

    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn child(mut self, tag: &str, element: FakeElement) -> Self {
        self.children.push((tag.to_string(), element));
        self
    }

    /// A `<tr>` whose `<td>` cells are built from `cells`.
    pub(crate) fn row(cells: Vec<FakeElement>) -> Self {
        cells.into_iter().fold(Self::default(), |row, cell| row.child("td", cell))
    }

    /// A `<tbody>` holding `rows`.
    pub(crate) fn table(rows: Vec<FakeElement>) -> Self {
        rows.into_iter().fold(Self::default(), |body, row| body.child("tr", row))
    }
}

impl RenderedElement for FakeElement {
    fn text(&self) -> Result<String, SessionError> {
        Ok(self.text.clone())
    }

    fn attribute(&self, name: &str) -> Result<Option<String>, SessionError> {
        Ok(self.attributes.get(name).cloned())
    }

    fn find_all(&self, tag: &str) -> Result<Vec<Box<dyn RenderedElement + '_>>, SessionError> {
        Ok(self
            .children
            .iter()
            .filter(|(child_tag, _)| child_tag == tag)
            .map(|(_, child)| Box::new(child.clone()) as Box<dyn RenderedElement>)
            .collect())
    }
}

/// What the fake browser renders for every navigation.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    ready: bool,
    ready_state_error: Option<(String, usize)>,
    navigate_error: Option<SessionError>,
    elements: HashMap<Locator, FakeElement>,
    broken: HashMap<Locator, String>,
}

impl FakePage {
    pub(crate) fn ready() -> Self {
        Self { ready: true, ..Self::default() }
    }

    pub(crate) fn never_ready() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, locator: Locator, element: FakeElement) -> Self {
        self.elements.insert(locator, element);
        self
    }

    /// Probing `locator` fails with an automation error.
    pub(crate) fn broken(mut self, locator: Locator, message: &str) -> Self {
        self.broken.insert(locator, message.to_string());
        self
    }

    /// The first `times` reads of the document state fail with an
    /// automation error in every session.
    pub(crate) fn failing_ready_state(mut self, message: &str, times: usize) -> Self {
        self.ready_state_error = Some((message.to_string(), times));
        self
    }

    /// Navigation reports a missing element.
    pub(crate) fn failing_navigation(mut self, message: &str) -> Self {
        self.navigate_error = Some(SessionError::ElementNotFound(message.to_string()));
        self
    }

    /// Navigation fails with an automation error.
    pub(crate) fn crashing_navigation(mut self, message: &str) -> Self {
        self.navigate_error = Some(SessionError::Automation(message.to_string()));
        self
    }
}

#[derive(Debug, Default)]
struct Counters {
    launches: AtomicUsize,
    releases: AtomicUsize,
    ready_state_reads: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeLauncher {
    page: Arc<FakePage>,
    counters: Arc<Counters>,
    launch_error: Option<String>,
}

impl FakeLauncher {
    pub(crate) fn new(page: FakePage) -> Self {
        Self { page: Arc::new(page), counters: Arc::default(), launch_error: None }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self { launch_error: Some(message.to_string()), ..Self::new(FakePage::default()) }
    }

    pub(crate) fn launches(&self) -> usize {
        self.counters.launches.load(Ordering::SeqCst)
    }

    pub(crate) fn releases(&self) -> usize {
        self.counters.releases.load(Ordering::SeqCst)
    }

    pub(crate) fn ready_state_reads(&self) -> usize {
        self.counters.ready_state_reads.load(Ordering::SeqCst)
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.counters.navigations.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl SessionLauncher for FakeLauncher {
    fn launch(&self) -> Result<Box<dyn RenderingSession>, SessionError> {
        if let Some(message) = &self.launch_error {
            return Err(SessionError::Launch(message.clone()));
        }
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            page: Arc::clone(&self.page),
            counters: Arc::clone(&self.counters),
            navigated: false,
            released: false,
            failed_reads: Cell::new(0),
        }))
    }
}

struct FakeSession {
    page: Arc<FakePage>,
    counters: Arc<Counters>,
    navigated: bool,
    released: bool,
    failed_reads: Cell<usize>,
}

impl RenderingSession for FakeSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if let Ok(mut urls) = self.counters.navigations.lock() {
            urls.push(url.to_string());
        }
        if let Some(err) = &self.page.navigate_error {
            return Err(err.clone());
        }
        self.navigated = true;
        Ok(())
    }

    fn ready_state(&self) -> Result<String, SessionError> {
        if self.released {
            return Err(SessionError::Released);
        }
        self.counters.ready_state_reads.fetch_add(1, Ordering::SeqCst);
        if let Some((message, times)) = &self.page.ready_state_error {
            let failed = self.failed_reads.get();
            if failed < *times {
                self.failed_reads.set(failed + 1);
                return Err(SessionError::Automation(message.clone()));
            }
        }
        let state = if self.page.ready && self.navigated { "complete" } else { "loading" };
        Ok(state.to_string())
    }

    fn find_visible(
        &self,
        locator: &Locator,
    ) -> Result<Option<Box<dyn RenderedElement + '_>>, SessionError> {
        if self.released {
            return Err(SessionError::Released);
        }
        if let Some(message) = self.page.broken.get(locator) {
            return Err(SessionError::Automation(message.clone()));
        }
        Ok(self
            .page
            .elements
            .get(locator)
            .map(|element| Box::new(element.clone()) as Box<dyn RenderedElement>))
    }

    fn release(&mut self) {
        self.released = true;
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}
