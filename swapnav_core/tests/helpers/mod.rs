#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use swapnav_core::{
    Browser, ElementHandle, HistoryEntry, LayoutHandles, NavConfig, NavError, Navigator,
    PageDocument,
};
use tokio::sync::oneshot;

pub(crate) const DESKTOP_WIDTH: f64 = 1280.0;
pub(crate) const MOBILE_WIDTH: f64 = 390.0;

#[derive(Debug, Default)]
struct ElementState {
    classes: BTreeSet<String>,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    inner_html: String,
}

/// In-memory element. Clones share state, like two references to one DOM node.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub(crate) fn with_classes(classes: &[&str]) -> Self {
        let element = Self::default();
        for class in classes {
            element.add_class(class);
        }
        element
    }

    pub(crate) fn anchor(href: &str, classes: &[&str]) -> Self {
        let element = Self::with_classes(classes);
        element
            .0
            .borrow_mut()
            .attributes
            .insert("href".to_owned(), href.to_owned());
        element
    }

    pub(crate) fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.iter().cloned().collect()
    }

    pub(crate) fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub(crate) fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }
}

impl ElementHandle for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_owned());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        let mut state = self.0.borrow_mut();
        if state.classes.remove(class) {
            false
        } else {
            state.classes.insert(class.to_owned());
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_inner_html(&self, html: &str) {
        self.0.borrow_mut().inner_html = html.to_owned();
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }
}

/// A parsed page: selector-tagged regions in document order, plus an
/// optional body made of selector-tagged parts.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    pub(crate) title: Option<String>,
    pub(crate) regions: Vec<(String, String)>,
    pub(crate) body: Option<Vec<(String, String)>>,
}

impl FakePage {
    pub(crate) fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_owned()),
            ..Default::default()
        }
    }

    pub(crate) fn region(mut self, selector: &str, html: &str) -> Self {
        self.regions.push((selector.to_owned(), html.to_owned()));
        self
    }

    pub(crate) fn body_part(mut self, selector: &str, html: &str) -> Self {
        self.body
            .get_or_insert_with(Vec::new)
            .push((selector.to_owned(), html.to_owned()));
        self
    }
}

fn selector_list(selectors: &str) -> Vec<&str> {
    selectors.split(',').map(str::trim).collect()
}

impl PageDocument for FakePage {
    fn select_inner_html(&self, selectors: &str) -> Option<String> {
        let wanted = selector_list(selectors);
        self.regions
            .iter()
            .find(|(selector, _)| wanted.contains(&selector.as_str()))
            .map(|(_, html)| html.clone())
    }

    fn body_inner_html_without(&self, strip: &str) -> Option<String> {
        let strip = selector_list(strip);
        let body = self.body.as_ref()?;

        Some(
            body.iter()
                .filter(|(selector, _)| !strip.contains(&selector.as_str()))
                .map(|(_, html)| html.as_str())
                .collect(),
        )
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HistoryOp {
    Push(HistoryEntry),
    Replace(HistoryEntry),
}

#[derive(Debug)]
pub(crate) struct FakeBrowser {
    pub(crate) pathname: String,
    pub(crate) width: Cell<f64>,
    responses: RefCell<HashMap<String, Result<String, NavError>>>,
    documents: RefCell<HashMap<String, FakePage>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    pub(crate) fetched: RefCell<Vec<String>>,
    pub(crate) sleeps: RefCell<Vec<u32>>,
    pub(crate) history: RefCell<Vec<HistoryOp>>,
    pub(crate) history_broken: Cell<bool>,
    pub(crate) title: RefCell<String>,
    pub(crate) scrolls: Cell<usize>,
    pub(crate) assigned: RefCell<Vec<String>>,
    pub(crate) anchors: Vec<FakeElement>,
    pub(crate) body_children: RefCell<Vec<FakeElement>>,
    pub(crate) globals: Vec<String>,
    pub(crate) global_calls: RefCell<Vec<String>>,
    pub(crate) events: RefCell<Vec<String>>,
}

impl FakeBrowser {
    pub(crate) fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_owned(),
            width: Cell::new(DESKTOP_WIDTH),
            responses: RefCell::new(HashMap::new()),
            documents: RefCell::new(HashMap::new()),
            gates: RefCell::new(HashMap::new()),
            fetched: RefCell::new(Vec::new()),
            sleeps: RefCell::new(Vec::new()),
            history: RefCell::new(Vec::new()),
            history_broken: Cell::new(false),
            title: RefCell::new("Home".to_owned()),
            scrolls: Cell::new(0),
            assigned: RefCell::new(Vec::new()),
            anchors: vec![
                FakeElement::anchor("/", &["nav-link"]),
                FakeElement::anchor("/about", &["nav-link"]),
                FakeElement::anchor("/blog/", &["nav-link"]),
                FakeElement::anchor("/contact/", &["nav-link"]),
            ],
            body_children: RefCell::new(Vec::new()),
            globals: vec!["Prism.highlightAll".to_owned()],
            global_calls: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Serve `raw` at `url`; `page` is what parsing `raw` yields.
    pub(crate) fn serve(&self, url: &str, raw: &str, page: FakePage) {
        self.responses
            .borrow_mut()
            .insert(url.to_owned(), Ok(raw.to_owned()));
        self.documents.borrow_mut().insert(raw.to_owned(), page);
    }

    pub(crate) fn fail(&self, url: &str, error: NavError) {
        self.responses.borrow_mut().insert(url.to_owned(), Err(error));
    }

    /// Hold the response for `url` until the returned sender fires.
    pub(crate) fn gate(&self, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(url.to_owned(), rx);
        tx
    }

    pub(crate) fn pushes(&self) -> Vec<String> {
        self.history
            .borrow()
            .iter()
            .filter_map(|op| match op {
                HistoryOp::Push(entry) => Some(entry.path.clone()),
                HistoryOp::Replace(_) => None,
            })
            .collect()
    }

    pub(crate) fn active_links(&self) -> Vec<String> {
        self.anchors
            .iter()
            .filter(|a| a.has_class("active"))
            .filter_map(|a| a.attribute("href"))
            .collect()
    }

    pub(crate) fn overlays(&self) -> Vec<FakeElement> {
        self.body_children
            .borrow()
            .iter()
            .filter(|e| e.has_class("sidebar-overlay"))
            .cloned()
            .collect()
    }
}

impl Browser for FakeBrowser {
    type Element = FakeElement;
    type Page = FakePage;

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn viewport_width(&self) -> f64 {
        self.width.get()
    }

    async fn fetch_text(&self, url: &str) -> Result<String, NavError> {
        self.fetched.borrow_mut().push(url.to_owned());

        let gate = self.gates.borrow_mut().remove(url);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or(Err(NavError::Http { status: 404 }))
    }

    async fn sleep(&self, millis: u32) {
        self.sleeps.borrow_mut().push(millis);
        tokio::task::yield_now().await;
    }

    fn parse_page(&self, html: &str) -> Result<FakePage, NavError> {
        Ok(self.documents.borrow().get(html).cloned().unwrap_or_default())
    }

    fn push_history(&self, entry: &HistoryEntry) -> Result<(), NavError> {
        if self.history_broken.get() {
            return Err(NavError::History("SecurityError".to_owned()));
        }
        self.history.borrow_mut().push(HistoryOp::Push(entry.clone()));
        Ok(())
    }

    fn replace_history(&self, entry: &HistoryEntry) -> Result<(), NavError> {
        self.history
            .borrow_mut()
            .push(HistoryOp::Replace(entry.clone()));
        Ok(())
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_owned();
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }

    fn assign_location(&self, href: &str) {
        self.assigned.borrow_mut().push(href.to_owned());
    }

    fn query_all(&self, selector: &str) -> Vec<FakeElement> {
        match selector {
            "a" => self.anchors.clone(),
            ".nav-link" => self
                .anchors
                .iter()
                .filter(|a| a.has_class("nav-link"))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn find_by_class(&self, class: &str) -> Option<FakeElement> {
        self.body_children
            .borrow()
            .iter()
            .find(|e| e.has_class(class))
            .cloned()
    }

    fn create_in_body(&self, class: &str) -> Result<FakeElement, NavError> {
        let element = FakeElement::with_classes(&[class]);
        self.body_children.borrow_mut().push(element.clone());
        Ok(element)
    }

    fn call_global(&self, object: &str, method: &str) -> bool {
        let name = format!("{object}.{method}");
        if self.globals.contains(&name) {
            self.global_calls.borrow_mut().push(name);
            true
        } else {
            false
        }
    }

    fn dispatch_event(&self, name: &str) {
        self.events.borrow_mut().push(name.to_owned());
    }
}

pub(crate) fn full_handles() -> LayoutHandles<FakeElement> {
    LayoutHandles {
        content: Some(FakeElement::with_classes(&["content-container"])),
        loading_indicator: Some(FakeElement::default()),
        sidebar: Some(FakeElement::with_classes(&["sidebar"])),
        sidebar_toggle: Some(FakeElement::with_classes(&["sidebar-toggle"])),
        main_content: Some(FakeElement::default()),
    }
}

/// A started navigator on `pathname` with every layout element present.
pub(crate) fn navigator(pathname: &str) -> Navigator<FakeBrowser> {
    let nav = Navigator::new(FakeBrowser::new(pathname), full_handles(), NavConfig::default());
    nav.start();
    nav
}

pub(crate) fn content(nav: &Navigator<FakeBrowser>) -> FakeElement {
    nav.handles().content.clone().expect("content handle")
}

pub(crate) fn indicator(nav: &Navigator<FakeBrowser>) -> FakeElement {
    nav.handles().loading_indicator.clone().expect("indicator handle")
}

pub(crate) fn sidebar(nav: &Navigator<FakeBrowser>) -> FakeElement {
    nav.handles().sidebar.clone().expect("sidebar handle")
}

/// Serve a standard page at `url` with a `main` region.
pub(crate) fn serve_page(nav: &Navigator<FakeBrowser>, url: &str, title: &str, main: &str) {
    let raw = format!("<html><head><title>{title}</title></head><body><main>{main}</main></body></html>");
    nav.browser()
        .serve(url, &raw, FakePage::titled(title).region("main", main));
}
