//! Seams between the controller and the browser.
//!
//! The controller never touches a global document. It is handed the five
//! layout elements it works on plus a [`Browser`] for everything that is
//! window-wide (network, history, title, scrolling). The wasm bindings
//! implement these traits on top of `web-sys`; tests use in-memory fakes.

use crate::error::NavError;
use crate::event::HistoryEntry;

/// A live element the controller mutates.
pub trait ElementHandle {
    /// Add `class` unless already present
    fn add_class(&self, class: &str);
    /// Remove `class` if present
    fn remove_class(&self, class: &str);
    /// Flip `class` and return whether it is now present
    fn toggle_class(&self, class: &str) -> bool;
    /// Whether `class` is present
    fn has_class(&self, class: &str) -> bool;
    /// Set one inline style property
    fn set_style(&self, property: &str, value: &str);
    /// Replace the element's children with parsed `html`
    fn set_inner_html(&self, html: &str);
    /// Value of attribute `name`, if set
    fn attribute(&self, name: &str) -> Option<String>;
}

/// A fetched HTML document, parsed but never attached to the live page.
pub trait PageDocument {
    /// Inner markup of the first element (in document order) matching the
    /// comma-separated `selectors`
    fn select_inner_html(&self, selectors: &str) -> Option<String>;

    /// Inner markup of `<body>` after removing every element matching `strip`
    fn body_inner_html_without(&self, strip: &str) -> Option<String>;

    /// Text content of `<title>`, if the document has one
    fn title(&self) -> Option<String>;
}

/// Window-level services.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Live page element
    type Element: ElementHandle + Clone;
    /// Parsed, detached copy of a fetched page
    type Page: PageDocument + 'static;

    /// Path of the document as loaded by the browser
    fn pathname(&self) -> String;
    /// Inner width of the window in CSS pixels
    fn viewport_width(&self) -> f64;

    /// GET `url` and return the body text. Non-2xx responses are
    /// [`NavError::Http`].
    async fn fetch_text(&self, url: &str) -> Result<String, NavError>;
    /// Resolve after `millis` milliseconds
    async fn sleep(&self, millis: u32);
    /// Parse fetched markup without running its scripts
    fn parse_page(&self, html: &str) -> Result<Self::Page, NavError>;

    /// Add a history entry for `entry.path`
    fn push_history(&self, entry: &HistoryEntry) -> Result<(), NavError>;
    /// Overwrite the current history entry
    fn replace_history(&self, entry: &HistoryEntry) -> Result<(), NavError>;

    /// Set `document.title`
    fn set_title(&self, title: &str);
    /// Smooth-scroll the window to the top
    fn scroll_to_top(&self);
    /// Full page load, used when in-place loading failed
    fn assign_location(&self, href: &str);

    /// Every element matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// First element carrying `class`
    fn find_by_class(&self, class: &str) -> Option<Self::Element>;
    /// Create a `<div class="{class}">` appended to the body
    fn create_in_body(&self, class: &str) -> Result<Self::Element, NavError>;

    /// Call `window[object][method]()` when it exists. Returns whether it ran.
    fn call_global(&self, object: &str, method: &str) -> bool;
    /// Dispatch a custom event named `name` on the window
    fn dispatch_event(&self, name: &str);
}

/// The layout elements the controller owns. Any of them may be absent; the
/// operations that need a missing element are skipped.
#[derive(Debug, Clone)]
pub struct LayoutHandles<E> {
    /// Receives the swapped markup
    pub content: Option<E>,
    /// Shown while a link click is loading
    pub loading_indicator: Option<E>,
    /// Collapsed on desktop, slid in on mobile
    pub sidebar: Option<E>,
    /// The button that collapses or opens the sidebar
    pub sidebar_toggle: Option<E>,
    /// Widened while the sidebar is collapsed
    pub main_content: Option<E>,
}

impl<E> Default for LayoutHandles<E> {
    fn default() -> Self {
        Self {
            content: None,
            loading_indicator: None,
            sidebar: None,
            sidebar_toggle: None,
            main_content: None,
        }
    }
}
