use log::warn;
use swapnav_core::{Browser, HistoryEntry, LayoutHandles, NavConfig, NavError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CustomEvent, Document, Element, Response, ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{DomElement, DomPage, js_error};

/// [`Browser`] backed by the real window and document.
#[derive(Debug, Clone)]
pub struct WebBrowser {
    window: Window,
    document: Document,
}

impl WebBrowser {
    pub fn new() -> Result<Self, NavError> {
        let window = web_sys::window().ok_or_else(|| NavError::Dom("No global window object".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| NavError::Dom("No document object".to_owned()))?;

        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element_by_id(&self, id: &str) -> Option<DomElement> {
        self.document.get_element_by_id(id).map(DomElement::from)
    }

    /// Look up the layout elements named in `config`.
    pub fn layout_handles(&self, config: &NavConfig) -> LayoutHandles<DomElement> {
        LayoutHandles {
            content: self.element_by_id(&config.content_container_id),
            loading_indicator: self.element_by_id(&config.loading_indicator_id),
            sidebar: self.element_by_id(&config.sidebar_id),
            sidebar_toggle: self.element_by_id(&config.sidebar_toggle_id),
            main_content: self.element_by_id(&config.main_content_id),
        }
    }

    fn history_state(entry: &HistoryEntry) -> Result<JsValue, NavError> {
        js_sys::JSON::parse(&entry.to_json()).map_err(|e| NavError::History(js_error(&e)))
    }
}

impl Browser for WebBrowser {
    type Element = DomElement;
    type Page = DomPage;

    fn pathname(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_owned())
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(f64::INFINITY)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, NavError> {
        let response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| NavError::Network(js_error(&e)))?;

        let response: Response = response
            .dyn_into()
            .map_err(|_| NavError::Network("fetch did not resolve to a Response".to_owned()))?;

        if !response.ok() {
            return Err(NavError::Http {
                status: response.status(),
            });
        }

        let text_promise = response.text().map_err(|e| NavError::Body(js_error(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| NavError::Body(js_error(&e)))?;

        text.as_string()
            .ok_or_else(|| NavError::Body("response body is not text".to_owned()))
    }

    async fn sleep(&self, millis: u32) {
        let timeout = i32::try_from(millis).unwrap_or(i32::MAX);
        let window = self.window.clone();

        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if let Err(e) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
            {
                warn!("setTimeout failed: {}", js_error(&e));
                let _ = resolve.call0(&JsValue::NULL);
            }
        });

        let _ = JsFuture::from(promise).await;
    }

    fn parse_page(&self, html: &str) -> Result<DomPage, NavError> {
        DomPage::parse(html)
    }

    fn push_history(&self, entry: &HistoryEntry) -> Result<(), NavError> {
        let state = Self::history_state(entry)?;
        self.window
            .history()
            .and_then(|history| history.push_state_with_url(&state, "", Some(&entry.path)))
            .map_err(|e| NavError::History(js_error(&e)))
    }

    fn replace_history(&self, entry: &HistoryEntry) -> Result<(), NavError> {
        let state = Self::history_state(entry)?;
        self.window
            .history()
            .and_then(|history| history.replace_state_with_url(&state, "", Some(&entry.path)))
            .map_err(|e| NavError::History(js_error(&e)))
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn assign_location(&self, href: &str) {
        if let Err(e) = self.window.location().set_href(href) {
            warn!("Could not load {href}: {}", js_error(&e));
        }
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomElement::from)
            .collect()
    }

    fn find_by_class(&self, class: &str) -> Option<DomElement> {
        self.document
            .get_elements_by_class_name(class)
            .item(0)
            .map(DomElement::from)
    }

    fn create_in_body(&self, class: &str) -> Result<DomElement, NavError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| NavError::Dom("No body element".to_owned()))?;

        let element = self
            .document
            .create_element("div")
            .map_err(|e| NavError::Dom(js_error(&e)))?;
        element.set_class_name(class);

        body.append_child(&element)
            .map_err(|e| NavError::Dom(js_error(&e)))?;

        Ok(DomElement::from(element))
    }

    fn call_global(&self, object: &str, method: &str) -> bool {
        let Ok(target) = js_sys::Reflect::get(&self.window, &JsValue::from_str(object)) else {
            return false;
        };

        if target.is_undefined() || target.is_null() {
            return false;
        }

        let Ok(function) = js_sys::Reflect::get(&target, &JsValue::from_str(method)) else {
            return false;
        };

        let Some(function) = function.dyn_ref::<js_sys::Function>() else {
            return false;
        };

        if let Err(e) = function.call0(&target) {
            warn!("{object}.{method} threw: {}", js_error(&e));
        }

        true
    }

    fn dispatch_event(&self, name: &str) {
        match CustomEvent::new(name) {
            Ok(event) => {
                let _ = self.window.dispatch_event(&event);
            }
            Err(e) => warn!("Could not create {name} event: {}", js_error(&e)),
        }
    }
}
