use swapnav_core::{ElementHandle, NavError, PageDocument};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomParser, Element, HtmlElement, Node, SupportedType};

/// Best-effort message out of a thrown JS value
pub(crate) fn js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }

    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }

    format!("{value:?}")
}

/// A live element of the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(Element);

impl DomElement {
    pub fn element(&self) -> &Element {
        &self.0
    }

    pub fn contains(&self, other: &Element) -> bool {
        let node: &Node = other;
        self.0.contains(Some(node))
    }
}

impl From<Element> for DomElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl ElementHandle for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.0.class_list().toggle(class).unwrap_or(false)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(element) = self.0.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// A fetched page parsed into a detached document. Scripts in it never run.
#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn parse(html: &str) -> Result<Self, NavError> {
        let parser = DomParser::new().map_err(|e| NavError::Dom(js_error(&e)))?;
        let document = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .map_err(|e| NavError::Dom(js_error(&e)))?;

        Ok(Self { document })
    }
}

impl PageDocument for DomPage {
    fn select_inner_html(&self, selectors: &str) -> Option<String> {
        self.document
            .query_selector(selectors)
            .ok()
            .flatten()
            .map(|element| element.inner_html())
    }

    fn body_inner_html_without(&self, strip: &str) -> Option<String> {
        let body = self.document.body()?;

        if let Ok(nodes) = body.query_selector_all(strip) {
            for i in 0..nodes.length() {
                if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    element.remove();
                }
            }
        }

        Some(body.inner_html())
    }

    fn title(&self) -> Option<String> {
        self.document
            .query_selector("title")
            .ok()
            .flatten()
            .and_then(|title| title.text_content())
    }
}
