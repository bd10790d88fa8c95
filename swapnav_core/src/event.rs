#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// State attached to every history slot this crate pushes or replaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub path: String,
}

impl HistoryEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "path": self.path }).to_string()
    }

    /// Parse a popstate state object. States written by other scripts, or
    /// without a path, yield `None`.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Self>(json)
            .ok()
            .filter(|entry| !entry.path.is_empty())
    }
}

/// What the document click handler saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub in_sidebar_toggle: bool,
    pub on_overlay: bool,
    /// Nearest enclosing anchor of the click target
    pub anchor: Option<AnchorClick>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorClick {
    /// Raw `href` attribute, not the resolved URL
    pub href: Option<String>,
    pub in_sidebar: bool,
}

impl ClickEvent {
    pub fn on_anchor(href: &str) -> Self {
        Self {
            anchor: Some(AnchorClick {
                href: Some(href.to_owned()),
                in_sidebar: false,
            }),
            ..Default::default()
        }
    }
}

/// Decision for a click: let the browser handle it, or prevent the default
/// action and navigate in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercept {
    Pass,
    Navigate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// A newer load started while this one was in flight
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOutcome {
    /// Target is the page already displayed
    Unchanged,
    Loaded,
    Superseded,
    /// In-place load failed and a full page load was requested
    FellBack,
}
