//! Runtime configuration for the navigation controller.
//!
//! Every field has a default matching the stock site layout, so hosts only
//! override what differs. Field names are camelCase on the wire because the
//! config usually comes from a `window.SWAPNAV_CONFIG` object.
#![allow(missing_docs)]

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Global function invoked after every content swap, e.g. `Prism.highlightAll`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlighterHook {
    pub object: String,
    pub method: String,
}

/// Ids, class names, selectors and timings used by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavConfig {
    /// Element whose inner markup is replaced on navigation
    pub content_container_id: String,
    pub loading_indicator_id: String,
    pub sidebar_id: String,
    pub sidebar_toggle_id: String,
    pub main_content_id: String,

    /// Body class that opts a page into client-side navigation
    pub layout_marker: String,
    /// Clicks inside this selector never reach the link interceptor
    pub sidebar_toggle_selector: String,
    pub nav_link_selector: String,
    pub overlay_class: String,

    /// Viewports at or below this width use the overlay sidebar
    pub mobile_breakpoint: f64,
    pub transition_delay_ms: u32,

    pub content_loaded_event: String,
    pub highlighter: Option<HighlighterHook>,

    pub primary_selectors: String,
    pub legacy_selectors: String,
    pub strip_selectors: String,

    pub log_level: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            content_container_id: "contentContainer".to_owned(),
            loading_indicator_id: "loadingIndicator".to_owned(),
            sidebar_id: "sidebar".to_owned(),
            sidebar_toggle_id: "sidebarToggle".to_owned(),
            main_content_id: "mainContent".to_owned(),
            layout_marker: "spa-layout".to_owned(),
            sidebar_toggle_selector: ".sidebar-toggle".to_owned(),
            nav_link_selector: ".nav-link".to_owned(),
            overlay_class: "sidebar-overlay".to_owned(),
            mobile_breakpoint: 992.0,
            transition_delay_ms: 150,
            content_loaded_event: "spa:contentLoaded".to_owned(),
            highlighter: Some(HighlighterHook {
                object: "Prism".to_owned(),
                method: "highlightAll".to_owned(),
            }),
            primary_selectors: ".post-listing, .content-container, main, article".to_owned(),
            legacy_selectors: ".col.s12.m9, .content, .post".to_owned(),
            strip_selectors: ".sidebar, nav, .col.s12.m3".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl NavConfig {
    /// Parse a JSON config object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        let config: Self = serde_json::from_str(json).map_err(|e| NavError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if self.content_container_id.is_empty() {
            return Err(NavError::Config("contentContainerId must not be empty".to_owned()));
        }

        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            return Err(NavError::Config(format!(
                "mobileBreakpoint must be a non-negative number, got {}",
                self.mobile_breakpoint
            )));
        }

        if self.content_loaded_event.is_empty() {
            return Err(NavError::Config("contentLoadedEvent must not be empty".to_owned()));
        }

        LevelFilter::from_str(&self.log_level)
            .map_err(|_| NavError::Config(format!("unknown logLevel '{}'", self.log_level)))?;

        Ok(())
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
