//! Browser bindings for the swapnav navigation controller.
//!
//! Pages opt in by putting the layout marker class (`spa-layout` by
//! default) on `<body>`. Once started, internal link clicks load the target
//! page's content in place, back/forward replays recorded entries, and the
//! sidebar toggle collapses or overlays the sidebar.
#![allow(missing_docs)]

use std::rc::Rc;

use log::{error, info, warn};
use swapnav_core::{NavConfig, NavError, Navigator};
use wasm_bindgen::JsValue;

pub use js_sys;
pub use swapnav_core;
pub use wasm_bindgen;
pub use web_sys;

mod browser;
pub mod config;
mod dom;
mod events;
mod handle;
pub mod logger;

pub use browser::WebBrowser;
pub use dom::{DomElement, DomPage};
pub use handle::{NavigationHandle, navigation};

fn to_js(error: NavError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Builder for the page's navigation controller
#[derive(Debug, Default)]
pub struct SwapNav {
    config: NavConfig,
}

impl SwapNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the controller on the current document.
    ///
    /// Returns `Ok(None)` when the body does not carry the layout marker.
    pub fn mount(self) -> Result<Option<NavigationHandle>, JsValue> {
        let browser = WebBrowser::new().map_err(to_js)?;
        let body = browser.document().body().ok_or("No body element")?;

        if !body.class_list().contains(&self.config.layout_marker) {
            info!(
                "Body has no '{}' class, leaving navigation to the browser",
                self.config.layout_marker
            );
            return Ok(None);
        }

        let handles = browser.layout_handles(&self.config);
        if handles.content.is_none() {
            warn!(
                "No #{} element, every navigation will be a full page load",
                self.config.content_container_id
            );
        }

        let nav = Rc::new(Navigator::new(browser, handles, self.config));
        nav.start();
        events::attach(&nav)?;
        handle::register(nav.clone());

        Ok(Some(NavigationHandle::new(nav)))
    }
}

/// Load configuration, install logging and mount once the DOM is parsed.
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = match config::load_config() {
        Ok(config) => {
            logger::init(config.log_level_filter());
            config
        }
        Err(e) => {
            let config = NavConfig::default();
            logger::init(config.log_level_filter());
            warn!("Ignoring page configuration: {e}");
            config
        }
    };

    let browser = WebBrowser::new().map_err(to_js)?;

    if browser.document().ready_state() == "loading" {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let on_ready = Closure::once(move || {
            if let Err(e) = SwapNav::new().with_config(config).mount() {
                error!("Failed to start navigation: {e:?}");
            }
        });

        browser.document().add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        SwapNav::new().with_config(config).mount()?;
    }

    Ok(())
}

#[cfg(feature = "autostart")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn boot() -> Result<(), JsValue> {
    start()
}
