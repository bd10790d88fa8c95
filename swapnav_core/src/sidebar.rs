#![allow(missing_docs)]

use log::{debug, warn};

use crate::host::{Browser, ElementHandle};
use crate::navigator::Navigator;

const HIDDEN_CLASS: &str = "hidden";
const EXPANDED_CLASS: &str = "expanded";
const OPEN_CLASS: &str = "open";
const ACTIVE_CLASS: &str = "active";

// Desktop: Expanded <-> Collapsed, driven by `sidebar_hidden`.
// Mobile: Closed <-> Open, read back from the sidebar's `open` class, with a
// lazily created overlay following along.
impl<B: Browser> Navigator<B> {
    pub fn is_mobile(&self) -> bool {
        self.browser.viewport_width() <= self.config.mobile_breakpoint
    }

    pub fn sidebar_hidden(&self) -> bool {
        self.sidebar_hidden.get()
    }

    pub fn toggle_sidebar(&self) {
        if self.is_mobile() {
            self.toggle_mobile_menu();
        } else {
            self.toggle_desktop_sidebar();
        }
    }

    fn toggle_desktop_sidebar(&self) {
        let hidden = !self.sidebar_hidden.get();
        self.sidebar_hidden.set(hidden);
        debug!("Sidebar {}", if hidden { "collapsed" } else { "expanded" });

        let targets = [
            (&self.handles.sidebar, HIDDEN_CLASS),
            (&self.handles.main_content, EXPANDED_CLASS),
            (&self.handles.sidebar_toggle, EXPANDED_CLASS),
        ];

        for (handle, class) in targets {
            let Some(element) = handle else {
                continue;
            };

            if hidden {
                element.add_class(class);
            } else {
                element.remove_class(class);
            }
        }
    }

    fn toggle_mobile_menu(&self) {
        let Some(sidebar) = &self.handles.sidebar else {
            warn!("Sidebar #{} not found, cannot open menu", self.config.sidebar_id);
            return;
        };

        let open = sidebar.toggle_class(OPEN_CLASS);

        let overlay = match self.browser.find_by_class(&self.config.overlay_class) {
            Some(overlay) => Some(overlay),
            None => self
                .browser
                .create_in_body(&self.config.overlay_class)
                .map_err(|e| warn!("Could not create sidebar overlay: {e}"))
                .ok(),
        };

        if let Some(overlay) = overlay {
            if open {
                overlay.add_class(ACTIVE_CLASS);
            } else {
                overlay.remove_class(ACTIVE_CLASS);
            }
        }
    }

    pub fn close_mobile_menu(&self) {
        if let Some(sidebar) = &self.handles.sidebar {
            sidebar.remove_class(OPEN_CLASS);
        }

        if let Some(overlay) = self.browser.find_by_class(&self.config.overlay_class) {
            overlay.remove_class(ACTIVE_CLASS);
        }
    }
}
