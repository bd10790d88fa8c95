use std::cell::RefCell;
use std::rc::Rc;

use swapnav_core::{NavigateOutcome, Navigator};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::browser::WebBrowser;

thread_local! {
    static NAVIGATION: RefCell<Option<Rc<Navigator<WebBrowser>>>> = const { RefCell::new(None) };
}

pub(crate) fn register(nav: Rc<Navigator<WebBrowser>>) {
    NAVIGATION.with(|slot| *slot.borrow_mut() = Some(nav));
}

/// The running controller, for other scripts on the page.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct NavigationHandle {
    nav: Rc<Navigator<WebBrowser>>,
}

impl NavigationHandle {
    pub(crate) fn new(nav: Rc<Navigator<WebBrowser>>) -> Self {
        Self { nav }
    }
}

fn outcome_name(outcome: NavigateOutcome) -> &'static str {
    match outcome {
        NavigateOutcome::Unchanged => "unchanged",
        NavigateOutcome::Loaded => "loaded",
        NavigateOutcome::Superseded => "superseded",
        NavigateOutcome::FellBack => "fell-back",
    }
}

#[wasm_bindgen]
impl NavigationHandle {
    /// Navigate in place. Resolves to the outcome name.
    pub fn navigate(&self, path: String) -> js_sys::Promise {
        let nav = self.nav.clone();

        future_to_promise(async move {
            let outcome = nav.navigate(&path).await;
            Ok(JsValue::from_str(outcome_name(outcome)))
        })
    }

    #[wasm_bindgen(js_name = toggleSidebar)]
    pub fn toggle_sidebar(&self) {
        self.nav.toggle_sidebar();
    }

    #[wasm_bindgen(js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.nav.current_path()
    }

    #[wasm_bindgen(js_name = sidebarHidden)]
    pub fn sidebar_hidden(&self) -> bool {
        self.nav.sidebar_hidden()
    }
}

/// Handle to the controller started on this page, if the page opted in.
#[wasm_bindgen]
pub fn navigation() -> Option<NavigationHandle> {
    NAVIGATION.with(|slot| slot.borrow().clone().map(NavigationHandle::new))
}
