use std::rc::Rc;

use log::debug;
use swapnav_core::{AnchorClick, ClickEvent, HistoryEntry, Intercept, Navigator};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent, PopStateEvent};

use crate::browser::WebBrowser;

type WebNavigator = Navigator<WebBrowser>;

/// Translate a DOM click into the controller's click description.
fn click_event(nav: &WebNavigator, event: &MouseEvent) -> ClickEvent {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return ClickEvent::default();
    };

    let config = nav.config();
    let in_sidebar_toggle = target
        .closest(&config.sidebar_toggle_selector)
        .ok()
        .flatten()
        .is_some();
    let on_overlay = target.class_list().contains(&config.overlay_class);

    let anchor = target.closest("a").ok().flatten().map(|anchor| AnchorClick {
        href: anchor.get_attribute("href"),
        in_sidebar: nav
            .handles()
            .sidebar
            .as_ref()
            .is_some_and(|sidebar| sidebar.contains(&anchor)),
    });

    ClickEvent {
        in_sidebar_toggle,
        on_overlay,
        anchor,
    }
}

/// State object of a popstate event, if it is one of ours
fn history_entry(state: &JsValue) -> Option<HistoryEntry> {
    if state.is_null() || state.is_undefined() {
        return None;
    }

    let json = js_sys::JSON::stringify(state).ok()?.as_string()?;
    HistoryEntry::from_json(&json)
}

/// Install the document click, sidebar toggle and popstate listeners.
pub(crate) fn attach(nav: &Rc<WebNavigator>) -> Result<(), JsValue> {
    let browser = nav.browser();

    let click_callback = {
        let nav = nav.clone();

        Closure::wrap(Box::new(move |event: MouseEvent| {
            let click = click_event(&nav, &event);

            if let Intercept::Navigate(href) = nav.handle_click(&click) {
                event.prevent_default();

                let nav = nav.clone();
                spawn_local(async move {
                    let outcome = nav.navigate(&href).await;
                    debug!("Navigation to {href}: {outcome:?}");
                });
            }
        }) as Box<dyn FnMut(_)>)
    };

    browser
        .document()
        .add_event_listener_with_callback("click", click_callback.as_ref().unchecked_ref())?;
    click_callback.forget();

    if let Some(toggle) = &nav.handles().sidebar_toggle {
        let toggle_callback = {
            let nav = nav.clone();

            Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                event.stop_propagation();
                nav.toggle_sidebar();
            }) as Box<dyn FnMut(_)>)
        };

        toggle
            .element()
            .add_event_listener_with_callback("click", toggle_callback.as_ref().unchecked_ref())?;
        toggle_callback.forget();
    }

    let popstate_callback = {
        let nav = nav.clone();

        Closure::wrap(Box::new(move |event: PopStateEvent| {
            let entry = history_entry(&event.state());

            let nav = nav.clone();
            spawn_local(async move {
                // Failures are already logged by the loader
                if let Ok(Some(outcome)) = nav.replay(entry).await {
                    debug!("History replay: {outcome:?}");
                }
            });
        }) as Box<dyn FnMut(_)>)
    };

    browser
        .window()
        .add_event_listener_with_callback("popstate", popstate_callback.as_ref().unchecked_ref())?;
    popstate_callback.forget();

    Ok(())
}
