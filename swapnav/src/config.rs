/// Client-side access to the optional `window.SWAPNAV_CONFIG` object
use swapnav_core::{NavConfig, NavError};
use wasm_bindgen::prelude::*;

const CONFIG_GLOBAL: &str = "SWAPNAV_CONFIG";

/// Get SWAPNAV_CONFIG from window object as JsValue
pub fn get_config_value() -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;

    if value.is_undefined() || value.is_null() {
        return None;
    }

    Some(value)
}

/// Read the host page's configuration, falling back to defaults when the
/// page sets none
pub fn load_config() -> Result<NavConfig, NavError> {
    let Some(value) = get_config_value() else {
        return Ok(NavConfig::default());
    };

    // Convert JsValue to JSON string, then deserialize
    let json = js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|json| json.as_string())
        .ok_or_else(|| NavError::Config(format!("{CONFIG_GLOBAL} is not serializable")))?;

    NavConfig::from_json(&json)
}
