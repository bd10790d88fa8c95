//! `log` backend writing to the browser console

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));

        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling it again only changes the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
