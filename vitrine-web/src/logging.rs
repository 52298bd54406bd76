//! Routes `log` records to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        if !cfg!(target_arch = "wasm32") {
            return;
        }
        let text = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&text),
            Level::Warn => web_sys::console::warn_1(&text),
            Level::Info => web_sys::console::info_1(&text),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&text),
        }
    }

    fn flush(&self) {}
}

/// Default verbosity: chatty in debug builds, quiet in release.
#[must_use]
pub const fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the console logger. Safe to call more than once.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(default_level());
    }
}
