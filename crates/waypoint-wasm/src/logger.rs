//! `log` backend writing to the browser console

use log::LevelFilter;

/// Parse a level name (`"warn"`, `"DEBUG"`, ...), defaulting to `Info`
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|level| level.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

#[cfg(feature = "wasm")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the console logger. Later calls only adjust the level.
#[cfg(feature = "wasm")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    let filter = parse_level(level.as_deref());
    let installed = log::set_logger(&console::LOGGER);
    log::set_max_level(filter);
    match installed {
        Ok(()) => log::debug!("console logger installed at {filter}"),
        Err(_) => log::debug!("logger already installed; level set to {filter}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some(" off ")), LevelFilter::Off);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }

    #[cfg(feature = "wasm")]
    #[test]
    fn test_init_logging_twice() {
        // Level stays off so nothing reaches the console outside a browser
        init_logging(Some("off".to_string()));
        init_logging(Some("off".to_string()));
        assert_eq!(log::max_level(), LevelFilter::Off);
    }
}
