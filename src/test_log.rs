//! Per-thread log capture for asserting diagnostics in tests

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f`, returning its result and every record it logged on this thread
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
    let out = f();
    let records = RECORDS.with(|records| records.borrow_mut().drain(..).collect());
    (out, records)
}

/// Warnings and errors among `records`
pub fn diagnostics(records: &[(Level, String)]) -> Vec<(Level, String)> {
    records
        .iter()
        .filter(|(level, _)| *level <= Level::Warn)
        .cloned()
        .collect()
}
