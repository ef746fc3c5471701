#![forbid(unsafe_code)]

//! `tracing` output to the browser console.
//!
//! Events are formatted by `tracing-subscriber`'s fmt layer (no timestamps:
//! `SystemTime` is unavailable on `wasm32-unknown-unknown`) and routed to the
//! console method matching their level, so devtools filtering works.

use std::io;

use tracing::{Level, Metadata};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Install the console subscriber. Later calls are no-ops.
pub fn init(level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(None)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(Some(*meta.level()))
    }
}

/// Buffers one formatted event and emits it on drop.
struct ConsoleWriter {
    level: Option<Level>,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Option<Level>) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.buf);
        let line = JsValue::from_str(text.trim_end());
        match self.level {
            Some(level) if level == Level::ERROR => console::error_1(&line),
            Some(level) if level == Level::WARN => console::warn_1(&line),
            Some(level) if level == Level::INFO => console::info_1(&line),
            Some(level) if level == Level::DEBUG => console::debug_1(&line),
            _ => console::log_1(&line),
        }
    }
}
