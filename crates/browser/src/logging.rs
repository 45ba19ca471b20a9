use std::io;

use omnipanel::LogLevel;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

pub fn init_logging(level: LogLevel) {
	let max_level = match level {
		LogLevel::Error => Level::ERROR,
		LogLevel::Warn => Level::WARN,
		LogLevel::Info => Level::INFO,
		LogLevel::Debug => Level::DEBUG,
		LogLevel::Trace => Level::TRACE,
	};

	// Repeated calls (e.g. a content script injected twice) keep the first subscriber.
	let _ = tracing_subscriber::fmt()
		.with_max_level(max_level)
		.with_writer(ConsoleMakeWriter)
		.without_time()
		.with_ansi(false)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
}

/// Routes each formatted event to the `console` method matching its level.
#[derive(Debug, Clone, Copy)]
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
	type Writer = ConsoleWriter;

	fn make_writer(&'a self) -> Self::Writer {
		ConsoleWriter::new(Level::INFO)
	}

	fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
		ConsoleWriter::new(*meta.level())
	}
}

/// Buffers one event and writes it to the console when dropped.
struct ConsoleWriter {
	level: Level,
	buf: Vec<u8>,
}

impl ConsoleWriter {
	fn new(level: Level) -> Self {
		Self {
			level,
			buf: Vec::new(),
		}
	}
}

impl io::Write for ConsoleWriter {
	fn write(&mut self, data: &[u8]) -> io::Result<usize> {
		self.buf.extend_from_slice(data);
		Ok(data.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Drop for ConsoleWriter {
	fn drop(&mut self) {
		let text = String::from_utf8_lossy(&self.buf);
		let line = JsValue::from_str(text.trim_end());
		match self.level {
			Level::ERROR => web_sys::console::error_1(&line),
			Level::WARN => web_sys::console::warn_1(&line),
			Level::INFO => web_sys::console::info_1(&line),
			_ => web_sys::console::debug_1(&line),
		}
	}
}
