//! `tracing` output routed to the browser console.

use std::io;
use std::sync::Once;

use tracing::Level;

static INIT: Once = Once::new();

/// Buffers one formatted event and hands it to `console.log` on flush/drop.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&line.trim_end().into());
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// Install the console subscriber once; later calls are no-ops.
pub fn init(max_level: Level) {
    INIT.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_writer(ConsoleWriter::default)
            .with_ansi(false)
            .without_time()
            .with_max_level(max_level)
            .try_init();
        if result.is_err() {
            web_sys::console::warn_1(&"forgemotion: a tracing subscriber was already installed".into());
        }
    });
}
