//! User-visible output.
//!
//! Operations print their notices through a [`Console`] rather than straight
//! to stdout, so the same code path can be captured in tests. Logging goes to
//! stderr via `tracing` and never shares this sink.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Cloneable handle to the output sink.
#[derive(Clone)]
pub struct Console {
    sink: Sink,
}

impl Console {
    /// Console writing to the process stdout.
    pub fn stdout() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(io::stdout()))),
        }
    }

    /// Write one line and flush it.
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut sink = self.sink.lock();
        writeln!(sink, "{text}")?;
        sink.flush()
    }

    /// Console backed by an in-memory buffer, plus a reader for that buffer.
    #[cfg(test)]
    pub fn capture() -> (Self, Captured) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            sink: Arc::new(Mutex::new(Box::new(SharedBuf(Arc::clone(&buf))))),
        };
        (console, Captured(buf))
    }
}

#[cfg(test)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Everything written to a captured console so far.
#[cfg(test)]
#[derive(Clone)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_newline_terminated() {
        let (console, captured) = Console::capture();
        console.line("one").unwrap();
        console.clone().line("two").unwrap();
        assert_eq!(captured.text(), "one\ntwo\n");
    }
}
