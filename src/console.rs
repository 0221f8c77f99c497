//! Output streams used by the application and the built-in commands.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone)]
enum Stream {
    Stdout,
    Stderr,
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Stream {
    fn buffer() -> Self {
        Stream::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    fn contents(&self) -> String {
        match self {
            Stream::Buffer(buf) => String::from_utf8_lossy(&buf.lock()).into_owned(),
            _ => String::new(),
        }
    }
}

/// Pair of output / error streams. Clones write to the same place.
#[derive(Debug, Clone)]
pub struct Console {
    out: Stream,
    err: Stream,
}

impl Console {
    /// The process's stdout and stderr.
    pub fn std() -> Self {
        Self {
            out: Stream::Stdout,
            err: Stream::Stderr,
        }
    }

    /// In-memory streams, read back with [`Console::captured_out`] and
    /// [`Console::captured_err`].
    pub fn captured() -> Self {
        Self {
            out: Stream::buffer(),
            err: Stream::buffer(),
        }
    }

    pub fn out(&self) -> ConsoleWriter {
        ConsoleWriter(self.out.clone())
    }

    pub fn err(&self) -> ConsoleWriter {
        ConsoleWriter(self.err.clone())
    }

    /// Everything written to the output stream so far. Empty for `std()`.
    pub fn captured_out(&self) -> String {
        self.out.contents()
    }

    /// Everything written to the error stream so far. Empty for `std()`.
    pub fn captured_err(&self) -> String {
        self.err.contents()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::std()
    }
}

/// Writer handle for one of the console's streams.
pub struct ConsoleWriter(Stream);

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.0 {
            Stream::Stdout => io::stdout().write(buf),
            Stream::Stderr => io::stderr().write(buf),
            Stream::Buffer(b) => {
                b.lock().extend_from_slice(buf);
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.0 {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
            Stream::Buffer(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_streams_are_shared_between_clones() {
        let console = Console::captured();
        let copy = console.clone();
        write!(copy.out(), "hello").unwrap();
        writeln!(console.err(), "oops").unwrap();
        assert_eq!(console.captured_out(), "hello");
        assert_eq!(copy.captured_err(), "oops\n");
    }
}
