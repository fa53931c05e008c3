//! Console output of the monitor.

use super::messages::{Language, SEPARATOR_WIDTH};
use chrono::Local;
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable handle to the text sink the monitor reports to.
///
/// Write failures are swallowed; a broken console must not stop the monitor
/// or skip teardown.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    language: Language,
    show_timestamps: bool,
}

impl Console {
    /// Console on the process's standard output.
    pub fn stdout(language: Language) -> Self {
        Self::new(io::stdout(), language)
    }

    pub fn new(writer: impl Write + Send + 'static, language: Language) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            language,
            show_timestamps: false,
        }
    }

    /// Prefix received lines with the local time.
    pub fn with_timestamps(mut self, show_timestamps: bool) -> Self {
        self.show_timestamps = show_timestamps;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Banner, exit hint and separator.
    pub fn banner(&self, port_name: &str) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "{}", self.language.opened(port_name));
        let _ = writeln!(out, "{}", self.language.exit_hint());
        let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
        let _ = out.flush();
    }

    /// A received line, verbatim.
    pub fn line(&self, text: &str) {
        if self.show_timestamps {
            let stamp = Local::now().format("%H:%M:%S%.3f");
            self.emit(&format!("{stamp} {text}"));
        } else {
            self.emit(text);
        }
    }

    /// Open failure diagnostic with the usual causes.
    pub fn open_failed(&self, port_name: &str, reason: &dyn fmt::Display) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "{}", self.language.open_failed(reason));
        let _ = writeln!(out, "{}", self.language.check_heading());
        for cause in self.language.open_causes(port_name) {
            let _ = writeln!(out, "{cause}");
        }
        let _ = out.flush();
    }

    pub fn read_failed(&self, reason: &dyn fmt::Display) {
        self.emit(&self.language.read_failed(reason));
    }

    pub fn stopped(&self) {
        self.emit(self.language.stopped());
    }

    pub fn port_closed(&self) {
        self.emit(self.language.closed());
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("language", &self.language)
            .field("show_timestamps", &self.show_timestamps)
            .finish()
    }
}

/// In-memory writer whose contents can be read back while a [`Console`] owns a clone.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Written text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
