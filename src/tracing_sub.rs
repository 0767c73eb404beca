use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

static LOG_FILE: OnceLock<Arc<Mutex<File>>> = OnceLock::new();

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new() -> Self {
        if let Some(file) = LOG_FILE.get() {
            DelegatingWriter {
                inner: DelegatingInner::File(file.clone()),
            }
        } else {
            DelegatingWriter {
                inner: DelegatingInner::Stderr(io::stderr()),
            }
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?
                .flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Route log output to `path` (appending). Only the first configured file
/// takes effect; later calls return `Ok(false)`.
pub fn set_log_file(path: &Path) -> io::Result<bool> {
    if LOG_FILE.get().is_some() {
        return Ok(false);
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(LOG_FILE.set(Arc::new(Mutex::new(file))).is_ok())
}

/// Initialize the tracing subscriber, writing to the configured log file when
/// there is one and to stderr otherwise. Safe to call multiple times;
/// subsequent calls are no-ops for the global subscriber.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

/// [`set_log_file`] followed by [`init_default`].
pub fn init_with_file(path: &Path) -> io::Result<()> {
    set_log_file(path)?;
    init_default();
    Ok(())
}
