//! Logging init: stderr plus a file under the XDG state dir, or stderr alone
//! when the log file cannot be opened.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Writer that is either the log file or stderr (used when the handle clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` in verbose mode.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Initialize logging to stderr and to `~/.local/state/cosmico/cosmico.log`.
///
/// Verbose mode lowers the level to debug and shows event targets on stderr.
/// On failure (e.g. state dir unwritable) returns Err before installing
/// anything, so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cosmico")?;
    let log_file_path = xdg_dirs.place_state_file("cosmico.log")?;

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let file_layer = fmt::layer()
        .with_writer(FileMakeWriter(file))
        .with_ansi(false);
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!("logging to {}", log_file_path.display());

    Ok(log_file_path)
}

/// Initialize logging to stderr only. Use when [`init_logging`] fails so the CLI doesn't crash.
pub fn init_logging_stderr(verbose: bool) {
    let _ = fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}
