//! Tracing setup for `mva-calc`.
//!
//! Log records go to stderr so they never interleave with the dashboard on
//! stdout, and optionally to a file chosen after start-up. The level can be
//! changed from the prompt with `log <filter>`.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_colour(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// `12:04:31.207  WARN mva_core::view_model price adjusted ...`
struct CalcFormat;

impl<S, N> FormatEvent<S, N> for CalcFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");
        let level = *meta.level();

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{DIM}{time}{RESET} {}{level:>5}{RESET} {CYAN}{}{RESET} ",
                level_colour(level),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {level:>5} {} ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock(file: &SharedFile) -> MutexGuard<'_, Option<File>> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer for the file layer; records are dropped until a file is opened.
#[derive(Clone)]
struct LogFile(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), Write::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock(&self.0))
    }
}

/// What stays adjustable after `init_logging`.
struct Handles {
    level: reload::Handle<EnvFilter, Registry>,
    file: SharedFile,
}

static HANDLES: OnceLock<Handles> = OnceLock::new();

fn handles() -> Result<&'static Handles> {
    match HANDLES.get() {
        Some(handles) => Ok(handles),
        None => bail!("logging not yet initialized"),
    }
}

/// `RUST_LOG` wins over `default_level`; an unparsable level falls back to
/// `info`.
fn make_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Replaces the active filter. Takes a bare level such as `debug` or a full
/// directive such as `warn,mva_core=trace`.
pub fn set_log_level(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?;
    handles()?
        .level
        .reload(filter)
        .context("failed to apply log level")
}

/// Appends log records to `path`, replacing any file opened earlier.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *lock(&handles()?.file) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(default_level: &str) {
    let file: SharedFile = Arc::new(Mutex::new(None));
    let (level, level_handle) = reload::Layer::new(make_filter(default_level));

    let console = tracing_subscriber::fmt::layer()
        .event_format(CalcFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let to_file = tracing_subscriber::fmt::layer()
        .event_format(CalcFormat)
        .with_ansi(false)
        .with_writer(LogFile(file.clone()));

    let installed = tracing_subscriber::registry()
        .with(level)
        .with(console)
        .with(to_file)
        .try_init()
        .is_ok();

    if installed {
        let _ = HANDLES.set(Handles {
            level: level_handle,
            file,
        });
    }
}
