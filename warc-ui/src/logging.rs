//! Process-wide logging setup.
//!
//! A global `EnvFilter` caps everything; beneath it the stdout layer has its
//! own on/off gate and the file layer writes into a slot that stays empty
//! until [`enable_file_logging`] is called. All three can be changed after
//! [`init`].

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info,warc=debug";

/// `HH:MM:SS.mmm LEVEL target: fields`, coloured on a terminal.
struct DashboardFormat;

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for DashboardFormat
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
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{:>5}\x1b[0m \x1b[2m{}:\x1b[0m ",
                level_colour(meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer target that is empty until a log file is opened.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct FileSlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for FileSlotWriter<'_> {
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
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = FileSlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileSlotWriter(lock(&self.0))
    }
}

fn lock(file: &SharedFile) -> MutexGuard<'_, Option<File>> {
    file.lock().unwrap_or_else(PoisonError::into_inner)
}

type Reload<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Runtime handles captured by [`init`].
struct LogControl {
    set_filter: Reload<EnvFilter>,
    set_stdout: Reload<bool>,
    file: SharedFile,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();

fn control() -> Result<&'static LogControl> {
    CONTROL.get().ok_or_else(|| anyhow!("logging not yet initialized"))
}

/// Parses a bare level (`warn`, `DEBUG`, ...) or a full filter directive.
pub fn parse_filter(level: &str) -> Result<EnvFilter> {
    let directive = level.trim().to_ascii_lowercase();
    if directive.is_empty() {
        bail!("log level must not be empty");
    }
    EnvFilter::try_new(&directive).map_err(|e| anyhow!("invalid log level '{level}': {e}"))
}

fn initial_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => parse_filter(level),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

fn stdout_gate(enabled: bool) -> EnvFilter {
    EnvFilter::new(if enabled { "trace" } else { "off" })
}

/// Installs the global subscriber according to `config`.
///
/// A second call, or a call after another subscriber was installed, leaves
/// the existing one in place and returns an error.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file: SharedFile = Arc::new(Mutex::new(None));

    let (level_layer, level_handle) =
        reload::Layer::new(initial_filter(config.level.as_deref())?);
    let (gate_layer, gate_handle) = reload::Layer::new(stdout_gate(config.stdout));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(DashboardFormat)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(gate_layer);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(DashboardFormat)
        .with_ansi(false)
        .with_writer(FileSlot(file.clone()));

    tracing_subscriber::registry()
        .with(level_layer)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("a global subscriber is already installed")?;

    let control = LogControl {
        set_filter: Box::new(move |filter: EnvFilter| {
            level_handle
                .reload(filter)
                .map_err(|e| anyhow!("filter reload failed: {e}"))
        }),
        set_stdout: Box::new(move |enabled: bool| {
            gate_handle
                .reload(stdout_gate(enabled))
                .map_err(|e| anyhow!("stdout reload failed: {e}"))
        }),
        file,
    };
    if CONTROL.set(control).is_err() {
        bail!("logging already initialized");
    }

    if let Some(path) = &config.file {
        enable_file_logging(path)?;
    }
    Ok(())
}

/// Replaces the global filter. Accepts the same input as [`parse_filter`].
pub fn set_log_level(level: &str) -> Result<()> {
    let filter = parse_filter(level)?;
    (control()?.set_filter)(filter)
}

/// Shows or hides stdout output. File logging is unaffected.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    (control()?.set_stdout)(enabled)
}

/// Appends log output to `path`, replacing any file already open. The
/// parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let control = control()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *lock(&control.file) = Some(file);
    Ok(())
}

pub fn disable_file_logging() {
    if let Ok(control) = control() {
        *lock(&control.file) = None;
    }
}
