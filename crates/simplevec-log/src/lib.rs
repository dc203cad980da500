//! A minimal, zero-dependency logging crate for the `SimpleVec` workspace.
//!
//! Containers in this workspace report buffer lifecycle events (block
//! allocation, reallocation, failed fallible allocations) through the macros
//! exported here. Messages go to stderr, tagged with their level and the
//! module path of the call site.
//!
//! The level defaults to [`Level::Info`], so container tracing is silent
//! unless raised, either in code with [`set_level`] or from the environment
//! with [`init_from_env`] and the `SIMPLEVEC_LOG` variable.
//!
//! # Example
//!
//! ```
//! use simplevec_log::{debug, info, trace, Level};
//!
//! simplevec_log::set_level(Level::Debug);
//!
//! let capacity = 8;
//! info!("reserved {} slots", capacity);
//! debug!("layout: {:?}", (capacity, 4));
//! trace!("not shown at debug level");
//! ```

use std::fmt::{self, Arguments};
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV_VAR: &str = "SIMPLEVEC_LOG";

/// Severity of a log message.
///
/// Ordered from most severe (`Error`) to most verbose (`Trace`); a logger at
/// level `L` emits every message whose level is `<= L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Unrecoverable failures.
    Error = 0,
    /// Suspicious but tolerated conditions.
    Warn = 1,
    /// High-level progress.
    Info = 2,
    /// Diagnostic detail, such as failed fallible allocations.
    Debug = 3,
    /// Per-operation detail, such as every buffer reallocation.
    Trace = 4,
}

impl Level {
    const fn color_code(self) -> &'static str {
        match self {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[33m",
            Level::Info => "\x1b[32m",
            Level::Debug => "\x1b[36m",
            Level::Trace => "\x1b[35m",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Error,
            1 => Level::Warn,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Returns the upper-case name of this level.
    ///
    /// ```
    /// use simplevec_log::Level;
    ///
    /// assert_eq!(Level::Warn.as_str(), "WARN");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid log level {:?}: expected one of error, warn, info, debug, trace",
            self.input
        )
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Parses a level name, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use simplevec_log::Level;
    ///
    /// assert_eq!("trace".parse(), Ok(Level::Trace));
    /// assert_eq!(" INFO ".parse(), Ok(Level::Info));
    /// assert!("verbose".parse::<Level>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(ParseLevelError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Level filter shared by every macro invocation.
///
/// Only the level is stored, in an atomic, so the filter check in the macros
/// is a single relaxed load.
pub struct Logger {
    level: AtomicU8,
}

impl Logger {
    const fn new(level: Level) -> Self {
        Logger {
            level: AtomicU8::new(level as u8),
        }
    }

    /// Sets the most verbose level that will be emitted.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Returns the current level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Returns true if a message at `level` would be emitted.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the global logger, creating it at [`Level::Info`] on first use.
pub fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(Level::Info))
}

/// Sets the level of the global logger.
pub fn set_level(level: Level) {
    get_logger().set_level(level);
}

/// Sets the level of the global logger from a level name.
///
/// On error the current level is kept.
///
/// ```
/// simplevec_log::set_level_from_str("debug").unwrap();
/// assert!(simplevec_log::set_level_from_str("loud").is_err());
/// ```
pub fn set_level_from_str(s: &str) -> Result<(), ParseLevelError> {
    set_level(s.parse()?);
    Ok(())
}

/// Resolves the value of [`LOG_ENV_VAR`] into a level.
///
/// `None` and empty values mean "not configured".
fn level_from_env_value(value: Option<&str>) -> Result<Option<Level>, ParseLevelError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some),
    }
}

/// Configures the global logger from the `SIMPLEVEC_LOG` environment variable.
///
/// Returns the level that was applied, `Ok(None)` if the variable is unset or
/// empty, and an error if it holds something other than a level name. The
/// current level is left alone in the last two cases.
///
/// ```no_run
/// // SIMPLEVEC_LOG=trace cargo test
/// let applied = simplevec_log::init_from_env().expect("bad SIMPLEVEC_LOG");
/// ```
pub fn init_from_env() -> Result<Option<Level>, ParseLevelError> {
    let raw = std::env::var(LOG_ENV_VAR).ok();
    let level = level_from_env_value(raw.as_deref())?;
    if let Some(level) = level {
        set_level(level);
    }
    Ok(level)
}

/// Writes one formatted record. Called by the macros after the level check.
#[doc(hidden)]
pub fn __log_with_target(level: Level, target: &str, args: Arguments) {
    const RESET: &str = "\x1b[0m";

    if !get_logger().enabled(level) {
        return;
    }

    let color = level.color_code();
    eprintln!("{color}[{level}]{RESET} {target}: {args}");
}

/// Logs a message at an explicit level, tagged with the caller's module path.
///
/// ```
/// use simplevec_log::{log, Level};
///
/// log!(level: Level::Info, "grew to {} slots", 16);
/// ```
#[macro_export]
macro_rules! log {
    (level: $level:expr, $($arg:tt)*) => {
        {
            let level = $level;
            if $crate::get_logger().enabled(level) {
                $crate::__log_with_target(
                    level,
                    module_path!(),
                    format_args!($($arg)*)
                );
            }
        }
    };
}

/// Logs a message at the Error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Error, $($arg)*)
    };
}

/// Logs a message at the Warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Warn, $($arg)*)
    };
}

/// Logs a message at the Info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Info, $($arg)*)
    };
}

/// Logs a message at the Debug level.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Debug, $($arg)*)
    };
}

/// Logs a message at the Trace level.
///
/// ```
/// use simplevec_log::trace;
///
/// let (old, new) = (4, 8);
/// trace!("reallocate: capacity {} -> {}", old, new);
/// ```
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        $crate::log!(level: $crate::Level::Trace, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("error".parse(), Ok(Level::Error));
        assert_eq!("WARN".parse(), Ok(Level::Warn));
        assert_eq!("Info".parse(), Ok(Level::Info));
        assert_eq!("debug\n".parse(), Ok(Level::Debug));
        assert_eq!("trace".parse(), Ok(Level::Trace));

        let err = "loud".parse::<Level>().unwrap_err();
        assert_eq!(err.input(), "loud");
        assert!(err.to_string().contains("\"loud\""));
    }

    #[test]
    fn test_level_display_matches_as_str() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level.to_string(), level.as_str());
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn test_logger_level_filtering() {
        let logger = Logger::new(Level::Info);

        assert!(logger.enabled(Level::Error));
        assert!(logger.enabled(Level::Warn));
        assert!(logger.enabled(Level::Info));
        assert!(!logger.enabled(Level::Debug));
        assert!(!logger.enabled(Level::Trace));

        logger.set_level(Level::Trace);
        assert!(logger.enabled(Level::Trace));
        assert_eq!(logger.level(), Level::Trace);

        logger.set_level(Level::Error);
        assert!(!logger.enabled(Level::Warn));
    }

    #[test]
    fn test_env_value_resolution() {
        assert_eq!(level_from_env_value(None), Ok(None));
        assert_eq!(level_from_env_value(Some("")), Ok(None));
        assert_eq!(level_from_env_value(Some("  ")), Ok(None));
        assert_eq!(level_from_env_value(Some("trace")), Ok(Some(Level::Trace)));
        assert!(level_from_env_value(Some("everything")).is_err());
    }

    #[test]
    fn test_set_level_from_str_rejects_garbage() {
        assert!(set_level_from_str("invalid").is_err());
    }

    #[test]
    fn test_global_logger_singleton() {
        assert!(std::ptr::eq(get_logger(), get_logger()));
    }

    #[test]
    fn test_macros_from_threads() {
        use std::thread;

        let handles: Vec<_> = (0..4)
            .map(|i| {
                thread::spawn(move || {
                    info!("thread {} message", i);
                    trace!("thread {} trace", i);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
