//! [`BaseLogger`] forwarding lines to the [`log`] facade.
use crate::base::{BaseLogger, sprint};
use log::{Level, Record};
use std::{fmt, panic::Location};

/// Sends each line to the installed [`log`] logger as a record with a fixed
/// target and level, attributed to the caller's file and line.
///
/// Useful to put the debug gate in front of `env_logger` or similar.
#[derive(Debug, Clone)]
pub struct LogFacade {
    target: String,
    level: Level,
}

impl LogFacade {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            level: Level::Debug,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn enabled(&self) -> bool {
        self.level <= log::STATIC_MAX_LEVEL && self.level <= log::max_level()
    }

    /// Sends `line` as one record, without its trailing newline.
    fn log(&self, location: &'static Location<'static>, line: &str) {
        let line = line.strip_suffix('\n').unwrap_or(line);
        log::logger().log(
            &Record::builder()
                .args(format_args!("{line}"))
                .level(self.level)
                .target(&self.target)
                .file_static(Some(location.file()))
                .line(Some(location.line()))
                .build(),
        );
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl BaseLogger for LogFacade {
    #[track_caller]
    fn printf(&self, args: fmt::Arguments<'_>) {
        if !self.enabled() {
            return;
        }
        match args.as_str() {
            Some(s) => self.log(Location::caller(), s),
            None => self.log(Location::caller(), &fmt::format(args)),
        }
    }

    #[track_caller]
    fn print(&self, values: &[&dyn fmt::Display]) {
        if self.enabled() {
            self.log(Location::caller(), &sprint(values));
        }
    }

    // each record is already a line, so no newline is added
    #[track_caller]
    fn println(&self, values: &[&dyn fmt::Display]) {
        if self.enabled() {
            self.log(Location::caller(), &sprint(values));
        }
    }
}
