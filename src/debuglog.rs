// src/debuglog.rs
//! Macro front ends for the [`DbgLogger`](crate::DbgLogger) debug methods.
//!
//! The format and masked macros check the gate before evaluating their
//! arguments, so disabled debug lines cost a load and a branch.

/// `printf` style debug line, printed when the logger is enabled.
///
/// ```
/// # let log = dbglog::DbgLogger::new(Vec::new(), "", dbglog::Flags::NONE);
/// dbglog::debugf!(log, "x={}", 5);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            logger.debugf(::std::format_args!($($arg)+));
        }
    }};
}

/// Space separated values, printed when the logger is enabled
/// (always, with the `unconditional-debug` feature).
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $logger.debug(&[$(&$value as &dyn ::std::fmt::Display),*])
    };
}

/// Space separated values and a newline, printed when the logger is enabled.
#[macro_export]
macro_rules! debugln {
    ($logger:expr $(, $value:expr)* $(,)?) => {{
        let logger = &$logger;
        if logger.is_enabled() {
            logger.debugln(&[$(&$value as &dyn ::std::fmt::Display),*]);
        }
    }};
}

/// Like [`debugf!`] but also requires `bit` to be in the logger's mask.
#[macro_export]
macro_rules! debugf_m {
    ($logger:expr, $bit:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let bit: u64 = $bit;
        if logger.is_active(bit) {
            logger.debugf_m(bit, ::std::format_args!($($arg)+));
        }
    }};
}

/// Like [`debug!`] but requires the logger to be enabled and `bit` to be in
/// its mask.
#[macro_export]
macro_rules! debug_m {
    ($logger:expr, $bit:expr $(, $value:expr)* $(,)?) => {{
        let logger = &$logger;
        let bit: u64 = $bit;
        if logger.is_active(bit) {
            logger.debug_m(bit, &[$(&$value as &dyn ::std::fmt::Display),*]);
        }
    }};
}

/// Like [`debugln!`] but also requires `bit` to be in the logger's mask.
#[macro_export]
macro_rules! debugln_m {
    ($logger:expr, $bit:expr $(, $value:expr)* $(,)?) => {{
        let logger = &$logger;
        let bit: u64 = $bit;
        if logger.is_active(bit) {
            logger.debugln_m(bit, &[$(&$value as &dyn ::std::fmt::Display),*]);
        }
    }};
}
