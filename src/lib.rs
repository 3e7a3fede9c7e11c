//! Debug output for a line logger, switched on and off at runtime and
//! optionally filtered by a 64-bit mask.
//!
//! There are two kinds of debug calls: ones that print whenever debug output
//! is enabled, and `*_m` ones that also need their bit set in the mask.
//!
//! ```
//! use dbglog::{DbgLogger, Flags};
//!
//! const MY_DEBUG_ONE: u64 = 1 << 0;
//! const MY_DEBUG_TWO: u64 = 1 << 1;
//!
//! let d = DbgLogger::new(std::io::stderr(), "myapp ", Flags::STD);
//! d.printf(format_args!("printme!"));
//! d.enable();
//! d.set_mask(MY_DEBUG_ONE);
//! dbglog::debugf_m!(d, MY_DEBUG_ONE, "debug"); // prints
//! dbglog::debugf_m!(d, MY_DEBUG_TWO, "debug"); // does NOT print
//! ```
mod base;
pub mod config;
mod dbglog;
mod debuglog;
mod facade;
mod flags;
mod std_logger;

pub use crate::{
    base::BaseLogger,
    config::{ConfigError, DebugConfig},
    dbglog::DbgLogger,
    facade::LogFacade,
    flags::Flags,
    std_logger::StdLogger,
};
