//! Writer backed [`BaseLogger`] with a prefix and header [`Flags`].
use crate::{
    Flags,
    base::{BaseLogger, sprint, sprintln},
};
use std::{
    fmt,
    io::{self, Write},
    panic::Location,
    sync::{Mutex, MutexGuard, PoisonError},
};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]/[month]/[day] ");
const TIME: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const TIME_MICROS: &[BorrowedFormatItem<'_>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:6]");

/// Writes one line per call to `out`, each line starting with a header
/// described by the logger's [`Flags`]. Writes are serialized.
pub struct StdLogger<W> {
    inner: Mutex<Inner<W>>,
}

struct Inner<W> {
    out: W,
    prefix: String,
    flags: Flags,
    buf: Vec<u8>,
}

impl<W: Write> StdLogger<W> {
    pub fn new(out: W, prefix: impl Into<String>, flags: Flags) -> Self {
        Self {
            inner: Mutex::new(Inner {
                out,
                prefix: prefix.into(),
                flags,
                buf: Vec::new(),
            }),
        }
    }

    /// Writes `message` as a single line attributed to `location`.
    ///
    /// A newline is appended unless `message` already ends with one.
    /// This is the only operation that reports write failures.
    pub fn output(&self, location: &Location<'_>, message: &str) -> io::Result<()> {
        let mut inner = self.lock();
        let Inner {
            out,
            prefix,
            flags,
            buf,
        } = &mut *inner;

        let now = if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
            now(*flags)
        } else {
            OffsetDateTime::UNIX_EPOCH
        };

        buf.clear();
        format_header(buf, *flags, prefix, now, location.file(), location.line())?;
        buf.extend_from_slice(message.as_bytes());
        if !message.ends_with('\n') {
            buf.push(b'\n');
        }
        out.write_all(buf)
    }

    pub fn set_output(&self, out: W) {
        self.lock().out = out;
    }

    pub fn into_inner(self) -> W {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }
}

impl<W> StdLogger<W> {
    pub fn prefix(&self) -> String {
        self.lock().prefix.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.lock().prefix = prefix.into();
    }

    pub fn flags(&self) -> Flags {
        self.lock().flags
    }

    pub fn set_flags(&self, flags: Flags) {
        self.lock().flags = flags;
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W>> {
        // a panic mid-write leaves at worst a partial line
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StdLogger<io::Stderr> {
    /// Logger writing to stderr.
    pub fn stderr(prefix: impl Into<String>, flags: Flags) -> Self {
        Self::new(io::stderr(), prefix, flags)
    }
}

impl Default for StdLogger<io::Stderr> {
    fn default() -> Self {
        Self::stderr("", Flags::STD)
    }
}

// Write errors are dropped here, callers wanting them use `output`.
impl<W: Write> BaseLogger for StdLogger<W> {
    #[track_caller]
    fn printf(&self, args: fmt::Arguments<'_>) {
        let location = Location::caller();
        let _ = match args.as_str() {
            Some(s) => self.output(location, s),
            None => self.output(location, &fmt::format(args)),
        };
    }

    #[track_caller]
    fn print(&self, values: &[&dyn fmt::Display]) {
        let _ = self.output(Location::caller(), &sprint(values));
    }

    #[track_caller]
    fn println(&self, values: &[&dyn fmt::Display]) {
        let _ = self.output(Location::caller(), &sprintln(values));
    }
}

fn now(flags: Flags) -> OffsetDateTime {
    if flags.contains(Flags::UTC) {
        OffsetDateTime::now_utc()
    } else {
        // the local offset is unavailable in some multi-threaded processes
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

fn format_header(
    buf: &mut Vec<u8>,
    flags: Flags,
    prefix: &str,
    now: OffsetDateTime,
    file: &str,
    line: u32,
) -> io::Result<()> {
    if !flags.contains(Flags::MSG_PREFIX) {
        buf.extend_from_slice(prefix.as_bytes());
    }

    if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
        if flags.contains(Flags::DATE) {
            now.format_into(buf, DATE).map_err(io::Error::other)?;
        }
        if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
            let format = if flags.contains(Flags::MICROSECONDS) {
                TIME_MICROS
            } else {
                TIME
            };
            now.format_into(buf, format).map_err(io::Error::other)?;
            buf.push(b' ');
        }
    }

    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        let file = if flags.contains(Flags::SHORT_FILE) {
            file.rsplit(['/', '\\']).next().unwrap_or(file)
        } else {
            file
        };
        write!(buf, "{file}:{line}: ")?;
    }

    if flags.contains(Flags::MSG_PREFIX) {
        buf.extend_from_slice(prefix.as_bytes());
    }
    Ok(())
}
