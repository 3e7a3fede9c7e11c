//! Debug output gated by an enable switch and a bitmask.
use crate::{BaseLogger, Flags, StdLogger};
use std::{
    fmt,
    io::Write,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
};

/// Wraps a [`BaseLogger`] adding `debug*` methods that only print once
/// [`enable`](Self::enable) has been called, and `debug*_m` methods that
/// additionally require their `bit` to be set in the [mask](Self::set_mask).
///
/// The switch and mask may be flipped through a shared reference at any time.
/// A concurrent `debug*` call sees either the old or the new value.
///
/// ```
/// use dbglog::{DbgLogger, Flags};
///
/// const NET: u64 = 1 << 0;
/// const DISK: u64 = 1 << 1;
///
/// let log = DbgLogger::new(Vec::new(), "app ", Flags::NONE);
/// log.enable();
/// log.set_mask(NET);
/// dbglog::debugf_m!(log, NET, "printed");
/// dbglog::debugf_m!(log, DISK, "not printed");
/// assert_eq!(log.into_base().into_inner(), b"app printed\n");
/// ```
pub struct DbgLogger<L = StdLogger<std::io::Stderr>> {
    base: L,
    enabled: AtomicBool,
    mask: AtomicU64,
}

impl<W: Write> DbgLogger<StdLogger<W>> {
    /// Creates a disabled logger, with an empty mask, writing to `out`.
    pub fn new(out: W, prefix: impl Into<String>, flags: Flags) -> Self {
        Self::with_base(StdLogger::new(out, prefix, flags))
    }
}

impl<L> DbgLogger<L> {
    /// Creates a disabled logger, with an empty mask, in front of `base`.
    pub fn with_base(base: L) -> Self {
        Self {
            base,
            enabled: AtomicBool::new(false),
            mask: AtomicU64::new(0),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Sets the bitfield checked by the `debug*_m` methods.
    pub fn set_mask(&self, mask: u64) {
        self.mask.store(mask, Ordering::Relaxed);
    }

    pub fn mask(&self) -> u64 {
        self.mask.load(Ordering::Relaxed)
    }

    /// Returns true if a `debug*_m` call with `bit` would print.
    ///
    /// Every bit of `bit` must be in the mask. `0` never passes.
    pub fn is_active(&self, bit: u64) -> bool {
        self.is_enabled() && bit != 0 && bit & self.mask() == bit
    }

    pub fn base(&self) -> &L {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut L {
        &mut self.base
    }

    pub fn into_base(self) -> L {
        self.base
    }
}

impl<L: BaseLogger> DbgLogger<L> {
    /// [`BaseLogger::printf`] when enabled.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled() {
            self.base.printf(args);
        }
    }

    /// [`BaseLogger::print`] when enabled.
    ///
    /// With the `unconditional-debug` feature this prints regardless of
    /// [`is_enabled`](Self::is_enabled).
    #[track_caller]
    pub fn debug(&self, values: &[&dyn fmt::Display]) {
        if cfg!(feature = "unconditional-debug") || self.is_enabled() {
            self.base.print(values);
        }
    }

    /// [`BaseLogger::println`] when enabled.
    #[track_caller]
    pub fn debugln(&self, values: &[&dyn fmt::Display]) {
        if self.is_enabled() {
            self.base.println(values);
        }
    }

    /// [`BaseLogger::printf`] when enabled and `bit` is in the mask.
    #[track_caller]
    pub fn debugf_m(&self, bit: u64, args: fmt::Arguments<'_>) {
        if self.is_active(bit) {
            self.base.printf(args);
        }
    }

    /// [`BaseLogger::print`] when enabled and `bit` is in the mask.
    #[track_caller]
    pub fn debug_m(&self, bit: u64, values: &[&dyn fmt::Display]) {
        if self.is_active(bit) {
            self.base.print(values);
        }
    }

    /// [`BaseLogger::println`] when enabled and `bit` is in the mask.
    #[track_caller]
    pub fn debugln_m(&self, bit: u64, values: &[&dyn fmt::Display]) {
        if self.is_active(bit) {
            self.base.println(values);
        }
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.base.printf(args);
    }

    #[track_caller]
    pub fn print(&self, values: &[&dyn fmt::Display]) {
        self.base.print(values);
    }

    #[track_caller]
    pub fn println(&self, values: &[&dyn fmt::Display]) {
        self.base.println(values);
    }
}

impl Default for DbgLogger {
    fn default() -> Self {
        Self::with_base(StdLogger::default())
    }
}

impl<L> fmt::Debug for DbgLogger<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbgLogger")
            .field("enabled", &self.is_enabled())
            .field("mask", &format_args!("{:#x}", self.mask()))
            .finish_non_exhaustive()
    }
}
