use dbglog::{DbgLogger, Flags, StdLogger};
use std::{
    cell::Cell,
    io::{self, Write},
    sync::{Arc, Mutex},
};

/// Clonable in-memory sink.
#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    fn take(&self) -> String {
        String::from_utf8(std::mem::take(&mut *self.0.lock().unwrap())).unwrap()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logger(prefix: &str) -> (DbgLogger<StdLogger<Sink>>, Sink) {
    let sink = Sink::default();
    (DbgLogger::new(sink.clone(), prefix, Flags::NONE), sink)
}

#[test]
fn disabled_by_default() {
    let (log, sink) = logger("");
    log.debugf(format_args!("x"));
    dbglog::debugf!(log, "x");
    dbglog::debugln!(log, "x");
    assert_eq!(sink.take(), "");
}

#[test]
fn enabled_debugf() {
    let (log, sink) = logger("app ");
    log.enable();
    dbglog::debugf!(log, "x={}", 5);
    assert_eq!(sink.take(), "app x=5\n");
}

#[test]
fn enabled_debugf_with_header() {
    let sink = Sink::default();
    let log = DbgLogger::new(sink.clone(), "app ", Flags::STD | Flags::UTC);
    log.enable();
    dbglog::debugf!(log, "x={}", 5);
    let out = sink.take();
    assert!(out.starts_with("app "), "{out:?}");
    assert!(out.ends_with(" x=5\n"), "{out:?}");
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn last_toggle_wins() {
    let (log, sink) = logger("");
    for toggles in [
        &[true][..],
        &[false],
        &[true, false],
        &[false, true],
        &[true, true, false, true],
        &[false, false],
    ] {
        for &on in toggles {
            if on {
                log.enable();
            } else {
                log.disable();
            }
        }
        let expected = *toggles.last().unwrap();

        dbglog::debugf!(log, "f");
        assert_eq!(sink.take() == "f\n", expected, "debugf after {toggles:?}");
        dbglog::debugln!(log, "l");
        assert_eq!(sink.take() == "l\n", expected, "debugln after {toggles:?}");
    }
}

#[test]
fn masked_gate() {
    let (log, sink) = logger("");
    log.enable();
    log.set_mask(0b01);

    dbglog::debugf_m!(log, 0b01, "a");
    dbglog::debugf_m!(log, 0b10, "b");
    dbglog::debugf_m!(log, 0b11, "c");
    assert_eq!(sink.take(), "a\n");
}

#[test]
fn masked_gate_matches_rule() {
    let (log, sink) = logger("");
    let masks = [0, 1, 0b0110, 0xff00, u64::MAX, 1 << 63];
    let bits = [0, 1, 0b0010, 0b0110, 0b0111, 0x0100, 1 << 63, u64::MAX];

    for enabled in [false, true] {
        if enabled {
            log.enable();
        } else {
            log.disable();
        }
        for mask in masks {
            log.set_mask(mask);
            for bit in bits {
                let expected = enabled && bit != 0 && bit & mask == bit;

                log.debugf_m(bit, format_args!("f"));
                assert_eq!(!sink.take().is_empty(), expected, "debugf_m {bit:#x} {mask:#x}");
                log.debug_m(bit, &[&"p"]);
                assert_eq!(!sink.take().is_empty(), expected, "debug_m {bit:#x} {mask:#x}");
                log.debugln_m(bit, &[&"l"]);
                assert_eq!(!sink.take().is_empty(), expected, "debugln_m {bit:#x} {mask:#x}");
            }
        }
    }
}

#[test]
fn zero_bit_never_prints() {
    let (log, sink) = logger("");
    log.enable();
    log.set_mask(u64::MAX);
    dbglog::debugf_m!(log, 0, "f");
    dbglog::debug_m!(log, 0, "p");
    dbglog::debugln_m!(log, 0, "l");
    assert_eq!(sink.take(), "");
}

#[test]
fn set_mask_applies_to_next_call() {
    let (log, sink) = logger("");
    log.enable();
    log.set_mask(0b100);
    dbglog::debug_m!(log, 0b100, "in");
    dbglog::debug_m!(log, 0b010, "out");
    assert_eq!(sink.take(), "in\n");

    log.set_mask(0b010);
    dbglog::debug_m!(log, 0b100, "out");
    dbglog::debug_m!(log, 0b010, "in");
    assert_eq!(sink.take(), "in\n");
}

#[test]
fn disable_silences_gated_calls() {
    let (log, sink) = logger("");
    log.enable();
    log.set_mask(u64::MAX);
    log.disable();

    dbglog::debugf!(log, "f");
    dbglog::debugln!(log, "l");
    dbglog::debugf_m!(log, 1, "f");
    dbglog::debug_m!(log, 1, "p");
    dbglog::debugln_m!(log, 1, "l");
    assert_eq!(sink.take(), "");
}

#[test]
fn values_are_space_separated() {
    let (log, sink) = logger("");
    log.enable();
    log.set_mask(1);
    dbglog::debug!(log, "a", 1, 2.5);
    dbglog::debugln!(log, "b", 'c');
    dbglog::debugln_m!(log, 1, "m", "n");
    assert_eq!(sink.take(), "a 1 2.5\nb c\nm n\n");
}

#[test]
fn gated_args_not_evaluated() {
    let (log, sink) = logger("");
    let evaluated = Cell::new(0);
    let count = || {
        evaluated.set(evaluated.get() + 1);
        evaluated.get()
    };

    dbglog::debugf!(log, "{}", count());
    dbglog::debugf_m!(log, 1, "{}", count());
    log.enable();
    dbglog::debugf_m!(log, 1, "{}", count());
    assert_eq!(evaluated.get(), 0);

    dbglog::debugf!(log, "{}", count());
    assert_eq!(evaluated.get(), 1);
    assert_eq!(sink.take(), "1\n");
}

#[test]
fn passthrough_always_prints() {
    let (log, sink) = logger("p ");
    log.printf(format_args!("f"));
    log.print(&[&"a", &"b"]);
    log.println(&[&"c"]);
    assert_eq!(sink.take(), "p f\np a b\np c\n");
}

#[test]
fn source_location_is_call_site() {
    let sink = Sink::default();
    let log = DbgLogger::new(sink.clone(), "", Flags::SHORT_FILE);
    log.enable();
    let line = line!() + 1;
    dbglog::debugf!(log, "here");
    assert_eq!(sink.take(), format!("conditional.rs:{line}: here\n"));
}

#[test]
fn shared_between_threads() {
    let (log, sink) = logger("");
    let log = Arc::new(log);
    log.set_mask(0b11);

    std::thread::scope(|s| {
        s.spawn(|| log.enable()).join().unwrap();
        for bit in [0b01, 0b10] {
            let log = &log;
            s.spawn(move || dbglog::debugf_m!(log, bit, "{bit}"));
        }
    });

    let out = sink.take();
    let mut lines: Vec<_> = out.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines, ["1", "2"]);
}

#[cfg(not(feature = "unconditional-debug"))]
#[test]
fn debug_is_gated() {
    let (log, sink) = logger("");
    dbglog::debug!(log, "y");
    assert_eq!(sink.take(), "");

    log.enable();
    dbglog::debug!(log, "y");
    assert_eq!(sink.take(), "y\n");
}

#[cfg(feature = "unconditional-debug")]
#[test]
fn debug_prints_while_disabled() {
    let (log, sink) = logger("");
    dbglog::debug!(log, "y");
    assert_eq!(sink.take(), "y\n");

    log.enable();
    log.disable();
    dbglog::debug!(log, "y");
    assert_eq!(sink.take(), "y\n");
}
