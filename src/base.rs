//! The line logger capability [`DbgLogger`](crate::DbgLogger) gates.
use std::{fmt, sync::Arc};

/// A logger able to print formatted lines and lists of values.
///
/// Each method carries `#[track_caller]` so implementations can report the
/// location of the code that asked for the line.
pub trait BaseLogger {
    /// Prints a line built from `args`.
    #[track_caller]
    fn printf(&self, args: fmt::Arguments<'_>);

    /// Prints `values` separated by single spaces.
    #[track_caller]
    fn print(&self, values: &[&dyn fmt::Display]);

    /// Prints `values` separated by single spaces, followed by a newline.
    #[track_caller]
    fn println(&self, values: &[&dyn fmt::Display]);
}

/// Joins `values` with single spaces.
pub(crate) fn sprint(values: &[&dyn fmt::Display]) -> String {
    use fmt::Write;

    let mut out = String::new();
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{value}");
    }
    out
}

/// Like [`sprint`] with a trailing newline.
pub(crate) fn sprintln(values: &[&dyn fmt::Display]) -> String {
    let mut out = sprint(values);
    out.push('\n');
    out
}

macro_rules! forward_base_logger {
    ($($ty:ty),*) => {$(
        impl<L: BaseLogger + ?Sized> BaseLogger for $ty {
            #[track_caller]
            fn printf(&self, args: fmt::Arguments<'_>) {
                (**self).printf(args)
            }

            #[track_caller]
            fn print(&self, values: &[&dyn fmt::Display]) {
                (**self).print(values)
            }

            #[track_caller]
            fn println(&self, values: &[&dyn fmt::Display]) {
                (**self).println(values)
            }
        }
    )*};
}

forward_base_logger!(&L, Box<L>, Arc<L>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprint_spaces() {
        assert_eq!(sprint(&[&"a", &1, &2.5]), "a 1 2.5");
        assert_eq!(sprint(&[]), "");
    }

    #[test]
    fn sprintln_newline() {
        assert_eq!(sprintln(&[&"a", &"b"]), "a b\n");
        assert_eq!(sprintln(&[]), "\n");
    }
}
