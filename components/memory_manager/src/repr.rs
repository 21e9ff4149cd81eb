//! Payload rendering for heap dumps.
//!
//! Dumps spell payloads the way the reference dumps do: strings in single
//! quotes, integers bare, `None` for an absent value and `True`/`False` for
//! booleans.

use std::fmt::{self, Write};

/// A payload that can be written into a heap dump.
///
/// # Example
///
/// ```
/// use memory_manager::repr::ReprOf;
///
/// assert_eq!(ReprOf(&"Node A").to_string(), "'Node A'");
/// assert_eq!(ReprOf(&42u32).to_string(), "42");
/// assert_eq!(ReprOf(&None::<u8>).to_string(), "None");
/// ```
pub trait Repr {
    /// Writes the dump form of `self`.
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// [`Display`](fmt::Display) adapter over [`Repr`].
pub struct ReprOf<'a, T: ?Sized>(pub &'a T);

impl<T: Repr + ?Sized> fmt::Display for ReprOf<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_repr(f)
    }
}

/// Writes `s` as a quoted string literal.
///
/// Single quotes unless the text contains a single quote and no double quote.
fn write_quoted(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

impl Repr for str {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(self, f)
    }
}

impl Repr for String {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(self, f)
    }
}

impl Repr for char {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        write_quoted(self.encode_utf8(&mut buf), f)
    }
}

impl Repr for bool {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if *self { "True" } else { "False" })
    }
}

impl Repr for () {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("None")
    }
}

macro_rules! impl_repr_integer {
    ($($ty:ty),*) => {
        $(
            impl Repr for $ty {
                fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

impl_repr_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_repr_float {
    ($($ty:ty),*) => {
        $(
            impl Repr for $ty {
                fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    if self.is_nan() {
                        f.write_str("nan")
                    } else {
                        // Debug keeps the trailing `.0` on whole numbers
                        write!(f, "{:?}", self)
                    }
                }
            }
        )*
    };
}

impl_repr_float!(f32, f64);

impl<T: Repr> Repr for Option<T> {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.fmt_repr(f),
            None => f.write_str("None"),
        }
    }
}

impl<T: Repr> Repr for [T] {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt_repr(f)?;
        }
        f.write_char(']')
    }
}

impl<T: Repr> Repr for Vec<T> {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice().fmt_repr(f)
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_repr(f)
    }
}

impl<T: Repr + ?Sized> Repr for Box<T> {
    fn fmt_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_repr(f)
    }
}
