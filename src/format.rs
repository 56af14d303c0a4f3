//! printf-style interpolation of resolved translation strings.
//!
//! Supported verbs: `%s`, `%v`, `%d`, `%f`, `%t`, `%q`, `%x` and the literal `%%`.
//! A directive reads `%[flags][[n]][width][.precision]verb`:
//!
//! - flags: `-` left-justifies, `0` pads with zeros, `+` and ` ` sign positive
//!   numbers, `#` prefixes hex output with `0x`;
//! - `[n]` selects the 1-based argument; once positions are used, unused arguments are
//!   no longer reported.

use std::fmt::{
    self,
    Write,
};
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Missing argument {position} for the format string")]
    MissingArgument { position: usize },

    #[error("{count} extra argument(s) for the format string")]
    ExtraArguments { count: usize },

    #[error("Unknown format verb '%{verb}'")]
    BadVerb { verb: char },

    #[error("Argument {position} cannot be formatted with '%{verb}'")]
    TypeMismatch { verb: char, position: usize },

    #[error("Invalid argument position in format string")]
    BadPosition,

    #[error("Format string ends in the middle of a directive")]
    Truncated,
}

/// A value interpolated into a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Str(&'a str),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for FormatArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for FormatArg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for FormatArg<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<u64> for FormatArg<'_> {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<usize> for FormatArg<'_> {
    fn from(value: usize) -> Self {
        Self::UInt(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FormatArg<'_> {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Where padding goes when a width is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    /// Spaces before the text.
    Right,
    /// `-`: spaces after the text.
    Left,
    /// Right, padded with zeros; numbers keep their sign and `0x` in front.
    Zero,
}

/// What to print in front of a non-negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    /// Nothing.
    Minus,
    /// `+`
    Plus,
    /// ` `
    Space,
}

/// A parsed `%` directive.
#[derive(Debug, Clone, Copy)]
struct Directive {
    align: Align,
    /// Prefix for non-negative numbers.
    sign: Sign,
    /// `#`: `0x` prefix for `%x`.
    alternate: bool,
    /// Explicit 1-based argument position.
    position: Option<usize>,
    /// Minimum width in characters.
    width: Option<usize>,
    /// Digits after the point for floats, maximum characters for strings.
    precision: Option<usize>,
    /// Conversion character, such as `d` in `%5d`.
    verb: char,
}

/// Interpolates `args` into `template`.
///
/// # Errors
/// Returns error when the template references a missing argument, uses an unknown verb
/// or a verb that does not fit the argument, or leaves arguments unused.
///
/// # Examples
/// ```
/// use template_i18n::format::{sprintf, FormatArg};
///
/// let out = sprintf("%s has %d new messages", &[FormatArg::from("Ann"), FormatArg::from(3)]);
/// assert_eq!(out.unwrap(), "Ann has 3 new messages");
/// ```
pub fn sprintf(template: &str, args: &[FormatArg<'_>]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;
    let mut reordered = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.next_if_eq(&'%').is_some() {
            out.push('%');
            continue;
        }

        let directive = parse_directive(&mut chars)?;
        let index = match directive.position {
            Some(position) => {
                reordered = true;
                position - 1
            }
            None => next_arg,
        };
        let arg = args.get(index).ok_or(FormatError::MissingArgument { position: index + 1 })?;
        render(&mut out, &directive, *arg, index + 1)?;
        next_arg = index + 1;
    }

    if !reordered && next_arg < args.len() {
        return Err(FormatError::ExtraArguments { count: args.len() - next_arg });
    }

    Ok(out)
}

fn parse_directive(chars: &mut Peekable<Chars<'_>>) -> Result<Directive, FormatError> {
    let mut align = Align::Right;
    let mut sign = Sign::Minus;
    let mut alternate = false;
    while let Some(flag) = chars.next_if(|&c| matches!(c, '-' | '+' | ' ' | '0' | '#')) {
        match flag {
            '-' => align = Align::Left,
            '0' if align != Align::Left => align = Align::Zero,
            '+' => sign = Sign::Plus,
            ' ' if sign != Sign::Plus => sign = Sign::Space,
            '#' => alternate = true,
            _ => {}
        }
    }

    let position = parse_position(chars)?;
    let width = take_digits(chars);
    let precision = if chars.next_if_eq(&'.').is_some() {
        Some(take_digits(chars).unwrap_or(0))
    } else {
        None
    };
    let position = match (position, parse_position(chars)?) {
        (Some(_), Some(_)) => return Err(FormatError::BadPosition),
        (first, second) => first.or(second),
    };

    let verb = chars.next().ok_or(FormatError::Truncated)?;
    Ok(Directive { align, sign, alternate, position, width, precision, verb })
}

/// Reads an optional `[n]` argument position.
fn parse_position(chars: &mut Peekable<Chars<'_>>) -> Result<Option<usize>, FormatError> {
    if chars.next_if_eq(&'[').is_some() {
        let digits = take_digits(chars);
        if chars.next_if_eq(&']').is_none() {
            return Err(FormatError::BadPosition);
        }
        match digits {
            Some(0) | None => Err(FormatError::BadPosition),
            position => Ok(position),
        }
    } else {
        Ok(None)
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
    }
    value
}

fn render(
    out: &mut String,
    directive: &Directive,
    arg: FormatArg<'_>,
    position: usize,
) -> Result<(), FormatError> {
    let mut body = String::new();
    let numeric = write_body(&mut body, directive, arg, position)?;
    if numeric && !body.starts_with('-') {
        match directive.sign {
            Sign::Plus => body.insert(0, '+'),
            Sign::Space => body.insert(0, ' '),
            Sign::Minus => {}
        }
    }
    pad(out, &body, directive, numeric);
    Ok(())
}

/// Writes the unpadded text for one argument.
///
/// Returns whether the text is a number, which makes it subject to sign flags and zero
/// padding.
fn write_body(
    out: &mut String,
    directive: &Directive,
    arg: FormatArg<'_>,
    position: usize,
) -> Result<bool, FormatError> {
    let verb = directive.verb;
    let hex_prefix = if directive.alternate { "0x" } else { "" };
    let numeric = matches!(arg, FormatArg::Int(_) | FormatArg::UInt(_) | FormatArg::Float(_));

    // Writing into a String cannot fail.
    let _ = match (verb, arg) {
        ('s' | 'v', FormatArg::Str(s)) => match directive.precision {
            Some(precision) => {
                out.extend(s.chars().take(precision));
                Ok(())
            }
            None => out.write_str(s),
        },
        ('s' | 'v', FormatArg::Float(x)) => match directive.precision {
            Some(precision) => write!(out, "{x:.precision$}"),
            None => write!(out, "{x}"),
        },
        ('s' | 'v', other) => write!(out, "{other}"),
        ('d', FormatArg::Int(i)) => write!(out, "{i}"),
        ('d', FormatArg::UInt(u)) => write!(out, "{u}"),
        ('f', FormatArg::Float(x)) => {
            let precision = directive.precision.unwrap_or(6);
            write!(out, "{x:.precision$}")
        }
        ('t', FormatArg::Bool(b)) => write!(out, "{b}"),
        ('q', FormatArg::Str(s)) => write!(out, "{s:?}"),
        ('x', FormatArg::Int(i)) if i < 0 => write!(out, "-{hex_prefix}{:x}", i.unsigned_abs()),
        ('x', FormatArg::Int(i)) => write!(out, "{hex_prefix}{i:x}"),
        ('x', FormatArg::UInt(u)) => write!(out, "{hex_prefix}{u:x}"),
        ('x', FormatArg::Str(s)) => {
            out.push_str(hex_prefix);
            s.bytes().try_for_each(|byte| write!(out, "{byte:02x}"))
        }
        ('d' | 'f' | 't' | 'q' | 'x', _) => return Err(FormatError::TypeMismatch { verb, position }),
        (verb, _) => return Err(FormatError::BadVerb { verb }),
    };

    Ok(numeric)
}

/// Writes `body` padded to the directive's width.
fn pad(out: &mut String, body: &str, directive: &Directive, numeric: bool) {
    let width = directive.width.unwrap_or(0);

    // Writing into a String cannot fail.
    let _ = match directive.align {
        Align::Left => write!(out, "{body:<width$}"),
        Align::Zero => {
            let sign_len = usize::from(numeric && body.starts_with(['+', '-', ' ']));
            let prefix_len = if numeric && body.get(sign_len..).is_some_and(|rest| rest.starts_with("0x")) {
                sign_len + 2
            } else {
                sign_len
            };
            let (prefix, digits) = body.split_at(prefix_len);
            out.push_str(prefix);
            out.extend(std::iter::repeat_n('0', width.saturating_sub(body.chars().count())));
            out.push_str(digits);
            Ok(())
        }
        Align::Right => write!(out, "{body:>width$}"),
    };
}
