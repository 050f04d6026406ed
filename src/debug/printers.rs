// src/debug/printers.rs

//! Printing macros for errors and warnings, and renderers of raw record
//! bytes for trace output.

#[doc(hidden)]
#[allow(unused_imports)]
use ::utf8_iter::Utf8CharsEx; // provides `.chars()` on `&[u8]`

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `d`ebug `e`println! an `err`or
#[macro_export]
macro_rules! de_err {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("ERROR: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_err;

/// `d`ebug `e`println! an `warn`ing
#[macro_export]
macro_rules! de_wrn {
    (
        $($args:tt)*
    ) => {
        {
            #[cfg(any(debug_assertions,test))]
            eprint!("WARNING: ");
            #[cfg(any(debug_assertions,test))]
            eprintln!($($args)*)
        }
    }
}
pub use de_wrn;

/// `e`println! an `err`or
#[macro_export]
macro_rules! e_err {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("ERROR: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_err;

/// `e`println! a `warn`ing
#[macro_export]
macro_rules! e_wrn {
    (
        $($args:tt)*
    ) => {
        {
            eprint!("WARNING: ");
            eprintln!($($args)*)
        }
    }
}
pub use e_wrn;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions - render raw bytes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// turn passed char into a char printable on one column; control
/// characters become their pictoral representation, e.g. '\n' is '␊'.
///
/// only intended to aid visual debugging
pub const fn char_to_char_noraw(c: char) -> char {
    // https://en.wikipedia.org/wiki/C0_and_C1_control_codes#C0_controls
    match c as u32 {
        0 => '␀',
        7 => '␇',
        8 => '␈',
        9 => '␉',
        10 => '␊',
        11 => '␋',
        12 => '␌',
        13 => '␍',
        27 => '␛',
        127 => '␡',
        1..=31 => '�',
        _ => c,
    }
}

/// transform buffer of bytes to a non-raw String, bytes may be invalid
/// utf-8. Output is cut at `max` chars, marked with a trailing '…'.
///
/// only intended for debugging
#[doc(hidden)]
#[allow(non_snake_case)]
pub fn buffer_to_String_noraw(buffer: &[u8], max: usize) -> String {
    let mut s2: String = String::with_capacity(buffer.len().min(max) + 1);
    for (at, c) in buffer.chars().enumerate() {
        if at >= max {
            s2.push('…');
            break;
        }
        s2.push(char_to_char_noraw(c));
    }
    s2
}
