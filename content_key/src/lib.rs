//! Content addressed keys over rows of `f64` values.
//!
//! [`ContentKey`] is what a dictionary builder hashes when it groups the rows of a
//! column slice by their exact content: each distinct row becomes one dictionary
//! entry and every original row maps to that entry's code.
pub mod error;
pub mod key;

pub use error::Error;
pub use key::{ContentKey, canonical_bits, is_absent};
#[allow(deprecated)]
pub use key::is_zero;

#[cfg(test)]
mod tests;
