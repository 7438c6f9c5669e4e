//! Conversion of matched segment text into canonical values.
//!
//! The grammar guarantees the *shape* of every token; this module turns the
//! text into numbers and flags. A token that has the right shape but cannot be
//! represented (a pixel value beyond `u32`, a float that overflows to
//! infinity) yields `None`, and the parser treats the segment as unmatched.

use regex::Captures;
use std::str::FromStr;

/// Decimal places kept for rotation degrees.
pub const DEGREE_PRECISION: i32 = 6;

/// Parse a grammar-validated decimal. Rejects anything non-finite.
pub fn number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split `a,b,c,d` into four values.
///
/// ```
/// # use iiif_request::normalize::quad;
/// assert_eq!(quad::<u32>("125,15,120,140"), Some([125, 15, 120, 140]));
/// assert_eq!(quad::<f64>("10,20.5,030,100"), Some([10.0, 20.5, 30.0, 100.0]));
/// assert_eq!(quad::<u32>("1,2,3"), None);
/// ```
pub fn quad<T: FromStr>(text: &str) -> Option<[T; 4]> {
    let mut parts = text.split(',').map(|p| p.parse::<T>().ok());
    let values = [parts.next()??, parts.next()??, parts.next()??, parts.next()??];
    parts.next().is_none().then_some(values)
}

/// Reduce a non-negative angle into `[0, 360)` and round to six decimals.
///
/// Rounding can carry a value such as `359.9999999` up to a full turn;
/// that wraps back to `0`.
pub fn degree(raw: f64) -> f64 {
    let reduced = raw.rem_euclid(360.0);
    let rounded = round_to(reduced, DEGREE_PRECISION);
    if rounded >= 360.0 { 0.0 } else { rounded }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Whether the optional marker group `name` (`!`, `^`) took part in the match.
pub fn marker(caps: &Captures<'_>, name: &str) -> bool {
    caps.name(name).is_some()
}
