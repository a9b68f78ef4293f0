//! Field-level validation.
//!
//! Every description validates itself immediately before it is projected
//! into its native layout. Checks never mutate and may be repeated freely.
//! All failures are [`Error::InvalidArgument`] naming the offending field.

use crate::{Error, Result};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

/// A description that can check its own field values.
pub trait Validate {
    /// Returns an invalid-argument error for the first violated rule.
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

/// Rejects an empty string.
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(field, "must not be empty"));
    }
    Ok(())
}

/// Rejects a string with an embedded NUL. Native strings are NUL-terminated,
/// so anything after it would be lost.
pub fn require_no_nul(field: &str, value: &str) -> Result<()> {
    if let Some(at) = value.find('\0') {
        return Err(Error::invalid_argument(
            field,
            format!("contains a NUL character at byte {at}"),
        ));
    }
    Ok(())
}

pub fn require_no_nul_opt(field: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| require_no_nul(field, v))
}

/// A name or identifier: non-empty and free of NUL characters.
pub fn require_name(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;
    require_no_nul(field, value)
}

pub fn require_name_opt(field: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| require_name(field, v))
}

/// Narrows a managed count to the native unsigned 32-bit width.
pub fn require_u32(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Error::invalid_argument(
            field,
            format!("value {value} is outside the range 0..={}", u32::MAX),
        )
    })
}

/// Narrows a managed count to the native signed 32-bit width.
pub fn require_i32(field: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        Error::invalid_argument(
            field,
            format!("value {value} is outside the range {}..={}", i32::MIN, i32::MAX),
        )
    })
}

/// Rejects a negative value.
pub fn require_non_negative(field: &str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::invalid_argument(
            field,
            format!("value {value} must not be negative"),
        ));
    }
    Ok(())
}

/// Requires `min <= max`. The error names the minimum field.
pub fn require_ordered<T>(min_field: &str, min: T, max_field: &str, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if min > max {
        return Err(Error::invalid_argument(
            min_field,
            format!("{min_field} ({min}) must not be greater than {max_field} ({max})"),
        ));
    }
    Ok(())
}

/// Requires a percentage in `0..=100`.
pub fn require_percent(field: &str, value: u8) -> Result<()> {
    if value > 100 {
        return Err(Error::invalid_argument(
            field,
            format!("percentage {value} is greater than 100"),
        ));
    }
    Ok(())
}

/// Converts a duration to the whole seconds carried by a native `DWORD`.
///
/// Fractions of a second have no native representation and are rejected.
pub fn require_seconds_u32(field: &str, value: Duration) -> Result<u32> {
    if value.subsec_nanos() != 0 {
        return Err(Error::invalid_argument(
            field,
            format!("duration {value:?} is not a whole number of seconds"),
        ));
    }
    u32::try_from(value.as_secs()).map_err(|_| {
        Error::invalid_argument(
            field,
            format!(
                "duration of {}s exceeds the native limit of {}s",
                value.as_secs(),
                u32::MAX
            ),
        )
    })
}

/// Rejects duplicate keys. The error message names the first duplicate.
pub fn require_unique<'a, K, I>(field: &str, keys: I) -> Result<()>
where
    K: Eq + Hash + std::fmt::Display + ?Sized + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(Error::invalid_argument(field, format!("duplicate entry '{key}'")));
        }
    }
    Ok(())
}
