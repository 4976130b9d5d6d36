//! Typed coercion of stored setting strings

use std::path::PathBuf;

/// Conversion from a stored setting string into a typed value.
///
/// Returns `None` when the string cannot be converted; callers fall back
/// to their default in that case.
pub trait FromSetting: Sized {
    fn from_setting(raw: &str) -> Option<Self>;
}

impl FromSetting for String {
    fn from_setting(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromSetting for PathBuf {
    fn from_setting(raw: &str) -> Option<Self> {
        Some(PathBuf::from(raw))
    }
}

/// Accepts `true`/`false` in any case, plus `1`/`0`.
impl FromSetting for bool {
    fn from_setting(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") || raw == "1" {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
            Some(false)
        } else {
            None
        }
    }
}

macro_rules! from_setting_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromSetting for $ty {
                fn from_setting(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

from_setting_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);
