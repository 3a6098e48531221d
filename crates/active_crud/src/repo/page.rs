//! Page coercion and paged collections.
//!
//! # Invariants
//! - A coerced page number is always >= 1.
//! - `total_pages` is `ceil(total_entries / per_page)`, and 0 for no entries.

use serde::Serialize;

/// Converts loosely typed page input into a positive page number.
///
/// Non-positive or unparseable input becomes page 1. Strings use leading
/// integer semantics: `"3abc"` is 3, `"abc"` is 1.
pub trait IntoPageNumber {
    fn into_page_number(self) -> u32;
}

macro_rules! impl_into_page_number_for_int {
    ($($int:ty),*) => {
        $(
            impl IntoPageNumber for $int {
                #[allow(unused_comparisons)]
                fn into_page_number(self) -> u32 {
                    if self <= 0 {
                        return 1;
                    }
                    u32::try_from(self).unwrap_or(u32::MAX)
                }
            }
        )*
    };
}

impl_into_page_number_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_into_page_number_for_float {
    ($($float:ty),*) => {
        $(
            impl IntoPageNumber for $float {
                /// Truncates toward zero; NaN and non-positive values become 1.
                fn into_page_number(self) -> u32 {
                    if self.is_nan() || self < 1.0 {
                        return 1;
                    }
                    // Float-to-int `as` saturates at u32::MAX.
                    self.trunc() as u32
                }
            }
        )*
    };
}

impl_into_page_number_for_float!(f32, f64);

impl IntoPageNumber for &str {
    fn into_page_number(self) -> u32 {
        leading_integer(self).into_page_number()
    }
}

impl IntoPageNumber for String {
    fn into_page_number(self) -> u32 {
        self.as_str().into_page_number()
    }
}

impl IntoPageNumber for &String {
    fn into_page_number(self) -> u32 {
        self.as_str().into_page_number()
    }
}

impl<T: IntoPageNumber> IntoPageNumber for Option<T> {
    fn into_page_number(self) -> u32 {
        self.map_or(1, IntoPageNumber::into_page_number)
    }
}

/// Parses an optional sign and the leading run of ASCII digits; 0 otherwise.
/// A single `_` between two digits is a group separator (`"1_000"` is 1000).
/// Saturates instead of overflowing.
fn leading_integer(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let bytes = digits.as_bytes();
    let mut value: i64 = 0;
    for (index, &byte) in bytes.iter().enumerate() {
        if byte.is_ascii_digit() {
            value = value
                .saturating_mul(10)
                .saturating_add(i64::from(byte - b'0'));
            continue;
        }
        let separates_digits = byte == b'_'
            && index > 0
            && bytes[index - 1].is_ascii_digit()
            && bytes.get(index + 1).is_some_and(u8::is_ascii_digit);
        if !separates_digits {
            break;
        }
    }

    if negative {
        -value
    } else {
        value
    }
}

/// One page window of records plus the counts needed to navigate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<M> {
    pub items: Vec<M>,
    pub current_page: u32,
    pub per_page: u32,
    pub total_entries: u64,
    pub total_pages: u32,
}

impl<M> Page<M> {
    pub fn new(items: Vec<M>, current_page: u32, per_page: u32, total_entries: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            u32::try_from(total_entries.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            current_page,
            per_page,
            total_entries,
            total_pages,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        offset_for(self.current_page, self.per_page)
    }

    pub fn previous_page(&self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        (self.current_page < self.total_pages).then(|| self.current_page + 1)
    }

    /// True when the requested page lies past the last page.
    pub fn out_of_bounds(&self) -> bool {
        self.current_page > self.total_pages.max(1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub(crate) fn offset_for(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}
