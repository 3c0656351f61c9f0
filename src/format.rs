//! Formatting Utilities - Indonesian currency, numbers and dates
//!
//! Pure functions only. Output matches the `id-ID` locale: dot as the
//! thousands separator, no decimals, long month names.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Separator the `id-ID` currency style puts between `Rp` and the amount.
const CURRENCY_SEPARATOR: char = '\u{a0}';

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Group digits with `.` every three places: `12000` -> `"12.000"`
pub fn format_num_id(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Currency display: `12000` -> `"Rp\u{a0}12.000"`
pub fn format_idr(value: u64) -> String {
    format!("Rp{}{}", CURRENCY_SEPARATOR, format_num_id(value))
}

/// Echo for the price input while typing: `12000` -> `"Rp 12.000"`
pub fn to_rupiah_input(value: u64) -> String {
    format!("Rp {}", format_num_id(value))
}

/// Strip every non-digit: `"Rp 12.000"` -> `"12000"`
pub fn only_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Digits of `s` as a number.
///
/// Returns `None` when no digit is left, so an empty field is never
/// mistaken for zero. Values beyond `u64` also yield `None`.
pub fn parse_digits_to_number(s: &str) -> Option<u64> {
    let digits = only_digits(s);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// `"05 Januari 2025"`
pub fn format_long_date_id(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_ID[date.month0() as usize],
        date.year()
    )
}

/// Long form of a `YYYY-MM-DD` date-input value.
///
/// Empty input gives `""` so the caller can fall back to today. A missing
/// or zero month/day counts as 1; overflowing parts roll forward
/// (`2025-13-01` is January 2026, `2025-02-30` is 2 March 2025). Years
/// 0 to 99 are read as 1900 to 1999.
pub fn format_from_date_input(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    match date_from_input(input) {
        Some(date) => format_long_date_id(date),
        None => String::new(),
    }
}

/// Lenient parse of a date-input value, see [`format_from_date_input`].
pub fn date_from_input(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split('-');
    let year: i32 = match parts.next()?.trim().parse().ok()? {
        y @ 0..=99 => 1900 + y,
        y => y,
    };
    let month = lenient_part(parts.next());
    let day = lenient_part(parts.next());

    NaiveDate::from_ymd_opt(year, 1, 1)?
        .checked_add_months(Months::new(month - 1))?
        .checked_add_days(Days::new(u64::from(day - 1)))
}

fn lenient_part(part: Option<&str>) -> u32 {
    match part.and_then(|p| p.trim().parse::<u32>().ok()) {
        Some(0) | None => 1,
        Some(n) => n,
    }
}
