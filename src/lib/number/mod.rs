//! Number formatting.
use std::fmt::Display;

use itertools::Itertools;

const SI_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const SI_NAMES: [&str; 9] = [
    "", "kilo", "mega", "giga", "tera", "peta", "exa", "zetta", "yotta",
];
const IEC_PREFIXES: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];
const IEC_NAMES: [&str; 9] = [
    "", "kibi", "mebi", "gibi", "tebi", "pebi", "exbi", "zebi", "yobi",
];

/// Group the integer part of `number` in threes.
///
/// ```
/// use webhelpers::number::format_number;
///
/// assert_eq!(format_number(1234567.89, ",", "."), "1,234,567.89");
/// assert_eq!(format_number(-1234.5, ".", ","), "-1.234,5");
/// ```
pub fn format_number(number: impl Display, thousands: &str, decimal: &str) -> String {
    let text = number.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let grouped = digits
        .rchunks(3)
        .rev()
        .map(|group| group.iter().collect::<String>())
        .join(thousands);

    match fraction {
        Some(fraction) => format!("{sign}{grouped}{decimal}{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Scale `size` to the largest multiple of 1000 (or 1024 when `binary`)
/// that keeps it at least 1, up to yotta.
///
/// Plain units are shown without decimals. `full_name` spells the prefix out
/// (`kilo`, `kibi`, ...).
pub fn format_data_size(
    size: f64,
    unit: &str,
    precision: usize,
    binary: bool,
    full_name: bool,
) -> String {
    let base: f64 = if binary { 1024.0 } else { 1000.0 };
    let prefixes = match (binary, full_name) {
        (false, false) => &SI_PREFIXES,
        (false, true) => &SI_NAMES,
        (true, false) => &IEC_PREFIXES,
        (true, true) => &IEC_NAMES,
    };

    let magnitude = size.abs();
    let mut multiple = 0;
    while multiple < prefixes.len() - 1 && magnitude >= base.powi(multiple as i32 + 1) {
        multiple += 1;
    }

    let scaled = size / base.powi(multiple as i32);
    let precision = if multiple == 0 { 0 } else { precision };
    format!("{scaled:.precision$} {}{unit}", prefixes[multiple])
}

/// [`format_data_size`] in bytes (`B`, or `bytes` with `full_name`).
pub fn format_byte_size(size: f64, precision: usize, binary: bool, full_name: bool) -> String {
    let unit = if full_name { "bytes" } else { "B" };
    format_data_size(size, unit, precision, binary, full_name)
}

/// [`format_data_size`] in bits (`b`, or `bits` with `full_name`).
pub fn format_bit_size(size: f64, precision: usize, binary: bool, full_name: bool) -> String {
    let unit = if full_name { "bits" } else { "b" };
    format_data_size(size, unit, precision, binary, full_name)
}
