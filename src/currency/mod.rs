//! Integer money helpers: parsing decimal input into minor units and
//! rendering minor units for display.

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn minor_units(&self) -> u8 {
        minor_units_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
    pub screen_reader_mode: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
            screen_reader_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
    SymbolAndCode,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "CAD" => "CAD".into(),
        "AUD" => "A$".into(),
        "CHF" => "CHF".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

fn scale_for(precision: u8) -> i64 {
    10_i64.pow(u32::from(precision))
}

/// Parses a non-negative decimal amount in major units into minor units.
///
/// Digits past `precision` are accepted only when they are zeros, so
/// `"17.500"` is 1750 cents while `"17.505"` is rejected rather than rounded.
pub fn parse_minor_units(raw: &str, precision: u8) -> Result<i64, LedgerError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(LedgerError::InvalidAmount("amount is empty".into()));
    }
    if text.starts_with('-') {
        return Err(LedgerError::InvalidAmount(format!(
            "`{}` is negative; amounts must be zero or more",
            text
        )));
    }
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(LedgerError::InvalidAmount(format!("`{}` has no digits", text)));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(LedgerError::InvalidAmount(format!(
            "`{}` is not a decimal amount",
            text
        )));
    }
    let precision_len = usize::from(precision);
    let (kept, dropped) = if fraction.len() > precision_len {
        fraction.split_at(precision_len)
    } else {
        (fraction, "")
    };
    if dropped.chars().any(|c| c != '0') {
        return Err(LedgerError::InvalidAmount(format!(
            "`{}` has more than {} decimal places",
            text, precision
        )));
    }

    let overflow = || LedgerError::InvalidAmount(format!("`{}` is too large", text));
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| overflow())?
    };
    let mut fraction_value = 0_i64;
    for ch in kept.chars().chain(std::iter::repeat('0')).take(precision_len) {
        let digit = i64::from(ch.to_digit(10).unwrap_or(0));
        fraction_value = fraction_value * 10 + digit;
    }
    whole_value
        .checked_mul(scale_for(precision))
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or_else(overflow)
}

/// Renders the absolute value of `amount` with grouping and the currency's precision.
pub fn format_number(locale: &LocaleConfig, amount: i64, precision: u8) -> String {
    let magnitude = amount.unsigned_abs();
    let scale = scale_for(precision).unsigned_abs();
    let whole = magnitude / scale;
    let mut body = group_digits(&whole.to_string(), locale.grouping_separator);
    if precision > 0 {
        let fraction = magnitude % scale;
        body.push(locale.decimal_separator);
        body.push_str(&format!(
            "{:0width$}",
            fraction,
            width = usize::from(precision)
        ));
    }
    body
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Formats an amount held in minor units for display.
///
/// The sign or parentheses wrap the whole rendered amount, symbol included,
/// so -400 cents reads `-$4.00`. Screen-reader output spells the sign as a
/// word in front of the unsigned amount.
pub fn format_minor_units(
    amount: i64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let number = format_number(locale, amount, code.minor_units());
    let symbol = symbol_for(code.as_str());
    let magnitude = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}", symbol, number),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), number),
        CurrencyDisplay::SymbolAndCode => format!("{}{} ({})", symbol, number, code.as_str()),
    };

    if options.screen_reader_mode {
        return if amount < 0 {
            format!("minus {} {}", code.as_str(), magnitude)
        } else {
            format!("{} {}", code.as_str(), magnitude)
        };
    }
    if amount >= 0 {
        return magnitude;
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{}", magnitude),
        NegativeStyle::Parentheses => format!("({})", magnitude),
    }
}
