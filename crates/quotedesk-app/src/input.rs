// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::Date;

use crate::{EditableField, FieldChange, Money, iso_date};

/// Rejected field input. The edit buffer is never touched when parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} is required -- enter a value or press esc")]
    Empty { field: &'static str },
    #[error("{field} {input:?} is not a number -- use digits like 12.50")]
    NotANumber { field: &'static str, input: String },
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },
    #[error("{field} {input:?} is too large -- the most is {max}", max = Money::MAX)]
    TooLarge { field: &'static str, input: String },
    #[error("quote date {input:?} is not a date -- use YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("committed {input:?} is not yes/no")]
    InvalidFlag { input: String },
}

/// Parses user-typed text for `field` into a typed change.
pub fn parse_field(field: EditableField, raw: &str) -> Result<FieldChange, InputError> {
    match field {
        EditableField::QuoteDate => parse_quote_date(raw).map(FieldChange::QuoteDate),
        EditableField::FirstCost => parse_amount(field.label(), raw).map(FieldChange::FirstCost),
        EditableField::RetailPrice => {
            parse_amount(field.label(), raw).map(FieldChange::RetailPrice)
        }
        EditableField::CommittedFlag => parse_flag(raw).map(FieldChange::CommittedFlag),
    }
}

/// Parses a dollar amount such as `"1,234.5"` or `"$15.75"` into cents.
/// Digits past the cent are rounded half away from zero.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Money, InputError> {
    let normalized = raw.trim().replace(',', "");
    let normalized = normalized.strip_prefix('$').unwrap_or(&normalized).trim();
    if normalized.is_empty() {
        return Err(InputError::Empty { field });
    }
    if let Some(rest) = normalized.strip_prefix('-') {
        if is_amount_syntax(rest) {
            return Err(InputError::Negative { field });
        }
        return Err(InputError::NotANumber {
            field,
            input: raw.to_owned(),
        });
    }
    if !is_amount_syntax(normalized) {
        return Err(InputError::NotANumber {
            field,
            input: raw.to_owned(),
        });
    }

    let (whole, fraction) = normalized.split_once('.').unwrap_or((normalized, ""));
    let too_large = || InputError::TooLarge {
        field,
        input: raw.to_owned(),
    };

    let dollars: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    let mut digits = fraction.bytes().map(|byte| u64::from(byte - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|digit| digit >= 5);

    let cents = dollars
        .checked_mul(100)
        .and_then(|value| value.checked_add(tenths * 10 + hundredths))
        .and_then(|value| value.checked_add(u64::from(round_up)))
        .filter(|value| *value <= Money::MAX.cents())
        .ok_or_else(too_large)?;
    Ok(Money::from_cents(cents))
}

pub fn parse_quote_date(raw: &str) -> Result<Date, InputError> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return Err(InputError::InvalidDate {
            input: raw.to_owned(),
        });
    }
    iso_date::parse(trimmed).ok_or_else(|| InputError::InvalidDate {
        input: raw.to_owned(),
    })
}

pub fn parse_flag(raw: &str) -> Result<bool, InputError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(InputError::InvalidFlag {
            input: raw.to_owned(),
        }),
    }
}

fn is_amount_syntax(value: &str) -> bool {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    let digits_only = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    match fraction {
        Some(fraction) => {
            (!whole.is_empty() || !fraction.is_empty()) && digits_only(whole) && digits_only(fraction)
        }
        None => !whole.is_empty() && digits_only(whole),
    }
}
