//! Format checks for the submitted payment form. Pure and synchronous: these run
//! before any remote card check.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};
use thiserror::Error;

mod card_brand;

pub use card_brand::detect_brand;

use crate::card::AllowedCards;

pub const REQUIRED_FORM_FIELDS: &[&str] = &[
    "cardholderName",
    "cardNo",
    "cvc",
    "expiryMonth",
    "expiryYear",
    "addressLine1",
    "addressCity",
    "addressPostcode",
];

static UK_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(GIR ?0AA|[A-PR-UWYZ]([0-9]{1,2}|[A-HK-Y][0-9]([0-9ABEHMNPRV-Y])?|[0-9][A-HJKPS-UW]) ?[0-9][ABD-HJLNP-UW-Z]{2})$",
    )
    .expect("UK postcode pattern is valid")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// A field-level failure. [`FieldError::code`] is the key used to look up its message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("field is required")]
    Required,
    #[error("field is invalid")]
    Message,
    #[error("card number has an incorrect length")]
    NumberIncorrectLength,
    #[error("card number fails the Luhn check")]
    LuhnInvalid,
    #[error("card type is not supported")]
    CardNotSupported,
    #[error("month is not between 1 and 12")]
    InvalidMonth,
    #[error("expiry date is in the past")]
    InThePast,
    #[error("security code must be 3 or 4 digits")]
    InvalidLength,
    #[error("contains too many digits")]
    ContainsTooManyDigits,
}

impl FieldError {
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::Message => "message",
            FieldError::NumberIncorrectLength => "number_incorrect_length",
            FieldError::LuhnInvalid => "luhn_invalid",
            FieldError::CardNotSupported => "card_not_supported",
            FieldError::InvalidMonth => "invalid_month",
            FieldError::InThePast => "in_the_past",
            FieldError::InvalidLength => "invalid_length",
            FieldError::ContainsTooManyDigits => "contains_too_many_digits",
        }
    }
}

fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// `digits` must already be stripped to ASCII digits.
pub fn luhn_valid(digits: &str) -> bool {
    !digits.is_empty() && luhn::valid(digits)
}

pub fn card_no(input: &str, allowed: &AllowedCards) -> Result<(), FieldError> {
    if input.is_empty() {
        return Err(FieldError::Message);
    }
    let digits = digits_only(input);
    if !(12..=16).contains(&digits.len()) {
        return Err(FieldError::NumberIncorrectLength);
    }
    if !luhn_valid(&digits) {
        return Err(FieldError::LuhnInvalid);
    }
    match detect_brand(&digits) {
        Some(brand) if allowed.brands().any(|b| b == brand) => Ok(()),
        _ => Err(FieldError::CardNotSupported),
    }
}

/// Two-digit years are in the 2000s; an expiry in the current month is still valid.
pub fn expiry_month(
    month: Option<&str>,
    year: Option<&str>,
    today: NaiveDate,
) -> Result<(), FieldError> {
    let month = month.map(str::trim).filter(|m| !m.is_empty());
    let year = year.map(str::trim).filter(|y| !y.is_empty());
    let (Some(month), Some(year)) = (month, year) else {
        return Err(FieldError::Message);
    };

    let month = month
        .parse::<u32>()
        .ok()
        .filter(|m| month.bytes().all(|b| b.is_ascii_digit()) && (1..=12).contains(m))
        .ok_or(FieldError::InvalidMonth)?;

    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::Message);
    }
    let year = match year.len() {
        2 => 2000 + year.parse::<i32>().map_err(|_| FieldError::Message)?,
        4 => year.parse::<i32>().map_err(|_| FieldError::Message)?,
        _ => return Err(FieldError::Message),
    };

    if (year, month) < (today.year(), today.month()) {
        return Err(FieldError::InThePast);
    }
    Ok(())
}

pub fn cvc(code: &str) -> Result<(), FieldError> {
    match digits_only(code).len() {
        3 | 4 => Ok(()),
        _ => Err(FieldError::InvalidLength),
    }
}

pub fn address_postcode(postcode: &str) -> Result<(), FieldError> {
    if UK_POSTCODE.is_match(postcode.trim()) {
        Ok(())
    } else {
        Err(FieldError::Message)
    }
}

pub fn email(address: &str) -> Result<(), FieldError> {
    let address = address.trim();
    if !EMAIL.is_match(address) {
        return Err(FieldError::Message);
    }
    if address.chars().filter(char::is_ascii_digit).count() >= 10 {
        return Err(FieldError::ContainsTooManyDigits);
    }
    Ok(())
}

/// Runs every field check over a submitted form and returns failures keyed by field name.
pub fn validate_form(
    fields: &HashMap<String, String>,
    allowed: &AllowedCards,
    today: NaiveDate,
) -> BTreeMap<&'static str, FieldError> {
    let mut errors = BTreeMap::new();
    let get = |name: &str| {
        fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    };

    for &name in REQUIRED_FORM_FIELDS {
        if get(name).is_none() {
            errors.insert(name, FieldError::Required);
        }
    }

    let mut check = |name: &'static str, result: Result<(), FieldError>| {
        if let Err(e) = result {
            errors.entry(name).or_insert(e);
        }
    };

    if let Some(value) = get("cardNo") {
        check("cardNo", card_no(value, allowed));
    }
    if get("expiryMonth").is_some() || get("expiryYear").is_some() {
        check(
            "expiryMonth",
            expiry_month(get("expiryMonth"), get("expiryYear"), today),
        );
    }
    if let Some(value) = get("cvc") {
        check("cvc", cvc(value));
    }
    if let Some(value) = get("addressPostcode") {
        check("addressPostcode", address_postcode(value));
    }
    if let Some(value) = get("email") {
        check("email", email(value));
    }

    errors
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
