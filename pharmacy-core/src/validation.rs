//! Form field validation shared by signup, login and medicine requests.
use crate::constants::{EMAIL_PATTERN, MIN_PASSWORD_LEN, PHONE_PATTERN};
use crate::error::PharmacyError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Form fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Address,
    LicenseNumber,
    FullName,
    PhoneNumber,
    MedicineName,
    Quantity,
    DeliveryAddress,
    City,
    Governorate,
    Prescription,
}

impl Field {
    /// Form control name, also used as the DOM id of the input.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::Address => "address",
            Self::LicenseNumber => "licenseNumber",
            Self::FullName => "fullName",
            Self::PhoneNumber => "phoneNumber",
            Self::MedicineName => "medicineName",
            Self::Quantity => "quantity",
            Self::DeliveryAddress => "deliveryAddress",
            Self::City => "city",
            Self::Governorate => "governorate",
            Self::Prescription => "prescription",
        }
    }
}

/// Field → translation key of the error to display beside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error recorded for a field wins.
    pub fn insert(&mut self, field: Field, key: &'static str) {
        self.0.entry(field).or_insert(key);
    }

    /// Forget the error for a field, e.g. once the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, key)| (*field, *key))
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    ///
    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] carrying every recorded field.
    pub fn into_result(self) -> Result<(), PharmacyError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PharmacyError::Validation(self))
        }
    }

    pub(crate) fn require(&mut self, field: Field, value: &str, key: &'static str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, key);
            false
        } else {
            true
        }
    }

    pub(crate) fn check_phone(&mut self, field: Field, value: &str) {
        if self.require(field, value, "errors.phone_required") && !is_valid_phone(value) {
            self.insert(field, "errors.phone_invalid");
        }
    }
}

/// Egyptian mobile number: `01` followed by nine digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[must_use]
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_prefix_and_length() {
        assert!(is_valid_phone("01234567890"));
        assert!(is_valid_phone("01098765432"));
        assert!(!is_valid_phone("0123456789"));
        assert!(!is_valid_phone("012345678901"));
        assert!(!is_valid_phone("02234567890"));
        assert!(!is_valid_phone("0123456789a"));
        assert!(!is_valid_phone(" 01234567890"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn email_needs_at_and_dot() {
        assert!(is_valid_email("customer@example.com"));
        assert!(!is_valid_email("customer@example"));
        assert!(!is_valid_email("customer.example.com"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn password_counts_characters() {
        assert!(is_valid_password("secret"));
        assert!(!is_valid_password("short"));
        assert!(is_valid_password("كلمةسر"));
    }

    #[test]
    fn first_error_per_field_wins_and_clear_forgets() {
        let mut errors = FieldErrors::new();
        errors.check_phone(Field::Phone, "");
        errors.insert(Field::Phone, "errors.phone_invalid");
        assert_eq!(errors.get(Field::Phone), Some("errors.phone_required"));
        errors.clear(Field::Phone);
        assert!(errors.is_empty());
        assert!(errors.into_result().is_ok());
    }
}
