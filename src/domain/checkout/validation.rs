use once_cell::sync::Lazy;
use regex::Regex;

use super::value_objects::ShippingDetails;

// ============================================================================
// Shipping Validation Rules
// ============================================================================
//
// Pure predicates over the three shipping fields. Each field reports the
// first rule it breaks, in declaration order.
//
// ============================================================================

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

pub const PHONE_MIN_LEN: usize = 10;
pub const PHONE_MAX_LEN: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    FullName,
    Address,
    PhoneNumber,
}

impl ShippingField {
    pub const ALL: [ShippingField; 3] = [
        ShippingField::FullName,
        ShippingField::Address,
        ShippingField::PhoneNumber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShippingField::FullName => "fullName",
            ShippingField::Address => "address",
            ShippingField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn value_of<'a>(&self, details: &'a ShippingDetails) -> &'a str {
        match self {
            ShippingField::FullName => &details.full_name,
            ShippingField::Address => &details.address,
            ShippingField::PhoneNumber => &details.phone_number,
        }
    }
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub field: ShippingField,
    pub error: Option<&'static str>,
}

impl FieldResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

pub fn validate_field(field: ShippingField, value: &str) -> FieldResult {
    let error = match field {
        ShippingField::FullName => required(value, "Recipient name is required"),
        ShippingField::Address => required(value, "Shipping address is required"),
        ShippingField::PhoneNumber => phone_number(value),
    };

    FieldResult { field, error }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    if value.chars().count() < 1 {
        Some(message)
    } else {
        None
    }
}

fn phone_number(value: &str) -> Option<&'static str> {
    let len = value.chars().count();
    if len < PHONE_MIN_LEN {
        return Some("Phone number must be at least 10 digits");
    }
    if len > PHONE_MAX_LEN {
        return Some("Phone number must not exceed 11 digits");
    }
    if !DIGITS_ONLY.is_match(value) {
        return Some("Phone number must contain only numbers");
    }
    None
}

/// Per-field results for a full set of shipping details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: Vec<FieldResult>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(FieldResult::passed)
    }

    pub fn result(&self, field: ShippingField) -> Option<&FieldResult> {
        self.results.iter().find(|r| r.field == field)
    }

    pub fn error(&self, field: ShippingField) -> Option<&'static str> {
        self.result(field).and_then(|r| r.error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldResult> {
        self.results.iter().filter(|r| !r.passed())
    }
}

pub fn validate_all(details: &ShippingDetails) -> ValidationReport {
    let results = ShippingField::ALL
        .iter()
        .map(|field| validate_field(*field, field.value_of(details)))
        .collect();

    ValidationReport { results }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_ok(value: &str) -> bool {
        validate_field(ShippingField::PhoneNumber, value).passed()
    }

    #[test]
    fn test_digits_pattern_compiles() {
        let digits = Lazy::force(&DIGITS_ONLY);
        assert!(digits.is_match("0123456789"));
        assert!(!digits.is_match("01234x"));
    }

    #[test]
    fn test_phone_accepts_ten_and_eleven_digits() {
        assert!(phone_ok("0123456789"));
        assert!(phone_ok("01234567890"));
    }

    #[test]
    fn test_phone_rejects_wrong_length() {
        assert!(!phone_ok("012345678"));
        assert!(!phone_ok("012345678901"));
        assert!(!phone_ok(""));
    }

    #[test]
    fn test_phone_rejects_non_digits() {
        assert!(!phone_ok("012345678a"));
        assert!(!phone_ok("+841234567"));
        assert!(!phone_ok("0123 45678"));
        assert!(!phone_ok("０１２３４５６７８９"));
    }

    #[test]
    fn test_phone_reports_first_broken_rule() {
        let short = validate_field(ShippingField::PhoneNumber, "12a");
        assert_eq!(short.error, Some("Phone number must be at least 10 digits"));

        let letters = validate_field(ShippingField::PhoneNumber, "abcdefghij");
        assert_eq!(letters.error, Some("Phone number must contain only numbers"));
    }

    #[test]
    fn test_required_fields() {
        assert!(!validate_field(ShippingField::FullName, "").passed());
        assert!(validate_field(ShippingField::FullName, "A").passed());
        assert_eq!(
            validate_field(ShippingField::Address, "").error,
            Some("Shipping address is required")
        );
    }

    #[test]
    fn test_validate_all() {
        let details = ShippingDetails::new("Jane Doe", "1 Main St", "0123456789");
        assert!(validate_all(&details).is_valid());

        let details = ShippingDetails::new("", "1 Main St", "12345");
        let report = validate_all(&details);
        assert!(!report.is_valid());
        assert_eq!(report.errors().count(), 2);
        assert!(report.error(ShippingField::Address).is_none());
    }
}
