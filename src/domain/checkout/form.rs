use super::validation::{validate_all, ShippingField, ValidationReport};
use super::value_objects::ShippingDetails;

// ============================================================================
// Shipping Form - validate-on-change field state
// ============================================================================

#[derive(Debug, Clone)]
pub struct ShippingForm {
    values: ShippingDetails,
    report: ValidationReport,
}

impl Default for ShippingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ShippingForm {
    pub fn new() -> Self {
        Self::with_values(ShippingDetails::default())
    }

    pub fn with_values(values: ShippingDetails) -> Self {
        let report = validate_all(&values);
        Self { values, report }
    }

    /// Update one field and re-run every field predicate.
    pub fn set_field(&mut self, field: ShippingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ShippingField::FullName => self.values.full_name = value,
            ShippingField::Address => self.values.address = value,
            ShippingField::PhoneNumber => self.values.phone_number = value,
        }
        self.report = validate_all(&self.values);
    }

    pub fn values(&self) -> ShippingDetails {
        self.values.clone()
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    pub fn error(&self, field: ShippingField) -> Option<&'static str> {
        self.report.error(field)
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Force a full re-validation and return the aggregate flag.
    pub fn trigger(&mut self) -> bool {
        self.report = validate_all(&self.values);
        self.report.is_valid()
    }

    /// Snapshot the values for submission, or hand back the failing report.
    pub fn submit(&mut self) -> Result<ShippingDetails, ValidationReport> {
        if self.trigger() {
            Ok(self.values())
        } else {
            Err(self.report.clone())
        }
    }
}
