use serde::Serialize;
use std::fmt;

/// Lab input fields accepted by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Ast,
    Alt,
    Platelet,
    AstUln,
}

/// Inclusive plausible range for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Age,
        Field::Ast,
        Field::Alt,
        Field::Platelet,
        Field::AstUln,
    ];

    /// Plausible range. Platelets are checked as raw count/µL, before conversion.
    pub fn range(&self) -> FieldRange {
        match self {
            Field::Age => FieldRange { min: 1.0, max: 120.0, unit: "years" },
            Field::Ast => FieldRange { min: 1.0, max: 10_000.0, unit: "U/L" },
            Field::Alt => FieldRange { min: 1.0, max: 10_000.0, unit: "U/L" },
            Field::Platelet => FieldRange { min: 1_000.0, max: 1_500_000.0, unit: "/µL" },
            Field::AstUln => FieldRange { min: 1.0, max: 100.0, unit: "U/L" },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Ast => "AST",
            Field::Alt => "ALT",
            Field::Platelet => "Platelet",
            Field::AstUln => "AST ULN",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Self { valid: true, message: None }
    }

    fn invalid(message: String) -> Self {
        Self { valid: false, message: Some(message) }
    }
}

pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number.";

/// Parse a cleaned numeric string. Non-finite values are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate a raw field value.
///
/// Empty input counts as valid: the field is simply not provided yet.
pub fn validate_input(field: Field, raw: &str) -> Validation {
    if raw.trim().is_empty() {
        return Validation::ok();
    }

    let Some(value) = parse_number(raw) else {
        return Validation::invalid(INVALID_NUMBER_MESSAGE.to_string());
    };

    validate_value(field, value)
}

/// Range check for an already-parsed value.
pub fn validate_value(field: Field, value: f64) -> Validation {
    let range = field.range();
    if value < range.min {
        return Validation::invalid(format!(
            "must be at least {} {}",
            format_bound(range.min),
            range.unit
        ));
    }
    if value > range.max {
        return Validation::invalid(format!(
            "must be at most {} {}",
            format_bound(range.max),
            range.unit
        ));
    }
    Validation::ok()
}

fn format_bound(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        for field in Field::ALL {
            assert_eq!(validate_input(field, ""), Validation::ok());
            assert_eq!(validate_input(field, "   "), Validation::ok());
        }
    }

    #[test]
    fn test_non_numeric() {
        let result = validate_input(Field::Ast, "abc");
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some(INVALID_NUMBER_MESSAGE));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(!validate_input(Field::Alt, "inf").valid);
        assert!(!validate_input(Field::Alt, "NaN").valid);
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(validate_input(Field::Age, "1").valid);
        assert!(validate_input(Field::Age, "120").valid);
        assert!(validate_input(Field::Platelet, "1000").valid);
        assert!(validate_input(Field::Platelet, "1500000").valid);
        assert!(validate_input(Field::AstUln, "100").valid);
        assert!(validate_input(Field::Ast, "10000").valid);
    }

    #[test]
    fn test_below_min_message() {
        let result = validate_input(Field::Age, "0");
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some("must be at least 1 years"));
    }

    #[test]
    fn test_above_max_message() {
        let result = validate_input(Field::Platelet, "1500001");
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some("must be at most 1500000 /µL"));

        let result = validate_input(Field::AstUln, "101");
        assert_eq!(result.message.as_deref(), Some("must be at most 100 U/L"));
    }

    #[test]
    fn test_decimal_values() {
        assert!(validate_input(Field::Age, "45.5").valid);
        assert!(!validate_input(Field::Alt, "0.5").valid);
    }

    #[test]
    fn test_platelet_raw_units() {
        // 120 would be a ×10⁹/L value, too small as a raw count
        assert!(!validate_input(Field::Platelet, "120").valid);
        assert!(validate_input(Field::Platelet, "120000").valid);
    }
}
