use serde::{Serialize, Serializer};

/// Default AST upper limit of normal (U/L).
pub const DEFAULT_AST_ULN: f64 = 35.0;

/// A computed score, or `Undefined` when the inputs preclude computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreResult {
    Computed(f64),
    Undefined,
}

impl ScoreResult {
    pub fn value(&self) -> Option<f64> {
        match self {
            ScoreResult::Computed(v) => Some(*v),
            ScoreResult::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ScoreResult::Undefined)
    }
}

// Serialized as a number or null
impl Serialize for ScoreResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// APRI = (AST / AST ULN) / platelet × 100
///
/// `platelet` is in ×10⁹/L.
pub fn calculate_apri(ast: f64, ast_uln: f64, platelet: f64) -> ScoreResult {
    if !all_finite(&[ast, ast_uln, platelet]) {
        return ScoreResult::Undefined;
    }
    if ast_uln <= 0.0 || platelet <= 0.0 {
        return ScoreResult::Undefined;
    }

    let apri = ((ast / ast_uln) / platelet) * 100.0;
    ScoreResult::Computed(round2(apri))
}

/// FIB-4 = (age × AST) / (platelet × √ALT)
///
/// `platelet` is in ×10⁹/L. AST is intentionally not checked for positivity,
/// only the denominator terms and age are.
pub fn calculate_fib4(age: f64, ast: f64, alt: f64, platelet: f64) -> ScoreResult {
    if !all_finite(&[age, ast, alt, platelet]) {
        return ScoreResult::Undefined;
    }
    if age <= 0.0 || platelet <= 0.0 || alt <= 0.0 {
        return ScoreResult::Undefined;
    }

    let fib4 = (age * ast) / (platelet * alt.sqrt());
    ScoreResult::Computed(round2(fib4))
}

/// Round to two decimals, halves toward positive infinity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apri_formula() {
        // (70 / 35) / 100 * 100 = 2.0
        assert_eq!(calculate_apri(70.0, 35.0, 100.0), ScoreResult::Computed(2.0));
        // (40 / 35) / 250 * 100 = 0.4571...
        assert_eq!(calculate_apri(40.0, 35.0, 250.0), ScoreResult::Computed(0.46));
    }

    #[test]
    fn test_apri_default_uln() {
        let result = calculate_apri(35.0, DEFAULT_AST_ULN, 50.0);
        assert_eq!(result, ScoreResult::Computed(2.0));
    }

    #[test]
    fn test_apri_zero_denominators() {
        assert!(calculate_apri(40.0, 0.0, 150.0).is_undefined());
        assert!(calculate_apri(40.0, 35.0, 0.0).is_undefined());
        assert!(calculate_apri(40.0, -1.0, 150.0).is_undefined());
        assert!(calculate_apri(40.0, 35.0, -150.0).is_undefined());
    }

    #[test]
    fn test_apri_non_finite() {
        assert!(calculate_apri(f64::NAN, 35.0, 150.0).is_undefined());
        assert!(calculate_apri(40.0, f64::INFINITY, 150.0).is_undefined());
    }

    #[test]
    fn test_apri_non_negative() {
        for ast in [0.0, 1.0, 17.0, 250.0, 9999.0] {
            for platelet in [1.0, 90.0, 450.0] {
                let v = calculate_apri(ast, 35.0, platelet).value().unwrap();
                assert!(v >= 0.0);
                let expected = round2(((ast / 35.0) / platelet) * 100.0);
                assert_eq!(v, expected);
            }
        }
    }

    #[test]
    fn test_fib4_reference_value() {
        // 45*45 / (120 * sqrt(38)) = 2.7375...
        assert_eq!(calculate_fib4(45.0, 45.0, 38.0, 120.0), ScoreResult::Computed(2.74));
    }

    #[test]
    fn test_fib4_guards() {
        assert!(calculate_fib4(0.0, 45.0, 38.0, 120.0).is_undefined());
        assert!(calculate_fib4(45.0, 45.0, 0.0, 120.0).is_undefined());
        assert!(calculate_fib4(45.0, 45.0, 38.0, 0.0).is_undefined());
        assert!(calculate_fib4(45.0, f64::NAN, 38.0, 120.0).is_undefined());
    }

    #[test]
    fn test_fib4_does_not_guard_ast() {
        assert_eq!(calculate_fib4(45.0, 0.0, 38.0, 120.0), ScoreResult::Computed(0.0));
        let negative = calculate_fib4(45.0, -45.0, 38.0, 120.0).value().unwrap();
        assert!(negative < 0.0);
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn test_idempotent() {
        let a = calculate_fib4(61.0, 88.0, 52.0, 143.0);
        let b = calculate_fib4(61.0, 88.0, 52.0, 143.0);
        assert_eq!(a.value().unwrap().to_bits(), b.value().unwrap().to_bits());
        let a = calculate_apri(88.0, 40.0, 143.0);
        let b = calculate_apri(88.0, 40.0, 143.0);
        assert_eq!(a.value().unwrap().to_bits(), b.value().unwrap().to_bits());
    }

    #[test]
    fn test_score_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_string(&ScoreResult::Computed(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&ScoreResult::Undefined).unwrap(), "null");
    }
}
