use serde::Serialize;

use super::disease::{DiseaseId, ELDERLY_AGE};
use super::engine::{calculate_apri, calculate_fib4, ScoreResult};
use super::interpret::{interpret_apri, interpret_fib4, Interpretation};
use super::validation::{parse_number, validate_input, Field, INVALID_NUMBER_MESSAGE};

/// Raw, user-entered field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputs {
    pub age: String,
    pub ast: String,
    pub alt: String,
    /// Count per µL; may contain thousands separators.
    pub platelet: String,
    pub ast_uln: String,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            age: String::new(),
            ast: String::new(),
            alt: String::new(),
            platelet: String::new(),
            ast_uln: "35".to_string(),
        }
    }
}

/// Parsed lab values ready for scoring. Platelets are in ×10⁹/L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabInputs {
    pub age: f64,
    pub ast: f64,
    pub alt: f64,
    pub platelet: f64,
    pub ast_uln: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Both scores with their interpretations for one disease context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub disease: DiseaseId,
    pub inputs: LabInputs,
    pub apri: ScoreResult,
    pub fib4: ScoreResult,
    pub apri_interpretation: Option<Interpretation>,
    pub fib4_interpretation: Option<Interpretation>,
    /// False when APRI is unreliable for the disease; show it for reference only.
    pub show_apri: bool,
    pub elderly: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Incomplete { missing: Vec<Field> },
    Invalid { errors: Vec<FieldError> },
    Ready(Assessment),
}

/// Remove `,` grouping from a platelet count such as "150,000".
pub fn strip_thousands_separators(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',').collect()
}

impl RawInputs {
    /// Value of a field as passed to validation and parsing.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Age => self.age.clone(),
            Field::Ast => self.ast.clone(),
            Field::Alt => self.alt.clone(),
            Field::Platelet => strip_thousands_separators(&self.platelet),
            Field::AstUln => self.ast_uln.clone(),
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }

    /// Validate every field and return all errors.
    pub fn validate(&self) -> Vec<FieldError> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let result = validate_input(field, &self.value(field));
                result.message.map(|message| FieldError { field, message })
            })
            .collect()
    }

    /// Fields whose value does not parse as a finite number.
    pub fn unparsable_fields(&self) -> Vec<FieldError> {
        Field::ALL
            .into_iter()
            .filter(|f| parse_number(&self.value(*f)).is_none())
            .map(|field| FieldError {
                field,
                message: INVALID_NUMBER_MESSAGE.to_string(),
            })
            .collect()
    }

    /// Parse into lab values, converting platelets to ×10⁹/L.
    ///
    /// Returns `None` if any field is empty or not a number; range checks are
    /// left to [`RawInputs::validate`].
    pub fn parse(&self) -> Option<LabInputs> {
        let get = |field| parse_number(&self.value(field));
        Some(LabInputs {
            age: get(Field::Age)?,
            ast: get(Field::Ast)?,
            alt: get(Field::Alt)?,
            platelet: get(Field::Platelet)? / 1000.0,
            ast_uln: get(Field::AstUln)?,
        })
    }
}

/// Score already-validated lab values.
pub fn assess(inputs: LabInputs, disease: DiseaseId) -> Assessment {
    let apri = calculate_apri(inputs.ast, inputs.ast_uln, inputs.platelet);
    let fib4 = calculate_fib4(inputs.age, inputs.ast, inputs.alt, inputs.platelet);

    Assessment {
        disease,
        inputs,
        apri,
        fib4,
        apri_interpretation: interpret_apri(apri),
        fib4_interpretation: interpret_fib4(fib4, inputs.age, disease),
        show_apri: disease.profile().apri_recommended,
        elderly: inputs.age >= ELDERLY_AGE,
    }
}

/// Validate, parse and score raw inputs.
///
/// Scoring only happens when every field is present and valid.
pub fn evaluate(raw: &RawInputs, disease: DiseaseId) -> Evaluation {
    let missing = raw.missing_fields();
    if !missing.is_empty() {
        return Evaluation::Incomplete { missing };
    }

    let errors = raw.validate();
    if !errors.is_empty() {
        return Evaluation::Invalid { errors };
    }

    match raw.parse() {
        Some(inputs) => Evaluation::Ready(assess(inputs, disease)),
        None => Evaluation::Invalid {
            errors: raw.unparsable_fields(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskLevel;

    fn sample_inputs() -> RawInputs {
        RawInputs {
            age: "45".to_string(),
            ast: "45".to_string(),
            alt: "38".to_string(),
            platelet: "120,000".to_string(),
            ast_uln: "35".to_string(),
        }
    }

    #[test]
    fn test_default_ast_uln() {
        assert_eq!(RawInputs::default().ast_uln, "35");
    }

    #[test]
    fn test_strip_thousands_separators() {
        assert_eq!(strip_thousands_separators("1,500,000"), "1500000");
        assert_eq!(strip_thousands_separators("90000"), "90000");
    }

    #[test]
    fn test_incomplete() {
        let raw = RawInputs {
            age: "45".to_string(),
            ..RawInputs::default()
        };
        match evaluate(&raw, DiseaseId::Hcv) {
            Evaluation::Incomplete { missing } => {
                assert_eq!(missing, vec![Field::Ast, Field::Alt, Field::Platelet]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_collects_all_errors() {
        let mut raw = sample_inputs();
        raw.age = "130".to_string();
        raw.platelet = "120".to_string();
        match evaluate(&raw, DiseaseId::Hcv) {
            Evaluation::Invalid { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, Field::Age);
                assert_eq!(errors[1].field, Field::Platelet);
                assert!(errors[1].message.contains("/µL"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_fields_names_only_bad_fields() {
        let mut raw = sample_inputs();
        raw.alt = "abc".to_string();
        raw.ast_uln = "inf".to_string();
        let errors = raw.unparsable_fields();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, Field::Alt);
        assert_eq!(errors[1].field, Field::AstUln);
        assert_eq!(errors[0].message, INVALID_NUMBER_MESSAGE);
        assert!(sample_inputs().unparsable_fields().is_empty());
        assert!(raw.parse().is_none());
    }

    #[test]
    fn test_ready_converts_platelets() {
        let Evaluation::Ready(assessment) = evaluate(&sample_inputs(), DiseaseId::Hcv) else {
            panic!("expected Ready");
        };
        assert_eq!(assessment.inputs.platelet, 120.0);
        assert_eq!(assessment.fib4, ScoreResult::Computed(2.74));
        // (45 / 35) / 120 * 100 = 1.0714...
        assert_eq!(assessment.apri, ScoreResult::Computed(1.07));
        assert_eq!(
            assessment.apri_interpretation.unwrap().level,
            RiskLevel::Indeterminate
        );
        assert_eq!(
            assessment.fib4_interpretation.unwrap().level,
            RiskLevel::Indeterminate
        );
        assert!(assessment.show_apri);
        assert!(!assessment.elderly);
    }

    #[test]
    fn test_nafld_hides_apri_and_adjusts_elderly() {
        let mut raw = sample_inputs();
        raw.age = "70".to_string();
        let Evaluation::Ready(assessment) = evaluate(&raw, DiseaseId::Nafld) else {
            panic!("expected Ready");
        };
        assert!(!assessment.show_apri);
        assert!(assessment.elderly);
        let fib4 = assessment.fib4_interpretation.unwrap();
        assert!(fib4.age_adjusted);
        assert_eq!(fib4.cutoffs.low, 2.00);
    }

    #[test]
    fn test_assess_both_scores_or_none() {
        let inputs = LabInputs {
            age: 50.0,
            ast: 40.0,
            alt: 30.0,
            platelet: 200.0,
            ast_uln: 35.0,
        };
        let assessment = assess(inputs, DiseaseId::Hbv);
        assert!(assessment.apri_interpretation.is_some());
        assert!(assessment.fib4_interpretation.is_some());
    }

    #[test]
    fn test_assessment_json() {
        let Evaluation::Ready(assessment) = evaluate(&sample_inputs(), DiseaseId::Hcv) else {
            panic!("expected Ready");
        };
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["disease"], "HCV");
        assert_eq!(json["fib4"], 2.74);
        assert_eq!(json["fib4_interpretation"]["level"], "indeterminate");
        assert_eq!(json["fib4_interpretation"]["cutoffs"]["high"], 3.25);
    }
}
