pub mod calculator;
pub mod disease;
pub mod engine;
pub mod interpret;
pub mod scale;
pub mod validation;

pub use calculator::{assess, evaluate, Assessment, Evaluation, FieldError, LabInputs, RawInputs};
pub use disease::{all_profiles, lookup_profile, DiseaseId, DiseaseProfile, Reliability};
pub use engine::{calculate_apri, calculate_fib4, ScoreResult, DEFAULT_AST_ULN};
pub use interpret::{interpret_apri, interpret_fib4, ColorKey, Cutoffs, Interpretation, RiskLevel};
pub use scale::{apri_guide, apri_scale, fib4_guide, fib4_scale, gauge_position, GuideRow, ScaleMark};
pub use validation::{validate_input, Field, Validation};
