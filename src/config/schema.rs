use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::scoring::{validation::validate_value, DiseaseId, Field};

/// User configuration, read from `config.yaml`.
///
/// Every field is optional; command-line flags take precedence.
///
/// Example YAML:
/// ```yaml
/// disease: NAFLD
/// ast_uln: 40
/// format: text
/// color: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Disease context used when `--disease` is not given (default: HCV)
    #[serde(default)]
    pub disease: Option<DiseaseId>,

    /// Local AST upper limit of normal in U/L (default: 35)
    #[serde(default)]
    pub ast_uln: Option<f64>,

    /// Output format used when `--format` is not given (default: text)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Set to false to never colorize output
    #[serde(default)]
    pub color: Option<bool>,
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(uln) = config.ast_uln {
        if !uln.is_finite() {
            errors.push("ast_uln: must be a number".to_string());
        } else if let Some(message) = validate_value(Field::AstUln, uln).message {
            errors.push(format!("ast_uln: {}", message));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
