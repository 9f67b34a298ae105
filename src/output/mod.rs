pub mod formatter;

pub use formatter::{
    format_disease_list, format_field_errors, format_gauge, format_guide, format_json,
    format_missing_fields, format_report, format_score, format_tsv, should_use_colors,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Tsv,
}
