use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{
    all_profiles, apri_guide, apri_scale, fib4_guide, fib4_scale, gauge_position, Assessment,
    ColorKey, DiseaseId, Field, FieldError, GuideRow, Interpretation, ScaleMark, ScoreResult,
};

/// Width of the text gauge, excluding brackets.
const GAUGE_WIDTH: usize = 24;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals, or "N/A" when it cannot be computed
pub fn format_score(score: ScoreResult) -> String {
    match score {
        ScoreResult::Computed(v) => format!("{:.2}", v),
        ScoreResult::Undefined => "N/A".to_string(),
    }
}

fn paint(text: &str, color: ColorKey, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match color {
        ColorKey::Green => text.green().bold().to_string(),
        ColorKey::Yellow => text.yellow().bold().to_string(),
        ColorKey::Orange => text.bright_red().to_string(),
        ColorKey::Red => text.red().bold().to_string(),
    }
}

/// Render a score position on its scale as a text bar, e.g. `[-----#------]`
pub fn format_gauge(score: f64, scale: &[ScaleMark]) -> String {
    let pct = gauge_position(score, scale);
    let pos = ((pct / 100.0) * (GAUGE_WIDTH - 1) as f64).round() as usize;
    let bar: String = (0..GAUGE_WIDTH)
        .map(|i| if i == pos { '#' } else { '-' })
        .collect();
    let marks = scale
        .iter()
        .map(|m| m.label.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("[{}]  {}", bar, marks)
}

fn format_interpretation(
    name: &str,
    score: ScoreResult,
    interpretation: &Interpretation,
    scale: &[ScaleMark],
    use_colors: bool,
) -> String {
    let header = format!(
        "{:<6} {}  {}  {}",
        name,
        format_score(score),
        paint(interpretation.level.as_str(), interpretation.color, use_colors),
        interpretation.stage
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![
        header,
        format!("  {}", interpretation.text),
        format!("  {}", interpretation.detail),
        format!("  -> {}", interpretation.recommendation),
    ];
    if let Some(v) = score.value() {
        lines.push(format!("  {}", format_gauge(v, scale)));
    }
    lines.join("\n")
}

fn format_unscorable(name: &str) -> String {
    format!("{:<6} N/A  cannot compute from these inputs", name)
}

/// Format a full assessment as a human-readable report
pub fn format_report(assessment: &Assessment, use_colors: bool) -> String {
    let profile = assessment.disease.profile();
    let inputs = &assessment.inputs;

    let mut sections = vec![format!(
        "Disease: {} ({})\nInputs:  age {}, AST {} U/L, ALT {} U/L, platelets {} x10^9/L, AST ULN {} U/L",
        profile.name,
        profile.id,
        inputs.age,
        inputs.ast,
        inputs.alt,
        inputs.platelet,
        inputs.ast_uln
    )];

    let apri = match &assessment.apri_interpretation {
        None => format_unscorable("APRI"),
        Some(_) if !assessment.show_apri => {
            let note = format!(
                "{:<6} {}  reference only: APRI has {} reliability in {} (AUROC {}). Use FIB-4.",
                "APRI",
                format_score(assessment.apri),
                profile.apri_reliability,
                profile.id,
                profile.apri_auroc
            );
            if use_colors {
                note.dimmed().to_string()
            } else {
                note
            }
        }
        Some(interpretation) => format_interpretation(
            "APRI",
            assessment.apri,
            interpretation,
            &apri_scale(),
            use_colors,
        ),
    };
    sections.push(apri);

    let fib4 = match &assessment.fib4_interpretation {
        None => format_unscorable("FIB-4"),
        Some(interpretation) => {
            let scale = fib4_scale(inputs.age, assessment.disease);
            let mut block = format_interpretation(
                "FIB-4",
                assessment.fib4,
                interpretation,
                &scale,
                use_colors,
            );
            block.push_str(&format!(
                "\n  Cutoffs: {:.2} / {:.2}{}",
                interpretation.cutoffs.low,
                interpretation.cutoffs.high,
                if interpretation.age_adjusted {
                    " (age-adjusted)"
                } else {
                    ""
                }
            ));
            block
        }
    };
    sections.push(fib4);

    sections.join("\n\n")
}

/// Format an assessment as pretty JSON
pub fn format_json(assessment: &Assessment) -> Result<String> {
    serde_json::to_string_pretty(assessment).context("Failed to serialize assessment")
}

/// Format scores as tab-separated values for scripting
/// Columns: name, score, level, stage (no headers, no colors)
pub fn format_tsv(assessment: &Assessment) -> String {
    let row = |name: &str, score: ScoreResult, interpretation: Option<&Interpretation>| {
        let (level, stage) = interpretation
            .map(|i| (i.level.as_str(), i.stage))
            .unwrap_or(("none", "none"));
        format!("{}\t{}\t{}\t{}", name, format_score(score), level, stage)
    };
    [
        row("APRI", assessment.apri, assessment.apri_interpretation.as_ref()),
        row("FIB-4", assessment.fib4, assessment.fib4_interpretation.as_ref()),
    ]
    .join("\n")
}

/// One line per invalid field: "AST: must be at least 1 U/L"
pub fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_missing_fields(missing: &[Field]) -> String {
    let names = missing
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Missing values: {}", names)
}

fn format_guide_rows(rows: &[GuideRow], use_colors: bool) -> String {
    rows.iter()
        .map(|row| {
            let range = format!("{:<12}", row.range);
            format!(
                "  {}{}  {:<14} {}",
                row.age_group
                    .as_deref()
                    .map(|g| format!("{:<10}", g))
                    .unwrap_or_default(),
                paint(&range, row.color, use_colors),
                row.stage,
                row.meaning
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the interpretation tables for both scores
pub fn format_guide(disease: DiseaseId, use_colors: bool) -> String {
    let profile = disease.profile();
    let title = |s: &str| {
        if use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };
    format!(
        "{}\n{}\n\n{}\n{}\n\nNotes:\n  {}\n  NPV: probability that fibrosis is absent.\n  PPV: probability that fibrosis is present.",
        title("APRI interpretation"),
        format_guide_rows(&apri_guide(), use_colors),
        title(&format!("FIB-4 interpretation ({})", profile.id)),
        format_guide_rows(&fib4_guide(disease), use_colors),
        profile.description
    )
}

/// Format the disease registry as a list
pub fn format_disease_list(use_colors: bool) -> String {
    all_profiles()
        .iter()
        .map(|p| {
            let id = if use_colors {
                p.id.as_str().cyan().bold().to_string()
            } else {
                p.id.as_str().to_string()
            };
            let elderly = match p.fib4_cutoffs.elderly_low {
                Some(low) if p.fib4_elderly_adjustment => format!(", {:.2} at age 65+", low),
                _ => String::new(),
            };
            format!(
                "{} - {}\n  APRI:  {} reliability (AUROC {}){}\n  FIB-4: {} reliability (AUROC {}), cutoffs {:.2} / {:.2}{}\n  {}",
                id,
                p.name,
                p.apri_reliability,
                p.apri_auroc,
                if p.apri_recommended { "" } else { ", not recommended" },
                p.fib4_reliability,
                p.fib4_auroc,
                p.fib4_cutoffs.low,
                p.fib4_cutoffs.high,
                elderly,
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
