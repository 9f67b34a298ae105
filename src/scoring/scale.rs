//! Gauge scales and interpretation guide tables.

use serde::Serialize;

use super::disease::{DiseaseId, ELDERLY_AGE};
use super::interpret::{ColorKey, APRI_CIRRHOSIS, APRI_HIGH, APRI_LOW};

/// Upper end of the FIB-4 gauge.
pub const FIB4_SCALE_MAX: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleMark {
    pub value: f64,
    pub label: String,
}

impl ScaleMark {
    fn new(value: f64) -> Self {
        Self {
            value,
            label: format_mark(value),
        }
    }
}

fn format_mark(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // "1.45", "1.3", "2.0"
    let s = format!("{:.2}", value);
    match s.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => s,
    }
}

pub fn apri_scale() -> Vec<ScaleMark> {
    [0.0, APRI_LOW, 1.0, APRI_HIGH, APRI_CIRRHOSIS]
        .into_iter()
        .map(ScaleMark::new)
        .collect()
}

/// FIB-4 gauge marks using the cutoffs that apply at `age` for `disease`.
pub fn fib4_scale(age: f64, disease: DiseaseId) -> Vec<ScaleMark> {
    let profile = disease.profile();
    [
        0.0,
        profile.fib4_low_cutoff(age),
        profile.fib4_high_cutoff(),
        FIB4_SCALE_MAX,
    ]
    .into_iter()
    .map(ScaleMark::new)
    .collect()
}

/// Position of `score` on the scale as a percentage of its last mark.
pub fn gauge_position(score: f64, scale: &[ScaleMark]) -> f64 {
    let Some(max) = scale.last().map(|m| m.value) else {
        return 0.0;
    };
    if max <= 0.0 || !score.is_finite() {
        return 0.0;
    }
    (score.clamp(0.0, max) / max) * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideRow {
    pub age_group: Option<String>,
    pub range: String,
    pub stage: &'static str,
    pub meaning: &'static str,
    pub color: ColorKey,
}

pub fn apri_guide() -> Vec<GuideRow> {
    vec![
        GuideRow {
            age_group: None,
            range: format!("< {}", APRI_LOW),
            stage: "F0-F1",
            meaning: "Significant fibrosis unlikely",
            color: ColorKey::Green,
        },
        GuideRow {
            age_group: None,
            range: format!("{} - {}", APRI_LOW, APRI_HIGH),
            stage: "Indeterminate",
            meaning: "Further testing advised",
            color: ColorKey::Yellow,
        },
        GuideRow {
            age_group: None,
            range: format!("≥ {}", APRI_HIGH),
            stage: "F2-F4",
            meaning: "Significant fibrosis suspected",
            color: ColorKey::Orange,
        },
        GuideRow {
            age_group: None,
            range: format!("≥ {:.1}", APRI_CIRRHOSIS),
            stage: "F4",
            meaning: "Cirrhosis likely",
            color: ColorKey::Red,
        },
    ]
}

/// FIB-4 guide rows for `disease`, one band set per age group.
pub fn fib4_guide(disease: DiseaseId) -> Vec<GuideRow> {
    let profile = disease.profile();
    let high = profile.fib4_high_cutoff();

    let groups: Vec<(String, f64)> = match profile.fib4_cutoffs.elderly_low {
        Some(elderly_low) if profile.fib4_elderly_adjustment => vec![
            (format!("< {}", ELDERLY_AGE), profile.fib4_cutoffs.low),
            (format!("≥ {}", ELDERLY_AGE), elderly_low),
        ],
        _ => vec![("All ages".to_string(), profile.fib4_cutoffs.low)],
    };

    groups
        .into_iter()
        .flat_map(|(age_group, low)| {
            [
                GuideRow {
                    age_group: Some(age_group.clone()),
                    range: format!("< {:.2}", low),
                    stage: "F0-F1",
                    meaning: "Advanced fibrosis unlikely",
                    color: ColorKey::Green,
                },
                GuideRow {
                    age_group: Some(age_group.clone()),
                    range: format!("{:.2} - {:.2}", low, high),
                    stage: "Indeterminate",
                    meaning: "Further testing advised",
                    color: ColorKey::Yellow,
                },
                GuideRow {
                    age_group: Some(age_group),
                    range: format!("> {:.2}", high),
                    stage: "F3-F4",
                    meaning: "Advanced fibrosis suspected",
                    color: ColorKey::Red,
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(scale: &[ScaleMark]) -> Vec<f64> {
        scale.iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_apri_scale() {
        let scale = apri_scale();
        assert_eq!(values(&scale), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(scale[0].label, "0");
        assert_eq!(scale[2].label, "1.0");
    }

    #[test]
    fn test_fib4_scale_by_disease_and_age() {
        assert_eq!(values(&fib4_scale(50.0, DiseaseId::Hcv)), vec![0.0, 1.45, 3.25, 4.0]);
        assert_eq!(values(&fib4_scale(50.0, DiseaseId::Nafld)), vec![0.0, 1.30, 2.67, 4.0]);
        assert_eq!(values(&fib4_scale(70.0, DiseaseId::Nafld)), vec![0.0, 2.00, 2.67, 4.0]);
        assert_eq!(fib4_scale(70.0, DiseaseId::Hcv)[1].label, "1.45");
        assert_eq!(fib4_scale(50.0, DiseaseId::Hbv)[1].label, "1.3");
        assert_eq!(fib4_scale(70.0, DiseaseId::Nafld)[1].label, "2.0");
    }

    #[test]
    fn test_fib4_scale_unknown_disease() {
        let scale = fib4_scale(50.0, DiseaseId::resolve("xyz"));
        assert_eq!(values(&scale), vec![0.0, 1.45, 3.25, 4.0]);
    }

    #[test]
    fn test_gauge_position() {
        let scale = apri_scale();
        assert_eq!(gauge_position(1.0, &scale), 50.0);
        assert_eq!(gauge_position(5.0, &scale), 100.0);
        assert_eq!(gauge_position(-1.0, &scale), 0.0);
        assert_eq!(gauge_position(1.0, &[]), 0.0);
    }

    #[test]
    fn test_apri_guide_rows() {
        let rows = apri_guide();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].range, "< 0.5");
        assert_eq!(rows[3].range, "≥ 2.0");
        assert_eq!(rows[2].color, ColorKey::Orange);
    }

    #[test]
    fn test_fib4_guide_with_elderly_groups() {
        let rows = fib4_guide(DiseaseId::Nafld);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].age_group.as_deref(), Some("< 65"));
        assert_eq!(rows[0].range, "< 1.30");
        assert_eq!(rows[3].age_group.as_deref(), Some("≥ 65"));
        assert_eq!(rows[4].range, "2.00 - 2.67");
    }

    #[test]
    fn test_fib4_guide_single_group() {
        let rows = fib4_guide(DiseaseId::Hcv);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].age_group.as_deref(), Some("All ages"));
        assert_eq!(rows[2].range, "> 3.25");
    }
}
