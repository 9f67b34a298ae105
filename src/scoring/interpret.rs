use serde::Serialize;
use std::fmt;

use super::disease::DiseaseId;
use super::engine::ScoreResult;

/// APRI band boundaries. Upper bounds are exclusive.
pub const APRI_LOW: f64 = 0.5;
pub const APRI_HIGH: f64 = 1.5;
pub const APRI_CIRRHOSIS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Indeterminate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Indeterminate => "indeterminate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very-high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color key (traffic light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    Green,
    Yellow,
    Orange,
    Red,
}

/// Cutoffs applied to reach an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cutoffs {
    pub low: f64,
    pub high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cirrhosis: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub level: RiskLevel,
    pub color: ColorKey,
    pub stage: &'static str,
    pub text: &'static str,
    pub detail: String,
    pub recommendation: &'static str,
    pub cutoffs: Cutoffs,
    pub age_adjusted: bool,
}

const APRI_CUTOFFS: Cutoffs = Cutoffs {
    low: APRI_LOW,
    high: APRI_HIGH,
    cirrhosis: Some(APRI_CIRRHOSIS),
};

/// Classify an APRI score. Thresholds do not depend on disease or age.
pub fn interpret_apri(score: ScoreResult) -> Option<Interpretation> {
    let score = score.value()?;

    let interpretation = if score < APRI_LOW {
        Interpretation {
            level: RiskLevel::Low,
            color: ColorKey::Green,
            stage: "F0-F1",
            text: "Significant fibrosis unlikely",
            detail: "NPV approximately 90%".to_string(),
            recommendation: "Routine follow-up is recommended.",
            cutoffs: APRI_CUTOFFS,
            age_adjusted: false,
        }
    } else if score < APRI_HIGH {
        Interpretation {
            level: RiskLevel::Indeterminate,
            color: ColorKey::Yellow,
            stage: "Indeterminate",
            text: "Further testing advised",
            detail: "Consider elastography (FibroScan) or liver biopsy".to_string(),
            recommendation: "Elastography or another non-invasive test is recommended.",
            cutoffs: APRI_CUTOFFS,
            age_adjusted: false,
        }
    } else if score < APRI_CIRRHOSIS {
        Interpretation {
            level: RiskLevel::High,
            color: ColorKey::Orange,
            stage: "F2-F4",
            text: "Significant fibrosis suspected",
            detail: "PPV approximately 65%".to_string(),
            recommendation: "Specialist referral and further work-up are recommended.",
            cutoffs: APRI_CUTOFFS,
            age_adjusted: false,
        }
    } else {
        Interpretation {
            level: RiskLevel::VeryHigh,
            color: ColorKey::Red,
            stage: "F4",
            text: "Cirrhosis likely",
            detail: "PPV approximately 65%".to_string(),
            recommendation: "Immediate specialist referral is needed.",
            cutoffs: APRI_CUTOFFS,
            age_adjusted: false,
        }
    };

    Some(interpretation)
}

/// Classify a FIB-4 score with the cutoffs for `disease` at `age`.
///
/// Returns `None` for an undefined score or a zero/NaN age. The low band is
/// exclusive, the indeterminate band includes the high cutoff.
pub fn interpret_fib4(score: ScoreResult, age: f64, disease: DiseaseId) -> Option<Interpretation> {
    let score = score.value()?;
    if age == 0.0 || age.is_nan() {
        return None;
    }

    let profile = disease.profile();
    let age_adjusted = profile.elderly_adjusted(age);
    let cutoffs = Cutoffs {
        low: profile.fib4_low_cutoff(age),
        high: profile.fib4_high_cutoff(),
        cirrhosis: None,
    };

    let note = if age_adjusted {
        "(age ≥65 cutoff applied)".to_string()
    } else if profile.fib4_elderly_adjustment {
        "(age <65 cutoff applied)".to_string()
    } else {
        format!("({} cutoffs applied)", profile.id)
    };

    let interpretation = if score < cutoffs.low {
        Interpretation {
            level: RiskLevel::Low,
            color: ColorKey::Green,
            stage: "F0-F1",
            text: "Advanced fibrosis unlikely",
            detail: format!("NPV approximately 90% {}", note),
            recommendation: "Routine follow-up is recommended.",
            cutoffs,
            age_adjusted,
        }
    } else if score <= cutoffs.high {
        Interpretation {
            level: RiskLevel::Indeterminate,
            color: ColorKey::Yellow,
            stage: "Indeterminate",
            text: "Further testing advised",
            detail: format!("Consider elastography (FibroScan) or liver biopsy {}", note),
            recommendation: "Elastography or another non-invasive test is recommended.",
            cutoffs,
            age_adjusted,
        }
    } else {
        Interpretation {
            level: RiskLevel::High,
            color: ColorKey::Red,
            stage: "F3-F4",
            text: "Advanced fibrosis or cirrhosis suspected",
            detail: format!("PPV approximately 65% {}", note),
            recommendation: "Specialist referral and further work-up are needed.",
            cutoffs,
            age_adjusted,
        }
    };

    Some(interpretation)
}
