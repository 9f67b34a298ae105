use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Age (years) at which elderly FIB-4 cutoffs can apply.
pub const ELDERLY_AGE: f64 = 65.0;

/// Supported disease contexts.
/// Deserializes through [`FromStr`], so config files accept the same ids as the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DiseaseId {
    #[default]
    Hcv,
    Hbv,
    Nafld,
}

impl DiseaseId {
    pub const ALL: [DiseaseId; 3] = [DiseaseId::Hcv, DiseaseId::Hbv, DiseaseId::Nafld];

    /// Resolve an identifier, falling back to HCV when it is not recognized.
    pub fn resolve(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseId::Hcv => "HCV",
            DiseaseId::Hbv => "HBV",
            DiseaseId::Nafld => "NAFLD",
        }
    }

    pub fn profile(&self) -> &'static DiseaseProfile {
        match self {
            DiseaseId::Hcv => &HCV,
            DiseaseId::Hbv => &HBV,
            DiseaseId::Nafld => &NAFLD,
        }
    }
}

impl FromStr for DiseaseId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HCV" => Ok(DiseaseId::Hcv),
            "HBV" => Ok(DiseaseId::Hbv),
            "NAFLD" => Ok(DiseaseId::Nafld),
            other => bail!("Unknown disease '{}' (expected HCV, HBV or NAFLD)", other),
        }
    }
}

impl TryFrom<String> for DiseaseId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How well a score performs for a given disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reliability {
    High,
    Moderate,
    Low,
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Reliability::High => "high",
            Reliability::Moderate => "moderate",
            Reliability::Low => "low",
        };
        f.write_str(s)
    }
}

/// FIB-4 cutoff set for one disease.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fib4Cutoffs {
    pub low: f64,
    pub high: f64,
    /// Replaces `low` for patients aged 65 and over, when the profile allows it.
    pub elderly_low: Option<f64>,
}

/// Static per-disease metadata and cutoffs.
///
/// Profiles are compile-time constants. Obtain one through [`DiseaseId::profile`]
/// or [`lookup_profile`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseProfile {
    pub id: DiseaseId,
    pub name: &'static str,
    pub apri_reliability: Reliability,
    pub apri_auroc: &'static str,
    pub apri_recommended: bool,
    pub fib4_reliability: Reliability,
    pub fib4_auroc: &'static str,
    pub fib4_cutoffs: Fib4Cutoffs,
    pub fib4_elderly_adjustment: bool,
    pub description: &'static str,
}

impl DiseaseProfile {
    /// Low FIB-4 cutoff for the given age.
    pub fn fib4_low_cutoff(&self, age: f64) -> f64 {
        if self.elderly_adjusted(age) {
            self.fib4_cutoffs
                .elderly_low
                .unwrap_or(self.fib4_cutoffs.low)
        } else {
            self.fib4_cutoffs.low
        }
    }

    pub fn fib4_high_cutoff(&self) -> f64 {
        self.fib4_cutoffs.high
    }

    /// True when the elderly low cutoff replaces the base one for this age.
    pub fn elderly_adjusted(&self, age: f64) -> bool {
        self.fib4_elderly_adjustment && self.fib4_cutoffs.elderly_low.is_some() && age >= ELDERLY_AGE
    }
}

pub static HCV: DiseaseProfile = DiseaseProfile {
    id: DiseaseId::Hcv,
    name: "Chronic hepatitis C",
    apri_reliability: Reliability::High,
    apri_auroc: "0.77-0.83",
    apri_recommended: true,
    fib4_reliability: Reliability::High,
    fib4_auroc: "0.79-0.85",
    fib4_cutoffs: Fib4Cutoffs {
        low: 1.45,
        high: 3.25,
        elderly_low: None,
    },
    fib4_elderly_adjustment: false,
    description: "Both scores were derived and validated in HCV cohorts. FIB-4 cutoffs 1.45/3.25 follow the original derivation study.",
};

pub static HBV: DiseaseProfile = DiseaseProfile {
    id: DiseaseId::Hbv,
    name: "Chronic hepatitis B",
    apri_reliability: Reliability::Moderate,
    apri_auroc: "0.72-0.79",
    apri_recommended: true,
    fib4_reliability: Reliability::Moderate,
    fib4_auroc: "0.73-0.78",
    fib4_cutoffs: Fib4Cutoffs {
        low: 1.30,
        high: 2.67,
        elderly_low: None,
    },
    fib4_elderly_adjustment: false,
    description: "Accuracy is lower than in HCV. Hepatic flares raise AST and can overestimate fibrosis; interpret alongside elastography.",
};

pub static NAFLD: DiseaseProfile = DiseaseProfile {
    id: DiseaseId::Nafld,
    name: "Non-alcoholic fatty liver disease",
    apri_reliability: Reliability::Low,
    apri_auroc: "0.67-0.75",
    apri_recommended: false,
    fib4_reliability: Reliability::High,
    fib4_auroc: "0.80-0.85",
    fib4_cutoffs: Fib4Cutoffs {
        low: 1.30,
        high: 2.67,
        elderly_low: Some(2.00),
    },
    fib4_elderly_adjustment: true,
    description: "FIB-4 is the preferred first-line test. At age 65 and over the low cutoff rises to 2.0 to limit false positives.",
};

/// Look up a profile by identifier, falling back to HCV for unknown ids.
pub fn lookup_profile(id: &str) -> &'static DiseaseProfile {
    DiseaseId::resolve(id).profile()
}

/// Every registered profile, in display order.
pub fn all_profiles() -> [&'static DiseaseProfile; 3] {
    DiseaseId::ALL.map(|id| id.profile())
}
