use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Linguistic term shared by the income, debt load and age variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Term {
    VeryLow,
    Low,
    Medium,
    High,
}

impl Term {
    pub const ALL: [Term; 4] = [Term::VeryLow, Term::Low, Term::Medium, Term::High];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Term::VeryLow => "veryLow",
            Term::Low => "low",
            Term::Medium => "medium",
            Term::High => "high",
        }
    }
}

/// Credit history tag supplied by the caller. Classification is crisp, not fuzzy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    Poor,
    Average,
    Good,
}

impl CreditHistory {
    pub const ALL: [CreditHistory; 3] = [
        CreditHistory::Poor,
        CreditHistory::Average,
        CreditHistory::Good,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            CreditHistory::Poor => "poor",
            CreditHistory::Average => "average",
            CreditHistory::Good => "good",
        }
    }
}

impl fmt::Display for CreditHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown credit history '{0}' (expected poor, average or good)")]
pub struct UnknownCreditHistory(pub String);

impl FromStr for CreditHistory {
    type Err = UnknownCreditHistory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(CreditHistory::Poor),
            "average" => Ok(CreditHistory::Average),
            "good" => Ok(CreditHistory::Good),
            _ => Err(UnknownCreditHistory(raw.to_string())),
        }
    }
}

/// Consequent class of a rule, ordered from least to most favorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputClass {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl OutputClass {
    pub const ALL: [OutputClass; 5] = [
        OutputClass::VeryLow,
        OutputClass::Low,
        OutputClass::Medium,
        OutputClass::High,
        OutputClass::VeryHigh,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Crisp approval percentage this class pulls the weighted average towards.
    pub fn anchor(self) -> f64 {
        match self {
            OutputClass::VeryLow => 10.0,
            OutputClass::Low => 30.0,
            OutputClass::Medium => 50.0,
            OutputClass::High => 80.0,
            OutputClass::VeryHigh => 95.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputClass::VeryLow => "veryLow",
            OutputClass::Low => "low",
            OutputClass::Medium => "medium",
            OutputClass::High => "high",
            OutputClass::VeryHigh => "veryHigh",
        }
    }
}

/// Applicant figures as entered by the caller. Values are never validated; the
/// membership ramps absorb out-of-range and negative numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditInput {
    pub income: f64,
    pub debt_load: f64,
    pub credit_history: CreditHistory,
    pub age: f64,
}

impl Default for CreditInput {
    fn default() -> Self {
        Self {
            income: 0.0,
            debt_load: 0.0,
            credit_history: CreditHistory::Average,
            age: 0.0,
        }
    }
}

/// Public result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditOutput {
    /// Rounded approval likelihood, 0..=100.
    pub approval_probability: u8,
    /// Rounded recommended credit amount, never negative.
    pub recommended_amount: f64,
}
