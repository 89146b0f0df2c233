//! Sampling the engine across one input variable while the others stay fixed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::CreditInput;
use super::CreditScoringEngine;

/// Numeric input that a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityVariable {
    Income,
    DebtLoad,
    Age,
}

impl SensitivityVariable {
    pub fn label(self) -> &'static str {
        match self {
            SensitivityVariable::Income => "income",
            SensitivityVariable::DebtLoad => "debtLoad",
            SensitivityVariable::Age => "age",
        }
    }

    /// Range covered when the caller gives no bounds.
    pub fn default_range(self) -> (f64, f64) {
        match self {
            SensitivityVariable::Income => (0.0, 200_000.0),
            SensitivityVariable::DebtLoad => (0.0, 50_000.0),
            SensitivityVariable::Age => (18.0, 70.0),
        }
    }

    fn apply(self, base: &CreditInput, value: f64) -> CreditInput {
        let mut input = *base;
        match self {
            SensitivityVariable::Income => input.income = value,
            SensitivityVariable::DebtLoad => input.debt_load = value,
            SensitivityVariable::Age => input.age = value,
        }
        input
    }
}

impl fmt::Display for SensitivityVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SensitivityVariable {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(SensitivityVariable::Income),
            "debt-load" | "debt_load" | "debtload" => Ok(SensitivityVariable::DebtLoad),
            "age" => Ok(SensitivityVariable::Age),
            _ => Err(format!(
                "unknown variable '{raw}' (expected income, debt-load or age)"
            )),
        }
    }
}

fn default_steps() -> usize {
    21
}

/// Sweep parameters. Missing bounds fall back to [`SensitivityVariable::default_range`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityRequest {
    pub base: CreditInput,
    pub variable: SensitivityVariable,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl SensitivityRequest {
    pub fn new(base: CreditInput, variable: SensitivityVariable) -> Self {
        Self {
            base,
            variable,
            start: None,
            end: None,
            steps: default_steps(),
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        let (default_start, default_end) = self.variable.default_range();
        (
            self.start.unwrap_or(default_start),
            self.end.unwrap_or(default_end),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub value: f64,
    pub approval_probability: u8,
    pub recommended_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityCurve {
    pub variable: SensitivityVariable,
    pub base: CreditInput,
    pub points: Vec<SensitivityPoint>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensitivityError {
    #[error("a sweep needs at least 2 steps (got {0})")]
    TooFewSteps(usize),
    #[error("a sweep is limited to {limit} steps (got {requested})")]
    TooManySteps { requested: usize, limit: usize },
    #[error("sweep bounds must be finite numbers")]
    NonFiniteBounds,
    #[error("sweep start {start} is greater than end {end}")]
    InvertedRange { start: f64, end: f64 },
}

/// Evaluate `steps` evenly spaced values between the request bounds, both ends included.
pub fn sweep(
    engine: &CreditScoringEngine,
    request: &SensitivityRequest,
    max_points: usize,
) -> Result<SensitivityCurve, SensitivityError> {
    let steps = request.steps;
    if steps < 2 {
        return Err(SensitivityError::TooFewSteps(steps));
    }
    if steps > max_points {
        return Err(SensitivityError::TooManySteps {
            requested: steps,
            limit: max_points,
        });
    }

    let (start, end) = request.bounds();
    if !start.is_finite() || !end.is_finite() {
        return Err(SensitivityError::NonFiniteBounds);
    }
    if start > end {
        return Err(SensitivityError::InvertedRange { start, end });
    }

    let last = steps - 1;
    let points = (0..steps)
        .map(|step| {
            // Weighted blend of the bounds stays finite even when `end - start` overflows.
            let t = step as f64 / last as f64;
            let value = if step == last {
                end
            } else {
                start * (1.0 - t) + end * t
            };
            let output = engine.evaluate(&request.variable.apply(&request.base, value));
            SensitivityPoint {
                value,
                approval_probability: output.approval_probability,
                recommended_amount: output.recommended_amount,
            }
        })
        .collect();

    Ok(SensitivityCurve {
        variable: request.variable,
        base: request.base,
        points,
    })
}
