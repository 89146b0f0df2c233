//! Fuzzy-inference scoring of loan applicants.
//!
//! Crisp inputs are fuzzified by [`membership`], matched against the 192-row [`RuleBase`],
//! aggregated per output class by [`inference`] and defuzzified by [`decision`] into an
//! approval probability and a recommended credit amount. The rule base is built once and
//! shared read-only through [`CreditScoringEngine`].

pub mod decision;
pub mod domain;
pub mod inference;
pub mod membership;
pub mod router;
pub mod rules;
pub mod sensitivity;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

pub use domain::{
    CreditHistory, CreditInput, CreditOutput, OutputClass, Term, UnknownCreditHistory,
};
pub use inference::{ClassStrengths, Inference};
pub use membership::FuzzifiedInput;
pub use router::credit_router;
pub use rules::{Rule, RuleBase, RULE_COUNT};
pub use sensitivity::{
    SensitivityCurve, SensitivityError, SensitivityPoint, SensitivityRequest, SensitivityVariable,
};
pub use service::{CreditScoringService, CreditServiceError};
pub use session::{CreditInputPatch, CreditSession, SessionError, SessionId, SessionRepository};

/// Stateless evaluator over a shared, immutable rule base.
#[derive(Debug, Clone)]
pub struct CreditScoringEngine {
    rules: Arc<RuleBase>,
}

impl CreditScoringEngine {
    pub fn new(rules: Arc<RuleBase>) -> Self {
        Self { rules }
    }

    pub fn rule_base(&self) -> &RuleBase {
        &self.rules
    }

    /// Score an input, returning only the public output contract.
    pub fn evaluate(&self, input: &CreditInput) -> CreditOutput {
        self.assess(input).output
    }

    /// Score an input and keep the intermediate fuzzy state for inspection.
    pub fn assess(&self, input: &CreditInput) -> CreditAssessment {
        let memberships = FuzzifiedInput::from_input(input);
        let Inference {
            probability,
            strengths,
        } = inference::infer(&self.rules, &memberships);

        let output = CreditOutput {
            approval_probability: decision::approval_percentage(probability),
            recommended_amount: decision::recommended_amount(input.income, probability, input.age),
        };
        let dominant_class = strengths.dominant();

        debug!(
            approval_probability = output.approval_probability,
            recommended_amount = output.recommended_amount,
            dominant_class = ?dominant_class,
            "credit input scored"
        );

        CreditAssessment {
            input: *input,
            output,
            raw_probability: probability,
            dominant_class,
            class_strengths: strengths,
            memberships,
        }
    }
}

impl Default for CreditScoringEngine {
    fn default() -> Self {
        Self::new(Arc::new(RuleBase::build()))
    }
}

/// Evaluation output together with the fuzzy trail that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAssessment {
    pub input: CreditInput,
    #[serde(flatten)]
    pub output: CreditOutput,
    pub raw_probability: f64,
    pub dominant_class: Option<OutputClass>,
    pub class_strengths: ClassStrengths,
    pub memberships: FuzzifiedInput,
}
