use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CreditHistory, CreditInput, CreditOutput};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

/// Last entered input and last computed output for one caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditSession {
    pub session_id: SessionId,
    pub input: CreditInput,
    pub output: Option<CreditOutput>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CreditSession {
    /// Fresh session: zeroed figures, average history, nothing computed yet.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            input: CreditInput::default(),
            output: None,
            updated_at: None,
        }
    }

    /// Whether the current input carries enough to be worth scoring.
    pub fn has_figures(&self) -> bool {
        self.input.income > 0.0 || self.input.debt_load > 0.0 || self.input.age > 0.0
    }
}

/// Partial update merged into the stored input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditInputPatch {
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub debt_load: Option<f64>,
    #[serde(default)]
    pub credit_history: Option<CreditHistory>,
    #[serde(default)]
    pub age: Option<f64>,
}

impl CreditInputPatch {
    pub fn apply(&self, input: &mut CreditInput) {
        if let Some(income) = self.income {
            input.income = income;
        }
        if let Some(debt_load) = self.debt_load {
            input.debt_load = debt_load;
        }
        if let Some(history) = self.credit_history {
            input.credit_history = history;
        }
        if let Some(age) = self.age {
            input.age = age;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_none()
            && self.debt_load.is_none()
            && self.credit_history.is_none()
            && self.age.is_none()
    }
}

/// Storage abstraction so the service can be exercised without a backing store.
pub trait SessionRepository: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<CreditSession>, SessionError>;

    /// Apply `change` to the stored session, or to a fresh one when none exists,
    /// and persist the result. Implementations must hold their lock across the
    /// whole read-modify-write so concurrent updates never overwrite each other.
    fn update(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut CreditSession),
    ) -> Result<CreditSession, SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
