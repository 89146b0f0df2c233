use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::domain::CreditInput;
use super::sensitivity::{self, SensitivityCurve, SensitivityError, SensitivityRequest};
use super::session::{CreditInputPatch, CreditSession, SessionError, SessionId, SessionRepository};
use super::{CreditAssessment, CreditScoringEngine};
use crate::config::ScoringConfig;

/// Service composing the scoring engine, session storage and sweep limits.
pub struct CreditScoringService<S> {
    engine: Arc<CreditScoringEngine>,
    sessions: Arc<S>,
    config: ScoringConfig,
}

impl<S> CreditScoringService<S>
where
    S: SessionRepository + 'static,
{
    pub fn new(engine: Arc<CreditScoringEngine>, sessions: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            engine,
            sessions,
            config,
        }
    }

    /// Score a one-off input without touching any session.
    pub fn evaluate(&self, input: &CreditInput) -> CreditAssessment {
        self.engine.assess(input)
    }

    pub fn sensitivity(
        &self,
        request: &SensitivityRequest,
    ) -> Result<SensitivityCurve, CreditServiceError> {
        sensitivity::sweep(&self.engine, request, self.config.max_sensitivity_points).map_err(
            |error| {
                warn!(variable = %request.variable, %error, "sensitivity sweep rejected");
                CreditServiceError::from(error)
            },
        )
    }

    /// Current session state, or a fresh session when none is stored yet.
    pub fn session(&self, id: &SessionId) -> Result<CreditSession, CreditServiceError> {
        let session = self
            .sessions
            .load(id)?
            .unwrap_or_else(|| CreditSession::new(id.clone()));
        Ok(session)
    }

    /// Merge a partial input and rescore when the session carries any figures.
    pub fn update_session(
        &self,
        id: &SessionId,
        patch: &CreditInputPatch,
    ) -> Result<CreditSession, CreditServiceError> {
        if patch.is_empty() {
            return Err(CreditServiceError::EmptyPatch);
        }

        let engine = &self.engine;
        let session = self.sessions.update(id, &mut |session: &mut CreditSession| {
            patch.apply(&mut session.input);
            if session.has_figures() {
                session.output = Some(engine.evaluate(&session.input));
            }
            session.updated_at = Some(Utc::now());
        })?;

        debug!(
            session_id = %id.0,
            rescored = session.has_figures(),
            "credit session updated"
        );

        Ok(session)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Sensitivity(#[from] SensitivityError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("session patch names no fields")]
    EmptyPatch,
}
