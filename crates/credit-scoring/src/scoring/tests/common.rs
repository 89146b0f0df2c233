use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::scoring::domain::{CreditHistory, CreditInput};
use crate::scoring::session::{CreditSession, SessionError, SessionId, SessionRepository};
use crate::scoring::{credit_router, CreditScoringEngine, CreditScoringService, RuleBase};

pub(super) const EPSILON: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn input(income: f64, debt_load: f64, history: CreditHistory, age: f64) -> CreditInput {
    CreditInput {
        income,
        debt_load,
        credit_history: history,
        age,
    }
}

pub(super) fn rule_base() -> Arc<RuleBase> {
    Arc::new(RuleBase::build())
}

pub(super) fn engine() -> Arc<CreditScoringEngine> {
    Arc::new(CreditScoringEngine::new(rule_base()))
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, CreditSession>>>,
}

impl SessionRepository for MemorySessions {
    fn load(&self, id: &SessionId) -> Result<Option<CreditSession>, SessionError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut CreditSession),
    ) -> Result<CreditSession, SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let session = guard
            .entry(id.clone())
            .or_insert_with(|| CreditSession::new(id.clone()));
        change(session);
        Ok(session.clone())
    }
}

pub(super) struct UnavailableSessions;

impl SessionRepository for UnavailableSessions {
    fn load(&self, _id: &SessionId) -> Result<Option<CreditSession>, SessionError> {
        Err(SessionError::Unavailable("offline".to_string()))
    }

    fn update(
        &self,
        _id: &SessionId,
        _change: &mut dyn FnMut(&mut CreditSession),
    ) -> Result<CreditSession, SessionError> {
        Err(SessionError::Unavailable("offline".to_string()))
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        max_sensitivity_points: 50,
    }
}

pub(super) fn build_service() -> (Arc<CreditScoringService<MemorySessions>>, MemorySessions) {
    let sessions = MemorySessions::default();
    let service = Arc::new(CreditScoringService::new(
        engine(),
        Arc::new(sessions.clone()),
        scoring_config(),
    ));
    (service, sessions)
}

pub(super) fn router_with_service(
    service: Arc<CreditScoringService<MemorySessions>>,
) -> axum::Router {
    credit_router(service)
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
