use credit_scoring::scoring::{CreditSession, SessionError, SessionId, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, CreditSession>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn load(&self, id: &SessionId) -> Result<Option<CreditSession>, SessionError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn update(
        &self,
        id: &SessionId,
        change: &mut dyn FnMut(&mut CreditSession),
    ) -> Result<CreditSession, SessionError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| SessionError::Unavailable("session mutex poisoned".to_string()))?;
        let session = guard
            .entry(id.clone())
            .or_insert_with(|| CreditSession::new(id.clone()));
        change(session);
        Ok(session.clone())
    }
}
