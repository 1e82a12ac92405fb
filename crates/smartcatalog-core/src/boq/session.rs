use crate::api::CatalogBackend;
use crate::boq::{
    apply_default_selection, parse_boq_file, parse_boq_text, select_match, DefaultSelection,
};
use crate::error::CatalogError;
use crate::model::{BoqLineItem, BoqResult};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The BOQ text did not parse; nothing was sent.
    MalformedInput(String),
    /// The backend or the transport failed.
    Backend(String),
}

/// Where a BOQ submission currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoqState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed(FailReason),
}

impl fmt::Display for BoqState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoqState::Idle => write!(f, "idle"),
            BoqState::Validating => write!(f, "validating"),
            BoqState::Submitting => write!(f, "submitting"),
            BoqState::Succeeded => write!(f, "succeeded"),
            BoqState::Failed(FailReason::MalformedInput(_)) => write!(f, "failed (malformed-input)"),
            BoqState::Failed(FailReason::Backend(_)) => write!(f, "failed (backend)"),
        }
    }
}

/// One page view's BOQ results and the state of its latest submission.
///
/// Only one submission may be in flight; a successful one replaces the
/// results wholesale and a failed one leaves them untouched.
#[derive(Debug, Clone, Default)]
pub struct BoqSession {
    state: BoqState,
    results: Vec<BoqResult>,
}

impl BoqSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoqState {
        &self.state
    }

    pub fn results(&self) -> &[BoqResult] {
        &self.results
    }

    /// False while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.state != BoqState::Submitting
    }

    /// Validate `text` and submit it to `/process-boq-text`.
    pub fn submit_text(
        &mut self,
        backend: &dyn CatalogBackend,
        text: &str,
        policy: DefaultSelection,
    ) -> Result<&[BoqResult], CatalogError> {
        self.submit_items(backend, || parse_boq_text(text), policy)
    }

    /// Read a text file of BOQ lines and submit it like [`Self::submit_text`].
    /// An unreadable file fails validation, so nothing is sent.
    pub fn submit_text_file(
        &mut self,
        backend: &dyn CatalogBackend,
        path: &Path,
        policy: DefaultSelection,
    ) -> Result<&[BoqResult], CatalogError> {
        self.submit_items(backend, || parse_boq_file(path), policy)
    }

    /// Submit a BOQ document to `/process-boq`.
    pub fn submit_file(
        &mut self,
        backend: &dyn CatalogBackend,
        path: &Path,
        policy: DefaultSelection,
    ) -> Result<&[BoqResult], CatalogError> {
        self.admit()?;
        self.transition(BoqState::Submitting);
        let outcome = backend.process_boq_file(path);
        self.finish(outcome, policy)
    }

    /// Select candidate `match_id` for line item `index`. Unknown ids are
    /// ignored.
    pub fn select(&mut self, index: usize, match_id: i64) {
        self.results = select_match(&self.results, index, match_id);
    }

    /// Return to `Idle`, keeping the current results.
    pub fn reset(&mut self) {
        self.transition(BoqState::Idle);
    }

    fn submit_items(
        &mut self,
        backend: &dyn CatalogBackend,
        parse: impl FnOnce() -> Result<Vec<BoqLineItem>, CatalogError>,
        policy: DefaultSelection,
    ) -> Result<&[BoqResult], CatalogError> {
        self.admit()?;

        self.transition(BoqState::Validating);
        let items = match parse() {
            Ok(items) => items,
            Err(e) => {
                self.transition(BoqState::Failed(FailReason::MalformedInput(e.to_string())));
                return Err(e);
            }
        };

        self.transition(BoqState::Submitting);
        let outcome = backend.process_boq_text(&items);
        self.finish(outcome, policy)
    }

    fn admit(&self) -> Result<(), CatalogError> {
        if self.can_submit() {
            Ok(())
        } else {
            Err(CatalogError::SubmissionInFlight)
        }
    }

    fn finish(
        &mut self,
        outcome: Result<Vec<BoqResult>, CatalogError>,
        policy: DefaultSelection,
    ) -> Result<&[BoqResult], CatalogError> {
        match outcome {
            Ok(results) => {
                self.results = apply_default_selection(results, policy);
                self.transition(BoqState::Succeeded);
                Ok(&self.results)
            }
            Err(e) => {
                warn!("BOQ processing failed: {e}");
                self.transition(BoqState::Failed(FailReason::Backend(e.to_string())));
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: BoqState) {
        info!(from = %self.state, to = %next, "BOQ session state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_open() {
        let session = BoqSession::new();
        assert_eq!(session.state(), &BoqState::Idle);
        assert!(session.can_submit());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_in_flight_session_refuses_submission() {
        let mut session = BoqSession::new();
        session.state = BoqState::Submitting;
        assert!(!session.can_submit());
        assert!(matches!(
            session.admit(),
            Err(CatalogError::SubmissionInFlight)
        ));
        session.reset();
        assert!(session.can_submit());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(
            BoqState::Failed(FailReason::MalformedInput("x".into())).to_string(),
            "failed (malformed-input)"
        );
        assert_eq!(BoqState::Submitting.to_string(), "submitting");
    }
}
