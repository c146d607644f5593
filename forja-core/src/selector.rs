use crate::error::{Action, ForgeError};
use crate::ticket::{RequestTicket, TicketSlot};
use crate::transient::Transient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Race list loading state of the race selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorState {
    phase: LoadPhase,
    races: Vec<String>,
    error: Transient<String>,
    request: TicketSlot,
}

impl SelectorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> RequestTicket {
        self.phase = LoadPhase::Loading;
        self.error.clear();
        self.request.issue()
    }

    /// Apply the outcome of the load identified by `ticket`.
    ///
    /// Stale tickets and cancellations leave the state untouched.
    pub fn finish_load(&mut self, ticket: RequestTicket, outcome: Result<Vec<String>, ForgeError>) {
        if outcome.as_ref().is_err_and(ForgeError::is_cancelled) {
            return;
        }
        if !self.request.settle(ticket) {
            log::debug!("dropping stale race list response #{}", ticket.id());
            return;
        }
        match outcome {
            Ok(races) => {
                self.races = races;
                self.phase = LoadPhase::Loaded;
            }
            Err(err) => {
                log::error!("failed to load races: {err}");
                self.phase = LoadPhase::Errored;
                self.error.set(err.display_message(Action::ListRaces));
            }
        }
    }

    /// Give up on the outstanding load, e.g. when the selector goes away.
    pub fn cancel(&mut self) {
        if self.request.cancel().is_some() && self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Idle;
        }
    }

    pub fn expire_error(&mut self, generation: u64) -> bool {
        self.error.expire(generation)
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    #[must_use]
    pub fn races(&self) -> &[String] {
        &self.races
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.get().map(String::as_str)
    }

    #[must_use]
    pub const fn error_expiry(&self) -> Option<u64> {
        self.error.pending_expiry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::coerce_race_list;
    use serde_json::json;

    #[test]
    fn load_moves_through_loading_to_loaded() {
        let mut state = SelectorState::new();
        assert_eq!(state.phase(), LoadPhase::Idle);
        let ticket = state.begin_load();
        assert!(state.is_loading());
        state.finish_load(ticket, Ok(vec!["orco".into(), "elfo".into()]));
        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert_eq!(state.races(), ["orco", "elfo"]);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn non_array_payload_loads_as_empty_list() {
        let mut state = SelectorState::new();
        let ticket = state.begin_load();
        state.finish_load(ticket, Ok(coerce_race_list(&json!({ "detail": "nope" }))));
        assert_eq!(state.phase(), LoadPhase::Loaded);
        assert!(state.races().is_empty());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failure_sets_expiring_error() {
        let mut state = SelectorState::new();
        let ticket = state.begin_load();
        state.finish_load(ticket, Err(ForgeError::Transport("Failed to fetch".into())));
        assert_eq!(state.phase(), LoadPhase::Errored);
        assert_eq!(state.error(), Some("Failed to fetch"));
        let generation = state.error_expiry().expect("expiry scheduled");
        assert!(state.expire_error(generation));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn stale_and_cancelled_results_are_ignored() {
        let mut state = SelectorState::new();
        let stale = state.begin_load();
        let fresh = state.begin_load();
        state.finish_load(stale, Ok(vec!["viejo".into()]));
        assert!(state.is_loading());
        state.finish_load(fresh, Err(ForgeError::Cancelled));
        assert!(state.is_loading());
        state.finish_load(fresh, Ok(vec!["nuevo".into()]));
        assert_eq!(state.races(), ["nuevo"]);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut state = SelectorState::new();
        let ticket = state.begin_load();
        state.cancel();
        assert_eq!(state.phase(), LoadPhase::Idle);
        state.finish_load(ticket, Ok(vec!["tarde".into()]));
        assert!(state.races().is_empty());
    }
}
