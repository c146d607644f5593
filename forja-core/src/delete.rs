use crate::error::{Action, ForgeError};
use crate::ticket::{PendingRequest, RequestTicket, TicketSlot};
use crate::transient::Transient;

/// State of the delete control.
///
/// Success and error banners expire independently of each other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteState {
    request: TicketSlot,
    error: Transient<String>,
    success: Transient<String>,
}

/// Question asked before a factory is deleted.
#[must_use]
pub fn confirmation_prompt(race: &str) -> String {
    format!(
        "¿Estás seguro de que quieres eliminar la fábrica de héroes {race}? Esta acción no se puede deshacer."
    )
}

impl DeleteState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the selection and ask `confirm` before starting a deletion.
    ///
    /// `Ok(None)` means the user declined; nothing changed.
    ///
    /// # Errors
    ///
    /// [`ForgeError::NoRaceSelected`] without asking or touching any state.
    pub fn begin(
        &mut self,
        race: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Option<PendingRequest>, ForgeError> {
        let kind = race.trim();
        if kind.is_empty() {
            return Err(ForgeError::NoRaceSelected(Action::Delete));
        }
        if !confirm(&confirmation_prompt(kind)) {
            return Ok(None);
        }
        self.error.clear();
        self.success.clear();
        Ok(Some(PendingRequest {
            ticket: self.request.issue(),
            kind: kind.to_string(),
        }))
    }

    /// Apply a deletion outcome. Returns `true` when the parent must be notified.
    pub fn finish(&mut self, ticket: RequestTicket, outcome: Result<String, ForgeError>) -> bool {
        if outcome.as_ref().is_err_and(ForgeError::is_cancelled) {
            return false;
        }
        if !self.request.settle(ticket) {
            log::debug!("dropping stale delete response #{}", ticket.id());
            return false;
        }
        match outcome {
            Ok(message) => {
                log::info!("factory deleted: {message}");
                self.success.set(message);
                true
            }
            Err(err) => {
                log::warn!("factory deletion failed: {err}");
                self.error.set(err.display_message(Action::Delete));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.request.cancel();
    }

    pub fn expire_error(&mut self, generation: u64) -> bool {
        self.error.expire(generation)
    }

    pub fn expire_success(&mut self, generation: u64) -> bool {
        self.success.expire(generation)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.request.in_flight()
    }

    /// Button disabled without a race, while deleting, or when the parent says so.
    #[must_use]
    pub fn is_disabled(&self, race: &str, parent_disabled: bool) -> bool {
        race.trim().is_empty() || self.is_loading() || parent_disabled
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.get().map(String::as_str)
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.get().map(String::as_str)
    }

    #[must_use]
    pub const fn error_expiry(&self) -> Option<u64> {
        self.error.pending_expiry()
    }

    #[must_use]
    pub const fn success_expiry(&self) -> Option<u64> {
        self.success.pending_expiry()
    }
}
