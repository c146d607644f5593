//! State of the character menu, the component that orchestrates selection,
//! creation, info preview and deletion.

use crate::error::{Action, ForgeError};
use crate::model::{Character, RaceInfo};
use crate::ticket::{PendingRequest, RequestTicket, TicketSlot};
use crate::transient::Transient;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuState {
    selected_race: String,
    character: Option<Character>,
    info: Option<RaceInfo>,
    creating: TicketSlot,
    inquiring: TicketSlot,
    error: Transient<String>,
}

impl MenuState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection.
    ///
    /// Switching race drops the previous race's preview and abandons any
    /// creation or preview still in flight for it.
    pub fn select_race(&mut self, race: impl Into<String>) {
        let race = race.into();
        if race != self.selected_race {
            self.info = None;
            self.inquiring.cancel();
            self.creating.cancel();
        }
        self.selected_race = race;
    }

    /// Start a creation for the selected race.
    ///
    /// Clears the current character, preview and error before the request resolves.
    ///
    /// # Errors
    ///
    /// [`ForgeError::NoRaceSelected`] without touching any state.
    pub fn begin_create(&mut self) -> Result<PendingRequest, ForgeError> {
        let kind = self.require_race(Action::Create)?;
        self.character = None;
        self.info = None;
        self.error.clear();
        Ok(PendingRequest {
            ticket: self.creating.issue(),
            kind,
        })
    }

    pub fn finish_create(&mut self, ticket: RequestTicket, outcome: Result<Character, ForgeError>) {
        if outcome.as_ref().is_err_and(ForgeError::is_cancelled) {
            return;
        }
        if !self.creating.settle(ticket) {
            log::debug!("dropping stale creation response #{}", ticket.id());
            return;
        }
        match outcome {
            Ok(character) => {
                self.character = Some(character);
                self.error.clear();
            }
            Err(err) => {
                log::warn!("character creation failed: {err}");
                self.error.set(err.display_message(Action::Create));
            }
        }
    }

    /// Start an info request for the selected race.
    ///
    /// # Errors
    ///
    /// [`ForgeError::NoRaceSelected`] without touching any state.
    pub fn begin_info(&mut self) -> Result<PendingRequest, ForgeError> {
        let kind = self.require_race(Action::Info)?;
        self.info = None;
        self.error.clear();
        Ok(PendingRequest {
            ticket: self.inquiring.issue(),
            kind,
        })
    }

    pub fn finish_info(&mut self, ticket: RequestTicket, outcome: Result<RaceInfo, ForgeError>) {
        if outcome.as_ref().is_err_and(ForgeError::is_cancelled) {
            return;
        }
        if !self.inquiring.settle(ticket) {
            log::debug!("dropping stale info response #{}", ticket.id());
            return;
        }
        match outcome {
            Ok(info) => self.info = Some(info),
            Err(err) => {
                log::warn!("race info failed: {err}");
                self.error.set(err.display_message(Action::Info));
            }
        }
    }

    /// The selected factory was deleted: nothing derived from it stays on screen.
    pub fn factory_deleted(&mut self) {
        self.character = None;
        self.info = None;
        self.inquiring.cancel();
        self.error.clear();
    }

    /// Drop every outstanding request, e.g. when the menu goes away.
    pub fn cancel_all(&mut self) {
        self.creating.cancel();
        self.inquiring.cancel();
    }

    pub fn expire_error(&mut self, generation: u64) -> bool {
        self.error.expire(generation)
    }

    fn require_race(&self, action: Action) -> Result<String, ForgeError> {
        let race = self.selected_race.trim();
        if race.is_empty() {
            return Err(ForgeError::NoRaceSelected(action));
        }
        Ok(race.to_string())
    }

    #[must_use]
    pub fn selected_race(&self) -> &str {
        &self.selected_race
    }

    #[must_use]
    pub const fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    #[must_use]
    pub const fn info(&self) -> Option<&RaceInfo> {
        self.info.as_ref()
    }

    #[must_use]
    pub const fn is_creating(&self) -> bool {
        self.creating.in_flight()
    }

    #[must_use]
    pub const fn is_inquiring(&self) -> bool {
        self.inquiring.in_flight()
    }

    #[must_use]
    pub fn can_create(&self) -> bool {
        !self.selected_race.trim().is_empty() && !self.is_creating()
    }

    #[must_use]
    pub fn can_inquire(&self) -> bool {
        !self.selected_race.trim().is_empty() && !self.is_inquiring()
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
