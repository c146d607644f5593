/// Identifier of one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A request that passed its preconditions and may now hit the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub kind: String,
}

/// Tracks the latest request of one action.
///
/// Only the most recently issued ticket can settle; results for older tickets
/// are stale and must be dropped by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSlot {
    issued: u64,
    pending: Option<RequestTicket>,
}

impl TicketSlot {
    pub fn issue(&mut self) -> RequestTicket {
        self.issued = self.issued.wrapping_add(1);
        let ticket = RequestTicket(self.issued);
        self.pending = Some(ticket);
        ticket
    }

    /// Mark `ticket` as completed. Returns `false` for stale tickets.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Forget the outstanding request, if any.
    pub fn cancel(&mut self) -> Option<RequestTicket> {
        self.pending.take()
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.pending.is_some()
    }
}
