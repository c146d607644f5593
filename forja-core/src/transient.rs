//! Messages that disappear on their own.
//!
//! Each `set` bumps a generation counter. The platform layer schedules an expiry
//! for that generation; an expiry only clears the value when no newer message has
//! replaced it in the meantime, so a superseded timer can never hide a fresh message.

/// Delay before a transient message clears itself, in milliseconds.
pub const AUTO_CLEAR_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transient<T> {
    value: Option<T>,
    generation: u64,
}

impl<T> Default for Transient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Transient<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            generation: 0,
        }
    }

    /// Show `value` and return the generation its expiry must carry.
    pub fn set(&mut self, value: T) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.value = Some(value);
        self.generation
    }

    /// Hide the current value immediately.
    pub fn clear(&mut self) {
        if self.value.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Clear the value if `generation` still identifies it.
    ///
    /// Returns `true` when something was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.value.is_some() {
            self.value = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation to schedule an expiry for, if a value is showing.
    #[must_use]
    pub const fn pending_expiry(&self) -> Option<u64> {
        if self.value.is_some() {
            Some(self.generation)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_for_current_generation_hides_message() {
        let mut msg = Transient::new();
        let generation = msg.set("boom");
        assert_eq!(msg.get(), Some(&"boom"));
        assert!(msg.expire(generation));
        assert!(!msg.is_visible());
    }

    #[test]
    fn newer_message_survives_stale_expiry() {
        let mut msg = Transient::new();
        let first = msg.set("first");
        let second = msg.set("second");
        assert_ne!(first, second);
        assert!(!msg.expire(first), "stale timer must not clear");
        assert_eq!(msg.get(), Some(&"second"));
        assert!(msg.expire(second));
        assert_eq!(msg.pending_expiry(), None);
    }

    #[test]
    fn clear_invalidates_outstanding_expiry() {
        let mut msg = Transient::new();
        let generation = msg.set(1_u8);
        msg.clear();
        let next = msg.set(2_u8);
        assert!(!msg.expire(generation));
        assert_eq!(msg.get(), Some(&2));
        assert_eq!(msg.pending_expiry(), Some(next));
    }

    #[test]
    fn clear_on_empty_keeps_generation() {
        let mut msg: Transient<String> = Transient::default();
        msg.clear();
        assert_eq!(msg.generation(), 0);
    }
}
