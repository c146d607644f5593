//! Forja client core
//!
//! Platform-agnostic logic for the Forja character-creation client.
//! This crate models the factory API contract, interprets its responses and
//! drives the state of each UI component without any browser dependencies.

pub mod backend;
pub mod config;
pub mod delete;
pub mod envelope;
pub mod error;
pub mod image;
pub mod menu;
pub mod model;
pub mod selector;
pub mod ticket;
pub mod transient;

// Re-export commonly used types
pub use backend::{
    FactoryBackend, create_character, delete_factory, fetch_race_info, load_races,
};
pub use config::{BackendConfig, DEFAULT_BACKEND_URL};
pub use delete::DeleteState;
pub use envelope::{
    ApiEnvelope, HttpReply, STATUS_CREATED, coerce_race_list, interpret_create,
    interpret_delete, interpret_info,
};
pub use error::{Action, ForgeError};
pub use image::resolve_image_url;
pub use menu::MenuState;
pub use model::{
    Armor, Attribute, AttributeValue, Body, Character, Mount, Part, PartKind, RaceInfo, Weapon,
};
pub use selector::{LoadPhase, SelectorState};
pub use ticket::{PendingRequest, RequestTicket, TicketSlot};
pub use transient::{AUTO_CLEAR_MS, Transient};

/// Upper-case the first character of a race identifier for display.
///
/// Option values keep the raw identifier; only labels are capitalised.
#[must_use]
pub fn display_race(race: &str) -> String {
    let mut chars = race.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
