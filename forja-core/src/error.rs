use thiserror::Error;

/// User-initiated operation an error is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListRaces,
    Create,
    Info,
    Delete,
}

impl Action {
    /// Warning shown when the action is attempted without a selected race.
    #[must_use]
    pub const fn missing_race_warning(self) -> &'static str {
        match self {
            Self::Create => "🎭 Debes seleccionar una raza antes de crear tu héroe.",
            Self::Delete => "🚫 Debes seleccionar una raza antes de eliminar.",
            Self::Info => "📜 Debes seleccionar una raza antes de consultar su información.",
            Self::ListRaces => "Debes seleccionar una raza.",
        }
    }

    /// Message used when neither the backend nor the transport supplies one.
    #[must_use]
    pub const fn fallback_failure(self) -> &'static str {
        match self {
            Self::ListRaces => "Error desconocido",
            Self::Create => "Error al forjar tu héroe",
            Self::Info => "Error al consultar la raza",
            Self::Delete => "Error al eliminar la fábrica",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    #[error("{}", .0.missing_race_warning())]
    NoRaceSelected(Action),
    #[error("{0}")]
    Transport(String),
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
    #[error("{0}")]
    Backend(String),
    #[error("request superseded")]
    Cancelled,
}

impl ForgeError {
    /// Text for the failure banner of `action`.
    ///
    /// Empty transport or backend messages fall back to the action's generic phrase.
    #[must_use]
    pub fn display_message(&self, action: Action) -> String {
        match self {
            Self::Transport(message) | Self::Backend(message) if message.trim().is_empty() => {
                action.fallback_failure().to_string()
            }
            Self::Cancelled => action.fallback_failure().to_string(),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_race_errors_render_action_warning() {
        let err = ForgeError::NoRaceSelected(Action::Create);
        assert_eq!(
            err.to_string(),
            "🎭 Debes seleccionar una raza antes de crear tu héroe."
        );
        let err = ForgeError::NoRaceSelected(Action::Delete);
        assert!(err.to_string().contains("antes de eliminar"));
    }

    #[test]
    fn blank_messages_fall_back_per_action() {
        assert_eq!(
            ForgeError::Backend(String::new()).display_message(Action::Create),
            "Error al forjar tu héroe"
        );
        assert_eq!(
            ForgeError::Transport("  ".into()).display_message(Action::Delete),
            "Error al eliminar la fábrica"
        );
        assert_eq!(
            ForgeError::Transport("Failed to fetch".into()).display_message(Action::ListRaces),
            "Failed to fetch"
        );
    }

    #[test]
    fn decode_errors_keep_parser_detail() {
        let err: ForgeError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        let msg = err.display_message(Action::ListRaces);
        assert!(msg.starts_with("Respuesta inválida del servidor"), "{msg}");
    }
}
