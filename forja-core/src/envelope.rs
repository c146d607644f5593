//! Interpretation of factory API responses.
//!
//! The backend signals outcomes through a loose envelope rather than HTTP status
//! alone: creation succeeds on `status == "created"`, deletion needs both a 2xx
//! status and `success == true`, and failures carry `error` and maybe `message`.

use crate::error::{Action, ForgeError};
use crate::model::{Character, RaceInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_CREATED: &str = "created";

/// Raw HTTP outcome handed back by a [`crate::FactoryBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<Character>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl ApiEnvelope {
    /// Decode an envelope; bodies that are not JSON objects read as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError::Decode`] when an object carries fields of the wrong shape.
    pub fn from_body(body: &Value) -> Result<Self, ForgeError> {
        if !body.is_object() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(body)?)
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        self.status.as_deref() == Some(STATUS_CREATED)
    }

    /// `error` present and not null.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    #[must_use]
    pub fn reports_success(&self) -> bool {
        self.success == Some(true)
    }

    /// Backend `message`, or `fallback` when absent or blank.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Race list from the factories endpoint.
///
/// Anything other than an array made only of strings yields an empty list.
#[must_use]
pub fn coerce_race_list(body: &Value) -> Vec<String> {
    let Some(items) = body.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// Outcome of a creation request.
///
/// The HTTP status is not consulted; the envelope decides.
///
/// # Errors
///
/// [`ForgeError::Backend`] with the backend message (or the generic phrase) for any
/// non-created envelope, [`ForgeError::Decode`] for malformed envelopes.
pub fn interpret_create(reply: &HttpReply) -> Result<Character, ForgeError> {
    let envelope = ApiEnvelope::from_body(&reply.body)?;
    let fallback = Action::Create.fallback_failure();
    if envelope.is_created() {
        return envelope
            .character
            .ok_or_else(|| ForgeError::Backend(fallback.to_string()));
    }
    if envelope.has_error() {
        log::warn!(
            "create rejected by backend: {}",
            envelope.error.as_ref().map(Value::to_string).unwrap_or_default()
        );
    }
    Err(ForgeError::Backend(envelope.message_or(fallback)))
}

/// Outcome of a deletion request; the success text on `Ok`.
///
/// # Errors
///
/// [`ForgeError::Backend`] unless the status is 2xx and `success` is `true`.
pub fn interpret_delete(reply: &HttpReply) -> Result<String, ForgeError> {
    let envelope = ApiEnvelope::from_body(&reply.body)?;
    if reply.is_success() && envelope.reports_success() {
        return Ok(envelope.message_or("Fábrica eliminada exitosamente"));
    }
    Err(ForgeError::Backend(
        envelope.message_or(Action::Delete.fallback_failure()),
    ))
}

/// Outcome of a race info request.
///
/// # Errors
///
/// [`ForgeError::Backend`] for non-2xx replies or envelopes carrying `error`,
/// [`ForgeError::Decode`] when the body is not a race description.
pub fn interpret_info(reply: &HttpReply) -> Result<RaceInfo, ForgeError> {
    let envelope = ApiEnvelope::from_body(&reply.body)?;
    if !reply.is_success() || envelope.has_error() {
        return Err(ForgeError::Backend(
            envelope.message_or(Action::Info.fallback_failure()),
        ));
    }
    if !reply.body.is_object() {
        return Err(ForgeError::Decode(format!(
            "se esperaba un objeto, llegó {}",
            reply.body
        )));
    }
    Ok(RaceInfo::deserialize(&reply.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: Value) -> HttpReply {
        HttpReply::new(200, body)
    }

    #[test]
    fn race_list_accepts_only_string_arrays() {
        assert_eq!(
            coerce_race_list(&json!(["orco", "elfo"])),
            vec!["orco".to_string(), "elfo".to_string()]
        );
        assert!(coerce_race_list(&json!({ "races": ["orco"] })).is_empty());
        assert!(coerce_race_list(&Value::Null).is_empty());
        assert!(coerce_race_list(&json!(["orco", 3])).is_empty());
        assert!(coerce_race_list(&json!([])).is_empty());
    }

    #[test]
    fn created_envelope_yields_character() {
        let reply = ok(json!({
            "status": "created",
            "kind": "elfo",
            "character": { "cuerpo": { "especie": "Elfo" } }
        }));
        let character = interpret_create(&reply).expect("created");
        assert_eq!(
            character.body.and_then(|b| b.species).as_deref(),
            Some("Elfo")
        );
    }

    #[test]
    fn created_without_character_fails_with_fallback() {
        let err = interpret_create(&ok(json!({ "status": "created" }))).unwrap_err();
        assert_eq!(err, ForgeError::Backend("Error al forjar tu héroe".into()));
    }

    #[test]
    fn error_envelope_prefers_backend_message() {
        let reply = ok(json!({ "status": "error", "error": "busy", "message": "Fábrica ocupada" }));
        assert_eq!(
            interpret_create(&reply).unwrap_err(),
            ForgeError::Backend("Fábrica ocupada".into())
        );
        let reply = HttpReply::new(404, json!({ "error": "Fabrica desconocida" }));
        assert_eq!(
            interpret_create(&reply).unwrap_err().to_string(),
            "Error al forjar tu héroe"
        );
    }

    #[test]
    fn envelope_without_status_or_error_uses_fallback() {
        let err = interpret_create(&ok(json!({ "status": "pending" }))).unwrap_err();
        assert_eq!(err.to_string(), "Error al forjar tu héroe");
        let err = interpret_create(&ok(json!(["not", "an", "object"]))).unwrap_err();
        assert_eq!(err.to_string(), "Error al forjar tu héroe");
    }

    #[test]
    fn numeric_attributes_do_not_fail_creation() {
        let reply = ok(json!({
            "status": "created",
            "character": { "cuerpo": { "altura": 1.8, "peso": 120, "habilidades": null } }
        }));
        let body = interpret_create(&reply).expect("created").body.expect("body");
        assert_eq!(body.height.as_deref(), Some("1.8"));
        assert_eq!(body.weight.as_deref(), Some("120"));
        assert!(body.abilities.is_empty());
    }

    #[test]
    fn malformed_character_is_a_decode_error() {
        let reply = ok(json!({ "status": "created", "character": { "cuerpo": "Orco" } }));
        assert!(matches!(interpret_create(&reply), Err(ForgeError::Decode(_))));
    }

    #[test]
    fn delete_requires_ok_status_and_success_flag() {
        assert_eq!(
            interpret_delete(&ok(json!({ "success": true, "message": "ok" }))).unwrap(),
            "ok"
        );
        assert_eq!(
            interpret_delete(&ok(json!({ "success": true }))).unwrap(),
            "Fábrica eliminada exitosamente"
        );
        assert_eq!(
            interpret_delete(&HttpReply::new(500, json!({ "success": true, "message": "x" })))
                .unwrap_err(),
            ForgeError::Backend("x".into())
        );
        assert_eq!(
            interpret_delete(&ok(json!({ "success": false }))).unwrap_err(),
            ForgeError::Backend("Error al eliminar la fábrica".into())
        );
        assert_eq!(
            interpret_delete(&ok(json!({ "status": "deleted" }))).unwrap_err(),
            ForgeError::Backend("Error al eliminar la fábrica".into())
        );
    }

    #[test]
    fn info_decodes_or_reports_backend_error() {
        let info = interpret_info(&ok(json!({
            "kind": "enanos",
            "cuerpo": { "especie": "Enano" },
            "montura": { "tipo": "Carnero" }
        })))
        .expect("info");
        assert_eq!(info.kind.as_deref(), Some("enanos"));
        assert_eq!(info.character.parts().len(), 2);

        let err = interpret_info(&HttpReply::new(404, json!({ "error": "unknown factory" })))
            .unwrap_err();
        assert_eq!(err, ForgeError::Backend("Error al consultar la raza".into()));

        assert!(matches!(
            interpret_info(&ok(json!("texto"))),
            Err(ForgeError::Decode(_))
        ));
    }
}
