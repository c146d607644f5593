//! Character data returned by the factory API.
//!
//! Each sub-structure keeps its known attributes as typed fields and collects
//! anything else in an `extra` bag, so new backend fields still reach the cards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of a character attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl AttributeValue {
    /// Scalar rendering of the value; lists are joined with commas.
    #[must_use]
    pub fn as_display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(", "),
            Self::Other(serde_json::Value::String(text)) => text.clone(),
            Self::Other(value) => value.to_string(),
        }
    }
}

/// One labelled entry of a card listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub label: String,
    pub value: AttributeValue,
}

impl Attribute {
    fn known(key: &str, label: &str, value: AttributeValue) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
        }
    }

    fn extra(key: &str, value: &AttributeValue) -> Self {
        Self {
            key: key.to_string(),
            label: format!("{}:", crate::display_race(key)),
            value: value.clone(),
        }
    }
}

type Extra = BTreeMap<String, AttributeValue>;

/// Known attributes accept whatever scalar the backend sends.
///
/// Numbers and booleans are kept as their JSON text, `null` counts as absent,
/// and a lone scalar where a list is expected becomes a one-item list.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Value>::deserialize(de)?.and_then(scalar))
    }

    pub(super) fn list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::Array(items)) => items.into_iter().filter_map(scalar).collect(),
            Some(value) => scalar(value).into_iter().collect(),
            None => Vec::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(
        rename = "cuerpo_img",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        rename = "especie",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub species: Option<String>,
    #[serde(
        rename = "altura",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<String>,
    #[serde(
        rename = "peso",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<String>,
    #[serde(
        rename = "habilidades",
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub abilities: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Mount {
    #[serde(
        rename = "imagen",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        rename = "tipo",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(
        rename = "velocidad",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed: Option<String>,
    #[serde(
        rename = "habilidades",
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub abilities: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Armor {
    #[serde(
        rename = "imagen",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        rename = "tipo",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(
        rename = "defensa",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub defense: Option<String>,
    #[serde(
        rename = "peso",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(
        rename = "imagen",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(
        rename = "tipo",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(
        rename = "daño",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub damage: Option<String>,
    #[serde(
        rename = "alcance",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub reach: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Which sub-structure of a character a part is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Body,
    Mount,
    Armor,
    Weapon,
}

impl PartKind {
    pub const ALL: [Self; 4] = [Self::Body, Self::Mount, Self::Armor, Self::Weapon];

    /// JSON key of the part inside a character.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Body => "cuerpo",
            Self::Mount => "montura",
            Self::Armor => "armadura",
            Self::Weapon => "arma",
        }
    }
}

/// A character sub-structure of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Body(Body),
    Mount(Mount),
    Armor(Armor),
    Weapon(Weapon),
}

fn push_text(out: &mut Vec<Attribute>, key: &str, label: &str, value: Option<&String>) {
    if let Some(text) = value {
        out.push(Attribute::known(key, label, AttributeValue::Text(text.clone())));
    }
}

fn push_list(out: &mut Vec<Attribute>, key: &str, label: &str, items: &[String]) {
    if !items.is_empty() {
        out.push(Attribute::known(key, label, AttributeValue::List(items.to_vec())));
    }
}

impl Part {
    #[must_use]
    pub const fn kind(&self) -> PartKind {
        match self {
            Self::Body(_) => PartKind::Body,
            Self::Mount(_) => PartKind::Mount,
            Self::Armor(_) => PartKind::Armor,
            Self::Weapon(_) => PartKind::Weapon,
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Body(body) => body.image.as_deref(),
            Self::Mount(mount) => mount.image.as_deref(),
            Self::Armor(armor) => armor.image.as_deref(),
            Self::Weapon(weapon) => weapon.image.as_deref(),
        }
    }

    fn extra(&self) -> &Extra {
        match self {
            Self::Body(body) => &body.extra,
            Self::Mount(mount) => &mount.extra,
            Self::Armor(armor) => &armor.extra,
            Self::Weapon(weapon) => &weapon.extra,
        }
    }

    /// Every attribute except the image: known fields first, then extras by key.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut out = Vec::new();
        match self {
            Self::Body(body) => {
                push_text(&mut out, "especie", "👤 Especie:", body.species.as_ref());
                push_text(&mut out, "altura", "📏 Altura:", body.height.as_ref());
                push_text(&mut out, "peso", "⚖️ Peso:", body.weight.as_ref());
                push_list(&mut out, "habilidades", "✨ Habilidades:", &body.abilities);
            }
            Self::Mount(mount) => {
                push_text(&mut out, "tipo", "🦄 Tipo:", mount.kind.as_ref());
                push_text(&mut out, "velocidad", "💨 Velocidad:", mount.speed.as_ref());
                push_list(&mut out, "habilidades", "🌟 Habilidades:", &mount.abilities);
            }
            Self::Armor(armor) => {
                push_text(&mut out, "tipo", "⚔️ Tipo:", armor.kind.as_ref());
                push_text(&mut out, "material", "🔨 Material:", armor.material.as_ref());
                push_text(&mut out, "defensa", "🛡️ Defensa:", armor.defense.as_ref());
                push_text(&mut out, "peso", "⚖️ Peso:", armor.weight.as_ref());
            }
            Self::Weapon(weapon) => {
                push_text(&mut out, "tipo", "🗡️ Tipo:", weapon.kind.as_ref());
                push_text(&mut out, "material", "🔨 Material:", weapon.material.as_ref());
                push_text(&mut out, "daño", "💥 Daño:", weapon.damage.as_ref());
                push_text(&mut out, "alcance", "📏 Alcance:", weapon.reach.as_ref());
            }
        }
        out.extend(
            self.extra()
                .iter()
                .map(|(key, value)| Attribute::extra(key, value)),
        );
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "cuerpo", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(rename = "montura", default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<Mount>,
    #[serde(rename = "armadura", default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<Armor>,
    #[serde(rename = "arma", default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
}

impl Character {
    #[must_use]
    pub fn part(&self, kind: PartKind) -> Option<Part> {
        match kind {
            PartKind::Body => self.body.clone().map(Part::Body),
            PartKind::Mount => self.mount.clone().map(Part::Mount),
            PartKind::Armor => self.armor.clone().map(Part::Armor),
            PartKind::Weapon => self.weapon.clone().map(Part::Weapon),
        }
    }

    /// Present parts in card order.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        PartKind::ALL
            .into_iter()
            .filter_map(|kind| self.part(kind))
            .collect()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.body.is_none() && self.mount.is_none() && self.armor.is_none() && self.weapon.is_none()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.body.is_some() && self.mount.is_some() && self.armor.is_some() && self.weapon.is_some()
    }
}

/// Metadata about a race, as served by the info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RaceInfo {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub character: Character,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elf() -> Character {
        serde_json::from_value(json!({
            "cuerpo": {
                "cuerpo_img": "/images/characters/elfo/elfo_cuerpo.png",
                "especie": "Elfo",
                "altura": "1.80m",
                "peso": "70kg",
                "habilidades": ["Visión nocturna", "Agilidad", "Magia"]
            },
            "montura": {
                "imagen": "/images/characters/elfo_montura.png",
                "tipo": "Caballo élfico",
                "velocidad": "Muy rápida",
                "habilidades": ["Vuelo corto", "Salto alto"]
            },
            "armadura": {
                "imagen": null,
                "tipo": "Armadura élfica",
                "material": "Mithril",
                "defensa": "Alta",
                "peso": "Ligera"
            },
            "arma": {
                "imagen": "https://cdn.example/arco.png",
                "tipo": "Arco élfico",
                "material": "Madera sagrada",
                "daño": "Alto",
                "alcance": "Largo",
                "runas": ["Luz", "Viento"],
                "nivel": 3
            }
        }))
        .expect("elf decodes")
    }

    #[test]
    fn decodes_backend_character_with_typed_fields() {
        let character = elf();
        assert!(character.is_complete());
        let body = character.body.as_ref().expect("body");
        assert_eq!(body.species.as_deref(), Some("Elfo"));
        assert_eq!(body.abilities.len(), 3);
        assert!(body.extra.is_empty());
        let armor = character.armor.as_ref().expect("armor");
        assert_eq!(armor.image, None);
        let weapon = character.weapon.as_ref().expect("weapon");
        assert_eq!(weapon.damage.as_deref(), Some("Alto"));
        assert_eq!(
            weapon.extra.get("runas"),
            Some(&AttributeValue::List(vec!["Luz".into(), "Viento".into()]))
        );
        assert_eq!(
            weapon.extra.get("nivel"),
            Some(&AttributeValue::Other(json!(3)))
        );
    }

    #[test]
    fn attributes_list_known_fields_then_extras() {
        let weapon = elf().part(PartKind::Weapon).expect("weapon");
        let labels: Vec<_> = weapon.attributes().into_iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            vec![
                "🗡️ Tipo:",
                "🔨 Material:",
                "💥 Daño:",
                "📏 Alcance:",
                "Nivel:",
                "Runas:"
            ]
        );
        assert_eq!(weapon.image(), Some("https://cdn.example/arco.png"));
    }

    #[test]
    fn body_attributes_render_abilities_as_list() {
        let body = elf().part(PartKind::Body).expect("body");
        let attrs = body.attributes();
        let abilities = attrs
            .iter()
            .find(|a| a.key == "habilidades")
            .expect("abilities");
        assert!(matches!(abilities.value, AttributeValue::List(ref items) if items.len() == 3));
        assert!(attrs.iter().all(|a| a.key != "cuerpo_img"));
    }

    #[test]
    fn missing_parts_are_skipped() {
        let character: Character =
            serde_json::from_value(json!({ "cuerpo": { "especie": "Orco" } })).expect("decodes");
        assert!(!character.is_complete());
        assert!(!character.is_empty());
        let parts = character.parts();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].kind(), PartKind::Body);
        assert_eq!(parts[0].image(), None);
    }

    #[test]
    fn known_fields_accept_numbers_and_nulls() {
        let character: Character = serde_json::from_value(json!({
            "cuerpo": { "especie": "Orco", "peso": 120, "altura": 2.1, "habilidades": null },
            "montura": { "tipo": "Lobo", "velocidad": null, "habilidades": "Olfato" },
            "arma": { "tipo": "Hacha", "daño": 15, "alcance": false }
        }))
        .expect("loose scalars decode");

        let body = character.body.as_ref().expect("body");
        assert_eq!(body.weight.as_deref(), Some("120"));
        assert_eq!(body.height.as_deref(), Some("2.1"));
        assert!(body.abilities.is_empty());
        assert!(body.extra.is_empty(), "known keys stay out of extra");

        let mount = character.mount.as_ref().expect("mount");
        assert_eq!(mount.speed, None);
        assert_eq!(mount.abilities, vec!["Olfato".to_string()]);

        let weapon = character.weapon.as_ref().expect("weapon");
        assert_eq!(weapon.damage.as_deref(), Some("15"));
        assert_eq!(weapon.reach.as_deref(), Some("false"));
    }

    #[test]
    fn ability_lists_keep_non_string_items() {
        let mount: Mount = serde_json::from_value(json!({
            "habilidades": ["Salto", 3, null]
        }))
        .expect("mixed list decodes");
        assert_eq!(mount.abilities, vec!["Salto".to_string(), "3".to_string()]);
    }

    #[test]
    fn race_info_flattens_parts_next_to_kind() {
        let info: RaceInfo = serde_json::from_value(json!({
            "kind": "orcos",
            "cuerpo": { "especie": "Orco" },
            "arma": { "tipo": "Hacha" }
        }))
        .expect("info decodes");
        assert_eq!(info.kind.as_deref(), Some("orcos"));
        assert_eq!(info.character.parts().len(), 2);
    }

    #[test]
    fn attribute_display_joins_lists() {
        assert_eq!(
            AttributeValue::List(vec!["a".into(), "b".into()]).as_display(),
            "a, b"
        );
        assert_eq!(AttributeValue::Other(json!(true)).as_display(), "true");
    }
}
