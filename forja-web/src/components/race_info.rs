use forja_core::{BackendConfig, RaceInfo, display_race};
use yew::prelude::*;

use super::character_card::CardGrid;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub info: RaceInfo,
    pub config: BackendConfig,
}

/// Preview of what a race's factory produces.
#[function_component(RaceInfoPanel)]
pub fn race_info_panel(props: &Props) -> Html {
    let heading = props.info.kind.as_deref().map_or_else(
        || "📜 Información de la raza".to_string(),
        |kind| format!("📜 Información de la raza: {}", display_race(kind)),
    );

    html! {
        <section class="race-info mb-8" aria-label="Información de la raza">
            <h3 class="text-2xl font-bold text-white mb-4">{ heading }</h3>
            if props.info.character.is_empty() {
                <p class="text-white/70">{ "Sin detalles para esta raza." }</p>
            } else {
                <CardGrid character={props.info.character.clone()} config={props.config.clone()} />
            }
        </section>
    }
}
