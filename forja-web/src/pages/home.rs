use forja_core::BackendConfig;
use yew::prelude::*;

use crate::components::CharacterMenu;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: BackendConfig,
}

/// Landing page hosting the character menu.
#[function_component(HomePage)]
pub fn home_page(props: &Props) -> Html {
    let on_select = Callback::from(|race: String| {
        log::info!("race selected: {race}");
    });

    html! {
        <main class="home">
            <CharacterMenu config={props.config.clone()} {on_select} />
        </main>
    }
}
