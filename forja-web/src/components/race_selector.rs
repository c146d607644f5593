use forja_core::{BackendConfig, SelectorState, display_race, load_races};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::hooks::{use_abort_slot, use_auto_clear, use_store};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: BackendConfig,
    #[prop_or_default]
    pub selected_race: AttrValue,
    pub on_select: Callback<String>,
}

#[function_component(RaceSelector)]
pub fn race_selector(props: &Props) -> Html {
    let store = use_store::<SelectorState>();
    let abort = use_abort_slot();

    // Load races on mount, and again if the backend changes
    {
        let store = store.clone();
        use_effect_with(props.config.factories_url(), move |endpoint| {
            let endpoint = endpoint.clone();
            let backend = abort.borrow_mut().renew();
            let ticket = store.update(SelectorState::begin_load);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = load_races(&backend, &endpoint).await;
                store.update(|state| state.finish_load(ticket, outcome));
            });
        });
    }

    let expire_error = {
        let store = store.clone();
        Callback::from(move |generation: u64| {
            store.update(|state| state.expire_error(generation));
        })
    };
    use_auto_clear(store.read().error_expiry(), expire_error);

    let on_change = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_select.emit(select.value());
        })
    };

    let state = store.read();
    let selected = props.selected_race.as_str();

    html! {
        <div class="race-selector mb-6">
            <label for="character-select" class="block text-lg font-semibold text-yellow-300 mb-2">
                { "🏰 Selecciona tu raza:" }
            </label>
            { race_control(&state, selected, on_change) }
            if !selected.is_empty() {
                <div class="selected-race mt-2 text-purple-300">
                    { "✨ Raza elegida: " }
                    <strong>{ display_race(selected) }</strong>
                </div>
            }
        </div>
    }
}

/// The loading note, the error banner or the dropdown, in that priority.
fn race_control(state: &SelectorState, selected: &str, on_change: Callback<Event>) -> Html {
    if state.is_loading() {
        return html! {
            <div class="loading text-gray-300 animate-pulse" aria-live="polite">
                { "Cargando razas mágicas..." }
            </div>
        };
    }
    if let Some(error) = state.error() {
        return html! {
            <div class="error-banner mt-2 p-2 rounded bg-red-900 text-red-200" role="alert">
                { format!("❌ {error}") }
            </div>
        };
    }
    html! {
        <select
            id="character-select"
            class="w-full p-3 rounded-lg bg-gray-800 text-white border border-purple-500"
            onchange={on_change}
        >
            <option value="" selected={selected.is_empty()}>{ "-- Elige tu destino --" }</option>
            { for state.races().iter().map(|race| html! {
                <option key={race.clone()} value={race.clone()} selected={race.as_str() == selected}>
                    { display_race(race) }
                </option>
            }) }
        </select>
    }
}
