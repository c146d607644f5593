//! Character menu: race selection, creation, race preview and deletion in one panel.

use forja_core::{BackendConfig, ForgeError, MenuState, create_character, fetch_race_info};
use yew::prelude::*;

use super::character_card::CardGrid;
use super::delete_button::DeleteButton;
use super::race_info::RaceInfoPanel;
use super::race_selector::RaceSelector;
use crate::hooks::{use_abort_slot, use_auto_clear, use_store};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: BackendConfig,
    /// Told about every selection change.
    #[prop_or_default]
    pub on_select: Callback<String>,
}

fn warn_or_log(err: &ForgeError) {
    if matches!(err, ForgeError::NoRaceSelected(_)) {
        gloo::dialogs::alert(&err.to_string());
    } else {
        log::warn!("request not started: {err}");
    }
}

#[function_component(CharacterMenu)]
pub fn character_menu(props: &Props) -> Html {
    let store = use_store::<MenuState>();
    let create_abort = use_abort_slot();
    let info_abort = use_abort_slot();

    let on_race_change = {
        let store = store.clone();
        let create_abort = create_abort.clone();
        let info_abort = info_abort.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |race: String| {
            if store.read().selected_race() != race {
                create_abort.borrow_mut().abort();
                info_abort.borrow_mut().abort();
            }
            store.update(|state| state.select_race(race.clone()));
            on_select.emit(race);
        })
    };

    let on_create = {
        let store = store.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let pending = match store.update(MenuState::begin_create) {
                Ok(pending) => pending,
                Err(err) => return warn_or_log(&err),
            };
            let backend = create_abort.borrow_mut().renew();
            let store = store.clone();
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = create_character(&backend, &config, &pending.kind).await;
                store.update(|state| state.finish_create(pending.ticket, outcome));
            });
        })
    };

    let on_info = {
        let store = store.clone();
        let info_abort = info_abort.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let pending = match store.update(MenuState::begin_info) {
                Ok(pending) => pending,
                Err(err) => return warn_or_log(&err),
            };
            let backend = info_abort.borrow_mut().renew();
            let store = store.clone();
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = fetch_race_info(&backend, &config, &pending.kind).await;
                store.update(|state| state.finish_info(pending.ticket, outcome));
            });
        })
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |()| {
            info_abort.borrow_mut().abort();
            store.update(MenuState::factory_deleted);
        })
    };

    let expire_error = {
        let store = store.clone();
        Callback::from(move |generation: u64| {
            store.update(|state| state.expire_error(generation));
        })
    };
    use_auto_clear(store.read().error_expiry(), expire_error);

    let state = store.read();
    let selected = AttrValue::from(state.selected_race().to_string());

    html! {
        <div class="character-menu min-h-screen p-6 relative overflow-hidden">
            <div class="relative z-10 flex flex-col lg:flex-row gap-8 max-w-7xl mx-auto">
                <div class="bg-white/10 backdrop-blur-lg border border-white/20 rounded-3xl shadow-2xl p-8 lg:w-96 flex-shrink-0">
                    <div class="text-center mb-8">
                        <h2 class="text-3xl font-bold text-white mb-2">{ "⚔️ Creador de Héroes" }</h2>
                        <p class="text-gray-300">{ "Forja tu leyenda" }</p>
                    </div>
                    <div class="space-y-6">
                        <RaceSelector
                            config={props.config.clone()}
                            selected_race={selected.clone()}
                            on_select={on_race_change}
                        />
                        <button
                            id="create-btn"
                            class="w-full bg-gradient-to-r from-purple-600 to-pink-600 text-white font-bold py-4 px-6 rounded-xl"
                            onclick={on_create}
                            disabled={!state.can_create()}
                            aria-busy={state.is_creating().to_string()}
                        >
                            if state.is_creating() {
                                <span class="flex items-center justify-center">
                                    <span class="animate-spin rounded-full h-5 w-5 border-b-2 border-white mr-2"></span>
                                    { "⚡ Forjando héroe..." }
                                </span>
                            } else {
                                { "🎲 Crear Héroe" }
                            }
                        </button>
                        <button
                            id="info-btn"
                            class="w-full bg-indigo-700 text-white font-semibold py-3 px-6 rounded-xl"
                            onclick={on_info}
                            disabled={!state.can_inquire()}
                        >
                            if state.is_inquiring() {
                                { "📜 Consultando raza..." }
                            } else {
                                { "📜 Ver información" }
                            }
                        </button>
                        <DeleteButton
                            config={props.config.clone()}
                            selected_race={selected}
                            on_delete={on_delete}
                            disabled={state.is_creating()}
                        />
                        if let Some(error) = state.error() {
                            <div class="error-banner p-4 bg-red-500/20 rounded-xl border border-red-400/30 text-red-300 text-center" role="alert">
                                { format!("❌ {error}") }
                            </div>
                        }
                    </div>
                </div>
                <div class="flex-1">
                    if let Some(info) = state.info() {
                        <RaceInfoPanel info={info.clone()} config={props.config.clone()} />
                    }
                    if let Some(character) = state.character() {
                        <CardGrid character={character.clone()} config={props.config.clone()} />
                    } else if !state.is_creating() {
                        <div class="empty-state flex items-center justify-center h-96">
                            <div class="text-center text-white/70">
                                <div class="text-6xl mb-4">{ "🏰" }</div>
                                <h3 class="text-2xl font-bold mb-2">{ "¡Aventura te espera!" }</h3>
                                <p class="text-lg">{ "Selecciona una raza y crea tu héroe legendario" }</p>
                            </div>
                        </div>
                    }
                </div>
            </div>
        </div>
    }
}
