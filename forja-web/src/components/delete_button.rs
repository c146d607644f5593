use forja_core::{BackendConfig, DeleteState, ForgeError, delete_factory};
use yew::prelude::*;

use crate::hooks::{use_abort_slot, use_auto_clear, use_store};

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub config: BackendConfig,
    #[prop_or_default]
    pub selected_race: AttrValue,
    /// Fired once the backend confirms the deletion.
    #[prop_or_default]
    pub on_delete: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(DeleteButton)]
pub fn delete_button(props: &Props) -> Html {
    let store = use_store::<DeleteState>();
    let abort = use_abort_slot();

    let on_click = {
        let store = store.clone();
        let config = props.config.clone();
        let race = props.selected_race.clone();
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| {
            let pending = match store.update(|state| state.begin(&race, gloo::dialogs::confirm)) {
                Ok(Some(pending)) => pending,
                Ok(None) => return,
                Err(err @ ForgeError::NoRaceSelected(_)) => {
                    gloo::dialogs::alert(&err.to_string());
                    return;
                }
                Err(err) => {
                    log::warn!("delete not started: {err}");
                    return;
                }
            };
            let backend = abort.borrow_mut().renew();
            let store = store.clone();
            let config = config.clone();
            let on_delete = on_delete.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = delete_factory(&backend, &config, &pending.kind).await;
                if store.update(|state| state.finish(pending.ticket, outcome)) {
                    on_delete.emit(());
                }
            });
        })
    };

    let expire_error = {
        let store = store.clone();
        Callback::from(move |generation: u64| {
            store.update(|state| state.expire_error(generation));
        })
    };
    let expire_success = {
        let store = store.clone();
        Callback::from(move |generation: u64| {
            store.update(|state| state.expire_success(generation));
        })
    };
    use_auto_clear(store.read().error_expiry(), expire_error);
    use_auto_clear(store.read().success_expiry(), expire_success);

    let state = store.read();
    let disabled = state.is_disabled(&props.selected_race, props.disabled);
    let label = if state.is_loading() {
        "🗑️ Eliminando fábrica..."
    } else {
        "🗑️ Eliminar Fábrica"
    };

    html! {
        <div class="delete-control mt-4">
            <button
                id="delete-btn"
                class="w-full py-3 rounded-lg bg-red-700 hover:bg-red-600 text-white font-bold"
                onclick={on_click}
                {disabled}
                aria-busy={state.is_loading().to_string()}
            >
                { label }
            </button>
            if let Some(error) = state.error() {
                <div class="error-banner mt-2 p-2 rounded bg-red-900 text-red-200" role="alert">
                    { format!("❌ {error}") }
                </div>
            }
            if let Some(success) = state.success() {
                <div class="success-banner mt-2 p-2 rounded bg-green-900 text-green-200" role="status">
                    { format!("✅ {success}") }
                </div>
            }
        </div>
    }
}
