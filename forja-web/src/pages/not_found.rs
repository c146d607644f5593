use yew::prelude::*;

/// Not-found page to show when routing fails to match a known view.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    let go_home = {
        let cb = props.on_go_home.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ "🗺️ Camino perdido" }</h1>
            <p>{ "Esta página no existe en el reino de la Forja." }</p>
            <button type="button" onclick={go_home}>
                { "Volver a la forja" }
            </button>
        </section>
    }
}
