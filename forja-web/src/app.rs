use forja_core::BackendConfig;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::home::HomePage;
use crate::pages::not_found::NotFound;
use crate::router::Route;

/// Main application component providing browser routing.
///
/// Mounted by the wasm entry point.
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppInner />
        </BrowserRouter>
    }
}

#[function_component(AppInner)]
pub fn app_inner() -> Html {
    // Built once; every component receives it through props
    let config = use_memo((), |()| crate::paths::backend_config());
    let navigator = use_navigator();

    let render = Callback::from(move |route: Route| {
        render_route(&route, &config, navigator.clone())
    });

    html! { <Switch<Route> {render} /> }
}

fn render_route(route: &Route, config: &BackendConfig, navigator: Option<Navigator>) -> Html {
    match route {
        Route::Home => html! { <HomePage config={config.clone()} /> },
        Route::NotFound => {
            let on_go_home = Callback::from(move |()| {
                if let Some(nav) = navigator.as_ref() {
                    nav.push(&Route::Home);
                }
            });
            html! { <NotFound {on_go_home} /> }
        }
    }
}
