use crate::i18n::{t, use_lang};
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::Link;

/// Shown for any path the router does not know.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    let _lang = use_lang();
    html! {
        <section class="panel not-found" aria-live="assertive" data-testid="not-found">
            <p class="not-found__code" aria-hidden="true">{"404"}</p>
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.message") }</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{ t("not_found.back") }</Link<Route>>
        </section>
    }
}
