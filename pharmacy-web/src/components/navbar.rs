use crate::i18n::{t, trv, use_lang};
use crate::router::Route;
use pharmacy_core::constants::{PHARMACY_EMAIL, PHARMACY_PHONE};
use pharmacy_core::{Account, Category};
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub user: Option<Account>,
    pub cart_count: u32,
    pub categories: Vec<Category>,
    pub on_toggle_language: Callback<()>,
    pub on_search: Callback<String>,
    pub on_open_cart: Callback<()>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(p: &Props) -> Html {
    let lang = use_lang();
    let query = use_state(String::new);
    let menu_open = use_state(|| false);

    let on_input = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                query.set(input.value());
            }
        })
    };
    let on_submit = {
        let query = query.clone();
        let menu_open = menu_open.clone();
        let cb = p.on_search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            menu_open.set(false);
            cb.emit((*query).clone());
        })
    };
    let toggle_lang = {
        let cb = p.on_toggle_language.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let open_cart = {
        let cb = p.on_open_cart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let logout = {
        let cb = p.on_logout.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    let search_form = html! {
        <form class="navbar-search" role="search" onsubmit={on_submit}>
            <label for="site-search" class="sr-only">{ t("search.placeholder") }</label>
            <input
                id="site-search"
                type="search"
                value={(*query).clone()}
                oninput={on_input}
                placeholder={t("search.placeholder")}
            />
            <button type="submit" aria-label={t("search.submit")}>{"🔍"}</button>
        </form>
    };

    let account_area = match p.user.as_ref() {
        Some(user) => html! {
            <div class="navbar-account">
                <span class="navbar-welcome">{ trv("nav.welcome", &[("name", user.name())]) }</span>
                if user.is_staff() {
                    <Link<Route> to={Route::Dashboard} classes="btn btn-primary">{ t("nav.dashboard") }</Link<Route>>
                }
                <button type="button" class="btn btn-ghost" onclick={logout}>{ t("nav.logout") }</button>
            </div>
        },
        None => html! {
            <div class="navbar-account">
                <Link<Route> to={Route::Login} classes="btn btn-link">{ t("nav.login") }</Link<Route>>
                <Link<Route> to={Route::Signup} classes="btn btn-primary">{ t("nav.signup") }</Link<Route>>
            </div>
        },
    };

    let category_links = p
        .categories
        .iter()
        .map(|category| {
            html! {
                <li key={category.slug.clone()}>
                    <Link<Route> to={Route::category(&category.slug)}>
                        { format!("{} {}", category.icon, category.name.pick(lang)) }
                    </Link<Route>>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <header role="banner" class="navbar">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <div class="navbar-topbar">
                <div class="navbar-contact">
                    <a href={crate::paths::hotline_href()}>{ format!("📞 {PHARMACY_PHONE}") }</a>
                    <a href={format!("mailto:{PHARMACY_EMAIL}")}>{ format!("📧 {PHARMACY_EMAIL}") }</a>
                </div>
                <button type="button" class="navbar-lang" onclick={toggle_lang}
                    aria-label={t("nav.language")} data-testid="lang-toggle">
                    {"🌐 "}{ t("nav.other_language") }
                </button>
            </div>
            <div class="navbar-main">
                <Link<Route> to={Route::Home} classes="navbar-brand">
                    <span class="navbar-logo" aria-hidden="true">{"🛍️"}</span>
                    <span>
                        <strong>{"Alia Ali Pharmacy"}</strong>
                        <small lang="ar">{"صيدلية علياء علي"}</small>
                    </span>
                </Link<Route>>
                { search_form }
                <button type="button" class="navbar-cart" onclick={open_cart}
                    aria-label={t("cart.title")} data-testid="cart-button">
                    {"🛒"}
                    if p.cart_count > 0 {
                        <span class="badge" data-testid="cart-count">{ p.cart_count }</span>
                    }
                </button>
                { account_area }
                <button type="button" class="navbar-menu-toggle" onclick={toggle_menu}
                    aria-expanded={menu_open.to_string()} aria-label={t("nav.menu")}>
                    { if *menu_open { "✕" } else { "☰" } }
                </button>
            </div>
            <nav class={classes!("navbar-links", (*menu_open).then_some("open"))} aria-label={t("nav.main")}>
                <Link<Route> to={Route::Home}>{ t("nav.home") }</Link<Route>>
                <details class="navbar-categories">
                    <summary>{ t("nav.categories") }</summary>
                    <ul>{ category_links }</ul>
                </details>
                <Link<Route> to={Route::Offers}>{ t("nav.offers") }</Link<Route>>
                if p.user.is_some() {
                    <Link<Route> to={Route::RequestMedicine} classes="btn btn-success">
                        { t("nav.request_medicine") }
                    </Link<Route>>
                }
            </nav>
        </header>
    }
}
