use crate::components::{CartDrawer, Footer, Navbar, NoticeBanner};
use crate::router::{Route, SearchQuery, guard};
use crate::service::{ApiHandle, BrowserClock};
use pharmacy_core::{Account, Clock, Language, SiteContent};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod handlers;
pub mod mounted;
pub mod routing;
pub mod state;
pub mod view;

use handlers::AppHandlers;
use state::{Store, StoreHandle, use_shell_state};

/// Browser entry point: `localStorage` service under the deployment base path.
#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let api = use_memo((), |()| {
        let catalog = pharmacy_core::Catalog::load_from_static().unwrap_or_else(|err| {
            log::error!("embedded catalog is malformed: {err}");
            pharmacy_core::Catalog {
                categories: Vec::new(),
                products: Vec::new(),
                price_book: Vec::new(),
            }
        });
        crate::service::browser_api(catalog.clone()).unwrap_or_else(|err| {
            log::warn!("falling back to in-memory storage: {err}");
            crate::service::memory_api(pharmacy_core::MemoryStore::new(), catalog)
        })
    });
    let user = use_memo((), |()| state::restore_user());
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <AppRoot api={(*api).clone()} user={(*user).clone()} language={crate::i18n::current_lang()} />
        </BrowserRouter>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppRootProps {
    pub api: ApiHandle,
    #[prop_or_default]
    pub user: Option<Account>,
    #[prop_or_default]
    pub language: Language,
}

/// Store, service and language providers. Expects a router above it.
#[function_component(AppRoot)]
pub fn app_root(p: &AppRootProps) -> Html {
    let store = {
        let (language, user) = (p.language, p.user.clone());
        use_reducer(move || Store::boot(language, user))
    };
    let content = use_memo((), |()| {
        Rc::new(SiteContent::load_from_static().unwrap_or_else(|err| {
            log::error!("embedded site content is malformed: {err}");
            SiteContent::default()
        }))
    });
    routing::use_sync_language(store.language);

    html! {
        <ContextProvider<StoreHandle> context={store.clone()}>
            <ContextProvider<ApiHandle> context={p.api.clone()}>
                <ContextProvider<Language> context={store.language}>
                    <AppInner content={(*content).clone()} />
                </ContextProvider<Language>>
            </ContextProvider<ApiHandle>>
        </ContextProvider<StoreHandle>>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct InnerProps {
    content: Rc<SiteContent>,
}

#[function_component(AppInner)]
fn app_inner(p: &InnerProps) -> Html {
    let store = state::use_store();
    let api = state::use_api();
    let shell = use_shell_state();
    let navigator = use_navigator();
    let route = use_route::<Route>();
    let location = use_location();
    routing::use_scroll_reset(route.clone());

    let handlers = AppHandlers::new(&store, &shell, &api, navigator);
    let search_query = location
        .and_then(|loc| loc.query::<SearchQuery>().ok())
        .unwrap_or_default()
        .q;
    let route = route.unwrap_or(Route::NotFound);
    let user = store.user.as_ref();

    let page = match guard(&route, user) {
        Some(target) => {
            log::debug!("{route:?} needs a different account; redirecting");
            html! { <Redirect<Route> to={target} /> }
        }
        None => view::render_route(
            &route,
            &view::PageCtx {
                user,
                categories: &store.catalog.categories,
                content: &p.content,
                search_query: &search_query,
                now: BrowserClock.now(),
                handlers: &handlers,
            },
        ),
    };
    let page_flash = (!store.cart_open).then(|| (*shell.flash).clone()).flatten();
    let drawer_flash = store.cart_open.then(|| (*shell.flash).clone()).flatten();

    html! {
        <>
            <Navbar user={store.user.clone()} cart_count={store.cart.count()}
                categories={store.catalog.categories.clone()}
                on_toggle_language={handlers.toggle_language.clone()} on_search={handlers.search.clone()}
                on_open_cart={handlers.open_cart.clone()} on_logout={handlers.logout.clone()} />
            <CartDrawer open={store.cart_open} cart={store.cart.clone()} signed_in={user.is_some()}
                busy={*shell.order_busy} notice={drawer_flash}
                on_close={handlers.close_cart.clone()} on_set_quantity={handlers.set_quantity.clone()}
                on_remove={handlers.remove_line.clone()} on_place_order={handlers.place_order.clone()}
                on_clear={handlers.clear_cart.clone()} on_dismiss_notice={Some(handlers.dismiss_flash.clone())} />
            <main id="main" role="main" tabindex="-1">
                <NoticeBanner notice={page_flash} on_dismiss={handlers.dismiss_flash.clone()} />
                { page }
            </main>
            <Footer categories={store.catalog.categories.clone()} />
            <div id="status-live" class="sr-only" aria-live="polite"></div>
        </>
    }
}
