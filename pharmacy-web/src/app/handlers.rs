use crate::app::routing::search_target;
use crate::app::state::{ShellState, StoreHandle};
use crate::components::notice::Notice;
use crate::router::Route;
use crate::service::ApiHandle;
use pharmacy_core::{Account, Action, CartItem, ready_for_checkout};
use yew::prelude::*;
use yew_router::prelude::Navigator;

/// Callbacks shared by the navbar, the cart drawer and the pages.
#[derive(Clone)]
pub struct AppHandlers {
    pub toggle_language: Callback<()>,
    pub search: Callback<String>,
    pub signed_in: Callback<Account>,
    pub logout: Callback<()>,
    pub add_to_cart: Callback<CartItem>,
    pub open_cart: Callback<()>,
    pub close_cart: Callback<()>,
    pub set_quantity: Callback<(String, u32)>,
    pub remove_line: Callback<String>,
    pub clear_cart: Callback<()>,
    pub place_order: Callback<()>,
    pub flash: Callback<Notice>,
    pub dismiss_flash: Callback<()>,
    pub go: Callback<Route>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(
        store: &StoreHandle,
        shell: &ShellState,
        api: &ApiHandle,
        navigator: Option<Navigator>,
    ) -> Self {
        Self {
            toggle_language: dispatch(store, |()| Action::ToggleLanguage),
            search: build_search(navigator.clone()),
            signed_in: dispatch(store, Action::LoggedIn),
            logout: build_logout(store, api, navigator.clone()),
            add_to_cart: dispatch(store, Action::AddToCart),
            open_cart: build_open_cart(store, shell),
            close_cart: dispatch(store, |()| Action::CloseCart),
            set_quantity: dispatch(store, |(id, quantity)| Action::SetQuantity { id, quantity }),
            remove_line: dispatch(store, Action::RemoveFromCart),
            clear_cart: dispatch(store, |()| Action::ClearCart),
            place_order: build_place_order(store, shell, api),
            flash: build_flash(shell),
            dismiss_flash: build_dismiss_flash(shell),
            go: build_go(navigator),
        }
    }
}

fn dispatch<T: 'static>(store: &StoreHandle, to_action: fn(T) -> Action) -> Callback<T> {
    let store = store.clone();
    Callback::from(move |value: T| store.dispatch(to_action(value)))
}

fn build_go(navigator: Option<Navigator>) -> Callback<Route> {
    Callback::from(move |route: Route| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&route);
        }
    })
}

fn build_search(navigator: Option<Navigator>) -> Callback<String> {
    Callback::from(move |raw: String| {
        let (Some(nav), Some(query)) = (navigator.as_ref(), search_target(&raw)) else {
            return;
        };
        if let Err(err) = nav.push_with_query(&Route::Search, &query) {
            log::error!("search navigation failed: {err:?}");
        }
    })
}

fn build_logout(
    store: &StoreHandle,
    api: &ApiHandle,
    navigator: Option<Navigator>,
) -> Callback<()> {
    let store = store.clone();
    let api = api.clone();
    Callback::from(move |()| {
        let api = api.clone();
        yew::platform::spawn_local(async move {
            if let Err(err) = api.logout().await {
                log::error!("logout could not clear the session: {err}");
            }
        });
        store.dispatch(Action::LoggedOut);
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
    })
}

fn build_open_cart(store: &StoreHandle, shell: &ShellState) -> Callback<()> {
    let store = store.clone();
    let flash = shell.flash.clone();
    Callback::from(move |()| {
        flash.set(None);
        store.dispatch(Action::OpenCart);
    })
}

fn build_place_order(store: &StoreHandle, shell: &ShellState, api: &ApiHandle) -> Callback<()> {
    let store = store.clone();
    let busy = shell.order_busy.clone();
    let flash = shell.flash.clone();
    let api = api.clone();
    Callback::from(move |()| {
        if *busy {
            return;
        }
        if let Err(err) = ready_for_checkout(store.user.as_ref(), &store.cart) {
            flash.set(Some(Notice::from_error(&err)));
            return;
        }
        busy.set(true);
        flash.set(None);
        let user = store.user.clone();
        let cart = store.cart.clone();
        let lang = store.language;
        let (store, busy, flash, api) = (store.clone(), busy.clone(), flash.clone(), api.clone());
        yew::platform::spawn_local(async move {
            let result = api.place_order(user.as_ref(), &cart, lang).await;
            busy.set(false);
            match result {
                Ok(order) => {
                    log::info!("order {} placed for {}", order.id, order.total_price);
                    store.dispatch(Action::ClearCart);
                    store.dispatch(Action::CloseCart);
                    flash.set(Some(Notice::success("cart.order_placed").with("id", order.id)));
                }
                Err(err) => {
                    log::warn!("checkout failed: {err}");
                    flash.set(Some(Notice::from_error(&err)));
                }
            }
        });
    })
}

fn build_flash(shell: &ShellState) -> Callback<Notice> {
    let flash = shell.flash.clone();
    Callback::from(move |notice: Notice| flash.set(Some(notice)))
}

fn build_dismiss_flash(shell: &ShellState) -> Callback<()> {
    let flash = shell.flash.clone();
    Callback::from(move |()| flash.set(None))
}
