use crate::components::notice::Notice;
use crate::service::ApiHandle;
use pharmacy_core::{Account, Action, AppState, Catalog, Language};
use std::rc::Rc;
use yew::prelude::*;

/// Shared storefront state driven by typed [`Action`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Store(pub AppState);

impl Reducible for Store {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.reduce(action)))
    }
}

impl std::ops::Deref for Store {
    type Target = AppState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub type StoreHandle = UseReducerHandle<Store>;

impl Store {
    /// Initial state from the saved language and signed-in user.
    #[must_use]
    pub fn boot(language: Language, user: Option<Account>) -> Self {
        let catalog = Catalog::load_from_static().unwrap_or_else(|err| {
            log::error!("embedded catalog is malformed: {err}");
            Catalog {
                categories: Vec::new(),
                products: Vec::new(),
                price_book: Vec::new(),
            }
        });
        Self(AppState::new(language, user, catalog))
    }
}

/// Shell-level UI state that outlives any single page.
#[derive(Clone)]
pub struct ShellState {
    pub order_busy: UseStateHandle<bool>,
    /// Toast shown above the page, or inside the cart drawer while it is open.
    pub flash: UseStateHandle<Option<Notice>>,
}

#[hook]
pub fn use_shell_state() -> ShellState {
    ShellState {
        order_busy: use_state(|| false),
        flash: use_state(|| None::<Notice>),
    }
}

/// Signed-in user saved by a previous visit.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn restore_user() -> Option<Account> {
    let store = match crate::storage::BrowserStore::new() {
        Ok(store) => store,
        Err(err) => {
            log::warn!("{err}");
            return None;
        }
    };
    pharmacy_core::storage::read_json(&store, pharmacy_core::constants::KEY_USER)
        .unwrap_or_else(|err| {
            log::warn!("could not restore session: {err}");
            None
        })
}

/// The store provided by the app shell.
///
/// # Panics
/// Panics when rendered outside the shell's `ContextProvider`.
#[hook]
pub fn use_store() -> StoreHandle {
    use_context::<StoreHandle>().expect("store context is provided by the app shell")
}

/// The service provided by the app shell.
///
/// # Panics
/// Panics when rendered outside the shell's `ContextProvider`.
#[hook]
pub fn use_api() -> ApiHandle {
    use_context::<ApiHandle>().expect("service context is provided by the app shell")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::CartItem;

    #[test]
    fn reducer_wraps_core_state() {
        let store = Rc::new(Store::boot(Language::En, None));
        let item = CartItem::from_product(store.catalog.product("omega-3").expect("omega-3"));
        let next = store.reduce(Action::AddToCart(item));
        assert_eq!(next.cart.count(), 1);
        let next = next.reduce(Action::ToggleLanguage);
        assert_eq!(next.language, Language::Ar);
    }
}
