//! Storefront session state and the actions that change it.
use crate::account::Account;
use crate::cart::{Cart, CartItem};
use crate::catalog::Catalog;
use crate::error::PharmacyError;
use crate::language::Language;
use crate::money::Money;

/// Everything the navigation shell shares with the pages.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub language: Language,
    pub user: Option<Account>,
    pub cart: Cart,
    pub cart_open: bool,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLanguage(Language),
    ToggleLanguage,
    LoggedIn(Account),
    LoggedOut,
    AddToCart(CartItem),
    RemoveFromCart(String),
    SetQuantity { id: String, quantity: u32 },
    ClearCart,
    OpenCart,
    CloseCart,
    UpdatePrice { id: String, price: Money },
    ToggleStock(String),
}

impl AppState {
    #[must_use]
    pub fn new(language: Language, user: Option<Account>, catalog: Catalog) -> Self {
        Self {
            language,
            user,
            cart: Cart::new(),
            cart_open: false,
            catalog,
        }
    }

    /// Apply one action in place.
    ///
    /// # Errors
    ///
    /// Price-book actions fail for unknown products or non-positive prices;
    /// the state is left unchanged in that case.
    pub fn apply(&mut self, action: Action) -> Result<(), PharmacyError> {
        match action {
            Action::SetLanguage(language) => self.language = language,
            Action::ToggleLanguage => self.language = self.language.toggle(),
            Action::LoggedIn(account) => {
                log::info!("signed in as {} ({})", account.email(), account.role());
                self.user = Some(account);
            }
            Action::LoggedOut => self.user = None,
            Action::AddToCart(item) => {
                self.cart.add(item);
            }
            Action::RemoveFromCart(id) => self.cart.remove(&id),
            Action::SetQuantity { id, quantity } => self.cart.set_quantity(&id, quantity),
            Action::ClearCart => self.cart.clear(),
            Action::OpenCart => self.cart_open = true,
            Action::CloseCart => self.cart_open = false,
            Action::UpdatePrice { id, price } => {
                self.catalog.update_price(&id, price)?;
            }
            Action::ToggleStock(id) => {
                self.catalog.toggle_stock(&id)?;
            }
        }
        Ok(())
    }

    /// Pure reducer form of [`AppState::apply`]; failures keep the old state.
    #[must_use]
    pub fn reduce(&self, action: Action) -> Self {
        let mut next = self.clone();
        match next.apply(action) {
            Ok(()) => next,
            Err(err) => {
                log::warn!("action rejected: {err}");
                self.clone()
            }
        }
    }
}
