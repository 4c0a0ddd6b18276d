//! Orders, request statuses and the checkout flow.
use crate::account::Account;
use crate::cart::Cart;
use crate::constants::{ORDER_ID_LEN, PHONE_NOT_PROVIDED};
use crate::error::PharmacyError;
use crate::ids::base36_id;
use crate::language::Language;
use crate::money::Money;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle shared by orders and medicine requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Delivered,
}

impl RequestStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Delivered,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Delivered => "delivered",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// pending → approved | rejected, approved → delivered.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Delivered)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Delivered)
    }

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Pending => "status.pending",
            Self::Approved => "status.approved",
            Self::Rejected => "status.rejected",
            Self::Delivered => "status.delivered",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records that move through [`RequestStatus`] under dashboard control.
pub trait Tracked {
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn status(&self) -> RequestStatus;
    fn set_status(&mut self, status: RequestStatus);
}

/// Move one record to `next`, leaving every other record untouched.
///
/// # Errors
///
/// Returns [`PharmacyError::NotFound`] for an unknown id and
/// [`PharmacyError::InvalidTransition`] when the move is not allowed.
pub fn transition<'a, T: Tracked>(
    records: &'a mut [T],
    id: &str,
    next: RequestStatus,
) -> Result<&'a T, PharmacyError> {
    let record = records
        .iter_mut()
        .find(|record| record.id() == id)
        .ok_or_else(|| PharmacyError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })?;
    let from = record.status();
    if !from.can_transition_to(next) {
        return Err(PharmacyError::InvalidTransition { from, to: next });
    }
    record.set_status(next);
    Ok(record)
}

/// Counts shown on the dashboard stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn tally<'a, T: Tracked + 'a>(records: impl IntoIterator<Item = &'a T>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut counts, record| {
                counts.total += 1;
                match record.status() {
                    RequestStatus::Pending => counts.pending += 1,
                    RequestStatus::Approved => counts.approved += 1,
                    RequestStatus::Rejected => counts.rejected += 1,
                    RequestStatus::Delivered => counts.delivered += 1,
                }
                counts
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: String,
    /// Product name in the language active when the order was placed.
    pub name: String,
    pub price: Money,
    pub quantity: u32,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub items: Vec<OrderLine>,
    pub total_price: Money,
    pub status: RequestStatus,
    pub timestamp: DateTime<Utc>,
}

impl Tracked for Order {
    const KIND: &'static str = "order";

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}

impl Order {
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// Checkout preconditions, checked before any delay or write.
///
/// # Errors
///
/// Returns [`PharmacyError::NotLoggedIn`] without an account and
/// [`PharmacyError::EmptyCart`] for an empty cart, checked in that order.
pub fn ready_for_checkout<'a>(
    account: Option<&'a Account>,
    cart: &Cart,
) -> Result<&'a Account, PharmacyError> {
    let account = account.ok_or(PharmacyError::NotLoggedIn)?;
    if cart.is_empty() {
        return Err(PharmacyError::EmptyCart);
    }
    Ok(account)
}

/// Snapshot the cart into a pending order for `account`.
///
/// # Errors
///
/// Fails with the [`ready_for_checkout`] errors.
pub fn build_order<R: Rng + ?Sized>(
    account: Option<&Account>,
    cart: &Cart,
    lang: Language,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Order, PharmacyError> {
    let account = ready_for_checkout(account, cart)?;

    let items = cart
        .lines()
        .iter()
        .map(|line| OrderLine {
            id: line.id.clone(),
            name: line.name.pick(lang).to_string(),
            price: line.price,
            quantity: line.quantity,
            total_price: line.subtotal(),
        })
        .collect();

    Ok(Order {
        id: base36_id(rng, ORDER_ID_LEN),
        user_id: account.id().to_string(),
        customer_name: account.name().to_string(),
        customer_phone: account.phone().unwrap_or(PHONE_NOT_PROVIDED).to_string(),
        customer_email: account.email().to_string(),
        customer_address: account.address().unwrap_or_default().to_string(),
        items,
        total_price: cart.total(),
        status: RequestStatus::Pending,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AdminProfile;
    use crate::cart::CartItem;
    use crate::language::Localized;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn admin() -> Account {
        Account::Admin(AdminProfile {
            id: "admin-1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
        })
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: "panadol-extra".into(),
            name: Localized::new("Panadol Extra", "بنادول اكسترا"),
            price: Money::from_pounds(25),
            quantity: 2,
            image: String::new(),
            brand: "GSK".into(),
        });
        cart
    }

    #[test]
    fn transition_table_matches_dashboard_actions() {
        use RequestStatus::{Approved, Delivered, Pending, Rejected};
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Delivered));
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Approved.can_transition_to(Approved));
        assert!(Rejected.is_terminal() && Delivered.is_terminal());
    }

    #[test]
    fn order_snapshots_cart_in_active_language() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let order =
            build_order(Some(&admin()), &filled_cart(), Language::Ar, now, &mut rng).unwrap();
        assert_eq!(order.id.len(), ORDER_ID_LEN);
        assert_eq!(order.items[0].name, "بنادول اكسترا");
        assert_eq!(order.items[0].total_price, Money::from_pounds(50));
        assert_eq!(order.total_price, Money::from_pounds(50));
        assert_eq!(order.customer_phone, PHONE_NOT_PROVIDED);
        assert_eq!(order.status, RequestStatus::Pending);
        assert_eq!(order.item_count(), 2);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["totalPrice"], 50);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn checkout_preconditions_checked_user_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let now = Utc::now();
        let err = build_order(None, &Cart::new(), Language::En, now, &mut rng).unwrap_err();
        assert!(matches!(err, PharmacyError::NotLoggedIn));
        let err =
            build_order(Some(&admin()), &Cart::new(), Language::En, now, &mut rng).unwrap_err();
        assert!(matches!(err, PharmacyError::EmptyCart));
    }

    #[test]
    fn status_parse_round_trips_labels() {
        for status in RequestStatus::ALL {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::parse("shipped"), None);
    }
}
