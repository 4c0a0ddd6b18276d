//! Alia Ali Pharmacy core
//!
//! Platform-agnostic storefront logic for the Alia Ali online pharmacy:
//! catalog, cart, checkout, medicine requests, signup verification and the
//! staff review flows. Browser concerns live in `pharmacy-web`.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod content;
pub mod doctor;
pub mod error;
pub mod ids;
pub mod language;
pub mod medicine;
pub mod money;
pub mod order;
pub mod otp;
pub mod service;
pub mod state;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use account::{Account, AccountStatus, AdminProfile, CustomerProfile, DoctorProfile, Role};
pub use auth::{LoginForm, PendingSignup, Registration, SignupForm, authenticate, landing_path};
pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, Category, Product, ProductQuery, SortKey, discount_percent, slugify};
pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{Feature, Offer, OfferBadge, SiteContent, Testimonial};
pub use doctor::{DoctorRequest, DoctorStatus, ReviewSession};
pub use error::PharmacyError;
pub use language::{Language, Localized};
pub use medicine::{MedicineRequest, MedicineRequestForm, PrescriptionFile, whatsapp_link};
pub use money::{Money, line_breakdown};
pub use order::{
    Order, OrderLine, RequestStatus, StatusCounts, Tracked, build_order, ready_for_checkout,
    transition,
};
pub use otp::OtpCountdown;
pub use service::{
    LocalPharmacy, Operation, PharmacyApi, ServiceConfig, SignupOutcome, VerifyOutcome,
};
pub use state::{Action, AppState};
pub use storage::MemoryStore;
pub use validation::{Field, FieldErrors};

/// String key/value persistence behind every stored record.
/// The browser backs it with `localStorage`; tests use [`MemoryStore`].
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`; missing keys are not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}
