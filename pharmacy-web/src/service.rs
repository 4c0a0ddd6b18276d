//! Browser wiring of the pharmacy service: storage, clock, RNG and the
//! simulated network latency.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pharmacy_core::{
    Account, Cart, Catalog, Clock, DoctorRequest, Language, LocalPharmacy, LoginForm,
    MedicineRequest, MedicineRequestForm, Operation, Order, PharmacyApi, PharmacyError, Product,
    RequestStatus, ServiceConfig, SignupForm, SignupOutcome, VerifyOutcome,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::rc::Rc;

/// Clock backed by `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now(&self) -> DateTime<Utc> {
        #[cfg(target_arch = "wasm32")]
        {
            DateTime::from_timestamp_millis(crate::dom::now_millis() as i64)
                .unwrap_or(DateTime::UNIX_EPOCH)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Utc::now()
        }
    }
}

/// Wraps a service and waits the configured latency before each call,
/// mimicking the storefront's simulated network round-trips.
pub struct DelayedPharmacy<A> {
    inner: A,
    config: ServiceConfig,
}

impl<A: PharmacyApi> DelayedPharmacy<A> {
    #[must_use]
    pub const fn new(inner: A, config: ServiceConfig) -> Self {
        Self { inner, config }
    }

    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    async fn pause(&self, operation: Operation) {
        let ms = self.config.latency_ms(operation);
        if ms == 0 {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            let ms = i32::try_from(ms).unwrap_or(i32::MAX);
            if let Err(err) = crate::dom::sleep_ms(ms).await {
                log::warn!(
                    "latency timer failed: {}",
                    crate::dom::js_error_message(&err)
                );
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            log::trace!("skipping {ms}ms latency for {operation:?} off the browser");
        }
    }
}

#[async_trait(?Send)]
impl<A: PharmacyApi> PharmacyApi for DelayedPharmacy<A> {
    async fn login(&self, form: &LoginForm) -> Result<Account, PharmacyError> {
        self.pause(Operation::Auth).await;
        self.inner.login(form).await
    }

    async fn logout(&self) -> Result<(), PharmacyError> {
        self.inner.logout().await
    }

    async fn current_user(&self) -> Result<Option<Account>, PharmacyError> {
        self.inner.current_user().await
    }

    async fn start_signup(&self, form: &SignupForm) -> Result<SignupOutcome, PharmacyError> {
        self.pause(Operation::Auth).await;
        self.inner.start_signup(form).await
    }

    async fn verify_otp(&self, code: &str) -> Result<VerifyOutcome, PharmacyError> {
        self.pause(Operation::OtpCheck).await;
        self.inner.verify_otp(code).await
    }

    async fn resend_otp(&self) -> Result<(), PharmacyError> {
        self.pause(Operation::Auth).await;
        self.inner.resend_otp().await
    }

    async fn signup_email(&self) -> Result<Option<String>, PharmacyError> {
        self.inner.signup_email().await
    }

    async fn place_order(
        &self,
        user: Option<&Account>,
        cart: &Cart,
        lang: Language,
    ) -> Result<Order, PharmacyError> {
        self.pause(Operation::Order).await;
        self.inner.place_order(user, cart, lang).await
    }

    async fn orders(&self) -> Result<Vec<Order>, PharmacyError> {
        self.inner.orders().await
    }

    async fn set_order_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<Order, PharmacyError> {
        self.inner.set_order_status(id, status).await
    }

    async fn submit_medicine_request(
        &self,
        user: Option<&Account>,
        form: MedicineRequestForm,
    ) -> Result<MedicineRequest, PharmacyError> {
        self.pause(Operation::MedicineRequest).await;
        self.inner.submit_medicine_request(user, form).await
    }

    async fn medicine_requests(&self) -> Result<Vec<MedicineRequest>, PharmacyError> {
        self.inner.medicine_requests().await
    }

    async fn set_medicine_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<MedicineRequest, PharmacyError> {
        self.inner.set_medicine_request_status(id, status).await
    }

    async fn pending_doctors(&self) -> Result<Vec<DoctorRequest>, PharmacyError> {
        self.inner.pending_doctors().await
    }

    async fn approve_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError> {
        self.inner.approve_doctor(id).await
    }

    async fn reject_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError> {
        self.inner.reject_doctor(id).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, PharmacyError> {
        self.pause(Operation::Search).await;
        self.inner.search(query).await
    }
}

/// Shared service handle placed in the component context.
#[derive(Clone)]
pub struct ApiHandle(pub Rc<dyn PharmacyApi>);

impl ApiHandle {
    pub fn new(api: impl PharmacyApi + 'static) -> Self {
        Self(Rc::new(api))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ApiHandle {
    type Target = dyn PharmacyApi;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

fn seeded_rng() -> SmallRng {
    #[cfg(target_arch = "wasm32")]
    {
        SmallRng::seed_from_u64(crate::dom::entropy_seed())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.subsec_nanos());
        SmallRng::seed_from_u64(u64::from(nanos))
    }
}

/// Service over `localStorage` with the storefront latencies.
///
/// # Errors
///
/// Fails when `localStorage` is unavailable.
#[cfg(target_arch = "wasm32")]
pub fn browser_api(catalog: Catalog) -> Result<ApiHandle, PharmacyError> {
    let store = crate::storage::BrowserStore::new().map_err(PharmacyError::storage)?;
    let local = LocalPharmacy::new(store, BrowserClock, seeded_rng(), catalog);
    Ok(ApiHandle::new(DelayedPharmacy::new(
        local,
        ServiceConfig::default(),
    )))
}

/// Service over in-memory storage with no latency. Used off the browser and
/// when `localStorage` is disabled.
#[must_use]
pub fn memory_api(store: pharmacy_core::MemoryStore, catalog: Catalog) -> ApiHandle {
    let local = LocalPharmacy::new(store, BrowserClock, seeded_rng(), catalog);
    ApiHandle::new(DelayedPharmacy::new(local, ServiceConfig::instant()))
}
