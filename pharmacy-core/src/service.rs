//! Request/response boundary between the storefront and its data.
//!
//! Every page talks to a [`PharmacyApi`]. [`LocalPharmacy`] answers directly
//! from a [`KeyValueStore`]; the browser wraps it to add simulated latency.
use crate::KeyValueStore;
use crate::account::Account;
use crate::auth::{LoginForm, PendingSignup, Registration, SignupForm, authenticate};
use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::clock::Clock;
use crate::constants::{
    KEY_APPROVED_DOCTORS, KEY_MEDICINE_REQUESTS, KEY_ORDERS, KEY_OTP_EMAIL, KEY_PENDING_DOCTORS,
    KEY_PENDING_SIGNUP, KEY_SIGNUP_OTP, KEY_USER, LATENCY_AUTH_MS, LATENCY_MEDICINE_REQUEST_MS,
    LATENCY_ORDER_MS, LATENCY_OTP_MS, LATENCY_SEARCH_MS, OTP_TTL_SECS,
};
use crate::doctor::{self, DoctorRequest};
use crate::error::PharmacyError;
use crate::language::Language;
use crate::medicine::{MedicineRequest, MedicineRequestForm, sample_requests};
use crate::order::{Order, RequestStatus, build_order, transition};
use crate::otp;
use crate::storage::{read_json, read_list, read_raw, remove, write_json, write_raw};
use async_trait::async_trait;
use rand::Rng;
use std::cell::RefCell;

/// Operation classes that carry a simulated delay in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Auth,
    OtpCheck,
    Order,
    MedicineRequest,
    Search,
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub auth_latency_ms: u32,
    pub otp_latency_ms: u32,
    pub order_latency_ms: u32,
    pub medicine_request_latency_ms: u32,
    pub search_latency_ms: u32,
    pub otp_ttl_secs: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            auth_latency_ms: LATENCY_AUTH_MS,
            otp_latency_ms: LATENCY_OTP_MS,
            order_latency_ms: LATENCY_ORDER_MS,
            medicine_request_latency_ms: LATENCY_MEDICINE_REQUEST_MS,
            search_latency_ms: LATENCY_SEARCH_MS,
            otp_ttl_secs: OTP_TTL_SECS,
        }
    }
}

impl ServiceConfig {
    /// No simulated delays.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            auth_latency_ms: 0,
            otp_latency_ms: 0,
            order_latency_ms: 0,
            medicine_request_latency_ms: 0,
            search_latency_ms: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn latency_ms(&self, operation: Operation) -> u32 {
        match operation {
            Operation::Auth => self.auth_latency_ms,
            Operation::OtpCheck => self.otp_latency_ms,
            Operation::Order => self.order_latency_ms,
            Operation::MedicineRequest => self.medicine_request_latency_ms,
            Operation::Search => self.search_latency_ms,
            Operation::Instant => 0,
        }
    }
}

/// Result of a started signup: where the code was "sent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Customer account created and signed in.
    LoggedIn(Account),
    /// Doctor registration queued for admin review.
    AwaitingApproval(DoctorRequest),
}

impl VerifyOutcome {
    #[must_use]
    pub const fn redirect_path(&self) -> &'static str {
        match self {
            Self::LoggedIn(_) => "/",
            Self::AwaitingApproval(_) => "/login",
        }
    }
}

#[async_trait(?Send)]
pub trait PharmacyApi {
    async fn login(&self, form: &LoginForm) -> Result<Account, PharmacyError>;
    async fn logout(&self) -> Result<(), PharmacyError>;
    async fn current_user(&self) -> Result<Option<Account>, PharmacyError>;

    async fn start_signup(&self, form: &SignupForm) -> Result<SignupOutcome, PharmacyError>;
    async fn verify_otp(&self, code: &str) -> Result<VerifyOutcome, PharmacyError>;
    async fn resend_otp(&self) -> Result<(), PharmacyError>;
    /// Address awaiting verification, if a signup is in progress.
    async fn signup_email(&self) -> Result<Option<String>, PharmacyError>;

    async fn place_order(
        &self,
        user: Option<&Account>,
        cart: &Cart,
        lang: Language,
    ) -> Result<Order, PharmacyError>;
    async fn orders(&self) -> Result<Vec<Order>, PharmacyError>;
    async fn set_order_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<Order, PharmacyError>;

    async fn submit_medicine_request(
        &self,
        user: Option<&Account>,
        form: MedicineRequestForm,
    ) -> Result<MedicineRequest, PharmacyError>;
    async fn medicine_requests(&self) -> Result<Vec<MedicineRequest>, PharmacyError>;
    async fn set_medicine_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<MedicineRequest, PharmacyError>;

    async fn pending_doctors(&self) -> Result<Vec<DoctorRequest>, PharmacyError>;
    async fn approve_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError>;
    async fn reject_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError>;

    async fn search(&self, query: &str) -> Result<Vec<Product>, PharmacyError>;
}

/// Direct implementation over a key/value store, a clock and an RNG.
pub struct LocalPharmacy<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    store: S,
    clock: C,
    rng: RefCell<R>,
    catalog: Catalog,
}

impl<S, C, R> LocalPharmacy<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    pub const fn new(store: S, clock: C, rng: R, catalog: Catalog) -> Self {
        Self {
            store,
            clock,
            rng: RefCell::new(rng),
            catalog,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Approved doctor accounts allowed to sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn approved_doctors(&self) -> Result<Vec<Account>, PharmacyError> {
        read_list(&self.store, KEY_APPROVED_DOCTORS)
    }

    /// Pending signup email, if a verification is in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn pending_email(&self) -> Result<Option<String>, PharmacyError> {
        read_raw(&self.store, KEY_OTP_EMAIL)
    }

    fn issue_code(&self, email: &str) -> Result<(), PharmacyError> {
        let code = otp::generate(&mut *self.rng.borrow_mut());
        write_raw(&self.store, KEY_SIGNUP_OTP, &code)?;
        log::info!("verification code for {email}: {code}");
        Ok(())
    }

    fn clear_signup(&self) -> Result<(), PharmacyError> {
        remove(&self.store, KEY_SIGNUP_OTP)?;
        remove(&self.store, KEY_OTP_EMAIL)?;
        remove(&self.store, KEY_PENDING_SIGNUP)
    }
}

#[async_trait(?Send)]
impl<S, C, R> PharmacyApi for LocalPharmacy<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    async fn login(&self, form: &LoginForm) -> Result<Account, PharmacyError> {
        let approved = self.approved_doctors()?;
        let account = authenticate(form, &approved, &mut *self.rng.borrow_mut())?;
        write_json(&self.store, KEY_USER, &account)?;
        Ok(account)
    }

    async fn logout(&self) -> Result<(), PharmacyError> {
        remove(&self.store, KEY_USER)
    }

    async fn current_user(&self) -> Result<Option<Account>, PharmacyError> {
        read_json(&self.store, KEY_USER)
    }

    async fn start_signup(&self, form: &SignupForm) -> Result<SignupOutcome, PharmacyError> {
        let pending = PendingSignup::from_form(form, &mut *self.rng.borrow_mut())?;
        write_json(&self.store, KEY_PENDING_SIGNUP, &pending)?;
        write_raw(&self.store, KEY_OTP_EMAIL, &pending.email)?;
        self.issue_code(&pending.email)?;
        Ok(SignupOutcome {
            email: pending.email,
        })
    }

    async fn verify_otp(&self, code: &str) -> Result<VerifyOutcome, PharmacyError> {
        otp::check_length(code)?;
        let email = read_raw(&self.store, KEY_OTP_EMAIL)?;
        let pending: Option<PendingSignup> = read_json(&self.store, KEY_PENDING_SIGNUP)?;
        let stored = read_raw(&self.store, KEY_SIGNUP_OTP)?;
        let (Some(_), Some(pending), Some(stored)) = (email, pending, stored) else {
            return Err(PharmacyError::NoPendingSignup);
        };
        otp::verify(code, &stored)?;

        let outcome = match pending.register(self.clock.now()) {
            Registration::Doctor(request) => {
                let mut queue: Vec<DoctorRequest> = read_list(&self.store, KEY_PENDING_DOCTORS)?;
                queue.push(request.clone());
                write_json(&self.store, KEY_PENDING_DOCTORS, &queue)?;
                log::info!("doctor {} queued for approval", request.email);
                VerifyOutcome::AwaitingApproval(request)
            }
            Registration::Customer(account) => {
                write_json(&self.store, KEY_USER, &account)?;
                VerifyOutcome::LoggedIn(account)
            }
        };
        self.clear_signup()?;
        Ok(outcome)
    }

    async fn resend_otp(&self) -> Result<(), PharmacyError> {
        let email = read_raw(&self.store, KEY_OTP_EMAIL)?.ok_or(PharmacyError::NoPendingSignup)?;
        self.issue_code(&email)
    }

    async fn signup_email(&self) -> Result<Option<String>, PharmacyError> {
        self.pending_email()
    }

    async fn place_order(
        &self,
        user: Option<&Account>,
        cart: &Cart,
        lang: Language,
    ) -> Result<Order, PharmacyError> {
        let order = build_order(
            user,
            cart,
            lang,
            self.clock.now(),
            &mut *self.rng.borrow_mut(),
        )?;
        let mut orders: Vec<Order> = read_list(&self.store, KEY_ORDERS)?;
        orders.push(order.clone());
        write_json(&self.store, KEY_ORDERS, &orders)?;
        log::info!("order {} placed for {}", order.id, order.total_price);
        Ok(order)
    }

    async fn orders(&self) -> Result<Vec<Order>, PharmacyError> {
        read_list(&self.store, KEY_ORDERS)
    }

    async fn set_order_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<Order, PharmacyError> {
        let mut orders: Vec<Order> = read_list(&self.store, KEY_ORDERS)?;
        let updated = transition(&mut orders, id, status)?.clone();
        write_json(&self.store, KEY_ORDERS, &orders)?;
        Ok(updated)
    }

    async fn submit_medicine_request(
        &self,
        user: Option<&Account>,
        form: MedicineRequestForm,
    ) -> Result<MedicineRequest, PharmacyError> {
        let request =
            MedicineRequest::submit(form, user, self.clock.now(), &mut *self.rng.borrow_mut())?;
        let mut requests = self.medicine_requests().await?;
        requests.push(request.clone());
        write_json(&self.store, KEY_MEDICINE_REQUESTS, &requests)?;
        log::info!("medicine request {} for {}", request.id, request.medicine_name);
        Ok(request)
    }

    async fn medicine_requests(&self) -> Result<Vec<MedicineRequest>, PharmacyError> {
        if read_raw(&self.store, KEY_MEDICINE_REQUESTS)?.is_none() {
            let samples = sample_requests()?;
            write_json(&self.store, KEY_MEDICINE_REQUESTS, &samples)?;
            return Ok(samples);
        }
        read_list(&self.store, KEY_MEDICINE_REQUESTS)
    }

    async fn set_medicine_request_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<MedicineRequest, PharmacyError> {
        let mut requests = self.medicine_requests().await?;
        let updated = transition(&mut requests, id, status)?.clone();
        write_json(&self.store, KEY_MEDICINE_REQUESTS, &requests)?;
        Ok(updated)
    }

    async fn pending_doctors(&self) -> Result<Vec<DoctorRequest>, PharmacyError> {
        read_list(&self.store, KEY_PENDING_DOCTORS)
    }

    async fn approve_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError> {
        let mut pending: Vec<DoctorRequest> = read_list(&self.store, KEY_PENDING_DOCTORS)?;
        let mut approved = self.approved_doctors()?;
        let request = doctor::approve(&mut pending, &mut approved, id, self.clock.now())?;
        write_json(&self.store, KEY_PENDING_DOCTORS, &pending)?;
        write_json(&self.store, KEY_APPROVED_DOCTORS, &approved)?;
        log::info!("doctor {} approved", request.email);
        Ok(request)
    }

    async fn reject_doctor(&self, id: &str) -> Result<DoctorRequest, PharmacyError> {
        let mut pending: Vec<DoctorRequest> = read_list(&self.store, KEY_PENDING_DOCTORS)?;
        let request = doctor::reject(&mut pending, id)?;
        write_json(&self.store, KEY_PENDING_DOCTORS, &pending)?;
        log::info!("doctor {} rejected", request.email);
        Ok(request)
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, PharmacyError> {
        Ok(self.catalog.search(query).into_iter().cloned().collect())
    }
}
