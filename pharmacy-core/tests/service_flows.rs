use chrono::{TimeZone, Utc};
use futures::executor::block_on;
use pharmacy_core::constants::{
    KEY_APPROVED_DOCTORS, KEY_MEDICINE_REQUESTS, KEY_ORDERS, KEY_OTP_EMAIL, KEY_PENDING_DOCTORS,
    KEY_PENDING_SIGNUP, KEY_SIGNUP_OTP, KEY_USER,
};
use pharmacy_core::{
    Account, Action, AppState, Cart, CartItem, Catalog, FixedClock, KeyValueStore, Language,
    LocalPharmacy, LoginForm, MedicineRequestForm, MemoryStore, Money, PharmacyApi, PharmacyError,
    RequestStatus, Role, SignupForm, VerifyOutcome,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type TestPharmacy = LocalPharmacy<MemoryStore, FixedClock, ChaCha8Rng>;

fn pharmacy(seed: u64) -> TestPharmacy {
    let now = Utc.with_ymd_and_hms(2024, 1, 20, 9, 0, 0).unwrap();
    LocalPharmacy::new(
        MemoryStore::new(),
        FixedClock::new(now),
        ChaCha8Rng::seed_from_u64(seed),
        Catalog::load_from_static().expect("catalog"),
    )
}

fn raw(pharmacy: &TestPharmacy, key: &str) -> Option<String> {
    pharmacy.store().get(key).unwrap()
}

fn login(pharmacy: &TestPharmacy, role: Role, email: &str) -> Result<Account, PharmacyError> {
    block_on(pharmacy.login(&LoginForm {
        role,
        email: email.into(),
        password: "password123".into(),
    }))
}

fn signup_form(role: Role, email: &str) -> SignupForm {
    SignupForm {
        role,
        name: "Mona Adel".into(),
        email: email.into(),
        phone: "01234567890".into(),
        password: "secret12".into(),
        confirm_password: "secret12".into(),
        address: "Heliopolis".into(),
        license_number: "EG-5521".into(),
    }
}

fn cart_with(catalog: &Catalog, ids: &[&str]) -> Cart {
    let mut cart = Cart::new();
    for id in ids {
        cart.add(CartItem::from_product(catalog.product(id).expect("product")));
    }
    cart
}

#[test]
fn checkout_appends_order_and_keeps_history() {
    let pharmacy = pharmacy(1);
    let user = login(&pharmacy, Role::Customer, "customer@example.com").unwrap();
    let cart = cart_with(pharmacy.catalog(), &["panadol-extra", "panadol-extra", "omega-3"]);

    let first = block_on(pharmacy.place_order(Some(&user), &cart, Language::En)).unwrap();
    assert_eq!(first.total_price, cart.total());
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].quantity, 2);

    let second = block_on(pharmacy.place_order(Some(&user), &cart, Language::Ar)).unwrap();
    assert_ne!(first.id, second.id);
    let orders = block_on(pharmacy.orders()).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].items[0].name, "بنادول اكسترا");
}

#[test]
fn failed_checkouts_leave_orders_untouched() {
    let pharmacy = pharmacy(2);
    let cart = cart_with(pharmacy.catalog(), &["omega-3"]);
    let err = block_on(pharmacy.place_order(None, &cart, Language::En)).unwrap_err();
    assert!(matches!(err, PharmacyError::NotLoggedIn));

    let user = login(&pharmacy, Role::Admin, "admin@example.com").unwrap();
    let err = block_on(pharmacy.place_order(Some(&user), &Cart::new(), Language::En)).unwrap_err();
    assert!(matches!(err, PharmacyError::EmptyCart));
    assert!(raw(&pharmacy, KEY_ORDERS).is_none());
}

#[test]
fn order_status_moves_are_guarded() {
    let pharmacy = pharmacy(3);
    let user = login(&pharmacy, Role::Customer, "c@example.com").unwrap();
    let cart = cart_with(pharmacy.catalog(), &["vitamin-d3"]);
    let a = block_on(pharmacy.place_order(Some(&user), &cart, Language::En)).unwrap();
    let b = block_on(pharmacy.place_order(Some(&user), &cart, Language::En)).unwrap();

    let err = block_on(pharmacy.set_order_status(&a.id, RequestStatus::Delivered)).unwrap_err();
    assert!(matches!(err, PharmacyError::InvalidTransition { .. }));

    block_on(pharmacy.set_order_status(&a.id, RequestStatus::Approved)).unwrap();
    block_on(pharmacy.set_order_status(&a.id, RequestStatus::Delivered)).unwrap();
    let orders = block_on(pharmacy.orders()).unwrap();
    assert_eq!(orders[0].status, RequestStatus::Delivered);
    assert_eq!(orders[1].id, b.id);
    assert_eq!(orders[1].status, RequestStatus::Pending);
}

#[test]
fn customer_signup_logs_in_after_matching_code() {
    let pharmacy = pharmacy(4);
    let outcome = block_on(pharmacy.start_signup(&signup_form(Role::Customer, "mona@example.com")))
        .unwrap();
    assert_eq!(outcome.email, "mona@example.com");
    assert_eq!(raw(&pharmacy, KEY_OTP_EMAIL).as_deref(), Some("mona@example.com"));
    let code = raw(&pharmacy, KEY_SIGNUP_OTP).expect("code stored");

    let wrong = if code == "111111" { "222222" } else { "111111" };
    let err = block_on(pharmacy.verify_otp(wrong)).unwrap_err();
    assert!(matches!(err, PharmacyError::OtpMismatch));
    assert_eq!(raw(&pharmacy, KEY_SIGNUP_OTP), Some(code.clone()));
    assert!(raw(&pharmacy, KEY_PENDING_SIGNUP).is_some());

    let outcome = block_on(pharmacy.verify_otp(&code)).unwrap();
    assert_eq!(outcome.redirect_path(), "/");
    assert!(matches!(outcome, VerifyOutcome::LoggedIn(ref a) if a.email() == "mona@example.com"));
    assert!(raw(&pharmacy, KEY_USER).is_some());
    for key in [KEY_SIGNUP_OTP, KEY_OTP_EMAIL, KEY_PENDING_SIGNUP] {
        assert!(raw(&pharmacy, key).is_none(), "{key} should be cleared");
    }
}

#[test]
fn doctor_signup_requires_admin_approval_before_login() {
    let pharmacy = pharmacy(5);
    block_on(pharmacy.start_signup(&signup_form(Role::Doctor, "dr@example.com"))).unwrap();
    let code = raw(&pharmacy, KEY_SIGNUP_OTP).unwrap();
    let outcome = block_on(pharmacy.verify_otp(&code)).unwrap();
    assert_eq!(outcome.redirect_path(), "/login");
    assert!(raw(&pharmacy, KEY_USER).is_none());

    assert!(matches!(
        login(&pharmacy, Role::Doctor, "dr@example.com"),
        Err(PharmacyError::InvalidCredentials)
    ));

    let pending = block_on(pharmacy.pending_doctors()).unwrap();
    assert_eq!(pending.len(), 1);
    block_on(pharmacy.approve_doctor(&pending[0].id)).unwrap();
    assert!(block_on(pharmacy.pending_doctors()).unwrap().is_empty());
    assert_eq!(pharmacy.approved_doctors().unwrap().len(), 1);
    assert!(raw(&pharmacy, KEY_APPROVED_DOCTORS).unwrap().contains("\"role\":\"doctor\""));

    let doctor = login(&pharmacy, Role::Doctor, "dr@example.com").unwrap();
    assert!(doctor.is_staff());
}

#[test]
fn rejected_doctor_is_dropped() {
    let pharmacy = pharmacy(6);
    block_on(pharmacy.start_signup(&signup_form(Role::Doctor, "x@example.com"))).unwrap();
    let code = raw(&pharmacy, KEY_SIGNUP_OTP).unwrap();
    block_on(pharmacy.verify_otp(&code)).unwrap();
    let id = block_on(pharmacy.pending_doctors()).unwrap()[0].id.clone();
    block_on(pharmacy.reject_doctor(&id)).unwrap();
    assert!(raw(&pharmacy, KEY_PENDING_DOCTORS).is_some_and(|v| v == "[]"));
    assert!(pharmacy.approved_doctors().unwrap().is_empty());
    assert!(matches!(
        block_on(pharmacy.reject_doctor(&id)),
        Err(PharmacyError::NotFound { .. })
    ));
}

#[test]
fn verification_without_signup_is_rejected() {
    let pharmacy = pharmacy(7);
    assert!(matches!(
        block_on(pharmacy.verify_otp("123456")),
        Err(PharmacyError::NoPendingSignup)
    ));
    assert!(matches!(
        block_on(pharmacy.verify_otp("12")),
        Err(PharmacyError::OtpTooShort)
    ));
    assert!(matches!(
        block_on(pharmacy.resend_otp()),
        Err(PharmacyError::NoPendingSignup)
    ));
}

#[test]
fn resend_replaces_the_code() {
    let pharmacy = pharmacy(8);
    block_on(pharmacy.start_signup(&signup_form(Role::Customer, "r@example.com"))).unwrap();
    let first = raw(&pharmacy, KEY_SIGNUP_OTP).unwrap();
    let mut replaced = false;
    for _ in 0..5 {
        block_on(pharmacy.resend_otp()).unwrap();
        if raw(&pharmacy, KEY_SIGNUP_OTP).unwrap() != first {
            replaced = true;
            break;
        }
    }
    assert!(replaced);
}

#[test]
fn medicine_requests_seed_then_append() {
    let pharmacy = pharmacy(9);
    assert!(raw(&pharmacy, KEY_MEDICINE_REQUESTS).is_none());
    let seeded = block_on(pharmacy.medicine_requests()).unwrap();
    assert_eq!(seeded.len(), 3);
    assert!(raw(&pharmacy, KEY_MEDICINE_REQUESTS).is_some());

    let user = login(&pharmacy, Role::Customer, "c@example.com").unwrap();
    let form = MedicineRequestForm {
        medicine_name: "Augmentin 1g".into(),
        quantity: "2 boxes".into(),
        delivery_address: "5 Tahrir St".into(),
        city: "Cairo".into(),
        governorate: "Cairo".into(),
        ..MedicineRequestForm::prefilled(Some(&user))
    };
    let request = block_on(pharmacy.submit_medicine_request(Some(&user), form)).unwrap();
    assert_eq!(request.user_id, user.id());
    assert_eq!(request.full_name, "Ahmed Mohamed");

    let all = block_on(pharmacy.medicine_requests()).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[3].id, request.id);

    let err = block_on(pharmacy.submit_medicine_request(None, MedicineRequestForm::default()))
        .unwrap_err();
    assert!(err.field_errors().is_some());
    assert_eq!(block_on(pharmacy.medicine_requests()).unwrap().len(), 4);
}

#[test]
fn triage_changes_only_the_addressed_request() {
    let pharmacy = pharmacy(10);
    let before = block_on(pharmacy.medicine_requests()).unwrap();
    let updated =
        block_on(pharmacy.set_medicine_request_status("1", RequestStatus::Rejected)).unwrap();
    assert_eq!(updated.status, RequestStatus::Rejected);
    let after = block_on(pharmacy.medicine_requests()).unwrap();
    assert_eq!(after[0].status, RequestStatus::Rejected);
    assert_eq!(after[1..], before[1..]);

    let err =
        block_on(pharmacy.set_medicine_request_status("1", RequestStatus::Approved)).unwrap_err();
    assert!(matches!(err, PharmacyError::InvalidTransition { .. }));
}

#[test]
fn logout_forgets_the_session() {
    let pharmacy = pharmacy(11);
    login(&pharmacy, Role::Admin, "admin@example.com").unwrap();
    let current = block_on(pharmacy.current_user()).unwrap();
    assert!(current.is_some_and(|a| a.is_admin()));
    block_on(pharmacy.logout()).unwrap();
    assert!(block_on(pharmacy.current_user()).unwrap().is_none());
}

#[test]
fn search_returns_owned_products() {
    let pharmacy = pharmacy(12);
    let hits = block_on(pharmacy.search("omega")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "omega-3");
    assert_eq!(
        block_on(pharmacy.search("")).unwrap().len(),
        pharmacy.catalog().products.len()
    );
}

#[test]
fn search_hits_pick_up_staff_price_and_stock_edits() {
    let pharmacy = pharmacy(13);
    let state = AppState::new(Language::En, None, pharmacy.catalog().clone())
        .reduce(Action::UpdatePrice {
            id: "panadol-extra".into(),
            price: Money::from_pounds(99),
        })
        .reduce(Action::ToggleStock("panadol-extra".into()));

    let hits = block_on(pharmacy.search("panadol")).unwrap();
    let shown = state.catalog.refreshed(&hits);
    let panadol = shown
        .iter()
        .find(|product| product.id == "panadol-extra")
        .expect("panadol in results");
    assert_eq!(panadol.price, Money::from_pounds(99));
    assert!(!panadol.in_stock);
    assert_eq!(shown.len(), hits.len());
}
