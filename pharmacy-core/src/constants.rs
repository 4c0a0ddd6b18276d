//! Centralized keys, limits and demo identities for the pharmacy core.
//!
//! Persisted key names are part of the browser storage contract and must not
//! change without a migration, since no schema version is stored alongside
//! the values.

// Persisted keys -----------------------------------------------------------
pub const KEY_USER: &str = "user";
pub const KEY_ORDERS: &str = "pharmacy_orders";
pub const KEY_MEDICINE_REQUESTS: &str = "medicineRequests";
pub const KEY_PENDING_DOCTORS: &str = "pendingDoctors";
pub const KEY_APPROVED_DOCTORS: &str = "approvedDoctors";
pub const KEY_SIGNUP_OTP: &str = "signupOTP";
pub const KEY_OTP_EMAIL: &str = "otpEmail";
pub const KEY_PENDING_SIGNUP: &str = "pendingSignup";
pub const KEY_LANGUAGE: &str = "language";

// Validation ---------------------------------------------------------------
pub const PHONE_PATTERN: &str = r"^01[0-9]{9}$";
pub const EMAIL_PATTERN: &str = r"\S+@\S+\.\S+";
pub const MIN_PASSWORD_LEN: usize = 6;

// OTP ----------------------------------------------------------------------
pub const OTP_LEN: usize = 6;
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;
pub const OTP_TTL_SECS: u32 = 300;

// Prescriptions ------------------------------------------------------------
pub const PRESCRIPTION_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const PRESCRIPTION_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

// Orders -------------------------------------------------------------------
pub const ORDER_ID_LEN: usize = 9;
pub const RECORD_ID_LEN: usize = 9;
pub const PHONE_NOT_PROVIDED: &str = "Not provided";

// Catalog ------------------------------------------------------------------
pub const DEFAULT_PRICE_MIN_EGP: i64 = 0;
pub const DEFAULT_PRICE_MAX_EGP: i64 = 1000;

// Simulated latency (milliseconds) ----------------------------------------
pub const LATENCY_ORDER_MS: u32 = 2000;
pub const LATENCY_MEDICINE_REQUEST_MS: u32 = 2000;
pub const LATENCY_SEARCH_MS: u32 = 1000;
pub const LATENCY_AUTH_MS: u32 = 1000;
pub const LATENCY_OTP_MS: u32 = 1500;

// Demo identities ----------------------------------------------------------
pub const DEMO_CUSTOMER_NAME: &str = "Ahmed Mohamed";
pub const DEMO_CUSTOMER_PHONE: &str = "01234567890";
pub const DEMO_CUSTOMER_ADDRESS: &str = "Cairo, Egypt";
pub const DEMO_ADMIN_ID: &str = "admin-1";
pub const DEMO_ADMIN_NAME: &str = "Admin User";
pub const DEMO_PASSWORD: &str = "password123";

// Contact ------------------------------------------------------------------
pub const PHARMACY_PHONE: &str = "01234567890";
pub const PHARMACY_EMAIL: &str = "info@aliaali-pharmacy.com";
pub const PHARMACY_WHATSAPP: &str = "https://wa.me/201234567890";

/// Egyptian governorates offered on the delivery form.
pub const GOVERNORATES: [&str; 25] = [
    "Cairo",
    "Alexandria",
    "Giza",
    "Shubra El-Kheima",
    "Port Said",
    "Suez",
    "Luxor",
    "Mansoura",
    "El-Mahalla El-Kubra",
    "Tanta",
    "Asyut",
    "Ismailia",
    "Fayyum",
    "Zagazig",
    "Aswan",
    "Damietta",
    "Damanhur",
    "Minya",
    "Beni Suef",
    "Qena",
    "Sohag",
    "Hurghada",
    "Sharm el-Sheikh",
    "Marsa Matruh",
    "Arish",
];
