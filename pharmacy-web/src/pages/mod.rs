//! One component per storefront route.
pub mod category;
pub mod dashboard;
pub mod doctor_requests;
pub mod home;
pub mod login;
pub mod not_found;
pub mod offers;
pub mod request_medicine;
pub mod search;
pub mod signup;
pub mod update_prices;
pub mod verify_otp;

pub use category::CategoryPage;
pub use dashboard::DashboardPage;
pub use doctor_requests::DoctorRequestsPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFound;
pub use offers::OffersPage;
pub use request_medicine::RequestMedicinePage;
pub use search::SearchPage;
pub use signup::SignupPage;
pub use update_prices::UpdatePricesPage;
pub use verify_otp::VerifyOtpPage;
