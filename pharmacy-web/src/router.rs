use pharmacy_core::Account;
use serde::{Deserialize, Serialize};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/category/:slug")]
    Category { slug: String },
    #[at("/search")]
    Search,
    #[at("/offers")]
    Offers,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/verify-otp")]
    VerifyOtp,
    #[at("/request-medicine")]
    RequestMedicine,
    #[at("/dashboard")]
    Dashboard,
    #[at("/doctor-requests")]
    DoctorRequests,
    #[at("/update-prices")]
    UpdatePrices,
    #[at("/404")]
    #[not_found]
    NotFound,
}

/// `?q=` query string of the search route.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Open,
    SignedIn,
    Staff,
    Admin,
}

impl Route {
    #[must_use]
    pub fn category(slug: &str) -> Self {
        Self::Category {
            slug: slug.to_string(),
        }
    }

    #[must_use]
    pub const fn gate(&self) -> Gate {
        match self {
            Self::RequestMedicine => Gate::SignedIn,
            Self::Dashboard | Self::UpdatePrices => Gate::Staff,
            Self::DoctorRequests => Gate::Admin,
            _ => Gate::Open,
        }
    }

    /// Route matching a path returned by the core (`"/"`, `"/login"`, ...).
    #[must_use]
    pub fn from_core_path(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Self::Home)
    }
}

/// Redirect target when `user` may not open `route`.
#[must_use]
pub fn guard(route: &Route, user: Option<&Account>) -> Option<Route> {
    let allowed = match route.gate() {
        Gate::Open => true,
        Gate::SignedIn => user.is_some(),
        Gate::Staff => user.is_some_and(Account::is_staff),
        Gate::Admin => user.is_some_and(Account::is_admin),
    };
    (!allowed).then_some(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::{AdminProfile, CustomerProfile, DoctorProfile};

    fn customer() -> Account {
        Account::Customer(CustomerProfile {
            id: "c1".into(),
            name: "Ahmed Mohamed".into(),
            email: "ahmed@example.com".into(),
            phone: "01234567890".into(),
            address: "Cairo, Egypt".into(),
            status: pharmacy_core::AccountStatus::Active,
            verified: true,
        })
    }

    fn doctor() -> Account {
        Account::Doctor(DoctorProfile {
            id: "d1".into(),
            name: "Dr. Sara".into(),
            email: "sara@example.com".into(),
            phone: "01111111111".into(),
            address: String::new(),
            license_number: "LIC-1".into(),
            status: pharmacy_core::AccountStatus::Active,
            verified: true,
            approved_date: None,
        })
    }

    fn admin() -> Account {
        Account::Admin(AdminProfile {
            id: "admin-1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
        })
    }

    #[test]
    fn open_routes_never_redirect() {
        for route in [
            Route::Home,
            Route::category("pain-relief"),
            Route::Search,
            Route::Offers,
            Route::Login,
            Route::Signup,
            Route::VerifyOtp,
            Route::NotFound,
        ] {
            assert_eq!(guard(&route, None), None, "{route:?}");
        }
    }

    #[test]
    fn medicine_requests_need_any_account() {
        assert_eq!(guard(&Route::RequestMedicine, None), Some(Route::Login));
        assert_eq!(guard(&Route::RequestMedicine, Some(&customer())), None);
    }

    #[test]
    fn staff_pages_reject_customers() {
        let customer = customer();
        let doctor = doctor();
        for route in [Route::Dashboard, Route::UpdatePrices] {
            assert_eq!(guard(&route, Some(&customer)), Some(Route::Login));
            assert_eq!(guard(&route, Some(&doctor)), None);
            assert_eq!(guard(&route, Some(&admin())), None);
        }
    }

    #[test]
    fn doctor_review_is_admin_only() {
        assert_eq!(
            guard(&Route::DoctorRequests, Some(&doctor())),
            Some(Route::Login)
        );
        assert_eq!(guard(&Route::DoctorRequests, Some(&admin())), None);
    }

    #[test]
    fn paths_round_trip_through_the_router() {
        assert_eq!(Route::category("pain-relief").to_path(), "/category/pain-relief");
        assert_eq!(Route::from_core_path("/login"), Route::Login);
        assert_eq!(Route::from_core_path("/dashboard"), Route::Dashboard);
    }
}
