use crate::router::{Route, SearchQuery};
use pharmacy_core::{Account, Language, VerifyOutcome, landing_path};
use yew::prelude::*;

/// Search query to navigate with, or `None` for a blank box.
#[must_use]
pub fn search_target(raw: &str) -> Option<SearchQuery> {
    let q = raw.trim();
    (!q.is_empty()).then(|| SearchQuery { q: q.to_string() })
}

/// Where a freshly signed-in account lands.
#[must_use]
pub fn landing_route(account: &Account) -> Route {
    Route::from_core_path(landing_path(account))
}

/// Where a verified signup continues.
#[must_use]
pub fn verified_route(outcome: &VerifyOutcome) -> Route {
    Route::from_core_path(outcome.redirect_path())
}

/// The OTP page needs a signup in progress.
#[must_use]
pub fn otp_entry_redirect(pending_email: Option<&str>) -> Option<Route> {
    match pending_email {
        Some(email) if !email.is_empty() => None,
        _ => Some(Route::Signup),
    }
}

/// Keep the translation bundle and `<html lang dir>` in step with the store.
/// The bundle swaps during render so the flip shows on the same frame.
#[hook]
pub fn use_sync_language(language: Language) {
    use_memo(language, |lang| crate::i18n::set_lang(*lang));
}

/// Scroll to the top whenever the route changes.
#[hook]
pub fn use_scroll_reset(route: Option<Route>) {
    use_effect_with(route, |_| crate::dom::scroll_to_top());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacy_core::{
        AccountStatus, AdminProfile, CustomerProfile, DoctorRequest, DoctorStatus,
    };

    #[test]
    fn blank_searches_stay_put() {
        assert_eq!(search_target("   "), None);
        assert_eq!(
            search_target("  panadol "),
            Some(SearchQuery {
                q: "panadol".into()
            })
        );
    }

    #[test]
    fn staff_land_on_the_dashboard() {
        let admin = Account::Admin(AdminProfile {
            id: "admin-1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
        });
        assert_eq!(landing_route(&admin), Route::Dashboard);
        let customer = Account::Customer(CustomerProfile {
            id: "c1".into(),
            name: "Mona".into(),
            email: "mona@example.com".into(),
            phone: "01012345678".into(),
            address: String::new(),
            status: AccountStatus::Active,
            verified: true,
        });
        assert_eq!(landing_route(&customer), Route::Home);
        assert_eq!(
            verified_route(&VerifyOutcome::LoggedIn(customer)),
            Route::Home
        );
    }

    #[test]
    fn doctors_wait_for_approval_at_login() {
        let request = DoctorRequest {
            id: "r1".into(),
            name: "Dr. Karim".into(),
            email: "karim@example.com".into(),
            phone: "01098765432".into(),
            address: String::new(),
            license_number: "EG-123".into(),
            status: DoctorStatus::Pending,
            request_date: chrono::Utc::now(),
        };
        assert_eq!(
            verified_route(&VerifyOutcome::AwaitingApproval(request)),
            Route::Login
        );
    }

    #[test]
    fn otp_page_requires_pending_email() {
        assert_eq!(otp_entry_redirect(None), Some(Route::Signup));
        assert_eq!(otp_entry_redirect(Some("")), Some(Route::Signup));
        assert_eq!(otp_entry_redirect(Some("a@b.co")), None);
    }
}
