//! Demo login and signup forms.
use crate::account::{Account, AccountStatus, AdminProfile, CustomerProfile, Role};
use crate::constants::{
    DEMO_ADMIN_ID, DEMO_ADMIN_NAME, DEMO_CUSTOMER_ADDRESS, DEMO_CUSTOMER_NAME,
    DEMO_CUSTOMER_PHONE, RECORD_ID_LEN,
};
use crate::doctor::{DoctorRequest, DoctorStatus};
use crate::error::PharmacyError;
use crate::ids::base36_id;
use crate::validation::{Field, FieldErrors, is_valid_email, is_valid_password};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub role: Role,
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] when email or password is empty.
    pub fn validate(&self) -> Result<(), PharmacyError> {
        let mut errors = FieldErrors::new();
        errors.require(Field::Email, &self.email, "errors.email_required");
        if self.password.is_empty() {
            errors.insert(Field::Password, "errors.password_required");
        }
        errors.into_result()
    }
}

/// Resolve a login attempt against the demo rules.
///
/// Customers and admins are always accepted with fixed demo profiles; doctors
/// must appear in `approved_doctors` by email.
///
/// # Errors
///
/// Returns [`PharmacyError::Validation`] for empty inputs and
/// [`PharmacyError::InvalidCredentials`] for unapproved doctors.
pub fn authenticate<R: Rng + ?Sized>(
    form: &LoginForm,
    approved_doctors: &[Account],
    rng: &mut R,
) -> Result<Account, PharmacyError> {
    form.validate()?;
    let email = form.email.trim();
    match form.role {
        Role::Customer => Ok(Account::Customer(CustomerProfile {
            id: base36_id(rng, RECORD_ID_LEN),
            name: DEMO_CUSTOMER_NAME.to_string(),
            email: email.to_string(),
            phone: DEMO_CUSTOMER_PHONE.to_string(),
            address: DEMO_CUSTOMER_ADDRESS.to_string(),
            status: AccountStatus::Active,
            verified: true,
        })),
        Role::Admin => Ok(Account::Admin(AdminProfile {
            id: DEMO_ADMIN_ID.to_string(),
            name: DEMO_ADMIN_NAME.to_string(),
            email: email.to_string(),
        })),
        Role::Doctor => approved_doctors
            .iter()
            .find(|account| matches!(account, Account::Doctor(_)) && account.email() == email)
            .cloned()
            .ok_or(PharmacyError::InvalidCredentials),
    }
}

/// Where a freshly signed-in account lands.
#[must_use]
pub const fn landing_path(account: &Account) -> &'static str {
    if account.is_staff() { "/dashboard" } else { "/" }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub address: String,
    pub license_number: String,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), PharmacyError> {
        let mut errors = FieldErrors::new();
        errors.require(Field::Name, &self.name, "errors.name_required");
        if errors.require(Field::Email, &self.email, "errors.email_required")
            && !is_valid_email(&self.email)
        {
            errors.insert(Field::Email, "errors.email_invalid");
        }
        errors.check_phone(Field::Phone, &self.phone);
        if self.password.is_empty() {
            errors.insert(Field::Password, "errors.password_required");
        } else if !is_valid_password(&self.password) {
            errors.insert(Field::Password, "errors.password_short");
        }
        if self.password != self.confirm_password {
            errors.insert(Field::ConfirmPassword, "errors.password_mismatch");
        }
        if self.role == Role::Doctor {
            errors.require(
                Field::LicenseNumber,
                &self.license_number,
                "errors.license_required",
            );
        }
        errors.into_result()
    }
}

/// Signup awaiting e-mail verification, stored under `pendingSignup`.
/// Passwords are never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSignup {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub license_number: String,
    pub status: AccountStatus,
}

/// What a verified signup turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Customer(Account),
    Doctor(DoctorRequest),
}

impl PendingSignup {
    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] when the form is invalid.
    pub fn from_form<R: Rng + ?Sized>(
        form: &SignupForm,
        rng: &mut R,
    ) -> Result<Self, PharmacyError> {
        form.validate()?;
        let doctor = form.role == Role::Doctor;
        Ok(Self {
            id: base36_id(rng, RECORD_ID_LEN),
            role: if doctor { Role::Doctor } else { Role::Customer },
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.clone(),
            address: form.address.trim().to_string(),
            license_number: if doctor {
                form.license_number.trim().to_string()
            } else {
                String::new()
            },
            status: if doctor {
                AccountStatus::Pending
            } else {
                AccountStatus::Active
            },
        })
    }

    #[must_use]
    pub fn register(self, now: DateTime<Utc>) -> Registration {
        match self.role {
            Role::Doctor => Registration::Doctor(DoctorRequest {
                id: self.id,
                name: self.name,
                email: self.email,
                phone: self.phone,
                address: self.address,
                license_number: self.license_number,
                status: DoctorStatus::Pending,
                request_date: now,
            }),
            Role::Customer | Role::Admin => {
                Registration::Customer(Account::Customer(CustomerProfile {
                    id: self.id,
                    name: self.name,
                    email: self.email,
                    phone: self.phone,
                    address: self.address,
                    status: AccountStatus::Active,
                    verified: true,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::DoctorProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn login(role: Role, email: &str) -> LoginForm {
        LoginForm {
            role,
            email: email.into(),
            password: "password123".into(),
        }
    }

    fn signup(role: Role) -> SignupForm {
        SignupForm {
            role,
            name: "Mona".into(),
            email: "mona@example.com".into(),
            phone: "01234567890".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            address: String::new(),
            license_number: "LIC-9".into(),
        }
    }

    #[test]
    fn demo_roles_sign_in() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let customer =
            authenticate(&login(Role::Customer, "customer@example.com"), &[], &mut rng).unwrap();
        assert_eq!(customer.name(), DEMO_CUSTOMER_NAME);
        assert_eq!(customer.email(), "customer@example.com");
        assert_eq!(landing_path(&customer), "/");

        let admin = authenticate(&login(Role::Admin, "admin@example.com"), &[], &mut rng).unwrap();
        assert_eq!(admin.id(), DEMO_ADMIN_ID);
        assert_eq!(landing_path(&admin), "/dashboard");
    }

    #[test]
    fn doctor_needs_approval() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let form = login(Role::Doctor, "doctor@example.com");
        assert!(matches!(
            authenticate(&form, &[], &mut rng),
            Err(PharmacyError::InvalidCredentials)
        ));
        let approved = vec![Account::Doctor(DoctorProfile {
            id: "d1".into(),
            name: "Dr. Sara".into(),
            email: "doctor@example.com".into(),
            phone: "01111111111".into(),
            address: String::new(),
            license_number: "LIC".into(),
            status: AccountStatus::Active,
            verified: true,
            approved_date: None,
        })];
        let doctor = authenticate(&form, &approved, &mut rng).unwrap();
        assert_eq!(doctor.id(), "d1");
        assert_eq!(landing_path(&doctor), "/dashboard");
    }

    #[test]
    fn empty_login_fields_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = authenticate(&LoginForm::default(), &[], &mut rng).unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.get(Field::Email).is_some());
        assert!(fields.get(Field::Password).is_some());
    }

    #[test]
    fn signup_validation_collects_every_field() {
        let err = SignupForm {
            role: Role::Doctor,
            password: "abc".into(),
            email: "nope".into(),
            phone: "123".into(),
            ..SignupForm::default()
        }
        .validate()
        .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get(Field::Name), Some("errors.name_required"));
        assert_eq!(fields.get(Field::Email), Some("errors.email_invalid"));
        assert_eq!(fields.get(Field::Phone), Some("errors.phone_invalid"));
        assert_eq!(fields.get(Field::Password), Some("errors.password_short"));
        assert_eq!(
            fields.get(Field::ConfirmPassword),
            Some("errors.password_mismatch")
        );
        assert_eq!(
            fields.get(Field::LicenseNumber),
            Some("errors.license_required")
        );
        assert_eq!(fields.get(Field::Address), None);
        assert!(signup(Role::Customer).validate().is_ok());
    }

    #[test]
    fn pending_signup_drops_password_and_registers() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let pending = PendingSignup::from_form(&signup(Role::Doctor), &mut rng).unwrap();
        assert_eq!(pending.status, AccountStatus::Pending);
        let json = serde_json::to_string(&pending).unwrap();
        assert!(!json.contains("secret1"));
        assert!(json.contains("\"licenseNumber\":\"LIC-9\""));
        match pending.register(Utc::now()) {
            Registration::Doctor(request) => assert_eq!(request.status, DoctorStatus::Pending),
            Registration::Customer(other) => panic!("unexpected {other:?}"),
        }

        let customer = PendingSignup::from_form(&signup(Role::Customer), &mut rng).unwrap();
        assert!(customer.license_number.is_empty());
        match customer.register(Utc::now()) {
            Registration::Customer(account) => assert_eq!(account.role(), Role::Customer),
            Registration::Doctor(other) => panic!("unexpected {other:?}"),
        }
    }
}
