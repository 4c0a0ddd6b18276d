//! Signed-in accounts, one variant per role.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role selector used by the login and signup forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Doctor,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Doctor => "doctor",
            Self::Admin => "admin",
        }
    }

    /// Translation key of the role label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Customer => "roles.customer",
            Self::Doctor => "roles.doctor",
            Self::Admin => "roles.admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "doctor" => Ok(Self::Doctor),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub license_number: String,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The signed-in user, persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Account {
    Customer(CustomerProfile),
    Doctor(DoctorProfile),
    Admin(AdminProfile),
}

impl Account {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Customer(_) => Role::Customer,
            Self::Doctor(_) => Role::Doctor,
            Self::Admin(_) => Role::Admin,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Customer(p) => &p.id,
            Self::Doctor(p) => &p.id,
            Self::Admin(p) => &p.id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Customer(p) => &p.name,
            Self::Doctor(p) => &p.name,
            Self::Admin(p) => &p.name,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Customer(p) => &p.email,
            Self::Doctor(p) => &p.email,
            Self::Admin(p) => &p.email,
        }
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Customer(p) => Some(p.phone.as_str()),
            Self::Doctor(p) => Some(p.phone.as_str()),
            Self::Admin(_) => None,
        }
        .filter(|phone| !phone.is_empty())
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Customer(p) => Some(p.address.as_str()),
            Self::Doctor(p) => Some(p.address.as_str()),
            Self::Admin(_) => None,
        }
        .filter(|address| !address.is_empty())
    }

    /// Admins and doctors may open the dashboard.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Admin(_) | Self::Doctor(_))
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor() -> Account {
        Account::Doctor(DoctorProfile {
            id: "d1".into(),
            name: "Dr. Sara".into(),
            email: "doctor@example.com".into(),
            phone: "01111111111".into(),
            address: String::new(),
            license_number: "LIC-42".into(),
            status: AccountStatus::Active,
            verified: true,
            approved_date: None,
        })
    }

    #[test]
    fn role_tag_is_flattened_into_record() {
        let json = serde_json::to_value(doctor()).unwrap();
        assert_eq!(json["role"], "doctor");
        assert_eq!(json["licenseNumber"], "LIC-42");
        assert!(json.get("approvedDate").is_none());

        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back.role(), Role::Doctor);
    }

    #[test]
    fn staff_flags_follow_role() {
        let admin = Account::Admin(AdminProfile {
            id: "admin-1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
        });
        assert!(admin.is_staff() && admin.is_admin());
        assert!(doctor().is_staff() && !doctor().is_admin());
        assert_eq!(admin.phone(), None);
        assert_eq!(doctor().address(), None);
    }

    #[test]
    fn contact_details_borrow_from_the_profile() {
        let doctor = doctor();
        let phone: Option<&str> = doctor.phone();
        assert_eq!(phone, Some("01111111111"));
        assert_eq!(doctor.email(), "doctor@example.com");
    }

    #[test]
    fn legacy_customer_record_parses_with_defaults() {
        let raw = r#"{"role":"customer","id":"c1","name":"Ahmed","email":"a@b.co","phone":"01234567890"}"#;
        let account: Account = serde_json::from_str(raw).unwrap();
        match account {
            Account::Customer(profile) => {
                assert_eq!(profile.status, AccountStatus::Active);
                assert!(!profile.verified);
            }
            other => panic!("unexpected account {other:?}"),
        }
    }

    #[test]
    fn role_parses_from_form_values() {
        assert_eq!("doctor".parse::<Role>(), Ok(Role::Doctor));
        assert!("nurse".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
