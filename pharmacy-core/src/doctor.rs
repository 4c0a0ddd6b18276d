//! Doctor registration review: pending requests, approval and rejection.
use crate::account::{Account, AccountStatus, DoctorProfile};
use crate::error::PharmacyError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DoctorStatus {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Pending => "status.pending",
            Self::Approved => "status.approved",
            Self::Rejected => "status.rejected",
        }
    }
}

/// A verified doctor signup waiting for an admin decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub license_number: String,
    #[serde(default)]
    pub status: DoctorStatus,
    pub request_date: DateTime<Utc>,
}

impl DoctorRequest {
    /// Profile stored under `approvedDoctors` once the request is accepted.
    #[must_use]
    pub fn approved_profile(&self, now: DateTime<Utc>) -> DoctorProfile {
        DoctorProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            license_number: self.license_number.clone(),
            status: AccountStatus::Active,
            verified: true,
            approved_date: Some(now),
        }
    }
}

fn take_request(
    pending: &mut Vec<DoctorRequest>,
    id: &str,
) -> Result<DoctorRequest, PharmacyError> {
    let index = pending
        .iter()
        .position(|request| request.id == id)
        .ok_or_else(|| PharmacyError::NotFound {
            kind: "doctor request",
            id: id.to_string(),
        })?;
    Ok(pending.remove(index))
}

/// Move a request out of `pending` and append one approved doctor account.
///
/// # Errors
///
/// Returns [`PharmacyError::NotFound`] when no pending request has `id`.
pub fn approve(
    pending: &mut Vec<DoctorRequest>,
    approved: &mut Vec<Account>,
    id: &str,
    now: DateTime<Utc>,
) -> Result<DoctorRequest, PharmacyError> {
    let mut request = take_request(pending, id)?;
    approved.push(Account::Doctor(request.approved_profile(now)));
    request.status = DoctorStatus::Approved;
    Ok(request)
}

/// Drop a request from `pending`.
///
/// # Errors
///
/// Returns [`PharmacyError::NotFound`] when no pending request has `id`.
pub fn reject(
    pending: &mut Vec<DoctorRequest>,
    id: &str,
) -> Result<DoctorRequest, PharmacyError> {
    let mut request = take_request(pending, id)?;
    request.status = DoctorStatus::Rejected;
    Ok(request)
}

/// Decisions taken during the current page visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSession {
    processed: Vec<DoctorRequest>,
}

impl ReviewSession {
    pub fn record(&mut self, request: DoctorRequest) {
        self.processed.push(request);
    }

    #[must_use]
    pub fn processed(&self) -> &[DoctorRequest] {
        &self.processed
    }

    #[must_use]
    pub fn count(&self, status: DoctorStatus) -> usize {
        self.processed
            .iter()
            .filter(|request| request.status == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, email: &str) -> DoctorRequest {
        DoctorRequest {
            id: id.into(),
            name: "Dr. Sara".into(),
            email: email.into(),
            phone: "01111111111".into(),
            address: String::new(),
            license_number: "LIC-1".into(),
            status: DoctorStatus::Pending,
            request_date: Utc::now(),
        }
    }

    #[test]
    fn approve_moves_exactly_one_record() {
        let mut pending = vec![request("a", "a@x.io"), request("b", "b@x.io")];
        let mut approved = Vec::new();
        let now = Utc::now();
        let done = approve(&mut pending, &mut approved, "a", now).unwrap();
        assert_eq!(done.status, DoctorStatus::Approved);
        assert_eq!(pending.len(), 1);
        assert_eq!(approved.len(), 1);
        match &approved[0] {
            Account::Doctor(profile) => {
                assert_eq!(profile.email, "a@x.io");
                assert!(profile.verified);
                assert_eq!(profile.approved_date, Some(now));
            }
            other => panic!("unexpected {other:?}"),
        }
        let json = serde_json::to_value(&approved[0]).unwrap();
        assert_eq!(json["role"], "doctor");
    }

    #[test]
    fn reject_and_unknown_ids() {
        let mut pending = vec![request("a", "a@x.io")];
        let mut approved = Vec::new();
        assert!(matches!(
            approve(&mut pending, &mut approved, "zzz", Utc::now()),
            Err(PharmacyError::NotFound { .. })
        ));
        let rejected = reject(&mut pending, "a").unwrap();
        assert_eq!(rejected.status, DoctorStatus::Rejected);
        assert!(pending.is_empty() && approved.is_empty());

        let mut session = ReviewSession::default();
        session.record(rejected);
        assert_eq!(session.count(DoctorStatus::Rejected), 1);
        assert_eq!(session.count(DoctorStatus::Approved), 0);
    }
}
