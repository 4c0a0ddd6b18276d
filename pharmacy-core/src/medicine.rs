//! Medicine request form, prescription checks and the stored request record.
use crate::account::Account;
use crate::constants::{GOVERNORATES, PRESCRIPTION_MAX_BYTES, PRESCRIPTION_MIME_TYPES, RECORD_ID_LEN};
use crate::error::PharmacyError;
use crate::ids::base36_id;
use crate::order::{RequestStatus, Tracked};
use crate::validation::{Field, FieldErrors};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reference to an attached prescription; the file body is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl PrescriptionFile {
    /// Check the browser-reported type and size of a picked file.
    ///
    /// # Errors
    ///
    /// Returns [`PharmacyError::FileType`] when the MIME type is not an
    /// accepted image or PDF and [`PharmacyError::FileTooLarge`] above 5 MB.
    pub fn accept(name: &str, mime_type: &str, size: u64) -> Result<Self, PharmacyError> {
        if !PRESCRIPTION_MIME_TYPES.contains(&mime_type) {
            return Err(PharmacyError::FileType {
                mime: mime_type.to_string(),
            });
        }
        if size > PRESCRIPTION_MAX_BYTES {
            return Err(PharmacyError::FileTooLarge { size });
        }
        Ok(Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size,
        })
    }

    /// Size in megabytes with two decimals, as shown under the picker.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_mb_text(&self) -> String {
        format!("{:.2}", self.size as f64 / 1024.0 / 1024.0)
    }
}

/// Raw form input for a medicine request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineRequestForm {
    pub full_name: String,
    pub phone_number: String,
    pub medicine_name: String,
    pub quantity: String,
    pub delivery_address: String,
    pub city: String,
    pub governorate: String,
    pub notes: String,
    pub prescription: Option<PrescriptionFile>,
}

impl MedicineRequestForm {
    /// Blank form pre-filled with the signed-in user's name and phone.
    #[must_use]
    pub fn prefilled(account: Option<&Account>) -> Self {
        account.map_or_else(Self::default, |account| Self {
            full_name: account.name().to_string(),
            phone_number: account.phone().unwrap_or_default().to_string(),
            ..Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] listing every failing field.
    pub fn validate(&self) -> Result<(), PharmacyError> {
        let mut errors = FieldErrors::new();
        errors.require(Field::FullName, &self.full_name, "errors.full_name_required");
        errors.check_phone(Field::PhoneNumber, &self.phone_number);
        errors.require(
            Field::MedicineName,
            &self.medicine_name,
            "errors.medicine_required",
        );
        errors.require(Field::Quantity, &self.quantity, "errors.quantity_required");
        errors.require(
            Field::DeliveryAddress,
            &self.delivery_address,
            "errors.delivery_address_required",
        );
        errors.require(Field::City, &self.city, "errors.city_required");
        if errors.require(
            Field::Governorate,
            &self.governorate,
            "errors.governorate_required",
        ) && !GOVERNORATES.contains(&self.governorate.as_str())
        {
            errors.insert(Field::Governorate, "errors.governorate_invalid");
        }
        errors.into_result()
    }
}

/// A submitted request as stored under `medicineRequests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRequest {
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
    pub medicine_name: String,
    pub quantity: String,
    pub delivery_address: String,
    pub city: String,
    pub governorate: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_file: Option<PrescriptionFile>,
    pub status: RequestStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
}

impl Tracked for MedicineRequest {
    const KIND: &'static str = "medicine request";

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }
}

impl MedicineRequest {
    /// Validate the form and build a pending request owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`PharmacyError::Validation`] when the form is incomplete.
    pub fn submit<R: Rng + ?Sized>(
        form: MedicineRequestForm,
        account: Option<&Account>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, PharmacyError> {
        form.validate()?;
        Ok(Self {
            id: base36_id(rng, RECORD_ID_LEN),
            full_name: form.full_name.trim().to_string(),
            phone_number: form.phone_number,
            medicine_name: form.medicine_name.trim().to_string(),
            quantity: form.quantity.trim().to_string(),
            delivery_address: form.delivery_address.trim().to_string(),
            city: form.city.trim().to_string(),
            governorate: form.governorate,
            notes: form.notes.trim().to_string(),
            prescription_file: form.prescription,
            status: RequestStatus::Pending,
            timestamp: now,
            user_id: account.map(|a| a.id().to_string()).unwrap_or_default(),
        })
    }

    /// WhatsApp chat link: Egyptian number without the trunk `0`, prefixed `2`.
    #[must_use]
    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&self.phone_number)
    }
}

#[must_use]
pub fn whatsapp_link(phone: &str) -> String {
    let national = phone.strip_prefix('0').unwrap_or(phone);
    format!("https://wa.me/2{national}")
}

/// Sample requests shown on a fresh dashboard.
///
/// # Errors
///
/// Returns an error if the embedded JSON is malformed.
pub fn sample_requests() -> Result<Vec<MedicineRequest>, serde_json::Error> {
    serde_json::from_str(include_str!("../data/sample_requests.json"))
}
