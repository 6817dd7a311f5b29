use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::validation::{self, ValidationError};

/// Files accepted per multi-document group (GPS images, farm photos).
pub const MAX_GROUP_FILES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum VerificationStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::InProgress => "in-progress",
            VerificationStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(VerificationStatus::Pending),
            "in-progress" => Some(VerificationStatus::InProgress),
            "completed" => Some(VerificationStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsuranceApplication {
    pub id: Uuid,
    pub submitted_by: Uuid,
    pub farmer_name: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub address: String,
    pub land_area: f64,
    pub crop_type: String,
    pub soil_type: String,
    pub irrigation_source: String,
    pub aadhar_card: String,
    pub land_document: String,
    pub bank_document: String,
    pub gps_images: Vec<String>,
    pub farm_photos: Vec<String>,
    pub status: ApplicationStatus,
    pub verification_status: VerificationStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl InsuranceApplication {
    pub fn is_submitted_by(&self, identity_id: Uuid) -> bool {
        self.submitted_by == identity_id
    }
}

/// Text fields of an application form.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub farmer_name: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub address: String,
    pub land_area: Option<f64>,
    pub crop_type: String,
    pub soil_type: String,
    pub irrigation_source: String,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(
            "farmer_name",
            &self.farmer_name,
            "Please provide farmer name",
        )?;
        validation::require_text(
            "aadhar_number",
            &self.aadhar_number,
            "Please provide Aadhar number",
        )?;
        if !validation::is_aadhaar(&self.aadhar_number) {
            return Err(ValidationError::new(
                "aadhar_number",
                "Aadhar number must be 12 digits",
            ));
        }
        validation::require_text(
            "phone_number",
            &self.phone_number,
            "Please provide phone number",
        )?;
        validation::require_text("address", &self.address, "Please provide address")?;
        match self.land_area {
            Some(area) => validation::require_amount("land_area", area, "Please provide land area")?,
            None => return Err(ValidationError::new("land_area", "Please provide land area")),
        }
        validation::require_text("crop_type", &self.crop_type, "Please provide crop type")?;
        validation::require_text("soil_type", &self.soil_type, "Please provide soil type")?;
        validation::require_text(
            "irrigation_source",
            &self.irrigation_source,
            "Please provide irrigation source",
        )
    }
}

/// Stored-file references produced by the upload collaborator, grouped by form field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationUploads {
    pub aadhar_card: Vec<String>,
    pub land_document: Vec<String>,
    pub bank_document: Vec<String>,
    pub gps_images: Vec<String>,
    pub farm_photos: Vec<String>,
}

impl ApplicationUploads {
    pub fn is_empty(&self) -> bool {
        self.aadhar_card.is_empty()
            && self.land_document.is_empty()
            && self.bank_document.is_empty()
            && self.gps_images.is_empty()
            && self.farm_photos.is_empty()
    }

    /// Checks group caps and that each required single document is present exactly once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        single("aadhar_card", &self.aadhar_card, "Please upload Aadhar card")?;
        single(
            "land_document",
            &self.land_document,
            "Please upload land ownership document",
        )?;
        single("bank_document", &self.bank_document, "Please upload bank document")?;
        group("gps_images", &self.gps_images)?;
        group("farm_photos", &self.farm_photos)
    }
}

fn single(field: &'static str, refs: &[String], missing: &str) -> Result<(), ValidationError> {
    match refs.len() {
        0 => Err(ValidationError::new(field, missing)),
        1 => Ok(()),
        _ => Err(ValidationError::new(
            field,
            format!("Only one file is accepted for {}", field),
        )),
    }
}

fn group(field: &'static str, refs: &[String]) -> Result<(), ValidationError> {
    if refs.len() > MAX_GROUP_FILES {
        return Err(ValidationError::new(
            field,
            format!("At most {} files are accepted for {}", MAX_GROUP_FILES, field),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    pub submitted_by: Uuid,
    pub form: ApplicationForm,
    pub aadhar_card: String,
    pub land_document: String,
    pub bank_document: String,
    pub gps_images: Vec<String>,
    pub farm_photos: Vec<String>,
}

impl ApplicationRecord {
    /// Callers validate `uploads` first; a missing single document becomes an empty reference.
    pub fn new(submitted_by: Uuid, form: ApplicationForm, uploads: ApplicationUploads) -> Self {
        let first = |refs: Vec<String>| refs.into_iter().next().unwrap_or_default();
        Self {
            submitted_by,
            form,
            aadhar_card: first(uploads.aadhar_card),
            land_document: first(uploads.land_document),
            bank_document: first(uploads.bank_document),
            gps_images: uploads.gps_images,
            farm_photos: uploads.farm_photos,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub farmer_name: Option<String>,
    pub aadhar_number: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub land_area: Option<f64>,
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
    pub irrigation_source: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub verification_status: Option<VerificationStatus>,
}

impl ApplicationPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::optional_text(
            "farmer_name",
            self.farmer_name.as_ref(),
            "Please provide farmer name",
        )?;
        if let Some(aadhar) = &self.aadhar_number {
            if !validation::is_aadhaar(aadhar) {
                return Err(ValidationError::new(
                    "aadhar_number",
                    "Aadhar number must be 12 digits",
                ));
            }
        }
        validation::optional_text(
            "phone_number",
            self.phone_number.as_ref(),
            "Please provide phone number",
        )?;
        validation::optional_text("address", self.address.as_ref(), "Please provide address")?;
        if let Some(area) = self.land_area {
            validation::require_amount("land_area", area, "Please provide land area")?;
        }
        validation::optional_text("crop_type", self.crop_type.as_ref(), "Please provide crop type")?;
        validation::optional_text("soil_type", self.soil_type.as_ref(), "Please provide soil type")?;
        validation::optional_text(
            "irrigation_source",
            self.irrigation_source.as_ref(),
            "Please provide irrigation source",
        )
    }

    pub fn apply_to(self, app: &mut InsuranceApplication) {
        if let Some(v) = self.farmer_name {
            app.farmer_name = v;
        }
        if let Some(v) = self.aadhar_number {
            app.aadhar_number = v;
        }
        if let Some(v) = self.phone_number {
            app.phone_number = v;
        }
        if let Some(v) = self.address {
            app.address = v;
        }
        if let Some(v) = self.land_area {
            app.land_area = v;
        }
        if let Some(v) = self.crop_type {
            app.crop_type = v;
        }
        if let Some(v) = self.soil_type {
            app.soil_type = v;
        }
        if let Some(v) = self.irrigation_source {
            app.irrigation_source = v;
        }
        if let Some(v) = self.status {
            app.status = v;
        }
        if let Some(v) = self.verification_status {
            app.verification_status = v;
        }
    }
}
