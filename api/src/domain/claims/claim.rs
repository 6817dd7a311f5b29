use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum ClaimStatus {
    #[default]
    Pending,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(ClaimStatus::Pending),
            "Under Review" => Some(ClaimStatus::UnderReview),
            "Approved" => Some(ClaimStatus::Approved),
            "Rejected" => Some(ClaimStatus::Rejected),
            _ => None,
        }
    }
}

/// Supporting document references, each an opaque path from the file store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClaimDocuments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_registration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_ownership: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhaar_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification_proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sowing_declaration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Claim {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub farmer_id: Uuid,
    pub claim_number: String,
    pub crop_under_loss: String,
    pub date_of_loss: NaiveDate,
    pub cause_of_loss: String,
    pub localized_risk: Option<String>,
    pub declaration: String,
    pub place: String,
    pub claim_date: DateTime<Utc>,
    pub claim_amount: Option<f64>,
    pub status: ClaimStatus,
    pub documents: ClaimDocuments,
    pub reviewed_by: Option<Uuid>,
    pub review_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClaim {
    pub policy_id: Uuid,
    pub farmer_id: Uuid,
    pub crop_under_loss: String,
    pub date_of_loss: NaiveDate,
    pub cause_of_loss: String,
    pub localized_risk: Option<String>,
    pub declaration: String,
    pub place: String,
    pub claim_amount: Option<f64>,
    pub documents: ClaimDocuments,
}

impl NewClaim {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(
            "crop_under_loss",
            &self.crop_under_loss,
            "Please add crop under loss",
        )?;
        validation::require_text(
            "cause_of_loss",
            &self.cause_of_loss,
            "Please add cause of loss",
        )?;
        validation::require_text("declaration", &self.declaration, "Please add declaration")?;
        validation::require_text("place", &self.place, "Please add place")?;
        if let Some(amount) = self.claim_amount {
            validation::require_amount("claim_amount", amount, "Claim amount must be positive")?;
        }
        Ok(())
    }
}

/// Row handed to the repository. Status always starts at Pending.
#[derive(Debug, Clone)]
pub struct ClaimRecord {
    pub policy_id: Uuid,
    pub farmer_id: Uuid,
    pub claim_number: String,
    pub crop_under_loss: String,
    pub date_of_loss: NaiveDate,
    pub cause_of_loss: String,
    pub localized_risk: Option<String>,
    pub declaration: String,
    pub place: String,
    pub claim_amount: Option<f64>,
    pub status: ClaimStatus,
    pub documents: ClaimDocuments,
}

impl ClaimRecord {
    pub fn from_new(input: &NewClaim, claim_number: String) -> Self {
        Self {
            policy_id: input.policy_id,
            farmer_id: input.farmer_id,
            claim_number,
            crop_under_loss: input.crop_under_loss.clone(),
            date_of_loss: input.date_of_loss,
            cause_of_loss: input.cause_of_loss.clone(),
            localized_risk: input.localized_risk.clone(),
            declaration: input.declaration.clone(),
            place: input.place.clone(),
            claim_amount: input.claim_amount,
            status: ClaimStatus::Pending,
            documents: input.documents.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimField {
    CropUnderLoss,
    DateOfLoss,
    CauseOfLoss,
    LocalizedRisk,
    Declaration,
    Place,
    ClaimAmount,
    Status,
    Documents,
    Remarks,
}

/// Fields a non-admin owner may change on their own claim.
pub const OWNER_EDITABLE_CLAIM_FIELDS: &[ClaimField] = &[ClaimField::Documents];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimPatch {
    pub crop_under_loss: Option<String>,
    pub date_of_loss: Option<NaiveDate>,
    pub cause_of_loss: Option<String>,
    pub localized_risk: Option<String>,
    pub declaration: Option<String>,
    pub place: Option<String>,
    pub claim_amount: Option<f64>,
    pub status: Option<ClaimStatus>,
    pub documents: Option<ClaimDocuments>,
    pub remarks: Option<String>,
}

impl ClaimPatch {
    /// Drops every supplied field not in `allowed`. Dropped fields are not an error.
    pub fn restrict_to(self, allowed: &[ClaimField]) -> Self {
        let keep = |f: ClaimField| allowed.contains(&f);
        Self {
            crop_under_loss: self.crop_under_loss.filter(|_| keep(ClaimField::CropUnderLoss)),
            date_of_loss: self.date_of_loss.filter(|_| keep(ClaimField::DateOfLoss)),
            cause_of_loss: self.cause_of_loss.filter(|_| keep(ClaimField::CauseOfLoss)),
            localized_risk: self.localized_risk.filter(|_| keep(ClaimField::LocalizedRisk)),
            declaration: self.declaration.filter(|_| keep(ClaimField::Declaration)),
            place: self.place.filter(|_| keep(ClaimField::Place)),
            claim_amount: self.claim_amount.filter(|_| keep(ClaimField::ClaimAmount)),
            status: self.status.filter(|_| keep(ClaimField::Status)),
            documents: self.documents.filter(|_| keep(ClaimField::Documents)),
            remarks: self.remarks.filter(|_| keep(ClaimField::Remarks)),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::optional_text(
            "crop_under_loss",
            self.crop_under_loss.as_ref(),
            "Please add crop under loss",
        )?;
        validation::optional_text(
            "cause_of_loss",
            self.cause_of_loss.as_ref(),
            "Please add cause of loss",
        )?;
        validation::optional_text(
            "declaration",
            self.declaration.as_ref(),
            "Please add declaration",
        )?;
        validation::optional_text("place", self.place.as_ref(), "Please add place")?;
        if let Some(amount) = self.claim_amount {
            validation::require_amount("claim_amount", amount, "Claim amount must be positive")?;
        }
        Ok(())
    }

    pub fn apply_to(self, claim: &mut Claim) {
        if let Some(v) = self.crop_under_loss {
            claim.crop_under_loss = v;
        }
        if let Some(v) = self.date_of_loss {
            claim.date_of_loss = v;
        }
        if let Some(v) = self.cause_of_loss {
            claim.cause_of_loss = v;
        }
        if let Some(v) = self.localized_risk {
            claim.localized_risk = Some(v);
        }
        if let Some(v) = self.declaration {
            claim.declaration = v;
        }
        if let Some(v) = self.place {
            claim.place = v;
        }
        if let Some(v) = self.claim_amount {
            claim.claim_amount = Some(v);
        }
        if let Some(v) = self.status {
            claim.status = v;
        }
        if let Some(v) = self.documents {
            claim.documents = v;
        }
        if let Some(v) = self.remarks {
            claim.remarks = Some(v);
        }
    }
}

/// Admin review stamp written by the status update.
#[derive(Debug, Clone)]
pub struct ClaimReview {
    pub status: ClaimStatus,
    pub reviewed_by: Uuid,
    pub review_date: DateTime<Utc>,
    pub remarks: Option<String>,
    pub claim_amount: Option<f64>,
}

impl ClaimReview {
    pub fn apply_to(self, claim: &mut Claim) {
        claim.status = self.status;
        claim.reviewed_by = Some(self.reviewed_by);
        claim.review_date = Some(self.review_date);
        if let Some(v) = self.remarks {
            claim.remarks = Some(v);
        }
        if let Some(v) = self.claim_amount {
            claim.claim_amount = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_patch() -> ClaimPatch {
        ClaimPatch {
            crop_under_loss: Some("Wheat".into()),
            date_of_loss: NaiveDate::from_ymd_opt(2026, 3, 1),
            cause_of_loss: Some("Hail".into()),
            localized_risk: Some("Hailstorm".into()),
            declaration: Some("true".into()),
            place: Some("Nashik".into()),
            claim_amount: Some(9000.0),
            status: Some(ClaimStatus::Approved),
            documents: Some(ClaimDocuments {
                gps_image: Some("/uploads/gps.png".into()),
                ..Default::default()
            }),
            remarks: Some("self approved".into()),
        }
    }

    #[test]
    fn owner_allow_list_keeps_only_documents() {
        let narrowed = full_patch().restrict_to(OWNER_EDITABLE_CLAIM_FIELDS);
        assert_eq!(
            narrowed,
            ClaimPatch {
                documents: full_patch().documents,
                ..Default::default()
            }
        );
    }

    #[test]
    fn empty_allow_list_drops_everything() {
        assert!(full_patch().restrict_to(&[]).is_empty());
    }

    #[test]
    fn status_round_trips_through_storage_text() {
        for s in [
            ClaimStatus::Pending,
            ClaimStatus::UnderReview,
            ClaimStatus::Approved,
            ClaimStatus::Rejected,
        ] {
            assert_eq!(ClaimStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ClaimStatus::parse("Paid"), None);
    }
}
