use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum PolicyStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Expired => "Expired",
            PolicyStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(PolicyStatus::Active),
            "Expired" => Some(PolicyStatus::Expired),
            "Cancelled" => Some(PolicyStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Policy {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub policy_number: String,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PolicyStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub farmer_id: Uuid,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<PolicyStatus>,
}

impl NewPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text("crop_type", &self.crop_type, "Please add crop type")?;
        validation::require_amount(
            "area_insured",
            self.area_insured,
            "Please add insured area in hectares",
        )?;
        validation::require_amount(
            "sum_insured",
            self.sum_insured,
            "Please add sum insured amount",
        )?;
        validation::require_amount("premium", self.premium, "Please add premium amount")
    }
}

/// Row handed to the repository: the verified farmer plus a freshly drawn number.
#[derive(Debug, Clone)]
pub struct PolicyRecord {
    pub farmer_id: Uuid,
    pub policy_number: String,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PolicyStatus,
}

impl PolicyRecord {
    pub fn from_new(input: &NewPolicy, farmer_id: Uuid, policy_number: String) -> Self {
        Self {
            farmer_id,
            policy_number,
            crop_type: input.crop_type.clone(),
            area_insured: input.area_insured,
            sum_insured: input.sum_insured,
            premium: input.premium,
            start_date: input.start_date,
            end_date: input.end_date,
            status: input.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicyPatch {
    pub crop_type: Option<String>,
    pub area_insured: Option<f64>,
    pub sum_insured: Option<f64>,
    pub premium: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<PolicyStatus>,
}

impl PolicyPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::optional_text("crop_type", self.crop_type.as_ref(), "Please add crop type")?;
        if let Some(v) = self.area_insured {
            validation::require_amount("area_insured", v, "Please add insured area in hectares")?;
        }
        if let Some(v) = self.sum_insured {
            validation::require_amount("sum_insured", v, "Please add sum insured amount")?;
        }
        if let Some(v) = self.premium {
            validation::require_amount("premium", v, "Please add premium amount")?;
        }
        Ok(())
    }

    pub fn apply_to(self, policy: &mut Policy) {
        if let Some(v) = self.crop_type {
            policy.crop_type = v;
        }
        if let Some(v) = self.area_insured {
            policy.area_insured = v;
        }
        if let Some(v) = self.sum_insured {
            policy.sum_insured = v;
        }
        if let Some(v) = self.premium {
            policy.premium = v;
        }
        if let Some(v) = self.start_date {
            policy.start_date = v;
        }
        if let Some(v) = self.end_date {
            policy.end_date = v;
        }
        if let Some(v) = self.status {
            policy.status = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyProjection {
    pub id: Uuid,
    pub policy_number: String,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PolicyProjection {
    pub fn brief(policy: &Policy) -> Self {
        Self {
            id: policy.id,
            policy_number: policy.policy_number.clone(),
            crop_type: policy.crop_type.clone(),
            area_insured: policy.area_insured,
            sum_insured: policy.sum_insured,
            premium: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn detailed(policy: &Policy) -> Self {
        Self {
            premium: Some(policy.premium),
            start_date: Some(policy.start_date),
            end_date: Some(policy.end_date),
            ..Self::brief(policy)
        }
    }
}
