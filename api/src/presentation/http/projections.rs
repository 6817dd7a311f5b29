use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::farmers::farmer::{BankDetails, FarmerProjection};
use crate::domain::policies::policy::PolicyProjection;

/// Farmer fields embedded in policy and claim responses. List views omit the optional ones.
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerSummary {
    pub id: Uuid,
    pub name: String,
    pub aadhaar_number: String,
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_details: Option<BankDetails>,
}

impl From<FarmerProjection> for FarmerSummary {
    fn from(p: FarmerProjection) -> Self {
        FarmerSummary {
            id: p.id,
            name: p.name,
            aadhaar_number: p.aadhaar_number,
            contact_number: p.contact_number,
            address: p.address,
            bank_details: p.bank_details,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PolicySummary {
    pub id: Uuid,
    pub policy_number: String,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl From<PolicyProjection> for PolicySummary {
    fn from(p: PolicyProjection) -> Self {
        PolicySummary {
            id: p.id,
            policy_number: p.policy_number,
            crop_type: p.crop_type,
            area_insured: p.area_insured,
            sum_insured: p.sum_insured,
            premium: p.premium,
            start_date: p.start_date,
            end_date: p.end_date,
        }
    }
}
