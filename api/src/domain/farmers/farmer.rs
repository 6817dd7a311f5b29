use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::validation::{self, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Category {
    General,
    SC,
    ST,
    OBC,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::SC => "SC",
            Category::ST => "ST",
            Category::OBC => "OBC",
            Category::Others => "Others",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "General" => Some(Category::General),
            "SC" => Some(Category::SC),
            "ST" => Some(Category::ST),
            "OBC" => Some(Category::OBC),
            "Others" => Some(Category::Others),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccountType {
    #[serde(rename = "Crop Loan")]
    CropLoan,
    #[serde(rename = "Saving Account")]
    SavingAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BankDetails {
    pub account_number: String,
    pub bank_name: String,
    pub branch_location: String,
    pub ifsc_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micr_code: Option<String>,
    pub account_type: AccountType,
}

impl BankDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text(
            "bank_details.account_number",
            &self.account_number,
            "Please add bank account number",
        )?;
        validation::require_text(
            "bank_details.bank_name",
            &self.bank_name,
            "Please add bank name",
        )?;
        validation::require_text(
            "bank_details.branch_location",
            &self.branch_location,
            "Please add branch location",
        )?;
        validation::require_text(
            "bank_details.ifsc_code",
            &self.ifsc_code,
            "Please add IFSC code",
        )
    }
}

#[derive(Debug, Clone)]
pub struct Farmer {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub father_name: String,
    pub category: Category,
    pub gender: Gender,
    pub address: String,
    pub contact_number: String,
    pub aadhaar_number: String,
    pub bank_details: BankDetails,
    pub has_loan_or_kcc: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Farmer {
    pub fn is_owned_by(&self, identity_id: Uuid) -> bool {
        self.owner_id == identity_id
    }
}

/// Profile fields accepted on creation. The owner always comes from the caller's identity.
#[derive(Debug, Clone)]
pub struct NewFarmer {
    pub name: String,
    pub father_name: String,
    pub category: Category,
    pub gender: Gender,
    pub address: String,
    pub contact_number: String,
    pub aadhaar_number: String,
    pub bank_details: BankDetails,
    pub has_loan_or_kcc: bool,
}

impl NewFarmer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_text("name", &self.name, "Please add farmer name")?;
        validation::require_text("father_name", &self.father_name, "Please add father's name")?;
        validation::require_text("address", &self.address, "Please add address")?;
        validation::require_text(
            "contact_number",
            &self.contact_number,
            "Please add contact number",
        )?;
        validation::require_text(
            "aadhaar_number",
            &self.aadhaar_number,
            "Please add Aadhaar number",
        )?;
        self.bank_details.validate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FarmerPatch {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub aadhaar_number: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub has_loan_or_kcc: Option<bool>,
}

impl FarmerPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::optional_text("name", self.name.as_ref(), "Please add farmer name")?;
        validation::optional_text(
            "father_name",
            self.father_name.as_ref(),
            "Please add father's name",
        )?;
        validation::optional_text("address", self.address.as_ref(), "Please add address")?;
        validation::optional_text(
            "contact_number",
            self.contact_number.as_ref(),
            "Please add contact number",
        )?;
        validation::optional_text(
            "aadhaar_number",
            self.aadhaar_number.as_ref(),
            "Please add Aadhaar number",
        )?;
        if let Some(bank) = &self.bank_details {
            bank.validate()?;
        }
        Ok(())
    }

    pub fn apply_to(self, farmer: &mut Farmer) {
        if let Some(v) = self.name {
            farmer.name = v;
        }
        if let Some(v) = self.father_name {
            farmer.father_name = v;
        }
        if let Some(v) = self.category {
            farmer.category = v;
        }
        if let Some(v) = self.gender {
            farmer.gender = v;
        }
        if let Some(v) = self.address {
            farmer.address = v;
        }
        if let Some(v) = self.contact_number {
            farmer.contact_number = v;
        }
        if let Some(v) = self.aadhaar_number {
            farmer.aadhaar_number = v;
        }
        if let Some(v) = self.bank_details {
            farmer.bank_details = v;
        }
        if let Some(v) = self.has_loan_or_kcc {
            farmer.has_loan_or_kcc = v;
        }
    }
}

/// Read-only view of a farmer attached to policy and claim responses.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerProjection {
    pub id: Uuid,
    pub name: String,
    pub aadhaar_number: String,
    pub contact_number: String,
    pub address: Option<String>,
    pub bank_details: Option<BankDetails>,
}

impl FarmerProjection {
    pub fn brief(farmer: &Farmer) -> Self {
        Self {
            id: farmer.id,
            name: farmer.name.clone(),
            aadhaar_number: farmer.aadhaar_number.clone(),
            contact_number: farmer.contact_number.clone(),
            address: None,
            bank_details: None,
        }
    }

    pub fn detailed(farmer: &Farmer) -> Self {
        Self {
            address: Some(farmer.address.clone()),
            bank_details: Some(farmer.bank_details.clone()),
            ..Self::brief(farmer)
        }
    }
}
