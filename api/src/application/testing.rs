//! In-memory port implementations shared by the use case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::application::ports::application_repository::ApplicationRepository;
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::applications::application::{
    ApplicationForm, ApplicationPatch, ApplicationRecord, ApplicationStatus,
    ApplicationUploads, InsuranceApplication, VerificationStatus,
};
use crate::domain::claims::claim::{
    Claim, ClaimDocuments, ClaimPatch, ClaimRecord, ClaimReview, NewClaim,
};
use crate::domain::farmers::farmer::{
    AccountType, BankDetails, Category, Farmer, FarmerPatch, Gender, NewFarmer,
};
use crate::domain::numbering;
use crate::domain::policies::policy::{NewPolicy, Policy, PolicyPatch, PolicyRecord};

#[derive(Default)]
pub struct MemoryStore {
    farmers: Mutex<HashMap<Uuid, Farmer>>,
    policies: Mutex<HashMap<Uuid, Policy>>,
    claims: Mutex<HashMap<Uuid, Claim>>,
    applications: Mutex<HashMap<Uuid, InsuranceApplication>>,
    farmer_reads: AtomicUsize,
    forced_collisions: AtomicUsize,
}

impl MemoryStore {
    pub fn farmer_reads(&self) -> usize {
        self.farmer_reads.load(Ordering::SeqCst)
    }

    /// The next `n` policy or claim inserts report a duplicate number.
    pub fn force_number_collisions(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    fn take_collision(&self) -> bool {
        self.forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    pub fn seed_farmer(&self, owner_id: Uuid, input: NewFarmer) -> Farmer {
        let farmer = build_farmer(owner_id, &input);
        self.farmers
            .lock()
            .unwrap()
            .insert(farmer.id, farmer.clone());
        farmer
    }

    pub fn seed_policy(&self, input: NewPolicy) -> Policy {
        let record = PolicyRecord::from_new(&input, input.farmer_id, numbering::policy_number());
        let policy = build_policy(&record);
        self.policies
            .lock()
            .unwrap()
            .insert(policy.id, policy.clone());
        policy
    }

    pub fn seed_claim(&self, input: NewClaim) -> Claim {
        let record = ClaimRecord::from_new(&input, numbering::claim_number());
        let claim = build_claim(&record);
        self.claims.lock().unwrap().insert(claim.id, claim.clone());
        claim
    }

    pub fn claim(&self, id: Uuid) -> Option<Claim> {
        self.claims.lock().unwrap().get(&id).cloned()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.lock().unwrap().len()
    }

    pub fn policy(&self, id: Uuid) -> Option<Policy> {
        self.policies.lock().unwrap().get(&id).cloned()
    }

    pub fn farmer(&self, id: Uuid) -> Option<Farmer> {
        self.farmers.lock().unwrap().get(&id).cloned()
    }
}

fn build_farmer(owner_id: Uuid, input: &NewFarmer) -> Farmer {
    Farmer {
        id: Uuid::new_v4(),
        owner_id,
        name: input.name.clone(),
        father_name: input.father_name.clone(),
        category: input.category,
        gender: input.gender,
        address: input.address.clone(),
        contact_number: input.contact_number.clone(),
        aadhaar_number: input.aadhaar_number.clone(),
        bank_details: input.bank_details.clone(),
        has_loan_or_kcc: input.has_loan_or_kcc,
        created_at: Utc::now(),
    }
}

fn build_policy(record: &PolicyRecord) -> Policy {
    Policy {
        id: Uuid::new_v4(),
        farmer_id: record.farmer_id,
        policy_number: record.policy_number.clone(),
        crop_type: record.crop_type.clone(),
        area_insured: record.area_insured,
        sum_insured: record.sum_insured,
        premium: record.premium,
        start_date: record.start_date,
        end_date: record.end_date,
        status: record.status,
        created_at: Utc::now(),
    }
}

fn build_claim(record: &ClaimRecord) -> Claim {
    Claim {
        id: Uuid::new_v4(),
        policy_id: record.policy_id,
        farmer_id: record.farmer_id,
        claim_number: record.claim_number.clone(),
        crop_under_loss: record.crop_under_loss.clone(),
        date_of_loss: record.date_of_loss,
        cause_of_loss: record.cause_of_loss.clone(),
        localized_risk: record.localized_risk.clone(),
        declaration: record.declaration.clone(),
        place: record.place.clone(),
        claim_date: Utc::now(),
        claim_amount: record.claim_amount,
        status: record.status,
        documents: record.documents.clone(),
        reviewed_by: None,
        review_date: None,
        remarks: None,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl FarmerRepository for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>> {
        self.farmer_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.farmers.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Farmer>> {
        Ok(self.farmers.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Farmer>> {
        Ok(self
            .farmers
            .lock()
            .unwrap()
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Farmer>> {
        let farmers = self.farmers.lock().unwrap();
        Ok(ids.iter().filter_map(|id| farmers.get(id).cloned()).collect())
    }

    async fn create(&self, owner_id: Uuid, input: &NewFarmer) -> Result<Farmer, StoreError> {
        let mut farmers = self.farmers.lock().unwrap();
        if farmers.values().any(|f| f.owner_id == owner_id) {
            return Err(StoreError::Duplicate("owner_id".into()));
        }
        if farmers
            .values()
            .any(|f| f.aadhaar_number == input.aadhaar_number)
        {
            return Err(StoreError::Duplicate("aadhaar_number".into()));
        }
        let farmer = build_farmer(owner_id, input);
        farmers.insert(farmer.id, farmer.clone());
        Ok(farmer)
    }

    async fn update(&self, id: Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, StoreError> {
        let mut farmers = self.farmers.lock().unwrap();
        Ok(farmers.get_mut(&id).map(|f| {
            patch.clone().apply_to(f);
            f.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.farmers.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl PolicyRepository for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Policy>> {
        Ok(self.policies.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Policy>> {
        Ok(self.policies.lock().unwrap().values().cloned().collect())
    }

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Policy>> {
        Ok(self
            .policies
            .lock()
            .unwrap()
            .values()
            .filter(|p| farmer_ids.contains(&p.farmer_id))
            .cloned()
            .collect())
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Policy>> {
        let policies = self.policies.lock().unwrap();
        Ok(ids.iter().filter_map(|id| policies.get(id).cloned()).collect())
    }

    async fn create(&self, record: &PolicyRecord) -> Result<Policy, StoreError> {
        if self.take_collision() {
            return Err(StoreError::Duplicate("policy_number".into()));
        }
        let policy = build_policy(record);
        self.policies
            .lock()
            .unwrap()
            .insert(policy.id, policy.clone());
        Ok(policy)
    }

    async fn update(&self, id: Uuid, patch: &PolicyPatch) -> Result<Option<Policy>, StoreError> {
        let mut policies = self.policies.lock().unwrap();
        Ok(policies.get_mut(&id).map(|p| {
            patch.clone().apply_to(p);
            p.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.policies.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl ClaimRepository for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Claim>> {
        Ok(self.claims.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Claim>> {
        Ok(self.claims.lock().unwrap().values().cloned().collect())
    }

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Claim>> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .values()
            .filter(|c| farmer_ids.contains(&c.farmer_id))
            .cloned()
            .collect())
    }

    async fn create(&self, record: &ClaimRecord) -> Result<Claim, StoreError> {
        if self.take_collision() {
            return Err(StoreError::Duplicate("claim_number".into()));
        }
        let claim = build_claim(record);
        self.claims.lock().unwrap().insert(claim.id, claim.clone());
        Ok(claim)
    }

    async fn update(&self, id: Uuid, patch: &ClaimPatch) -> Result<Option<Claim>, StoreError> {
        let mut claims = self.claims.lock().unwrap();
        Ok(claims.get_mut(&id).map(|c| {
            patch.clone().apply_to(c);
            c.clone()
        }))
    }

    async fn record_review(&self, id: Uuid, review: &ClaimReview) -> anyhow::Result<Option<Claim>> {
        let mut claims = self.claims.lock().unwrap();
        Ok(claims.get_mut(&id).map(|c| {
            review.clone().apply_to(c);
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.claims.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<InsuranceApplication>> {
        Ok(self.applications.lock().unwrap().get(&id).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<InsuranceApplication>> {
        Ok(self.applications.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, record: &ApplicationRecord) -> anyhow::Result<InsuranceApplication> {
        let app = InsuranceApplication {
            id: Uuid::new_v4(),
            submitted_by: record.submitted_by,
            farmer_name: record.form.farmer_name.clone(),
            aadhar_number: record.form.aadhar_number.clone(),
            phone_number: record.form.phone_number.clone(),
            address: record.form.address.clone(),
            land_area: record.form.land_area.unwrap_or_default(),
            crop_type: record.form.crop_type.clone(),
            soil_type: record.form.soil_type.clone(),
            irrigation_source: record.form.irrigation_source.clone(),
            aadhar_card: record.aadhar_card.clone(),
            land_document: record.land_document.clone(),
            bank_document: record.bank_document.clone(),
            gps_images: record.gps_images.clone(),
            farm_photos: record.farm_photos.clone(),
            status: ApplicationStatus::Pending,
            verification_status: VerificationStatus::Pending,
            created_at: Utc::now(),
        };
        self.applications
            .lock()
            .unwrap()
            .insert(app.id, app.clone());
        Ok(app)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ApplicationPatch,
    ) -> anyhow::Result<Option<InsuranceApplication>> {
        let mut apps = self.applications.lock().unwrap();
        Ok(apps.get_mut(&id).map(|a| {
            patch.clone().apply_to(a);
            a.clone()
        }))
    }
}

pub fn farmer_input(aadhaar: &str) -> NewFarmer {
    NewFarmer {
        name: "Ramesh Patil".into(),
        father_name: "Suresh Patil".into(),
        category: Category::General,
        gender: Gender::Male,
        address: "Ward 4, Sinnar".into(),
        contact_number: "9876543210".into(),
        aadhaar_number: aadhaar.into(),
        bank_details: BankDetails {
            account_number: "001122334455".into(),
            bank_name: "State Bank".into(),
            branch_location: "Sinnar".into(),
            ifsc_code: "SBIN0000123".into(),
            micr_code: None,
            account_type: AccountType::SavingAccount,
        },
        has_loan_or_kcc: false,
    }
}

pub fn policy_input(farmer_id: Uuid) -> NewPolicy {
    NewPolicy {
        farmer_id,
        crop_type: "Soybean".into(),
        area_insured: 2.0,
        sum_insured: 80_000.0,
        premium: 1_600.0,
        start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
        status: None,
    }
}

pub fn claim_input(policy_id: Uuid, farmer_id: Uuid) -> NewClaim {
    NewClaim {
        policy_id,
        farmer_id,
        crop_under_loss: "Soybean".into(),
        date_of_loss: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        cause_of_loss: "Excess rainfall".into(),
        localized_risk: None,
        declaration: "I declare the above is true".into(),
        place: "Sinnar".into(),
        claim_amount: None,
        documents: ClaimDocuments::default(),
    }
}

pub fn application_form() -> ApplicationForm {
    ApplicationForm {
        farmer_name: "Lakshmi Devi".into(),
        aadhar_number: "123412341234".into(),
        phone_number: "9123456780".into(),
        address: "Kurnool".into(),
        land_area: Some(3.5),
        crop_type: "Groundnut".into(),
        soil_type: "Red".into(),
        irrigation_source: "Borewell".into(),
    }
}

pub fn application_uploads() -> ApplicationUploads {
    ApplicationUploads {
        aadhar_card: vec!["/uploads/1-aadhar.pdf".into()],
        land_document: vec!["/uploads/2-land.pdf".into()],
        bank_document: vec!["/uploads/3-bank.pdf".into()],
        gps_images: vec!["/uploads/4-gps.png".into()],
        farm_photos: Vec::new(),
    }
}
