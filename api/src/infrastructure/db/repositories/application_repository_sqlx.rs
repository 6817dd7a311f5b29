use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::parse_column;
use crate::application::ports::application_repository::ApplicationRepository;
use crate::domain::applications::application::{
    ApplicationPatch, ApplicationRecord, ApplicationStatus, InsuranceApplication,
    VerificationStatus,
};
use crate::infrastructure::db::PgPool;

const APPLICATION_COLUMNS: &str = "id, submitted_by, farmer_name, aadhar_number, phone_number, \
     address, land_area, crop_type, soil_type, irrigation_source, aadhar_card, land_document, \
     bank_document, gps_images, farm_photos, status, verification_status, created_at";

pub struct SqlxApplicationRepository {
    pub pool: PgPool,
}

impl SqlxApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn application_from_row(r: &PgRow) -> anyhow::Result<InsuranceApplication> {
    let status: String = r.try_get("status")?;
    let verification: String = r.try_get("verification_status")?;
    Ok(InsuranceApplication {
        id: r.try_get("id")?,
        submitted_by: r.try_get("submitted_by")?,
        farmer_name: r.try_get("farmer_name")?,
        aadhar_number: r.try_get("aadhar_number")?,
        phone_number: r.try_get("phone_number")?,
        address: r.try_get("address")?,
        land_area: r.try_get("land_area")?,
        crop_type: r.try_get("crop_type")?,
        soil_type: r.try_get("soil_type")?,
        irrigation_source: r.try_get("irrigation_source")?,
        aadhar_card: r.try_get("aadhar_card")?,
        land_document: r.try_get("land_document")?,
        bank_document: r.try_get("bank_document")?,
        gps_images: r.try_get("gps_images")?,
        farm_photos: r.try_get("farm_photos")?,
        status: parse_column("status", &status, ApplicationStatus::parse)?,
        verification_status: parse_column(
            "verification_status",
            &verification,
            VerificationStatus::parse,
        )?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepository {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<InsuranceApplication>> {
        let row = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM insurance_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(application_from_row).transpose()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<InsuranceApplication>> {
        let rows = sqlx::query(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM insurance_applications ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(application_from_row).collect()
    }

    async fn create(&self, record: &ApplicationRecord) -> anyhow::Result<InsuranceApplication> {
        let form = &record.form;
        let row = sqlx::query(&format!(
            r#"INSERT INTO insurance_applications
                 (submitted_by, farmer_name, aadhar_number, phone_number, address, land_area,
                  crop_type, soil_type, irrigation_source, aadhar_card, land_document,
                  bank_document, gps_images, farm_photos)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(record.submitted_by)
        .bind(&form.farmer_name)
        .bind(&form.aadhar_number)
        .bind(&form.phone_number)
        .bind(&form.address)
        .bind(form.land_area.unwrap_or_default())
        .bind(&form.crop_type)
        .bind(&form.soil_type)
        .bind(&form.irrigation_source)
        .bind(&record.aadhar_card)
        .bind(&record.land_document)
        .bind(&record.bank_document)
        .bind(&record.gps_images)
        .bind(&record.farm_photos)
        .fetch_one(&self.pool)
        .await?;
        application_from_row(&row)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ApplicationPatch,
    ) -> anyhow::Result<Option<InsuranceApplication>> {
        let row = sqlx::query(&format!(
            r#"UPDATE insurance_applications SET
                 farmer_name = COALESCE($2, farmer_name),
                 aadhar_number = COALESCE($3, aadhar_number),
                 phone_number = COALESCE($4, phone_number),
                 address = COALESCE($5, address),
                 land_area = COALESCE($6, land_area),
                 crop_type = COALESCE($7, crop_type),
                 soil_type = COALESCE($8, soil_type),
                 irrigation_source = COALESCE($9, irrigation_source),
                 status = COALESCE($10, status),
                 verification_status = COALESCE($11, verification_status)
               WHERE id = $1
               RETURNING {APPLICATION_COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.farmer_name.as_deref())
        .bind(patch.aadhar_number.as_deref())
        .bind(patch.phone_number.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.land_area)
        .bind(patch.crop_type.as_deref())
        .bind(patch.soil_type.as_deref())
        .bind(patch.irrigation_source.as_deref())
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.verification_status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(application_from_row).transpose()
    }
}
