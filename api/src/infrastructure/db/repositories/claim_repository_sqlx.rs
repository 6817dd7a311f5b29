use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::{parse_column, store_error};
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::claims::claim::{
    Claim, ClaimDocuments, ClaimPatch, ClaimRecord, ClaimReview, ClaimStatus,
};
use crate::infrastructure::db::PgPool;

const CLAIM_COLUMNS: &str = "id, policy_id, farmer_id, claim_number, crop_under_loss, \
     date_of_loss, cause_of_loss, localized_risk, declaration, place, claim_date, claim_amount, \
     status, documents, reviewed_by, review_date, remarks, created_at";

pub struct SqlxClaimRepository {
    pub pool: PgPool,
}

impl SqlxClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn claim_from_row(r: &PgRow) -> anyhow::Result<Claim> {
    let status: String = r.try_get("status")?;
    let documents: Json<ClaimDocuments> = r.try_get("documents")?;
    Ok(Claim {
        id: r.try_get("id")?,
        policy_id: r.try_get("policy_id")?,
        farmer_id: r.try_get("farmer_id")?,
        claim_number: r.try_get("claim_number")?,
        crop_under_loss: r.try_get("crop_under_loss")?,
        date_of_loss: r.try_get("date_of_loss")?,
        cause_of_loss: r.try_get("cause_of_loss")?,
        localized_risk: r.try_get("localized_risk")?,
        declaration: r.try_get("declaration")?,
        place: r.try_get("place")?,
        claim_date: r.try_get("claim_date")?,
        claim_amount: r.try_get("claim_amount")?,
        status: parse_column("status", &status, ClaimStatus::parse)?,
        documents: documents.0,
        reviewed_by: r.try_get("reviewed_by")?,
        review_date: r.try_get("review_date")?,
        remarks: r.try_get("remarks")?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl ClaimRepository for SqlxClaimRepository {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Claim>> {
        let row = sqlx::query(&format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(claim_from_row).transpose()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Claim>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(claim_from_row).collect()
    }

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Claim>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE farmer_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(farmer_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(claim_from_row).collect()
    }

    async fn create(&self, record: &ClaimRecord) -> Result<Claim, StoreError> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO claims (policy_id, farmer_id, claim_number, crop_under_loss, date_of_loss,
                                  cause_of_loss, localized_risk, declaration, place, claim_amount,
                                  status, documents)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
               RETURNING {CLAIM_COLUMNS}"#
        ))
        .bind(record.policy_id)
        .bind(record.farmer_id)
        .bind(&record.claim_number)
        .bind(&record.crop_under_loss)
        .bind(record.date_of_loss)
        .bind(&record.cause_of_loss)
        .bind(record.localized_risk.as_deref())
        .bind(&record.declaration)
        .bind(&record.place)
        .bind(record.claim_amount)
        .bind(record.status.as_str())
        .bind(Json(&record.documents))
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(claim_from_row(&row)?)
    }

    async fn update(&self, id: Uuid, patch: &ClaimPatch) -> Result<Option<Claim>, StoreError> {
        let row = sqlx::query(&format!(
            r#"UPDATE claims SET
                 crop_under_loss = COALESCE($2, crop_under_loss),
                 date_of_loss = COALESCE($3, date_of_loss),
                 cause_of_loss = COALESCE($4, cause_of_loss),
                 localized_risk = COALESCE($5, localized_risk),
                 declaration = COALESCE($6, declaration),
                 place = COALESCE($7, place),
                 claim_amount = COALESCE($8, claim_amount),
                 status = COALESCE($9, status),
                 documents = COALESCE($10, documents),
                 remarks = COALESCE($11, remarks)
               WHERE id = $1
               RETURNING {CLAIM_COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.crop_under_loss.as_deref())
        .bind(patch.date_of_loss)
        .bind(patch.cause_of_loss.as_deref())
        .bind(patch.localized_risk.as_deref())
        .bind(patch.declaration.as_deref())
        .bind(patch.place.as_deref())
        .bind(patch.claim_amount)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.documents.as_ref().map(Json))
        .bind(patch.remarks.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.as_ref().map(claim_from_row).transpose()?)
    }

    async fn record_review(&self, id: Uuid, review: &ClaimReview) -> anyhow::Result<Option<Claim>> {
        let row = sqlx::query(&format!(
            r#"UPDATE claims SET
                 status = $2,
                 reviewed_by = $3,
                 review_date = $4,
                 remarks = COALESCE($5, remarks),
                 claim_amount = COALESCE($6, claim_amount)
               WHERE id = $1
               RETURNING {CLAIM_COLUMNS}"#
        ))
        .bind(id)
        .bind(review.status.as_str())
        .bind(review.reviewed_by)
        .bind(review.review_date)
        .bind(review.remarks.as_deref())
        .bind(review.claim_amount)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(claim_from_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM claims WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
