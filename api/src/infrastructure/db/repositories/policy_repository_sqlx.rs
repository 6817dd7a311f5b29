use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use super::{parse_column, store_error};
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::policies::policy::{Policy, PolicyPatch, PolicyRecord, PolicyStatus};
use crate::infrastructure::db::PgPool;

const POLICY_COLUMNS: &str = "id, farmer_id, policy_number, crop_type, area_insured, \
     sum_insured, premium, start_date, end_date, status, created_at";

pub struct SqlxPolicyRepository {
    pub pool: PgPool,
}

impl SqlxPolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn policy_from_row(r: &PgRow) -> anyhow::Result<Policy> {
    let status: String = r.try_get("status")?;
    Ok(Policy {
        id: r.try_get("id")?,
        farmer_id: r.try_get("farmer_id")?,
        policy_number: r.try_get("policy_number")?,
        crop_type: r.try_get("crop_type")?,
        area_insured: r.try_get("area_insured")?,
        sum_insured: r.try_get("sum_insured")?,
        premium: r.try_get("premium")?,
        start_date: r.try_get("start_date")?,
        end_date: r.try_get("end_date")?,
        status: parse_column("status", &status, PolicyStatus::parse)?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl PolicyRepository for SqlxPolicyRepository {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Policy>> {
        let row = sqlx::query(&format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(policy_from_row).transpose()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Policy>> {
        let rows = sqlx::query(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(policy_from_row).collect()
    }

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Policy>> {
        let rows = sqlx::query(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE farmer_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(farmer_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(policy_from_row).collect()
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Policy>> {
        let rows = sqlx::query(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(policy_from_row).collect()
    }

    async fn create(&self, record: &PolicyRecord) -> Result<Policy, StoreError> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO policies (farmer_id, policy_number, crop_type, area_insured, sum_insured,
                                    premium, start_date, end_date, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               RETURNING {POLICY_COLUMNS}"#
        ))
        .bind(record.farmer_id)
        .bind(&record.policy_number)
        .bind(&record.crop_type)
        .bind(record.area_insured)
        .bind(record.sum_insured)
        .bind(record.premium)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(policy_from_row(&row)?)
    }

    async fn update(&self, id: Uuid, patch: &PolicyPatch) -> Result<Option<Policy>, StoreError> {
        let row = sqlx::query(&format!(
            r#"UPDATE policies SET
                 crop_type = COALESCE($2, crop_type),
                 area_insured = COALESCE($3, area_insured),
                 sum_insured = COALESCE($4, sum_insured),
                 premium = COALESCE($5, premium),
                 start_date = COALESCE($6, start_date),
                 end_date = COALESCE($7, end_date),
                 status = COALESCE($8, status)
               WHERE id = $1
               RETURNING {POLICY_COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.crop_type.as_deref())
        .bind(patch.area_insured)
        .bind(patch.sum_insured)
        .bind(patch.premium)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.as_ref().map(policy_from_row).transpose()?)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
