use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::{parse_column, store_error};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::farmers::farmer::{BankDetails, Category, Farmer, FarmerPatch, Gender, NewFarmer};
use crate::infrastructure::db::PgPool;

const FARMER_COLUMNS: &str = "id, owner_id, name, father_name, category, gender, address, \
     contact_number, aadhaar_number, bank_details, has_loan_or_kcc, created_at";

pub struct SqlxFarmerRepository {
    pub pool: PgPool,
}

impl SqlxFarmerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn farmer_from_row(r: &PgRow) -> anyhow::Result<Farmer> {
    let category: String = r.try_get("category")?;
    let gender: String = r.try_get("gender")?;
    let bank_details: Json<BankDetails> = r.try_get("bank_details")?;
    Ok(Farmer {
        id: r.try_get("id")?,
        owner_id: r.try_get("owner_id")?,
        name: r.try_get("name")?,
        father_name: r.try_get("father_name")?,
        category: parse_column("category", &category, Category::parse)?,
        gender: parse_column("gender", &gender, Gender::parse)?,
        address: r.try_get("address")?,
        contact_number: r.try_get("contact_number")?,
        aadhaar_number: r.try_get("aadhaar_number")?,
        bank_details: bank_details.0,
        has_loan_or_kcc: r.try_get("has_loan_or_kcc")?,
        created_at: r.try_get("created_at")?,
    })
}

#[async_trait]
impl FarmerRepository for SqlxFarmerRepository {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>> {
        let row = sqlx::query(&format!("SELECT {FARMER_COLUMNS} FROM farmers WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(farmer_from_row).transpose()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Farmer>> {
        let rows = sqlx::query(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(farmer_from_row).collect()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Farmer>> {
        let rows = sqlx::query(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(farmer_from_row).collect()
    }

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Farmer>> {
        let rows = sqlx::query(&format!(
            "SELECT {FARMER_COLUMNS} FROM farmers WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(farmer_from_row).collect()
    }

    async fn create(&self, owner_id: Uuid, input: &NewFarmer) -> Result<Farmer, StoreError> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO farmers (owner_id, name, father_name, category, gender, address,
                                   contact_number, aadhaar_number, bank_details, has_loan_or_kcc)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {FARMER_COLUMNS}"#
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.father_name)
        .bind(input.category.as_str())
        .bind(input.gender.as_str())
        .bind(&input.address)
        .bind(&input.contact_number)
        .bind(&input.aadhaar_number)
        .bind(Json(&input.bank_details))
        .bind(input.has_loan_or_kcc)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(farmer_from_row(&row)?)
    }

    async fn update(&self, id: Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, StoreError> {
        let row = sqlx::query(&format!(
            r#"UPDATE farmers SET
                 name = COALESCE($2, name),
                 father_name = COALESCE($3, father_name),
                 category = COALESCE($4, category),
                 gender = COALESCE($5, gender),
                 address = COALESCE($6, address),
                 contact_number = COALESCE($7, contact_number),
                 aadhaar_number = COALESCE($8, aadhaar_number),
                 bank_details = COALESCE($9, bank_details),
                 has_loan_or_kcc = COALESCE($10, has_loan_or_kcc)
               WHERE id = $1
               RETURNING {FARMER_COLUMNS}"#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.father_name.as_deref())
        .bind(patch.category.map(|c| c.as_str()))
        .bind(patch.gender.map(|g| g.as_str()))
        .bind(patch.address.as_deref())
        .bind(patch.contact_number.as_deref())
        .bind(patch.aadhaar_number.as_deref())
        .bind(patch.bank_details.as_ref().map(Json))
        .bind(patch.has_loan_or_kcc)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(row.as_ref().map(farmer_from_row).transpose()?)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM farmers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
