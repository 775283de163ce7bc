use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::core::{money, AppError, Result};
use crate::modules::catalog::models::{JewelryService, ServiceInput, ServiceType};

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert(&self, input: ServiceInput) -> Result<JewelryService>;
    async fn find_by_id(&self, id: i64) -> Result<Option<JewelryService>>;
    async fn list(&self) -> Result<Vec<JewelryService>>;
    async fn update(&self, id: i64, input: ServiceInput) -> Result<JewelryService>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn insert(&self, input: ServiceInput) -> Result<JewelryService> {
        input.validate()?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO services (
                name, description, service_type, price, duration_days,
                requires_deposit, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.service_type.to_string())
        .bind(input.price.to_string())
        .bind(input.duration_days)
        .bind(input.requires_deposit)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Persistence("inserted service vanished".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JewelryService>> {
        let row = sqlx::query_as::<_, ServiceRow>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ServiceRow::into_service).transpose()
    }

    async fn list(&self) -> Result<Vec<JewelryService>> {
        let rows = sqlx::query_as::<_, ServiceRow>("SELECT * FROM services ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ServiceRow::into_service).collect()
    }

    async fn update(&self, id: i64, input: ServiceInput) -> Result<JewelryService> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE services SET
                name = ?, description = ?, service_type = ?, price = ?,
                duration_days = ?, requires_deposit = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.service_type.to_string())
        .bind(input.price.to_string())
        .bind(input.duration_days)
        .bind(input.requires_deposit)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("service {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("service {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let used: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invoice_lines WHERE service_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if used > 0 {
            return Err(AppError::conflict(
                "cannot delete service that has been used in invoices",
            ));
        }

        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("service {}", id)));
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    name: String,
    description: Option<String>,
    service_type: String,
    price: String,
    duration_days: Option<i64>,
    requires_deposit: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ServiceRow {
    fn into_service(self) -> Result<JewelryService> {
        let service_type = ServiceType::from_str(&self.service_type)
            .map_err(|e| AppError::Persistence(format!("services.service_type: {}", e)))?;

        Ok(JewelryService {
            id: self.id,
            name: self.name,
            description: self.description,
            service_type,
            price: money::parse_stored("services.price", &self.price)?,
            duration_days: self.duration_days,
            requires_deposit: self.requires_deposit,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
