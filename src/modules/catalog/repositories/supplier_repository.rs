use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{Supplier, SupplierInput};

pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: SupplierInput) -> Result<Supplier> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, contact_person, email, phone, address)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Persistence("inserted supplier vanished".to_string()))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(supplier)
    }

    pub async fn list(&self) -> Result<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(suppliers)
    }

    pub async fn update(&self, id: i64, input: SupplierInput) -> Result<Supplier> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                name = ?, contact_person = ?, email = ?, phone = ?, address = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("supplier {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("supplier {}", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let referenced: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE supplier_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if referenced > 0 {
            return Err(AppError::conflict(
                "cannot delete supplier with associated products",
            ));
        }

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("supplier {}", id)));
        }

        Ok(())
    }
}
