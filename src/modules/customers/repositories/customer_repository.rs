use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerInput};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, input: CustomerInput) -> Result<Customer>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;
    async fn list(&self) -> Result<Vec<Customer>>;
    async fn update(&self, id: i64, input: CustomerInput) -> Result<Customer>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn insert(&self, input: CustomerInput) -> Result<Customer> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                name, email, phone, address, birthdate, anniversary,
                preferences, ring_size, bracelet_size, necklace_length,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(input.birthdate)
        .bind(input.anniversary)
        .bind(&input.preferences)
        .bind(&input.ring_size)
        .bind(&input.bracelet_size)
        .bind(&input.necklace_length)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Persistence("inserted customer vanished".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn list(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(customers)
    }

    async fn update(&self, id: i64, input: CustomerInput) -> Result<Customer> {
        input.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?, email = ?, phone = ?, address = ?, birthdate = ?,
                anniversary = ?, preferences = ?, ring_size = ?,
                bracelet_size = ?, necklace_length = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(input.birthdate)
        .bind(input.anniversary)
        .bind(&input.preferences)
        .bind(&input.ring_size)
        .bind(&input.bracelet_size)
        .bind(&input.necklace_length)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("customer {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("customer {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let invoiced: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE customer_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if invoiced > 0 {
            return Err(AppError::conflict(
                "cannot delete customer with associated invoices",
            ));
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("customer {}", id)));
        }

        Ok(())
    }
}
