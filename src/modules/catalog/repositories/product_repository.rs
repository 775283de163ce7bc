// Product persistence. Lookup/persist operations the invoice builder depends
// on are behind the ProductRepository trait; the SQLite implementation also
// handles barcode assignment and the sold-product delete guard.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::{money, AppError, Result};
use crate::modules::catalog::models::product::{validate_barcode, BARCODE_LEN};
use crate::modules::catalog::models::{Product, ProductInput};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, input: ProductInput) -> Result<Product>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>>;
    async fn list(&self) -> Result<Vec<Product>>;
    async fn update(&self, id: i64, input: ProductInput) -> Result<Product>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Next free barcode: highest existing numeric barcode + 1, starting at
    /// 10000, zero-padded to the fixed width.
    async fn next_barcode(&self) -> Result<String> {
        let last: Option<String> = sqlx::query_scalar(
            "SELECT barcode FROM products WHERE barcode IS NOT NULL ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let mut candidate = match last.and_then(|b| b.parse::<u32>().ok()) {
            Some(n) => n + 1,
            None => 10000,
        };

        loop {
            if candidate > 99999 {
                return Err(AppError::validation("barcode space exhausted"));
            }
            let barcode = format!("{:0width$}", candidate, width = BARCODE_LEN);
            let taken: Option<i64> =
                sqlx::query_scalar("SELECT id FROM products WHERE barcode = ?")
                    .bind(&barcode)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_none() {
                return Ok(barcode);
            }
            candidate += 1;
        }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn insert(&self, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let barcode = match input.barcode.clone() {
            Some(b) => b,
            None => self.next_barcode().await?,
        };
        validate_barcode(&barcode)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, description, barcode, price, cost_price, quantity,
                material, metal_type, purity, stone_type, stone_count,
                stone_carat, weight, size, category_id, supplier_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&barcode)
        .bind(input.price.to_string())
        .bind(input.cost_price.map(|c| c.to_string()))
        .bind(input.quantity)
        .bind(&input.material)
        .bind(&input.metal_type)
        .bind(&input.purity)
        .bind(&input.stone_type)
        .bind(input.stone_count)
        .bind(input.stone_carat.map(|c| c.to_string()))
        .bind(input.weight.map(|w| w.to_string()))
        .bind(&input.size)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!("barcode '{}' already in use", barcode));
                }
            }
            AppError::from(e)
        })?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Persistence("inserted product vanished".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE barcode = ?")
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn update(&self, id: i64, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {}", id)))?;

        // Absent barcode keeps the assigned one; sold products keep their
        // label for the life of the record.
        let barcode = input.barcode.clone().or(existing.barcode);

        sqlx::query(
            r#"
            UPDATE products SET
                name = ?, description = ?, barcode = ?, price = ?, cost_price = ?,
                quantity = ?, material = ?, metal_type = ?, purity = ?,
                stone_type = ?, stone_count = ?, stone_carat = ?, weight = ?,
                size = ?, category_id = ?, supplier_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&barcode)
        .bind(input.price.to_string())
        .bind(input.cost_price.map(|c| c.to_string()))
        .bind(input.quantity)
        .bind(&input.material)
        .bind(&input.metal_type)
        .bind(&input.purity)
        .bind(&input.stone_type)
        .bind(input.stone_count)
        .bind(input.stone_carat.map(|c| c.to_string()))
        .bind(input.weight.map(|w| w.to_string()))
        .bind(&input.size)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let sold: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invoice_lines WHERE product_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if sold > 0 {
            return Err(AppError::conflict(
                "cannot delete product that has been sold",
            ));
        }

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("product {}", id)));
        }

        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    barcode: Option<String>,
    price: String,
    cost_price: Option<String>,
    quantity: i64,
    material: Option<String>,
    metal_type: Option<String>,
    purity: Option<String>,
    stone_type: Option<String>,
    stone_count: i64,
    stone_carat: Option<String>,
    weight: Option<String>,
    size: Option<String>,
    category_id: Option<i64>,
    supplier_id: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product> {
        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            barcode: self.barcode,
            price: money::parse_stored("products.price", &self.price)?,
            cost_price: money::parse_stored_opt("products.cost_price", self.cost_price.as_deref())?,
            quantity: self.quantity,
            material: self.material,
            metal_type: self.metal_type,
            purity: self.purity,
            stone_type: self.stone_type,
            stone_count: self.stone_count,
            stone_carat: money::parse_stored_opt(
                "products.stone_carat",
                self.stone_carat.as_deref(),
            )?,
            weight: money::parse_stored_opt("products.weight", self.weight.as_deref())?,
            size: self.size,
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
