// Referential integrity guards: deleting an entity that other records
// reference must fail and leave the entity untouched.

mod support;

use rust_decimal_macros::dec;

use aurum::catalog::repositories::{
    CategoryRepository, ProductRepository, ServiceRepository, SqliteProductRepository,
    SqliteServiceRepository, SupplierRepository,
};
use aurum::core::AppError;
use aurum::customers::repositories::{CustomerRepository, SqliteCustomerRepository};

#[tokio::test]
async fn test_category_with_products_cannot_be_deleted() {
    let pool = support::setup_pool().await;
    let category_id = support::seed_category(&pool, "Rings").await;

    let mut input = support::product_input("Gold Ring", dec!(100.00), 3);
    input.category_id = Some(category_id);
    let products = SqliteProductRepository::new(pool.clone());
    products.insert(input).await.unwrap();

    let categories = CategoryRepository::new(pool.clone());
    let err = categories.delete(category_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Still there
    assert!(categories.find_by_id(category_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_empty_category_can_be_deleted() {
    let pool = support::setup_pool().await;
    let category_id = support::seed_category(&pool, "Empty Tray").await;

    let categories = CategoryRepository::new(pool.clone());
    categories.delete(category_id).await.unwrap();
    assert!(categories.find_by_id(category_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_supplier_with_products_cannot_be_deleted() {
    let pool = support::setup_pool().await;
    let supplier_id = support::seed_supplier(&pool, "Sona Gold Wholesale").await;

    let mut input = support::product_input("Chain", dec!(80.00), 2);
    input.supplier_id = Some(supplier_id);
    SqliteProductRepository::new(pool.clone())
        .insert(input)
        .await
        .unwrap();

    let suppliers = SupplierRepository::new(pool.clone());
    let err = suppliers.delete(supplier_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(suppliers.find_by_id(supplier_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_customer_with_invoices_cannot_be_deleted() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let product_id = support::seed_product(&pool, "Pendant", dec!(60.00), 5).await;

    support::invoice_service(&pool)
        .create_invoice(support::base_request(
            customer_id,
            vec![support::product_entry(product_id, 1, dec!(60.00))],
        ))
        .await
        .unwrap();

    let customers = SqliteCustomerRepository::new(pool.clone());
    let err = customers.delete(customer_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(customers.find_by_id(customer_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_sold_product_cannot_be_deleted() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Mira Shah").await;
    let product_id = support::seed_product(&pool, "Bangle", dec!(40.00), 5).await;

    support::invoice_service(&pool)
        .create_invoice(support::base_request(
            customer_id,
            vec![support::product_entry(product_id, 1, dec!(40.00))],
        ))
        .await
        .unwrap();

    let products = SqliteProductRepository::new(pool.clone());
    let err = products.delete(product_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(products.find_by_id(product_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_unsold_product_can_be_deleted() {
    let pool = support::setup_pool().await;
    let product_id = support::seed_product(&pool, "Display Piece", dec!(10.00), 1).await;

    let products = SqliteProductRepository::new(pool.clone());
    products.delete(product_id).await.unwrap();
    assert!(products.find_by_id(product_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_used_service_cannot_be_deleted() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Dev Patel").await;
    let service_id = support::seed_service(&pool, "Engraving", dec!(30.00)).await;

    support::invoice_service(&pool)
        .create_invoice(support::base_request(
            customer_id,
            vec![support::service_entry(service_id, 1, dec!(30.00))],
        ))
        .await
        .unwrap();

    let services = SqliteServiceRepository::new(pool.clone());
    let err = services.delete(service_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(services.find_by_id(service_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_deleting_missing_rows_reports_not_found() {
    let pool = support::setup_pool().await;

    let err = CategoryRepository::new(pool.clone())
        .delete(99)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = SqliteProductRepository::new(pool.clone())
        .delete(99)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
