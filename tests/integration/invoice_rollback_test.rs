// All-or-nothing guarantees: any failure during invoice construction leaves
// no invoice row, no line rows, and untouched stock.

mod support;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use aurum::core::AppError;
use aurum::invoices::models::{Invoice, InvoiceStatus, NewInvoiceLine};
use aurum::invoices::repositories::InvoiceRepository;
use aurum::invoices::services::stock::{apply_decrements, StockDecrement};

fn draft_invoice(customer_id: i64, number: &str) -> Invoice {
    let now = Utc::now();
    Invoice {
        id: 0,
        invoice_number: number.to_string(),
        customer_id,
        issue_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        due_date: None,
        total_amount: dec!(100.00),
        tax_amount: Decimal::ZERO,
        discount: Decimal::ZERO,
        final_amount: dec!(100.00),
        is_custom_order: false,
        is_repair: false,
        estimated_ready_date: None,
        deposit_amount: Decimal::ZERO,
        warranty_months: None,
        appraisal_value: None,
        status: InvoiceStatus::Pending,
        payment_method: None,
        notes: None,
        created_by: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_missing_customer_creates_nothing() {
    let pool = support::setup_pool().await;
    let product_id = support::seed_product(&pool, "Gold Ring", dec!(100.00), 10).await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        999,
        vec![support::product_entry(product_id, 1, dec!(100.00))],
    );

    let err = service.create_invoice(request).await.unwrap_err();
    assert!(matches!(err, AppError::CustomerNotFound(999)));

    assert_eq!(support::invoice_count(&pool).await, 0);
    assert_eq!(support::product_quantity(&pool, product_id).await, 10);
}

#[tokio::test]
async fn test_missing_product_reference_creates_nothing() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let good_id = support::seed_product(&pool, "Gold Ring", dec!(100.00), 10).await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        customer_id,
        vec![
            support::product_entry(good_id, 2, dec!(100.00)),
            support::product_entry(4242, 1, dec!(10.00)),
        ],
    );

    let err = service.create_invoice(request).await.unwrap_err();
    match err {
        AppError::LineItemNotFound(reference) => assert_eq!(reference, "product 4242"),
        other => panic!("expected LineItemNotFound, got {:?}", other),
    }

    // Full rollback: no header, no lines, stock of every product untouched
    assert_eq!(support::invoice_count(&pool).await, 0);
    assert_eq!(support::line_count(&pool).await, 0);
    assert_eq!(support::product_quantity(&pool, good_id).await, 10);
}

#[tokio::test]
async fn test_missing_service_reference_creates_nothing() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Mira Shah").await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        customer_id,
        vec![support::service_entry(77, 1, dec!(30.00))],
    );

    let err = service.create_invoice(request).await.unwrap_err();
    match err {
        AppError::LineItemNotFound(reference) => assert_eq!(reference, "service 77"),
        other => panic!("expected LineItemNotFound, got {:?}", other),
    }
    assert_eq!(support::invoice_count(&pool).await, 0);
}

#[tokio::test]
async fn test_invalid_pricing_creates_nothing() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Dev Patel").await;
    let product_id = support::seed_product(&pool, "Chain", dec!(100.00), 5).await;

    let service = support::invoice_service(&pool);
    let mut request = support::base_request(
        customer_id,
        vec![support::product_entry(product_id, 1, dec!(100.00))],
    );
    request.discount = dec!(150.00);

    let err = service.create_invoice(request).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidPricing(_)));

    assert_eq!(support::invoice_count(&pool).await, 0);
    assert_eq!(support::product_quantity(&pool, product_id).await, 5);
}

#[tokio::test]
async fn test_empty_cart_rejected() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;

    let service = support::invoice_service(&pool);
    let err = service
        .create_invoice(support::base_request(customer_id, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(support::invoice_count(&pool).await, 0);
}

#[tokio::test]
async fn test_failure_after_line_persistence_rolls_back_stock() {
    // Drive the repository layer directly to force a failure after the header
    // and lines are written but before commit: the stock adjuster trips on a
    // product id with no row. Dropping the transaction must undo everything.
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let product_id = support::seed_product(&pool, "Gold Ring", dec!(100.00), 10).await;

    let repo = InvoiceRepository::new(pool.clone());
    {
        let mut tx = pool.begin().await.unwrap();

        let invoice_id = repo
            .insert_with_tx(&mut tx, &draft_invoice(customer_id, "INV-20250315-120000"))
            .await
            .unwrap();

        let lines = [NewInvoiceLine {
            product_id: Some(product_id),
            service_id: None,
            is_service: false,
            quantity: 1,
            unit_price: dec!(100.00),
            total_price: dec!(100.00),
        }];
        repo.insert_lines_with_tx(&mut tx, invoice_id, &lines)
            .await
            .unwrap();

        // Lines are visible inside the transaction at this point; now fail.
        let err = apply_decrements(
            &mut tx,
            &[
                StockDecrement {
                    product_id,
                    quantity: 1,
                },
                StockDecrement {
                    product_id: 31337,
                    quantity: 1,
                },
            ],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound(31337)));

        // tx dropped here without commit
    }

    assert_eq!(support::invoice_count(&pool).await, 0);
    assert_eq!(support::line_count(&pool).await, 0);
    assert_eq!(support::product_quantity(&pool, product_id).await, 10);
}

#[tokio::test]
async fn test_duplicate_invoice_number_detected_and_rolled_back() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Mira Shah").await;

    let repo = InvoiceRepository::new(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    repo.insert_with_tx(&mut tx, &draft_invoice(customer_id, "INV-20250315-120000"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = repo
        .insert_with_tx(&mut tx, &draft_invoice(customer_id, "INV-20250315-120000"))
        .await
        .unwrap_err();
    match err {
        AppError::DuplicateInvoiceNumber(number) => {
            assert_eq!(number, "INV-20250315-120000");
        }
        other => panic!("expected DuplicateInvoiceNumber, got {:?}", other),
    }
    drop(tx);

    assert_eq!(support::invoice_count(&pool).await, 1);
}
