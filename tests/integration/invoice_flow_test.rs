// End-to-end commit path: a cart becomes a durable invoice, stock moves with
// it, and the persisted amounts match the pricing calculator exactly.

mod support;

use rust_decimal_macros::dec;

use aurum::core::AppError;
use aurum::invoices::models::InvoiceStatus;
use aurum::invoices::repositories::InvoiceRepository;

#[tokio::test]
async fn test_mixed_cart_commits_with_stock_decrement() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let ring_id = support::seed_product(&pool, "Gold Ring", dec!(100.00), 10).await;
    let resize_id = support::seed_service(&pool, "Ring Resizing", dec!(50.00)).await;

    let service = support::invoice_service(&pool);
    let mut request = support::base_request(
        customer_id,
        vec![
            support::product_entry(ring_id, 2, dec!(100.00)),
            support::service_entry(resize_id, 1, dec!(50.00)),
        ],
    );
    request.tax_amount = dec!(9.00);

    let receipt = service.create_invoice(request).await.unwrap();
    assert!(receipt.invoice_number.starts_with("INV-"));

    let repo = InvoiceRepository::new(pool.clone());
    let invoice = repo.find_by_id(receipt.invoice_id).await.unwrap().unwrap();

    assert_eq!(invoice.total_amount, dec!(250.00));
    assert_eq!(invoice.tax_amount, dec!(9.00));
    assert_eq!(invoice.discount, dec!(0));
    assert_eq!(invoice.final_amount, dec!(259.00));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
    assert_eq!(invoice.customer_id, customer_id);

    // Persisted lines sum to the pre-tax total
    let lines = repo.find_lines(receipt.invoice_id).await.unwrap();
    assert_eq!(lines.len(), 2);
    let line_sum: rust_decimal::Decimal = lines.iter().map(|l| l.total_price).sum();
    assert_eq!(line_sum, invoice.total_amount);
    for line in &lines {
        assert_eq!(
            line.total_price,
            rust_decimal::Decimal::from(line.quantity) * line.unit_price
        );
    }

    // Product stock moved by exactly the line quantity; the service did not
    assert_eq!(support::product_quantity(&pool, ring_id).await, 8);
}

#[tokio::test]
async fn test_service_only_invoice_has_no_stock_effect() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Mira Shah").await;
    let bystander_id = support::seed_product(&pool, "Silver Chain", dec!(80.00), 5).await;
    let polish_id = support::seed_service(&pool, "Polishing", dec!(25.00)).await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        customer_id,
        vec![support::service_entry(polish_id, 2, dec!(25.00))],
    );

    let receipt = service.create_invoice(request).await.unwrap();

    let repo = InvoiceRepository::new(pool.clone());
    let invoice = repo.find_by_id(receipt.invoice_id).await.unwrap().unwrap();
    assert_eq!(invoice.total_amount, dec!(50.00));

    assert_eq!(support::product_quantity(&pool, bystander_id).await, 5);
}

#[tokio::test]
async fn test_oversell_goes_negative_without_floor() {
    // Known gap, preserved: the adjuster applies the decrement even past zero.
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Dev Patel").await;
    let product_id = support::seed_product(&pool, "Pendant", dec!(60.00), 1).await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        customer_id,
        vec![support::product_entry(product_id, 3, dec!(60.00))],
    );

    service.create_invoice(request).await.unwrap();
    assert_eq!(support::product_quantity(&pool, product_id).await, -2);
}

#[tokio::test]
async fn test_aggregate_resolves_names_for_rendering() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let ring_id = support::seed_product(&pool, "Gold Ring", dec!(100.00), 10).await;
    let engrave_id = support::seed_service(&pool, "Engraving", dec!(30.00)).await;

    let service = support::invoice_service(&pool);
    let request = support::base_request(
        customer_id,
        vec![
            support::product_entry(ring_id, 1, dec!(100.00)),
            support::service_entry(engrave_id, 1, dec!(30.00)),
        ],
    );
    let receipt = service.create_invoice(request).await.unwrap();

    let aggregate = service.get_invoice(receipt.invoice_id).await.unwrap();
    assert_eq!(aggregate.customer.name, "Asha Verma");
    assert_eq!(aggregate.lines.len(), 2);
    assert_eq!(aggregate.lines[0].description, "Gold Ring");
    assert!(!aggregate.lines[0].line.is_service);
    assert_eq!(aggregate.lines[1].description, "Engraving");
    assert!(aggregate.lines[1].line.is_service);
}

#[tokio::test]
async fn test_status_lifecycle_persists() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Mira Shah").await;
    let product_id = support::seed_product(&pool, "Bangle", dec!(40.00), 4).await;

    let service = support::invoice_service(&pool);
    let receipt = service
        .create_invoice(support::base_request(
            customer_id,
            vec![support::product_entry(product_id, 1, dec!(40.00))],
        ))
        .await
        .unwrap();

    let paid = service
        .update_status(receipt.invoice_id, InvoiceStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);

    // Reversal is rejected and leaves the row untouched
    let err = service
        .update_status(receipt.invoice_id, InvoiceStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let repo = InvoiceRepository::new(pool.clone());
    let invoice = repo.find_by_id(receipt.invoice_id).await.unwrap().unwrap();
    assert_eq!(invoice.status, InvoiceStatus::Paid);

    // Voiding a paid invoice is allowed and terminal
    let cancelled = service
        .update_status(receipt.invoice_id, InvoiceStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

    let err = service
        .update_status(receipt.invoice_id, InvoiceStatus::Paid)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_invoices_list_newest_first() {
    let pool = support::setup_pool().await;
    let customer_id = support::seed_customer(&pool, "Asha Verma").await;
    let product_id = support::seed_product(&pool, "Stud Earrings", dec!(75.00), 10).await;

    let service = support::invoice_service(&pool);
    let first = service
        .create_invoice(support::base_request(
            customer_id,
            vec![support::product_entry(product_id, 1, dec!(75.00))],
        ))
        .await
        .unwrap();
    let second = service
        .create_invoice(support::base_request(
            customer_id,
            vec![support::product_entry(product_id, 1, dec!(75.00))],
        ))
        .await
        .unwrap();

    assert_ne!(first.invoice_number, second.invoice_number);

    let invoices = service.list_invoices().await.unwrap();
    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0].id, second.invoice_id);
    assert_eq!(invoices[1].id, first.invoice_id);
}
