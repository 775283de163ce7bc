// Property-based and scenario tests for the cart pricing calculator.
//
// The calculator is a pure function: total_amount is the sum of line totals,
// tax_amount passes through untouched, final_amount is
// total + tax - discount and must never go negative.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use aurum::core::AppError;
use aurum::invoices::models::CartEntryRequest;
use aurum::invoices::services::pricing::price_cart;

fn product_entry(quantity: i64, unit_price: Decimal) -> CartEntryRequest {
    CartEntryRequest {
        product_id: Some(1),
        service_id: None,
        is_service: false,
        quantity,
        unit_price,
    }
}

fn service_entry(quantity: i64, unit_price: Decimal) -> CartEntryRequest {
    CartEntryRequest {
        product_id: None,
        service_id: Some(1),
        is_service: true,
        quantity,
        unit_price,
    }
}

proptest! {
    #[test]
    fn test_final_amount_identity(
        quantities in prop::collection::vec(1i64..50, 1..8),
        price_cents in prop::collection::vec(0i64..10_000_00, 8),
        tax_cents in 0i64..1_000_00,
    ) {
        let items: Vec<CartEntryRequest> = quantities
            .iter()
            .zip(price_cents.iter())
            .map(|(&q, &cents)| product_entry(q, Decimal::new(cents, 2)))
            .collect();
        let tax = Decimal::new(tax_cents, 2);

        let pricing = price_cart(&items, tax, Decimal::ZERO).unwrap();

        prop_assert_eq!(
            pricing.final_amount,
            pricing.total_amount + pricing.tax_amount
        );
    }

    #[test]
    fn test_total_is_sum_of_line_totals(
        quantities in prop::collection::vec(1i64..50, 1..8),
        price_cents in prop::collection::vec(0i64..10_000_00, 8),
    ) {
        let items: Vec<CartEntryRequest> = quantities
            .iter()
            .zip(price_cents.iter())
            .map(|(&q, &cents)| product_entry(q, Decimal::new(cents, 2)))
            .collect();

        let expected: Decimal = items.iter().map(|i| i.total_price()).sum();
        let pricing = price_cart(&items, Decimal::ZERO, Decimal::ZERO).unwrap();

        prop_assert_eq!(pricing.total_amount, expected);
    }

    #[test]
    fn test_tax_passes_through_untouched(
        tax_cents in 0i64..1_000_00,
    ) {
        let tax = Decimal::new(tax_cents, 2);
        let items = [product_entry(1, dec!(100.00))];

        let pricing = price_cart(&items, tax, Decimal::ZERO).unwrap();

        prop_assert_eq!(pricing.tax_amount, tax);
    }

    #[test]
    fn test_discount_never_yields_negative_final(
        discount_cents in 0i64..100_000_00,
    ) {
        let discount = Decimal::new(discount_cents, 2);
        let items = [product_entry(2, dec!(100.00))];

        match price_cart(&items, dec!(9.00), discount) {
            Ok(pricing) => prop_assert!(pricing.final_amount >= Decimal::ZERO),
            Err(AppError::InvalidPricing(_)) => {
                // Rejected exactly when discount exceeds total + tax
                prop_assert!(discount > dec!(209.00));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}

#[test]
fn test_jewelry_cart_scenario() {
    // Cart: 2 × product at 100.00 plus 1 × service at 50.00, with 9.00 tax
    // (3% CGST+SGST over the 250.00 subtotal) and no discount.
    let items = [
        product_entry(2, dec!(100.00)),
        service_entry(1, dec!(50.00)),
    ];

    let pricing = price_cart(&items, dec!(9.00), Decimal::ZERO).unwrap();

    assert_eq!(pricing.total_amount, dec!(250.00));
    assert_eq!(pricing.tax_amount, dec!(9.00));
    assert_eq!(pricing.final_amount, dec!(259.00));
}

#[test]
fn test_discount_greater_than_total_plus_tax_is_invalid_pricing() {
    let items = [product_entry(1, dec!(100.00))];
    let err = price_cart(&items, Decimal::ZERO, dec!(150.00)).unwrap_err();
    assert!(matches!(err, AppError::InvalidPricing(_)));
}

#[test]
fn test_zero_quantity_entry_is_invalid_pricing() {
    let items = [product_entry(0, dec!(10.00))];
    let err = price_cart(&items, Decimal::ZERO, Decimal::ZERO).unwrap_err();
    assert!(matches!(err, AppError::InvalidPricing(_)));
}

#[test]
fn test_no_floating_point_drift() {
    // 0.1 + 0.2 style sums stay exact in fixed point.
    let items = vec![product_entry(1, dec!(0.10)); 3];
    let pricing = price_cart(&items, Decimal::ZERO, Decimal::ZERO).unwrap();
    assert_eq!(pricing.total_amount, dec!(0.30));
}
