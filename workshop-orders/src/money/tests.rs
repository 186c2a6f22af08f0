use super::*;
use crate::draft::LineItemId;
use shared::models::LineItemKind;

fn item(id: u32, kind: LineItemKind, price: Decimal, quantity: i32) -> LineItem {
    LineItem {
        id: LineItemId(id),
        kind,
        catalog_ref: id as i64,
        name: format!("item-{}", id),
        quantity,
        applied_unit_price: price,
    }
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.01 one thousand times
    let items: Vec<_> = (0..1000)
        .map(|i| item(i, LineItemKind::Part, Decimal::new(1, 2), 1))
        .collect();
    assert_eq!(compute_total(&items), Decimal::new(1000, 2));
}

#[test]
fn test_compute_total_mixed() {
    let items = vec![
        item(1, LineItemKind::Service, Decimal::new(5000, 2), 1),
        item(2, LineItemKind::Service, Decimal::new(7525, 2), 1),
        item(3, LineItemKind::Part, Decimal::new(1010, 2), 3),
    ];
    assert_eq!(compute_total(&items), Decimal::new(15555, 2));
}

#[test]
fn test_rounding_only_at_the_end() {
    // 0.005 × 3 = 0.015 → 0.02; rounding each line first would give 0.03
    let items: Vec<_> = (0..3)
        .map(|i| item(i, LineItemKind::Part, Decimal::new(5, 3), 1))
        .collect();
    assert_eq!(compute_total(&items), Decimal::new(2, 2));

    // 1.005 rounds half-up
    assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
    assert_eq!(round_money(Decimal::new(1004, 3)), Decimal::new(100, 2));
}

#[test]
fn test_empty_total_is_zero() {
    let items: Vec<LineItem> = vec![];
    assert_eq!(compute_total(&items), Decimal::ZERO);
}

#[test]
fn test_line_total_unrounded() {
    let row = item(1, LineItemKind::Part, Decimal::new(3333, 3), 3);
    assert_eq!(line_total(&row), Decimal::new(9999, 3));
}

#[test]
fn test_change_due() {
    assert_eq!(
        change_due(Decimal::new(20000, 2), Decimal::new(15000, 2)),
        Decimal::new(5000, 2)
    );
    assert_eq!(
        change_due(Decimal::new(15000, 2), Decimal::new(15000, 2)),
        Decimal::ZERO
    );
    // Never negative
    assert_eq!(
        change_due(Decimal::new(10000, 2), Decimal::new(15000, 2)),
        Decimal::ZERO
    );
}

#[test]
fn test_validate_quantity() {
    assert!(validate_quantity(1).is_ok());
    assert!(validate_quantity(MAX_QUANTITY).is_ok());
    assert!(validate_quantity(0).is_err());
    assert!(validate_quantity(-2).is_err());
    assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
}

#[test]
fn test_validate_unit_price() {
    assert!(validate_unit_price(Decimal::ZERO).is_ok());
    assert!(validate_unit_price(MAX_PRICE).is_ok());
    assert!(validate_unit_price(Decimal::new(-1, 2)).is_err());
    assert!(validate_unit_price(MAX_PRICE + Decimal::ONE).is_err());
}

#[test]
fn test_validate_payment_amount() {
    assert!(validate_payment_amount(Decimal::new(1, 2)).is_ok());
    assert!(validate_payment_amount(MAX_PAYMENT_AMOUNT).is_ok());
    assert!(matches!(
        validate_payment_amount(Decimal::ZERO),
        Err(OrderError::InvalidAmount(_))
    ));
    assert!(validate_payment_amount(Decimal::new(-5, 0)).is_err());
    assert!(validate_payment_amount(MAX_PAYMENT_AMOUNT + Decimal::new(1, 2)).is_err());
}
