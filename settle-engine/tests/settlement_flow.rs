//! End-to-end settlement flows: keypad → session → commit → refund.

use rust_decimal_macros::dec;
use settle_engine::money::to_f64;
use settle_engine::{
    commit_payment, pricing, refund_line, CollectionRecord, DiscountSpec, Key, OrderLine,
    PaymentMethod, PaymentSession, SettleError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("settle_engine=debug")
        .with_test_writer()
        .try_init();
}

fn collected(records: &[CollectionRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

#[test]
fn scenario_all_then_commit_settles_table() {
    init_tracing();
    // One line 50 x 3, no discount. "All" → 150 and a full selection.
    let mut lines = vec![OrderLine::new("t10-1", "t10", "Mezze", 50.0, 3.0, None, None).unwrap()];
    let mut session = PaymentSession::new("t10");

    session.press(Key::All, &lines, 0.0);
    assert_eq!(session.entered_amount(), "150");
    assert_eq!(session.selection().entries().len(), 1);
    assert_eq!(session.selection().selected_quantity("t10-1"), 3.0);

    let record = commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();
    assert_eq!(record.amount, 150.0);
    assert!(lines[0].is_settled());
    assert_eq!(
        pricing::remaining_amount(&lines, collected(&[record])),
        dec!(0)
    );
}

#[test]
fn scenario_equal_split_in_two() {
    init_tracing();
    // Same table; "1/n" then "2" → 75; after committing one share the
    // remaining payable is 75.
    let mut lines = vec![OrderLine::new("t11-1", "t11", "Mezze", 50.0, 3.0, None, None).unwrap()];
    let mut session = PaymentSession::new("t11");

    session.press(Key::EqualSplit, &lines, 0.0);
    session.press(Key::Digit(2), &lines, 0.0);
    assert_eq!(session.entered_amount(), "75");

    let first = commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();
    assert!(first.is_amount_only());
    assert_eq!(
        pricing::remaining_amount(&lines, collected(&[first.clone()])),
        dec!(75)
    );

    // Second payer takes the rest
    let paid = collected(&[first]);
    session.press(Key::EqualSplit, &lines, paid);
    session.press(Key::Digit(1), &lines, paid);
    assert_eq!(session.entered_amount(), "75");
    let second = commit_payment(&mut lines, &mut session, PaymentMethod::CreditCard, "cashier")
        .unwrap();
    assert_eq!(second.amount, 75.0);
}

#[test]
fn equal_split_conserves_the_table_total() {
    init_tracing();
    // Three payers, decreasing divisor each round; shares must sum to
    // the exact table total with no lost or invented currency.
    let mut lines = vec![OrderLine::new("t12-1", "t12", "Set", 100.0, 1.0, None, None).unwrap()];
    let mut session = PaymentSession::new("t12");
    let mut records: Vec<CollectionRecord> = Vec::new();

    for divisor in (1..=3u8).rev() {
        let paid = collected(&records);
        session.press(Key::EqualSplit, &lines, paid);
        session.press(Key::Digit(divisor), &lines, paid);
        let record =
            commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();
        records.push(record);
    }

    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![33.0, 34.0, 33.0]);
    assert_eq!(collected(&records), 100.0);
    assert_eq!(
        pricing::remaining_amount(&lines, collected(&records)),
        dec!(0)
    );
}

#[test]
fn discounted_refund_scenario() {
    init_tracing();
    // unit 80, 25% off, 2 paid: refunding one unit returns 60.
    let mut line = OrderLine::new(
        "t13-1",
        "t13",
        "Adana",
        80.0,
        2.0,
        Some(DiscountSpec::Percentage(25.0)),
        None,
    )
    .unwrap();
    line.paid_quantity = 2.0;

    let refund = refund_line(&mut line, 1.0, PaymentMethod::Cash, "cashier").unwrap();
    assert_eq!(refund.amount, -60.0);
    assert_eq!(line.paid_quantity, 1.0);

    // A second identical refund exceeds what remains settled
    let again = refund_line(&mut line, 2.0, PaymentMethod::Cash, "cashier");
    assert!(matches!(
        again,
        Err(SettleError::InvalidRefundQuantity { .. })
    ));
}

#[test]
fn conservation_across_commits_and_refunds() {
    init_tracing();
    let mut lines = vec![
        OrderLine::new("t14-1", "t14", "Pide", 30.0, 4.0, None, None).unwrap(),
        OrderLine::new(
            "t14-2",
            "t14",
            "Cola",
            5.0,
            6.0,
            Some(DiscountSpec::FixedAmount(1.0)),
            None,
        )
        .unwrap(),
    ];
    let mut session = PaymentSession::new("t14");

    // Pay two pide and three cola
    session.selection_mut().toggle(&lines, "t14-1", 2.0);
    session.selection_mut().toggle(&lines, "t14-2", 3.0);
    assert_eq!(session.entered_amount(), "72");
    commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();

    // Refund one cola, then pay the rest
    refund_line(&mut lines[1], 1.0, PaymentMethod::Cash, "cashier").unwrap();
    assert_eq!(lines[1].paid_quantity, 2.0);

    session.press(Key::All, &lines, 72.0 - 4.0);
    commit_payment(&mut lines, &mut session, PaymentMethod::BankTransfer, "cashier").unwrap();

    for line in &lines {
        assert!(line.paid_quantity >= 0.0);
        assert!(line.paid_quantity <= line.quantity);
        assert!(line.is_settled());
    }
}

#[test]
fn divided_line_settles_share_by_share() {
    init_tracing();
    // 60 split into 4 shares of 15 each
    let mut lines =
        vec![OrderLine::new("t15-1", "t15", "Platter", 60.0, 1.0, None, Some(4)).unwrap()];
    let step = lines[0].share_quantity();
    let mut session = PaymentSession::new("t15");

    for _ in 0..4 {
        session.selection_mut().toggle(&lines, "t15-1", step);
        assert_eq!(session.entered_amount(), "15");
        commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();
    }
    assert!(lines[0].is_settled());

    // A fifth share has nothing left to select
    session.selection_mut().toggle(&lines, "t15-1", step);
    assert!(session.selection().is_empty());
}

#[test]
fn typed_amount_commits_without_allocation() {
    init_tracing();
    let mut lines = vec![OrderLine::new("t16-1", "t16", "Raki", 25.0, 2.0, None, None).unwrap()];
    let mut session = PaymentSession::new("t16");

    for key in [Key::Digit(2), Key::Digit(0), Key::Dot, Key::Digit(5)] {
        session.press(key, &lines, 0.0);
    }
    assert_eq!(session.entered_amount(), "20.5");

    let record = commit_payment(&mut lines, &mut session, PaymentMethod::Cash, "cashier").unwrap();
    assert!(record.is_amount_only());
    assert_eq!(record.amount, 20.5);
    assert_eq!(lines[0].paid_quantity, 0.0);
    assert_eq!(to_f64(pricing::remaining_amount(&lines, 20.5)), 29.5);
}
