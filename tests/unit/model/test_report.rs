use chrono::NaiveDate;
use moex_coupons::model::coupon::{CouponEvent, parse_coupon_rows};
use moex_coupons::model::report::{MonthLabels, build_report};
use moex_coupons::model::security::SecurityRecord;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn record(id: &str, name: &str, maturity: &str) -> SecurityRecord {
    SecurityRecord {
        id: id.to_string(),
        display_name: name.to_string(),
        maturity_date: maturity.to_string(),
        face_value: Some(dec!(1000)),
        currency_code: Some("SUR".to_string()),
        coupon_value: Decimal::ZERO,
    }
}

fn event(y: i32, m: u32, d: u32, amount: Decimal) -> CouponEvent {
    CouponEvent::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), amount)
}

#[test]
fn test_scenario_bond_a() {
    let coupons = vec![
        event(2025, 2, 15, dec!(30.0)),
        event(2025, 8, 15, dec!(30.0)),
        event(2024, 2, 15, dec!(30.0)),
    ];
    let labels = MonthLabels::english();
    let rows = build_report(&[(record("X1", "Bond A", "2026-03-01"), coupons)], 2025, &labels);

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.id, "X1");
    assert_eq!(row.display_name, "Bond A");
    assert_eq!(row.maturity_date, "2026-03-01");
    for label in labels.iter() {
        let expected = match label {
            "Feb" | "Aug" => dec!(30.0),
            _ => Decimal::ZERO,
        };
        assert_eq!(row.amount_for(label), Some(expected), "bucket {label}");
    }
    assert_eq!(row.total(), dec!(60));
}

#[test]
fn test_buckets_follow_label_order() {
    let labels = MonthLabels::russian();
    let rows = build_report(
        &[(record("A", "a", "N/A"), vec![event(2025, 12, 1, dec!(1))])],
        2025,
        &labels,
    );
    let buckets: Vec<&str> = rows[0].monthly_totals.iter().map(|b| b.label.as_str()).collect();
    let expected: Vec<&str> = labels.iter().collect();
    assert_eq!(buckets, expected);
    assert_eq!(rows[0].monthly_totals[11].amount, dec!(1));
}

#[test]
fn test_custom_labels() {
    let names: Vec<String> = (1..=12).map(|m| format!("2025-{m:02}")).collect();
    let labels = MonthLabels::new(&names).unwrap();
    let rows = build_report(
        &[(record("A", "a", "N/A"), vec![event(2025, 4, 30, dec!(7.5))])],
        2025,
        &labels,
    );
    assert_eq!(rows[0].amount_for("2025-04"), Some(dec!(7.5)));
}

#[test]
fn test_other_years_contribute_nothing() {
    let coupons = vec![event(2024, 1, 1, dec!(10)), event(2026, 6, 1, dec!(10))];
    let rows = build_report(&[(record("A", "a", "N/A"), coupons)], 2025, &MonthLabels::english());
    assert!(rows[0].amounts().all(|amount| amount.is_zero()));
}

#[test]
fn test_bucket_sums_match_random_schedules() {
    let mut rng = rand::rng();
    let labels = MonthLabels::english();

    for _ in 0..20 {
        let coupons: Vec<CouponEvent> = (0..rng.random_range(0..60))
            .map(|_| {
                event(
                    rng.random_range(2023..=2027),
                    rng.random_range(1..=12),
                    rng.random_range(1..=28),
                    Decimal::new(rng.random_range(0..1_000_000), 2),
                )
            })
            .collect();

        let mut expected = [Decimal::ZERO; 12];
        for coupon in coupons.iter().filter(|c| c.year() == 2025) {
            expected[coupon.month0()] += coupon.amount;
        }

        let rows = build_report(&[(record("A", "a", "N/A"), coupons)], 2025, &labels);
        let actual: Vec<Decimal> = rows[0].amounts().collect();
        assert_eq!(actual, expected.to_vec());
    }
}

#[test]
fn test_summation_is_order_independent() {
    let mut coupons: Vec<CouponEvent> = (1..=50)
        .map(|i| event(2025, (i % 12) + 1, 1, Decimal::new(i64::from(i) * 137, 3)))
        .collect();
    let labels = MonthLabels::english();
    let reference = build_report(&[(record("A", "a", "N/A"), coupons.clone())], 2025, &labels);

    coupons.shuffle(&mut rand::rng());
    let shuffled = build_report(&[(record("A", "a", "N/A"), coupons)], 2025, &labels);
    assert_eq!(reference, shuffled);
}

#[test]
fn test_many_small_payments_do_not_drift() {
    let coupons: Vec<CouponEvent> = (0..10_000).map(|_| event(2025, 3, 1, dec!(0.01))).collect();
    let rows = build_report(&[(record("A", "a", "N/A"), coupons)], 2025, &MonthLabels::english());
    assert_eq!(rows[0].amount_for("Mar"), Some(dec!(100.00)));
}

#[test]
fn test_build_report_is_idempotent() {
    let input = vec![
        (record("A", "a", "2030-01-01"), vec![event(2025, 1, 10, dec!(12.34))]),
        (record("B", "b", "2031-01-01"), vec![event(2025, 7, 10, dec!(0.1)), event(2025, 7, 11, dec!(0.2))]),
    ];
    let labels = MonthLabels::english();

    let first = build_report(&input, 2025, &labels);
    let second = build_report(&input, 2025, &labels);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_output_order_tracks_input_permutation() {
    let mut input: Vec<(SecurityRecord, Vec<CouponEvent>)> = (0..25)
        .map(|i| {
            (
                record(&format!("ID{i:02}"), &format!("Bond {i}"), "2030-01-01"),
                vec![event(2025, 1, 1, Decimal::from(i))],
            )
        })
        .collect();
    let labels = MonthLabels::english();

    for _ in 0..5 {
        input.shuffle(&mut rand::rng());
        let rows = build_report(&input, 2025, &labels);

        let input_ids: Vec<&str> = input.iter().map(|(r, _)| r.id.as_str()).collect();
        let output_ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(input_ids, output_ids);
        for ((_, events), row) in input.iter().zip(&rows) {
            assert_eq!(row.amount_for("Jan"), Some(events[0].amount));
        }
    }
}

#[test]
fn test_empty_input_gives_empty_report() {
    assert!(build_report(&[], 2025, &MonthLabels::english()).is_empty());
}

#[test]
fn test_bucket_overflow_saturates() {
    let rows: Vec<_> = (0..2)
        .map(|_| {
            json!({"coupondate": "2025-02-15", "value": "79228162514264337593543950335"})
                .as_object()
                .cloned()
                .unwrap()
        })
        .collect();
    let coupons = parse_coupon_rows(&rows);
    assert_eq!(coupons.len(), 2);

    let mut coupons = coupons;
    coupons.push(event(2025, 3, 1, Decimal::MAX));
    let labels = MonthLabels::english();
    let report = build_report(&[(record("X1", "Bond A", "N/A"), coupons)], 2025, &labels);

    assert_eq!(report[0].amount_for("Feb"), Some(Decimal::MAX));
    assert_eq!(report[0].amount_for("Mar"), Some(Decimal::MAX));
    assert_eq!(report[0].total(), Decimal::MAX);
}
