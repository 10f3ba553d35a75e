//! Expansion must agree with an RFC 5545 implementation of the rendered rule.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use recurrence_engine::{expand_dates, to_rrule, RepeatKind, RepeatRule};
use rrule::RRuleSet;

fn rfc5545_dates(seed: NaiveDate, rule: &RepeatRule) -> Vec<NaiveDate> {
    let text = to_rrule(seed, rule).expect("repeating rule renders");
    let set: RRuleSet = text
        .parse()
        .unwrap_or_else(|err| panic!("failed to parse {text}: {err}"));
    set.all(u16::MAX)
        .dates
        .iter()
        .map(|dt| dt.date_naive())
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parity_monthly_31st() {
    let rule = RepeatRule::from_parts(RepeatKind::Monthly, 1, Some(date(2025, 12, 31))).unwrap();
    let seed = date(2025, 1, 31);
    assert_eq!(expand_dates(seed, &rule).unwrap(), rfc5545_dates(seed, &rule));
}

#[test]
fn parity_yearly_leap_day() {
    let rule = RepeatRule::from_parts(RepeatKind::Yearly, 1, Some(date(2040, 3, 1))).unwrap();
    let seed = date(2024, 2, 29);
    assert_eq!(expand_dates(seed, &rule).unwrap(), rfc5545_dates(seed, &rule));
}

fn kind_strategy() -> impl Strategy<Value = RepeatKind> {
    prop_oneof![
        Just(RepeatKind::Daily),
        Just(RepeatKind::Weekly),
        Just(RepeatKind::Monthly),
        Just(RepeatKind::Yearly),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parity_with_rrule_crate(
        year in 2000i32..2040,
        offset in 0u64..366,
        kind in kind_strategy(),
        interval in 1u32..4,
        span in 0u64..1200,
    ) {
        let seed = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap();
        let end = seed.checked_add_days(Days::new(span)).unwrap();
        let rule = RepeatRule::from_parts(kind, interval, Some(end)).unwrap();
        prop_assert_eq!(expand_dates(seed, &rule).unwrap(), rfc5545_dates(seed, &rule));
    }
}
