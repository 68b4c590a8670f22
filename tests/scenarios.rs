//! End-to-end picker scenarios driven through the public API and the
//! command runner.

use chrono::NaiveDate;
use datecompare::clock::FixedClock;
use datecompare::compare;
use datecompare::script::Runner;
use datecompare::{CompareMode, DateRange, PickerEvent, PickerOptions, RangeController};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn controller(options: PickerOptions) -> RangeController {
    RangeController::new(options, Box::new(FixedClock(d(2024, 6, 15)))).unwrap()
}

fn runner(config: &str) -> Runner {
    let options = PickerOptions::from_str(config).unwrap();
    Runner::new(controller(options)).unwrap()
}

#[test]
fn derived_compare_ranges() {
    let range = DateRange::new(d(2024, 3, 10), d(2024, 3, 20));
    let cases = [
        (CompareMode::PreviousPeriod, d(2024, 2, 28), d(2024, 3, 9)),
        (CompareMode::PreviousPeriodMatchDay, d(2024, 2, 25), d(2024, 3, 6)),
        (CompareMode::SamePeriodLastYear, d(2023, 3, 10), d(2023, 3, 20)),
    ];
    for (mode, start, end) in cases {
        assert_eq!(
            compare::derive(mode, &range),
            Some(DateRange::new(start, end)),
            "{mode}"
        );
    }
    assert_eq!(compare::derive(CompareMode::Custom, &range), None);
}

#[test]
fn last7days_preset_applies() {
    let mut c = controller(PickerOptions::default());
    c.open();
    c.select_preset("last7days");
    let events = c.apply();
    assert_eq!(
        events.last(),
        Some(&PickerEvent::Apply {
            range: DateRange::new(d(2024, 6, 9), d(2024, 6, 15)),
            compare: None,
        })
    );
}

#[test]
fn reversed_clicks_commit_ordered_range() {
    let mut r = runner("");
    let out = r
        .run(
            "open
             click 2024-05-05
             show
             click 2024-05-01
             show",
        )
        .unwrap();
    assert!(out.contains(&"open, selecting from 2024-05-05, target primary".to_string()));
    assert!(out.contains(&"change 2024-05-01 2024-05-05".to_string()));
    assert!(out.contains(&"open, idle, target primary".to_string()));
}

#[test]
fn disabled_days_are_ignored() {
    let mut r = runner(
        r#"
        maxDate = "2024-06-10"
        disabledDates = ["2024-06-05"]
        "#,
    );
    let out = r
        .run("open\nclick 2024-06-05\nclick 2024-06-12\npreset last7days\nshow")
        .unwrap();
    assert_eq!(out[0], "Jun 15, 2024 - Jun 15, 2024");
    assert!(out.contains(&"open, idle, target primary".to_string()));
}

#[test]
fn custom_compare_selection() {
    let mut r = runner(
        r#"
        enableCompare = true

        [defaultValue]
        start = "2024-03-10"
        end = "2024-03-20"
        "#,
    );
    let out = r
        .run(
            "open
             mode custom
             click 2024-01-01
             click 2024-01-11
             apply",
        )
        .unwrap();
    assert_eq!(
        out,
        vec![
            "change 2024-03-10 2024-03-20 vs 2024-01-01 -",
            "change 2024-03-10 2024-03-20 vs 2024-01-01 2024-01-11",
            "change 2024-03-10 2024-03-20 vs 2024-01-01 2024-01-11",
            "apply 2024-03-10 2024-03-20 vs 2024-01-01 2024-01-11",
        ]
    );
    assert_eq!(
        r.controller().trigger_label(),
        "Mar 10, 2024 - Mar 20, 2024 vs Jan 1, 2024"
    );
}

#[test]
fn cancel_keeps_committed_range() {
    let mut r = runner("");
    let out = r
        .run(
            "open
             preset lastMonth
             cancel
             show",
        )
        .unwrap();
    assert_eq!(
        out,
        vec![
            "change 2024-05-01 2024-05-31",
            "cancel",
            "Jun 15, 2024 - Jun 15, 2024",
            "closed",
        ]
    );
}

#[test]
fn controlled_value_round_trip() {
    let mut r = runner("");
    let out = r
        .run(
            "value 2024-04-01 2024-04-07
             open
             click 2024-04-10
             click 2024-04-12
             apply
             show",
        )
        .unwrap();
    assert_eq!(out.last().map(String::as_str), Some("closed"));
    assert_eq!(
        r.controller().committed_range(),
        &DateRange::new(d(2024, 4, 10), d(2024, 4, 12))
    );
    assert!(r.controller().is_controlled());
}

#[test]
fn monday_week_from_locale() {
    let mut r = runner(r#"locale = "en-GB""#);
    let out = r.run("open\ngrid").unwrap();
    assert_eq!(out[1], "Mo  Tu  We  Th  Fr  Sa  Su");
}

#[test]
fn inverted_configured_range_is_ordered() {
    let mut r = runner(
        r#"
        [defaultValue]
        start = "2024-03-20"
        end = "2024-03-10"
        "#,
    );
    let out = r.run("show\nopen\ncompare on").unwrap();
    assert_eq!(out[0], "Mar 10, 2024 - Mar 20, 2024");
    assert_eq!(
        out.last().map(String::as_str),
        Some("change 2024-03-10 2024-03-20 vs 2024-02-28 2024-03-09")
    );
}
