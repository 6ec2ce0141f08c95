use keepawake::{TimeOfDay, TimeWindow};

fn hm(hours: u32, minutes: u32) -> TimeOfDay {
    TimeOfDay::from_hms(hours, minutes, 0).unwrap()
}

#[test]
fn test_office_hours_boundaries() {
    let window: TimeWindow = "08:00-17:00".parse().unwrap();
    assert!(!window.contains(hm(7, 59)), "07:59 should be skipped");
    assert!(window.contains(hm(8, 0)), "08:00 should be allowed");
    assert!(window.contains(hm(12, 30)));
    assert!(window.contains(hm(17, 0)), "17:00 should be allowed");
    assert!(!window.contains(hm(17, 1)), "17:01 should be skipped");
}

#[test]
fn test_seconds_past_end_are_outside() {
    let window: TimeWindow = "08:00-17:00".parse().unwrap();
    assert!(!window.contains(TimeOfDay::from_hms(17, 0, 1).unwrap()));
}

#[test]
fn test_full_day_contains_everything() {
    let window = TimeWindow::FULL_DAY;
    assert!(window.contains(TimeOfDay::MIDNIGHT));
    assert!(window.contains(TimeOfDay::from_hms(23, 59, 59).unwrap()));
    assert!(!window.wraps_midnight());
}

#[test]
fn test_window_across_midnight() {
    let window: TimeWindow = "22:00-06:00".parse().unwrap();
    assert!(window.wraps_midnight());
    assert!(window.contains(hm(23, 0)));
    assert!(window.contains(hm(0, 0)));
    assert!(window.contains(hm(6, 0)));
    assert!(!window.contains(hm(6, 1)));
    assert!(!window.contains(hm(21, 59)));
}

#[test]
fn test_single_instant_window() {
    let window: TimeWindow = "12:00-12:00".parse().unwrap();
    assert!(window.contains(hm(12, 0)));
    assert!(!window.contains(hm(12, 1)));
}

#[test]
fn test_parse_formats() {
    let window: TimeWindow = "8:30-17:45:30".parse().unwrap();
    assert_eq!(window.start(), hm(8, 30));
    assert_eq!(window.end(), TimeOfDay::from_hms(17, 45, 30).unwrap());

    let window: TimeWindow = " 09:00 - 18:00 ".parse().unwrap();
    assert_eq!(window.to_string(), "09:00-18:00");
}

#[test]
fn test_parse_rejects_malformed_ranges() {
    for input in [
        "",
        "09:00",
        "09:00-",
        "-18:00",
        "09:00-12:00-18:00",
        "09:00_18:00",
        "24:00-24:00",
        "23:00-24:01",
        "25:00-26:00",
        "09:60-10:00",
        "9am-5pm",
        "09-18",
    ] {
        assert!(
            input.parse::<TimeWindow>().is_err(),
            "Should reject {:?}",
            input
        );
    }
}

#[test]
fn test_from_naive_time() {
    let time = chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap();
    assert_eq!(TimeOfDay::from_naive_time(time), hm(17, 0));
}
