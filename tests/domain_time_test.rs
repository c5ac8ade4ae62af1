use chrono::{Duration, FixedOffset, TimeZone, Utc};

use ticket_desk::domain::time::{
    format_absolute_in, from_local_input_value_in, is_overdue, remaining_text,
    to_local_input_value_in,
};

#[test]
fn overdue_is_strictly_after_deadline() {
    let deadline = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();

    assert!(!is_overdue(Some(deadline), deadline - Duration::seconds(1)));
    assert!(!is_overdue(Some(deadline), deadline));
    assert!(is_overdue(Some(deadline), deadline + Duration::seconds(1)));
    assert!(!is_overdue(None, deadline));
}

#[test]
fn remaining_text_counts_down_and_clamps_at_zero() {
    let deadline = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();

    assert_eq!(
        remaining_text(Some(deadline), deadline - Duration::seconds(3723)),
        "01:02:03"
    );
    assert_eq!(remaining_text(Some(deadline), deadline), "00:00:00");
    assert_eq!(
        remaining_text(Some(deadline), deadline + Duration::minutes(5)),
        "00:00:00"
    );
    assert_eq!(
        remaining_text(Some(deadline), deadline - Duration::hours(49)),
        "49:00:00"
    );
    assert_eq!(remaining_text(None, deadline), "");
}

#[test]
fn local_input_round_trips_to_the_minute() {
    let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
    let at = Utc.with_ymd_and_hms(2025, 3, 4, 10, 15, 42).unwrap();

    let value = to_local_input_value_in(Some(at), &ist);
    assert_eq!(value, "2025-03-04T15:45");

    let parsed = from_local_input_value_in(&value, &ist).unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 4, 10, 15, 0).unwrap());
    assert_eq!(to_local_input_value_in(None, &ist), "");
}

#[test]
fn local_input_rejects_empty_and_garbage() {
    let err = from_local_input_value_in("  ", &Utc).unwrap_err();
    assert_eq!(err.to_string(), "Custom date & time is empty");
    assert!(err.is_validation());

    let err = from_local_input_value_in("tomorrow", &Utc).unwrap_err();
    assert!(err.to_string().contains("expected YYYY-MM-DDTHH:MM"));
}

#[test]
fn local_input_accepts_space_separator_and_seconds() {
    let expected = Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap();
    assert_eq!(
        from_local_input_value_in("2025-03-04 09:30", &Utc).unwrap(),
        expected
    );
    assert_eq!(
        from_local_input_value_in("2025-03-04T09:30:00", &Utc).unwrap(),
        expected
    );
}

#[test]
fn absolute_format_uses_day_month_year_and_meridiem() {
    let at = Utc.with_ymd_and_hms(2025, 1, 8, 18, 5, 0).unwrap();
    assert_eq!(format_absolute_in(Some(at), &Utc), "08-01-25 06:05 PM");
    assert_eq!(format_absolute_in(None, &Utc), "");
}
