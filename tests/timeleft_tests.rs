use chrono::{DateTime, Duration, TimeZone, Utc};
use taskdue::timeleft::{
    compute_time_status, parse_deadline, REFRESH_INTERVAL, UNKNOWN_PROGRESS,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

#[test]
fn test_future_deadline_not_overdue() {
    let now = t0();
    let status = compute_time_status(now + Duration::days(3), Some(now), now);
    assert!(!status.is_overdue);
    assert!(status.remaining_ms > 0);
}

#[test]
fn test_past_deadline_overdue() {
    let now = t0();
    let status = compute_time_status(now - Duration::minutes(1), Some(now - Duration::hours(2)), now);
    assert!(status.is_overdue);
    assert!(status.remaining_ms < 0);
    assert_eq!(status.progress_ratio, 1.0);
}

#[test]
fn test_exactly_at_deadline_is_late() {
    let now = t0();
    let status = compute_time_status(now, Some(now - Duration::hours(1)), now);
    assert!(status.is_overdue);
    assert_eq!(status.display_text, "Late by 0m");
}

#[test]
fn test_pure_function_is_idempotent() {
    let now = t0();
    let deadline = now + Duration::minutes(90);
    let created = Some(now - Duration::minutes(30));
    let a = compute_time_status(deadline, created, now);
    let b = compute_time_status(deadline, created, now);
    assert_eq!(a, b);
}

#[test]
fn test_one_hour_remaining_renders_zero_minutes() {
    // Created at T0, due 90 minutes later, checked 30 minutes in.
    let created = t0();
    let deadline = created + Duration::minutes(90);
    let now = created + Duration::minutes(30);

    let status = compute_time_status(deadline, Some(created), now);
    assert_eq!(status.display_text, "1h 0m left");
    assert!((status.progress_ratio - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_late_by_all_units() {
    let now = t0();
    let deadline = now - (Duration::days(1) + Duration::hours(4) + Duration::minutes(5));
    let status = compute_time_status(deadline, Some(deadline - Duration::days(1)), now);
    assert!(status.is_overdue);
    assert_eq!(status.display_text, "Late by 1d 4h 5m");
}

#[test]
fn test_sub_hour_remaining_has_no_leading_hours() {
    let now = t0();
    let status = compute_time_status(now + Duration::minutes(45), Some(now), now);
    assert_eq!(status.display_text, "45m left");
}

#[test]
fn test_multi_day_remaining() {
    let now = t0();
    let deadline = now + Duration::days(2) + Duration::hours(3) + Duration::minutes(10);
    let status = compute_time_status(deadline, Some(now), now);
    assert_eq!(status.display_text, "2d 3h 10m left");
}

#[test]
fn test_late_text_omits_zero_minutes_after_larger_unit() {
    let now = t0();
    let status = compute_time_status(now - Duration::days(1), None, now);
    assert_eq!(status.display_text, "Late by 1d");
}

#[test]
fn test_missing_created_at_uses_fallback_ratio() {
    let now = t0();
    let status = compute_time_status(now + Duration::hours(1), None, now);
    assert!(!status.is_overdue);
    assert_eq!(status.progress_ratio, UNKNOWN_PROGRESS);
}

#[test]
fn test_created_after_deadline_uses_fallback_ratio() {
    let now = t0();
    let deadline = now + Duration::hours(1);
    let status = compute_time_status(deadline, Some(deadline + Duration::hours(1)), now);
    assert_eq!(status.progress_ratio, UNKNOWN_PROGRESS);
}

#[test]
fn test_progress_clamped_when_created_in_future() {
    // Clock skew: task "created" after now.
    let now = t0();
    let created = now + Duration::minutes(10);
    let deadline = now + Duration::minutes(20);
    let status = compute_time_status(deadline, Some(created), now);
    assert_eq!(status.progress_ratio, 0.0);
}

#[test]
fn test_refresh_interval_is_one_minute() {
    assert_eq!(REFRESH_INTERVAL.as_secs(), 60);
}

#[test]
fn test_parse_deadline_formats() {
    let expected = Utc.with_ymd_and_hms(2026, 3, 10, 18, 30, 0).unwrap();
    assert_eq!(parse_deadline("2026-03-10 18:30").unwrap(), expected);
    assert_eq!(parse_deadline("2026-03-10T18:30").unwrap(), expected);
    assert_eq!(parse_deadline("2026-03-10 18:30:00").unwrap(), expected);
    assert_eq!(parse_deadline("2026-03-10T18:30:00Z").unwrap(), expected);
}

#[test]
fn test_parse_date_only_means_end_of_day() {
    let parsed = parse_deadline("2026-03-10").unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 0).unwrap());
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_deadline("soon").is_err());
    assert!(parse_deadline("10/03/2026").is_err());
    assert!(parse_deadline("").is_err());
}
