use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use slotbook_core::models::{
    booking::{sort_by_start, Booking, CreateBookingRequest},
    resource::Resource,
    time_slot::TimeSlot,
    user::{CreateUserRequest, LoginRequest, User, DEFAULT_DAILY_MINUTES},
};

fn booking(id: i64, start: &str, end: &str) -> Booking {
    from_str(
        &json!({
            "id": id,
            "userId": 1,
            "userName": "Ana",
            "resourceId": 3,
            "resourceName": "Room A",
            "startTime": start,
            "endTime": end,
            "durationMinutes": 60
        })
        .to_string(),
    )
    .expect("Failed to deserialize booking")
}

#[test]
fn test_booking_reads_server_payload() {
    let booking = booking(5, "2026-01-11T08:00:00", "2026-01-11T09:00:00");

    assert_eq!(booking.id, 5);
    assert_eq!(booking.resource_id, 3);
    assert_eq!(booking.date(), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
    assert_eq!(booking.start_clock().to_string(), "08:00:00");
    assert_eq!(booking.duration_minutes, 60);
}

#[test]
fn test_booking_tolerates_fractional_seconds_and_null_names() {
    let raw = json!({
        "id": 9,
        "userId": 4,
        "userName": null,
        "resourceId": 2,
        "resourceName": null,
        "startTime": "2026-03-02T10:15:00.000",
        "endTime": "2026-03-02T10:45:00",
        "durationMinutes": 30
    });
    let booking: Booking = serde_json::from_value(raw).expect("Failed to deserialize booking");

    assert_eq!(booking.user_label(), "#4");
    assert_eq!(booking.resource_label(), "#2");
    assert_eq!(booking.end_clock().to_string(), "10:45:00");
}

#[test]
fn test_create_booking_request_wire_shape() {
    let date = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
    let request = CreateBookingRequest {
        user_id: 1,
        resource_id: 3,
        start_time: date.and_hms_opt(14, 30, 0).unwrap(),
        end_time: date.and_hms_opt(15, 0, 0).unwrap(),
    };

    let value = to_value(&request).expect("Failed to serialize create booking request");

    assert_eq!(
        value,
        json!({
            "userId": 1,
            "resourceId": 3,
            "startTime": "2026-01-11T14:30:00",
            "endTime": "2026-01-11T15:00:00"
        })
    );
}

#[rstest]
#[case(json!({"id": 1, "name": "Ana", "email": "ana@example.com", "maxMinutesPerDay": 120}), 120)]
#[case(json!({"id": 2, "name": "Bo", "email": "bo@example.com"}), DEFAULT_DAILY_MINUTES)]
fn test_user_daily_quota(#[case] raw: serde_json::Value, #[case] expected: u32) {
    let user: User = serde_json::from_value(raw).expect("Failed to deserialize user");
    assert_eq!(user.daily_quota(), expected);
}

#[test]
fn test_user_round_trips_through_storage_json() {
    let user = User {
        id: 7,
        name: Some("Ana".to_string()),
        email: Some("ana@example.com".to_string()),
        max_minutes_per_day: Some(240),
    };

    let json = serde_json::to_string(&user).expect("Failed to serialize user");
    assert!(json.contains("\"maxMinutesPerDay\":240"));

    let restored: User = from_str(&json).expect("Failed to deserialize user");
    assert_eq!(restored, user);
}

#[test]
fn test_login_and_register_bodies() {
    let login = to_value(LoginRequest {
        email: "ana@example.com".to_string(),
    })
    .unwrap();
    let register = to_value(CreateUserRequest {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
    })
    .unwrap();

    assert_eq!(login, json!({"email": "ana@example.com"}));
    assert_eq!(register, json!({"name": "Ana", "email": "ana@example.com"}));
}

#[test]
fn test_resource_display_name() {
    let named: Resource =
        serde_json::from_value(json!({"id": 1, "name": "Projector", "intervalMinutes": 15})).unwrap();
    let unnamed: Resource =
        serde_json::from_value(json!({"id": 2, "name": null, "intervalMinutes": 30})).unwrap();

    assert_eq!(named.display_name(), "Projector");
    assert_eq!(named.interval_minutes, 15);
    assert_eq!(unnamed.display_name(), "#2");
}

#[test]
fn test_sort_by_start() {
    let mut bookings = vec![
        booking(1, "2026-01-11T10:00:00", "2026-01-11T11:00:00"),
        booking(2, "2026-01-11T08:00:00", "2026-01-11T09:00:00"),
        booking(3, "2026-01-11T09:00:00", "2026-01-11T10:00:00"),
    ];

    sort_by_start(&mut bookings);

    let ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[rstest]
#[case("08:00", "09:00", true, 60)]
#[case("09:00", "09:00", false, 0)]
#[case("10:00", "09:30", false, 0)]
#[case("06:15", "22:45", true, 990)]
fn test_time_slot_validity_and_duration(
    #[case] start: &str,
    #[case] end: &str,
    #[case] valid: bool,
    #[case] duration: i64,
) {
    let slot = TimeSlot::parse(start, end).expect("Failed to parse slot");

    assert_eq!(slot.is_valid(), valid);
    assert_eq!(slot.duration_minutes(), duration);
}

#[test]
fn test_time_slot_label() {
    let slot = TimeSlot::parse("08:00", "09:30").unwrap();
    assert_eq!(slot.label(), "08:00–09:30");
}
