use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use mockall::predicate::{always, eq};
use pretty_assertions::assert_eq;
use slotbook_app::{
    dialog::FixedAnswer,
    messages,
    session::{MemoryStorage, SessionStore},
    view_models::booking::{BookingPage, PageState},
    Route,
};
use slotbook_client::mock::MockBookingService;
use slotbook_core::{
    errors::BookingError,
    evaluator::Rejection,
    models::{
        booking::{Booking, CreateBookingRequest},
        resource::Resource,
        time_slot::TimeSlot,
        user::User,
    },
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn user(id: i64, quota: u32) -> User {
    User {
        id,
        name: Some(format!("User {id}")),
        email: Some(format!("user{id}@example.com")),
        max_minutes_per_day: Some(quota),
    }
}

fn room() -> Resource {
    Resource {
        id: 7,
        name: Some("Room A".to_string()),
        interval_minutes: 15,
    }
}

fn booking(id: i64, user_id: i64, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Booking {
    Booking {
        id,
        user_id,
        user_name: None,
        resource_id: 7,
        resource_name: Some("Room A".to_string()),
        start_time: date.and_time(start),
        end_time: date.and_time(end),
        duration_minutes: (end - start).num_minutes(),
    }
}

fn created_from(request: CreateBookingRequest) -> Booking {
    Booking {
        id: 100,
        user_id: request.user_id,
        user_name: None,
        resource_id: request.resource_id,
        resource_name: Some("Room A".to_string()),
        start_time: request.start_time,
        end_time: request.end_time,
        duration_minutes: (request.end_time - request.start_time).num_minutes(),
    }
}

/// A service with one resource, the given bookings on it and for the user.
fn service(resource_bookings: Vec<Booking>, user_bookings: Vec<Booking>) -> MockBookingService {
    let mut api = MockBookingService::new();
    api.expect_list_resources().returning(|| Ok(vec![room()]));
    api.expect_bookings_for_resource()
        .returning(move |_, _| Ok(resource_bookings.clone()));
    api.expect_bookings_for_user()
        .returning(move |_| Ok(user_bookings.clone()));
    api
}

#[tokio::test]
async fn test_init_selects_first_resource_and_loads_bookings() {
    let mut api = MockBookingService::new();
    api.expect_list_resources().times(1).returning(|| {
        Ok(vec![
            room(),
            Resource {
                id: 8,
                name: None,
                interval_minutes: 30,
            },
        ])
    });
    api.expect_bookings_for_resource()
        .with(eq(7), eq(Some(day(11))))
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                booking(2, 9, day(11), at(10, 0), at(11, 0)),
                booking(1, 9, day(11), at(8, 0), at(9, 0)),
            ])
        });
    api.expect_bookings_for_user()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    assert_eq!(page.state(), PageState::NoResource);

    page.init().await;

    assert_eq!(page.selected_resource_id(), Some(7));
    assert_eq!(page.state(), PageState::Idle);
    let ids: Vec<i64> = page.derived().bookings_for_day.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(page.has_bookings_on(day(11)));
    assert_eq!(page.derived().month_label, "January 2026");
}

#[tokio::test]
async fn test_resource_load_failure_shows_message() {
    let mut api = MockBookingService::new();
    api.expect_list_resources()
        .returning(|| Err(BookingError::Transport(eyre::eyre!("connection refused"))));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.load_resources().await;

    assert_eq!(page.error_message(), Some(messages::RESOURCES_LOAD_FAILED));
    assert_eq!(page.selected_resource_id(), None);
}

#[tokio::test]
async fn test_book_and_confirm_default_slot() {
    let mut api = service(Vec::new(), Vec::new());
    api.expect_create_booking()
        .withf(|request| {
            request.user_id == 1
                && request.resource_id == 7
                && request.start_time == day(11).and_time(at(8, 0))
                && request.end_time == day(11).and_time(at(9, 0))
        })
        .times(1)
        .returning(|request| Ok(created_from(request)));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    let pending = page.request_booking().expect("default slot should be bookable");
    assert_eq!(pending.summary(), "Booking on 11 January 2026, 08:00–09:00 (Room A)");
    assert_eq!(page.state(), PageState::ConfirmationPending);

    let created = page.confirm_booking().await.expect("booking should be created");

    assert_eq!(created.duration_minutes, 60);
    assert_eq!(page.derived().bookings_for_day, vec![created.clone()]);
    assert_eq!(page.derived().my_bookings, vec![created]);
    assert_eq!(page.success_message(), Some(messages::BOOKING_CREATED));
    assert_eq!(page.state(), PageState::Idle);
    assert_eq!(page.evaluation().used_minutes, 60);
}

#[tokio::test]
async fn test_overlap_is_rejected_without_create_call() {
    let existing = booking(1, 1, day(11), at(8, 0), at(9, 0));
    let api = service(vec![existing], Vec::new());

    let mut page = BookingPage::with_today(api, user(2, 240), day(11));
    page.init().await;
    page.set_slot(TimeSlot::new(at(8, 30), at(9, 30)));

    assert!(page.evaluation().conflict);
    assert_eq!(page.request_booking().unwrap_err(), Rejection::Overlap);
    assert_eq!(
        page.error_message(),
        Some("This time slot is already taken. Choose another.")
    );
    assert!(page.pending().is_none());

    // touching the end of the existing booking is fine
    page.set_start(at(9, 0));
    page.set_end(at(10, 0));
    assert!(page.request_booking().is_ok());
}

#[tokio::test]
async fn test_quota_limits_booking_length() {
    let mine = vec![
        booking(1, 1, day(11), at(6, 0), at(8, 0)),
        booking(2, 1, day(11), at(12, 0), at(12, 40)),
    ];
    let api = service(Vec::new(), mine);

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;
    assert_eq!(page.evaluation().used_minutes, 160);
    assert_eq!(page.evaluation().remaining_minutes, 80);

    page.set_slot(TimeSlot::new(at(14, 0), at(15, 30)));
    assert_eq!(
        page.request_booking().unwrap_err(),
        Rejection::QuotaExceeded { remaining: 80 }
    );
    assert_eq!(page.error_message(), Some("You can only book 80 more minutes today."));

    page.set_end(at(15, 20));
    assert!(page.evaluation().can_book());
}

#[tokio::test]
async fn test_invalid_range_and_past_date() {
    let api = service(Vec::new(), Vec::new());
    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    page.set_slot(TimeSlot::new(at(9, 0), at(9, 0)));
    assert_eq!(page.request_booking().unwrap_err(), Rejection::InvalidRange);

    page.set_slot(TimeSlot::new(at(9, 0), at(10, 0)));
    page.select_date(day(10)).await;
    assert!(page.is_past_date(day(10)));
    assert_eq!(page.request_booking().unwrap_err(), Rejection::PastDate);
}

#[tokio::test]
async fn test_stale_reload_is_ignored() {
    let api = service(Vec::new(), Vec::new());
    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    page.select_date(day(12)).await;
    let old = page.begin_reload().unwrap();
    page.select_date(day(13)).await;
    let latest = page.begin_reload().unwrap();
    assert_eq!(page.state(), PageState::Loading);

    let late = vec![booking(5, 3, day(12), at(10, 0), at(11, 0))];
    assert!(!page.finish_reload(old, Ok(late)));
    assert_eq!(page.state(), PageState::Loading);
    assert!(page.derived().bookings_for_day.is_empty());

    let fresh = vec![booking(6, 3, day(13), at(10, 0), at(11, 0))];
    assert!(page.finish_reload(latest, Ok(fresh)));
    assert_eq!(page.state(), PageState::Idle);
    assert_eq!(page.derived().bookings_for_day[0].id, 6);
    assert_eq!(latest.date, day(13));
}

#[tokio::test]
async fn test_create_failure_prefers_server_message() {
    let mut api = service(Vec::new(), Vec::new());
    let mut calls = 0;
    api.expect_create_booking().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(BookingError::Api {
                status: 400,
                message: Some("Resource is closed on Sundays".to_string()),
            })
        } else {
            Err(BookingError::Api {
                status: 500,
                message: None,
            })
        }
    });

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    page.request_booking().unwrap();
    assert_eq!(page.confirm_booking().await, None);
    assert_eq!(page.error_message(), Some("Resource is closed on Sundays"));

    page.request_booking().unwrap();
    assert_eq!(page.confirm_booking().await, None);
    assert_eq!(page.error_message(), Some(messages::CREATE_FAILED));
    assert!(page.derived().my_bookings.is_empty());
}

#[tokio::test]
async fn test_changing_selection_discards_pending_booking() {
    // no create expectation: submitting the old snapshot would panic
    let api = service(Vec::new(), Vec::new());
    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    page.request_booking().unwrap();
    page.select_date(day(20)).await;

    assert_eq!(page.pending(), None);
    assert_eq!(page.state(), PageState::Idle);
    assert_eq!(page.confirm_booking().await, None);
    assert!(page.derived().bookings_for_day.is_empty());
    assert!(!page.has_bookings_on(day(11)));

    page.request_booking().unwrap();
    page.set_slot(TimeSlot::new(at(10, 0), at(9, 0)));
    assert_eq!(page.pending(), None);
    assert!(!page.evaluation().can_book());

    page.set_slot(TimeSlot::new(at(14, 0), at(15, 0)));
    page.request_booking().unwrap();
    page.next_month();
    assert_eq!(page.pending().map(|p| p.date), Some(day(20)));
}

#[tokio::test]
async fn test_created_booking_outside_selection_stays_off_day_list() {
    let mut api = service(Vec::new(), Vec::new());
    api.expect_create_booking().times(1).returning(|request| {
        let mut booking = created_from(request);
        booking.start_time = day(12).and_time(at(8, 0));
        booking.end_time = day(12).and_time(at(9, 0));
        Ok(booking)
    });

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;
    page.request_booking().unwrap();
    let created = page.confirm_booking().await.unwrap();

    assert!(page.derived().bookings_for_day.is_empty());
    assert!(!page.has_bookings_on(day(12)));
    assert_eq!(page.derived().my_bookings, vec![created]);
}

#[tokio::test]
async fn test_dismiss_confirmation_sends_nothing() {
    let api = service(Vec::new(), Vec::new());
    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    page.request_booking().unwrap();
    page.dismiss_confirmation();

    assert_eq!(page.state(), PageState::Idle);
    assert_eq!(page.confirm_booking().await, None);
}

#[tokio::test]
async fn test_cancel_requires_confirmation() {
    let mine = booking(3, 1, day(11), at(10, 0), at(11, 0));
    let mut api = service(vec![mine.clone()], vec![mine]);
    api.expect_delete_booking()
        .with(eq(3))
        .times(1)
        .returning(|_| Ok(()));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    assert!(!page.cancel_booking(3, &mut FixedAnswer(false)).await);
    assert_eq!(page.derived().my_bookings.len(), 1);

    let mut prompts = Vec::new();
    let mut answer = |prompt: &str| {
        prompts.push(prompt.to_string());
        true
    };
    assert!(page.cancel_booking(3, &mut answer).await);

    assert_eq!(prompts, vec!["Cancel the booking at 10:00?".to_string()]);
    assert!(page.derived().my_bookings.is_empty());
    assert!(page.derived().bookings_for_day.is_empty());
    assert_eq!(page.success_message(), Some(messages::BOOKING_CANCELLED));
}

#[tokio::test]
async fn test_cancel_failure_and_unknown_booking() {
    let mine = booking(3, 1, day(11), at(10, 0), at(11, 0));
    let mut api = service(vec![mine.clone()], vec![mine]);
    api.expect_delete_booking()
        .with(always())
        .returning(|_| Err(BookingError::Api { status: 500, message: None }));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;

    assert!(!page.cancel_booking(3, &mut FixedAnswer(true)).await);
    assert_eq!(page.error_message(), Some(messages::CANCEL_FAILED));
    assert_eq!(page.derived().my_bookings.len(), 1);

    assert!(!page.cancel_booking(42, &mut FixedAnswer(true)).await);
    assert_eq!(page.error_message(), Some(messages::booking_not_found(42).as_str()));
    assert_eq!(messages::booking_not_found(42), "Booking 42 was not found.");
}

#[tokio::test(start_paused = true)]
async fn test_success_notice_expires() {
    let mut api = service(Vec::new(), Vec::new());
    api.expect_create_booking()
        .returning(|request| Ok(created_from(request)));

    let mut page = BookingPage::with_today(api, user(1, 240), day(11));
    page.init().await;
    page.request_booking().unwrap();
    page.confirm_booking().await.unwrap();

    tokio::time::advance(Duration::from_millis(2_900)).await;
    assert_eq!(page.success_message(), Some(messages::BOOKING_CREATED));

    tokio::time::advance(Duration::from_millis(100)).await;
    assert_eq!(page.success_message(), None);
}

#[tokio::test]
async fn test_month_navigation_keeps_selection() {
    let api = service(Vec::new(), Vec::new());
    let mut page = BookingPage::with_today(api, user(1, 240), day(11));

    page.next_month();
    assert_eq!(page.derived().month_label, "February 2026");
    page.previous_month();
    page.previous_month();
    assert_eq!(page.derived().month_label, "December 2025");
    assert_eq!(page.selected_date(), day(11));

    page.show_month(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
    assert_eq!(page.current_month(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());

    page.go_to_today().await;
    assert_eq!(page.current_month(), day(1));
    assert!(page.is_today(page.selected_date()));
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let storage = MemoryStorage::new();
    let mut session = SessionStore::open(storage.clone());
    session.set_user(user(1, 240)).unwrap();

    let mut page = BookingPage::with_today(MockBookingService::new(), user(1, 240), day(11));

    assert_eq!(page.logout(&mut session).unwrap(), Route::Login);
    assert!(!session.is_logged_in());
    assert_eq!(storage.value(), None);
}
