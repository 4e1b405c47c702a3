//! # Booking View-Model
//!
//! Owns the state of the booking screen: the displayed month, the selected
//! day, resource and time range, and the bookings loaded for them.
//!
//! Every input change re-runs [`Derived::compute`], a pure function of the
//! inputs, so the calendar grid, the sorted lists and the slot evaluation
//! are never stale.
//!
//! ## Reload sequencing
//!
//! Selecting a resource or a day reloads that resource's bookings for the
//! day. Each reload carries a [`ReloadTicket`]; a response is applied only
//! if its ticket is still the latest one issued, so a slow response for an
//! old selection can never overwrite a newer one.

use chrono::{Local, NaiveDate, NaiveTime};
use slotbook_client::BookingApi;
use slotbook_core::{
    calendar::{self, Week},
    errors::BookingResult,
    evaluator::{self, Evaluation, Rejection, SlotRequest},
    models::{
        booking::{sort_by_start, Booking, CreateBookingRequest},
        resource::Resource,
        time_slot::TimeSlot,
        user::User,
    },
    time::{combine, format_clock},
};
use tracing::{debug, error, warn};

use crate::{
    dialog::Confirm,
    messages::{self, user_message},
    notice::Notice,
    routes::Route,
    session::{SessionStorage, SessionStore},
};

/// Coarse screen state, derived from the page fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    NoResource,
    Loading,
    Idle,
    ConfirmationPending,
    Submitting,
}

/// Identifies one issued reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket {
    seq: u64,
    pub resource_id: i64,
    pub date: NaiveDate,
}

/// A booking awaiting explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    pub user_id: i64,
    pub resource_id: i64,
    pub resource_name: Option<String>,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl PendingBooking {
    pub fn to_request(&self) -> CreateBookingRequest {
        CreateBookingRequest {
            user_id: self.user_id,
            resource_id: self.resource_id,
            start_time: combine(self.date, self.slot.start),
            end_time: combine(self.date, self.slot.end),
        }
    }

    /// e.g. "Booking on 11 January 2026, 08:00–09:00 (Room A)"
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Booking on {}, {}",
            calendar::long_date_label(self.date),
            self.slot.label()
        );
        if let Some(name) = &self.resource_name {
            summary.push_str(&format!(" ({})", name));
        }
        summary
    }
}

/// Values computed from the page inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Derived {
    pub calendar: Vec<Week>,
    pub month_label: String,
    pub bookings_for_day: Vec<Booking>,
    pub my_bookings: Vec<Booking>,
    pub evaluation: Evaluation,
}

impl Derived {
    pub fn compute<B: BookingApi>(page: &BookingPage<B>) -> Self {
        let mut bookings_for_day = page.resource_bookings.clone();
        sort_by_start(&mut bookings_for_day);

        let mut my_bookings = page.user_bookings.clone();
        sort_by_start(&mut my_bookings);

        let evaluation = evaluator::evaluate(&SlotRequest {
            resource_id: page.selected_resource_id,
            day: page.selected_date,
            today: page.today,
            slot: page.slot,
            resource_bookings: &page.resource_bookings,
            user_bookings: &page.user_bookings,
            daily_max: page.user.daily_quota(),
        });

        Self {
            calendar: calendar::month_grid(page.current_month),
            month_label: calendar::month_label(page.current_month),
            bookings_for_day,
            my_bookings,
            evaluation,
        }
    }
}

pub struct BookingPage<B: BookingApi> {
    api: B,
    user: User,
    today: NaiveDate,

    resources: Vec<Resource>,
    resource_bookings: Vec<Booking>,
    user_bookings: Vec<Booking>,

    current_month: NaiveDate,
    selected_date: NaiveDate,
    selected_resource_id: Option<i64>,
    slot: TimeSlot,

    is_loading: bool,
    is_loading_resource: bool,
    submitting: bool,
    error_message: Option<String>,
    notice: Option<Notice>,
    pending: Option<PendingBooking>,
    reload_seq: u64,

    derived: Derived,
}

impl<B: BookingApi> BookingPage<B> {
    pub fn new(api: B, user: User) -> Self {
        Self::with_today(api, user, Local::now().date_naive())
    }

    /// Creates the page with an explicit notion of "today".
    pub fn with_today(api: B, user: User, today: NaiveDate) -> Self {
        let start = NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default();
        let end = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
        let current_month = calendar::first_of_month(today);

        let mut page = Self {
            api,
            user,
            today,
            resources: Vec::new(),
            resource_bookings: Vec::new(),
            user_bookings: Vec::new(),
            current_month,
            selected_date: today,
            selected_resource_id: None,
            slot: TimeSlot::new(start, end),
            is_loading: false,
            is_loading_resource: false,
            submitting: false,
            error_message: None,
            notice: None,
            pending: None,
            reload_seq: 0,
            derived: Derived::default(),
        };
        page.recompute();
        page
    }

    fn recompute(&mut self) {
        self.derived = Derived::compute(self);
    }

    /// Loads resources (selecting the first one) and the user's bookings.
    pub async fn init(&mut self) {
        self.load_resources().await;
        self.load_user_bookings().await;
    }

    pub async fn load_resources(&mut self) {
        match self.api.list_resources().await {
            Ok(resources) => {
                let first = resources.first().map(|resource| resource.id);
                self.resources = resources;
                self.recompute();
                if let Some(id) = first {
                    self.select_resource(id).await;
                }
            }
            Err(e) => {
                error!("Failed to load resources: {}", e);
                self.error_message = Some(messages::RESOURCES_LOAD_FAILED.to_string());
            }
        }
    }

    pub async fn load_user_bookings(&mut self) {
        self.is_loading = true;
        match self.api.bookings_for_user(self.user.id).await {
            Ok(bookings) => self.user_bookings = bookings,
            Err(e) => error!("Failed to load bookings for user {}: {}", self.user.id, e),
        }
        self.is_loading = false;
        self.recompute();
    }

    /// Issues a new reload ticket for the current resource and day.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_reload(&mut self) -> Option<ReloadTicket> {
        let resource_id = self.selected_resource_id?;
        self.reload_seq += 1;
        self.is_loading_resource = true;
        debug!(
            "Reload #{} for resource {} on {}",
            self.reload_seq, resource_id, self.selected_date
        );
        Some(ReloadTicket {
            seq: self.reload_seq,
            resource_id,
            date: self.selected_date,
        })
    }

    /// Applies a finished reload. Returns false if the ticket was superseded.
    pub fn finish_reload(&mut self, ticket: ReloadTicket, result: BookingResult<Vec<Booking>>) -> bool {
        if ticket.seq != self.reload_seq {
            warn!(
                "Ignoring stale reload #{} (latest is #{})",
                ticket.seq, self.reload_seq
            );
            return false;
        }

        match result {
            Ok(bookings) => self.resource_bookings = bookings,
            Err(e) => error!(
                "Failed to load bookings for resource {} on {}: {}",
                ticket.resource_id, ticket.date, e
            ),
        }
        self.is_loading_resource = false;
        self.recompute();
        true
    }

    pub async fn reload(&mut self) {
        if let Some(ticket) = self.begin_reload() {
            let result = self
                .api
                .bookings_for_resource(ticket.resource_id, Some(ticket.date))
                .await;
            self.finish_reload(ticket, result);
        }
    }

    /// Drops a pending confirmation, which only holds for the selection it
    /// was opened with.
    fn selection_changed(&mut self) {
        if self.pending.take().is_some() {
            debug!("Selection changed, pending booking discarded");
        }
        self.recompute();
    }

    pub async fn select_resource(&mut self, resource_id: i64) {
        self.selected_resource_id = Some(resource_id);
        self.selection_changed();
        self.reload().await;
    }

    /// Selects a day; clears any error or success message.
    pub async fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.error_message = None;
        self.notice = None;
        self.selection_changed();
        self.reload().await;
    }

    pub fn previous_month(&mut self) {
        self.current_month = calendar::previous_month(self.current_month);
        self.recompute();
    }

    pub fn next_month(&mut self) {
        self.current_month = calendar::next_month(self.current_month);
        self.recompute();
    }

    pub fn show_month(&mut self, month: NaiveDate) {
        self.current_month = calendar::first_of_month(month);
        self.recompute();
    }

    pub async fn go_to_today(&mut self) {
        self.current_month = calendar::first_of_month(self.today);
        self.select_date(self.today).await;
    }

    pub fn set_start(&mut self, start: NaiveTime) {
        self.slot.start = start;
        self.selection_changed();
    }

    pub fn set_end(&mut self, end: NaiveTime) {
        self.slot.end = end;
        self.selection_changed();
    }

    pub fn set_slot(&mut self, slot: TimeSlot) {
        self.slot = slot;
        self.selection_changed();
    }

    /// Runs the booking policy and, if it passes, opens the confirmation step.
    ///
    /// A rejection is also stored as the inline error message.
    pub fn request_booking(&mut self) -> Result<&PendingBooking, Rejection> {
        self.recompute();

        if let Err(rejection) = self.derived.evaluation.decide() {
            debug!("Booking request rejected: {}", rejection);
            self.error_message = Some(rejection.to_string());
            return Err(rejection);
        }

        // decide() guarantees a selected resource
        let resource_id = self.selected_resource_id.ok_or(Rejection::NoResource)?;
        let pending = PendingBooking {
            user_id: self.user.id,
            resource_id,
            resource_name: self.selected_resource().and_then(|r| r.name.clone()),
            date: self.selected_date,
            slot: self.slot,
        };
        self.error_message = None;
        Ok(&*self.pending.insert(pending))
    }

    pub fn dismiss_confirmation(&mut self) {
        self.pending = None;
    }

    /// Submits the pending booking. Returns the created booking on success.
    pub async fn confirm_booking(&mut self) -> Option<Booking> {
        let Some(pending) = self.pending.take() else {
            error!("Confirmation requested without a pending booking");
            return None;
        };

        self.submitting = true;
        self.error_message = None;

        let result = self.api.create_booking(pending.to_request()).await;
        self.submitting = false;

        match result {
            Ok(booking) => {
                if self.shows(&booking) {
                    self.resource_bookings.push(booking.clone());
                }
                self.user_bookings.push(booking.clone());
                self.notice = Some(Notice::new(messages::BOOKING_CREATED));
                self.recompute();
                Some(booking)
            }
            Err(e) => {
                error!("Failed to create booking: {}", e);
                self.error_message = Some(user_message(&e, messages::CREATE_FAILED));
                None
            }
        }
    }

    /// Cancels a booking after explicit confirmation.
    ///
    /// Returns true when the booking was deleted.
    pub async fn cancel_booking<C: Confirm + ?Sized>(&mut self, booking_id: i64, confirm: &mut C) -> bool {
        let Some(booking) = self.find_booking(booking_id).cloned() else {
            self.error_message = Some(messages::booking_not_found(booking_id));
            return false;
        };

        let prompt = format!(
            "Cancel the booking at {}?",
            format_clock(booking.start_clock())
        );
        if !confirm.confirm(&prompt) {
            return false;
        }

        match self.api.delete_booking(booking.id).await {
            Ok(()) => {
                self.resource_bookings.retain(|b| b.id != booking.id);
                self.user_bookings.retain(|b| b.id != booking.id);
                self.notice = Some(Notice::new(messages::BOOKING_CANCELLED));
                self.recompute();
                true
            }
            Err(e) => {
                error!("Failed to cancel booking {}: {}", booking.id, e);
                self.error_message = Some(messages::CANCEL_FAILED.to_string());
                false
            }
        }
    }

    /// True when `booking` belongs in the selected resource's list for the
    /// selected day.
    fn shows(&self, booking: &Booking) -> bool {
        self.selected_resource_id == Some(booking.resource_id) && booking.date() == self.selected_date
    }

    fn find_booking(&self, booking_id: i64) -> Option<&Booking> {
        self.user_bookings
            .iter()
            .chain(self.resource_bookings.iter())
            .find(|booking| booking.id == booking_id)
    }

    pub fn logout<S: SessionStorage>(&mut self, session: &mut SessionStore<S>) -> BookingResult<Route> {
        session.logout()?;
        Ok(Route::Login)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn selected_resource_id(&self) -> Option<i64> {
        self.selected_resource_id
    }

    pub fn selected_resource(&self) -> Option<&Resource> {
        let id = self.selected_resource_id?;
        self.resources.iter().find(|resource| resource.id == id)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn slot(&self) -> TimeSlot {
        self.slot
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.derived.evaluation
    }

    pub fn pending(&self) -> Option<&PendingBooking> {
        self.pending.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The success notice, while it is still visible.
    pub fn success_message(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_visible())
            .map(Notice::text)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loading_resource(&self) -> bool {
        self.is_loading_resource
    }

    pub fn state(&self) -> PageState {
        if self.submitting {
            PageState::Submitting
        } else if self.pending.is_some() {
            PageState::ConfirmationPending
        } else if self.selected_resource_id.is_none() {
            PageState::NoResource
        } else if self.is_loading_resource {
            PageState::Loading
        } else {
            PageState::Idle
        }
    }

    pub fn is_selected_date(&self, date: NaiveDate) -> bool {
        date == self.selected_date
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn is_past_date(&self, date: NaiveDate) -> bool {
        evaluator::is_past_date(date, self.today)
    }

    pub fn has_bookings_on(&self, date: NaiveDate) -> bool {
        calendar::has_bookings_on(&self.resource_bookings, date)
    }
}
