//! Command handlers.
//!
//! A [`Handler`] owns the API clients and the session for one invocation and
//! drives the same view-models a graphical front end would.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};
use eyre::{bail, eyre, Result};
use slotbook_app::{
    dialog::Confirm,
    routes::{navigate, resolve, Navigation, Route},
    session::{SessionStorage, SessionStore},
    view_models::login::{LoginMode, LoginPage},
    BookingPage,
};
use slotbook_client::{BookingApi, UserApi};
use slotbook_core::{calendar, models::time_slot::TimeSlot};
use tracing::{debug, error};

use crate::{commands::Command, render};

/// Asks for confirmation on a line-based terminal. Anything but `y`/`yes`
/// declines.
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", prompt)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(prompt).unwrap_or_else(|e| {
            error!("Could not read confirmation: {}", e);
            false
        })
    }
}

/// Handles a single command.
pub struct Handler<B: BookingApi, U: UserApi, S: SessionStorage> {
    bookings: B,
    users: U,
    session: SessionStore<S>,
    today: NaiveDate,
}

impl<B: BookingApi, U: UserApi, S: SessionStorage> Handler<B, U, S> {
    pub fn new(bookings: B, users: U, session: SessionStore<S>) -> Self {
        Self::with_today(bookings, users, session, Local::now().date_naive())
    }

    pub fn with_today(bookings: B, users: U, session: SessionStore<S>, today: NaiveDate) -> Self {
        Self {
            bookings,
            users,
            session,
            today,
        }
    }

    /// Runs `command`, writing its output to `out`.
    ///
    /// Failures meant for the user come back as errors carrying the
    /// user-facing message.
    pub async fn handle<C, W>(self, command: Command, confirm: &mut C, out: &mut W) -> Result<()>
    where
        C: Confirm + ?Sized,
        W: Write,
    {
        let Handler {
            bookings,
            users,
            mut session,
            today,
        } = self;
        debug!("Handling {:?}", command);

        match command {
            Command::Login { email } => {
                let mut page = LoginPage::new(users);
                page.set_email(email);
                sign_in(page, &mut session, out).await
            }
            Command::Register { name, email } => {
                let mut page = LoginPage::new(users);
                page.set_mode(LoginMode::Register);
                page.set_name(name);
                page.set_email(email);
                sign_in(page, &mut session, out).await
            }
            Command::Logout => {
                session.logout()?;
                writeln!(out, "Logged out.")?;
                Ok(())
            }
            Command::Whoami => {
                match session.current_user() {
                    Some(user) => writeln!(out, "{}", render::whoami(user))?,
                    None => writeln!(out, "Not logged in.")?,
                }
                Ok(())
            }
            Command::Open { path } => {
                let route = resolve(&path, session.is_logged_in());
                writeln!(out, "{}", route)?;
                Ok(())
            }
            Command::Resources => {
                let page = booking_page(bookings, &session, today).await?;
                writeln!(out, "{}", render::resources(page.resources(), page.selected_resource_id()))?;
                Ok(())
            }
            Command::Calendar {
                month,
                resource,
                date,
            } => {
                let mut page = booking_page(bookings, &session, today).await?;
                select(&mut page, resource, date).await?;
                if let Some(month) = month {
                    page.show_month(month);
                }

                writeln!(out, "{}", render::calendar(&page))?;
                writeln!(out)?;
                let heading = match page.selected_resource() {
                    Some(resource) => format!(
                        "{} on {}",
                        resource.display_name(),
                        calendar::long_date_label(page.selected_date())
                    ),
                    None => calendar::long_date_label(page.selected_date()),
                };
                writeln!(out, "{}", heading)?;
                writeln!(
                    out,
                    "{}",
                    render::bookings(&page.derived().bookings_for_day, "No bookings for this day.")
                )?;
                writeln!(out, "{}", render::quota(page.evaluation(), page.user()))?;
                Ok(())
            }
            Command::Book {
                start,
                end,
                resource,
                date,
            } => {
                let mut page = booking_page(bookings, &session, today).await?;
                select(&mut page, resource, date).await?;
                page.set_slot(TimeSlot::new(start, end));

                let summary = page.request_booking().map_err(|rejection| eyre!(rejection))?.summary();
                if !confirm.confirm(&format!("{}?", summary)) {
                    page.dismiss_confirmation();
                    writeln!(out, "Booking not created.")?;
                    return Ok(());
                }

                match page.confirm_booking().await {
                    Some(booking) => {
                        if let Some(message) = page.success_message() {
                            writeln!(out, "{}", message)?;
                        }
                        writeln!(out, "{}", render::booking_line(&booking))?;
                        Ok(())
                    }
                    None => Err(page_error(&page)),
                }
            }
            Command::Cancel { booking_id } => {
                let mut page = booking_page(bookings, &session, today).await?;
                if page.cancel_booking(booking_id, confirm).await {
                    if let Some(message) = page.success_message() {
                        writeln!(out, "{}", message)?;
                    }
                    Ok(())
                } else if page.error_message().is_some() {
                    Err(page_error(&page))
                } else {
                    writeln!(out, "Booking kept.")?;
                    Ok(())
                }
            }
            Command::Mine => {
                let page = booking_page(bookings, &session, today).await?;
                writeln!(
                    out,
                    "{}",
                    render::bookings(&page.derived().my_bookings, "You have no bookings.")
                )?;
                Ok(())
            }
        }
    }
}

async fn sign_in<U, S, W>(mut page: LoginPage<U>, session: &mut SessionStore<S>, out: &mut W) -> Result<()>
where
    U: UserApi,
    S: SessionStorage,
    W: Write,
{
    if let Navigation::Redirect(_) = navigate(Route::Login, session.is_logged_in()) {
        bail!("Already logged in. Run `slotbook logout` first.");
    }

    if page.submit(session).await.is_none() {
        bail!("{}", page.error_message().unwrap_or(slotbook_app::messages::LOGIN_FAILED));
    }

    if let Some(user) = session.current_user() {
        writeln!(out, "Logged in as {}.", render::whoami(user))?;
    }
    Ok(())
}

/// Opens the booking screen behind the auth guard and loads its data.
async fn booking_page<B, S>(bookings: B, session: &SessionStore<S>, today: NaiveDate) -> Result<BookingPage<B>>
where
    B: BookingApi,
    S: SessionStorage,
{
    let user = match (navigate(Route::Booking, session.is_logged_in()), session.current_user()) {
        (Navigation::Allow(_), Some(user)) => user.clone(),
        _ => bail!("Not logged in. Run `slotbook login <email>` first."),
    };

    let mut page = BookingPage::with_today(bookings, user, today);
    page.init().await;
    if let Some(message) = page.error_message() {
        bail!("{}", message);
    }
    Ok(page)
}

async fn select<B: BookingApi>(page: &mut BookingPage<B>, resource: Option<i64>, date: Option<NaiveDate>) -> Result<()> {
    if let Some(id) = resource {
        if !page.resources().iter().any(|r| r.id == id) {
            bail!("Resource {} does not exist.", id);
        }
        if page.selected_resource_id() != Some(id) {
            page.select_resource(id).await;
        }
    }
    if let Some(date) = date {
        page.show_month(date);
        page.select_date(date).await;
    }
    Ok(())
}

fn page_error<B: BookingApi>(page: &BookingPage<B>) -> eyre::Report {
    eyre!(page.error_message().unwrap_or("Something went wrong.").to_string())
}
