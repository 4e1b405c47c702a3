//! # Routes and Guards
//!
//! The application has two screens:
//!
//! - `/login`: guest-only; logged-in visitors are sent to `/booking`
//! - `/booking`: authenticated-only; guests are sent to `/login`
//!
//! The empty path and any unknown path redirect to `/login`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Booking,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Booking => "/booking",
        }
    }

    /// Maps a path to a route. Unmatched paths fall back to `/login`.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();

        match without_query.trim_start_matches('/') {
            "booking" => Route::Booking,
            _ => Route::Login,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up being shown.
    pub fn route(&self) -> Route {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => *route,
        }
    }
}

/// Permits `/booking` only with a session.
pub fn auth_guard(logged_in: bool) -> Navigation {
    if logged_in {
        Navigation::Allow(Route::Booking)
    } else {
        Navigation::Redirect(Route::Login)
    }
}

/// Permits `/login` only without a session.
pub fn guest_guard(logged_in: bool) -> Navigation {
    if logged_in {
        Navigation::Redirect(Route::Booking)
    } else {
        Navigation::Allow(Route::Login)
    }
}

/// Runs the guard for `route`.
pub fn navigate(route: Route, logged_in: bool) -> Navigation {
    match route {
        Route::Login => guest_guard(logged_in),
        Route::Booking => auth_guard(logged_in),
    }
}

/// Resolves a raw path to the route that is finally displayed.
pub fn resolve(path: &str, logged_in: bool) -> Route {
    navigate(Route::from_path(path), logged_in).route()
}
