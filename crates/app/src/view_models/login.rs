//! # Login View-Model
//!
//! Form state for signing in by email or registering a new account.
//! Validation happens before any network call; a successful call stores the
//! user in the session and navigates to the booking screen.

use slotbook_client::UserApi;
use slotbook_core::models::user::{CreateUserRequest, LoginRequest, User};
use tracing::error;

use crate::{
    messages::{EMAIL_REQUIRED, LOGIN_FAILED, NAME_REQUIRED, REGISTER_FAILED},
    routes::Route,
    session::{SessionStorage, SessionStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Login,
    Register,
}

pub struct LoginPage<U: UserApi> {
    api: U,
    mode: LoginMode,
    email: String,
    name: String,
    is_loading: bool,
    error_message: Option<String>,
}

impl<U: UserApi> LoginPage<U> {
    pub fn new(api: U) -> Self {
        Self {
            api,
            mode: LoginMode::Login,
            email: String::new(),
            name: String::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::Login => LoginMode::Register,
            LoginMode::Register => LoginMode::Login,
        };
        self.error_message = None;
    }

    pub fn set_mode(&mut self, mode: LoginMode) {
        if self.mode != mode {
            self.toggle_mode();
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Validates the form and calls login or register.
    ///
    /// Returns the route to navigate to on success, `None` when the form
    /// stays on screen with an error message.
    pub async fn submit<S: SessionStorage>(&mut self, session: &mut SessionStore<S>) -> Option<Route> {
        let email = self.email.trim().to_string();
        let name = self.name.trim().to_string();

        if email.is_empty() {
            self.error_message = Some(EMAIL_REQUIRED.to_string());
            return None;
        }
        if self.mode == LoginMode::Register && name.is_empty() {
            self.error_message = Some(NAME_REQUIRED.to_string());
            return None;
        }

        self.is_loading = true;
        self.error_message = None;

        let result = match self.mode {
            LoginMode::Login => self.api.login(LoginRequest { email }).await,
            LoginMode::Register => self.api.register(CreateUserRequest { name, email }).await,
        };

        match result {
            Ok(user) => self.finish(session, user),
            Err(e) => {
                let (context, message) = match self.mode {
                    LoginMode::Login => ("Login", LOGIN_FAILED),
                    LoginMode::Register => ("Registration", REGISTER_FAILED),
                };
                error!("{} failed: {}", context, e);
                self.error_message = Some(message.to_string());
                self.is_loading = false;
                None
            }
        }
    }

    fn finish<S: SessionStorage>(&mut self, session: &mut SessionStore<S>, user: User) -> Option<Route> {
        if let Err(e) = session.set_user(user) {
            // the in-memory session is already set, only persistence failed
            error!("Failed to persist session: {}", e);
        }
        self.is_loading = false;
        Some(Route::Booking)
    }
}
