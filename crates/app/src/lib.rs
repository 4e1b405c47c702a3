//! # Slotbook App
//!
//! Presentation state for the booking client, independent of how it is
//! rendered.
//!
//! ## Architecture
//!
//! - **Session**: the authenticated user, mirrored to durable storage
//! - **Routes**: the two screens and the guards that choose between them
//! - **View-models**: login form and booking calendar state, driving the API clients
//! - **Dialog**: the confirmation seam the front end implements
//! - **Messages**: user-facing text for failures and notices

/// Confirmation prompts
pub mod dialog;
/// User-facing text for failures and notices
pub mod messages;
/// Transient success notices
pub mod notice;
/// Screens and navigation guards
pub mod routes;
/// Current-user session and its storage
pub mod session;
/// Login and booking screen state
pub mod view_models;

pub use routes::{resolve, Navigation, Route};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
pub use view_models::{booking::BookingPage, login::LoginPage};
