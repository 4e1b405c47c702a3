pub mod booking;
pub mod login;
