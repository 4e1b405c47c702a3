pub mod booking;
pub mod resource;
pub mod time_slot;
pub mod user;
