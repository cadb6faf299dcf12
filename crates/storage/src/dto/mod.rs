pub mod common;
pub mod dashboard;
pub mod event;
pub mod registration;
pub mod scrimmage;
