mod event;
mod registration;
mod scrimmage;

pub use event::{Event, EventType};
pub use registration::{Registration, RegistrationStatus};
pub use scrimmage::Scrimmage;
