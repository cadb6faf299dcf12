pub mod capacity;
pub mod ownership;
pub mod registration_workflow;
