use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::event::EventResponse;
use super::registration::RegistrationResponse;
use super::scrimmage::ScrimmageResponse;

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// Leave out scrimmages and events that have already taken place
    #[serde(default)]
    pub hide_past: bool,
}

/// Everything the caller owns, plus the registrations they have made
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub scrimmages: Vec<ScrimmageResponse>,
    pub events: Vec<EventResponse>,
    pub registrations: Vec<RegistrationResponse>,
    pub upcoming_count: usize,
    pub past_count: usize,
}
