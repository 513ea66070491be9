//! Appointment scheduling endpoints.

use serde_json::Value;

use super::checked_body;
use crate::client::{Call, MediMate, Request};
use crate::models::AppointmentRequest;

#[derive(Debug, Clone, Copy)]
pub struct AppointmentService<'a> {
    client: &'a MediMate,
}

impl<'a> AppointmentService<'a> {
    pub(crate) fn new(client: &'a MediMate) -> Self {
        Self { client }
    }

    /// Books an appointment. Time and duration are checked locally first.
    pub fn create(&self, appointment: &AppointmentRequest) -> Call<'a, Value> {
        self.client.prepared(checked_body(
            appointment.validate(),
            Request::post("appointments"),
            appointment,
        ))
    }

    pub fn get(&self, appointment_id: &str) -> Call<'a, Value> {
        self.client
            .call(Request::get("appointments").segment(appointment_id))
    }
}
