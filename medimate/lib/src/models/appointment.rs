//! Appointment scheduling models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::ValidationError;
use crate::validation::{Violations, validate_time_of_day};

/// Shortest bookable appointment, in minutes.
pub const MIN_DURATION_MINUTES: u16 = 15;
/// Longest bookable appointment, in minutes.
pub const MAX_DURATION_MINUTES: u16 = 240;
/// Duration used when none is given.
pub const DEFAULT_DURATION_MINUTES: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AppointmentType {
    Consultation,
    Followup,
    Procedure,
    Emergency,
    Telemedicine,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AppointmentPriority {
    #[default]
    Routine,
    Urgent,
    Emergency,
}

fn default_duration() -> u16 {
    DEFAULT_DURATION_MINUTES
}

/// Request to book an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub patient_id: String,
    pub provider_id: String,
    pub appointment_date: NaiveDate,
    /// 24-hour `HH:MM`.
    pub appointment_time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u16,
    pub appointment_type: AppointmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_considerations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: AppointmentPriority,
}

impl AppointmentRequest {
    /// A routine appointment of the default duration.
    pub fn new(
        patient_id: impl Into<String>,
        provider_id: impl Into<String>,
        appointment_date: NaiveDate,
        appointment_time: impl Into<String>,
        appointment_type: AppointmentType,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            provider_id: provider_id.into(),
            appointment_date,
            appointment_time: appointment_time.into(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            appointment_type,
            cultural_considerations: None,
            notes: None,
            priority: AppointmentPriority::default(),
        }
    }

    pub fn duration_minutes(mut self, minutes: u16) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn priority(mut self, priority: AppointmentPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attaches scheduling constraints such as prayer-time avoidance.
    pub fn cultural_considerations(mut self, considerations: Value) -> Self {
        self.cultural_considerations = Some(considerations);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            !self.patient_id.trim().is_empty(),
            "patient_id",
            "must not be empty",
        );
        violations.check(
            !self.provider_id.trim().is_empty(),
            "provider_id",
            "must not be empty",
        );
        violations.check(
            validate_time_of_day(&self.appointment_time),
            "appointment_time",
            "must be a 24-hour HH:MM time",
        );
        violations.check(
            (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes),
            "duration_minutes",
            "must be between 15 and 240",
        );
        violations.finish()
    }
}
