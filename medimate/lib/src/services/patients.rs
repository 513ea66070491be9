//! Patient management endpoints.

use serde_json::Value;

use super::checked_body;
use crate::client::{Call, MediMate, Request};
use crate::error::ValidationError;
use crate::models::PatientRequest;
use crate::validation::Violations;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Largest page the API serves.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Patient registration and lookup, with PDPA 2010 consent.
#[derive(Debug, Clone, Copy)]
pub struct PatientService<'a> {
    client: &'a MediMate,
}

impl<'a> PatientService<'a> {
    pub(crate) fn new(client: &'a MediMate) -> Self {
        Self { client }
    }

    /// Registers a patient. The record is checked locally before sending.
    pub fn create(&self, patient: &PatientRequest) -> Call<'a, Value> {
        self.client.prepared(checked_body(
            patient.validate(),
            Request::post("patients"),
            patient,
        ))
    }

    pub fn get(&self, patient_id: &str) -> Call<'a, Value> {
        self.client
            .call(Request::get("patients").segment(patient_id))
    }

    /// Lists patients one page at a time; `page` starts at 1.
    pub fn list(&self, page: u32, limit: u32, search: Option<&str>) -> Call<'a, Value> {
        let request = check_page(page, limit).map(|()| {
            Request::get("patients")
                .query("page", page)
                .query("limit", limit)
                .query_opt("search", search)
        });
        self.client.prepared(request.map_err(Into::into))
    }
}

fn check_page(page: u32, limit: u32) -> Result<(), ValidationError> {
    let mut violations = Violations::default();
    violations.check(page >= 1, "page", "must be at least 1");
    violations.check(
        (1..=MAX_PAGE_LIMIT).contains(&limit),
        "limit",
        "must be between 1 and 100",
    );
    violations.finish()
}
