//! Endpoint groups exposed by the client.

mod appointments;
mod cultural;
mod patients;

pub use appointments::AppointmentService;
pub use cultural::CulturalService;
pub use patients::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PatientService};

use serde::Serialize;

use crate::client::Request;
use crate::error::{Result, ValidationError};

/// Attaches `body` once it has passed its local checks.
fn checked_body<B: Serialize>(
    checks: std::result::Result<(), ValidationError>,
    request: Request,
    body: &B,
) -> Result<Request> {
    checks?;
    Ok(request.json(body)?)
}
