//! Cultural intelligence endpoints.

use chrono::NaiveDate;
use serde_json::Value;

use super::checked_body;
use crate::client::{Call, MediMate, Request};
use crate::models::{
    CurrentPrayerStatus, HalalValidationRequest, HalalValidationResponse, MalaysianState,
    PrayerTimes, TranslationRequest, TranslationResponse,
};

/// Prayer times, translation, halal validation and the cultural calendar.
///
/// ## Examples
///
/// ```rust,ignore
/// use medimate::{HalalValidationRequest, MediMate};
///
/// let client = MediMate::new("mk_live_your_key_here")?;
/// let verdict = client
///     .cultural()
///     .validate_medication(&HalalValidationRequest::new("Paracetamol 500mg"))
///     .send()
///     .await?;
/// println!("{}: {}", verdict.medication_name, verdict.halal_status);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CulturalService<'a> {
    client: &'a MediMate,
}

impl<'a> CulturalService<'a> {
    pub(crate) fn new(client: &'a MediMate) -> Self {
        Self { client }
    }

    /// Prayer times for `state`, on `date` or today.
    pub fn prayer_times(
        &self,
        state: MalaysianState,
        date: Option<NaiveDate>,
    ) -> Call<'a, PrayerTimes> {
        self.client.call(
            Request::get("cultural/prayer-times")
                .segment(state.code())
                .query_opt("date", date),
        )
    }

    /// The prayer in progress in `state` and whether now suits scheduling.
    pub fn current_prayer_status(&self, state: MalaysianState) -> Call<'a, CurrentPrayerStatus> {
        self.client.call(
            Request::get("cultural/prayer-times")
                .segment(state.code())
                .segment("current"),
        )
    }

    /// Translates healthcare text with medical terminology checks.
    pub fn translate(&self, request: &TranslationRequest) -> Call<'a, TranslationResponse> {
        self.client.prepared(checked_body(
            request.validate(),
            Request::post("cultural/translate"),
            request,
        ))
    }

    /// Checks a medication's halal status with JAKIM-recognised authorities.
    pub fn validate_medication(
        &self,
        request: &HalalValidationRequest,
    ) -> Call<'a, HalalValidationResponse> {
        self.client.prepared(checked_body(
            request.validate(),
            Request::post("cultural/halal/validate-medication"),
            request,
        ))
    }

    /// Ramadan dates and healthcare considerations for `year`.
    pub fn ramadan_info(&self, year: i32, state: Option<MalaysianState>) -> Call<'a, Value> {
        self.client.call(
            Request::get("cultural/calendar/ramadan")
                .segment(year)
                .query_opt("state", state.map(MalaysianState::code)),
        )
    }

    /// Cultural and religious events affecting scheduling in `year`.
    pub fn cultural_events(
        &self,
        year: i32,
        state: Option<MalaysianState>,
        religion: Option<&str>,
    ) -> Call<'a, Vec<Value>> {
        self.client.call(
            Request::get("cultural/calendar/events")
                .query("year", year)
                .query_opt("state", state.map(MalaysianState::code))
                .query_opt("religion", religion),
        )
    }

    pub fn supported_languages(&self) -> Call<'a, Value> {
        self.client
            .call(Request::get("cultural/languages/supported"))
    }
}
