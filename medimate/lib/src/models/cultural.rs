//! Cultural intelligence models: states, languages, prayer times,
//! translation and halal validation.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::ValidationError;
use crate::validation::Violations;

/// Malaysian states and federal territories, identified by their API codes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum MalaysianState {
    #[serde(rename = "KUL")]
    #[strum(serialize = "KUL")]
    KualaLumpur,
    #[serde(rename = "SGR")]
    #[strum(serialize = "SGR")]
    Selangor,
    #[serde(rename = "JHR")]
    #[strum(serialize = "JHR")]
    Johor,
    #[serde(rename = "PNG")]
    #[strum(serialize = "PNG")]
    Penang,
    #[serde(rename = "PRK")]
    #[strum(serialize = "PRK")]
    Perak,
    #[serde(rename = "PHG")]
    #[strum(serialize = "PHG")]
    Pahang,
    #[serde(rename = "TRG")]
    #[strum(serialize = "TRG")]
    Terengganu,
    #[serde(rename = "KTN")]
    #[strum(serialize = "KTN")]
    Kelantan,
    #[serde(rename = "PLS")]
    #[strum(serialize = "PLS")]
    Perlis,
    #[serde(rename = "KDH")]
    #[strum(serialize = "KDH")]
    Kedah,
    #[serde(rename = "MLK")]
    #[strum(serialize = "MLK")]
    Melaka,
    #[serde(rename = "NSN")]
    #[strum(serialize = "NSN")]
    NegeriSembilan,
    #[serde(rename = "SWK")]
    #[strum(serialize = "SWK")]
    Sarawak,
    #[serde(rename = "SBH")]
    #[strum(serialize = "SBH")]
    Sabah,
    #[serde(rename = "LBN")]
    #[strum(serialize = "LBN")]
    Labuan,
    #[serde(rename = "PJY")]
    #[strum(serialize = "PJY")]
    Putrajaya,
}

impl MalaysianState {
    /// The three-letter code used in paths and headers.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// The state's common English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::KualaLumpur => "Kuala Lumpur",
            Self::Selangor => "Selangor",
            Self::Johor => "Johor",
            Self::Penang => "Penang",
            Self::Perak => "Perak",
            Self::Pahang => "Pahang",
            Self::Terengganu => "Terengganu",
            Self::Kelantan => "Kelantan",
            Self::Perlis => "Perlis",
            Self::Kedah => "Kedah",
            Self::Melaka => "Melaka",
            Self::NegeriSembilan => "Negeri Sembilan",
            Self::Sarawak => "Sarawak",
            Self::Sabah => "Sabah",
            Self::Labuan => "Labuan",
            Self::Putrajaya => "Putrajaya",
        }
    }
}

/// Languages supported for Malaysian healthcare communication.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum SupportedLanguage {
    #[serde(rename = "ms")]
    #[strum(serialize = "ms")]
    Malay,
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[serde(rename = "zh")]
    #[strum(serialize = "zh")]
    Chinese,
    #[serde(rename = "ta")]
    #[strum(serialize = "ta")]
    Tamil,
}

impl SupportedLanguage {
    /// The ISO 639-1 code.
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// Halal certification status of a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HalalStatus {
    Halal,
    Haram,
    /// Doubtful; requires further review.
    Mushbooh,
    Unknown,
}

/// Whether the current moment suits healthcare scheduling around prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchedulingStatus {
    Optimal,
    Caution,
    Avoid,
}

/// Confidence level of a halal assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Prayer times for one state and day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub state_code: MalaysianState,
    pub state_name: String,
    pub date: NaiveDate,
    /// Prayer name to 24-hour `HH:MM` time.
    pub prayer_times: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthcare_considerations: Option<Value>,
}

/// Prayer status at the moment of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrayerStatus {
    pub current_time: DateTime<FixedOffset>,
    pub current_prayer: String,
    pub next_prayer: Value,
    pub is_prayer_time: bool,
    pub healthcare_scheduling_status: SchedulingStatus,
}

/// Request to translate healthcare text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: SupportedLanguage,
    pub source_language: SupportedLanguage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl TranslationRequest {
    /// Translates `text` from English into `target_language`.
    pub fn new(text: impl Into<String>, target_language: SupportedLanguage) -> Self {
        Self {
            text: text.into(),
            target_language,
            source_language: SupportedLanguage::English,
            context: None,
        }
    }

    /// Sets the source language.
    pub fn from_language(mut self, source_language: SupportedLanguage) -> Self {
        self.source_language = source_language;
        self
    }

    /// Sets the translation context (domain, urgency, ...).
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(!self.text.trim().is_empty(), "text", "must not be empty");
        violations.finish()
    }
}

/// Translated healthcare text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: SupportedLanguage,
    pub target_language: SupportedLanguage,
    /// Between 0 and 1.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_notes: Option<Vec<String>>,
    pub medical_accuracy_validated: bool,
}

/// Request to check a medication for halal compliance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HalalValidationRequest {
    pub medication_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl HalalValidationRequest {
    pub fn new(medication_name: impl Into<String>) -> Self {
        Self {
            medication_name: medication_name.into(),
            ..Default::default()
        }
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn active_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    pub fn batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.batch_number = Some(batch_number.into());
        self
    }

    pub fn expiry_date(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            !self.medication_name.trim().is_empty(),
            "medication_name",
            "must not be empty",
        );
        violations.finish()
    }
}

/// Halal certification details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalalCertification {
    pub certified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

/// Result of a halal medication check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalalValidationResponse {
    pub medication_name: String,
    pub halal_status: HalalStatus,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<HalalCertification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_analysis: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Value>>,
}

impl HalalValidationResponse {
    /// Returns `true` only for a definite halal verdict.
    pub fn is_halal(&self) -> bool {
        self.halal_status == HalalStatus::Halal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_state_codes_round_trip_through_strum_and_serde() {
        assert_eq!(MalaysianState::iter().count(), 16);
        for state in MalaysianState::iter() {
            assert_eq!(state.code().len(), 3);
            assert_eq!(state.code().parse::<MalaysianState>().unwrap(), state);
            assert_eq!(serde_json::to_value(state).unwrap(), json!(state.code()));
        }
        assert_eq!(
            "kul".parse::<MalaysianState>().unwrap(),
            MalaysianState::KualaLumpur
        );
        assert_eq!(MalaysianState::NegeriSembilan.name(), "Negeri Sembilan");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(SupportedLanguage::Malay.code(), "ms");
        assert_eq!(SupportedLanguage::Tamil.to_string(), "ta");
        assert_eq!(
            "ZH".parse::<SupportedLanguage>().unwrap(),
            SupportedLanguage::Chinese
        );
        assert!("fr".parse::<SupportedLanguage>().is_err());
    }

    #[test]
    fn test_prayer_times_deserialize() {
        let times: PrayerTimes = serde_json::from_value(json!({
            "state_code": "KUL",
            "state_name": "Kuala Lumpur",
            "date": "2024-03-15",
            "prayer_times": {"fajr": "05:58", "dhuhr": "13:15", "asr": "16:24"}
        }))
        .unwrap();
        assert_eq!(times.state_code, MalaysianState::KualaLumpur);
        assert_eq!(times.prayer_times["dhuhr"], "13:15");
        assert!(times.healthcare_considerations.is_none());
    }

    #[test]
    fn test_current_prayer_status_deserialize() {
        let status: CurrentPrayerStatus = serde_json::from_value(json!({
            "current_time": "2024-03-15T13:20:00+08:00",
            "current_prayer": "dhuhr",
            "next_prayer": {"name": "asr", "time": "16:24"},
            "is_prayer_time": true,
            "healthcare_scheduling_status": "avoid"
        }))
        .unwrap();
        assert_eq!(status.healthcare_scheduling_status, SchedulingStatus::Avoid);
        assert_eq!(status.current_time.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_translation_request_defaults_to_english_source() {
        let request = TranslationRequest::new("Take twice daily", SupportedLanguage::Malay);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "text": "Take twice daily",
                "target_language": "ms",
                "source_language": "en"
            })
        );
        assert!(request.validate().is_ok());
        assert!(
            TranslationRequest::new("  ", SupportedLanguage::Malay)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_halal_request_omits_unset_fields() {
        let request = HalalValidationRequest::new("Paracetamol 500mg").manufacturer("Duopharma");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"medication_name": "Paracetamol 500mg", "manufacturer": "Duopharma"})
        );
    }

    #[test]
    fn test_halal_response_is_halal() {
        let response: HalalValidationResponse = serde_json::from_value(json!({
            "medication_name": "Paracetamol 500mg",
            "halal_status": "mushbooh",
            "confidence": "medium"
        }))
        .unwrap();
        assert!(!response.is_halal());
        assert_eq!(response.halal_status.to_string(), "mushbooh");
    }
}
