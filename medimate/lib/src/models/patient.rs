//! Patient registration models with PDPA 2010 consent.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cultural::SupportedLanguage;
use crate::error::ValidationError;
use crate::validation::{Violations, validate_mykad, validate_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Preferred gender of the attending provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderGenderPreference {
    Same,
    Opposite,
    #[default]
    NoPreference,
}

/// How PDPA consent was collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentMethod {
    #[default]
    Online,
    Paper,
    Verbal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientPersonalInfo {
    pub name: String,
    /// `YYMMDD-PB-###G`.
    pub mykad_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub race: String,
    pub religion: String,
    #[serde(default = "default_nationality")]
    pub nationality: String,
}

fn default_nationality() -> String {
    "Malaysian".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientContactInfo {
    /// `+60` followed by 9 or 10 digits.
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientCulturalPreferences {
    pub primary_language: SupportedLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_languages: Option<Vec<SupportedLanguage>>,
    #[serde(default)]
    pub prayer_time_notifications: bool,
    #[serde(default)]
    pub halal_medication_only: bool,
    #[serde(default)]
    pub preferred_gender_provider: ProviderGenderPreference,
    #[serde(default)]
    pub ramadan_considerations: bool,
}

impl PatientCulturalPreferences {
    pub fn new(primary_language: SupportedLanguage) -> Self {
        Self {
            primary_language,
            secondary_languages: None,
            prayer_time_notifications: false,
            halal_medication_only: false,
            preferred_gender_provider: ProviderGenderPreference::default(),
            ramadan_considerations: false,
        }
    }
}

/// Consent record required by the Personal Data Protection Act 2010.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdpaConsent {
    pub data_processing: bool,
    #[serde(default)]
    pub marketing: bool,
    #[serde(default)]
    pub third_party_sharing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<bool>,
    pub consent_date: DateTime<Utc>,
    #[serde(default)]
    pub consent_method: ConsentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_version: Option<String>,
}

impl PdpaConsent {
    /// Consent to data processing only, collected online at `consent_date`.
    pub fn data_processing_only(consent_date: DateTime<Utc>) -> Self {
        Self {
            data_processing: true,
            marketing: false,
            third_party_sharing: false,
            research: None,
            consent_date,
            consent_method: ConsentMethod::Online,
            consent_version: None,
        }
    }
}

/// Request to register or update a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRequest {
    pub personal_info: PatientPersonalInfo,
    pub contact_info: PatientContactInfo,
    pub cultural_preferences: PatientCulturalPreferences,
    pub pdpa_consent: PdpaConsent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<Value>,
}

impl PatientRequest {
    /// Checks every field format, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Violations::default();
        violations.check(
            !self.personal_info.name.trim().is_empty(),
            "personal_info.name",
            "must not be empty",
        );
        violations.check(
            validate_mykad(&self.personal_info.mykad_number),
            "personal_info.mykad_number",
            "must match YYMMDD-PB-###G",
        );
        violations.check(
            validate_phone(&self.contact_info.phone),
            "contact_info.phone",
            "must be +60 followed by 9 or 10 digits",
        );
        if let Some(email) = &self.contact_info.email {
            violations.check(email.contains('@'), "contact_info.email", "must be an email address");
        }
        violations.check(
            self.pdpa_consent.data_processing,
            "pdpa_consent.data_processing",
            "consent to data processing is required",
        );
        violations.finish()
    }
}
