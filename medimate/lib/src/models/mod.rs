//! Typed request and response models.

mod appointment;
mod cultural;
mod patient;

pub use appointment::{
    AppointmentPriority, AppointmentRequest, AppointmentType, DEFAULT_DURATION_MINUTES,
    MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
pub use cultural::{
    Confidence, CurrentPrayerStatus, HalalCertification, HalalStatus, HalalValidationRequest,
    HalalValidationResponse, MalaysianState, PrayerTimes, SchedulingStatus, SupportedLanguage,
    TranslationRequest, TranslationResponse,
};
pub use patient::{
    ConsentMethod, Gender, PatientContactInfo, PatientCulturalPreferences, PatientPersonalInfo,
    PatientRequest, PdpaConsent, ProviderGenderPreference,
};
