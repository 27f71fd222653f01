use serde::{Deserialize, Serialize};
use strum::VariantArray;

/// Prebuilt voices offered by the synthesis model. The variant name is the
/// identifier sent upstream.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum VoiceName {
    #[default]
    Puck,
    Charon,
    Kore,
    Fenrir,
    Zephyr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    Male,
    Female,
}

impl VoiceGender {
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Male => "Masc",
            Self::Female => "Fem",
        }
    }
}

/// Display metadata for a voice preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceProfile {
    pub voice: VoiceName,
    pub label: &'static str,
    pub gender: VoiceGender,
    pub description: &'static str,
}

impl VoiceName {
    pub fn all() -> &'static [VoiceName] {
        Self::VARIANTS
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Puck => "Puck",
            Self::Charon => "Charon",
            Self::Kore => "Kore",
            Self::Fenrir => "Fenrir",
            Self::Zephyr => "Zephyr",
        }
    }

    pub const fn profile(self) -> VoiceProfile {
        let (label, gender, description) = match self {
            Self::Puck => (
                "Narrativa, Suave",
                VoiceGender::Male,
                "Ideal para historias y charlas",
            ),
            Self::Charon => (
                "Profunda, Grave",
                VoiceGender::Male,
                "Para noticias o anuncios serios",
            ),
            Self::Kore => (
                "Calmada, Serena",
                VoiceGender::Female,
                "Perfecta para meditación o guías",
            ),
            Self::Fenrir => (
                "Enérgica, Dinámica",
                VoiceGender::Male,
                "Excelente para podcast y acción",
            ),
            Self::Zephyr => (
                "Clara, Brillante",
                VoiceGender::Female,
                "Voz estándar para asistentes",
            ),
        };

        VoiceProfile {
            voice: self,
            label,
            gender,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_identifiers_round_trip() {
        for voice in VoiceName::all() {
            assert_eq!(VoiceName::from_str(voice.id()).unwrap(), *voice);
            assert_eq!(voice.to_string(), voice.id());
            assert_eq!(voice.as_ref(), voice.id());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(VoiceName::from_str("zephyr").unwrap(), VoiceName::Zephyr);
        assert!(VoiceName::from_str("Nova").is_err());
    }

    #[test]
    fn test_catalog() {
        assert_eq!(VoiceName::all().len(), 5);
        assert_eq!(VoiceName::default(), VoiceName::Puck);
        assert_eq!(VoiceName::Kore.profile().gender, VoiceGender::Female);
        assert_eq!(VoiceName::Charon.profile().label, "Profunda, Grave");
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&VoiceName::Fenrir).unwrap();
        assert_eq!(json, "\"Fenrir\"");
        let back: VoiceName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VoiceName::Fenrir);
    }
}
