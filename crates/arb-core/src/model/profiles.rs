use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Chat deployments this bot knows how to call.
///
/// The deployment name on the provider side equals [`ModelId::as_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelId {
    Gpt4,
    Gpt41,
    Gpt4o,
    Gpt35Turbo0125,
    Grok3,
}

pub const DEFAULT_MODEL: ModelId = ModelId::Gpt4o;

/// Static per-model generation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelProfile {
    pub id: ModelId,
    pub display_label: &'static str,
    pub max_output_tokens: u32,
    pub temperature: f64,
    /// `api-version` query parameter; grok-3 is served on a newer preview.
    pub api_version: &'static str,
    pub system_prompt: &'static str,
}

const API_VERSION_2024_02: &str = "2024-02-15-preview";
const API_VERSION_2024_08: &str = "2024-08-01-preview";

/// Menu order is table order.
pub static MODEL_PROFILES: [ModelProfile; 5] = [
    ModelProfile {
        id: ModelId::Gpt4,
        display_label: "🧠 GPT-4",
        max_output_tokens: 8000,
        temperature: 0.7,
        api_version: API_VERSION_2024_02,
        system_prompt: "You are a professional AI assistant. Give accurate, detailed and helpful answers.",
    },
    ModelProfile {
        id: ModelId::Gpt41,
        display_label: "🚀 GPT-4.1",
        max_output_tokens: 8000,
        temperature: 0.7,
        api_version: API_VERSION_2024_02,
        system_prompt: "You are GPT-4.1, an advanced AI assistant. Give in-depth, accurate analysis and answers.",
    },
    ModelProfile {
        id: ModelId::Gpt4o,
        display_label: "✨ GPT-4o",
        max_output_tokens: 4000,
        temperature: 0.7,
        api_version: API_VERSION_2024_02,
        system_prompt: "You are GPT-4o, a multimodal-optimised AI assistant. Give clear, practical answers.",
    },
    ModelProfile {
        id: ModelId::Gpt35Turbo0125,
        display_label: "⚡ GPT-3.5 Turbo 0125",
        max_output_tokens: 4000,
        temperature: 0.7,
        api_version: API_VERSION_2024_02,
        system_prompt: "You are GPT-3.5 Turbo 0125, a fast AI assistant. Give concise, accurate answers.",
    },
    ModelProfile {
        id: ModelId::Grok3,
        display_label: "🤖 Grok-3",
        max_output_tokens: 4000,
        temperature: 0.8,
        api_version: API_VERSION_2024_08,
        system_prompt: "You are Grok-3, an AI assistant with a distinctive point of view. Give interesting, insightful answers, with some humour where it fits.",
    },
];

impl ModelId {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt4 => "gpt-4",
            ModelId::Gpt41 => "gpt-4.1",
            ModelId::Gpt4o => "gpt-4o",
            ModelId::Gpt35Turbo0125 => "gpt-3.5-turbo-0125",
            ModelId::Grok3 => "grok-3",
        }
    }

    pub fn profile(self) -> &'static ModelProfile {
        // The table has one row per variant, in declaration order.
        &MODEL_PROFILES[self as usize]
    }

    pub fn all() -> impl Iterator<Item = ModelId> {
        MODEL_PROFILES.iter().map(|p| p.id)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MODEL_PROFILES
            .iter()
            .map(|p| p.id)
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_variants() {
        for (idx, p) in MODEL_PROFILES.iter().enumerate() {
            assert_eq!(p.id as usize, idx);
            assert_eq!(p.id.profile().id, p.id);
        }
        assert_eq!(ModelId::all().count(), MODEL_PROFILES.len());
    }

    #[test]
    fn parses_known_ids_and_rejects_others() {
        for id in ModelId::all() {
            assert_eq!(id.as_str().parse::<ModelId>().unwrap(), id);
        }
        assert!(matches!(
            "gpt-5".parse::<ModelId>(),
            Err(Error::UnknownModel(s)) if s == "gpt-5"
        ));
        assert!("GPT-4".parse::<ModelId>().is_err());
    }

    #[test]
    fn api_version_comes_from_table() {
        assert_eq!(ModelId::Grok3.profile().api_version, "2024-08-01-preview");
        for id in ModelId::all().filter(|id| *id != ModelId::Grok3) {
            assert_eq!(id.profile().api_version, "2024-02-15-preview");
        }
    }

    #[test]
    fn generation_parameters() {
        assert_eq!(ModelId::Gpt4.profile().max_output_tokens, 8000);
        assert_eq!(ModelId::Gpt4o.profile().max_output_tokens, 4000);
        assert_eq!(ModelId::Grok3.profile().temperature, 0.8);
        assert_eq!(DEFAULT_MODEL, ModelId::Gpt4o);
    }
}
