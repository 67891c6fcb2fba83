//! Voice preset resolution.
//!
//! Clients pick a voice with a short public code such as `en-female`. The
//! engine expects its own speaker identifiers (Bark `history_prompt` values),
//! so the code is translated through a fixed table. Anything not in the table,
//! including a missing code, falls back to the configured default.

use phf::phf_ordered_map;
use serde::Serialize;

/// Engine preset used when no configuration overrides it.
pub const DEFAULT_VOICE_PRESET: &str = "v2/en_speaker_2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
}

/// One entry of the public voice table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicePreset {
    /// Engine-specific speaker identifier
    pub id: &'static str,
    pub language: &'static str,
    pub gender: Gender,
}

/// Public voice code -> engine preset, in display order.
static VOICE_PRESETS: phf::OrderedMap<&'static str, VoicePreset> = phf_ordered_map! {
    "en-male" => VoicePreset { id: "v2/en_speaker_2", language: "English", gender: Gender::Male },
    "en-female" => VoicePreset { id: "v2/en_speaker_9", language: "English", gender: Gender::Female },
    "hi-male" => VoicePreset { id: "v2/hi_speaker_7", language: "Hindi", gender: Gender::Male },
    "hi-female" => VoicePreset { id: "v2/hi_speaker_1", language: "Hindi", gender: Gender::Female },
    "ja-male" => VoicePreset { id: "v2/ja_speaker_2", language: "Japanese", gender: Gender::Male },
    "ja-female" => VoicePreset { id: "v2/ja_speaker_0", language: "Japanese", gender: Gender::Female },
};

/// Maps public voice codes to engine presets.
///
/// Resolution is total: every input, including `None`, yields a preset.
#[derive(Debug, Clone)]
pub struct VoicePresetResolver {
    default_preset: String,
}

impl Default for VoicePresetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_VOICE_PRESET)
    }
}

impl VoicePresetResolver {
    pub fn new(default_preset: impl Into<String>) -> Self {
        Self {
            default_preset: default_preset.into(),
        }
    }

    /// Resolve an optional public code to the engine preset identifier.
    ///
    /// Matching is exact; `"EN-FEMALE"` is treated as unknown.
    pub fn resolve(&self, code: Option<&str>) -> &str {
        code.and_then(|c| VOICE_PRESETS.get(c))
            .map(|preset| preset.id)
            .unwrap_or(self.default_preset.as_str())
    }

    pub fn default_preset(&self) -> &str {
        &self.default_preset
    }

    /// Iterate over `(code, preset)` pairs in table order.
    pub fn presets(&self) -> impl Iterator<Item = (&'static str, &'static VoicePreset)> {
        VOICE_PRESETS.entries().map(|(code, preset)| (*code, preset))
    }
}
