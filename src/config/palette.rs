// Emotion palette - label to color and label to media lookups
//
// Purely presentational. Every lookup has a fallback so an unknown label
// never fails a render.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::constants::DEFAULT_EMOTION_COLOR;

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("happy", "#4CAF50"),
    ("sad", "#E53935"),
    ("stress", "#FF9800"),
    ("emotional", "#9C27B0"),
    ("angry", "#F44336"),
    ("love", "#EC407A"),
    ("depression", "#455A64"),
];

const DEFAULT_MEDIA: &[(&str, &str)] = &[
    (
        "happy",
        "https://open.spotify.com/embed/playlist/2P4Wmt03IQs4DTXVvncReg",
    ),
    (
        "sad",
        "https://open.spotify.com/embed/playlist/0AyOLKzLZZmlliok7bu1mp",
    ),
    (
        "stress",
        "https://open.spotify.com/embed/playlist/1YQBOoZJHFJzHx2Pm6sd4w",
    ),
    (
        "depression",
        "https://open.spotify.com/embed/playlist/4GX1yWidUcdCCuIJZSX4Rc",
    ),
    (
        "love",
        "https://open.spotify.com/embed/playlist/6qEZQ1OXaYJaCJHeSHVxO7",
    ),
    (
        "angry",
        "https://open.spotify.com/embed/playlist/2Lnt48sabnkqVZqyFvpbq9",
    ),
    (
        "emotional",
        "https://open.spotify.com/embed/track/2Osew72vzCf361dtOEF7bB",
    ),
];

/// Label -> color / embedded media mapping for the emotion pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Color for labels without an entry in `colors`
    pub default_color: String,
    /// Background color per emotion label
    pub colors: HashMap<String, String>,
    /// Embeddable playlist/track URL per emotion label
    pub media: HashMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_EMOTION_COLOR.to_string(),
            colors: to_map(DEFAULT_COLORS),
            media: to_map(DEFAULT_MEDIA),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Palette {
    /// Color for `label`, or the default color when unmapped
    pub fn color_for(&self, label: &str) -> &str {
        self.colors
            .get(label)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// Embed URL for `label`, if one is configured
    pub fn media_for(&self, label: &str) -> Option<&str> {
        self.media.get(label).map(String::as_str)
    }

    /// Layer user overrides on top of this palette
    pub fn merge(&mut self, overrides: PaletteOverrides) {
        if let Some(color) = overrides.default_color {
            self.default_color = color;
        }
        self.colors.extend(overrides.colors);
        self.media.extend(overrides.media);
    }
}

/// `[palette]` section of the config file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub default_color: Option<String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default)]
    pub media: HashMap<String, String>,
}
