use ahash::AHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1 {
    pub version: u8,
    #[serde(default)]
    pub tick_ms: Option<u64>,
    #[serde(default)]
    pub mouse: Option<ProfileV1Mouse>,
    #[serde(default)]
    pub scroll: Option<ProfileV1Scroll>,
    #[serde(default)]
    pub grab_toggle: Option<String>,
    #[serde(default)]
    pub speed_modifier: Option<String>,
    #[serde(default)]
    pub buttons: Option<AHashMap<String, ProfileV1ButtonRule>>, // button -> rule
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Mouse {
    #[serde(default)]
    pub default_speed: Option<f32>,
    #[serde(default)]
    pub precision_speed: Option<f32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1Scroll {
    #[serde(default)]
    pub min_speed_ms: Option<u64>,
    #[serde(default)]
    pub max_speed_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileV1ButtonRule {
    #[serde(default)]
    pub mouse: Option<String>,
    #[serde(default)]
    pub keys: Option<String>,
}

/// A profile with a version.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VersionedProfile {
    pub version: u8,
}
