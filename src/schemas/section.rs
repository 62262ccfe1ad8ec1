//! Section schema - The three physical locations inspected per visit

use serde::{Deserialize, Serialize};

use super::lot::{Lot, LotList};
use super::step::Step;

/// Key a form view uses to address its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKey {
    /// Cold chamber
    #[serde(rename = "camaraFria")]
    ColdChamber,
    /// Conventional refrigerator of the store
    #[serde(rename = "refrigeradorConv")]
    ConventionalRefrigerator,
    /// Shelf gondola
    #[serde(rename = "gondola")]
    Gondola,
}

impl SectionKey {
    pub const ALL: [SectionKey; 3] = [
        SectionKey::ColdChamber,
        SectionKey::ConventionalRefrigerator,
        SectionKey::Gondola,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::ColdChamber => "camaraFria",
            SectionKey::ConventionalRefrigerator => "refrigeradorConv",
            SectionKey::Gondola => "gondola",
        }
    }

    /// Record slot this key writes to
    pub fn slot(&self) -> SectionSlot {
        match self {
            SectionKey::ColdChamber => SectionSlot::Validation1,
            SectionKey::ConventionalRefrigerator => SectionSlot::Validation2,
            SectionKey::Gondola => SectionSlot::Validation3,
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camaraFria" => Ok(SectionKey::ColdChamber),
            "refrigeradorConv" => Ok(SectionKey::ConventionalRefrigerator),
            "gondola" => Ok(SectionKey::Gondola),
            _ => Err(format!("Unknown section key: {}", s)),
        }
    }
}

/// Map a raw section key to its record slot. Unknown keys map to `None`.
pub fn map_section_key(key: &str) -> Option<SectionSlot> {
    key.parse::<SectionKey>().ok().map(|k| k.slot())
}

/// Storage location for one section's record on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSlot {
    Validation1,
    Validation2,
    Validation3,
}

impl SectionSlot {
    pub const ALL: [SectionSlot; 3] = [
        SectionSlot::Validation1,
        SectionSlot::Validation2,
        SectionSlot::Validation3,
    ];

    pub fn key(&self) -> SectionKey {
        match self {
            SectionSlot::Validation1 => SectionKey::ColdChamber,
            SectionSlot::Validation2 => SectionKey::ConventionalRefrigerator,
            SectionSlot::Validation3 => SectionKey::Gondola,
        }
    }

    /// Step during which this section is edited
    pub fn step(&self) -> Step {
        match self {
            SectionSlot::Validation1 => Step::Validation1,
            SectionSlot::Validation2 => Step::Validation2,
            SectionSlot::Validation3 => Step::Validation3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionSlot::Validation1 => "Cold chamber",
            SectionSlot::Validation2 => "Conventional refrigerator",
            SectionSlot::Validation3 => "Shelf gondola",
        }
    }
}

impl std::fmt::Display for SectionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionSlot::Validation1 => write!(f, "validation1"),
            SectionSlot::Validation2 => write!(f, "validation2"),
            SectionSlot::Validation3 => write!(f, "validation3"),
        }
    }
}

/// Accumulated data for one section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Inspected lots in entry order
    #[serde(default)]
    pub lots: LotList,

    /// Photo of the whole section after restocking
    #[serde(default)]
    pub final_photo: Option<String>,

    /// Free-text remark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    /// Section marked as not applicable; complete regardless of lots
    #[serde(default)]
    pub skipped: bool,
}

impl SectionRecord {
    pub fn with_lots(mut self, lots: impl Into<LotList>) -> Self {
        self.lots = lots.into();
        self
    }

    pub fn with_final_photo(mut self, photo: Option<String>) -> Self {
        self.final_photo = photo;
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_skipped(mut self, skipped: bool) -> Self {
        self.skipped = skipped;
        self
    }
}

/// Everything a section form sends when its step is completed.
///
/// Absent fields leave the stored record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SectionSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lots: Option<Vec<Lot>>,

    #[serde(
        default,
        deserialize_with = "explicit_photo",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_photo: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
}

fn explicit_photo<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl SectionSubmission {
    pub fn with_lots(mut self, lots: Vec<Lot>) -> Self {
        self.lots = Some(lots);
        self
    }

    pub fn with_final_photo(mut self, photo: Option<&str>) -> Self {
        self.final_photo = Some(photo.map(str::to_string));
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = Some(observation.into());
        self
    }

    pub fn with_skipped(mut self, skipped: bool) -> Self {
        self.skipped = Some(skipped);
        self
    }
}
