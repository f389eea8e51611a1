// Data models — the types that flow through the classification pipeline.
//
// Signals are ephemeral: one per raw input, consumed by the aggregator and
// never persisted. Alerts are mutable for the duration of one batch and are
// handed to downstream collaborators (persistence, UI) after ranking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source platform of a raw post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Facebook,
    Instagram,
    Reddit,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Reddit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Reddit => "reddit",
        }
    }
}

/// A geographic point. Output precision is decimal(10,8) lat / decimal(11,8) lng.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A raw social post, as handed to the text classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    pub timestamp: DateTime<Utc>,
    pub platform: Platform,
}

/// The seven disaster categories plus `None` for unclassified inputs.
///
/// The variant order here is the classification table order: category
/// matching checks flood first and tsunami last, and a tie in keyword
/// counts resolves to the earlier variant. This order is a reproducibility
/// requirement — do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Flood,
    Fire,
    Earthquake,
    Hurricane,
    Landslide,
    Cyclone,
    Tsunami,
    None,
}

impl DisasterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Flood => "flood",
            DisasterType::Fire => "fire",
            DisasterType::Earthquake => "earthquake",
            DisasterType::Hurricane => "hurricane",
            DisasterType::Landslide => "landslide",
            DisasterType::Cyclone => "cyclone",
            DisasterType::Tsunami => "tsunami",
            DisasterType::None => "none",
        }
    }
}

impl std::fmt::Display for DisasterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated response urgency, derived from the urgency lexicon.
///
/// Ord follows the variant order, so `max` picks the more urgent level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    /// Map distinct urgency-lexicon hits to a level.
    pub fn from_hits(hits: usize) -> Self {
        match hits {
            h if h >= 3 => UrgencyLevel::Critical,
            2 => UrgencyLevel::High,
            1 => UrgencyLevel::Medium,
            _ => UrgencyLevel::Low,
        }
    }

    /// Base severity contribution of this urgency level.
    pub fn base_severity(&self) -> u8 {
        match self {
            UrgencyLevel::Critical => 5,
            UrgencyLevel::High => 4,
            UrgencyLevel::Medium => 3,
            UrgencyLevel::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw-input-derived classification result, prior to aggregation.
///
/// Severity is 0 only when disaster_type is None; such signals never reach
/// the aggregator's alert map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterSignal {
    pub disaster_type: DisasterType,
    /// 0.0 - 1.0
    pub confidence: f64,
    /// 1-5 for classified signals, 0 for None
    pub severity: u8,
    pub location_name: String,
    pub coordinates: Coordinates,
    pub keywords: Vec<String>,
    pub sentiment_score: f64,
    pub urgency_level: UrgencyLevel,
    /// Reference to the originating input (post id or image label)
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// An aggregated, deduplicated disaster record built from one or more
/// signals sharing a (type, normalized location) key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterAlert {
    pub id: String,
    pub disaster_type: DisasterType,
    pub location_name: String,
    pub coordinates: Coordinates,
    pub confidence: f64,
    pub severity: u8,
    pub affected_population: u64,
    pub report_count: u32,
    /// Two-point running average of contributing sentiment scores
    pub sentiment_score: f64,
    pub urgency_level: UrgencyLevel,
    pub keywords: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Contributing sources in arrival order
    pub sources: Vec<String>,
}

/// Per-image detection record — the image pipeline's output shape.
///
/// Confidence and affected_area are rounded to 2 decimal places, the four
/// analysis indices to 4, matching the downstream record format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDetection {
    pub disaster_type: DisasterType,
    pub confidence: f64,
    pub severity: u8,
    pub affected_area: f64,
    pub coordinates: Coordinates,
    pub vegetation_index: f64,
    pub water_index: f64,
    pub building_damage_index: f64,
    pub fire_intensity_index: f64,
}

/// Round to 2 decimal places (confidence, affected area).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 4 decimal places (analysis indices).
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
