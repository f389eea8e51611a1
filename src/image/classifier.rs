// Image rule cascade — channel indices, type cascade, area and severity.
//
// The cascade is fixed-priority: the first matching branch wins, and
// each branch carries its own confidence cap (flood/fire 0.95,
// hurricane 0.90, landslide 0.85, earthquake fixed 0.70, none 0.90).

use rand::rngs::StdRng;

use crate::error::SignalError;
use crate::lexicon::Gazetteer;
use crate::model::{round2, round4, DisasterType, ImageDetection};

use super::decode::{decode_stats, PixelStats};

/// The four derived analysis indices, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelIndices {
    pub vegetation: f64,
    pub water: f64,
    pub building_damage: f64,
    pub fire_intensity: f64,
}

impl ChannelIndices {
    pub fn from_stats(stats: &PixelStats) -> Self {
        let PixelStats { r, g, b } = *stats;
        Self {
            vegetation: clamp01(g - (r + b) / 2.0),
            water: clamp01(b - (r + g) / 2.0 + 0.3),
            building_damage: clamp01((r - g) * 1.5),
            fire_intensity: clamp01(r * 0.7 + (1.0 - b) * 0.3),
        }
    }
}

/// Classifies raw image buffers into per-image detection records.
/// Owns the gazetteer it draws fallback coordinates from.
#[derive(Debug, Clone)]
pub struct ImageClassifier {
    gazetteer: Gazetteer,
}

impl Default for ImageClassifier {
    fn default() -> Self {
        Self {
            gazetteer: Gazetteer::reference(),
        }
    }
}

impl ImageClassifier {
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self { gazetteer }
    }

    /// Decode a buffer and classify it in one step.
    ///
    /// Images carry no location, so coordinates come from the gazetteer
    /// bounding region via the injected seeded rng.
    pub fn detect(&self, buffer: &[u8], rng: &mut StdRng) -> Result<ImageDetection, SignalError> {
        let stats = decode_stats(buffer)?;
        Ok(self.detect_from_stats(&stats, rng))
    }

    /// Classify already-computed channel statistics.
    pub fn detect_from_stats(&self, stats: &PixelStats, rng: &mut StdRng) -> ImageDetection {
        let indices = ChannelIndices::from_stats(stats);
        let (disaster_type, confidence) = classify_stats(stats);
        let affected_area = affected_area(disaster_type, &indices);
        let severity = severity(disaster_type, confidence, &indices);
        let coordinates = self.gazetteer.random_in_bounds(rng);

        ImageDetection {
            disaster_type,
            confidence: round2(confidence),
            severity,
            affected_area: round2(affected_area),
            coordinates,
            vegetation_index: round4(indices.vegetation),
            water_index: round4(indices.water),
            building_damage_index: round4(indices.building_damage),
            fire_intensity_index: round4(indices.fire_intensity),
        }
    }
}

/// The fixed-priority rule cascade. First match wins.
pub fn classify_stats(stats: &PixelStats) -> (DisasterType, f64) {
    let PixelStats { r, g, b } = *stats;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if b > r && b > g && b > 0.4 {
        // Blue-dominant: standing water
        (DisasterType::Flood, (0.5 + (b - (r + g) / 2.0) * 2.0).min(0.95))
    } else if r > g && r > b && r > 0.5 {
        // Red-dominant: active burning
        (DisasterType::Fire, (0.5 + (r - (g + b) / 2.0) * 2.0).min(0.95))
    } else if r > 0.6 && g > 0.6 && b > 0.6 {
        // Washed-out bright frame: storm cloud cover
        (DisasterType::Hurricane, (0.5 + (min - 0.6) * 2.0).min(0.90))
    } else if r > 0.3 && g > 0.2 && b < 0.3 && r > b {
        // Moderate red/green over low blue: exposed earth
        (DisasterType::Landslide, (0.5 + (r - b) * 1.5).min(0.85))
    } else if max - min < 0.1 && r < 0.5 {
        // Near-equal dark channels: rubble and dust
        (DisasterType::Earthquake, 0.7)
    } else {
        // Green-dominant or unremarkable: no disaster
        let conf = (0.5 + (g - (r + b) / 2.0) * 2.0).clamp(0.5, 0.9);
        (DisasterType::None, conf)
    }
}

/// affected_area = 10 * (1 + type index * type multiplier).
pub fn affected_area(disaster_type: DisasterType, idx: &ChannelIndices) -> f64 {
    let scaled = match disaster_type {
        DisasterType::Flood => idx.water * 50.0,
        DisasterType::Fire => idx.fire_intensity * 30.0,
        DisasterType::Earthquake => idx.building_damage * 40.0,
        DisasterType::Hurricane => (idx.water + idx.building_damage) * 20.0,
        DisasterType::Landslide => idx.building_damage * 25.0,
        _ => return 0.0,
    };
    10.0 * (1.0 + scaled)
}

/// severity = clamp(1, 5, ceil((confidence + weighted index) * 5)).
/// `None` forces severity 0 and exclusion from downstream alerting.
pub fn severity(disaster_type: DisasterType, confidence: f64, idx: &ChannelIndices) -> u8 {
    let weighted = match disaster_type {
        DisasterType::Flood => idx.water * 0.3,
        DisasterType::Fire => idx.fire_intensity * 0.4,
        DisasterType::Earthquake => idx.building_damage * 0.5,
        DisasterType::Hurricane => (idx.water + idx.building_damage) * 0.2,
        DisasterType::Landslide => idx.building_damage * 0.3,
        _ => return 0,
    };
    (((confidence + weighted) * 5.0).ceil() as i64).clamp(1, 5) as u8
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}
