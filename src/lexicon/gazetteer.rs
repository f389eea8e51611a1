// Gazetteer — fixed place-name to coordinate table.
//
// Lookup is case-insensitive substring match in table order, first hit
// wins. Names that miss the table fall back to a pseudo-random point
// inside the bounding region, drawn from the caller's seeded rng.

use rand::rngs::StdRng;
use rand::Rng;

use crate::model::Coordinates;

/// Bounding region for fallback coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<(String, Coordinates)>,
    pub bounds: Region,
}

impl Gazetteer {
    pub fn new(places: Vec<(String, Coordinates)>, bounds: Region) -> Self {
        Self { places, bounds }
    }

    /// The reference gazetteer: major Indian metros, with a bounding
    /// region covering the subcontinent.
    pub fn reference() -> Self {
        let place = |name: &str, lat: f64, lng: f64| (name.to_string(), Coordinates { lat, lng });
        Self {
            places: vec![
                place("Mumbai", 19.076, 72.8777),
                place("Delhi", 28.7041, 77.1025),
                place("Chennai", 13.0827, 80.2707),
                place("Kolkata", 22.5726, 88.3639),
                place("Bengaluru", 12.9716, 77.5946),
                place("Hyderabad", 17.385, 78.4867),
                place("Pune", 18.5204, 73.8567),
                place("Ahmedabad", 23.0225, 72.5714),
                place("Jaipur", 26.9124, 75.7873),
                place("Guwahati", 26.1445, 91.7362),
            ],
            bounds: Region {
                lat_min: 8.0,
                lat_max: 34.0,
                lng_min: 68.0,
                lng_max: 92.0,
            },
        }
    }

    /// Find the first gazetteer place mentioned in a lowercased text.
    pub fn find_in_text(&self, lowered: &str) -> Option<(&str, Coordinates)> {
        self.places
            .iter()
            .find(|(name, _)| lowered.contains(&name.to_lowercase()))
            .map(|(name, coords)| (name.as_str(), *coords))
    }

    /// Exact (case-insensitive) place-name lookup.
    pub fn lookup(&self, name: &str) -> Option<Coordinates> {
        let lowered = name.trim().to_lowercase();
        self.places
            .iter()
            .find(|(n, _)| n.to_lowercase() == lowered)
            .map(|(_, c)| *c)
    }

    /// All known place names, in table order. Used by the mock feed.
    pub fn place_names(&self) -> impl Iterator<Item = &str> {
        self.places.iter().map(|(n, _)| n.as_str())
    }

    /// A pseudo-random point inside the bounding region.
    pub fn random_in_bounds(&self, rng: &mut StdRng) -> Coordinates {
        Coordinates {
            lat: rng.random_range(self.bounds.lat_min..self.bounds.lat_max),
            lng: rng.random_range(self.bounds.lng_min..self.bounds.lng_max),
        }
    }
}
