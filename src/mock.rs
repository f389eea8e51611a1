// Mock signal feed — deterministic-shape synthetic posts for demo and
// tests. No production path depends on this module.
//
// Posts come from a fixed template table crossed with the gazetteer's
// place names and the platform enum, driven entirely by the seeded rng
// so a given seed always yields the same feed.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::lexicon::Gazetteer;
use crate::model::{Platform, RawPost};

/// Template table. `{loc}` is replaced with a gazetteer place name.
/// The last two entries are deliberately non-disaster chatter so a
/// generated feed exercises the `none` path too.
const TEMPLATES: [&str; 9] = [
    "URGENT flooding in {loc}, water entering houses, people trapped, need rescue",
    "Massive fire near {loc} market, smoke everywhere, please send help",
    "Strong earthquake tremor felt across {loc}, buildings shaking, people in panic",
    "Cyclone warning issued for {loc}, gusts getting stronger, evacuate now",
    "Landslide has blocked the highway near {loc}, several vehicles stranded",
    "Tsunami alert for the {loc} coast, move to higher ground immediately",
    "Hurricane force gale hitting {loc}, storm surge flooding the shore roads",
    "Lovely quiet evening at the {loc} waterfront, everything calm and safe",
    "Traffic is slow near {loc} station but nothing unusual today",
];

pub struct MockFeed {
    rng: StdRng,
    gazetteer: Gazetteer,
}

impl MockFeed {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            gazetteer: Gazetteer::reference(),
        }
    }

    /// Generate `n` synthetic posts.
    pub fn generate(&mut self, n: usize) -> Vec<RawPost> {
        let places: Vec<String> = self.gazetteer.place_names().map(String::from).collect();
        let base_time = Utc::now();

        (0..n)
            .map(|i| {
                let template = TEMPLATES[self.rng.random_range(0..TEMPLATES.len())];
                let place = &places[self.rng.random_range(0..places.len())];
                let platform = Platform::ALL[self.rng.random_range(0..Platform::ALL.len())];
                // Roughly a third of posts carry an explicit location field
                let explicit_location = if self.rng.random_range(0..3) == 0 {
                    Some(place.clone())
                } else {
                    None
                };

                RawPost {
                    id: format!("mock-{i}"),
                    text: template.replace("{loc}", place),
                    author: format!("user_{:04}", self.rng.random_range(0..10_000u32)),
                    location: explicit_location,
                    coordinates: None,
                    timestamp: base_time + Duration::seconds(i as i64),
                    platform,
                }
            })
            .collect()
    }
}
