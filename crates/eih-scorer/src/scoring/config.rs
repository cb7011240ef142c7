use serde::{Deserialize, Serialize};

/// Ratings for the three service categories that make up a composite score.
///
/// The values are placeholders until per-coordinate transit, healthcare, and grocery indicators
/// are available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceRatings {
    pub transit: f64,
    pub healthcare: f64,
    pub grocery: f64,
}

/// Category weights applied to the three top-level components of the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub services: f64,
    pub infrastructure: f64,
    pub community: f64,
}

/// Every constant the site scorer reads, grouped so that replacing a placeholder with a real
/// indicator touches one place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Environmental-justice sub-score used for every tract.
    pub env_justice_score: f64,
    /// Static infrastructure availability ratings.
    pub infrastructure: ServiceRatings,
    /// Static access ratings blended with shelter access into the services score.
    pub access: ServiceRatings,
    /// Shelters at or within this great-circle distance count as nearby.
    pub shelter_radius_km: f64,
    /// Shelter access score used when no shelter is nearby.
    pub no_shelter_fallback: f64,
    /// Poverty rate (percent) at which the poverty sub-score saturates at 1.0.
    pub poverty_saturation_pct: f64,
    /// Unhoused count at which the unhoused sub-score saturates at 1.0.
    pub unhoused_saturation: f64,
    pub weights: ScoreWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            env_justice_score: 0.65,
            infrastructure: ServiceRatings {
                transit: 0.9,
                healthcare: 0.7,
                grocery: 0.85,
            },
            access: ServiceRatings {
                transit: 0.7,
                healthcare: 0.6,
                grocery: 0.8,
            },
            shelter_radius_km: 3.0,
            no_shelter_fallback: 0.2,
            poverty_saturation_pct: 50.0,
            unhoused_saturation: 400.0,
            weights: ScoreWeights {
                services: 0.4,
                infrastructure: 0.3,
                community: 0.3,
            },
        }
    }
}

impl ScoringConfig {
    /// Mean of the infrastructure ratings; independent of the scored coordinate.
    pub fn infrastructure_score(&self) -> f64 {
        let ratings = &self.infrastructure;
        (ratings.transit + ratings.healthcare + ratings.grocery) / 3.0
    }

    /// Mean of the shelter access score and the three access ratings.
    pub fn services_score(&self, shelter_access_score: f64) -> f64 {
        let ratings = &self.access;
        (shelter_access_score + ratings.transit + ratings.healthcare + ratings.grocery) / 4.0
    }
}
