mod config;
mod display;
pub mod geo;
mod result;
mod router;

pub use config::{ScoreWeights, ScoringConfig, ServiceRatings};
pub use display::{ComponentDisplay, ScoreDisplay, RADAR_AXES};
pub use geo::haversine_km;
pub use result::{
    ComponentKind, ComponentScores, ScoreRequest, ScoreResult, DEFAULT_LATITUDE,
    DEFAULT_LONGITUDE,
};
pub use router::{scoring_router, ScoreResponse, ScoringState};

use crate::reference::{ReferenceData, Shelter, Tract};
use result::round_to;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("census tract reference set is empty")]
    EmptyReferenceSet,
    #[error("coordinate ({latitude}, {longitude}) is not a valid latitude/longitude")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("shelter row {row} lies within {radius_km} km of the site but has zero capacity")]
    ZeroCapacityShelter { row: usize, radius_km: f64 },
}

/// Returns the tract closest to the coordinate by planar distance in degree space.
///
/// Ties resolve to the earliest tract in table order.
pub fn find_nearest_tract(
    latitude: f64,
    longitude: f64,
    tracts: &[Tract],
) -> Result<&Tract, ScoringError> {
    let mut nearest: Option<(&Tract, f64)> = None;
    for tract in tracts {
        let distance = geo::planar_degrees(latitude, longitude, tract.latitude, tract.longitude);
        let closer = match nearest {
            Some((_, best)) => distance < best,
            None => true,
        };
        if closer {
            nearest = Some((tract, distance));
        }
    }

    nearest
        .map(|(tract, _)| tract)
        .ok_or(ScoringError::EmptyReferenceSet)
}

/// Scores candidate sites against a borrowed set of reference tables.
///
/// Each call is independent; derived distances are never written back to the tables, so one
/// [`ReferenceData`] can serve any number of scorers at once.
pub struct SiteScorer<'a> {
    reference: &'a ReferenceData,
    config: ScoringConfig,
}

impl<'a> SiteScorer<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self::with_config(reference, ScoringConfig::default())
    }

    pub fn with_config(reference: &'a ReferenceData, config: ScoringConfig) -> Self {
        Self { reference, config }
    }

    pub fn score(&self, request: ScoreRequest) -> Result<ScoreResult, ScoringError> {
        self.score_location(request.latitude, request.longitude)
    }

    pub fn score_location(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ScoreResult, ScoringError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ScoringError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        let config = &self.config;
        let nearest = find_nearest_tract(latitude, longitude, &self.reference.tracts)?;

        let poverty_score = (nearest.poverty_rate_pct / config.poverty_saturation_pct).min(1.0);
        let unhoused_score =
            (f64::from(nearest.unhoused_count) / config.unhoused_saturation).min(1.0);
        let community_impact =
            (poverty_score + unhoused_score + config.env_justice_score) / 3.0;

        let infrastructure_score = config.infrastructure_score();

        let (shelter_access_score, nearby) =
            self.shelter_access(latitude, longitude, &self.reference.shelters)?;
        let services_score = config.services_score(shelter_access_score);

        let weights = &config.weights;
        let total_score = round_to(
            weights.services * services_score
                + weights.infrastructure * infrastructure_score
                + weights.community * community_impact,
            2,
        );

        debug!(
            tract_id = %nearest.id,
            nearby_shelters = nearby,
            total_score,
            "scored candidate site"
        );

        Ok(ScoreResult {
            total_score,
            component_scores: ComponentScores {
                access_to_services: services_score,
                infrastructure: infrastructure_score,
                community_impact,
                poverty_rate: poverty_score,
                unhoused_count: unhoused_score,
                shelter_access: shelter_access_score,
            },
            tract_id: nearest.id.clone(),
        })
    }

    /// Shelter access score and the number of shelters within the radius.
    ///
    /// One minus the mean occupancy ratio of nearby shelters, capped at 1.0 but not floored:
    /// overcrowded shelters push it negative.
    fn shelter_access(
        &self,
        latitude: f64,
        longitude: f64,
        shelters: &[Shelter],
    ) -> Result<(f64, usize), ScoringError> {
        let radius_km = self.config.shelter_radius_km;
        let mut occupancy_sum = 0.0;
        let mut nearby = 0usize;

        for (index, shelter) in shelters.iter().enumerate() {
            let distance_km =
                haversine_km(latitude, longitude, shelter.latitude, shelter.longitude);
            if distance_km.is_nan() || distance_km > radius_km {
                continue;
            }
            if shelter.capacity == 0.0 {
                return Err(ScoringError::ZeroCapacityShelter {
                    row: index + 1,
                    radius_km,
                });
            }
            occupancy_sum += shelter.current_occupancy / shelter.capacity;
            nearby += 1;
        }

        if nearby == 0 {
            return Ok((self.config.no_shelter_fallback, 0));
        }

        let avg_capacity_score = 1.0 - occupancy_sum / nearby as f64;
        Ok((avg_capacity_score.min(1.0), nearby))
    }
}
