use serde::{Deserialize, Serialize};

/// Default coordinate offered to callers: downtown San Jose.
pub const DEFAULT_LATITUDE: f64 = 37.3382;
pub const DEFAULT_LONGITUDE: f64 = -121.8863;

/// Coordinate to score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
}

impl Default for ScoreRequest {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    AccessToServices,
    Infrastructure,
    CommunityImpact,
    PovertyRate,
    UnhousedCount,
    ShelterAccess,
}

impl ComponentKind {
    /// Presentation order. The first three are the top-level categories.
    pub const fn ordered() -> [Self; 6] {
        [
            Self::AccessToServices,
            Self::Infrastructure,
            Self::CommunityImpact,
            Self::PovertyRate,
            Self::UnhousedCount,
            Self::ShelterAccess,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccessToServices => "Access to Services",
            Self::Infrastructure => "Infrastructure",
            Self::CommunityImpact => "Community Impact",
            Self::PovertyRate => "Poverty Rate",
            Self::UnhousedCount => "Unhoused Count",
            Self::ShelterAccess => "Shelter Access",
        }
    }
}

/// The six intermediate scores behind a total, kept at full precision.
///
/// Serialises as an object keyed by display label, in [`ComponentKind::ordered`] order. Chart
/// consumers take the first three keys positionally, so field order here is part of the public
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    #[serde(rename = "Access to Services")]
    pub access_to_services: f64,
    #[serde(rename = "Infrastructure")]
    pub infrastructure: f64,
    #[serde(rename = "Community Impact")]
    pub community_impact: f64,
    #[serde(rename = "Poverty Rate")]
    pub poverty_rate: f64,
    #[serde(rename = "Unhoused Count")]
    pub unhoused_count: f64,
    #[serde(rename = "Shelter Access")]
    pub shelter_access: f64,
}

impl ComponentScores {
    pub fn get(&self, kind: ComponentKind) -> f64 {
        match kind {
            ComponentKind::AccessToServices => self.access_to_services,
            ComponentKind::Infrastructure => self.infrastructure,
            ComponentKind::CommunityImpact => self.community_impact,
            ComponentKind::PovertyRate => self.poverty_rate,
            ComponentKind::UnhousedCount => self.unhoused_count,
            ComponentKind::ShelterAccess => self.shelter_access,
        }
    }

    pub fn entries(&self) -> [(ComponentKind, f64); 6] {
        ComponentKind::ordered().map(|kind| (kind, self.get(kind)))
    }
}

/// Outcome of scoring one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted total, rounded to two decimals. Usually within [0, 1] but not guaranteed:
    /// shelter access has no lower clamp.
    pub total_score: f64,
    pub component_scores: ComponentScores,
    /// Identifier of the census tract nearest to the coordinate.
    pub tract_id: String,
}

/// Rounds the exact binary value to `decimals` places, ties to even.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scores() -> ComponentScores {
        ComponentScores {
            access_to_services: 0.6,
            infrastructure: 0.8,
            community_impact: 0.55,
            poverty_rate: 0.5,
            unhoused_count: 0.5,
            shelter_access: 0.3,
        }
    }

    #[test]
    fn component_scores_serialize_with_labels_in_order() {
        let json = serde_json::to_string(&sample_scores()).expect("serialize scores");
        let positions: Vec<usize> = ComponentKind::ordered()
            .iter()
            .map(|kind| {
                json.find(&format!("\"{}\"", kind.label()))
                    .expect("label present")
            })
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{json}");
    }

    #[test]
    fn entries_follow_presentation_order() {
        let entries = sample_scores().entries();
        assert_eq!(entries[0], (ComponentKind::AccessToServices, 0.6));
        assert_eq!(entries[2], (ComponentKind::CommunityImpact, 0.55));
        assert_eq!(entries[5], (ComponentKind::ShelterAccess, 0.3));
    }

    #[test]
    fn request_fields_default_to_downtown_san_jose() {
        let request: ScoreRequest = serde_json::from_str("{}").expect("empty body parses");
        assert_eq!(request, ScoreRequest::default());

        let request: ScoreRequest =
            serde_json::from_str(r#"{"latitude": 37.4}"#).expect("partial body parses");
        assert_eq!(request.latitude, 37.4);
        assert_eq!(request.longitude, DEFAULT_LONGITUDE);
    }

    #[test]
    fn round_to_handles_negative_values() {
        assert_eq!(round_to(0.6849, 2), 0.68);
        assert_eq!(round_to(-0.126, 2), -0.13);
    }

    #[test]
    fn round_to_rounds_the_stored_binary_value() {
        // 0.015 is stored just below the tie; 0.125 is an exact tie and goes to even.
        assert_eq!(round_to(0.015, 2), 0.01);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.285, 2), 0.28);
        assert_eq!(round_to(64.25, 1), 64.2);
    }
}
