use crate::infra::load_reference;
use clap::Args;
use eih_scorer::config::AppConfig;
use eih_scorer::error::AppError;
use eih_scorer::scoring::{
    ScoreDisplay, ScoreRequest, SiteScorer, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
};
use eih_scorer::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Latitude of the candidate site in degrees
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub(crate) lat: f64,
    /// Longitude of the candidate site in degrees
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub(crate) lon: f64,
    /// Census tract CSV (overrides EIH_TRACTS_CSV)
    #[arg(long)]
    pub(crate) tracts: Option<PathBuf>,
    /// Shelter CSV (overrides EIH_SHELTERS_CSV)
    #[arg(long)]
    pub(crate) shelters: Option<PathBuf>,
    /// Point-in-time summary CSV (overrides EIH_PIT_CSV)
    #[arg(long)]
    pub(crate) pit: Option<PathBuf>,
    /// Print the raw result as JSON instead of the formatted breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        lat,
        lon,
        tracts,
        shelters,
        pit,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(path) = tracts {
        config.data.tracts_csv = path;
    }
    if let Some(path) = shelters {
        config.data.shelters_csv = path;
    }
    if let Some(path) = pit {
        config.data.pit_csv = path;
    }

    telemetry::init(&config.telemetry)?;

    let reference = load_reference(&config.data)?;
    let scorer = SiteScorer::with_config(&reference, config.scoring);
    let result = scorer.score(ScoreRequest {
        latitude: lat,
        longitude: lon,
    })?;

    if json {
        let body = serde_json::to_string_pretty(&result)
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{body}");
    } else {
        print!("{}", render_score_display(lat, lon, &result.display()));
    }

    Ok(())
}

pub(crate) fn render_score_display(lat: f64, lon: f64, display: &ScoreDisplay) -> String {
    let mut out = String::new();
    out.push_str("Emergency Interim Housing site score\n");
    out.push_str(&format!("Location: {lat}, {lon}\n"));
    out.push_str(&format!("Total Score: {:.1}\n", display.headline_pct));
    out.push_str(&format!("Tract ID: {}\n", display.tract_id));

    out.push_str("\nComponent scores\n");
    for entry in &display.breakdown {
        out.push_str(&format!("- {}: {}\n", entry.label, entry.value_pct));
    }

    out.push_str("\nScoring breakdown (radar axes)\n");
    for axis in &display.radar {
        out.push_str(&format!("- {}: {:.1}\n", axis.label, axis.value_pct));
    }

    out
}
