use eih_scorer::config::DataConfig;
use eih_scorer::error::AppError;
use eih_scorer::reference::ReferenceData;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads the three reference tables named by `data`.
pub(crate) fn load_reference(data: &DataConfig) -> Result<ReferenceData, AppError> {
    let reference = ReferenceData::from_paths(&data.tracts_csv, &data.shelters_csv, &data.pit_csv)?;

    info!(
        tracts = reference.tracts.len(),
        shelters = reference.shelters.len(),
        pit_rows = reference.pit_summary.rows.len(),
        "reference tables loaded"
    );
    if reference.tracts.is_empty() {
        warn!(path = %data.tracts_csv.display(), "census tract table has no rows; every score request will fail");
    }

    Ok(reference)
}
