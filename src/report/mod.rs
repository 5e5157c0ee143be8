pub mod infer;
pub mod table;

pub use table::{cell_text, Record, ReportTable};

use crate::errors::SonarchatError;
use crate::storage::{ObjectLocation, ReportStore};
use tracing::info;

/// Download the report at `location` and parse it.
pub async fn load_report(store: &dyn ReportStore, location: &ObjectLocation) -> Result<ReportTable, SonarchatError> {
    let bytes = store.fetch(location).await?;
    let table = ReportTable::from_csv(&bytes)?;
    info!(%location, store = store.store_name(), rows = table.len(), "Loaded report");
    Ok(table)
}
