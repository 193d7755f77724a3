pub mod biography;
pub mod reconcile;
pub mod rows;

use anyhow::{bail, Result};
use tracing::warn;

use crate::db::{PmRecord, SkippedRow};
use crate::error::ExtractionError;
use crate::html::{self, Grid};

/// Header label of the combined biographical column, as the wikitable's
/// stacked header cell renders once tags are stripped. Doubles as the
/// header-echo literal filtered out of the body rows.
pub const BIO_COLUMN: &str = "Name(Birth\u{2013}Death)Constituency";

#[derive(Debug)]
pub struct ProcessOutcome {
    pub records: Vec<PmRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Full pipeline: page → succession table → biographical cells → life
/// dates → deduplicated records.
///
/// The succession table is the wikitable carrying the biographical column;
/// none carrying it means the source format changed incompatibly.
pub fn process_page(page_html: &str, strict: bool) -> Result<ProcessOutcome> {
    let grids = html::wikitables(page_html);
    let grid = grids
        .iter()
        .find(|g| g.headers.iter().any(|h| h == BIO_COLUMN))
        .ok_or_else(|| ExtractionError::MissingColumn(BIO_COLUMN.to_string()))?;
    process_grid(grid, strict)
}

/// Three-pass core on one grid. In strict mode any row-level error aborts
/// the run; otherwise bad rows are reported, retained as diagnostics and
/// excluded from the record set.
pub fn process_grid(grid: &Grid, strict: bool) -> Result<ProcessOutcome> {
    let cells = rows::extract_rows(grid, BIO_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for cell in cells {
        match biography::parse_cell(&cell).and_then(|bio| reconcile::to_record(&bio)) {
            Ok(record) => records.push(record),
            Err(e) if strict => bail!("row {:?}: {}", cell, e),
            Err(e) => {
                warn!("Skipping row {:?}: {}", cell, e);
                skipped.push(SkippedRow {
                    text: cell,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(ProcessOutcome {
        records: reconcile::dedup_records(records),
        skipped,
    })
}
