//! Worksheet export.
//!
//! Order data is first mapped onto a fixed cell contract
//! ([`map_worksheet`]) and then rendered to xlsx bytes. Keeping the two
//! apart lets callers inspect the mapping without reading binary output.

use log::{info, warn};
use tokio::task;

use crate::{
    api::MarketplaceApi,
    error::{MarketError, Result},
};

mod cells;
mod layout;
mod render;
mod sizes;

#[cfg(test)]
mod tests;

pub use cells::CellRef;
pub use layout::{
    map_worksheet, CellValue, LayoutWarning, WorksheetData, WorksheetField, WorksheetLayout,
    WorksheetTemplate,
};
pub use render::render_layout;
pub use sizes::{GarmentSpec, GarmentType, Measurements, SizeChart, MEASUREMENTS};

/// Maps `data` onto `template` and renders the workbook.
///
/// # Errors
///
/// * `MarketError::Worksheet` - When the workbook itself cannot be written.
///   Lookup misses and unusable images are not errors.
pub fn build_worksheet(
    data: &WorksheetData,
    template: &WorksheetTemplate,
    image: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let layout = map_worksheet(data, template);
    render_layout(&layout, template, image)
}

/// Builds the worksheet, fetching the design image through `api` first.
///
/// Image download failures degrade to a worksheet without an image.
/// Rendering runs on the blocking thread pool.
pub async fn export_worksheet<A>(
    api: &A,
    data: &WorksheetData,
    template: &WorksheetTemplate,
) -> Result<Vec<u8>>
where
    A: MarketplaceApi + ?Sized,
{
    let image = match data.image_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => match api.fetch_image(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Could not fetch design image {url}: {e}");
                None
            }
        },
        _ => None,
    };

    let data = data.clone();
    let template = template.clone();
    let bytes = task::spawn_blocking(move || build_worksheet(&data, &template, image.as_deref()))
        .await
        .map_err(|e| MarketError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

    info!("Worksheet rendered ({} bytes)", bytes.len());
    Ok(bytes)
}
