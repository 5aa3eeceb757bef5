use log::{debug, warn};
use rust_xlsxwriter::{Format, Image, Workbook, Worksheet};

use super::{
    cells::CellRef,
    layout::{CellValue, WorksheetLayout, WorksheetTemplate},
};
use crate::error::Result;

/// Writes the template labels and the mapped layout into an xlsx workbook.
///
/// A design image that cannot be decoded or placed is skipped with a
/// warning; the rest of the sheet is still produced.
pub fn render_layout(
    layout: &WorksheetLayout,
    template: &WorksheetTemplate,
    image: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let label_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&template.sheet_name)?;
    worksheet.set_column_width(0, 16)?;

    for (cell, label) in &template.labels {
        worksheet.write_string_with_format(cell.row, cell.col, label, &label_format)?;
    }

    for (cell, value) in &layout.cells {
        match value {
            CellValue::Text(text) => {
                worksheet.write_string(cell.row, cell.col, text)?;
            }
            CellValue::Number(number) => {
                worksheet.write_number(cell.row, cell.col, *number)?;
            }
            CellValue::Blank => {}
        }
    }

    if let Some(bytes) = image {
        match embed_image(worksheet, template.image_anchor, bytes) {
            Ok(()) => debug!("Embedded design image at {}", template.image_anchor),
            Err(e) => warn!("Design image skipped: {e}"),
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn embed_image(worksheet: &mut Worksheet, anchor: CellRef, bytes: &[u8]) -> Result<()> {
    let image = Image::new_from_buffer(bytes)?;
    worksheet.insert_image(anchor.row, anchor.col, &image)?;
    Ok(())
}
