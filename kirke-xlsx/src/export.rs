//! Workbook writers
//!
//! Export flattens the record store into tabular sheets and never mutates
//! it. The full export carries three sheets (Kirker, Priests, No Account
//! Status); the unattended backup only the first.

use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use kirke_core::{Church, Store};

use crate::Result;

/// Header row of the church sheets; matches the import schema
const KIRKER_COLUMNS: &[&str] = &[
    "kirke_id",
    "kirke_navn",
    "kirke_addr1",
    "kirke_addr2",
    "kirke_postnr",
    "kirke_by",
    "kirke_lat",
    "kirke_long",
    "sogne_id",
    "sogne_navn",
    "sogndk_url",
    "provsti_id",
    "provsti_navn",
    "account_status",
];

/// Header row of the staff sheet; church columns denormalized in front
const PRIESTS_COLUMNS: &[&str] = &[
    "kirke_id",
    "sogne_id",
    "kirke_navn",
    "stilling",
    "navn",
    "adr1",
    "postnr_by",
    "email",
    "tlf",
];

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> Result<()> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

fn write_church_row(sheet: &mut Worksheet, row: u32, church: &Church) -> Result<()> {
    sheet.write_number(row, 0, f64::from(church.church_id))?;
    sheet.write_string(row, 1, &church.name)?;
    sheet.write_string(row, 2, &church.address1)?;
    sheet.write_string(row, 3, &church.address2)?;
    sheet.write_number(row, 4, f64::from(church.postal_code))?;
    sheet.write_string(row, 5, &church.city)?;
    sheet.write_string(row, 6, church.latitude.as_deref().unwrap_or(""))?;
    sheet.write_string(row, 7, church.longitude.as_deref().unwrap_or(""))?;
    sheet.write_number(row, 8, f64::from(church.parish_id))?;
    sheet.write_string(row, 9, &church.parish_name)?;
    sheet.write_string(row, 10, &church.source_url)?;
    sheet.write_number(row, 11, f64::from(church.deanery_id))?;
    sheet.write_string(row, 12, &church.deanery_name)?;
    sheet.write_string(row, 13, &church.account_status)?;
    Ok(())
}

fn write_church_sheet<'a>(
    sheet: &mut Worksheet,
    name: &str,
    churches: impl Iterator<Item = &'a Church>,
) -> Result<()> {
    sheet.set_name(name)?;
    write_header(sheet, KIRKER_COLUMNS)?;
    for (index, church) in churches.enumerate() {
        write_church_row(sheet, index as u32 + 1, church)?;
    }
    Ok(())
}

fn write_priests_sheet<'a>(
    sheet: &mut Worksheet,
    churches: impl Iterator<Item = &'a Church>,
) -> Result<()> {
    sheet.set_name("Priests")?;
    write_header(sheet, PRIESTS_COLUMNS)?;

    let mut row = 1u32;
    for church in churches {
        for entry in &church.staff {
            sheet.write_number(row, 0, f64::from(church.church_id))?;
            sheet.write_number(row, 1, f64::from(church.parish_id))?;
            sheet.write_string(row, 2, &church.name)?;
            sheet.write_string(row, 3, &entry.title)?;
            sheet.write_string(row, 4, &entry.name)?;
            sheet.write_string(row, 5, &entry.address)?;
            sheet.write_string(row, 6, &entry.postal_city)?;
            sheet.write_string(row, 7, &entry.email)?;
            sheet.write_string(row, 8, &entry.phone)?;
            row += 1;
        }
    }
    Ok(())
}

/// Write the full export workbook: `Kirker`, `Priests` and
/// `No Account Status` sheets.
pub fn write_workbook(path: &Path, store: &Store) -> Result<()> {
    let mut workbook = Workbook::new();

    write_church_sheet(workbook.add_worksheet(), "Kirker", store.iter())?;
    write_priests_sheet(workbook.add_worksheet(), store.iter())?;
    write_church_sheet(
        workbook.add_worksheet(),
        "No Account Status",
        store.without_account_status(),
    )?;

    workbook.save(path)?;
    info!(churches = store.len(), path = %path.display(), "Saved export workbook");
    Ok(())
}

/// Write the unattended single-sheet backup used after a scrape pass
pub fn write_backup(path: &Path, store: &Store) -> Result<()> {
    let mut workbook = Workbook::new();
    write_church_sheet(workbook.add_worksheet(), "Kirker", store.iter())?;

    workbook.save(path)?;
    info!(churches = store.len(), path = %path.display(), "Saved backup workbook");
    Ok(())
}
