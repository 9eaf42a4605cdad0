//! Workbook readers
//!
//! Both importers read the first sheet and resolve columns by header name,
//! so column order in the file does not matter. Missing columns and
//! untypable cells are named errors instead of silent skips.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::info;

use kirke_core::{AccountStatusRow, ChurchRow};

use crate::{Error, Result};

/// Column name for the semicolon-delimited identifier list
const COL_CCLI_NUM: &str = "CCLI Num";
/// Column name for the status text
const COL_ACCOUNT_STATUS: &str = "Account Status";

/// Header-resolved view of one sheet
struct Sheet {
    columns: HashMap<String, usize>,
    range: Range<Data>,
}

impl Sheet {
    fn open(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(0).ok_or(Error::NoSheet)??;

        let mut columns = HashMap::new();
        if let Some(header) = range.rows().next() {
            for (index, cell) in header.iter().enumerate() {
                let name = cell.to_string().trim().to_string();
                if !name.is_empty() {
                    columns.insert(name, index);
                }
            }
        }

        Ok(Self { columns, range })
    }

    fn require(&self, column: &str) -> Result<usize> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    /// Data rows with their 1-based spreadsheet row number
    fn data_rows(&self) -> impl Iterator<Item = (usize, &[Data])> {
        self.range.rows().enumerate().skip(1).map(|(i, r)| (i + 1, r))
    }
}

fn cell<'a>(row: &'a [Data], index: usize) -> &'a Data {
    row.get(index).unwrap_or(&Data::Empty)
}

fn cell_string(row: &[Data], index: usize) -> String {
    match cell(row, index) {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_opt_string(row: &[Data], index: usize) -> Option<String> {
    let text = cell_string(row, index);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn cell_u32(row: &[Data], index: usize, row_number: usize, column: &str) -> Result<u32> {
    let invalid = |message: String| Error::InvalidCell {
        row: row_number,
        column: column.to_string(),
        message,
    };

    match cell(row, index) {
        Data::Int(i) => u32::try_from(*i).map_err(|_| invalid(format!("out of range: {}", i))),
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
            Ok(*f as u32)
        }
        Data::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(format!("expected an integer, got {:?}", s))),
        other => Err(invalid(format!("expected an integer, got {}", other))),
    }
}

/// Read a previously exported dataset workbook into church rows.
///
/// All the Danish scalar columns are required; `kirke_lat` / `kirke_long`
/// are optional. An `account_status` column is tolerated but deliberately
/// not read - the import path never touches account status.
pub fn read_dataset(path: &Path) -> Result<Vec<ChurchRow>> {
    let sheet = Sheet::open(path)?;

    let col_id = sheet.require("kirke_id")?;
    let col_name = sheet.require("kirke_navn")?;
    let col_addr1 = sheet.require("kirke_addr1")?;
    let col_addr2 = sheet.require("kirke_addr2")?;
    let col_postnr = sheet.require("kirke_postnr")?;
    let col_by = sheet.require("kirke_by")?;
    let col_sogne_id = sheet.require("sogne_id")?;
    let col_sogne_navn = sheet.require("sogne_navn")?;
    let col_url = sheet.require("sogndk_url")?;
    let col_provsti_id = sheet.require("provsti_id")?;
    let col_provsti_navn = sheet.require("provsti_navn")?;
    let col_lat = sheet.columns.get("kirke_lat").copied();
    let col_long = sheet.columns.get("kirke_long").copied();

    let mut rows = Vec::new();
    for (row_number, row) in sheet.data_rows() {
        rows.push(ChurchRow {
            church_id: cell_u32(row, col_id, row_number, "kirke_id")?,
            name: cell_string(row, col_name),
            address1: cell_string(row, col_addr1),
            address2: cell_string(row, col_addr2),
            postal_code: cell_u32(row, col_postnr, row_number, "kirke_postnr")?,
            city: cell_string(row, col_by),
            parish_id: cell_u32(row, col_sogne_id, row_number, "sogne_id")?,
            parish_name: cell_string(row, col_sogne_navn),
            source_url: cell_string(row, col_url),
            deanery_id: cell_u32(row, col_provsti_id, row_number, "provsti_id")?,
            deanery_name: cell_string(row, col_provsti_navn),
            latitude: col_lat.and_then(|i| cell_opt_string(row, i)),
            longitude: col_long.and_then(|i| cell_opt_string(row, i)),
        });
    }

    info!(rows = rows.len(), path = %path.display(), "Loaded dataset workbook");
    Ok(rows)
}

/// Read an account-status workbook.
///
/// Requires the `CCLI Num` and `Account Status` columns; a blank identifier
/// cell maps to `None` so the reconciler can skip the row.
pub fn read_account_status(path: &Path) -> Result<Vec<AccountStatusRow>> {
    let sheet = Sheet::open(path)?;

    let col_ids = sheet.require(COL_CCLI_NUM)?;
    let col_status = sheet.require(COL_ACCOUNT_STATUS)?;

    let rows: Vec<_> = sheet
        .data_rows()
        .map(|(_, row)| AccountStatusRow {
            identifiers: cell_opt_string(row, col_ids),
            status: cell_string(row, col_status),
        })
        .collect();

    info!(rows = rows.len(), path = %path.display(), "Loaded account-status workbook");
    Ok(rows)
}
