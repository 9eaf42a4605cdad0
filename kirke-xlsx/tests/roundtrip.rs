//! Export/import round-trip through real workbooks on disk

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use kirke_core::{ChurchRow, StaffEntry, Store};
use kirke_xlsx::{read_account_status, read_dataset, write_backup, write_workbook};

fn sample_store() -> Store {
    let mut store = Store::new();
    store.merge_row(ChurchRow {
        church_id: 10,
        name: "Alpha Kirke".to_string(),
        address1: "Kirkevej 1".to_string(),
        address2: "".to_string(),
        postal_code: 4800,
        city: "Nykøbing F".to_string(),
        parish_id: 7000,
        parish_name: "Alpha Sogn".to_string(),
        source_url: "http://sogn.dk/7000/".to_string(),
        deanery_id: 99,
        deanery_name: "Falster Provsti".to_string(),
        latitude: Some("54.76".to_string()),
        longitude: Some("11.87".to_string()),
    });
    store.merge_row(ChurchRow {
        church_id: 20,
        name: "Beta Kirke".to_string(),
        address1: "Torvet 2".to_string(),
        address2: "1. sal".to_string(),
        postal_code: 4900,
        city: "Nakskov".to_string(),
        parish_id: 7001,
        parish_name: "Beta Sogn".to_string(),
        source_url: "http://sogn.dk/7001/".to_string(),
        deanery_id: 98,
        deanery_name: "Lolland Provsti".to_string(),
        latitude: None,
        longitude: None,
    });
    store
}

fn sheet_row_count(path: &Path, sheet: &str) -> usize {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.rows().count()
}

#[test]
fn export_then_import_reproduces_scalar_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kirker.xlsx");

    let store = sample_store();
    write_workbook(&path, &store).unwrap();

    let rows = read_dataset(&path).unwrap();
    assert_eq!(rows.len(), 2);

    let original: Vec<ChurchRow> = store
        .iter()
        .map(|c| ChurchRow {
            church_id: c.church_id,
            name: c.name.clone(),
            address1: c.address1.clone(),
            address2: c.address2.clone(),
            postal_code: c.postal_code,
            city: c.city.clone(),
            parish_id: c.parish_id,
            parish_name: c.parish_name.clone(),
            source_url: c.source_url.clone(),
            deanery_id: c.deanery_id,
            deanery_name: c.deanery_name.clone(),
            latitude: c.latitude.clone(),
            longitude: c.longitude.clone(),
        })
        .collect();

    assert_eq!(rows, original);
}

#[test]
fn importing_the_same_export_twice_does_not_duplicate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kirker.xlsx");

    let exported = sample_store();
    write_workbook(&path, &exported).unwrap();

    let mut store = Store::new();
    for row in read_dataset(&path).unwrap() {
        store.merge_row(row);
    }
    for row in read_dataset(&path).unwrap() {
        store.merge_row(row);
    }

    assert_eq!(store.len(), 2);
    assert!(store.get(10).is_some());
    assert!(store.get(20).is_some());
}

#[test]
fn no_account_status_sheet_lists_unreconciled_churches() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kirker.xlsx");

    // Neither church has a status yet: both land on the worklist sheet
    let store = sample_store();
    write_workbook(&path, &store).unwrap();
    assert_eq!(sheet_row_count(&path, "No Account Status"), 3); // header + 2

    // One status set: only the other remains
    let mut store = sample_store();
    store.iter_mut().next().unwrap().account_status = "Active".to_string();
    write_workbook(&path, &store).unwrap();
    assert_eq!(sheet_row_count(&path, "No Account Status"), 2);
    assert_eq!(sheet_row_count(&path, "Kirker"), 3);
}

#[test]
fn priests_sheet_denormalizes_church_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kirker.xlsx");

    let mut store = sample_store();
    store.iter_mut().next().unwrap().staff = vec![
        StaffEntry {
            title: "Sognepraest".to_string(),
            name: "Anna Andersen".to_string(),
            address: "Kirkevej 1".to_string(),
            postal_city: "4800 Nykøbing F".to_string(),
            email: "anna@sogn.dk".to_string(),
            phone: "54608118".to_string(),
        },
        StaffEntry {
            name: "Bent Berg".to_string(),
            ..Default::default()
        },
    ];
    write_workbook(&path, &store).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range("Priests").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows.len(), 3); // header + 2 staff entries
    assert_eq!(rows[0][0], "kirke_id");
    assert_eq!(rows[1][0], "10");
    assert_eq!(rows[1][1], "7000");
    assert_eq!(rows[1][2], "Alpha Kirke");
    assert_eq!(rows[1][4], "Anna Andersen");
    assert_eq!(rows[1][8], "54608118");
    assert_eq!(rows[2][4], "Bent Berg");
}

#[test]
fn backup_has_single_kirker_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kirker_backup.xlsx");

    write_backup(&path, &sample_store()).unwrap();

    let workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Kirker".to_string()]);
}

#[test]
fn account_status_reader_maps_blank_cells_to_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("status.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "CCLI Num").unwrap();
    sheet.write_string(0, 1, "Account Status").unwrap();
    sheet.write_string(1, 0, "7000;7001").unwrap();
    sheet.write_string(1, 1, "Active").unwrap();
    // blank identifier cell
    sheet.write_string(2, 1, "Expired").unwrap();
    workbook.save(&path).unwrap();

    let rows = read_account_status(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].identifiers.as_deref(), Some("7000;7001"));
    assert_eq!(rows[0].status, "Active");
    assert_eq!(rows[1].identifiers, None);
    assert_eq!(rows[1].status, "Expired");
}

#[test]
fn dataset_reader_rejects_missing_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "kirke_id").unwrap();
    sheet.write_string(0, 1, "kirke_navn").unwrap();
    workbook.save(&path).unwrap();

    let err = read_dataset(&path).unwrap_err();
    assert!(matches!(err, kirke_xlsx::Error::MissingColumn(_)));
}

#[test]
fn dataset_reader_rejects_non_numeric_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.xlsx");

    // Hand-build a sheet with a bad kirke_id
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let columns = [
        "kirke_id",
        "kirke_navn",
        "kirke_addr1",
        "kirke_addr2",
        "kirke_postnr",
        "kirke_by",
        "sogne_id",
        "sogne_navn",
        "sogndk_url",
        "provsti_id",
        "provsti_navn",
    ];
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    sheet.write_string(1, 0, "not-a-number").unwrap();
    workbook.save(&path).unwrap();

    let err = read_dataset(&path).unwrap_err();
    assert!(matches!(err, kirke_xlsx::Error::InvalidCell { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = read_dataset(Path::new("/definitely/not/here.xlsx")).unwrap_err();
    assert!(matches!(
        err,
        kirke_xlsx::Error::Read(_) | kirke_xlsx::Error::Io(_)
    ));
}

/// One church from a dataset workbook, one reconciler pass, one export:
/// the end-to-end flow the menu driver performs (minus the network).
#[test]
fn end_to_end_reconcile_and_export() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("dataset.xlsx");
    let status = dir.path().join("status.xlsx");
    let out = dir.path().join("out.xlsx");

    write_workbook(&dataset, &sample_store()).unwrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "CCLI Num").unwrap();
    sheet.write_string(0, 1, "Account Status").unwrap();
    sheet.write_string(1, 0, "7000").unwrap();
    sheet.write_string(1, 1, "Active").unwrap();
    workbook.save(&status).unwrap();

    let mut store = Store::new();
    for row in read_dataset(&dataset).unwrap() {
        store.merge_row(row);
    }
    let rows = read_account_status(&status).unwrap();
    let assigned = kirke_core::reconcile::apply_account_status(store.churches_mut(), &rows);

    assert_eq!(assigned, 1);
    assert_eq!(store.get(10).unwrap().account_status, "Active");
    write_workbook(&out, &store).unwrap();
    assert_eq!(sheet_row_count(&out, "No Account Status"), 2); // header + church 20
}
