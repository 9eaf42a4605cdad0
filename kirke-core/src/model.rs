//! Domain model for the church directory
//!
//! Field names are English; the Danish names used by the sogn.dk feed and
//! the spreadsheet columns (`kirke_id`, `sogne_navn`, ...) only appear at
//! the I/O boundaries.

/// A single church record, keyed by its feed id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Church {
    /// Unique church id from the feed (`kirkeId`)
    pub church_id: u32,
    /// Church name
    pub name: String,
    /// First address line
    pub address1: String,
    /// Second address line
    pub address2: String,
    /// Postal code
    pub postal_code: u32,
    /// City
    pub city: String,
    /// Parish id (`sogneId`); matched against account-status identifiers
    pub parish_id: u32,
    /// Parish name
    pub parish_name: String,
    /// Base URL of the church's sogn.dk page
    pub source_url: String,
    /// Deanery id (`provstiId`)
    pub deanery_id: u32,
    /// Deanery name
    pub deanery_name: String,
    /// Latitude as feed-literal text, if present
    pub latitude: Option<String>,
    /// Longitude as feed-literal text, if present
    pub longitude: Option<String>,
    /// Account status from the external spreadsheet; empty until set
    pub account_status: String,
    /// Staff entries in page order; replaced wholesale on re-scrape
    pub staff: Vec<StaffEntry>,
}

impl Church {
    /// Whether the account-status reconciler has assigned a status yet
    pub fn has_account_status(&self) -> bool {
        !self.account_status.is_empty()
    }

    /// Build a record from an imported spreadsheet row.
    ///
    /// Staff and account status start empty; the import path never carries
    /// them.
    pub fn from_row(row: ChurchRow) -> Self {
        Self {
            church_id: row.church_id,
            name: row.name,
            address1: row.address1,
            address2: row.address2,
            postal_code: row.postal_code,
            city: row.city,
            parish_id: row.parish_id,
            parish_name: row.parish_name,
            source_url: row.source_url,
            deanery_id: row.deanery_id,
            deanery_name: row.deanery_name,
            latitude: row.latitude,
            longitude: row.longitude,
            account_status: String::new(),
            staff: Vec::new(),
        }
    }

    /// Overwrite the core (scalar) fields from an imported row.
    ///
    /// `church_id`, `staff` and `account_status` are left untouched.
    pub fn update_from_row(&mut self, row: ChurchRow) {
        self.name = row.name;
        self.address1 = row.address1;
        self.address2 = row.address2;
        self.postal_code = row.postal_code;
        self.city = row.city;
        self.parish_id = row.parish_id;
        self.parish_name = row.parish_name;
        self.source_url = row.source_url;
        self.deanery_id = row.deanery_id;
        self.deanery_name = row.deanery_name;
        self.latitude = row.latitude;
        self.longitude = row.longitude;
    }
}

/// One staff member scraped from a church's "praester-medarb" page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffEntry {
    /// Role or title (`stilling`)
    pub title: String,
    /// Full name (`navn`)
    pub name: String,
    /// Address line (`adr1`)
    pub address: String,
    /// Combined postal code and city (`postnr_by`)
    pub postal_city: String,
    /// Email address
    pub email: String,
    /// Phone number reduced to its digits; empty if none were present
    pub phone: String,
}

/// Scalar church fields as read from a dataset spreadsheet row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChurchRow {
    pub church_id: u32,
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub postal_code: u32,
    pub city: String,
    pub parish_id: u32,
    pub parish_name: String,
    pub source_url: String,
    pub deanery_id: u32,
    pub deanery_name: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// One row of the externally maintained account-status spreadsheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountStatusRow {
    /// Semicolon-delimited identifier list (`CCLI Num`); `None` for a blank cell
    pub identifiers: Option<String>,
    /// Free-text status (`Account Status`)
    pub status: String,
}
