//! Sequential staff-scrape loop
//!
//! Churches are scraped strictly one after another with a pacing delay
//! between them. A failure for one church is contained to that church: its
//! staff list is reset to empty and the loop moves on.

use std::time::Duration;

use tracing::{info, warn};

use kirke_core::Store;

use crate::client::SognClient;
use crate::staff::parse_staff;

/// Counts reported by a completed scrape pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Churches whose staff page was fetched and parsed
    pub scraped: usize,
    /// Churches skipped because of a transport or page failure
    pub failed: usize,
}

/// Scrape the staff page of every church in the store.
///
/// Each church's staff sequence is replaced wholesale: with the parsed
/// entries on success, with an empty list on failure. The pacing `delay`
/// sleeps between successive churches, not after the last one.
pub fn scrape_staff(client: &SognClient, store: &mut Store, delay: Duration) -> ScrapeSummary {
    let total = store.len();
    let mut summary = ScrapeSummary::default();

    for (index, church) in store.iter_mut().enumerate() {
        if index > 0 {
            std::thread::sleep(delay);
        }

        let result = client
            .fetch_staff_page(&church.source_url)
            .and_then(|html| parse_staff(&html));

        match result {
            Ok(staff) => {
                info!(
                    church_id = church.church_id,
                    staff = staff.len(),
                    progress = index + 1,
                    total,
                    "Scraped staff page"
                );
                church.staff = staff;
                summary.scraped += 1;
            }
            Err(e) => {
                warn!(
                    church_id = church.church_id,
                    url = %church.source_url,
                    error = %e,
                    "Failed to scrape staff page, leaving staff empty"
                );
                church.staff.clear();
                summary.failed += 1;
            }
        }
    }

    summary
}
