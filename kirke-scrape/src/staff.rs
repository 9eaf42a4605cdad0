//! Staff extraction from a church's "praester-medarb" page
//!
//! The page structure is owned by sogn.dk; our contract is only "extract by
//! these class names, tolerate absence of any one of them".

use scraper::{ElementRef, Html, Selector};

use kirke_core::StaffEntry;

use crate::{Error, Result};

struct StaffSelectors {
    person: Selector,
    person_data: Selector,
    title: Selector,
    name: Selector,
    address: Selector,
    postal_city: Selector,
    email: Selector,
    phone: Selector,
}

impl StaffSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            person: parse_selector(".person")?,
            person_data: parse_selector(".person_data")?,
            title: parse_selector(".stilling")?,
            name: parse_selector(".navn")?,
            address: parse_selector(".adr1")?,
            postal_city: parse_selector(".postnr_by")?,
            email: parse_selector(".email")?,
            phone: parse_selector(".tlf")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(e.to_string()))
}

/// Text content of the first match under `scope`, empty if absent
fn text_or_empty(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Keep only the digit characters of a phone string
fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Extract staff entries from a staff page, in page order.
///
/// Each `.person` block with a `.person_data` child yields one entry;
/// blocks without person data are skipped. Zero entries is a normal result,
/// not an error.
pub fn parse_staff(html: &str) -> Result<Vec<StaffEntry>> {
    let selectors = StaffSelectors::new()?;
    let document = Html::parse_document(html);

    let mut entries = Vec::new();
    for person in document.select(&selectors.person) {
        let Some(data) = person.select(&selectors.person_data).next() else {
            continue;
        };

        entries.push(StaffEntry {
            title: text_or_empty(data, &selectors.title),
            name: text_or_empty(data, &selectors.name),
            address: text_or_empty(data, &selectors.address),
            postal_city: text_or_empty(data, &selectors.postal_city),
            email: text_or_empty(data, &selectors.email),
            phone: digits_only(&text_or_empty(data, &selectors.phone)),
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="praester">
            <div class="person">
              <div class="person_data">
                <span class="stilling">Sognepraest</span>
                <span class="navn">Anna Andersen</span>
                <span class="adr1">Kirkevej 1</span>
                <span class="postnr_by">4800 Nykøbing F</span>
                <span class="email">anna@sogn.dk</span>
                <span class="tlf">Phone: 54-60 81 18</span>
              </div>
            </div>
            <div class="person">
              <div class="person_data">
                <span class="navn">Bent Berg</span>
                <span class="tlf">no number listed</span>
              </div>
            </div>
            <div class="person">
              <!-- no person_data: skipped -->
            </div>
          </div>
        </body></html>"#;

    #[test]
    fn test_extracts_entries_in_page_order() {
        let staff = parse_staff(PAGE).unwrap();
        assert_eq!(staff.len(), 2);

        assert_eq!(staff[0].title, "Sognepraest");
        assert_eq!(staff[0].name, "Anna Andersen");
        assert_eq!(staff[0].address, "Kirkevej 1");
        assert_eq!(staff[0].postal_city, "4800 Nykøbing F");
        assert_eq!(staff[0].email, "anna@sogn.dk");

        assert_eq!(staff[1].name, "Bent Berg");
    }

    #[test]
    fn test_phone_is_reduced_to_digits() {
        let staff = parse_staff(PAGE).unwrap();
        assert_eq!(staff[0].phone, "54608118");
    }

    #[test]
    fn test_missing_elements_become_empty_strings() {
        let staff = parse_staff(PAGE).unwrap();
        assert_eq!(staff[1].title, "");
        assert_eq!(staff[1].address, "");
        assert_eq!(staff[1].email, "");
        // "no number listed" has no digits at all
        assert_eq!(staff[1].phone, "");
    }

    #[test]
    fn test_page_without_person_blocks_yields_empty() {
        let staff = parse_staff("<html><body><p>closed</p></body></html>").unwrap();
        assert!(staff.is_empty());
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("Phone: 54-60 81 18"), "54608118");
        assert_eq!(digits_only("+45 1234"), "451234");
        assert_eq!(digits_only("none"), "");
    }
}
