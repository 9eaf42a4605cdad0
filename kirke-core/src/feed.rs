//! Parser for the sogn.dk church directory feed
//!
//! The feed is an XML document shaped as `<kirker><kirke>...</kirke>...</kirker>`.
//! A syntax error, a missing required field or a non-numeric id anywhere
//! fails the whole parse; callers never see a partial record list.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::model::Church;
use crate::{Error, Result};

/// Accumulates the child elements of one `<kirke>` until it closes
#[derive(Debug, Default)]
struct KirkeFields {
    church_id: Option<String>,
    name: Option<String>,
    address1: Option<String>,
    address2: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
    parish_id: Option<String>,
    parish_name: Option<String>,
    source_url: Option<String>,
    deanery_id: Option<String>,
    deanery_name: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

impl KirkeFields {
    fn set(&mut self, element: &[u8], text: String) {
        match element {
            b"kirkeId" => self.church_id = Some(text),
            b"kirkenavn" => self.name = Some(text),
            b"kirkeaddr1" => self.address1 = Some(text),
            b"kirkeaddr2" => self.address2 = Some(text),
            b"kirkepostnr" => self.postal_code = Some(text),
            b"kirkeby" => self.city = Some(text),
            b"sogneId" => self.parish_id = Some(text),
            b"sognenavn" => self.parish_name = Some(text),
            b"sogndkurl" => self.source_url = Some(text),
            b"provstiId" => self.deanery_id = Some(text),
            b"provstinavn" => self.deanery_name = Some(text),
            b"kirkelat" => self.latitude = Some(text),
            b"kirkelong" => self.longitude = Some(text),
            _ => {}
        }
    }

    fn finish(self) -> Result<Church> {
        Ok(Church {
            church_id: require_u32(self.church_id, "kirkeId")?,
            name: require(self.name, "kirkenavn")?,
            address1: require(self.address1, "kirkeaddr1")?,
            address2: require(self.address2, "kirkeaddr2")?,
            postal_code: require_u32(self.postal_code, "kirkepostnr")?,
            city: require(self.city, "kirkeby")?,
            parish_id: require_u32(self.parish_id, "sogneId")?,
            parish_name: require(self.parish_name, "sognenavn")?,
            source_url: require(self.source_url, "sogndkurl")?,
            deanery_id: require_u32(self.deanery_id, "provstiId")?,
            deanery_name: require(self.deanery_name, "provstinavn")?,
            latitude: self.latitude,
            longitude: self.longitude,
            account_status: String::new(),
            staff: Vec::new(),
        })
    }
}

fn require(value: Option<String>, element: &str) -> Result<String> {
    value.ok_or_else(|| Error::MalformedFeed(format!("missing <{}> in <kirke>", element)))
}

fn require_u32(value: Option<String>, element: &str) -> Result<u32> {
    let text = require(value, element)?;
    text.trim()
        .parse()
        .map_err(|_| Error::MalformedFeed(format!("non-numeric <{}>: {:?}", element, text)))
}

/// Parse the raw feed document into church records, in document order
pub fn parse_feed(xml: &str) -> Result<Vec<Church>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut churches = Vec::new();
    let mut current: Option<KirkeFields> = None;
    let mut current_element: Option<Vec<u8>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"kirke" {
                    current = Some(KirkeFields::default());
                } else if let Some(fields) = current.as_mut() {
                    let element = e.name().as_ref().to_vec();
                    // A present-but-empty element still counts as supplied;
                    // a later text event overwrites the empty default
                    fields.set(&element, String::new());
                    current_element = Some(element);
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(fields) = current.as_mut() {
                    fields.set(e.name().as_ref(), String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(fields), Some(element)) = (current.as_mut(), current_element.as_ref())
                {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::MalformedFeed(e.to_string()))?;
                    fields.set(element, text.into_owned());
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"kirke" {
                    if let Some(fields) = current.take() {
                        churches.push(fields.finish()?);
                    }
                } else {
                    current_element = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(Error::MalformedFeed(e.to_string())),
        }
    }

    tracing::debug!(count = churches.len(), "Parsed feed");
    Ok(churches)
}
