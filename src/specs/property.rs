// src/specs/property.rs
//
// Parcel details page.
//
// Owners come from the data table whose header row is `tr.table_header`:
// the column labelled "Owner(s)" is read from every following row, each cell
// split on line breaks, one owner per line.
// The six single-value fields are `<span>`s with fixed ids.

use scraper::{ElementRef, Html, Selector};

use crate::config::consts::*;
use crate::core::html::{element_text, id_selector, next_sibling_elements, selector, text_with_breaks};
use crate::core::sanitize::{format_owner_names, render_list};
use crate::error::{ParseError, Result};

/// One parsed parcel page. `None` means the field was not on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    pub owners: Option<Vec<String>>,
    pub property_address: Option<String>,
    pub municipality: Option<String>,
    pub parcel_control_number: Option<String>,
    pub subdivision: Option<String>,
    pub sale_date: Option<String>,
    pub legal_description: Option<String>,
}

impl PropertyRecord {
    /// Output row in `OUTPUT_HEADERS` order, placeholders substituted.
    pub fn to_row(&self) -> Vec<String> {
        let owners = match &self.owners {
            Some(names) => render_list(names),
            None => s!(PLACEHOLDER),
        };
        let scalar = |v: &Option<String>| v.clone().unwrap_or_else(|| s!(PLACEHOLDER));

        vec![
            owners,
            scalar(&self.property_address),
            scalar(&self.municipality),
            scalar(&self.parcel_control_number),
            scalar(&self.subdivision),
            scalar(&self.sale_date),
            scalar(&self.legal_description),
        ]
    }
}

/// Compiled selectors, built once per run and reused for every document.
pub struct PropertySpec {
    header_row: Selector,
    th: Selector,
    td: Selector,
    location: Selector,
    municipality: Selector,
    pcn: Selector,
    subdivision: Selector,
    sale_date: Selector,
    legal_desc: Selector,
}

impl PropertySpec {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header_row: selector(&join!("tr.", HEADER_ROW_CLASS))?,
            th: selector("th")?,
            td: selector("td")?,
            location: id_selector(ID_LOCATION)?,
            municipality: id_selector(ID_MUNICIPALITY)?,
            pcn: id_selector(ID_PCN)?,
            subdivision: id_selector(ID_SUBDIVISION)?,
            sale_date: id_selector(ID_SALE_DATE)?,
            legal_desc: id_selector(ID_LEGAL_DESC)?,
        })
    }

    /// Parse one raw document. Fails only when the owners table or its
    /// "Owner(s)" column cannot be located; scalar fields never fail.
    pub fn parse(&self, html: &str) -> std::result::Result<PropertyRecord, ParseError> {
        let doc = Html::parse_document(html);

        let owners = self.owners(&doc)?;

        Ok(PropertyRecord {
            owners,
            property_address: first_text(&doc, &self.location),
            municipality: first_text(&doc, &self.municipality),
            parcel_control_number: first_text(&doc, &self.pcn),
            subdivision: first_text(&doc, &self.subdivision),
            sale_date: first_text(&doc, &self.sale_date),
            legal_description: first_text(&doc, &self.legal_desc),
        })
    }

    fn owners(&self, doc: &Html) -> std::result::Result<Option<Vec<String>>, ParseError> {
        let header = doc
            .select(&self.header_row)
            .next()
            .ok_or_else(|| ParseError::TableMissing(s!(HEADER_ROW_CLASS)))?;

        let col = self
            .owner_column(header)
            .ok_or_else(|| ParseError::OwnerColumnMissing(s!(OWNERS_LABEL)))?;

        let mut names = Vec::new();
        for (i, row) in next_sibling_elements(header, "tr").enumerate() {
            let Some(cell) = row.select(&self.td).nth(col) else {
                logd!("owners table row {}: no cell at column {col}", i + 1);
                continue;
            };
            let text = text_with_breaks(cell);
            let lines: Vec<&str> = text.lines().collect();
            names.extend(format_owner_names(&lines));
        }

        Ok((!names.is_empty()).then_some(names))
    }

    fn owner_column(&self, header: ElementRef<'_>) -> Option<usize> {
        header
            .select(&self.th)
            .position(|th| th.text().collect::<String>().trim() == OWNERS_LABEL)
    }
}

fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel).next().and_then(element_text)
}
