/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! parsing of TLE catalog text (celestrak/amsat "name, line1, line2" files)

use std::fmt::Write as _;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use crate::{CatalogNumber, errors::{malformed, Result, TrackerError}, renderer::ColorHint};

/// raw TLE as it was read from the catalog text. This is immutable once parsed
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleRecord {
    pub fn new (name: impl ToString, line1: impl ToString, line2: impl ToString)->Self {
        TleRecord { name: name.to_string(), line1: line1.to_string(), line2: line2.to_string() }
    }

    /// the NORAD catalog number from columns 3-7. Both lines have to agree
    pub fn catalog_number (&self)->Option<CatalogNumber> {
        let n1 = self.line1.get(2..7).and_then( parse_catalog_number)?;
        match self.line2.get(2..7).and_then( parse_catalog_number) {
            Some(n2) if n2 != n1 => None,
            _ => Some(n1)
        }
    }

    /// mean motion in revolutions per day (line 2, columns 53-63)
    pub fn mean_motion (&self)->Option<f64> {
        self.line2.get(52..63)
            .and_then( |s| s.trim().parse::<f64>().ok())
            .filter( |n| n.is_finite() && *n > 0.0)
    }

    pub fn to_tle_text (&self)->String {
        format!("{}\n{}\n{}\n", self.name, self.line1, self.line2)
    }
}

/// parse a 5 character catalog number field, which can be in Alpha-5 format for numbers > 99999
/// (leading letter A-Z without I and O for 10..33 ten-thousands)
pub fn parse_catalog_number (field: &str)->Option<CatalogNumber> {
    let field = field.trim();
    let mut chars = field.chars();
    let first = chars.next()?;

    if first.is_ascii_digit() {
        field.parse::<CatalogNumber>().ok()

    } else if first.is_ascii_uppercase() && first != 'I' && first != 'O' {
        let rest = chars.as_str();
        if rest.len() != 4 || !rest.chars().all(|c| c.is_ascii_digit()) { return None }

        let mut prefix = (first as u32) - ('A' as u32) + 10;
        if first > 'I' { prefix -= 1 }
        if first > 'O' { prefix -= 1 }
        rest.parse::<CatalogNumber>().ok().map( |n| prefix * 10000 + n)

    } else {
        None
    }
}

/// display configuration that is attached to catalog entries. Callers can provide defaults for a whole
/// catalog and per-record predicates can modify them (e.g. to pin the trail of a single object)
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct DisplayOptions {
    #[serde(default)]
    pub orbit_minutes: Option<u32>,  // explicit trail span

    #[serde(default)]
    pub pinned_trail: bool,          // show trail regardless of selection

    #[serde(default)]
    pub color: Option<ColorHint>,

    #[serde(default)]
    pub size: Option<f64>,
}

/// a parsed catalog entry that is not yet added to a Catalog
#[derive(Debug,Clone,PartialEq)]
pub struct TleSeed {
    pub catalog_number: CatalogNumber,
    pub record: TleRecord,
    pub options: DisplayOptions,
}

/// the result of parsing a catalog text. Dropped records do not abort the parse
#[derive(Debug,Default)]
pub struct ParsedCatalog {
    pub seeds: Vec<TleSeed>,
    pub dropped: Vec<TrackerError>,
}

impl ParsedCatalog {
    pub fn records (&self)->impl Iterator<Item=&TleRecord> {
        self.seeds.iter().map(|s| &s.record)
    }
}

struct PartialRecord {
    name: String,
    line1: Option<String>,
    line2: Option<String>,
}

/// parse TLE catalog text into an ordered sequence of seeds.
/// A line that does not start with '1' or '2' starts a new record, the following '1' and '2' lines
/// set the element lines of that record. Element lines before any name line make the whole text invalid
pub fn parse_tle_catalog (text: &str, defaults: &DisplayOptions) -> Result<ParsedCatalog> {
    let mut parsed = ParsedCatalog::default();
    let mut current: Option<PartialRecord> = None;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() { continue }

        if line.starts_with('1') || line.starts_with('2') {
            let Some(rec) = current.as_mut() else {
                return Err( malformed!("line {}: element line before any name line", i+1))
            };
            let slot = if line.starts_with('1') { &mut rec.line1 } else { &mut rec.line2 };
            if slot.is_some() {
                debug!("line {}: replacing element line of '{}'", i+1, rec.name);
            }
            *slot = Some(line.to_string());

        } else {
            if let Some(rec) = current.take() {
                finish_record( rec, defaults, &mut parsed);
            }
            let name = line.strip_prefix("0 ").map(|s| s.trim()).unwrap_or(line); // 3LE name line
            current = Some( PartialRecord { name: name.to_string(), line1: None, line2: None });
        }
    }

    if let Some(rec) = current.take() {
        finish_record( rec, defaults, &mut parsed);
    }

    if !parsed.dropped.is_empty() {
        warn!("dropped {} of {} catalog records", parsed.dropped.len(), parsed.dropped.len() + parsed.seeds.len());
    }

    Ok(parsed)
}

fn finish_record (rec: PartialRecord, defaults: &DisplayOptions, parsed: &mut ParsedCatalog) {
    let missing = match (&rec.line1, &rec.line2) {
        (None, None) => Some("line1 and line2"),
        (None, _) => Some("line1"),
        (_, None) => Some("line2"),
        _ => None
    };
    if let Some(missing) = missing {
        warn!("dropping truncated record '{}': missing {}", rec.name, missing);
        parsed.dropped.push( TrackerError::TruncatedRecord { name: rec.name, missing });
        return
    }

    let record = TleRecord { name: rec.name, line1: rec.line1.unwrap_or_default(), line2: rec.line2.unwrap_or_default() };
    match record.catalog_number() {
        Some(catalog_number) => {
            parsed.seeds.push( TleSeed { catalog_number, record, options: defaults.clone() });
        }
        None => {
            warn!("dropping record '{}': no valid catalog number", record.name);
            parsed.dropped.push( TrackerError::InvalidElements( format!("'{}': no valid catalog number", record.name)));
        }
    }
}

/// the inverse of [`parse_tle_catalog`]
pub fn serialize_tle_catalog<'a,I> (records: I) -> String where I: IntoIterator<Item=&'a TleRecord> {
    let mut buf = String::new();
    for rec in records {
        let _ = write!( buf, "{}", rec.to_tle_text());
    }
    buf
}
