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
#![allow(unused)]

mod common;

use orbitrack::{TrackerError, tle::{parse_catalog_number, parse_tle_catalog, serialize_tle_catalog, DisplayOptions, TleRecord}};
use common::*;

/// run with "cargo test -p orbitrack --test test_tle -- --nocapture"

#[test]
fn test_single_record () {
    let parsed = parse_tle_catalog( OBJ_X_TEXT, &DisplayOptions::default()).unwrap();

    assert_eq!( parsed.seeds.len(), 1);
    assert!( parsed.dropped.is_empty());

    let seed = &parsed.seeds[0];
    println!("{:?}", seed);
    assert_eq!( seed.catalog_number, 25544);
    assert_eq!( seed.record.name, "OBJ-X");
    assert_eq!( seed.record.line1, ISS_LINE1);
    assert_eq!( seed.record.line2, ISS_LINE2);
    assert_eq!( seed.record.mean_motion(), Some(15.50431138));
}

#[test]
fn test_data_line_before_name () {
    let text = format!("{}\n{}\n", ISS_LINE1, ISS_LINE2);
    match parse_tle_catalog( &text, &DisplayOptions::default()) {
        Err(TrackerError::MalformedCatalog(msg)) => println!("rejected: {}", msg),
        other => panic!("expected MalformedCatalog, got {:?}", other)
    }
}

#[test]
fn test_truncated_records () {
    let (a1, a2) = tle_lines( 1001, 10.0, 15.0);
    let (b1, _b2) = tle_lines( 1002, 20.0, 14.0);
    let (c1, c2) = tle_lines( 1003, 30.0, 13.0);
    let text = format!("A\n{a1}\n{a2}\nB\n{b1}\nC\n{c1}\n{c2}\nD\n");

    let parsed = parse_tle_catalog( &text, &DisplayOptions::default()).unwrap();
    let names: Vec<&str> = parsed.records().map(|r| r.name.as_str()).collect();
    assert_eq!( names, vec!["A", "C"]);

    assert_eq!( parsed.dropped.len(), 2);
    assert!( matches!( &parsed.dropped[0], TrackerError::TruncatedRecord { name, missing } if name == "B" && *missing == "line2"));
    assert!( matches!( &parsed.dropped[1], TrackerError::TruncatedRecord { name, missing } if name == "D" && *missing == "line1 and line2"));
}

#[test]
fn test_whitespace_and_3le () {
    let text = format!("\n\n   0 ISS (ZARYA)   \n  {}  \n\n{}\n\n", ISS_LINE1, ISS_LINE2);
    let parsed = parse_tle_catalog( &text, &DisplayOptions::default()).unwrap();

    assert_eq!( parsed.seeds.len(), 1);
    assert_eq!( parsed.seeds[0].record, TleRecord::new( ISS_NAME, ISS_LINE1, ISS_LINE2));
}

#[test]
fn test_empty_text () {
    let parsed = parse_tle_catalog( "   \n\n", &DisplayOptions::default()).unwrap();
    assert!( parsed.seeds.is_empty());
    assert!( parsed.dropped.is_empty());
}

#[test]
fn test_round_trip () {
    let text = sample_catalog();
    let parsed = parse_tle_catalog( &text, &DisplayOptions::default()).unwrap();
    let records: Vec<TleRecord> = parsed.records().cloned().collect();

    let serialized = serialize_tle_catalog( &records);
    let reparsed = parse_tle_catalog( &serialized, &DisplayOptions::default()).unwrap();
    let reparsed_records: Vec<TleRecord> = reparsed.records().cloned().collect();

    assert_eq!( records.len(), 5);
    assert_eq!( records, reparsed_records);
}

#[test]
fn test_default_options () {
    let defaults = DisplayOptions { orbit_minutes: Some(300), pinned_trail: true, ..DisplayOptions::default() };
    let parsed = parse_tle_catalog( &sample_catalog(), &defaults).unwrap();

    assert!( parsed.seeds.iter().all(|s| s.options == defaults));
}

#[test]
fn test_catalog_numbers () {
    assert_eq!( parse_catalog_number("25544"), Some(25544));
    assert_eq!( parse_catalog_number("    5"), Some(5));
    assert_eq!( parse_catalog_number("A0001"), Some(100001));
    assert_eq!( parse_catalog_number("J0000"), Some(180000));
    assert_eq!( parse_catalog_number("Z9999"), Some(339999));
    assert_eq!( parse_catalog_number("I0001"), None);
    assert_eq!( parse_catalog_number("x1234"), None);
    assert_eq!( parse_catalog_number(""), None);
}

#[test]
fn test_mismatched_catalog_numbers () {
    let (l1, _) = tle_lines( 1001, 10.0, 15.0);
    let (_, l2) = tle_lines( 1002, 10.0, 15.0);
    let text = format!("MISMATCH\n{l1}\n{l2}\n{}", OBJ_X_TEXT);

    let parsed = parse_tle_catalog( &text, &DisplayOptions::default()).unwrap();
    assert_eq!( parsed.seeds.len(), 1);
    assert_eq!( parsed.seeds[0].record.name, "OBJ-X");
    assert!( matches!( parsed.dropped[0], TrackerError::InvalidElements(_)));
}
