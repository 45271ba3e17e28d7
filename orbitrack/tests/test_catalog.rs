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

use orbitrack::{
    ColorHint, TrackerError,
    catalog::{Catalog, TrackedObject},
    headless::{TrailId, VisualId},
    tle::{parse_tle_catalog, DisplayOptions, TleSeed},
};
use common::*;

type TestCatalog = Catalog<CircularElements, VisualId, TrailId>;

fn seeds ()->Vec<TleSeed> {
    parse_tle_catalog( &sample_catalog(), &DisplayOptions::default()).unwrap().seeds
}

fn filled_catalog ()->TestCatalog {
    let mut catalog = TestCatalog::new();
    for (i, seed) in seeds().into_iter().enumerate() {
        catalog.add( TrackedObject::new( seed, ColorHint(0xffffff), VisualId(i as u32))).unwrap();
    }
    catalog
}

#[test]
fn test_add_and_lookup () {
    let catalog = filled_catalog();

    assert_eq!( catalog.len(), 5);
    assert_eq!( catalog.ids(), vec![25544, 44713, 44714, 24876, 33591]);

    let iss = catalog.find_by_catalog_number( 25544).unwrap();
    assert_eq!( iss.name, "ISS (ZARYA)");
    assert_eq!( iss.visual(), VisualId(0));
    assert!( !iss.has_trail());
    assert!( iss.elements().is_none()); // derived lazily

    let noaa = catalog.find_by_visual( VisualId(4)).unwrap();
    assert_eq!( noaa.catalog_number, 33591);

    assert!( catalog.find_by_catalog_number( 99999).is_none());
    assert!( catalog.find_by_visual( VisualId(42)).is_none());
}

#[test]
fn test_duplicates () {
    let mut catalog = filled_catalog();
    let dup = seeds().into_iter().next().unwrap();

    match catalog.add( TrackedObject::new( dup, ColorHint(0), VisualId(100))) {
        Err(e @ TrackerError::DuplicateCatalogEntry(25544)) => assert!( e.is_benign()),
        other => panic!("expected duplicate, got {:?}", other.map(|o| o.catalog_number))
    }

    assert_eq!( catalog.len(), 5);
    assert!( catalog.find_by_visual( VisualId(100)).is_none());
    assert_eq!( catalog.find_by_catalog_number( 25544).unwrap().visual(), VisualId(0));
}

#[test]
fn test_duplicate_visual () {
    let mut catalog = filled_catalog();
    let (l1, l2) = tle_lines( 1234, 10.0, 15.0);
    let text = format!("NEW\n{l1}\n{l2}\n");
    let seed = parse_tle_catalog( &text, &DisplayOptions::default()).unwrap().seeds.remove(0);

    assert!( catalog.add( TrackedObject::new( seed, ColorHint(0), VisualId(2))).is_err());
    assert!( !catalog.contains( 1234));
    assert_eq!( catalog.find_by_visual( VisualId(2)).unwrap().catalog_number, 44714);
}

#[test]
fn test_remove () {
    let mut catalog = filled_catalog();

    let removed = catalog.remove( 44713).unwrap();
    assert_eq!( removed.name, "STARLINK-1007");
    assert!( catalog.remove( 44713).is_none());

    assert_eq!( catalog.ids(), vec![25544, 44714, 24876, 33591]);
    assert!( catalog.find_by_visual( VisualId(1)).is_none());

    // indices behind the removed object have to be updated
    assert_eq!( catalog.find_by_visual( VisualId(3)).unwrap().catalog_number, 24876);
    assert_eq!( catalog.find_by_catalog_number( 33591).unwrap().visual(), VisualId(4));
}

#[test]
fn test_find_by_name () {
    let catalog = filled_catalog();

    let starlinks: Vec<u32> = catalog.find_by_name( "starlink").map(|o| o.catalog_number).collect();
    assert_eq!( starlinks, vec![44713, 44714]);

    assert_eq!( catalog.find_by_name( "Zarya").count(), 1);
    assert_eq!( catalog.find_by_name( "").count(), 0);
    assert_eq!( catalog.find_by_name( "hubble").count(), 0);
}

#[test]
fn test_drain () {
    let mut catalog = filled_catalog();
    let objects = catalog.drain();

    assert_eq!( objects.len(), 5);
    assert!( catalog.is_empty());
    assert!( catalog.find_by_visual( VisualId(0)).is_none());
}
