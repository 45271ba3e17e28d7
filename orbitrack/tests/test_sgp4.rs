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

use chrono::{TimeDelta, TimeZone, Utc};
use orbitrack_common::datetime::add_minutes;
use orbitrack::{
    HeadlessRenderer, Propagator, ReferenceFrame, Sgp4Propagator, TrackerConfig, TrackerError, TrackingEngine,
    propagator::gmst, tle::DisplayOptions,
};
use common::*;

/// SGP4 based tests with the ISS elements from 2019-09-02

#[test]
fn test_iss_elements () {
    let e = Sgp4Propagator.derive_elements( ISS_LINE1, ISS_LINE2).unwrap();
    println!("{:?}", e);

    assert_eq!( e.norad_id(), 25544);
    assert!( (e.mean_motion() - 15.50431138).abs() < 1e-8);
    assert!( (e.epoch() - t0()).num_seconds().abs() <= 1);
}

#[test]
fn test_iss_position () {
    let p = Sgp4Propagator;
    let e = p.derive_elements( ISS_LINE1, ISS_LINE2).unwrap();

    for m in [0, 45, 90, 720, 1440] {
        let r = p.propagate( &e, &add_minutes( &e.epoch(), m)).unwrap();
        println!("  +{:4} min: {} |r| = {:.1} km", m, r, r.length());
        assert!( r.length() > 6600.0 && r.length() < 6900.0);
    }
}

#[test]
fn test_invalid_elements () {
    let mut line2 = ISS_LINE2.to_string();
    line2.replace_range( 8..16, "  xx.yyy");

    match Sgp4Propagator.derive_elements( ISS_LINE1, &line2) {
        Err(TrackerError::InvalidElements(msg)) => println!("rejected: {}", msg),
        other => panic!("expected InvalidElements, got {:?}", other)
    }
}

#[test]
fn test_gmst () {
    // 280.46061837° at J2000
    let j2000 = Utc.with_ymd_and_hms( 2000, 1, 1, 12, 0, 0).unwrap();
    assert!( (gmst( &j2000) - 280.46061837_f64.to_radians()).abs() < 1e-6);

    // one sidereal day later the earth has the same orientation
    let t = j2000 + TimeDelta::seconds( 86164) + TimeDelta::milliseconds( 91);
    assert!( (gmst( &t) - gmst( &j2000)).abs() < 1e-4);
}

#[test]
fn test_sgp4_engine () {
    let config = TrackerConfig::default();
    let renderer = HeadlessRenderer::new( config.view_extent).unwrap();
    let mut engine = TrackingEngine::new( renderer, Sgp4Propagator, config, t0());

    let report = engine.load_catalog_filtered( &iss_text(), None, &DisplayOptions::default(), |_, opts| {
        opts.orbit_minutes = Some( 24*60);
        opts.pinned_trail = true;
        true
    }).unwrap();
    assert_eq!( report.accepted, vec![25544]);

    let iss = engine.object( 25544).unwrap();
    let r = iss.position().unwrap().length();
    assert!( r > 6600.0 && r < 6900.0);
    assert_eq!( engine.renderer().trail_points( iss.trail().unwrap()).unwrap().len(), 1441);

    let before = iss.position();
    engine.set_reference_frame( ReferenceFrame::Inertial);
    engine.set_reference_frame( ReferenceFrame::EarthFixed);
    assert_eq!( engine.object( 25544).unwrap().position(), before);
}

#[test]
fn test_headless_renderer_needs_surface () {
    assert!( HeadlessRenderer::new( 0.0).is_err());
    assert!( HeadlessRenderer::new( -1.0).is_err());
    assert!( HeadlessRenderer::new( f64::NAN).is_err());
}
