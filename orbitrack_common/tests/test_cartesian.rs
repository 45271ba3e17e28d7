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

use chrono::{TimeZone, Utc};
use std::f64::consts::FRAC_PI_2;
use orbitrack_common::{TWO_PI, angle::normalize_two_pi, cartesian3::Cartesian3, datetime::{julian_date, minutes_between, add_minutes, parse_datetime}};

/// run with "cargo test -p orbitrack_common -- --nocapture"

#[test]
fn test_rotation () {
    let p = Cartesian3::new( 7000.0, 0.0, 100.0);

    let q = p.rotated_around_z( FRAC_PI_2);
    println!("{} rotated by 90° = {}", p, q);
    assert!( q.approx_eq( &Cartesian3::new( 0.0, 7000.0, 100.0), 1e-9));

    let back = q.rotated_around_z( -FRAC_PI_2);
    assert!( back.approx_eq( &p, 1e-9));
    assert!( (q.length() - p.length()).abs() < 1e-9);
}

#[test]
fn test_angles () {
    assert!( (normalize_two_pi( -FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    assert!( (normalize_two_pi( TWO_PI + 1.0) - 1.0).abs() < 1e-12);
    assert!( normalize_two_pi( TWO_PI).abs() < 1e-12);
}

#[test]
fn test_julian_date () {
    let j2000 = Utc.with_ymd_and_hms( 2000, 1, 1, 12, 0, 0).unwrap();
    assert!( (julian_date( &j2000) - 2451545.0).abs() < 1e-9);

    let t = add_minutes( &j2000, 90);
    assert!( (minutes_between( &j2000, &t) - 90.0).abs() < 1e-9);
    assert!( (minutes_between( &t, &j2000) + 90.0).abs() < 1e-9);
}

#[test]
fn test_parse_datetime () {
    let t = parse_datetime( "2019-09-02T04:25:34Z").unwrap();
    assert_eq!( t, Utc.with_ymd_and_hms( 2019, 9, 2, 4, 25, 34).unwrap());
    assert!( parse_datetime( "yesterday").is_none());
}
