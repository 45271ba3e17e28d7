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

//! shared test support: a deterministic circular orbit propagator and TLE text builders

use std::collections::HashSet;
use chrono::{DateTime, TimeZone, Utc};
use orbitrack_common::{TWO_PI, angle::normalize_two_pi, cartesian3::Cartesian3, datetime::minutes_between};
use orbitrack::{
    CatalogNumber, HeadlessRenderer, TrackerConfig, TrackingEngine,
    errors::{Result, TrackerError},
    headless::VisualId,
    propagator::Propagator,
    tle::parse_catalog_number,
};

pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_LINE1: &str = "1 25544U 98067A   19245.18443877  .00012516  00000-0  22337-3 0  9998";
pub const ISS_LINE2: &str = "2 25544  51.6455 339.3385 0007918 357.2134  84.5192 15.50431138187200";

pub const OBJ_X_TEXT: &str = "OBJ-X\n1 25544U 98067A   19245.18443877  .00012516  00000-0  22337-3 0  9998\n2 25544  51.6455 339.3385 0007918 357.2134  84.5192 15.50431138187200\n";

const MU: f64 = 398600.4418; // km³/s²
const SIDEREAL_RATE: f64 = TWO_PI * 1.0027379093 / 1440.0; // rad/min

/// the epoch of all test elements (and the start time of test engines)
pub fn t0 ()->DateTime<Utc> {
    Utc.with_ymd_and_hms( 2019, 9, 2, 4, 25, 35).unwrap()
}

pub fn iss_text ()->String {
    format!("{}\n{}\n{}\n", ISS_NAME, ISS_LINE1, ISS_LINE2)
}

/// element lines for a circular orbit. Only the fields the test propagator reads are variable
pub fn tle_lines (id: CatalogNumber, inclination: f64, mean_motion: f64)->(String,String) {
    let line1 = format!("1 {:05}U 98067A   19245.18443877  .00012516  00000-0  22337-3 0  9998", id);
    let line2 = format!("2 {:05} {:8.4} 339.3385 0007918 357.2134  84.5192 {:11.8}187200", id, inclination, mean_motion);
    (line1, line2)
}

/// catalog text for (name, id, inclination, mean motion) tuples
pub fn catalog_text (entries: &[(&str, CatalogNumber, f64, f64)])->String {
    let mut text = String::new();
    for (name, id, incl, n) in entries {
        let (l1, l2) = tle_lines( *id, *incl, *n);
        text.push_str( &format!("{}\n{}\n{}\n", name, l1, l2));
    }
    text
}

pub fn sample_catalog ()->String {
    catalog_text( &[
        ("ISS (ZARYA)", 25544, 51.6455, 15.50431138),
        ("STARLINK-1007", 44713, 53.0, 15.06),
        ("STARLINK-1008", 44714, 53.0, 15.06),
        ("GPS BIIR-2  (PRN 13)", 24876, 55.0, 2.00561199),
        ("NOAA 19", 33591, 99.1, 14.12),
    ])
}

#[derive(Debug,Clone)]
pub struct CircularElements {
    pub catalog_number: CatalogNumber,
    pub mean_motion: f64,  // rev/day
    pub inclination: f64,  // rad
    pub radius: f64,       // km
}

/// positions on a circular orbit with the period given by the mean motion of line 2
#[derive(Debug,Default)]
pub struct CircularPropagator {
    pub invalid: HashSet<CatalogNumber>,  // derive_elements fails
    pub failing: HashSet<CatalogNumber>,  // propagate fails
    pub failing_window: Option<(f64,f64)>, // propagate fails for [from,to) minutes since t0
}

impl CircularPropagator {
    pub fn new ()->Self { CircularPropagator::default() }

    pub fn with_invalid (mut self, id: CatalogNumber)->Self {
        self.invalid.insert(id);
        self
    }

    pub fn with_failing (mut self, id: CatalogNumber)->Self {
        self.failing.insert(id);
        self
    }

    pub fn with_failing_window (mut self, from_minutes: f64, to_minutes: f64)->Self {
        self.failing_window = Some( (from_minutes, to_minutes));
        self
    }
}

impl Propagator for CircularPropagator {
    type Elements = CircularElements;

    fn derive_elements (&self, line1: &str, line2: &str) -> Result<CircularElements> {
        let catalog_number = line1.get(2..7).and_then( parse_catalog_number)
            .ok_or( TrackerError::InvalidElements("no catalog number".to_string()))?;
        if self.invalid.contains( &catalog_number) {
            return Err( TrackerError::InvalidElements( format!("{} marked invalid", catalog_number)))
        }

        let inclination = line2.get(8..16).and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or( TrackerError::InvalidElements("no inclination".to_string()))?;
        let mean_motion = line2.get(52..63).and_then(|s| s.trim().parse::<f64>().ok())
            .ok_or( TrackerError::InvalidElements("no mean motion".to_string()))?;

        let n = mean_motion * TWO_PI / 86400.0; // rad/s
        let radius = (MU / (n * n)).cbrt();

        Ok( CircularElements { catalog_number, mean_motion, inclination: inclination.to_radians(), radius })
    }

    fn propagate (&self, e: &CircularElements, t: &DateTime<Utc>) -> Result<Cartesian3> {
        if self.failing.contains( &e.catalog_number) {
            return Err( TrackerError::PropagationFailure( format!("{} marked failing", e.catalog_number)))
        }

        let m = minutes_between( &t0(), t);
        if let Some((from,to)) = self.failing_window {
            if m >= from && m < to {
                return Err( TrackerError::PropagationFailure( format!("no solution at +{} min", m)))
            }
        }

        let a = TWO_PI * e.mean_motion * m / 1440.0;
        let (s, c) = a.sin_cos();
        Ok( Cartesian3::new( e.radius * c, e.radius * s * e.inclination.cos(), e.radius * s * e.inclination.sin()))
    }

    fn sidereal_angle (&self, t: &DateTime<Utc>) -> f64 {
        normalize_two_pi( 1.0 + SIDEREAL_RATE * minutes_between( &t0(), t))
    }
}

pub type TestEngine = TrackingEngine<HeadlessRenderer, CircularPropagator>;

pub fn test_engine ()->TestEngine {
    test_engine_with( CircularPropagator::new(), TrackerConfig::default())
}

pub fn test_engine_with (propagator: CircularPropagator, config: TrackerConfig)->TestEngine {
    let renderer = HeadlessRenderer::new( config.view_extent).unwrap();
    TrackingEngine::new( renderer, propagator, config, t0())
}

/// device coordinates of the current render position of `visual` in a width x height viewport
pub fn device_pos_of (engine: &TestEngine, visual: VisualId, width: f64, height: f64)->(f64,f64) {
    let (x_ndc, y_ndc) = engine.renderer().ndc_of( visual).unwrap();
    ((x_ndc + 1.0) / 2.0 * width, (1.0 - y_ndc) / 2.0 * height)
}
