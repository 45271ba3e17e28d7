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

//! orbit trail sampling

use chrono::{DateTime, Utc};
use tracing::debug;
use orbitrack_common::{cartesian3::Cartesian3, datetime::add_minutes, MINUTES_PER_DAY};
use crate::{propagator::Propagator, transform::{transform, ReferenceFrame}};

const MAX_PREALLOCATED_POINTS: usize = 4096;

/// the time span covered by a trail in minutes, which is a multiple of `step` that does not exceed `max`
/// (but is at least one step). An explicit `orbit_minutes` wins, otherwise this is one orbital period
/// derived from the mean motion (in rev/day). If neither is available we use `fallback` minutes.
/// An explicit `orbit_minutes` of 0 means no trail and returns 0
pub fn trail_span_minutes (orbit_minutes: Option<u32>, mean_motion: Option<f64>, step: u32, fallback: u32, max: u32) -> u32 {
    let step = step.max(1);
    let max_steps = (max / step).max(1);

    let span = match (orbit_minutes, mean_motion) {
        (Some(0), _) => return 0,
        (Some(m), _) => m as f64,
        (None, Some(n)) if n.is_finite() && n > 0.0 => MINUTES_PER_DAY / n,
        _ => fallback as f64
    };

    let n_steps = (span / step as f64).round().clamp( 1.0, max_steps as f64) as u32;
    n_steps * step
}

/// sample trail points in render coordinates of `frame` at `start + 0, step, .. span` minutes.
/// Steps for which propagation fails are skipped. Returns None if less than two points remain
pub fn sample_trail<P: Propagator> (propagator: &P, elements: &P::Elements, start: &DateTime<Utc>,
                                    span: u32, step: u32, frame: ReferenceFrame) -> Option<Vec<Cartesian3>> {
    let step = step.max(1);
    if span < step { return None }

    let mut points = Vec::with_capacity( ((span / step) as usize + 1).min( MAX_PREALLOCATED_POINTS));
    let mut failed = 0;

    let mut offset = 0u32;
    loop {
        let t = add_minutes( start, offset as i64);
        match propagator.propagate( elements, &t) {
            Ok(p) => points.push( transform( &p, propagator.sidereal_angle( &t), frame)),
            Err(_) => failed += 1
        }

        match offset.checked_add( step) {
            Some(next) if next <= span => offset = next,
            _ => break
        }
    }

    if failed > 0 {
        debug!("skipped {} of {} trail points", failed, failed + points.len());
    }

    if points.len() < 2 { None } else { Some(points) }
}
