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

use std::fmt;
use chrono::{DateTime, Utc};
use orbitrack_common::{angle::normalize_two_pi, cartesian3::Cartesian3, datetime::{julian_date, minutes_between, J2000_JULIAN_DATE}};
use crate::errors::{Result, TrackerError};

/// the orbital mechanics side of the tracker.
///
/// `Elements` are derived once per object and then reused for all subsequent propagations.
/// Positions are inertial (TEME) vectors in km
pub trait Propagator {
    type Elements;

    fn derive_elements (&self, line1: &str, line2: &str) -> Result<Self::Elements>;

    fn propagate (&self, elements: &Self::Elements, t: &DateTime<Utc>) -> Result<Cartesian3>;

    /// rotation angle between inertial and earth-fixed frame in radians
    fn sidereal_angle (&self, t: &DateTime<Utc>) -> f64;
}

/// elements plus the SGP4 initialization that is derived from them
#[derive(Clone)]
pub struct Sgp4Elements {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl fmt::Debug for Sgp4Elements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sgp4Elements{{norad_id:{}, epoch:{}, mean_motion:{}}}", self.norad_id(), self.elements.datetime, self.mean_motion())
    }
}

impl Sgp4Elements {
    pub fn norad_id (&self)->u64 { self.elements.norad_id }
    pub fn mean_motion (&self)->f64 { self.elements.mean_motion }
    pub fn inclination (&self)->f64 { self.elements.inclination }

    pub fn epoch (&self)->DateTime<Utc> {
        DateTime::<Utc>::from_naive_utc_and_offset( self.elements.datetime, Utc)
    }
}

/// a [`Propagator`] based on the sgp4 crate
#[derive(Debug,Default,Clone,Copy)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    type Elements = Sgp4Elements;

    fn derive_elements (&self, line1: &str, line2: &str) -> Result<Sgp4Elements> {
        let elements = sgp4::Elements::from_tle( None, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| TrackerError::InvalidElements( format!("TLE import failed: {:?}", e)))?;
        let constants = sgp4::Constants::from_elements( &elements)
            .map_err(|e| TrackerError::InvalidElements( format!("SGP4 initialization failed: {:?}", e)))?;

        Ok( Sgp4Elements { elements, constants } )
    }

    fn propagate (&self, e: &Sgp4Elements, t: &DateTime<Utc>) -> Result<Cartesian3> {
        let minutes = minutes_between( &e.epoch(), t);
        let prediction = e.constants.propagate( sgp4::MinutesSinceEpoch(minutes))
            .map_err(|err| TrackerError::PropagationFailure( format!("object {} at {}: {:?}", e.norad_id(), t, err)))?;

        let p = Cartesian3::from_array( &prediction.position);
        if p.length().is_finite() {
            Ok(p)
        } else {
            Err( TrackerError::PropagationFailure( format!("object {} at {}: non-finite position", e.norad_id(), t)))
        }
    }

    fn sidereal_angle (&self, t: &DateTime<Utc>) -> f64 {
        gmst( t)
    }
}

/// Greenwich mean sidereal time in radians (IAU-82 model, UT1 approximated by UTC)
pub fn gmst (t: &DateTime<Utc>) -> f64 {
    let tut1 = (julian_date(t) - J2000_JULIAN_DATE) / 36525.0;
    let secs = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876600.0 * 3600.0 + 8640184.812866) * tut1
        + 67310.54841;

    normalize_two_pi( (secs % 86400.0) / 240.0 * (std::f64::consts::PI / 180.0))
}
