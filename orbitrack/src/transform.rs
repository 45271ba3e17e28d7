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

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};
use orbitrack_common::{angle::normalize_two_pi, cartesian3::Cartesian3};

/// the frame in which object positions (and trails) are rendered
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default,Serialize,Deserialize)]
pub enum ReferenceFrame {
    /// non-rotating, the ground body has to be rotated by the sidereal angle
    Inertial,
    /// rotates with the earth surface, the ground body stays fixed
    #[default]
    EarthFixed,
}

impl ReferenceFrame {
    pub fn other (&self)->Self {
        match self {
            ReferenceFrame::Inertial => ReferenceFrame::EarthFixed,
            ReferenceFrame::EarthFixed => ReferenceFrame::Inertial,
        }
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceFrame::Inertial => write!(f, "inertial"),
            ReferenceFrame::EarthFixed => write!(f, "earth-fixed"),
        }
    }
}

impl FromStr for ReferenceFrame {
    type Err = String;

    fn from_str (s: &str) -> Result<Self,Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inertial" | "eci" | "teme" => Ok(ReferenceFrame::Inertial),
            "earth-fixed" | "earthfixed" | "ecef" => Ok(ReferenceFrame::EarthFixed),
            _ => Err( format!("unknown reference frame '{s}' (use inertial or earth-fixed)"))
        }
    }
}

/// map right-handed z-up vectors into the y-up axes of the renderer
#[inline]
pub fn to_render_axes (v: &Cartesian3) -> Cartesian3 {
    Cartesian3::new( v.x, v.z, -v.y)
}

/// convert an inertial position into render coordinates of the given frame.
/// This has to be called with the same `sidereal_angle` that is used for [`ground_orientation`] in the
/// same pass, or objects will drift relative to the ground body
pub fn transform (inertial: &Cartesian3, sidereal_angle: f64, frame: ReferenceFrame) -> Cartesian3 {
    match frame {
        ReferenceFrame::Inertial => to_render_axes( inertial),
        ReferenceFrame::EarthFixed => to_render_axes( &inertial.rotated_around_z( -sidereal_angle))
    }
}

/// rotation of the ground body around the render up-axis that matches [`transform`] positions
pub fn ground_orientation (frame: ReferenceFrame, sidereal_angle: f64) -> f64 {
    match frame {
        ReferenceFrame::Inertial => normalize_two_pi( sidereal_angle),
        ReferenceFrame::EarthFixed => 0.0
    }
}
