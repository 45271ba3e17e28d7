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

use serde::{Serialize,Deserialize};

/// note that we do not attach units or frames to Cartesian3 - the same type is used for
/// inertial (TEME) vectors, earth-fixed vectors and remapped render coordinates (all in km)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    pub fn from_array (a: &[f64;3])->Cartesian3 {
        Cartesian3{ x: a[0], y: a[1], z: a[2] }
    }

    pub fn length(&self) -> f64 {
        ((self.x * self.x) + (self.y * self.y) + (self.z * self.z)).sqrt()
    }

    /// rotate counter-clockwise around the z-axis by `angle` radians
    pub fn rotated_around_z (&self, angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Cartesian3 {
            x: cos_a * self.x - sin_a * self.y,
            y: sin_a * self.x + cos_a * self.y,
            z: self.z
        }
    }

    /// component-wise comparison within an absolute tolerance
    pub fn approx_eq (&self, p: &Cartesian3, eps: f64) -> bool {
        (self.x - p.x).abs() <= eps && (self.y - p.y).abs() <= eps && (self.z - p.z).abs() <= eps
    }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {:.3}, {:.3}, {:.3} ]", self.x, self.y, self.z)
    }
}
