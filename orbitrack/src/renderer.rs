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

use std::{fmt::Debug, hash::Hash};
use serde::{Serialize,Deserialize};
use orbitrack_common::cartesian3::Cartesian3;

/// 0xRRGGBB color that is passed through to the renderer
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(transparent)]
pub struct ColorHint(pub u32);

/// the scene side of the tracker. Implementations own all graphics resources, the engine only holds handles.
///
/// Visual handles have to be unique for the lifetime of the renderer since the engine uses them as keys
/// for picking. Trail handles are moved back into the renderer on disposal, i.e. each trail can only be
/// released once.
///
/// Coordinates are y-up render coordinates in km (see [`crate::transform::to_render_axes`]). The ground
/// orientation is a right-handed rotation around the render up-axis in radians.
///
/// All positions and trail points are world space. Object visuals are not children of the ground body,
/// so earth-fixed positions come with a ground orientation of 0 and inertial positions with the
/// sidereal angle (see [`crate::transform::ground_orientation`]).
pub trait Renderer {
    type Visual: Copy + Eq + Hash + Debug;
    type Trail: Debug;

    fn create_visual (&mut self, color: ColorHint, size: f64) -> Self::Visual;
    fn set_position (&mut self, visual: Self::Visual, x: f64, y: f64, z: f64);
    fn add_to_scene (&mut self, visual: Self::Visual);
    fn remove_from_scene (&mut self, visual: Self::Visual);

    /// switch between normal and highlight material
    fn set_highlighted (&mut self, visual: Self::Visual, highlighted: bool);

    fn create_trail (&mut self, points: &[Cartesian3]) -> Self::Trail;
    fn dispose_trail (&mut self, trail: Self::Trail);

    fn set_ground_orientation (&mut self, angle: f64);

    /// nearest visual hit by a pick ray through normalized device coordinates (x,y ∈ [-1..1], y up)
    fn pick_nearest (&self, x_ndc: f64, y_ndc: f64) -> Option<Self::Visual>;

    /// schedule a redraw. Requests are coalesced, this does not draw by itself
    fn request_redraw (&mut self);
}

/// convert device (pixel) coordinates with origin at top left into normalized device coordinates.
/// Returns None for degenerate viewports or pointers outside of it
pub fn device_to_ndc (x: f64, y: f64, width: f64, height: f64) -> Option<(f64,f64)> {
    if !(width > 0.0 && height > 0.0) { return None }
    if x < 0.0 || y < 0.0 || x > width || y > height { return None }

    Some( ((x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0) )
}
