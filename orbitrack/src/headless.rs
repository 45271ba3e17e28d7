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

//! an in-memory [`Renderer`] that keeps a scene model but does not draw anything.
//! The view is an orthographic projection onto the render x/y plane with the camera on the +z axis,
//! which is enough to do real ray picking for command line tools and tests

use std::collections::HashMap;
use orbitrack_common::cartesian3::Cartesian3;
use crate::{errors::{op_failed, Result}, renderer::{ColorHint, Renderer}};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub struct VisualId(pub u32);

/// not Copy or Clone - a trail can only be disposed once
#[derive(Debug,PartialEq,Eq)]
pub struct TrailId(u32);

impl TrailId {
    pub fn id (&self)->u32 { self.0 }
}

#[derive(Debug,Clone)]
pub struct VisualState {
    pub color: ColorHint,
    pub size: f64,
    pub position: Option<Cartesian3>,
    pub in_scene: bool,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    view_extent: f64,      // half width/height of the view in km
    pick_tolerance: f64,   // additional hit radius in km

    visuals: Vec<VisualState>,
    trails: HashMap<u32,Vec<Cartesian3>>,
    next_trail: u32,
    created_trails: usize,
    disposed_trails: usize,

    ground_orientation: f64,
    redraw_pending: bool,
    frames: u64,
}

impl HeadlessRenderer {
    /// a zero or negative extent means there is no surface to render into
    pub fn new (view_extent: f64)->Result<Self> {
        if !(view_extent > 0.0) || !view_extent.is_finite() {
            return Err( op_failed!("no renderer surface (view extent {})", view_extent))
        }

        Ok( HeadlessRenderer {
            view_extent,
            pick_tolerance: 0.0,
            visuals: Vec::new(),
            trails: HashMap::new(),
            next_trail: 0,
            created_trails: 0,
            disposed_trails: 0,
            ground_orientation: 0.0,
            redraw_pending: false,
            frames: 0
        })
    }

    pub fn with_pick_tolerance (mut self, km: f64)->Self {
        self.pick_tolerance = km.max(0.0);
        self
    }

    pub fn visual (&self, v: VisualId)->Option<&VisualState> {
        self.visuals.get( v.0 as usize)
    }

    pub fn position_of (&self, v: VisualId)->Option<Cartesian3> {
        self.visual(v).and_then(|s| s.position)
    }

    /// normalized device coordinates of a visual's current position
    pub fn ndc_of (&self, v: VisualId)->Option<(f64,f64)> {
        self.position_of(v).map(|p| (p.x / self.view_extent, p.y / self.view_extent))
    }

    pub fn scene_size (&self)->usize {
        self.visuals.iter().filter(|v| v.in_scene).count()
    }

    pub fn live_trails (&self)->usize { self.trails.len() }
    pub fn created_trails (&self)->usize { self.created_trails }
    pub fn disposed_trails (&self)->usize { self.disposed_trails }

    pub fn trail_points (&self, trail: &TrailId)->Option<&[Cartesian3]> {
        self.trails.get( &trail.0).map(|v| v.as_slice())
    }

    pub fn ground_orientation (&self)->f64 { self.ground_orientation }

    pub fn is_redraw_pending (&self)->bool { self.redraw_pending }

    /// "draw" a frame if one was requested. Returns false if there was nothing to do, i.e. repeated
    /// calls without state changes do not produce additional frames
    pub fn render_frame (&mut self)->bool {
        if self.redraw_pending {
            self.redraw_pending = false;
            self.frames += 1;
            true
        } else {
            false
        }
    }

    pub fn frames (&self)->u64 { self.frames }
}

impl Renderer for HeadlessRenderer {
    type Visual = VisualId;
    type Trail = TrailId;

    fn create_visual (&mut self, color: ColorHint, size: f64) -> VisualId {
        let id = VisualId( self.visuals.len() as u32);
        self.visuals.push( VisualState { color, size, position: None, in_scene: false, highlighted: false });
        id
    }

    fn set_position (&mut self, visual: VisualId, x: f64, y: f64, z: f64) {
        if let Some(v) = self.visuals.get_mut( visual.0 as usize) {
            v.position = Some( Cartesian3::new(x,y,z));
        }
    }

    fn add_to_scene (&mut self, visual: VisualId) {
        if let Some(v) = self.visuals.get_mut( visual.0 as usize) { v.in_scene = true }
    }

    fn remove_from_scene (&mut self, visual: VisualId) {
        if let Some(v) = self.visuals.get_mut( visual.0 as usize) { v.in_scene = false }
    }

    fn set_highlighted (&mut self, visual: VisualId, highlighted: bool) {
        if let Some(v) = self.visuals.get_mut( visual.0 as usize) { v.highlighted = highlighted }
    }

    fn create_trail (&mut self, points: &[Cartesian3]) -> TrailId {
        let id = self.next_trail;
        self.next_trail += 1;
        self.created_trails += 1;
        self.trails.insert( id, points.to_vec());
        TrailId(id)
    }

    fn dispose_trail (&mut self, trail: TrailId) {
        if self.trails.remove( &trail.0).is_some() {
            self.disposed_trails += 1;
        }
    }

    fn set_ground_orientation (&mut self, angle: f64) {
        self.ground_orientation = angle;
    }

    fn pick_nearest (&self, x_ndc: f64, y_ndc: f64) -> Option<VisualId> {
        let x = x_ndc * self.view_extent;
        let y = y_ndc * self.view_extent;
        let mut hit: Option<(VisualId,f64)> = None;

        for (i, v) in self.visuals.iter().enumerate() {
            if !v.in_scene { continue }
            if let Some(p) = v.position {
                let r = v.size / 2.0 + self.pick_tolerance;
                let dx = p.x - x;
                let dy = p.y - y;
                if dx*dx + dy*dy <= r*r {
                    // the camera looks down the -z axis, larger z is closer
                    if hit.map_or( true, |(_,z)| p.z > z) {
                        hit = Some( (VisualId(i as u32), p.z));
                    }
                }
            }
        }

        hit.map(|(v,_)| v)
    }

    fn request_redraw (&mut self) {
        self.redraw_pending = true;
    }
}
