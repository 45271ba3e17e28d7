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

//! the tracking engine owns the catalog, the selection and the simulation clock and drives the
//! renderer. All state changes go through `&mut self` methods, i.e. the engine has exactly one owner
//! (the runtime loop or a synchronous caller) and does not need any locking

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug,info,warn};
use orbitrack_common::cartesian3::Cartesian3;

use crate::{
    CatalogNumber,
    catalog::{Catalog, TrackedObject},
    clock::{ClockMode, SimClock},
    config::TrackerConfig,
    errors::{op_failed, Result, TrackerError},
    propagator::Propagator,
    renderer::{device_to_ndc, ColorHint, Renderer},
    selection::SelectionSet,
    tle::{parse_tle_catalog, DisplayOptions, TleRecord},
    trail::{sample_trail, trail_span_minutes},
    transform::{ground_orientation, transform, ReferenceFrame},
};

pub type EngineObject<R,P> = TrackedObject<<P as Propagator>::Elements, <R as Renderer>::Visual, <R as Renderer>::Trail>;
pub type EngineCatalog<R,P> = Catalog<<P as Propagator>::Elements, <R as Renderer>::Visual, <R as Renderer>::Trail>;

/// what happened during a catalog load
#[derive(Debug,Default)]
pub struct LoadReport {
    pub accepted: Vec<CatalogNumber>,
    pub duplicates: Vec<CatalogNumber>,
    pub filtered: usize,
    pub unpositioned: usize,         // accepted but without initial position
    pub dropped: Vec<TrackerError>,  // records that could not be used
}

#[derive(Debug,Clone,Copy,Default,PartialEq,Eq)]
pub struct RefreshReport {
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum PickOutcome {
    Miss,
    Selected(CatalogNumber),
    Deselected(CatalogNumber),
    Unselectable(CatalogNumber),
}

/// information panel data
#[derive(Debug,Clone,Serialize)]
pub struct TrackerSummary {
    pub total_objects: usize,
    pub selected: Vec<(CatalogNumber,String)>,
    pub highlight_query: Option<String>,
    pub highlight_count: usize,
    pub frame: ReferenceFrame,
    pub clock_mode: ClockMode,
    pub instant: DateTime<Utc>,
}

pub struct TrackingEngine<R,P> where R: Renderer, P: Propagator {
    pub(crate) renderer: R,
    pub(crate) propagator: P,
    pub(crate) config: TrackerConfig,
    pub(crate) catalog: EngineCatalog<R,P>,
    pub(crate) selection: SelectionSet,
    pub(crate) frame: ReferenceFrame,
    pub(crate) clock: SimClock,
    pub(crate) viewport: Option<(f64,f64)>,
    pub(crate) highlight_query: Option<String>,
    pub(crate) disposed: bool,
}

impl<R,P> TrackingEngine<R,P> where R: Renderer, P: Propagator {

    pub fn new (renderer: R, propagator: P, config: TrackerConfig, now: DateTime<Utc>)->Self {
        let frame = config.reference_frame;
        let clock = SimClock::new( now, config.scrub_window);

        TrackingEngine {
            renderer,
            propagator,
            config,
            catalog: Catalog::new(),
            selection: SelectionSet::new(),
            frame,
            clock,
            viewport: None,
            highlight_query: None,
            disposed: false,
        }
    }

    //--- accessors

    pub fn renderer (&self)->&R { &self.renderer }
    pub fn renderer_mut (&mut self)->&mut R { &mut self.renderer }
    pub fn propagator (&self)->&P { &self.propagator }
    pub fn config (&self)->&TrackerConfig { &self.config }
    pub fn catalog (&self)->&EngineCatalog<R,P> { &self.catalog }
    pub fn selection (&self)->&SelectionSet { &self.selection }
    pub fn frame (&self)->ReferenceFrame { self.frame }
    pub fn clock (&self)->&SimClock { &self.clock }
    pub fn instant (&self)->DateTime<Utc> { self.clock.instant() }
    pub fn is_disposed (&self)->bool { self.disposed }

    pub fn object (&self, id: CatalogNumber)->Option<&EngineObject<R,P>> {
        self.catalog.find_by_catalog_number( id)
    }

    /* #region catalog loading ****************************************************************************/

    pub fn load_catalog (&mut self, text: &str, color: Option<ColorHint>, defaults: &DisplayOptions) -> Result<LoadReport> {
        self.load_catalog_filtered( text, color, defaults, |_,_| true)
    }

    /// parse and add a catalog text. The `filter` predicate is called for each parsed record and can
    /// reject it or modify its display options (e.g. to pin a trail or set explicit orbit minutes).
    ///
    /// Only a malformed catalog text is returned as an error, in which case nothing gets added.
    /// Empty or completely filtered input returns an empty report
    pub fn load_catalog_filtered<F> (&mut self, text: &str, color: Option<ColorHint>, defaults: &DisplayOptions, mut filter: F) -> Result<LoadReport>
        where F: FnMut(&TleRecord, &mut DisplayOptions)->bool
    {
        if self.disposed {
            return Err( op_failed!("cannot load catalog into disposed engine"))
        }

        let parsed = parse_tle_catalog( text, defaults)?;
        let mut report = LoadReport { dropped: parsed.dropped, ..LoadReport::default() };

        let t = self.clock.instant();
        let sidereal = self.propagator.sidereal_angle( &t);
        let frame = self.frame;
        let query = self.highlight_query.as_ref().map(|q| q.to_lowercase());

        for mut seed in parsed.seeds {
            if !filter( &seed.record, &mut seed.options) {
                report.filtered += 1;
                continue
            }

            let id = seed.catalog_number;
            if self.catalog.contains( id) {
                debug!("ignoring duplicate catalog entry {} '{}'", id, seed.record.name);
                report.duplicates.push( id);
                continue
            }

            let color = seed.options.color.or( color).unwrap_or( self.config.default_color);
            let size = seed.options.size.unwrap_or( self.config.object_size);
            let visual = self.renderer.create_visual( color, size);
            if let Some(owner) = self.catalog.find_by_visual( visual) {
                warn!("visual {:?} of object {} already used by {}, object not added", visual, id, owner.catalog_number);
                report.dropped.push( op_failed!("visual of object {} already in use", id));
                continue
            }

            let mut object = TrackedObject::new( seed, color, visual);
            if let Err(e) = update_position( &mut self.renderer, &self.propagator, &mut object, &t, sidereal, frame) {
                debug!("no initial position for {}: {}", id, e);
                report.unpositioned += 1;
            }
            if let Some(q) = &query {
                if object.name.to_lowercase().contains( q.as_str()) {
                    object.highlighted = true;
                    self.renderer.set_highlighted( visual, true);
                }
            }
            let pinned = object.pinned_trail;

            match self.catalog.add( object).map(|_| ()) {
                Ok(()) => {
                    self.renderer.add_to_scene( visual);
                    report.accepted.push( id);
                    if pinned && !self.add_trail( id) {
                        warn!("no trail for pinned object {}", id);
                    }
                }
                Err(e) => warn!("object {} not added: {}", id, e)
            }
        }

        self.renderer.set_ground_orientation( ground_orientation( frame, sidereal));
        self.renderer.request_redraw();

        info!("loaded {} objects ({} duplicates, {} filtered, {} dropped), catalog size {}",
              report.accepted.len(), report.duplicates.len(), report.filtered, report.dropped.len(), self.catalog.len());
        Ok(report)
    }

    /* #endregion catalog loading */

    /* #region positions and trails ***********************************************************************/

    /// update the render positions of all objects and the ground orientation for `instant`, using the
    /// same sidereal angle for both. Objects that cannot be propagated keep their last position
    pub fn refresh_all_positions (&mut self, instant: &DateTime<Utc>) -> RefreshReport {
        let sidereal = self.propagator.sidereal_angle( instant);
        let frame = self.frame;
        let mut report = RefreshReport::default();

        for o in self.catalog.iter_mut() {
            match update_position( &mut self.renderer, &self.propagator, o, instant, sidereal, frame) {
                Ok(()) => report.updated += 1,
                Err(_) => report.skipped += 1
            }
        }

        if report.skipped > 0 {
            debug!("skipped {} of {} objects at {}", report.skipped, self.catalog.len(), instant);
        }

        self.renderer.set_ground_orientation( ground_orientation( frame, sidereal));
        self.renderer.request_redraw();
        report
    }

    /// switch the reference frame. All trails are recomputed and positions are updated before this returns
    pub fn set_reference_frame (&mut self, frame: ReferenceFrame) {
        if frame == self.frame { return }
        info!("switching reference frame from {} to {}", self.frame, frame);

        self.dispose_all_trails();
        self.frame = frame;
        let t = self.clock.instant();
        self.refresh_all_positions( &t);
        self.rebuild_trails();
    }

    pub fn toggle_reference_frame (&mut self) {
        self.set_reference_frame( self.frame.other());
    }

    /// compute and show the trail of an object, starting at the current instant.
    /// Returns true if the object has a trail afterwards
    pub fn add_trail (&mut self, id: CatalogNumber)->bool {
        let t = self.clock.instant();
        let frame = self.frame;
        match self.catalog.find_by_catalog_number_mut( id) {
            Some(o) => {
                let has_trail = build_trail( &mut self.renderer, &self.propagator, &self.config, o, &t, frame);
                if has_trail { self.renderer.request_redraw() }
                has_trail
            }
            None => false
        }
    }

    /// release the trail of an object. This is a no-op if there is none
    pub fn remove_trail (&mut self, id: CatalogNumber) {
        if let Some(o) = self.catalog.find_by_catalog_number_mut( id) {
            if let Some(trail) = o.trail.take() {
                self.renderer.dispose_trail( trail);
                self.renderer.request_redraw();
            }
        }
    }

    fn dispose_all_trails (&mut self) {
        for o in self.catalog.iter_mut() {
            if let Some(trail) = o.trail.take() {
                self.renderer.dispose_trail( trail);
            }
        }
    }

    /// create trails for all selected and pinned objects. Selected objects without trail are deselected
    fn rebuild_trails (&mut self) {
        let t = self.clock.instant();
        let frame = self.frame;
        let mut lost: Vec<CatalogNumber> = Vec::new();

        for o in self.catalog.iter_mut() {
            let selected = self.selection.contains( o.catalog_number);
            if selected || o.pinned_trail {
                if !build_trail( &mut self.renderer, &self.propagator, &self.config, o, &t, frame) && selected {
                    lost.push( o.catalog_number);
                }
            }
        }

        for id in lost {
            warn!("deselecting {}, no trail at {}", id, t);
            self.selection.remove( id);
        }
        self.renderer.request_redraw();
    }

    /* #endregion positions and trails */

    /* #region picking and input port *********************************************************************/

    /// the object under device coordinates (x,y) of a width x height viewport, if any
    pub fn pick (&self, x: f64, y: f64, width: f64, height: f64)->Option<&EngineObject<R,P>> {
        if self.catalog.is_empty() { return None }

        let (x_ndc, y_ndc) = device_to_ndc( x, y, width, height)?;
        let visual = self.renderer.pick_nearest( x_ndc, y_ndc)?;
        self.catalog.find_by_visual( visual)
    }

    pub fn resize (&mut self, width: f64, height: f64) {
        self.viewport = if width > 0.0 && height > 0.0 { Some( (width,height)) } else { None };
        self.renderer.request_redraw();
    }

    pub fn viewport (&self)->Option<(f64,f64)> { self.viewport }

    /// pick at device coordinates of the current viewport and toggle the selection of the hit object
    pub fn on_pointer_down (&mut self, x: f64, y: f64)->PickOutcome {
        let Some((width,height)) = self.viewport else { return PickOutcome::Miss };
        let Some(id) = self.pick( x, y, width, height).map(|o| o.catalog_number) else { return PickOutcome::Miss };

        if self.selection.contains( id) {
            self.deselect( id);
            PickOutcome::Deselected(id)
        } else if self.select( id) {
            PickOutcome::Selected(id)
        } else {
            PickOutcome::Unselectable(id)
        }
    }

    /* #endregion picking and input port */

    /* #region highlighting and search ********************************************************************/

    pub fn highlight (&mut self, id: CatalogNumber)->bool {
        self.set_highlighted( id, true)
    }

    pub fn clear_highlight (&mut self, id: CatalogNumber)->bool {
        self.set_highlighted( id, false)
    }

    fn set_highlighted (&mut self, id: CatalogNumber, highlighted: bool)->bool {
        match self.catalog.find_by_catalog_number_mut( id) {
            Some(o) => {
                if o.highlighted != highlighted {
                    o.highlighted = highlighted;
                    self.renderer.set_highlighted( o.visual, highlighted);
                    self.renderer.request_redraw();
                }
                true
            }
            None => false
        }
    }

    /// highlight all objects whose name contains `query` (case insensitive) and clear all other highlights.
    /// An empty query just clears. Returns the number of highlighted objects
    pub fn apply_highlight_query (&mut self, query: &str)->usize {
        let q = query.trim().to_lowercase();
        let mut n = 0;

        for o in self.catalog.iter_mut() {
            let highlighted = !q.is_empty() && o.name.to_lowercase().contains( q.as_str());
            if highlighted { n += 1 }
            if o.highlighted != highlighted {
                o.highlighted = highlighted;
                self.renderer.set_highlighted( o.visual, highlighted);
            }
        }

        self.highlight_query = if q.is_empty() { None } else { Some( query.trim().to_string()) };
        self.renderer.request_redraw();
        n
    }

    pub fn highlight_query (&self)->Option<&str> { self.highlight_query.as_deref() }

    pub fn highlighted_objects (&self)->Vec<&EngineObject<R,P>> {
        self.catalog.all().iter().filter(|o| o.highlighted).collect()
    }

    /// objects whose name contains `query` (case insensitive), at most `max_search_results`
    pub fn search (&self, query: &str)->Vec<&EngineObject<R,P>> {
        self.catalog.find_by_name( query.trim()).take( self.config.max_search_results).collect()
    }

    pub fn summary (&self)->TrackerSummary {
        TrackerSummary {
            total_objects: self.catalog.len(),
            selected: self.selected_objects().iter().map(|o| (o.catalog_number, o.name.clone())).collect(),
            highlight_query: self.highlight_query.clone(),
            highlight_count: self.catalog.all().iter().filter(|o| o.highlighted).count(),
            frame: self.frame,
            clock_mode: self.clock.mode(),
            instant: self.clock.instant(),
        }
    }

    /* #endregion highlighting and search */

    /* #region clock **************************************************************************************/

    /// periodic update with wall clock time `now`. Returns None if the simulation instant did not change
    pub fn tick (&mut self, now: DateTime<Utc>)->Option<RefreshReport> {
        if self.disposed { return None }

        if self.clock.tick( now) {
            let t = self.clock.instant();
            Some( self.refresh_all_positions( &t))
        } else {
            None
        }
    }

    /// freeze the simulation at `instant` (clamped to the scrub window). Positions and trails are
    /// recomputed for the new instant
    pub fn scrub (&mut self, instant: DateTime<Utc>)->DateTime<Utc> {
        let t = self.clock.scrub( instant);
        if t != instant {
            debug!("scrub instant {} clamped to {}", instant, t);
        }
        self.refresh_all_positions( &t);
        self.dispose_all_trails();
        self.rebuild_trails();
        t
    }

    pub fn resume_realtime (&mut self, now: DateTime<Utc>) {
        let was_realtime = self.clock.is_realtime();
        self.clock.resume_realtime( now);
        self.refresh_all_positions( &now);
        if !was_realtime {
            self.dispose_all_trails();
            self.rebuild_trails();
        }
    }

    /* #endregion clock */

    /* #region lifecycle **********************************************************************************/

    /// remove a single object, releasing its renderer resources
    pub fn remove_object (&mut self, id: CatalogNumber)->bool {
        self.selection.remove( id);
        match self.catalog.remove( id) {
            Some(mut o) => {
                if let Some(trail) = o.trail.take() {
                    self.renderer.dispose_trail( trail);
                }
                self.renderer.remove_from_scene( o.visual);
                self.renderer.request_redraw();
                true
            }
            None => false
        }
    }

    /// release all renderer resources the engine has allocated. Calling this more than once is a no-op
    pub fn dispose (&mut self) {
        if self.disposed { return }

        let objects = self.catalog.drain();
        let n = objects.len();
        for mut o in objects {
            if let Some(trail) = o.trail.take() {
                self.renderer.dispose_trail( trail);
            }
            self.renderer.remove_from_scene( o.visual);
        }

        self.selection.clear();
        self.highlight_query = None;
        self.disposed = true;
        self.renderer.request_redraw();
        info!("tracking engine disposed ({} objects released)", n);
    }

    /* #endregion lifecycle */
}

fn update_position<R,P> (renderer: &mut R, propagator: &P, o: &mut EngineObject<R,P>,
                         t: &DateTime<Utc>, sidereal: f64, frame: ReferenceFrame) -> Result<()>
    where R: Renderer, P: Propagator
{
    let inertial = {
        let elements = o.elements_with( propagator)?;
        propagator.propagate( elements, t)?
    };

    let p: Cartesian3 = transform( &inertial, sidereal, frame);
    renderer.set_position( o.visual, p.x, p.y, p.z);
    o.position = Some(p);
    Ok(())
}

fn build_trail<R,P> (renderer: &mut R, propagator: &P, config: &TrackerConfig, o: &mut EngineObject<R,P>,
                     t: &DateTime<Utc>, frame: ReferenceFrame) -> bool
    where R: Renderer, P: Propagator
{
    if o.trail.is_some() { return true }

    let step = config.trail_step_minutes;
    let span = trail_span_minutes( o.orbit_minutes, o.tle.mean_motion(), step, config.fallback_orbit_minutes, config.max_trail_minutes);
    let points = match o.elements_with( propagator) {
        Ok(elements) => sample_trail( propagator, elements, t, span, step, frame),
        Err(_) => None
    };

    match points {
        Some(points) => {
            o.trail = Some( renderer.create_trail( &points));
            true
        }
        None => false
    }
}
