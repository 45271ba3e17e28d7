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

use std::{path::Path, time::Duration};
use serde::{Serialize,Deserialize};
use orbitrack_common::datetime::{deserialize_duration, serialize_duration, days, secs};
use crate::{errors::{Result, TrackerError}, renderer::ColorHint, tle::DisplayOptions, transform::ReferenceFrame};

/// a TLE catalog to fetch at startup, e.g. one of the celestrak element groups
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct CatalogSource {
    pub url: String,

    #[serde(default)]
    pub color: Option<ColorHint>,

    #[serde(default)]
    pub options: DisplayOptions,
}

/// configuration for the tracking engine and the runtime loop, normally loaded from `configs/tracker.ron`
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub object_size: f64,            // renderer size hint for object visuals (km)
    pub default_color: ColorHint,    // used if neither source nor display options specify one
    pub trail_step_minutes: u32,
    pub fallback_orbit_minutes: u32, // trail span if mean motion can't be read
    pub max_trail_minutes: u32,      // upper bound for trail spans

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub tick_interval: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub scrub_window: Duration,      // max distance of scrub instants from wall clock

    pub reference_frame: ReferenceFrame,
    pub max_search_results: usize,
    pub view_extent: f64,            // half width of the headless view (km)

    pub sources: Vec<CatalogSource>,
}

impl Default for TrackerConfig {
    fn default()->Self {
        TrackerConfig {
            object_size: 50.0,
            default_color: ColorHint(0xff0000),
            trail_step_minutes: 1,
            fallback_orbit_minutes: 90,
            max_trail_minutes: 2880,
            tick_interval: secs(1),
            scrub_window: days(7),
            reference_frame: ReferenceFrame::EarthFixed,
            max_search_results: 100,
            view_extent: 50_000.0,
            sources: Vec::new(),
        }
    }
}

impl TrackerConfig {
    pub fn validate (&self)->Result<()> {
        if self.tick_interval.is_zero() {
            return Err( TrackerError::ConfigError("tick_interval has to be positive".to_string()))
        }
        if self.trail_step_minutes == 0 {
            return Err( TrackerError::ConfigError("trail_step_minutes has to be positive".to_string()))
        }
        if self.max_trail_minutes < self.trail_step_minutes {
            return Err( TrackerError::ConfigError("max_trail_minutes has to be at least one trail step".to_string()))
        }
        if !(self.object_size > 0.0) || !(self.view_extent > 0.0) {
            return Err( TrackerError::ConfigError("object_size and view_extent have to be positive".to_string()))
        }
        Ok(())
    }
}

/// load and validate a RON config file
pub fn load_config<P: AsRef<Path>> (path: P) -> Result<TrackerConfig> {
    let data = std::fs::read( path.as_ref())?;
    parse_config( data.as_slice())
}

pub fn parse_config (data: &[u8]) -> Result<TrackerConfig> {
    let config: TrackerConfig = ron::de::from_bytes( data).map_err(|e| TrackerError::ConfigError( e.to_string()))?;
    config.validate()?;
    Ok(config)
}
