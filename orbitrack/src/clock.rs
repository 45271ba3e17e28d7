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

use std::time::Duration;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize,Deserialize};
use orbitrack_common::datetime::to_time_delta;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ClockMode {
    Realtime,
    Scrubbed,
}

/// the single simulation instant all propagations of a refresh pass are computed for
#[derive(Debug,Clone)]
pub struct SimClock {
    instant: DateTime<Utc>,
    wall: DateTime<Utc>, // wall time of the last tick
    mode: ClockMode,
    scrub_window: TimeDelta,
}

impl SimClock {
    pub fn new (now: DateTime<Utc>, scrub_window: Duration)->Self {
        SimClock { instant: now, wall: now, mode: ClockMode::Realtime, scrub_window: to_time_delta( scrub_window) }
    }

    pub fn instant (&self)->DateTime<Utc> { self.instant }
    pub fn mode (&self)->ClockMode { self.mode }
    pub fn is_realtime (&self)->bool { self.mode == ClockMode::Realtime }

    /// advance to wall clock time `now`. Returns true if the simulation instant changed, which is
    /// never the case while scrubbed
    pub fn tick (&mut self, now: DateTime<Utc>)->bool {
        self.wall = now;
        match self.mode {
            ClockMode::Realtime => {
                let changed = self.instant != now;
                self.instant = now;
                changed
            }
            ClockMode::Scrubbed => false
        }
    }

    /// freeze the clock at `instant`, clamped to the scrub window around the last wall time
    pub fn scrub (&mut self, instant: DateTime<Utc>)->DateTime<Utc> {
        let lower = self.wall.checked_sub_signed( self.scrub_window).unwrap_or( DateTime::<Utc>::MIN_UTC);
        let upper = self.wall.checked_add_signed( self.scrub_window).unwrap_or( DateTime::<Utc>::MAX_UTC);

        self.instant = instant.clamp( lower, upper);
        self.mode = ClockMode::Scrubbed;
        self.instant
    }

    pub fn resume_realtime (&mut self, now: DateTime<Utc>) {
        self.mode = ClockMode::Realtime;
        self.wall = now;
        self.instant = now;
    }
}
