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

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;
use parse_duration::parse;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn days (n: u64)->Duration { Duration::from_secs(n * 86400) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

pub const J2000_JULIAN_DATE: f64 = 2451545.0;
const UNIX_EPOCH_JULIAN_DATE: f64 = 2440587.5;

/// julian date (UTC based, fractional days) of the provided DateTime
pub fn julian_date (dt: &DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JULIAN_DATE + (dt.timestamp_millis() as f64 / 86_400_000.0)
}

/// fractional minutes from `t0` to `t1` (negative if t1 is before t0)
pub fn minutes_between (t0: &DateTime<Utc>, t1: &DateTime<Utc>) -> f64 {
    (*t1 - *t0).num_milliseconds() as f64 / 60_000.0
}

#[inline]
pub fn add_minutes (dt: &DateTime<Utc>, m: i64) -> DateTime<Utc> {
    *dt + TimeDelta::minutes(m)
}

/// convert a std Duration into a chrono TimeDelta, saturating at TimeDelta::MAX
pub fn to_time_delta (d: Duration) -> TimeDelta {
    TimeDelta::from_std(d).unwrap_or(TimeDelta::MAX)
}

//--- misc string format parsing

pub fn parse_datetime (s: &str)->Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s).or_else(|_| DateTime::parse_from_str(s, "%+")) {
        Ok(dt) => Some(dt.to_utc()),
        Err(_) => None
    }
}

//--- support for serde

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{}s", dur.as_secs());
    s.serialize_str(&dfm)
}
