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

//! orbitrack - visualization side of a satellite tracker.
//!
//! The [`engine::TrackingEngine`] loads TLE catalogs, propagates all objects for a single simulation
//! instant and keeps their visuals, trails, selection and highlights in sync with a [`renderer::Renderer`].
//! Orbital mechanics are behind the [`propagator::Propagator`] trait, with [`propagator::Sgp4Propagator`]
//! as the default implementation

pub mod errors;
pub mod config;
pub mod tle;
pub mod renderer;
pub mod headless;
pub mod propagator;
pub mod transform;
pub mod catalog;
pub mod trail;
pub mod clock;
pub mod engine;
pub mod selection;
pub mod deeplink;
pub mod fetch;
pub mod runtime;

/// NORAD catalog number
pub type CatalogNumber = u32;

pub use errors::{Result, TrackerError};
pub use config::{load_config, TrackerConfig, CatalogSource};
pub use engine::{TrackingEngine, LoadReport, RefreshReport, PickOutcome, TrackerSummary};
pub use propagator::{Propagator, Sgp4Propagator};
pub use renderer::{Renderer, ColorHint};
pub use headless::HeadlessRenderer;
pub use transform::ReferenceFrame;
pub use deeplink::DeepLink;
