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

//! the cooperative event loop that drives a [`TrackingEngine`]. Ticks and inputs are processed one at a
//! time from a single task, fetch tasks only send their results back through the input channel

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::{sync::mpsc, task::JoinHandle, time::{interval, MissedTickBehavior}};
use tracing::{debug,info,warn};
use orbitrack_common::datetime::utc_now;

use crate::{
    CatalogNumber,
    config::CatalogSource,
    deeplink::DeepLink,
    engine::{PickOutcome, TrackerSummary, TrackingEngine},
    errors::Result,
    fetch::fetch_catalog_text,
    propagator::Propagator,
    renderer::Renderer,
    transform::ReferenceFrame,
};

#[derive(Debug)]
pub enum TrackerInput {
    PointerDown { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    Scrub( DateTime<Utc> ),
    ResumeRealtime,
    SetFrame( ReferenceFrame ),
    Select( CatalogNumber ),
    Deselect( CatalogNumber ),
    ClearSelection,
    Highlight( String ),
    DeepLink( String ),
    CatalogFetched { source: CatalogSource, result: Result<String> },
    Shutdown,
}

#[derive(Debug,Clone)]
pub struct RunOptions {
    pub max_ticks: Option<u64>,
    pub pending_link: Option<DeepLink>, // applied again after each catalog load until resolved
    pub dispose_on_exit: bool,
}

impl Default for RunOptions {
    fn default()->Self {
        RunOptions { max_ticks: None, pending_link: None, dispose_on_exit: true }
    }
}

#[derive(Debug)]
pub struct RunStats {
    pub ticks: u64,
    pub inputs: u64,
    pub final_summary: TrackerSummary,
}

/// fetch a catalog in a separate task and send the result back as `CatalogFetched` input
pub fn spawn_catalog_fetch (client: Client, source: CatalogSource, tx: mpsc::Sender<TrackerInput>)->JoinHandle<()> {
    tokio::spawn( async move {
        let result = fetch_catalog_text( &client, &source.url).await;
        if tx.send( TrackerInput::CatalogFetched { source, result }).await.is_err() {
            debug!("tracker input closed before catalog fetch completed");
        }
    })
}

/// run the tick/input loop until the input channel is closed, `Shutdown` is received or `max_ticks`
/// ticks have been processed
pub async fn run_tracker<R,P> (engine: &mut TrackingEngine<R,P>, mut rx: mpsc::Receiver<TrackerInput>, opts: RunOptions) -> RunStats
    where R: Renderer, P: Propagator
{
    let mut ticker = interval( engine.config().tick_interval);
    ticker.set_missed_tick_behavior( MissedTickBehavior::Skip);

    let mut pending = opts.pending_link.clone();
    apply_pending_link( engine, &mut pending);

    let mut ticks: u64 = 0;
    let mut inputs: u64 = 0;
    info!("tracker runtime started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.tick( utc_now());
                ticks += 1;
                if opts.max_ticks.map_or( false, |max| ticks >= max) { break }
            }
            input = rx.recv() => {
                match input {
                    Some(TrackerInput::Shutdown) | None => break,
                    Some(input) => {
                        inputs += 1;
                        handle_input( engine, input, &mut pending);
                    }
                }
            }
        }
    }

    let final_summary = engine.summary();
    if opts.dispose_on_exit {
        engine.dispose();
    }
    info!("tracker runtime stopped after {} ticks and {} inputs", ticks, inputs);

    RunStats { ticks, inputs, final_summary }
}

fn handle_input<R,P> (engine: &mut TrackingEngine<R,P>, input: TrackerInput, pending: &mut Option<DeepLink>)
    where R: Renderer, P: Propagator
{
    match input {
        TrackerInput::PointerDown { x, y } => {
            match engine.on_pointer_down( x, y) {
                PickOutcome::Miss => debug!("no object at {},{}", x, y),
                outcome => debug!("pick: {:?}", outcome)
            }
        }
        TrackerInput::Resize { width, height } => engine.resize( width, height),
        TrackerInput::Scrub(instant) => { engine.scrub( instant); }
        TrackerInput::ResumeRealtime => engine.resume_realtime( utc_now()),
        TrackerInput::SetFrame(frame) => engine.set_reference_frame( frame),
        TrackerInput::Select(id) => { engine.select( id); }
        TrackerInput::Deselect(id) => { engine.deselect( id); }
        TrackerInput::ClearSelection => engine.clear_selection(),
        TrackerInput::Highlight(query) => { engine.apply_highlight_query( &query); }
        TrackerInput::DeepLink(query) => {
            let link = DeepLink::parse( &query);
            let outcome = engine.apply_deep_link( &link);
            if !outcome.unresolved.is_empty() {
                *pending = Some( DeepLink { selected: outcome.unresolved, highlight: link.highlight });
            }
        }
        TrackerInput::CatalogFetched { source, result } => {
            match result {
                Ok(text) => match engine.load_catalog( &text, source.color, &source.options) {
                    Ok(report) => {
                        info!("{}: {} objects added", source.url, report.accepted.len());
                        apply_pending_link( engine, pending);
                    }
                    Err(e) => warn!("{}: catalog not loaded: {}", source.url, e)
                }
                Err(e) => warn!("{}: fetch failed: {}", source.url, e)
            }
        }
        TrackerInput::Shutdown => {} // handled by the loop
    }
}

fn apply_pending_link<R,P> (engine: &mut TrackingEngine<R,P>, pending: &mut Option<DeepLink>)
    where R: Renderer, P: Propagator
{
    if let Some(link) = pending.take() {
        if engine.catalog().is_empty() {
            *pending = Some(link);
            return
        }

        let outcome = engine.apply_deep_link( &link);
        if !outcome.unresolved.is_empty() {
            *pending = Some( DeepLink { selected: outcome.unresolved, highlight: link.highlight });
        }
    }
}
