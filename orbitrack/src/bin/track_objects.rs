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

use tokio::sync::mpsc;
use anyhow::{anyhow, Result};
use clap::Parser;
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use orbitrack_common::datetime::{parse_datetime, utc_now};
use orbitrack::{
    load_config, CatalogSource, DeepLink, HeadlessRenderer, ReferenceFrame, Sgp4Propagator, TrackerConfig, TrackingEngine,
    runtime::{run_tracker, spawn_catalog_fetch, RunOptions},
    tle::DisplayOptions,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "load TLE catalogs, propagate all objects and print the tracker state")]
pub struct Args {
    /// RON tracker config (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<String>,

    /// local TLE catalog files
    #[arg(short,long)]
    pub file: Vec<String>,

    /// TLE catalog urls to fetch (in addition to the config sources)
    #[arg(short,long)]
    pub url: Vec<String>,

    /// deep link query, e.g. "ss=25544,43013&highlight=starlink"
    #[arg(short,long)]
    pub link: Option<String>,

    /// reference frame (inertial or earth-fixed)
    #[arg(long)]
    pub frame: Option<ReferenceFrame>,

    /// simulation time (RFC 3339) instead of wall clock
    #[arg(short,long)]
    pub time: Option<String>,

    /// number of realtime ticks to run
    #[arg(long, default_value_t = 0)]
    pub ticks: u64,

    /// print the render position of each object
    #[arg(short,long)]
    pub positions: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .try_init();

    let args = Args::parse();

    let mut config: TrackerConfig = match &args.config {
        Some(path) => load_config( path)?,
        None => TrackerConfig::default()
    };
    if let Some(frame) = args.frame { config.reference_frame = frame }
    for url in &args.url {
        config.sources.push( CatalogSource { url: url.clone(), color: None, options: DisplayOptions::default() });
    }

    let renderer = HeadlessRenderer::new( config.view_extent)?;
    let mut engine = TrackingEngine::new( renderer, Sgp4Propagator, config.clone(), utc_now());

    for path in &args.file {
        let text = std::fs::read_to_string( path)?;
        let report = engine.load_catalog( &text, None, &DisplayOptions::default())?;
        println!("{}: {} objects ({} duplicates, {} dropped)", path, report.accepted.len(), report.duplicates.len(), report.dropped.len());
    }

    if let Some(time) = &args.time {
        let t = parse_datetime( time).ok_or_else(|| anyhow!("invalid time spec '{}'", time))?;
        engine.scrub( t);
    }

    let pending_link = args.link.as_ref().map(|q| DeepLink::parse( q));

    if args.ticks > 0 || !config.sources.is_empty() {
        let (tx, rx) = mpsc::channel( 64);
        let client = Client::new();
        let n_sources = config.sources.len();
        for source in config.sources.iter().cloned() {
            spawn_catalog_fetch( client.clone(), source, tx.clone());
        }
        // without ticks the loop ends once all fetches are done and the channel closes
        let max_ticks = if args.ticks > 0 { Some(args.ticks) } else { None };
        let keep_open = max_ticks.map(|_| tx);

        let opts = RunOptions { max_ticks, pending_link, dispose_on_exit: false };
        let stats = run_tracker( &mut engine, rx, opts).await;
        drop( keep_open);
        println!("ran {} ticks, processed {} inputs ({} sources)", stats.ticks, stats.inputs, n_sources);

    } else if let Some(link) = &pending_link {
        let outcome = engine.apply_deep_link( link);
        if !outcome.unresolved.is_empty() {
            println!("unresolved ids: {:?}", outcome.unresolved);
        }
    }

    if args.positions {
        for o in engine.catalog().all() {
            match o.position() {
                Some(p) => println!("{:>6} {:<24} {}", o.catalog_number, o.name, p),
                None => println!("{:>6} {:<24} -", o.catalog_number, o.name),
            }
        }
    }

    println!("{}", serde_json::to_string_pretty( &engine.summary())?);
    let query = engine.share_query();
    if !query.is_empty() {
        println!("share: ?{}", query);
    }

    engine.dispose();
    Ok(())
}
