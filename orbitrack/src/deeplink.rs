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

//! shareable url query parameters, e.g. `?ss=25544,43013&highlight=starlink`

use url::form_urlencoded;
use tracing::debug;
use serde::{Serialize,Deserialize};
use crate::{CatalogNumber, engine::TrackingEngine, errors::TrackerError, propagator::Propagator, renderer::Renderer};

pub const SELECTION_PARAM: &str = "ss";
pub const HIGHLIGHT_PARAM: &str = "highlight";

#[derive(Debug,Clone,Default,PartialEq,Eq,Serialize,Deserialize)]
pub struct DeepLink {
    pub selected: Vec<CatalogNumber>,
    pub highlight: Option<String>,
}

impl DeepLink {
    /// parse a query string (with or without leading '?', a full url is also accepted). Unknown
    /// parameters and selection entries that are not catalog numbers are ignored. A '?' only
    /// separates a url prefix if there is no parameter before it, i.e. `ss=1&highlight=a?b` is a query
    pub fn parse (query: &str)->Self {
        let query = match query.split_once('?') {
            Some((head,q)) if !head.contains('=') => q,
            _ => query
        };
        let query = query.split('#').next().unwrap_or_default();

        let mut link = DeepLink::default();
        for (key, value) in form_urlencoded::parse( query.as_bytes()) {
            match key.as_ref() {
                SELECTION_PARAM => {
                    for s in value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
                        match s.parse::<CatalogNumber>() {
                            Ok(id) => if !link.selected.contains( &id) { link.selected.push(id) },
                            Err(_) => debug!("ignoring invalid deep link id '{}'", s)
                        }
                    }
                }
                HIGHLIGHT_PARAM => {
                    let h = value.trim();
                    link.highlight = if h.is_empty() { None } else { Some(h.to_string()) };
                }
                _ => {}
            }
        }

        link
    }

    pub fn is_empty (&self)->bool {
        self.selected.is_empty() && self.highlight.is_none()
    }

    /// the query string without leading '?'. Catalog numbers are joined with unescaped ','
    pub fn to_query_string (&self)->String {
        let mut params: Vec<String> = Vec::new();
        if !self.selected.is_empty() {
            params.push( format!("{}={}", SELECTION_PARAM, encode_selection( &self.selected)));
        }
        if let Some(h) = &self.highlight {
            let encoded: String = form_urlencoded::byte_serialize( h.as_bytes()).collect();
            params.push( format!("{}={}", HIGHLIGHT_PARAM, encoded));
        }
        params.join("&")
    }
}

pub fn encode_selection (ids: &[CatalogNumber])->String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct DeepLinkOutcome {
    pub selected: Vec<CatalogNumber>,
    pub unresolved: Vec<CatalogNumber>,
    pub highlight_matches: Option<usize>,
}

impl<R,P> TrackingEngine<R,P> where R: Renderer, P: Propagator {

    /// select all ids of the link that are in the catalog and apply its highlight query.
    /// Ids that are not (yet) in the catalog are reported as unresolved
    pub fn apply_deep_link (&mut self, link: &DeepLink)->DeepLinkOutcome {
        let mut outcome = DeepLinkOutcome::default();

        for id in &link.selected {
            if self.select( *id) {
                outcome.selected.push( *id);
            } else {
                debug!("{}", TrackerError::UnresolvedDeepLinkId( id.to_string()));
                outcome.unresolved.push( *id);
            }
        }

        if let Some(query) = &link.highlight {
            outcome.highlight_matches = Some( self.apply_highlight_query( query));
        }

        outcome
    }

    /// the current selection and highlight state as a link
    pub fn deep_link (&self)->DeepLink {
        DeepLink {
            selected: self.selection.ids().to_vec(),
            highlight: self.highlight_query.clone(),
        }
    }

    pub fn share_query (&self)->String {
        self.deep_link().to_query_string()
    }
}
