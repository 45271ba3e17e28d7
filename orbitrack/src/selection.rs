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

use tracing::{debug,warn};
use crate::{CatalogNumber, engine::{EngineObject, TrackingEngine}, propagator::Propagator, renderer::Renderer};

/// ordered set of selected catalog numbers
#[derive(Debug,Clone,Default,PartialEq,Eq)]
pub struct SelectionSet {
    members: Vec<CatalogNumber>,
}

impl SelectionSet {
    pub fn new ()->Self { SelectionSet::default() }

    pub fn contains (&self, id: CatalogNumber)->bool {
        self.members.contains( &id)
    }

    /// returns false if `id` already was a member
    pub fn insert (&mut self, id: CatalogNumber)->bool {
        if self.contains(id) {
            false
        } else {
            self.members.push(id);
            true
        }
    }

    pub fn remove (&mut self, id: CatalogNumber)->bool {
        if let Some(idx) = self.members.iter().position(|m| *m == id) {
            self.members.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn ids (&self)->&[CatalogNumber] { self.members.as_slice() }
    pub fn iter (&self)->impl Iterator<Item=&CatalogNumber> { self.members.iter() }
    pub fn len (&self)->usize { self.members.len() }
    pub fn is_empty (&self)->bool { self.members.is_empty() }
    pub fn clear (&mut self) { self.members.clear() }
}

/* #region selection controller ***************************************************************************/

impl<R,P> TrackingEngine<R,P> where R: Renderer, P: Propagator {

    /// add an object to the selection and show its trail. Selecting a member again is a no-op.
    /// Returns false for unknown objects or if no trail could be computed
    pub fn select (&mut self, id: CatalogNumber)->bool {
        if !self.catalog.contains( id) {
            debug!("ignoring selection of unknown object {}", id);
            return false
        }
        if self.selection.contains( id) { return true }

        if self.add_trail( id) {
            self.selection.insert( id);
            self.renderer.request_redraw();
            true
        } else {
            warn!("object {} not selectable, no trail", id);
            false
        }
    }

    /// remove an object from the selection. The trail is released unless the object is pinned
    pub fn deselect (&mut self, id: CatalogNumber)->bool {
        if !self.selection.remove( id) { return false }

        let pinned = self.catalog.find_by_catalog_number( id).map_or( false, |o| o.pinned_trail);
        if !pinned {
            self.remove_trail( id);
        }
        self.renderer.request_redraw();
        true
    }

    /// returns true if the object is selected afterwards
    pub fn toggle (&mut self, id: CatalogNumber)->bool {
        if self.selection.contains( id) {
            self.deselect( id);
            false
        } else {
            self.select( id)
        }
    }

    pub fn clear_selection (&mut self) {
        let ids: Vec<CatalogNumber> = self.selection.ids().to_vec();
        for id in ids {
            self.deselect( id);
        }
    }

    /// selected objects in selection order
    pub fn selected_objects (&self)->Vec<&EngineObject<R,P>> {
        self.selection.iter().filter_map(|id| self.catalog.find_by_catalog_number( *id)).collect()
    }
}

/* #endregion selection controller */
