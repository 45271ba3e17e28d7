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

use std::{collections::HashMap, hash::Hash};
use orbitrack_common::cartesian3::Cartesian3;
use tracing::debug;
use crate::{CatalogNumber, errors::{op_failed, Result, TrackerError}, propagator::Propagator, renderer::ColorHint, tle::{TleRecord, TleSeed}};

/// lazily derived propagator elements. Invalid elements are remembered so that we don't re-derive
/// them on every tick
#[derive(Debug)]
pub enum CachedElements<E> {
    Underived,
    Derived(E),
    Invalid(String),
}

/// a catalog entry together with its cached derived state and the renderer handles that belong to it.
/// Objects only exist inside a [`Catalog`], hence the visual handle is not optional
#[derive(Debug)]
pub struct TrackedObject<E,V,T> {
    pub catalog_number: CatalogNumber,
    pub name: String,
    pub tle: TleRecord,
    pub orbit_minutes: Option<u32>,
    pub pinned_trail: bool,
    pub color: ColorHint,

    pub(crate) elements: CachedElements<E>,
    pub(crate) visual: V,
    pub(crate) trail: Option<T>,
    pub(crate) position: Option<Cartesian3>,
    pub(crate) highlighted: bool,
}

impl<E,V,T> TrackedObject<E,V,T> where V: Copy {
    pub fn new (seed: TleSeed, color: ColorHint, visual: V)->Self {
        TrackedObject {
            catalog_number: seed.catalog_number,
            name: seed.record.name.clone(),
            tle: seed.record,
            orbit_minutes: seed.options.orbit_minutes,
            pinned_trail: seed.options.pinned_trail,
            color,
            elements: CachedElements::Underived,
            visual,
            trail: None,
            position: None,
            highlighted: false,
        }
    }

    pub fn visual (&self)->V { self.visual }
    pub fn trail (&self)->Option<&T> { self.trail.as_ref() }
    pub fn has_trail (&self)->bool { self.trail.is_some() }

    /// last rendered position (render coordinates)
    pub fn position (&self)->Option<Cartesian3> { self.position }
    pub fn is_highlighted (&self)->bool { self.highlighted }

    pub fn elements (&self)->Option<&E> {
        match &self.elements {
            CachedElements::Derived(e) => Some(e),
            _ => None
        }
    }

    pub fn has_invalid_elements (&self)->bool {
        matches!( self.elements, CachedElements::Invalid(_))
    }

    /// get the cached elements, deriving them on first use
    pub(crate) fn elements_with<P> (&mut self, propagator: &P)->Result<&E> where P: Propagator<Elements=E> {
        if let CachedElements::Underived = self.elements {
            self.elements = match propagator.derive_elements( &self.tle.line1, &self.tle.line2) {
                Ok(e) => CachedElements::Derived(e),
                Err(e) => {
                    debug!("object {} has invalid elements: {}", self.catalog_number, e);
                    CachedElements::Invalid( e.to_string())
                }
            };
        }

        match &self.elements {
            CachedElements::Derived(e) => Ok(e),
            CachedElements::Invalid(reason) => Err( TrackerError::InvalidElements( format!("object {}: {}", self.catalog_number, reason))),
            CachedElements::Underived => Err( op_failed!("elements of object {} not derived", self.catalog_number))
        }
    }
}

/// the authoritative, insertion-ordered collection of tracked objects.
/// Both indices (catalog number and visual handle) are only updated together with the object list
#[derive(Debug)]
pub struct Catalog<E,V,T> {
    objects: Vec<TrackedObject<E,V,T>>,
    by_number: HashMap<CatalogNumber,usize>,
    by_visual: HashMap<V,usize>,
}

impl<E,V,T> Default for Catalog<E,V,T> where V: Copy + Eq + Hash {
    fn default()->Self { Catalog::new() }
}

impl<E,V,T> Catalog<E,V,T> where V: Copy + Eq + Hash {
    pub fn new ()->Self {
        Catalog { objects: Vec::new(), by_number: HashMap::new(), by_visual: HashMap::new() }
    }

    /// add a new object. Duplicate catalog numbers are rejected with the benign `DuplicateCatalogEntry`,
    /// in which case the catalog is not modified
    pub fn add (&mut self, object: TrackedObject<E,V,T>) -> Result<&TrackedObject<E,V,T>> {
        let id = object.catalog_number;
        if self.by_number.contains_key( &id) {
            debug!("ignoring duplicate catalog entry {}", id);
            return Err( TrackerError::DuplicateCatalogEntry(id))
        }
        if self.by_visual.contains_key( &object.visual) {
            return Err( op_failed!("visual handle of object {} already in use", id))
        }

        let idx = self.objects.len();
        self.by_number.insert( id, idx);
        self.by_visual.insert( object.visual, idx);
        self.objects.push( object);

        Ok( &self.objects[idx] )
    }

    /// remove an object, keeping insertion order of the remaining ones
    pub fn remove (&mut self, id: CatalogNumber) -> Option<TrackedObject<E,V,T>> {
        let idx = self.by_number.remove( &id)?;
        let object = self.objects.remove( idx);
        self.by_visual.remove( &object.visual);

        for (i, o) in self.objects.iter().enumerate().skip(idx) {
            self.by_number.insert( o.catalog_number, i);
            self.by_visual.insert( o.visual, i);
        }

        Some(object)
    }

    /// remove all objects in insertion order
    pub fn drain (&mut self) -> Vec<TrackedObject<E,V,T>> {
        self.by_number.clear();
        self.by_visual.clear();
        std::mem::take( &mut self.objects)
    }

    pub fn contains (&self, id: CatalogNumber)->bool {
        self.by_number.contains_key( &id)
    }

    pub fn find_by_catalog_number (&self, id: CatalogNumber) -> Option<&TrackedObject<E,V,T>> {
        self.by_number.get( &id).map(|i| &self.objects[*i])
    }

    pub(crate) fn find_by_catalog_number_mut (&mut self, id: CatalogNumber) -> Option<&mut TrackedObject<E,V,T>> {
        match self.by_number.get( &id) {
            Some(i) => self.objects.get_mut( *i),
            None => None
        }
    }

    /// reverse lookup used for picking
    pub fn find_by_visual (&self, visual: V) -> Option<&TrackedObject<E,V,T>> {
        self.by_visual.get( &visual).map(|i| &self.objects[*i])
    }

    /// case insensitive name substring match in catalog order
    pub fn find_by_name<'a> (&'a self, query: &str) -> impl Iterator<Item=&'a TrackedObject<E,V,T>> + use<'a,E,V,T> {
        let query = query.to_lowercase();
        self.objects.iter().filter( move |o| !query.is_empty() && o.name.to_lowercase().contains( &query))
    }

    /// stable (insertion) ordered view
    pub fn all (&self) -> &[TrackedObject<E,V,T>] {
        self.objects.as_slice()
    }

    pub fn ids (&self) -> Vec<CatalogNumber> {
        self.objects.iter().map(|o| o.catalog_number).collect()
    }

    pub(crate) fn iter_mut (&mut self) -> impl Iterator<Item=&mut TrackedObject<E,V,T>> {
        self.objects.iter_mut()
    }

    pub fn len (&self)->usize { self.objects.len() }
    pub fn is_empty (&self)->bool { self.objects.is_empty() }
}
