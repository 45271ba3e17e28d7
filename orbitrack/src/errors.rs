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

use thiserror::Error;
use crate::CatalogNumber;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// note that only `MalformedCatalog` (and config/IO/fetch errors) ever reach the caller of a load operation.
/// The per-record and per-object variants are collected in load reports or logged and skipped
#[derive(Error,Debug)]
pub enum TrackerError {

    #[error("malformed catalog: {0}")]
    MalformedCatalog( String ),

    #[error("duplicate catalog entry {0}")]
    DuplicateCatalogEntry( CatalogNumber ),

    #[error("truncated record '{name}': missing {missing}")]
    TruncatedRecord { name: String, missing: &'static str },

    #[error("invalid elements {0}")]
    InvalidElements( String ),

    #[error("propagation failure {0}")]
    PropagationFailure( String ),

    #[error("unresolved deep link id {0}")]
    UnresolvedDeepLinkId( String ),

    #[error("config error {0}")]
    ConfigError( String ),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("http error {0}")]
    HttpError( #[from] reqwest::Error),

    #[error("fetch error {0}")]
    FetchError( String ),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

impl TrackerError {
    /// errors that are reported but never abort a batch operation
    pub fn is_benign (&self)->bool {
        matches!( self, TrackerError::DuplicateCatalogEntry(_) | TrackerError::UnresolvedDeepLinkId(_))
    }
}

macro_rules! malformed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::TrackerError::MalformedCatalog( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use malformed;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::TrackerError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
