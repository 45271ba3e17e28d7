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

use reqwest::Client;
use tracing::{debug,info};
use crate::errors::{Result, TrackerError};

/// retrieve the text of a TLE catalog (e.g. a celestrak "gp.php?GROUP=..&FORMAT=tle" url).
/// This does not parse or apply anything, the caller decides where the catalog gets loaded
pub async fn fetch_catalog_text (client: &Client, url: &str) -> Result<String> {
    debug!("fetching catalog {}", url);
    let response = client.get( url).send().await?;

    if response.status().is_success() {
        let text = response.text().await?;
        info!("fetched {} bytes of catalog data from {}", text.len(), url);
        Ok(text)

    } else {
        Err( TrackerError::FetchError( format!("{} returned status {}", url, response.status())))
    }
}
