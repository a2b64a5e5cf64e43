// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Settings shared by all numbering runs.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingConfig {
    /// Stories numbered by the story/building runs (story numbers `0..n`)
    pub number_of_stories: usize,
    /// Largest elevation gap (model units) inside one zone story cluster
    pub story_grouping_limit: f64,
    /// Text placed before every `<story><sequence>` label
    pub label_prefix: String,
    /// Zone number for interior doors without a related zone
    pub default_zone_number: String,
    /// Classification of doors
    pub door_classification: String,
    /// Classification of windows
    pub window_classification: String,
    /// Host element type of zones
    pub zone_kind: String,
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            number_of_stories: 4,
            story_grouping_limit: 1.0,
            label_prefix: String::new(),
            default_zone_number: "000".to_string(),
            door_classification: "Door".to_string(),
            window_classification: "Window".to_string(),
            zone_kind: "Zone".to_string(),
        }
    }
}
