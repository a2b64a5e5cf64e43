// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numbering configuration loaded from environment variables.

use elemid_numbering::NumberingConfig;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stories numbered by the story/building runs.
    pub number_of_stories: usize,
    /// Largest elevation gap inside one zone story.
    pub story_grouping_limit: f64,
    /// Text placed before every story/sequence label.
    pub label_prefix: String,
    /// Zone number for interior doors without a related zone.
    pub default_zone_number: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = NumberingConfig::default();
        Self {
            number_of_stories: std::env::var("ELEMID_STORIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.number_of_stories),
            story_grouping_limit: std::env::var("ELEMID_STORY_GROUPING_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.story_grouping_limit),
            label_prefix: std::env::var("ELEMID_LABEL_PREFIX").unwrap_or(defaults.label_prefix),
            default_zone_number: std::env::var("ELEMID_DEFAULT_ZONE")
                .unwrap_or(defaults.default_zone_number),
        }
    }

    pub fn numbering(&self) -> NumberingConfig {
        NumberingConfig {
            number_of_stories: self.number_of_stories,
            story_grouping_limit: self.story_grouping_limit,
            label_prefix: self.label_prefix.clone(),
            default_zone_number: self.default_zone_number.clone(),
            ..NumberingConfig::default()
        }
    }
}
