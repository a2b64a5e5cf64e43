// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-dimensional clustering of elevations into stories.

/// A closed `(min, max)` interval of grouped values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub min: f64,
    pub max: f64,
}

impl Cluster {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Sorts `values` and merges neighbours whose gap is at most `limit`.
///
/// Clusters come back in ascending order; NaN values are ignored.
pub fn create_clusters(values: impl IntoIterator<Item = f64>, limit: f64) -> Vec<Cluster> {
    let mut values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    values.sort_by(f64::total_cmp);

    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut clusters = Vec::new();
    let mut current = Cluster {
        min: first,
        max: first,
    };
    for value in iter {
        if value - current.max <= limit {
            current.max = value;
        } else {
            clusters.push(current);
            current = Cluster {
                min: value,
                max: value,
            };
        }
    }
    clusters.push(current);
    clusters
}
