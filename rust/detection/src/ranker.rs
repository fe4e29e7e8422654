// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::types::WallCandidate;

/// Order walls by confidence: most samples first, nearer first on ties.
///
/// The sort is stable and drops nothing.
pub fn rank(mut candidates: Vec<WallCandidate>) -> Vec<WallCandidate> {
    candidates.sort_by(|a, b| {
        b.sample_count
            .cmp(&a.sample_count)
            .then(a.distance.total_cmp(&b.distance))
    });
    candidates
}
