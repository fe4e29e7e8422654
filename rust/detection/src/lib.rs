// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall detection and artwork placement for unannotated 3D scenes
//!
//! The pipeline works purely geometrically, without mesh labels:
//! 1. Sample: cast a grid of horizontal rays from the scene center
//! 2. Cluster: group hits by azimuth into wall candidates
//! 3. Rank: order candidates by sample count, then proximity
//! 4. Place: one artwork per wall, keeping a minimum spacing
//!
//! # Usage
//!
//! ```rust,ignore
//! use artwall_detection::{detect_and_place, DetectionConfig, PlacementConfig};
//! use artwall_geometry::{builders, SurfaceSet};
//!
//! let surfaces = SurfaceSet::new(builders::room(10.0, 8.0, 3.0));
//! let layout = detect_and_place(&surfaces, 4, &DetectionConfig::default(), &PlacementConfig::default());
//!
//! for placement in &layout.placements {
//!     println!("{:?} facing {}", placement.position, placement.rotation_y);
//! }
//! ```

pub mod clusterer;
pub mod config;
pub mod detector;
pub mod error;
pub mod face_analysis;
pub mod placer;
pub mod ranker;
pub mod sampler;
pub mod types;

pub use clusterer::{angular_distance, cluster, RejectReason};
pub use config::{DetectionConfig, DetectionMode, PlacementConfig};
pub use detector::{detect_and_place, Detection, GalleryLayout, WallDetector};
pub use error::{Error, Result};
pub use placer::place;
pub use ranker::rank;
pub use sampler::{sample, SampleStats};
pub use types::{Placement, WallCandidate, WallHit};
