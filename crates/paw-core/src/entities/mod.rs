//! Entity structs for pawpoints domain objects.
//!
//! `PointRecord` maps to the `points` table. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` so transports can consume them as JSON.

mod point;

pub use point::{NearbyPoint, PointDraft, PointRecord, PointView};
