//! Repository modules implementing CRUD operations.
//!
//! Each module adds methods to `PawService` via `impl PawService` blocks.

pub mod point;
