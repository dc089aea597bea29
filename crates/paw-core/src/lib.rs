//! # paw-core
//!
//! Core types, distance math, and error types for pawpoints.
//!
//! This crate provides the foundational types shared across all pawpoints crates:
//! - Point entities (committed records, drafts, render views)
//! - Status and stage enums with their transition rules
//! - The great-circle Distance Engine
//! - Moderation policy and caller identity
//! - Inbound turn and outbound reply envelopes
//! - The `RecordStore` persistence seam
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod geo;
pub mod ids;
pub mod policy;
pub mod responses;
pub mod store;
pub mod turns;
pub mod updates;
