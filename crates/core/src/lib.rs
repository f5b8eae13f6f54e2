//! Core types for the voice tour engine
//!
//! This crate provides foundational types used across all other crates:
//! - Scene and camera types
//! - Utterance (transcript) types
//! - Deep-link encoding
//! - Error types

pub mod deeplink;
pub mod error;
pub mod scene;
pub mod utterance;

pub use deeplink::{DeepLink, DeepLinkError};
pub use error::{Error, Result};
pub use scene::{filter_scenes, CameraPose, QualityTier, Scene};
pub use utterance::Utterance;
