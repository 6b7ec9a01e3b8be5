//! # midnight-mirror-core
//!
//! Core library for manifest-tracked directory mirroring.
//!
//! This library keeps a mirror directory structurally in sync with a source
//! directory. Files created in the mirror are either random stubs or square
//! thumbnails, and every file the tool creates is recorded in a manifest
//! stored at the mirror root so that deletions can be propagated both ways.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the midnight-mirror library
pub mod error;

/// Recursive file listing
pub mod scanner;

/// Persisted record of mirror files created by the tool
pub mod manifest;

/// Stub and thumbnail creation
pub mod materializer;

/// Configuration file parsing and management
pub mod config;

/// Three-phase reconciliation engine
pub mod sync;
