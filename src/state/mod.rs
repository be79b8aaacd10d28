//! State module for tracking crawl progress
//!
//! This module provides the state a single crawl run owns exclusively.
//!
//! # Components
//!
//! - `VisitedSet`: URLs a fetch has been attempted for, in visit order
//! - `Frontier`: discovered page URLs waiting to be fetched
//! - `ResourceSets`: PDF and plain-text documents found along the way

mod frontier;
mod ordered;
mod resources;

// Re-export main types
pub use frontier::Frontier;
pub use ordered::OrderedSet;
pub use resources::ResourceSets;

/// URLs for which a fetch has been attempted, successful or not
///
/// The set only ever grows; insertion order is kept for the manifest.
pub type VisitedSet = OrderedSet;
