//! Protected-area site finder.
//!
//! Browse National Park Service sites by US state or territory and look up
//! points of interest near a chosen site. Every network fetch runs through
//! a cache-first pipeline: listings and site records are keyed by source
//! URL, nearby-place responses by postal code, and the whole store is one
//! JSON file loaded at startup and written back at exit.

pub mod cache;
pub mod console;
pub mod domain;
pub mod nps;
pub mod places;
