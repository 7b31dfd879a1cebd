//! Site directory source: nps.gov index, listing, and detail pages.
//!
//! Key characteristics of the source markup:
//! - the index page carries the whole region directory in one search-bar
//!   dropdown; without that block there is no directory at all
//! - listing pages mark sites with `h3` headings, but some headings are
//!   plain section dividers with no link
//! - detail pages always render a title, designation, and phone, while
//!   trails and multi-state sites may omit the postal address block
//!
//! Selectors are pinned to the live site's markup and will break if it
//! changes; the defensiveness here targets fields pages genuinely omit,
//! not structural drift.

mod client;
mod error;
mod fetch;
mod parse;

pub use client::{NpsClient, NpsConfig, PageSource};
pub use error::NpsError;
pub use fetch::SiteIndex;
