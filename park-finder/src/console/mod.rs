//! Interactive console surface.
//!
//! Pure glue over the resolvers: a two-level prompt loop (region, then
//! site number) with no state beyond the current region's listing.

mod command;
mod session;

pub use command::Command;
pub use session::{AppError, Session};
