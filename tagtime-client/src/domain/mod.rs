mod ids;
mod tag;
mod time_entry;

pub use ids::*;
pub use tag::*;
pub use time_entry::*;
