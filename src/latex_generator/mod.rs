mod changes;
mod listing;
mod table;

pub use changes::*;
pub use listing::*;
pub use table::*;
