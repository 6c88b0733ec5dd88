pub mod availability;
pub mod occupancy;
pub mod overlap_filter;
pub mod price_resolver;
pub mod state_machine;

pub use availability::*;
pub use occupancy::*;
pub use overlap_filter::*;
pub use price_resolver::*;
pub use state_machine::*;
