pub mod booking;
pub mod price_rule;
pub mod room;
pub mod stay;

pub use booking::*;
pub use price_rule::*;
pub use room::*;
pub use stay::*;
