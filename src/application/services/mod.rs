pub mod availability_service;
pub mod booking_service;
pub mod price_rule_service;
pub mod report_service;
pub mod room_service;
pub mod session_service;

pub use availability_service::AvailabilityService;
pub use booking_service::BookingService;
pub use price_rule_service::{PriceQuote, PriceRuleService};
pub use report_service::ReportService;
pub use room_service::RoomService;
pub use session_service::SessionService;
