use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// A row of string cells, in column order.
pub type Row = Vec<String>;

/// The three sheets the back office persists into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Rooms,
    Bookings,
    Prices,
}

const ROOMS_HEADER: &[&str] = &["ID", "Number", "Type", "Capacity", "Base Price", "Status"];

const BOOKINGS_HEADER: &[&str] = &[
    "ID",
    "Room ID",
    "Guest Name",
    "Phone",
    "Check In",
    "Check Out",
    "Total Price",
    "Status",
    "Base Price",
    "Price Per Night",
    "Nights",
    "Selected Rule IDs",
    "Notes",
];

const PRICES_HEADER: &[&str] = &[
    "ID",
    "Room ID",
    "Start Date",
    "End Date",
    "Price Type",
    "Price Value",
    "Rule Name",
];

impl Sheet {
    pub fn name(&self) -> &'static str {
        match self {
            Sheet::Rooms => "rooms",
            Sheet::Bookings => "bookings",
            Sheet::Prices => "prices",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Sheet::Rooms => ROOMS_HEADER,
            Sheet::Bookings => BOOKINGS_HEADER,
            Sheet::Prices => PRICES_HEADER,
        }
    }

    pub fn width(&self) -> usize {
        self.header().len()
    }

    /// Spreadsheet column letter of the last column (A-based).
    pub fn last_column(&self) -> char {
        (b'A' + (self.width() as u8) - 1) as char
    }
}

impl std::fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Narrow row-store contract over a spreadsheet-shaped backend.
///
/// Data rows are addressed by their zero-based position below the header.
/// Cleared rows stay in place as blank rows so positions never shift.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// All data rows below the header, blank rows included.
    async fn get_rows(&self, sheet: Sheet) -> DomainResult<Vec<Row>>;

    async fn append_row(&self, sheet: Sheet, row: Row) -> DomainResult<()>;

    /// Replace the cells of an existing data row.
    async fn update_row(&self, sheet: Sheet, index: usize, row: Row) -> DomainResult<()>;

    /// Blank out an existing data row.
    async fn clear_row(&self, sheet: Sheet, index: usize) -> DomainResult<()>;

    /// Write the header row when it is missing or has fewer columns than expected.
    async fn ensure_header(&self, sheet: Sheet) -> DomainResult<()>;
}
