pub mod export;
pub mod projection;
pub mod row;

pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
pub use export::{CodeplugExporter, ExportSummary, OutputFormat};
pub use projection::{aprs_to_row, channel_to_row, codeplug_aprs_rows, codeplug_channel_rows};
pub use row::{columns, CsvValue, Row};
