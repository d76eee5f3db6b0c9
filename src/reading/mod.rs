pub mod cf6;
pub mod date_key;
pub mod history;
pub mod record;

pub use cf6::{cf6_url, parse_report, Cf6Day, Station, CF6_URL};
pub use date_key::DateKey;
pub use history::{history_url, parse_history, HISTORY_URL};
pub use record::{ClimateRecord, ClimateValue, MISSING};
