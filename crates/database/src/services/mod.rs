pub mod record;

pub use record::{KeyOf, Record, RecordService};
