pub mod record;

pub use record::{SensorRecord, LIGHT_READ_FAILED, RECORD_SIZE};
