pub mod category;
pub mod error;
pub mod field;
pub mod options;
pub mod raw;
pub mod record;

pub use category::{Category, SIN_CATEGORIA};
pub use error::{ModelError, Result};
pub use field::Field;
pub use options::{DEFAULT_LOCALE_YEAR, LOCALE_YEAR_RANGE, ManualEditPolicy, NormalizationOptions};
pub use raw::{RawRecord, RawTable, RawValue};
pub use record::{ENTRADA, InventoryRecord, SALIDA};
