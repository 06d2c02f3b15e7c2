//! Inventory row normalization.
//!
//! This crate turns loosely formatted spreadsheet rows into canonical records:
//!
//! - **text**: whitespace trimming and title casing
//! - **category**: prefix standardization and product keyword inference
//! - **movement**: movement type typo corrections
//! - **numeric**: quantity and unit price coercion
//! - **date**: Spanish "<day> de <month>" and generic calendar dates
//! - **record**: the row normalizer applying all of the above
//! - **edit**: preparation of manually entered records

pub mod category;
pub mod date;
pub mod edit;
pub mod movement;
pub mod numeric;
pub mod record;
pub mod text;

pub use category::{PRODUCT_KEYWORDS, infer_from_product, resolve_category, standardize_category};
pub use date::{normalize_date, parse_calendar_date};
pub use edit::{EditError, ManualEdit, prepare_manual_record};
pub use movement::normalize_movement_type;
pub use numeric::{normalize_quantity, normalize_unit_price, parse_f64};
pub use record::{RowNormalizer, normalize_record, to_raw};
pub use text::{clean_text, title_case};
