mod receipt;
mod row;

pub use receipt::{Receipt, RECEIVED_TEXT, RECEIVED_TITLE};
pub use row::{status_class, Row};
