pub mod subscription;
pub mod transaction;

pub use subscription::Subscription;
pub use transaction::{coerce_amount, parse_date_only, Transaction, UNKNOWN_MERCHANT};
