//! Dose log: the user's ordered list of doses and its on-disk store.

mod log;
mod parse;
mod store;

pub use log::DoseLog;
pub use parse::parse_hours;
pub use store::DoseStore;
