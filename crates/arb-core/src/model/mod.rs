//! Provider-agnostic completion types and the static model table.

pub mod client;
pub mod profiles;
pub mod types;
