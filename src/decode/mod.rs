//! Record decoding module
//!
//! # Overview
//!
//! Converts report rows into emitted records: canonical field names, typed
//! values, normalized dates and a deterministic primary key.

mod hash;
mod mapper;

pub use hash::generate_record_hash;
pub use mapper::{RecordMapper, OTHER_ROW_VALUE, RECORD_DATETIME_FORMAT};

#[cfg(test)]
mod tests;
