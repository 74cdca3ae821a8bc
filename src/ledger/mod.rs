//! Capital and position bookkeeping

pub mod position_ledger;

pub use position_ledger::*;
