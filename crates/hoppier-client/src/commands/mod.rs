pub mod check;
pub(crate) mod common;
pub mod totals;
pub mod transactions;
