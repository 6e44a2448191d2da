//! Library surface of the stock-harvest CLI, exposed for integration tests.

pub mod calculator;
pub mod pipeline;
pub mod worker;
