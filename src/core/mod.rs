pub mod aggregator;
pub mod engine;
pub mod pipeline;
pub mod report;
