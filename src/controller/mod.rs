pub mod controller;
pub mod graph;

pub use controller::{MaxSumController, MaxSumOptions};
pub use graph::FactorId;
