pub mod controller;
pub mod error;
pub mod function;
pub mod index;
pub mod registry;
pub mod ui;

pub use controller::{MaxSumController, MaxSumOptions};
pub use error::MaxSumError;
pub use function::{DiscreteFunction, DomainIterator};
pub use registry::VarId;
