pub mod discrete_function;
pub mod iterator;

pub use discrete_function::DiscreteFunction;
pub use iterator::DomainIterator;
