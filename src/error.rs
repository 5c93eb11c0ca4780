#![allow(dead_code)]

use thiserror::Error;

use crate::registry::VarId;

// Errors surfaced by the registry, DiscreteFunction, DomainIterator, and MaxSumController.
//
// Every fallible public operation returns one of these instead of panicking. Precondition
// violations in already-validated hot paths remain debug_assert!s instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaxSumError {
    #[error("variable {0} is not registered")]
    UnknownVariable(VarId),

    #[error(
        "variable {var} already registered with domain size {existing_size}, \
         cannot re-register with size {requested_size}"
    )]
    DuplicateVariable {
        var: VarId,
        existing_size: usize,
        requested_size: usize,
    },

    #[error("bad domain relationship: {reason}")]
    BadDomain { reason: String },

    #[error("index {index} out of range for domain size {domain_size}")]
    OutOfRange { index: usize, domain_size: usize },

    #[error("factor {0} is not present in the controller")]
    UnknownFactor(usize),
}
