#![allow(dead_code)]

use std::collections::HashMap;

use log::{debug, trace};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::error::MaxSumError;

// Opaque identifier for a discrete variable.
pub type VarId = usize;

// Process-wide mapping from VarId to domain size. Every DiscreteFunction consults this table
// to cache the strides it needs at construction time. Init-on-first-use, no teardown.
fn registry() -> &'static RwLock<HashMap<VarId, usize>> {
    static REGISTRY: OnceCell<RwLock<HashMap<VarId, usize>>> = OnceCell::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

// Registers var with the given domain size. Re-registering an already-known variable with the
// same size is a no-op success; re-registering with a different size fails without mutating
// the registry.
pub fn register_variable(var: VarId, size: usize) -> Result<(), MaxSumError> {
    trace!("register_variable({}, {})", var, size);

    // Fast path: check under a read lock first so repeated registration of the same variable
    // (the common case when re-reading overlapping problem instances) never takes a write lock.
    if let Some(&existing_size) = registry().read().get(&var) {
        if existing_size == size {
            return Ok(());
        }
        return Err(MaxSumError::DuplicateVariable {
            var,
            existing_size,
            requested_size: size,
        });
    }

    let mut map = registry().write();
    match map.get(&var) {
        Some(&existing_size) if existing_size == size => Ok(()),
        Some(&existing_size) => Err(MaxSumError::DuplicateVariable {
            var,
            existing_size,
            requested_size: size,
        }),
        None => {
            debug!("Registered variable {} with domain size {}", var, size);
            map.insert(var, size);
            Ok(())
        }
    }
}

// Returns the domain size of var, or UnknownVariable if it was never registered.
pub fn domain_size(var: VarId) -> Result<usize, MaxSumError> {
    registry()
        .read()
        .get(&var)
        .copied()
        .ok_or(MaxSumError::UnknownVariable(var))
}

// Returns whether var has been registered.
pub fn is_registered(var: VarId) -> bool {
    registry().read().contains_key(&var)
}

// Returns the number of distinct variables registered so far.
pub fn registered_count() -> usize {
    registry().read().len()
}

// Clears the registry. Test-only: lets each unit test start from a clean process-wide table
// instead of leaking registrations into unrelated tests.
#[cfg(test)]
pub fn reset() {
    registry().write().clear();
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn register_then_read() {
        reset();
        assert!(!is_registered(7));
        register_variable(7, 4).unwrap();
        assert!(is_registered(7));
        assert_eq!(domain_size(7).unwrap(), 4);
        assert_eq!(registered_count(), 1);
    }

    #[test]
    #[serial]
    fn reregister_same_size_is_ok() {
        reset();
        register_variable(1, 3).unwrap();
        register_variable(1, 3).unwrap();
        assert_eq!(registered_count(), 1);
    }

    #[test]
    #[serial]
    fn reregister_different_size_fails_without_mutation() {
        reset();
        register_variable(1, 3).unwrap();
        let err = register_variable(1, 5).unwrap_err();
        assert_eq!(
            err,
            MaxSumError::DuplicateVariable {
                var: 1,
                existing_size: 3,
                requested_size: 5,
            }
        );
        assert_eq!(domain_size(1).unwrap(), 3);
    }

    #[test]
    #[serial]
    fn unknown_variable_errors() {
        reset();
        assert_eq!(domain_size(42).unwrap_err(), MaxSumError::UnknownVariable(42));
    }
}
