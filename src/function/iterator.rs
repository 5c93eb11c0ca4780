#![allow(dead_code)]

use bitvec::vec::BitVec;
use log::trace;

use crate::registry::VarId;

use super::discrete_function::DiscreteFunction;

// A stateful enumerator of index tuples over a domain (vars, sizes).
//
// The iterator owns a snapshot of vars/sizes rather than borrowing them from a DiscreteFunction,
// so that callers can mutate the function's values while iterating over its already-copied shape.
//
// Iteration order is column-major: the lowest-indexed free variable varies fastest, so ind() is
// always a valid direct slot into a DiscreteFunction sharing this (vars, sizes) shape.
pub struct DomainIterator {
    vars: Vec<VarId>,
    sizes: Vec<usize>,
    strides: Vec<usize>,
    sub: Vec<usize>,
    ind: usize,
    fixed: BitVec,
}

impl DomainIterator {
    // Builds an iterator over an explicit (vars, sizes) domain, with every coordinate free.
    pub fn new(vars: Vec<VarId>, sizes: Vec<usize>) -> Self {
        debug_assert_eq!(vars.len(), sizes.len());
        let n = vars.len();
        let mut strides = vec![1usize; n];
        for k in 1..n {
            strides[k] = strides[k - 1] * sizes[k - 1];
        }
        DomainIterator {
            vars,
            sizes,
            strides,
            sub: vec![0; n],
            ind: 0,
            fixed: BitVec::repeat(false, n),
        }
    }

    // Builds an iterator over f's own domain, with every coordinate free.
    pub fn over(f: &DiscreteFunction) -> Self {
        Self::new(f.vars().to_vec(), f.sizes().to_vec())
    }

    // The domain's variable list, sorted, matching the target DiscreteFunction's vars.
    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    // The current coordinate tuple.
    pub fn sub_ind(&self) -> &[usize] {
        &self.sub
    }

    // The current linear index, a valid direct slot into a DiscreteFunction over this domain.
    pub fn ind(&self) -> usize {
        self.ind
    }

    // Whether var is currently pinned by condition().
    pub fn is_fixed(&self, var: VarId) -> bool {
        match self.vars.binary_search(&var) {
            Ok(pos) => self.fixed[pos],
            Err(_) => false,
        }
    }

    // The number of currently-pinned variables.
    pub fn fixed_count(&self) -> usize {
        self.fixed.count_ones()
    }

    // Pins vars[k] to vals[k] for every k, marking each as fixed. A variable absent from this
    // iterator's domain is silently ignored.
    pub fn condition(&mut self, vars: &[VarId], vals: &[usize]) {
        debug_assert_eq!(vars.len(), vals.len());
        for (&v, &val) in vars.iter().zip(vals.iter()) {
            if let Ok(pos) = self.vars.binary_search(&v) {
                debug_assert!(val < self.sizes[pos], "condition value out of range");
                self.ind -= self.sub[pos] * self.strides[pos];
                self.sub[pos] = val;
                self.ind += val * self.strides[pos];
                self.fixed.set(pos, true);
            }
        }
    }

    // Pins every variable in other's domain to its current value in other, to the extent those
    // variables also appear in this iterator's domain.
    pub fn condition_from(&mut self, other: &DomainIterator) {
        self.condition(&other.vars, &other.sub);
    }

    // Zeroes every free coordinate, retaining pinned ones.
    pub fn reset(&mut self) {
        for k in 0..self.vars.len() {
            if !self.fixed[k] {
                self.ind -= self.sub[k] * self.strides[k];
                self.sub[k] = 0;
            }
        }
    }

    // True iff advance() would move to a new tuple rather than wrapping back to the first one.
    pub fn has_next(&self) -> bool {
        (0..self.vars.len()).any(|k| !self.fixed[k] && self.sub[k] + 1 < self.sizes[k])
    }

    // Advances to the next tuple, treating the free coordinates as a mixed-radix counter with
    // the lowest-indexed free variable as the fastest-varying digit. Fixed coordinates never
    // change. Has no effect beyond wrapping free coordinates back to zero once has_next() is
    // false.
    pub fn advance(&mut self) {
        trace!("DomainIterator::advance from sub {:?}", self.sub);
        for k in 0..self.vars.len() {
            if self.fixed[k] {
                continue;
            }
            if self.sub[k] + 1 < self.sizes[k] {
                self.sub[k] += 1;
                self.ind += self.strides[k];
                return;
            }
            // Carry: wrap this free coordinate back to zero and continue to the next one.
            self.ind -= self.sub[k] * self.strides[k];
            self.sub[k] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::registry;

    fn setup_vars() {
        registry::reset();
        registry::register_variable(100, 2).unwrap();
        registry::register_variable(101, 3).unwrap();
    }

    #[test]
    fn enumerates_full_domain_in_column_major_order() {
        let mut it = DomainIterator::new(vec![100, 101], vec![2, 3]);
        let mut seen = Vec::new();
        loop {
            seen.push((it.ind(), it.sub_ind().to_vec()));
            if !it.has_next() {
                break;
            }
            it.advance();
        }
        assert_eq!(
            seen,
            vec![
                (0, vec![0, 0]),
                (1, vec![1, 0]),
                (2, vec![0, 1]),
                (3, vec![1, 1]),
                (4, vec![0, 2]),
                (5, vec![1, 2]),
            ]
        );
    }

    #[test]
    #[serial]
    fn condition_fixes_a_variable_and_skips_it_during_advance() {
        setup_vars();
        let mut it = DomainIterator::new(vec![100, 101], vec![2, 3]);
        it.condition(&[101], &[1]);
        assert!(it.is_fixed(101));
        assert!(!it.is_fixed(100));
        assert_eq!(it.fixed_count(), 1);

        let mut seen = Vec::new();
        loop {
            seen.push(it.sub_ind().to_vec());
            if !it.has_next() {
                break;
            }
            it.advance();
        }
        assert_eq!(seen, vec![vec![0, 1], vec![1, 1]]);
    }

    #[test]
    fn condition_ignores_variables_outside_the_domain() {
        let mut it = DomainIterator::new(vec![100], vec![2]);
        it.condition(&[999], &[0]);
        assert!(!it.is_fixed(999));
        assert_eq!(it.fixed_count(), 0);
    }

    #[test]
    fn reset_zeroes_free_coordinates_but_keeps_fixed_ones() {
        let mut it = DomainIterator::new(vec![100, 101], vec![2, 3]);
        it.condition(&[101], &[2]);
        it.advance();
        it.advance();
        it.reset();
        assert_eq!(it.sub_ind(), &[0, 2]);
        assert_eq!(it.ind(), 4);
    }

    #[test]
    fn single_cell_domain_never_has_next() {
        let it = DomainIterator::new(vec![], vec![]);
        assert!(!it.has_next());
        assert_eq!(it.ind(), 0);
    }

    #[test]
    fn condition_from_pins_shared_variables() {
        let donor = {
            let mut d = DomainIterator::new(vec![100, 101], vec![2, 3]);
            d.advance();
            d.advance();
            d
        };
        let mut target = DomainIterator::new(vec![101], vec![3]);
        target.condition_from(&donor);
        assert_eq!(target.sub_ind(), &[donor.sub_ind()[1]]);
    }
}
