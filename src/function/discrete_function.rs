#![allow(dead_code)]

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use log::{debug, trace};

use crate::error::MaxSumError;
use crate::index::{domain_size_of, sub2ind, sub2ind_checked};
use crate::registry::{self, VarId};

use super::iterator::DomainIterator;

// A dense tabular function over a sorted, duplicate-free subset of registered variables.
//
// Storage is column-major over vars: the first variable varies fastest, so index::sub2ind/
// ind2sub and this type's own strides agree.
#[derive(Debug, Clone)]
pub struct DiscreteFunction {
    vars: Vec<VarId>,
    sizes: Vec<usize>,
    strides: Vec<usize>,
    values: Vec<f64>,
}

impl DiscreteFunction {
    // Builds a function over vars, every cell initialized to scalar. vars need not already be
    // sorted or deduplicated; this does both. Any unregistered variable fails the whole
    // construction with UnknownVariable.
    pub fn new(vars: Vec<VarId>, scalar: f64) -> Result<Self, MaxSumError> {
        let mut vars = vars;
        vars.sort_unstable();
        vars.dedup();
        let sizes = Self::fetch_sizes(&vars)?;
        let strides = Self::compute_strides(&sizes);
        let total = domain_size_of(&sizes);
        trace!("DiscreteFunction::new({:?}, {}) -> {} cells", vars, scalar, total);
        Ok(DiscreteFunction { vars, sizes, strides, values: vec![scalar; total] })
    }

    // Builds a function from an explicit, already column-major-ordered value table. vars must
    // already be sorted and duplicate-free; values.len() must equal the product of their domain
    // sizes.
    pub fn from_values(vars: Vec<VarId>, values: Vec<f64>) -> Result<Self, MaxSumError> {
        if !vars.windows(2).all(|w| w[0] < w[1]) {
            return Err(MaxSumError::BadDomain {
                reason: "vars must be sorted and duplicate-free".to_string(),
            });
        }
        let sizes = Self::fetch_sizes(&vars)?;
        let expected = domain_size_of(&sizes);
        if values.len() != expected {
            return Err(MaxSumError::BadDomain {
                reason: format!("expected {} values for this domain, got {}", expected, values.len()),
            });
        }
        let strides = Self::compute_strides(&sizes);
        Ok(DiscreteFunction { vars, sizes, strides, values })
    }

    // A zero-arity constant function.
    pub fn constant(value: f64) -> Self {
        DiscreteFunction { vars: Vec::new(), sizes: Vec::new(), strides: Vec::new(), values: vec![value] }
    }

    fn fetch_sizes(vars: &[VarId]) -> Result<Vec<usize>, MaxSumError> {
        vars.iter().map(|&v| registry::domain_size(v)).collect()
    }

    fn compute_strides(sizes: &[usize]) -> Vec<usize> {
        let mut strides = vec![1usize; sizes.len()];
        for k in 1..sizes.len() {
            strides[k] = strides[k - 1] * sizes[k - 1];
        }
        strides
    }

    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn arity(&self) -> usize {
        self.vars.len()
    }

    pub fn domain_size(&self) -> usize {
        self.values.len()
    }

    // --- Element access -----------------------------------------------------------------

    pub fn get(&self, i: usize) -> f64 {
        self.values[i]
    }

    pub fn get_checked(&self, i: usize) -> Result<f64, MaxSumError> {
        self.values
            .get(i)
            .copied()
            .ok_or(MaxSumError::OutOfRange { index: i, domain_size: self.values.len() })
    }

    pub fn get_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }

    pub fn set(&mut self, i: usize, value: f64) {
        self.values[i] = value;
    }

    pub fn set_checked(&mut self, i: usize, value: f64) -> Result<(), MaxSumError> {
        if i >= self.values.len() {
            return Err(MaxSumError::OutOfRange { index: i, domain_size: self.values.len() });
        }
        self.values[i] = value;
        Ok(())
    }

    pub fn get_by_subindex(&self, sub: &[usize]) -> f64 {
        self.values[sub2ind(&self.sizes, sub)]
    }

    pub fn get_by_subindex_checked(&self, sub: &[usize]) -> Result<f64, MaxSumError> {
        Ok(self.values[sub2ind_checked(&self.sizes, sub)?])
    }

    pub fn set_by_subindex(&mut self, sub: &[usize], value: f64) {
        let i = sub2ind(&self.sizes, sub);
        self.values[i] = value;
    }

    // Reads this function's value at the coordinates implied by a superset tuple.
    //
    // outer_vars must be sorted and a superset of self.vars, with outer_sub the parallel
    // coordinate tuple. Walks both sorted lists in lockstep, consuming a stride contribution only
    // where the outer variable matches the next own variable. Hot path for message computation,
    // avoids materializing a filtered subindex vector.
    pub fn get_by_super_subindex(&self, outer_vars: &[VarId], outer_sub: &[usize]) -> f64 {
        self.values[self.super_subindex_to_ind(outer_vars, outer_sub)]
    }

    pub fn set_by_super_subindex(&mut self, outer_vars: &[VarId], outer_sub: &[usize], value: f64) {
        let i = self.super_subindex_to_ind(outer_vars, outer_sub);
        self.values[i] = value;
    }

    fn super_subindex_to_ind(&self, outer_vars: &[VarId], outer_sub: &[usize]) -> usize {
        debug_assert_eq!(outer_vars.len(), outer_sub.len());
        let mut ind = 0;
        let mut k = 0;
        for (j, &ov) in outer_vars.iter().enumerate() {
            if k >= self.vars.len() {
                break;
            }
            if ov == self.vars[k] {
                ind += outer_sub[j] * self.strides[k];
                k += 1;
            }
        }
        debug_assert_eq!(k, self.vars.len(), "outer_vars must be a superset of this function's domain");
        ind
    }

    pub fn get_by_map(&self, map: &BTreeMap<VarId, usize>) -> f64 {
        self.values[self.map_to_ind(map)]
    }

    pub fn set_by_map(&mut self, map: &BTreeMap<VarId, usize>, value: f64) {
        let i = self.map_to_ind(map);
        self.values[i] = value;
    }

    fn map_to_ind(&self, map: &BTreeMap<VarId, usize>) -> usize {
        let mut ind = 0;
        for (k, &v) in self.vars.iter().enumerate() {
            let val = *map.get(&v).expect("map is missing a variable in this function's domain");
            ind += val * self.strides[k];
        }
        ind
    }

    // --- Scalar arithmetic ---------------------------------------------------------------

    pub fn add_assign_scalar(&mut self, c: f64) {
        for v in &mut self.values {
            *v += c;
        }
    }

    pub fn sub_assign_scalar(&mut self, c: f64) {
        for v in &mut self.values {
            *v -= c;
        }
    }

    pub fn mul_assign_scalar(&mut self, c: f64) {
        for v in &mut self.values {
            *v *= c;
        }
    }

    pub fn div_assign_scalar(&mut self, c: f64) {
        for v in &mut self.values {
            *v /= c;
        }
    }

    pub fn negate(&self) -> Self {
        let mut r = self.clone();
        r.mul_assign_scalar(-1.0);
        r
    }

    // --- Function arithmetic (domain-union semantics) -------------------------------------

    pub fn add_assign_function(&mut self, other: &DiscreteFunction) -> Result<(), MaxSumError> {
        self.combine_assign_function(other, |a, b| a + b)
    }

    pub fn sub_assign_function(&mut self, other: &DiscreteFunction) -> Result<(), MaxSumError> {
        self.combine_assign_function(other, |a, b| a - b)
    }

    pub fn mul_assign_function(&mut self, other: &DiscreteFunction) -> Result<(), MaxSumError> {
        self.combine_assign_function(other, |a, b| a * b)
    }

    pub fn div_assign_function(&mut self, other: &DiscreteFunction) -> Result<(), MaxSumError> {
        self.combine_assign_function(other, |a, b| a / b)
    }

    fn combine_assign_function(
        &mut self,
        other: &DiscreteFunction,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<(), MaxSumError> {
        if !other.domain_is_subset_of(self) {
            self.expand(&other.vars)?;
        }
        let mut it = DomainIterator::over(self);
        loop {
            let i = it.ind();
            let rhs = other.get_by_super_subindex(&self.vars, it.sub_ind());
            self.values[i] = op(self.values[i], rhs);
            if !it.has_next() {
                break;
            }
            it.advance();
        }
        Ok(())
    }

    fn domain_is_subset_of(&self, other: &DiscreteFunction) -> bool {
        self.vars.iter().all(|v| other.vars.binary_search(v).is_ok())
    }

    // Ensures this function's domain is a superset of extra_vars. Idempotent when it already is.
    pub fn expand(&mut self, extra_vars: &[VarId]) -> Result<(), MaxSumError> {
        let mut union = self.vars.clone();
        union.extend_from_slice(extra_vars);
        union.sort_unstable();
        union.dedup();
        if union.len() == self.vars.len() {
            return Ok(());
        }
        debug!("expanding domain {:?} -> {:?}", self.vars, union);
        let mut r = DiscreteFunction::new(union, 0.0)?;
        let mut it = DomainIterator::over(&r);
        loop {
            let i = it.ind();
            r.values[i] = self.get_by_super_subindex(&r.vars, it.sub_ind());
            if !it.has_next() {
                break;
            }
            it.advance();
        }
        std::mem::swap(self, &mut r);
        Ok(())
    }

    // Fixes fixed_vars to fixed_vals, producing a function over the remaining variables.
    // Variables in fixed_vars absent from this domain are ignored; if none of fixed_vars
    // intersect this domain, the function is left unchanged.
    pub fn condition(&mut self, fixed_vars: &[VarId], fixed_vals: &[usize]) -> Result<(), MaxSumError> {
        debug_assert_eq!(fixed_vars.len(), fixed_vals.len());
        let free: Vec<VarId> = self.vars.iter().copied().filter(|v| !fixed_vars.contains(v)).collect();
        if free.len() == self.vars.len() {
            return Ok(());
        }
        debug!("conditioning domain {:?} on {:?} = {:?}", self.vars, fixed_vars, fixed_vals);
        let mut r = DiscreteFunction::new(free, 0.0)?;
        let mut full = DomainIterator::over(self);
        full.condition(fixed_vars, fixed_vals);
        let mut free_it = DomainIterator::over(&r);
        loop {
            r.values[free_it.ind()] = self.values[full.ind()];
            if !free_it.has_next() {
                break;
            }
            free_it.advance();
            full.advance();
        }
        std::mem::swap(self, &mut r);
        Ok(())
    }

    // --- Marginalization -------------------------------------------------------------------

    // Reduces this function onto out_vars by folding aggregate over every coordinate in
    // dom(self) minus out_vars. out_vars must be a subset of this function's domain.
    pub fn marginal(
        &self,
        out_vars: &[VarId],
        aggregate: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, MaxSumError> {
        if !out_vars.iter().all(|v| self.vars.binary_search(v).is_ok()) {
            return Err(MaxSumError::BadDomain {
                reason: "marginal target must be a subset of the function's domain".to_string(),
            });
        }
        let mut out_vars = out_vars.to_vec();
        out_vars.sort_unstable();
        out_vars.dedup();

        let mut out = DiscreteFunction::new(out_vars.clone(), 0.0)?;
        let mut out_it = DomainIterator::over(&out);
        loop {
            let mut inner = DomainIterator::over(self);
            inner.condition(&out_vars, out_it.sub_ind());
            let mut acc = self.values[inner.ind()];
            while inner.has_next() {
                inner.advance();
                acc = aggregate(acc, self.values[inner.ind()]);
            }
            out.values[out_it.ind()] = acc;
            if !out_it.has_next() {
                break;
            }
            out_it.advance();
        }
        Ok(out)
    }

    pub fn max_marginal(&self, out_vars: &[VarId]) -> Result<Self, MaxSumError> {
        self.marginal(out_vars, f64::max)
    }

    pub fn min_marginal(&self, out_vars: &[VarId]) -> Result<Self, MaxSumError> {
        self.marginal(out_vars, f64::min)
    }

    pub fn sum_marginal(&self, out_vars: &[VarId]) -> Result<Self, MaxSumError> {
        self.marginal(out_vars, |a, b| a + b)
    }

    pub fn mean_marginal(&self, out_vars: &[VarId]) -> Result<Self, MaxSumError> {
        let mut out = self.sum_marginal(out_vars)?;
        let ratio = self.domain_size() as f64 / out.domain_size() as f64;
        out.div_assign_scalar(ratio);
        Ok(out)
    }

    // --- Reductions --------------------------------------------------------------------------

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    pub fn maxnorm(&self) -> f64 {
        self.values.iter().copied().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    // Linear index of the largest value, ties broken by lowest index.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for i in 1..self.values.len() {
            if self.values[i] > self.values[best] {
                best = i;
            }
        }
        best
    }

    // Linear index of the largest value other than exclude, or None on a one-cell function.
    pub fn argmax_excluding(&self, exclude: usize) -> Option<usize> {
        let mut best: Option<usize> = None;
        for i in 0..self.values.len() {
            if i == exclude {
                continue;
            }
            best = match best {
                Some(b) if self.values[b] >= self.values[i] => Some(b),
                _ => Some(i),
            };
        }
        best
    }

    // --- Comparisons -------------------------------------------------------------------------

    pub fn same_domain(&self, other: &Self) -> bool {
        self.vars == other.vars
    }

    // True iff, over the union of domains, broadcasted values agree within tol. Uses a relative
    // test |1 - a/b| < tol, falling back to an absolute test when b == 0; tol == 0.0 requires
    // exact equality.
    pub fn eq_within_tolerance(&self, other: &Self, tol: f64) -> bool {
        let mut union = self.vars.clone();
        union.extend_from_slice(&other.vars);
        union.sort_unstable();
        union.dedup();
        let sizes = match Self::fetch_sizes(&union) {
            Ok(s) => s,
            Err(_) => return false,
        };
        let mut it = DomainIterator::new(union.clone(), sizes);
        loop {
            let a = self.get_by_super_subindex(&union, it.sub_ind());
            let b = other.get_by_super_subindex(&union, it.sub_ind());
            if !Self::values_eq_within_tolerance(a, b, tol) {
                return false;
            }
            if !it.has_next() {
                break;
            }
            it.advance();
        }
        true
    }

    fn values_eq_within_tolerance(a: f64, b: f64, tol: f64) -> bool {
        if tol == 0.0 {
            return a == b;
        }
        if b != 0.0 {
            (1.0 - a / b).abs() < tol
        } else {
            (a - b).abs() < tol
        }
    }

    pub fn strictly_eq(&self, other: &Self, tol: f64) -> bool {
        self.same_domain(other) && self.eq_within_tolerance(other, tol)
    }

    pub fn all_lt(&self, c: f64) -> bool {
        self.values.iter().all(|&v| v < c)
    }

    pub fn all_le(&self, c: f64) -> bool {
        self.values.iter().all(|&v| v <= c)
    }

    pub fn all_gt(&self, c: f64) -> bool {
        self.values.iter().all(|&v| v > c)
    }

    pub fn all_ge(&self, c: f64) -> bool {
        self.values.iter().all(|&v| v >= c)
    }

    // --- Elementwise transcendentals -----------------------------------------------------------

    pub fn mapped(&self, op: fn(f64) -> f64) -> Self {
        let mut r = self.clone();
        r.map_inplace(op);
        r
    }

    pub fn map_inplace(&mut self, op: fn(f64) -> f64) {
        for v in &mut self.values {
            *v = op(*v);
        }
    }

    pub fn ln(&self) -> Self {
        self.mapped(f64::ln)
    }

    pub fn exp(&self) -> Self {
        self.mapped(f64::exp)
    }

    pub fn sqrt(&self) -> Self {
        self.mapped(f64::sqrt)
    }

    pub fn sin(&self) -> Self {
        self.mapped(f64::sin)
    }

    pub fn cos(&self) -> Self {
        self.mapped(f64::cos)
    }

    pub fn tan(&self) -> Self {
        self.mapped(f64::tan)
    }

    pub fn abs(&self) -> Self {
        self.mapped(f64::abs)
    }

    pub fn ceil(&self) -> Self {
        self.mapped(f64::ceil)
    }

    pub fn floor(&self) -> Self {
        self.mapped(f64::floor)
    }

    pub fn powf(&self, exponent: f64) -> Self {
        let mut r = self.clone();
        for v in &mut r.values {
            *v = v.powf(exponent);
        }
        r
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl Index<usize> for DiscreteFunction {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl IndexMut<usize> for DiscreteFunction {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}

impl<'a> Neg for &'a DiscreteFunction {
    type Output = DiscreteFunction;
    fn neg(self) -> DiscreteFunction {
        self.negate()
    }
}

macro_rules! impl_function_op {
    ($trait:ident, $method:ident, $assign_method:ident) => {
        impl<'a, 'b> $trait<&'b DiscreteFunction> for &'a DiscreteFunction {
            type Output = DiscreteFunction;
            fn $method(self, rhs: &'b DiscreteFunction) -> DiscreteFunction {
                let mut r = self.clone();
                r.$assign_method(rhs).expect("incompatible domains");
                r
            }
        }
    };
}

impl_function_op!(Add, add, add_assign_function);
impl_function_op!(Sub, sub, sub_assign_function);
impl_function_op!(Mul, mul, mul_assign_function);
impl_function_op!(Div, div, div_assign_function);

macro_rules! impl_function_assign_op {
    ($trait:ident, $method:ident, $assign_method:ident) => {
        impl $trait<&DiscreteFunction> for DiscreteFunction {
            fn $method(&mut self, rhs: &DiscreteFunction) {
                self.$assign_method(rhs).expect("incompatible domains");
            }
        }
    };
}

impl_function_assign_op!(AddAssign, add_assign, add_assign_function);
impl_function_assign_op!(SubAssign, sub_assign, sub_assign_function);
impl_function_assign_op!(MulAssign, mul_assign, mul_assign_function);
impl_function_assign_op!(DivAssign, div_assign, div_assign_function);

macro_rules! impl_scalar_assign_op {
    ($trait:ident, $method:ident, $assign_method:ident) => {
        impl $trait<f64> for DiscreteFunction {
            fn $method(&mut self, rhs: f64) {
                self.$assign_method(rhs);
            }
        }
    };
}

impl_scalar_assign_op!(AddAssign, add_assign, add_assign_scalar);
impl_scalar_assign_op!(SubAssign, sub_assign, sub_assign_scalar);
impl_scalar_assign_op!(MulAssign, mul_assign, mul_assign_scalar);
impl_scalar_assign_op!(DivAssign, div_assign, div_assign_scalar);

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn setup(vars_sizes: &[(VarId, usize)]) {
        registry::reset();
        for &(v, s) in vars_sizes {
            registry::register_variable(v, s).unwrap();
        }
    }

    #[test]
    #[serial]
    fn expand_preserves_values_after_broadcasting_into_new_variable() {
        setup(&[(1, 2), (2, 2)]);
        let mut f = DiscreteFunction::from_values(vec![1], vec![10.0, 20.0]).unwrap();
        f.expand(&[2]).unwrap();
        assert_eq!(f.vars(), &[1, 2]);
        assert_eq!(f.get_by_subindex(&[0, 0]), 10.0);
        assert_eq!(f.get_by_subindex(&[1, 0]), 20.0);
        assert_eq!(f.get_by_subindex(&[0, 1]), 10.0);
        assert_eq!(f.get_by_subindex(&[1, 1]), 20.0);
    }

    #[test]
    #[serial]
    fn expand_is_idempotent_on_existing_superset() {
        setup(&[(1, 2), (2, 2)]);
        let mut f = DiscreteFunction::new(vec![1, 2], 3.0).unwrap();
        f.expand(&[1]).unwrap();
        assert_eq!(f.vars(), &[1, 2]);
        assert_eq!(f.domain_size(), 4);
    }

    #[test]
    #[serial]
    fn max_marginal_reduces_to_the_max_over_the_dropped_variable() {
        setup(&[(1, 2), (2, 3)]);
        let mut g = DiscreteFunction::new(vec![1, 2], 0.0).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                g.set_by_subindex(&[i, j], (i + 10 * j) as f64);
            }
        }
        let out = g.max_marginal(&[1]).unwrap();
        assert_eq!(out.get_by_subindex(&[0]), 20.0);
        assert_eq!(out.get_by_subindex(&[1]), 21.0);
    }

    #[test]
    #[serial]
    fn condition_fixes_one_of_two_variables() {
        setup(&[(1, 2), (2, 3)]);
        let mut g = DiscreteFunction::new(vec![1, 2], 0.0).unwrap();
        for i in 0..2 {
            for j in 0..3 {
                g.set_by_subindex(&[i, j], (i + 10 * j) as f64);
            }
        }
        g.condition(&[2], &[1]).unwrap();
        assert_eq!(g.vars(), &[1]);
        assert_eq!(g.get_by_subindex(&[0]), 10.0);
        assert_eq!(g.get_by_subindex(&[1]), 11.0);
    }

    #[test]
    #[serial]
    fn condition_on_unrelated_variable_is_a_no_op() {
        setup(&[(1, 2)]);
        let mut f = DiscreteFunction::new(vec![1], 5.0).unwrap();
        f.condition(&[999], &[0]).unwrap();
        assert_eq!(f.vars(), &[1]);
    }

    #[test]
    #[serial]
    fn add_assign_function_expands_across_domain_union() {
        setup(&[(1, 2), (2, 2)]);
        let mut a = DiscreteFunction::from_values(vec![1], vec![1.0, 2.0]).unwrap();
        let b = DiscreteFunction::from_values(vec![2], vec![10.0, 20.0]).unwrap();
        a.add_assign_function(&b).unwrap();
        assert_eq!(a.vars(), &[1, 2]);
        assert_eq!(a.get_by_subindex(&[0, 0]), 11.0);
        assert_eq!(a.get_by_subindex(&[1, 0]), 12.0);
        assert_eq!(a.get_by_subindex(&[0, 1]), 21.0);
        assert_eq!(a.get_by_subindex(&[1, 1]), 22.0);
    }

    #[test]
    #[serial]
    fn get_by_super_subindex_skips_foreign_variables() {
        setup(&[(1, 2), (2, 2), (3, 2)]);
        let f = DiscreteFunction::from_values(vec![1, 3], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(f.get_by_super_subindex(&[1, 2, 3], &[1, 0, 1]), f.get_by_subindex(&[1, 1]));
    }

    #[test]
    #[serial]
    fn eq_within_tolerance_zero_requires_exact_match() {
        setup(&[(1, 2)]);
        let a = DiscreteFunction::from_values(vec![1], vec![1.0, 2.0]).unwrap();
        let b = DiscreteFunction::from_values(vec![1], vec![1.0, 2.0000001]).unwrap();
        assert!(a.eq_within_tolerance(&a.clone(), 0.0));
        assert!(!a.eq_within_tolerance(&b, 0.0));
        assert!(a.eq_within_tolerance(&b, 1e-3));
    }

    #[test]
    #[serial]
    fn eq_within_tolerance_falls_back_to_absolute_at_zero() {
        setup(&[(1, 2)]);
        let a = DiscreteFunction::from_values(vec![1], vec![0.0, 1.0]).unwrap();
        let b = DiscreteFunction::from_values(vec![1], vec![0.0000001, 1.0]).unwrap();
        assert!(a.eq_within_tolerance(&b, 1e-3));
    }

    #[test]
    fn constant_function_reductions() {
        let c = DiscreteFunction::constant(7.0);
        assert_eq!(c.domain_size(), 1);
        assert_eq!(c.argmax(), 0);
        assert_eq!(c.min(), 7.0);
        assert_eq!(c.max(), 7.0);
        assert_eq!(c.mean(), 7.0);
        assert_eq!(c.argmax_excluding(0), None);
    }

    #[test]
    #[serial]
    fn argmax_breaks_ties_at_lowest_index() {
        setup(&[(1, 3)]);
        let f = DiscreteFunction::from_values(vec![1], vec![5.0, 5.0, 1.0]).unwrap();
        assert_eq!(f.argmax(), 0);
    }
}
