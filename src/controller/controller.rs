#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use log::{debug, info, trace};

use crate::error::MaxSumError;
use crate::function::DiscreteFunction;
use crate::registry::{self, VarId};

use super::graph::{FactorGraph, FactorId};

// Tuning knobs for MaxSumController::optimise, builder-style like SolverOptions elsewhere in
// this family of solvers.
pub struct MaxSumOptions {
    max_iterations: usize,
    tolerance: f64,
    normalize: bool,
}

impl MaxSumOptions {
    pub fn default() -> Self {
        MaxSumOptions { max_iterations: 1000, tolerance: 1e-6, normalize: true }
    }

    pub fn set_max_iterations(&mut self, value: usize) -> &mut Self {
        self.max_iterations = value;
        self
    }

    pub fn set_tolerance(&mut self, value: f64) -> &mut Self {
        self.tolerance = value;
        self
    }

    pub fn set_normalize(&mut self, value: bool) -> &mut Self {
        self.normalize = value;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }
}

// The message-passing engine: owns the factor graph and runs synchronous max-sum rounds until
// convergence or the iteration cap.
pub struct MaxSumController {
    options: MaxSumOptions,
    factors: HashMap<FactorId, DiscreteFunction>,
    graph: FactorGraph,
    msg_fv_cur: HashMap<(FactorId, VarId), DiscreteFunction>,
    msg_fv_prev: HashMap<(FactorId, VarId), DiscreteFunction>,
    msg_vf_cur: HashMap<(VarId, FactorId), DiscreteFunction>,
    msg_vf_prev: HashMap<(VarId, FactorId), DiscreteFunction>,
}

impl MaxSumController {
    pub fn new(options: MaxSumOptions) -> Self {
        MaxSumController {
            options,
            factors: HashMap::new(),
            graph: FactorGraph::empty(),
            msg_fv_cur: HashMap::new(),
            msg_fv_prev: HashMap::new(),
            msg_vf_cur: HashMap::new(),
            msg_vf_prev: HashMap::new(),
        }
    }

    pub fn no_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn no_vars(&self) -> usize {
        self.graph.variable_count()
    }

    // Inserts or replaces the factor stored at id. All of its variables must already be
    // registered.
    pub fn set_factor(&mut self, id: FactorId, function: DiscreteFunction) -> Result<(), MaxSumError> {
        for &v in function.vars() {
            if !registry::is_registered(v) {
                return Err(MaxSumError::BadDomain {
                    reason: format!("factor {} references unregistered variable {}", id, v),
                });
            }
        }
        debug!("set_factor({}) over {:?}", id, function.vars());
        self.factors.insert(id, function);
        self.rebuild_graph();
        Ok(())
    }

    pub fn remove_factor(&mut self, id: FactorId) -> Result<(), MaxSumError> {
        if self.factors.remove(&id).is_none() {
            return Err(MaxSumError::UnknownFactor(id));
        }
        debug!("remove_factor({})", id);
        self.rebuild_graph();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        debug!("clear_all: dropping {} factors", self.factors.len());
        self.factors.clear();
        self.msg_fv_cur.clear();
        self.msg_fv_prev.clear();
        self.msg_vf_cur.clear();
        self.msg_vf_prev.clear();
        self.graph = FactorGraph::empty();
    }

    fn rebuild_graph(&mut self) {
        self.graph = FactorGraph::build(&self.factors);

        let valid: HashSet<(FactorId, VarId)> = self
            .factors
            .iter()
            .flat_map(|(&fid, f)| f.vars().iter().map(move |&v| (fid, v)))
            .collect();

        self.msg_fv_cur.retain(|k, _| valid.contains(k));
        self.msg_fv_prev.retain(|k, _| valid.contains(k));
        self.msg_vf_cur.retain(|&(v, f), _| valid.contains(&(f, v)));
        self.msg_vf_prev.retain(|&(v, f), _| valid.contains(&(f, v)));

        for &(fid, v) in &valid {
            self.msg_fv_cur
                .entry((fid, v))
                .or_insert_with(|| DiscreteFunction::new(vec![v], 0.0).expect("variable is registered"));
            self.msg_fv_prev
                .entry((fid, v))
                .or_insert_with(|| DiscreteFunction::new(vec![v], 0.0).expect("variable is registered"));
            self.msg_vf_cur
                .entry((v, fid))
                .or_insert_with(|| DiscreteFunction::new(vec![v], 0.0).expect("variable is registered"));
            self.msg_vf_prev
                .entry((v, fid))
                .or_insert_with(|| DiscreteFunction::new(vec![v], 0.0).expect("variable is registered"));
        }
    }

    // Runs synchronous max-sum rounds until the max-norm change between rounds falls to or below
    // tolerance, or max_iterations rounds have run. Returns the number of rounds performed.
    pub fn optimise(&mut self) -> Result<usize, MaxSumError> {
        let mut iterations = 0;
        while iterations < self.options.max_iterations {
            self.run_round()?;
            iterations += 1;
            let delta = self.max_delta();
            trace!("round {} max-norm delta {}", iterations, delta);
            if delta <= self.options.tolerance {
                break;
            }
        }
        info!("optimise finished after {} rounds", iterations);
        Ok(iterations)
    }

    // Computes one synchronous round: every new message is derived from the previous round's
    // values only, so updates never see each other mid-round.
    fn run_round(&mut self) -> Result<(), MaxSumError> {
        let old_fv = self.msg_fv_cur.clone();
        let old_vf = self.msg_vf_cur.clone();

        let mut new_vf = HashMap::with_capacity(old_vf.len());
        for var in self.graph.variables() {
            let incident = self.graph.factors_incident_to(var);
            for &f in &incident {
                let mut acc = DiscreteFunction::new(vec![var], 0.0)?;
                for &other in &incident {
                    if other == f {
                        continue;
                    }
                    acc.add_assign_function(&old_fv[&(other, var)])?;
                }
                new_vf.insert((var, f), acc);
            }
        }

        let mut new_fv = HashMap::with_capacity(old_fv.len());
        for (&fid, factor) in &self.factors {
            let vars = factor.vars().to_vec();
            for &v in &vars {
                let mut s = factor.clone();
                for &other_v in &vars {
                    if other_v == v {
                        continue;
                    }
                    s.add_assign_function(&old_vf[&(other_v, fid)])?;
                }
                let mut m = s.max_marginal(&[v])?;
                if self.options.normalize {
                    let shift = m.max();
                    m.sub_assign_scalar(shift);
                }
                new_fv.insert((fid, v), m);
            }
        }

        self.msg_fv_prev = std::mem::replace(&mut self.msg_fv_cur, new_fv);
        self.msg_vf_prev = std::mem::replace(&mut self.msg_vf_cur, new_vf);
        Ok(())
    }

    fn max_delta(&self) -> f64 {
        let mut delta = 0.0f64;
        for (k, cur) in &self.msg_fv_cur {
            if let Some(prev) = self.msg_fv_prev.get(k) {
                let mut diff = cur.clone();
                if diff.sub_assign_function(prev).is_ok() {
                    delta = delta.max(diff.maxnorm());
                }
            }
        }
        for (k, cur) in &self.msg_vf_cur {
            if let Some(prev) = self.msg_vf_prev.get(k) {
                let mut diff = cur.clone();
                if diff.sub_assign_function(prev).is_ok() {
                    delta = delta.max(diff.maxnorm());
                }
            }
        }
        delta
    }

    // The argmax assignment for every variable with at least one incident factor; isolated
    // variables (registered but never used in a factor) are omitted.
    pub fn get_values(&self) -> Result<Vec<(VarId, usize)>, MaxSumError> {
        let mut vars: Vec<VarId> = self.graph.variables().collect();
        vars.sort_unstable();

        let mut out = Vec::with_capacity(vars.len());
        for var in vars {
            let incident = self.graph.factors_incident_to(var);
            if incident.is_empty() {
                continue;
            }
            let mut belief = DiscreteFunction::new(vec![var], 0.0)?;
            for &f in &incident {
                belief.add_assign_function(&self.msg_fv_cur[&(f, var)])?;
            }
            out.push((var, belief.argmax()));
        }
        Ok(out)
    }
}
