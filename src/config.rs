//! Training configuration.
//!
//! A [`LearnConfig`] is the serializable subset of a learner: which update
//! rule, its hyperparameters, the learning-rate policy, and the plain stop
//! policies (iteration cap, time limit). Parsed from JSON.
//!
//! Closure-valued options (convergence predicates, per-iteration callbacks)
//! cannot live in a config file; attach those to the built
//! [`Learner`](crate::learn::Learner) with `push`.
//!
//! # Example
//!
//! ```json
//! {
//!   "algorithm": "adam",
//!   "lr": 0.01,
//!   "beta1": 0.9,
//!   "beta2": 0.999,
//!   "maxiter": 5000,
//!   "time_limit_secs": 30.0
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{OptError, OptResult};
use crate::learn::{GradientDescent, Learner, MaxIterations, TimeLimit};
use crate::optim::{Adadelta, Adagrad, Adam, Adamax, LearnRate, RmsProp, Sgd, UpdateRule};
use crate::train::Objective;
use crate::Scalar;

/// Serializable learner description.
///
/// Omitted options fall back to the documented defaults: no iteration cap,
/// no time limit, the rule's own default hyperparameters, and a fixed
/// learning rate of `lr` (default 0.01) unless `lr_policy` is given.
#[derive(Debug, Clone, Deserialize)]
pub struct LearnConfig {
    /// "sgd", "adagrad", "adadelta", "adam", "adamax", or "rmsprop".
    pub algorithm: String,

    /// Fixed learning rate; ignored when `lr_policy` is present.
    pub lr: Option<Scalar>,
    /// Full learning-rate schedule.
    pub lr_policy: Option<LearnRate>,

    // Per-rule hyperparameter overrides.
    pub momentum: Option<Scalar>,
    pub rho: Option<Scalar>,
    pub beta1: Option<Scalar>,
    pub beta2: Option<Scalar>,
    pub eps: Option<Scalar>,

    /// Iteration cap; no cap when absent.
    pub maxiter: Option<usize>,
    /// Wall-clock budget in seconds; no limit when absent.
    pub time_limit_secs: Option<f64>,
}

const DEFAULT_LR: Scalar = 0.01;

impl LearnConfig {
    pub fn from_json(json: &str) -> OptResult<Self> {
        serde_json::from_str(json).map_err(|e| OptError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> OptResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| OptError::Config(e.to_string()))?;
        Self::from_json(&text)
    }

    /// The learning-rate policy this config describes.
    pub fn lr_policy(&self) -> LearnRate {
        self.lr_policy
            .clone()
            .unwrap_or(LearnRate::Fixed(self.lr.unwrap_or(DEFAULT_LR)))
    }

    /// Instantiate the named update rule with the configured hyperparameters.
    pub fn build_rule(&self) -> OptResult<Box<dyn UpdateRule>> {
        let rule: Box<dyn UpdateRule> = match self.algorithm.as_str() {
            "sgd" => match self.momentum {
                Some(m) => Box::new(Sgd::with_momentum(m)),
                None => Box::new(Sgd::new()),
            },
            "adagrad" => match self.eps {
                Some(eps) => Box::new(Adagrad::with_eps(eps)),
                None => Box::new(Adagrad::new()),
            },
            "adadelta" => Box::new(Adadelta::with_params(
                self.rho.unwrap_or(0.95),
                self.eps.unwrap_or(1e-6),
            )),
            "adam" => Box::new(Adam::with_params(
                self.beta1.unwrap_or(0.9),
                self.beta2.unwrap_or(0.999),
                self.eps.unwrap_or(1e-8),
            )),
            "adamax" => Box::new(Adamax::with_params(
                self.beta1.unwrap_or(0.9),
                self.beta2.unwrap_or(0.999),
                self.eps.unwrap_or(1e-8),
            )),
            "rmsprop" => Box::new(RmsProp::with_params(
                self.rho.unwrap_or(0.9),
                self.eps.unwrap_or(1e-8),
            )),
            other => {
                return Err(OptError::Config(format!(
                    "unknown update rule \"{}\"",
                    other
                )))
            }
        };
        Ok(rule)
    }

    /// Build a ready-to-run learner: the update driver first, then any
    /// configured stop policies.
    pub fn build<O: Objective + 'static>(&self) -> OptResult<Learner<O>> {
        let rule = self.build_rule()?;
        log::debug!(
            "building learner: {} with {:?}",
            rule.name(),
            self.lr_policy()
        );

        let mut learner = Learner::new().with(GradientDescent::new(rule, self.lr_policy()));
        if let Some(n) = self.maxiter {
            learner.push(MaxIterations::new(n));
        }
        if let Some(secs) = self.time_limit_secs {
            learner.push(TimeLimit::new(Duration::from_secs_f64(secs)));
        }
        Ok(learner)
    }
}
