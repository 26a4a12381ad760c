//! Learning-rate policies.
//!
//! A policy maps the 1-based iteration counter to a step size. Fixed rates
//! cover most uses; the decay schedules let long runs anneal without a
//! separate scheduler object, and all variants deserialize from
//! configuration files.

use serde::Deserialize;

use crate::Scalar;

/// Fixed scalar or schedule, evaluated per iteration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnRate {
    /// The same rate for every iteration.
    Fixed(Scalar),
    /// `base * gamma^(iter / every)`: multiply by `gamma` every `every`
    /// iterations.
    StepDecay {
        base: Scalar,
        every: usize,
        gamma: Scalar,
    },
    /// `base * rate^iter`: continuous exponential decay.
    ExpDecay { base: Scalar, rate: Scalar },
}

impl LearnRate {
    /// The rate in effect at `iter` (iterations count from 1; the first
    /// update sees the undecayed base rate).
    pub fn at(&self, iter: usize) -> Scalar {
        match *self {
            LearnRate::Fixed(lr) => lr,
            LearnRate::StepDecay { base, every, gamma } => {
                let steps = if every == 0 { 0 } else { (iter.saturating_sub(1)) / every };
                base * gamma.powi(steps as i32)
            }
            LearnRate::ExpDecay { base, rate } => base * rate.powi(iter.saturating_sub(1) as i32),
        }
    }
}

impl From<Scalar> for LearnRate {
    fn from(lr: Scalar) -> Self {
        LearnRate::Fixed(lr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_iteration() {
        let lr = LearnRate::Fixed(0.1);
        assert_eq!(lr.at(1), 0.1);
        assert_eq!(lr.at(1_000_000), 0.1);
    }

    #[test]
    fn step_decay_halves_on_schedule() {
        let lr = LearnRate::StepDecay {
            base: 0.4,
            every: 10,
            gamma: 0.5,
        };
        assert_eq!(lr.at(1), 0.4);
        assert_eq!(lr.at(10), 0.4);
        assert_eq!(lr.at(11), 0.2);
        assert_eq!(lr.at(21), 0.1);
    }

    #[test]
    fn exp_decay_compounds() {
        let lr = LearnRate::ExpDecay {
            base: 1.0,
            rate: 0.9,
        };
        assert_eq!(lr.at(1), 1.0);
        assert!((lr.at(3) - 0.81).abs() < 1e-12);
    }
}
