//! # stograd
//!
//! A composable stochastic-optimization driver. The crate repeatedly pulls
//! observation batches from a data source, asks an [`Objective`] for a
//! parameter gradient, applies a pluggable [`UpdateRule`], and stops according
//! to user-supplied policies (iteration caps, convergence predicates, time
//! limits) composed into a [`Learner`].
//!
//! The crate deliberately does *not* compute gradients: the objective is an
//! external collaborator that owns the parameter vector and knows how to
//! differentiate itself over a batch of observations.

pub mod config;
pub mod data;
pub mod error;
pub mod learn;
pub mod optim;
pub mod train;

/// Element type for parameters, gradients, and observations.
pub type Scalar = f64;

pub use config::LearnConfig;
pub use data::{DataSubset, ObservationStore};
pub use error::{OptError, OptResult};
pub use learn::{Learner, Strategy};
pub use optim::{LearnRate, UpdateRule};
pub use train::{learn, Objective, StopReason};
