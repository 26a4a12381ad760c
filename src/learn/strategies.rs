//! Stop policies and observers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::learn::Strategy;
use crate::train::Objective;
use crate::Scalar;

/// Stops after exactly `n` completed iterations.
pub struct MaxIterations {
    limit: usize,
}

impl MaxIterations {
    pub fn new(limit: usize) -> Self {
        MaxIterations { limit }
    }
}

impl<O: Objective> Strategy<O> for MaxIterations {
    fn finished(&mut self, _obj: &mut O, iter: usize) -> bool {
        iter >= self.limit
    }
}

/// Stops once wall-clock time since the first hook exceeds the budget.
///
/// The clock starts lazily at whichever hook fires first (`pre_hook` in a
/// normal run, `finished` if the strategy is driven bare), so constructing
/// the strategy ahead of the run does not eat into the budget. Polls only;
/// never sleeps, never preempts a running objective call.
pub struct TimeLimit {
    budget: Duration,
    started: Option<Instant>,
}

impl TimeLimit {
    pub fn new(budget: Duration) -> Self {
        TimeLimit {
            budget,
            started: None,
        }
    }
}

impl<O: Objective> Strategy<O> for TimeLimit {
    fn pre_hook(&mut self, _obj: &mut O, _iter: usize) {
        self.started.get_or_insert_with(Instant::now);
    }

    fn finished(&mut self, _obj: &mut O, iter: usize) -> bool {
        let started = *self.started.get_or_insert_with(Instant::now);
        let out_of_time = started.elapsed() >= self.budget;
        if out_of_time {
            log::debug!("time limit {:?} reached at iteration {}", self.budget, iter);
        }
        out_of_time
    }
}

/// Stops when a user predicate over the objective says so.
///
/// Predicates can be expensive, so checking is throttled to every `every`-th
/// iteration (default: every iteration).
pub struct ConvergenceCheck<O> {
    every: usize,
    pred: Box<dyn FnMut(&O, usize) -> bool>,
}

impl<O> ConvergenceCheck<O> {
    pub fn new(pred: impl FnMut(&O, usize) -> bool + 'static) -> Self {
        ConvergenceCheck {
            every: 1,
            pred: Box::new(pred),
        }
    }

    /// Only evaluate the predicate when `iter` is a multiple of `every`.
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }
}

impl<O: Objective> Strategy<O> for ConvergenceCheck<O> {
    fn finished(&mut self, obj: &mut O, iter: usize) -> bool {
        if iter % self.every != 0 {
            return false;
        }
        (self.pred)(obj, iter)
    }
}

/// Records the objective's value after every update. Never asks to stop.
///
/// The trace lives behind a shared handle so it stays readable after the
/// tracer itself moves into a [`Learner`](crate::learn::Learner). The loop
/// is single-threaded, so `Rc` is the right ownership here.
pub struct ValueTracer {
    values: Rc<RefCell<Vec<Scalar>>>,
}

/// Read handle onto a [`ValueTracer`]'s accumulated trace.
#[derive(Clone)]
pub struct ValueTrace {
    values: Rc<RefCell<Vec<Scalar>>>,
}

impl ValueTrace {
    /// One entry per completed iteration, in order.
    pub fn snapshot(&self) -> Vec<Scalar> {
        self.values.borrow().clone()
    }

    pub fn last(&self) -> Option<Scalar> {
        self.values.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl ValueTracer {
    pub fn new() -> Self {
        ValueTracer {
            values: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn trace(&self) -> ValueTrace {
        ValueTrace {
            values: Rc::clone(&self.values),
        }
    }
}

impl Default for ValueTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Objective> Strategy<O> for ValueTracer {
    fn post_hook(&mut self, obj: &mut O, _iter: usize) {
        self.values.borrow_mut().push(obj.value());
    }
}

/// Runs a user callback after every update. Never asks to stop.
pub struct IterCallback<O> {
    f: Box<dyn FnMut(&O, usize)>,
}

impl<O> IterCallback<O> {
    pub fn new(f: impl FnMut(&O, usize) + 'static) -> Self {
        IterCallback { f: Box::new(f) }
    }
}

impl<O: Objective> Strategy<O> for IterCallback<O> {
    fn post_hook(&mut self, obj: &mut O, iter: usize) {
        (self.f)(obj, iter);
    }
}
