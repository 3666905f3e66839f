use crate::double_precision::DoublePrecision;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};
use thiserror::Error;

/// Vector quantities handled by the integrators: positions, velocities and accelerations.
///
/// The default value is the origin, positions are stored as displacements from it.
pub trait VariableOps:
    Copy + Default + Add<Self, Output = Self> + Sub<Self, Output = Self> + Mul<f64, Output = Self>
{
}
impl<T> VariableOps for T where
    T: Copy + Default + Add<T, Output = T> + Sub<T, Output = T> + Mul<f64, Output = T>
{
}

/// A point on the time axis of an integration.
pub trait Instant:
    Copy + Debug + PartialOrd + Add<Self::Duration, Output = Self> + Sub<Self, Output = Self::Duration>
{
    type Duration: Copy
        + Debug
        + PartialOrd
        + Add<Self::Duration, Output = Self::Duration>
        + Sub<Self::Duration, Output = Self::Duration>;

    const ZERO: Self::Duration;

    fn to_seconds(duration: Self::Duration) -> f64;

    fn from_seconds(seconds: f64) -> Self::Duration;

    #[inline]
    fn scale(duration: Self::Duration, factor: f64) -> Self::Duration {
        Self::from_seconds(Self::to_seconds(duration) * factor)
    }
}

impl Instant for f64 {
    type Duration = f64;

    const ZERO: f64 = 0.0;

    #[inline]
    fn to_seconds(duration: f64) -> f64 {
        duration
    }

    #[inline]
    fn from_seconds(seconds: f64) -> f64 {
        seconds
    }
}

impl Instant for hifitime::Epoch {
    type Duration = hifitime::Duration;

    const ZERO: hifitime::Duration = hifitime::Duration::ZERO;

    #[inline]
    fn to_seconds(duration: hifitime::Duration) -> f64 {
        duration.to_seconds()
    }

    #[inline]
    fn from_seconds(seconds: f64) -> hifitime::Duration {
        hifitime::Duration::from_seconds(seconds)
    }
}

#[derive(Clone, Copy, Debug, Error)]
#[error("failed to evaluate ODE")]
pub struct EvalFailed;

/// Trait for second-order ordinary differential equations of the form: `q'' = f(t, q)`
///
/// `q` holds one position per degree of freedom and `ddq` receives the matching accelerations.
pub trait SecondOrderODE<T, V> {
    fn eval(&mut self, t: T, q: &[V], ddq: &mut [V]) -> Result<(), EvalFailed>;
}

impl<T, F: FnMut(T, &[V], &mut [V]) -> Result<(), EvalFailed>, V> SecondOrderODE<T, V> for F {
    #[inline]
    fn eval(&mut self, t: T, q: &[V], ddq: &mut [V]) -> Result<(), EvalFailed> {
        self(t, q, ddq)
    }
}

/// Forwards evaluations to an equation borrowed from another instance.
pub(crate) struct Reborrowed<'a, E: ?Sized>(pub(crate) &'a mut E);

impl<T, V, E: SecondOrderODE<T, V> + ?Sized> SecondOrderODE<T, V> for Reborrowed<'_, E> {
    #[inline]
    fn eval(&mut self, t: T, q: &[V], ddq: &mut [V]) -> Result<(), EvalFailed> {
        self.0.eval(t, q, ddq)
    }
}

/// The state of every degree of freedom at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Duration: Serialize, V: Serialize",
    deserialize = "T: Deserialize<'de>, T::Duration: Deserialize<'de>, V: Deserialize<'de>"
))]
pub struct SystemState<T: Instant, V> {
    pub positions: Vec<DoublePrecision<V>>,
    pub velocities: Vec<DoublePrecision<V>>,
    pub time: DoublePrecision<T, T::Duration>,
}

impl<T: Instant, V: VariableOps> SystemState<T, V> {
    #[inline]
    pub fn new(time: T, positions: Vec<V>, velocities: Vec<V>) -> Self {
        Self {
            positions: positions.into_iter().map(DoublePrecision::new).collect(),
            velocities: velocities.into_iter().map(DoublePrecision::new).collect(),
            time: DoublePrecision::with_error(time, T::ZERO),
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.positions.len()
    }
}

/// An initial value problem: the state to start from and the equation to integrate.
#[derive(Clone, Debug)]
pub struct ODEProblem<T: Instant, V, ODE> {
    pub initial_state: SystemState<T, V>,
    pub ode: ODE,
}

impl<T: Instant, V, ODE> ODEProblem<T, V, ODE> {
    #[inline]
    pub fn new(initial_state: SystemState<T, V>, ode: ODE) -> Self {
        Self { initial_state, ode }
    }
}
