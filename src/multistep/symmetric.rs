use crate::{
    double_precision::DoublePrecision,
    integrator::{FixedStepSizeIntegrator, FixedStepSizeKind},
    multistep::buffer::LMBuffer,
    problem::{Instant, ODEProblem, Reborrowed, SecondOrderODE, SystemState, VariableOps},
    StepError,
};
use serde::{Deserialize, Serialize};

/// Symmetric linear multistep integrator for second-order equations of the form: `q'' = f(t, q)`
///
/// A method of order `k` computes the next position from the `k` previous steps:
///
/// `q_k = -Σ ɑⱼ qⱼ + h² Σ βⱼ aⱼ`
///
/// The coefficients are symmetric (`ɑⱼ = ɑₖ₋ⱼ`, `βⱼ = βₖ₋ⱼ`) so only the first half of each table,
/// `ɑ₀..ɑₖ/₂` and `β₀..βₖ/₂`, is stored. `ɑ₀` must be normalized to `1` and `β₀` must be zero for
/// the method to be explicit. The `β` are given as numerators over a common denominator.
///
/// The method is not self-starting: the first `k - 1` steps are computed with a startup
/// integrator.
#[derive(Debug)]
pub struct SymmetricLinearMultistep {
    kind: FixedStepSizeKind,
    order: usize,
    startup: FixedStepSizeIntegrator,
    alpha: &'static [f64],
    beta_numerator: &'static [f64],
    beta_denominator: f64,
}

impl SymmetricLinearMultistep {
    pub const fn new(
        kind: FixedStepSizeKind,
        startup: FixedStepSizeIntegrator,
        alpha: &'static [f64],
        beta_numerator: &'static [f64],
        beta_denominator: f64,
    ) -> Self {
        assert!(alpha.len() >= 2, "a method needs at least two coefficients");
        assert!(
            alpha.len() == beta_numerator.len(),
            "ɑ and β must have the same number of coefficients"
        );
        assert!(alpha[0] == 1.0, "ɑ₀ must be normalized to 1");
        assert!(beta_numerator[0] == 0.0, "β₀ must be zero");
        assert!(beta_denominator > 0.0, "β denominator must be positive");

        Self {
            kind,
            order: 2 * (alpha.len() - 1),
            startup,
            alpha,
            beta_numerator,
            beta_denominator,
        }
    }

    #[inline]
    pub fn kind(&self) -> FixedStepSizeKind {
        self.kind
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn startup(&self) -> FixedStepSizeIntegrator {
        self.startup
    }

    /// ɑ₀..ɑₖ/₂
    #[inline]
    pub fn alpha(&self) -> &'static [f64] {
        self.alpha
    }

    /// Numerators of β₀..βₖ/₂
    #[inline]
    pub fn beta_numerator(&self) -> &'static [f64] {
        self.beta_numerator
    }

    #[inline]
    pub fn beta_denominator(&self) -> f64 {
        self.beta_denominator
    }

    /// Coefficient `j` of the full symmetric ɑ table, for `j` in `0..=order`.
    #[inline]
    pub fn alpha_at(&self, j: usize) -> f64 {
        self.alpha[j.min(self.order - j)]
    }

    /// Numerator of coefficient `j` of the full symmetric β table, for `j` in `0..=order`.
    #[inline]
    pub fn beta_numerator_at(&self, j: usize) -> f64 {
        self.beta_numerator[j.min(self.order - j)]
    }

    /// Creates an instance holding the initial state as its first step.
    ///
    /// The equation is evaluated once at the initial positions.
    pub fn new_instance<T, V, ODE, A>(
        &'static self,
        problem: ODEProblem<T, V, ODE>,
        append_state: A,
        step: T::Duration,
    ) -> Result<SLMSInstance<T, V, ODE, A>, StepError>
    where
        T: Instant,
        V: VariableOps,
        ODE: SecondOrderODE<T, V>,
    {
        let ODEProblem {
            initial_state,
            mut ode,
        } = problem;
        assert_eq!(
            initial_state.positions.len(),
            initial_state.velocities.len(),
            "positions and velocities must have the same dimension"
        );
        assert!(step > T::ZERO, "step must be positive");

        let dimension = initial_state.dimension();
        let displacements: Vec<V> = initial_state.positions.iter().map(|q| q.value).collect();
        let mut accelerations = vec![V::default(); dimension];
        ode.eval(
            initial_state.time.value,
            &displacements,
            &mut accelerations,
        )?;

        let mut window = LMBuffer::with_capacity(self.order);
        window.push_back(Step {
            time: initial_state.time,
            displacements,
            accelerations,
        });

        Ok(self.instance(ode, append_state, step, initial_state, window))
    }

    /// Recreates an instance from its past steps, oldest first, without evaluating the equation.
    pub(crate) fn restore_instance<T, V, ODE, A>(
        &'static self,
        problem: ODEProblem<T, V, ODE>,
        append_state: A,
        step: T::Duration,
        history: Vec<Step<T, V>>,
    ) -> SLMSInstance<T, V, ODE, A>
    where
        T: Instant,
        V: VariableOps,
    {
        let ODEProblem { initial_state, ode } = problem;
        assert_eq!(
            initial_state.positions.len(),
            initial_state.velocities.len(),
            "positions and velocities must have the same dimension"
        );
        assert!(step > T::ZERO, "step must be positive");
        assert!(
            !history.is_empty() && history.len() <= self.order,
            "history does not fit the window"
        );

        let dimension = initial_state.dimension();
        let mut window = LMBuffer::with_capacity(self.order);
        for past in history {
            assert!(
                past.displacements.len() == dimension && past.accelerations.len() == dimension,
                "history does not match the dimension of the state"
            );
            window.push_back(past);
        }

        self.instance(ode, append_state, step, initial_state, window)
    }

    fn instance<T, V, ODE, A>(
        &'static self,
        ode: ODE,
        append_state: A,
        step: T::Duration,
        current_state: SystemState<T, V>,
        window: LMBuffer<Step<T, V>>,
    ) -> SLMSInstance<T, V, ODE, A>
    where
        T: Instant,
        V: VariableOps,
    {
        let dimension = current_state.dimension();
        SLMSInstance {
            integrator: self,
            ode,
            append_state,
            step,
            current_state,
            window,
            sum_q: vec![DoublePrecision::default(); dimension],
            sum_a: vec![V::default(); dimension],
            positions: vec![V::default(); dimension],
            accelerations: vec![V::default(); dimension],
        }
    }
}

/// One past sample of the integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Duration: Serialize, V: Serialize",
    deserialize = "T: Deserialize<'de>, T::Duration: Deserialize<'de>, V: Deserialize<'de>"
))]
pub struct Step<T: Instant, V> {
    pub time: DoublePrecision<T, T::Duration>,
    pub displacements: Vec<V>,
    pub accelerations: Vec<V>,
}

/// Resumable state of an integration with a [`SymmetricLinearMultistep`] method.
#[derive(Debug)]
pub struct SLMSInstance<T: Instant, V, ODE, A> {
    integrator: &'static SymmetricLinearMultistep,
    ode: ODE,
    append_state: A,
    step: T::Duration,
    current_state: SystemState<T, V>,
    window: LMBuffer<Step<T, V>>,
    // Scratch space reused across steps.
    sum_q: Vec<DoublePrecision<V>>,
    sum_a: Vec<V>,
    positions: Vec<V>,
    accelerations: Vec<V>,
}

impl<T, V, ODE, A> SLMSInstance<T, V, ODE, A>
where
    T: Instant,
    V: VariableOps,
    ODE: SecondOrderODE<T, V>,
    A: FnMut(&SystemState<T, V>),
{
    /// Advances by whole steps while one more step fits before `t_final`.
    ///
    /// The window is first completed with the startup integrator, whose states are not passed to
    /// `append_state`. If `t_final` comes before the window is complete, the call returns early
    /// and the next call resumes the startup.
    ///
    /// Velocities are not computed by this method: the published states carry zero velocities.
    pub fn solve(&mut self, t_final: T) -> Result<(), StepError> {
        let integrator = self.integrator;
        let k = integrator.order;

        if self.window.len() < k {
            self.startup_solve(t_final)?;
            if self.window.len() < k {
                return Ok(());
            }
        }

        let h = self.step;
        assert!(h > T::ZERO, "step must be positive");
        let h_squared_over_denominator =
            T::to_seconds(h) * T::to_seconds(h) / integrator.beta_denominator;

        let mut steps = 0u64;
        loop {
            let t = self.window.get_back(0).time;
            if !(h <= (t_final - t.value) - t.error) {
                break;
            }

            self.sum_q.fill(DoublePrecision::default());
            self.sum_a.fill(V::default());
            // Coefficient j is shared by window positions j and k - j, except for j = 0 whose
            // partner is the step being computed and j = k / 2 which is its own partner.
            for j in 0..=k / 2 {
                let minus_alpha = -integrator.alpha[j];
                let beta = integrator.beta_numerator[j];
                let front = self.window.get(j);
                let back = (j > 0 && j < k - j).then(|| self.window.get(k - j));
                for d in 0..self.sum_q.len() {
                    let (q, a) = match back {
                        Some(back) => (
                            front.displacements[d] + back.displacements[d],
                            front.accelerations[d] + back.accelerations[d],
                        ),
                        None => (front.displacements[d], front.accelerations[d]),
                    };
                    self.sum_q[d].increment(q * minus_alpha);
                    self.sum_a[d] = self.sum_a[d] + a * beta;
                }
            }

            // ɑ₀ is 1, no division needed.
            let mut time = t;
            time.increment(h);
            for ((sum_q, sum_a), q) in self
                .sum_q
                .iter_mut()
                .zip(&self.sum_a)
                .zip(self.positions.iter_mut())
            {
                sum_q.increment(*sum_a * h_squared_over_denominator);
                *q = sum_q.value;
            }
            self.ode
                .eval(time.value, &self.positions, &mut self.accelerations)?;

            let new_step = self.window.rotate();
            new_step.time = time;
            std::mem::swap(&mut new_step.displacements, &mut self.positions);
            std::mem::swap(&mut new_step.accelerations, &mut self.accelerations);

            self.current_state.positions.copy_from_slice(&self.sum_q);
            self.current_state.velocities.fill(DoublePrecision::default());
            self.current_state.time = time;
            (self.append_state)(&self.current_state);
            steps += 1;
        }

        tracing::trace!(kind = ?integrator.kind, steps, "symmetric linear multistep solve");

        Ok(())
    }

    /// Fills the window with steps computed by the startup integrator, without going past
    /// `t_final`.
    fn startup_solve(&mut self, t_final: T) -> Result<(), StepError> {
        let integrator = self.integrator;
        let k = integrator.order;
        assert!(!self.window.is_empty());
        assert!(self.window.len() < k);

        let missing = k - self.window.len();
        // The half step keeps the bound clear of the rounding of the startup time.
        let target = self.current_state.time.value + T::scale(self.step, missing as f64 + 0.5);
        let bounded = t_final < target;
        let bound = if bounded { t_final } else { target };
        tracing::debug!(
            kind = ?integrator.kind,
            startup = ?integrator.startup.kind(),
            missing,
            "starting symmetric linear multistep integration"
        );

        let mut states = Vec::with_capacity(missing);
        {
            // The startup instance is type-erased so that a multistep startup integrator does not
            // instantiate itself recursively.
            let mut collect = |state: &SystemState<T, V>| states.push(state.clone());
            let problem = ODEProblem::new(
                self.current_state.clone(),
                Reborrowed(&mut self.ode as &mut dyn SecondOrderODE<T, V>),
            );
            let mut instance = integrator.startup.new_instance(
                problem,
                &mut collect as &mut dyn FnMut(&SystemState<T, V>),
                self.step,
            )?;
            instance.solve(bound)?;
        }
        assert!(
            states.len() <= missing,
            "startup integrator produced too many steps"
        );

        for state in states {
            assert_eq!(
                state.dimension(),
                self.current_state.dimension(),
                "startup integrator changed the dimension"
            );
            let displacements: Vec<V> = state.positions.iter().map(|q| q.value).collect();
            // The startup integrator does not expose its accelerations, the window needs them at
            // the end of each startup step: one more evaluation per step.
            let mut accelerations = vec![V::default(); displacements.len()];
            self.ode
                .eval(state.time.value, &displacements, &mut accelerations)?;
            self.window.push_back(Step {
                time: state.time,
                displacements,
                accelerations,
            });
            self.current_state = state;
        }

        if !bounded {
            assert_eq!(
                self.window.len(),
                k,
                "startup integrator did not fill the window"
            );
        }
        tracing::debug!(
            kind = ?integrator.kind,
            window = self.window.len(),
            order = k,
            "symmetric linear multistep startup done"
        );

        Ok(())
    }
}

impl<T: Instant, V, ODE, A> SLMSInstance<T, V, ODE, A> {
    #[inline]
    pub fn integrator(&self) -> FixedStepSizeIntegrator {
        FixedStepSizeIntegrator::SymmetricLinearMultistep(self.integrator)
    }

    #[inline]
    pub fn current_state(&self) -> &SystemState<T, V> {
        &self.current_state
    }

    #[inline]
    pub fn time(&self) -> T {
        self.current_state.time.value
    }

    #[inline]
    pub fn step(&self) -> T::Duration {
        self.step
    }

    /// The past steps, oldest first.
    #[inline]
    pub fn window(&self) -> &LMBuffer<Step<T, V>> {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{methods::*, problem::EvalFailed};

    fn harmonic_oscillator(_: f64, q: &[f64], a: &mut [f64]) -> Result<(), EvalFailed> {
        a[0] = -q[0];
        Ok(())
    }

    /// Error of one step taken from an exact window of `cos` samples.
    fn local_error(integrator: &'static SymmetricLinearMultistep, h: f64) -> f64 {
        let k = integrator.order();
        let problem = ODEProblem::new(
            SystemState::new(0.0, vec![1.0], vec![0.0]),
            harmonic_oscillator,
        );
        let mut instance = integrator
            .new_instance(problem, |_: &SystemState<f64, f64>| {}, h)
            .unwrap();
        for i in 1..k {
            let t = i as f64 * h;
            instance.window.push_back(Step {
                time: DoublePrecision::new(t),
                displacements: vec![t.cos()],
                accelerations: vec![-t.cos()],
            });
        }
        instance.current_state.time = DoublePrecision::new((k - 1) as f64 * h);

        instance.solve(k as f64 * h + h / 2.0).unwrap();

        let t = k as f64 * h;
        assert_eq!(instance.time(), t);
        (instance.current_state.positions[0].value - t.cos()).abs()
    }

    #[test]
    fn local_error_order() {
        for (integrator, h) in [
            (&QUINLAN_TREMAINE_1990_ORDER_8, 0.2),
            (&QUINLAN_1999_ORDER_8A, 0.2),
            (&QUINLAN_1999_ORDER_8B, 0.2),
            (&QUINLAN_TREMAINE_1990_ORDER_10, 0.4),
            (&QUINLAN_TREMAINE_1990_ORDER_12, 0.4),
            (&QUINLAN_TREMAINE_1990_ORDER_14, 0.8),
        ] {
            let ratio = local_error(integrator, h) / local_error(integrator, h / 2.0);
            let expected = 2f64.powi(integrator.order() as i32 + 1);
            assert!(
                ratio > expected,
                "{:?}: error ratio {ratio} below {expected}",
                integrator.kind()
            );
        }
    }

    #[test]
    fn startup_fills_window_before_first_step() {
        let h = 0.125;
        let k = QUINLAN_TREMAINE_1990_ORDER_12.order();
        let mut published_times = Vec::new();
        let problem = ODEProblem::new(
            SystemState::new(0.0, vec![1.0], vec![0.0]),
            harmonic_oscillator,
        );
        let mut instance = QUINLAN_TREMAINE_1990_ORDER_12
            .new_instance(
                problem,
                |state: &SystemState<f64, f64>| published_times.push(state.time.value),
                h,
            )
            .unwrap();
        assert_eq!(instance.window.len(), 1);

        instance.solve((k - 1) as f64 * h + h / 2.0).unwrap();
        assert_eq!(instance.window.len(), k);
        assert!(instance.current_state.velocities[0].value != 0.0);

        instance.solve(k as f64 * h + h / 2.0).unwrap();
        assert_eq!(instance.window.len(), k);
        assert_eq!(instance.current_state.velocities[0].value, 0.0);
        drop(instance);

        // Only the first multistep step is published.
        assert_eq!(published_times, [k as f64 * h]);
    }

    #[test]
    fn startup_evaluation_count() {
        let h = 0.125;
        let k = QUINLAN_TREMAINE_1990_ORDER_8.order();
        let mut evaluations = 0;
        let problem = ODEProblem::new(
            SystemState::new(0.0, vec![1.0], vec![0.0]),
            |t: f64, q: &[f64], a: &mut [f64]| {
                evaluations += 1;
                harmonic_oscillator(t, q, a)
            },
        );
        let mut instance = QUINLAN_TREMAINE_1990_ORDER_8
            .new_instance(problem, |_: &SystemState<f64, f64>| {}, h)
            .unwrap();
        instance.solve((k - 1) as f64 * h + h / 2.0).unwrap();
        assert_eq!(instance.window.len(), k);
        drop(instance);

        let FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(startup) =
            QUINLAN_TREMAINE_1990_ORDER_8.startup()
        else {
            panic!("startup is not self-starting");
        };
        // Initial state, startup stages, then one per startup step for the window.
        assert_eq!(evaluations, 1 + startup.evaluations(k - 1) + (k - 1));
    }

    #[test]
    fn startup_resumes_when_bound_is_short() {
        let h = 0.25;
        let k = QUINLAN_TREMAINE_1990_ORDER_8.order();
        let problem = ODEProblem::new(
            SystemState::new(0.0, vec![1.0], vec![0.0]),
            harmonic_oscillator,
        );
        let mut instance = QUINLAN_TREMAINE_1990_ORDER_8
            .new_instance(problem, |_: &SystemState<f64, f64>| {}, h)
            .unwrap();

        instance.solve(3.5 * h).unwrap();
        assert_eq!(instance.window.len(), 4);
        assert_eq!(instance.time(), 3.0 * h);

        instance.solve(20.0 * h).unwrap();
        assert_eq!(instance.window.len(), k);
        assert_eq!(instance.time(), 20.0 * h);
        assert_eq!(instance.window.get(0).time.value, (20 - k + 1) as f64 * h);
    }

    #[test]
    fn failed_evaluation_keeps_window() {
        let h = 0.25;
        let problem = ODEProblem::new(
            SystemState::new(0.0, vec![1.0], vec![0.0]),
            |t: f64, q: &[f64], a: &mut [f64]| {
                if t > 10.0 {
                    return Err(EvalFailed);
                }
                a[0] = -q[0];
                Ok(())
            },
        );
        let mut instance = QUINLAN_TREMAINE_1990_ORDER_8
            .new_instance(problem, |_: &SystemState<f64, f64>| {}, h)
            .unwrap();

        assert!(matches!(
            instance.solve(20.0),
            Err(StepError::EvalFailed(_))
        ));
        assert_eq!(instance.time(), 10.0);
        assert_eq!(instance.window.back().map(|step| step.time.value), Some(10.0));
    }
}
