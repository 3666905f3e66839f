use crate::{
    integrator::{FixedStepSizeIntegrator, FixedStepSizeKind},
    problem::{Instant, ODEProblem, SecondOrderODE, SystemState, VariableOps},
    StepError,
};

/// Symplectic Runge-Kutta-Nyström (SRKN) integrator.
///
/// SRKN methods are integrators for second-order ordinary differential equations of the form:
/// `y'' = f(t, y)`
///
/// SRKN methods are a specialized case of Partitioned Runge-Kutta (PRK) methods and so coefficients
/// for PRK methods can be adapted to SRKN methods.
///
/// The coefficients are expressed in a simplified form of two Butcher tableaus, where
/// aᵢⱼ = bⱼ for i ≥ j, called A here, and
/// āᵢⱼ = b̄ⱼ for i > j, called B here.
#[doc(alias = "Butcher Tableau")]
#[derive(Debug)]
pub struct SymplecticRungeKuttaNystrom {
    kind: FixedStepSizeKind,
    order: u16,
    fsal: bool,
    a: &'static [f64],
    b: &'static [f64],
}

impl SymplecticRungeKuttaNystrom {
    pub const fn new(
        kind: FixedStepSizeKind,
        order: u16,
        fsal: bool,
        a: &'static [f64],
        b: &'static [f64],
    ) -> Self {
        assert!(!a.is_empty(), "a method needs at least one stage");
        assert!(a.len() == b.len(), "A and B must have one coefficient per stage");
        // The first evaluation of a step can only be skipped when the last evaluation of the
        // previous step happened at the same positions, or when it is not used at all.
        assert!(
            !fsal || a[a.len() - 1] == 0.0 || b[0] == 0.0,
            "inconsistent FSAL property"
        );

        Self {
            kind,
            order,
            fsal,
            a,
            b,
        }
    }

    #[inline]
    pub fn kind(&self) -> FixedStepSizeKind {
        self.kind
    }

    #[inline]
    pub fn order(&self) -> u16 {
        self.order
    }

    #[inline]
    pub fn stages(&self) -> usize {
        self.a.len()
    }

    /// Drift coefficients.
    #[inline]
    pub fn a(&self) -> &'static [f64] {
        self.a
    }

    /// Kick coefficients.
    #[inline]
    pub fn b(&self) -> &'static [f64] {
        self.b
    }

    #[inline]
    pub fn is_fsal(&self) -> bool {
        self.fsal
    }

    /// Number of evaluations of the equation needed for `steps` steps.
    #[inline]
    pub fn evaluations(&self, steps: usize) -> usize {
        match (self.fsal, steps) {
            (_, 0) => 0,
            (true, steps) => 1 + steps * (self.stages() - 1),
            (false, steps) => steps * self.stages(),
        }
    }

    pub fn new_instance<T, V, ODE, A>(
        &'static self,
        problem: ODEProblem<T, V, ODE>,
        append_state: A,
        step: T::Duration,
    ) -> SRKNInstance<T, V, ODE, A>
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

        let dimension = initial_state.dimension();
        SRKNInstance {
            integrator: self,
            ode,
            append_state,
            step,
            current_state: initial_state,
            positions: vec![V::default(); dimension],
            ddy: vec![V::default(); dimension],
            steps: 0,
        }
    }
}

/// Resumable state of an integration with a [`SymplecticRungeKuttaNystrom`] method.
///
/// The state is advanced in place, an instance whose equation failed to evaluate must be
/// discarded.
#[derive(Debug)]
pub struct SRKNInstance<T: Instant, V, ODE, A> {
    integrator: &'static SymplecticRungeKuttaNystrom,
    ode: ODE,
    append_state: A,
    step: T::Duration,
    current_state: SystemState<T, V>,
    positions: Vec<V>,
    ddy: Vec<V>,
    steps: u64,
}

impl<T, V, ODE, A> SRKNInstance<T, V, ODE, A>
where
    T: Instant,
    V: VariableOps,
    ODE: SecondOrderODE<T, V>,
    A: FnMut(&SystemState<T, V>),
{
    /// Advances by whole steps while one more step fits before `t_final`.
    pub fn solve(&mut self, t_final: T) -> Result<(), StepError> {
        let integrator = self.integrator;
        let h = self.step;
        let h_seconds = T::to_seconds(h);
        assert!(h > T::ZERO, "step must be positive");

        let steps = self.steps;
        loop {
            let t = self.current_state.time;
            if !(h <= (t_final - t.value) - t.error) {
                break;
            }

            // Detailed source and proof for the formulas used can be found here:
            // https://en.wikipedia.org/wiki/Symplectic_integrator#Methods_for_constructing_symplectic_algorithms
            let mut c = 0.0;
            for (s, (&a, &b)) in integrator.a.iter().zip(integrator.b).enumerate() {
                if !integrator.fsal || s > 0 || self.steps == 0 {
                    for (y, q) in self.positions.iter_mut().zip(&self.current_state.positions) {
                        *y = q.value;
                    }
                    // tᵢ = t₀ + cᵢ * h
                    // yᵢ'' = f(tᵢ, yᵢ)
                    self.ode.eval(
                        t.value + T::from_seconds(h_seconds * c),
                        &self.positions,
                        &mut self.ddy,
                    )?;
                }

                // yᵢ₊₁' = yᵢ' + bᵢ * h * yᵢ₊₁''
                // yᵢ₊₁ = yᵢ + aᵢ * h * yᵢ₊₁'
                for ((y, dy), ddy) in self
                    .current_state
                    .positions
                    .iter_mut()
                    .zip(self.current_state.velocities.iter_mut())
                    .zip(&self.ddy)
                {
                    dy.increment(*ddy * (h_seconds * b));
                    y.increment(dy.value * (h_seconds * a));
                }
                c += a;
            }

            self.current_state.time.increment(h);
            self.steps += 1;
            (self.append_state)(&self.current_state);
        }

        tracing::trace!(
            kind = ?integrator.kind,
            steps = self.steps - steps,
            "symplectic Runge-Kutta-Nyström solve"
        );

        Ok(())
    }
}

impl<T: Instant, V, ODE, A> SRKNInstance<T, V, ODE, A> {
    #[inline]
    pub fn integrator(&self) -> FixedStepSizeIntegrator {
        FixedStepSizeIntegrator::SymplecticRungeKuttaNystrom(self.integrator)
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

    #[inline]
    pub fn step_count(&self) -> u64 {
        self.steps
    }
}
