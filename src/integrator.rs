use crate::{
    methods::*,
    multistep::{SLMSInstance, Step, SymmetricLinearMultistep},
    problem::{Instant, ODEProblem, SecondOrderODE, SystemState, VariableOps},
    runge_kutta::{SRKNInstance, SymplecticRungeKuttaNystrom},
    StepError,
};
use serde::{Deserialize, Serialize};

/// Tag identifying each fixed step size method of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedStepSizeKind {
    BlanesMoan2002Srkn6B,
    BlanesMoan2002Srkn11B,
    BlanesMoan2002Srkn14A,
    ForestRuth1990,
    McLachlan1995SS17,
    McLachlanOrder4,
    OmelyanMryglodFolk2002Pefrl,
    Ruth1983,
    Quinlan1999Order8A,
    Quinlan1999Order8B,
    QuinlanTremaine1990Order8,
    QuinlanTremaine1990Order10,
    QuinlanTremaine1990Order12,
    QuinlanTremaine1990Order14,
}

impl FixedStepSizeKind {
    pub const ALL: [Self; 14] = [
        Self::BlanesMoan2002Srkn6B,
        Self::BlanesMoan2002Srkn11B,
        Self::BlanesMoan2002Srkn14A,
        Self::ForestRuth1990,
        Self::McLachlan1995SS17,
        Self::McLachlanOrder4,
        Self::OmelyanMryglodFolk2002Pefrl,
        Self::Ruth1983,
        Self::Quinlan1999Order8A,
        Self::Quinlan1999Order8B,
        Self::QuinlanTremaine1990Order8,
        Self::QuinlanTremaine1990Order10,
        Self::QuinlanTremaine1990Order12,
        Self::QuinlanTremaine1990Order14,
    ];
}

/// A fixed step size integrator of the catalog.
///
/// Integrators are immutable and shared by reference, every instance keeps a reference to the
/// integrator that created it.
#[derive(Clone, Copy, Debug)]
pub enum FixedStepSizeIntegrator {
    SymplecticRungeKuttaNystrom(&'static SymplecticRungeKuttaNystrom),
    SymmetricLinearMultistep(&'static SymmetricLinearMultistep),
}

impl PartialEq for FixedStepSizeIntegrator {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SymplecticRungeKuttaNystrom(a), Self::SymplecticRungeKuttaNystrom(b)) => {
                std::ptr::eq(*a, *b)
            }
            (Self::SymmetricLinearMultistep(a), Self::SymmetricLinearMultistep(b)) => {
                std::ptr::eq(*a, *b)
            }
            _ => false,
        }
    }
}
impl Eq for FixedStepSizeIntegrator {}

impl FixedStepSizeIntegrator {
    pub fn from_kind(kind: FixedStepSizeKind) -> Self {
        use FixedStepSizeKind::*;

        match kind {
            BlanesMoan2002Srkn6B => Self::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_6B),
            BlanesMoan2002Srkn11B => Self::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_11B),
            BlanesMoan2002Srkn14A => Self::SymplecticRungeKuttaNystrom(&BLANES_MOAN_2002_SRKN_14A),
            ForestRuth1990 => Self::SymplecticRungeKuttaNystrom(&FOREST_RUTH_1990),
            McLachlan1995SS17 => Self::SymplecticRungeKuttaNystrom(&MCLACHLAN_1995_SS17),
            McLachlanOrder4 => Self::SymplecticRungeKuttaNystrom(&MCLACHLAN_ORDER_4),
            OmelyanMryglodFolk2002Pefrl => {
                Self::SymplecticRungeKuttaNystrom(&OMELYAN_MRYGLOD_FOLK_2002_PEFRL)
            }
            Ruth1983 => Self::SymplecticRungeKuttaNystrom(&RUTH_1983),
            Quinlan1999Order8A => Self::SymmetricLinearMultistep(&QUINLAN_1999_ORDER_8A),
            Quinlan1999Order8B => Self::SymmetricLinearMultistep(&QUINLAN_1999_ORDER_8B),
            QuinlanTremaine1990Order8 => {
                Self::SymmetricLinearMultistep(&QUINLAN_TREMAINE_1990_ORDER_8)
            }
            QuinlanTremaine1990Order10 => {
                Self::SymmetricLinearMultistep(&QUINLAN_TREMAINE_1990_ORDER_10)
            }
            QuinlanTremaine1990Order12 => {
                Self::SymmetricLinearMultistep(&QUINLAN_TREMAINE_1990_ORDER_12)
            }
            QuinlanTremaine1990Order14 => {
                Self::SymmetricLinearMultistep(&QUINLAN_TREMAINE_1990_ORDER_14)
            }
        }
    }

    #[inline]
    pub fn kind(&self) -> FixedStepSizeKind {
        match self {
            Self::SymplecticRungeKuttaNystrom(integrator) => integrator.kind(),
            Self::SymmetricLinearMultistep(integrator) => integrator.kind(),
        }
    }

    /// Creates an instance integrating `problem` with a step of `step`.
    ///
    /// `append_state` is called with the state reached after every step.
    pub fn new_instance<T, V, ODE, A>(
        &self,
        problem: ODEProblem<T, V, ODE>,
        append_state: A,
        step: T::Duration,
    ) -> Result<IntegratorInstance<T, V, ODE, A>, StepError>
    where
        T: Instant,
        V: VariableOps,
        ODE: SecondOrderODE<T, V>,
    {
        Ok(match self {
            Self::SymplecticRungeKuttaNystrom(integrator) => {
                IntegratorInstance::SymplecticRungeKuttaNystrom(integrator.new_instance(
                    problem,
                    append_state,
                    step,
                ))
            }
            Self::SymmetricLinearMultistep(integrator) => {
                IntegratorInstance::SymmetricLinearMultistep(integrator.new_instance(
                    problem,
                    append_state,
                    step,
                )?)
            }
        })
    }

    /// Advances `instance` up to `t_final`.
    ///
    /// # Panics
    ///
    /// Panics if `instance` was not created by this integrator.
    pub fn solve<T, V, ODE, A>(
        &self,
        t_final: T,
        instance: &mut IntegratorInstance<T, V, ODE, A>,
    ) -> Result<(), StepError>
    where
        T: Instant,
        V: VariableOps,
        ODE: SecondOrderODE<T, V>,
        A: FnMut(&SystemState<T, V>),
    {
        assert!(
            instance.integrator() == *self,
            "instance of {:?} cannot be solved by {:?}",
            instance.integrator().kind(),
            self.kind()
        );
        instance.solve(t_final)
    }
}

/// Resumable state of an integration, one variant per integrator family.
#[derive(Debug)]
pub enum IntegratorInstance<T: Instant, V, ODE, A> {
    SymplecticRungeKuttaNystrom(SRKNInstance<T, V, ODE, A>),
    SymmetricLinearMultistep(SLMSInstance<T, V, ODE, A>),
}

impl<T: Instant, V, ODE, A> IntegratorInstance<T, V, ODE, A> {
    #[inline]
    pub fn integrator(&self) -> FixedStepSizeIntegrator {
        match self {
            Self::SymplecticRungeKuttaNystrom(instance) => instance.integrator(),
            Self::SymmetricLinearMultistep(instance) => instance.integrator(),
        }
    }

    /// The last state reached.
    #[inline]
    pub fn current_state(&self) -> &SystemState<T, V> {
        match self {
            Self::SymplecticRungeKuttaNystrom(instance) => instance.current_state(),
            Self::SymmetricLinearMultistep(instance) => instance.current_state(),
        }
    }

    #[inline]
    pub fn time(&self) -> T {
        self.current_state().time.value
    }

    #[inline]
    pub fn step(&self) -> T::Duration {
        match self {
            Self::SymplecticRungeKuttaNystrom(instance) => instance.step(),
            Self::SymmetricLinearMultistep(instance) => instance.step(),
        }
    }

    /// Captures what is needed to resume this integration with another equation and callback.
    pub fn checkpoint(&self) -> InstanceCheckpoint<T, V>
    where
        V: Clone,
    {
        let history = match self {
            Self::SymplecticRungeKuttaNystrom(_) => Vec::new(),
            Self::SymmetricLinearMultistep(instance) => instance.window().iter().cloned().collect(),
        };

        InstanceCheckpoint {
            kind: self.integrator().kind(),
            step: self.step(),
            current_state: self.current_state().clone(),
            history,
        }
    }
}

impl<T, V, ODE, A> IntegratorInstance<T, V, ODE, A>
where
    T: Instant,
    V: VariableOps,
    ODE: SecondOrderODE<T, V>,
    A: FnMut(&SystemState<T, V>),
{
    /// Advances by whole steps while one more step fits before `t_final`.
    #[inline]
    pub fn solve(&mut self, t_final: T) -> Result<(), StepError> {
        match self {
            Self::SymplecticRungeKuttaNystrom(instance) => instance.solve(t_final),
            Self::SymmetricLinearMultistep(instance) => instance.solve(t_final),
        }
    }
}

/// Serializable state of an [`IntegratorInstance`].
///
/// The history holds the past steps of a multistep method, it is empty for one-step methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize, T::Duration: Serialize, V: Serialize",
    deserialize = "T: Deserialize<'de>, T::Duration: Deserialize<'de>, V: Deserialize<'de>"
))]
pub struct InstanceCheckpoint<T: Instant, V> {
    pub kind: FixedStepSizeKind,
    pub step: T::Duration,
    pub current_state: SystemState<T, V>,
    #[serde(default)]
    pub history: Vec<Step<T, V>>,
}

impl<T: Instant, V: VariableOps> InstanceCheckpoint<T, V> {
    /// Recreates the checkpointed instance with the integrator of the same kind.
    pub fn restore<ODE, A>(
        self,
        ode: ODE,
        append_state: A,
    ) -> Result<IntegratorInstance<T, V, ODE, A>, StepError>
    where
        ODE: SecondOrderODE<T, V>,
    {
        let problem = ODEProblem::new(self.current_state, ode);
        match FixedStepSizeIntegrator::from_kind(self.kind) {
            FixedStepSizeIntegrator::SymmetricLinearMultistep(integrator)
                if !self.history.is_empty() =>
            {
                Ok(IntegratorInstance::SymmetricLinearMultistep(
                    integrator.restore_instance(problem, append_state, self.step, self.history),
                ))
            }
            integrator => integrator.new_instance(problem, append_state, self.step),
        }
    }
}
