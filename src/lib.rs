pub mod double_precision;
pub mod integrator;
pub mod methods;
pub mod multistep;
pub mod problem;
pub mod runge_kutta;
pub mod settings;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    EvalFailed(#[from] problem::EvalFailed),
}

pub mod prelude {
    pub use crate::{
        double_precision::DoublePrecision,
        integrator::{
            FixedStepSizeIntegrator, FixedStepSizeKind, InstanceCheckpoint, IntegratorInstance,
        },
        methods::*,
        multistep::{SLMSInstance, SymmetricLinearMultistep},
        problem::{EvalFailed, Instant, ODEProblem, SecondOrderODE, SystemState, VariableOps},
        runge_kutta::{SRKNInstance, SymplecticRungeKuttaNystrom},
        settings::{IntegratorSettings, SettingsError},
        StepError,
    };
}
