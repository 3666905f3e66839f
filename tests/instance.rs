use fixed_step_integration::prelude::*;
use hifitime::{Duration, Epoch};

fn harmonic_oscillator<T>(_: T, q: &[f64], a: &mut [f64]) -> Result<(), EvalFailed> {
    a[0] = -q[0];
    Ok(())
}

fn no_output<T: Instant>(_: &SystemState<T, f64>) {}

fn oscillator() -> ODEProblem<f64, f64, fn(f64, &[f64], &mut [f64]) -> Result<(), EvalFailed>> {
    ODEProblem::new(
        SystemState::new(0.0, vec![1.0], vec![0.0]),
        harmonic_oscillator::<f64>,
    )
}

#[test]
fn every_integrator_solves_through_dispatch() {
    let h = 0.125;
    for kind in FixedStepSizeKind::ALL {
        let integrator = FixedStepSizeIntegrator::from_kind(kind);
        let mut instance = integrator
            .new_instance(oscillator(), no_output::<f64>, h)
            .unwrap();
        assert_eq!(instance.integrator(), integrator);
        assert_eq!(instance.step(), h);

        integrator.solve(1.0 + h / 2.0, &mut instance).unwrap();

        assert_eq!(instance.time(), 1.0, "{kind:?}");
        let q = instance.current_state().positions[0].value;
        assert!((q - 1f64.cos()).abs() < 1e-4, "{kind:?}: {q}");
    }
}

#[test]
#[should_panic(expected = "cannot be solved by")]
fn instance_solved_by_another_integrator() {
    let mut instance = FixedStepSizeIntegrator::from_kind(FixedStepSizeKind::QuinlanTremaine1990Order8)
        .new_instance(oscillator(), no_output::<f64>, 0.125)
        .unwrap();

    let _ = FixedStepSizeIntegrator::from_kind(FixedStepSizeKind::QuinlanTremaine1990Order10)
        .solve(1.0, &mut instance);
}

/// Interrupting an integration with a checkpoint does not change its result.
fn checkpoint_continuation(kind: FixedStepSizeKind, interrupt_at: f64) {
    let h = 0.125;
    let t_final = 4.0 + h / 2.0;
    let integrator = FixedStepSizeIntegrator::from_kind(kind);

    let mut uninterrupted = integrator
        .new_instance(oscillator(), no_output::<f64>, h)
        .unwrap();
    uninterrupted.solve(t_final).unwrap();

    let mut first = integrator
        .new_instance(oscillator(), no_output::<f64>, h)
        .unwrap();
    first.solve(interrupt_at).unwrap();
    let json = serde_json::to_string(&first.checkpoint()).unwrap();
    drop(first);

    let checkpoint: InstanceCheckpoint<f64, f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(checkpoint.kind, kind);
    let mut published = Vec::new();
    let mut resumed = checkpoint
        .restore(harmonic_oscillator::<f64>, |state: &SystemState<f64, f64>| {
            published.push(state.time.value)
        })
        .unwrap();
    assert_eq!(resumed.integrator(), integrator);
    resumed.solve(t_final).unwrap();

    assert_eq!(resumed.current_state(), uninterrupted.current_state(), "{kind:?}");
    assert_eq!(resumed.checkpoint(), uninterrupted.checkpoint(), "{kind:?}");
    drop(resumed);
    assert_eq!(published.last(), Some(&4.0));
}

#[test]
fn symplectic_checkpoint_resumes_identically() {
    for kind in [
        FixedStepSizeKind::BlanesMoan2002Srkn6B,
        FixedStepSizeKind::BlanesMoan2002Srkn14A,
        FixedStepSizeKind::McLachlanOrder4,
    ] {
        checkpoint_continuation(kind, 2.0);
    }
}

#[test]
fn multistep_checkpoint_resumes_identically() {
    for kind in [
        FixedStepSizeKind::Quinlan1999Order8A,
        FixedStepSizeKind::QuinlanTremaine1990Order12,
    ] {
        // After the startup, and in the middle of it.
        checkpoint_continuation(kind, 2.0);
        checkpoint_continuation(kind, 0.5);
    }
}

#[test]
fn symplectic_checkpoint_has_no_history() {
    let mut instance = FixedStepSizeIntegrator::from_kind(FixedStepSizeKind::Ruth1983)
        .new_instance(oscillator(), no_output::<f64>, 0.125)
        .unwrap();
    instance.solve(1.0).unwrap();

    let checkpoint = instance.checkpoint();
    assert!(checkpoint.history.is_empty());
    assert_eq!(checkpoint.step, 0.125);
    assert_eq!(checkpoint.current_state.time.value, 1.0);
}

#[test]
fn epoch_integration_matches_seconds() {
    let steps: i64 = 40;
    let h = 0.125;
    for kind in [
        FixedStepSizeKind::BlanesMoan2002Srkn6B,
        FixedStepSizeKind::QuinlanTremaine1990Order12,
    ] {
        let integrator = FixedStepSizeIntegrator::from_kind(kind);

        let mut seconds = integrator
            .new_instance(oscillator(), no_output::<f64>, h)
            .unwrap();
        seconds.solve(steps as f64 * h + h / 2.0).unwrap();

        let start = Epoch::from_tai_seconds(0.0);
        let step = Duration::from_seconds(h);
        let problem = ODEProblem::new(
            SystemState::new(start, vec![1.0], vec![0.0]),
            harmonic_oscillator::<Epoch>,
        );
        let mut epochs = integrator
            .new_instance(problem, no_output::<Epoch>, step)
            .unwrap();
        epochs
            .solve(start + step * steps + Duration::from_seconds(h / 2.0))
            .unwrap();

        assert_eq!(epochs.time(), start + step * steps, "{kind:?}");
        assert_eq!(
            epochs.current_state().positions,
            seconds.current_state().positions,
            "{kind:?}"
        );
    }
}

#[test]
fn settings_select_the_integrator() {
    let settings = IntegratorSettings::from_toml(
        r#"
        method = "QuinlanTremaine1990Order8"
        step = 0.125
        "#,
    )
    .unwrap();

    let integrator = settings.integrator();
    assert_eq!(integrator.kind(), FixedStepSizeKind::QuinlanTremaine1990Order8);

    let mut instance = integrator
        .new_instance(oscillator(), no_output::<f64>, settings.step::<f64>())
        .unwrap();
    instance.solve(2.0).unwrap();
    assert_eq!(instance.time(), 2.0);
}
