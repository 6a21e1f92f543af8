use zendrone::{
    AmbientEngine, AudioContext, ContextState, EngineConfig, EngineState, OfflineHost, Transition,
};

const RATE: u32 = 8000;

type Engine = AmbientEngine<RATE, OfflineHost>;

fn engine() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    AmbientEngine::with_defaults(OfflineHost::new())
}

fn advance(engine: &mut Engine, seconds: f64) {
    engine
        .context_mut()
        .expect("engine has a context")
        .advance(seconds);
}

fn render(engine: &mut Engine, seconds: f64) -> Vec<f64> {
    engine
        .context_mut()
        .expect("engine has a context")
        .render_seconds(seconds)
}

fn peak(buffer: &[f64]) -> f64 {
    buffer.iter().fold(0.0, |acc, s| acc.max(s.abs()))
}

fn master(engine: &Engine) -> f64 {
    engine.master_gain().expect("graph is built")
}

#[test]
fn test_start_is_idempotent() {
    let mut engine = engine();
    engine.start();
    engine.start();
    engine.start();

    assert_eq!(engine.source_count(), 5);
    assert_eq!(engine.graph_builds(), 1);
    assert_eq!(engine.topology().unwrap().drone_voices.len(), 4);
    assert_eq!(engine.state(), EngineState::Active);
}

#[test]
fn test_restart_reuses_the_graph() {
    let mut engine = engine();
    engine.start();
    let before = engine.topology().cloned().unwrap();

    advance(&mut engine, 2.0);
    engine.stop();
    advance(&mut engine, 1.0);
    engine.start();

    assert_eq!(engine.topology(), Some(&before));
    assert_eq!(engine.graph_builds(), 1);
}

#[test]
fn test_breathing_at_rest() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);

    engine.update_breathing(1.0);
    assert_eq!(engine.filter_cutoff(), Some(300.0));
    assert!((engine.master_automation().unwrap().target() - 0.4).abs() < 1e-12);
}

#[test]
fn test_breathing_inhale() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);

    engine.update_breathing(1.5);
    assert_eq!(engine.filter_cutoff(), Some(525.0));
    assert!((engine.master_automation().unwrap().target() - 0.5).abs() < 1e-12);
}

#[test]
fn test_breathing_glides_toward_its_volume() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);
    engine.update_breathing(1.0);

    let volume = engine.master_automation().unwrap();
    match volume.transition() {
        Transition::Approach { time_constant, .. } => assert_eq!(time_constant, 0.15),
        other => panic!("expected an approach, got {:?}", other),
    }

    // One time constant in, ~63% of the way from 0.5 to 0.4
    advance(&mut engine, 0.15);
    let expected = 0.4 + 0.1 * (-1.0f64).exp();
    assert!((master(&engine) - expected).abs() < 1e-6);
}

#[test]
fn test_breathing_before_start_is_ignored() {
    let mut engine = engine();
    engine.update_breathing(1.3);

    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert!(engine.topology().is_none());
    assert_eq!(engine.filter_cutoff(), None);
    assert_eq!(engine.graph_builds(), 0);

    engine.start();
    assert_eq!(engine.filter_cutoff(), Some(400.0));
}

#[test]
fn test_drone_volume_only_touches_drone_bus() {
    let mut engine = engine();
    engine.start();
    let master = engine.master_automation();
    let cutoff = engine.filter_cutoff();

    engine.set_drone_volume(0.8);

    assert_eq!(engine.drone_level(), 0.8);
    assert_eq!(engine.noise_level(), 0.3);
    assert_eq!(engine.master_automation(), master);
    assert_eq!(engine.filter_cutoff(), cutoff);
}

#[test]
fn test_noise_volume_only_touches_noise_bus() {
    let mut engine = engine();
    engine.start();
    engine.set_noise_volume(0.05);

    assert_eq!(engine.noise_level(), 0.05);
    assert_eq!(engine.drone_level(), 0.5);
}

#[test]
fn test_volumes_are_not_clamped() {
    let mut engine = engine();
    engine.start();
    engine.set_drone_volume(1.7);
    engine.set_noise_volume(-0.2);

    assert_eq!(engine.drone_level(), 1.7);
    assert_eq!(engine.noise_level(), -0.2);
}

#[test]
fn test_stop_before_start_is_ignored() {
    let mut engine = engine();
    engine.stop();

    assert_eq!(engine.state(), EngineState::Uninitialized);
    assert_eq!(engine.graph_builds(), 0);
    assert!(engine.master_automation().is_none());
}

#[test]
fn test_fade_in_fade_out_cycle() {
    let mut engine = engine();
    engine.start();
    assert_eq!(master(&engine), 0.0);

    advance(&mut engine, 1.0);
    assert!((master(&engine) - 0.25).abs() < 1e-9);

    advance(&mut engine, 1.0);
    assert_eq!(master(&engine), 0.5);

    engine.stop();
    assert_eq!(engine.state(), EngineState::Stopping);
    advance(&mut engine, 1.0);
    assert_eq!(master(&engine), 0.0);
    assert_eq!(engine.state(), EngineState::Idle);

    engine.start();
    assert_eq!(engine.state(), EngineState::Active);
    advance(&mut engine, 2.0);
    assert_eq!(master(&engine), 0.5);
}

#[test]
fn test_stop_mid_fade_in_ramps_from_current_level() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 1.0);

    engine.stop();
    let fade_out = engine.master_automation().unwrap();
    assert!((fade_out.anchor() - 0.25).abs() < 1e-9);
    assert_eq!(fade_out.target(), 0.0);
}

#[test]
fn test_breathing_keeps_a_stopped_engine_silent() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);
    engine.stop();

    engine.update_breathing(1.5);
    assert_eq!(engine.master_automation().unwrap().target(), 0.0);
    assert_eq!(engine.filter_cutoff(), Some(525.0));

    advance(&mut engine, 1.0);
    engine.update_breathing(1.2);
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(master(&engine), 0.0);
}

#[test]
fn test_active_engine_is_audible_and_stopped_engine_is_silent() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);

    let playing = render(&mut engine, 0.5);
    assert!(peak(&playing) > 0.01);

    engine.stop();
    advance(&mut engine, 1.0);
    let stopped = render(&mut engine, 0.5);
    assert_eq!(peak(&stopped), 0.0);
}

#[test]
fn test_start_resumes_suspended_context() {
    let mut engine = engine();
    engine.start();
    let context = engine.context().unwrap();
    assert_eq!(context.state(), ContextState::Running);
    assert!(context.has_graph());
}

#[test]
fn test_unsupported_host_degrades_to_no_ops() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine: Engine = AmbientEngine::with_defaults(OfflineHost::unsupported());

    engine.start();
    assert_eq!(engine.state(), EngineState::Unsupported);

    engine.set_drone_volume(0.9);
    engine.update_breathing(1.4);
    engine.stop();
    engine.start();

    assert_eq!(engine.state(), EngineState::Unsupported);
    assert_eq!(engine.source_count(), 0);
    assert_eq!(engine.graph_builds(), 0);
    assert!(engine.context().is_none());
    assert_eq!(engine.current_time(), 0.0);
    engine.dispose();
}

#[test]
fn test_engine_follows_json_config() -> anyhow::Result<()> {
    let config = EngineConfig::from_json_str(
        r#"{
            "fade": { "ceiling": 0.8, "fade_in_seconds": 0.5 },
            "mix": { "drone_level": 0.6 }
        }"#,
    )?;
    let mut engine = AmbientEngine::<RATE, _>::new(OfflineHost::new(), config);
    engine.start();
    advance(&mut engine, 0.5);

    assert_eq!(master(&engine), 0.8);
    assert_eq!(engine.drone_level(), 0.6);
    assert_eq!(engine.noise_level(), 0.3);
    Ok(())
}

#[test]
fn test_controls_land_after_a_breathing_session() {
    let mut engine = engine();
    engine.start();

    // 5 s of 60 Hz animation frames, audio rendered between frames
    for frame in 0..300 {
        let t = frame as f64 / 60.0;
        engine.update_breathing(1.0 + 0.25 * (t * 0.8).sin());
        render(&mut engine, 1.0 / 60.0);
    }
    assert_eq!(engine.state(), EngineState::Active);

    engine.set_drone_volume(0.8);
    engine.set_noise_volume(0.1);
    engine.stop();
    assert_eq!(engine.drone_level(), 0.8);
    assert_eq!(engine.noise_level(), 0.1);

    advance(&mut engine, 1.1);
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(peak(&render(&mut engine, 0.5)), 0.0);
}

#[test]
fn test_controls_land_when_audio_stalls() {
    let mut engine = engine();
    engine.start();
    advance(&mut engine, 2.0);

    // Several seconds of frames while the output pulls nothing
    for frame in 0..600 {
        engine.update_breathing(1.0 + 0.01 * (frame % 50) as f64);
    }
    engine.set_drone_volume(0.8);
    engine.stop();
    assert_eq!(engine.drone_level(), 0.8);
    assert_eq!(engine.master_automation().unwrap().target(), 0.0);

    advance(&mut engine, 1.1);
    assert_eq!(engine.state(), EngineState::Idle);
    assert_eq!(peak(&render(&mut engine, 2.0)), 0.0);
}
