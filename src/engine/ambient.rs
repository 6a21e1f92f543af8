//! The ambient drone engine.

use log::{debug, info, trace, warn};

use super::state::{EngineState, Phase};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::graph::{
    CommandSender, GraphTopology, ParamCommand, ParamId, ParamSet, SoundscapeGraph,
    command_channel,
};
use crate::host::{AudioContext, AudioHost, ContextState};
use crate::Automation;

/// A built graph as seen from the control side.
struct Session<C> {
    context: C,
    commands: CommandSender,
    /// Mirror of the graph's trajectories
    params: ParamSet,
    topology: GraphTopology,
    phase: Phase,
}

impl<C> Session<C> {
    /// Replaces one parameter's trajectory on both sides.
    ///
    /// The render side picks up the newest trajectory per parameter, so the
    /// mirror always matches what the graph will play next.
    fn schedule(&mut self, param: ParamId, next: impl FnOnce(&Automation) -> Automation) {
        let automation = next(self.params.get(param));
        self.commands.send(ParamCommand { param, automation });
        self.params.set(param, automation);
    }
}

enum Lifecycle<C> {
    /// Levels chosen before the graph exists become its initial bus gains.
    Uninitialized { drone_level: f64, noise_level: f64 },
    Unsupported { drone_level: f64, noise_level: f64 },
    Built(Box<Session<C>>),
}

/// Breath-driven ambient soundscape.
///
/// Owns its audio host, context and graph exclusively. Every control
/// operation is fire-and-forget: nothing returns a value or an error, and a
/// host without audio degrades the engine to silent no-ops.
///
/// ```text
/// Uninitialized --start--> Active --stop--> Stopping --(fade out)--> Idle
///                            ^                  |                      |
///                            +------start-------+--------start---------+
/// ```
///
/// # Examples
///
/// ```
/// use zendrone::{AmbientEngine, EngineState, OfflineHost};
///
/// let mut engine = AmbientEngine::<48000, _>::with_defaults(OfflineHost::new());
/// engine.update_breathing(1.2); // no graph yet: ignored
/// engine.start();
/// assert_eq!(engine.state(), EngineState::Active);
///
/// engine.start(); // idempotent
/// assert_eq!(engine.source_count(), 5);
/// assert_eq!(engine.graph_builds(), 1);
/// ```
pub struct AmbientEngine<const SAMPLE_RATE: u32, H: AudioHost<SAMPLE_RATE>> {
    host: H,
    config: EngineConfig,
    lifecycle: Lifecycle<H::Context>,
    graph_builds: u32,
}

impl<const SAMPLE_RATE: u32, H: AudioHost<SAMPLE_RATE>> AmbientEngine<SAMPLE_RATE, H> {
    /// Creates an engine; nothing is built until the first `start`.
    ///
    /// An invalid configuration is replaced by the defaults.
    pub fn new(host: H, config: EngineConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{}; falling back to default engine config", e);
                EngineConfig::default()
            }
        };
        let lifecycle = Lifecycle::Uninitialized {
            drone_level: config.mix.drone_level,
            noise_level: config.mix.noise_level,
        };
        Self {
            host,
            config,
            lifecycle,
            graph_builds: 0,
        }
    }

    pub fn with_defaults(host: H) -> Self {
        Self::new(host, EngineConfig::default())
    }

    /// Fades the soundscape in, building it on first use.
    ///
    /// Repeated calls never duplicate sources. Each call resumes a suspended
    /// context and ramps the master gain from wherever it is to the fade
    /// ceiling.
    pub fn start(&mut self) {
        if let Lifecycle::Uninitialized {
            drone_level,
            noise_level,
        } = self.lifecycle
        {
            match self.build(drone_level, noise_level) {
                Ok(session) => self.lifecycle = Lifecycle::Built(Box::new(session)),
                Err(e) => {
                    warn!("Ambient audio disabled: {}", e);
                    self.lifecycle = Lifecycle::Unsupported {
                        drone_level,
                        noise_level,
                    };
                    return;
                }
            }
        }

        let Lifecycle::Built(session) = &mut self.lifecycle else {
            return;
        };

        if session.context.state() == ContextState::Suspended {
            match session.context.resume() {
                Ok(()) => debug!("Audio context resumed"),
                Err(e) => warn!("Failed to resume audio context: {}", e),
            }
        }
        if session.context.state() == ContextState::Closed {
            warn!("Audio context closed; start ignored");
            return;
        }

        let now = session.context.current_time();
        let fade = &self.config.fade;
        session.schedule(ParamId::Master, |master| {
            master.ramp_to(fade.ceiling, now, fade.fade_in_seconds, fade.curve)
        });
        let previous = session.phase.at(now).state();
        session.phase = Phase::Active {
            fade_in_end: now + fade.fade_in_seconds,
        };
        info!(
            "Ambient audio starting ({} -> active, {:.1}s fade in)",
            previous, fade.fade_in_seconds
        );
    }

    /// Fades the soundscape out without tearing the graph down.
    ///
    /// A no-op when nothing is playing.
    pub fn stop(&mut self) {
        let Lifecycle::Built(session) = &mut self.lifecycle else {
            debug!("Stop ignored: no graph");
            return;
        };

        let now = session.context.current_time();
        session.phase = session.phase.at(now);
        if !matches!(session.phase, Phase::Active { .. }) {
            debug!("Stop ignored: already {}", session.phase.state());
            return;
        }

        let fade = &self.config.fade;
        session.schedule(ParamId::Master, |master| {
            master.ramp_to(0.0, now, fade.fade_out_seconds, fade.curve)
        });
        session.phase = Phase::Stopping {
            fade_out_end: now + fade.fade_out_seconds,
        };
        info!(
            "Ambient audio stopping ({:.1}s fade out)",
            fade.fade_out_seconds
        );
    }

    /// Glides the drone bus toward `level`. Not clamped.
    pub fn set_drone_volume(&mut self, level: f64) {
        self.set_bus_level(ParamId::DroneBus, level);
    }

    /// Glides the noise bus toward `level`. Not clamped.
    pub fn set_noise_volume(&mut self, level: f64) {
        self.set_bus_level(ParamId::NoiseBus, level);
    }

    fn set_bus_level(&mut self, bus: ParamId, level: f64) {
        match &mut self.lifecycle {
            Lifecycle::Uninitialized {
                drone_level,
                noise_level,
            } => {
                match bus {
                    ParamId::DroneBus => *drone_level = level,
                    _ => *noise_level = level,
                }
                debug!("{:?} level {} held until the graph is built", bus, level);
            }
            Lifecycle::Unsupported { .. } => {}
            Lifecycle::Built(session) => {
                let now = session.context.current_time();
                let time_constant = self.config.smoothing.volume_time_constant;
                session.schedule(bus, |gain| gain.approach(level, now, time_constant));
                debug!("{:?} level -> {}", bus, level);
            }
        }
    }

    /// Follows one frame of the breathing cycle.
    ///
    /// `scale` is centered near 1.0. The filter cutoff always follows it.
    /// The master volume follows only while the engine is active and its
    /// fade in has finished: during the fade in the master keeps ramping to
    /// the fade ceiling, and a stopping or stopped soundscape stays silent.
    /// Ignored before the first `start`.
    pub fn update_breathing(&mut self, scale: f64) {
        if !scale.is_finite() {
            trace!("Ignoring non-finite breathing scale {}", scale);
            return;
        }
        let Lifecycle::Built(session) = &mut self.lifecycle else {
            return;
        };

        let now = session.context.current_time();
        session.phase = session.phase.at(now);

        let breathing = &self.config.breathing;
        let smoothing = &self.config.smoothing;
        let cutoff = breathing.cutoff_for(scale);
        session.schedule(ParamId::FilterCutoff, |current| {
            current.approach(cutoff, now, smoothing.cutoff_time_constant)
        });

        if session.phase.follows_breathing(now) {
            let volume = breathing.volume_for(scale);
            session.schedule(ParamId::Master, |master| {
                master.approach(volume, now, smoothing.breathing_volume_time_constant)
            });
            trace!("Breathing {:.3}: cutoff {:.1} Hz, volume {:.3}", scale, cutoff, volume);
        } else {
            trace!("Breathing {:.3}: cutoff {:.1} Hz", scale, cutoff);
        }
    }

    /// Releases the audio context and the graph.
    pub fn dispose(mut self) {
        if let Lifecycle::Built(session) = &mut self.lifecycle {
            session.context.close();
            info!("Ambient audio disposed");
        }
    }

    pub fn state(&self) -> EngineState {
        match &self.lifecycle {
            Lifecycle::Uninitialized { .. } => EngineState::Uninitialized,
            Lifecycle::Unsupported { .. } => EngineState::Unsupported,
            Lifecycle::Built(session) => session
                .phase
                .at(session.context.current_time())
                .state(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Node identities of the built graph.
    pub fn topology(&self) -> Option<&GraphTopology> {
        match &self.lifecycle {
            Lifecycle::Built(session) => Some(&session.topology),
            _ => None,
        }
    }

    /// Drone voices plus noise sources currently in the graph.
    pub fn source_count(&self) -> usize {
        self.topology().map_or(0, GraphTopology::source_count)
    }

    /// How many times a graph has been built; never more than one.
    pub fn graph_builds(&self) -> u32 {
        self.graph_builds
    }

    /// The audio context, once the graph exists.
    pub fn context(&self) -> Option<&H::Context> {
        match &self.lifecycle {
            Lifecycle::Built(session) => Some(&session.context),
            _ => None,
        }
    }

    /// Mutable access to the context, for pull-based hosts that render on
    /// the caller's thread.
    pub fn context_mut(&mut self) -> Option<&mut H::Context> {
        match &mut self.lifecycle {
            Lifecycle::Built(session) => Some(&mut session.context),
            _ => None,
        }
    }

    /// Context time in seconds; zero before the graph exists.
    pub fn current_time(&self) -> f64 {
        self.context().map_or(0.0, |context| context.current_time())
    }

    fn automation(&self, param: ParamId) -> Option<Automation> {
        match &self.lifecycle {
            Lifecycle::Built(session) => Some(*session.params.get(param)),
            _ => None,
        }
    }

    /// The master gain trajectory last scheduled.
    pub fn master_automation(&self) -> Option<Automation> {
        self.automation(ParamId::Master)
    }

    /// Master gain at the current context time.
    pub fn master_gain(&self) -> Option<f64> {
        self.master_automation()
            .map(|master| master.value_at(self.current_time()))
    }

    /// The drone bus level: its scheduled target, or the pending level
    /// before the graph exists.
    pub fn drone_level(&self) -> f64 {
        match &self.lifecycle {
            Lifecycle::Uninitialized { drone_level, .. }
            | Lifecycle::Unsupported { drone_level, .. } => *drone_level,
            Lifecycle::Built(session) => session.params.drone_bus.target(),
        }
    }

    /// The noise bus level: its scheduled target, or the pending level
    /// before the graph exists.
    pub fn noise_level(&self) -> f64 {
        match &self.lifecycle {
            Lifecycle::Uninitialized { noise_level, .. }
            | Lifecycle::Unsupported { noise_level, .. } => *noise_level,
            Lifecycle::Built(session) => session.params.noise_bus.target(),
        }
    }

    /// Target cutoff of the filter stage in Hz.
    pub fn filter_cutoff(&self) -> Option<f64> {
        self.automation(ParamId::FilterCutoff)
            .map(|cutoff| cutoff.target())
    }

    fn build(
        &mut self,
        drone_level: f64,
        noise_level: f64,
    ) -> Result<Session<H::Context>, EngineError> {
        let mut context = self.host.create_context()?;
        let (commands, receiver) = command_channel();
        let params = ParamSet::initial(&self.config, drone_level, noise_level);
        let (graph, topology) =
            SoundscapeGraph::build(&self.config, params, receiver, context.clock().clone());

        context.attach(graph)?;
        self.graph_builds += 1;
        info!(
            "Built soundscape: {} drone voice(s) at {} Hz, {:?} noise, {:?} at {} Hz",
            topology.drone_voices.len(),
            self.config.drone.fundamental,
            self.config.noise.color,
            self.config.filter.kind,
            self.config.filter.base_cutoff
        );

        Ok(Session {
            context,
            commands,
            params,
            topology,
            phase: Phase::Idle,
        })
    }
}
