//! The render-side soundscape graph.

use super::command::{CommandReceiver, ParamSet};
use super::node::GraphTopology;
use crate::config::EngineConfig;
use crate::{AudioSignal, BiquadFilter, DroneOscillator, NoiseLoop, SampleClock, Signal};

/// One sustained tone of the drone ensemble.
struct DroneVoice<const SAMPLE_RATE: u32> {
    oscillator: DroneOscillator<SAMPLE_RATE>,
    gain: f64,
}

/// Everything the audio thread needs to produce the soundscape.
///
/// The graph is built once, on the control thread, and then moved to
/// wherever samples are pulled from: an output stream callback or an offline
/// render loop. From then on it is only reachable through the command mailbox.
///
/// Per sample:
///
/// ```text
/// mix    = Σ(voice · gain) · drone_bus + noise · noise_bus
/// output = filter(mix, cutoff) · master
/// ```
pub struct SoundscapeGraph<const SAMPLE_RATE: u32> {
    voices: Vec<DroneVoice<SAMPLE_RATE>>,
    noise: NoiseLoop<SAMPLE_RATE>,
    filter: BiquadFilter<SAMPLE_RATE>,
    params: ParamSet,
    commands: CommandReceiver,
    clock: SampleClock<SAMPLE_RATE>,
    /// Frames rendered by this graph; the clock mirrors it for readers
    frame: u64,
}

impl<const SAMPLE_RATE: u32> SoundscapeGraph<SAMPLE_RATE> {
    /// Builds the voices, the noise loop and the filter described by `config`.
    ///
    /// This is the only place the graph allocates: the noise loop is
    /// rendered here, up front.
    pub fn build(
        config: &EngineConfig,
        params: ParamSet,
        commands: CommandReceiver,
        clock: SampleClock<SAMPLE_RATE>,
    ) -> (Self, GraphTopology) {
        let voices = config
            .drone
            .voices
            .iter()
            .map(|voice| DroneVoice {
                oscillator: DroneOscillator::new(
                    voice.waveform,
                    config.drone.fundamental * voice.ratio,
                ),
                gain: voice.gain,
            })
            .collect::<Vec<_>>();

        let noise = NoiseLoop::render(
            config.noise.color,
            config.noise.loop_seconds,
            config.noise.seed,
        );

        let filter = BiquadFilter::new(
            config.filter.kind,
            params.filter_cutoff.value_at(clock.seconds()),
            config.filter.q,
        );

        let topology = GraphTopology::allocate(voices.len());
        let frame = clock.frames();

        (
            Self {
                voices,
                noise,
                filter,
                params,
                commands,
                clock,
                frame,
            },
            topology,
        )
    }

    /// Current trajectories, including commands applied so far.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Applies pending control commands.
    #[inline]
    fn drain_commands(&mut self) {
        self.commands.drain_into(&mut self.params);
    }

    #[inline]
    fn render_frame(&mut self) -> f64 {
        let t = SampleClock::<SAMPLE_RATE>::frame_to_seconds(self.frame);
        self.frame += 1;

        let drones: f64 = self
            .voices
            .iter_mut()
            .map(|voice| voice.oscillator.next_sample() * voice.gain)
            .sum();
        let noise = self.noise.next_sample();

        let mix = drones * self.params.drone_bus.value_at(t)
            + noise * self.params.noise_bus.value_at(t);

        self.filter.set_cutoff(self.params.filter_cutoff.value_at(t));
        self.filter.tick(mix) * self.params.master.value_at(t)
    }
}

impl<const SAMPLE_RATE: u32> Signal for SoundscapeGraph<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        self.drain_commands();
        let sample = self.render_frame();
        self.clock.advance(1);
        sample
    }

    fn process(&mut self, buffer: &mut [f64]) {
        self.drain_commands();
        for sample in buffer.iter_mut() {
            *sample = self.render_frame();
        }
        self.clock.advance(buffer.len() as u64);
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for SoundscapeGraph<SAMPLE_RATE> {}
