//! Control-to-audio parameter mailbox.
//!
//! Each automatable parameter has one slot holding the latest trajectory the
//! engine scheduled for it. Posting to a slot replaces whatever the render
//! graph has not picked up yet, so the newest call always wins and nothing
//! ever fills up. The render graph only ever `try_lock`s the mailbox; if the
//! engine happens to hold it, the pending trajectories wait one block.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use crate::Automation;
use crate::config::EngineConfig;

/// The automatable parameters of the soundscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Master output gain
    Master,
    /// Gain of the drone ensemble
    DroneBus,
    /// Gain of the noise bed
    NoiseBus,
    /// Cutoff of the shared filter, in Hz
    FilterCutoff,
}

impl ParamId {
    pub const COUNT: usize = 4;

    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::Master,
        ParamId::DroneBus,
        ParamId::NoiseBus,
        ParamId::FilterCutoff,
    ];

    fn index(self) -> usize {
        match self {
            ParamId::Master => 0,
            ParamId::DroneBus => 1,
            ParamId::NoiseBus => 2,
            ParamId::FilterCutoff => 3,
        }
    }
}

/// One trajectory for one parameter, replacing whatever it was doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamCommand {
    pub param: ParamId,
    pub automation: Automation,
}

/// The trajectories of every automatable parameter.
///
/// The render graph owns one copy; the engine keeps an identical mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSet {
    pub master: Automation,
    pub drone_bus: Automation,
    pub noise_bus: Automation,
    pub filter_cutoff: Automation,
}

impl ParamSet {
    /// Parameters of a freshly built graph: silent master, given bus levels,
    /// filter at its base cutoff.
    pub fn initial(config: &EngineConfig, drone_level: f64, noise_level: f64) -> Self {
        Self {
            master: Automation::hold(0.0),
            drone_bus: Automation::hold(drone_level),
            noise_bus: Automation::hold(noise_level),
            filter_cutoff: Automation::hold(config.filter.base_cutoff),
        }
    }

    pub fn get(&self, param: ParamId) -> &Automation {
        match param {
            ParamId::Master => &self.master,
            ParamId::DroneBus => &self.drone_bus,
            ParamId::NoiseBus => &self.noise_bus,
            ParamId::FilterCutoff => &self.filter_cutoff,
        }
    }

    pub fn set(&mut self, param: ParamId, automation: Automation) {
        match param {
            ParamId::Master => self.master = automation,
            ParamId::DroneBus => self.drone_bus = automation,
            ParamId::NoiseBus => self.noise_bus = automation,
            ParamId::FilterCutoff => self.filter_cutoff = automation,
        }
    }
}

/// Trajectories posted but not yet applied, one slot per `ParamId`.
#[derive(Debug, Default)]
struct Slots([Option<Automation>; ParamId::COUNT]);

#[derive(Debug, Default)]
struct Mailbox {
    slots: Mutex<Slots>,
    /// Set while any slot is occupied; only changed under the lock
    dirty: AtomicBool,
}

/// Posting half, held by the engine.
pub struct CommandSender {
    mailbox: Arc<Mailbox>,
}

impl CommandSender {
    /// Posts a command, replacing any not yet applied for the same parameter.
    pub fn send(&mut self, command: ParamCommand) {
        let mut slots = self
            .mailbox
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slots.0[command.param.index()] = Some(command.automation);
        self.mailbox.dirty.store(true, Ordering::Release);
    }

    /// Number of parameters with a trajectory still waiting for the graph.
    pub fn pending(&self) -> usize {
        let slots = self
            .mailbox
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slots.0.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Collecting half, held by the render graph.
pub struct CommandReceiver {
    mailbox: Arc<Mailbox>,
}

impl CommandReceiver {
    /// Applies every pending command to `params`. Never blocks or allocates.
    #[inline]
    pub fn drain_into(&mut self, params: &mut ParamSet) -> usize {
        if !self.mailbox.dirty.load(Ordering::Acquire) {
            return 0;
        }
        let mut slots = match self.mailbox.slots.try_lock() {
            Ok(slots) => slots,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return 0,
        };

        let mut applied = 0;
        for (param, slot) in ParamId::ALL.into_iter().zip(slots.0.iter_mut()) {
            if let Some(automation) = slot.take() {
                params.set(param, automation);
                applied += 1;
            }
        }
        self.mailbox.dirty.store(false, Ordering::Release);
        applied
    }
}

/// Creates a connected sender and receiver.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let mailbox = Arc::new(Mailbox::default());
    (
        CommandSender {
            mailbox: Arc::clone(&mailbox),
        },
        CommandReceiver { mailbox },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(param: ParamId, value: f64) -> ParamCommand {
        ParamCommand {
            param,
            automation: Automation::hold(value),
        }
    }

    #[test]
    fn test_latest_command_wins() {
        let (mut sender, mut receiver) = command_channel();
        let mut params = ParamSet::initial(&EngineConfig::default(), 0.5, 0.3);

        sender.send(command(ParamId::DroneBus, 0.8));
        sender.send(command(ParamId::DroneBus, 0.6));
        assert_eq!(sender.pending(), 1);
        assert_eq!(receiver.drain_into(&mut params), 1);

        assert_eq!(params.drone_bus.target(), 0.6);
        assert_eq!(params.noise_bus.target(), 0.3);
        assert_eq!(sender.pending(), 0);
    }

    #[test]
    fn test_undrained_sender_never_refuses() {
        let (mut sender, mut receiver) = command_channel();
        for i in 0..10_000 {
            sender.send(command(ParamId::FilterCutoff, i as f64));
            sender.send(command(ParamId::Master, 0.4));
        }
        sender.send(command(ParamId::Master, 0.0));
        sender.send(command(ParamId::DroneBus, 0.8));

        let mut params = ParamSet::initial(&EngineConfig::default(), 0.5, 0.3);
        assert_eq!(receiver.drain_into(&mut params), 3);
        assert_eq!(params.master.target(), 0.0);
        assert_eq!(params.drone_bus.target(), 0.8);
        assert_eq!(params.filter_cutoff.target(), 9999.0);
    }

    #[test]
    fn test_drain_without_commands_is_empty() {
        let (_sender, mut receiver) = command_channel();
        let mut params = ParamSet::initial(&EngineConfig::default(), 0.5, 0.3);
        let before = params;
        assert_eq!(receiver.drain_into(&mut params), 0);
        assert_eq!(params, before);
    }

    #[test]
    fn test_param_indices_match_all() {
        for (i, param) in ParamId::ALL.into_iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }

    #[test]
    fn test_initial_params() {
        let params = ParamSet::initial(&EngineConfig::default(), 0.5, 0.3);
        assert_eq!(params.get(ParamId::Master).target(), 0.0);
        assert_eq!(params.get(ParamId::FilterCutoff).target(), 400.0);
    }
}
