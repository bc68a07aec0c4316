//! The fairness selector - one spin of the wheel.

use std::collections::HashSet;
use std::time::Duration;
use fate_core::{Participant, ParticipantId};
use fate_ledger::BalanceStore;
use serde::Serialize;
use tracing::info;
use crate::{
    layout_sectors, rotation_for, weighted_random_index, RandomSource, Result, Sector,
    SelectionError, WeightPolicy,
};

/// Fewest full turns a spin may make before landing.
pub const MIN_FULL_SPINS: u32 = 3;

/// Configuration for a spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    /// How balances become weights
    pub weight_policy: WeightPolicy,
    /// Fewest full turns before landing
    pub min_full_spins: u32,
    /// Most full turns before landing
    pub max_full_spins: u32,
    /// How long the wheel turns before the winner is revealed
    pub spin_duration: Duration,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            weight_policy: WeightPolicy::default(),
            min_full_spins: MIN_FULL_SPINS,
            max_full_spins: 4,
            spin_duration: Duration::from_millis(2000),
        }
    }
}

impl SpinConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight policy.
    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    /// Set the range of full turns.
    pub fn with_full_spins(mut self, min: u32, max: u32) -> Result<Self> {
        self.min_full_spins = min;
        self.max_full_spins = max;
        self.spin_choices()?;
        Ok(self)
    }

    /// Number of distinct full-spin counts in the configured range.
    ///
    /// The minimum must be at least [`MIN_FULL_SPINS`] and no greater than
    /// the maximum.
    pub fn spin_choices(&self) -> Result<u32> {
        let (min, max) = (self.min_full_spins, self.max_full_spins);
        if min < MIN_FULL_SPINS {
            return Err(SelectionError::TooFewFullSpins { min, required: MIN_FULL_SPINS });
        }
        if min > max {
            return Err(SelectionError::InvalidSpinRange { min, max });
        }
        (max - min)
            .checked_add(1)
            .ok_or(SelectionError::InvalidSpinRange { min, max })
    }

    /// Set the spin duration.
    pub fn with_spin_duration(mut self, duration: Duration) -> Self {
        self.spin_duration = duration;
        self
    }
}

/// Result of a single spin.
#[derive(Debug, Clone, Serialize)]
pub struct SpinOutcome {
    /// Who was picked
    pub winner: Participant,
    /// Position of the winner among the spun participants
    pub winner_index: usize,
    /// Wheel layout the draw was made on
    pub sectors: Vec<Sector>,
    /// Whole turns included in the rotation
    pub full_spins: u32,
    /// Rotation in degrees that brings the winner under the pointer
    pub rotation_degrees: f64,
    /// Delay before revealing the winner, in milliseconds
    pub reveal_after_ms: u64,
}

impl SpinOutcome {
    /// Winner's sector.
    pub fn winner_sector(&self) -> &Sector {
        &self.sectors[self.winner_index]
    }

    /// Delay before revealing the winner.
    pub fn reveal_after(&self) -> Duration {
        Duration::from_millis(self.reveal_after_ms)
    }

    /// Selection weight for a participant, if they were on the wheel.
    pub fn weight_of(&self, id: &ParticipantId) -> Option<f64> {
        self.sectors
            .iter()
            .find(|s| &s.participant == id)
            .map(|s| s.weight)
    }
}

/// Picks who does it next, weighted by what each participant owes.
///
/// Every spin reads a fresh snapshot from the store; nothing is carried over
/// between spins.
pub struct FairnessSelector<S: BalanceStore, R: RandomSource> {
    store: S,
    rng: R,
    config: SpinConfig,
    spins: usize,
}

impl<S: BalanceStore, R: RandomSource> FairnessSelector<S, R> {
    /// Create a selector over a store with the given random source.
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            config: SpinConfig::default(),
            spins: 0,
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: SpinConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// The balance store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the balance store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Number of spins performed.
    pub fn spins(&self) -> usize {
        self.spins
    }

    /// Current weight for every participant in the store.
    pub fn weights(&self) -> Vec<(Participant, f64)> {
        let participants = self.store.participants();
        let weights = self
            .config
            .weight_policy
            .weights_for(&participants, &self.store.snapshot());
        participants.into_iter().zip(weights).collect()
    }

    /// Spin among everyone the store knows.
    pub fn spin(&mut self) -> Result<SpinOutcome> {
        let participants = self.store.participants();
        self.spin_among(&participants)
    }

    /// Spin among a chosen subset of participants.
    pub fn spin_among(&mut self, participants: &[Participant]) -> Result<SpinOutcome> {
        if participants.is_empty() {
            return Err(SelectionError::no_participants());
        }
        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(dup) = participants.iter().find(|p| !seen.insert(&p.id)) {
            return Err(SelectionError::DuplicateParticipant(dup.id.clone()));
        }
        let choices = self.config.spin_choices()?;
        let SpinConfig {
            weight_policy,
            min_full_spins,
            spin_duration,
            ..
        } = self.config;

        let sheet = self.store.snapshot();
        let weights = weight_policy.weights_for(participants, &sheet);
        let sectors = layout_sectors(participants, &weights)?;
        let total: f64 = weights.iter().sum();
        let winner_index = weighted_random_index(&weights, &mut self.rng)?;

        // next_below(choices) < choices, so this stays within max_full_spins.
        let full_spins = min_full_spins + self.rng.next_below(choices);
        let rotation_degrees = rotation_for(sectors[winner_index].mid_angle(), full_spins);

        let winner = participants[winner_index].clone();
        self.spins += 1;
        info!(
            "Spin {} picked {} ({}) with weight {:.2} of {:.2}",
            self.spins, winner.name, winner.id, weights[winner_index], total
        );

        Ok(SpinOutcome {
            winner,
            winner_index,
            sectors,
            full_spins,
            rotation_degrees,
            reveal_after_ms: spin_duration.as_millis() as u64,
        })
    }
}
