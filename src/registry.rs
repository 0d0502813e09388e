use crate::{
    config::RegistryConfig,
    entry::{
        Entry,
        EntrySet,
    },
    error::RegistryError,
    history::{
        HistoryStorage,
        HistoryStore,
        signature,
    },
    selection::{
        Winner,
        select_winner_with,
    },
    wheel::{
        self,
        Segment,
    },
};
use rand::{
    Rng,
    seq::SliceRandom,
};

/// Editing and selection flags supplied by the front end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modes {
    /// Lines may carry a `name:weight` suffix.
    pub ratio_mode: bool,
    /// Entries are added one at a time and always weigh 1.
    pub single_entry_mode: bool,
    /// The entry set is locked for spinning.
    pub confirmed: bool,
}

impl Modes {
    pub fn equal_weights(&self) -> bool {
        self.single_entry_mode
    }
}

/// Checks count and ratio rules. Confirming and spinning both go through this.
pub fn validate(
    entries: &EntrySet,
    modes: Modes,
    config: &RegistryConfig,
) -> Result<(), RegistryError> {
    let found = entries.valid_count();
    if found < config.min_entries {
        return Err(RegistryError::TooFewEntries {
            min: config.min_entries,
            found,
        });
    }
    if found > config.max_entries {
        return Err(RegistryError::TooManyEntries {
            max: config.max_entries,
            found,
        });
    }
    if modes.ratio_mode && !modes.single_entry_mode {
        let total = entries.total_weight();
        if total != config.ratio_total {
            return Err(RegistryError::RatioNotFull {
                expected: config.ratio_total,
                total,
            });
        }
    }
    Ok(())
}

/// Result of a spin: who won, where they sit on the wheel and which history
/// bucket the spin belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinResult {
    pub winner: Winner,
    pub segment: Segment,
    pub signature: String,
}

/// Owns the entries of one wheel session along with its modes.
#[derive(Clone, Debug, Default)]
pub struct EntryRegistry {
    config: RegistryConfig,
    modes: Modes,
    entries: EntrySet,
}

impl EntryRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            modes: Modes::default(),
            entries: EntrySet::parse("", false),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }

    pub fn valid_entries(&self) -> Vec<Entry> {
        self.entries.valid_entries()
    }

    pub fn text(&self) -> String {
        self.entries.to_text()
    }

    pub fn total_weight(&self) -> u32 {
        self.entries.total_weight()
    }

    pub fn is_at_capacity(&self) -> bool {
        self.entries.valid_count() >= self.config.max_entries
    }

    pub fn signature(&self) -> String {
        signature(&self.valid_entries())
    }

    pub fn segments(&self) -> Vec<Segment> {
        wheel::segments(&self.valid_entries(), self.modes.equal_weights())
    }

    pub fn shares(&self) -> Vec<f64> {
        wheel::shares(&self.valid_entries(), self.modes.equal_weights())
    }

    fn ensure_unlocked(&self) -> Result<(), RegistryError> {
        if self.modes.confirmed {
            Err(RegistryError::Locked)
        } else {
            Ok(())
        }
    }

    /// Replaces the entries with a fresh parse of the editor text.
    pub fn set_text(&mut self, raw_text: &str) -> Result<(), RegistryError> {
        self.ensure_unlocked()?;
        self.entries = EntrySet::parse(raw_text, self.modes.ratio_mode);
        Ok(())
    }

    /// Switching re-parses the raw text, so flipping back and forth loses nothing.
    pub fn set_ratio_mode(&mut self, on: bool) -> Result<(), RegistryError> {
        self.ensure_unlocked()?;
        if self.modes.single_entry_mode {
            tracing::debug!("ratio mode is unavailable in single entry mode");
            return Ok(());
        }
        self.modes.ratio_mode = on;
        self.entries = EntrySet::parse(&self.entries.to_text(), on);
        Ok(())
    }

    /// Entering or leaving single entry mode drops the confirmation, turns
    /// ratio mode off and keeps one weight-1 line per valid entry.
    pub fn set_single_entry_mode(&mut self, on: bool) {
        self.modes = Modes {
            ratio_mode: false,
            single_entry_mode: on,
            confirmed: false,
        };
        self.entries = self
            .entries
            .valid_entries()
            .into_iter()
            .map(|e| Entry::new(e.name, 1))
            .collect();
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        validate(&self.entries, self.modes, &self.config)
    }

    /// Locks the entries. The only way `confirmed` becomes true.
    pub fn confirm(&mut self) -> Result<(), RegistryError> {
        self.validate()?;
        self.modes.confirmed = true;
        tracing::info!(entries = self.entries.valid_count(), "entries confirmed");
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.modes.confirmed = false;
    }

    /// Picks a winner. Returns immediately; revealing it is up to the caller.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SpinResult, RegistryError> {
        self.validate()?;
        if !self.modes.confirmed {
            return Err(RegistryError::NotConfirmed);
        }
        let valid = self.valid_entries();
        let equal = self.modes.equal_weights();
        let winner = select_winner_with(&valid, equal, rng)?;
        let segment = wheel::map_winner_to_angle(&valid, winner.index, equal)?;
        tracing::info!(winner = %winner.entry.name, index = winner.index, "spin selected winner");
        Ok(SpinResult {
            winner,
            segment,
            signature: signature(&valid),
        })
    }

    /// Spins and records the outcome in `history`.
    pub fn spin_recorded<R, S>(
        &self,
        rng: &mut R,
        history: &mut HistoryStore<S>,
    ) -> Result<SpinResult, RegistryError>
    where
        R: Rng + ?Sized,
        S: HistoryStorage,
    {
        let result = self.spin(rng)?;
        history.record(&result.signature, &result.winner.entry.name);
        Ok(result)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RegistryError> {
        self.ensure_unlocked()?;
        self.entries.as_mut_slice().shuffle(rng);
        Ok(())
    }

    pub fn sort(&mut self) -> Result<(), RegistryError> {
        self.ensure_unlocked()?;
        self.entries.sort_by_name();
        Ok(())
    }

    /// Appends one entry typed into the single entry input. Any `:weight`
    /// suffix is dropped; the entry always weighs 1.
    pub fn add_single_entry(&mut self, text: &str) -> Result<(), RegistryError> {
        if self.is_at_capacity() {
            return Err(RegistryError::AtCapacity {
                max: self.config.max_entries,
            });
        }
        self.ensure_unlocked()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyInput);
        }
        let name = match trimmed.split_once(':') {
            Some((name, _)) => name.trim(),
            None => trimmed,
        };
        if name.is_empty() {
            return Err(RegistryError::EmptyInput);
        }
        self.entries.push(Entry::new(name, 1));
        Ok(())
    }

    pub fn delete_entry(&mut self, index: usize) -> Result<Entry, RegistryError> {
        self.ensure_unlocked()?;
        let len = self.entries.len();
        self.entries
            .remove(index)
            .ok_or(RegistryError::IndexOutOfRange { index, len })
    }
}
