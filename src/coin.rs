use chrono::{
    DateTime,
    Utc,
};
use rand::Rng;
use std::{
    collections::VecDeque,
    fmt,
    time::Duration,
};

pub const MAX_RECENT_RESULTS: usize = 5;
pub const FLIP_DURATION: Duration = Duration::from_millis(3_000);
/// Store key for the fast mode preference.
pub const FAST_MODE_KEY: &str = "isFastModeEnabled";
/// Store key for the autoflip preference.
pub const AUTOFLIP_KEY: &str = "isAutoflipEnabled";
/// Time between automatic flips while autoflip is on.
pub const AUTOFLIP_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    #[default]
    Heads,
    Tails,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Heads => Side::Tails,
            Side::Tails => Side::Heads,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Heads => "Heads",
            Side::Tails => "Tails",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipRecord {
    pub side: Side,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipOutcome {
    pub side: Side,
    pub prediction: Side,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Streak {
    pub side: Side,
    pub length: u32,
}

/// Running tally for the coin flip game.
#[derive(Clone, Debug, Default)]
pub struct CoinFlip {
    total: u64,
    heads: u64,
    tails: u64,
    streak: Option<Streak>,
    prediction: Side,
    correct: u64,
    incorrect: u64,
    recent: VecDeque<FlipRecord>,
    fast_mode: bool,
    autoflip: bool,
}

impl CoinFlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tosses the coin and records the side. The prediction is scored
    /// separately by [`CoinFlip::score`] once the result is shown.
    pub fn flip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Side {
        let side = if rng.random_bool(0.5) {
            Side::Heads
        } else {
            Side::Tails
        };
        self.record(side, Utc::now());
        side
    }

    /// Folds one result into the counts, streak and recent list.
    pub fn record(&mut self, side: Side, at: DateTime<Utc>) {
        self.total += 1;
        match side {
            Side::Heads => self.heads += 1,
            Side::Tails => self.tails += 1,
        }
        self.streak = match self.streak {
            Some(s) if s.side == side => Some(Streak {
                side,
                length: s.length + 1,
            }),
            _ => Some(Streak { side, length: 1 }),
        };
        self.recent.push_front(FlipRecord { side, at });
        self.recent.truncate(MAX_RECENT_RESULTS);
        tracing::debug!(%side, total = self.total, "coin flipped");
    }

    /// Checks `side` against the prediction held right now.
    pub fn score(&mut self, side: Side) -> FlipOutcome {
        let correct = self.prediction == side;
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        FlipOutcome {
            side,
            prediction: self.prediction,
            correct,
        }
    }

    pub fn predict(&mut self, side: Side) {
        self.prediction = side;
    }

    pub fn prediction(&self) -> Side {
        self.prediction
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, side: Side) -> u64 {
        match side {
            Side::Heads => self.heads,
            Side::Tails => self.tails,
        }
    }

    pub fn percentage(&self, side: Side) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(side) as f64 / self.total as f64 * 100.0
    }

    pub fn streak(&self) -> Option<Streak> {
        self.streak
    }

    pub fn correct_predictions(&self) -> u64 {
        self.correct
    }

    pub fn incorrect_predictions(&self) -> u64 {
        self.incorrect
    }

    /// Correct predictions as a score out of 100.
    pub fn luck_score(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// Newest first.
    pub fn recent(&self) -> impl Iterator<Item = &FlipRecord> {
        self.recent.iter()
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn set_fast_mode(&mut self, on: bool) {
        self.fast_mode = on;
    }

    pub fn autoflip(&self) -> bool {
        self.autoflip
    }

    pub fn set_autoflip(&mut self, on: bool) {
        self.autoflip = on;
    }

    /// How long the front end waits before showing a result.
    pub fn reveal_delay(&self) -> Duration {
        if self.fast_mode {
            Duration::ZERO
        } else {
            FLIP_DURATION
        }
    }
}

/// Short relative label such as "12 seconds ago".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    if seconds < 60 {
        format!("{seconds} seconds ago")
    } else if seconds < 3600 {
        format!("{} min ago", seconds / 60)
    } else {
        format!("{} hour ago", seconds / 3600)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use chrono::TimeDelta;
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    #[test]
    fn record__tracks_counts_and_streaks() {
        // given
        let mut coin = CoinFlip::new();
        let now = Utc::now();

        // when
        for side in [Side::Heads, Side::Heads, Side::Tails, Side::Tails, Side::Tails] {
            coin.record(side, now);
        }

        // then
        assert_eq!(coin.total(), 5);
        assert_eq!(coin.count(Side::Heads), 2);
        assert_eq!(coin.percentage(Side::Tails), 60.0);
        assert_eq!(
            coin.streak(),
            Some(Streak {
                side: Side::Tails,
                length: 3
            })
        );
    }

    #[test]
    fn score__checks_current_prediction() {
        let mut coin = CoinFlip::new();
        let now = Utc::now();

        coin.predict(Side::Tails);
        for side in [Side::Tails, Side::Heads, Side::Tails] {
            coin.record(side, now);
        }
        let hit = coin.score(Side::Tails);
        let miss = coin.score(Side::Heads);
        coin.score(Side::Tails);

        assert!(hit.correct);
        assert!(!miss.correct);
        assert_eq!(coin.correct_predictions(), 2);
        assert_eq!(coin.incorrect_predictions(), 1);
        assert_eq!(coin.luck_score(), 67);
    }

    #[test]
    fn recent__keeps_newest_five() {
        let mut coin = CoinFlip::new();
        let start = Utc::now();

        for i in 0..7 {
            let side = if i % 2 == 0 { Side::Heads } else { Side::Tails };
            coin.record(side, start + TimeDelta::seconds(i));
        }

        let recent: Vec<_> = coin.recent().collect();
        assert_eq!(recent.len(), MAX_RECENT_RESULTS);
        assert_eq!(recent[0].at, start + TimeDelta::seconds(6));
        assert_eq!(recent[0].side, Side::Heads);
    }

    #[test]
    fn flip__is_roughly_fair() {
        let mut coin = CoinFlip::new();
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..10_000 {
            coin.flip(&mut rng);
        }

        assert!((coin.percentage(Side::Heads) - 50.0).abs() < 2.0);
    }

    #[test]
    fn score__uses_prediction_changed_after_the_toss() {
        // given
        let mut coin = CoinFlip::new();
        let mut rng = StdRng::seed_from_u64(4);
        coin.predict(Side::Heads);
        let side = coin.flip(&mut rng);

        // when
        coin.predict(side);
        let outcome = coin.score(side);

        // then
        assert!(outcome.correct);
        assert_eq!(outcome.prediction, side);
        assert_eq!(coin.correct_predictions(), 1);
        assert_eq!(coin.luck_score(), 100);
    }

    #[test]
    fn luck_score__counts_unscored_flips_in_the_total() {
        let mut coin = CoinFlip::new();
        let now = Utc::now();
        coin.record(Side::Heads, now);
        coin.score(Side::Heads);

        coin.record(Side::Tails, now);

        assert_eq!(coin.luck_score(), 50);
    }

    #[test]
    fn reveal_delay__is_zero_in_fast_mode() {
        let mut coin = CoinFlip::new();
        assert_eq!(coin.reveal_delay(), FLIP_DURATION);

        coin.set_fast_mode(true);

        assert_eq!(coin.reveal_delay(), Duration::ZERO);
    }

    #[test]
    fn time_ago__picks_unit() {
        let now = Utc::now();

        assert_eq!(time_ago(now - TimeDelta::seconds(12), now), "12 seconds ago");
        assert_eq!(time_ago(now - TimeDelta::seconds(125), now), "2 min ago");
        assert_eq!(time_ago(now - TimeDelta::seconds(7300), now), "2 hour ago");
    }
}
