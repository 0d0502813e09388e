use crate::{
    entry::Entry,
    error::RegistryError,
};
use rand::Rng;

/// The entry picked by a spin and its position among the valid entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Winner {
    pub index: usize,
    pub entry: Entry,
}

/// Weight used for selection and layout. Single-entry mode ignores stored weights.
pub fn effective_weight(entry: &Entry, equal_weights: bool) -> u32 {
    if equal_weights { 1 } else { entry.weight }
}

pub fn total_weight(entries: &[Entry], equal_weights: bool) -> u32 {
    entries
        .iter()
        .map(|e| effective_weight(e, equal_weights))
        .sum()
}

/// Picks the entry whose cumulative weight first exceeds `draw`.
///
/// `draw` must lie in `[0, total)`; callers normally obtain it through
/// [`select_winner_with`]. The same entries and draw always give the same
/// winner.
pub fn select_winner(
    entries: &[Entry],
    equal_weights: bool,
    draw: f64,
) -> Result<Winner, RegistryError> {
    let total = total_weight(entries, equal_weights);
    if entries.is_empty() || total == 0 {
        return Err(RegistryError::EmptySelection);
    }
    if !(0.0..f64::from(total)).contains(&draw) {
        tracing::error!(draw, total, "draw outside of the weight range");
        return Err(RegistryError::EmptySelection);
    }
    let mut cumulative = 0.0;
    for (index, entry) in entries.iter().enumerate() {
        cumulative += f64::from(effective_weight(entry, equal_weights));
        if draw < cumulative {
            return Ok(Winner {
                index,
                entry: entry.clone(),
            });
        }
    }
    Err(RegistryError::EmptySelection)
}

/// Draws uniformly from `[0, total)` and selects the winner.
pub fn select_winner_with<R: Rng + ?Sized>(
    entries: &[Entry],
    equal_weights: bool,
    rng: &mut R,
) -> Result<Winner, RegistryError> {
    let total = total_weight(entries, equal_weights);
    if entries.is_empty() || total == 0 {
        return Err(RegistryError::EmptySelection);
    }
    let draw = rng.random_range(0.0..f64::from(total));
    select_winner(entries, equal_weights, draw)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use proptest::prelude::*;
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    fn abc() -> Vec<Entry> {
        vec![Entry::new("A", 1), Entry::new("B", 1), Entry::new("C", 2)]
    }

    #[test]
    fn select_winner__fixed_draw_is_deterministic() {
        let entries = abc();

        let cases = [(0.5, "A", 0), (1.5, "B", 1), (3.9, "C", 2)];

        for (draw, name, index) in cases {
            let winner = select_winner(&entries, false, draw).unwrap();
            assert_eq!(winner.entry.name, name, "draw {draw}");
            assert_eq!(winner.index, index);
        }
    }

    #[test]
    fn select_winner__boundary_draw_goes_to_next_entry() {
        let winner = select_winner(&abc(), false, 1.0).unwrap();

        assert_eq!(winner.entry.name, "B");
    }

    #[test]
    fn select_winner__equal_weights_ignore_stored_weight() {
        // given total 3 once every weight counts as 1
        let entries = abc();

        // when
        let winner = select_winner(&entries, true, 2.5).unwrap();

        // then
        assert_eq!(winner.entry.name, "C");
        assert_eq!(
            select_winner(&entries, true, 3.5),
            Err(RegistryError::EmptySelection)
        );
    }

    #[test]
    fn select_winner__empty_or_zero_weight_is_rejected() {
        assert_eq!(
            select_winner(&[], false, 0.0),
            Err(RegistryError::EmptySelection)
        );
        let zeros = vec![Entry::new("A", 0), Entry::new("B", 0)];
        assert_eq!(
            select_winner(&zeros, false, 0.0),
            Err(RegistryError::EmptySelection)
        );
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_winner_with(&zeros, false, &mut rng),
            Err(RegistryError::EmptySelection)
        );
    }

    #[test]
    fn select_winner_with__converges_to_weights() {
        // given
        let entries = vec![Entry::new("A", 10), Entry::new("B", 90)];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let draws = 100_000;

        // when
        let b_wins = (0..draws)
            .filter(|_| {
                select_winner_with(&entries, false, &mut rng)
                    .unwrap()
                    .entry
                    .name
                    == "B"
            })
            .count();

        // then
        let ratio = b_wins as f64 / draws as f64;
        assert!((ratio - 0.90).abs() < 0.02, "observed {ratio}");
    }

    proptest! {
        #[test]
        fn select_winner__winner_has_positive_weight(
            weights in prop::collection::vec(0u32..=100, 1..10),
            fraction in 0.0f64..1.0,
        ) {
            let entries: Vec<Entry> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| Entry::new(format!("e{i}"), *w))
                .collect();
            let total = total_weight(&entries, false);
            prop_assume!(total > 0);

            let winner = select_winner(&entries, false, fraction * f64::from(total)).unwrap();

            prop_assert!(winner.entry.weight > 0);
            prop_assert_eq!(&entries[winner.index], &winner.entry);
        }
    }
}
