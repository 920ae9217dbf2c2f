//! Uniform random selection over a parsed list.
//!
//! Every call draws an independent sample from the full list, so "pick again"
//! can return the same item twice in a row.
//!
//! The [`Selector`] owns its random number generator. Production code uses the
//! thread-local generator via [`Selector::new`]; tests inject a seeded
//! [`StdRng`](rand::rngs::StdRng) through [`Selector::with_rng`].

use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::spin::{SpinFrame, SpinReel, SpinSchedule};
use crate::types::{Decision, ParsedList};

/// Errors raised when a pick is requested without anything to pick from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Selection was attempted on an empty sequence.
    #[error("cannot pick from an empty list")]
    Empty,
}

/// Picks items uniformly at random.
#[derive(Debug, Clone)]
pub struct Selector<R = ThreadRng> {
    rng: R,
}

impl Selector<ThreadRng> {
    /// Creates a selector backed by the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for Selector<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Selector<R> {
    /// Creates a selector with a caller-supplied generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use decider::selector::Selector;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut selector = Selector::with_rng(StdRng::seed_from_u64(7));
    /// let items = ["Pizza", "Sushi", "Burgers"];
    /// assert!(items.contains(selector.pick(&items).unwrap()));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draws an index in `0..len`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Empty`] when `len` is zero.
    pub fn pick_index(&mut self, len: usize) -> std::result::Result<usize, SelectionError> {
        if len == 0 {
            return Err(SelectionError::Empty);
        }
        Ok(self.rng.random_range(0..len))
    }

    /// Picks one element of `items`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Empty`] when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> std::result::Result<&'a T, SelectionError> {
        let index = self.pick_index(items.len())?;
        Ok(&items[index])
    }

    /// Validates `list`, picks an item and records the outcome as a [`Decision`].
    ///
    /// # Errors
    ///
    /// Returns [`DeciderError::Validation`](crate::DeciderError::Validation)
    /// when the list has fewer than two items.
    pub fn decide(&mut self, list: &ParsedList) -> Result<Decision> {
        list.validate()?;
        let selected = self.pick(&list.items)?.clone();

        debug!(
            selected = %selected,
            total_items = list.len(),
            "Item picked"
        );

        Ok(Decision::new(selected, list.len(), list.title.clone()))
    }

    /// Runs a decelerating reel over `len` items.
    ///
    /// Each frame, including the final one, is an independent uniform draw.
    /// The final frame is the pick.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Empty`] when `len` is zero.
    pub fn spin(
        &mut self,
        len: usize,
        schedule: &SpinSchedule,
    ) -> std::result::Result<SpinReel, SelectionError> {
        if len == 0 {
            return Err(SelectionError::Empty);
        }

        let mut frames = Vec::with_capacity(schedule.total_frames());
        for phase in schedule.phases() {
            for _ in 0..phase.frames {
                frames.push(SpinFrame {
                    index: self.rng.random_range(0..len),
                    delay: phase.interval,
                });
            }
        }

        let selected = self.rng.random_range(0..len);
        Ok(SpinReel { frames, selected })
    }
}

/// Picks one element of `items` using the thread-local generator.
///
/// # Errors
///
/// Returns [`SelectionError::Empty`] when `items` is empty.
pub fn pick<T>(items: &[T]) -> std::result::Result<&T, SelectionError> {
    Selector::new().pick(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeciderError;
    use crate::parser::parse_list;
    use crate::types::ValidationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> Selector<StdRng> {
        Selector::with_rng(StdRng::seed_from_u64(42))
    }

    #[test]
    fn pick_on_empty_is_error() {
        let empty: [&str; 0] = [];
        assert_eq!(seeded().pick(&empty), Err(SelectionError::Empty));
        assert_eq!(pick(&empty), Err(SelectionError::Empty));
    }

    #[test]
    fn pick_index_on_zero_is_error() {
        assert_eq!(seeded().pick_index(0), Err(SelectionError::Empty));
    }

    #[test]
    fn pick_returns_member() {
        let items = ["Pizza", "Sushi", "Burgers"];
        let mut selector = seeded();
        for _ in 0..100 {
            assert!(items.contains(selector.pick(&items).unwrap()));
        }
    }

    #[test]
    fn pick_single_item_always_returns_it() {
        let items = ["Only"];
        assert_eq!(*seeded().pick(&items).unwrap(), "Only");
    }

    #[test]
    fn pick_is_roughly_uniform() {
        const TRIALS: usize = 10_000;
        let items = ["A", "B", "C"];
        let mut counts = [0usize; 3];
        let mut selector = seeded();

        for _ in 0..TRIALS {
            let index = selector.pick_index(items.len()).unwrap();
            counts[index] += 1;
        }

        // Expected 3333 each; sd ~47, so +/-300 is well over 6 sigma.
        for count in counts {
            assert!(
                (3033..=3633).contains(&count),
                "count {count} outside tolerance: {counts:?}"
            );
        }
    }

    #[test]
    fn repeated_picks_can_repeat() {
        let items = ["A", "B"];
        let mut selector = seeded();
        let picks: Vec<&str> = (0..50).map(|_| *selector.pick(&items).unwrap()).collect();

        assert!(picks.windows(2).any(|w| w[0] == w[1]));
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let items = ["A", "B", "C", "D"];
        let mut a = seeded();
        let mut b = seeded();
        for _ in 0..20 {
            assert_eq!(a.pick(&items), b.pick(&items));
        }
    }

    #[test]
    fn decide_builds_decision_from_list() {
        let list = parse_list("Shopping List\n[x] Milk\n[ ] Bread\n[ ] Eggs");
        let decision = seeded().decide(&list).unwrap();

        assert!(list.items.contains(&decision.selected_item));
        assert_eq!(decision.total_items, 2);
        assert_eq!(decision.title.as_deref(), Some("Shopping List"));
    }

    #[test]
    fn decide_rejects_empty_list() {
        let err = seeded().decide(&parse_list("   \n\n  ")).unwrap_err();
        assert!(matches!(
            err,
            DeciderError::Validation(ValidationError::EmptyInput)
        ));
    }

    #[test]
    fn decide_rejects_single_item() {
        let err = seeded().decide(&parse_list("OnlyOneItem")).unwrap_err();
        assert!(matches!(
            err,
            DeciderError::Validation(ValidationError::InsufficientItems { found: 1 })
        ));
    }

    #[test]
    fn spin_follows_schedule() {
        let schedule = SpinSchedule::default();
        let reel = seeded().spin(3, &schedule).unwrap();

        assert_eq!(reel.frames.len(), schedule.total_frames());
        assert!(reel.frames.iter().all(|f| f.index < 3));
        assert!(reel.selected < 3);
    }

    #[test]
    fn spin_on_empty_is_error() {
        assert_eq!(
            seeded().spin(0, &SpinSchedule::default()).unwrap_err(),
            SelectionError::Empty
        );
    }
}
