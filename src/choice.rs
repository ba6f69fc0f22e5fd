//! Frequency-weighted production selection.
//!
//! A [`ChoiceList`] holds productions with positive integer weights and a
//! list-level fallback. Selection draws a uniform index into a precomputed
//! index map in which production `i` appears `freq_i` times, so the draw
//! distribution matches the declared weights exactly. Productions may fail
//! (return nothing); the caller retries the draw, consulting the
//! production-local fallback first, until something is produced. The
//! list-level fallback is reserved for the depth cap, where recursive
//! productions must not run at all.

use rand::{Rng, RngCore};

/// One weighted production.
#[derive(Debug, Clone, Copy)]
pub struct Choice<T> {
    pub freq: u16,
    pub generate: T,
    /// Consulted when `generate` produces nothing (e.g. no matching
    /// variable in scope).
    pub fallback: Option<T>,
}

impl<T> Choice<T> {
    pub fn new(freq: u16, generate: T) -> Self {
        Self {
            freq,
            generate,
            fallback: None,
        }
    }

    pub fn with_fallback(freq: u16, generate: T, fallback: T) -> Self {
        Self {
            freq,
            generate,
            fallback: Some(fallback),
        }
    }
}

/// A weighted production table with a terminal fallback.
#[derive(Debug, Clone)]
pub struct ChoiceList<T> {
    options: Vec<Choice<T>>,
    index_map: Vec<u16>,
    fallback: T,
}

impl<T: Copy> ChoiceList<T> {
    /// Build a list, precomputing the index map.
    ///
    /// # Panics
    ///
    /// Panics when `options` is empty or any weight is zero.
    pub fn new(fallback: T, options: Vec<Choice<T>>) -> Self {
        assert!(!options.is_empty(), "choice list without options");
        let mut index_map = Vec::with_capacity(options.len() * 4);
        for (i, option) in options.iter().enumerate() {
            assert!(option.freq > 0, "choice option {i} has zero weight");
            for _ in 0..option.freq {
                index_map.push(i as u16);
            }
        }
        Self {
            options,
            index_map,
            fallback,
        }
    }

    /// Draw one production according to the declared weights.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Choice<T> {
        self.options[self.pick_index(rng)]
    }

    /// Draw a production index according to the declared weights.
    pub fn pick_index(&self, rng: &mut dyn RngCore) -> usize {
        self.index_map[rng.gen_range(0..self.index_map.len())] as usize
    }

    /// The terminal production used at the recursion depth cap.
    pub fn fallback(&self) -> T {
        self.fallback
    }
}
