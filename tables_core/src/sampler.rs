//! Weighted categorical sampling
//!
//! Every generator draws through these primitives. Raw slices are checked on
//! every call; `Distribution` and friends are checked once when a table is
//! loaded and cannot fail afterwards.

use crate::SampleError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A value with its relative selection weight.
///
/// Weights of zero or below are allowed in data but are never selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedOption<T> {
    pub value: T,
    pub weight: i32,
}

impl<T> WeightedOption<T> {
    pub fn new(value: T, weight: i32) -> Self {
        WeightedOption { value, weight }
    }
}

/// Pick uniformly from `options`
pub fn pick_one_of<'a, T, R: Rng>(
    options: &'a [T],
    rng: &mut R,
) -> Result<&'a T, SampleError> {
    if options.is_empty() {
        return Err(SampleError::EmptyDistribution);
    }
    Ok(&options[rng.gen_range(0..options.len())])
}

/// Pick from `pairs` with probability proportional to weight.
///
/// Draws a real in `[0, total)` and walks the cumulative weights in input
/// order, returning the first value whose running sum exceeds the draw.
pub fn pick_one_of_compact<'a, T, R: Rng>(
    pairs: &'a [WeightedOption<T>],
    rng: &mut R,
) -> Result<&'a T, SampleError> {
    let total = live_total(pairs.iter().map(|p| p.weight));
    if total <= 0 {
        return Err(SampleError::EmptyDistribution);
    }

    let draw = rng.gen::<f64>() * total as f64;
    let idx = select_index(pairs.iter().map(|p| p.weight), draw)
        .or_else(|| last_live(pairs.iter().map(|p| p.weight)))
        .ok_or(SampleError::EmptyDistribution)?;
    Ok(&pairs[idx].value)
}

fn live_total(weights: impl Iterator<Item = i32>) -> i64 {
    weights.filter(|&w| w > 0).map(i64::from).sum()
}

fn select_index(weights: impl Iterator<Item = i32>, draw: f64) -> Option<usize> {
    let mut cumulative = 0i64;
    for (i, w) in weights.enumerate() {
        if w <= 0 {
            continue;
        }
        cumulative += i64::from(w);
        if cumulative as f64 > draw {
            return Some(i);
        }
    }
    None
}

fn last_live(weights: impl Iterator<Item = i32>) -> Option<usize> {
    weights
        .enumerate()
        .filter(|&(_, w)| w > 0)
        .map(|(i, _)| i)
        .last()
}

/// A checked, non-empty weighted distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<T> {
    options: Vec<WeightedOption<T>>,
    total: i64,
    /// Index of the last selectable option, used when float rounding lands
    /// the draw exactly on the total
    fallback: usize,
}

impl<T> Distribution<T> {
    /// Build a distribution, rejecting empty or zero-total input
    pub fn new(options: Vec<WeightedOption<T>>) -> Result<Self, SampleError> {
        let total = live_total(options.iter().map(|o| o.weight));
        let fallback = last_live(options.iter().map(|o| o.weight));
        match fallback {
            Some(fallback) if total > 0 => Ok(Distribution {
                options,
                total,
                fallback,
            }),
            _ => Err(SampleError::EmptyDistribution),
        }
    }

    /// A distribution that always yields `value`
    pub fn fixed(value: T) -> Self {
        Distribution {
            options: vec![WeightedOption::new(value, 1)],
            total: 1,
            fallback: 0,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        let draw = rng.gen::<f64>() * self.total as f64;
        let idx = select_index(self.options.iter().map(|o| o.weight), draw)
            .unwrap_or(self.fallback);
        &self.options[idx].value
    }

    pub fn options(&self) -> &[WeightedOption<T>] {
        &self.options
    }

    pub fn total_weight(&self) -> i64 {
        self.total
    }

    /// Probability of drawing the option at `index`
    pub fn probability(&self, index: usize) -> f64 {
        self.options
            .get(index)
            .map(|o| o.weight.max(0) as f64 / self.total as f64)
            .unwrap_or(0.0)
    }
}

/// Weighted options plus a weighted chance of drawing nothing
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalTable<T> {
    inner: Distribution<Option<T>>,
}

impl<T> OptionalTable<T> {
    pub fn new(none_weight: i32, options: Vec<WeightedOption<T>>) -> Result<Self, SampleError> {
        let mut all: Vec<WeightedOption<Option<T>>> = options
            .into_iter()
            .map(|o| WeightedOption::new(Some(o.value), o.weight))
            .collect();
        all.push(WeightedOption::new(None, none_weight));
        Ok(OptionalTable {
            inner: Distribution::new(all)?,
        })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        self.inner.sample(rng).as_ref()
    }

    /// Every value that can be drawn, in table order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.inner.options().iter().filter_map(|o| o.value.as_ref())
    }

    /// Chance of drawing nothing
    pub fn none_probability(&self) -> f64 {
        self.inner.probability(self.inner.options().len() - 1)
    }
}

/// Inclusive count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub fn new(min: u32, max: u32) -> Result<Self, String> {
        if min > max {
            return Err(format!("count range [{}, {}] is inverted", min, max));
        }
        Ok(CountRange { min, max })
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

/// Weighted count ranges; the chosen range is then rolled uniformly
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityTable {
    ranges: Distribution<CountRange>,
}

impl QuantityTable {
    pub fn new(ranges: Vec<WeightedOption<CountRange>>) -> Result<Self, SampleError> {
        Ok(QuantityTable {
            ranges: Distribution::new(ranges)?,
        })
    }

    /// Non-zero with probability `chance_in_hundred` percent, otherwise zero
    pub fn rare(chance_in_hundred: i32, count: u32) -> Self {
        let ranges = vec![
            WeightedOption::new(CountRange { min: 0, max: 0 }, 100 - chance_in_hundred),
            WeightedOption::new(
                CountRange {
                    min: count,
                    max: count,
                },
                chance_in_hundred,
            ),
        ];
        match Distribution::new(ranges) {
            Ok(ranges) => QuantityTable { ranges },
            Err(_) => QuantityTable {
                ranges: Distribution::fixed(CountRange { min: 0, max: 0 }),
            },
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        self.ranges.sample(rng).roll(rng)
    }
}
