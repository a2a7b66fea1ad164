//! Barcodes: per-dimension lists of persistence intervals.
//!
//! Endpoints are filtration indices. A missing endpoint is infinite, so an
//! interval is finite `[start, end)`, right-infinite `[start, ∞)` (essential
//! classes in ordinary homology) or left-infinite `(-∞, end]` (essential
//! classes under duality extraction).
//!
//! ## Summaries
//!
//! - Betti number at index `t`: number of intervals alive at `t`
//! - Total persistence: sum of finite interval lengths
//! - Persistence entropy: `H = -Σ pᵢ ln pᵢ` with `pᵢ = ℓᵢ / Σ ℓⱼ` over
//!   finite intervals of positive length `ℓᵢ`

use std::collections::BTreeMap;
use std::fmt;

use crate::topology::FiltrationConverter;

/// An interval of filtration indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistenceInterval {
    start: Option<usize>,
    end: Option<usize>,
}

impl PersistenceInterval {
    pub fn finite(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn right_infinite(start: usize) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn left_infinite(end: usize) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Birth index, `None` when left-infinite.
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Death index, `None` when right-infinite.
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    pub fn is_right_infinite(&self) -> bool {
        self.end.is_none()
    }

    pub fn is_left_infinite(&self) -> bool {
        self.start.is_none()
    }

    /// `end - start` for finite intervals.
    pub fn length(&self) -> Option<usize> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    /// Whether the class is alive at `index`: `start <= index < end`, with
    /// the left-infinite case closed at `end`.
    pub fn contains(&self, index: usize) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= index && index < end,
            (Some(start), None) => start <= index,
            (None, Some(end)) => index <= end,
            (None, None) => true,
        }
    }

    /// Endpoints mapped to real filtration values; infinite ends become
    /// `±f64::INFINITY`.
    pub fn to_filtration_values<C: FiltrationConverter + ?Sized>(&self, converter: &C) -> (f64, f64) {
        let start = self
            .start
            .map_or(f64::NEG_INFINITY, |s| converter.filtration_value(s));
        let end = self.end.map_or(f64::INFINITY, |e| converter.filtration_value(e));
        (start, end)
    }
}

impl fmt::Display for PersistenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "[{start}, {end})"),
            (Some(start), None) => write!(f, "[{start}, infinity)"),
            (None, Some(end)) => write!(f, "(-infinity, {end}]"),
            (None, None) => write!(f, "(-infinity, infinity)"),
        }
    }
}

/// Intervals grouped by homological dimension, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarcodeCollection {
    barcodes: BTreeMap<usize, Vec<PersistenceInterval>>,
}

impl BarcodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dimension: usize, interval: PersistenceInterval) {
        self.barcodes.entry(dimension).or_default().push(interval);
    }

    pub fn add_interval(&mut self, dimension: usize, start: usize, end: usize) {
        self.add(dimension, PersistenceInterval::finite(start, end));
    }

    pub fn add_right_infinite_interval(&mut self, dimension: usize, start: usize) {
        self.add(dimension, PersistenceInterval::right_infinite(start));
    }

    pub fn add_left_infinite_interval(&mut self, dimension: usize, end: usize) {
        self.add(dimension, PersistenceInterval::left_infinite(end));
    }

    /// Intervals in `dimension`; empty if none were recorded.
    pub fn intervals(&self, dimension: usize) -> &[PersistenceInterval] {
        self.barcodes.get(&dimension).map_or(&[], Vec::as_slice)
    }

    /// Dimensions that carry at least one interval, ascending.
    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.barcodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PersistenceInterval)> + '_ {
        self.barcodes
            .iter()
            .flat_map(|(&d, intervals)| intervals.iter().map(move |i| (d, i)))
    }

    /// Total number of intervals over all dimensions.
    pub fn len(&self) -> usize {
        self.barcodes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intervals of `dimension` alive at `index`.
    pub fn betti_number(&self, dimension: usize, index: usize) -> usize {
        self.intervals(dimension)
            .iter()
            .filter(|i| i.contains(index))
            .count()
    }

    /// Betti numbers at `index` for every recorded dimension.
    pub fn betti_numbers(&self, index: usize) -> BTreeMap<usize, usize> {
        self.dimensions()
            .map(|d| (d, self.betti_number(d, index)))
            .collect()
    }

    /// Sum of finite interval lengths in `dimension`.
    pub fn total_persistence(&self, dimension: usize) -> usize {
        self.intervals(dimension).iter().filter_map(|i| i.length()).sum()
    }

    /// Shannon entropy of the normalised finite lifetimes in `dimension`.
    pub fn persistence_entropy(&self, dimension: usize) -> f64 {
        let lifetimes: Vec<f64> = self
            .intervals(dimension)
            .iter()
            .filter_map(|i| i.length())
            .filter(|&l| l > 0)
            .map(|l| l as f64)
            .collect();

        let total: f64 = lifetimes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }

        lifetimes
            .iter()
            .map(|l| l / total)
            .filter(|&p| p > 0.0)
            .map(|p| -p * p.ln())
            .sum()
    }

    /// Intervals of `dimension` as `(birth, death)` filtration values.
    pub fn to_filtration_values<C: FiltrationConverter + ?Sized>(
        &self,
        dimension: usize,
        converter: &C,
    ) -> Vec<(f64, f64)> {
        self.intervals(dimension)
            .iter()
            .map(|i| i.to_filtration_values(converter))
            .collect()
    }
}

impl fmt::Display for BarcodeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dimension, intervals) in &self.barcodes {
            writeln!(f, "Dimension: {dimension}")?;
            for interval in intervals {
                writeln!(f, "{interval}")?;
            }
        }
        Ok(())
    }
}

/// An interval together with a chain that represents its class.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedInterval<G> {
    pub interval: PersistenceInterval,
    pub generator: G,
}

/// Barcodes whose intervals carry representative chains.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedBarcodeCollection<G> {
    barcodes: BTreeMap<usize, Vec<AugmentedInterval<G>>>,
}

impl<G> Default for AugmentedBarcodeCollection<G> {
    fn default() -> Self {
        Self {
            barcodes: BTreeMap::new(),
        }
    }
}

impl<G> AugmentedBarcodeCollection<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dimension: usize, interval: PersistenceInterval, generator: G) {
        self.barcodes
            .entry(dimension)
            .or_default()
            .push(AugmentedInterval { interval, generator });
    }

    pub fn add_interval(&mut self, dimension: usize, start: usize, end: usize, generator: G) {
        self.add(dimension, PersistenceInterval::finite(start, end), generator);
    }

    pub fn add_right_infinite_interval(&mut self, dimension: usize, start: usize, generator: G) {
        self.add(dimension, PersistenceInterval::right_infinite(start), generator);
    }

    pub fn add_left_infinite_interval(&mut self, dimension: usize, end: usize, generator: G) {
        self.add(dimension, PersistenceInterval::left_infinite(end), generator);
    }

    pub fn intervals(&self, dimension: usize) -> &[AugmentedInterval<G>] {
        self.barcodes.get(&dimension).map_or(&[], Vec::as_slice)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = usize> + '_ {
        self.barcodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &AugmentedInterval<G>)> + '_ {
        self.barcodes
            .iter()
            .flat_map(|(&d, intervals)| intervals.iter().map(move |i| (d, i)))
    }

    pub fn len(&self) -> usize {
        self.barcodes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the representatives.
    pub fn to_barcode_collection(&self) -> BarcodeCollection {
        let mut barcodes = BarcodeCollection::new();
        for (dimension, augmented) in self.iter() {
            barcodes.add(dimension, augmented.interval);
        }
        barcodes
    }
}

impl<G: fmt::Display> fmt::Display for AugmentedBarcodeCollection<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dimension, intervals) in &self.barcodes {
            writeln!(f, "Dimension: {dimension}")?;
            for augmented in intervals {
                writeln!(f, "{}: {}", augmented.interval, augmented.generator)?;
            }
        }
        Ok(())
    }
}
