//! Discretisation of real filtration values into integer indices.
//!
//! The engine only ever compares integer indices; converters are how the
//! geometric constructions map distances onto them and back.

/// Maps real filtration values to integer indices and back.
pub trait FiltrationConverter {
    /// Index at which an element with the given real value enters.
    fn filtration_index(&self, value: f64) -> usize;

    /// Representative real value of an index.
    fn filtration_value(&self, index: usize) -> f64;
}

/// Uniform grid of `num_divisions` steps over `[0, max_filtration_value]`.
///
/// A value `d` enters at `ceil(d / max * num_divisions)`, so index `k`
/// collects everything in `((k - 1) * step, k * step]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncreasingLinearConverter {
    num_divisions: usize,
    max_filtration_value: f64,
}

impl IncreasingLinearConverter {
    pub fn new(num_divisions: usize, max_filtration_value: f64) -> Self {
        Self {
            num_divisions: num_divisions.max(1),
            max_filtration_value,
        }
    }

    pub fn num_divisions(&self) -> usize {
        self.num_divisions
    }

    pub fn max_filtration_value(&self) -> f64 {
        self.max_filtration_value
    }

    pub fn step(&self) -> f64 {
        self.max_filtration_value / self.num_divisions as f64
    }
}

impl FiltrationConverter for IncreasingLinearConverter {
    fn filtration_index(&self, value: f64) -> usize {
        if self.max_filtration_value <= 0.0 || value <= 0.0 {
            return 0;
        }
        let step = (value / self.max_filtration_value * self.num_divisions as f64).ceil() as usize;
        step.min(self.num_divisions)
    }

    fn filtration_value(&self, index: usize) -> f64 {
        self.max_filtration_value * (index as f64) / (self.num_divisions as f64)
    }
}

/// Identity-like converter: the value is the index, rounded up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerConverter;

impl FiltrationConverter for IntegerConverter {
    fn filtration_index(&self, value: f64) -> usize {
        if value <= 0.0 {
            0
        } else {
            value.ceil() as usize
        }
    }

    fn filtration_value(&self, index: usize) -> f64 {
        index as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_grid_rounds_up() {
        let c = IncreasingLinearConverter::new(10, 2.0);
        assert_eq!(c.filtration_index(0.0), 0);
        assert_eq!(c.filtration_index(0.2), 1);
        assert_eq!(c.filtration_index(0.21), 2);
        assert_eq!(c.filtration_index(2.0), 10);
        // values beyond the range are clamped to the last step
        assert_eq!(c.filtration_index(7.0), 10);
        assert!((c.filtration_value(5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn index_value_consistency() {
        let c = IncreasingLinearConverter::new(8, 2.0);
        for k in 0..=8 {
            assert_eq!(c.filtration_index(c.filtration_value(k)), k);
        }
    }
}
