use crate::fixed::Tenths;

/// Running statistics for one key. The key borrows the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station<'a> {
    key: &'a [u8],
    hash: u32,
    count: u64,
    sum: i64,
    min: Tenths,
    max: Tenths,
}

impl<'a> Station<'a> {
    pub fn new(key: &'a [u8], hash: u32, value: Tenths) -> Self {
        Self {
            key,
            hash,
            count: 1,
            sum: i64::from(value.get()),
            min: value,
            max: value,
        }
    }

    #[inline]
    pub fn add_measurement(&mut self, value: Tenths) {
        self.count += 1;
        self.sum += i64::from(value.get());
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Folds another partial result for the same key into this one.
    pub fn absorb(&mut self, other: &Station<'_>) {
        self.count += other.count;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    pub fn min(&self) -> Tenths {
        self.min
    }

    pub fn max(&self) -> Tenths {
        self.max
    }

    /// Mean in display units (degrees, not tenths).
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64 / 10.0
    }
}
