//! Subset enumeration over roster indices
//!
//! Splits are represented as `u64` bitmasks where bit `i` set means roster
//! index `i` plays for Team A.

/// Bitmask with the lowest `n` bits set
pub fn full_mask(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Roster indices set in `mask`, ascending
pub fn members(mask: u64) -> impl Iterator<Item = usize> {
    (0..64).filter(move |i| mask & (1u64 << i) != 0)
}

/// Iterator over every `k`-element subset of `0..n` in lexicographic index
/// order, yielded as bitmasks.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    /// Indices are shifted by this amount before building the mask
    offset: usize,
    /// Bits always present in yielded masks
    fixed: u64,
    exhausted: bool,
    started: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            offset: 0,
            fixed: 0,
            exhausted: k > n,
            started: false,
        }
    }

    /// Every `k`-element subset of `0..n` that contains index 0, in
    /// lexicographic order
    pub fn containing_first(n: usize, k: usize) -> Self {
        if n == 0 || k == 0 {
            let mut empty = Self::new(0, 1);
            empty.exhausted = true;
            return empty;
        }
        Self {
            n: n - 1,
            indices: (0..k - 1).collect(),
            offset: 1,
            fixed: 1,
            exhausted: k > n,
            started: false,
        }
    }

    fn current_mask(&self) -> u64 {
        self.indices
            .iter()
            .fold(self.fixed, |mask, &i| mask | (1u64 << (i + self.offset)))
    }

    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Combinations {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        if self.started && !self.advance() {
            self.exhausted = true;
            return None;
        }
        self.started = true;
        Some(self.current_mask())
    }
}

/// Binomial coefficient, saturating at `u64::MAX`
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result is C(n, i) before this multiply
        result = match result.checked_mul((n - i) as u128) {
            Some(product) => product / (i as u128 + 1),
            None => return u64::MAX,
        };
    }
    u64::try_from(result).unwrap_or(u64::MAX)
}
