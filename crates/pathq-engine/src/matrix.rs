//! Sparse boolean matrices over the OR/AND semiring.
//!
//! Rows are roaring bitmaps of column indices. All arithmetic is boolean:
//! addition is OR, multiplication is AND followed by an OR-reduce.

use roaring::RoaringBitmap;

use pathq_core::{Error, Result};

/// Convert a dimension to the `u32` index space of the rows.
pub fn dimension(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::TooManyStates { states: n as u128 })
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolMatrix {
    rows: Vec<RoaringBitmap>,
    cols: u32,
}

impl BoolMatrix {
    /// All-false `rows × cols` matrix.
    pub fn zeros(rows: u32, cols: u32) -> Self {
        Self {
            rows: vec![RoaringBitmap::new(); rows as usize],
            cols,
        }
    }

    pub fn identity(n: u32) -> Self {
        let mut matrix = Self::zeros(n, n);
        for i in 0..n {
            matrix.set(i, i);
        }
        matrix
    }

    pub fn nrows(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn ncols(&self) -> u32 {
        self.cols
    }

    /// Set entry `(i, j)`. Returns true if it was previously unset.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of range.
    pub fn set(&mut self, i: u32, j: u32) -> bool {
        assert!(j < self.cols, "column {j} out of range ({})", self.cols);
        self.rows[i as usize].insert(j)
    }

    pub fn get(&self, i: u32, j: u32) -> bool {
        self.rows.get(i as usize).is_some_and(|row| row.contains(j))
    }

    pub fn row(&self, i: u32) -> &RoaringBitmap {
        &self.rows[i as usize]
    }

    /// OR `bits` into row `i`.
    pub fn or_row(&mut self, i: u32, bits: &RoaringBitmap) {
        self.rows[i as usize] |= bits;
    }

    /// Number of true entries.
    pub fn nnz(&self) -> u64 {
        self.rows.iter().map(RoaringBitmap::len).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(RoaringBitmap::is_empty)
    }

    /// `self ← self OR other`. Dimensions must agree.
    pub fn or_assign(&mut self, other: &BoolMatrix) {
        debug_assert_eq!(self.nrows(), other.nrows());
        debug_assert_eq!(self.cols, other.cols);
        for (row, other_row) in self.rows.iter_mut().zip(&other.rows) {
            *row |= other_row;
        }
    }

    /// Boolean matrix product `self · other`.
    pub fn mul(&self, other: &BoolMatrix) -> BoolMatrix {
        debug_assert_eq!(self.cols, other.nrows());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut out = RoaringBitmap::new();
                for k in row {
                    out |= &other.rows[k as usize];
                }
                out
            })
            .collect();
        BoolMatrix {
            rows,
            cols: other.cols,
        }
    }

    /// Kronecker product: entry `(i·r2 + k, j·c2 + l)` is set iff `(i, j)`
    /// is set in `self` and `(k, l)` in `other`.
    ///
    /// Callers must check that the product dimensions fit in `u32`.
    pub fn kron(&self, other: &BoolMatrix) -> BoolMatrix {
        let r2 = other.nrows();
        let c2 = other.cols;
        let mut result = BoolMatrix::zeros(self.nrows() * r2, self.cols * c2);
        for (i, row) in self.rows.iter().enumerate() {
            for j in row {
                for (k, other_row) in other.rows.iter().enumerate() {
                    let target = &mut result.rows[i * r2 as usize + k];
                    target.extend(other_row.iter().map(|l| j * c2 + l));
                }
            }
        }
        result
    }

    /// `self AND NOT other`.
    pub fn difference(&self, other: &BoolMatrix) -> BoolMatrix {
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(row, other_row)| row - other_row)
            .collect();
        BoolMatrix {
            rows,
            cols: self.cols,
        }
    }

    /// True entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |j| (i as u32, j)))
    }
}

impl FromIterator<(u32, u32)> for BoolMatrix {
    /// Smallest matrix holding every given entry.
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        let entries: Vec<(u32, u32)> = iter.into_iter().collect();
        let rows = entries.iter().map(|&(i, _)| i + 1).max().unwrap_or(0);
        let cols = entries.iter().map(|&(_, j)| j + 1).max().unwrap_or(0);
        let mut matrix = BoolMatrix::zeros(rows, cols);
        for (i, j) in entries {
            matrix.set(i, j);
        }
        matrix
    }
}
