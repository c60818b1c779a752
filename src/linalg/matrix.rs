//! Dense rectangular matrix and the linear system that owns it.

use faer::Mat;

use crate::error::{Result, ValidationError};

/// Dense matrix with a fixed number of rows and columns.
///
/// Backed by `faer::Mat<f64>`, so every row has exactly `ncols` entries.
#[derive(Clone, Debug)]
pub struct Matrix {
    data: Mat<f64>,
}

impl Matrix {
    /// Create an `nrows` x `ncols` matrix with every entry set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: f64) -> Self {
        Self {
            data: Mat::from_fn(nrows, ncols, |_, _| value),
        }
    }

    /// Create a zero matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: Mat::zeros(nrows, ncols),
        }
    }

    /// Create an identity matrix.
    pub fn identity(n: usize) -> Self {
        Self {
            data: Mat::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 }),
        }
    }

    /// Build a matrix from row vectors.
    ///
    /// Rejects jagged input: every row must have the length of the first.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
            return Err(ValidationError::JaggedRows {
                row,
                expected: ncols,
                actual: r.len(),
            }
            .into());
        }
        Ok(Self {
            data: Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j]),
        })
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Check if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Entry at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Set the entry at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[(row, col)] = value;
    }

    /// Exchange two rows.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.ncols() {
            let tmp = self.data[(a, j)];
            self.data[(a, j)] = self.data[(b, j)];
            self.data[(b, j)] = tmp;
        }
    }

    /// Matrix-vector product `self * x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != ncols`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.ncols(), "vector length must equal ncols");
        (0..self.nrows())
            .map(|i| (0..self.ncols()).map(|j| self.data[(i, j)] * x[j]).sum())
            .collect()
    }

    /// Copy of one row.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.ncols()).map(|j| self.data[(i, j)]).collect()
    }

    /// Borrow the underlying faer matrix.
    pub fn as_faer(&self) -> &Mat<f64> {
        &self.data
    }
}

impl From<Mat<f64>> for Matrix {
    fn from(data: Mat<f64>) -> Self {
        Self { data }
    }
}

/// Square system `A x = b`.
///
/// Solving consumes the system: the solver is free to overwrite `A` and `b`
/// during elimination, and the caller gets back a freshly allocated `x`.
/// The fields are private so every system has passed the shape checks in
/// [`LinearSystem::new`].
#[derive(Clone, Debug)]
pub struct LinearSystem {
    a: Matrix,
    b: Vec<f64>,
}

impl LinearSystem {
    /// Create a system, checking that `A` is square and matches `b`.
    pub fn new(a: Matrix, b: Vec<f64>) -> Result<Self> {
        if !a.is_square() {
            return Err(ValidationError::dimension_mismatch(
                "square matrix",
                format!("{}x{}", a.nrows(), a.ncols()),
            )
            .into());
        }
        if b.len() != a.nrows() {
            return Err(ValidationError::LengthMismatch {
                what: "right-hand side",
                expected: a.nrows(),
                actual: b.len(),
            }
            .into());
        }
        Ok(Self { a, b })
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.b.len()
    }

    /// Coefficient matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.a
    }

    /// Right-hand side.
    pub fn rhs(&self) -> &[f64] {
        &self.b
    }

    /// Split into `(A, b)` for in-place elimination.
    pub fn into_parts(self) -> (Matrix, Vec<f64>) {
        (self.a, self.b)
    }

    /// Residual `A x - b`.
    pub fn residual(&self, x: &[f64]) -> Vec<f64> {
        self.a
            .mul_vec(x)
            .iter()
            .zip(&self.b)
            .map(|(ax, b)| ax - b)
            .collect()
    }
}
