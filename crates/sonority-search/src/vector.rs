//! Dense vector routines for feature comparison.

/// Euclidean length of `v`.
#[must_use]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Scale `v` to unit length in place.
///
/// A zero vector has no direction and is left as is, so it scores zero
/// against everything.
pub fn normalize(v: &mut [f64]) {
    let norm = l2_norm(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Inner product of two equally long vectors.
///
/// For unit vectors this is their cosine similarity.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vector dimensions must match");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Row-major matrix with one feature vector per song.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Vec<f64>,
    dims: usize,
}

impl FeatureMatrix {
    /// An empty matrix whose rows will have `dims` columns.
    #[must_use]
    pub fn with_capacity(dims: usize, rows: usize) -> Self {
        Self {
            data: Vec::with_capacity(dims * rows),
            dims,
        }
    }

    /// Append a row; `row.len()` must equal [`dims`](Self::dims).
    pub fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.dims, "row width must match");
        self.data.extend_from_slice(row);
    }

    #[must_use]
    pub fn dims(&self) -> usize {
        self.dims
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        if self.dims == 0 {
            0
        } else {
            self.data.len() / self.dims
        }
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let start = i.checked_mul(self.dims)?;
        self.data.get(start..start + self.dims)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.dims.max(1))
    }

    /// Every row scaled to unit length.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.dims > 0 {
            for row in self.data.chunks_exact_mut(self.dims) {
                normalize(row);
            }
        }
        self
    }

    /// Dot product of row `target` with every row, in row order.
    ///
    /// On a normalized matrix these are cosine similarities. Returns
    /// `None` when `target` is out of range.
    #[must_use]
    pub fn similarities(&self, target: usize) -> Option<Vec<f64>> {
        let target = self.row(target)?;
        Some(self.iter_rows().map(|row| dot(target, row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_l2_norm() {
        assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < EPS);
        assert!(l2_norm(&[]).abs() < EPS);
    }

    #[test]
    fn test_normalize() {
        let mut v = [3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < EPS);
        assert!((v[1] - 0.8).abs() < EPS);
        assert!((l2_norm(&v) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut v = [0.0, 0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dot() {
        assert!((dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]) - 12.0).abs() < EPS);
    }

    #[test]
    fn test_matrix_rows() {
        let mut m = FeatureMatrix::with_capacity(2, 3);
        m.push_row(&[1.0, 0.0]);
        m.push_row(&[0.0, 2.0]);
        m.push_row(&[1.0, 1.0]);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.dims(), 2);
        assert_eq!(m.row(1), Some(&[0.0, 2.0][..]));
        assert_eq!(m.row(3), None);
    }

    #[test]
    fn test_similarities() {
        let mut m = FeatureMatrix::with_capacity(2, 4);
        m.push_row(&[1.0, 0.0]);
        m.push_row(&[0.0, 2.0]);
        m.push_row(&[3.0, 3.0]);
        m.push_row(&[0.0, 0.0]);
        let sims = m.normalized().similarities(0).unwrap();
        assert!((sims[0] - 1.0).abs() < EPS);
        assert!(sims[1].abs() < EPS);
        assert!((sims[2] - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
        assert!(sims[3].abs() < EPS);
    }

    #[test]
    fn test_similarities_out_of_range() {
        let m = FeatureMatrix::with_capacity(2, 0);
        assert_eq!(m.similarities(0), None);
    }
}
