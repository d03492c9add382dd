//! L2 normalization for catalog rows and query vectors.
//!
//! The two paths guard against zero norms differently. A catalog row
//! with zero norm is divided by 1 and stays the zero vector. A query is
//! divided by `norm + QUERY_NORM_EPSILON`, so an all-zero query also maps
//! to the zero vector while every other query is shrunk by a negligible
//! amount. Scores therefore match plain cosine similarity to within f32
//! rounding.

use ndarray::{Array1, Array2, ArrayView1};

/// Added to the query norm before dividing.
pub const QUERY_NORM_EPSILON: f64 = 1e-12;

/// Euclidean length, accumulated in f64 so large components cannot overflow.
fn l2_norm(values: ArrayView1<'_, f32>) -> f64 {
    values
        .iter()
        .map(|&v| f64::from(v) * f64::from(v))
        .sum::<f64>()
        .sqrt()
}

/// Normalize every row of `matrix` in place.
///
/// Returns the number of rows that had zero norm and were left as zero
/// vectors.
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_rows(matrix: &mut Array2<f32>) -> usize {
    let mut zero_rows = 0;
    for mut row in matrix.rows_mut() {
        let mut norm = l2_norm(row.view());
        if norm <= 0.0 {
            norm = 1.0;
            zero_rows += 1;
        }
        row.mapv_inplace(|v| (f64::from(v) / norm) as f32);
    }
    zero_rows
}

/// Normalize a query vector for scoring against normalized rows.
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_query(query: &[f32]) -> Array1<f32> {
    let norm = l2_norm(ArrayView1::from(query)) + QUERY_NORM_EPSILON;
    query
        .iter()
        .map(|&v| (f64::from(v) / norm) as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn norm(values: &[f32]) -> f32 {
        values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    #[test]
    fn test_normalize_rows_unit_length() {
        let mut matrix = array![[3.0_f32, 4.0], [0.7, 0.7], [-2.0, 0.0]];
        let zero_rows = normalize_rows(&mut matrix);

        assert_eq!(zero_rows, 0);
        for row in matrix.rows() {
            assert!((norm(row.as_slice().unwrap()) - 1.0).abs() < 1e-6);
        }
        assert!((matrix[[0, 0]] - 0.6).abs() < 1e-6);
        assert!((matrix[[0, 1]] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_rows_keeps_zero_vector() {
        let mut matrix = array![[0.0_f32, 0.0, 0.0], [1.0, 2.0, 2.0]];
        let zero_rows = normalize_rows(&mut matrix);

        assert_eq!(zero_rows, 1);
        assert!(matrix.row(0).iter().all(|&v| v == 0.0));
        assert!(matrix.row(0).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_normalize_rows_large_components() {
        let mut matrix = array![[3.0e30_f32, 4.0e30]];
        normalize_rows(&mut matrix);
        assert!((matrix[[0, 0]] - 0.6).abs() < 1e-6);
        assert!((matrix[[0, 1]] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_query_unit_length() {
        let query = normalize_query(&[0.0, 5.0, 0.0]);
        assert!((query[1] - 1.0).abs() < 1e-6);
        assert!((norm(query.as_slice().unwrap()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_query_zero_vector() {
        let query = normalize_query(&[0.0, 0.0]);
        assert!(query.iter().all(|&v| v == 0.0));
    }
}
