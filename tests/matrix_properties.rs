use proptest::prelude::*;

use rust_matnet::Matrix;

fn matrix(rows: usize, columns: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-10.0_f32..10.0, rows * columns)
        .prop_map(move |data| Matrix::from_vec(rows, columns, data).unwrap())
}

fn any_matrix() -> impl Strategy<Value = Matrix> {
    (1_usize..12, 1_usize..12).prop_flat_map(|(r, c)| matrix(r, c))
}

proptest! {
    /// Adding then subtracting a scalar returns the original within rounding.
    #[test]
    fn prop_scalar_add_sub_round_trip(a in any_matrix(), s in -10.0_f32..10.0) {
        let back = a.add_scalar(s).sub_scalar(s);
        prop_assert!(back.approx_eq(&a, 1e-5));
    }

    #[test]
    fn prop_transpose_is_an_involution(a in any_matrix()) {
        let t = a.transpose();
        prop_assert_eq!(t.shape(), (a.columns(), a.rows()));
        prop_assert_eq!(t.transpose(), a);
    }

    #[test]
    fn prop_identity_is_neutral(a in any_matrix()) {
        let right = a.matmul(&Matrix::identity(a.columns())).unwrap();
        let left = Matrix::identity(a.rows()).matmul(&a).unwrap();
        prop_assert!(right.approx_eq(&a, 1e-6));
        prop_assert!(left.approx_eq(&a, 1e-6));
    }

    /// `(m x k) * (k x n)` is `m x n`.
    #[test]
    fn prop_matmul_shape_contract(
        (a, b) in (1_usize..10, 1_usize..20, 1_usize..10)
            .prop_flat_map(|(m, k, n)| (matrix(m, k), matrix(k, n)))
    ) {
        let c = a.matmul(&b).unwrap();
        prop_assert_eq!(c.shape(), (a.rows(), b.columns()));
    }

    #[cfg(not(feature = "unchecked"))]
    #[test]
    fn prop_matmul_rejects_inner_mismatch(
        (a, b) in (1_usize..6, 1_usize..6, 1_usize..6, 1_usize..6)
            .prop_filter("inner dims must differ", |(_, k1, k2, _)| k1 != k2)
            .prop_flat_map(|(m, k1, k2, n)| (matrix(m, k1), matrix(k2, n)))
    ) {
        prop_assert!(a.matmul(&b).is_err());
    }

    /// `(A^T B^T) == (B A)^T` up to rounding.
    #[test]
    fn prop_matmul_transpose_identity(
        (a, b) in (1_usize..8, 1_usize..12, 1_usize..8)
            .prop_flat_map(|(m, k, n)| (matrix(k, n), matrix(m, k)))
    ) {
        let lhs = a.transpose().matmul(&b.transpose()).unwrap();
        let rhs = b.matmul(&a).unwrap().transpose();
        prop_assert!(lhs.approx_eq(&rhs, 1e-3));
    }

    #[test]
    fn prop_sum_columns_of_ones(r in 1_usize..40, c in 0_usize..40) {
        prop_assert_eq!(
            Matrix::ones(r, c).sum_columns(),
            Matrix::filled(r, 1, c as f32)
        );
    }

    #[test]
    fn prop_hadamard_commutes(
        (a, b) in (1_usize..12, 1_usize..12).prop_flat_map(|(r, c)| (matrix(r, c), matrix(r, c)))
    ) {
        prop_assert_eq!(a.mul_elements(&b).unwrap(), b.mul_elements(&a).unwrap());
    }

    /// Total sum agrees with the sum of row sums.
    #[test]
    fn prop_sum_matches_row_sums(a in any_matrix()) {
        let rows: f32 = a.sum_columns().as_slice().iter().sum();
        prop_assert!((a.sum() - rows).abs() <= 1e-2);
    }
}
