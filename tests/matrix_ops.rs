//! Integration tests for matrix operations

mod common;

use common::{all_contexts, assert_allclose_f32, reference_matmul_f32, sample_f32, sample_i32};
use vecmath::prelude::*;

const MODES: [VectorizationMode; 2] = [VectorizationMode::ByRow, VectorizationMode::ByColumn];

#[test]
fn test_zero_dimension_rejected() {
    for ctx in all_contexts() {
        let err = Matrix::<f32>::from_slice(&[], 0, 0, VectorizationMode::ByRow, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = Matrix::from_slice(&[1.0f32, 2.0], 3, 1, VectorizationMode::ByRow, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_multiply_matches_reference() {
    let (m, k, n) = (7, 13, 5);
    let a = sample_f32(m * k, 11, 10.0);
    let b = sample_f32(k * n, 12, 10.0);
    let expected = reference_matmul_f32(&a, &b, m, k, n);

    for ctx in all_contexts() {
        for left_mode in MODES {
            for right_mode in MODES {
                let left = Matrix::from_slice(&a, m, k, left_mode, &ctx).unwrap();
                let right = Matrix::from_slice(&b, k, n, right_mode, &ctx).unwrap();
                let product = left.multiply(&right).unwrap();

                assert_eq!(product.shape(), (m, n));
                assert_allclose_f32(
                    &product.to_vec(),
                    &expected,
                    0.0,
                    0.001,
                    &format!("{:?} x {:?} on {}", left_mode, right_mode, ctx.backend()),
                );
            }
        }
    }
}

#[test]
fn test_multiply_int_exact() {
    let a = sample_i32(6 * 9, 21, 50);
    let b = sample_i32(9 * 4, 22, 50);
    for ctx in all_contexts() {
        let left = Matrix::from_slice(&a, 6, 9, VectorizationMode::ByRow, &ctx).unwrap();
        let right = Matrix::from_slice(&b, 9, 4, VectorizationMode::ByColumn, &ctx).unwrap();
        let product = left.multiply(&right).unwrap();
        for row in 0..6 {
            for col in 0..4 {
                let expected: i32 = (0..9).map(|p| a[row * 9 + p] * b[p * 4 + col]).sum();
                assert_eq!(product.get(row, col).unwrap(), expected);
            }
        }
    }
}

#[test]
fn test_multiply_incompatible_shapes() {
    for ctx in all_contexts() {
        let a = Matrix::<f32>::ones(2, 3, &ctx).unwrap();
        let b = Matrix::<f32>::ones(2, 3, &ctx).unwrap();
        let err = a.multiply(&b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(err.to_string().contains("[2, 3]"));
    }
}

#[test]
fn test_add_subtract_all_mode_pairs() {
    let a = sample_i32(8 * 11, 31, 1000);
    let b = sample_i32(8 * 11, 32, 1000);
    for ctx in all_contexts() {
        for left_mode in MODES {
            for right_mode in MODES {
                let left = Matrix::from_slice(&a, 8, 11, left_mode, &ctx).unwrap();
                let right = Matrix::from_slice(&b, 8, 11, right_mode, &ctx).unwrap();

                let sum = left.add(&right).unwrap().to_vec();
                let diff = left.subtract(&right).unwrap().to_vec();
                for i in 0..a.len() {
                    assert_eq!(sum[i], a[i] + b[i]);
                    assert_eq!(diff[i], a[i] - b[i]);
                }
            }
        }
    }
}

#[test]
fn test_add_shape_mismatch() {
    for ctx in all_contexts() {
        let a = Matrix::<i32>::zeros(2, 3, &ctx).unwrap();
        let b = Matrix::<i32>::zeros(3, 2, &ctx).unwrap();
        assert_eq!(a.add(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
        assert_eq!(a.subtract(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
    }
}

#[test]
fn test_transpose_twice_is_identity() {
    let data = sample_f32(10 * 6, 41, 500.0);
    for ctx in all_contexts() {
        for mode in MODES {
            let m = Matrix::from_slice(&data, 10, 6, mode, &ctx).unwrap();

            let t = m.transpose();
            assert_eq!(t.shape(), (6, 10));
            for row in 0..6 {
                for col in 0..10 {
                    assert_eq!(t.get(row, col).unwrap(), data[col * 6 + row]);
                }
            }
            assert_eq!(t.transpose(), m);

            let mut inplace = m.clone();
            inplace.transpose_in_place();
            assert_eq!(inplace, t);
            inplace.transpose_in_place();
            assert_eq!(inplace.shape(), (10, 6));
            assert_eq!(inplace, m);
        }
    }
}

#[test]
fn test_transpose_in_place_keeps_slices_on_simd() {
    let Some(ctx) = common::simd_context() else {
        return;
    };
    let mut m = Matrix::from_slice(&sample_f32(12, 5, 1.0), 3, 4, VectorizationMode::ByRow, &ctx).unwrap();
    let before: Vec<Vec<f32>> = m.vectors().unwrap().iter().map(|v| v.to_vec()).collect();

    m.transpose_in_place();
    assert_eq!(m.mode(), VectorizationMode::ByColumn);
    let after: Vec<Vec<f32>> = m.vectors().unwrap().iter().map(|v| v.to_vec()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_to_rows() {
    for ctx in all_contexts() {
        for mode in MODES {
            let rows = vec![vec![1.0f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
            let m = Matrix::from_rows(&rows, mode, &ctx).unwrap();
            assert_eq!(m.to_rows(), rows);
            assert_eq!(m.get(1, 2).unwrap(), 6.0);
            assert_eq!(m.get(2, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        }
    }
}
