//! Integration tests for vector operations

mod common;

use common::{all_contexts, assert_allclose_f32, sample_f32, sample_i32};
use vecmath::prelude::*;

#[test]
fn test_to_vec_round_trips_any_length() {
    for ctx in all_contexts() {
        for len in [1, 3, 7, 8, 9, 16, 17, 100] {
            let data = sample_f32(len, len as u64, 10.0);
            let v = Vector::from_slice(&data, &ctx).unwrap();
            assert_eq!(v.len(), len);
            assert_eq!(v.to_vec(), data, "len {} on {}", len, ctx.backend());
        }
    }
}

#[test]
fn test_add_then_subtract_restores_int() {
    for ctx in all_contexts() {
        let a = Vector::from_vec(sample_i32(37, 1, 500), &ctx).unwrap();
        let b = Vector::from_vec(sample_i32(37, 2, 500), &ctx).unwrap();
        let restored = a.add(&b).unwrap().subtract(&b).unwrap();
        assert_eq!(restored, a);
    }
}

#[test]
fn test_add_then_subtract_restores_float() {
    for ctx in all_contexts() {
        let data = sample_f32(29, 3, 100.0);
        let a = Vector::from_slice(&data, &ctx).unwrap();
        let b = Vector::from_vec(sample_f32(29, 4, 100.0), &ctx).unwrap();
        let restored = a.add(&b).unwrap().subtract(&b).unwrap();
        assert_allclose_f32(&restored.to_vec(), &data, 0.0, 1e-4, "(a+b)-b");
    }
}

#[test]
fn test_mismatched_lengths_fail() {
    for ctx in all_contexts() {
        let a = Vector::from_slice(&[1.0f32, 2.0, 3.0], &ctx).unwrap();
        let b = Vector::from_slice(&[1.0f32, 2.0], &ctx).unwrap();
        assert_eq!(a.add(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
        assert_eq!(a.subtract(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
        assert_eq!(a.multiply(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
        assert_eq!(a.dot(&b).unwrap_err().kind(), ErrorKind::InvalidOperation);
    }
}

#[test]
fn test_mixed_backends_fail() {
    let Some(simd) = common::simd_context() else {
        return;
    };
    let a = Vector::from_slice(&[1, 2, 3], &simd).unwrap();
    let b = Vector::from_slice(&[1, 2, 3], &Context::serial()).unwrap();
    let err = a.add(&b).unwrap_err();
    assert!(matches!(err, Error::BackendMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}

#[test]
fn test_index_out_of_range() {
    for ctx in all_contexts() {
        let v = Vector::filled(3i32, 10, &ctx).unwrap();
        assert_eq!(v.get(9).unwrap(), 3);
        assert_eq!(v.get(10).unwrap_err().kind(), ErrorKind::OutOfRange);
    }
}

#[test]
fn test_dot_and_magnitude() {
    for ctx in all_contexts() {
        let a: Vec<i32> = (1..=10).collect();
        let v = Vector::from_slice(&a, &ctx).unwrap();
        assert_eq!(v.dot(&v).unwrap(), 385);
        assert_eq!(v.magnitude(), 19);

        let f = Vector::from_slice(&[3.0f32, 4.0, 12.0], &ctx).unwrap();
        assert_eq!(f.magnitude(), 13.0);
    }
}

#[test]
fn test_scalar_ops() {
    for ctx in all_contexts() {
        let data: Vec<f64> = (0..11).map(|x| x as f64 - 5.0).collect();
        let v = Vector::from_slice(&data, &ctx).unwrap();

        let scaled = v.multiply_scalar(-2.0).to_vec();
        let divided = v.divide_scalar(4.0).unwrap().to_vec();
        let abs = v.abs().to_vec();
        for i in 0..data.len() {
            assert_eq!(scaled[i], data[i] * -2.0);
            assert_eq!(divided[i], data[i] / 4.0);
            assert_eq!(abs[i], data[i].abs());
        }
    }
}

#[test]
fn test_normalize_has_unit_length() {
    for ctx in all_contexts() {
        let v = Vector::from_vec(sample_f32(21, 9, 5.0), &ctx).unwrap();
        let unit = v.normalize().unwrap();
        assert!((unit.magnitude() - 1.0).abs() < 1e-5);

        let zero = Vector::filled(0.0f32, 4, &ctx).unwrap();
        assert_eq!(zero.normalize().unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_multiply_matrix() {
    for ctx in all_contexts() {
        for mode in [VectorizationMode::ByRow, VectorizationMode::ByColumn] {
            let m = Matrix::from_slice(&[1, 2, 3, 4, 5, 6], 3, 2, mode, &ctx).unwrap();
            let v = Vector::from_slice(&[1, 1, 2], &ctx).unwrap();
            assert_eq!(v.multiply_matrix(&m).unwrap().to_vec(), vec![14, 18]);

            let wrong = Vector::from_slice(&[1, 1], &ctx).unwrap();
            assert_eq!(
                wrong.multiply_matrix(&m).unwrap_err().kind(),
                ErrorKind::NotSupported
            );
        }
    }
}
