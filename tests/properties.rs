//! Algebraic properties, the worked D=2/C=3 scenario, and input rejection.

mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use softmax_loss::activation::softmax;
use softmax_loss::linear::{accuracy, predict};
use softmax_loss::{
    softmax_loss_naive, softmax_loss_vectorized, Matrix, Sgd, SoftmaxError, Stabilization,
};

type LossFn = fn(&Matrix, &Matrix, &[usize], f64) -> softmax_loss::Result<(f64, Matrix)>;

const BOTH: [(&str, LossFn); 2] = [
    ("naive", softmax_loss_naive),
    ("vectorized", softmax_loss_vectorized),
];

#[test]
fn worked_example() {
    let w = Matrix::from_rows(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]).unwrap();
    let x = Matrix::from_rows(vec![vec![1.0, 1.0]]).unwrap();

    let e = std::f64::consts::E;
    let total = 2.0 * e + 1.0;
    let p = [e / total, e / total, 1.0 / total];

    for (_, f) in BOTH {
        let (loss, dw) = f(&w, &x, &[0], 0.0).unwrap();
        assert_abs_diff_eq!(loss, 0.8620, epsilon = 1e-4);
        assert_relative_eq!(loss, -p[0].ln(), max_relative = 1e-12);

        // dW = Xᵀ·(p - onehot(0)); both feature rows see the same delta.
        let delta = [p[0] - 1.0, p[1], p[2]];
        for row in 0..2 {
            for (col, expected) in delta.iter().enumerate() {
                assert_abs_diff_eq!(dw.get(row, col), *expected, epsilon = 1e-12);
            }
        }
        assert_abs_diff_eq!(dw.get(0, 0), -0.5777, epsilon = 1e-4);
    }
}

#[test]
fn label_equal_to_class_count_is_rejected() {
    let w = Matrix::zeros(2, 3);
    let x = Matrix::zeros(2, 2);
    for (name, f) in BOTH {
        match f(&w, &x, &[1, 3], 0.0) {
            Err(SoftmaxError::LabelOutOfRange { index, label, num_classes }) => {
                assert_eq!((index, label, num_classes), (1, 3, 3), "{name}");
            }
            other => panic!("{name}: expected LabelOutOfRange, got {other:?}"),
        }
    }
}

#[test]
fn feature_mismatch_is_rejected() {
    let w = Matrix::zeros(3, 2);
    let x = Matrix::zeros(4, 2);
    for (name, f) in BOTH {
        let err = f(&w, &x, &[0, 0, 0, 0], 0.0).unwrap_err();
        assert!(matches!(err, SoftmaxError::ShapeMismatch { .. }), "{name}: {err}");
    }
}

#[test]
fn empty_batch_is_rejected() {
    let w = Matrix::zeros(3, 2);
    let x = Matrix::zeros(0, 3);
    for (_, f) in BOTH {
        assert!(matches!(f(&w, &x, &[], 0.0), Err(SoftmaxError::EmptyBatch)));
    }
}

#[test]
fn constant_score_shift_changes_nothing() {
    let p = common::problem(20, 4, 5, 8, 0.7);

    // An always-on feature whose weights are the same for every class adds
    // the same constant to each score in a row.
    let shifted_x = Matrix::from_rows(
        p.x.data.iter().map(|r| r.iter().copied().chain([1.0]).collect()).collect(),
    )
    .unwrap();
    for c in [-40.0, 3.5, 800.0] {
        let mut shifted_w = p.w.data.clone();
        shifted_w.push(vec![c; p.w.cols]);
        let shifted_w = Matrix::from_rows(shifted_w).unwrap();

        for (_, f) in BOTH {
            let (base_loss, base_grad) = f(&p.w, &p.x, &p.y, 0.0).unwrap();
            let (loss, grad) = f(&shifted_w, &shifted_x, &p.y, 0.0).unwrap();
            assert_relative_eq!(loss, base_loss, max_relative = 1e-9);
            for i in 0..p.w.rows {
                for j in 0..p.w.cols {
                    assert_abs_diff_eq!(grad.get(i, j), base_grad.get(i, j), epsilon = 1e-9);
                }
            }
        }
    }
}

#[test]
fn wide_score_gap_gives_finite_loss() {
    // The true class sits 2000 below the leader; its probability underflows
    // to zero but the cross-entropy is exactly the gap.
    let w = Matrix::from_rows(vec![vec![1000.0, -1000.0]]).unwrap();
    let x = Matrix::from_rows(vec![vec![1.0]]).unwrap();
    for (name, f) in BOTH {
        let (loss, dw) = f(&w, &x, &[1], 0.0).unwrap();
        assert!(loss.is_finite(), "{name}: loss {loss}");
        assert_relative_eq!(loss, 2000.0, max_relative = 1e-12);
        assert!(dw.data.iter().flatten().all(|g| g.is_finite()), "{name}");
    }
}

#[test]
fn softmax_is_shift_invariant() {
    let scores = [0.3, -1.2, 2.0, 0.0];
    let base = softmax(&scores, Stabilization::MaxShift);
    let shifted: Vec<f64> = scores.iter().map(|s| s + 123.0).collect();
    for (a, b) in base.iter().zip(softmax(&shifted, Stabilization::MaxShift)) {
        assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
    }
}

#[test]
fn gradient_descent_lowers_the_loss() {
    let p = common::problem(21, 6, 3, 40, 1e-3);
    let mut w = p.w.clone();
    let sgd = Sgd::new(0.5);

    let (start, _) = softmax_loss_vectorized(&w, &p.x, &p.y, 1e-3).unwrap();
    for _ in 0..50 {
        let (_, dw) = softmax_loss_vectorized(&w, &p.x, &p.y, 1e-3).unwrap();
        sgd.step(&mut w, &dw).unwrap();
    }
    let (end, _) = softmax_loss_vectorized(&w, &p.x, &p.y, 1e-3).unwrap();
    assert!(end < start, "loss went from {start} to {end}");

    let acc = accuracy(&predict(&w, &p.x).unwrap(), &p.y).unwrap();
    assert!((0.0..=1.0).contains(&acc));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn loss_is_non_negative(seed in any::<u64>(), scale in 1e-3f64..10.0, reg in 0.0f64..3.0) {
        let p = common::problem(seed, 4, 6, 10, scale);
        for (_, f) in BOTH {
            let (loss, _) = f(&p.w, &p.x, &p.y, reg).unwrap();
            prop_assert!(loss >= 0.0);
            prop_assert!(loss.is_finite());
        }
    }

    #[test]
    fn regularization_is_additive(seed in any::<u64>(), reg in 1e-3f64..10.0) {
        let p = common::problem(seed, 3, 4, 7, 1.0);
        let penalty = 0.5 * reg * p.w.squared_sum();
        for (_, f) in BOTH {
            let (plain, plain_grad) = f(&p.w, &p.x, &p.y, 0.0).unwrap();
            let (regd, regd_grad) = f(&p.w, &p.x, &p.y, reg).unwrap();
            prop_assert!(regd > plain);
            prop_assert!((regd - plain - penalty).abs() < 1e-9 * (1.0 + penalty));

            let expected = plain_grad.checked_add(&p.w.scale(reg)).unwrap();
            prop_assert!(regd_grad.max_abs_diff(&expected).unwrap() < 1e-9 * (1.0 + reg));
        }
    }
}
