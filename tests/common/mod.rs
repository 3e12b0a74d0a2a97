#![allow(dead_code)]

use rand::{rngs::StdRng, Rng, SeedableRng};
use softmax_loss::Matrix;

/// A random (W, X, y) problem with D features, C classes and N examples.
pub struct Problem {
    pub w: Matrix,
    pub x: Matrix,
    pub y: Vec<usize>,
}

pub fn problem(seed: u64, d: usize, c: usize, n: usize, weight_scale: f64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    let w = Matrix::gaussian_with(d, c, weight_scale, &mut rng);
    let x = Matrix::random_with(n, d, &mut rng).scale(2.0);
    let y = (0..n).map(|_| rng.gen_range(0..c)).collect();
    Problem { w, x, y }
}
