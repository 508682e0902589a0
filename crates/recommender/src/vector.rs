//! Dense vector helpers.
//!
//! Vectors are plain `&[f64]` slices indexed by vocabulary position. All
//! sums run in index order, so results are bit-for-bit reproducible.

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Scale `a` to unit length in place. Zero vectors are left untouched.
pub fn normalize(a: &mut [f64]) {
    let n = norm(a);
    if n > 0.0 {
        a.iter_mut().for_each(|x| *x /= n);
    }
}

/// Cosine of the angle between `a` and `b`.
///
/// A zero vector has no direction; its similarity to anything is 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot(a, b) / denom
    }
}

/// Component-wise mean of `vectors`, each of length `dim`.
///
/// Returns a zero vector when `vectors` is empty.
pub fn mean<'a, I>(vectors: I, dim: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut sum = vec![0.0; dim];
    let mut count = 0usize;
    for v in vectors {
        debug_assert_eq!(v.len(), dim);
        sum.iter_mut().zip(v).for_each(|(s, x)| *s += x);
        count += 1;
    }
    if count > 0 {
        sum.iter_mut().for_each(|s| *s /= count as f64);
    }
    sum
}

/// Index of the largest value; ties go to the earliest index.
///
/// NaN never wins. Returns `None` only for an empty slice.
pub fn argmax_first(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            None => best = Some((i, score)),
            Some((_, top)) if score > top || (top.is_nan() && !score.is_nan()) => {
                best = Some((i, score))
            }
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}
