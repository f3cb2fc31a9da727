//! Fixed-width lane kernels.
//!
//! Every elementwise matrix operation goes through these helpers. A slice is
//! walked in chunks of `W` elements (written as `[f32; W]` so the compiler can
//! keep a chunk in one vector register), then the `len % W` tail is handled by
//! a scalar loop. The per-element function is the same in both loops, so the
//! output never depends on `W`.
//!
//! Reductions are the exception: `sum` keeps `W` partial accumulators, so the
//! rounding of the result depends on `W` (the value does not, up to tolerance).

/// Lane width used by `Matrix`. Eight `f32` fill one 256-bit register.
pub const LANES: usize = 8;

#[inline]
pub(crate) fn map_into<const W: usize>(src: &[f32], dst: &mut [f32], f: impl Fn(f32) -> f32) {
    debug_assert_eq!(src.len(), dst.len());

    let mut src_chunks = src.chunks_exact(W);
    let mut dst_chunks = dst.chunks_exact_mut(W);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        let mut lane = [0.0_f32; W];
        lane.copy_from_slice(s);
        for v in &mut lane {
            *v = f(*v);
        }
        d.copy_from_slice(&lane);
    }

    for (s, d) in src_chunks
        .remainder()
        .iter()
        .zip(dst_chunks.into_remainder())
    {
        *d = f(*s);
    }
}

#[inline]
pub(crate) fn map<const W: usize>(src: &[f32], f: impl Fn(f32) -> f32) -> Vec<f32> {
    let mut out = vec![0.0_f32; src.len()];
    map_into::<W>(src, &mut out, f);
    out
}

#[inline]
pub(crate) fn zip<const W: usize>(a: &[f32], b: &[f32], f: impl Fn(f32, f32) -> f32) -> Vec<f32> {
    debug_assert_eq!(a.len(), b.len());

    let mut out = vec![0.0_f32; a.len()];
    let mut a_chunks = a.chunks_exact(W);
    let mut b_chunks = b.chunks_exact(W);
    let mut out_chunks = out.chunks_exact_mut(W);
    for ((x, y), d) in (&mut a_chunks).zip(&mut b_chunks).zip(&mut out_chunks) {
        let mut lhs = [0.0_f32; W];
        let mut rhs = [0.0_f32; W];
        lhs.copy_from_slice(x);
        rhs.copy_from_slice(y);
        for (l, r) in lhs.iter_mut().zip(&rhs) {
            *l = f(*l, *r);
        }
        d.copy_from_slice(&lhs);
    }

    for ((x, y), d) in a_chunks
        .remainder()
        .iter()
        .zip(b_chunks.remainder())
        .zip(out_chunks.into_remainder())
    {
        *d = f(*x, *y);
    }
    out
}

/// Applies `f(row[j], col[i])` to every element of a row-major `rows x columns` buffer.
#[inline]
pub(crate) fn broadcast_col<const W: usize>(
    src: &[f32],
    col: &[f32],
    columns: usize,
    f: impl Fn(f32, f32) -> f32,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), col.len() * columns);

    let mut out = vec![0.0_f32; src.len()];
    if columns == 0 {
        return out;
    }
    for ((s, d), &c) in src
        .chunks_exact(columns)
        .zip(out.chunks_exact_mut(columns))
        .zip(col)
    {
        map_into::<W>(s, d, |v| f(v, c));
    }
    out
}

#[inline]
pub(crate) fn sum<const W: usize>(src: &[f32]) -> f32 {
    let mut acc = [0.0_f32; W];
    let mut chunks = src.chunks_exact(W);
    for chunk in &mut chunks {
        for (a, v) in acc.iter_mut().zip(chunk) {
            *a += *v;
        }
    }

    let mut total: f32 = acc.iter().sum();
    for v in chunks.remainder() {
        total += *v;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32) * 0.37 - 3.1).collect()
    }

    #[test]
    fn map_is_independent_of_lane_width() {
        // 19 leaves a tail for every width below.
        let src = ramp(19);
        let f = |v: f32| v.mul_add(1.5, -0.25) / 3.0;

        let w1 = map::<1>(&src, f);
        assert_eq!(w1, map::<4>(&src, f));
        assert_eq!(w1, map::<8>(&src, f));
        assert_eq!(w1, map::<16>(&src, f));
    }

    #[test]
    fn zip_is_independent_of_lane_width() {
        let a = ramp(21);
        let b: Vec<f32> = ramp(21).into_iter().rev().collect();
        let f = |x: f32, y: f32| x * y - x / (y.abs() + 1.0);

        let w1 = zip::<1>(&a, &b, f);
        assert_eq!(w1, zip::<4>(&a, &b, f));
        assert_eq!(w1, zip::<8>(&a, &b, f));
        assert_eq!(w1, zip::<16>(&a, &b, f));
    }

    #[test]
    fn broadcast_col_uses_the_row_value() {
        // 2x3
        let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let col = [10.0, 100.0];
        let out = broadcast_col::<2>(&src, &col, 3, |v, c| v + c);
        assert_eq!(out, vec![11.0, 12.0, 13.0, 104.0, 105.0, 106.0]);
    }

    #[test]
    fn sum_handles_tails_and_empty_input() {
        assert_eq!(sum::<8>(&[]), 0.0);
        assert_eq!(sum::<8>(&[1.0; 3]), 3.0);
        assert_eq!(sum::<4>(&[1.0; 11]), 11.0);

        let src = ramp(37);
        let reference: f32 = src.iter().sum();
        assert!((sum::<8>(&src) - reference).abs() < 1e-4);
        assert!((sum::<16>(&src) - reference).abs() < 1e-4);
    }
}
