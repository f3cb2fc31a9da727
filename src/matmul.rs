//! Blocked GEMM used by `Matrix::matmul`.
//!
//! The kernel walks the output column by column. For each column `j` it loads
//! eight consecutive entries `b[k..k+8, j]` of the right operand and folds them
//! into every output row before moving on, then finishes the `m % 8` leftover
//! `k` indices one at a time.
//!
//! With the `rayon` feature the output is split into bands of rows. Every band
//! runs the same kernel, so each output element sees the same accumulation
//! order as the serial path.

const UNROLL: usize = 8;

#[cfg(feature = "rayon")]
const BAND_ROWS: usize = 64;

/// `c = a * b` for row-major `a: (n, m)`, `b: (m, p)`, `c: (n, p)`.
///
/// `c` must be zero-filled on entry.
pub(crate) fn gemm_f32(n: usize, m: usize, p: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    debug_assert_eq!(a.len(), n * m);
    debug_assert_eq!(b.len(), m * p);
    debug_assert_eq!(c.len(), n * p);

    if n == 0 || p == 0 || m == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;

        c.par_chunks_mut(BAND_ROWS * p)
            .zip(a.par_chunks(BAND_ROWS * m))
            .for_each(|(c_band, a_band)| {
                gemm_band(c_band.len() / p, m, p, a_band, b, c_band);
            });
    }

    #[cfg(not(feature = "rayon"))]
    gemm_band(n, m, p, a, b, c);
}

#[inline]
fn gemm_band(n: usize, m: usize, p: usize, a: &[f32], b: &[f32], c: &mut [f32]) {
    let blocked = m - m % UNROLL;

    for j in 0..p {
        let mut k = 0;
        while k < blocked {
            let mut bk = [0.0_f32; UNROLL];
            for (t, v) in bk.iter_mut().enumerate() {
                *v = b[(k + t) * p + j];
            }

            for i in 0..n {
                let row = &a[i * m + k..i * m + k + UNROLL];
                let mut acc = c[i * p + j];
                for (av, bv) in row.iter().zip(&bk) {
                    acc += av * bv;
                }
                c[i * p + j] = acc;
            }
            k += UNROLL;
        }

        while k < m {
            let bk = b[k * p + j];
            for i in 0..n {
                c[i * p + j] += a[i * m + k] * bk;
            }
            k += 1;
        }
    }
}
