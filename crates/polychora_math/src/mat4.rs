//! 4x4 Matrix utilities
//!
//! Row-major convention throughout: `m[row][col]`, and applying a matrix to
//! a vector computes `out[i] = sum_j m[i][j] * v[j]`. Reflection and
//! representation matrices built by the embedding step all follow this
//! convention.

use crate::Vec4;

/// 4x4 matrix type (row-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                c[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    c
}

/// Apply a matrix to a vector: result = m * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    let v = v.to_array();
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        for j in 0..4 {
            out[i] += m[i][j] * v[j];
        }
    }
    Vec4::from_array(out)
}

/// Get a row of the matrix as a vector
#[inline]
pub fn row(m: Mat4, i: usize) -> Vec4 {
    Vec4::from_array(m[i])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    let mut t = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            t[j][i] = m[i][j];
        }
    }
    t
}

/// Invert a matrix by Gauss-Jordan elimination on an augmented 4x8 system.
///
/// When a pivot is small, later rows are added into the pivot row until it
/// is usable; the axis matrices this is called on are well-conditioned, so
/// no full pivoting is needed.
pub fn inverse(a: Mat4) -> Mat4 {
    let mut m = [[0.0f32; 8]; 4];
    for i in 0..4 {
        for j in 0..4 {
            m[i][j] = a[i][j];
            m[i][j + 4] = if i == j { 1.0 } else { 0.0 };
        }
    }
    // clear below the diagonal
    for i in 0..4 {
        let mut j = i + 1;
        while j < 4 && m[i][i] * m[i][i] < 0.2 {
            for k in i..8 {
                m[i][k] += m[j][k];
            }
            j += 1;
        }
        for k in i + 1..8 {
            m[i][k] /= m[i][i];
        }
        m[i][i] = 1.0;
        for j in i + 1..4 {
            for k in i + 1..8 {
                m[j][k] -= m[j][i] * m[i][k];
            }
            m[j][i] = 0.0;
        }
    }
    // clear above the diagonal
    for i in (1..4).rev() {
        for j in (0..i).rev() {
            for k in i + 1..8 {
                m[j][k] -= m[i][k] * m[j][i];
            }
            m[j][i] = 0.0;
        }
    }
    let mut b = [[0.0f32; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            b[i][j] = m[i][j + 4];
        }
    }
    b
}

/// Orthonormalize the rows of a matrix in place (Gram-Schmidt).
///
/// Row order matters: earlier rows are kept (up to scale) and later rows
/// are projected against them, which is exactly what the reflector
/// construction relies on.
pub fn gram_schmidt(m: &mut Mat4) {
    for i in 0..4 {
        for j in 0..i {
            let coef = row(*m, i).dot(row(*m, j));
            for k in 0..4 {
                m[i][k] -= coef * m[j][k];
            }
        }
        let norm = row(*m, i).length();
        for k in 0..4 {
            m[i][k] /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        (a - b).length() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    fn sample_matrix() -> Mat4 {
        [
            [1.0, 0.5, 0.0, 0.2],
            [0.0, 1.0, 0.3, 0.0],
            [0.1, 0.0, 1.0, 0.4],
            [0.0, 0.2, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_identity_transform() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!(vec_approx_eq(transform(IDENTITY, v), v));
    }

    #[test]
    fn test_mul_identity() {
        let a = sample_matrix();
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_matches_composed_transform() {
        let a = sample_matrix();
        let b = transpose(sample_matrix());
        let v = Vec4::new(0.3, -1.0, 2.0, 0.7);
        let composed = transform(mul(a, b), v);
        let stepped = transform(a, transform(b, v));
        assert!(vec_approx_eq(composed, stepped));
    }

    #[test]
    fn test_inverse() {
        let a = sample_matrix();
        let inv = inverse(a);
        assert!(mat_approx_eq(mul(a, inv), IDENTITY));
        assert!(mat_approx_eq(mul(inv, a), IDENTITY));
    }

    #[test]
    fn test_inverse_small_pivot() {
        // leading pivot below the 0.2 threshold forces the row-addition path
        let a = [
            [0.1, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let inv = inverse(a);
        assert!(mat_approx_eq(mul(a, inv), IDENTITY));
    }

    #[test]
    fn test_gram_schmidt() {
        let mut m = sample_matrix();
        gram_schmidt(&mut m);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                let ip = row(m, i).dot(row(m, j));
                assert!(
                    (ip - expected).abs() < EPSILON,
                    "rows {} and {} not orthonormal: {}",
                    i,
                    j,
                    ip
                );
            }
        }
    }

    #[test]
    fn test_gram_schmidt_keeps_first_direction() {
        let mut m = sample_matrix();
        let before = row(m, 0).normalized();
        gram_schmidt(&mut m);
        assert!(vec_approx_eq(row(m, 0), before));
    }

    #[test]
    fn test_transpose() {
        let a = sample_matrix();
        let t = transpose(a);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(a[i][j], t[j][i]);
            }
        }
        assert!(mat_approx_eq(transpose(t), a));
    }
}
