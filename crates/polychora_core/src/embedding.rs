//! Geometric embedding of the coset graph on the unit 3-sphere
//!
//! From the Coxeter matrix alone we can recover the four mirror
//! hyperplanes (up to a global rotation), one Householder reflection per
//! mirror, and a representative coordinate for coset 0. The graph builder
//! then propagates that coordinate to every vertex through the matrix
//! representations of the symmetry generators.

use std::f32::consts::PI;

use polychora_math::{mat4, Mat4, Vec4};

use crate::words::{Word, RANK};

/// Matrix data produced for one polytope embedding.
pub struct Embedding {
    /// One matrix representation per symmetry generator word
    pub gen_reps: Vec<Mat4>,
    /// Coordinate of coset 0, normalized onto the unit sphere
    pub origin: Vec4,
}

#[inline]
fn sqrt_or_zero(x: f32) -> f32 {
    if x > 0.0 {
        x.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn sq(x: f32) -> f32 {
    x * x
}

/// Build reflection matrices and the coset-0 coordinate.
///
/// `vertex_coset` lists one parsed word per group element of coset 0; it
/// is only consulted when some vertex-stabilizer word has more than one
/// letter, in which case the origin is averaged over the whole coset
/// instead of read off the basis vertices.
pub fn build_embedding(
    cartan: &[usize; 6],
    vertex_coset: &[Word],
    gens: &[Word],
    v_cogens: &[Word],
    weights: [f32; 4],
) -> Embedding {
    // full symmetric Coxeter matrix, unit diagonal
    let mut coxeter = [[1usize; RANK]; RANK];
    let mut w = 0;
    for i in 0..RANK {
        for j in i + 1..RANK {
            coxeter[i][j] = cartan[w];
            coxeter[j][i] = cartan[w];
            w += 1;
        }
    }

    // cosines between the reflection hyperplanes
    let mut cosine = [[0.0f32; RANK]; RANK];
    for i in 0..RANK {
        for j in 0..RANK {
            cosine[i][j] = (PI / coxeter[i][j] as f32).cos();
        }
    }

    // mirror normals, built triangularly so that pairwise inner products
    // reproduce the cosines
    let mut axis: Mat4 = [[0.0; 4]; 4];
    axis[0][0] = 1.0;
    axis[1][0] = cosine[1][0];
    axis[1][1] = sqrt_or_zero(1.0 - sq(axis[1][0]));
    axis[2][0] = cosine[2][0];
    axis[2][1] = (cosine[2][1] - axis[2][0] * axis[1][0]) / axis[1][1];
    axis[2][2] = sqrt_or_zero(1.0 - sq(axis[2][0]) - sq(axis[2][1]));
    axis[3][0] = cosine[3][0];
    axis[3][1] = (cosine[3][1] - axis[3][0] * axis[1][0]) / axis[1][1];
    axis[3][2] = (cosine[3][2] - axis[3][0] * axis[2][0] - axis[3][1] * axis[2][1]) / axis[2][2];
    axis[3][3] = sqrt_or_zero(1.0 - sq(axis[3][0]) - sq(axis[3][1]) - sq(axis[3][2]));

    for i in 0..RANK {
        for j in i..RANK {
            let ip = mat4::row(axis, i).dot(mat4::row(axis, j));
            assert!(
                (ip - cosine[j][i].abs()).abs() < 1e-4,
                "axes do not match the Coxeter cosines: <a{}, a{}> = {}",
                i,
                j,
                ip
            );
        }
    }

    // dual basis; columns give the basis vertices. Not normalized, or the
    // origin would drift off center.
    let mut ortho = mat4::inverse(axis);
    for i in 0..RANK {
        // flip later columns so pairwise angles come out acute
        for j in i + 1..RANK {
            let mut ip = 0.0;
            for k in 0..RANK {
                ip += ortho[k][i] * ortho[k][j];
            }
            if ip >= -1e-5 {
                // duoprism bases sit right at zero
                continue;
            }
            log::debug!("flipping axis {}", j);
            for k in 0..RANK {
                ortho[k][j] = -ortho[k][j];
                axis[j][k] = -axis[j][k];
            }
        }
    }
    let verts = mat4::transpose(ortho);

    // Householder reflector per mirror: orthonormalize a frame seeded with
    // the mirror normal, then negate that first direction
    let mut reflectors = [mat4::IDENTITY; RANK];
    for letter in 0..RANK {
        let mut frame: Mat4 = [[0.0; 4]; 4];
        for j in 0..RANK {
            frame[0][j] = axis[letter][j];
            for i in 0..letter {
                frame[i + 1][j] = if i == j { 1.0 } else { 0.0 };
            }
            for i in letter + 1..RANK {
                frame[i][j] = if i == j { 1.0 } else { 0.0 };
            }
        }
        mat4::gram_schmidt(&mut frame);
        for i in 0..RANK {
            for j in 0..RANK {
                let mut x = -frame[0][i] * frame[0][j];
                for k in 1..RANK {
                    x += frame[k][i] * frame[k][j];
                }
                reflectors[letter][i][j] = x;
            }
        }
    }

    // matrix representation of each symmetry generator
    let gen_reps: Vec<Mat4> = gens
        .iter()
        .map(|word| {
            assert!(!word.is_empty(), "empty symmetry generator word");
            let mut m = reflectors[word[0]];
            for &letter in &word[1..] {
                m = mat4::mul(m, reflectors[letter]);
            }
            m
        })
        .collect();

    // coordinate of coset 0
    let mut origin = Vec4::ZERO;
    let mut included = [false; RANK];
    let mut simple_basis = true;
    for word in v_cogens {
        if word.len() > 1 {
            simple_basis = false;
            break;
        }
        for &letter in word {
            included[letter] = true;
        }
    }
    if simple_basis {
        // weighted average of the basis vertices the stabilizer moves
        for i in 0..RANK {
            if included[i] {
                continue;
            }
            origin += mat4::row(verts, i) * weights[i];
        }
    } else {
        // average over the whole vertex coset. Reflectors are applied in
        // word order here; the multi-letter stabilizer presets depend on
        // this orientation, so keep it as is.
        for word in vertex_coset {
            for i in 0..RANK {
                let mut term = mat4::row(verts, i);
                for &letter in word {
                    term = mat4::transform(reflectors[letter], term);
                }
                origin += term;
            }
        }
    }

    Embedding { gen_reps, origin: origin.normalized() }
}
