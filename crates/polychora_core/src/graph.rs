//! The coset graph: vertices, edges, faces and 4D coordinates
//!
//! [`PolytopeGraph::build`] runs the whole pipeline: relators, coset
//! enumeration, subgroup and coset decomposition, adjacency, face orbits
//! and the geometric embedding. The result is immutable; selecting a new
//! polytope means building a new graph and dropping the old one.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use polychora_math::{cross4, mat4, Vec4};

use crate::embedding::build_embedding;
use crate::group::Group;
use crate::polytope::PolytopeSpec;
use crate::relations::coxeter_relators;
use crate::words::{assert_letters_in_range, Ring, Word};

/// A finished polytope graph.
///
/// `adj` is `ord x deg` (the graph is regular by vertex transitivity),
/// `faces` keeps the geometric corner order of each ring, and `points`
/// and `normals` are unit 4-vectors.
pub struct PolytopeGraph {
    /// Vertex count
    pub ord: usize,
    /// Uniform vertex degree
    pub deg: usize,
    /// Face count
    pub ord_f: usize,
    /// Neighbor lists, `adj[coset][0..deg]`
    pub adj: Vec<Vec<usize>>,
    /// Face rings of coset indices, corner order preserved
    pub faces: Vec<Ring>,
    /// One 4D coordinate per vertex
    pub points: Vec<Vec4>,
    /// One 4D normal per face (zero when degenerate)
    pub normals: Vec<Vec4>,
}

/// Detects rings already seen, comparing by sorted copy so that corner
/// order and starting point do not matter.
#[derive(Default)]
struct FaceRecognizer {
    known: HashSet<Ring>,
}

impl FaceRecognizer {
    /// Record `face`; true if an equivalent ring was already recorded.
    fn recognize(&mut self, face: &Ring) -> bool {
        let mut canon = face.clone();
        canon.sort_unstable();
        !self.known.insert(canon)
    }

    fn clear(&mut self) {
        self.known.clear();
    }
}

impl PolytopeGraph {
    /// Build the graph for one polytope selection.
    ///
    /// Runs to completion synchronously; malformed static configuration
    /// (letters out of range, edge words leaving the symmetry subgroup)
    /// aborts with a descriptive panic rather than returning an error.
    pub fn build(spec: &PolytopeSpec) -> PolytopeGraph {
        assert_letters_in_range("gens", &spec.gens);
        assert_letters_in_range("v_cogens", &spec.v_cogens);
        assert_letters_in_range("e_gens", &spec.e_gens);
        assert_letters_in_range("f_gens", &spec.f_gens);

        let words = coxeter_relators(&spec.cartan);
        log::debug!("relations = {:?}", words);

        let group = Group::enumerate(&words);
        log::debug!("group order = {}", group.order());

        // symmetry subgroup: closure of the identity under the generators
        let mut subgroup = vec![0usize];
        let mut in_subgroup = vec![false; group.order()];
        in_subgroup[0] = true;
        let mut g = 0;
        while g < subgroup.len() {
            let g0 = subgroup[g];
            for word in &spec.gens {
                let g1 = group.left_word(g0, word);
                if !in_subgroup[g1] {
                    in_subgroup[g1] = true;
                    subgroup.push(g1);
                }
            }
            g += 1;
        }
        log::debug!("subgroup order = {}", subgroup.len());

        // partition the subgroup into cosets of the vertex stabilizer;
        // coset 0 contains the identity
        let mut coset: Vec<Option<usize>> = vec![None; group.order()];
        let mut ord = 0;
        for &g0 in &subgroup {
            if coset[g0].is_some() {
                continue;
            }
            let c0 = ord;
            ord += 1;
            coset[g0] = Some(c0);
            let mut members = vec![g0];
            let mut i = 0;
            while i < members.len() {
                let g1 = members[i];
                for word in &spec.v_cogens {
                    let g2 = group.left_word(g1, word);
                    if coset[g2].is_none() {
                        coset[g2] = Some(c0);
                        members.push(g2);
                    }
                }
                i += 1;
            }
        }
        log::info!("cosets table built: ord = {}", ord);
        let coset_of =
            |g: usize| coset[g].expect("element outside the generated subgroup");

        // edges: e_gens applied to every subgroup element, deduplicated
        // per coset and symmetrized
        let mut neigh: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); ord];
        for &g0 in &subgroup {
            let c0 = coset_of(g0);
            for word in &spec.e_gens {
                let g1 = group.left_word(g0, word);
                assert!(in_subgroup[g1], "edge leaves subgroup");
                let c1 = coset_of(g1);
                if c0 != c1 {
                    neigh[c0].insert(c1);
                }
            }
        }
        for c0 in 0..ord {
            for c1 in neigh[c0].clone() {
                neigh[c1].insert(c0);
            }
        }
        let adj: Vec<Vec<usize>> = neigh.into_iter().map(|n| n.into_iter().collect()).collect();
        let deg = adj[0].len();
        log::info!("edge table built: deg = {}", deg);

        // faces: orbit of each basic face cycle under the right action of
        // the symmetry generators, then projected down to coset rings
        let mut faces: Vec<Ring> = Vec::new();
        for face in &spec.f_gens {
            log::debug!("defining faces on {:?}", face);

            // basic face in the full group: cycle through the face word
            // until it returns to the identity after at least one period
            let mut basic: Ring = vec![0];
            let mut g0 = 0usize;
            let mut c = 0usize;
            loop {
                g0 = group.left(g0, face[c % face.len()]);
                if c >= face.len() && g0 == 0 {
                    break;
                }
                if in_subgroup[g0] && g0 != basic[basic.len() - 1] {
                    basic.push(g0);
                }
                c += 1;
            }
            log::debug!("sides/face (free) = {}", basic.len());

            let mut recognized = FaceRecognizer::default();
            recognized.recognize(&basic);
            let mut faces_g = vec![basic];
            let mut i = 0;
            while i < faces_g.len() {
                let f = faces_g[i].clone();
                for word in &spec.gens {
                    let f_j: Ring = f.iter().map(|&g| group.right_word(g, word)).collect();
                    if !recognized.recognize(&f_j) {
                        faces_g.push(f_j);
                    }
                }
                i += 1;
            }

            // project corners to coset indices, dropping immediate and
            // wraparound repeats; anything shorter than a triangle is a
            // degenerate face and silently discarded
            recognized.clear();
            for face_g in &faces_g {
                let mut ring: Ring = vec![coset_of(face_g[0])];
                for &g in &face_g[1..] {
                    let c = coset_of(g);
                    if c != ring[ring.len() - 1] && c != ring[0] {
                        ring.push(c);
                    }
                }
                if ring.len() < 3 {
                    continue;
                }
                if !recognized.recognize(&ring) {
                    faces.push(ring);
                }
            }
        }
        let ord_f = faces.len();
        log::info!("faces defined: order = {}", ord_f);

        // words spelling every element of coset 0, for the embedding
        let vertex_coset: Vec<Word> = subgroup
            .iter()
            .filter(|&&g0| coset_of(g0) == 0)
            .map(|&g0| group.parse(g0))
            .collect();

        let embedding = build_embedding(
            &spec.cartan,
            &vertex_coset,
            &spec.gens,
            &spec.v_cogens,
            spec.weights,
        );
        log::debug!("geometry built");

        // propagate coset 0's coordinate along the right-action spanning
        // tree of the subgroup
        let mut points = vec![Vec4::ZERO; ord];
        points[0] = embedding.origin;
        let mut pointed = vec![false; ord];
        pointed[0] = true;
        let mut reached = vec![0usize];
        let mut is_reached = vec![false; group.order()];
        is_reached[0] = true;
        let mut i = 0;
        while i < reached.len() {
            let g0 = reached[i];
            for (j, word) in spec.gens.iter().enumerate() {
                let g1 = group.right_word(g0, word);
                if !is_reached[g1] {
                    let c1 = coset_of(g1);
                    if !pointed[c1] {
                        points[c1] = mat4::transform(embedding.gen_reps[j], points[coset_of(g0)]);
                        pointed[c1] = true;
                    }
                    is_reached[g1] = true;
                    reached.push(g1);
                }
            }
            i += 1;
        }
        log::debug!("point set built");

        let normals: Vec<Vec4> = faces
            .iter()
            .map(|face| cross4(points[face[0]], points[face[1]], points[face[2]]).normalized())
            .collect();
        log::debug!("face normals built");

        PolytopeGraph { ord, deg, ord_f, adj, faces, points, normals }
    }

    /// Number of undirected edges
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.ord * self.deg / 2
    }

    /// Export the edge list as plain text:
    /// a `GRAPH` header, vertex and edge counts, then one `v0 v1 1` line
    /// per undirected edge with `v0 < v1`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        log::info!("exporting to {}", path.as_ref().display());
        let mut file = BufWriter::new(File::create(path)?);
        writeln!(file, "GRAPH")?;
        writeln!(file, "{} VERTICES", self.ord)?;
        writeln!(file, "{} EDGES", self.edge_count())?;
        for (c0, neighbors) in self.adj.iter().enumerate() {
            for &c1 in neighbors {
                if c0 < c1 {
                    writeln!(file, "{} {} 1", c0, c1)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_recognizer_ignores_rotation() {
        let mut recognizer = FaceRecognizer::default();
        assert!(!recognizer.recognize(&vec![0, 1, 2]));
        assert!(recognizer.recognize(&vec![2, 0, 1]));
        assert!(recognizer.recognize(&vec![1, 2, 0]));
        assert!(!recognizer.recognize(&vec![0, 1, 3]));
    }

    #[test]
    fn test_face_recognizer_clear() {
        let mut recognizer = FaceRecognizer::default();
        assert!(!recognizer.recognize(&vec![0, 1, 2]));
        recognizer.clear();
        assert!(!recognizer.recognize(&vec![0, 1, 2]));
    }
}
