//! End-to-end graph construction checks against known polytopes

use polychora_core::{PolytopeGraph, PolytopeSpec, Preset};

fn build(preset: Preset) -> PolytopeGraph {
    PolytopeGraph::build(&preset.spec())
}

fn assert_regular(graph: &PolytopeGraph) {
    for (c0, neighbors) in graph.adj.iter().enumerate() {
        assert_eq!(
            neighbors.len(),
            graph.deg,
            "vertex {} has degree {} instead of {}",
            c0,
            neighbors.len(),
            graph.deg
        );
    }
}

fn assert_symmetric(graph: &PolytopeGraph) {
    for (c0, neighbors) in graph.adj.iter().enumerate() {
        for &c1 in neighbors {
            assert!(c1 < graph.ord);
            assert!(
                graph.adj[c1].contains(&c0),
                "edge {} -> {} has no reverse",
                c0,
                c1
            );
        }
    }
}

#[test]
fn test_5_cell() {
    let graph = build(Preset::FiveCell);
    assert_eq!(graph.ord, 5);
    assert_eq!(graph.deg, 4);
    assert_eq!(graph.ord_f, 10);
    assert_regular(&graph);
    assert_symmetric(&graph);
}

#[test]
fn test_8_cell() {
    let graph = build(Preset::EightCell);
    assert_eq!(graph.ord, 16);
    assert_eq!(graph.deg, 4);
    assert_eq!(graph.ord_f, 24);
    assert_regular(&graph);
    assert_symmetric(&graph);
}

#[test]
fn test_16_cell() {
    let graph = build(Preset::SixteenCell);
    assert_eq!(graph.ord, 8);
    assert_eq!(graph.deg, 6);
    assert_eq!(graph.ord_f, 32);
    assert_regular(&graph);
    assert_symmetric(&graph);
}

#[test]
fn test_24_cell() {
    let graph = build(Preset::TwentyFourCell);
    assert_eq!(graph.ord, 24);
    assert_eq!(graph.deg, 8);
    assert_eq!(graph.edge_count(), 96);
    assert_eq!(graph.ord_f, 96);
    assert_regular(&graph);
    assert_symmetric(&graph);
}

#[test]
fn test_torus_quotient() {
    // two order-9 dihedral factors with no vertex stabilizer
    let graph = build(Preset::Torus);
    assert_eq!(graph.ord, 324);
    assert_eq!(graph.deg, 4);
    assert_regular(&graph);
    assert_symmetric(&graph);
}

#[test]
fn test_24_cell_explicit_spec() {
    // spelling the 24-cell out by hand must agree with the preset
    let spec = PolytopeSpec {
        cartan: [3, 2, 2, 4, 2, 3],
        gens: vec![vec![0], vec![1], vec![2], vec![3]],
        v_cogens: vec![vec![1], vec![2], vec![3]],
        e_gens: vec![vec![0]],
        f_gens: vec![vec![0, 1], vec![0, 2], vec![0, 3]],
        weights: [1.0, 1.0, 1.0, 1.0],
    };
    let graph = PolytopeGraph::build(&spec);
    assert_eq!(graph.ord, 24);
    assert_eq!(graph.deg, 8);
    assert_eq!(graph.ord_f, 96);
}

#[test]
fn test_faces_are_valid_rings() {
    let graph = build(Preset::TwentyFourCell);
    for face in &graph.faces {
        assert!(face.len() >= 3, "degenerate face {:?} survived", face);
        for (k, &c0) in face.iter().enumerate() {
            let c1 = face[(k + 1) % face.len()];
            assert_ne!(c0, c1, "repeated corner in {:?}", face);
            assert!(
                graph.adj[c0].contains(&c1),
                "face corners {} and {} are not adjacent",
                c0,
                c1
            );
        }
    }
}

#[test]
fn test_faces_have_no_duplicates() {
    let graph = build(Preset::SixteenCell);
    let mut seen = std::collections::HashSet::new();
    for face in &graph.faces {
        let mut canon = face.clone();
        canon.sort_unstable();
        assert!(seen.insert(canon), "duplicate face {:?}", face);
    }
}

#[test]
fn test_rebuild_is_identical() {
    let first = build(Preset::EightCell);
    let second = build(Preset::EightCell);
    assert_eq!(first.ord, second.ord);
    assert_eq!(first.deg, second.deg);
    assert_eq!(first.ord_f, second.ord_f);
    assert_eq!(first.adj, second.adj);
    assert_eq!(first.faces, second.faces);
}

#[test]
fn test_points_lie_on_unit_sphere() {
    for preset in [Preset::FiveCell, Preset::SixteenCell, Preset::TwentyFourCell] {
        let graph = build(preset);
        for (c, p) in graph.points.iter().enumerate() {
            assert!(
                (p.length() - 1.0).abs() < 0.001,
                "{} vertex {} has length {}",
                preset,
                c,
                p.length()
            );
        }
    }
}

#[test]
fn test_normals_are_orthogonal_to_corners() {
    let graph = build(Preset::TwentyFourCell);
    for (face, normal) in graph.faces.iter().zip(&graph.normals) {
        for &c in &face[..3] {
            let ip = normal.dot(graph.points[c]);
            assert!(ip.abs() < 0.001, "normal not orthogonal to corner {}: {}", c, ip);
        }
    }
}

#[test]
fn test_multi_letter_stabilizer() {
    // stabilizer generated by the rotation s1*s0 (order 3) in S5
    let spec = PolytopeSpec {
        cartan: [3, 2, 2, 3, 2, 3],
        gens: vec![vec![0], vec![1], vec![2], vec![3]],
        v_cogens: vec![vec![0, 1]],
        e_gens: vec![vec![2]],
        f_gens: vec![vec![2, 3]],
        weights: [1.0, 1.0, 1.0, 1.0],
    };
    let graph = PolytopeGraph::build(&spec);
    assert_eq!(graph.ord, 40);
    assert_symmetric(&graph);
}

#[test]
fn test_save_writes_edge_list() {
    let graph = build(Preset::FiveCell);
    let path = std::env::temp_dir().join("polychora_5_cell_test.graph");
    graph.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("GRAPH"));
    assert_eq!(lines.next(), Some("5 VERTICES"));
    assert_eq!(lines.next(), Some("10 EDGES"));
    assert_eq!(lines.count(), 10);
}
