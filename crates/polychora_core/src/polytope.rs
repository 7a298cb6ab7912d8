//! Polytope selection: named presets, packed codes and definition files

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::words::{word_from_digits, Word, RANK};

/// Default edge digit mask: every non-stabilizer reflection is an edge.
pub const DEFAULT_EDGES: u32 = 1111;
/// Default face digit mask: all six reflection pairs define face orbits.
pub const DEFAULT_FACES: u32 = 111111;
/// Default vertex weights: uniform.
pub const DEFAULT_WEIGHTS: u32 = 1111;

/// Everything needed to build one polytope graph.
///
/// Serializable so that definitions can be kept in RON files and loaded
/// with [`PolytopeSpec::from_ron_file`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolytopeSpec {
    /// Upper triangle of the Coxeter matrix: `(c12, c13, c14, c23, c24, c34)`
    pub cartan: [usize; 6],
    /// Generators of the symmetry subgroup
    pub gens: Vec<Word>,
    /// Generators of the vertex stabilizer
    pub v_cogens: Vec<Word>,
    /// Edge words
    pub e_gens: Vec<Word>,
    /// Face words
    pub f_gens: Vec<Word>,
    /// Per-mirror vertex weights
    pub weights: [f32; 4],
}

fn single_letter_words() -> Vec<Word> {
    (0..RANK).map(|i| vec![i]).collect()
}

/// Unpack four weight digits, most significant digit to mirror 0.
pub fn weights_from_digits(mut w: u32) -> [f32; 4] {
    let mut result = [0.0; 4];
    for i in 0..4 {
        result[3 - i] = (w % 10) as f32;
        w /= 10;
    }
    result
}

impl PolytopeSpec {
    /// Decode a packed `CCCCCCGGG` decimal selection code.
    ///
    /// The six leading digits are the Coxeter entries `c12 c13 c14 c23
    /// c24 c34`; the three trailing digits name the stabilizer mirrors,
    /// 1-based with 0 meaning unused (pack with zeros, e.g. `322323000`).
    /// `edges` masks which non-stabilizer mirrors become edge words and
    /// `faces` masks the six mirror pairs, both least significant digit
    /// first. `weights` digits map most significant digit to mirror 0.
    pub fn from_code(mut code: u32, mut edges: u32, mut faces: u32, weights: u32) -> PolytopeSpec {
        assert!(code > 0, "selection code must be non-zero");

        let mut stab = [false; RANK];
        for d in 0..3 {
            let g = (code % 10) as usize;
            code /= 10;
            assert!(g <= RANK, "stabilizer digit #{} out of range: {}", d + 1, g);
            if g > 0 {
                stab[g - 1] = true;
            }
        }

        let mut cartan = [0usize; 6];
        for w in (0..6).rev() {
            cartan[w] = (code % 10) as usize;
            code /= 10;
        }

        let v_cogens: Vec<Word> = (0..RANK)
            .filter(|&i| stab[i])
            .map(|i| word_from_digits(i as u32 + 1))
            .collect();

        let mut e_gens = Vec::new();
        for i in 0..RANK {
            if !stab[i] && edges % 10 != 0 {
                e_gens.push(word_from_digits(i as u32 + 1));
            }
            edges /= 10;
        }

        let mut f_gens = Vec::new();
        for i in 0..RANK {
            for j in i + 1..RANK {
                if faces % 10 != 0 {
                    f_gens.push(vec![i, j]);
                }
                faces /= 10;
            }
        }

        PolytopeSpec {
            cartan,
            gens: single_letter_words(),
            v_cogens,
            e_gens,
            f_gens,
            weights: weights_from_digits(weights),
        }
    }

    /// Load a definition from a RON file.
    pub fn from_ron_file<P: AsRef<Path>>(path: P) -> Result<PolytopeSpec, SpecError> {
        let text = fs::read_to_string(path)?;
        let spec = ron::from_str(&text)?;
        Ok(spec)
    }
}

/// The built-in polytopes and quotient graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    FiveCell,
    EightCell,
    SixteenCell,
    TwentyFourCell,
    HundredTwentyCell,
    SixHundredCell,
    Torus,
    Graph333,
    GraphY,
    Graph334,
    Graph343,
    Graph335,
}

impl Preset {
    /// The packed selection code for this preset.
    pub fn code(self) -> u32 {
        match self {
            Preset::FiveCell => 322323234,
            Preset::EightCell => 422323234,
            Preset::SixteenCell => 322324234,
            Preset::TwentyFourCell => 322423234,
            Preset::HundredTwentyCell => 522323234,
            Preset::SixHundredCell => 322325234,
            Preset::Torus => 922229000,
            Preset::Graph333 => 322323000,
            Preset::GraphY => 333222000,
            Preset::Graph334 => 422323000,
            Preset::Graph343 => 322423000,
            Preset::Graph335 => 522323000,
        }
    }

    /// Decode this preset with the default edge/face/weight masks.
    pub fn spec(self) -> PolytopeSpec {
        PolytopeSpec::from_code(self.code(), DEFAULT_EDGES, DEFAULT_FACES, DEFAULT_WEIGHTS)
    }

    pub const ALL: [Preset; 12] = [
        Preset::FiveCell,
        Preset::EightCell,
        Preset::SixteenCell,
        Preset::TwentyFourCell,
        Preset::HundredTwentyCell,
        Preset::SixHundredCell,
        Preset::Torus,
        Preset::Graph333,
        Preset::GraphY,
        Preset::Graph334,
        Preset::Graph343,
        Preset::Graph335,
    ];

    fn name(self) -> &'static str {
        match self {
            Preset::FiveCell => "5-cell",
            Preset::EightCell => "8-cell",
            Preset::SixteenCell => "16-cell",
            Preset::TwentyFourCell => "24-cell",
            Preset::HundredTwentyCell => "120-cell",
            Preset::SixHundredCell => "600-cell",
            Preset::Torus => "torus",
            Preset::Graph333 => "graph-333",
            Preset::GraphY => "graph-y",
            Preset::Graph334 => "graph-334",
            Preset::Graph343 => "graph-343",
            Preset::Graph335 => "graph-335",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Preset, String> {
        let lower = s.to_ascii_lowercase();
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown polytope '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Error loading a polytope definition file
#[derive(Debug)]
pub enum SpecError {
    /// Could not read the file
    Io(io::Error),
    /// The file is not a valid RON definition
    Parse(ron::error::SpannedError),
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::Io(e) => write!(f, "failed to read definition file: {}", e),
            SpecError::Parse(e) => write!(f, "failed to parse definition file: {}", e),
        }
    }
}

impl std::error::Error for SpecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpecError::Io(e) => Some(e),
            SpecError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for SpecError {
    fn from(e: io::Error) -> SpecError {
        SpecError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SpecError {
    fn from(e: ron::error::SpannedError) -> SpecError {
        SpecError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_24_cell() {
        let spec = Preset::TwentyFourCell.spec();
        assert_eq!(spec.cartan, [3, 2, 2, 4, 2, 3]);
        assert_eq!(spec.gens, vec![vec![0], vec![1], vec![2], vec![3]]);
        assert_eq!(spec.v_cogens, vec![vec![1], vec![2], vec![3]]);
        assert_eq!(spec.e_gens, vec![vec![0]]);
        assert_eq!(spec.f_gens.len(), 6);
        assert_eq!(spec.weights, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_decode_torus() {
        let spec = Preset::Torus.spec();
        assert_eq!(spec.cartan, [9, 2, 2, 2, 2, 9]);
        assert!(spec.v_cogens.is_empty());
        // with no stabilizer every mirror is an edge word
        assert_eq!(spec.e_gens.len(), 4);
    }

    #[test]
    fn test_edge_and_face_masks() {
        let spec = PolytopeSpec::from_code(322323000, 101, 100001, 1234);
        // digits are read least significant first
        assert_eq!(spec.e_gens, vec![vec![0], vec![2]]);
        assert_eq!(spec.f_gens, vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(spec.weights, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "stabilizer digit")]
    fn test_bad_stabilizer_digit() {
        PolytopeSpec::from_code(322323005, DEFAULT_EDGES, DEFAULT_FACES, DEFAULT_WEIGHTS);
    }

    #[test]
    fn test_preset_round_trip_names() {
        for preset in Preset::ALL {
            let parsed: Preset = preset.to_string().parse().unwrap();
            assert_eq!(parsed, preset);
        }
        assert!("dodecahedron".parse::<Preset>().is_err());
    }

    #[test]
    fn test_spec_ron_round_trip() {
        let spec = Preset::FiveCell.spec();
        let text = ron::to_string(&spec).unwrap();
        let back: PolytopeSpec = ron::from_str(&text).unwrap();
        assert_eq!(back, spec);
    }
}
