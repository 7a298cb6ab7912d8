//! Polychora - 4D polytope graph builder
//!
//! Enumerates the symmetry group of a rank-4 Coxeter presentation and
//! prints (or exports) the resulting vertex/edge/face graph embedded on
//! the unit 3-sphere.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use polychora::config::AppConfig;
use polychora_core::{
    weights_from_digits, word_from_str, PolytopeGraph, PolytopeSpec, Preset, Word,
};
use polychora_math::stereographic;

#[derive(Parser, Debug)]
#[command(name = "polychora", version, about = "4D polytope graph builder")]
struct Cli {
    /// Named polytope (5-cell, 8-cell, 16-cell, 24-cell, 120-cell,
    /// 600-cell, torus, graph-333, graph-y, graph-334, graph-343,
    /// graph-335)
    polytope: Option<Preset>,

    /// Packed CCCCCCGGG selection code, e.g. 322423234
    #[arg(long, conflicts_with = "polytope")]
    code: Option<u32>,

    /// RON definition file with a full polytope spec
    #[arg(long, conflicts_with_all = ["polytope", "code"])]
    definition: Option<PathBuf>,

    /// Custom Coxeter entries c12 c13 c14 c23 c24 c34
    #[arg(long, num_args = 6, conflicts_with_all = ["polytope", "code", "definition"])]
    cartan: Option<Vec<usize>>,

    /// Vertex stabilizer word as letter digits (repeatable), e.g. 1 or 23
    #[arg(long = "v-cogen", requires = "cartan")]
    v_cogens: Vec<String>,

    /// Edge word as letter digits (repeatable)
    #[arg(long = "e-gen", requires = "cartan")]
    e_gens: Vec<String>,

    /// Face word as letter digits (repeatable)
    #[arg(long = "f-gen", requires = "cartan")]
    f_gens: Vec<String>,

    /// Edge digit mask, least significant digit is mirror 0
    #[arg(long)]
    edges: Option<u32>,

    /// Face digit mask over the six mirror pairs
    #[arg(long)]
    faces: Option<u32>,

    /// Vertex weight digits, most significant digit is mirror 0
    #[arg(long)]
    weights: Option<u32>,

    /// Write the edge-list export file
    #[arg(long)]
    export: bool,

    /// Export path (defaults to the configured export.path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print stereographically projected vertex coordinates
    #[arg(long)]
    points: bool,
}

fn parse_words(args: &[String]) -> Result<Vec<Word>, String> {
    args.iter()
        .map(|s| word_from_str(s).map_err(|e| e.to_string()))
        .collect()
}

fn build_spec(cli: &Cli, config: &AppConfig) -> Result<PolytopeSpec, String> {
    if let Some(path) = &cli.definition {
        return PolytopeSpec::from_ron_file(path).map_err(|e| e.to_string());
    }

    if let Some(entries) = &cli.cartan {
        let mut cartan = [0usize; 6];
        cartan.copy_from_slice(entries);
        return Ok(PolytopeSpec {
            cartan,
            gens: (0..4).map(|i| vec![i]).collect(),
            v_cogens: parse_words(&cli.v_cogens)?,
            e_gens: parse_words(&cli.e_gens)?,
            f_gens: parse_words(&cli.f_gens)?,
            weights: weights_from_digits(cli.weights.unwrap_or(config.build.weights)),
        });
    }

    let code = match (cli.code, cli.polytope) {
        (Some(code), _) => code,
        (None, Some(preset)) => preset.code(),
        (None, None) => config.build.polytope.parse::<Preset>()?.code(),
    };
    Ok(PolytopeSpec::from_code(
        code,
        cli.edges.unwrap_or(config.build.edges),
        cli.faces.unwrap_or(config.build.faces),
        cli.weights.unwrap_or(config.build.weights),
    ))
}

fn main() -> ExitCode {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.debug.log_level),
    )
    .init();

    let cli = Cli::parse();

    let spec = match build_spec(&cli, &config) {
        Ok(spec) => spec,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let graph = PolytopeGraph::build(&spec);
    println!(
        "{} vertices, degree {}, {} edges, {} faces",
        graph.ord,
        graph.deg,
        graph.edge_count(),
        graph.ord_f
    );

    if cli.points {
        for p in &graph.points {
            let q = stereographic(*p, config.view.projection_w0);
            println!("{:.6} {:.6} {:.6}", q[0], q[1], q[2]);
        }
    }

    if cli.export {
        let path = cli
            .output
            .unwrap_or_else(|| PathBuf::from(&config.export.path));
        if let Err(e) = graph.save(&path) {
            log::error!("export to {} failed: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
