//! clown CLI - build, inspect and export the parametric clown figure
//!
//! Parameters come from an optional JSON or TOML file, layered with any
//! number of `--set path=value` overrides.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use clown::export::{stl::export_stl, write_json};
use clown::{ClownConfig, Figure, PartialClownParams, PARAMETER_PATHS};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "clown")]
#[command(about = "Parametric clown figure builder", long_about = None)]
struct Cli {
    /// Rendering configuration (TOML): palette colors and tessellation detail
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Partial parameters file (.json or .toml)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Override one parameter, e.g. `legs.length=15` or `arms.leftArm.rotZ=45deg`
    #[arg(short, long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, f64)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the figure and export it
    Build {
        #[command(flatten)]
        params: ParamArgs,
        /// Output file (format determined by extension: .json, .stl)
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the resolved parameters as JSON
    Params {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Display node, mesh and triangle counts for the built figure
    Info {
        #[command(flatten)]
        params: ParamArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ClownConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClownConfig::default(),
    };

    match cli.command {
        Commands::Build { params, output } => {
            let figure = Figure::new(&resolve(&params)?)?;
            export_figure(&figure, &config, &output)?;
        }
        Commands::Params { params } => {
            let figure = Figure::new(&resolve(&params)?)?;
            println!("{}", serde_json::to_string_pretty(&figure.params())?);
        }
        Commands::Info { params } => {
            let figure = Figure::new(&resolve(&params)?)?;
            show_info(&figure, &config);
        }
    }

    Ok(())
}

/// Parse `path=value`, where value is radians or degrees with a `deg` suffix.
fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (path, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got '{s}'"))?;
    let path = path.trim();
    if !PARAMETER_PATHS.contains(&path) {
        return Err(format!(
            "unknown parameter '{path}' (expected one of: {})",
            PARAMETER_PATHS.join(", ")
        ));
    }

    let value = value.trim();
    let parsed = match value.strip_suffix("deg") {
        Some(degrees) => degrees
            .trim()
            .parse::<f64>()
            .map(f64::to_radians),
        None => value.parse::<f64>(),
    }
    .map_err(|e| format!("invalid value '{value}' for {path}: {e}"))?;

    Ok((path.to_string(), parsed))
}

/// Parse a partial parameters file by extension.
fn parse_params(text: &str, ext: &str) -> Result<PartialClownParams> {
    match ext.to_lowercase().as_str() {
        "json" => Ok(serde_json::from_str(text)?),
        "toml" => Ok(toml::from_str(text)?),
        _ => bail!("Unknown parameters format: {}", ext),
    }
}

/// File parameters with `--set` overrides layered on top.
fn resolve(args: &ParamArgs) -> Result<PartialClownParams> {
    let mut partial = match &args.params {
        Some(path) => load_params(path)?,
        None => PartialClownParams::empty(),
    };
    let mut overrides = PartialClownParams::empty();
    for (path, value) in &args.set {
        overrides.set(path, *value)?;
    }
    partial.merge(&overrides);
    debug!(?partial, "resolved parameter update");
    Ok(partial)
}

fn load_params(path: &Path) -> Result<PartialClownParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading parameters {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    parse_params(&text, ext).with_context(|| format!("parsing parameters {}", path.display()))
}

fn export_figure(figure: &Figure, config: &ClownConfig, output: &Path) -> Result<()> {
    let ext = output.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" => {
            write_json(&figure.to_document(config), output)?;
            info!(path = %output.display(), "exported scene JSON");
        }
        "stl" => {
            let mesh = figure.to_mesh(&config.detail);
            export_stl(&mesh, output)?;
            info!(
                path = %output.display(),
                triangles = mesh.num_triangles(),
                "exported STL"
            );
        }
        _ => {
            bail!("Unknown output format: {}", ext);
        }
    }
    Ok(())
}

fn show_info(figure: &Figure, config: &ClownConfig) {
    let node = figure.node();
    let params = figure.params();
    let mesh = figure.to_mesh(&config.detail);

    println!("clown figure");
    println!("  Nodes: {}", node.descendant_count() + 1);
    println!("  Meshes: {}", node.mesh_count());
    println!("  Head offset: {:.3}", clown::head_offset(&params.body, &params.legs));
    println!("\nMesh stats:");
    println!("  Total triangles: {}", mesh.num_triangles());
    println!("  Total vertices: {}", mesh.num_vertices());
    if let Some((min, max)) = mesh.bounds() {
        println!(
            "  Bounds: [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            min[0], min[1], min[2], max[0], max[1], max[2]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignments_accept_radians_and_degrees() {
        assert_eq!(
            parse_assignment("legs.length=15").unwrap(),
            ("legs.length".to_string(), 15.0)
        );
        let (path, value) = parse_assignment("arms.leftArm.rotZ = 90deg").unwrap();
        assert_eq!(path, "arms.leftArm.rotZ");
        assert!((value - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn bad_assignments_are_rejected() {
        assert!(parse_assignment("legs.length").is_err());
        assert!(parse_assignment("legs.width=3").is_err());
        assert!(parse_assignment("legs.length=long").is_err());
    }

    #[test]
    fn params_files_parse_by_extension() {
        let toml = "[legs]\nlength = 15\n\n[arms.leftArm]\nrotX = 0.5\n";
        let from_toml = parse_params(toml, "toml").unwrap();
        let from_json =
            parse_params(r#"{"legs":{"length":15},"arms":{"leftArm":{"rotX":0.5}}}"#, "JSON")
                .unwrap();
        assert_eq!(from_toml, from_json);
        assert!(parse_params("", "yaml").is_err());
    }

    #[test]
    fn overrides_win_over_file() {
        let path = std::env::temp_dir().join(format!("clown-cli-params-{}.toml", std::process::id()));
        std::fs::write(&path, "[legs]\nlength = 15\n\n[arms.leftArm]\nrotX = 0.5\nrotZ = 0.1\n")
            .unwrap();
        let args = ParamArgs {
            params: Some(path.clone()),
            set: vec![
                ("legs.length".to_string(), 4.0),
                ("arms.leftArm.rotY".to_string(), 0.2),
                ("legs.length".to_string(), 6.0),
            ],
        };
        let partial = resolve(&args);
        std::fs::remove_file(&path).ok();
        let partial = partial.unwrap();

        assert_eq!(partial.legs.and_then(|l| l.length), Some(6.0));
        let left = partial.arms.and_then(|a| a.left_arm).unwrap();
        // file fields in the same arm record survive the override
        assert_eq!(left.rot_x, Some(0.5));
        assert_eq!(left.rot_y, Some(0.2));
        assert_eq!(left.rot_z, Some(0.1));
    }
}
