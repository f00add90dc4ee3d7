//! grimesh CLI - mesh inspection and build configuration tool.
//!
//! Usage: grimesh <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `grimesh --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use grimesh::config::BuildConfig;
use grimesh::io;
use grimesh::mesh::Mesh;

#[derive(Parser)]
#[command(name = "grimesh")]
#[command(author, version, about = "GRI mesh CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// List every boundary face group
        #[arg(long)]
        groups: bool,
    },

    /// Validate a mesh and rewrite it in canonical form
    Convert {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,
    },

    /// Shift every node by a fixed offset
    Translate {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Offset, one value per dimension (e.g. `1.0,0.5`)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        offset: Vec<f64>,
    },

    /// Write the build settings file for the solver bindings
    Configure {
        /// Root of the solver installation (default: $XFLOW_HOME)
        #[arg(long)]
        xflow_home: Option<PathBuf>,

        /// Python interpreter (default: $PYTHON or python3)
        #[arg(long)]
        python: Option<String>,

        /// Extra compiler flag, repeat for several (default: $CFLAGS)
        #[arg(long = "cflags", allow_hyphen_values = true)]
        cflags: Vec<String>,

        /// Settings file to write
        #[arg(short, long, default_value = "grimesh-build.json")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input, groups } => {
            cmd_info(&input, groups)?;
        }

        Commands::Convert { input, output } => {
            cmd_convert(&input, &output)?;
        }

        Commands::Translate {
            input,
            output,
            offset,
        } => {
            cmd_translate(&input, &output, &offset)?;
        }

        Commands::Configure {
            xflow_home,
            python,
            cflags,
            output,
        } => {
            cmd_configure(xflow_home, python, cflags, &output)?;
        }
    }

    Ok(())
}

fn load(input: &Path) -> Result<Mesh, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh = io::load(input)?;
    log::info!("loaded {} in {:.2?}", input.display(), start.elapsed());
    Ok(mesh)
}

fn cmd_info(input: &Path, show_groups: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(input)?;

    println!("File: {}", input.display());
    println!("Dimension: {}", mesh.dimension());
    println!("Nodes: {}", mesh.num_nodes());
    println!("Elements: {}", mesh.num_elements());

    println!("Element groups: {}", mesh.num_element_groups());
    for (i, group) in mesh.element_groups().iter().enumerate() {
        println!(
            "  [{}] {} elements, {} nodes each, order {}, basis {}",
            i,
            group.num_elements(),
            group.nodes_per_element(),
            group.order(),
            group.basis()
        );
    }

    let num_faces: usize = mesh.boundary_face_groups().iter().map(|g| g.num_faces()).sum();
    println!(
        "Boundary face groups: {} ({} faces)",
        mesh.num_boundary_face_groups(),
        num_faces
    );
    if show_groups {
        for (i, group) in mesh.boundary_face_groups().iter().enumerate() {
            println!("  [{}] {}: {} faces", i, group.title(), group.num_faces());
        }
    }

    if let Some((min, max)) = mesh.bounding_box() {
        let fmt = |v: &grimesh::nalgebra::DVector<f64>| {
            v.iter()
                .map(|c| format!("{:.3}", c))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("Bounding box: ({}) to ({})", fmt(&min), fmt(&max));
    }

    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = load(input)?;

    println!(
        "Loaded: {} nodes, {} elements",
        mesh.num_nodes(),
        mesh.num_elements()
    );

    io::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}

fn cmd_translate(
    input: &Path,
    output: &Path,
    offset: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = load(input)?;

    println!("Loaded: {} nodes", mesh.num_nodes());
    println!("Translating by {:?}...", offset);
    mesh.translate(offset)?;

    io::save(&mesh, output)?;
    println!("Saved: {}", output.display());

    Ok(())
}

fn cmd_configure(
    xflow_home: Option<PathBuf>,
    python: Option<String>,
    cflags: Vec<String>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BuildConfig::from_env();

    if let Some(home) = xflow_home {
        config.xflow_home = home;
    }
    if let Some(python) = python {
        config.python_exec = python;
    }
    if !cflags.is_empty() {
        config.compiler_flags = cflags;
    }

    if !config.xflow_home.is_dir() {
        log::warn!(
            "solver root {} does not exist or is not a directory",
            config.xflow_home.display()
        );
    }

    config.save(output)?;

    println!("XFLOW_HOME: {}", config.xflow_home.display());
    println!("Include dir: {}", config.include_dir().display());
    println!("Library dir: {}", config.lib_dir().display());
    println!("Python: {}", config.python_exec);
    println!("Compiler flags: {}", config.compiler_flags.join(" "));
    println!("Saved: {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_cflags() {
        let cli = Cli::try_parse_from([
            "grimesh",
            "configure",
            "--xflow-home",
            "/opt/xflow",
            "--cflags",
            "-O2",
            "--cflags",
            "-fPIC",
        ])
        .unwrap();

        match cli.command {
            Commands::Configure { cflags, output, .. } => {
                assert_eq!(cflags, vec!["-O2", "-fPIC"]);
                assert_eq!(output, PathBuf::from("grimesh-build.json"));
            }
            _ => panic!("expected configure command"),
        }
    }
}
