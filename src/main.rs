use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vecsketch::{Config, InputState, session};

#[derive(Parser, Debug)]
#[command(name = "vecsketch")]
#[command(version, about = "Vector drawing editor: scene export and inspection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved scene to a PNG file
    Export {
        /// Scene file written by the editor
        scene: PathBuf,
        /// Destination PNG path
        output: PathBuf,
        /// Image width in pixels (defaults to [export] width)
        #[arg(long, value_name = "PX")]
        width: Option<i32>,
        /// Image height in pixels (defaults to [export] height)
        #[arg(long, value_name = "PX")]
        height: Option<i32>,
    },
    /// Print the shape count and a per-kind tally of a saved scene
    Inspect {
        /// Scene file written by the editor
        scene: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Export {
            scene,
            output,
            width,
            height,
        } => {
            let width = width.unwrap_or(config.export.width as i32);
            let height = height.unwrap_or(config.export.height as i32);

            let mut state = InputState::from_config(&config);
            state.load_scene(&scene)?;
            state.export_png_file(&output, width, height)?;
            println!(
                "Exported {} shapes to {} ({width}x{height})",
                state.shapes().len(),
                output.display()
            );
        }
        Command::Inspect { scene } => {
            let options = session::options_from_config(&config.session);
            let info = session::inspect_scene(&scene, &options)?;

            println!("Scene file: {}", info.scene_path.display());
            println!("  Size: {} bytes", info.size_bytes);
            println!("  Compressed: {}", if info.compressed { "yes" } else { "no" });
            println!("  Last modified: {}", info.last_modified);
            println!("  Shapes: {}", info.shape_count);
            for (kind, count) in &info.kinds {
                println!("    {kind}: {count}");
            }
            if info.backup_exists {
                println!("  Backup: {}", info.backup_path.display());
            }
        }
    }

    Ok(())
}
