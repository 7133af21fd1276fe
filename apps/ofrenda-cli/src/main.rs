use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ofrenda_common::ObjectKind;
use ofrenda_input::{Action, parse_script};
use ofrenda_kernel::{SceneConfig, SceneContext};
use ofrenda_render::{DebugTextRenderer, RenderView, Renderer};
use ofrenda_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

/// Simulated frame interval for headless runs.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "ofrenda-cli", about = "Headless tool for the neon ofrenda scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML scene configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the fixed object counts
    Info,
    /// Build the scene and run it for a number of frames
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "180")]
        ticks: u32,
        /// Scene seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Also print a text rendering of the final frame
        #[arg(long)]
        render: bool,
    },
    /// Apply a comma-separated list of actions and print the player after each
    Play {
        /// e.g. "interact,collect,dance"
        #[arg(short, long)]
        actions: String,
    },
    /// Print the transform of one object
    Inspect {
        /// Collection: buildings, lights, altar, skulls or particles
        kind: String,
        /// Index within the collection
        #[arg(default_value = "0")]
        index: usize,
    },
    /// Print the effective configuration as YAML
    Config,
}

fn parse_kind(name: &str) -> anyhow::Result<ObjectKind> {
    let name = name.to_ascii_lowercase();
    ObjectKind::ALL
        .into_iter()
        .find(|k| k.label() == name || k.label().trim_end_matches('s') == name)
        .ok_or_else(|| anyhow::anyhow!("unknown collection {name:?}"))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => Ok(SceneConfig::load(path)?),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("ofrenda-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", ofrenda_render::crate_info());
            println!("tools: {}", ofrenda_tools::crate_info());
            let ctx = SceneContext::new(&config);
            for kind in ObjectKind::ALL {
                println!("{:<10} {}", kind.label(), ctx.scene().count(kind));
            }
        }
        Commands::Simulate {
            ticks,
            seed,
            json,
            render,
        } => {
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let mut ctx = SceneContext::new(&config);
            for i in 1..=ticks {
                let report = ctx.frame(FRAME * i);
                if report.finished_loading {
                    tracing::info!(frame = i, "loading cover lifted");
                }
            }
            ctx.teardown();

            let summary = SceneInspector::summary(&ctx);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
            if render {
                let view = RenderView {
                    fov_degrees: config.fov_degrees,
                    ..RenderView::default()
                };
                print!("{}", DebugTextRenderer::new().render(&ctx, &view));
            }
        }
        Commands::Play { actions } => {
            let actions: Vec<Action> = parse_script(&actions)?;
            let mut ctx = SceneContext::new(&config);
            println!(
                "start: energy={} offerings={}",
                ctx.player().energy(),
                ctx.player().offerings()
            );
            for action in actions {
                ctx.dispatch(action);
                let player = ctx.player();
                let name = action.to_string();
                println!(
                    "{name:<8} energy={:>3} offerings={:>3}  \"{}\"",
                    player.energy(),
                    player.offerings(),
                    player.dialog_text()
                );
            }
        }
        Commands::Inspect { kind, index } => {
            let kind = parse_kind(&kind)?;
            let ctx = SceneContext::new(&config);
            match SceneInspector::inspect_object(ctx.scene(), kind, index) {
                Some(info) => println!("{info}"),
                None => anyhow::bail!(
                    "{} has {} objects, no index {index}",
                    kind.label(),
                    ctx.scene().count(kind)
                ),
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
        }
    }

    Ok(())
}
