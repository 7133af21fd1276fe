use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for neon-ofrenda")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc, smoke
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Run cargo deny check
    Deny,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the animation tick benchmark
    Bench,
    /// Run a short headless simulation through the CLI
    Smoke,
}

/// A named cargo invocation.
struct Step {
    name: &'static str,
    args: &'static [&'static str],
}

const FMT: Step = Step {
    name: "cargo fmt check",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Step = Step {
    name: "cargo clippy",
    args: &[
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ],
};
const TEST: Step = Step {
    name: "cargo test",
    args: &["test", "--workspace"],
};
const DENY: Step = Step {
    name: "cargo deny check",
    args: &["deny", "check", "licenses", "bans", "sources"],
};
const DOC: Step = Step {
    name: "cargo doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const BUILD: Step = Step {
    name: "cargo build",
    args: &["build", "--workspace"],
};
const BENCH: Step = Step {
    name: "cargo bench",
    args: &["bench", "-p", "ofrenda-kernel"],
};
const SMOKE: Step = Step {
    name: "headless simulation",
    args: &[
        "run",
        "-p",
        "ofrenda-cli",
        "--",
        "simulate",
        "--ticks",
        "240",
        "--render",
    ],
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[Step] = match cli.command {
        Commands::Check => &[FMT, CLIPPY, TEST, DOC, SMOKE],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Deny => &[DENY],
        Commands::Doc => &[DOC],
        Commands::Build => &[BUILD],
        Commands::Bench => &[BENCH],
        Commands::Smoke => &[SMOKE],
    };

    for step in steps {
        run(step)?;
    }

    Ok(())
}

fn run(step: &Step) -> Result<()> {
    println!("==> Running {}", step.name);
    let status = Command::new("cargo").args(step.args).status()?;
    if !status.success() {
        anyhow::bail!("{} failed", step.name);
    }
    Ok(())
}
