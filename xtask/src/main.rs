use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;

/// Prompts exercised by the smoke run.
const TEMPLATES: [&str; 7] = ["house", "tower", "wall", "bridge", "room", "city", "maze"];

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for cubescape")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// fmt, clippy, tests, then the CLI smoke run
    Check,
    /// cargo fmt --check on all crates
    Fmt,
    /// clippy on all targets with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Generate, inspect and simulate every template through cubescape-cli
    Smoke,
}

fn cargo<I, S>(what: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    println!("==> {what}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("{what} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("cargo fmt --check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "cargo clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("cargo test", &["test", "--workspace"])
}

fn run_smoke() -> Result<()> {
    let out = PathBuf::from("target").join("xtask-smoke");
    for prompt in TEMPLATES {
        let dir = out.join(prompt);
        let dir_arg = dir.to_string_lossy();
        let scene = dir.join("scene.json");
        let scene_arg = scene.to_string_lossy();
        let cli = |extra: &[&str]| -> Vec<String> {
            ["run", "-q", "-p", "cubescape-cli", "--"]
                .iter()
                .chain(extra)
                .map(|s| s.to_string())
                .collect()
        };

        let generate = cli(&["generate", "--prompt", prompt, "--out", &dir_arg]);
        cargo(&format!("generate {prompt}"), &generate)?;

        let inspect = cli(&["inspect", &scene_arg]);
        cargo(&format!("inspect {prompt}"), &inspect)?;

        let simulate = cli(&[
            "simulate", "--scene", &scene_arg, "--frames", "120", "--hold", "w", "--jump", "0,60",
        ]);
        cargo(&format!("simulate {prompt}"), &simulate)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_smoke()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Smoke => run_smoke()?,
    }

    Ok(())
}
