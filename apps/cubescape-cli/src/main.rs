use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use cubescape_author::Template;
use cubescape_common::{MotionConfig, SceneObject};
use cubescape_input::{InputEvent, Key};
use cubescape_persist::{PersistError, Persistence, SceneFileStore};
use cubescape_render::DebugTextRenderer;
use cubescape_runtime::{FixedTicks, InputScript, Scheduler, Session};
use cubescape_tools::SceneInspector;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubescape-cli", about = "CLI tool for cubescape scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// List the prompts that generate a scene
    Templates,
    /// Generate a scene from a prompt and write it as scene.json
    Generate {
        /// Template name
        #[arg(short, long)]
        prompt: String,
        /// RNG seed for colors and random templates
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Output directory
        #[arg(short, long, default_value = "./scene_data")]
        out: PathBuf,
    },
    /// Summarize a scene file
    Inspect {
        /// Path to a scene JSON file
        file: PathBuf,
    },
    /// Walk the player through a generated scene without a window
    Simulate {
        /// Template name; omit for an empty scene
        #[arg(short, long)]
        prompt: Option<String>,
        /// Scene file to load instead of generating one
        #[arg(long, conflicts_with = "prompt")]
        scene: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Movement keys held for the whole run, any of "wasd"
        #[arg(long, default_value = "")]
        hold: String,
        /// Press jump on these ticks
        #[arg(long, value_delimiter = ',')]
        jump: Vec<u64>,
        /// Walking camera: taller eye height, no jumping
        #[arg(long)]
        walk: bool,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn held_keys(hold: &str) -> anyhow::Result<Vec<Key>> {
    hold.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'w' => Ok(Key::Forward),
            's' => Ok(Key::Backward),
            'a' => Ok(Key::Left),
            'd' => Ok(Key::Right),
            other => bail!("unknown movement key '{other}' (expected any of w, a, s, d)"),
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cubescape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", cubescape_kernel::crate_info());
            println!("input: {}", cubescape_input::crate_info());
            println!("author: {}", cubescape_author::crate_info());
            println!("persist: {}", cubescape_persist::crate_info());
            println!("render: {}", cubescape_render::crate_info());
            println!("tools: {}", cubescape_tools::crate_info());
            println!("runtime: {}", cubescape_runtime::crate_info());
        }
        Commands::Templates => {
            let mut rng = StdRng::seed_from_u64(0);
            for template in Template::ALL {
                let count = template.points(&mut rng).len();
                println!("{:<8} {count} cubes", template.name());
            }
        }
        Commands::Generate { prompt, seed, out } => {
            let template: Template = prompt.parse()?;
            tracing::debug!(template = template.name(), seed, "generating scene");
            let mut rng = StdRng::seed_from_u64(seed);
            let session = Session::with_prompt(template.name(), MotionConfig::default(), &mut rng);
            let mut store = SceneFileStore::open(&out)
                .with_context(|| format!("opening {}", out.display()))?;
            session.save(&mut store)?;
            println!("{}", SceneInspector::summary(session.scene().objects()));
            println!("Wrote {}", store.scene_path().display());
        }
        Commands::Inspect { file } => {
            let objects = SceneFileStore::load_path(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            println!("{}", SceneInspector::summary(&objects));
            let spawn = MotionConfig::default().spawn_position();
            if let Some(nearest) = SceneInspector::nearest(&objects, spawn) {
                println!("{nearest}");
            }
        }
        Commands::Simulate {
            prompt,
            scene,
            frames,
            hold,
            jump,
            walk,
            seed,
        } => {
            let config = if walk {
                MotionConfig::walking()
            } else {
                MotionConfig::jumping()
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = match &prompt {
                Some(prompt) => Session::with_prompt(prompt, config, &mut rng),
                None => Session::new(config),
            };
            if let Some(path) = scene {
                let objects = SceneFileStore::load_path(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                session.load(&mut Preloaded(Some(objects)))?;
            }

            let mut script = InputScript::new();
            for key in held_keys(&hold)? {
                script.push(0, InputEvent::KeyDown(key));
            }
            for tick in jump {
                script.push(tick, InputEvent::KeyDown(Key::Jump));
            }

            tracing::debug!(frames, events = script.len(), "starting simulation");
            let renderer = DebugTextRenderer::new();
            let last = Scheduler::new(FixedTicks::new(frames))
                .run(&mut session, &renderer, |tick, s| script.feed(tick, s));
            match last {
                Some(frame) => print!("{frame}"),
                None => println!("No ticks run"),
            }
            let p = session.player();
            println!(
                "Player after {} ticks: pos=({:.2}, {:.2}, {:.2}) grounded={}",
                session.frame(),
                p.position.x,
                p.position.y,
                p.position.z,
                p.grounded
            );
        }
    }

    Ok(())
}

/// Hands an already-read scene to `Session::load`.
struct Preloaded(Option<Vec<SceneObject>>);

impl Persistence for Preloaded {
    fn load(&mut self) -> Result<Option<Vec<SceneObject>>, PersistError> {
        Ok(self.0.take())
    }

    fn save(&mut self, objects: &[SceneObject]) -> Result<(), PersistError> {
        self.0 = Some(objects.to_vec());
        Ok(())
    }
}
