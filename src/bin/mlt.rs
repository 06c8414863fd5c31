use clap::*;

use mlt_mutation::core::pbrt::*;
use mlt_mutation::integrators::*;
use mlt_mutation::scenes::*;
use std::env;
use std::path::PathBuf;
use std::process;

use log::*;

#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct CommandOptions {
    /// Scene description (.json). A built-in demonstration scene is used when absent.
    #[arg(short, long, value_name = "filename")]
    pub scene: Option<PathBuf>,

    /// Chain settings (.json).
    #[arg(short, long, value_name = "filename")]
    pub config: Option<PathBuf>,

    /// Write the final image to the given filename.
    #[arg(short, long, value_name = "filename", default_value = "mlt.png")]
    pub outfile: PathBuf,

    /// Total number of mutations over all chains.
    #[arg(short, long, value_name = "num")]
    pub mutations: Option<usize>,

    /// Number of chains run in parallel.
    #[arg(long, value_name = "num")]
    pub chains: Option<usize>,

    /// Seed of all random sequences.
    #[arg(long, value_name = "num")]
    pub seed: Option<u64>,

    /// Suppress all text output other than error messages.
    #[clap(long, default_value = "false")]
    pub quiet: bool,

    /// Log messages at or above this level (0 -> INFO,
    /// 1 -> WARNING, 2 -> ERROR).
    #[arg(long, value_name = "num")]
    pub minloglevel: Option<i32>,
}

fn init_logger(opts: &CommandOptions) {
    if let Some(minloglevel) = opts.minloglevel {
        const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        let log_level = LOG_LEVELS[(minloglevel + 2).clamp(0, 4) as usize];
        env::set_var("RUST_LOG", log_level);
    } else {
        //default log level : warn
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned());
        env::set_var("RUST_LOG", log_level);
    }

    env_logger::Builder::from_default_env()
        .format_target(false)
        .format_module_path(false)
        .init();
}

fn load_options(opts: &CommandOptions) -> Result<MltOptions> {
    let mut options = match opts.config.as_ref() {
        Some(path) => MltOptions::load(path)?,
        None => MltOptions::default(),
    };
    if let Some(n) = opts.mutations {
        options.num_mutations = n;
    }
    if let Some(n) = opts.chains {
        options.num_chains = usize::max(1, n);
    }
    if let Some(seed) = opts.seed {
        options.seed = seed;
    }
    return Ok(options);
}

fn run(opts: &CommandOptions) -> Result<()> {
    let options = load_options(opts)?;
    let scene = match opts.scene.as_ref() {
        Some(path) => load_scene_file(path)?,
        None => {
            info!("No scene given, rendering the demonstration scene");
            load_scene(&demo_scene_description())?
        }
    };
    let renderer = MltRenderer::new(&options).quiet(opts.quiet);
    let result = renderer.render(&scene)?;
    result.write_image(&opts.outfile)?;
    return Ok(());
}

pub fn main() {
    let opts = CommandOptions::parse();
    init_logger(&opts);
    if let Err(e) = run(&opts) {
        error!("{}", e);
        process::exit(1);
    }
}
