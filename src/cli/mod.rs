pub mod list;
pub mod update;

use std::path::PathBuf;
use std::process;

use clap::Args;

use mvn2bp::config::{Config, CONFIG_FILE};

// Shared by every subcommand.
#[derive(Args)]
pub struct ProjectArgs {
    /// Project root holding Android.bp (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Dependency list (default: <root>/libs.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Resolve the project root and load its config, or exit.
pub fn load_project(args: &ProjectArgs) -> (PathBuf, Config) {
    let root = args
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE));
    match Config::load(&config_path) {
        Ok(config) => (root, config),
        Err(e) => fail(e),
    }
}

pub fn fail(e: mvn2bp::Error) -> ! {
    eprintln!("error: {}", e);
    process::exit(1);
}
