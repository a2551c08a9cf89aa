mod cli;

use clap::{Parser, Subcommand};

use cli::ProjectArgs;

#[derive(Parser)]
#[command(
    name = "mvn2bp",
    version,
    about = "Vendor Maven dependencies as Soong modules"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download every package and rewrite the build files
    Update {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Show declared packages and their module names (offline)
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Update { project } => cli::update::cmd_update(project),
        Command::List { project } => cli::list::cmd_list(project),
    }
}
