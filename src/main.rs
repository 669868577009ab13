use clap::Parser;

use codacy_sonar_importer::structs::cli::Cli;
use codacy_sonar_importer::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = CommandRunner::run_command(cli.command).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
