use clap::Parser;

use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "codacy-sonar-importer")]
#[clap(about = "Import SonarQube quality-profile rules into Codacy", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
