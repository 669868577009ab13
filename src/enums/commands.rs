use clap::Subcommand;

use crate::config::constants::{DEFAULT_STANDARD_NAME, DEFAULT_XML_FILE};

#[derive(Subcommand)]
pub enum Commands {
    /// Import SonarQube rules into a new Codacy coding standard
    Import {
        /// GitHub organization name
        #[clap(long)]
        organization: String,
        /// Name for the coding standard
        #[clap(long, default_value = DEFAULT_STANDARD_NAME)]
        standard_name: String,
        /// Path to the SonarQube XML rules file
        #[clap(long, default_value = DEFAULT_XML_FILE)]
        xml_file: String,
        /// Codacy API token (falls back to CODACY_API_TOKEN, then .env)
        #[clap(long)]
        api_token: Option<String>,
    },
    /// List XML rules with no matching Codacy pattern, and vice versa
    CheckMissing {
        #[clap(long, default_value = DEFAULT_XML_FILE)]
        xml_file: String,
        #[clap(long)]
        api_token: Option<String>,
    },
    /// Compare the patterns enabled in an existing coding standard with the XML
    Verify {
        /// GitHub organization name
        #[clap(long)]
        organization: String,
        /// Coding standard ID to verify
        #[clap(long)]
        standard_id: String,
        #[clap(long, default_value = DEFAULT_XML_FILE)]
        xml_file: String,
        #[clap(long)]
        api_token: Option<String>,
    },
    /// Report catalog patterns that fall outside the XML rule set
    DefaultPatterns {
        #[clap(long, default_value = DEFAULT_XML_FILE)]
        xml_file: String,
        #[clap(long)]
        api_token: Option<String>,
    },
}
