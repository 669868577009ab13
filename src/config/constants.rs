use std::time::Duration;

pub const CODACY_BASE_URL: &str = "https://app.codacy.com/api/v3";
pub const CODACY_API_TOKEN_ENV: &str = "CODACY_API_TOKEN";
pub const ENV_FILE: &str = ".env";

/// UUID of the SonarC# tool in Codacy.
pub const SONAR_CSHARP_TOOL_UUID: &str = "8954dff3-f19c-429c-ac76-c45fa5e73b62";
pub const SONAR_CSHARP_TOOL_NAME: &str = "SonarC#";

/// Codacy pattern ids for SonarC# are the SonarQube rule key with this prefix.
pub const SONAR_CSHARP_PATTERN_PREFIX: &str = "SonarCSharp_";

pub const DEFAULT_XML_FILE: &str = "csharp_sonarqube_rules.xml";
pub const DEFAULT_STANDARD_NAME: &str = "Imported Sonar Rules";
pub const DEFAULT_STANDARD_LANGUAGE: &str = "CSharp";

/// Git provider segment of the organization endpoints.
pub const DEFAULT_PROVIDER: &str = "gh";

pub const HTTP_TIMEOUT_SECS: u64 = 60;

/// Upper bound on patterns per PATCH so one oversized request cannot take
/// down the whole apply.
pub const PATTERN_BATCH_SIZE: usize = 500;

pub const SKIPPED_REPORT_PREFIX: &str = "skipped_rules";
pub const ENABLED_REPORT_PREFIX: &str = "enabled_patterns";
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn http_timeout() -> Duration {
    Duration::from_secs(HTTP_TIMEOUT_SECS)
}
