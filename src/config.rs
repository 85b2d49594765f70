use std::env;

pub const DATA_DIR: &str = "data";

const TIMEOUT_VAR: &str = "TIMEOUT";
const DEFAULT_TIMEOUT: &str = "1";
const URL_BASE: &str =
    "https://raw.githubusercontent.com/borestad/blocklist-abuseipdb/refs/heads/main";

/// Run parameters derived from the advisory duration selector. The value
/// only picks which upstream list (and which local filenames) to use; it is
/// not an HTTP timeout.
pub struct Config {
    pub list_name: String,
    pub download_url: String,
}

impl Config {
    pub fn from_env() -> Config {
        let timeout = env::var(TIMEOUT_VAR).unwrap_or_else(|_| DEFAULT_TIMEOUT.to_owned());
        Config::with_timeout(&timeout)
    }

    pub fn with_timeout(timeout: &str) -> Config {
        let list_name = format!("abuseipdb-s100-{}d", timeout);
        let download_url = format!("{}/{}.ipv4", URL_BASE, list_name);

        Config {
            list_name,
            download_url,
        }
    }

    pub fn snapshot_file(&self) -> String {
        format!("{}.ipv4", self.list_name)
    }

    pub fn collapsed_file(&self) -> String {
        format!("{}-collapsed.ipv4", self.list_name)
    }
}
