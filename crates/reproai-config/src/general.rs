//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    "reports".to_string()
}

fn default_user_agent() -> String {
    format!("reproai-cli/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory the JSON and HTML reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// `User-Agent` header sent with every outbound request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
        }
    }
}
