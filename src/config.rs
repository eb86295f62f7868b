use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix of the name each group status is registered under.
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_register_with_sink")]
    pub register_with_sink: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            register_with_sink: default_register_with_sink(),
        }
    }
}

fn default_domain() -> String {
    "xraft".to_string()
}

fn default_register_with_sink() -> bool {
    true
}
