//! The `GET /` response body.

use crate::config::GreetingConfig;

/// Pre-rendered greeting prefix; only the hostname varies per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    prefix: String,
}

impl Greeting {
    pub fn new(config: &GreetingConfig) -> Self {
        let mut prefix = String::from("Hello from EKS");
        if !config.version.is_empty() {
            prefix.push(' ');
            prefix.push_str(&config.version);
        }
        prefix.push_str("! ");
        if !config.message.is_empty() {
            prefix.push_str(&config.message);
            prefix.push(' ');
        }
        Self { prefix }
    }

    /// `Hello from EKS v2! Deployed via GitHub Actions CI/CD. Host: <hostname>\n`
    pub fn render(&self, hostname: &str) -> String {
        format!("{}Host: {hostname}\n", self.prefix)
    }
}
