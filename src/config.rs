//! Environment-based configuration.
//!
//! # Environment Variables
//!
//! | Variable | Purpose | Default |
//! |----------|---------|---------|
//! | `GPTR_BASE_URL` | GPT Researcher backend address | `http://localhost:8000` |
//! | `GPTR_API_KEY` | Bearer token for the backend | unset |
//! | `GPTR_TIMEOUT_SECS` | Per-request backend timeout | `300` |
//! | `GPTR_MAX_RETRIES` | Retry bound for transient backend failures | `3` |
//! | `DOC_PATH` | Document directory for local research | unset |
//! | `OLLAMA_MODEL` | Model for the demo agent | `llama3.2` |
//! | `OLLAMA_API_BASE_URL` | Ollama server address | `http://localhost:11434` |
//!
//! The backend process itself reads its own credentials (`OPENAI_API_KEY`,
//! `TAVILY_API_KEY`, and `DOC_PATH` for local document access); this
//! process never touches them beyond surfacing a clear error when local
//! research is requested without `DOC_PATH` set.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::engine::GptrClient;

/// Main configuration for the research agent.
#[derive(Debug, Clone)]
pub struct Config {
    /// GPT Researcher backend address
    pub gptr_base_url: String,

    /// Optional bearer token for the backend
    pub gptr_api_key: Option<String>,

    /// Per-request backend timeout in seconds
    pub gptr_timeout_secs: u64,

    /// Retry bound for transient backend failures
    pub gptr_max_retries: u32,

    /// Document directory the backend uses for local research
    pub doc_path: Option<String>,

    /// The Ollama model driving the demo agent
    pub model: String,

    /// Ollama server URL
    pub ollama_host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gptr_base_url: "http://localhost:8000".to_string(),
            gptr_api_key: None,
            gptr_timeout_secs: 300,
            gptr_max_retries: 3,
            doc_path: None,
            model: "llama3.2".to_string(),
            ollama_host: "http://localhost:11434".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset. Reads a `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(val) = env::var("GPTR_BASE_URL") {
            config.gptr_base_url = val;
        }

        if let Ok(val) = env::var("GPTR_API_KEY") {
            config.gptr_api_key = Some(val);
        }

        if let Ok(val) = env::var("GPTR_TIMEOUT_SECS") {
            config.gptr_timeout_secs = val
                .parse()
                .context("GPTR_TIMEOUT_SECS must be a positive integer number of seconds")?;
        }

        if let Ok(val) = env::var("GPTR_MAX_RETRIES") {
            config.gptr_max_retries = val
                .parse()
                .context("GPTR_MAX_RETRIES must be a non-negative integer")?;
        }

        if let Ok(val) = env::var("DOC_PATH") {
            config.doc_path = Some(val);
        }

        if let Ok(val) = env::var("OLLAMA_MODEL") {
            config.model = val;
        }

        if let Ok(val) = env::var("OLLAMA_API_BASE_URL") {
            config.ollama_host = val;
        }

        Ok(config)
    }

    /// Validate the configuration before the agent starts.
    pub fn validate(&self) -> Result<()> {
        if !self.gptr_base_url.starts_with("http://") && !self.gptr_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "GPTR_BASE_URL must be an http(s) URL, got: {}",
                self.gptr_base_url
            );
        }

        if self.gptr_timeout_secs == 0 {
            anyhow::bail!("GPTR_TIMEOUT_SECS must be at least 1");
        }

        if self.model.is_empty() {
            anyhow::bail!("OLLAMA_MODEL cannot be empty");
        }

        Ok(())
    }

    /// The document directory, required when local research is requested.
    pub fn require_doc_path(&self) -> Result<&str> {
        self.doc_path.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "local research needs DOC_PATH set to the directory of documents \
                 the backend should read"
            )
        })
    }

    /// Build a backend client from this configuration.
    pub fn engine_client(&self) -> GptrClient {
        let mut client = GptrClient::new(&self.gptr_base_url)
            .with_timeout(Duration::from_secs(self.gptr_timeout_secs))
            .with_max_retries(self.gptr_max_retries);

        if let Some(ref key) = self.gptr_api_key {
            client = client.with_api_key(key.clone());
        }

        client
    }
}
