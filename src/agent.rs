//! Research agent wiring.
//!
//! Builds a Rig agent with both researcher tools registered, and offers a
//! direct mode that invokes a single tool without agent reasoning.

use std::sync::Arc;

use anyhow::Result;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::ollama;
use rig::tool::Tool;
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{GptrClient, ReportSource, ReportType, ResearchEngine};
use crate::tools::{LocalResearcher, ResearchArgs, WebResearcher};

/// The system prompt defines the agent's behavior around the two tools.
const RESEARCH_SYSTEM_PROMPT: &str = r#"
You are a research assistant with two research tools:
- web_gpt_researcher: researches a topic or query using the internet
- local_gpt_researcher: researches a topic or query using a local document directory

Pick the tool that matches where the information lives and call it ONCE with
the user's query. The tool returns a finished report. Return that report to
the user verbatim; do not summarize, rewrite, or call a tool a second time
for the same request.
"#;

/// Orchestrates the LLM and the researcher tools.
pub struct ResearchAgent {
    config: Config,
    engine: Arc<GptrClient>,
}

impl ResearchAgent {
    /// Create an agent backed by the configuration's backend client.
    pub fn new(config: Config) -> Self {
        let engine = Arc::new(config.engine_client());
        Self { config, engine }
    }

    fn engine(&self) -> Arc<dyn ResearchEngine> {
        self.engine.clone()
    }

    /// Full agent mode: the LLM decides which researcher tool to call.
    pub async fn research(&self, query: &str, report_type: ReportType) -> Result<String> {
        info!(query = %query, "starting research task");

        if self.config.doc_path.is_none() {
            warn!("DOC_PATH not set; local research will fail on the backend");
        }

        // Rig's Ollama client reads OLLAMA_API_BASE_URL from the environment.
        std::env::set_var("OLLAMA_API_BASE_URL", &self.config.ollama_host);
        let ollama_client = ollama::Client::from_env();

        let agent = ollama_client
            .agent(&self.config.model)
            .preamble(RESEARCH_SYSTEM_PROMPT)
            .tool(WebResearcher::with_report_type(self.engine(), report_type))
            .tool(LocalResearcher::with_report_type(self.engine(), report_type))
            .build();

        let response = agent
            .prompt(query)
            .multi_turn(3)
            .await
            .map_err(|e| anyhow::anyhow!("Agent execution failed: {}", e))?;

        info!("research completed");
        Ok(response)
    }

    /// Direct mode: invoke the selected researcher tool without agent
    /// reasoning and return the report as-is.
    pub async fn generate_report(
        &self,
        query: &str,
        source: ReportSource,
        report_type: ReportType,
    ) -> Result<String> {
        let args = ResearchArgs {
            query: query.to_string(),
        };

        let report = match source {
            ReportSource::Web => {
                WebResearcher::with_report_type(self.engine(), report_type)
                    .call(args)
                    .await?
            }
            ReportSource::Local => {
                self.config.require_doc_path()?;
                LocalResearcher::with_report_type(self.engine(), report_type)
                    .call(args)
                    .await?
            }
        };

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_creation() {
        let agent = ResearchAgent::new(Config::default());
        assert_eq!(agent.config.model, "llama3.2");
    }

    #[test]
    fn test_system_prompt_names_both_tools() {
        assert!(RESEARCH_SYSTEM_PROMPT.contains("web_gpt_researcher"));
        assert!(RESEARCH_SYSTEM_PROMPT.contains("local_gpt_researcher"));
    }

    #[tokio::test]
    async fn test_direct_local_requires_doc_path() {
        let agent = ResearchAgent::new(Config::default());
        let result = agent
            .generate_report("anything", ReportSource::Local, ReportType::Research)
            .await;

        let message = result.unwrap_err().to_string();
        assert!(message.contains("DOC_PATH"));
    }
}
