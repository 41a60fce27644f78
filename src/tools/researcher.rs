//! Researcher tool adapters.
//!
//! [`LocalResearcher`] and [`WebResearcher`] expose the GPT Researcher
//! engine as Rig tools. The adapters do marshalling only: validate the
//! query, hand the engine a request built from the report type and source
//! fixed at construction, await its two operations in order (research,
//! then report), and return the report string unchanged. Every engine
//! failure surfaces as a single wrapped error carrying the original
//! message.

use std::sync::Arc;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::engine::{ReportRequest, ReportSource, ReportType, ResearchEngine};
use crate::error::ToolError;

/// Input arguments shared by both researcher tools.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchArgs {
    /// The search query for the research
    pub query: String,
}

/// JSON schema advertised to the LLM by both tools.
fn research_parameters() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query for the research"
            }
        },
        "required": ["query"],
        "additionalProperties": false
    })
}

/// Shared adapter core: an engine handle plus the configuration fixed at
/// construction. Holds no other state, so invocations are independent.
#[derive(Clone)]
struct Researcher {
    engine: Arc<dyn ResearchEngine>,
    report_type: ReportType,
    report_source: ReportSource,
}

impl Researcher {
    fn new(
        engine: Arc<dyn ResearchEngine>,
        report_type: ReportType,
        report_source: ReportSource,
    ) -> Self {
        Self {
            engine,
            report_type,
            report_source,
        }
    }

    /// Generate a report for `query` by delegating to the engine.
    ///
    /// The engine's research and report operations run in order, exactly
    /// once each. The returned string is the engine's output untouched.
    async fn generate_report(&self, tool: &'static str, query: &str) -> Result<String, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::EmptyQuery);
        }

        let request = ReportRequest {
            query: query.to_string(),
            report_type: self.report_type,
            report_source: self.report_source,
        };

        info!(
            tool,
            query = %request.query,
            report_type = request.report_type.as_str(),
            "starting research"
        );

        let result = async {
            let context = self.engine.conduct_research(&request).await?;
            let report = self.engine.write_report(&request, context).await?;
            Ok::<String, ToolError>(report)
        }
        .await;

        match result {
            Ok(report) => {
                info!(tool, chars = report.len(), "report generated");
                Ok(report)
            }
            Err(e) => {
                error!(tool, error = %e, "report generation failed");
                Err(e)
            }
        }
    }
}

/// Research a topic using data and files from a local document directory.
///
/// The backend reads documents from the directory named by its `DOC_PATH`
/// environment variable; that variable must be set for the backend
/// process before this tool is useful.
#[derive(Clone)]
pub struct LocalResearcher {
    inner: Researcher,
}

impl LocalResearcher {
    /// Create a local researcher producing the default `research_report`.
    pub fn new(engine: Arc<dyn ResearchEngine>) -> Self {
        Self::with_report_type(engine, ReportType::default())
    }

    /// Create a local researcher with an explicit report template.
    pub fn with_report_type(engine: Arc<dyn ResearchEngine>, report_type: ReportType) -> Self {
        Self {
            inner: Researcher::new(engine, report_type, ReportSource::Local),
        }
    }
}

impl Tool for LocalResearcher {
    const NAME: &'static str = "local_gpt_researcher";

    type Args = ResearchArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Conduct thorough research on a specific topic or query by accessing \
                          data and files from your local directory."
                .to_string(),
            parameters: research_parameters(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.inner.generate_report(Self::NAME, &args.query).await
    }
}

/// Research a topic using the internet.
#[derive(Clone)]
pub struct WebResearcher {
    inner: Researcher,
}

impl WebResearcher {
    /// Create a web researcher producing the default `research_report`.
    pub fn new(engine: Arc<dyn ResearchEngine>) -> Self {
        Self::with_report_type(engine, ReportType::default())
    }

    /// Create a web researcher with an explicit report template.
    pub fn with_report_type(engine: Arc<dyn ResearchEngine>, report_type: ReportType) -> Self {
        Self {
            inner: Researcher::new(engine, report_type, ReportSource::Web),
        }
    }
}

impl Tool for WebResearcher {
    const NAME: &'static str = "web_gpt_researcher";

    type Args = ResearchArgs;
    type Output = String;
    type Error = ToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Conduct thorough research on a specific topic or query using the \
                          internet."
                .to_string(),
            parameters: research_parameters(),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.inner.generate_report(Self::NAME, &args.query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::ResearchContext;
    use async_trait::async_trait;

    struct StubEngine;

    #[async_trait]
    impl ResearchEngine for StubEngine {
        async fn conduct_research(
            &self,
            _request: &ReportRequest,
        ) -> Result<ResearchContext, EngineError> {
            Ok(ResearchContext::new(serde_json::Value::Null))
        }

        async fn write_report(
            &self,
            _request: &ReportRequest,
            _context: ResearchContext,
        ) -> Result<String, EngineError> {
            Ok("stub report".to_string())
        }
    }

    fn stub_engine() -> Arc<dyn ResearchEngine> {
        Arc::new(StubEngine)
    }

    #[test]
    fn test_args_deserialization() {
        let args: ResearchArgs = serde_json::from_str(r#"{"query": "What is Rust?"}"#).unwrap();
        assert_eq!(args.query, "What is Rust?");
    }

    #[test]
    fn test_args_require_query() {
        let result: Result<ResearchArgs, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_tool_definitions() {
        let local = LocalResearcher::new(stub_engine());
        let web = WebResearcher::new(stub_engine());

        let local_def = local.definition(String::new()).await;
        let web_def = web.definition(String::new()).await;

        assert_eq!(local_def.name, "local_gpt_researcher");
        assert_eq!(web_def.name, "web_gpt_researcher");
        assert!(local_def.description.contains("local directory"));
        assert!(web_def.description.contains("internet"));

        for def in [&local_def, &web_def] {
            let required = def.parameters["required"].as_array().unwrap();
            assert_eq!(required, &[serde_json::json!("query")]);
            assert_eq!(def.parameters["additionalProperties"], serde_json::json!(false));
        }
    }

    #[test]
    fn test_source_fixed_by_constructor() {
        let local = LocalResearcher::new(stub_engine());
        let web = WebResearcher::with_report_type(stub_engine(), ReportType::Subtopic);

        assert_eq!(local.inner.report_source, ReportSource::Local);
        assert_eq!(local.inner.report_type, ReportType::Research);
        assert_eq!(web.inner.report_source, ReportSource::Web);
        assert_eq!(web.inner.report_type, ReportType::Subtopic);
    }

    #[tokio::test]
    async fn test_whitespace_query_rejected() {
        let web = WebResearcher::new(stub_engine());
        let result = web
            .call(ResearchArgs {
                query: "   \n\t".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ToolError::EmptyQuery)));
    }
}
