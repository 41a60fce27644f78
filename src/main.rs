//! gptr-agent: research a topic through the GPT Researcher backend.
//!
//! Runs a query through a Rig agent that has the web and local researcher
//! tools registered, or calls a selected tool directly with `--direct`.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use rig_gptr::engine::{ReportSource, ReportType};
use rig_gptr::{Config, ResearchAgent};

#[derive(Parser, Debug)]
#[command(
    name = "gptr-agent",
    version,
    about = "Research a topic via the GPT Researcher backend",
    long_about = r#"
Research a topic via the GPT Researcher backend.

By default the query goes through an LLM agent (Ollama) that decides whether
to research on the web or in the local document directory. With --direct the
selected researcher tool is called immediately, no LLM in the loop.

PREREQUISITES:
  1. A running GPT Researcher backend (GPTR_BASE_URL, default http://localhost:8000)
  2. For agent mode: a running Ollama with the configured model
  3. For local research: DOC_PATH exported for the backend process

EXAMPLES:
  # Agent decides where to research
  gptr-agent "What are the latest advancements in AI?"

  # Straight to the web researcher, no LLM routing
  gptr-agent --direct "What are the latest advancements in AI?"

  # Outline report from local documents
  gptr-agent --direct --source local --report-type outline "What can you tell about the company?"
"#
)]
struct Args {
    /// The topic or question to research
    #[arg(value_name = "QUERY")]
    query: String,

    /// Call the selected researcher tool directly instead of going through
    /// the agent
    #[arg(short, long, default_value = "false")]
    direct: bool,

    /// Where to research in direct mode
    #[arg(short, long, value_enum, default_value = "web")]
    source: SourceArg,

    /// Report template to request from the backend
    #[arg(short = 't', long, value_enum, default_value = "research")]
    report_type: ReportTypeArg,

    /// Ollama model for agent mode (overrides OLLAMA_MODEL)
    #[arg(short, long, env = "OLLAMA_MODEL")]
    model: Option<String>,

    /// Enable verbose/debug logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SourceArg {
    Web,
    Local,
}

impl From<SourceArg> for ReportSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Web => ReportSource::Web,
            SourceArg::Local => ReportSource::Local,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportTypeArg {
    Research,
    Subtopic,
    Custom,
    Outline,
    Resource,
}

impl From<ReportTypeArg> for ReportType {
    fn from(value: ReportTypeArg) -> Self {
        match value {
            ReportTypeArg::Research => ReportType::Research,
            ReportTypeArg::Subtopic => ReportType::Subtopic,
            ReportTypeArg::Custom => ReportType::Custom,
            ReportTypeArg::Outline => ReportType::Outline,
            ReportTypeArg::Resource => ReportType::Resource,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    let mut config = Config::from_env()?;

    if let Some(model) = args.model {
        info!(model = %model, "using model from command line");
        config.model = model;
    }

    config.validate()?;

    info!(
        backend = %config.gptr_base_url,
        model = %config.model,
        "configuration loaded"
    );

    let agent = ResearchAgent::new(config);
    let report_type = ReportType::from(args.report_type);

    let result = if args.direct {
        agent
            .generate_report(&args.query, ReportSource::from(args.source), report_type)
            .await
    } else {
        agent.research(&args.query, report_type).await
    };

    match result {
        Ok(report) => {
            println!("\n{}", "=".repeat(60));
            println!("RESEARCH REPORT");
            println!("{}\n", "=".repeat(60));
            println!("{}", report);
        }
        Err(e) => {
            error!(error = %e, "research failed");
            eprintln!("\nResearch failed: {}", e);

            let message = e.to_string();
            if message.contains("Connection failed") {
                eprintln!("\nTip: make sure the GPT Researcher backend is running at the");
                eprintln!("     address in GPTR_BASE_URL (default http://localhost:8000).");
            } else if message.contains("Agent execution failed") {
                eprintln!("\nTip: make sure Ollama is running and the model is installed:");
                eprintln!("     ollama serve && ollama pull llama3.2");
            } else if message.contains("DOC_PATH") {
                eprintln!("\nTip: export DOC_PATH to the directory of documents the backend");
                eprintln!("     should research before using --source local.");
            }

            return Err(e);
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber for structured logging.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}
