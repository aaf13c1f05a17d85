//! titlelang — run one lookup-or-compute invocation.
//!
//! Reads the invocation event (`{"RecordID": .., "Title": .., "OriginalLanguage": ..}`)
//! from `--event`, from the individual flags, or from stdin, and prints the
//! response JSON on stdout.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use titlelang::config::{Config, Secrets};
use titlelang::{AnalysisRequest, OpenAiAnalyzer, TitleLangError, TitleLanguageService};

/// Look up or compute the language analysis of a media title.
#[derive(Parser)]
#[command(name = "titlelang")]
#[command(version = titlelang::PKG_VERSION)]
#[command(about = "Read-through cache of title language analysis")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to an invocation event JSON file.
    #[arg(short, long, conflicts_with_all = ["record_id", "title", "original_language"])]
    event: Option<PathBuf>,

    /// Record identifier.
    #[arg(long)]
    record_id: Option<String>,

    /// Media title to analyze.
    #[arg(long)]
    title: Option<String>,

    /// Caller-supplied original language (stored as given).
    #[arg(long)]
    original_language: Option<String>,

    /// API key for the analysis service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Input is checked before any configuration so missing fields are
    // always reported as a client error.
    let request = read_request(&args).and_then(|request| {
        request.validate()?;
        Ok(request)
    });

    let response = match request {
        Err(e) => titlelang::InvocationResponse::failure(&e),
        Ok(request) => match build_service(&args) {
            Ok(service) => service.handle(request).await,
            Err(e) => {
                warn!(error = %e, "failed to start");
                titlelang::InvocationResponse::failure(&e)
            }
        },
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize response: {e}");
            return ExitCode::FAILURE;
        }
    }

    if response.status.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Build a [`TitleLanguageService`] from configuration.
fn build_service(args: &Args) -> Result<TitleLanguageService, TitleLangError> {
    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    let api_key = args
        .api_key
        .clone()
        .or_else(|| secrets.api_key())
        .ok_or_else(|| TitleLangError::Configuration("no analysis API key configured".into()))?;

    let analyzer = OpenAiAnalyzer::with_base_url(api_key, &config.analysis.base_url)
        .model(&config.analysis.model)
        .timeout_secs(config.analysis.timeout_secs);

    info!(
        version = titlelang::PKG_VERSION,
        model = %config.analysis.model,
        store = ?config.store.backend,
        "titlelang starting"
    );

    TitleLanguageService::builder()
        .store(config.store.build())
        .analyzer(Arc::new(analyzer))
        .build()
}

/// Assemble the invocation event from the arguments or stdin.
fn read_request(args: &Args) -> Result<AnalysisRequest, TitleLangError> {
    if let Some(ref path) = args.event {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TitleLangError::InvalidInput(format!("failed to read event {path:?}: {e}"))
        })?;
        return parse_event(&content);
    }

    if args.record_id.is_some() || args.title.is_some() {
        return Ok(AnalysisRequest {
            record_id: args.record_id.clone(),
            title: args.title.clone(),
            original_language: args.original_language.clone(),
        });
    }

    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| TitleLangError::InvalidInput(format!("failed to read stdin: {e}")))?;
    parse_event(&content)
}

fn parse_event(content: &str) -> Result<AnalysisRequest, TitleLangError> {
    serde_json::from_str(content)
        .map_err(|e| TitleLangError::InvalidInput(format!("invalid event JSON: {e}")))
}
