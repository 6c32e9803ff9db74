//! CLI entrypoint for wikiprov
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wikiprov_application::{
    AttachProvenanceInput, AttachProvenanceUseCase, LookupProvenanceUseCase, NoProgress,
    ProvenanceProgress, QueryWithProvenanceInput, QueryWithProvenanceUseCase,
};
use wikiprov_domain::KnowledgeBase;
use wikiprov_infrastructure::{
    ConfigLoader, FileConfig, FileWikibaseConfig, HttpQueryExecutor, WikibaseRevisionSource,
};
use wikiprov_presentation::{
    Cli, Command, ConsoleFormatter, DEMO_HISTORY, DEMO_IDENTIFIER, OutputFormat,
    ProgressReporter, SimpleProgress, SparqlScript,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(config_path)
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(config_path));
        println!();
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Version => {
            let endpoints = config.wikibase.endpoints()?;
            println!("wikiprov {} ({})", env!("CARGO_PKG_VERSION"), endpoints.user_agent());
        }
        Command::Lookup {
            id,
            history,
            demo,
            output,
        } => {
            let (id, default_history) = if demo {
                (DEMO_IDENTIFIER.to_string(), DEMO_HISTORY)
            } else {
                match id {
                    Some(id) => (id, config.provenance.history),
                    None => bail!("Please provide an identifier to look up"),
                }
            };
            lookup(&config, &id, history.unwrap_or(default_history), output).await?;
        }
        Command::Query {
            script,
            param,
            history,
            threads,
            endpoint,
            wikibase_url,
            query,
        } => {
            let script = read_script(query, script.as_deref())?;
            let request = QueryRequest {
                endpoint: endpoint
                    .or(script.endpoint)
                    .unwrap_or_else(|| config.query.endpoint.clone()),
                key: param
                    .or(script.subject_param)
                    .unwrap_or_else(|| config.provenance.key.clone()),
                history: history
                    .or(script.history)
                    .unwrap_or(config.provenance.history),
                threads: threads.unwrap_or(config.provenance.threads),
                wikibase_url: wikibase_url.or(script.wikibase_url),
                query: script.query,
            };
            run_query(&config, request, cli.quiet).await?;
        }
    }

    Ok(())
}

/// Resolved settings for one `query` run
struct QueryRequest {
    endpoint: String,
    key: String,
    history: usize,
    threads: usize,
    wikibase_url: Option<String>,
    query: String,
}

/// Load the query from `--query`, a script file, or piped stdin
fn read_script(inline: Option<String>, path: Option<&Path>) -> Result<SparqlScript> {
    if let Some(query) = inline {
        return Ok(SparqlScript {
            query,
            ..Default::default()
        });
    }

    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None if !std::io::stdin().is_terminal() => {
            std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
        }
        None => bail!("No query given; pass a script file, pipe one on stdin or use --query"),
    };

    Ok(SparqlScript::parse(&text)?)
}

/// The `[wikibase]` section with a site override applied.
///
/// Entity IRIs are expected on the overriding site's domain.
fn wikibase_config(config: &FileConfig, site: Option<String>) -> Result<FileWikibaseConfig> {
    let mut wikibase = config.wikibase.clone();
    if let Some(site) = site {
        wikibase.entity_domain = KnowledgeBase::from_site_url(&site)?.domain().to_string();
        wikibase.base_uri = site;
        wikibase.api_url = None;
        wikibase.permalink_base = None;
    }
    Ok(wikibase)
}

fn revision_source(wikibase: &FileWikibaseConfig) -> Result<Arc<WikibaseRevisionSource>> {
    let endpoints = wikibase.endpoints()?;
    info!("Using Wikibase API at {}", endpoints.api_url());
    Ok(Arc::new(WikibaseRevisionSource::new(
        endpoints,
        Some(wikibase.timeout()),
    )?))
}

async fn lookup(
    config: &FileConfig,
    id: &str,
    history: usize,
    output: OutputFormat,
) -> Result<()> {
    let source = revision_source(&config.wikibase)?;
    let use_case = LookupProvenanceUseCase::new(source, config.wikibase.knowledge_base()?);

    let params = config.pool_params().with_history_depth(history);
    let record = use_case.execute(id, params).await?;

    let rendered = match output {
        OutputFormat::Json => ConsoleFormatter::format_record_json(&record),
        OutputFormat::Text => ConsoleFormatter::format_record(&record),
    };
    println!("{}", rendered);
    Ok(())
}

async fn run_query(config: &FileConfig, request: QueryRequest, quiet: bool) -> Result<()> {
    let wikibase = wikibase_config(config, request.wikibase_url)?;
    let source = revision_source(&wikibase)?;
    let executor = Arc::new(HttpQueryExecutor::new(
        source.endpoints().user_agent(),
        Some(wikibase.timeout()),
    )?);

    // Ctrl-C stops outstanding revision requests; finished records are kept
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding requests");
            on_interrupt.cancel();
        }
    });

    let attach = AttachProvenanceUseCase::new(source, wikibase.knowledge_base()?)
        .with_cancellation(cancel);
    let use_case = QueryWithProvenanceUseCase::new(executor, attach);

    if request.key.trim().is_empty() {
        warn!("No subject parameter given, returning results without provenance");
    }
    info!("History: {}, Threads: {}", request.history, request.threads);

    let params = config
        .pool_params()
        .with_history_depth(request.history)
        .with_concurrency(request.threads);
    let input = QueryWithProvenanceInput::new(
        request.endpoint,
        request.query,
        AttachProvenanceInput::new(request.key).with_params(params),
    );

    let progress: Box<dyn ProvenanceProgress> = if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let envelope = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::format_envelope_json(&envelope));
    if !quiet {
        eprintln!("{}", ConsoleFormatter::format_summary(&envelope));
    }
    Ok(())
}
