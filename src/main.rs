use anyhow::{Context, Result};
use clap::Parser;
use habla_session::{DrillSession, Outcome, PromptCache};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "habla", about = "Spanish vocabulary drill with fuzzy speech grading")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Deck id to drill (defaults to the first configured deck)
    #[arg(short, long)]
    deck: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = habla_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter =
        EnvFilter::try_new(&config.general.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("habla starting");

    let deck = config
        .find_deck(cli.deck.as_deref())
        .context("no usable deck in config")?;
    let cards = deck.cards();

    // Preload prompt audio next to the config file; the cache is owned here
    // and handed to the session for lookups.
    let mut prompt_cache = PromptCache::new();
    let audio_base = cli
        .config
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));
    for card in &cards {
        if let Some(key) = &card.audio_key {
            match std::fs::read(audio_base.join(key)) {
                Ok(bytes) => prompt_cache.set(key.clone(), bytes),
                Err(e) => tracing::warn!(key = %key, "prompt audio not loaded: {e}"),
            }
        }
    }
    if !prompt_cache.is_empty() {
        tracing::info!("cached {} prompt clip(s)", prompt_cache.len());
    }

    let mut session = DrillSession::new(
        &deck.id,
        cards,
        config.session.max_attempts,
        config.session.use_alternatives,
    )
    .with_context(|| format!("failed to start session for deck '{}'", deck.id))?;

    // Progress routing: configured sinks, or a log sink when none are set.
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut progress_host = habla_progress::ProgressHost::new(event_rx, config.badge.clone());
    if config.sink.is_empty() {
        progress_host
            .add_route(&deck.id, "log", toml::Value::Table(Default::default()))
            .await
            .context("failed to add default log sink")?;
    } else {
        for route in &config.sink {
            progress_host
                .add_route(&route.session_id, &route.plugin, route.extra.clone())
                .await
                .with_context(|| {
                    format!(
                        "failed to add sink '{}' for session '{}'",
                        route.plugin, route.session_id
                    )
                })?;
        }
    }
    progress_host.start();

    // Transcript source: configured plugin, or interactive stdin.
    let registry = habla_source::SourceRegistry::new();
    let mut source_host = habla_source::SourceHost::new();
    let mut result_rx = source_host
        .take_result_receiver()
        .context("source receiver already taken")?;

    let (source_plugin, source_config) = match &config.source {
        Some(source) => (source.plugin.clone(), source.extra.clone()),
        None => ("stdin".to_string(), toml::Value::Table(Default::default())),
    };
    source_host
        .add_source(&deck.id, &source_plugin, source_config, &registry)
        .await
        .with_context(|| format!("failed to start transcript source '{source_plugin}'"))?;
    source_host.start();

    tracing::info!(
        "drilling deck '{}' ({} words) from source '{}'",
        deck.id,
        session.summary().words_total,
        source_plugin,
    );

    while !session.is_finished() {
        let Some(card) = session.current_card() else {
            break;
        };
        println!("¿Cómo se dice \"{}\"?", card.translation);
        if session.prompt_audio(&prompt_cache).is_some() {
            tracing::debug!("prompt audio available");
        }

        let Some(result) = result_rx.recv().await else {
            tracing::warn!("transcript source ended before the deck was done");
            break;
        };

        match session.submit(&result) {
            Outcome::Correct { rule } => {
                println!("¡Muy bien! ({})", rule.label());
            }
            Outcome::TryAgain { attempts_left } => {
                println!("Casi... inténtalo otra vez ({attempts_left} más)");
            }
            Outcome::Reveal { expected } => {
                println!("Se dice \"{expected}\".");
            }
            Outcome::Interim => {}
            Outcome::Finished(_) => break,
        }

        for event in session.drain_events() {
            let _ = event_tx.send(event);
        }
    }

    let summary = session.summary();
    println!(
        "¡Listo! {}/{} palabras en {} intentos.",
        summary.words_correct, summary.words_total, summary.attempts_total,
    );

    // Flush anything left (e.g. the summary when the source ended early).
    for event in session.drain_events() {
        let _ = event_tx.send(event);
    }
    drop(event_tx);
    drop(result_rx);

    tracing::info!("shutting down");
    source_host.shutdown().await;
    progress_host.shutdown().await;

    Ok(())
}
