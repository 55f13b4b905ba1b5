//! Hey - personal terminal assistant
//!
//! Main entry point: parses the CLI, loads configuration, opens the chat
//! store, and dispatches to the browse, chat, or one-shot handlers.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hey::cli::Cli;
use hey::commands;
use hey::commands::oneshot::OneshotMode;
use hey::config::Config;
use hey::providers::OpenAiProvider;
use hey::render::{GlowRenderer, Layout, Renderer};
use hey::store::ChatStore;
use hey::term::{install_interrupt_hook, AnsiTerminal};
use hey::ui::ChatTarget;

fn main() -> Result<()> {
    // Any parse failure, including an unrecognized flag, prints the
    // usage text and exits with status 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(0);
        }
    };

    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    config.validate()?;

    let store = ChatStore::open(&config)?;

    // Every dispatch path below may hide the cursor, so the
    // force-restore handler goes in before any of them run.
    install_interrupt_hook()?;

    if cli.clear_history {
        return commands::history::clear(&store);
    }

    let layout = Layout::detect();
    let markdown = GlowRenderer::new(&config.ui.glow_bin, &config.ui.glow_style);
    let renderer = Renderer::new(layout, &markdown);
    let provider = OpenAiProvider::new(config.provider.clone())?;
    let mut term = AnsiTerminal::new()?;
    let window_ms = config.ui.recent_window_minutes * 60 * 1000;

    let prompt = cli.prompt_text();

    if cli.browse {
        return commands::browse::run(&store, &provider, &renderer, &mut term, config.ui.page_size);
    }

    // A prompt without -i replies inline; everything else is interactive.
    if cli.has_prompt() && !cli.interactive {
        let mode = if cli.continue_chat {
            OneshotMode::Continue
        } else if cli.new {
            OneshotMode::New
        } else {
            OneshotMode::Auto
        };
        return commands::oneshot::run(
            &store, &provider, &renderer, &mut term, mode, &prompt, window_ms,
        );
    }

    let initial = if cli.has_prompt() {
        Some(prompt.as_str())
    } else {
        None
    };

    if cli.continue_chat {
        commands::chat::run(
            &store,
            &provider,
            &renderer,
            &mut term,
            ChatTarget::MostRecent,
            initial,
        )
    } else if cli.new || (cli.interactive && cli.has_prompt()) {
        commands::chat::run(
            &store,
            &provider,
            &renderer,
            &mut term,
            ChatTarget::New,
            initial,
        )
    } else {
        commands::browse::run(&store, &provider, &renderer, &mut term, config.ui.page_size)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "hey=debug" } else { "hey=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
