use std::borrow::Cow::{self, Borrowed, Owned};
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::watch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use pixid_application::{InteractionOrchestrator, SessionView};
use pixid_core::session::Status;
use pixid_infrastructure::{GEMINI_API_KEY_ENV, PixidPaths};

mod bootstrap;
mod command;
mod render;

use bootstrap::{AppBootstrap, BootstrapOptions};
use command::{COMMANDS, Command};

/// Reveal your on-chain pixel identity.
#[derive(Parser, Debug)]
#[command(name = "pixid", version, about)]
struct Args {
    /// Path to config.toml (defaults to the pixid config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding config.toml, secret.json and logs
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// JSON-RPC endpoint of the wallet capability
    #[arg(long, value_name = "URL")]
    wallet_url: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Routes tracing output to a daily log file so it never interleaves with the prompt.
fn init_logging(paths: &PixidPaths) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "pixid.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn print_view(view: &SessionView, orchestrator: &InteractionOrchestrator) {
    let chain = orchestrator.chain();
    for line in render::session_lines(view, chain.network(), chain.contract()) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_white().bold());
    for (name, description) in command::help_lines() {
        println!("  {:<14} {}", name.bright_cyan(), description.bright_black());
    }
}

/// Runs one action while echoing every intermediate status it publishes.
async fn drive<F>(action: F, mut updates: watch::Receiver<SessionView>) -> Status
where
    F: Future<Output = Status>,
{
    tokio::pin!(action);

    loop {
        tokio::select! {
            status = &mut action => return status,
            changed = updates.changed() => {
                if changed.is_err() {
                    return action.await;
                }
                let view = updates.borrow_and_update().clone();
                if let Some(progress) = render::progress_line(&view) {
                    println!("{}", progress);
                }
            }
        }
    }
}

fn save_image(view: &SessionView, path: &Path) -> Result<()> {
    let Some(result) = &view.result else {
        anyhow::bail!("Nothing to save yet. Reveal your identity with /interact first.");
    };
    let bytes = result
        .image
        .to_bytes()
        .context("Image payload is not valid base64")?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "image saved");
    Ok(())
}

/// The main entry point for the pixid readline REPL application.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = PixidPaths::new(args.config_dir.as_deref());
    let _log_guard = init_logging(&paths)?;

    let AppBootstrap {
        mut orchestrator,
        config,
        has_credential,
        secret_template,
        ..
    } = bootstrap::bootstrap(BootstrapOptions {
        config_dir: args.config_dir,
        config_file: args.config,
        wallet_url: args.wallet_url,
        env_api_key: std::env::var(GEMINI_API_KEY_ENV).ok(),
    })
    .await?;

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== PIXID ===".bright_magenta().bold());
    println!("{}", "Reveal your on-chain pixel identity.".bright_black());
    if config.wallet.endpoint.is_none() {
        println!(
            "{}",
            "No wallet endpoint configured. Pass --wallet-url or set [wallet].endpoint.".yellow()
        );
    }
    if !has_credential {
        let hint = match &secret_template {
            Some(path) => format!(
                "No Gemini API key found. Set {} or fill in {}.",
                GEMINI_API_KEY_ENV,
                path.display()
            ),
            None => format!("No Gemini API key found. Set {}.", GEMINI_API_KEY_ENV),
        };
        println!("{}", hint.yellow());
    }
    println!("{}", "Type /help for commands.".bright_black());
    println!();
    print_view(&orchestrator.view(), &orchestrator);

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match Command::parse(trimmed) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message.bright_black());
                        continue;
                    }
                };

                match command {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Help => print_help(),
                    Command::Status => print_view(&orchestrator.view(), &orchestrator),
                    Command::Save(path) => match save_image(&orchestrator.view(), &path) {
                        Ok(()) => println!("{}", format!("Saved to {}", path.display()).green()),
                        Err(e) => println!("{}", format!("{:#}", e).red()),
                    },
                    Command::Reset => {
                        orchestrator.reset();
                        print_view(&orchestrator.view(), &orchestrator);
                    }
                    Command::Connect => {
                        let updates = orchestrator.subscribe();
                        drive(orchestrator.connect(), updates).await;
                        print_view(&orchestrator.view(), &orchestrator);
                    }
                    Command::Interact => {
                        let updates = orchestrator.subscribe();
                        drive(orchestrator.interact(), updates).await;
                        print_view(&orchestrator.view(), &orchestrator);
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
