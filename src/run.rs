//! Application execution logic.
//!
//! Drives a [`Session`] for the selected subcommand: `verify`, `send`, or the
//! interactive prompt that stands in for the desktop form.

use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::{Stream, StreamExt};

use hooksend::config::{Command, ValidatedConfig};
use hooksend::discord::{DeliveryOutcome, WebhookEndpoint};
use hooksend::history::MessageHistory;
use hooksend::session::{Session, SessionError, VerifyError};
use hooksend::settings::{FileSettingsStore, MemorySettingsStore, SettingsStore};
use hooksend::webhook::{HttpClient, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// No URL was configured and none was saved.
    #[error(
        "No webhook URL available. Pass --url, set webhook.url in the config file, \
         or run 'hooksend verify --url <URL>' once"
    )]
    NoWebhookUrl,

    /// The configured URL was not accepted.
    #[error("Webhook URL rejected: {0}")]
    Verify(#[from] VerifyError),

    /// A send was attempted without a verified endpoint.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// At least one message in a `send` run was not delivered.
    #[error("{failed} of {total} message(s) were not delivered")]
    NotDelivered {
        /// Number of undelivered messages
        failed: usize,
        /// Number of messages attempted
        total: usize,
    },

    /// Reading standard input or writing standard output failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[source] io::Error),
}

/// Options the command handlers need from the validated config.
struct RuntimeOptions {
    url: Option<WebhookEndpoint>,
    probe: bool,
    history_display: usize,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            url: config.url.clone(),
            probe: config.probe,
            history_display: config.history_display,
        }
    }
}

/// Runs `command` against a fresh session.
///
/// # Errors
///
/// Returns an error if:
/// - No webhook URL is configured or saved (for `verify` and `send`)
/// - The configured URL fails validation or the probe
/// - Any message passed to `send` is not delivered
/// - The terminal cannot be read in interactive mode
///
/// # Coverage Note
///
/// Excluded from coverage because it builds the real HTTP client and
/// settings file store.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);
    let client = ReqwestClient::new();

    match (config.settings_file, config.save) {
        (Some(path), true) => {
            let store = FileSettingsStore::new(path);
            tracing::debug!("Settings file: {}", store.path().display());
            let session = Session::with_client(client, store, config.timeout);
            run_command(session, &options, command).await
        }
        (Some(path), false) => {
            // Still read the saved URL, just never write it back
            let store = MemorySettingsStore::seeded(FileSettingsStore::new(path).load());
            let session = Session::with_client(client, store, config.timeout);
            run_command(session, &options, command).await
        }
        (None, save) => {
            if save {
                tracing::warn!("No settings location available, the webhook URL will not be saved");
            }
            let session = Session::with_client(client, MemorySettingsStore::new(), config.timeout);
            run_command(session, &options, command).await
        }
    }
}

/// Dispatches to the handler for `command`.
#[cfg(not(tarpaulin_include))]
async fn run_command<H: HttpClient, S: SettingsStore>(
    mut session: Session<H, S>,
    options: &RuntimeOptions,
    command: Command,
) -> Result<(), RunError> {
    match command {
        Command::Verify => verify(&mut session, options).await,
        Command::Send { messages } => send_all(&mut session, options, &messages).await,
        Command::Interactive => {
            let lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
            let mut prompt = Prompt::new(lines, shutdown_signal());
            interactive(&mut session, options, &mut prompt).await
        }
        Command::Init { .. } => {
            tracing::debug!("init is handled before configuration is loaded");
            Ok(())
        }
    }
}

/// Verifies the configured URL, or re-checks the saved one.
async fn verify<H: HttpClient, S: SettingsStore>(
    session: &mut Session<H, S>,
    options: &RuntimeOptions,
) -> Result<(), RunError> {
    let url = match &options.url {
        Some(endpoint) => endpoint.as_str().to_string(),
        None => session
            .restore()
            .map(|endpoint| endpoint.as_str().to_string())
            .ok_or(RunError::NoWebhookUrl)?,
    };

    let endpoint = session.verify(&url, options.probe).await?;
    println!("Webhook {endpoint} is valid");
    Ok(())
}

/// Makes sure the session holds an endpoint.
///
/// An explicitly configured URL is verified (and probed unless disabled);
/// otherwise the saved URL is adopted as-is. Returns `false` when neither
/// exists.
async fn establish<H: HttpClient, S: SettingsStore>(
    session: &mut Session<H, S>,
    options: &RuntimeOptions,
) -> Result<bool, RunError> {
    if let Some(endpoint) = &options.url {
        session.verify(endpoint.as_str(), options.probe).await?;
        return Ok(true);
    }

    Ok(session.restore().is_some())
}

/// Sends every message in order, continuing past failures.
async fn send_all<H: HttpClient, S: SettingsStore>(
    session: &mut Session<H, S>,
    options: &RuntimeOptions,
    messages: &[String],
) -> Result<(), RunError> {
    if !establish(session, options).await? {
        return Err(RunError::NoWebhookUrl);
    }

    let mut failed = 0;
    for text in messages {
        let outcome = session.send(text).await?;
        report_outcome(&outcome);
        if !outcome.is_delivered() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(RunError::NotDelivered {
            failed,
            total: messages.len(),
        });
    }

    Ok(())
}

/// Runs the read-send loop until `/quit`, end of input, or a shutdown signal.
async fn interactive<H, S, L>(
    session: &mut Session<H, S>,
    options: &RuntimeOptions,
    prompt: &mut Prompt<L>,
) -> Result<(), RunError>
where
    H: HttpClient,
    S: SettingsStore,
    L: Stream<Item = io::Result<String>> + Unpin,
{
    let ready = match establish(session, options).await {
        Ok(ready) => ready,
        Err(RunError::Verify(e)) => {
            eprintln!("{}", describe_verify_error(&e));
            false
        }
        Err(e) => return Err(e),
    };

    if !ready && !prompt_for_url(session, options, prompt).await? {
        return Ok(());
    }

    println!(
        "Type a message and press Enter. /history shows recent messages, \
         /url changes the webhook, /quit exits."
    );

    while let Some(line) = prompt.next_line("> ").await? {
        match Input::parse(&line) {
            Input::Blank => {}
            Input::Quit => break,
            Input::History => {
                print!(
                    "{}",
                    render_history(session.history(), options.history_display)
                );
            }
            Input::ChangeUrl => {
                if !prompt_for_url(session, options, prompt).await? {
                    break;
                }
            }
            Input::Message(text) => {
                let outcome = session.send(text).await?;
                report_outcome(&outcome);
            }
        }
    }

    Ok(())
}

/// Asks for a webhook URL until one is accepted.
///
/// Returns `false` if input ends first.
async fn prompt_for_url<H, S, L>(
    session: &mut Session<H, S>,
    options: &RuntimeOptions,
    prompt: &mut Prompt<L>,
) -> Result<bool, RunError>
where
    H: HttpClient,
    S: SettingsStore,
    L: Stream<Item = io::Result<String>> + Unpin,
{
    while let Some(line) = prompt.next_line("Webhook URL: ").await? {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }

        match session.verify(url, options.probe).await {
            Ok(endpoint) => {
                println!("Webhook {endpoint} accepted");
                return Ok(true);
            }
            Err(e) => eprintln!("{}", describe_verify_error(&e)),
        }
    }

    Ok(false)
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    History,
    ChangeUrl,
    Message(&'a str),
}

impl<'a> Input<'a> {
    /// Recognizes slash commands; anything else is sent verbatim.
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Self::Blank,
            "/quit" | "/exit" => Self::Quit,
            "/history" => Self::History,
            "/url" => Self::ChangeUrl,
            _ => Self::Message(line),
        }
    }
}

/// Line source for the interactive loop that also watches for shutdown.
struct Prompt<L> {
    lines: L,
    shutdown: Pin<Box<dyn Future<Output = ()> + Send>>,
}

impl<L> Prompt<L>
where
    L: Stream<Item = io::Result<String>> + Unpin,
{
    fn new(lines: L, shutdown: impl Future<Output = ()> + Send + 'static) -> Self {
        Self {
            lines,
            shutdown: Box::pin(shutdown),
        }
    }

    /// Prints `label` and waits for the next line.
    ///
    /// Returns `None` at end of input or once a shutdown signal arrives.
    async fn next_line(&mut self, label: &str) -> Result<Option<String>, RunError> {
        print!("{label}");
        io::stdout().flush().map_err(RunError::Io)?;

        tokio::select! {
            biased;

            () = &mut self.shutdown => {
                println!();
                tracing::info!("Shutdown signal received, stopping...");
                Ok(None)
            }

            line = self.lines.next() => line.transpose().map_err(RunError::Io),
        }
    }
}

/// Prints a send outcome: successes to stdout, failures to stderr.
fn report_outcome(outcome: &DeliveryOutcome) {
    if outcome.is_delivered() {
        println!("{outcome}");
        return;
    }

    eprintln!("{outcome}");
    if let Some(hint) = outcome_hint(outcome) {
        eprintln!("  {hint}");
    }
}

/// Suggests what to do about a failed send, for the common statuses.
fn outcome_hint(outcome: &DeliveryOutcome) -> Option<&'static str> {
    let DeliveryOutcome::Failed { status, .. } = outcome else {
        return None;
    };

    match status.as_u16() {
        401 | 403 => Some("The webhook token is not valid. Use /url to enter a new webhook URL."),
        404 => Some("The webhook no longer exists. Use /url to enter a new webhook URL."),
        429 => Some("Discord is rate limiting this webhook. Wait a moment before sending again."),
        s if (500..600).contains(&s) => Some("Discord had a server error. Try again later."),
        _ => None,
    }
}

/// Renders a rejected URL together with whether retrying may help.
fn describe_verify_error(error: &VerifyError) -> String {
    match error {
        VerifyError::Format(e) => e.to_string(),
        VerifyError::Probe(e) if e.is_transient() => {
            format!("{e}. This may be temporary, try again.")
        }
        VerifyError::Probe(e) => format!("{e}. Check that the webhook URL is correct."),
    }
}

/// Renders the last `limit` history entries, numbered by position in the session.
fn render_history(history: &MessageHistory, limit: usize) -> String {
    if history.is_empty() {
        return "No messages sent yet.\n".to_string();
    }

    let recent = history.recent(limit);
    let offset = history.len() - recent.len();

    recent
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{:>3}. {text}\n", offset + i + 1))
        .collect()
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
