mod files;
mod replay;
mod transport;

use std::path::PathBuf;

use canvas::commit::{TransportError, deliver};
use canvas::doc::Registry;
use canvas::hit::Handle;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use wire::{LayoutPatch, UpdateElementRequest, WireError};

use crate::transport::HttpTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid patch: {0}")]
    InvalidPatch(#[from] WireError),
    #[error(transparent)]
    Patch(#[from] surgeon::PatchError),
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unknown resize handle `{0}`")]
    UnknownHandle(String),
    #[error("no element `{0}` in the registry")]
    UnknownElement(String),
    #[error("gesture on `{id}` did not commit to it (hit: {hit:?})")]
    GestureMissed { id: String, hit: Option<String> },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "enigma", about = "Patch element layout in page sources, locally or through a server")]
struct Cli {
    #[arg(long, env = "ENIGMA_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "ID_ATTRIBUTE", default_value = surgeon::DEFAULT_ID_ATTRIBUTE)]
    id_attribute: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server is up.
    Ping,
    /// Patch a local page file in place.
    Apply {
        file: PathBuf,
        id: String,
        #[command(flatten)]
        patch: PatchArgs,
    },
    /// List tagged elements of a local page file.
    Inspect { file: PathBuf },
    /// Send one commit to the server.
    Commit {
        project: String,
        id: String,
        #[command(flatten)]
        patch: PatchArgs,
    },
    /// Run a drag or resize through the editor engine and send its commit.
    Replay(ReplayArgs),
}

#[derive(Args, Debug)]
struct PatchArgs {
    #[arg(long)]
    width: Option<String>,
    #[arg(long)]
    height: Option<String>,
    #[arg(long)]
    top: Option<String>,
    #[arg(long)]
    left: Option<String>,
}

impl From<PatchArgs> for LayoutPatch {
    fn from(args: PatchArgs) -> Self {
        Self { width: args.width, height: args.height, top: args.top, left: args.left }
    }
}

#[derive(Args, Debug)]
struct ReplayArgs {
    project: String,
    id: String,

    /// Resize handle to grab, e.g. `bottom-right`. Omit to drag the body.
    #[arg(long)]
    handle: Option<String>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    dx: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    dy: f64,

    /// Seed the registry from a local file instead of the server's element list.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print the commit without sending it.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Apply { file, id, patch } => {
            let changed = files::apply_to_file(&file, &id, &patch.into(), &cli.id_attribute)?;
            print_json(&serde_json::json!({ "file": file.display().to_string(), "id": id, "changed": changed }))
        }
        Command::Inspect { file } => {
            let elements = files::inspect_file(&file, &cli.id_attribute)?;
            print_json(&serde_json::to_value(elements)?)
        }
        Command::Commit { project, id, patch } => {
            let request = UpdateElementRequest::new(id, patch.into());
            request.validate()?;
            send(&HttpTransport::new(&cli.base_url, &project), &request).await
        }
        Command::Replay(args) => run_replay(&cli.base_url, &cli.id_attribute, args).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_replay(base_url: &str, id_attribute: &str, args: ReplayArgs) -> Result<(), CliError> {
    let handle = args
        .handle
        .as_deref()
        .map(|name| Handle::parse(name).ok_or_else(|| CliError::UnknownHandle(name.to_owned())))
        .transpose()?;
    let transport = HttpTransport::new(base_url, &args.project);

    let summaries = match &args.file {
        Some(file) => files::inspect_file(file, id_attribute)?,
        None => transport.elements().await?,
    };
    tracing::debug!(elements = summaries.len(), "registry seeded");

    let request = replay::replay_gesture(Registry::from_summaries(&summaries), &args.id, handle, args.dx, args.dy)?;
    print_json(&serde_json::to_value(&request)?)?;
    if args.dry_run {
        return Ok(());
    }
    send(&transport, &request).await
}

async fn send(transport: &HttpTransport, request: &UpdateElementRequest) -> Result<(), CliError> {
    deliver(transport, request).await?;
    tracing::info!(id = %request.selected_id, "commit persisted");
    println!("ok");
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
