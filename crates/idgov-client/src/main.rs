//! idgov command line.
//!
//! - `encode`: policy document -> wire create/modify call (JSON), no dispatch
//! - `decode`: fetched wire policy (JSON) -> policy model (YAML)

use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use idgov_client::config;
use idgov_client::document::PolicyDocument;
use idgov_client::service::{InMemoryPolicyService, StaticDirectory};
use idgov_client::PolicyClient;
use idgov_core::codec::decode_policy;
use idgov_core::error::{IdGovError, Result};
use idgov_core::wire::WSProvisioningPolicy;

#[derive(Parser)]
#[command(name = "idgov")]
#[command(about = "Provisioning-policy encoder for the identity service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the wire call for a policy document
    Encode {
        /// Client configuration file
        #[arg(short, long, env = "IDGOV_CONFIG", default_value = "idgov.yaml")]
        config: String,

        /// Policy document (YAML)
        #[arg(short, long)]
        policy: String,

        /// Assemble a modify call (document must carry `dn`)
        #[arg(long)]
        modify: bool,
    },
    /// Decode a fetched wire policy record
    Decode {
        /// Wire policy (JSON)
        #[arg(short, long)]
        wire: String,
    },
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| IdGovError::Internal(format!("read {path} failed: {e}")))
}

async fn encode(config_path: &str, policy_path: &str, modify: bool) -> Result<String> {
    let cfg = config::load_from_file(config_path)?;
    let directory = Arc::new(StaticDirectory::from_config(&cfg));
    // nothing is dispatched; the service is only there to satisfy the client
    let client = PolicyClient::new(Arc::new(InMemoryPolicyService::new()), directory);

    let doc = PolicyDocument::from_yaml(&read(policy_path)?)?;
    let policy = doc.resolve(client.directory().as_ref(), &cfg.defaults).await?;

    let call = if modify {
        client.prepare_modify(&policy).await?
    } else {
        client.prepare_add(&policy).await?
    };

    serde_json::to_string_pretty(&call).map_err(|e| IdGovError::Internal(format!("json: {e}")))
}

fn decode(wire_path: &str) -> Result<String> {
    let wire: WSProvisioningPolicy = serde_json::from_str(&read(wire_path)?)
        .map_err(|e| IdGovError::BadRequest(format!("invalid wire policy: {e}")))?;
    let policy = decode_policy(&wire)?;
    serde_yaml::to_string(&policy).map_err(|e| IdGovError::Internal(format!("yaml: {e}")))
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let out = match cli.command {
        Command::Encode { config, policy, modify } => encode(&config, &policy, modify).await,
        Command::Decode { wire } => decode(&wire),
    };

    match out {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.code().as_str(), "{e}");
            eprintln!("{}: {e}", e.code().as_str());
            ExitCode::FAILURE
        }
    }
}
