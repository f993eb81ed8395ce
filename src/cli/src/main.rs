//! Command-line client for an ERC20Votes governance token.

use anyhow::Result;
use colored::Colorize;
use govtoken_chain::{bindings::load_bytecode, ChainConnection, ContractProxy, SignerClient};
use govtoken_cli::{
    config::{private_key_from_env, ClientConfig},
    CliError, Command, CommandKind, CommandRouter,
};
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command line arguments for the client.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "govtoken",
    about = "Deploy, mint, transfer, delegate and query votes of a governance token",
    usage = "govtoken [OPTIONS] <command> [args]...",
    setting = AppSettings::TrailingVarArg
)]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint, overrides the configuration
    #[structopt(long)]
    rpc_url: Option<String>,

    /// Token contract address, overrides the configuration
    #[structopt(long)]
    contract: Option<String>,

    /// Disable colored output
    #[structopt(long)]
    no_color: bool,

    /// Command to run: deployToken, mint, delegate, transfer, balanceOf, getVotes, getPastVotes.
    /// Options must come before it.
    command: String,

    /// Positional arguments of the command. Everything after the command is
    /// passed to it unchanged, including words that look like options.
    #[structopt(allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Lists every command with its parameters.
fn command_help() -> String {
    let mut help = String::from("Commands:");
    for kind in CommandKind::ALL {
        help.push_str(&format!("\n  {:<40} {}", kind.usage(), kind.about()));
        for param in kind.params() {
            help.push_str(&format!("\n      <{}>  {}", param.name, param.kind.describe()));
        }
    }
    help
}

async fn connect(config: &ClientConfig, kind: CommandKind) -> Result<ContractProxy<SignerClient>> {
    let address = config.contract_address()?;
    let connection = ChainConnection::connect(
        &config.rpc_url,
        &private_key_from_env(),
        config.chain_id,
        config.confirmations,
    )
    .await?;
    info!("Signing as {:?}", connection.address());

    let proxy = ContractProxy::new(connection, address)?;
    if kind == CommandKind::DeployToken {
        let bytecode = load_bytecode(&config.artifact)?;
        return Ok(proxy.with_bytecode(bytecode));
    }

    Ok(proxy)
}

async fn run(opt: Opt) -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Validate the whole command before the key or the network is touched
    let command = Command::parse(&opt.command, opt.args.as_slice())?;
    debug!("Parsed command: {}", command);

    // Load configuration
    let mut config = ClientConfig::load(opt.config.as_deref())?;
    if let Some(rpc_url) = opt.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(contract) = opt.contract {
        config.contract = contract;
    }

    let proxy = connect(&config, command.kind()).await?;

    if let Some(progress) = command.kind().progress() {
        println!("\n{}", progress.cyan());
    }

    let report = CommandRouter::new(&proxy).dispatch(&command).await?;
    println!("\n{}\n", report);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let opt = Opt::from_args();
    if opt.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(opt).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        if let Some(CliError::UnknownCommand(_)) = e.downcast_ref::<CliError>() {
            eprintln!("\n{}", command_help());
        }
        std::process::exit(1);
    }
}
