// seq2 - command line host for the SEQ2 ledger

use clap::{Parser, Subcommand, ValueEnum};
use seq2_ledger::config::{ConfigError, DeployConfig, DeploymentArtifact};
use seq2_ledger::host::{HostError, LocalHost, Receipt};
use seq2_ledger::identity::{Address, Keypair};
use seq2_ledger::ledger::GetMethod;
use seq2_ledger::message::{CodecError, InboundMessage, MessageCodec, Operation};
use seq2_ledger::storage::StoreError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seq2", version, about = "Local host for the SEQ2 token ledger")]
struct Cli {
    /// Directory of the ledger store
    #[arg(long, default_value = "seq2-store", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and store a named identity
    Keygen { label: String },
    /// Print the address of a named identity
    Address { label: String },
    /// List stored identities
    Identities,
    /// Deploy the ledger with `owner` as owner and oracle
    Deploy {
        #[arg(long)]
        owner: String,
        /// JSON deployment config; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write a deployment artifact here
        #[arg(long)]
        artifact: Option<PathBuf>,
    },
    /// Send an operation as `--from`
    Send {
        #[arg(long)]
        from: String,
        #[command(subcommand)]
        op: OpCommand,
    },
    /// Print an operation as an encoded message instead of sending it
    Encode {
        #[arg(long)]
        from: String,
        #[arg(long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,
        #[command(subcommand)]
        op: OpCommand,
    },
    /// Deliver a previously encoded message
    Submit {
        message: String,
        #[arg(long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,
    },
    /// Run a get-method
    Query {
        #[command(subcommand)]
        method: QueryCommand,
    },
}

#[derive(Subcommand)]
enum OpCommand {
    Mint { to: String, amount: u64 },
    Burn { from: String, amount: u64 },
    Transfer { to: String, amount: u64 },
    Deposit { value: u64 },
    Withdraw { amount: u64 },
    SetPrice { price: u64 },
    SetFreeze {
        #[arg(action = clap::ArgAction::Set)]
        frozen: bool,
    },
    SetOracle { oracle: String },
    TransferOwnership { new_owner: String },
}

#[derive(Subcommand)]
enum QueryCommand {
    TotalSupply,
    BalanceOf { address: String },
    Price,
    Owner,
    Oracle,
    Frozen,
    Metadata,
    /// Reserve held by the contract
    Reserve,
}

#[derive(Clone, Copy, ValueEnum)]
enum Encoding {
    Hex,
    Base64,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Unknown identity '{0}' (not a stored label or an address)")]
    UnknownIdentity(String),

    #[error("Identity '{0}' already exists")]
    IdentityExists(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Host(HostError::Rejected(_)) => 3,
            CliError::Host(_) | CliError::Store(_) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut host = LocalHost::open(&cli.store)?;

    match cli.command {
        Command::Keygen { label } => {
            if host.store().load_keypair(&label)?.is_some() {
                return Err(CliError::IdentityExists(label));
            }
            let keypair = Keypair::generate();
            host.store().save_keypair(&label, &keypair)?;
            host.store().flush()?;
            println!("{} {}", label, keypair.address());
        }
        Command::Address { label } => {
            println!("{}", resolve(&host, &label)?);
        }
        Command::Identities => {
            for label in host.store().keypair_labels()? {
                println!("{} {}", label, resolve(&host, &label)?);
            }
        }
        Command::Deploy {
            owner,
            config,
            artifact,
        } => {
            let config = match config {
                Some(path) => DeployConfig::load(path)?,
                None => DeployConfig::default(),
            };
            let owner = resolve(&host, &owner)?;
            let state = host.deploy(&config, owner)?;
            if let Some(path) = artifact {
                DeploymentArtifact::new(&config, &state).write(path)?;
            }
            println!("deployed {} owner={} price={}", state.metadata().symbol, owner, state.price_units());
        }
        Command::Send { from, op } => {
            let message = build_message(&host, &from, op)?;
            let receipt = host.deliver(&message)?;
            print_receipt(&receipt);
        }
        Command::Encode { from, encoding, op } => {
            let message = build_message(&host, &from, op)?;
            let encoded = match encoding {
                Encoding::Hex => MessageCodec::encode_hex(&message)?,
                Encoding::Base64 => MessageCodec::encode_base64(&message)?,
            };
            println!("{}", encoded);
        }
        Command::Submit { message, encoding } => {
            let message = match encoding {
                Encoding::Hex => MessageCodec::decode_hex(&message)?,
                Encoding::Base64 => MessageCodec::decode_base64(&message)?,
            };
            let receipt = host.deliver(&message)?;
            print_receipt(&receipt);
        }
        Command::Query { method } => {
            let method = match method {
                QueryCommand::TotalSupply => GetMethod::TotalSupply,
                QueryCommand::BalanceOf { address } => GetMethod::BalanceOf(resolve(&host, &address)?),
                QueryCommand::Price => GetMethod::Price,
                QueryCommand::Owner => GetMethod::Owner,
                QueryCommand::Oracle => GetMethod::Oracle,
                QueryCommand::Frozen => GetMethod::Frozen,
                QueryCommand::Metadata => GetMethod::Metadata,
                QueryCommand::Reserve => {
                    println!("{}", host.reserve()?);
                    return Ok(());
                }
            };
            println!("{}", host.query(&method)?);
        }
    }

    Ok(())
}

/// A stored label or a literal address
fn resolve(host: &LocalHost, name: &str) -> Result<Address, CliError> {
    if let Ok(address) = Address::parse(name) {
        return Ok(address);
    }
    host.store()
        .load_keypair(name)?
        .map(|kp| kp.address())
        .ok_or_else(|| CliError::UnknownIdentity(name.to_string()))
}

fn build_message(host: &LocalHost, from: &str, op: OpCommand) -> Result<InboundMessage, CliError> {
    let sender = resolve(host, from)?;
    let (value, operation) = match op {
        OpCommand::Mint { to, amount } => (0, Operation::Mint { to: resolve(host, &to)?, amount }),
        OpCommand::Burn { from, amount } => (0, Operation::Burn { from: resolve(host, &from)?, amount }),
        OpCommand::Transfer { to, amount } => (0, Operation::Transfer { to: resolve(host, &to)?, amount }),
        OpCommand::Deposit { value } => (value, Operation::Deposit),
        OpCommand::Withdraw { amount } => (0, Operation::Withdraw { amount }),
        OpCommand::SetPrice { price } => (0, Operation::SetPrice { new_price: price }),
        OpCommand::SetFreeze { frozen } => (0, Operation::SetFreeze { frozen }),
        OpCommand::SetOracle { oracle } => (0, Operation::SetOracle { oracle: resolve(host, &oracle)? }),
        OpCommand::TransferOwnership { new_owner } => (
            0,
            Operation::TransferOwnership {
                new_owner: resolve(host, &new_owner)?,
            },
        ),
    };
    Ok(InboundMessage::from_operation(sender, value, &operation))
}

fn print_receipt(receipt: &Receipt) {
    println!("ok {}", receipt.operation.name());
    for out in &receipt.outbound {
        println!("  sent {} to {} ({:?})", out.value, out.destination, out.kind);
    }
    println!("  reserve {}", receipt.reserve_after);
}
