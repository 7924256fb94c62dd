use clap::{Parser, Subcommand};
use quorum_vault::config::{ConfigError, WalletConfig};
use quorum_vault::identity::{Address, AddressError, Keypair};
use quorum_vault::storage::{StoreError, WalletStore};
use quorum_vault::{MultiSigError, MultiSigWallet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(
    name = "quorum-vault",
    about = "M-of-N multi-owner wallet: submit, confirm, revoke and execute quorum-gated transfers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the wallet database
    #[arg(long, global = true, env = "QUORUM_VAULT_DIR", default_value = "./quorum-vault-data")]
    data_dir: PathBuf,

    /// Log state transitions at info level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new owner keypair and print its address
    Keygen,

    /// Create a wallet in the data directory
    Init {
        /// YAML file with address, owners and threshold
        #[arg(long, conflicts_with_all = ["owner", "threshold"])]
        config: Option<PathBuf>,

        /// Owner address (repeat for each owner)
        #[arg(long = "owner")]
        owner: Vec<Address>,

        /// Confirmations required to execute
        #[arg(long)]
        threshold: Option<usize>,

        /// Salt for deriving the wallet address when no config is given
        #[arg(long, default_value = "0")]
        salt: u64,
    },

    /// List the wallet's owners and threshold
    Owners,

    /// Propose a transfer
    Submit {
        /// Calling owner
        #[arg(long = "as")]
        caller: Address,
        /// Recipient address
        #[arg(long)]
        to: Address,
        /// Value to transfer
        #[arg(long)]
        value: u64,
        /// Hex payload, with or without 0x prefix
        #[arg(long, default_value = "")]
        payload: String,
    },

    /// Confirm an action
    Confirm {
        #[arg(long = "as")]
        caller: Address,
        /// Action index
        id: u64,
    },

    /// Revoke an earlier confirmation
    Revoke {
        #[arg(long = "as")]
        caller: Address,
        /// Action index
        id: u64,
    },

    /// Execute an action that reached quorum
    Execute {
        #[arg(long = "as")]
        caller: Address,
        /// Action index
        id: u64,
    },

    /// Fund the wallet
    Deposit {
        #[arg(long = "as")]
        caller: Address,
        #[arg(long)]
        amount: u64,
    },

    /// Show one action
    Show {
        /// Action index
        id: u64,
    },

    /// List all actions
    List {
        /// Only actions that have not executed
        #[arg(long)]
        pending: bool,
    },

    /// Show the wallet balance
    Balance,

    /// Print the event log
    Events,

    /// Show value credited to recipients by executed actions
    Payouts,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Wallet(#[from] MultiSigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Invalid payload hex: {0}")]
    Payload(String),

    #[error("No wallet in {0}; run `quorum-vault init` first")]
    NotInitialized(String),

    #[error("A wallet already exists in {0}")]
    AlreadyInitialized(String),

    #[error("--threshold is required unless --config is given")]
    MissingThreshold,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Keygen => {
            let keypair = Keypair::generate();
            println!("address: {}", keypair.address());
            println!("secret:  0x{}", hex::encode(keypair.to_bytes()));
            Ok(())
        }
        Commands::Init {
            config,
            owner,
            threshold,
            salt,
        } => {
            let config = match config {
                Some(path) => WalletConfig::load(&path)?,
                None => {
                    let threshold = threshold.ok_or(CliError::MissingThreshold)?;
                    let address = Address::for_wallet(&owner, salt);
                    WalletConfig::new(address, owner, threshold)
                }
            };
            init(&cli.data_dir, &config)
        }
        Commands::Owners => {
            let (_, wallet) = open(&cli.data_dir)?;
            println!("wallet:    {}", wallet.address());
            println!("threshold: {} of {}", wallet.threshold(), wallet.owners().len());
            for owner in wallet.owners() {
                println!("  {owner}");
            }
            Ok(())
        }
        Commands::Submit {
            caller,
            to,
            value,
            payload,
        } => {
            let payload = parse_payload(&payload)?;
            let (store, mut wallet) = open(&cli.data_dir)?;
            let id = wallet.submit(caller, to, value, payload)?;
            persist(&store, &wallet)?;
            println!("submitted action {id}");
            Ok(())
        }
        Commands::Confirm { caller, id } => {
            let (store, mut wallet) = open(&cli.data_dir)?;
            wallet.confirm(caller, id)?;
            persist(&store, &wallet)?;
            let action = wallet.action(id)?;
            println!(
                "action {id}: {} of {} confirmations",
                action.confirmations(),
                wallet.threshold()
            );
            Ok(())
        }
        Commands::Revoke { caller, id } => {
            let (store, mut wallet) = open(&cli.data_dir)?;
            wallet.revoke(caller, id)?;
            persist(&store, &wallet)?;
            let action = wallet.action(id)?;
            println!(
                "action {id}: {} of {} confirmations",
                action.confirmations(),
                wallet.threshold()
            );
            Ok(())
        }
        Commands::Execute { caller, id } => {
            let (store, mut wallet) = open(&cli.data_dir)?;
            let mut payouts = store.load_payouts()?;
            wallet.execute(caller, id, &mut payouts)?;
            store.save_all(&wallet, &payouts)?;
            store.flush()?;
            println!("executed action {id}; balance {}", wallet.balance());
            Ok(())
        }
        Commands::Deposit { caller, amount } => {
            let (store, mut wallet) = open(&cli.data_dir)?;
            wallet.deposit(caller, amount)?;
            persist(&store, &wallet)?;
            println!("balance {}", wallet.balance());
            Ok(())
        }
        Commands::Show { id } => {
            let (_, wallet) = open(&cli.data_dir)?;
            let action = wallet.action(id)?;
            println!("action:        {id}");
            println!("recipient:     {}", action.recipient());
            println!("value:         {}", action.value());
            println!("payload:       0x{}", hex::encode(action.payload()));
            println!("executed:      {}", action.is_executed());
            println!(
                "confirmations: {} of {}",
                action.confirmations(),
                wallet.threshold()
            );
            for owner in wallet.confirmations(id) {
                println!("  {owner}");
            }
            Ok(())
        }
        Commands::List { pending } => {
            let (_, wallet) = open(&cli.data_dir)?;
            for (id, action) in wallet.actions() {
                if pending && action.is_executed() {
                    continue;
                }
                let status = if action.is_executed() {
                    "executed".to_string()
                } else {
                    format!("{}/{}", action.confirmations(), wallet.threshold())
                };
                println!("{id:>4}  {}  {:>20}  {status}", action.recipient(), action.value());
            }
            Ok(())
        }
        Commands::Balance => {
            let (_, wallet) = open(&cli.data_dir)?;
            let treasury = wallet.treasury();
            println!("balance:   {}", treasury.balance());
            println!("deposited: {}", treasury.total_deposited());
            println!("paid out:  {}", treasury.total_paid_out());
            Ok(())
        }
        Commands::Events => {
            let (_, wallet) = open(&cli.data_dir)?;
            for event in wallet.events() {
                println!("{event}");
            }
            Ok(())
        }
        Commands::Payouts => {
            let (store, _) = open(&cli.data_dir)?;
            let payouts = store.load_payouts()?;
            for receipt in payouts.receipts() {
                let transfer = receipt.transfer();
                println!(
                    "{}  action {}  {} <- {}",
                    receipt.paid_at().to_rfc3339(),
                    transfer.action(),
                    transfer.recipient(),
                    transfer.value()
                );
            }
            Ok(())
        }
    }
}

fn init(data_dir: &Path, config: &WalletConfig) -> Result<(), CliError> {
    let store = WalletStore::open(data_dir)?;
    if store.has_wallet()? {
        return Err(CliError::AlreadyInitialized(data_dir.display().to_string()));
    }

    let wallet = MultiSigWallet::from_config(config)?;
    persist(&store, &wallet)?;
    println!("created wallet {}", wallet.address());
    Ok(())
}

fn open(data_dir: &Path) -> Result<(WalletStore, MultiSigWallet), CliError> {
    let store = WalletStore::open(data_dir)?;
    let wallet = store
        .load_wallet()?
        .ok_or_else(|| CliError::NotInitialized(data_dir.display().to_string()))?;
    Ok((store, wallet))
}

fn persist(store: &WalletStore, wallet: &MultiSigWallet) -> Result<(), CliError> {
    store.save_wallet(wallet)?;
    store.flush()?;
    Ok(())
}

fn parse_payload(s: &str) -> Result<Vec<u8>, CliError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(trimmed).map_err(|e| CliError::Payload(e.to_string()))
}
