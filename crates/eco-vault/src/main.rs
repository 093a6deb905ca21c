//! Eco Vault: private carbon-credit purchases from the command line

use clap::{Parser, Subcommand};

use eco_vault_flow_adapters::FlowAdapterConfig;
use eco_vault_flow_core::{stage_label, PrivacyLevel, PrivacyLevelSelector};

mod shell;

use shell::BuyShell;

#[derive(Parser)]
#[command(name = "eco-vault")]
#[command(about = "Eco Vault - private carbon-credit trading", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Buy carbon credits through the private trade flow
    Buy {
        /// Quantity in tCO₂
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Privacy tier (standard, enhanced, maximum)
        #[arg(default_value_t = PrivacyLevel::Enhanced)]
        privacy: PrivacyLevel,

        /// Show amounts on the confirmation summary
        #[arg(long)]
        reveal: bool,
    },

    /// List the privacy tiers
    Tiers,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Tiers => {
            print_tiers();
            Ok(())
        }
        Commands::Buy {
            quantity,
            privacy,
            reveal,
        } => buy(&quantity, privacy, reveal).await,
    }
}

async fn buy(quantity: &str, privacy: PrivacyLevel, reveal: bool) -> eyre::Result<()> {
    let config = FlowAdapterConfig::from_env()?;
    tracing::info!(profile = ?config.runtime_profile, "Starting Eco Vault");

    let mut shell = BuyShell::open(&config)?;
    let summary = shell.prepare(quantity, privacy, reveal)?;
    println!("Confirm Private Trade\n{summary}\n");

    let tx_hash = shell
        .execute(|percent| println!("[{percent:>3}%] {}", stage_label(percent)))
        .await?;
    println!("\nTrade Complete: {tx_hash}");
    if let Some(intent) = shell.flow().intent() {
        println!(
            "{} tCO₂ purchased at {} privacy for ${:.2}",
            intent.quantity,
            privacy.tier().title,
            intent.total
        );
    }
    Ok(())
}

fn print_tiers() {
    for tier in PrivacyLevelSelector::default().options() {
        let marker = if tier.recommended { " (recommended)" } else { "" };
        println!("{} [{}]{}", tier.title, tier.level, marker);
        println!("  {}", tier.description);
        for feature in tier.features {
            println!("  - {feature}");
        }
    }
}
