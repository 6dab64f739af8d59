//! IMT CLI Application

mod cli;

use clap::Parser as _;
use cli::{Cli, Commands, SchemaCommands};
use imt_sdk::commands::{
    init_tree, insert_values, inspect_leaves, inspect_nodes, inspect_root, proof_schema,
    prove_non_membership, tree_state_schema, verify_proof_file,
};

fn init_tracing() -> eyre::Result<()> {
    #[cfg(feature = "tokio-console")]
    {
        // tokio-console: layers the console subscriber with fmt
        use tracing_subscriber::prelude::*;
        tracing_subscriber::registry()
            .with(console_subscriber::spawn())
            .with(
                tracing_subscriber::fmt::layer().with_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                ),
            )
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;
    }

    #[cfg(not(feature = "tokio-console"))]
    {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_timer(tracing_subscriber::fmt::time::uptime())
            .with_target(false)
            .try_init()
            .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;
    }

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();
    let hash = cli.hash;

    let res = match cli.command {
        Commands::Init { state, force } => init_tree(state.into_config(hash), force).await,
        Commands::Insert { state, values } => insert_values(state.into_config(hash), values).await,
        Commands::Prove {
            state,
            value,
            proof_out,
        } => prove_non_membership(state.into_config(hash), value, proof_out).await,
        Commands::Verify { proof, state } => match verify_proof_file(proof, hash, state).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Root { state } => inspect_root(state.into_config(hash)).await.map(|_| ()),
        Commands::Leaves { state } => inspect_leaves(state.into_config(hash)).await.map(|_| ()),
        Commands::Nodes { state, level } => inspect_nodes(state.into_config(hash), level)
            .await
            .map(|_| ()),
        Commands::Schema { command } => match command {
            SchemaCommands::State => tree_state_schema(),
            SchemaCommands::Proof => proof_schema(),
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
