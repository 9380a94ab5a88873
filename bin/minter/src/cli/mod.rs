// This file is part of Minter.
//
// Minter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Minter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Minter.
// If not, see https://www.gnu.org/licenses/.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use anyhow::Context;
use clap::{builder::PossibleValuesParser, Args, Parser, Subcommand};
use minter_flow::{
    MintArgs, MintConfig, Providers, DEFAULT_BUNDLER_RPC_BASE, DEFAULT_PAYMASTER_RPC_BASE,
};
use minter_provider::{
    new_alloy_bundler_provider, new_alloy_evm_provider, new_alloy_paymaster_provider,
    BundlerProvider, EvmProvider, PaymasterProvider,
};
use minter_types::chain::ChainSpec;
use secrecy::SecretString;

mod chain_spec;
mod tracing;

/// Main entry point for the CLI
///
/// Parses the CLI arguments and runs the selected flow to completion.
pub async fn run() -> anyhow::Result<()> {
    let opt = Cli::parse();
    let _guard = tracing::configure_logging(&opt.logs)?;

    let cs = chain_spec::resolve_chain_spec(&opt.common.network, &opt.common.chain_spec)?;
    tracing::info!("Chain spec: {:#?}", cs);

    let mint = match &opt.command {
        Command::Mint(args) => args.to_mint_args(),
        Command::Deploy | Command::Address => MintArgs::default(),
    };
    let config = opt.common.to_config(cs, mint);
    let providers = construct_providers(&config)?;

    match opt.command {
        Command::Mint(_) => {
            let outcome = minter_flow::run_mint_flow(&config, providers).await?;
            tracing::info!(
                "Mint included in transaction {} at block {}",
                outcome.receipt.receipt.transaction_hash,
                outcome.receipt.receipt.block_number
            );
        }
        Command::Deploy => {
            if let Some(receipt) = minter_flow::run_deploy_flow(&config, providers).await? {
                tracing::info!(
                    "Account deployed in transaction {}",
                    receipt.receipt.transaction_hash
                );
            }
        }
        Command::Address => {
            minter_flow::resolve_addresses(&config, providers).await?;
        }
    }

    Ok(())
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Command {
    /// Mint a vehicle through the policy restricted worker signer
    #[command(name = "mint")]
    Mint(MintCliArgs),

    /// Deploy the account with an empty operation signed by the sudo signer
    #[command(name = "deploy")]
    Deploy,

    /// Print the signer and account addresses without sending anything
    #[command(name = "address")]
    Address,
}

/// CLI common options
#[derive(Debug, Args)]
#[command(next_help_heading = "Common")]
pub struct CommonArgs {
    /// Network to look up a hardcoded chain spec
    #[arg(
        long = "network",
        name = "network",
        env = "NETWORK",
        default_value = "polygon_amoy",
        value_parser = PossibleValuesParser::new(chain_spec::HARDCODED_CHAIN_SPECS),
        global = true
    )]
    network: Option<String>,

    /// Path to a chain spec TOML file
    #[arg(long = "chain_spec", name = "chain_spec", env = "CHAIN_SPEC", global = true)]
    chain_spec: Option<String>,

    /// ZeroDev project id, appended to the bundler and paymaster endpoints
    #[arg(
        long = "project_id",
        name = "project_id",
        env = "PROJECT_ID",
        default_value = "",
        hide_default_value = true,
        global = true
    )]
    project_id: String,

    /// Hex encoded secret key of the sudo signer
    #[arg(
        long = "private_key",
        name = "private_key",
        env = "PRIVATE_KEY",
        hide_env_values = true,
        global = true
    )]
    private_key: Option<String>,

    #[arg(
        long = "bundler_rpc_base",
        name = "bundler_rpc_base",
        env = "BUNDLER_RPC_BASE",
        default_value = DEFAULT_BUNDLER_RPC_BASE,
        global = true
    )]
    bundler_rpc_base: String,

    #[arg(
        long = "paymaster_rpc_base",
        name = "paymaster_rpc_base",
        env = "PAYMASTER_RPC_BASE",
        default_value = DEFAULT_PAYMASTER_RPC_BASE,
        global = true
    )]
    paymaster_rpc_base: String,

    /// The only contract the worker signer may call
    #[arg(
        long = "target_contract",
        name = "target_contract",
        env = "TARGET_CONTRACT",
        default_value = "0x5eAA326fB2fc97fAcCe6A79A304876daD0F2e96c",
        global = true
    )]
    target_contract: Address,

    #[arg(
        long = "receipt_timeout_millis",
        name = "receipt_timeout_millis",
        env = "RECEIPT_TIMEOUT_MILLIS",
        default_value = "15000",
        global = true
    )]
    receipt_timeout_millis: u64,

    #[arg(
        long = "receipt_poll_interval_millis",
        name = "receipt_poll_interval_millis",
        env = "RECEIPT_POLL_INTERVAL_MILLIS",
        default_value = "1000",
        global = true
    )]
    receipt_poll_interval_millis: u64,

    /// Selects one of the accounts owned by the sudo signer
    #[arg(
        long = "account_index",
        name = "account_index",
        env = "ACCOUNT_INDEX",
        default_value = "0",
        global = true
    )]
    account_index: u64,

    #[arg(
        long = "provider_client_timeout_seconds",
        name = "provider_client_timeout_seconds",
        env = "PROVIDER_CLIENT_TIMEOUT_SECONDS",
        default_value = "10",
        global = true
    )]
    provider_client_timeout_seconds: u64,
}

impl CommonArgs {
    fn to_config(&self, chain_spec: ChainSpec, mint: MintArgs) -> MintConfig {
        MintConfig {
            project_id: self.project_id.clone(),
            private_key: self.private_key.clone().map(SecretString::from),
            chain_spec,
            bundler_rpc_base: self.bundler_rpc_base.clone(),
            paymaster_rpc_base: self.paymaster_rpc_base.clone(),
            target_contract: self.target_contract,
            mint,
            receipt_timeout: Duration::from_millis(self.receipt_timeout_millis),
            receipt_poll_interval: Duration::from_millis(self.receipt_poll_interval_millis),
            account_index: self.account_index,
            provider_client_timeout_seconds: self.provider_client_timeout_seconds,
        }
    }
}

/// Arguments of the mint call
#[derive(Debug, Args)]
#[command(next_help_heading = "Mint")]
pub struct MintCliArgs {
    #[arg(
        long = "mint.manufacturer_node",
        name = "mint.manufacturer_node",
        env = "MINT_MANUFACTURER_NODE",
        default_value = "19"
    )]
    manufacturer_node: U256,

    /// Owner of the minted vehicle
    #[arg(
        long = "mint.owner",
        name = "mint.owner",
        env = "MINT_OWNER",
        default_value = "0xd744468B9192301650f8Cb5e390BdD824DFA6Dd9"
    )]
    owner: String,

    #[arg(
        long = "mint.device_definition_id",
        name = "mint.device_definition_id",
        env = "MINT_DEVICE_DEFINITION_ID",
        default_value = "cadillac_lyriq_2023"
    )]
    device_definition_id: String,

    /// Vehicle attributes as `attribute=info`, may be repeated
    #[arg(
        long = "mint.attribute",
        name = "mint.attribute",
        value_parser = parse_attribute,
        default_values = ["Make=Cadillac", "Model=Lyriq", "Year=2023"]
    )]
    attributes: Vec<(String, String)>,
}

impl MintCliArgs {
    fn to_mint_args(&self) -> MintArgs {
        MintArgs {
            manufacturer_node: self.manufacturer_node,
            owner: self.owner.clone(),
            device_definition_id: self.device_definition_id.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (attribute, info) = s
        .split_once('=')
        .ok_or_else(|| format!("expected attribute=info, got {s}"))?;
    if attribute.is_empty() {
        return Err(format!("empty attribute name in {s}"));
    }
    Ok((attribute.to_string(), info.to_string()))
}

/// CLI options for logging
#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
pub struct LogsArgs {
    /// Log file
    ///
    /// If not provided, logs will be written to stdout
    #[arg(
        long = "log.file",
        name = "log.file",
        env = "LOG_FILE",
        default_value = None,
        global = true
    )]
    file: Option<String>,

    /// Log JSON
    ///
    /// If set, logs will be written in JSON format
    #[arg(
        long = "log.json",
        name = "log.json",
        env = "LOG_JSON",
        required = false,
        num_args = 0,
        global = true
    )]
    json: bool,

    /// Log pretty
    ///
    /// If set, logs are written as multi-line records. Ignored with `log.json`
    #[arg(
        long = "log.pretty",
        name = "log.pretty",
        env = "LOG_PRETTY",
        required = false,
        num_args = 0,
        global = true
    )]
    pretty: bool,
}

/// CLI options
#[derive(Debug, Parser)]
#[command(name = "minter", version)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    common: CommonArgs,

    #[clap(flatten)]
    logs: LogsArgs,
}

fn construct_providers(
    config: &MintConfig,
) -> anyhow::Result<
    Providers<
        impl EvmProvider + Clone,
        impl BundlerProvider + Clone,
        impl PaymasterProvider + Clone,
    >,
> {
    let bundler_url = config.bundler_url();
    let timeout = config.provider_client_timeout_seconds;
    Ok(Providers {
        evm: new_alloy_evm_provider(&bundler_url, timeout).context("evm provider")?,
        bundler: new_alloy_bundler_provider(&bundler_url, timeout).context("bundler provider")?,
        paymaster: new_alloy_paymaster_provider(&config.paymaster_url(), timeout)
            .context("paymaster provider")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mint_args() {
        let cli = Cli::try_parse_from(["minter", "mint"]).unwrap();
        let Command::Mint(args) = cli.command else {
            panic!("expected mint command");
        };
        assert_eq!(args.to_mint_args(), MintArgs::default());
    }

    #[test]
    fn test_mint_attributes() {
        let cli = Cli::try_parse_from([
            "minter",
            "mint",
            "--mint.attribute",
            "Make=Tesla",
            "--mint.attribute",
            "Year=2024",
        ])
        .unwrap();
        let Command::Mint(args) = cli.command else {
            panic!("expected mint command");
        };
        assert_eq!(
            args.attributes,
            vec![
                ("Make".to_string(), "Tesla".to_string()),
                ("Year".to_string(), "2024".to_string())
            ]
        );
    }

    #[test]
    fn test_manufacturer_node_is_uint256() {
        let cli = Cli::try_parse_from([
            "minter",
            "mint",
            "--mint.manufacturer_node",
            "340282366920938463463374607431768211456",
        ])
        .unwrap();
        let Command::Mint(args) = cli.command else {
            panic!("expected mint command");
        };
        assert_eq!(
            args.to_mint_args().manufacturer_node,
            U256::from(u128::MAX) + U256::from(1)
        );

        let cli = Cli::try_parse_from(["minter", "mint", "--mint.manufacturer_node", "0x13"])
            .unwrap();
        let Command::Mint(args) = cli.command else {
            panic!("expected mint command");
        };
        assert_eq!(args.to_mint_args().manufacturer_node, U256::from(19));
    }

    #[test]
    fn test_invalid_attribute() {
        assert!(Cli::try_parse_from(["minter", "mint", "--mint.attribute", "Make"]).is_err());
        assert!(parse_attribute("=x").is_err());
        assert_eq!(
            parse_attribute("Model=Lyriq=2").unwrap(),
            ("Model".to_string(), "Lyriq=2".to_string())
        );
    }

    #[test]
    fn test_common_args_to_config() {
        let cli = Cli::try_parse_from([
            "minter",
            "address",
            "--project_id",
            "abc",
            "--private_key",
            "0x01",
            "--receipt_timeout_millis",
            "50",
        ])
        .unwrap();
        let config = cli
            .common
            .to_config(ChainSpec::default(), MintArgs::default());
        assert_eq!(config.project_id, "abc");
        assert!(config.private_key.is_some());
        assert_eq!(config.receipt_timeout, Duration::from_millis(50));
        assert_eq!(config.receipt_poll_interval, Duration::from_secs(1));
        assert_eq!(
            config.bundler_url(),
            "https://rpc.zerodev.app/api/v2/bundler/abc"
        );
    }
}
