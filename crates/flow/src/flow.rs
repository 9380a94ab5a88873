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

use alloy_primitives::{Address, Bytes, B256};
use minter_account::{
    EcdsaValidator, KernelAccount, KernelAccountClient, KernelValidator, PermissionValidator,
    ValidatorSelection,
};
use minter_contracts::vehicle::IVehicleId;
use minter_provider::{BundlerProvider, EvmProvider, PaymasterProvider};
use minter_signer::LocalSigner;
use minter_types::{
    kernel::KernelVersion,
    policy::{CallPolicy, CallPolicyVersion, Permission},
    Call, UserOperationReceipt,
};
use tracing::{info, warn};

use crate::{encode_mint_call, MintConfig, MintError};

const KERNEL_VERSION: KernelVersion = KernelVersion::V3_1;

/// Network clients a flow runs against
#[derive(Debug)]
pub struct Providers<E, B, P> {
    /// Chain reads, served by the bundler endpoint
    pub evm: E,
    /// Bundler
    pub bundler: B,
    /// Paymaster sponsoring every operation
    pub paymaster: P,
}

/// Addresses involved in a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountAddresses {
    /// Sudo signer, owner of the account
    pub sudo: Address,
    /// Worker signer, fresh on every run
    pub worker: Address,
    /// Smart account
    pub account: Address,
}

/// Result of a successful mint
#[derive(Clone, Debug)]
pub struct MintOutcome {
    /// Addresses used
    pub addresses: AccountAddresses,
    /// Hash of the mint user operation
    pub user_op_hash: B256,
    /// Its receipt
    pub receipt: UserOperationReceipt,
}

/// Mint a vehicle through a worker restricted to the mint function of the
/// target contract. The operation is sponsored by the paymaster.
pub async fn run_mint_flow<E, B, P>(
    config: &MintConfig,
    providers: Providers<E, B, P>,
) -> Result<MintOutcome, MintError>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    let (sudo, worker) = load_signers(config)?;
    let mint_call = encode_mint_call(config.target_contract, &config.mint)?;
    let (addresses, client) = build_client(config, sudo, worker, providers).await?;

    let user_op_hash = client
        .send_user_operation(&[mint_call], ValidatorSelection::Regular)
        .await?;
    let receipt = wait_for_receipt(config, &client, user_op_hash).await?;

    Ok(MintOutcome {
        addresses,
        user_op_hash,
        receipt,
    })
}

/// Deploy the account with an empty call signed by the sudo signer.
///
/// Returns `None` if the account is deployed already.
pub async fn run_deploy_flow<E, B, P>(
    config: &MintConfig,
    providers: Providers<E, B, P>,
) -> Result<Option<UserOperationReceipt>, MintError>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    let (sudo, worker) = load_signers(config)?;
    let (addresses, client) = build_client(config, sudo, worker, providers).await?;

    if client.is_deployed().await? {
        info!("Account {} is already deployed", addresses.account);
        return Ok(None);
    }

    let noop = Call::new(Address::ZERO, Bytes::new());
    let user_op_hash = client
        .send_user_operation(&[noop], ValidatorSelection::Sudo)
        .await?;
    wait_for_receipt(config, &client, user_op_hash).await.map(Some)
}

/// Derive the account address without sending anything
pub async fn resolve_addresses<E, B, P>(
    config: &MintConfig,
    providers: Providers<E, B, P>,
) -> Result<AccountAddresses, MintError>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    let (sudo, worker) = load_signers(config)?;
    let (addresses, _) = build_client(config, sudo, worker, providers).await?;
    Ok(addresses)
}

fn load_signers(config: &MintConfig) -> Result<(LocalSigner, LocalSigner), MintError> {
    config.validate()?;
    let private_key = config
        .private_key
        .as_ref()
        .ok_or_else(|| MintError::Configuration("PRIVATE_KEY is not set".to_string()))?;
    let sudo = LocalSigner::from_secret(private_key)
        .map_err(|e| MintError::Configuration(format!("PRIVATE_KEY: {e}")))?;
    info!("Sudo signer address: {}", sudo.address());

    let worker = LocalSigner::random();
    info!("Worker signer address: {}", worker.address());

    Ok((sudo, worker))
}

async fn build_client<E, B, P>(
    config: &MintConfig,
    sudo: LocalSigner,
    worker: LocalSigner,
    providers: Providers<E, B, P>,
) -> Result<(AccountAddresses, KernelAccountClient<E, B, P>), MintError>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    let Providers {
        evm,
        bundler,
        paymaster,
    } = providers;
    let chain_spec = &config.chain_spec;

    let policy = CallPolicy::new(
        CallPolicyVersion::V0_0_2,
        vec![
            Permission::for_function::<IVehicleId::mintVehicleWithDeviceDefinitionCall>(
                config.target_contract,
            ),
        ],
    )
    .map_err(|e| MintError::ValidatorConstruction(e.to_string()))?;

    let sudo = EcdsaValidator::new(&evm, chain_spec, sudo, KERNEL_VERSION).await?;
    let worker =
        PermissionValidator::new(&evm, chain_spec, worker, vec![policy], KERNEL_VERSION).await?;

    let account = KernelAccount::new(
        &evm,
        chain_spec,
        KERNEL_VERSION,
        sudo,
        Some(worker),
        config.account_index,
    )
    .await?;
    info!("Account address: {}", account.address());

    let addresses = AccountAddresses {
        sudo: account.sudo().signer_address(),
        worker: account
            .regular()
            .map(|r| r.signer_address())
            .unwrap_or_default(),
        account: account.address(),
    };
    Ok((
        addresses,
        KernelAccountClient::new(account, evm, bundler, paymaster),
    ))
}

async fn wait_for_receipt<E, B, P>(
    config: &MintConfig,
    client: &KernelAccountClient<E, B, P>,
    hash: B256,
) -> Result<UserOperationReceipt, MintError>
where
    E: EvmProvider,
    B: BundlerProvider,
    P: PaymasterProvider,
{
    info!("UserOp hash: {hash}");
    info!("Waiting for UserOp to complete...");

    let receipt = client
        .wait_for_user_operation_receipt(
            hash,
            config.receipt_timeout,
            config.receipt_poll_interval,
        )
        .await?;
    if !receipt.success {
        warn!("UserOp {hash} reverted: {}", receipt.reason);
    }

    info!(
        "View completed UserOp here: {}",
        config.chain_spec.user_operation_url(hash)
    );
    Ok(receipt)
}
