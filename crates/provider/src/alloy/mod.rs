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

use alloy_provider::{Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use alloy_transport_http::Http;
use anyhow::Context;
use reqwest::Client;
use url::Url;

use self::{
    bundler::AlloyBundlerProvider,
    evm::AlloyEvmProvider,
    paymaster::AlloyPaymasterProvider,
    request_timeout::{RequestTimeout, RequestTimeoutLayer},
};
use crate::{BundlerProvider, EvmProvider, PaymasterProvider};

pub(crate) mod bundler;
pub(crate) mod evm;
pub(crate) mod paymaster;
mod request_timeout;
mod types;

/// Create a new alloy evm provider from a given RPC URL
pub fn new_alloy_evm_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl EvmProvider + Clone> {
    let provider = new_alloy_provider(rpc_url, provider_client_timeout_seconds)?;
    Ok(AlloyEvmProvider::new(provider))
}

/// Create a new alloy bundler provider from a given RPC URL
pub fn new_alloy_bundler_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl BundlerProvider + Clone> {
    let provider = new_alloy_provider(rpc_url, provider_client_timeout_seconds)?;
    Ok(AlloyBundlerProvider::new(provider))
}

/// Create a new alloy paymaster provider from a given RPC URL
pub fn new_alloy_paymaster_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl PaymasterProvider + Clone> {
    let provider = new_alloy_provider(rpc_url, provider_client_timeout_seconds)?;
    Ok(AlloyPaymasterProvider::new(provider))
}

/// Create a new alloy provider from a given RPC URL
pub fn new_alloy_provider(
    rpc_url: &str,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl AlloyProvider<RequestTimeout<Http<Client>>> + Clone> {
    let url = Url::parse(rpc_url).context("invalid rpc url")?;
    let timeout_layer =
        RequestTimeoutLayer::new(Duration::from_secs(provider_client_timeout_seconds));
    let client = ClientBuilder::default().layer(timeout_layer).http(url);
    let provider = ProviderBuilder::new().on_client(client);
    Ok(provider)
}
