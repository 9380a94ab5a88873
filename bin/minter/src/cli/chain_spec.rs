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


use anyhow::{bail, Context};
use config::{Config, Environment, File, FileFormat};
use minter_types::chain::ChainSpec;
use paste::paste;

/// Resolve the chain spec from the network flag and a chain spec file
pub fn resolve_chain_spec(
    network: &Option<String>,
    file: &Option<String>,
) -> anyhow::Result<ChainSpec> {
    // construct the config from the hierarchy of
    // - ENV
    // - file
    // - network flag
    // - defaults

    let default =
        serde_json::to_string(&ChainSpec::default()).context("should serialize chain spec")?;
    let mut config_builder =
        Config::builder().add_source(File::from_str(default.as_str(), FileFormat::Json));

    if let Some(network) = &network {
        config_builder = config_builder.add_source(File::from_str(
            get_hardcoded_chain_spec(network.to_lowercase().as_str())?,
            FileFormat::Toml,
        ));
    }
    if let Some(file) = &file {
        config_builder = config_builder.add_source(File::with_name(file.as_str()));
    }
    let c = config_builder
        .add_source(Environment::with_prefix("CHAIN"))
        .build()
        .context("should build chain spec config")?;

    match c.get::<u64>("id") {
        Ok(0) => bail!("chain id must be non-zero"),
        Ok(_) => {}
        Err(_) => bail!("chain id must be defined"),
    }

    c.try_deserialize().context("should deserialize chain spec")
}

macro_rules! define_hardcoded_chain_specs {
    ($($network:ident),+) => {
        paste! {
            $(
                const [< $network:upper _SPEC >]: &str = include_str!(concat!("../../chain_specs/", stringify!($network), ".toml"));
            )+

            fn get_hardcoded_chain_spec(network: &str) -> anyhow::Result<&'static str> {
                match network {
                    $(
                        stringify!($network) => Ok([< $network:upper _SPEC >]),
                    )+
                    _ => bail!("unknown hardcoded network: {}", network),
                }
            }

            pub const HARDCODED_CHAIN_SPECS: &[&'static str] = &[$(stringify!($network),)+];
        }
    };
}

define_hardcoded_chain_specs!(polygon_amoy, polygon, base_sepolia, ethereum_sepolia);
