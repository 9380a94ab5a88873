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


use std::io;

pub use tracing::*;
use tracing::{subscriber, subscriber::Interest, Metadata, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, FmtSubscriber, Layer};

use super::LogsArgs;

const DEFAULT_FILTER: &str = "info";

/// Targets too chatty at `debug` to be useful when following a single flow
const BLACKLISTED_TARGETS: &[&str] = &["h2", "hyper", "reqwest", "tower::buffer"];

/// Output layout of the fmt subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Compact,
    Pretty,
    Json,
}

impl Format {
    fn from_args(config: &LogsArgs) -> Self {
        if config.json {
            Format::Json
        } else if config.pretty {
            Format::Pretty
        } else {
            Format::Compact
        }
    }
}

pub fn configure_logging(config: &LogsArgs) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = if let Some(log_file) = &config.file {
        tracing_appender::non_blocking(tracing_appender::rolling::never(".", log_file))
    } else {
        tracing_appender::non_blocking(io::stdout())
    };

    set_global_subscriber(Format::from_args(config), env_filter(), writer)?;

    // Redirect logs from external crates using `log` to the tracing subscriber
    LogTracer::init()?;

    Ok(guard)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn set_global_subscriber(
    format: Format,
    filter: EnvFilter,
    writer: NonBlocking,
) -> anyhow::Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer);
    match format {
        Format::Compact => {
            subscriber::set_global_default(builder.compact().finish().with(TargetBlacklistLayer))?
        }
        Format::Pretty => {
            subscriber::set_global_default(builder.pretty().finish().with(TargetBlacklistLayer))?
        }
        Format::Json => {
            subscriber::set_global_default(builder.json().finish().with(TargetBlacklistLayer))?
        }
    }
    Ok(())
}

fn is_blacklisted(target: &str) -> bool {
    BLACKLISTED_TARGETS
        .iter()
        .any(|blacklisted| target.starts_with(blacklisted))
}

struct TargetBlacklistLayer;

impl<S: Subscriber> Layer<S> for TargetBlacklistLayer {
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        if is_blacklisted(metadata.target()) {
            Interest::never()
        } else {
            Interest::always()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs(json: bool, pretty: bool) -> LogsArgs {
        LogsArgs {
            file: None,
            json,
            pretty,
        }
    }

    #[test]
    fn test_format_from_args() {
        assert_eq!(Format::from_args(&logs(false, false)), Format::Compact);
        assert_eq!(Format::from_args(&logs(false, true)), Format::Pretty);
        // json wins over pretty
        assert_eq!(Format::from_args(&logs(true, true)), Format::Json);
    }

    #[test]
    fn test_blacklist() {
        assert!(is_blacklisted("hyper::proto::h1"));
        assert!(is_blacklisted("reqwest::connect"));
        assert!(!is_blacklisted("minter_account::client"));
        assert!(!is_blacklisted("minter_flow"));
    }
}
