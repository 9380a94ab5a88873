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

//! Polling with a hard deadline.

use std::{future::Future, time::Duration};

use tokio::time::{self, Instant};
use tracing::debug;

/// Settings for [`poll_until`]
#[derive(Clone, Copy, Debug)]
pub struct PollOpts {
    /// Wait between two polls
    pub interval: Duration,
    /// Total time allowed, measured from the first poll
    pub timeout: Duration,
}

/// Why [`poll_until`] stopped without a value
#[derive(Debug, PartialEq, Eq)]
pub enum PollError<E> {
    /// The deadline passed before a value was available
    Timeout,
    /// A poll failed
    Failed(E),
}

/// Poll `func` until it yields a value, fails, or the deadline passes.
///
/// The first poll is immediate. A poll in flight at the deadline is
/// cancelled and no poll starts after it. Failures are returned as is,
/// nothing is retried.
pub async fn poll_until<Func, Fut, Out, Err>(
    description: &str,
    mut func: Func,
    opts: PollOpts,
) -> Result<Out, PollError<Err>>
where
    Func: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<Out>, Err>>,
{
    let deadline = Instant::now() + opts.timeout;
    let mut attempt_number = 0_u64;
    loop {
        attempt_number += 1;
        match time::timeout_at(deadline, func()).await {
            Ok(Ok(Some(out))) => return Ok(out),
            Ok(Ok(None)) => debug!("{description} not ready (attempt {attempt_number})"),
            Ok(Err(error)) => return Err(PollError::Failed(error)),
            Err(_) => return Err(PollError::Timeout),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(PollError::Timeout);
        }
        time::sleep(opts.interval.min(deadline - now)).await;
        if Instant::now() >= deadline {
            return Err(PollError::Timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_returns_first_value() {
        let polls = &AtomicUsize::new(0);
        let out = poll_until(
            "value",
            || async move {
                let n = polls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ()>((n == 2).then_some(n))
            },
            PollOpts {
                interval: Duration::from_millis(10),
                timeout: Duration::from_secs(1),
            },
        )
        .await;
        assert_eq!(out, Ok(2));
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_poll_after_deadline() {
        let polls = &AtomicUsize::new(0);
        let start = Instant::now();
        let out = poll_until(
            "value",
            || async move {
                polls.fetch_add(1, Ordering::SeqCst);
                Ok::<Option<()>, ()>(None)
            },
            PollOpts {
                interval: Duration::from_millis(20),
                timeout: Duration::from_millis(50),
            },
        )
        .await;
        assert_eq!(out, Err(PollError::Timeout));
        // polls at 0, 20 and 40ms
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_poll_cancelled_at_deadline() {
        let out = poll_until(
            "value",
            || async move {
                time::sleep(Duration::from_secs(10)).await;
                Ok::<_, ()>(Some(()))
            },
            PollOpts {
                interval: Duration::from_millis(20),
                timeout: Duration::from_millis(50),
            },
        )
        .await;
        assert_eq!(out, Err(PollError::Timeout));
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let polls = &AtomicUsize::new(0);
        let out = poll_until(
            "value",
            || async move {
                polls.fetch_add(1, Ordering::SeqCst);
                Err::<Option<()>, _>("down")
            },
            PollOpts {
                interval: Duration::from_millis(1),
                timeout: Duration::from_secs(1),
            },
        )
        .await;
        assert_eq!(out, Err(PollError::Failed("down")));
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }
}
