//! Readiness polling.
//!
//! The poller is the page object's only blocking primitive: it suspends the
//! caller's task between evaluations, sleeping through the adapter so the
//! clock stays observable in tests. Predicates are async and are awaited
//! before their value is used; there is no thread-blocking wait path.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

use super::PageObject;

// ============================================================================
// Constants
// ============================================================================

/// Default readiness wait budget (10 seconds).
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default interval between predicate evaluations (500 milliseconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// ============================================================================
// PageObject - Waiting
// ============================================================================

impl PageObject {
    /// Polls an async predicate until it returns `true` or the budget runs
    /// out.
    ///
    /// The predicate is evaluated once immediately; a same-pass `true`
    /// returns without any sleep. Otherwise the loop sleeps one poll
    /// interval, checks the elapsed wall clock against the timeout, and
    /// only then evaluates again. A wait never succeeds after its budget
    /// is exhausted, even if the next evaluation would have passed.
    ///
    /// Predicate errors propagate immediately and are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] carrying `description` once elapsed time
    /// reaches the timeout.
    pub async fn wait_until<F, Fut>(
        &self,
        mut predicate: F,
        description: &str,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let timeout = timeout.unwrap_or(DEFAULT_WAIT_TIMEOUT);
        let poll_interval = poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        let start = Instant::now();

        if predicate().await? {
            return Ok(());
        }

        loop {
            self.adapter().sleep(poll_interval).await;

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                debug!(
                    description,
                    elapsed_ms = elapsed.as_millis() as u64,
                    timeout_ms = timeout.as_millis() as u64,
                    "Wait timed out"
                );
                return Err(Error::timeout(description, timeout.as_millis() as u64));
            }

            if predicate().await? {
                return Ok(());
            }
        }
    }

    /// Waits until every named selector resolves to a present element under
    /// the context, all in the same evaluation pass.
    ///
    /// No per-selector failure reporting: the wait either succeeds as a
    /// whole or times out as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSelector`] if any name is missing from the
    /// selector table (checked up front, before the first poll), or
    /// [`Error::Timeout`] if the set never resolves within the budget.
    pub async fn wait_for_elements<S: AsRef<str>>(
        &self,
        names: &[S],
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> Result<()> {
        // Capture the locators once; table edits during the wait are not
        // observed.
        let mut locators = Vec::with_capacity(names.len());
        for name in names {
            locators.push(self.selector(name.as_ref())?.clone());
        }

        let name_list: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        let description = format!("elements present: {name_list:?}");

        debug!(
            context = %self.context(),
            selectors = ?name_list,
            "Waiting for elements"
        );

        let adapter = self.adapter();
        let context = self.context();
        let locators = &locators;

        self.wait_until(
            move || async move {
                for by in locators {
                    if !adapter.element_exists(context, by).await? {
                        return Ok(false);
                    }
                }
                Ok(true)
            },
            &description,
            timeout,
            poll_interval,
        )
        .await
    }
}

// ============================================================================
// Tests
// ============================================================================
