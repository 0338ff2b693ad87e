use crate::core::status::{interpret, status_key};
use crate::core::validator::validate;
use crate::domain::model::{PollState, TickOutcome, FAILURE_MESSAGE_PREFIX, NO_SUBMISSION_MESSAGE};
use crate::domain::ports::{ConfigProvider, FailurePolicy, HomeworkSource, Notifier};
use crate::utils::error::{ErrorSeverity, Result};
use std::time::Duration;

/// Polls the homework source and forwards status changes to the notifier.
///
/// The poller owns its [`PollState`]; nothing else reads or writes it.
pub struct Poller<H: HomeworkSource, N: Notifier> {
    source: H,
    notifier: N,
    state: PollState,
    retry_period: Duration,
    failure_policy: FailurePolicy,
}

impl<H: HomeworkSource, N: Notifier> Poller<H, N> {
    pub fn new(
        source: H,
        notifier: N,
        from_timestamp: i64,
        retry_period: Duration,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            source,
            notifier,
            state: PollState::new(from_timestamp),
            retry_period,
            failure_policy,
        }
    }

    pub fn from_config<C: ConfigProvider>(
        source: H,
        notifier: N,
        config: &C,
        from_timestamp: i64,
    ) -> Self {
        Self::new(
            source,
            notifier,
            from_timestamp,
            config.retry_period(),
            config.failure_policy(),
        )
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// One pass of fetch, validate, interpret and (maybe) notify.
    pub async fn poll_once(&mut self) -> Result<TickOutcome> {
        let raw = self
            .source
            .fetch_updates(self.state.next_from_timestamp)
            .await?;
        let response = validate(raw)?;
        self.state.next_from_timestamp = response.current_date;

        let Some(record) = response.latest() else {
            if self.state.last_seen_status_key == NO_SUBMISSION_MESSAGE {
                tracing::debug!("Still no homework under review");
                return Ok(TickOutcome::Unchanged);
            }
            self.notifier.notify(NO_SUBMISSION_MESSAGE).await?;
            self.state.last_seen_status_key = NO_SUBMISSION_MESSAGE.to_string();
            return Ok(TickOutcome::Notified(NO_SUBMISSION_MESSAGE.to_string()));
        };

        let message = interpret(record)?;
        let key = status_key(record)?;
        if key == self.state.last_seen_status_key {
            tracing::debug!("Homework status unchanged: {}", key);
            return Ok(TickOutcome::Unchanged);
        }

        self.notifier.notify(&message).await?;
        self.state.last_seen_status_key = key.to_string();
        Ok(TickOutcome::Notified(message))
    }

    /// [`Poller::poll_once`] plus failure reporting.
    ///
    /// A failed pass is reported through the notifier before its error is
    /// returned. The same report is not delivered twice in a row. If the
    /// report itself cannot be delivered, that delivery error is returned.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        match self.poll_once().await {
            Ok(outcome) => {
                self.state.last_failure_report = None;
                Ok(outcome)
            }
            Err(error) => {
                let report = format!("{} {}", FAILURE_MESSAGE_PREFIX, error);
                tracing::error!("{}", report);

                if self.state.last_failure_report.as_deref() == Some(report.as_str()) {
                    tracing::warn!("Failure already reported, not sending it again: {}", report);
                } else {
                    self.notifier.notify(&report).await?;
                    self.state.last_failure_report = Some(report);
                }
                Err(error)
            }
        }
    }

    /// Runs ticks separated by the retry period.
    ///
    /// Without `max_iterations` this only returns when a tick fails under
    /// [`FailurePolicy::Exit`].
    pub async fn run(&mut self, max_iterations: Option<u64>) -> Result<()> {
        tracing::info!(
            "🚀 Polling every {:?} starting from {}",
            self.retry_period,
            self.state.next_from_timestamp
        );

        let mut iteration: u64 = 0;
        loop {
            iteration += 1;

            match self.tick().await {
                Ok(TickOutcome::Notified(message)) => {
                    tracing::info!("📨 Notification sent: {}", message);
                }
                Ok(TickOutcome::Unchanged) => {
                    tracing::debug!("Nothing new on tick {}", iteration);
                }
                Err(error) => {
                    match error.severity() {
                        ErrorSeverity::Medium => tracing::warn!(
                            "Tick {} failed ({:?}): {}",
                            iteration,
                            error.category(),
                            error
                        ),
                        ErrorSeverity::High | ErrorSeverity::Critical => tracing::error!(
                            "Tick {} failed ({:?}): {}",
                            iteration,
                            error.category(),
                            error
                        ),
                    }

                    match self.failure_policy {
                        FailurePolicy::Continue => {}
                        FailurePolicy::Exit => return Err(error),
                    }
                }
            }

            if max_iterations.is_some_and(|max| iteration >= max) {
                tracing::info!("Reached {} iteration(s), stopping", iteration);
                return Ok(());
            }

            tokio::time::sleep(self.retry_period).await;
        }
    }
}
