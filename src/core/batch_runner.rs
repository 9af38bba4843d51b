use crate::adapters::{FileLogStore, N2yoClient, SmtpMailer};
use crate::config::AlertConfig;
use crate::core::notification::{DispatchReport, NotificationSink};
use crate::core::satellite_query::{QueryOutcome, SatelliteQuery};
use crate::core::{EmailSender, LogStore, NotificationBody, SatelliteFetcher, SatelliteTarget};
use crate::domain::services::{TimeLocalizer, VisibilityEvaluator};
use crate::utils::error::{AlertError, Result};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub struct TargetOutcome {
    pub target: SatelliteTarget,
    pub outcome: QueryOutcome,
}

#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<TargetOutcome>,
    pub body: Option<NotificationBody>,
    /// 沒有任何可見衛星時為 None (不寄信也不寫日誌)
    pub dispatch: Option<DispatchReport>,
}

impl BatchReport {
    pub fn visible_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.message().is_some())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_failed()).count()
    }

    /// 查詢階段超過期限時回傳該錯誤
    pub fn timeout(&self) -> Option<&AlertError> {
        self.outcomes.iter().find_map(|o| match &o.outcome {
            QueryOutcome::Failed(e @ AlertError::TimeoutError { .. }) => Some(e),
            _ => None,
        })
    }
}

pub struct BatchRunner<F: SatelliteFetcher, E: EmailSender, L: LogStore> {
    targets: Vec<SatelliteTarget>,
    query: SatelliteQuery<F>,
    sink: NotificationSink<E, L>,
}

impl BatchRunner<N2yoClient, SmtpMailer, FileLogStore> {
    pub fn from_config(config: &AlertConfig) -> Result<Self> {
        let evaluator = VisibilityEvaluator::new(TimeLocalizer::new(config.timezone()?));
        let query = SatelliteQuery::new(
            N2yoClient::from_config(config)?,
            config.coordinates(),
            evaluator,
        );

        let log_store = FileLogStore::new(config.log_path());
        tracing::debug!("📝 Passes are appended to {}", log_store.path().display());
        let sink = match &config.smtp {
            Some(smtp) => NotificationSink::new(SmtpMailer::new(smtp)?, smtp.recipient.clone(), log_store),
            None => NotificationSink::log_only(log_store),
        };

        Ok(Self::new(config.targets(), query, sink))
    }
}

impl<F: SatelliteFetcher, E: EmailSender, L: LogStore> BatchRunner<F, E, L> {
    pub fn new(
        targets: Vec<SatelliteTarget>,
        query: SatelliteQuery<F>,
        sink: NotificationSink<E, L>,
    ) -> Self {
        Self {
            targets,
            query,
            sink,
        }
    }

    pub fn targets(&self) -> &[SatelliteTarget] {
        &self.targets
    }

    /// 依輸入順序逐一查詢，不做任何外部通知
    pub async fn evaluate(&self) -> Vec<TargetOutcome> {
        self.evaluate_within(None).await
    }

    /// 期限只限制查詢階段；逾時後剩下的衛星不再查詢，記為 TimeoutError
    pub async fn evaluate_within(&self, deadline: Option<Duration>) -> Vec<TargetOutcome> {
        let deadline = deadline.map(|limit| (Instant::now() + limit, limit.as_secs()));
        let mut outcomes = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            tracing::debug!("🛰️ Querying satellite {}", target.id);
            let outcome = match deadline {
                Some((at, seconds)) => self.query_before(target, at, seconds).await,
                None => self.query.query(target).await,
            };
            if let Some(message) = outcome.message() {
                tracing::info!("✅ {}", message);
            }
            outcomes.push(TargetOutcome {
                target: target.clone(),
                outcome,
            });
        }

        outcomes
    }

    async fn query_before(&self, target: &SatelliteTarget, at: Instant, seconds: u64) -> QueryOutcome {
        if Instant::now() >= at {
            tracing::warn!("⏰ Deadline passed, satellite {} not queried", target.id);
            return QueryOutcome::Failed(AlertError::TimeoutError { seconds });
        }

        match tokio::time::timeout_at(at, self.query.query(target)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!("⏰ Deadline hit while querying satellite {}", target.id);
                QueryOutcome::Failed(AlertError::TimeoutError { seconds })
            }
        }
    }

    pub async fn run(&self) -> BatchReport {
        self.run_within(None).await
    }

    /// 通知階段不受期限限制：只要有可見衛星，寄信與寫日誌都一定會嘗試
    pub async fn run_within(&self, deadline: Option<Duration>) -> BatchReport {
        tracing::info!("🚀 Checking {} satellite(s)", self.targets.len());

        let outcomes = self.evaluate_within(deadline).await;
        let messages: Vec<String> = outcomes
            .iter()
            .filter_map(|o| o.outcome.message().map(str::to_string))
            .collect();

        let body = NotificationBody::from_messages(&messages);
        let dispatch = match &body {
            Some(body) => Some(self.sink.dispatch(body).await),
            None => {
                tracing::info!("No satellite visible right now, nothing to notify");
                None
            }
        };

        let report = BatchReport {
            outcomes,
            body,
            dispatch,
        };
        tracing::info!(
            "Batch finished: {} visible, {} failed, {} total",
            report.visible_count(),
            report.failed_count(),
            report.outcomes.len()
        );
        report
    }
}
