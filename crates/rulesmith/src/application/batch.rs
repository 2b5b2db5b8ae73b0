//! Batch Processor
//!
//! Runs a batch of alert groups through rule lookup, optimization and
//! persistence. Groups are handled one after another in input order; a
//! failing group is recorded and the next one proceeds.

use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::RuleOptimizer;
use crate::domain::{errors::DomainError, AlertGroup, BatchReport, GroupOutcome};
use crate::ports::{ReviewStore, RuleSource};

#[derive(Clone)]
pub struct BatchProcessor {
    rule_source: Arc<dyn RuleSource>,
    optimizer: RuleOptimizer,
    store: Arc<dyn ReviewStore>,
}

impl BatchProcessor {
    pub fn new(
        rule_source: Arc<dyn RuleSource>,
        optimizer: RuleOptimizer,
        store: Arc<dyn ReviewStore>,
    ) -> Self {
        Self {
            rule_source,
            optimizer,
            store,
        }
    }

    /// Process raw batch elements; each element is decoded on its own so a
    /// malformed group only affects its own outcome.
    pub async fn process(&self, groups: Vec<Value>) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, raw) in groups.into_iter().enumerate() {
            let category_hint = raw
                .get("category")
                .and_then(Value::as_str)
                .map(str::to_string);

            let outcome = match AlertGroup::from_value(raw) {
                Ok(group) => match self.process_group(&group).await {
                    Ok(path) => {
                        GroupOutcome::saved(index, group.category, path.display().to_string())
                    }
                    Err(e) => GroupOutcome::failed(index, Some(group.category), &e),
                },
                Err(e) => {
                    tracing::warn!("⚠️  Skipping malformed group #{}: {}", index, e);
                    GroupOutcome::failed(index, category_hint, &e)
                }
            };

            report.push(outcome);
        }

        tracing::info!(
            "📦 Batch finished: {} saved, {} failed",
            report.outcomes.len() - report.error_count(),
            report.error_count()
        );

        report
    }

    /// Rules → prompt → completion → review file, for one group
    pub async fn process_group(&self, group: &AlertGroup) -> Result<PathBuf, DomainError> {
        let rules = self.rule_source.fetch(&group.category).await?;
        tracing::debug!(
            "Loaded {} rules for '{}' from {}",
            rules.len(),
            group.category,
            self.rule_source.source_name()
        );

        let optimized = self
            .optimizer
            .optimize(&group.category, &rules, &group.alerts)
            .await?;

        self.store.save(&group.category, &optimized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FsReviewStore, MockProvider, StaticRuleSource, SyntheticRuleSource};
    use serde_json::json;
    use tempfile::TempDir;

    fn processor(provider: Arc<MockProvider>, dir: &TempDir) -> BatchProcessor {
        BatchProcessor::new(
            Arc::new(SyntheticRuleSource),
            RuleOptimizer::new(provider),
            Arc::new(FsReviewStore::new(dir.path())),
        )
    }

    #[tokio::test]
    async fn test_each_group_gets_a_review_file() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("<rule id=\"5710\" level=\"12\"/>"));
        let batch = processor(provider.clone(), &tmp);

        let report = batch
            .process(vec![
                json!({ "category": "ssh", "alerts": ["Alert: 5710 triggered 50 times"] }),
                json!({ "category": "malware", "alerts": ["Alert: 5720 triggered 30 times"] }),
            ])
            .await;

        let files = report.saved_files();
        assert_eq!(files.len(), 2);
        assert!(files[0].contains("optimized_rules_ssh_"));
        assert!(files[1].contains("optimized_rules_malware_"));
        assert_eq!(
            std::fs::read_to_string(&files[0]).unwrap(),
            "<rule id=\"5710\" level=\"12\"/>"
        );
        assert_eq!(provider.call_count(), 2);
        assert!(provider.prompts()[0].contains("Rule for ssh event 0"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("x"));
        let report = processor(provider.clone(), &tmp).process(vec![]).await;

        assert!(report.outcomes.is_empty());
        assert!(report.saved_files().is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_group_missing_alerts_is_reported_not_dropped() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("x"));
        let report = processor(provider, &tmp)
            .process(vec![
                json!({ "category": "ssh" }),
                json!({ "category": "web", "alerts": ["Alert: 31101 triggered 7 times"] }),
            ])
            .await;

        assert_eq!(report.outcomes.len(), 2);
        match &report.outcomes[0] {
            GroupOutcome::Error {
                index,
                category,
                error_kind,
                ..
            } => {
                assert_eq!(*index, 0);
                assert_eq!(category.as_deref(), Some("ssh"));
                assert_eq!(error_kind, "malformed_request");
            }
            other => panic!("expected error outcome, got {:?}", other),
        }
        assert!(report.outcomes[1].is_saved());
    }

    #[tokio::test]
    async fn test_service_failure_is_isolated_per_group() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("ok").failing_on("Rule for dns event"));
        let report = processor(provider.clone(), &tmp)
            .process(vec![
                json!({ "category": "dns", "alerts": ["Alert: 1 triggered 2 times"] }),
                json!({ "category": "ssh", "alerts": ["Alert: 5710 triggered 50 times"] }),
            ])
            .await;

        assert_eq!(report.error_count(), 1);
        assert!(matches!(
            &report.outcomes[0],
            GroupOutcome::Error { error_kind, .. } if error_kind == "external_service"
        ));
        assert!(report.outcomes[1].is_saved());
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_alerts_fail_before_ai_call() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("x"));
        let report = processor(provider.clone(), &tmp)
            .process(vec![json!({ "category": "ssh", "alerts": [] })])
            .await;

        assert!(matches!(
            &report.outcomes[0],
            GroupOutcome::Error { error_kind, .. } if error_kind == "missing_input"
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_category_without_rules_fails_before_ai_call() {
        let tmp = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::constant("x"));
        let batch = BatchProcessor::new(
            Arc::new(StaticRuleSource::new()),
            RuleOptimizer::new(provider.clone()),
            Arc::new(FsReviewStore::new(tmp.path())),
        );

        let report = batch
            .process(vec![json!({ "category": "ssh", "alerts": ["a"] })])
            .await;

        assert_eq!(report.error_count(), 1);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_batch_going() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocked");
        std::fs::write(&blocker, "file").unwrap();
        let batch = BatchProcessor::new(
            Arc::new(SyntheticRuleSource),
            RuleOptimizer::new(Arc::new(MockProvider::constant("x"))),
            Arc::new(FsReviewStore::new(&blocker)),
        );

        let report = batch
            .process(vec![
                json!({ "category": "ssh", "alerts": ["a"] }),
                json!({ "category": "web", "alerts": ["b"] }),
            ])
            .await;

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.error_count(), 2);
        assert!(report.outcomes.iter().all(|o| matches!(
            o,
            GroupOutcome::Error { error_kind, .. } if error_kind == "persistence"
        )));
    }
}
