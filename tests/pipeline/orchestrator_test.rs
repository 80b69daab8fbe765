#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workbook_agent::config::Settings;
    use workbook_agent::model::{FieldType, Record};
    use workbook_agent::pipeline::{JobOrchestrator, JobState, StepKind};
    use workbook_agent::platform::{InMemoryPlatform, Operation, PlatformCall};

    const JOB: &str = "us_jb_1";
    const FILE: &str = "us_fl_1";

    fn platform_with(records: Vec<Record>) -> InMemoryPlatform {
        InMemoryPlatform::new().with_uploaded_file(FILE, "us_sp_1", records)
    }

    #[tokio::test]
    async fn test_happy_path_reaches_completed() {
        let platform = Arc::new(platform_with(vec![Record::new()
            .with("Name", "Alice")
            .with("Age", 30)]));
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());

        let report = orchestrator.run(JOB, FILE).await;

        assert_eq!(report.state, JobState::Completed);
        assert!(report.error.is_none());
        assert_eq!(platform.count(Operation::AckJob).await, 1);
        assert_eq!(platform.count(Operation::CreateWorkbook).await, 1);
        assert_eq!(platform.count(Operation::CompleteJob).await, 1);
        assert_eq!(platform.count(Operation::FailJob).await, 0);

        let blueprints = platform.created_blueprints().await;
        assert_eq!(blueprints.len(), 1);
        let fields = &blueprints[0].fields;
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, FieldType::String);
        assert_eq!(fields[1].field_type, FieldType::Number);
        assert!(fields.iter().all(|f| f.constraints.is_empty()));

        let job = platform.job(JOB).await.unwrap();
        assert_eq!(job.status.as_deref(), Some("complete"));
    }

    #[tokio::test]
    async fn test_calls_are_sequential() {
        let platform = Arc::new(platform_with(vec![Record::new().with("Name", "Alice")]));
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());
        orchestrator.run(JOB, FILE).await;

        let operations: Vec<_> = platform
            .calls()
            .await
            .iter()
            .map(PlatformCall::operation)
            .collect();
        assert_eq!(
            operations,
            vec![
                Operation::AckJob,
                Operation::GetFile,
                Operation::GetWorkbook,
                Operation::GetRecords,
                Operation::CreateWorkbook,
                Operation::ListWorkbooks,
                Operation::CompleteJob,
                Operation::GetJob,
            ]
        );
    }

    #[tokio::test]
    async fn test_records_failure_fails_job() {
        let platform = Arc::new(
            platform_with(vec![Record::new().with("Name", "Alice")])
                .failing(Operation::GetRecords, "records unavailable"),
        );
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());

        let report = orchestrator.run(JOB, FILE).await;

        assert_eq!(report.state, JobState::Failed);
        assert_eq!(platform.count(Operation::CreateWorkbook).await, 0);
        assert_eq!(platform.count(Operation::CompleteJob).await, 0);

        let fails: Vec<_> = platform
            .calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                PlatformCall::FailJob { message, info, .. } => Some((message, info)),
                _ => None,
            })
            .collect();
        assert_eq!(fails.len(), 1);
        assert!(fails[0].1.contains("records unavailable"));
        assert_eq!(fails[0].0, fails[0].1);
        assert_eq!(report.error.as_deref(), Some(fails[0].1.as_str()));

        let last = report.transitions.last().unwrap();
        assert_eq!(last.step, StepKind::BuildSchema);
        assert_eq!(last.to, JobState::Failed);
    }

    #[tokio::test]
    async fn test_create_failure_fails_job() {
        let platform = Arc::new(
            platform_with(vec![Record::new().with("Name", "Alice")])
                .failing(Operation::CreateWorkbook, "quota exceeded"),
        );
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());

        let report = orchestrator.run(JOB, FILE).await;

        assert_eq!(report.state, JobState::Failed);
        assert_eq!(platform.count(Operation::FailJob).await, 1);
        assert_eq!(platform.count(Operation::ListWorkbooks).await, 0);
        assert!(report.workbook_id.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_is_a_warning_only() {
        let platform = Arc::new(
            platform_with(vec![Record::new().with("Name", "Alice")])
                .with_workbook(workbook_agent::api::protocol::Workbook {
                    id: "us_wb_empty".to_string(),
                    name: None,
                    space_id: "us_sp_1".to_string(),
                    sheets: vec![],
                })
                .failing_delete("us_wb_empty"),
        );
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());

        let report = orchestrator.run(JOB, FILE).await;

        assert_eq!(report.state, JobState::Completed);
        assert!(report.pruned.is_empty());
        assert_eq!(platform.count(Operation::DeleteWorkbook).await, 1);
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let platform = Arc::new(platform_with(vec![Record::new().with("Name", "Alice")]));
        let orchestrator = JobOrchestrator::from_settings(platform.clone(), &Settings::default());
        let report = orchestrator.run(JOB, FILE).await;

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["state"], "completed");
        assert_eq!(value["transitions"][0]["to"], "acknowledged");
        assert_eq!(value["job_id"], JOB);
        assert!(value.get("error").is_none());
    }
}
