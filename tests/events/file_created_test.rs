#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workbook_agent::api::protocol::{Action, File};
    use workbook_agent::api::ApiError;
    use workbook_agent::config::{PollSettings, Settings};
    use workbook_agent::events::{
        build_action, DispatchOutcome, EventRouter, FileActionRegistrar, PlatformEvent,
        RegistrationOutcome,
    };
    use workbook_agent::model::Record;
    use workbook_agent::pipeline::JobState;
    use workbook_agent::platform::{InMemoryPlatform, Operation};

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.polling = PollSettings {
            interval_ms: 1,
            max_attempts: 5,
        };
        settings
    }

    fn complete_file(actions: Vec<Action>) -> File {
        File {
            id: "us_fl_1".to_string(),
            status: Some("complete".to_string()),
            actions,
            ..Default::default()
        }
    }

    fn other_action() -> Action {
        Action {
            operation: "downloadFile".to_string(),
            label: "Download".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_action_added_once() {
        let settings = fast_settings();
        let platform = Arc::new(InMemoryPlatform::new().with_file(complete_file(vec![other_action()])));
        let registrar = FileActionRegistrar::from_settings(platform.clone(), &settings);

        let first = registrar.register("us_fl_1").await.unwrap();
        let second = registrar.register("us_fl_1").await.unwrap();

        assert_eq!(first, RegistrationOutcome::Added { actions: 2 });
        assert_eq!(second, RegistrationOutcome::AlreadyPresent);
        assert_eq!(platform.count(Operation::UpdateFileActions).await, 1);

        let file = platform.file("us_fl_1").await.unwrap();
        let operations: Vec<_> = file.actions.iter().map(|a| a.operation.as_str()).collect();
        assert_eq!(operations, vec!["downloadFile", "createWorkbookFromFile"]);
    }

    #[tokio::test]
    async fn test_existing_action_left_unchanged() {
        let settings = fast_settings();
        let existing = build_action(&settings.job.operation, &settings.action);
        let platform = Arc::new(InMemoryPlatform::new().with_file(complete_file(vec![existing.clone()])));
        let router = EventRouter::from_settings(platform.clone(), &settings);
        let event = PlatformEvent::FileCreated {
            file_id: "us_fl_1".to_string(),
        };

        for _ in 0..2 {
            let outcome = router.dispatch(&event).await;
            assert!(matches!(
                outcome,
                DispatchOutcome::ActionRegistered(RegistrationOutcome::AlreadyPresent)
            ));
        }

        assert_eq!(platform.count(Operation::UpdateFileActions).await, 0);
        assert_eq!(platform.file("us_fl_1").await.unwrap().actions, vec![existing]);
    }

    #[tokio::test]
    async fn test_waits_for_processing() {
        let settings = fast_settings();
        let platform = Arc::new(InMemoryPlatform::new().with_pending_file(complete_file(vec![]), 2));
        let registrar = FileActionRegistrar::from_settings(platform.clone(), &settings);

        let outcome = registrar.register("us_fl_1").await.unwrap();

        assert_eq!(outcome, RegistrationOutcome::Added { actions: 1 });
        // Three polls, then the re-read after the update
        assert_eq!(platform.count(Operation::GetFile).await, 4);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let settings = fast_settings();
        let platform = Arc::new(InMemoryPlatform::new().with_pending_file(complete_file(vec![]), 100));
        let registrar = FileActionRegistrar::from_settings(platform.clone(), &settings);

        let err = registrar.register("us_fl_1").await.unwrap_err();

        assert!(matches!(err, ApiError::PollTimeout { attempts: 5, .. }));
        assert_eq!(platform.count(Operation::UpdateFileActions).await, 0);
    }

    #[tokio::test]
    async fn test_job_ready_event_runs_pipeline() {
        let settings = fast_settings();
        let platform = Arc::new(InMemoryPlatform::new().with_uploaded_file(
            "us_fl_1",
            "us_sp_1",
            vec![Record::new().with("Name", "Alice")],
        ));
        let router = EventRouter::from_settings(platform.clone(), &settings);

        let event = PlatformEvent::from_json(
            r#"{
                "topic": "job:ready",
                "context": {"fileId": "us_fl_1", "jobId": "us_jb_1", "spaceId": "us_sp_1"},
                "payload": {"job": "file:createWorkbookFromFile"}
            }"#,
        )
        .unwrap();

        match router.dispatch(&event).await {
            DispatchOutcome::JobRun(report) => assert_eq!(report.state, JobState::Completed),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(platform.count(Operation::CreateWorkbook).await, 1);
    }
}
