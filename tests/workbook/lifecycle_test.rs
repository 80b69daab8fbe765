#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use workbook_agent::api::protocol::{Sheet, Workbook};
    use workbook_agent::platform::{InMemoryPlatform, Operation, PlatformCall};
    use workbook_agent::workbook::WorkbookLifecycle;

    fn workbook(id: &str, sheets: usize) -> Workbook {
        Workbook {
            id: id.to_string(),
            name: Some(id.to_string()),
            space_id: "us_sp_1".to_string(),
            sheets: (0..sheets)
                .map(|i| Sheet {
                    id: format!("{}_sheet_{}", id, i),
                    name: None,
                })
                .collect(),
        }
    }

    async fn prune(order: &[(&str, usize)]) -> (Vec<String>, Arc<InMemoryPlatform>) {
        let platform = order
            .iter()
            .fold(InMemoryPlatform::new(), |p, (id, sheets)| {
                p.with_workbook(workbook(id, *sheets))
            });
        let platform = Arc::new(platform);
        let lifecycle = WorkbookLifecycle::new(platform.clone(), "Generated");
        let mut pruned = lifecycle.prune_empty_workbooks("us_sp_1").await.unwrap();
        pruned.sort();
        (pruned, platform)
    }

    #[tokio::test]
    async fn test_prune_deletes_only_empty_workbooks() {
        let (pruned, platform) = prune(&[("W1", 0), ("W2", 2), ("W3", 0)]).await;

        assert_eq!(pruned, vec!["W1", "W3"]);
        let remaining: Vec<_> = platform.workbooks().await.into_iter().map(|w| w.id).collect();
        assert_eq!(remaining, vec!["W2"]);
    }

    #[tokio::test]
    async fn test_prune_ignores_listing_order() {
        let (pruned, _) = prune(&[("W3", 0), ("W2", 2), ("W1", 0)]).await;
        assert_eq!(pruned, vec!["W1", "W3"]);
    }

    #[tokio::test]
    async fn test_prune_only_touches_its_space() {
        let mut other = workbook("W9", 0);
        other.space_id = "us_sp_2".to_string();
        let platform = Arc::new(
            InMemoryPlatform::new()
                .with_workbook(workbook("W1", 0))
                .with_workbook(other),
        );
        let lifecycle = WorkbookLifecycle::new(platform.clone(), "Generated");

        let pruned = lifecycle.prune_empty_workbooks("us_sp_1").await.unwrap();
        assert_eq!(pruned, vec!["W1"]);
        assert_eq!(platform.workbooks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_then_prune_keeps_new_workbook() {
        let platform = Arc::new(InMemoryPlatform::new().with_workbook(workbook("W1", 0)));
        let lifecycle = WorkbookLifecycle::new(platform.clone(), "Generated");
        let blueprint = workbook_agent::model::Blueprint {
            name: workbook_agent::model::BLUEPRINT_NAME.to_string(),
            fields: vec![],
        };

        let created = lifecycle.create_workbook(blueprint, "us_sp_1").await.unwrap();
        let pruned = lifecycle.prune_empty_workbooks("us_sp_1").await.unwrap();

        assert_eq!(pruned, vec!["W1"]);
        assert_eq!(platform.workbooks().await[0].id, created);

        let creates: Vec<_> = platform
            .calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                PlatformCall::CreateWorkbook { request } => Some(request),
                _ => None,
            })
            .collect();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].sheets.len(), 1);
        assert_eq!(creates[0].space_id, "us_sp_1");
        assert_eq!(platform.count(Operation::DeleteWorkbook).await, 1);
    }
}
