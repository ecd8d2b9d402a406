use axum::http::StatusCode;
use axum_test::TestServer;
use prioboard::api::create_router;
use prioboard::db::Database;
use prioboard::models::*;
use prioboard::score::calc_score;
use prioboard::seed::SeedOutcome;
use serde_json::json;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db);
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_feature(server: &TestServer, title: &str, ratings: [i64; 4]) -> Feature {
    let [impact, effort, confidence, alignment] = ratings;
    let response = server
        .post("/api/v1/features")
        .json(&json!({
            "title": title,
            "description": "",
            "impact": impact,
            "effort": effort,
            "confidence": confidence,
            "alignment": alignment,
            "status": "backlog",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Feature>()
}

async fn create_task(server: &TestServer, title: &str, assignee: &str, priority: &str) -> Task {
    let response = server
        .post("/api/v1/tasks")
        .json(&json!({
            "title": title,
            "description": "",
            "assignee": assignee,
            "feature_id": null,
            "priority": priority,
            "due_date": null,
            "column": "todo",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Task>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
    }
}

mod features {
    use super::*;

    #[tokio::test]
    async fn create_returns_the_computed_score() {
        let server = setup();
        let feature = create_feature(&server, "AI triage", [5, 4, 4, 5]).await;
        assert_eq!(feature.score, calc_score(5, 4, 5, 4));
        assert_eq!(feature.score, 25.0);
    }

    #[tokio::test]
    async fn create_rejects_an_empty_title() {
        let server = setup();
        let response = server
            .post("/api/v1/features")
            .json(&json!({
                "title": "",
                "description": "",
                "impact": 3,
                "effort": 3,
                "confidence": 3,
                "alignment": 3,
                "status": "backlog",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_ratings() {
        let server = setup();
        let response = server
            .post("/api/v1/features")
            .json(&json!({
                "title": "Too confident",
                "description": "",
                "impact": 3,
                "effort": 3,
                "confidence": 7,
                "alignment": 3,
                "status": "backlog",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_defaults_to_newest_first() {
        let server = setup();
        create_feature(&server, "older", [3, 3, 3, 3]).await;
        create_feature(&server, "newer", [3, 3, 3, 3]).await;

        let response = server.get("/api/v1/features").await;
        response.assert_status_ok();
        let features: Vec<Feature> = response.json();
        let titles: Vec<_> = features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn list_sorts_by_score_descending_when_asked() {
        let server = setup();
        create_feature(&server, "low", [1, 5, 1, 1]).await;
        create_feature(&server, "high", [5, 1, 5, 5]).await;
        create_feature(&server, "mid", [3, 3, 3, 3]).await;

        let response = server.get("/api/v1/features?sort=score").await;
        response.assert_status_ok();
        let features: Vec<Feature> = response.json();
        let titles: Vec<_> = features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mid", "low"]);
    }

    #[tokio::test]
    async fn list_sorts_by_title_ascending_when_asked() {
        let server = setup();
        create_feature(&server, "zebra", [3, 3, 3, 3]).await;
        create_feature(&server, "Apple", [3, 3, 3, 3]).await;

        let response = server.get("/api/v1/features?sort=title&dir=asc").await;
        response.assert_status_ok();
        let features: Vec<Feature> = response.json();
        let titles: Vec<_> = features.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "zebra"]);
    }

    #[tokio::test]
    async fn update_recomputes_the_score() {
        let server = setup();
        let feature = create_feature(&server, "Rescore", [4, 2, 5, 3]).await;

        let response = server
            .put(&format!("/api/v1/features/{}", feature.id))
            .json(&json!({ "effort": 1 }))
            .await;
        response.assert_status_ok();
        let updated: Feature = response.json();
        assert_eq!(updated.effort, 1);
        assert_eq!(updated.score, calc_score(4, 5, 3, 1));
    }

    #[tokio::test]
    async fn update_missing_feature_is_404() {
        let server = setup();
        let response = server
            .put(&format!("/api/v1/features/{}", uuid::Uuid::new_v4()))
            .json(&json!({ "title": "ghost" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_and_404s_after() {
        let server = setup();
        let feature = create_feature(&server, "Short-lived", [3, 3, 3, 3]).await;

        let response = server.delete(&format!("/api/v1/features/{}", feature.id)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/features/{}", feature.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let response = server.delete(&format!("/api/v1/features/{}", feature.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_tasks_linked_to_a_feature() {
        let server = setup();
        let feature = create_feature(&server, "Linked", [3, 3, 3, 3]).await;

        let response = server
            .post("/api/v1/tasks")
            .json(&json!({
                "title": "Linked task",
                "description": "",
                "assignee": "Sam",
                "feature_id": feature.id,
                "priority": "medium",
                "due_date": null,
                "column": "todo",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        create_task(&server, "Unlinked task", "Alex", "low").await;

        let response = server.get(&format!("/api/v1/features/{}/tasks", feature.id)).await;
        response.assert_status_ok();
        let tasks: Vec<Task> = response.json();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Linked task");
    }
}

mod tasks {
    use super::*;

    #[tokio::test]
    async fn create_rejects_an_empty_title() {
        let server = setup();
        let response = server
            .post("/api/v1/tasks")
            .json(&json!({
                "title": "  ",
                "description": "",
                "assignee": "Alex",
                "feature_id": null,
                "priority": "low",
                "due_date": null,
                "column": "backlog",
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_an_unknown_column() {
        let server = setup();
        let response = server
            .post("/api/v1/tasks")
            .json(&json!({
                "title": "Bad column",
                "description": "",
                "assignee": "Alex",
                "feature_id": null,
                "priority": "low",
                "due_date": null,
                "column": "parking-lot",
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn move_changes_only_the_column() {
        let server = setup();
        let task = create_task(&server, "Review data model", "Sam", "medium").await;

        let response = server
            .put(&format!("/api/v1/tasks/{}/move", task.id))
            .json(&json!({ "column": "done" }))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/tasks/{}", task.id)).await;
        response.assert_status_ok();
        let moved: Task = response.json();
        assert_eq!(moved.column, KanbanColumn::Done);
        assert_eq!(moved.title, task.title);
        assert_eq!(moved.assignee, task.assignee);
        assert_eq!(moved.priority, task.priority);
        assert_eq!(moved.due_date, None);
    }

    #[tokio::test]
    async fn move_missing_task_is_404() {
        let server = setup();
        let response = server
            .put(&format!("/api/v1/tasks/{}/move", uuid::Uuid::new_v4()))
            .json(&json!({ "column": "done" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_by_assignee_and_priority() {
        let server = setup();
        create_task(&server, "match", "Alex", "high").await;
        create_task(&server, "wrong priority", "Alex", "low").await;
        create_task(&server, "wrong assignee", "Jordan", "high").await;

        let response = server.get("/api/v1/tasks?assignee=Alex&priority=high").await;
        response.assert_status_ok();
        let tasks: Vec<Task> = response.json();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "match");
    }

    #[tokio::test]
    async fn all_sentinel_passes_everything_through() {
        let server = setup();
        create_task(&server, "one", "Alex", "high").await;
        create_task(&server, "two", "Jordan", "low").await;

        let response = server.get("/api/v1/tasks?assignee=all&priority=all").await;
        response.assert_status_ok();
        let tasks: Vec<Task> = response.json();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn unknown_priority_filter_is_400() {
        let server = setup();
        let response = server.get("/api/v1/tasks?priority=urgent").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let server = setup();
        let task = create_task(&server, "Reassign me", "Alex", "medium").await;

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .json(&json!({ "assignee": "Taylor" }))
            .await;
        response.assert_status_ok();
        let updated: Task = response.json();
        assert_eq!(updated.assignee, "Taylor");
        assert_eq!(updated.title, "Reassign me");
        assert_eq!(updated.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn delete_removes_the_task() {
        let server = setup();
        let task = create_task(&server, "Short-lived", "Casey", "low").await;

        let response = server.delete(&format!("/api/v1/tasks/{}", task.id)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/tasks/{}", task.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod seed {
    use super::*;

    #[tokio::test]
    async fn seeds_an_empty_board_then_reports_already_seeded() {
        let server = setup();

        let response = server.post("/api/v1/seed").await;
        response.assert_status_ok();
        let outcome: SeedOutcome = response.json();
        assert_eq!(outcome.message, "seeded");
        assert_eq!(outcome.features_count, Some(7));
        assert_eq!(outcome.tasks_count, Some(7));

        let response = server.post("/api/v1/seed").await;
        response.assert_status_ok();
        let outcome: SeedOutcome = response.json();
        assert_eq!(outcome.message, "already seeded");

        let response = server.get("/api/v1/features").await;
        let features: Vec<Feature> = response.json();
        assert_eq!(features.len(), 7);
    }

    #[tokio::test]
    async fn seeded_scores_follow_the_formula() {
        let server = setup();
        server.post("/api/v1/seed").await.assert_status_ok();

        let response = server.get("/api/v1/features?sort=score").await;
        let features: Vec<Feature> = response.json();
        let top = &features[0];
        assert_eq!(top.title, "Template library");
        assert_eq!(top.score, calc_score(4, 5, 3, 1));
    }
}
