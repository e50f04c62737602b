//! Integration tests for the failure-scenario service.
//!
//! Require a running PostgreSQL instance; run with:
//! `cargo test -p mocksim-api-scenarios -- --ignored`

mod common;

use common::TestContext;
use mocksim_api_scenarios::models::{CreateScenarioRequest, UpdateScenarioRequest};
use mocksim_api_scenarios::services::ScenarioService;
use mocksim_api_scenarios::ApiScenariosError;
use serde_json::Value;
use uuid::Uuid;

fn fault_request(simulator_id: Option<Uuid>) -> CreateScenarioRequest {
    CreateScenarioRequest {
        name: "sensor fault".to_string(),
        description: Some("depth sensor jammed".to_string()),
        simulator_id,
        failure_parameters: serde_json::from_str(r#"{"depth": 999, "status": "FAULT"}"#).unwrap(),
        is_active: true,
    }
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_scenario_crud_roundtrip() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let sim = ctx.create_simulator(user.id).await;
    let service = ScenarioService::new(ctx.pool.clone());

    let created = service
        .create(user.id, fault_request(Some(sim.id)))
        .await
        .unwrap();
    assert_eq!(created.name, "sensor fault");
    assert!(!created.is_applied);

    let fetched = service.get(user.id, created.id).await.unwrap();
    assert_eq!(fetched.failure_parameters["depth"].to_json(), Value::from(999));

    let updated = service
        .update(
            user.id,
            created.id,
            UpdateScenarioRequest {
                name: Some("sensor fault v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "sensor fault v2");
    // Unsupplied fields are unchanged.
    assert_eq!(updated.description.as_deref(), Some("depth sensor jammed"));

    service.delete(user.id, created.id).await.unwrap();
    let err = service.get(user.id, created.id).await.unwrap_err();
    assert!(matches!(err, ApiScenariosError::NotFound(_)));
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_create_rejects_unknown_simulator() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = ScenarioService::new(ctx.pool.clone());

    let err = service
        .create(user.id, fault_request(Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiScenariosError::NotFound(_)));

    // A foreign user's simulator is equally invisible.
    let other = ctx.create_user().await;
    let foreign_sim = ctx.create_simulator(other.id).await;
    let err = service
        .create(user.id, fault_request(Some(foreign_sim.id)))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiScenariosError::NotFound(_)));
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_current_state_reflects_applied_scenario() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let sim = ctx.create_simulator(user.id).await;
    let service = ScenarioService::new(ctx.pool.clone());

    let scenario = service
        .create(user.id, fault_request(Some(sim.id)))
        .await
        .unwrap();

    let before = service.current_state(user.id, sim.id).await.unwrap();
    assert!(before.applied_scenario.is_none());
    assert_eq!(before.payload["depth"], Value::from(25));

    service.apply(user.id, sim.id, scenario.id).await.unwrap();

    let during = service.current_state(user.id, sim.id).await.unwrap();
    let applied = during.applied_scenario.expect("scenario should be applied");
    assert_eq!(applied.id, scenario.id);
    assert_eq!(during.payload["depth"], Value::from(999));
    assert_eq!(during.payload["status"], Value::String("FAULT".to_string()));

    service.release(user.id, sim.id).await.unwrap();
    let after = service.current_state(user.id, sim.id).await.unwrap();
    assert!(after.applied_scenario.is_none());
    assert_eq!(after.payload["depth"], Value::from(25));
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_apply_swap_and_delete_conflict() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let sim = ctx.create_simulator(user.id).await;
    let service = ScenarioService::new(ctx.pool.clone());

    let a = service
        .create(user.id, fault_request(Some(sim.id)))
        .await
        .unwrap();
    let b = service
        .create(user.id, fault_request(Some(sim.id)))
        .await
        .unwrap();

    service.apply(user.id, sim.id, a.id).await.unwrap();
    service.apply(user.id, sim.id, b.id).await.unwrap();

    // A was released by applying B.
    let a_now = service.get(user.id, a.id).await.unwrap();
    assert!(!a_now.is_applied);

    let err = service.delete(user.id, b.id).await.unwrap_err();
    assert!(matches!(err, ApiScenariosError::Conflict(_)));

    let released = service.release(user.id, sim.id).await.unwrap();
    assert_eq!(released.released_scenario_id, Some(b.id));
    service
        .delete(user.id, b.id)
        .await
        .expect("delete should succeed after release");
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_list_by_simulator_excludes_unbound() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let sim = ctx.create_simulator(user.id).await;
    let service = ScenarioService::new(ctx.pool.clone());

    service
        .create(user.id, fault_request(Some(sim.id)))
        .await
        .unwrap();
    service.create(user.id, fault_request(None)).await.unwrap();

    let bound = service.list_for_simulator(user.id, sim.id).await.unwrap();
    assert_eq!(bound.len(), 1);

    let all = service.list(user.id).await.unwrap();
    assert_eq!(all.len(), 2);
}
