//! Integration tests for the simulator service and resolver.
//!
//! Require a running PostgreSQL instance; run with:
//! `cargo test -p mocksim-api-simulators -- --ignored`

mod common;

use common::TestContext;
use mocksim_api_simulators::models::{CreateSimulatorRequest, UpdateSimulatorRequest};
use mocksim_api_simulators::services::{Resolution, Resolver, SimulatorService};
use mocksim_api_simulators::ApiSimulatorsError;
use mocksim_core::{ParamValue, Parameters};
use mocksim_db::models::{CreateScenario, FailureScenario};
use serde_json::Value;

fn fixed_request(name: &str) -> CreateSimulatorRequest {
    let parameters: Parameters =
        serde_json::from_str(r#"{"x": "5", "depth": 25, "rate": 18.5}"#).unwrap();
    CreateSimulatorRequest {
        name: name.to_string(),
        parameters,
        parameter_config: Default::default(),
        is_active: true,
    }
}

fn random_request(name: &str) -> CreateSimulatorRequest {
    let parameters: Parameters = serde_json::from_str(r#"{"temperature": null}"#).unwrap();
    let parameter_config = serde_json::from_str(
        r#"{"temperature": {"is_random": true, "type": "float", "min": 10.0, "max": 25.0}}"#,
    )
    .unwrap();
    CreateSimulatorRequest {
        name: name.to_string(),
        parameters,
        parameter_config,
        is_active: true,
    }
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_create_and_resolve_static_payload() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("static");

    service.create(user.id, fixed_request(&name)).await.unwrap();

    // Static values round-trip exactly: the string "5" stays a string, the
    // numbers keep their shape, and key order is the definition order.
    for _ in 0..3 {
        let resolved = resolver.resolve(&user.user_id, &name).await.unwrap();
        let Resolution::Payload(payload) = resolved else {
            panic!("expected a payload");
        };
        assert_eq!(payload["x"], Value::String("5".to_string()));
        assert_eq!(payload["depth"], Value::from(25));
        assert_eq!(payload["rate"], Value::from(18.5));
        let keys: Vec<&String> = payload.keys().collect();
        assert_eq!(keys, ["x", "depth", "rate"]);
    }
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_resolve_draws_fresh_random_values() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("random");

    service
        .create(user.id, random_request(&name))
        .await
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..20 {
        let Resolution::Payload(payload) = resolver.resolve(&user.user_id, &name).await.unwrap()
        else {
            panic!("expected a payload");
        };
        let v = payload["temperature"].as_f64().expect("float draw");
        assert!((10.0..=25.0).contains(&v));
        seen.push(v);
    }
    seen.dedup();
    assert!(seen.len() > 1, "draws should vary between calls");
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_inactive_simulator_serves_notice() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("inactive");

    let created = service.create(user.id, fixed_request(&name)).await.unwrap();
    service.toggle_active(user.id, created.id).await.unwrap();

    let resolved = resolver.resolve(&user.user_id, &name).await.unwrap();
    let Resolution::Inactive(notice) = resolved else {
        panic!("expected the inactive notice");
    };
    assert_eq!(notice.message, "This simulator is currently inactive.");
    assert_eq!(notice.simulator_name, name);
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_resolve_overlays_applied_scenario() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("overlay");

    let created = service.create(user.id, fixed_request(&name)).await.unwrap();
    let scenario = FailureScenario::create(
        ctx.pool.inner(),
        CreateScenario {
            user_id: user.id,
            simulator_id: Some(created.id),
            name: "fault".to_string(),
            description: None,
            failure_parameters: r#"{"depth": 999, "status": "FAULT"}"#.to_string(),
            is_active: true,
        },
    )
    .await
    .unwrap();
    FailureScenario::apply_exclusive(ctx.pool.inner(), user.id, created.id, scenario.id)
        .await
        .unwrap();

    let Resolution::Payload(payload) = resolver.resolve(&user.user_id, &name).await.unwrap()
    else {
        panic!("expected a payload");
    };
    assert_eq!(payload["depth"], Value::from(999));
    assert_eq!(payload["x"], Value::String("5".to_string()));
    assert_eq!(payload["status"], Value::String("FAULT".to_string()));

    // Release restores the base payload.
    FailureScenario::release_exclusive(ctx.pool.inner(), user.id, created.id)
        .await
        .unwrap();
    let Resolution::Payload(payload) = resolver.resolve(&user.user_id, &name).await.unwrap()
    else {
        panic!("expected a payload");
    };
    assert_eq!(payload["depth"], Value::from(25));
    assert!(!payload.contains_key("status"));
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_duplicate_name_rejected_per_owner() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let other = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let name = TestContext::unique_name("dup");

    service.create(user.id, fixed_request(&name)).await.unwrap();
    let err = service
        .create(user.id, fixed_request(&name))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiSimulatorsError::NameConflict));

    // A different owner can reuse the name.
    service
        .create(other.id, fixed_request(&name))
        .await
        .expect("names are scoped per owner");
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_update_renormalizes_parameter_pair() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let name = TestContext::unique_name("patch");

    let created = service.create(user.id, fixed_request(&name)).await.unwrap();

    // Supplying only parameter_config re-validates it against the stored
    // parameters; a degenerate range is rejected.
    let bad = UpdateSimulatorRequest {
        parameter_config: Some(
            serde_json::from_str(
                r#"{"depth": {"is_random": true, "type": "integer", "min": 5.0, "max": 5.0}}"#,
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    let err = service.update(user.id, created.id, bad).await.unwrap_err();
    assert!(matches!(err, ApiSimulatorsError::Validation(_)));

    let good = UpdateSimulatorRequest {
        parameter_config: Some(
            serde_json::from_str(
                r#"{"depth": {"is_random": true, "type": "integer", "min": 1.0, "max": 50.0}}"#,
            )
            .unwrap(),
        ),
        ..Default::default()
    };
    let updated = service.update(user.id, created.id, good).await.unwrap();
    assert!(updated.parameter_config["depth"].is_random);
    // Keys without a submitted policy fall back to fixed.
    assert!(!updated.parameter_config["x"].is_random);
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_delete_removes_simulator_from_data_path() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("del");

    let created = service.create(user.id, fixed_request(&name)).await.unwrap();
    service.delete(user.id, created.id).await.unwrap();

    let err = resolver.resolve(&user.user_id, &name).await.unwrap_err();
    assert!(matches!(err, ApiSimulatorsError::NotFound));

    let err = service.delete(user.id, created.id).await.unwrap_err();
    assert!(matches!(err, ApiSimulatorsError::NotFound));
}

#[tokio::test]
#[ignore = "Requires database (set DATABASE_URL)"]
async fn test_stored_value_kinds_survive_resolution() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user().await;
    let service = SimulatorService::new(ctx.pool.clone());
    let resolver = Resolver::new(ctx.pool.clone());
    let name = TestContext::unique_name("kinds");

    let mut parameters = Parameters::new();
    parameters.insert(
        "numeric_string".to_string(),
        Some(ParamValue::Str("007".to_string())),
    );
    service
        .create(
            user.id,
            CreateSimulatorRequest {
                name: name.clone(),
                parameters,
                parameter_config: Default::default(),
                is_active: true,
            },
        )
        .await
        .unwrap();

    let Resolution::Payload(payload) = resolver.resolve(&user.user_id, &name).await.unwrap()
    else {
        panic!("expected a payload");
    };
    // A numeric-looking string is never re-interpreted as a number.
    assert_eq!(payload["numeric_string"], Value::String("007".to_string()));
}
