//! End-to-end tests for the gateway API surface.
//!
//! The lifecycle controller is stubbed out so these tests pin down exactly
//! the HTTP contract: routes, status codes, and response envelopes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;

use cirrus_control::{
    ControlError, InstanceControl, InstanceState, InstanceSummary, RejectionKind, TransitionResult,
};
use cirrus_core::InstanceId;
use cirrus_gateway::{create_router, AppState, GatewayConfig};
use cirrus_provider::{InstanceRecord, ProviderError, ProviderErrorCode, Tag};

/// How the stub should fail, when it fails.
enum Failure {
    Api(&'static str),
    Transport,
}

/// Canned-response controller.
#[derive(Default)]
struct StubControl {
    stop: Option<TransitionResult>,
    start: Option<TransitionResult>,
    list: Vec<InstanceSummary>,
    fail: Option<Failure>,
}

impl StubControl {
    fn failing(failure: Failure) -> Self {
        Self {
            fail: Some(failure),
            ..Self::default()
        }
    }

    fn check_failure(&self) -> Result<(), ControlError> {
        match &self.fail {
            Some(Failure::Api(code)) => Err(ControlError::Provider(ProviderError::api(
                code,
                "provider failure",
            ))),
            Some(Failure::Transport) => Err(ControlError::Provider(ProviderError::Transport(
                "connect refused".to_string(),
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InstanceControl for StubControl {
    async fn request_stop(
        &self,
        _instance_id: &InstanceId,
    ) -> Result<TransitionResult, ControlError> {
        self.check_failure()?;
        Ok(self.stop.clone().expect("no stop result configured"))
    }

    async fn request_start(
        &self,
        _instance_id: &InstanceId,
    ) -> Result<TransitionResult, ControlError> {
        self.check_failure()?;
        Ok(self.start.clone().expect("no start result configured"))
    }

    async fn list_instances(&self) -> Result<Vec<InstanceSummary>, ControlError> {
        self.check_failure()?;
        Ok(self.list.clone())
    }
}

fn server(control: StubControl) -> TestServer {
    let state = AppState::new(Arc::new(control), GatewayConfig::default());
    TestServer::new(create_router(state)).expect("failed to build test server")
}

fn summary(id: &str, state: InstanceState, tags: Vec<Tag>) -> InstanceSummary {
    let record = InstanceRecord {
        instance_id: InstanceId::new(id),
        instance_type: "t3.micro".to_string(),
        state,
        launch_time: "2026-03-01T12:00:00Z".parse().unwrap(),
        public_ip: None,
        private_ip: Some("10.0.0.5".to_string()),
        tags,
    };
    InstanceSummary::from_record(record, "us-east-1")
}

fn accepted(id: &str, previous: InstanceState, current: InstanceState, reason: &str) -> TransitionResult {
    TransitionResult::Accepted {
        instance_id: InstanceId::new(id),
        previous_state: previous,
        current_state: current,
        reason: reason.to_string(),
    }
}

#[tokio::test]
async fn health_is_public_and_ok() {
    let server = server(StubControl::default());

    let response = server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn listing_returns_envelope_with_count() {
    let control = StubControl {
        list: vec![
            summary(
                "i-1",
                InstanceState::Running,
                vec![
                    Tag {
                        key: "Name".to_string(),
                        value: "web-1".to_string(),
                    },
                    Tag {
                        key: "Env".to_string(),
                        value: "prod".to_string(),
                    },
                ],
            ),
            summary("i-2", InstanceState::Stopped, vec![]),
        ],
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.get("/instances").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["id"], "i-1");
    assert_eq!(body["data"][0]["type"], "t3.micro");
    assert_eq!(body["data"][0]["state"], "running");
    assert_eq!(body["data"][0]["public_ip"], "N/A");
    assert_eq!(body["data"][0]["private_ip"], "10.0.0.5");
    assert_eq!(body["data"][0]["tags"]["Name"], "web-1");
    assert_eq!(body["data"][0]["tags"]["Env"], "prod");
    assert_eq!(body["data"][1]["state"], "stopped");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn listing_zero_instances_is_ok() {
    let server = server(StubControl::default());

    let response = server.get("/instances").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn listing_auth_failure_is_forbidden() {
    let server = server(StubControl::failing(Failure::Api("AuthFailure")));

    let response = server.get("/instances").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "AuthFailure");
}

#[tokio::test]
async fn listing_transport_failure_is_server_error() {
    let server = server(StubControl::failing(Failure::Transport));

    let response = server.get("/instances").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "InternalServerError");
}

#[tokio::test]
async fn accepted_stop_reports_stopping() {
    let control = StubControl {
        stop: Some(accepted(
            "i-123",
            InstanceState::Running,
            InstanceState::Stopping,
            "User initiated stop",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/stop/i-123").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Instance i-123 is stopping");
    assert_eq!(body["data"]["instance_id"], "i-123");
    assert_eq!(body["data"]["previous_state"], "running");
    assert_eq!(body["data"]["current_state"], "stopping");
    assert_eq!(body["data"]["state_transition_reason"], "User initiated stop");
}

#[tokio::test]
async fn accepted_start_reports_pending() {
    let control = StubControl {
        start: Some(accepted(
            "i-42",
            InstanceState::Stopped,
            InstanceState::Pending,
            "User initiated start",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/start/i-42").await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Instance i-42 is starting");
    assert_eq!(body["data"]["current_state"], "pending");
}

#[tokio::test]
async fn already_stopped_is_bad_request() {
    let control = StubControl {
        stop: Some(TransitionResult::rejected(
            RejectionKind::AlreadyInTargetState,
            "Instance i-123 is already stopped",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/stop/i-123").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "AlreadyInTargetState");
    assert_eq!(body["message"], "Instance i-123 is already stopped");
}

#[tokio::test]
async fn incorrect_state_is_bad_request() {
    let control = StubControl {
        start: Some(TransitionResult::rejected(
            RejectionKind::IncorrectState,
            "Instance i-123 is not in a state that can be started",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/start/i-123").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "IncorrectState");
}

#[tokio::test]
async fn unknown_instance_is_not_found() {
    let control = StubControl {
        start: Some(TransitionResult::rejected(
            RejectionKind::InstanceNotFound,
            "Instance i-999 not found",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/start/i-999").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "InstanceNotFound");
    assert_eq!(body["message"], "Instance i-999 not found");
}

#[tokio::test]
async fn unauthorized_operation_is_forbidden() {
    let control = StubControl {
        stop: Some(TransitionResult::rejected(
            RejectionKind::Provider(ProviderErrorCode::UnauthorizedOperation),
            "not allowed to stop i-123",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/stop/i-123").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "UnauthorizedOperation");
}

#[tokio::test]
async fn unrecognized_provider_code_is_server_error_with_code() {
    let control = StubControl {
        stop: Some(TransitionResult::rejected(
            RejectionKind::Provider(ProviderErrorCode::Other("RequestLimitExceeded".to_string())),
            "slow down",
        )),
        ..StubControl::default()
    };
    let server = server(control);

    let response = server.post("/instances/stop/i-123").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "RequestLimitExceeded");
    assert_eq!(body["message"], "slow down");
}
