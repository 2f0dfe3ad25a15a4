//! JSON gateway integration tests over the in-memory store.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskboard::{
    board::adapters::export::InMemoryExportSink, gateway::Gateway,
    store::adapters::memory::InMemoryRecordStore,
};

type TestGateway = Gateway<InMemoryRecordStore, DefaultClock, InMemoryExportSink>;

#[fixture]
fn gateway() -> TestGateway {
    Gateway::new(
        Arc::new(InMemoryRecordStore::new()),
        Arc::new(DefaultClock),
        Arc::new(InMemoryExportSink::new()),
    )
}

async fn send(gateway: &TestGateway, operation: &str, request: Value) -> eyre::Result<Value> {
    let raw = json!({ "operation": operation, "request": request }).to_string();
    let response: Value = serde_json::from_str(&gateway.handle(&raw).await)?;
    Ok(response)
}

async fn send_ok(gateway: &TestGateway, operation: &str, request: Value) -> eyre::Result<Value> {
    let response = send(gateway, operation, request).await?;
    eyre::ensure!(
        response.get("status") == Some(&json!("ok")),
        "{operation} failed: {response}"
    );
    response
        .get("result")
        .cloned()
        .ok_or_else(|| eyre::eyre!("{operation} response has no result: {response}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_membership_round_trips_through_json(
    gateway: TestGateway,
) -> Result<(), eyre::Report> {
    let ada = send_ok(
        &gateway,
        "create_user",
        json!({ "name": "ada", "display_name": "Ada Lovelace" }),
    )
    .await?;
    let grace = send_ok(
        &gateway,
        "create_user",
        json!({ "name": "grace", "display_name": "Grace Hopper" }),
    )
    .await?;
    let team = send_ok(
        &gateway,
        "create_team",
        json!({ "name": "compilers", "description": "front end", "admin": ada["id"] }),
    )
    .await?;

    send_ok(
        &gateway,
        "add_users_to_team",
        json!({ "id": team["id"], "users": [ada["id"], grace["id"]] }),
    )
    .await?;
    let members = send_ok(&gateway, "list_team_users", json!({ "id": team["id"] })).await?;
    let teams = send_ok(&gateway, "get_user_teams", json!({ "id": grace["id"] })).await?;

    eyre::ensure!(members == json!([ada, grace]), "unexpected members {members}");
    eyre::ensure!(
        teams.as_array().map(Vec::len) == Some(1),
        "unexpected teams {teams}"
    );
    eyre::ensure!(
        teams.pointer("/0/name") == Some(&json!("compilers")),
        "unexpected teams {teams}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_status_values_are_upper_case_on_the_wire(
    gateway: TestGateway,
) -> Result<(), eyre::Report> {
    let ada = send_ok(
        &gateway,
        "create_user",
        json!({ "name": "ada", "display_name": "Ada" }),
    )
    .await?;
    let team = send_ok(
        &gateway,
        "create_team",
        json!({ "name": "compilers", "admin": ada["id"] }),
    )
    .await?;
    let board = send_ok(
        &gateway,
        "create_board",
        json!({
            "name": "Sprint 1",
            "team_id": team["id"],
            "creation_time": "2026-03-02T09:00:00Z"
        }),
    )
    .await?;
    let task = send_ok(
        &gateway,
        "add_task",
        json!({ "title": "Parser", "user_id": ada["id"], "board_id": board["id"] }),
    )
    .await?;
    let moved = send_ok(
        &gateway,
        "update_task_status",
        json!({ "id": task["id"], "status": "in_progress" }),
    )
    .await?;

    eyre::ensure!(board["status"] == "OPEN", "unexpected board {board}");
    eyre::ensure!(
        board["creation_time"] == "2026-03-02T09:00:00Z",
        "unexpected board {board}"
    );
    eyre::ensure!(task["status"] == "OPEN", "unexpected task {task}");
    eyre::ensure!(moved["status"] == "IN_PROGRESS", "unexpected task {moved}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_input_reports_validation(gateway: TestGateway) -> Result<(), eyre::Report> {
    let response: Value = serde_json::from_str(&gateway.handle("not json").await)?;

    eyre::ensure!(response["status"] == "error", "unexpected response {response}");
    eyre::ensure!(response["kind"] == "validation", "unexpected response {response}");
    Ok(())
}
