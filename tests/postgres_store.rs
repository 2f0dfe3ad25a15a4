//! `PostgreSQL` record store integration tests.
//!
//! Runs against the shared embedded cluster from `pg-embed-setup-unpriv`.
//! The table set is built once in a template database and every test works
//! in its own copy, dropped when the test ends.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::{
    board::{
        domain::{BoardStatus, TaskStatus},
        services::{
            AddTaskRequest, BoardLifecycleService, CreateBoardRequest, UpdateTaskStatusRequest,
        },
    },
    error::FailureKind,
    store::adapters::postgres::PostgresRecordStore,
    team::services::{CreateTeamRequest, TeamRegistryService},
    user::services::{CreateUserRequest, UpdateUserRequest, UserRegistryService},
};
use tokio::runtime::Runtime;

/// Template database holding the bootstrapped tables.
const TEMPLATE_DB: &str = "taskboard_test_template";

static DATABASE_COUNTER: AtomicU32 = AtomicU32::new(0);

fn test_runtime() -> eyre::Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster.ensure_template_exists(TEMPLATE_DB, |db_name| {
        let url = cluster.connection().database_url(db_name);
        let store = PostgresRecordStore::connect(&url, 1).map_err(|e| eyre::eyre!("{e}"))?;
        test_runtime()?
            .block_on(store.ensure_schema())
            .map_err(|e| eyre::eyre!("{e}"))?;
        Ok(())
    })?;
    Ok(())
}

fn database_name(label: &str) -> eyre::Result<String> {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let count = DATABASE_COUNTER.fetch_add(1, Ordering::Relaxed);
    Ok(format!("taskboard_test_{label}_{nanos}_{count}"))
}

/// Creates a database from the template and connects a store to it.
fn setup_store(
    cluster: &TestCluster,
    db_name: &str,
    pool_size: u32,
) -> eyre::Result<Arc<PostgresRecordStore>> {
    cluster.create_database_from_template(db_name, TEMPLATE_DB)?;
    let url = cluster.connection().database_url(db_name);
    Ok(Arc::new(PostgresRecordStore::connect(&url, pool_size)?))
}

/// Drops the test database once every connection to it is gone.
struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            tracing::warn!(db_name = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}

#[rstest]
fn board_lifecycle_persists_across_transactions(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    ensure_template(shared_test_cluster)?;
    let db_name = database_name("lifecycle")?;
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name, 2)?;
    let clock = Arc::new(DefaultClock);
    let users = UserRegistryService::new(Arc::clone(&store));
    let teams = TeamRegistryService::new(Arc::clone(&store), Arc::clone(&clock));
    let boards = BoardLifecycleService::new(store, clock);

    test_runtime()?.block_on(async {
        let ada = users
            .create_user(CreateUserRequest::new("ada", "Ada Lovelace"))
            .await?;
        let team = teams
            .create_team(CreateTeamRequest::new("compilers", "", ada.id()))
            .await?;
        teams.add_users_to_team(team.id(), vec![ada.id()]).await?;
        let board = boards
            .create_board(CreateBoardRequest::new("Sprint 1", "first sprint", team.id()))
            .await?;
        let task = boards
            .add_task(AddTaskRequest::new(board.id(), "Fix bug", "", ada.id()))
            .await?;

        let blocked = boards
            .close_board(board.id())
            .await
            .expect_err("open task blocks close");
        eyre::ensure!(
            blocked.kind() == FailureKind::Precondition,
            "close with open task: {blocked}"
        );

        let completed = boards
            .update_task_status(UpdateTaskStatusRequest::new(task.id(), "COMPLETE"))
            .await?;
        eyre::ensure!(
            completed.status() == TaskStatus::Complete,
            "task should be complete"
        );
        let closed = boards.close_board(board.id()).await?;
        eyre::ensure!(closed.status() == BoardStatus::Closed, "board should be closed");

        let reread = boards.describe_board(board.id()).await?;
        eyre::ensure!(
            reread.status() == BoardStatus::Closed && reread.end_time().is_some(),
            "closed state was not persisted: {reread:?}"
        );
        let member_teams = users.get_user_teams(ada.id()).await?;
        eyre::ensure!(
            member_teams.iter().any(|listed| listed.id() == team.id()),
            "membership was not persisted"
        );
        Ok(())
    })
}

#[rstest]
fn uniqueness_and_immutability_hold_in_postgres(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    ensure_template(shared_test_cluster)?;
    let db_name = database_name("uniqueness")?;
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let users = UserRegistryService::new(setup_store(shared_test_cluster, &db_name, 1)?);

    test_runtime()?.block_on(async {
        let grace = users
            .create_user(CreateUserRequest::new("grace", "Grace"))
            .await?;
        let duplicate = users
            .create_user(CreateUserRequest::new("grace", "Other Grace"))
            .await
            .expect_err("duplicate name should fail");
        eyre::ensure!(
            duplicate.kind() == FailureKind::Conflict,
            "duplicate user: {duplicate}"
        );

        let renamed = users
            .update_user(UpdateUserRequest::new(grace.id(), "Grace").with_name("hopper"))
            .await
            .expect_err("names are immutable");
        eyre::ensure!(
            renamed.kind() == FailureKind::Validation,
            "rename: {renamed}"
        );

        let updated = users
            .update_user(UpdateUserRequest::new(grace.id(), "Grace Hopper"))
            .await?;
        eyre::ensure!(
            updated.display_name().as_str() == "Grace Hopper",
            "display name was not updated"
        );
        Ok(())
    })
}

#[rstest]
fn concurrent_member_batches_are_both_kept(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    ensure_template(shared_test_cluster)?;
    let db_name = database_name("membership")?;
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name, 4)?;
    let users = UserRegistryService::new(Arc::clone(&store));
    let teams = TeamRegistryService::new(store, Arc::new(DefaultClock));

    test_runtime()?.block_on(async {
        let ada = users.create_user(CreateUserRequest::new("ada", "Ada")).await?;
        let grace = users
            .create_user(CreateUserRequest::new("grace", "Grace"))
            .await?;

        for round in 0..8 {
            let team = teams
                .create_team(CreateTeamRequest::new(format!("team {round}"), "", ada.id()))
                .await?
                .id();
            let (left, right) = tokio::join!(
                teams.add_users_to_team(team, vec![ada.id()]),
                teams.add_users_to_team(team, vec![grace.id()]),
            );
            left?;
            right?;

            let members = teams.list_team_users(team).await?;
            let names: Vec<&str> = members.iter().map(|user| user.name().as_str()).collect();
            eyre::ensure!(
                names == ["ada", "grace"],
                "round {round} lost a batch: {names:?}"
            );
        }
        Ok(())
    })
}

#[rstest]
fn concurrent_duplicate_titles_admit_one_task(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    ensure_template(shared_test_cluster)?;
    let db_name = database_name("titles")?;
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let store = setup_store(shared_test_cluster, &db_name, 4)?;
    let clock = Arc::new(DefaultClock);
    let users = UserRegistryService::new(Arc::clone(&store));
    let teams = TeamRegistryService::new(Arc::clone(&store), Arc::clone(&clock));
    let boards = BoardLifecycleService::new(store, clock);

    test_runtime()?.block_on(async {
        let ada = users.create_user(CreateUserRequest::new("ada", "Ada")).await?;
        let team = teams
            .create_team(CreateTeamRequest::new("compilers", "", ada.id()))
            .await?;
        let board = boards
            .create_board(CreateBoardRequest::new("Sprint 1", "", team.id()))
            .await?;
        let request = AddTaskRequest::new(board.id(), "Fix bug", "", ada.id());

        let (left, right) = tokio::join!(
            boards.add_task(request.clone()),
            boards.add_task(request),
        );
        let rejected = match (left, right) {
            (Ok(_), Err(err)) | (Err(err), Ok(_)) => err,
            (left, right) => eyre::bail!("expected one success, got {left:?} and {right:?}"),
        };
        eyre::ensure!(
            rejected.kind() == FailureKind::Conflict,
            "duplicate title: {rejected}"
        );
        let tasks = boards.list_tasks(board.id()).await?;
        eyre::ensure!(tasks.len() == 1, "expected one task, found {}", tasks.len());
        Ok(())
    })
}
