//! In-memory integration tests for team membership and user team lookups.

use super::helpers::{Services, services};
use rstest::rstest;
use taskboard::{error::FailureKind, team::domain::MAX_MEMBERS_PER_CALL, user::domain::UserId};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_is_visible_from_both_sides(services: Services) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let grace = services.user("grace").await?;
    let compilers = services.team("compilers", ada).await?;
    let runtime = services.team("runtime", ada).await?;

    services
        .teams
        .add_users_to_team(compilers, vec![ada, grace])
        .await?;
    services.teams.add_users_to_team(runtime, vec![grace]).await?;

    let members = services.teams.list_team_users(compilers).await?;
    let member_names: Vec<&str> = members.iter().map(|user| user.name().as_str()).collect();
    eyre::ensure!(
        member_names == ["ada", "grace"],
        "unexpected members {member_names:?}"
    );

    let grace_teams = services.users.get_user_teams(grace).await?;
    let team_ids: Vec<_> = grace_teams.iter().map(|team| team.id()).collect();
    eyre::ensure!(
        team_ids == [compilers, runtime],
        "unexpected teams {team_ids:?}"
    );

    services
        .teams
        .remove_users_from_team(compilers, vec![grace])
        .await?;
    let remaining = services.users.get_user_teams(grace).await?;
    let remaining_ids: Vec<_> = remaining.iter().map(|team| team.id()).collect();
    eyre::ensure!(
        remaining_ids == [runtime],
        "unexpected teams after removal {remaining_ids:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_batch_leaves_membership_untouched(
    services: Services,
) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let team = services.team("compilers", ada).await?;
    let batch: Vec<UserId> = std::iter::once(ada)
        .chain((2..).map(UserId::new))
        .take(MAX_MEMBERS_PER_CALL + 1)
        .collect();

    let err = services
        .teams
        .add_users_to_team(team, batch)
        .await
        .expect_err("51 users exceed the batch limit");

    eyre::ensure!(err.kind() == FailureKind::Validation, "oversized batch: {err}");
    let unchanged = services.teams.describe_team(team).await?;
    eyre::ensure!(
        unchanged.members().is_empty(),
        "rejected batch must not add members"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_member_aborts_the_whole_batch(services: Services) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let team = services.team("compilers", ada).await?;

    let err = services
        .teams
        .add_users_to_team(team, vec![ada, UserId::new(42)])
        .await
        .expect_err("unknown user should fail");

    eyre::ensure!(err.kind() == FailureKind::NotFound, "unknown member: {err}");
    let members = services.teams.list_team_users(team).await?;
    eyre::ensure!(members.is_empty(), "known users must not be added either");
    Ok(())
}
