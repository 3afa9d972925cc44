//! Demo records for local development and examples.

use taskboard_core::model::{Project, Task, TaskPriority, User, UserRole};

use crate::services::Result;
use crate::state::AppState;

/// Seeds the store behind `state` with a small, coherent demo data set:
/// two roles, three priorities, two users, a handful of tasks, and a project.
///
/// Writes go through the services so the cache entries end up invalidated
/// exactly as they would in production.
pub async fn seed(state: &AppState) -> Result<()> {
    let admin = state.user_roles.save(UserRole::new("Admin")).await?;
    let member = state.user_roles.save(UserRole::new("Member")).await?;

    let low = state.task_priorities.save(TaskPriority::new("Low", 10)).await?;
    let medium = state
        .task_priorities
        .save(TaskPriority::new("Medium", 20))
        .await?;
    let high = state
        .task_priorities
        .save(TaskPriority::new("High", 30))
        .await?;

    let ada = state
        .users
        .save(
            User::new("ada@example.com", "Ada", "Lovelace")
                .with_password("c0ffee")
                .with_role(admin.id),
        )
        .await?;
    let alan = state
        .users
        .save(
            User::new("alan@example.com", "Alan", "Turing")
                .with_password("3n1gm4")
                .with_role(member.id),
        )
        .await?;

    let notes = state
        .tasks
        .save(
            Task::new("Publish translation notes")
                .with_description("Notes on the analytical engine memoir")
                .with_assignee(ada.id)
                .with_priority(high.id),
        )
        .await?;
    let tables = state
        .tasks
        .save(
            Task::new("Draft computation tables")
                .with_assignee(ada.id)
                .with_priority(medium.id),
        )
        .await?;
    let review = state
        .tasks
        .save(
            Task::new("Review machine designs")
                .with_assignee(alan.id)
                .with_priority(low.id),
        )
        .await?;

    let engine = state
        .projects
        .save(
            Project::new("Analytical Engine")
                .with_description("A general-purpose computing machine")
                .with_author(ada.id)
                .with_task(notes.id)
                .with_task(tables.id),
        )
        .await?;

    // Watch lists reference rows created above, so they land in a second
    // write per user.
    state
        .users
        .save(
            User {
                watched_task_ids: vec![notes.id, review.id],
                watched_project_ids: vec![engine.id],
                ..ada
            },
        )
        .await?;
    state
        .users
        .save(
            User {
                watched_task_ids: vec![tables.id],
                ..alan
            },
        )
        .await?;

    Ok(())
}
