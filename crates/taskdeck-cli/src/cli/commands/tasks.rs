//! Task command handlers.
//!
//! Each command drives the app reducer the way the dashboard does: resolve
//! the session, visit the dashboard (guard + initial fetch), then dispatch
//! the operation's events and report the resulting notice.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use comfy_table::{ContentArrangement, Table};
use taskdeck_app::events::AppEvent;
use taskdeck_app::runtime::Runtime;
use taskdeck_app::state::{AppState, NoticeKind};
use taskdeck_core::api::ApiClient;
use taskdeck_core::session::SessionStore;
use taskdeck_core::tasks::{StatusFilter, Task, TaskDraft, TaskStatus};

use super::{boot, check_notice};

pub async fn list(
    client: ApiClient,
    session: SessionStore,
    status: StatusFilter,
    search: String,
) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    app.dashboard.filter = status;
    app.dashboard.search = search;
    open_dashboard(&mut runtime, &mut app).await?;

    render_tasks(&app.dashboard.tasks);
    Ok(())
}

pub async fn add(
    client: ApiClient,
    session: SessionStore,
    title: String,
    description: String,
    status: TaskStatus,
) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    open_dashboard(&mut runtime, &mut app).await?;

    runtime.dispatch(&mut app, AppEvent::CreateRequested).await;
    runtime
        .dispatch(
            &mut app,
            AppEvent::DraftChanged(TaskDraft {
                title,
                description,
                status,
            }),
        )
        .await;
    runtime.dispatch(&mut app, AppEvent::FormSubmitted).await;

    finish_mutation(&mut runtime, &app)
}

pub async fn edit(
    client: ApiClient,
    session: SessionStore,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    open_dashboard(&mut runtime, &mut app).await?;

    runtime
        .dispatch(&mut app, AppEvent::EditRequested(id.to_string()))
        .await;
    check_notice(&app)?;

    let Some((_, mut draft)) = app.dashboard.form.submit_target() else {
        bail!("Task not found: {id}");
    };
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(status) = status {
        draft.status = status;
    }

    runtime
        .dispatch(&mut app, AppEvent::DraftChanged(draft))
        .await;
    runtime.dispatch(&mut app, AppEvent::FormSubmitted).await;

    finish_mutation(&mut runtime, &app)
}

pub async fn rm(client: ApiClient, session: SessionStore, id: &str, yes: bool) -> Result<()> {
    let (mut runtime, mut app) = boot(client, session).await;
    open_dashboard(&mut runtime, &mut app).await?;

    runtime
        .dispatch(&mut app, AppEvent::DeleteRequested(id.to_string()))
        .await;

    if !yes && !confirm(&format!("Delete task {id}? [y/N] "))? {
        runtime.dispatch(&mut app, AppEvent::DeleteDeclined).await;
        println!("Aborted.");
        return Ok(());
    }

    runtime.dispatch(&mut app, AppEvent::DeleteConfirmed).await;
    finish_mutation(&mut runtime, &app)
}

/// Resolves the guard and runs the initial fetch.
async fn open_dashboard(runtime: &mut Runtime, app: &mut AppState) -> Result<()> {
    runtime.dispatch(app, AppEvent::DashboardVisited).await;
    if runtime.take_redirect().is_some() {
        bail!("Not logged in. Run `taskdeck login` first.");
    }
    check_notice(app)
}

/// Reports the outcome of a create/update/delete dispatch.
fn finish_mutation(runtime: &mut Runtime, app: &AppState) -> Result<()> {
    if runtime.take_redirect().is_some() {
        bail!("Session expired. Run `taskdeck login` again.");
    }
    match &app.dashboard.notice {
        Some(notice) if notice.kind == NoticeKind::Error => bail!("{}", notice.text),
        Some(notice) => {
            println!("{}", notice.text);
            Ok(())
        }
        None => Ok(()),
    }
}

fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "TITLE", "STATUS", "DESCRIPTION", "CREATED"]);
    for task in tasks {
        table.add_row(vec![
            task.id.clone(),
            task.title.clone(),
            task.status.to_string(),
            task.description.clone(),
            task.created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
