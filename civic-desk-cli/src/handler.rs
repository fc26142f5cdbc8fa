use anyhow::{bail, Context, Result};
use chrono::Local;
use civic_desk_api::SessionContext;
use civic_desk_db::models::ComplaintModel;
use civic_desk_db::service::ComplaintService;
use civic_desk_db::views::export_csv;
use civic_desk_postgres::repository::db_init::{cleanup_database, init_database};
use civic_desk_postgres::{ComplaintServiceImpl, PostgresRepositories};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::cli::{ActorArgs, Cli, Commands};
use crate::config::AppConfig;
use crate::output::{self, Report};

/// Runs one subcommand against the configured database
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let pool = config
        .database
        .connect()
        .await
        .context("failed to connect to the database")?;

    let repos = Arc::new(PostgresRepositories::new(Arc::new(pool)));
    let policy = config.transitions.into_policy();
    info!(transitions = policy.name(), "Starting civic desk");
    let service = ComplaintServiceImpl::new(repos.clone(), policy);
    let json = cli.json;

    match cli.command {
        Commands::Migrate { reset } => migrate(repos.pool(), reset).await,

        Commands::Submit { actor, form } => {
            let session = sign_in(&service, &actor).await?;
            let complaint = service.submit_complaint(&session, form.into_request()).await?;
            if json {
                print_json(&complaint)
            } else {
                println!("Submitted complaint {}", complaint.id);
                Ok(())
            }
        }

        Commands::List { actor, filter } => {
            let complaints = visible(&service, &actor).await?;
            let shown = filter.to_filter().apply(&complaints);
            if json {
                print_json(&shown)
            } else {
                print!("{}", output::complaint_list(&shown));
                Ok(())
            }
        }

        Commands::Show { actor, id } => {
            let session = sign_in(&service, &actor).await?;
            let detail = service.complaint_detail(&session, id).await?;
            if json {
                print_json(&detail)
            } else {
                print!("{}", output::complaint_detail(&detail));
                Ok(())
            }
        }

        Commands::Update { actor, changes } => {
            let request = changes.to_changes();
            if request.is_empty() {
                bail!("nothing to update: pass --status, --priority, --department or --officer");
            }
            let session = sign_in(&service, &actor).await?;
            service.update_complaint(&session, changes.id, request).await?;
            println!("Updated complaint {}", changes.id);
            Ok(())
        }

        Commands::Export {
            actor,
            filter,
            output,
        } => {
            let complaints = visible(&service, &actor).await?;
            let csv = export_csv(filter.to_filter().apply(&complaints));
            match output {
                Some(path) => {
                    tokio::fs::write(&path, csv)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Exported complaints");
                }
                None => print!("{csv}"),
            }
            Ok(())
        }

        Commands::Report { actor, filter } => {
            let complaints = visible(&service, &actor).await?;
            let shown = filter.to_filter().apply(&complaints);
            let report = Report::build(&shown, Local::now().date_naive(), &Local);
            if json {
                print_json(&report)
            } else {
                print!("{}", output::report(&report));
                Ok(())
            }
        }

        Commands::Departments => {
            let departments = service.list_departments().await?;
            if json {
                print_json(&departments)
            } else {
                print!("{}", output::department_list(&departments));
                Ok(())
            }
        }

        Commands::AddDepartment { actor, name } => {
            let department = service.create_department(actor.user, &name).await?;
            if json {
                print_json(&department)
            } else {
                println!("Created department {}  {}", department.id, department.name);
                Ok(())
            }
        }

        Commands::Grant {
            actor,
            target,
            role,
            department,
        } => {
            let granted = service
                .assign_role(actor.user, target, role, department)
                .await?;
            if json {
                print_json(&granted)
            } else {
                println!("{} is now {}", granted.user_id, granted.role);
                Ok(())
            }
        }
    }
}

async fn migrate(pool: &PgPool, reset: bool) -> Result<()> {
    if reset {
        cleanup_database(pool)
            .await
            .context("failed to drop the schema")?;
        info!("Dropped existing schema");
    }
    init_database(pool)
        .await
        .context("failed to apply migrations")?;
    println!("Database schema is up to date");
    Ok(())
}

async fn sign_in(
    service: &ComplaintServiceImpl,
    actor: &ActorArgs,
) -> Result<SessionContext> {
    let session = service.start_session(actor.user).await?;
    info!(user_id = %session.user_id, role = %session.role, "Signed in");
    Ok(session)
}

async fn visible(service: &ComplaintServiceImpl, actor: &ActorArgs) -> Result<Vec<ComplaintModel>> {
    let session = sign_in(service, actor).await?;
    Ok(service.list_complaints(&session).await?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

