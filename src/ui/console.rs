use crate::core::coordinator::{BackupCoordinator, RunOutcome};
use crate::core::system::System;
use crate::model::backup_result::BackupResult;
use crate::model::diff_report::DiffKind;
use crate::model::event::BackupEvent;
use crate::model::schedule::Schedule;
use crate::model::task::BackupTask;
use crate::ui::cli::{Command, TaskCommand};
use anyhow::{Context, bail};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

pub async fn execute(command: Command, system: &mut System) -> anyhow::Result<()> {
    let coordinator = system.coordinator();
    let mut events = system
        .take_events()
        .context("event channel already taken")?;

    match command {
        Command::Run => run_daemon(system, &mut events).await,
        Command::Backup {
            source,
            destination,
        } => {
            coordinator.set_source(source).await;
            coordinator.set_destination(destination).await;
            let outcome = coordinator.start_backup().await?;
            follow_run(outcome, &mut events).await
        }
        Command::Preview {
            source,
            destination,
        } => {
            coordinator.set_source(source).await;
            coordinator.set_destination(destination).await;
            let report = coordinator.preview_changes().await?;
            println!("New entries:");
            for entry in report.new_entries() {
                println!("  {entry}");
            }
            println!("Modified entries:");
            for entry in report.modified_entries() {
                println!("  {entry}");
            }
            println!(
                "{} new folder(s), {} new file(s), {} modified file(s)",
                report.count(DiffKind::NewFolder),
                report.count(DiffKind::NewFile),
                report.count(DiffKind::ModifiedFile)
            );
            println!("Total size: {:.2} KB", report.total_kilobytes());
            Ok(())
        }
        Command::Task(task_command) => execute_task(task_command, &coordinator, &mut events).await,
        Command::History { date } => {
            match date {
                Some(date) => {
                    let record = coordinator
                        .history_record(&date)
                        .await
                        .with_context(|| format!("no history record at {date}"))?;
                    print_result(&record);
                }
                None => {
                    for record in coordinator.history().await {
                        println!("{}", record.date_label());
                    }
                }
            }
            Ok(())
        }
        Command::Log { date } => {
            match date {
                Some(date) => {
                    let record = coordinator
                        .log_record(&date)
                        .await
                        .with_context(|| format!("no log record at {date}"))?;
                    for error in &record.errors {
                        println!("{error}");
                    }
                }
                None => {
                    for record in coordinator.log().await {
                        println!("{}", record.date_label());
                    }
                }
            }
            Ok(())
        }
    }
}

async fn execute_task(
    command: TaskCommand,
    coordinator: &Arc<BackupCoordinator>,
    events: &mut UnboundedReceiver<BackupEvent>,
) -> anyhow::Result<()> {
    match command {
        TaskCommand::Save {
            name,
            source,
            destination,
            frequency,
            time,
            day,
        } => {
            let schedule = Schedule {
                frequency,
                time,
                day,
            };
            let task = coordinator
                .save_task(BackupTask::new(name, source, destination, schedule))
                .await?;
            println!("Saved {}", task.summary());
            Ok(())
        }
        TaskCommand::Delete { name } => {
            coordinator.delete_task(&name).await?;
            println!("Deleted task {name}");
            Ok(())
        }
        TaskCommand::List => {
            for task in coordinator.tasks().await {
                println!("{}", task.summary());
            }
            Ok(())
        }
        TaskCommand::Run { name } => {
            let outcome = coordinator.run_task(&name).await?;
            follow_run(outcome, events).await
        }
    }
}

async fn run_daemon(system: &mut System, events: &mut UnboundedReceiver<BackupEvent>) -> anyhow::Result<()> {
    let count = system.start_scheduler().await;
    println!("Scheduler running with {count} task(s), press Ctrl-C to stop");
    for job in system.coordinator().registry().jobs() {
        println!("  {} - {} - next run {}", job.task_name, job.schedule, job.next_run);
    }

    loop {
        tokio::select! {
            biased;
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                break;
            }
            Some(event) = events.recv() => print_event(&event),
        }
    }
    Ok(())
}

/// Prints events of one run until it finishes.
async fn follow_run(outcome: RunOutcome, events: &mut UnboundedReceiver<BackupEvent>) -> anyhow::Result<()> {
    let run_id = outcome.run_id();
    let RunOutcome::Started(handle) = outcome else {
        println!("No changes detected.");
        return Ok(());
    };

    let mut failed = false;
    while let Some(event) = events.recv().await {
        if event.run_id() != run_id {
            continue;
        }
        print_event(&event);
        failed = matches!(event, BackupEvent::Failed { .. });
        if event.is_terminal() {
            break;
        }
    }
    handle.wait().await?;

    if failed {
        bail!("backup failed");
    }
    Ok(())
}

fn print_event(event: &BackupEvent) {
    match event {
        BackupEvent::Progress { percent, .. } => println!("Progress: {percent}%"),
        BackupEvent::Completed { result, .. } => {
            if result.has_changes() {
                println!("Backup completed successfully.");
            } else {
                println!("No changes detected.");
            }
            print_result(result);
        }
        BackupEvent::Failed { errors, .. } => {
            for error in errors {
                println!("Backup failed: {error}");
            }
        }
        BackupEvent::NoChanges {
            source,
            destination,
            ..
        } => println!(
            "No changes detected: {} -> {}",
            source.display(),
            destination.display()
        ),
    }
}

fn print_result(result: &BackupResult) {
    println!("Date: {}", result.date_label());
    println!("Source: {}", result.source.display());
    println!("Destination: {}", result.destination.display());
    println!("Copied files: {}", result.copied_files);
    println!("Modified files: {}", result.modified_files);
    println!("Copied folders: {}", result.copied_folders);
    println!("Modified folders: {}", result.modified_folders);
    if result.has_errors() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {error}");
        }
    }
}
