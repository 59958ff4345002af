use photo_report::Session;
use photo_report_runtime::{ReportCommand, ReportUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that owns the report session and applies commands
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<ReportCommand>,
    update_tx: mpsc::UnboundedSender<ReportUpdate>,
) {
    let mut session = Session::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut session, &mut command_rx, &update_tx).await;
    }

    // UI is gone
    session.close();
}

async fn process_command(
    cmd: ReportCommand,
    session: &mut Session,
    command_rx: &mut mpsc::UnboundedReceiver<ReportCommand>,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    match cmd {
        ReportCommand::AddPhotos { paths } => {
            handlers::photos::handle_add_photos(paths, session, update_tx).await;
        }
        ReportCommand::RemovePhoto { id } => {
            handlers::photos::handle_remove_photo(id, session, update_tx);
        }
        ReportCommand::SetLogo { path } => {
            handlers::photos::handle_set_logo(path, session, update_tx).await;
        }
        ReportCommand::RemoveLogo => {
            handlers::photos::handle_remove_logo(session, update_tx);
        }
        ReportCommand::SetMetadata { mut text } => {
            // Typing sends one command per keystroke; only the latest matters
            let mut next = None;
            while let Ok(queued) = command_rx.try_recv() {
                match queued {
                    ReportCommand::SetMetadata { text: newer } => text = newer,
                    other => {
                        next = Some(other);
                        break;
                    }
                }
            }
            handlers::report::handle_set_metadata(text, session, update_tx);
            if let Some(next_cmd) = next {
                Box::pin(process_command(next_cmd, session, command_rx, update_tx)).await;
            }
        }
        ReportCommand::LoadOptions { path } => {
            handlers::report::handle_load_options(path, update_tx).await;
        }
        ReportCommand::SaveOptions { options, path } => {
            handlers::report::handle_save_options(options, path, update_tx).await;
        }
        ReportCommand::GenerateReport {
            options,
            output_path,
        } => {
            handlers::report::handle_generate(options, output_path, session, update_tx).await;
        }
        ReportCommand::Reset => {
            session.clear();
            let _ = update_tx.send(ReportUpdate::LogoRemoved);
            let _ = update_tx.send(ReportUpdate::StateChanged {
                state: session.state(),
            });
        }
    }
}
