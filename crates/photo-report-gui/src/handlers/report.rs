use photo_report::{MetadataText, ReportError, ReportOptions, Session};
use photo_report_runtime::ReportUpdate;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub fn handle_set_metadata(
    text: MetadataText,
    session: &mut Session,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    let before = session.state();
    session.set_metadata_text(text);
    let after = session.state();
    if *before != *after {
        let _ = update_tx.send(ReportUpdate::StateChanged { state: after });
    }
}

pub async fn handle_generate(
    options: ReportOptions,
    output_path: PathBuf,
    session: &Session,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    log::info!("Generating report to {}", output_path.display());

    match session.export(&options, &output_path).await {
        Ok(report) => {
            let _ = update_tx.send(ReportUpdate::ReportComplete {
                path: output_path,
                pages: report.pages,
            });
        }
        Err(e @ ReportError::EmptyReport) => {
            let _ = update_tx.send(ReportUpdate::EmptyReport {
                message: e.to_string(),
            });
        }
        Err(e) => {
            log::error!("Report generation failed: {}", e);
            let _ = update_tx.send(ReportUpdate::Error {
                message: format!("Failed to generate report: {e}"),
            });
        }
    }
}

pub async fn handle_load_options(path: PathBuf, update_tx: &mpsc::UnboundedSender<ReportUpdate>) {
    match ReportOptions::load(&path).await {
        Ok(options) => {
            log::info!("Loaded options from {}", path.display());
            let _ = update_tx.send(ReportUpdate::OptionsLoaded { options });
        }
        Err(e) => {
            let _ = update_tx.send(ReportUpdate::Error {
                message: format!("Failed to load options: {e}"),
            });
        }
    }
}

pub async fn handle_save_options(
    options: ReportOptions,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<ReportUpdate>,
) {
    match options.save(&path).await {
        Ok(()) => {
            log::info!("Options saved to {}", path.display());
            let _ = update_tx.send(ReportUpdate::OptionsSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(ReportUpdate::Error {
                message: format!("Failed to save options: {e}"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.pdf");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = Session::new();

        handle_generate(ReportOptions::default(), output.clone(), &session, &tx).await;

        match rx.try_recv() {
            Ok(ReportUpdate::EmptyReport { message }) => {
                assert_eq!(message, "Please add photos before generating the report.");
            }
            other => panic!("unexpected update: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_unchanged_metadata_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = Session::new();

        handle_set_metadata(MetadataText::default(), &mut session, &tx);
        assert!(rx.try_recv().is_err());

        handle_set_metadata(
            MetadataText {
                subject: "Facade survey".to_string(),
                ..Default::default()
            },
            &mut session,
            &tx,
        );
        assert!(matches!(
            rx.try_recv(),
            Ok(ReportUpdate::StateChanged { state }) if state.metadata().subject == "Facade survey"
        ));
    }

    #[tokio::test]
    async fn test_options_round_trip_through_handlers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let options = ReportOptions {
            show_logo_placeholder: true,
            ..Default::default()
        };

        handle_save_options(options.clone(), path.clone(), &tx).await;
        assert!(matches!(rx.try_recv(), Ok(ReportUpdate::OptionsSaved { .. })));

        handle_load_options(path, &tx).await;
        match rx.try_recv() {
            Ok(ReportUpdate::OptionsLoaded { options: loaded }) => assert_eq!(loaded, options),
            other => panic!("unexpected update: {:?}", other),
        }
    }
}
