mod logger;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use photo_report::{MetadataText, ReportMetadata, ReportOptions, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photorep", about = "Photographic report generator", version)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a PDF report from photos
    Build {
        /// Photo files, in report order
        #[arg(required = true, num_args = 1..)]
        photos: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Organization or entity shown in the header
        #[arg(long)]
        organization: Option<String>,

        /// Subject description shown in the header
        #[arg(long)]
        subject: Option<String>,

        /// Date text shown in the header
        #[arg(long)]
        date: Option<String>,

        /// Logo image for the header
        #[arg(long)]
        logo: Option<PathBuf>,

        /// JSON file with organization, subject and date
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// JSON layout options (see `init-config`)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Paper size, overrides the config file
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Draw a dashed placeholder in the logo box when there is no logo
        #[arg(long)]
        logo_placeholder: bool,
    },

    /// Show how photos would be paginated without writing a PDF
    Plan {
        /// Photo files, in report order
        #[arg(required = true, num_args = 1..)]
        photos: Vec<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default layout options to a JSON file
    InitConfig {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for photo_report::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Build {
            photos,
            output,
            organization,
            subject,
            date,
            logo,
            metadata,
            config,
            paper,
            logo_placeholder,
        } => {
            let mut options = match &config {
                Some(path) => ReportOptions::load(path).await?,
                None => ReportOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if logo_placeholder {
                options.show_logo_placeholder = true;
            }
            options.validate()?;

            // Flags win over the metadata file
            let base = match &metadata {
                Some(path) => ReportMetadata::load(path).await?,
                None => ReportMetadata::default(),
            };
            let mut text = MetadataText::from(&base);
            if let Some(organization) = organization {
                text.organization = organization;
            }
            if let Some(subject) = subject {
                text.subject = subject;
            }
            if let Some(date) = date {
                text.date = date;
            }

            let mut session = Session::new();
            session.set_metadata_text(text);
            if let Some(logo) = &logo {
                session.set_logo(logo).await?;
            }
            session.add_photos(&photos).await?;

            let stats = session.state().statistics();
            if stats.unprobed_photos > 0 {
                println!(
                    "Warning: {} photo(s) could not be read and will show as empty frames",
                    stats.unprobed_photos
                );
            }

            let report = session.export(&options, &output).await?;
            println!(
                "Generated {} pages from {} photos → {}",
                report.pages,
                stats.photos,
                output.display()
            );
            session.close();
        }

        Commands::Plan { photos, json } => {
            let mut session = Session::new();
            session.add_photos(&photos).await?;
            let state = session.state();
            let pages = state.pages();
            let stats = state.statistics();

            if json {
                let plan = serde_json::json!({
                    "statistics": stats,
                    "pages": pages,
                });
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("Report Statistics:");
                println!("  Photos: {}", stats.photos);
                println!(
                    "  Landscape: {} photos on {} pages",
                    stats.landscape_photos, stats.landscape_pages
                );
                println!(
                    "  Portrait: {} photos on {} pages",
                    stats.portrait_photos, stats.portrait_pages
                );
                println!("  Total pages: {}", stats.total_pages);
                if stats.unprobed_photos > 0 {
                    println!("  Unreadable photos: {}", stats.unprobed_photos);
                }

                for page in &pages {
                    let names: Vec<&str> = page.photos.iter().map(|p| p.name()).collect();
                    println!(
                        "Page {} of {} ({}): {}",
                        page.number,
                        page.total,
                        page.orientation.label(),
                        names.join(", ")
                    );
                }
            }
        }

        Commands::InitConfig { path } => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            ReportOptions::default().save(&path).await?;
            println!("Wrote default options → {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_paper_choice_fits_default_layout() {
        for paper in PaperArg::value_variants() {
            let options = ReportOptions {
                paper_size: (*paper).into(),
                ..Default::default()
            };
            assert!(options.validate().is_ok(), "{}", options.paper_size.name());
        }
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "photorep",
            "build",
            "a.jpg",
            "-o",
            "out.pdf",
            "--paper",
            "letter",
            "--logo-placeholder",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                paper,
                logo_placeholder,
                ..
            } => {
                assert!(matches!(paper, Some(PaperArg::Letter)));
                assert!(logo_placeholder);
            }
            _ => panic!("expected build"),
        }
        assert!(
            Cli::try_parse_from(["photorep", "build", "a.jpg", "-o", "o.pdf", "--paper", "a5"])
                .is_err()
        );
    }
}
