use clap::Parser;
use page_archiver::results::PageReport;
use page_archiver::{ArchiveError, Archiver, ArchiverConfig, Outcome, links};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(&args).await {
        Ok(()) => println!("completed successfully!"),
        Err(e) => {
            ::log::error!("{}", e);
            if e.is_fatal() {
                std::process::exit(1);
            }
        }
    }
}

async fn run(args: &Args) -> Result<(), ArchiveError> {
    let config = match &args.config {
        Some(path) => ArchiverConfig::from_file(path)?,
        None => ArchiverConfig::default(),
    };
    let config = args.apply(config);
    let links = links::read_links(&args.link_file)?;

    ::log::info!(
        "Archiving {} links into {}",
        links.len(),
        config.archive_root.display()
    );

    let mut archiver = Archiver::new(config)?;
    let reports = archiver.archive_links(&links).await;

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => ::log::error!("Failed to encode reports: {}", e),
        }
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn print_report(report: &PageReport) {
    println!("Page {} -> {}", report.link, report.local_html_path.display());
    for resource in &report.resources {
        let outcome = match &resource.outcome {
            Outcome::AlreadyPresent => "already present".to_string(),
            Outcome::Blocked => "protected by robots.txt".to_string(),
            Outcome::Saved { bytes } => format!("saved {bytes} bytes"),
            Outcome::Failed { error } => format!("failed: {error}"),
        };
        println!("Resource {} -> {}", resource.reference, outcome);
    }
}
