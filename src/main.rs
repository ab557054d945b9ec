use clap::Parser;
use course_ws::utils::logger;
use course_ws::{CliConfig, InMemoryDirectory, Settings, SoapService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose);

    tracing::info!("Starting course-ws");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let directory = match settings.seed_courses {
        Some(courses) => InMemoryDirectory::new(courses),
        None => {
            tracing::warn!("No seed courses configured, using the sample catalog");
            InMemoryDirectory::with_sample_courses()
        }
    };
    tracing::info!("Course directory loaded with {} courses", directory.len());

    let service = Arc::new(SoapService::new(directory));
    course_ws::server::serve(service, settings.bind, settings.request_timeout).await?;

    Ok(())
}
