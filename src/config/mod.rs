pub mod toml_config;

use crate::domain::model::Course;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use self::toml_config::ServiceConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-ws")]
#[command(about = "A SOAP web service exposing course lookups")]
pub struct CliConfig {
    #[arg(long, help = "Socket address to bind, overrides the config file")]
    pub bind: Option<String>,

    #[arg(long, help = "Path to a TOML service configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved runtime settings: CLI flags over config file over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    pub request_timeout: Duration,
    pub seed_courses: Option<Vec<Course>>,
}

impl Settings {
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file = cli
            .config
            .as_ref()
            .map(ServiceConfig::from_file)
            .transpose()?;
        if let Some(config) = &file {
            config.validate()?;
        }

        let bind_value = cli
            .bind
            .clone()
            .or_else(|| file.as_ref().and_then(|c| c.bind().map(str::to_string)))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = validation::validate_socket_addr("bind", &bind_value)?;

        let request_timeout = Duration::from_secs(
            file.as_ref()
                .and_then(ServiceConfig::request_timeout_seconds)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        );

        let seed_courses = file.and_then(|config| {
            if config.course.is_empty() {
                None
            } else {
                Some(config.course)
            }
        });

        Ok(Self {
            bind,
            request_timeout,
            seed_courses,
        })
    }
}
