pub mod config;
pub mod directory;
pub mod domain;
pub mod endpoint;
pub mod server;
pub mod soap;
pub mod utils;

pub use config::{CliConfig, Settings};
pub use directory::InMemoryDirectory;
pub use domain::model::Course;
pub use domain::ports::CourseDirectory;
pub use endpoint::courses::CourseEndpoint;
pub use server::SoapService;
pub use utils::error::{Result, ServiceError};
