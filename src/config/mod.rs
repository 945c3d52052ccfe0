// Config module - deployment configuration and artifacts

mod deploy;

pub use deploy::{ConfigError, DeployConfig, DeploymentArtifact, InitialStateSnapshot};
