//! Configuration resolution: file, then environment, then flags

use cleanup_config::{CleanupConfig, ConfigError};
use tracing::debug;

use crate::cli::CliArgs;

pub fn resolve(args: &CliArgs) -> Result<CleanupConfig, ConfigError> {
    let config = match &args.config {
        Some(path) => CleanupConfig::load(path)?,
        None => CleanupConfig::default(),
    };
    let mut config = config.apply_env();

    if let Some(endpoint) = &args.endpoint {
        debug!("Endpoint overridden on the command line");
        config.inpaint.endpoint = endpoint.clone();
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_flag_overrides_endpoint() {
        let args = CliArgs::parse_from([
            "cleanup",
            "-i",
            "in.png",
            "-s",
            "s.json",
            "--endpoint",
            "http://localhost:9000/inpaint",
        ]);
        let config = resolve(&args).unwrap();
        assert_eq!(config.inpaint.endpoint, "http://localhost:9000/inpaint");
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let args = CliArgs::parse_from(["cleanup", "-i", "in.png", "-s", "s.json", "--endpoint", ""]);
        assert!(matches!(resolve(&args), Err(ConfigError::Invalid(_))));
    }
}
