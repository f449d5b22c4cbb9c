//! Read config from toml and env variables using [Figment]

use std::{env, path::Path};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::pagination::PaginationConfig;

/// Fleet API settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Page sizes of list queries
    pub pagination: PaginationConfig,
    /// Logging settings
    pub tracing: TracingConfig,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// [Targets](tracing_subscriber::filter::Targets) filter for the logs
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { filter: "info".into() }
    }
}

/// Reads the config folder into a [Figment]
///
/// The order of precedence for properties is:
/// - Environment variables, splitting objects by `_`
/// - `{profile}.toml`, where `{profile}` is retrieved from `PROFILE` environment variable and defaults to `development`
/// - `default.toml`
///
/// **IMPORTANT:** Properties names can't contain underscores, as they're reserved to split nested objects.
pub fn read(path: impl AsRef<Path>) -> Figment {
    let path = path.as_ref();
    let profile = env::var("PROFILE");
    let profile = profile.as_deref().unwrap_or("development");

    Figment::new()
        .merge(Toml::file(path.join("default.toml")))
        .merge(Toml::file(path.join(format!("{profile}.toml"))))
        .merge(Env::raw().split("_"))
}

/// Reads the config and parses it into the given `T`
///
/// **IMPORTANT:** Properties names can't contain underscores, `T` can still contain underscored properties if they
/// have an alias when deserializing, like [PaginationConfig] does.
pub fn parse<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    read(path).extract().context("Could not parse config")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_config() {
        figment::Jail::expect_with(|jail| {
            let tmp_dir = jail.directory();
            fs::create_dir(tmp_dir.join("config")).unwrap();
            jail.create_file(
                "config/default.toml",
                r#"
                    [pagination]
                    defaultpagesize = 20
                    maxpagesize = 100

                    [tracing]
                    filter = "warn,fleet_graphql=info"
                "#,
            )?;
            jail.create_file(
                "config/development.toml",
                r#"
                    [pagination]
                    defaultpagesize = 25
                "#,
            )?;

            jail.set_env("PAGINATION_MAXPAGESIZE", "50");

            let figment = read("config");
            assert_eq!(25, figment.extract_inner::<u64>("pagination.defaultpagesize")?);
            assert_eq!(50, figment.extract_inner::<u64>("pagination.maxpagesize")?);

            assert_eq!(
                figment.extract::<FleetConfig>()?,
                FleetConfig {
                    pagination: PaginationConfig {
                        default_page_size: Some(25),
                        max_page_size: Some(50),
                    },
                    tracing: TracingConfig {
                        filter: "warn,fleet_graphql=info".into()
                    }
                }
            );

            Ok(())
        });
    }

    #[test]
    fn test_config_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PROFILE", "production");

            let config = parse::<FleetConfig>("missing")
                .map_err(|err| figment::Error::from(err.to_string()))?;

            assert_eq!(config, FleetConfig::default());
            assert_eq!(config.tracing.filter, "info");
            assert_eq!(config.pagination.max_page_size, None);

            Ok(())
        });
    }
}
