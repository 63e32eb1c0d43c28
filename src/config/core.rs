use super::{CliOverrides, ENV_PREFIX, PolicyConfig, REPO_CONFIG_FILE};
use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::Path;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl PolicyConfig {
    /// Load the layered configuration for a repository rooted at `root`
    ///
    /// Priority, lowest first: embedded defaults, `repolint.toml` at the
    /// root, `custom_config`, `REPOLINT_*` environment variables, then CLI
    /// overrides. The result is validated before it is returned.
    pub fn load(
        root: &Path,
        custom_config: Option<&Path>,
        cli_overrides: Option<CliOverrides>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting from {}", root.display());

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG)) // 1. Defaults (lowest)
            .merge(Toml::file(root.join(REPO_CONFIG_FILE))); // 2. Repository config

        if let Some(path) = custom_config {
            // 3. Explicit config file, format picked by extension
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            tracing::trace!("CONFIG LOAD: Applying {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__")); // 4. Environment

        if let Some(overrides) = cli_overrides {
            // 5. CLI (highest priority)
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides.to_value()));
        }

        let config: PolicyConfig = figment
            .extract()
            .context("Failed to load configuration")?;
        config.validate().context("Invalid configuration")?;

        tracing::debug!(
            "Config: max_lines={}, docs_dir={}, parallel={:?}",
            config.rules.file_size.max_lines,
            config.rules.doc_location.docs_dir,
            config.parallel.mode
        );
        Ok(config)
    }

    /// Embedded defaults only, ignoring files and environment
    pub fn embedded() -> Result<Self> {
        Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .context("Failed to parse embedded default configuration")
    }
}
