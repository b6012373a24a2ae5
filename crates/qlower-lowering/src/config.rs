//! Lowering configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QLOWER_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! ```yaml
//! precision: single
//! disabled_kernels: [CRot, MultiRZ]
//! extra_kernels: [ISWAP]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use qlower_ir::INVERSE_SUFFIX;

use crate::kernel::KernelRegistry;
use crate::precision::PrecisionKind;

/// Environment variable selecting the precision.
pub const ENV_PRECISION: &str = "QLOWER_PRECISION";
/// Environment variable with a comma-separated list of kernels to disable.
pub const ENV_DISABLED_KERNELS: &str = "QLOWER_DISABLED_KERNELS";
/// Environment variable with a comma-separated list of extra kernels.
pub const ENV_EXTRA_KERNELS: &str = "QLOWER_EXTRA_KERNELS";

/// Settings that shape a lowering request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringConfig {
    /// Precision of parameters and matrix buffers.
    pub precision: PrecisionKind,

    /// Kernels removed from the standard vocabulary. Gates named here are
    /// lowered through their dense matrix.
    pub disabled_kernels: Vec<String>,

    /// Kernels added to the standard vocabulary, at both precisions.
    pub extra_kernels: Vec<String>,
}

impl LoweringConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LoweringConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration from an optional file, then apply environment
    /// overrides.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            LoweringConfig::default()
        };

        let config = config.merge_env()?;
        config.validate()?;
        debug!(
            precision = %config.precision,
            disabled = config.disabled_kernels.len(),
            extra = config.extra_kernels.len(),
            "loaded lowering configuration"
        );
        Ok(config)
    }

    /// Merge `QLOWER_*` environment variables into this configuration.
    ///
    /// Only variables that are set override the current values.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable source.
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_PRECISION) {
            self.precision = v.parse()?;
        }
        if let Some(v) = lookup(ENV_DISABLED_KERNELS) {
            self.disabled_kernels = split_list(&v);
        }
        if let Some(v) = lookup(ENV_EXTRA_KERNELS) {
            self.extra_kernels = split_list(&v);
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in self.disabled_kernels.iter().chain(&self.extra_kernels) {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "kernel names must not be empty".to_string(),
                ));
            }
            if name.ends_with(INVERSE_SUFFIX) {
                return Err(ConfigError::Invalid(format!(
                    "kernel '{name}' must be named without the '{INVERSE_SUFFIX}' suffix"
                )));
            }
        }

        if let Some(name) = self
            .extra_kernels
            .iter()
            .find(|name| self.disabled_kernels.contains(name))
        {
            return Err(ConfigError::Invalid(format!(
                "kernel '{name}' is both disabled and added"
            )));
        }

        Ok(())
    }

    /// Build the kernel registry these settings describe.
    pub fn registry(&self) -> KernelRegistry {
        let mut registry = KernelRegistry::standard().without(&self.disabled_kernels);
        for name in &self.extra_kernels {
            registry.register_all(name.as_str());
        }
        registry
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// The configuration file is not valid YAML for these settings.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is out of range or inconsistent.
    #[error("Validation error: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::{Double, Single};
    use rustc_hash::FxHashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: FxHashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LoweringConfig::default();
        assert_eq!(config.precision, PrecisionKind::Double);
        assert!(config.validate().is_ok());
        assert_eq!(config.registry(), KernelRegistry::standard());
    }

    #[test]
    fn test_from_yaml() {
        let config = LoweringConfig::from_yaml_str(
            "precision: single\ndisabled_kernels: [CRot]\nextra_kernels: [ISWAP]\n",
        )
        .unwrap();
        assert_eq!(config.precision, PrecisionKind::Single);

        let registry = config.registry();
        assert!(!registry.gate_has_kernel::<Single>("CRot"));
        assert!(registry.gate_has_kernel::<Double>("ISWAP"));
        assert!(registry.gate_has_kernel::<Double>("CRX"));
    }

    #[test]
    fn test_yaml_defaults_missing_fields() {
        let config = LoweringConfig::from_yaml_str("precision: double\n").unwrap();
        assert!(config.disabled_kernels.is_empty());
        assert!(config.extra_kernels.is_empty());
    }

    #[test]
    fn test_yaml_rejects_unknown_fields() {
        let err = LoweringConfig::from_yaml_str("precission: single\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_yaml_rejects_bad_precision() {
        assert!(LoweringConfig::from_yaml_str("precision: half\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = LoweringConfig::from_file("/nonexistent/qlower.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_vars_override() {
        let config = LoweringConfig::default()
            .merge_vars(vars(&[
                (ENV_PRECISION, "f32"),
                (ENV_DISABLED_KERNELS, " RX, ,CNOT "),
            ]))
            .unwrap();
        assert_eq!(config.precision, PrecisionKind::Single);
        assert_eq!(config.disabled_kernels, vec!["RX", "CNOT"]);
    }

    #[test]
    fn test_absent_vars_leave_values() {
        let base = LoweringConfig {
            precision: PrecisionKind::Single,
            disabled_kernels: vec!["T".into()],
            extra_kernels: Vec::new(),
        };
        let merged = base.clone().merge_vars(vars(&[])).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_bad_precision_var() {
        let err = LoweringConfig::default()
            .merge_vars(vars(&[(ENV_PRECISION, "quad")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_inverse_names() {
        let config = LoweringConfig {
            disabled_kernels: vec!["RX.inv".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_conflict() {
        let config = LoweringConfig {
            disabled_kernels: vec!["ISWAP".into()],
            extra_kernels: vec!["ISWAP".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
