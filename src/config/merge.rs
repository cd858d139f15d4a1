//! CLI flags layered over the loaded configuration

use crate::domain::{Config, HeaderPolicy};

/// Values given on the command line. `None` / `false` leave the config as is.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub header_marker: Option<String>,
    pub header_policy: Option<HeaderPolicy>,
    pub include_extensions: Option<Vec<String>>,
    pub exclude_globs: Option<Vec<String>>,
    pub recursive: bool,
    pub output_name: Option<String>,
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(marker) = cli.header_marker {
        config.header_marker = marker;
    }
    if let Some(policy) = cli.header_policy {
        config.header_policy = policy;
    }
    if let Some(extensions) = cli.include_extensions {
        config.include_extensions =
            extensions.iter().map(|ext| crate::domain::normalize_extension(ext)).collect();
    }
    if let Some(globs) = cli.exclude_globs {
        config.exclude_globs = globs;
    }
    if cli.recursive {
        config.recursive = true;
    }
    if let Some(name) = cli.output_name {
        config.output_name = name;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_config() {
        let config = Config { header_marker: "SKU".to_string(), ..Config::default() };
        let merged = merge_cli_with_config(config.clone(), CliOverrides::default());
        assert_eq!(merged, config);
    }

    #[test]
    fn cli_values_win() {
        let overrides = CliOverrides {
            header_marker: Some("Code".to_string()),
            header_policy: Some(HeaderPolicy::Strict),
            include_extensions: Some(vec!["XLSX".to_string()]),
            recursive: true,
            ..CliOverrides::default()
        };
        let merged = merge_cli_with_config(Config::default(), overrides);
        assert_eq!(merged.header_marker, "Code");
        assert_eq!(merged.header_policy, HeaderPolicy::Strict);
        assert_eq!(merged.include_extensions, vec![".xlsx"]);
        assert!(merged.recursive);
    }
}
