//! Environment variables take precedence over files.

use std::path::PathBuf;

use arbor_config::ArborConfig;
use figment::Jail;

#[test]
fn env_sets_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("ARBOR_STORAGE__DATA_DIR", "/tmp/arbor-data");
        jail.set_env("ARBOR_GENERAL__VERBOSE_LOGGING", "true");

        let config = ArborConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/arbor-data"));
        assert!(config.general.verbose_logging);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".arbor")).map_err(|e| e.to_string())?;
        jail.create_file(".arbor/config.toml", "[search]\ndocument_glob = \"*.a\"\n")?;
        jail.set_env("ARBOR_SEARCH__DOCUMENT_GLOB", "*.b");

        let config = ArborConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.search.document_glob, "*.b");
        Ok(())
    });
}
