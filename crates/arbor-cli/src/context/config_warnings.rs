/// Warn about `ARBOR_*` variables that figment will not map onto a section.
pub fn warn_misnamed_env() {
    for warning in collect_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    env.into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("ARBOR_") && key != "ARBOR_LOG" && !key.contains("__"))
        .map(|key| {
            format!(
                "{key} is ignored. Use double underscores between section and field (example: ARBOR_STORAGE__DATA_DIR)."
            )
        })
        .collect()
}
