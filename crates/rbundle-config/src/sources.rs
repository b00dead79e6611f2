use std::collections::BTreeMap;

use rbundle_utils::types::ConfigSource;

use super::Config;

/// Keys that carry source attribution.
pub(crate) const TRACKED_KEYS: &[&str] = &[
    "days",
    "limit",
    "research_dir",
    "out",
    "ext",
    "verbose",
    "selectors_exclude",
];

impl Config {
    /// Where the effective value of `key` came from.
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .cloned()
            .unwrap_or(ConfigSource::Default)
    }

    /// Effective configuration as key -> (value, source), sorted by key.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut config = BTreeMap::new();

        let mut add = |key: &str, value: String| {
            config.insert(key.to_string(), (value, self.source_of(key).to_string()));
        };

        add("days", self.days.to_string());
        add("limit", self.limit.to_string());
        add("research_dir", self.research_dir.clone());
        add("out", self.out.clone());
        add("ext", self.ext.clone());
        add("verbose", self.verbose.to_string());
        add("selectors_exclude", self.selectors.exclude.join(", "));

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_reports_default_sources() {
        let config = Config::default();
        let effective = config.effective_config();

        assert_eq!(effective.len(), TRACKED_KEYS.len());
        assert_eq!(
            effective.get("days"),
            Some(&("365".to_string(), "default".to_string()))
        );
        assert_eq!(
            effective.get("ext"),
            Some(&("md,mdx".to_string(), "default".to_string()))
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_default_source() {
        let config = Config::default();
        assert_eq!(config.source_of("not_a_key"), ConfigSource::Default);
    }
}
