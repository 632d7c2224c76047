//! Deep merge of TOML layers.
//!
//! Layers merge as raw [`toml::Value`] trees rather than deserialized
//! structs, so a key missing from an upper layer never resets the value
//! set below it.

use std::collections::HashMap;

/// Which layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults.
    Defaults,
    /// The user's config file.
    User,
    /// A file named explicitly by the caller.
    Explicit,
    /// An environment variable.
    Environment,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::User => write!(f, "user config"),
            Self::Explicit => write!(f, "explicit config file"),
            Self::Environment => write!(f, "environment variable"),
        }
    }
}

/// Dotted field path to the layer that last set it.
pub type FieldSources = HashMap<String, ConfigLayer>;

/// Deep-merge `overlay` into `base`, recording the layer of every leaf the
/// overlay sets.
///
/// Tables merge per key. Scalars and arrays replace.
pub fn deep_merge(
    base: &mut toml::Value,
    overlay: &toml::Value,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    merge_at(base, overlay, "", layer, sources);
}

fn merge_at(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join(prefix, key);
                match base_table.get_mut(key) {
                    Some(base_val) => merge_at(base_val, overlay_val, &path, layer, sources),
                    None => {
                        base_table.insert(key.clone(), overlay_val.clone());
                        record_leaves(overlay_val, &path, layer, sources);
                    },
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            record_leaves(overlay, prefix, layer, sources);
        },
    }
}

/// Record every leaf under `value` as set by `layer`.
pub fn record_leaves(
    value: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = value {
        for (key, child) in table {
            record_leaves(child, &join(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer.clone());
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_tables_merge_scalars_replace() {
        let mut base = parse(
            r#"
            [store]
            prefix = "flutter."
            vessel_key = "vesselData"

            [logging]
            directives = ["a=debug", "b=trace"]
            "#,
        );
        let overlay = parse(
            r#"
            [store]
            vessel_key = "boat"

            [logging]
            directives = ["c=warn"]
            "#,
        );

        let mut sources = FieldSources::new();
        deep_merge(&mut base, &overlay, &ConfigLayer::User, &mut sources);

        assert_eq!(base["store"]["prefix"].as_str(), Some("flutter."));
        assert_eq!(base["store"]["vessel_key"].as_str(), Some("boat"));
        assert_eq!(base["logging"]["directives"].as_array().unwrap().len(), 1);

        assert_eq!(sources.get("store.vessel_key"), Some(&ConfigLayer::User));
        assert_eq!(sources.get("logging.directives"), Some(&ConfigLayer::User));
        assert!(!sources.contains_key("store.prefix"));
    }

    #[test]
    fn test_new_tables_are_recorded_leaf_by_leaf() {
        let mut base = parse("[store]\nprefix = \"\"");
        let overlay = parse("[commands.vessel]\nchannel = \"c\"\nmethod = \"m\"");

        let mut sources = FieldSources::new();
        deep_merge(&mut base, &overlay, &ConfigLayer::Explicit, &mut sources);

        assert_eq!(base["commands"]["vessel"]["method"].as_str(), Some("m"));
        assert_eq!(
            sources.get("commands.vessel.channel"),
            Some(&ConfigLayer::Explicit)
        );
        assert_eq!(
            sources.get("commands.vessel.method"),
            Some(&ConfigLayer::Explicit)
        );
    }

    #[test]
    fn test_scalar_replaced_by_table() {
        let mut base = parse("store = \"oops\"");
        let overlay = parse("[store]\nprefix = \"p.\"");

        let mut sources = FieldSources::new();
        deep_merge(&mut base, &overlay, &ConfigLayer::User, &mut sources);

        assert_eq!(base["store"]["prefix"].as_str(), Some("p."));
        assert_eq!(sources.get("store.prefix"), Some(&ConfigLayer::User));
    }

    #[test]
    fn test_record_leaves() {
        let value = parse("[logging]\nlevel = \"info\"\nformat = \"pretty\"");
        let mut sources = FieldSources::new();
        record_leaves(&value, "", &ConfigLayer::Defaults, &mut sources);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources.get("logging.level"), Some(&ConfigLayer::Defaults));
    }
}
