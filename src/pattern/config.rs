//! Configuration schema, typed values, merging and validation
//!
//! A pattern declares its configuration as `key -> ConfigItem`. Users supply
//! an overlay of `key -> ConfigValue`; the merged map is what generation and
//! the ledger see.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GitopsiError, Result};

/// Merged or user-supplied configuration values
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Declared type of a configuration item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    Integer,
    Boolean,
    String,
    List,
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigType::Integer => "integer",
            ConfigType::Boolean => "boolean",
            ConfigType::String => "string",
            ConfigType::List => "list",
        };
        f.write_str(s)
    }
}

/// A declared configuration item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    #[serde(rename = "type")]
    pub kind: ConfigType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ConfigValue>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// A required item must end up with a value after merging
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// A typed configuration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Boolean(bool),
    Integer(i64),
    String(String),
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    pub fn config_type(&self) -> ConfigType {
        match self {
            ConfigValue::Boolean(_) => ConfigType::Boolean,
            ConfigValue::Integer(_) => ConfigType::Integer,
            ConfigValue::String(_) => ConfigType::String,
            ConfigValue::List(_) => ConfigType::List,
        }
    }

    /// Parse a raw command-line string according to the declared type.
    ///
    /// Lists are comma separated; their elements stay strings.
    pub fn parse_as(raw: &str, kind: ConfigType) -> std::result::Result<Self, String> {
        match kind {
            ConfigType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(ConfigValue::Integer)
                .map_err(|_| format!("'{raw}' is not an integer")),
            ConfigType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(ConfigValue::Boolean(true)),
                "false" | "no" | "off" | "0" => Ok(ConfigValue::Boolean(false)),
                _ => Err(format!("'{raw}' is not a boolean")),
            },
            ConfigType::String => Ok(ConfigValue::String(raw.to_string())),
            ConfigType::List => Ok(ConfigValue::List(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| ConfigValue::String(s.to_string()))
                    .collect(),
            )),
        }
    }

    /// Convert to a YAML value for embedding into manifests
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            ConfigValue::Boolean(b) => serde_yaml::Value::Bool(*b),
            ConfigValue::Integer(i) => serde_yaml::Value::Number((*i).into()),
            ConfigValue::String(s) => serde_yaml::Value::String(s.clone()),
            ConfigValue::List(items) => {
                serde_yaml::Value::Sequence(items.iter().map(ConfigValue::to_yaml).collect())
            }
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Boolean(b) => write!(f, "{b}"),
            ConfigValue::Integer(i) => write!(f, "{i}"),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Merge a user overlay over the declared defaults.
///
/// Overlay keys win. Keys the schema does not declare are kept so that
/// validation can reject them.
pub fn merge_config(schema: &BTreeMap<String, ConfigItem>, overlay: &ConfigMap) -> ConfigMap {
    let mut merged: ConfigMap = schema
        .iter()
        .filter_map(|(key, item)| item.default.clone().map(|v| (key.clone(), v)))
        .collect();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Validate merged configuration against the declared schema
pub fn validate_config(
    pattern_name: &str,
    schema: &BTreeMap<String, ConfigItem>,
    merged: &ConfigMap,
) -> Result<()> {
    let mut problems = Vec::new();

    for (key, value) in merged {
        match schema.get(key) {
            None => problems.push(format!("unknown key '{key}'")),
            Some(item) if value.config_type() != item.kind => problems.push(format!(
                "'{key}' expects {} but got {}",
                item.kind,
                value.config_type()
            )),
            Some(_) => {}
        }
    }

    for (key, item) in schema {
        if item.required && !merged.contains_key(key) {
            problems.push(format!("required key '{key}' has no value"));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(GitopsiError::ValidationFailed {
            name: pattern_name.to_string(),
            message: problems.join("; "),
        })
    }
}

/// Parse `key=value` overrides using the schema to pick value types.
///
/// Undeclared keys are kept as strings and left for validation to reject.
pub fn parse_overrides(
    pattern_name: &str,
    schema: &BTreeMap<String, ConfigItem>,
    pairs: &[String],
) -> Result<ConfigMap> {
    let mut overlay = ConfigMap::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| GitopsiError::ValidationFailed {
                name: pattern_name.to_string(),
                message: format!("expected key=value, got '{pair}'"),
            })?;
        let key = key.trim();
        let value = match schema.get(key) {
            Some(item) => ConfigValue::parse_as(raw, item.kind).map_err(|reason| {
                GitopsiError::ValidationFailed {
                    name: pattern_name.to_string(),
                    message: format!("'{key}': {reason}"),
                }
            })?,
            None => ConfigValue::String(raw.to_string()),
        };
        overlay.insert(key.to_string(), value);
    }
    Ok(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> BTreeMap<String, ConfigItem> {
        let mut schema = BTreeMap::new();
        schema.insert(
            "replicas".to_string(),
            ConfigItem {
                kind: ConfigType::Integer,
                default: Some(ConfigValue::Integer(1)),
                description: String::new(),
                required: false,
            },
        );
        schema.insert(
            "domain".to_string(),
            ConfigItem {
                kind: ConfigType::String,
                default: None,
                description: "Ingress domain".to_string(),
                required: true,
            },
        );
        schema.insert(
            "ha".to_string(),
            ConfigItem {
                kind: ConfigType::Boolean,
                default: Some(ConfigValue::Boolean(false)),
                description: String::new(),
                required: false,
            },
        );
        schema
    }

    #[test]
    fn test_merge_overlay_wins_over_defaults() {
        let mut overlay = ConfigMap::new();
        overlay.insert("replicas".to_string(), ConfigValue::Integer(3));
        let merged = merge_config(&schema(), &overlay);
        assert_eq!(merged["replicas"], ConfigValue::Integer(3));
        assert_eq!(merged["ha"], ConfigValue::Boolean(false));
        assert!(!merged.contains_key("domain"));
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let mut overlay = ConfigMap::new();
        overlay.insert(
            "replicas".to_string(),
            ConfigValue::String("three".to_string()),
        );
        overlay.insert("colour".to_string(), ConfigValue::String("blue".to_string()));
        let merged = merge_config(&schema(), &overlay);

        let err = validate_config("app", &schema(), &merged).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unknown key 'colour'"));
        assert!(message.contains("'replicas' expects integer but got string"));
        assert!(message.contains("required key 'domain'"));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let mut overlay = ConfigMap::new();
        overlay.insert(
            "domain".to_string(),
            ConfigValue::String("example.com".to_string()),
        );
        let merged = merge_config(&schema(), &overlay);
        assert!(validate_config("app", &schema(), &merged).is_ok());
    }

    #[test]
    fn test_parse_overrides_uses_declared_types() {
        let pairs = vec![
            "replicas=5".to_string(),
            "ha=yes".to_string(),
            "domain=a=b".to_string(),
        ];
        let overlay = parse_overrides("app", &schema(), &pairs).unwrap();
        assert_eq!(overlay["replicas"], ConfigValue::Integer(5));
        assert_eq!(overlay["ha"], ConfigValue::Boolean(true));
        assert_eq!(overlay["domain"], ConfigValue::String("a=b".to_string()));
    }

    #[test]
    fn test_parse_overrides_rejects_bad_values() {
        assert!(parse_overrides("app", &schema(), &["replicas=many".to_string()]).is_err());
        assert!(parse_overrides("app", &schema(), &["replicas".to_string()]).is_err());
    }

    #[test]
    fn test_parse_list_value() {
        let value = ConfigValue::parse_as("a, b,,c", ConfigType::List).unwrap();
        assert_eq!(value.to_string(), "[a, b, c]");
    }

    #[test]
    fn test_untagged_yaml_values_keep_their_types() {
        let map: ConfigMap =
            serde_yaml::from_str("count: 2\nflag: true\nname: '2'\nitems: [x, 1]\n").unwrap();
        assert_eq!(map["count"], ConfigValue::Integer(2));
        assert_eq!(map["flag"], ConfigValue::Boolean(true));
        assert_eq!(map["name"], ConfigValue::String("2".to_string()));
        assert_eq!(
            map["items"],
            ConfigValue::List(vec![
                ConfigValue::String("x".to_string()),
                ConfigValue::Integer(1)
            ])
        );
    }
}
