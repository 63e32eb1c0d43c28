use crate::parallel::ParallelMode;
use serde::Serialize;
use serde_json::{Value, json};

/// Settings given explicitly on the command line
///
/// Only fields that are `Some` take part in the merge, so an omitted flag
/// never shadows a value from a lower layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    pub max_lines: Option<usize>,
    pub exceptions_file: Option<String>,
    pub docs_dir: Option<String>,
    pub allowed_root_docs: Option<Vec<String>>,
    pub mode: Option<ParallelMode>,
}

impl CliOverrides {
    /// Nested configuration value holding only the flags that were given
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "rules": {
                "file_size": {
                    "max_lines": self.max_lines,
                    "exceptions_file": self.exceptions_file,
                },
                "doc_location": {
                    "docs_dir": self.docs_dir,
                    "allowed_root_docs": self.allowed_root_docs,
                },
            },
            "parallel": {
                "mode": self.mode,
            },
        });
        prune_unset(&mut value);
        value
    }
}

/// Drop nulls, then any objects left empty
fn prune_unset(value: &mut Value) {
    if let Value::Object(map) = value {
        for nested in map.values_mut() {
            prune_unset(nested);
        }
        map.retain(|_, v| match v {
            Value::Null => false,
            Value::Object(nested) => !nested.is_empty(),
            _ => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides() {
        assert_eq!(CliOverrides::default().to_value(), json!({}));
    }

    #[test]
    fn test_only_given_flags_present() {
        let overrides = CliOverrides {
            max_lines: Some(800),
            mode: Some(ParallelMode::Sequential),
            ..CliOverrides::default()
        };

        assert_eq!(
            overrides.to_value(),
            json!({
                "rules": { "file_size": { "max_lines": 800 } },
                "parallel": { "mode": "sequential" },
            })
        );
    }

    #[test]
    fn test_empty_allowlist_is_kept() {
        let overrides = CliOverrides {
            allowed_root_docs: Some(Vec::new()),
            ..CliOverrides::default()
        };

        assert_eq!(
            overrides.to_value(),
            json!({ "rules": { "doc_location": { "allowed_root_docs": [] } } })
        );
    }
}
