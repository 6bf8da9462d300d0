use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A reservation time slot and the upstream identifier that prices it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Time of day in `"HH:MM:SS"` format, local to the branch.
    pub time: String,
    /// Upstream-defined numeric identifier for the seating window.
    pub slot_id: i64,
}

/// One restaurant branch and the slots to query for it.
///
/// Slots are an ordered list, not a map: the query order is part of the
/// registry contract and output records follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchConfig {
    pub branch_id: String,
    pub name: String,
    pub slots: Vec<SlotConfig>,
}

/// The full branch registry, loaded once at startup and immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    pub branches: Vec<BranchConfig>,
}

impl Registry {
    /// Looks up a branch by its upstream id.
    #[must_use]
    pub fn branch(&self, branch_id: &str) -> Option<&BranchConfig> {
        self.branches.iter().find(|b| b.branch_id == branch_id)
    }

    /// Total number of (branch, slot) pairs a full run will query.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.branches.iter().map(|b| b.slots.len()).sum()
    }
}

/// Load and validate the branch registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_registry(path: &Path) -> Result<Registry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegistryFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let registry: Registry = serde_yaml::from_str(&content)?;

    validate_registry(&registry)?;

    Ok(registry)
}

fn validate_registry(registry: &Registry) -> Result<(), ConfigError> {
    if registry.branches.is_empty() {
        return Err(ConfigError::Validation(
            "registry must contain at least one branch".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();

    for branch in &registry.branches {
        if branch.branch_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "branch_id must be non-empty".to_string(),
            ));
        }

        if branch.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "branch '{}' must have a non-empty name",
                branch.branch_id
            )));
        }

        if !seen_ids.insert(branch.branch_id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate branch_id: '{}'",
                branch.branch_id
            )));
        }

        if branch.slots.is_empty() {
            return Err(ConfigError::Validation(format!(
                "branch '{}' ({}) has no slots configured",
                branch.name, branch.branch_id
            )));
        }

        let mut seen_times = HashSet::new();
        for slot in &branch.slots {
            if NaiveTime::parse_from_str(&slot.time, "%H:%M:%S").is_err() {
                return Err(ConfigError::Validation(format!(
                    "branch '{}' has malformed slot time '{}'; expected HH:MM:SS",
                    branch.branch_id, slot.time
                )));
            }

            if slot.slot_id < 1 {
                return Err(ConfigError::Validation(format!(
                    "branch '{}' slot '{}' has invalid slot_id {}",
                    branch.branch_id, slot.time, slot.slot_id
                )));
            }

            if !seen_times.insert(slot.time.clone()) {
                return Err(ConfigError::Validation(format!(
                    "branch '{}' lists slot time '{}' twice",
                    branch.branch_id, slot.time
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, slot_id: i64) -> SlotConfig {
        SlotConfig {
            time: time.to_string(),
            slot_id,
        }
    }

    fn branch(branch_id: &str, name: &str, slots: Vec<SlotConfig>) -> BranchConfig {
        BranchConfig {
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            slots,
        }
    }

    #[test]
    fn validate_accepts_valid_registry() {
        let registry = Registry {
            branches: vec![
                branch("14", "Koramangala", vec![slot("12:00:00", 1105)]),
                branch("133", "Indiranagar", vec![slot("12:30:00", 2205)]),
            ],
        };
        assert!(validate_registry(&registry).is_ok());
    }

    #[test]
    fn validate_rejects_empty_registry() {
        let registry = Registry { branches: vec![] };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("at least one branch"));
    }

    #[test]
    fn validate_rejects_duplicate_branch_id() {
        let registry = Registry {
            branches: vec![
                branch("14", "Koramangala", vec![slot("12:00:00", 1105)]),
                branch("14", "Whitefield", vec![slot("12:00:00", 1300)]),
            ],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("duplicate branch_id"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let registry = Registry {
            branches: vec![branch("14", "  ", vec![slot("12:00:00", 1105)])],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("non-empty name"));
    }

    #[test]
    fn validate_rejects_slotless_branch() {
        let registry = Registry {
            branches: vec![branch("14", "Koramangala", vec![])],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("no slots configured"));
    }

    #[test]
    fn validate_rejects_malformed_slot_time() {
        let registry = Registry {
            branches: vec![branch("14", "Koramangala", vec![slot("noon", 1105)])],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("malformed slot time"));
    }

    #[test]
    fn validate_rejects_hh_mm_slot_time() {
        // The upstream API expects seconds; "12:00" must be rejected at load
        // time rather than producing a payload the API silently mishandles.
        let registry = Registry {
            branches: vec![branch("14", "Koramangala", vec![slot("12:00", 1105)])],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("malformed slot time"));
    }

    #[test]
    fn validate_rejects_duplicate_slot_time() {
        let registry = Registry {
            branches: vec![branch(
                "14",
                "Koramangala",
                vec![slot("12:00:00", 1105), slot("12:00:00", 1105)],
            )],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn validate_rejects_nonpositive_slot_id() {
        let registry = Registry {
            branches: vec![branch("14", "Koramangala", vec![slot("12:00:00", 0)])],
        };
        let err = validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("invalid slot_id"));
    }

    #[test]
    fn branch_lookup_finds_configured_branch() {
        let registry = Registry {
            branches: vec![
                branch("14", "Koramangala", vec![slot("12:00:00", 1105)]),
                branch("133", "Indiranagar", vec![slot("12:30:00", 2205)]),
            ],
        };
        assert_eq!(registry.branch("133").map(|b| b.name.as_str()), Some("Indiranagar"));
        assert!(registry.branch("99").is_none());
    }

    #[test]
    fn total_slots_sums_across_branches() {
        let registry = Registry {
            branches: vec![
                branch(
                    "14",
                    "Koramangala",
                    vec![slot("12:00:00", 1105), slot("12:30:00", 1105)],
                ),
                branch("133", "Indiranagar", vec![slot("12:30:00", 2205)]),
            ],
        };
        assert_eq!(registry.total_slots(), 3);
    }

    #[test]
    fn load_registry_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("branches.yaml");
        assert!(
            path.exists(),
            "branches.yaml missing at {path:?} — required for this test"
        );
        let result = load_registry(&path);
        assert!(result.is_ok(), "failed to load branches.yaml: {result:?}");
        let registry = result.unwrap();
        assert!(!registry.branches.is_empty());
        assert!(registry.branches.iter().all(|b| !b.slots.is_empty()));
    }

    #[test]
    fn registry_preserves_file_order() {
        let yaml = r#"
branches:
  - branch_id: "133"
    name: Indiranagar
    slots:
      - { time: "13:00:00", slot_id: 2205 }
      - { time: "12:00:00", slot_id: 2205 }
  - branch_id: "14"
    name: Koramangala
    slots:
      - { time: "12:00:00", slot_id: 1105 }
"#;
        let registry: Registry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(registry.branches[0].branch_id, "133");
        assert_eq!(registry.branches[0].slots[0].time, "13:00:00");
        assert_eq!(registry.branches[1].branch_id, "14");
    }
}
