//! Compute allocation requested from the target resource manager.
//!
//! The engine forwards these values unmodified. Defaults describe a small
//! local run: 10 minutes on one core, no GPUs, default queue.

use serde::{Deserialize, Deserializer, Serialize};

/// The resource description forwarded to the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDescription {
  /// Target system identifier.
  pub resource: String,
  /// Allocation identifier billed for the run.
  pub project: String,
  /// Scheduler queue. `None` lets the engine pick its default queue.
  #[serde(deserialize_with = "empty_as_none")]
  pub queue: Option<String>,
  pub access_schema: String,
  /// Total running time in minutes.
  pub walltime: u32,
  pub cpus: u32,
  pub gpus: u32,
}

impl Default for ResourceDescription {
  fn default() -> Self {
    Self {
      resource: String::new(),
      project: String::new(),
      queue: None,
      access_schema: "local".to_string(),
      walltime: 10,
      cpus: 1,
      gpus: 0,
    }
  }
}

impl ResourceDescription {
  /// Apply every field set in `overrides` on top of this description.
  pub fn merge(mut self, overrides: ResourceOverrides) -> Self {
    if let Some(resource) = overrides.resource {
      self.resource = resource;
    }
    if let Some(project) = overrides.project {
      self.project = project;
    }
    if let Some(queue) = overrides.queue {
      self.queue = if queue.is_empty() { None } else { Some(queue) };
    }
    if let Some(access_schema) = overrides.access_schema {
      self.access_schema = access_schema;
    }
    if let Some(walltime) = overrides.walltime {
      self.walltime = walltime;
    }
    if let Some(cpus) = overrides.cpus {
      self.cpus = cpus;
    }
    if let Some(gpus) = overrides.gpus {
      self.gpus = gpus;
    }
    self
  }
}

/// A partial resource description. Unset fields keep the value underneath.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceOverrides {
  pub resource: Option<String>,
  pub project: Option<String>,
  /// An empty string clears the queue back to the engine default.
  pub queue: Option<String>,
  pub access_schema: Option<String>,
  pub walltime: Option<u32>,
  pub cpus: Option<u32>,
  pub gpus: Option<u32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_defaults() {
    let desc = ResourceDescription::default();

    assert_eq!(desc.access_schema, "local");
    assert_eq!(desc.walltime, 10);
    assert_eq!(desc.cpus, 1);
    assert_eq!(desc.gpus, 0);
    assert_eq!(desc.queue, None);
  }

  #[test]
  fn test_empty_queue_reads_as_default() {
    let desc: ResourceDescription = serde_json::from_value(json!({
      "resource": "ornl.summit",
      "queue": "",
      "walltime": 30
    }))
    .unwrap();

    assert_eq!(desc.resource, "ornl.summit");
    assert_eq!(desc.queue, None);
    assert_eq!(desc.walltime, 30);
    assert_eq!(desc.cpus, 1);
  }

  #[test]
  fn test_unset_queue_serializes_as_null() {
    let value = serde_json::to_value(ResourceDescription::default()).unwrap();
    assert!(value["queue"].is_null());
  }

  #[test]
  fn test_negative_counts_rejected() {
    let result = serde_json::from_value::<ResourceDescription>(json!({ "cpus": -1 }));
    assert!(result.is_err());
  }

  #[test]
  fn test_merge_overrides_only_set_fields() {
    let base = ResourceDescription {
      queue: Some("batch".to_string()),
      ..Default::default()
    };
    let merged = base.merge(ResourceOverrides {
      project: Some("MAT201".to_string()),
      gpus: Some(6),
      ..Default::default()
    });

    assert_eq!(merged.project, "MAT201");
    assert_eq!(merged.gpus, 6);
    assert_eq!(merged.queue.as_deref(), Some("batch"));
    assert_eq!(merged.walltime, 10);
  }

  #[test]
  fn test_merge_empty_queue_clears() {
    let base = ResourceDescription {
      queue: Some("batch".to_string()),
      ..Default::default()
    };
    let merged = base.merge(ResourceOverrides {
      queue: Some(String::new()),
      ..Default::default()
    });

    assert_eq!(merged.queue, None);
  }

  #[test]
  fn test_overrides_reject_unknown_keys() {
    let result = serde_json::from_value::<ResourceOverrides>(json!({ "wall_time": 5 }));
    assert!(result.is_err());
  }
}
