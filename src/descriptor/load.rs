use super::types::DescriptorSet;
use anyhow::Context;
use std::path::Path;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}

/// Parse a descriptor set from text. `yaml` selects the YAML parser, JSON otherwise.
pub fn parse_descriptor_set(content: &str, yaml: bool) -> anyhow::Result<DescriptorSet> {
    let set = if yaml {
        serde_yaml::from_str(content)?
    } else {
        serde_json::from_str(content)?
    };
    Ok(set)
}

/// Load a descriptor set from a `.yaml`/`.yml` or JSON file.
pub fn load_descriptor_set(path: &Path) -> anyhow::Result<DescriptorSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor set: {}", path.display()))?;
    let set = parse_descriptor_set(&content, is_yaml(path))
        .with_context(|| format!("Failed to parse descriptor set: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        files = set.files.len(),
        "loaded descriptor set"
    );
    Ok(set)
}
