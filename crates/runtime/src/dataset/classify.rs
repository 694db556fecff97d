use crate::config::TypeClassConfig;
use std::collections::HashMap;
use typescope_core::Result;
use typescope_java::naming::is_primitive;

/// Buckets canonical type names into configured groups.
///
/// Precedence: exact name, then the longest matching prefix, then the array
/// group for array references, then the primitive group, then the unknown
/// group. Unresolved references always land in the unknown group.
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    config: TypeClassConfig,
    exact: HashMap<String, usize>,
    /// (prefix, group index), longest first.
    prefixes: Vec<(String, usize)>,
}

impl TypeClassifier {
    pub fn new(config: TypeClassConfig) -> Result<Self> {
        config.validate()?;

        let mut exact = HashMap::new();
        let mut prefixes = Vec::new();
        for (index, group) in config.groups.iter().enumerate() {
            for name in &group.types {
                exact.entry(name.clone()).or_insert(index);
            }
            prefixes.extend(group.prefixes.iter().map(|p| (p.clone(), index)));
        }
        // Stable: on equal length the earlier group keeps precedence.
        prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Ok(Self {
            config,
            exact,
            prefixes,
        })
    }

    pub fn config(&self) -> &TypeClassConfig {
        &self.config
    }

    /// `canonical` is `None` for an unresolved reference.
    pub fn classify(&self, canonical: Option<&str>, is_array: bool) -> &str {
        let Some(canonical) = canonical else {
            return &self.config.unknown_group;
        };
        if let Some(index) = self.exact.get(canonical) {
            return &self.config.groups[*index].name;
        }
        if let Some((_, index)) = self
            .prefixes
            .iter()
            .find(|(prefix, _)| canonical.starts_with(prefix.as_str()))
        {
            return &self.config.groups[*index].name;
        }
        if is_array {
            &self.config.array_group
        } else if is_primitive(canonical) {
            &self.config.primitive_group
        } else {
            &self.config.unknown_group
        }
    }

    /// Every group name a record can land in, configured groups first.
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.config.groups.iter().map(|g| g.name.as_str()).collect();
        for fallback in [
            &self.config.array_group,
            &self.config.primitive_group,
            &self.config.unknown_group,
        ] {
            if !names.contains(&fallback.as_str()) {
                names.push(fallback);
            }
        }
        names
    }
}
