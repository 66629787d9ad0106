//! Construction gate over declared model dependencies.
//!
//! Dependencies are matched by bare model name in any scope. The gate is a
//! pure query consulted once per registration attempt.

use crate::registry::scope_registry::ScopeRegistry;

/// Returns the declared dependencies with no registered model, in declared order.
pub fn missing_dependencies(models: &ScopeRegistry, uses: &[String]) -> Vec<String> {
    uses.iter()
        .filter(|name| !models.contains_name(name))
        .cloned()
        .collect()
}

/// True when every declared dependency is registered.
pub fn can_construct(models: &ScopeRegistry, uses: &[String]) -> bool {
    uses.iter().all(|name| models.contains_name(name))
}
