//! Named rule sets and the registry that resolves them by region.

use crate::error::EqvError;
use crate::rule::Rule;
use crate::rules;
use eqv_ast::NodeSeq;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Collects rules before freezing them into a [`RuleSet`].
///
/// Registration order is meaningful: rules sharing a priority are tried
/// in the order they were pushed.
#[derive(Default)]
pub struct RuleSetBuilder {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn build(mut self, name: &str) -> RuleSet {
        // Stable sort keeps registration order within a priority tier.
        self.rules.sort_by_key(|r| std::cmp::Reverse(r.priority()));
        RuleSet {
            name: name.to_string(),
            rules: self.rules,
        }
    }
}

/// An immutable, priority-ordered collection of rewrite rules.
pub struct RuleSet {
    name: String,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The highest-priority rule whose `matches` accepts `seq`.
    pub fn first_match(&self, seq: &NodeSeq) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .map(|r| r.as_ref())
            .find(|r| r.matches(seq))
    }
}

/// Maps region identifiers to their rule sets.
pub struct RuleSetRegistry {
    sets: FxHashMap<String, Arc<RuleSet>>,
}

pub const DEFAULT_REGION: &str = "default";

impl RuleSetRegistry {
    pub fn new() -> Self {
        Self {
            sets: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, region: &str, set: RuleSet) {
        self.sets.insert(region.to_string(), Arc::new(set));
    }

    /// Looks up the rule set for `region`, falling back to the default
    /// set when no region is requested. An unknown region is an error,
    /// not a silent fallback.
    pub fn resolve(&self, region: Option<&str>) -> Result<Arc<RuleSet>, EqvError> {
        let key = region.unwrap_or(DEFAULT_REGION);
        self.sets
            .get(key)
            .cloned()
            .ok_or_else(|| EqvError::UnknownRegion(key.to_string()))
    }
}

impl Default for RuleSetRegistry {
    /// Registry with the built-in rule sets: "default" and "east".
    fn default() -> Self {
        let mut registry = Self::new();

        let mut default_set = RuleSetBuilder::new();
        rules::algebraic::register(&mut default_set);
        rules::trigonometric::register(&mut default_set);
        registry.insert(DEFAULT_REGION, default_set.build(DEFAULT_REGION));

        let mut east = RuleSetBuilder::new();
        rules::algebraic::register(&mut east);
        rules::trigonometric::register_east(&mut east);
        registry.insert("east", east.build("east"));

        registry
    }
}
