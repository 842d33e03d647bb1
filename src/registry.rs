//! Criterion registry and parameter-schema aggregation
//!
//! Process-wide store of stopping criteria keyed by name. Criteria are
//! registered once and live for the life of the process; there is no
//! unregister operation, so handles stay valid for as long as the registry
//! does.

use crate::criteria::criterion::StoppingCriterion;
use crate::criteria::entropy::EntropyCriterion;
use crate::criteria::stdrel::StdrelCriterion;
use crate::criteria::types::ParamsDescription;
use crate::errors::{CriterionError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use tracing::{debug, trace};

static GLOBAL: OnceLock<CriterionRegistry> = OnceLock::new();

/// Registry of stopping criteria, keyed by criterion name
///
/// `new` builds an isolated registry (useful for tests and embedders);
/// [`CriterionRegistry::global`] is the process-wide instance the benchmark
/// harness consults.
pub struct CriterionRegistry {
    criteria: RwLock<BTreeMap<String, Arc<dyn StoppingCriterion>>>,
}

impl CriterionRegistry {
    /// Create a registry pre-populated with the built-in criteria
    pub fn new() -> Self {
        let mut criteria: BTreeMap<String, Arc<dyn StoppingCriterion>> = BTreeMap::new();
        let stdrel: Arc<dyn StoppingCriterion> = Arc::new(StdrelCriterion::new());
        criteria.insert(stdrel.name().to_string(), stdrel);
        let entropy: Arc<dyn StoppingCriterion> = Arc::new(EntropyCriterion::new());
        criteria.insert(entropy.name().to_string(), entropy);
        Self {
            criteria: RwLock::new(criteria),
        }
    }

    /// Process-wide instance, constructed on first access
    ///
    /// First-call construction is race-free; every caller observes the same
    /// fully-initialized instance with both built-ins registered.
    pub fn global() -> &'static CriterionRegistry {
        GLOBAL.get_or_init(CriterionRegistry::new)
    }

    /// Look up a criterion by exact name
    ///
    /// No case-folding, trimming, or aliasing. The returned handle stays
    /// valid for the registry's lifetime.
    pub fn get_criterion(&self, name: &str) -> Result<Arc<dyn StoppingCriterion>> {
        trace!(criterion = name, "stopping-criterion lookup");
        let criteria = self.criteria.read().unwrap();
        criteria
            .get(name)
            .cloned()
            .ok_or_else(|| CriterionError::NotFound {
                name: name.to_string(),
            })
    }

    /// Register a criterion under its own name
    ///
    /// Fails when the name is already taken; the incumbent is left untouched
    /// and the rejected criterion is not stored.
    pub fn add(&self, criterion: Arc<dyn StoppingCriterion>) -> Result<Arc<dyn StoppingCriterion>> {
        let name = criterion.name().to_string();
        let mut criteria = self.criteria.write().unwrap();
        if criteria.contains_key(&name) {
            return Err(CriterionError::DuplicateName { name });
        }
        debug!(criterion = %name, "registered stopping criterion");
        criteria.insert(name, Arc::clone(&criterion));
        Ok(criterion)
    }

    /// Names of all registered criteria, in iteration order
    pub fn criterion_names(&self) -> Vec<String> {
        self.criteria.read().unwrap().keys().cloned().collect()
    }

    /// Number of registered criteria
    pub fn len(&self) -> usize {
        self.criteria.read().unwrap().len()
    }

    /// Whether no criteria are registered
    pub fn is_empty(&self) -> bool {
        self.criteria.read().unwrap().is_empty()
    }

    /// Merge every criterion's declared parameters into one schema
    ///
    /// Entries appear per criterion in registry iteration order, each
    /// criterion's parameters in declaration order. A parameter name
    /// reappearing with a different type fails the whole aggregation; a
    /// repeat with the same type is kept as-is rather than collapsed.
    pub fn get_params_description(&self) -> Result<ParamsDescription> {
        let criteria = self.criteria.read().unwrap();
        let mut desc = ParamsDescription::new();
        for (criterion_name, criterion) in criteria.iter() {
            for param in criterion.params_description() {
                if let Some(existing) = desc
                    .iter()
                    .find(|d| d.name == param.name && d.ty != param.ty)
                {
                    return Err(CriterionError::ParameterTypeConflict {
                        criterion: criterion_name.clone(),
                        param: param.name.clone(),
                        existing: existing.ty,
                        requested: param.ty,
                    });
                }
                desc.push(param);
            }
        }
        Ok(desc)
    }
}

impl Default for CriterionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CriterionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriterionRegistry")
            .field("criteria", &self.criterion_names())
            .finish()
    }
}
