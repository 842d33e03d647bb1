//! Registry integration tests
//!
//! Drives the public API end to end: singleton access, registration,
//! lookup, schema aggregation, and the built-in criteria.

use quickcheck_macros::quickcheck;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use stopgate::{
    CriterionError, CriterionParams, CriterionRegistry, ParamSpec, ParamType, ParamsDescription,
    Result, StoppingCriterion,
};

/// Stub criterion with a configurable name and schema
#[derive(Debug)]
struct StubCriterion {
    name: String,
    params: ParamsDescription,
}

impl StubCriterion {
    fn new(name: impl Into<String>, params: ParamsDescription) -> Arc<dyn StoppingCriterion> {
        Arc::new(Self {
            name: name.into(),
            params,
        })
    }
}

impl StoppingCriterion for StubCriterion {
    fn name(&self) -> &str {
        &self.name
    }

    fn params_description(&self) -> ParamsDescription {
        self.params.clone()
    }

    fn initialize(&self, _params: &CriterionParams) -> Result<()> {
        Ok(())
    }

    fn add_measurement(&self, _measurement: f64) {}

    fn is_finished(&self) -> bool {
        true
    }
}

#[test]
fn test_global_singleton_identity_across_threads() {
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(thread::spawn(|| {
            CriterionRegistry::global() as *const CriterionRegistry as usize
        }));
    }

    let local = CriterionRegistry::global() as *const CriterionRegistry as usize;
    for handle in handles {
        assert_eq!(handle.join().unwrap(), local);
    }
}

#[test]
fn test_builtins_available_without_explicit_registration() {
    let registry = CriterionRegistry::global();
    assert!(registry.get_criterion("stdrel").is_ok());
    assert!(registry.get_criterion("entropy").is_ok());
    assert!(registry.len() >= 2);
}

#[test]
fn test_registration_scenario() {
    let registry = CriterionRegistry::new();
    let max_noise = StubCriterion::new(
        "max-noise",
        vec![
            ParamSpec::new("threshold", ParamType::Float64),
            ParamSpec::new("window", ParamType::Int64),
        ],
    );
    let registered = registry.add(Arc::clone(&max_noise)).unwrap();
    assert!(Arc::ptr_eq(&registered, &max_noise));

    // Lookup hits the registered criterion, misses fail with NotFound.
    let found = registry.get_criterion("max-noise").unwrap();
    assert!(Arc::ptr_eq(&found, &max_noise));
    assert_eq!(
        registry.get_criterion("bogus").unwrap_err(),
        CriterionError::NotFound {
            name: "bogus".to_string(),
        }
    );

    // Aggregated schema carries the new declarations.
    let desc = registry.get_params_description().unwrap();
    assert!(desc.contains(&ParamSpec::new("threshold", ParamType::Float64)));
    assert!(desc.contains(&ParamSpec::new("window", ParamType::Int64)));

    // Re-registering the name fails and leaves the incumbent untouched.
    let err = registry
        .add(StubCriterion::new("max-noise", Vec::new()))
        .unwrap_err();
    assert_eq!(
        err,
        CriterionError::DuplicateName {
            name: "max-noise".to_string(),
        }
    );
    let still = registry.get_criterion("max-noise").unwrap();
    assert!(Arc::ptr_eq(&still, &max_noise));
    assert_eq!(still.params_description().len(), 2);
}

#[test]
fn test_schema_conflict_detected_across_criteria() {
    let registry = CriterionRegistry::new();
    registry
        .add(StubCriterion::new(
            "crit-a",
            vec![ParamSpec::new("window", ParamType::Float64)],
        ))
        .unwrap();
    registry
        .add(StubCriterion::new(
            "crit-b",
            vec![ParamSpec::new("window", ParamType::Int64)],
        ))
        .unwrap();

    match registry.get_params_description().unwrap_err() {
        CriterionError::ParameterTypeConflict { param, .. } => assert_eq!(param, "window"),
        other => panic!("expected ParameterTypeConflict, got {other:?}"),
    }
}

#[test]
fn test_schema_same_type_no_conflict() {
    let registry = CriterionRegistry::new();
    registry
        .add(StubCriterion::new(
            "crit-a",
            vec![ParamSpec::new("window", ParamType::Float64)],
        ))
        .unwrap();
    registry
        .add(StubCriterion::new(
            "crit-c",
            vec![ParamSpec::new("window", ParamType::Float64)],
        ))
        .unwrap();

    assert!(registry.get_params_description().is_ok());
}

#[test]
fn test_schema_covers_every_declared_parameter() {
    let registry = CriterionRegistry::new();
    registry
        .add(StubCriterion::new(
            "custom",
            vec![ParamSpec::new("burn-in", ParamType::Int64)],
        ))
        .unwrap();

    let desc = registry.get_params_description().unwrap();
    for name in ["max-noise", "min-time", "max-angle", "min-r2", "burn-in"] {
        assert!(
            desc.iter().any(|d| d.name == name),
            "aggregated schema missing {name}"
        );
    }
}

#[test]
fn test_aggregated_schema_serializes() {
    let registry = CriterionRegistry::new();
    let desc = registry.get_params_description().unwrap();

    let json = serde_json::to_string(&desc).unwrap();
    let back: ParamsDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back, desc);
}

#[test]
fn test_stdrel_run_through_registry() {
    let registry = CriterionRegistry::new();
    let criterion = registry.get_criterion("stdrel").unwrap();

    let mut params = CriterionParams::new();
    params.insert("min-time", 0.2f64);
    criterion.initialize(&params).unwrap();

    // Steady 50ms samples: converged once 0.2s of sample time accumulates.
    let mut iterations = 0;
    while !criterion.is_finished() {
        criterion.add_measurement(0.05);
        iterations += 1;
        assert!(iterations < 100, "stdrel failed to converge");
    }
    assert_eq!(iterations, 4);
}

#[test]
fn test_entropy_run_through_registry() {
    let registry = CriterionRegistry::new();
    let criterion = registry.get_criterion("entropy").unwrap();
    criterion.initialize(&CriterionParams::new()).unwrap();

    let mut iterations = 0;
    while !criterion.is_finished() {
        criterion.add_measurement(0.05);
        iterations += 1;
        assert!(iterations < 100, "entropy failed to converge");
    }
}

#[quickcheck]
fn prop_registration_unique_and_retrievable(names: Vec<String>) -> bool {
    let registry = CriterionRegistry::new();
    let mut taken: HashSet<String> = registry.criterion_names().into_iter().collect();

    for name in names {
        let outcome = registry.add(StubCriterion::new(name.clone(), Vec::new()));
        if taken.contains(&name) {
            if !matches!(outcome, Err(CriterionError::DuplicateName { .. })) {
                return false;
            }
        } else {
            if outcome.is_err() {
                return false;
            }
            taken.insert(name);
        }
    }

    // Every accepted name resolves; the registry holds nothing else.
    taken.iter().all(|name| registry.get_criterion(name).is_ok())
        && registry.len() == taken.len()
}
