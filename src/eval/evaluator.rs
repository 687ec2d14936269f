use log::warn;

use crate::errors::ErrorKind;
use crate::model::toggle::Snapshot;
use crate::strategy::StrategyRegistry;

/// Decides whether the toggle identified by `name` is enabled in the given snapshot.
///
/// A toggle whose own `enabled` flag is `false` is disabled without consulting
/// its bindings. A toggle with no bindings follows its own flag. Otherwise the
/// bindings are evaluated in their defined order with OR semantics, stopping
/// at the first binding that evaluates to `true`.
pub fn eval(snapshot: &Snapshot, registry: &StrategyRegistry, name: &str, default: bool) -> bool {
    let Some(toggle) = snapshot.get(name) else {
        warn!(event_id = ErrorKind::ToggleNotFound.as_u8(); "Toggle '{name}' was not found in the current snapshot. Returning the `default` parameter that you specified in your application: '{default}'.");
        return default;
    };
    if !toggle.enabled {
        return false;
    }
    if toggle.strategies.is_empty() {
        return true;
    }
    toggle
        .strategies
        .iter()
        .any(|binding| registry.resolve(&binding.name).evaluate(&binding.parameters))
}

#[cfg(test)]
mod evaluator_tests {
    use super::eval;
    use crate::model::toggle::snapshot_from_json;
    use crate::strategy::{Strategy, StrategyRegistry};
    use std::collections::HashMap;

    struct ParamEqStrategy {}

    impl Strategy for ParamEqStrategy {
        fn name(&self) -> &str {
            "paramEq"
        }

        fn evaluate(&self, parameters: &HashMap<String, String>) -> bool {
            parameters.get("expected") == parameters.get("actual")
        }
    }

    #[test]
    fn missing_toggle_returns_default() {
        let snapshot = snapshot_from_json(r#"{"features": []}"#).unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(eval(&snapshot, &registry, "missing", true));
        assert!(!eval(&snapshot, &registry, "missing", false));
    }

    #[test]
    fn disabled_toggle_skips_bindings() {
        let snapshot = snapshot_from_json(
            r#"{"features": [{"name": "t", "enabled": false, "strategies": [{"name": "default"}]}]}"#,
        )
        .unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(!eval(&snapshot, &registry, "t", true));
    }

    #[test]
    fn enabled_toggle_without_bindings() {
        let snapshot =
            snapshot_from_json(r#"{"features": [{"name": "t", "enabled": true}]}"#).unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(eval(&snapshot, &registry, "t", false));
    }

    #[test]
    fn bindings_are_or_connected() {
        let snapshot = snapshot_from_json(
            r#"{"features": [{"name": "t", "enabled": true, "strategies": [
                {"name": "paramEq", "parameters": {"expected": "a", "actual": "b"}},
                {"name": "paramEq", "parameters": {"expected": "a", "actual": "a"}}
            ]}]}"#,
        )
        .unwrap();
        let registry = StrategyRegistry::new(vec![Box::new(ParamEqStrategy {})]);

        assert!(eval(&snapshot, &registry, "t", false));
    }

    #[test]
    fn all_bindings_false() {
        let snapshot = snapshot_from_json(
            r#"{"features": [{"name": "t", "enabled": true, "strategies": [
                {"name": "paramEq", "parameters": {"expected": "a", "actual": "b"}},
                {"name": "paramEq", "parameters": {"expected": "x", "actual": "y"}}
            ]}]}"#,
        )
        .unwrap();
        let registry = StrategyRegistry::new(vec![Box::new(ParamEqStrategy {})]);

        assert!(!eval(&snapshot, &registry, "t", true));
    }

    #[test]
    fn unknown_strategy_contributes_false() {
        let snapshot = snapshot_from_json(
            r#"{"features": [{"name": "t", "enabled": true, "strategies": [{"name": "gradualRollout"}]}]}"#,
        )
        .unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(!eval(&snapshot, &registry, "t", true));
    }

    #[test]
    fn unknown_strategy_does_not_block_later_bindings() {
        let snapshot = snapshot_from_json(
            r#"{"features": [{"name": "t", "enabled": true, "strategies": [
                {"name": "gradualRollout"},
                {"name": "default"}
            ]}]}"#,
        )
        .unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(eval(&snapshot, &registry, "t", false));
    }

    #[test]
    fn empty_snapshot_returns_default() {
        let snapshot = snapshot_from_json("{}").unwrap();
        let registry = StrategyRegistry::new(vec![]);

        assert!(eval(&snapshot, &registry, "anything", true));
        assert!(!eval(&snapshot, &registry, "anything", false));
    }
}
