use log::warn;
use std::collections::HashMap;

use crate::errors::ErrorKind;

/// Name of the built-in strategy that is always registered and evaluates to `true` unconditionally.
pub const DEFAULT_STRATEGY_NAME: &str = "default";

/// An activation strategy decides whether a toggle is active based on the
/// parameters of the binding that references it.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use togglebox::{Client, Strategy};
///
/// struct EnvironmentStrategy {}
///
/// impl Strategy for EnvironmentStrategy {
///     fn name(&self) -> &str {
///         "environment"
///     }
///
///     fn evaluate(&self, parameters: &HashMap<String, String>) -> bool {
///         parameters.get("environments").is_some_and(|envs| {
///             envs.split(',').any(|env| env.trim() == "production")
///         })
///     }
/// }
///
/// let builder = Client::builder("https://my-togglebox-host/api/features")
///     .strategy(Box::new(EnvironmentStrategy {}));
/// ```
pub trait Strategy: Sync + Send {
    /// The name strategy bindings use to select this strategy.
    fn name(&self) -> &str;

    /// Evaluates the strategy against the given binding parameters.
    fn evaluate(&self, parameters: &HashMap<String, String>) -> bool;
}

struct DefaultStrategy {}

impl Strategy for DefaultStrategy {
    fn name(&self) -> &str {
        DEFAULT_STRATEGY_NAME
    }

    fn evaluate(&self, _: &HashMap<String, String>) -> bool {
        true
    }
}

/// Returned for binding names with no registered strategy. Always-false, so an
/// unrecognized strategy contributes "not enabled" instead of failing the evaluation.
struct UnknownStrategy {}

impl Strategy for UnknownStrategy {
    fn name(&self) -> &str {
        "unknown"
    }

    fn evaluate(&self, _: &HashMap<String, String>) -> bool {
        false
    }
}

pub struct StrategyRegistry {
    strategies: Vec<Box<dyn Strategy>>,
    unknown: UnknownStrategy,
}

impl StrategyRegistry {
    /// Registers the built-in default strategy followed by the given custom
    /// strategies. Duplicate names are not rejected, resolution returns the
    /// first-registered match.
    pub fn new(custom: Vec<Box<dyn Strategy>>) -> Self {
        let mut strategies: Vec<Box<dyn Strategy>> = Vec::with_capacity(custom.len() + 1);
        strategies.push(Box::new(DefaultStrategy {}));
        strategies.extend(custom);
        Self {
            strategies,
            unknown: UnknownStrategy {},
        }
    }

    pub fn resolve(&self, name: &str) -> &dyn Strategy {
        match self.strategies.iter().find(|s| s.name() == name) {
            Some(strategy) => strategy.as_ref(),
            None => {
                warn!(event_id = ErrorKind::UnknownStrategy.as_u8(); "No strategy is registered for the name '{name}', the binding is treated as inactive.");
                &self.unknown
            }
        }
    }
}
