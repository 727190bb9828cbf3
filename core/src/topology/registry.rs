use serde::Serialize;

use crate::config::TopologyCheckConfig;
use crate::error::ContextError;

/// What a topology check runs against: concrete URLs, or named scenarios
/// that the engine (or a tester) plays out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSubjects {
    Targets(Vec<String>),
    Scenarios(Vec<String>),
}

impl CheckSubjects {
    pub fn items(&self) -> &[String] {
        match self {
            CheckSubjects::Targets(v) | CheckSubjects::Scenarios(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CheckSubjects::Targets(_) => "targets",
            CheckSubjects::Scenarios(_) => "scenarios",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyCheck {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub subjects: CheckSubjects,
}

impl TopologyCheck {
    pub fn targets(&self) -> Option<&[String]> {
        match &self.subjects {
            CheckSubjects::Targets(v) => Some(v),
            CheckSubjects::Scenarios(_) => None,
        }
    }

    pub fn scenarios(&self) -> Option<&[String]> {
        match &self.subjects {
            CheckSubjects::Scenarios(v) => Some(v),
            CheckSubjects::Targets(_) => None,
        }
    }
}

/// Descriptive catalogue of service-topology checks. Names may repeat.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TopologyCheckRegistry {
    checks: Vec<TopologyCheck>,
}

impl TopologyCheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_target_check(
        &mut self,
        name: &str,
        description: &str,
        targets: Vec<String>,
    ) -> Result<(), ContextError> {
        self.push(name, description, CheckSubjects::Targets(targets))
    }

    pub fn register_scenario_check(
        &mut self,
        name: &str,
        description: &str,
        scenarios: Vec<String>,
    ) -> Result<(), ContextError> {
        self.push(name, description, CheckSubjects::Scenarios(scenarios))
    }

    /// Registers a check from its config shape, where exactly one of
    /// `targets` / `scenarios` must be present.
    pub fn register(&mut self, cfg: &TopologyCheckConfig) -> Result<(), ContextError> {
        match (&cfg.targets, &cfg.scenarios) {
            (Some(targets), None) => {
                self.register_target_check(&cfg.name, &cfg.description, targets.clone())
            }
            (None, Some(scenarios)) => {
                self.register_scenario_check(&cfg.name, &cfg.description, scenarios.clone())
            }
            (Some(_), Some(_)) => Err(ContextError::InvalidArgument(format!(
                "topology check `{}` has both targets and scenarios",
                cfg.name
            ))),
            (None, None) => Err(ContextError::InvalidArgument(format!(
                "topology check `{}` has neither targets nor scenarios",
                cfg.name
            ))),
        }
    }

    fn push(&mut self, name: &str, description: &str, subjects: CheckSubjects) -> Result<(), ContextError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContextError::InvalidArgument(
                "topology check name is blank".to_string(),
            ));
        }
        if subjects.items().is_empty() {
            return Err(ContextError::InvalidArgument(format!(
                "topology check `{name}` has an empty {} list",
                subjects.kind()
            )));
        }
        self.checks.push(TopologyCheck {
            name: name.to_string(),
            description: description.to_string(),
            subjects,
        });
        Ok(())
    }

    pub fn all(&self) -> &[TopologyCheck] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
