//! Runtime configuration for the task tracker core.
//!
//! Values come from built-in defaults overridden by environment variables
//! prefixed with `TASKFLOW__`, using `__` as the section separator:
//!
//! - `TASKFLOW__DATABASE__URL`: `PostgreSQL` connection string
//! - `TASKFLOW__DATABASE__MAX_CONNECTIONS`: pool size (default: 10)
//! - `TASKFLOW__WORKFLOW__BACKLOG_STATE`: fallback task state (default: `backlog`)
//! - `TASKFLOW__WORKFLOW__DEFAULT_COLUMN_ORDER`: comma-separated column ids
//! - `TASKFLOW__LOG__FILTER`: tracing filter when `RUST_LOG` is unset
//!
//! A `.env` file in the working directory is read first when present.

use crate::board::domain::ColumnId;
use crate::task::domain::TaskState;
use config::{Config, ConfigError, Environment, Map};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "TASKFLOW";
const ENV_SEPARATOR: &str = "__";

/// Column ids used when no persisted column order is available.
pub const DEFAULT_COLUMN_ORDER: [&str; 4] = ["backlog", "inprogress", "aprove", "done"];

/// State assigned to unassigned or orphaned tasks.
pub const DEFAULT_BACKLOG_STATE: &str = "backlog";

/// Complete core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskflowConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Board workflow defaults.
    pub workflow: WorkflowConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Raw workflow defaults as read from configuration sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// State given to tasks without an assignee.
    pub backlog_state: String,
    /// Column order used when the persisted order is missing or malformed.
    pub default_column_order: Vec<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `tracing` filter directive.
    pub filter: String,
}

impl TaskflowConfig {
    /// Loads configuration from defaults, `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or the workflow
    /// section is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(environment())
    }

    /// Loads configuration from defaults overridden by the given variables.
    ///
    /// Keys use the same `TASKFLOW__SECTION__KEY` form as the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or the workflow
    /// section is invalid.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let source: Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::build(environment().source(Some(source)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let loaded: Self = Config::builder()
            .set_default("database.url", "postgres://localhost/taskflow")?
            .set_default("database.max_connections", 10)?
            .set_default("workflow.backlog_state", DEFAULT_BACKLOG_STATE)?
            .set_default("workflow.default_column_order", DEFAULT_COLUMN_ORDER.to_vec())?
            .set_default("log.filter", "taskflow=info")?
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        loaded.workflow_settings()?;
        Ok(loaded)
    }

    /// Converts the workflow section into validated domain settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Message`] when the backlog state or a column id
    /// is blank.
    pub fn workflow_settings(&self) -> Result<WorkflowSettings, ConfigError> {
        let backlog_state = TaskState::new(self.workflow.backlog_state.as_str())
            .map_err(|err| ConfigError::Message(format!("workflow.backlog_state: {err}")))?;
        let default_column_order = self
            .workflow
            .default_column_order
            .iter()
            .map(|id| {
                ColumnId::new(id.as_str()).map_err(|err| {
                    ConfigError::Message(format!("workflow.default_column_order: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WorkflowSettings {
            backlog_state,
            default_column_order,
        })
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("workflow.default_column_order")
        .try_parsing(true)
}

/// Validated workflow defaults consumed by the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    backlog_state: TaskState,
    default_column_order: Vec<ColumnId>,
}

impl WorkflowSettings {
    /// Creates settings from already-validated values.
    #[must_use]
    pub const fn new(backlog_state: TaskState, default_column_order: Vec<ColumnId>) -> Self {
        Self {
            backlog_state,
            default_column_order,
        }
    }

    /// Returns the backlog state.
    #[must_use]
    pub const fn backlog_state(&self) -> &TaskState {
        &self.backlog_state
    }

    /// Returns the fallback column order.
    #[must_use]
    pub fn default_column_order(&self) -> &[ColumnId] {
        &self.default_column_order
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            backlog_state: TaskState::backlog(),
            default_column_order: DEFAULT_COLUMN_ORDER
                .iter()
                .copied()
                .map(ColumnId::from_static)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_COLUMN_ORDER, TaskflowConfig, WorkflowSettings};

    #[test]
    fn defaults_apply_without_overrides() {
        let config =
            TaskflowConfig::from_vars(Vec::<(String, String)>::new()).expect("defaults load");

        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.workflow.backlog_state, "backlog");
        assert_eq!(config.workflow.default_column_order, DEFAULT_COLUMN_ORDER);
        assert_eq!(config.log.filter, "taskflow=info");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = TaskflowConfig::from_vars([
            ("TASKFLOW__DATABASE__URL", "postgres://db/tracker"),
            ("TASKFLOW__DATABASE__MAX_CONNECTIONS", "4"),
            ("TASKFLOW__WORKFLOW__DEFAULT_COLUMN_ORDER", "todo,doing,done"),
        ])
        .expect("overrides load");

        assert_eq!(config.database.url, "postgres://db/tracker");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(
            config.workflow.default_column_order,
            vec!["todo", "doing", "done"]
        );
    }

    #[test]
    fn blank_backlog_state_is_rejected() {
        let result = TaskflowConfig::from_vars([("TASKFLOW__WORKFLOW__BACKLOG_STATE", "  ")]);
        assert!(result.is_err());
    }

    #[test]
    fn workflow_settings_default_matches_constants() {
        let settings = WorkflowSettings::default();
        assert_eq!(settings.backlog_state().as_str(), "backlog");
        let ids: Vec<&str> = settings
            .default_column_order()
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(ids, DEFAULT_COLUMN_ORDER);
    }
}
