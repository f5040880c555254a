//! Protocol-wide constants.

/// Maximum tool-invocation rounds in one generation turn.
///
/// Exceeding the cap ends the turn as a soft stop, never an error — it
/// bounds runaway tool loops without surfacing a failure to the user.
pub const MAX_TOOL_ROUNDS: u32 = 10;

/// Tool name for the file-write operation.
pub const TOOL_WRITE_FILE: &str = "writeFile";

/// Tool name for the thought-log operation.
pub const TOOL_LOG_THOUGHT: &str = "logSwarmThought";

// Metric names, shared by the emitting crates and the exporter.

/// Counter of generation turns (labels: outcome).
pub const METRIC_TURNS_TOTAL: &str = "hive_turns_total";

/// Histogram of tool rounds per completed turn.
pub const METRIC_TURN_ROUNDS: &str = "hive_turn_rounds";

/// Counter of tool invocations (labels: tool).
pub const METRIC_TOOL_INVOCATIONS_TOTAL: &str = "hive_tool_invocations_total";

/// Counter of swallowed tool persistence failures (labels: tool).
pub const METRIC_TOOL_PERSISTENCE_FAILURES_TOTAL: &str = "hive_tool_persistence_failures_total";
