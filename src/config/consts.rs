/// Interpreter used to launch the engine when the config names none
pub const DEFAULT_ENGINE_COMMAND: &str = "python3";
/// Engine wrapper script passed to the interpreter by default
pub const DEFAULT_ENGINE_SCRIPT: &str = "full_data_wrapper.py";
/// Per-invocation timeout when the config gives none (one hour)
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 3600;
/// Worker pool size when neither config nor platform supplies one
pub const FALLBACK_CONCURRENCY: usize = 4;
/// Filename timestamp format, second resolution
pub const RESULT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
/// Number of predictions shown in a result report
pub const PREVIEW_TRIPLE_COUNT: usize = 5;
