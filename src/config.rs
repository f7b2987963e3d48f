/// Engine configuration.
///
/// ## Example
/// ```
/// use evalon::config::Config;
///
/// let config = Config { max_call_depth: 64,
///                       ..Config::default() };
/// assert_eq!(config.max_call_depth, 64);
/// assert!(!config.print_result);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many function calls and `eval` invocations may be active at once
    /// before a `RangeError` is raised.
    pub max_call_depth: usize,
    /// Whether the runner prints the completion value of the program.
    pub print_result:   bool,
}

/// Default nesting limit for calls and evaluations.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               print_result:   false, }
    }
}
