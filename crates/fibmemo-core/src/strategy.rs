//! Evaluation strategies for filling the cache.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RECURSION_LIMIT;

/// How the engine fills missing cache entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Strategy {
    /// Bottom-up fill from the smallest missing index. Constant stack usage.
    #[default]
    Iterative,
    /// Top-down memoized recursion, `F(n) = F(n-1) + F(n-2)`.
    ///
    /// Requests that would recurse deeper than `max_depth` are filled
    /// bottom-up instead.
    Recursive {
        /// Maximum recursion depth.
        max_depth: usize,
    },
}

impl Strategy {
    /// Recursive strategy with the default depth limit.
    #[must_use]
    pub fn recursive() -> Self {
        Self::Recursive {
            max_depth: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Short name of this strategy.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::Recursive { .. } => "recursive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterative => f.write_str("iterative"),
            Self::Recursive { max_depth } => write!(f, "recursive (max depth {max_depth})"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    /// Parse `iterative`, `recursive` or `recursive:<depth>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            None if s == "iterative" => Ok(Self::Iterative),
            None if s == "recursive" => Ok(Self::recursive()),
            Some(("recursive", depth)) => {
                let max_depth: usize = depth
                    .parse()
                    .map_err(|e| format!("invalid recursion depth '{depth}': {e}"))?;
                Ok(Self::Recursive { max_depth })
            }
            _ => Err(format!("unknown strategy '{s}'")),
        }
    }
}
