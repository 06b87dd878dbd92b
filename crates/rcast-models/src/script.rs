//! Generated video scripts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A generated short-form video script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Script {
    /// Video title
    pub title: String,
    /// Video description for the platform listing
    pub description: String,
    /// Platform tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Narration body
    pub body: String,
}

impl Script {
    /// Check that the script carries enough content to render and publish.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_completeness() {
        let script = Script {
            title: "Why Ethereum Staking Matters".to_string(),
            description: "A 60 second breakdown".to_string(),
            tags: vec!["ethereum".to_string(), "staking".to_string()],
            body: "Staking secures the network...".to_string(),
        };
        assert!(script.is_complete());

        let empty = Script {
            title: "  ".to_string(),
            description: String::new(),
            tags: Vec::new(),
            body: "text".to_string(),
        };
        assert!(!empty.is_complete());
    }
}
