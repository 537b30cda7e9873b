use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the server answers a request for an alias path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasMode {
    /// Serve the target resource under the alias path.
    #[default]
    Page,
    /// Temporary redirect to the target.
    Redirect,
    /// Permanent redirect to the target.
    Permanent,
}

impl AliasMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AliasMode::Page => "page",
            AliasMode::Redirect => "redirect",
            AliasMode::Permanent => "permanent",
        }
    }
}

impl fmt::Display for AliasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AliasMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(AliasMode::Page),
            "redirect" => Ok(AliasMode::Redirect),
            "permanent" => Ok(AliasMode::Permanent),
            other => Err(format!("unknown alias mode '{}'", other)),
        }
    }
}

/// An alias as stored for one site root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias_path: String,
    pub target_path: String,
    pub mode: AliasMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing_ignores_case_and_padding() {
        assert_eq!(" Permanent ".parse::<AliasMode>(), Ok(AliasMode::Permanent));
        assert_eq!("page".parse::<AliasMode>(), Ok(AliasMode::Page));
        assert!("forward".parse::<AliasMode>().is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AliasMode::Redirect).unwrap(),
            "\"redirect\""
        );
    }
}
