use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::SweepError;

/// Operating system family a catalog is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Windows")]
    Windows,
    #[serde(rename = "Darwin", alias = "macos")]
    MacOs,
    #[serde(rename = "Linux")]
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::MacOs, Platform::Linux];

    /// Platform this binary was compiled for. Anything that is neither
    /// Windows nor macOS is treated as Linux.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Identifier reported to clients
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "Darwin",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Platform {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "darwin" | "macos" | "osx" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            _ => Err(SweepError::UnknownPlatform {
                name: s.to_string(),
            }),
        }
    }
}
