use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Audio track variant of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioType {
    #[default]
    Sub,
    Dub,
}

impl AudioType {
    pub fn is_dub(self) -> bool {
        self == Self::Dub
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sub => "sub",
            Self::Dub => "dub",
        }
    }
}

impl fmt::Display for AudioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sub" => Ok(Self::Sub),
            "dub" => Ok(Self::Dub),
            other => Err(format!("unknown audio type: {other}")),
        }
    }
}

/// A named upstream video-source provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamServer {
    pub name: String,
}

impl StreamServer {
    /// Lowercase identifier used in URLs and settings (`"HD-1"` -> `"hd-1"`).
    pub fn id(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn matches(&self, server: &str) -> bool {
        self.name.eq_ignore_ascii_case(server)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCatalog {
    #[serde(default)]
    pub sub: Vec<StreamServer>,
    #[serde(default)]
    pub dub: Vec<StreamServer>,
}

/// The server catalogue for one episode, keyed by audio type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamServers {
    #[serde(default)]
    pub data: ServerCatalog,
}

impl StreamServers {
    pub fn for_type(&self, audio: AudioType) -> &[StreamServer] {
        match audio {
            AudioType::Sub => &self.data.sub,
            AudioType::Dub => &self.data.dub,
        }
    }

    /// Keep `current` if the type offers it, otherwise pick the first server.
    ///
    /// Returns `None` when the type has no servers at all.
    pub fn select(&self, audio: AudioType, current: &str) -> Option<String> {
        let available = self.for_type(audio);
        available
            .iter()
            .find(|s| s.matches(current))
            .or_else(|| available.first())
            .map(StreamServer::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StreamServers {
        serde_json::from_str(
            r#"{"data": {"sub": [{"name": "HD-1"}, {"name": "HD-2"}], "dub": [{"name": "HD-2"}, {"name": "Vidstream"}]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_keeps_matching_server() {
        assert_eq!(catalog().select(AudioType::Dub, "hd-2").as_deref(), Some("hd-2"));
    }

    #[test]
    fn test_select_falls_back_to_first() {
        assert_eq!(catalog().select(AudioType::Dub, "hd-1").as_deref(), Some("hd-2"));
        assert_eq!(StreamServers::default().select(AudioType::Sub, "hd-1"), None);
    }

    #[test]
    fn test_missing_type_is_empty() {
        let servers: StreamServers = serde_json::from_str(r#"{"data": {"sub": []}}"#).unwrap();
        assert!(servers.for_type(AudioType::Dub).is_empty());
        assert_eq!("DUB".parse::<AudioType>(), Ok(AudioType::Dub));
    }
}
