use serde::Deserialize;

/// List responses come either wrapped as `{"results": [...]}` or as a bare array.
/// A wrapper without `results` reads as an empty list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> Envelope<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            Self::Wrapped { results } => results,
            Self::Bare(results) => results,
        }
    }
}
