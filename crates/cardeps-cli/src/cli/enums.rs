use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Extraction strategy selection
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Match every known artifact name anywhere in the raw text
    ///
    /// Finds references in comments and unrelated attributes too.
    #[value(name = "regex")]
    Regex,

    /// Read references from recognized elements and attributes only
    #[value(name = "structural")]
    Structural,

    /// Run both and write an overlay classifying every edge
    #[value(name = "both")]
    Both,
}

/// Output file format
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Graphviz DOT graph
    #[value(name = "dot")]
    Dot,

    /// Per-unit text report with provenance
    #[value(name = "text")]
    Text,

    /// Graph with provenance as JSON
    #[value(name = "json")]
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

/// Handling of artifact names declared by several units
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum CollisionArg {
    /// The lexically last unit owns the name; collisions are reported
    #[value(name = "override")]
    Override,

    /// Abort on the first collision
    #[value(name = "reject")]
    Reject,
}

/// What a `get-property('..')` call contributes
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum PropertyCaptureArg {
    /// The whole call text (never resolves to an artifact)
    #[value(name = "call")]
    Call,

    /// Only the quoted property name
    #[value(name = "name")]
    Name,
}

/// Where the owning unit of an artifact.xml is found
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum DescriptorLayoutArg {
    /// Two levels above the deepest `src` directory on the path
    #[value(name = "src")]
    Src,

    /// Two levels above the descriptor itself
    #[value(name = "grandparent")]
    Grandparent,
}
