use anyhow::Result;
use regex::Regex;

/// One parse event extracted from a single source line.
///
/// A line yields at most one directive; anything that matches none of the
/// three shapes is skipped without a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `!define NAME value` — registers a color alias for the current document.
    Define { name: String, value: String },
    /// `package "Some.Name" #aabbcc` or `package Some.Name COLOR_REF`.
    Package {
        name: String,
        color_token: Option<String>,
    },
    /// `Left.member "1" --> "0..*" Right.member : label`
    Relation(RelationParts),
}

/// Raw captures of a relation line, before shortening and canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationParts {
    pub left: String,
    pub left_card: Option<String>,
    pub arrow: String,
    pub right_card: Option<String>,
    pub right: String,
    pub label: Option<String>,
}

pub struct LinePatterns {
    define: Regex,
    package: Regex,
    relation: Regex,
}

impl LinePatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            define: Regex::new(r"^\s*!define\s+(\w+)\s+(.+)")?,
            package: Regex::new(r##"^\s*package\s+"?([\w.]+)"?\s*(#\w+|\w+)?"##)?,
            // Arrow body: runs of -.o* plus the [hidden] marker, at least two
            // units long so a bare `-` cannot pass as a relation.
            relation: Regex::new(
                r##"^\s*([\w.]+)\.\w+\s*(?:"([^"]*)"\s*)?(<?(?:\[hidden\]|[-.o*]){2,}>?)\s*(?:"([^"]*)"\s*)?([\w.]+)\.\w+(?:\s*:\s*(.*))?"##,
            )?,
        })
    }

    /// Tries the three directive shapes in priority order and stops at the
    /// first match. Returns `None` for lines matching none of them.
    pub fn classify(&self, line: &str) -> Option<Directive> {
        if let Some(caps) = self.define.captures(line) {
            return Some(Directive::Define {
                name: caps[1].to_string(),
                value: caps[2].trim().to_string(),
            });
        }

        if let Some(caps) = self.package.captures(line) {
            return Some(Directive::Package {
                name: caps[1].to_string(),
                color_token: caps.get(2).map(|m| m.as_str().to_string()),
            });
        }

        if let Some(caps) = self.relation.captures(line) {
            return Some(Directive::Relation(RelationParts {
                left: caps[1].to_string(),
                left_card: caps.get(2).map(|m| m.as_str().to_string()),
                arrow: caps[3].to_string(),
                right_card: caps.get(4).map(|m| m.as_str().to_string()),
                right: caps[5].to_string(),
                label: caps.get(6).map(|m| m.as_str().to_string()),
            }));
        }

        None
    }
}
