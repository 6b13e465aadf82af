use anyhow::{bail, Result};
use std::collections::HashSet;

/// Behavioral category of a module, used for stereotype styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Dynamic,
    Static,
    None,
}

impl Category {
    /// Stereotype suffix as it appears on a folder line, leading space
    /// included. Empty for uncategorized modules.
    pub fn stereotype(self) -> &'static str {
        match self {
            Category::Dynamic => " <<dynamic>>",
            Category::Static => " <<static>>",
            Category::None => "",
        }
    }
}

/// Lowercases `name` and maps every character outside `[a-z0-9_]` to an
/// underscore. Membership tests run on this form so that casing and
/// punctuation differences in declarations collapse to one key.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub struct Classifier {
    dynamic: HashSet<String>,
    stat: HashSet<String>,
}

impl Classifier {
    /// Builds a classifier from the raw membership lists. The two sets must
    /// be disjoint after normalization; an overlapping name is a
    /// configuration error and rejected before any document is processed.
    pub fn new(dynamic_names: &[String], static_names: &[String]) -> Result<Self> {
        let dynamic: HashSet<String> = dynamic_names.iter().map(|n| normalize(n)).collect();
        let stat: HashSet<String> = static_names.iter().map(|n| normalize(n)).collect();

        if let Some(shared) = dynamic.intersection(&stat).next() {
            bail!("module '{shared}' is listed as both dynamic and static");
        }

        Ok(Self { dynamic, stat })
    }

    pub fn classify(&self, short_name: &str) -> Category {
        let norm = normalize(short_name);
        if self.dynamic.contains(&norm) {
            Category::Dynamic
        } else if self.stat.contains(&norm) {
            Category::Static
        } else {
            Category::None
        }
    }
}
