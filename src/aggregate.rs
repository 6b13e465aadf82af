use crate::parser::{Directive, LinePatterns, RelationParts};
use indexmap::{IndexMap, IndexSet};

pub const FALLBACK_COLOR: &str = "#ffffff";

/// One diagram-description source unit: an identifier (the file name in
/// practice) and its full text.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub text: String,
}

/// Per-document `!define` lookup. Values are stored literally and never
/// re-resolved against other aliases.
#[derive(Debug, Default)]
struct AliasTable {
    entries: IndexMap<String, String>,
}

impl AliasTable {
    fn define(&mut self, name: String, value: String) {
        self.entries.insert(name, value);
    }

    fn resolve(&self, token: &str) -> String {
        self.entries
            .get(token)
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }
}

/// Cross-document accumulator: module short-name → color (first declaration
/// wins) and the ordered set of canonical relation strings. Both keep
/// first-seen order, which is also the emission order.
#[derive(Debug, Default)]
pub struct Aggregator {
    modules: IndexMap<String, String>,
    relations: IndexSet<String>,
}

/// Last `.`-delimited segment of a qualified name.
fn short_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one document through the line classifier, mutating the global
    /// registries. The alias table lives only for the duration of this call.
    pub fn ingest(&mut self, patterns: &LinePatterns, doc: &Document) {
        let mut aliases = AliasTable::default();

        for line in doc.text.lines() {
            match patterns.classify(line) {
                Some(Directive::Define { name, value }) => aliases.define(name, value),
                Some(Directive::Package { name, color_token }) => {
                    self.add_module(&aliases, &name, color_token.as_deref());
                }
                Some(Directive::Relation(parts)) => self.add_relation(&parts),
                None => {}
            }
        }
    }

    fn add_module(&mut self, aliases: &AliasTable, name: &str, color_token: Option<&str>) {
        let short = short_name(name);
        if self.modules.contains_key(short) {
            // First declaration wins; later colors for the same short name
            // are ignored.
            return;
        }

        let color = match color_token {
            Some(token) if token.starts_with('#') => token.to_string(),
            Some(token) => aliases.resolve(token),
            None => FALLBACK_COLOR.to_string(),
        };

        self.modules.insert(short.to_string(), color);
    }

    fn add_relation(&mut self, parts: &RelationParts) {
        let left = short_name(&parts.left);
        let right = short_name(&parts.right);
        if left == right {
            // No self-loops at module granularity.
            return;
        }

        let arrow = parts.arrow.replace("[hidden]", "--");
        let left_card = card_suffix(parts.left_card.as_deref());
        let right_card = card_suffix(parts.right_card.as_deref());
        let label = match parts.label.as_deref() {
            // An empty capture (bare trailing `:`) counts as no label.
            Some(l) if !l.is_empty() => format!(" : {}", l.trim()),
            _ => String::new(),
        };

        self.relations
            .insert(format!("{left}{left_card} {arrow}{right_card} {right}{label}"));
    }

    pub fn modules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(|s| s.as_str())
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

fn card_suffix(card: Option<&str>) -> String {
    match card {
        Some(c) if !c.trim().is_empty() => format!(" \"{}\"", c.trim()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LinePatterns;

    fn doc(name: &str, text: &str) -> Document {
        Document {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    fn aggregate(texts: &[&str]) -> Aggregator {
        let patterns = LinePatterns::new().unwrap();
        let mut agg = Aggregator::new();
        for (i, text) in texts.iter().enumerate() {
            agg.ingest(&patterns, &doc(&format!("doc{i}.puml"), text));
        }
        agg
    }

    #[test]
    fn module_keyed_by_short_name() {
        let agg = aggregate(&[r##"package "Deep.Nested.Core" #112233"##]);
        let modules: Vec<_> = agg.modules().collect();
        assert_eq!(modules, vec![("Core", "#112233")]);
    }

    #[test]
    fn first_color_wins_across_documents() {
        let agg = aggregate(&[
            r##"package "ModA" #111111"##,
            r##"package "ModA" #222222"##,
        ]);
        let modules: Vec<_> = agg.modules().collect();
        assert_eq!(modules, vec![("ModA", "#111111")]);
    }

    #[test]
    fn alias_resolves_within_its_document() {
        let agg = aggregate(&["!define GOLD #ffd700\npackage \"ModA\" GOLD"]);
        assert_eq!(agg.modules().next(), Some(("ModA", "#ffd700")));
    }

    #[test]
    fn alias_does_not_leak_across_documents() {
        let agg = aggregate(&[
            "!define GOLD #ffd700",
            "package \"ModA\" GOLD",
        ]);
        // GOLD is unknown in the second document, so the fallback applies.
        assert_eq!(agg.modules().next(), Some(("ModA", FALLBACK_COLOR)));
    }

    #[test]
    fn unresolved_alias_falls_back_to_white() {
        let agg = aggregate(&["package \"ModA\" MISSING"]);
        assert_eq!(agg.modules().next(), Some(("ModA", FALLBACK_COLOR)));
    }

    #[test]
    fn missing_color_falls_back_to_white() {
        let agg = aggregate(&["package \"ModA\""]);
        assert_eq!(agg.modules().next(), Some(("ModA", FALLBACK_COLOR)));
    }

    #[test]
    fn relation_is_canonicalized_with_label() {
        let agg = aggregate(&["ModA.x --> ModB.y : uses"]);
        let rels: Vec<_> = agg.relations().collect();
        assert_eq!(rels, vec!["ModA --> ModB : uses"]);
    }

    #[test]
    fn relation_cardinalities_kept_when_present() {
        let agg = aggregate(&[r##"ModA.x "1" o-- "0..*" ModB.y"##]);
        let rels: Vec<_> = agg.relations().collect();
        assert_eq!(rels, vec![r##"ModA "1" o-- "0..*" ModB"##]);
    }

    #[test]
    fn blank_cardinality_is_dropped() {
        let agg = aggregate(&[r##"ModA.x "  " --> ModB.y"##]);
        let rels: Vec<_> = agg.relations().collect();
        assert_eq!(rels, vec!["ModA --> ModB"]);
    }

    #[test]
    fn bare_colon_renders_as_unlabeled_and_dedupes() {
        let agg = aggregate(&["ModA.x --> ModB.y", "ModA.x --> ModB.y :"]);
        let rels: Vec<_> = agg.relations().collect();
        assert_eq!(rels, vec!["ModA --> ModB"]);
    }

    #[test]
    fn hidden_marker_becomes_plain_dashes() {
        let agg = aggregate(&["ModA.x -[hidden]- ModB.y"]);
        let rels: Vec<_> = agg.relations().collect();
        assert_eq!(rels, vec!["ModA ---- ModB"]);
    }

    #[test]
    fn self_relation_after_shortening_is_dropped() {
        // Distinct qualifiers that shorten to the same module.
        let agg = aggregate(&["Deep.Core.x --> Other.Core.y"]);
        assert_eq!(agg.relation_count(), 0);
    }

    #[test]
    fn identical_relation_from_two_documents_dedupes() {
        let agg = aggregate(&["ModA.x --> ModB.y : uses", "ModA.x --> ModB.y : uses"]);
        assert_eq!(agg.relation_count(), 1);
    }

    #[test]
    fn dedup_is_by_rendered_string_not_semantics() {
        let agg = aggregate(&["ModA.x --> ModB.y : uses", "ModA.x --> ModB.y : calls"]);
        assert_eq!(agg.relation_count(), 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let agg = aggregate(&[
            "package \"B\" #000001\npackage \"A\" #000002",
            "package \"C\" #000003",
        ]);
        let names: Vec<_> = agg.modules().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
