use crate::aggregate::Aggregator;
use crate::classify::{normalize, Classifier};
use log::debug;

/// Styling preamble emitted verbatim at the top of every merged diagram.
/// Never derived from input.
const HEADER: &[&str] = &[
    "@startuml",
    "skinparam shadowing false",
    "hide stereotype",
    "hide empty members",
    "skinparam nodesep 50",
    "skinparam ranksep 40",
    "skinparam ArrowThickness 0.6",
    "skinparam defaultFontSize 12",
    "skinparam FolderBorderColor #333333",
    "skinparam FolderBackgroundColor #ffffff",
    "skinparam folder<<dynamic>> BackgroundColor #fff7e6",
    "skinparam folder<<dynamic>> BorderColor #d46b08",
    "skinparam folder<<static>> BackgroundColor #f0f5ff",
    "skinparam folder<<static>> BorderColor #1d39c4",
    "",
];

/// Renders the consolidated diagram from the final registry contents.
/// Byte-for-byte stable given identical contents and iteration order.
pub fn render(aggregator: &Aggregator, classifier: &Classifier) -> String {
    let mut out: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();

    for (name, color) in aggregator.modules() {
        let category = classifier.classify(name);
        let tag = category.stereotype();
        debug!("{} -> {}{}", name, normalize(name), tag);
        out.push(format!("folder \"{name}\" as {name}{tag} {color}"));
    }

    out.push(String::new());
    out.push("' relations (with cardinalities when present)".to_string());

    for relation in aggregator.relations() {
        out.push(relation.to_string());
    }

    out.push("@enduml".to_string());

    out.join("\n") + "\n"
}
