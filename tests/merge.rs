use puml_rollup::{Aggregator, Classifier, Config, Document, FileDiscovery, LinePatterns};
use std::fs;

fn merge_dir(dir: &std::path::Path, config: Config) -> String {
    let classifier =
        Classifier::new(&config.categories.dynamic, &config.categories.static_).unwrap();
    let discovery = FileDiscovery::new(config);
    let patterns = LinePatterns::new().unwrap();

    let mut aggregator = Aggregator::new();
    for file in discovery.discover_files().unwrap() {
        let text = fs::read_to_string(&file.path).unwrap();
        let name = file.path.file_name().unwrap().to_string_lossy().into_owned();
        aggregator.ingest(&patterns, &Document { name, text });
    }

    puml_rollup::render(&aggregator, &classifier)
}

fn config_for(dir: &std::path::Path) -> Config {
    Config {
        source_directory: dir.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn merges_two_files_with_dedup_and_first_color_wins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.puml"),
        "@startuml\n\
         !define COLOR_REF #445566\n\
         package \"ModA\" #112233\n\
         package \"ModB\" COLOR_REF\n\
         ModA.x --> ModB.y : uses\n\
         @enduml\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.puml"),
        "@startuml\n\
         package \"ModA\" #999999\n\
         ModA.x --> ModB.y : uses\n\
         ModB.z --> ModC.w\n\
         @enduml\n",
    )
    .unwrap();

    let out = merge_dir(dir.path(), config_for(dir.path()));

    // a.puml sorts first, so its color for ModA wins.
    assert!(out.contains("folder \"ModA\" as ModA #112233"));
    assert!(out.contains("folder \"ModB\" as ModB #445566"));
    assert_eq!(out.matches("ModA --> ModB : uses").count(), 1);
    assert!(out.contains("ModB --> ModC"));
    assert!(out.starts_with("@startuml\n"));
    assert!(out.ends_with("@enduml\n"));
}

#[test]
fn categorized_modules_get_stereotypes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("mods.puml"),
        "package \"UserModel\" #aabbcc\n\
         package \"UserTraits\" #ccddee\n\
         package \"Elsewhere\" #eeff00\n",
    )
    .unwrap();

    let out = merge_dir(dir.path(), config_for(dir.path()));

    assert!(out.contains("folder \"UserModel\" as UserModel <<dynamic>> #aabbcc"));
    assert!(out.contains("folder \"UserTraits\" as UserTraits <<static>> #ccddee"));
    assert!(out.contains("folder \"Elsewhere\" as Elsewhere #eeff00"));
}

#[test]
fn run_is_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("z.puml"), "package \"Z\" #000001\n").unwrap();
    fs::write(dir.path().join("a.puml"), "package \"A\" #000002\n").unwrap();

    let first = merge_dir(dir.path(), config_for(dir.path()));
    let second = merge_dir(dir.path(), config_for(dir.path()));
    assert_eq!(first, second);

    // Sorted discovery means a.puml's module is emitted first.
    let a_pos = first.find("folder \"A\"").unwrap();
    let z_pos = first.find("folder \"Z\"").unwrap();
    assert!(a_pos < z_pos);
}
