use indoc::indoc;
use langtable::{
    DiagnosticKind, Error, FileProvider, KeyRegistry, Loader, MapHostDictionary, MemoryProvider,
    NoHostDictionary,
};
use std::io::Write;

fn simple_loader(resource: &str, keys: &[&str]) -> Loader<MemoryProvider, NoHostDictionary> {
    Loader::new(
        MemoryProvider::new(resource),
        NoHostDictionary,
        KeyRegistry::from_keys(keys.iter().copied()),
        "en-US",
    )
}

#[test]
fn every_registered_key_resolves_non_empty_after_load() {
    let resource = indoc! {"
        ,en-US,fr-FR
        Greeting,Hello,Bonjour
        Farewell,Goodbye,
        # Comment rows and blanks are fine

        Unlisted.In.File
    "};
    let keys = ["Greeting", "Farewell", "Unlisted.In.File", "Never.Written"];
    let mut loader = simple_loader(resource, &keys);
    loader.activate("fr-FR").unwrap();

    for key in keys {
        let value = loader.get(key);
        assert!(!value.is_empty(), "key `{key}` resolved to an empty string");
    }
}

#[test]
fn quoted_comma_and_quote_round_trip() {
    // "a, ""b""" must come out as: a, "b"
    let resource = ",en-US\nQuoted,\"a, \"\"b\"\"\"\n";
    let mut loader = simple_loader(resource, &["Quoted"]);
    loader.activate("en-US").unwrap();
    assert_eq!(loader.get("Quoted"), "a, \"b\"");
}

#[test]
fn blank_non_default_field_falls_back_silently() {
    let resource = indoc! {"
        ,en-US,fr-FR
        K,Hello,
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let report = loader.activate("fr-FR").unwrap();
    assert_eq!(loader.get("K"), "Hello");
    assert!(
        report.diagnostics.is_empty(),
        "fallback must not produce a diagnostic: {:?}",
        report.diagnostics
    );
}

#[test]
fn temporary_key_reference_resolves_in_file_order() {
    let resource = indoc! {"
        ,en-US,fr-FR
        @@X,Foo,Fou
        K,@@X bar,@@X barre
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let report = loader.activate("fr-FR").unwrap();
    assert_eq!(loader.get("K"), "Fou barre");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn reversed_rows_leave_reference_marker_verbatim() {
    let resource = indoc! {"
        ,en-US,fr-FR
        K,@@X bar,@@X barre
        @@X,Foo,Fou
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let report = loader.activate("fr-FR").unwrap();
    // Forward references do not resolve; the marker survives in output.
    assert_eq!(loader.get("K"), "@@X barre");
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnresolvedReference)
    );
}

#[test]
fn duplicate_key_rows_accumulate_newline_joined() {
    let resource = indoc! {"
        ,en-US
        K,A
        K,B
    "};
    let mut loader = simple_loader(resource, &["K"]);
    loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "A\nB");
}

#[test]
fn wrong_default_locale_position_aborts_load() {
    let resource = indoc! {"
        ,fr-FR,en-US
        K,Bonjour,Hello
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let result = loader.activate("fr-FR");
    assert!(matches!(result, Err(Error::Header(_))));
    assert!(!loader.is_built("fr-FR"));
    // Nothing published: lookups echo the key.
    assert_eq!(loader.get("K"), "K");
}

#[test]
fn host_pass_through_resolves_per_locale_context() {
    let resource = indoc! {"
        ,en-US,fr-FR
        K,$$Foo.Bar,$$Foo.Bar
    "};
    let mut host = MapHostDictionary::new();
    host.insert("en-US", "Foo.Bar", "Host English");
    host.insert("fr-FR", "Foo.Bar", "Host French");

    let mut loader = Loader::new(
        MemoryProvider::new(resource),
        host,
        KeyRegistry::from_keys(["K"]),
        "en-US",
    );
    loader.activate("fr-FR").unwrap();
    assert_eq!(loader.get("K"), "Host French");
    loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "Host English");
}

#[test]
fn host_pass_through_miss_stays_verbatim() {
    let resource = indoc! {"
        ,en-US
        K,$$Foo.Bar
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let report = loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "$$Foo.Bar");
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnresolvedPassThrough)
    );
}

#[test]
fn unknown_key_skips_only_that_row() {
    let resource = indoc! {"
        ,en-US
        Bogus,nope
        K,Hello
    "};
    let mut loader = simple_loader(resource, &["K"]);
    let report = loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "Hello");
    assert_eq!(loader.get("Bogus"), "Bogus");
    assert!(
        report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnknownKey)
    );
}

#[test]
fn embedded_newline_escape_reaches_published_value() {
    let resource = ",en-US\nK,line one\\nline two\n";
    let mut loader = simple_loader(resource, &["K"]);
    loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "line one\nline two");
}

#[test]
fn temporary_keys_are_not_published() {
    let resource = indoc! {"
        ,en-US
        @@X,Foo
        K,@@X bar
    "};
    let mut loader = simple_loader(resource, &["K"]);
    loader.activate("en-US").unwrap();
    assert_eq!(loader.get("K"), "Foo bar");
    // Neither spelling of the temporary key is a published entry.
    assert!(loader.active_table().unwrap().lookup("X").is_none());
    assert!(loader.active_table().unwrap().lookup("@@X").is_none());
}

#[test]
fn file_backed_resource_with_bom_loads() {
    let resource = indoc! {"
        ,en-US,fr-FR
        K,Hello,Bonjour
    "};
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\xEF\xBB\xBF").unwrap();
    file.write_all(resource.as_bytes()).unwrap();
    file.flush().unwrap();

    let mut loader = Loader::new(
        FileProvider::new(file.path()),
        NoHostDictionary,
        KeyRegistry::from_keys(["K"]),
        "en-US",
    );
    let report = loader.activate("fr-FR").unwrap();
    assert!(report.rebuilt);
    assert_eq!(loader.get("K"), "Bonjour");
}

#[test]
fn snapshot_survives_later_activations() {
    let resource = indoc! {"
        ,en-US,fr-FR
        K,Hello,Bonjour
    "};
    let mut loader = simple_loader(resource, &["K"]);
    loader.activate("fr-FR").unwrap();
    let snapshot = loader.active_table().unwrap();

    loader.activate("en-US").unwrap();
    // The earlier snapshot is immutable and still reads fr-FR values.
    assert_eq!(snapshot.get("K"), "Bonjour");
    assert_eq!(snapshot.locale(), "fr-FR");
}
