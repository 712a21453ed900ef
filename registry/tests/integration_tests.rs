use std::collections::BTreeSet;

use command_invoke_core::{ArgumentSpec, CommandDeclaration, CommandSchema, SchemaError, ValueType};
use command_invoke_registry::{RegistryBuilder, RegistryError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn agents(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn schema(name: &str, refs: &[&str]) -> CommandSchema {
    refs.iter()
        .fold(CommandSchema::new(name), |s, r| s.with_agent_ref(r))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn test_register_and_lookup() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(
            CommandSchema::new("build").with_argument(ArgumentSpec::option(
                "platform",
                ValueType::Choice(vec!["ios".into(), "android".into()]),
            )),
        )
        .unwrap();
    builder.register(CommandSchema::new("test")).unwrap();
    assert_eq!(builder.len(), 2);

    let registry = builder.finalize(BTreeSet::new()).unwrap();
    assert!(registry.contains("build"));
    assert!(registry.get("build").unwrap().find_argument("platform").is_some());
    assert!(registry.get("release").is_none());
}

#[test]
fn test_register_declaration_validates_schema() {
    let mut builder = RegistryBuilder::new();
    let declaration = CommandDeclaration {
        name: "Bad Name".into(),
        arguments: vec![],
        agents: vec![],
    };

    assert!(matches!(
        builder.register_declaration(&declaration),
        Err(RegistryError::Schema(SchemaError::BadName { .. })),
    ));
    assert!(builder.is_empty());
}

// ---------------------------------------------------------------------------
// Agent cross-reference validation
// ---------------------------------------------------------------------------

#[test]
fn test_single_dangling_reference_is_reported_exactly() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(schema("add-backend", &["flutter-firebase-core"]))
        .unwrap();

    let errors = builder.finalize(agents(&["flutter-ui-builder"])).unwrap_err();
    assert_eq!(
        errors,
        vec![RegistryError::DanglingAgentReference {
            command: "add-backend".into(),
            agent: "flutter-firebase-core".into(),
        }],
    );
}

#[test]
fn test_error_set_is_independent_of_registration_order() {
    let known = agents(&["flutter-ui-builder"]);

    let mut forward = RegistryBuilder::new();
    forward.register(schema("add-backend", &["flutter-firebase-core"])).unwrap();
    forward.register(schema("deploy", &["flutter-release-bot"])).unwrap();
    forward.register(schema("sync-docs", &["doc-writer"])).unwrap();

    let mut reversed = RegistryBuilder::new();
    reversed.register(schema("sync-docs", &["doc-writer"])).unwrap();
    reversed.register(schema("deploy", &["flutter-release-bot"])).unwrap();
    reversed.register(schema("add-backend", &["flutter-firebase-core"])).unwrap();

    let forward_errors = forward.finalize(known.clone()).unwrap_err();
    let reversed_errors = reversed.finalize(known).unwrap_err();
    assert_eq!(forward_errors, reversed_errors);
    assert_eq!(forward_errors.len(), 3);
}

#[test]
fn test_finalize_succeeds_when_all_references_resolve() {
    let mut builder = RegistryBuilder::new();
    builder
        .register(schema(
            "add-backend",
            &["flutter-firebase-core", "flutter-supabase-core"],
        ))
        .unwrap();

    let registry = builder
        .finalize(agents(&[
            "flutter-firebase-core",
            "flutter-supabase-core",
            "flutter-ui-builder",
        ]))
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.known_agents().contains("flutter-ui-builder"));
}

#[test]
fn test_failed_finalize_consumes_builder() {
    // finalize takes the builder by value, so a failed validation leaves no
    // registry behind to resolve against.
    let mut builder = RegistryBuilder::new();
    builder.register(schema("deploy", &["missing-agent"])).unwrap();

    let result = builder.finalize(BTreeSet::new());
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Concurrent reads
// ---------------------------------------------------------------------------

#[test]
fn test_registry_is_shareable_across_threads() {
    let mut builder = RegistryBuilder::new();
    builder.register(CommandSchema::new("build")).unwrap();
    let registry = std::sync::Arc::new(builder.finalize(BTreeSet::new()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.lookup("build").is_ok())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
