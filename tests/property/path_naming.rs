//! Property-based tests for dotted paths and environment names

use confload::config::{FieldPath, Registry};
use confload::{Fields, Schema};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,11}"
}

/// Chain of nested records, one per segment, ending in a defaulted leaf.
struct Chain<'a> {
    segments: &'a [String],
    default: &'a str,
}

impl Schema for Chain<'_> {
    fn describe(&self, fields: &mut Fields<'_>) {
        match self.segments {
            [] => {}
            [leaf] => {
                fields.leaf(leaf, self.default);
            }
            [head, rest @ ..] => {
                let child = Chain {
                    segments: rest,
                    default: self.default,
                };
                fields.nested(head, &child);
            }
        }
    }
}

/// Registered key equals the lowercase dot-join of enclosing names
#[test]
fn test_registered_key_is_dot_joined_path() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(segment(), 1..6), "[a-z0-9]{1,8}"),
            |(segments, default)| {
                let chain = Chain {
                    segments: &segments,
                    default: &default,
                };
                let registry = Registry::collect(&chain);
                let expected = segments.join(".").to_lowercase();

                prop_assert_eq!(registry.len(), 1);
                prop_assert_eq!(registry.entries()[0].key(), expected.clone());
                prop_assert_eq!(registry.default_for(&expected), Some(default.as_str()));
                Ok(())
            },
        )
        .unwrap();
}

/// Environment names are uppercase, dot-free and keep the segment order
#[test]
fn test_env_var_translation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(segment(), 1..6), |segments| {
            let path = segments
                .iter()
                .fold(FieldPath::root(), |path, name| path.child(name));
            let var = path.env_var(None);

            prop_assert!(!var.contains('.'));
            prop_assert_eq!(var.clone(), var.to_uppercase());
            prop_assert_eq!(var, segments.join("_").to_uppercase());
            prop_assert_eq!(path.segments().len(), segments.len());
            Ok(())
        })
        .unwrap();
}
