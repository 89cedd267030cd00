//! Unit tests for the overlay applier.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::document::doc;

use super::{ApplyMode, MAX_DEPTH, OverlayApplier, apply, apply_overlay, apply_overlays};
use crate::document::{Document, KeyPath, ValueKind};
use crate::error::{ApplyError, OverlayError};
use crate::overlay::Overlay;

fn path(segments: &[&str]) -> KeyPath {
    segments.iter().copied().collect()
}

#[fixture]
fn base_document() -> Result<Document> {
    doc(json!({
        "service": {
            "name": "api",
            "replicas": 2,
            "env": {"tier": {"level": 1, "label": "gold"}},
            "tags": ["a"]
        },
        "debug": false
    }))
}

#[rstest]
#[case(ApplyMode::Set)]
#[case(ApplyMode::Append)]
fn empty_fragment_is_identity(
    base_document: Result<Document>,
    #[case] mode: ApplyMode,
) -> Result<()> {
    let base = base_document?;
    let mut target = base.clone();
    apply(&mut target, &Document::new(), mode)?;
    ensure!(target == base);
    Ok(())
}

#[rstest]
fn set_replaces_only_the_addressed_leaf(base_document: Result<Document>) -> Result<()> {
    let base = base_document?;
    let mut target = base.clone();
    apply(
        &mut target,
        &doc(json!({"service": {"env": {"tier": {"level": 3}}}}))?,
        ApplyMode::Set,
    )?;
    let mut expected = base;
    if let Some(level) = expected
        .get_mut("service")
        .and_then(|v| v.pointer_mut("/env/tier/level"))
    {
        *level = json!(3);
    }
    ensure!(target == expected, "unexpected document: {target:?}");
    Ok(())
}

#[rstest]
fn set_inserts_new_keys_after_existing_ones(base_document: Result<Document>) -> Result<()> {
    let mut target = base_document?;
    apply(
        &mut target,
        &doc(json!({"service": {"port": 8080}, "debug": true}))?,
        ApplyMode::Set,
    )?;
    let top: Vec<&str> = target.keys().map(String::as_str).collect();
    ensure!(top == ["service", "debug"], "replacing must keep position: {top:?}");
    let service_keys: Vec<&str> = target
        .get("service")
        .and_then(serde_json::Value::as_object)
        .map(|service| service.keys().map(String::as_str).collect())
        .unwrap_or_default();
    ensure!(service_keys == ["name", "replicas", "env", "tags", "port"]);
    ensure!(target.get("debug") == Some(&json!(true)));
    Ok(())
}

#[rstest]
fn set_overwrites_mappings_with_leaves(base_document: Result<Document>) -> Result<()> {
    let mut target = base_document?;
    apply(&mut target, &doc(json!({"service": {"env": "flat"}}))?, ApplyMode::Set)?;
    ensure!(target.get("service").and_then(|s| s.get("env")) == Some(&json!("flat")));
    Ok(())
}

#[rstest]
fn append_accumulates_at_every_level(base_document: Result<Document>) -> Result<()> {
    let mut target = base_document?;
    apply(
        &mut target,
        &doc(json!({
            "service": {
                "name": "-v2",
                "replicas": 3,
                "tags": ["b"],
                "env": {"tier": {"level": 10, "label": "+"}}
            }
        }))?,
        ApplyMode::Append,
    )?;
    let service = target
        .get("service")
        .ok_or_else(|| anyhow!("service missing"))?;
    ensure!(
        service
            == &json!({
                "name": "api-v2",
                "replicas": 5,
                "env": {"tier": {"level": 11, "label": "gold+"}},
                "tags": ["a", "b"]
            }),
        "unexpected service: {service}"
    );
    Ok(())
}

#[rstest]
fn returns_the_base_for_chaining(base_document: Result<Document>) -> Result<()> {
    let mut target = base_document?;
    let fragment = doc(json!({"service": {"replicas": 1}}))?;
    let replicas = apply(&mut target, &fragment, ApplyMode::Append)?
        .get("service")
        .and_then(|service| service.get("replicas"))
        .cloned();
    ensure!(replicas == Some(json!(3)));
    Ok(())
}

#[rstest]
fn leaves_at_the_depth_limit_are_applied() -> Result<()> {
    let mut target = doc(json!({"a": {"b": {"c": {"d": 1}}}}))?;
    apply(&mut target, &doc(json!({"a": {"b": {"c": {"d": 2}}}}))?, ApplyMode::Append)?;
    ensure!(target == doc(json!({"a": {"b": {"c": {"d": 3}}}}))?);
    Ok(())
}

#[rstest]
#[case(ApplyMode::Set)]
#[case(ApplyMode::Append)]
fn mappings_beyond_the_limit_fail_without_mutation(#[case] mode: ApplyMode) -> Result<()> {
    let original = doc(json!({"top": 1, "a": {"b": {"c": {"d": {"e": 1}}}}}))?;
    let mut target = original.clone();
    let fragment = doc(json!({"top": 2, "a": {"b": {"c": {"d": {"e": 2}}}}}))?;
    let result = apply(&mut target, &fragment, mode);
    ensure!(
        result
            == Err(ApplyError::DepthExceeded {
                path: path(&["a", "b", "c", "d"]),
                max_depth: MAX_DEPTH,
            }),
        "unexpected result: {result:?}"
    );
    ensure!(target == original, "base must be untouched after a failure");
    Ok(())
}

#[rstest]
fn empty_mapping_at_the_limit_still_fails() -> Result<()> {
    let mut target = doc(json!({}))?;
    let result = apply(&mut target, &doc(json!({"a": {"b": {"c": {"d": {}}}}}))?, ApplyMode::Set);
    ensure!(matches!(result, Err(ApplyError::DepthExceeded { .. })));
    Ok(())
}

#[rstest]
fn empty_mapping_within_the_limit_is_a_no_op() -> Result<()> {
    let mut target = doc(json!({"x": 1}))?;
    apply(&mut target, &doc(json!({"missing": {}}))?, ApplyMode::Append)?;
    ensure!(target == doc(json!({"x": 1}))?);
    Ok(())
}

#[rstest]
#[case(0, json!({"a": {}}), &["a"][..])]
#[case(1, json!({"a": {"b": 1}}), &["a"][..])]
#[case(2, json!({"a": {"b": {"c": 1}}}), &["a", "b"][..])]
fn depth_limit_is_configurable(
    #[case] max_depth: usize,
    #[case] fragment: serde_json::Value,
    #[case] failing: &[&str],
) -> Result<()> {
    let applier = OverlayApplier::with_max_depth(max_depth);
    ensure!(applier.max_depth() == max_depth);
    let mut target = doc(json!({"a": {"b": {"c": 0}}}))?;
    let result = applier.apply(&mut target, &doc(fragment)?, ApplyMode::Set);
    ensure!(
        result
            == Err(ApplyError::DepthExceeded {
                path: path(failing),
                max_depth,
            }),
        "unexpected result: {result:?}"
    );
    Ok(())
}

#[rstest]
fn deeper_limits_admit_deeper_fragments() -> Result<()> {
    let mut target = doc(json!({"a": {"b": {"c": {"d": {"e": 1}}}}}))?;
    OverlayApplier::with_max_depth(5).apply(
        &mut target,
        &doc(json!({"a": {"b": {"c": {"d": {"e": 4}}}}}))?,
        ApplyMode::Append,
    )?;
    ensure!(target == doc(json!({"a": {"b": {"c": {"d": {"e": 5}}}}}))?);
    ensure!(OverlayApplier::default() == OverlayApplier::new());
    Ok(())
}

#[rstest]
#[case(json!({"service": {"missing": 1}}), &["service", "missing"][..])]
#[case(json!({"absent": 1}), &["absent"][..])]
fn append_onto_absent_keys_fails(
    base_document: Result<Document>,
    #[case] fragment: serde_json::Value,
    #[case] missing: &[&str],
) -> Result<()> {
    let base = base_document?;
    let mut target = base.clone();
    let result = apply(&mut target, &doc(fragment)?, ApplyMode::Append);
    ensure!(result == Err(ApplyError::MissingTarget { path: path(missing) }));
    ensure!(target == base);
    Ok(())
}

#[rstest]
#[case(ApplyMode::Set)]
#[case(ApplyMode::Append)]
fn descending_into_absent_keys_fails(
    base_document: Result<Document>,
    #[case] mode: ApplyMode,
) -> Result<()> {
    let mut target = base_document?;
    let result = apply(&mut target, &doc(json!({"cache": {"size": 1}}))?, mode);
    ensure!(result == Err(ApplyError::MissingTarget { path: path(&["cache"]) }));
    Ok(())
}

#[rstest]
fn descending_into_scalars_fails(base_document: Result<Document>) -> Result<()> {
    let mut target = base_document?;
    let result = apply(
        &mut target,
        &doc(json!({"service": {"name": {"first": "x"}}}))?,
        ApplyMode::Set,
    );
    ensure!(
        result
            == Err(ApplyError::NotAMapping {
                path: path(&["service", "name"]),
                found: ValueKind::String,
            })
    );
    Ok(())
}

#[rstest]
fn append_type_mismatch_reports_both_kinds(base_document: Result<Document>) -> Result<()> {
    let base = base_document?;
    let mut target = base.clone();
    let result = apply(
        &mut target,
        &doc(json!({"service": {"replicas": "many"}}))?,
        ApplyMode::Append,
    );
    let err = result.err().ok_or_else(|| anyhow!("expected a type mismatch"))?;
    ensure!(
        err.to_string() == "cannot append a string onto an integer at 'service.replicas'",
        "unexpected message: {err}"
    );
    ensure!(err.path() == &path(&["service", "replicas"]));
    ensure!(target == base);
    Ok(())
}

#[rstest]
fn overlay_appends_before_it_sets() -> Result<()> {
    let mut target = doc(json!({"count": 1}))?;
    let overlay = Overlay::new("ordering")
        .with_set(doc(json!({"count": 10}))?)
        .with_append(doc(json!({"count": 5}))?);
    apply_overlay(&mut target, &overlay)?;
    ensure!(target == doc(json!({"count": 10}))?, "set must win over append");
    Ok(())
}

#[rstest]
fn failing_set_discards_the_overlays_appends() -> Result<()> {
    let original = doc(json!({"count": 1}))?;
    let mut target = original.clone();
    let overlay = Overlay::new("half")
        .with_append(doc(json!({"count": 5}))?)
        .with_set(doc(json!({"nested": {"x": 1}}))?);
    let err = apply_overlay(&mut target, &overlay)
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(
        err == OverlayError::Apply {
            overlay: "half".to_owned(),
            source: ApplyError::MissingTarget { path: path(&["nested"]) },
        }
    );
    ensure!(target == original);
    Ok(())
}

#[rstest]
fn overlays_apply_in_caller_order() -> Result<()> {
    let mut target = doc(json!({"greeting": "hi", "count": 1}))?;
    let first = Overlay::new("first")
        .with_append(doc(json!({"greeting": " there", "count": 1}))?);
    let second = Overlay::new("second")
        .with_set(doc(json!({"count": 7}))?)
        .with_append(doc(json!({"greeting": "!"}))?);
    apply_overlays(&mut target, [&first, &second])?;
    ensure!(target == doc(json!({"greeting": "hi there!", "count": 7}))?);
    Ok(())
}

#[rstest]
fn overlay_sequence_stops_at_the_first_failure() -> Result<()> {
    let mut target = doc(json!({"count": 1}))?;
    let good = Overlay::new("good").with_append(doc(json!({"count": 1}))?);
    let bad = Overlay::new("bad").with_append(doc(json!({"count": "x"}))?);
    let never = Overlay::new("never").with_set(doc(json!({"count": 100}))?);
    let err = apply_overlays(&mut target, [&good, &bad, &never])
        .err()
        .ok_or_else(|| anyhow!("expected failure"))?;
    ensure!(err.overlay() == "bad");
    ensure!(
        err.to_string() == "overlay 'bad': cannot append a string onto an integer at 'count'",
        "unexpected message: {err}"
    );
    ensure!(target == doc(json!({"count": 2}))?, "earlier overlays stay applied");
    Ok(())
}

#[rstest]
fn mode_names_match_section_keys() {
    assert_eq!(ApplyMode::Set.to_string(), "set");
    assert_eq!(ApplyMode::Append.as_str(), "append");
}
