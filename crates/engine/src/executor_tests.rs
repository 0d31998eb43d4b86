//! Tests for running nodes through `NodeExecutor`.
//!
//! These use the real `Buffer2Base64` node from the `nodes` crate so the
//! harness and the node are exercised together.

use serde_json::{json, Value};

use nodes::builtin_nodes;
use plugin::{ItemPairing, NodeError, NodeExecutionData};

use crate::executor::registry_from;
use crate::{EngineError, NodeDefinition, NodeExecutor};

fn executor() -> NodeExecutor {
    NodeExecutor::new(registry_from(builtin_nodes()))
}

fn items(payloads: Vec<Value>) -> Vec<NodeExecutionData> {
    payloads
        .into_iter()
        .map(|p| NodeExecutionData::from_value(p).expect("object payload"))
        .collect()
}

fn encoder() -> NodeDefinition {
    NodeDefinition::new("Encode", "buffer2base64")
}

#[test]
fn registry_is_keyed_by_declared_name() {
    let exec = executor();

    let names: Vec<&str> = exec
        .node_types()
        .into_iter()
        .map(|n| n.description().name.as_str())
        .collect();
    assert_eq!(names, vec!["buffer2base64"]);
    assert!(exec.node_type("missing").is_none());
}

#[tokio::test]
async fn unknown_node_type_is_rejected() {
    let def = NodeDefinition::new("Nope", "does-not-exist");

    let result = executor().run(&def, items(vec![json!({})])).await;

    assert!(matches!(result, Err(EngineError::UnknownNodeType(t)) if t == "does-not-exist"));
}

#[tokio::test]
async fn configured_parameters_reach_the_node() {
    let def = encoder()
        .with_parameter("dataBuffer", json!([104, 101, 108, 108, 111]))
        .with_parameter("outputFieldName", json!("encoded"));

    let result = executor()
        .run(&def, items(vec![json!({ "id": 1 }), json!({ "id": 2 })]))
        .await
        .expect("should succeed");

    assert_eq!(result.output.len(), 1);
    let batch = &result.output[0];
    assert_eq!(batch.len(), 2);
    for (i, item) in batch.iter().enumerate() {
        assert_eq!(Value::Object(item.json.clone()), json!({ "id": i + 1, "encoded": "aGVsbG8=" }));
    }
    assert_eq!(result.error_count(), 0);
    assert!(result.finished_at >= result.started_at);
}

#[tokio::test]
async fn empty_input_produces_one_empty_batch() {
    let result = executor().run(&encoder(), Vec::new()).await.expect("should succeed");

    assert_eq!(result.output, vec![Vec::<NodeExecutionData>::new()]);
}

#[tokio::test]
async fn node_failure_aborts_with_item_index() {
    let def = encoder().with_parameter("dataBuffer", json!("not json"));

    let err = executor()
        .run(&def, items(vec![json!({})]))
        .await
        .expect_err("should fail");

    match err {
        EngineError::Node(node_err) => {
            assert_eq!(node_err.item_index(), Some(0));
            assert!(matches!(node_err, NodeError::InvalidParameter { .. }));
        }
        other => panic!("expected node error, got {other:?}"),
    }
}

#[tokio::test]
async fn continue_on_fail_collects_error_entries() {
    let def = encoder()
        .with_parameter("dataBuffer", json!([1, [2], 3]))
        .continuing_on_fail();

    let result = executor()
        .run(&def, items(vec![json!({ "a": 1 }), json!({ "b": 2 })]))
        .await
        .expect("should not abort");

    let batch = &result.output[0];
    assert_eq!(batch.len(), 2);
    assert_eq!(result.error_count(), 2);
    assert_eq!(batch[1].paired_item, Some(ItemPairing::from(1)));
    assert_eq!(Value::Object(batch[1].json.clone()), json!({ "b": 2 }));
    assert_eq!(batch[1].error.as_ref().map(|e| e.node.as_str()), Some("Encode"));
}

#[tokio::test]
async fn binary_data_survives_execution() {
    let def = encoder().with_parameter("dataBuffer", json!([104, 105]));
    let input: Vec<NodeExecutionData> = serde_json::from_value(json!([
        { "json": { "x": 1 }, "binary": { "data": { "data": "AAE=", "fileName": "a.bin" } } }
    ]))
    .unwrap();

    let result = executor().run(&def, input).await.expect("should succeed");

    assert_eq!(
        serde_json::to_value(&result.output[0]).unwrap(),
        json!([
            {
                "json": { "x": 1, "base64String": "aGk=" },
                "binary": { "data": { "data": "AAE=", "fileName": "a.bin" } }
            }
        ])
    );
}
