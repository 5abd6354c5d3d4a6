use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use relayout::{Error, ExperimentDocument, LayoutClient, auto_layout, build_graph};

fn fixture_document() -> String {
    json!({
        "Graph": {
            "ModuleNodes": [
                { "Id": "A", "InputPortsInternal": [] },
                { "Id": "B", "InputPortsInternal": [] }
            ],
            "EdgesInternal": [
                { "SourceOutputPortId": "A:0", "DestinationInputPortId": "B:0" }
            ],
            "SerializedClientData": "<ClientData><NodePositions>\
                <NodePosition Node='A' Position='10,20,300,100'/>\
                <NodePosition Node='B' Position='30,40,300,100'/>\
                </NodePositions></ClientData>",
        }
    })
    .to_string()
}

fn laid_out_response() -> serde_json::Value {
    json!({
        "Id": "",
        "Nodes": [
            { "Id": "A", "CenterX": 120.0, "CenterY": 80.0, "Width": 300, "Height": 100, "UserData": "A" },
            { "Id": "B", "CenterX": 120.0, "CenterY": 260.0, "Width": 300, "Height": 100, "UserData": "B" }
        ],
        "Edges": [
            { "SourceNode": "A", "DestinationNode": "B" }
        ],
        "UserData": ""
    })
}

#[tokio::test]
async fn layout_round_trip_patches_the_document() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/layout"))
        .and(body_partial_json(json!({
            "Nodes": [
                { "Id": "A", "Width": 300, "Height": 100 },
                { "Id": "B", "Width": 300, "Height": 100 }
            ],
            "Edges": [ { "SourceNode": "A", "DestinationNode": "B" } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(laid_out_response()))
        .expect(1)
        .mount(&server)
        .await;

    let raw = fixture_document();
    let client = LayoutClient::new(format!("{}/layout", server.uri()))?;
    let patched = auto_layout(&raw, &client).await?;

    assert!(patched.contains("<NodePosition Node='A' Position='120,80,300,100'/>"));
    assert!(patched.contains("<NodePosition Node='B' Position='120,260,300,100'/>"));
    assert!(!patched.contains("Position='10,20,300,100'"));
    Ok(())
}

#[tokio::test]
async fn failed_layout_propagates_status_and_body() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("layout backend exploded"))
        .mount(&server)
        .await;

    let raw = fixture_document();
    let client = LayoutClient::new(server.uri())?;
    let err = auto_layout(&raw, &client).await.unwrap_err();

    match err {
        Error::LayoutService { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("layout backend exploded"));
        }
        other => panic!("expected LayoutService error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn failed_layout_applies_nothing_to_the_graph() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let raw = fixture_document();
    let mut graph = build_graph(&ExperimentDocument::parse(&raw)?)?;
    let before: Vec<(f64, f64)> = graph
        .nodes()
        .map(|node| (node.center_x, node.center_y))
        .collect();

    let client = LayoutClient::new(server.uri())?;
    assert!(client.layout(&mut graph).await.is_err());

    let after: Vec<(f64, f64)> = graph
        .nodes()
        .map(|node| (node.center_x, node.center_y))
        .collect();
    assert_eq!(before, after);
    Ok(())
}

#[tokio::test]
async fn unknown_response_node_is_skipped() -> Result<()> {
    let server = MockServer::start().await;
    let mut response = laid_out_response();
    response["Nodes"].as_array_mut().unwrap().push(json!(
        { "Id": "stranger", "CenterX": 1.0, "CenterY": 2.0, "Width": 300, "Height": 100, "UserData": "stranger" }
    ));
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let raw = fixture_document();
    let mut graph = build_graph(&ExperimentDocument::parse(&raw)?)?;
    let client = LayoutClient::new(server.uri())?;
    client.layout(&mut graph).await?;

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.node("A").unwrap().center_x, 120.0);
    assert!(graph.node("stranger").is_none());
    Ok(())
}
