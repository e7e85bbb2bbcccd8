// Chat service tests against a scripted in-process backend
//
// Exercises request composition, history discipline, tool selection, and
// response discrimination without touching the network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mcp_chat::application::{ChatError, ChatService, ServiceConfig, render};
use mcp_chat::config::{ApprovalPolicy, McpServerConfig, ToolKind};
use mcp_chat::domain::schema::{SchemaError, SchemaRegistry};
use mcp_chat::domain::types::{CompletionResult, ToolSelection, TurnRole};
use mcp_chat::model::{CompletionBackend, CompletionError, ResponsesPayload, ResponsesRequest};
use serde_json::{Value, json};

/// Backend that records composed requests and replays scripted payloads.
#[derive(Clone, Default)]
struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<Result<Value, CompletionError>>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl ScriptedBackend {
    fn push_payload(&self, payload: Value) {
        self.replies.lock().unwrap().push_back(Ok(payload));
    }

    fn push_error(&self, error: CompletionError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn create(&self, request: &ResponsesRequest) -> Result<ResponsesPayload, CompletionError> {
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        let scripted = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::invalid_response("no scripted reply")));
        scripted.map(|payload| serde_json::from_value(payload).unwrap())
    }
}

fn text_payload(text: &str) -> Value {
    json!({
        "id": "resp_1",
        "status": "completed",
        "output": [
            {
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "status": "completed",
                "content": [{"type": "output_text", "text": text}]
            }
        ],
        "usage": {"input_tokens": 10, "output_tokens": 5, "total_tokens": 15}
    })
}

fn approval_payload(tool: &str) -> Value {
    json!({
        "id": "resp_2",
        "status": "completed",
        "output": [
            {
                "id": "appr_1",
                "type": "mcp_approval_request",
                "name": tool,
                "server_label": "s3",
                "arguments": "{\"prefix\":\"logs\"}"
            }
        ]
    })
}

fn descriptor(label: &str, allowed: &[&str]) -> McpServerConfig {
    McpServerConfig {
        kind: ToolKind::Mcp,
        server_label: label.to_string(),
        server_url: format!("https://tools.example.com/mcp/{label}"),
        allowed_tools: allowed.iter().map(|name| name.to_string()).collect(),
        require_approval: ApprovalPolicy::Never,
    }
}

fn service_with(
    backend: &ScriptedBackend,
    tools: Vec<McpServerConfig>,
    params: serde_json::Map<String, Value>,
) -> ChatService<ScriptedBackend> {
    let config = ServiceConfig::new("gpt-test")
        .with_system_prompt("be brief")
        .with_tools(tools)
        .with_params(params);
    ChatService::new(backend.clone(), config)
}

#[tokio::test]
async fn first_send_composes_system_plus_single_user_turn() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload("hello"));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());

    let result = service.send("hi", &ToolSelection::All).await.expect("send");
    assert_eq!(result, CompletionResult::FinalText("hello".to_string()));

    let requests = backend.requests();
    let input = requests[0]["input"].as_array().expect("input array");
    assert_eq!(input.len(), 2);
    assert_eq!(input[0]["role"], "system");
    assert_eq!(input[0]["content"], "be brief");
    assert_eq!(input[1]["role"], "user");
    assert_eq!(input[1]["content"], "hi");
    // No configured tools: the declaration block is omitted entirely.
    assert!(requests[0].get("tools").is_none());
}

#[tokio::test]
async fn history_grows_only_on_successful_replies() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload("first reply"));
    backend.push_error(CompletionError::api(503, "unavailable"));
    backend.push_payload(text_payload("second reply"));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());

    service.send("one", &ToolSelection::All).await.expect("first send");
    assert_eq!(service.session().len(), 3);

    let failed = service.send("two", &ToolSelection::All).await;
    assert!(matches!(
        failed,
        Err(ChatError::Completion(CompletionError::Api { status: 503, .. }))
    ));
    // Failed round trip leaves the transcript untouched.
    assert_eq!(service.session().len(), 3);

    service.send("three", &ToolSelection::All).await.expect("second send");
    let roles: Vec<_> = service
        .session()
        .snapshot()
        .iter()
        .map(|turn| turn.role)
        .collect();
    assert_eq!(
        roles,
        vec![
            TurnRole::System,
            TurnRole::User,
            TurnRole::Assistant,
            TurnRole::User,
            TurnRole::Assistant,
        ]
    );

    // The third request carried the accumulated history plus the new turn.
    let third_request = &backend.requests()[2];
    assert_eq!(third_request["input"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn generation_params_pass_through_unmodified() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload("ok"));
    let params = match json!({"temperature": 0.2, "max_output_tokens": 800}) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let mut service = service_with(&backend, Vec::new(), params);

    service.send("hi", &ToolSelection::All).await.expect("send");

    let request = &backend.requests()[0];
    assert_eq!(request["temperature"], json!(0.2));
    assert_eq!(request["max_output_tokens"], json!(800));
}

#[tokio::test]
async fn tool_selection_filters_declared_groups() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload("a"));
    backend.push_payload(text_payload("b"));
    backend.push_payload(text_payload("c"));
    let tools = vec![
        descriptor("s3", &["list_buckets"]),
        descriptor("search", &["web_search"]),
    ];
    let mut service = service_with(&backend, tools, serde_json::Map::new());

    service.send("q1", &ToolSelection::All).await.expect("all");
    service.send("q2", &ToolSelection::None).await.expect("none");
    service
        .send("q3", &ToolSelection::Only(vec!["web_search".to_string()]))
        .await
        .expect("only");

    let requests = backend.requests();
    assert_eq!(requests[0]["tools"].as_array().unwrap().len(), 2);
    assert!(requests[1].get("tools").is_none());
    let only = requests[2]["tools"].as_array().unwrap();
    assert_eq!(only.len(), 1);
    assert_eq!(only[0]["server_label"], "search");
}

#[tokio::test]
async fn pending_approval_surfaces_as_tool_call_and_render_rejects_it() {
    let backend = ScriptedBackend::default();
    backend.push_payload(approval_payload("list_buckets"));
    let mut service = service_with(
        &backend,
        vec![descriptor("s3", &["list_buckets"])],
        serde_json::Map::new(),
    );

    let result = service.send("list my buckets", &ToolSelection::All).await.expect("send");
    match &result {
        CompletionResult::ToolCall { tool_name, arguments } => {
            assert_eq!(tool_name, "list_buckets");
            assert_eq!(arguments, &json!({"prefix": "logs"}));
        }
        other => panic!("expected ToolCall, got {other:?}"),
    }
    // A surfaced tool call never lands in the transcript.
    assert_eq!(service.session().len(), 1);

    let rendered = render::render(&result);
    assert!(matches!(
        rendered,
        Err(ChatError::UnresolvedToolCall { tool_name }) if tool_name == "list_buckets"
    ));
}

#[tokio::test]
async fn parse_marks_request_as_schema_bound_and_validates() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload(r#"{"buckets": ["a", "b"]}"#));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());
    let registry = SchemaRegistry::builtin();
    let schema = registry.resolve("bucket_list").expect("schema");

    let result = service
        .parse("list buckets", schema.as_ref(), &ToolSelection::All)
        .await
        .expect("parse");
    assert_eq!(
        result,
        CompletionResult::Structured(json!({"buckets": ["a", "b"]}))
    );

    let request = &backend.requests()[0];
    assert_eq!(request["text"]["format"]["type"], "json_schema");
    assert_eq!(request["text"]["format"]["name"], "bucket_list");
    assert_eq!(request["text"]["format"]["strict"], json!(true));

    // Parse appends the user turn only (system + user).
    let roles: Vec<_> = service
        .session()
        .snapshot()
        .iter()
        .map(|turn| turn.role)
        .collect();
    assert_eq!(roles, vec![TurnRole::System, TurnRole::User]);
}

#[tokio::test]
async fn parse_rejects_non_conforming_reply() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload(r#"{"buckets": "not-a-list"}"#));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());
    let registry = SchemaRegistry::builtin();
    let schema = registry.resolve("bucket_list").expect("schema");

    let result = service
        .parse("list buckets", schema.as_ref(), &ToolSelection::All)
        .await;
    assert!(matches!(
        result,
        Err(ChatError::Schema(SchemaError::Validation { .. }))
    ));
}

#[tokio::test]
async fn parse_rejects_reply_that_is_not_json() {
    let backend = ScriptedBackend::default();
    backend.push_payload(text_payload("plain prose, not JSON"));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());
    let registry = SchemaRegistry::builtin();
    let schema = registry.resolve("bucket_list").expect("schema");

    let result = service
        .parse("list buckets", schema.as_ref(), &ToolSelection::All)
        .await;
    assert!(matches!(result, Err(ChatError::MalformedStructured { .. })));
}

#[tokio::test]
async fn tool_call_in_parse_mode_is_an_explicit_error() {
    let backend = ScriptedBackend::default();
    backend.push_payload(approval_payload("list_buckets"));
    let mut service = service_with(
        &backend,
        vec![descriptor("s3", &["list_buckets"])],
        serde_json::Map::new(),
    );
    let registry = SchemaRegistry::builtin();
    let schema = registry.resolve("bucket_list").expect("schema");

    let result = service
        .parse("list buckets", schema.as_ref(), &ToolSelection::All)
        .await;
    assert!(matches!(
        result,
        Err(ChatError::UnresolvedToolCall { tool_name }) if tool_name == "list_buckets"
    ));
}

#[tokio::test]
async fn provider_failure_envelope_is_reported() {
    let backend = ScriptedBackend::default();
    backend.push_payload(json!({
        "id": "resp_9",
        "status": "failed",
        "error": {"code": "content_filter", "message": "blocked"},
        "output": []
    }));
    let mut service = service_with(&backend, Vec::new(), serde_json::Map::new());

    let result = service.send("hi", &ToolSelection::All).await;
    assert!(matches!(
        result,
        Err(ChatError::Completion(CompletionError::Provider { code, .. })) if code == "content_filter"
    ));
}
