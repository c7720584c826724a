//! Integration tests against an in-process mock of the course backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::admin::{
    load_dashboard, read_policy, BlogsScreen, CoursesScreen, PaymentsScreen, PolicyEditor,
    RefundsScreen, SubscriptionsScreen, UsersScreen,
};
use crate::api::ApiClient;
use crate::errors::{ErrorKind, GENERIC_MESSAGE};
use crate::generation::{CourseForm, CourseStudio, PreviewState};
use crate::models::{
    BlogFlag, CreateBlogRequest, PlanType, PolicyKind, RefundStatus, SignedInUser,
    SubscriptionStatus, TopicCount, UpdateCourseRequest, UpdateUserRequest,
};
use crate::notify::Level;
use crate::scope::ViewScope;
use crate::session::SessionContext;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .with_test_writer()
        .try_init();
});

const GENERATED: &str = concat!(
    "```json\n",
    r#"{"python": ["#,
    r#"{"title": "Control Flow", "subtopics": [{"title": "Loops", "#,
    r#""theory": "", "youtube": "", "image": "", "done": false}]}, "#,
    r#"{"title": "Abstraction", "subtopics": [{"title": "Functions", "#,
    r#""theory": "", "youtube": "", "image": "", "done": false}]}"#,
    "]}\n```"
);

/// Mutable state behind the mock backend.
struct MockData {
    generated_text: String,
    prompt_delay: Duration,
    fail_prompt: bool,
    fail_mutations: bool,
    fail_lists: bool,
    calls: Vec<(String, Value)>,
    users: Value,
    courses: Value,
    blogs: Value,
    payments: Value,
    refunds: Value,
    subscriptions: Value,
    policies: Value,
}

impl Default for MockData {
    fn default() -> Self {
        Self {
            generated_text: GENERATED.to_string(),
            prompt_delay: Duration::ZERO,
            fail_prompt: false,
            fail_mutations: false,
            fail_lists: false,
            calls: Vec::new(),
            users: json!([
                {"_id": "u1", "email": "ada@example.com", "mName": "Ada", "type": "free"},
                {"_id": "u2", "email": "alan@example.com", "mName": "Alan", "type": "monthly"},
                {"_id": "u3", "email": "grace@example.com", "mName": "Grace", "type": "yearly"}
            ]),
            courses: json!([
                {"_id": "c1", "user": "u1", "mainTopic": "python",
                 "type": "Text & Image Course", "lang": "English", "approved": false},
                {"_id": "c2", "user": "u2", "mainTopic": "rust",
                 "type": "Video & Text Course", "lang": "German", "approved": false}
            ]),
            blogs: json!([
                {"_id": "b1", "title": "Why Rust", "excerpt": "fast", "category": "Tech",
                 "tags": "rust", "featured": false, "popular": false, "content": "<p>x</p>",
                 "image": {"data": {"type": "Buffer", "data": [1, 2, 3]},
                           "contentType": "image/png"}},
                {"_id": "b2", "title": "Study tips", "category": "Learning", "popular": true}
            ]),
            payments: json!([
                {"_id": "p1", "user": "u2", "email": "alan@example.com", "amount": 999,
                 "plan": "monthly", "method": "stripe", "status": "completed",
                 "date": "2024-05-01T10:00:00Z"},
                {"_id": "p2", "user": "u3", "email": "grace@example.com", "amount": 9999,
                 "plan": "yearly", "method": "paypal", "status": "refunded",
                 "date": "2024-06-01T10:00:00Z"}
            ]),
            refunds: json!([
                {"_id": "r1", "paymentId": "p2", "user": "u3", "amount": 9999,
                 "reason": "changed mind", "status": "pending", "date": "2024-06-02T10:00:00Z"},
                {"_id": "r2", "paymentId": "p1", "user": "u2", "amount": 999, "reason": "duplicate",
                 "status": "pending", "date": "2024-06-03T10:00:00Z"}
            ]),
            subscriptions: json!([
                {"_id": "s1", "user": "u2", "email": "alan@example.com", "plan": "monthly",
                 "status": "active", "startDate": "2024-05-01T10:00:00Z",
                 "endDate": "2024-06-01T10:00:00Z"},
                {"_id": "s2", "user": "u3", "email": "grace@example.com", "plan": "yearly",
                 "status": "active", "startDate": "2024-01-01T10:00:00Z",
                 "endDate": "2025-01-01T10:00:00Z"}
            ]),
            policies: json!({
                "terms": "<p>terms</p>",
                "privacy": "<p>privacy</p>",
                "cancel": "",
                "refund": "",
                "billing": ""
            }),
        }
    }
}

#[derive(Clone, Default)]
struct MockBackend {
    data: Arc<Mutex<MockData>>,
}

impl MockBackend {
    fn with<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        let mut data = self.data.lock().unwrap();
        f(&mut data)
    }

    fn calls_to(&self, path: &str) -> Vec<Value> {
        self.with(|d| {
            d.calls
                .iter()
                .filter(|(p, _)| p == path)
                .map(|(_, body)| body.clone())
                .collect()
        })
    }
}

async fn prompt(State(mock): State<MockBackend>, Json(body): Json<Value>) -> Response {
    let (delay, fail, text) = mock.with(|d| {
        d.calls.push(("/api/prompt".to_string(), body));
        (d.prompt_delay, d.fail_prompt, d.generated_text.clone())
    });
    tokio::time::sleep(delay).await;
    if fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "model unavailable"})),
        )
            .into_response();
    }
    Json(json!({ "generatedText": text })).into_response()
}

async fn create_course(State(mock): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    mock.with(|d| d.calls.push(("/api/course".to_string(), body)));
    Json(json!({"success": true, "courseId": "course-42"}))
}

async fn sign_in(Json(body): Json<Value>) -> Json<Value> {
    if body["password"] == "secret" {
        Json(json!({
            "success": true,
            "message": "ok",
            "userData": {
                "_id": "admin-1",
                "email": body["email"],
                "mName": "Root",
                "type": "yearly",
                "admin": true
            }
        }))
    } else {
        Json(json!({"success": false, "message": "Invalid email or password"}))
    }
}

async fn dashboard(Json(body): Json<Value>) -> Response {
    if body["uid"] != "admin-1" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "not an admin"})),
        )
            .into_response();
    }
    Json(json!({
        "users": 3, "courses": 2, "totalRevenue": 10998,
        "paidUsers": 2, "freeUsers": 1, "recentUsers": 1, "recentCourses": 0
    }))
    .into_response()
}

async fn renew(State(mock): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    mock.with(|d| d.calls.push(("/api/admin/subscriptions/renew".to_string(), body)));
    Json(json!({"success": true, "endDate": "2024-07-01T10:00:00Z"}))
}

/// Shared handler for every endpoint that only acknowledges.
async fn ack(State(mock): State<MockBackend>, uri: Uri, Json(body): Json<Value>) -> Json<Value> {
    let fail = mock.with(|d| {
        d.calls.push((uri.path().to_string(), body));
        d.fail_mutations
    });
    if fail {
        Json(json!({"success": false, "message": "write rejected"}))
    } else {
        Json(json!({"success": true, "message": "done"}))
    }
}

fn mock_router(mock: MockBackend) -> Router {
    let list = |pick: fn(&MockData) -> Value| {
        move |State(mock): State<MockBackend>| async move {
            match mock.with(|d| (!d.fail_lists).then(|| pick(d))) {
                Some(rows) => Json(rows).into_response(),
                None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
    };

    let mut router = Router::new()
        .route("/api/prompt", post(prompt))
        .route("/api/course", post(create_course))
        .route("/api/signin", post(sign_in))
        .route("/api/dashboard", post(dashboard))
        .route("/api/admin/subscriptions/renew", post(renew))
        .route("/api/getusers", get(list(|d| d.users.clone())))
        .route("/api/getcourses", get(list(|d| d.courses.clone())))
        .route("/api/getblogs", get(list(|d| d.blogs.clone())))
        .route("/api/admin/payments", get(list(|d| d.payments.clone())))
        .route("/api/admin/refunds", get(list(|d| d.refunds.clone())))
        .route("/api/admin/subscriptions", get(list(|d| d.subscriptions.clone())))
        .route("/api/policies", get(list(|d| d.policies.clone())));

    for path in [
        "/api/createblog",
        "/api/updateblogs",
        "/api/deleteblogs",
        "/api/updateuser",
        "/api/deleteuser",
        "/api/bulkdeleteusers",
        "/api/bulkupdateusers",
        "/api/updatecourse",
        "/api/deletecourse",
        "/api/bulkdeletecourses",
        "/api/bulkapprovecourses",
        "/api/admin/refunds/process",
        "/api/admin/refunds/bulk",
        "/api/admin/subscriptions/cancel",
        "/api/admin/subscriptions/bulk",
        "/api/saveadmin",
    ] {
        router = router.route(path, post(ack));
    }

    router.layer(TraceLayer::new_for_http()).with_state(mock)
}

/// Test fixture for integration tests.
struct TestFixture {
    client: ApiClient,
    mock: MockBackend,
    scope: ViewScope,
}

impl TestFixture {
    async fn new() -> Self {
        Lazy::force(&TRACING);
        let mock = MockBackend::default();
        let app = mock_router(mock.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestFixture {
            client: ApiClient::new(&format!("http://{}", addr)).unwrap(),
            mock,
            scope: ViewScope::new("test"),
        }
    }

    fn admin_session() -> SessionContext {
        let mut session = SessionContext::default();
        session.sign_in(&SignedInUser {
            id: "admin-1".to_string(),
            email: "root@example.com".to_string(),
            name: "Root".to_string(),
            plan_type: PlanType::Yearly,
            admin: true,
        });
        session
    }
}

fn python_form() -> CourseForm {
    let mut form = CourseForm::new("Python");
    form.topic_count = TopicCount::Four;
    form.language = "English".to_string();
    let mut notices = crate::notify::Notices::new();
    assert!(form.add_subtopic("loops", &mut notices));
    assert!(form.add_subtopic("functions", &mut notices));
    form
}

// ---- generation ----

#[tokio::test]
async fn test_generate_preview_and_confirm() {
    let fixture = TestFixture::new().await;
    let mut studio = CourseStudio::new(python_form());

    let tree = studio.submit(&fixture.client, &fixture.scope).await.unwrap();
    assert_eq!(tree.main_topic(), Some("python"));
    assert_eq!(tree.topics("python").unwrap().len(), 2);
    assert!(!studio.is_loading());
    assert!(matches!(studio.state(), PreviewState::Previewing(_)));

    let prompts = fixture.mock.calls_to("/api/prompt");
    assert_eq!(prompts.len(), 1);
    let sent = prompts[0]["prompt"].as_str().unwrap();
    assert!(sent.contains("python"));
    assert!(sent.contains("loops, functions"));
    assert!(sent.contains("Strict 4 topics"));

    let session = TestFixture::admin_session();
    let course_id = studio
        .confirm(&fixture.client, &session, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(course_id, "course-42");
    assert_eq!(studio.state(), &PreviewState::Editing);

    let saved = fixture.mock.calls_to("/api/course");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["user"], "admin-1");
    assert_eq!(saved[0]["mainTopic"], "python");
    assert_eq!(saved[0]["type"], "Text & Image Course");
    let raw = saved[0]["content"].as_str().unwrap();
    let content: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(content["python"][0]["title"], "Control Flow");
}

#[tokio::test]
async fn test_edit_discards_preview() {
    let fixture = TestFixture::new().await;
    let mut studio = CourseStudio::new(python_form());
    studio.submit(&fixture.client, &fixture.scope).await.unwrap();

    assert!(studio.edit());
    assert!(studio.preview().is_none());

    // Resubmission is allowed again after editing.
    studio.submit(&fixture.client, &fixture.scope).await.unwrap();
    assert_eq!(fixture.mock.calls_to("/api/prompt").len(), 2);
}

#[tokio::test]
async fn test_submit_twice_without_edit_is_rejected() {
    let fixture = TestFixture::new().await;
    let mut studio = CourseStudio::new(python_form());
    studio.submit(&fixture.client, &fixture.scope).await.unwrap();

    let err = studio
        .submit(&fixture.client, &fixture.scope)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(fixture.mock.calls_to("/api/prompt").len(), 1);
}

#[tokio::test]
async fn test_malformed_generation_is_parse_error() {
    let fixture = TestFixture::new().await;
    fixture
        .mock
        .with(|d| d.generated_text = "```json\n{\"python\": [ oops\n```".to_string());
    let mut studio = CourseStudio::new(python_form());

    let err = studio
        .submit(&fixture.client, &fixture.scope)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!studio.is_loading());
    assert_eq!(studio.state(), &PreviewState::Editing);
    let notices = studio.notices.all();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, Level::Error);
    assert_eq!(notices[0].message, GENERIC_MESSAGE);
}

#[tokio::test]
async fn test_generation_server_error_is_server_kind() {
    let fixture = TestFixture::new().await;
    fixture.mock.with(|d| d.fail_prompt = true);
    let mut studio = CourseStudio::new(python_form());

    let err = studio
        .submit(&fixture.client, &fixture.scope)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert!(err.message().contains("model unavailable"));
    assert!(!studio.is_loading());
    assert_eq!(studio.notices.errors().count(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_kind() {
    Lazy::force(&TRACING);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr)).unwrap();
    let scope = ViewScope::new("offline");
    let mut studio = CourseStudio::new(python_form());

    let err = studio.submit(&client, &scope).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.user_message(), GENERIC_MESSAGE);
}

#[tokio::test]
async fn test_late_generation_response_is_ignored() {
    let fixture = TestFixture::new().await;
    fixture.mock.with(|d| d.prompt_delay = Duration::from_secs(2));
    let mut studio = CourseStudio::new(python_form());

    let scope = fixture.scope.child("studio");
    let handle = scope.cancel_handle();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = studio.submit(&fixture.client, &scope).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(studio.state(), &PreviewState::Editing);
    assert!(studio.notices.all().is_empty());
}

#[tokio::test]
async fn test_sign_in() {
    let fixture = TestFixture::new().await;

    let user = fixture
        .client
        .sign_in("root@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(user.id, "admin-1");
    assert!(user.admin);
    assert_eq!(user.plan_type, PlanType::Yearly);

    let err = fixture
        .client
        .sign_in("root@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

// ---- admin screens ----

#[tokio::test]
async fn test_users_bulk_delete_patches_locally() {
    let fixture = TestFixture::new().await;
    let mut screen = UsersScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(screen.view.items().len(), 3);

    screen.view.toggle_all();
    screen.view.toggle("u2");
    assert_eq!(screen.view.selection().len(), 2);

    let removed = screen
        .bulk_delete(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(screen.view.items().len(), 1);
    assert_eq!(screen.view.items()[0].id, "u2");
    assert!(screen.view.selection().is_empty());

    let calls = fixture.mock.calls_to("/api/bulkdeleteusers");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["ids"], json!(["u1", "u3"]));
}

#[tokio::test]
async fn test_users_bulk_change_plan() {
    let fixture = TestFixture::new().await;
    let mut screen = UsersScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    screen.view.set_filter("type", "free");
    screen.view.toggle_all();
    screen
        .bulk_change_plan(&fixture.client, &fixture.scope, PlanType::Monthly)
        .await
        .unwrap();

    let calls = fixture.mock.calls_to("/api/bulkupdateusers");
    assert_eq!(calls[0], json!({"ids": ["u1"], "type": "monthly"}));
    assert_eq!(screen.view.get("u1").unwrap().plan_type, PlanType::Monthly);
    assert!(screen.view.visible().is_empty());
}

#[tokio::test]
async fn test_failed_bulk_action_leaves_state_untouched() {
    let fixture = TestFixture::new().await;
    fixture.mock.with(|d| d.fail_mutations = true);
    let mut screen = UsersScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    screen.view.toggle_all();
    let err = screen
        .bulk_delete(&fixture.client, &fixture.scope)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(screen.view.items().len(), 3);
    assert_eq!(screen.view.selection().len(), 3);
    assert_eq!(screen.notices.errors().count(), 1);
}

#[tokio::test]
async fn test_users_update_patches_locally() {
    let fixture = TestFixture::new().await;
    let mut screen = UsersScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let request = UpdateUserRequest {
        id: "u1".to_string(),
        name: Some("Ada L".to_string()),
        email: None,
        plan_type: Some(PlanType::Yearly),
    };
    screen
        .update(&fixture.client, &fixture.scope, request)
        .await
        .unwrap();

    assert_eq!(
        fixture.mock.calls_to("/api/updateuser")[0],
        json!({"id": "u1", "mName": "Ada L", "type": "yearly"})
    );
    let user = screen.view.get("u1").unwrap();
    assert_eq!(user.name, "Ada L");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.plan_type, PlanType::Yearly);
    assert_eq!(screen.view.get("u2").unwrap().name, "Alan");
}

#[tokio::test]
async fn test_courses_update_patches_locally() {
    let fixture = TestFixture::new().await;
    let mut screen = CoursesScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let request = UpdateCourseRequest {
        id: "c1".to_string(),
        main_topic: Some("python 3".to_string()),
        course_type: Some("Video & Text Course".to_string()),
    };
    screen
        .update(&fixture.client, &fixture.scope, request)
        .await
        .unwrap();

    assert_eq!(
        fixture.mock.calls_to("/api/updatecourse")[0],
        json!({"id": "c1", "mainTopic": "python 3", "type": "Video & Text Course"})
    );
    let course = screen.view.get("c1").unwrap();
    assert_eq!(course.main_topic, "python 3");
    assert_eq!(course.course_type, "Video & Text Course");
    screen.view.set_filter("type", "video & text course");
    assert_eq!(screen.view.visible().len(), 2);
}

#[tokio::test]
async fn test_failed_single_mutation_leaves_row_untouched() {
    let fixture = TestFixture::new().await;
    fixture.mock.with(|d| d.fail_mutations = true);
    let mut screen = RefundsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let err = screen
        .process(&fixture.client, &fixture.scope, "r1", RefundStatus::Approved)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(screen.view.get("r1").unwrap().status, RefundStatus::Pending);
    assert_eq!(screen.notices.errors().count(), 1);
    assert_eq!(fixture.mock.calls_to("/api/admin/refunds/process").len(), 1);
}

#[tokio::test]
async fn test_bulk_action_requires_selection() {
    let fixture = TestFixture::new().await;
    let mut screen = CoursesScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let err = screen
        .bulk_approve(&fixture.client, &fixture.scope)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(fixture.mock.calls_to("/api/bulkapprovecourses").is_empty());
}

#[tokio::test]
async fn test_courses_approve_and_delete() {
    let fixture = TestFixture::new().await;
    let mut screen = CoursesScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    screen.view.set_query("RUST");
    screen.view.toggle_all();
    screen
        .bulk_approve(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    assert!(screen.view.get("c2").unwrap().approved);
    assert!(!screen.view.get("c1").unwrap().approved);

    screen
        .delete(&fixture.client, &fixture.scope, "c1")
        .await
        .unwrap();
    assert!(screen.view.get("c1").is_none());
    assert_eq!(fixture.mock.calls_to("/api/deletecourse")[0]["id"], "c1");
}

#[tokio::test]
async fn test_blog_flags_patch_without_refetch() {
    let fixture = TestFixture::new().await;
    let mut screen = BlogsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(
        screen.view.get("b1").unwrap().image_url().as_deref(),
        Some("data:image/png;base64,AQID")
    );

    let value = screen
        .toggle_flag(&fixture.client, &fixture.scope, "b1", BlogFlag::Featured)
        .await
        .unwrap();
    assert!(value);
    assert!(screen.view.get("b1").unwrap().featured);

    let value = screen
        .toggle_flag(&fixture.client, &fixture.scope, "b2", BlogFlag::Popular)
        .await
        .unwrap();
    assert!(!value);
    assert!(!screen.view.get("b2").unwrap().popular);

    screen
        .delete(&fixture.client, &fixture.scope, "b2")
        .await
        .unwrap();
    assert_eq!(screen.view.items().len(), 1);

    let updates = fixture.mock.calls_to("/api/updateblogs");
    assert_eq!(updates[0], json!({"id": "b1", "type": "featured", "value": true}));
    assert_eq!(updates[1], json!({"id": "b2", "type": "popular", "value": false}));
}

#[tokio::test]
async fn test_blog_create_sends_data_url() {
    let fixture = TestFixture::new().await;
    let mut screen = BlogsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let request = CreateBlogRequest {
        title: "New post".to_string(),
        excerpt: "short".to_string(),
        content: "<p>body</p>".to_string(),
        category: "Tech".to_string(),
        tags: "ai".to_string(),
        image: None,
    }
    .with_image(b"hi", "image/png");
    screen
        .create(&fixture.client, &fixture.scope, request)
        .await
        .unwrap();

    let created = fixture.mock.calls_to("/api/createblog");
    assert_eq!(created[0]["image"], "data:image/png;base64,aGk=");
    assert_eq!(screen.view.items().len(), 2);
}

#[tokio::test]
async fn test_blog_create_survives_failed_refresh() {
    let fixture = TestFixture::new().await;
    let mut screen = BlogsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    fixture.mock.with(|d| d.fail_lists = true);

    let request = CreateBlogRequest {
        title: "New post".to_string(),
        excerpt: String::new(),
        content: "<p>body</p>".to_string(),
        category: "Tech".to_string(),
        tags: String::new(),
        image: None,
    };
    screen
        .create(&fixture.client, &fixture.scope, request)
        .await
        .unwrap();

    assert_eq!(fixture.mock.calls_to("/api/createblog").len(), 1);
    assert_eq!(screen.view.items().len(), 2);
    assert_eq!(screen.notices.errors().count(), 0);
    let levels: Vec<Level> = screen.notices.all().iter().map(|n| n.level).collect();
    assert_eq!(levels, vec![Level::Success, Level::Info]);
}

#[tokio::test]
async fn test_payments_filter_and_summary() {
    let fixture = TestFixture::new().await;
    let mut screen = PaymentsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    let all = screen.within(None, None);
    let summary = PaymentsScreen::summarize(&all);
    assert_eq!(summary.completed, 999);
    assert_eq!(summary.refunded, 9999);

    screen.view.set_filter("method", "paypal");
    let visible = screen.view.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "p2");
}

#[tokio::test]
async fn test_refunds_process_and_bulk() {
    let fixture = TestFixture::new().await;
    let mut screen = RefundsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    screen
        .process(&fixture.client, &fixture.scope, "r1", RefundStatus::Approved)
        .await
        .unwrap();
    assert_eq!(screen.view.get("r1").unwrap().status, RefundStatus::Approved);

    screen.view.set_filter("status", "pending");
    screen.view.toggle_all();
    let touched = screen
        .bulk_process(&fixture.client, &fixture.scope, RefundStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(touched, 1);
    assert_eq!(screen.view.get("r2").unwrap().status, RefundStatus::Rejected);
    assert_eq!(
        fixture.mock.calls_to("/api/admin/refunds/bulk")[0],
        json!({"ids": ["r2"], "status": "rejected"})
    );
}

#[tokio::test]
async fn test_subscriptions_cancel_and_renew() {
    let fixture = TestFixture::new().await;
    let mut screen = SubscriptionsScreen::load(&fixture.client, &fixture.scope)
        .await
        .unwrap();

    screen
        .cancel(&fixture.client, &fixture.scope, "s2")
        .await
        .unwrap();
    assert_eq!(
        screen.view.get("s2").unwrap().status,
        SubscriptionStatus::Cancelled
    );

    screen
        .renew(&fixture.client, &fixture.scope, "s1")
        .await
        .unwrap();
    let s1 = screen.view.get("s1").unwrap();
    assert_eq!(s1.status, SubscriptionStatus::Active);
    assert_eq!(s1.end_date.to_rfc3339(), "2024-07-01T10:00:00+00:00");

    screen.view.toggle_all();
    let touched = screen
        .bulk_cancel(&fixture.client, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(touched, 2);
    assert_eq!(
        fixture.mock.calls_to("/api/admin/subscriptions/bulk")[0]["action"],
        "cancel"
    );
}

#[tokio::test]
async fn test_policy_editor_saves_only_dirty_pages() {
    let fixture = TestFixture::new().await;
    let mut session = SessionContext::default();
    let mut editor = PolicyEditor::load(&fixture.client, &mut session, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(session.cached_policy(PolicyKind::Terms), Some("<p>terms</p>"));

    let sent = editor
        .save(&fixture.client, &mut session, &fixture.scope, PolicyKind::Terms)
        .await
        .unwrap();
    assert!(!sent);

    editor.edit(PolicyKind::Billing, "<p>billing</p>");
    assert!(editor.is_dirty(PolicyKind::Billing));
    let sent = editor
        .save(&fixture.client, &mut session, &fixture.scope, PolicyKind::Billing)
        .await
        .unwrap();
    assert!(sent);
    assert!(!editor.is_dirty(PolicyKind::Billing));
    assert_eq!(session.cached_policy(PolicyKind::Billing), Some("<p>billing</p>"));

    let saved = fixture.mock.calls_to("/api/saveadmin");
    assert_eq!(saved, vec![json!({"type": "billing", "data": "<p>billing</p>"})]);
}

#[tokio::test]
async fn test_read_policy_prefers_session_cache() {
    let fixture = TestFixture::new().await;
    let mut session = SessionContext::default();
    session.cache_policy(PolicyKind::Privacy, "<p>cached</p>");

    let html = read_policy(
        &fixture.client,
        &mut session,
        &fixture.scope,
        PolicyKind::Privacy,
    )
    .await
    .unwrap();
    assert_eq!(html, "<p>cached</p>");

    let html = read_policy(
        &fixture.client,
        &mut session,
        &fixture.scope,
        PolicyKind::Terms,
    )
    .await
    .unwrap();
    assert_eq!(html, "<p>terms</p>");
    assert_eq!(session.cached_policy(PolicyKind::Terms), Some("<p>terms</p>"));
}

#[tokio::test]
async fn test_dashboard_requires_admin() {
    let fixture = TestFixture::new().await;

    let admin = TestFixture::admin_session();
    let stats = load_dashboard(&fixture.client, &admin, &fixture.scope)
        .await
        .unwrap();
    assert_eq!(stats.users, 3);
    assert_eq!(stats.total_revenue, 10998);

    let mut other = SessionContext::default();
    other.sign_in(&SignedInUser {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        plan_type: PlanType::Free,
        admin: false,
    });
    let err = load_dashboard(&fixture.client, &other, &fixture.scope)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let anonymous = SessionContext::default();
    let err = load_dashboard(&fixture.client, &anonymous, &fixture.scope)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}
