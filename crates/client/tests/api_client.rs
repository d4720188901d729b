//! Client tests against an in-process fake backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use finwise_client::{
    ApiClient, ApiClientConfig, BudgetFilter, ClientError, SessionToken, TokenProvider,
};
use finwise_core::budget::{
    BudgetDraft, CategoryAllocationDraft, CategoryQuery, CategoryType, NewCategory, PeriodType,
    submit_budget,
};
use finwise_core::wizard::{
    Alert, BUDGET_CREATE_FALLBACK, BudgetWizard, CATEGORY_CREATE_FALLBACK, Navigate,
};
use finwise_shared::AppError;
use finwise_shared::types::{BudgetId, Money, UserCategoryId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::time::Duration;

const TOKEN: &str = "good-token";

#[derive(Default)]
struct Backend {
    /// `METHOD path` of every authorized request, in arrival order.
    calls: Mutex<Vec<String>>,
    /// Raw `Authorization` header of every request.
    auth_headers: Mutex<Vec<Option<String>>>,
    queries: Mutex<Vec<HashMap<String, String>>>,
    bodies: Mutex<Vec<Value>>,
    /// Allocation names the backend refuses.
    failing_allocations: Vec<&'static str>,
    budget_id: Mutex<Option<BudgetId>>,
}

impl Backend {
    fn failing(names: &[&'static str]) -> Self {
        Self {
            failing_allocations: names.to_vec(),
            ..Self::default()
        }
    }

    fn authorize(&self, method: &str, path: &str, headers: &HeaderMap) -> Result<(), Response> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        self.auth_headers.lock().unwrap().push(header.clone());

        if header.as_deref() != Some(&format!("Bearer {TOKEN}")) {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Could not validate credentials"})),
            )
                .into_response());
        }
        self.calls.lock().unwrap().push(format!("{method} {path}"));
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

type Shared = Arc<Backend>;

async fn my_categories(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = backend.authorize("GET", "/categories/my-categories", &headers) {
        return rejection;
    }
    backend.queries.lock().unwrap().push(query);
    Json(json!({
        "display_categories": [
            {"user_category_id": UserCategoryId::new().to_string(), "display_name": "Food"},
            {"user_category_id": UserCategoryId::new().to_string(), "display_name": "Transport"}
        ]
    }))
    .into_response()
}

async fn create_category(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = backend.authorize("POST", "/categories/user-categories/", &headers) {
        return rejection;
    }
    let name = body["custom_name"].as_str().unwrap_or_default().to_string();
    backend.bodies.lock().unwrap().push(body);
    if name == "Food" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"detail": "Category already exists"})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"user_category_id": UserCategoryId::new().to_string(), "custom_name": name})),
    )
        .into_response()
}

async fn create_budget(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = backend.authorize("POST", "/budgets/", &headers) {
        return rejection;
    }
    let name = body["budget_name"].clone();
    let positive = body["amount"]
        .as_str()
        .and_then(|a| a.parse::<Decimal>().ok())
        .is_some_and(|a| a > Decimal::ZERO);
    backend.bodies.lock().unwrap().push(body);
    if !positive {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [
                {"loc": ["body", "amount"], "msg": "Input should be greater than 0"}
            ]})),
        )
            .into_response();
    }

    let id = BudgetId::new();
    *backend.budget_id.lock().unwrap() = Some(id);
    (
        StatusCode::CREATED,
        Json(json!({"BudgetID": id.to_string(), "BudgetName": name, "IsActive": true})),
    )
        .into_response()
}

async fn create_allocation(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) =
        backend.authorize("POST", &format!("/budgets/{id}/categories"), &headers)
    {
        return rejection;
    }
    let name = body["category_display_name"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    backend.bodies.lock().unwrap().push(body);
    if backend.failing_allocations.contains(&name.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Category not found"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({"budget_id": id}))).into_response()
}

async fn list_budgets(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = backend.authorize("GET", "/budgets/", &headers) {
        return rejection;
    }
    backend.queries.lock().unwrap().push(query);
    Json(json!({
        "budgets": [{
            "BudgetID": BudgetId::new().to_string(),
            "budget_name": "July",
            "budget_type": "monthly",
            "amount": "1000.00",
            "period_start": "2025-07-01",
            "period_end": "2025-07-31",
            "total_spent": 420,
            "is_active": true
        }],
        "total": 1
    }))
    .into_response()
}

async fn vs_actual(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(rejection) = backend.authorize("GET", &format!("/budgets/{id}/vs-actual"), &headers)
    {
        return rejection;
    }
    if id == broken_budget().to_string() {
        return "<html>oops</html>".into_response();
    }
    Json(json!({
        "budget_id": id,
        "categories": [{
            "user_category_id": UserCategoryId::new().to_string(),
            "category_name": "Food",
            "allocated_amount": "400.00",
            "spent_amount": "450.00",
            "remaining_amount": "-50.00",
            "percentage_used": "112.50",
            "over_budget": true
        }]
    }))
    .into_response()
}

/// Budget whose comparison endpoint answers with a non-JSON body.
fn broken_budget() -> BudgetId {
    "00000000-0000-0000-0000-000000000000".parse().unwrap()
}

async fn spawn_backend(backend: Shared) -> String {
    let app = Router::new()
        .route("/categories/my-categories", get(my_categories))
        .route("/categories/user-categories/", post(create_category))
        .route("/budgets/", get(list_budgets).post(create_budget))
        .route("/budgets/{id}/categories", post(create_allocation))
        .route("/budgets/{id}/vs-actual", get(vs_actual))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String, tokens: Arc<SessionToken>) -> ApiClient {
    let config = ApiClientConfig {
        base_url,
        timeout: Duration::from_secs(5),
    };
    ApiClient::new(&config, tokens).unwrap()
}

fn draft(amount: Money) -> BudgetDraft {
    BudgetDraft {
        name: "July".into(),
        period_type: PeriodType::Monthly,
        total_amount: amount,
        ..BudgetDraft::default()
    }
}

#[tokio::test]
async fn test_categories_sent_with_token_and_picker_query() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend.clone()).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    let categories = api
        .list_categories(&CategoryQuery::expense_picker())
        .await
        .unwrap();

    let names: Vec<_> = categories.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, ["Food", "Transport"]);
    assert!(categories
        .iter()
        .all(|c| c.category_type == CategoryType::Expense));

    let query = backend.queries.lock().unwrap()[0].clone();
    assert_eq!(query["category_type"], "expense");
    assert_eq!(query["skip"], "0");
    assert_eq!(query["limit"], "99");
    assert_eq!(query["is_active"], "true");
    assert_eq!(query["sort_order"], "desc");
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_runs_hook() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend.clone()).await;
    let tokens = Arc::new(SessionToken::new(Some("stale".into())));
    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = hook_calls.clone();
    let api = client(base, tokens.clone()).with_unauthorized_hook(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let err = api
        .list_categories(&CategoryQuery::expense_picker())
        .await
        .unwrap_err();

    assert!(matches!(&err, ClientError::Unauthorized(m) if m == "Could not validate credentials"));
    assert!(tokens.token().is_none());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);

    // The next request goes out without a token at all.
    let _ = api.list_budgets(&BudgetFilter::default()).await;
    let headers = backend.auth_headers.lock().unwrap().clone();
    assert_eq!(headers, vec![Some("Bearer stale".to_string()), None]);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    let err = api
        .create_category(&NewCategory {
            name: "Food".into(),
            category_type: CategoryType::Expense,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api(AppError::Conflict(ref m)) if m == "Category already exists"
    ));

    let err = api.create_budget(&draft(Money::ZERO)).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api(AppError::BusinessRule(ref m)) if m == "Input should be greater than 0"
    ));
}

#[tokio::test]
async fn test_create_category_returns_id() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend.clone()).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    api.create_category(&NewCategory {
        name: "Pets".into(),
        category_type: CategoryType::Expense,
    })
    .await
    .unwrap();

    let body = backend.bodies.lock().unwrap()[0].clone();
    assert_eq!(body, json!({"custom_name": "Pets", "category_type": "expense"}));
}

#[tokio::test]
async fn test_submission_is_sequential_and_reports_failures() {
    let backend = Arc::new(Backend::failing(&["Food"]));
    let base = spawn_backend(backend.clone()).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));
    let allocations = vec![
        CategoryAllocationDraft::new(None, "Food", Money::new(dec!(400))),
        CategoryAllocationDraft::new(None, "Transport", Money::new(dec!(300))),
    ];

    let report = submit_budget(&api, &draft(Money::new(dec!(1000))), &allocations)
        .await
        .unwrap();

    let budget_id = backend.budget_id.lock().unwrap().unwrap();
    assert_eq!(report.budget.budget_id, budget_id);
    assert_eq!(report.budget.budget_name, "July");
    assert_eq!(report.created_count(), 1);
    assert_eq!(
        report.failures().map(|r| r.display_name.as_str()).collect::<Vec<_>>(),
        ["Food"]
    );
    assert_eq!(
        backend.calls(),
        vec![
            "POST /budgets/".to_string(),
            format!("POST /budgets/{budget_id}/categories"),
            format!("POST /budgets/{budget_id}/categories"),
        ]
    );

    let bodies = backend.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0]["budget_type"], "monthly");
    assert_eq!(bodies[0]["amount"], "1000");
    assert_eq!(
        bodies[2],
        json!({"category_display_name": "Transport", "allocated_amount": "300"})
    );
}

#[tokio::test]
async fn test_wizard_end_to_end_partial_success() {
    let backend = Arc::new(Backend::failing(&["Food"]));
    let base = spawn_backend(backend.clone()).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    let mut wizard = BudgetWizard::with_draft(draft(Money::new(dec!(1000))));
    assert_eq!(wizard.next(&api).await.unwrap(), Navigate::Stay);
    wizard
        .add_allocation(Some("Food"), Money::new(dec!(400)))
        .unwrap();
    wizard
        .add_allocation(Some("Transport"), Money::new(dec!(300)))
        .unwrap();
    assert_eq!(wizard.summary().percent_used, dec!(70));

    let effect = wizard.submit(&api).await.unwrap();

    assert_eq!(effect.navigate, Navigate::BudgetList);
    assert_eq!(
        effect.alert,
        Some(Alert::PartialSuccess {
            budget_name: "July".into(),
            failed: vec!["Food".into()],
        })
    );
    assert!(wizard.allocations().is_empty());
}

#[tokio::test]
async fn test_wizard_goes_to_login_on_expired_session() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend.clone()).await;
    let tokens = Arc::new(SessionToken::new(Some("expired".into())));
    let api = client(base, tokens.clone());

    let mut wizard = BudgetWizard::new();
    assert_eq!(wizard.next(&api).await.unwrap(), Navigate::Login);
    assert!(!tokens.is_present());
}

#[tokio::test]
async fn test_budget_list_and_vs_actual() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend.clone()).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    let filter = BudgetFilter {
        budget_type: Some(PeriodType::Monthly),
        is_active: Some(true),
        ..BudgetFilter::default()
    };
    let budgets = api.list_budgets(&filter).await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].budget_name, "July");
    assert_eq!(budgets[0].total_spent, Some(Money::new(dec!(420))));

    let query = backend.queries.lock().unwrap()[0].clone();
    assert_eq!(query["sort_by"], "CreatedAt");
    assert_eq!(query["budget_type"], "monthly");
    assert_eq!(query["is_active"], "true");
    assert_eq!(query["limit"], "10");

    let rows = api.budget_vs_actual(budgets[0].budget_id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].over_budget);
    assert_eq!(rows[0].remaining_amount, Money::new(dec!(-50)));
    assert_eq!(rows[0].percentage_used, dec!(112.5));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = Arc::new(Backend::default());
    let base = spawn_backend(backend).await;
    let api = client(base, Arc::new(SessionToken::new(Some(TOKEN.into()))));

    let err = api
        .budget_vs_actual(broken_budget())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(
        format!("http://{addr}"),
        Arc::new(SessionToken::new(Some(TOKEN.into()))),
    );
    let err = api
        .list_budgets(&BudgetFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(matches!(AppError::from(err), AppError::Internal(_)));
}

#[tokio::test]
async fn test_unreachable_backend_alerts_use_fallback_messages() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(
        format!("http://{addr}"),
        Arc::new(SessionToken::new(Some(TOKEN.into()))),
    );
    let mut wizard = BudgetWizard::with_draft(draft(Money::new(dec!(1000))));
    assert_eq!(wizard.next(&api).await.unwrap(), Navigate::Stay);

    wizard.open_new_category_form().unwrap().name = "Pets".into();
    let effect = wizard.create_category(&api).await.unwrap();
    assert_eq!(
        effect.alert,
        Some(Alert::CategoryFailed {
            message: CATEGORY_CREATE_FALLBACK.into()
        })
    );

    let effect = wizard.submit(&api).await.unwrap();
    assert_eq!(effect.navigate, Navigate::Stay);
    assert_eq!(
        effect.alert,
        Some(Alert::BudgetFailed {
            message: BUDGET_CREATE_FALLBACK.into()
        })
    );
}
