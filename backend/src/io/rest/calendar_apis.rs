use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::domain::commands::calendar::SubscriptionCalendarQuery;
use crate::domain::view_month::ViewMonth;
use crate::error::CalendarResult;
use crate::io::rest::mappers::calendar_mapper::CalendarMapper;
use crate::io::rest::mappers::subscription_mapper::SubscriptionMapper;
use crate::io::rest::mappers::transaction_mapper::TransactionMapper;
use crate::AppState;
use shared::{SubscriptionCalendarRequest, UpdateCalendarFocusRequest, UpdateCalendarFocusResponse};

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscriptions", post(get_subscription_calendar))
        .route("/current-date", get(get_current_date))
        .route("/focus-date", get(get_focus_date).post(set_focus_date))
        .route("/focus-date/previous", post(navigate_previous_month))
        .route("/focus-date/next", post(navigate_next_month))
}

/// Build the subscription calendar for the requested (or focused) month
async fn get_subscription_calendar(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionCalendarRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/calendar/subscriptions - month: {:?}, year: {:?}, {} subscriptions, {} transactions",
        request.month,
        request.year,
        request.subscriptions.len(),
        request.transactions.len()
    );

    let view_month = match requested_view_month(&state, request.month, request.year) {
        Ok(view_month) => view_month,
        Err(e) => {
            error!("Rejected calendar request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let query = SubscriptionCalendarQuery {
        subscriptions: SubscriptionMapper::to_domain_list(request.subscriptions),
        transactions: TransactionMapper::to_domain_list(request.transactions),
        view_month: Some(view_month),
        currency: request.currency,
        today: state.calendar_service.get_current_date(),
    };

    let calendar = state.calendar_service.generate_subscription_calendar(query);
    (StatusCode::OK, Json(calendar)).into_response()
}

/// Resolve the month to display, filling a missing month or year from the
/// current focus
fn requested_view_month(
    state: &AppState,
    month: Option<u32>,
    year: Option<i32>,
) -> CalendarResult<ViewMonth> {
    let focus = state.calendar_service.get_focus_date();
    match (month, year) {
        (None, None) => Ok(focus),
        (month, year) => ViewMonth::new(
            year.unwrap_or_else(|| focus.year()),
            month.unwrap_or_else(|| focus.month()),
        ),
    }
}

/// Get current date information from the backend
async fn get_current_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/current-date");

    let current_date = CalendarMapper::current_date_to_dto(state.calendar_service.get_current_date());
    (StatusCode::OK, Json(current_date)).into_response()
}

/// Get the current focus date for calendar navigation
async fn get_focus_date(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/calendar/focus-date");

    let focus_date = CalendarMapper::focus_date_to_dto(state.calendar_service.get_focus_date());
    (StatusCode::OK, Json(focus_date)).into_response()
}

/// Set the focus date for calendar navigation
async fn set_focus_date(
    State(state): State<AppState>,
    Json(request): Json<UpdateCalendarFocusRequest>,
) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date - request: {:?}", request);

    match state.calendar_service.set_focus_date(request.month, request.year) {
        Ok(focus) => {
            let response = UpdateCalendarFocusResponse {
                focus_date: CalendarMapper::focus_date_to_dto(focus),
                success_message: format!("Calendar focus set to {}", focus),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to set focus date: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Navigate to the previous month
async fn navigate_previous_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date/previous");

    let focus = state.calendar_service.navigate_previous_month();
    let response = UpdateCalendarFocusResponse {
        focus_date: CalendarMapper::focus_date_to_dto(focus),
        success_message: format!("Navigated to {}", focus),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Navigate to the next month
async fn navigate_next_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/calendar/focus-date/next");

    let focus = state.calendar_service.navigate_next_month();
    let response = UpdateCalendarFocusResponse {
        focus_date: CalendarMapper::focus_date_to_dto(focus),
        success_message: format!("Navigated to {}", focus),
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::{create_router, initialize_backend};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::json;
    use shared::{CalendarFocusDate, CurrentDateResponse, SubscriptionCalendarMonth};
    use tower::ServiceExt;

    fn setup() -> (AppState, Router) {
        let config = ServerConfig::default();
        let app_state = initialize_backend(&config);
        let app = create_router(app_state.clone(), &config).expect("router");
        (app_state, app)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Result<Request<Body>, Box<dyn std::error::Error>> {
        Ok(Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?)
    }

    #[tokio::test]
    async fn test_subscription_calendar() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let body = json!({
            "subscriptions": [
                {"id": "netflix", "name": "Netflix", "category": "Entertainment", "amount": 45, "logo": "/netflix.png"},
                {"id": "spotify", "name": "Spotify", "category": "Music", "amount": 17.9, "logo": "/spotify.png"}
            ],
            "transactions": [
                {"transaction_date": "2024-02-29", "transaction_day": 29, "amount": 45,
                 "merchant_name": "NETFLIX.COM", "subscription_merchant_key": "netflix", "subscription_name": "Netflix"},
                {"transaction_date": "2024-01-29", "transaction_day": 29, "amount": "45.00",
                 "merchant_name": "NETFLIX.COM", "subscription_merchant_key": "netflix", "subscription_name": "Netflix"}
            ],
            "month": 2,
            "year": 2024
        });

        let response = app.oneshot(post_json("/api/calendar/subscriptions", body)?).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: SubscriptionCalendarMonth = serde_json::from_slice(&body)?;

        assert_eq!((calendar.month, calendar.year), (2, 2024));
        assert_eq!(calendar.days_in_month, 29);
        assert!(calendar.has_history);

        let day = calendar.day(29).expect("day 29");
        let predicted: Vec<&str> = day.predicted.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(predicted, vec!["netflix"]);
        assert_eq!(day.charged.len(), 1);
        assert_eq!(day.charged[0].display_name, "Netflix");
        assert_eq!(day.charged[0].amount, 45.0);

        let predicted_total: usize = calendar.days.iter().map(|d| d.predicted.len()).sum();
        assert_eq!(predicted_total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_calendar_defaults_to_focus_month() -> Result<(), Box<dyn std::error::Error>> {
        let (app_state, app) = setup();
        app_state.calendar_service.set_focus_date(4, 2024)?;

        let response = app
            .oneshot(post_json("/api/calendar/subscriptions", json!({}))?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: SubscriptionCalendarMonth = serde_json::from_slice(&body)?;
        assert_eq!((calendar.month, calendar.year), (4, 2024));
        assert!(!calendar.has_history);
        assert!(calendar.no_history_message.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_calendar_invalid_month() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let response = app
            .oneshot(post_json("/api/calendar/subscriptions", json!({"month": 13, "year": 2024}))?)
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_calendar_accepts_loose_amounts() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let body = json!({
            "subscriptions": [
                {"id": "netflix", "name": "Netflix", "amount": "45.00"},
                {"id": "gym", "name": "Gym", "amount": null},
                {"id": "cloud", "name": "Cloud"}
            ],
            "transactions": [
                {"transaction_date": "2024-01-29", "transaction_day": null, "amount": "45.00",
                 "subscription_merchant_key": "netflix"},
                {"transaction_date": "2024-01-10", "transaction_day": 10, "amount": null,
                 "subscription_merchant_key": "gym"}
            ],
            "month": 2,
            "year": 2024,
            "currency": "MYR"
        });

        let response = app.oneshot(post_json("/api/calendar/subscriptions", body)?).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: SubscriptionCalendarMonth = serde_json::from_slice(&body)?;

        assert_eq!(calendar.monthly_spend, 45.0);
        assert_eq!(calendar.monthly_spend_display, "MYR 45.00");

        let netflix_day = calendar.day(29).expect("day 29");
        let tooltip = netflix_day.tooltip.as_ref().expect("tooltip");
        assert_eq!(tooltip.predicted[0].amount_display, "MYR 45.00");

        let gym_day = calendar.day(10).expect("day 10");
        let tooltip = gym_day.tooltip.as_ref().expect("tooltip");
        assert_eq!(tooltip.predicted[0].amount_display, "MYR 0.00");

        Ok(())
    }

    #[tokio::test]
    async fn test_subscription_calendar_keeps_undated_transactions() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let body = json!({
            "subscriptions": [
                {"id": "netflix", "name": "Netflix", "amount": 45}
            ],
            "transactions": [
                {"amount": 45, "merchant_name": "NETFLIX.COM", "subscription_merchant_key": "netflix"},
                {"transaction_date": "2024-02-12", "transaction_day": 12, "amount": 45,
                 "merchant_name": "NETFLIX.COM", "subscription_merchant_key": "netflix"}
            ],
            "month": 2,
            "year": 2024
        });

        let response = app.oneshot(post_json("/api/calendar/subscriptions", body)?).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let calendar: SubscriptionCalendarMonth = serde_json::from_slice(&body)?;

        assert!(calendar.has_history);
        let charged_total: usize = calendar.days.iter().map(|d| d.charged.len()).sum();
        assert_eq!(charged_total, 1);

        let day = calendar.day(12).expect("day 12");
        assert!(day.has_predicted);
        assert!(day.has_charged);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_current_date() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/current-date")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let current: CurrentDateResponse = serde_json::from_slice(&body)?;
        assert!((1..=12).contains(&current.month));
        assert_eq!(current.iso_date.len(), 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_focus_date() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/focus-date")
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let focus_date: CalendarFocusDate = serde_json::from_slice(&body)?;
        assert!(focus_date.month >= 1 && focus_date.month <= 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_focus_date() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let response = app
            .oneshot(post_json("/api/calendar/focus-date", json!({"month": 6, "year": 2025}))?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let response: UpdateCalendarFocusResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.focus_date, CalendarFocusDate { month: 6, year: 2025 });
        assert!(response.success_message.contains("June 2025"));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_focus_date_invalid_month() -> Result<(), Box<dyn std::error::Error>> {
        let (_, app) = setup();

        let response = app
            .oneshot(post_json("/api/calendar/focus-date", json!({"month": 13, "year": 2025}))?)
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_navigate_previous_month_rolls_year() -> Result<(), Box<dyn std::error::Error>> {
        let (app_state, app) = setup();
        app_state.calendar_service.set_focus_date(1, 2024)?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/focus-date/previous")
                    .method(Method::POST)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let response: UpdateCalendarFocusResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.focus_date, CalendarFocusDate { month: 12, year: 2023 });
        assert!(response.success_message.contains("December 2023"));

        Ok(())
    }

    #[tokio::test]
    async fn test_navigate_next_month_rolls_year() -> Result<(), Box<dyn std::error::Error>> {
        let (app_state, app) = setup();
        app_state.calendar_service.set_focus_date(12, 2023)?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/focus-date/next")
                    .method(Method::POST)
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let response: UpdateCalendarFocusResponse = serde_json::from_slice(&body)?;
        assert_eq!(response.focus_date, CalendarFocusDate { month: 1, year: 2024 });
        assert!(response.success_message.contains("January 2024"));

        Ok(())
    }
}
