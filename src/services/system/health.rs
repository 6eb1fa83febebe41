use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};

pub async fn get_health(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let now = chrono::Utc::now();

    // 未注册启动时间时以当前时间计
    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or(now);

    let response = HealthResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: now.signed_duration_since(started_at).num_seconds().max(0),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
}
