use shared_types::{AppError, DashboardData};

use crate::ApiClient;

pub const DASHBOARD_PATH: &str = "/api/dashboardRoutes";

/// Every aggregate series in one round trip.
pub async fn fetch_dashboard(client: &ApiClient) -> Result<DashboardData, AppError> {
    client.get(DASHBOARD_PATH).await
}
