//! Admin dashboard loader.

use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::models::DashboardStats;
use crate::scope::ViewScope;
use crate::session::SessionContext;

/// Fetch dashboard aggregates for the signed-in admin.
///
/// The backend performs the identity check; a refusal surfaces as
/// [`AppError::Unauthorized`].
pub async fn load_dashboard(
    client: &ApiClient,
    session: &SessionContext,
    scope: &ViewScope,
) -> AppResult<DashboardStats> {
    let uid = session
        .uid()
        .ok_or_else(|| AppError::Unauthorized("Sign in as an admin first".to_string()))?;
    let stats = scope.run(client.dashboard(uid)).await?;
    tracing::info!(
        "Dashboard: {} users, {} courses",
        stats.users,
        stats.courses
    );
    Ok(stats)
}
