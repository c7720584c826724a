//! Billing administration endpoints under `/api/admin`.

use chrono::{DateTime, Utc};

use super::{check_ack, ApiClient};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Ack, BulkProcessRefundsRequest, BulkSubscriptionRequest, IdRequest, Payment,
    ProcessRefundRequest, Refund, RefundStatus, RenewSubscriptionResponse, Subscription,
    SubscriptionAction,
};

impl ApiClient {
    /// GET /api/admin/payments - List all payments.
    pub async fn list_payments(&self) -> AppResult<Vec<Payment>> {
        self.get_json("/api/admin/payments").await
    }

    /// GET /api/admin/refunds - List all refund requests.
    pub async fn list_refunds(&self) -> AppResult<Vec<Refund>> {
        self.get_json("/api/admin/refunds").await
    }

    /// POST /api/admin/refunds/process - Approve or reject one refund.
    pub async fn process_refund(&self, id: &str, status: RefundStatus) -> AppResult<()> {
        let request = ProcessRefundRequest {
            id: id.to_string(),
            status,
        };
        self.post_ack("/api/admin/refunds/process", &request).await?;
        Ok(())
    }

    /// POST /api/admin/refunds/bulk - Approve or reject several refunds.
    pub async fn bulk_process_refunds(
        &self,
        ids: &[String],
        status: RefundStatus,
    ) -> AppResult<()> {
        let request = BulkProcessRefundsRequest {
            ids: ids.to_vec(),
            status,
        };
        self.post_ack("/api/admin/refunds/bulk", &request).await?;
        Ok(())
    }

    /// GET /api/admin/subscriptions - List all subscriptions.
    pub async fn list_subscriptions(&self) -> AppResult<Vec<Subscription>> {
        self.get_json("/api/admin/subscriptions").await
    }

    /// POST /api/admin/subscriptions/cancel - Cancel one subscription.
    pub async fn cancel_subscription(&self, id: &str) -> AppResult<()> {
        let request = IdRequest { id: id.to_string() };
        self.post_ack("/api/admin/subscriptions/cancel", &request)
            .await?;
        Ok(())
    }

    /// POST /api/admin/subscriptions/renew - Renew one subscription.
    ///
    /// Returns the new end date when the backend reports one.
    pub async fn renew_subscription(&self, id: &str) -> AppResult<Option<DateTime<Utc>>> {
        let path = "/api/admin/subscriptions/renew";
        let request = IdRequest { id: id.to_string() };
        let response: RenewSubscriptionResponse = self.post_json(path, &request).await?;
        check_ack(
            path,
            Ack {
                success: response.success,
                message: response.message,
            },
        )?;
        Ok(response.end_date)
    }

    /// POST /api/admin/subscriptions/bulk - Apply one action to several subscriptions.
    pub async fn bulk_subscriptions(
        &self,
        ids: &[String],
        action: SubscriptionAction,
    ) -> AppResult<()> {
        if ids.is_empty() {
            return Err(AppError::Validation(
                "No subscriptions selected".to_string(),
            ));
        }
        let request = BulkSubscriptionRequest {
            ids: ids.to_vec(),
            action,
        };
        self.post_ack("/api/admin/subscriptions/bulk", &request)
            .await?;
        Ok(())
    }
}
