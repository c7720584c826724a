//! Payment, refund, and subscription screens.

use chrono::{DateTime, Months, Utc};

use super::{acknowledged, Listable, Screen};
use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::models::{
    Payment, PaymentStatus, Refund, RefundStatus, Subscription, SubscriptionAction,
    SubscriptionStatus,
};
use crate::scope::ViewScope;

impl Listable for Payment {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.user.as_str(),
            self.email.as_str(),
            self.plan.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            "method" => Some(self.method.clone()),
            "plan" => Some(self.plan.clone()),
            _ => None,
        }
    }
}

impl Listable for Refund {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.payment_id.as_str(),
            self.user.as_str(),
            self.email.as_str(),
            self.reason.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<String> {
        (name == "status").then(|| self.status.as_str().to_string())
    }
}

impl Listable for Subscription {
    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user.as_str(),
            self.email.as_str(),
            self.plan.as_str(),
        ]
    }

    fn facet(&self, name: &str) -> Option<String> {
        match name {
            "status" => Some(self.status.as_str().to_string()),
            "plan" => Some(self.plan.clone()),
            _ => None,
        }
    }
}

/// Totals over a set of payments, in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueSummary {
    pub completed: i64,
    pub pending: i64,
    pub refunded: i64,
    pub count: usize,
}

pub type PaymentsScreen = Screen<Payment>;

impl Screen<Payment> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_payments()).await
    }

    /// Visible payments dated within `[from, to]`; open ends are unbounded.
    pub fn within(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Vec<&Payment> {
        self.view
            .visible()
            .into_iter()
            .filter(|p| from.map_or(true, |f| p.date >= f) && to.map_or(true, |t| p.date <= t))
            .collect()
    }

    pub fn summarize(payments: &[&Payment]) -> RevenueSummary {
        payments
            .iter()
            .fold(RevenueSummary::default(), |mut acc, p| {
                match p.status {
                    PaymentStatus::Completed => acc.completed += p.amount,
                    PaymentStatus::Pending => acc.pending += p.amount,
                    PaymentStatus::Refunded => acc.refunded += p.amount,
                    PaymentStatus::Failed => {}
                }
                acc.count += 1;
                acc
            })
    }
}

pub type RefundsScreen = Screen<Refund>;

impl Screen<Refund> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_refunds()).await
    }

    pub async fn process(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        id: &str,
        status: RefundStatus,
    ) -> AppResult<()> {
        acknowledged(
            scope,
            &mut self.notices,
            "Refund processed",
            client.process_refund(id, status),
        )
        .await?;
        self.view.patch(&[id.to_string()], |refund| refund.status = status);
        Ok(())
    }

    pub async fn bulk_process(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        status: RefundStatus,
    ) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Refunds processed",
            client.bulk_process_refunds(&ids, status),
        )
        .await?;
        Ok(self.view.patch(&ids, |refund| refund.status = status))
    }
}

/// End date after one more billing period of `plan`.
pub fn extend_end_date(plan: &str, end: DateTime<Utc>) -> DateTime<Utc> {
    let months = if plan.eq_ignore_ascii_case("yearly") { 12 } else { 1 };
    let base = end.max(Utc::now());
    base.checked_add_months(Months::new(months)).unwrap_or(base)
}

pub type SubscriptionsScreen = Screen<Subscription>;

impl Screen<Subscription> {
    pub async fn load(client: &ApiClient, scope: &ViewScope) -> AppResult<Self> {
        Self::fetch(scope, client.list_subscriptions()).await
    }

    pub async fn cancel(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        id: &str,
    ) -> AppResult<()> {
        acknowledged(
            scope,
            &mut self.notices,
            "Subscription cancelled",
            client.cancel_subscription(id),
        )
        .await?;
        self.view.patch(&[id.to_string()], |sub| {
            sub.status = SubscriptionStatus::Cancelled;
        });
        Ok(())
    }

    /// Renew one subscription. The backend's end date wins when it sends one.
    pub async fn renew(
        &mut self,
        client: &ApiClient,
        scope: &ViewScope,
        id: &str,
    ) -> AppResult<()> {
        let end_date = acknowledged(
            scope,
            &mut self.notices,
            "Subscription renewed",
            client.renew_subscription(id),
        )
        .await?;
        self.view.patch(&[id.to_string()], |sub| {
            sub.status = SubscriptionStatus::Active;
            sub.end_date = match end_date {
                Some(date) => date,
                None => extend_end_date(&sub.plan, sub.end_date),
            };
        });
        Ok(())
    }

    pub async fn bulk_cancel(&mut self, client: &ApiClient, scope: &ViewScope) -> AppResult<usize> {
        let ids = self.require_selection()?;
        acknowledged(
            scope,
            &mut self.notices,
            "Subscriptions cancelled",
            client.bulk_subscriptions(&ids, SubscriptionAction::Cancel),
        )
        .await?;
        Ok(self.view.patch(&ids, |sub| {
            sub.status = SubscriptionStatus::Cancelled;
        }))
    }
}
