use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: i64,
    pub commission: i64,
    pub status: TransactionStatus,
    pub terminal: String,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Two-digit day of month.
    pub date: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodShare {
    pub method: String,
    pub count: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_revenue: i64,
    pub total_commission: i64,
    pub net_income: i64,
    pub successful_transactions: usize,
    pub revenue_growth: String,
    pub income_growth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub transactions: Vec<Transaction>,
    pub chart_data: Vec<ChartPoint>,
    pub payment_methods: Vec<PaymentMethodShare>,
    pub metrics: Metrics,
}
