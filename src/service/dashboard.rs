use chrono::{DateTime, Duration, NaiveDate, Utc};

use types::dashboard::{
    ChartPoint, DashboardData, Metrics, PaymentMethodShare, Transaction, TransactionStatus,
};

const CHART_DAYS: i64 = 15;
const REVENUE_GROWTH: &str = "+15.3%";
const INCOME_GROWTH: &str = "+11.7%";

/// Serves the synthetic analytics shown on the merchant dashboard.
#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn snapshot(&self, today: NaiveDate) -> DashboardData {
        let transactions = transactions();
        let metrics = metrics(&transactions);
        DashboardData {
            chart_data: chart_data(today),
            payment_methods: payment_methods(),
            transactions,
            metrics,
        }
    }
}

fn transaction(
    id: &str,
    amount: i64,
    commission: i64,
    terminal: &str,
    method: &str,
    created_at: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        commission,
        status: TransactionStatus::Success,
        terminal: terminal.to_string(),
        method: method.to_string(),
        created_at: DateTime::parse_from_rfc3339(created_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default(),
    }
}

fn transactions() -> Vec<Transaction> {
    vec![
        transaction("tx_12345678", 15000, 300, "Терминал 1", "СБП", "2024-09-25T10:30:00Z"),
        transaction("tx_87654321", 25000, 500, "Терминал 2", "Карта", "2024-09-25T09:15:00Z"),
        transaction("tx_11223344", 8500, 170, "Терминал 3", "YooMoney", "2024-09-24T16:45:00Z"),
        transaction("tx_55667788", 32000, 640, "Терминал 1", "СБП", "2024-09-23T14:20:00Z"),
    ]
}

// Covers the CHART_DAYS days before `today`, oldest first.
fn chart_data(today: NaiveDate) -> Vec<ChartPoint> {
    let start = today - Duration::days(CHART_DAYS);
    (0..CHART_DAYS)
        .map(|i| {
            let date = start + Duration::days(i);
            ChartPoint {
                date: date.format("%d").to_string(),
                revenue: 25000 + i * 2500 + (i % 4) * 4000,
            }
        })
        .collect()
}

fn payment_methods() -> Vec<PaymentMethodShare> {
    [("СБП", 12, "#8B5CF6"), ("Карта", 8, "#06B6D4"), ("YooMoney", 3, "#84CC16")]
        .into_iter()
        .map(|(method, count, color)| PaymentMethodShare {
            method: method.to_string(),
            count,
            color: color.to_string(),
        })
        .collect()
}

fn metrics(transactions: &[Transaction]) -> Metrics {
    let total_revenue: i64 = transactions.iter().map(|tx| tx.amount).sum();
    let total_commission: i64 = transactions.iter().map(|tx| tx.commission).sum();
    Metrics {
        total_revenue,
        total_commission,
        net_income: total_revenue - total_commission,
        successful_transactions: transactions
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Success)
            .count(),
        revenue_growth: REVENUE_GROWTH.to_string(),
        income_growth: INCOME_GROWTH.to_string(),
    }
}
