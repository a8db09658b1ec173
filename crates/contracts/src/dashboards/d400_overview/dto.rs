use serde::{Deserialize, Serialize};

/// Headline tiles of the dashboard home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of all non-cancelled orders
    pub total_revenue: f64,
    /// Month-over-month change, e.g. "+12.5%"
    pub revenue_change: String,
    pub total_orders: usize,
    pub orders_change: String,
    pub total_products: usize,
    pub products_change: String,
    pub active_users: usize,
    pub users_change: String,
}

/// One point of the monthly sales chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// Short month name ("Jan", "Feb", ...)
    pub month: String,
    pub sales: f64,
    pub orders: usize,
}

/// Row of the "Recent Orders" widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: String,
    pub customer: String,
    pub product: String,
    /// Formatted amount, e.g. "₱75,000"
    pub amount: String,
    pub status: String,
}

/// Row of the "Low Stock Alert" widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub product: String,
    /// Units available for sale
    pub stock: u32,
    /// Reorder point
    pub threshold: u32,
}

/// Period of the sales chart (`?period=6months`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SalesPeriod {
    #[serde(rename = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
}

impl SalesPeriod {
    pub fn months(&self) -> u32 {
        match self {
            SalesPeriod::ThreeMonths => 3,
            SalesPeriod::SixMonths => 6,
            SalesPeriod::TwelveMonths => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SalesPeriod::ThreeMonths => "3months",
            SalesPeriod::SixMonths => "6months",
            SalesPeriod::TwelveMonths => "12months",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" | "6months" => Some(SalesPeriod::SixMonths),
            "3months" => Some(SalesPeriod::ThreeMonths),
            "12months" => Some(SalesPeriod::TwelveMonths),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_period_parse() {
        assert_eq!(SalesPeriod::parse(""), Some(SalesPeriod::SixMonths));
        assert_eq!(SalesPeriod::parse("12months"), Some(SalesPeriod::TwelveMonths));
        assert_eq!(SalesPeriod::parse("forever"), None);
        assert_eq!(SalesPeriod::default().months(), 6);
    }

    #[test]
    fn test_stats_wire_names() {
        let stats = DashboardStats {
            total_revenue: 1.0,
            revenue_change: "+0.0%".into(),
            total_orders: 1,
            orders_change: "+0.0%".into(),
            total_products: 1,
            products_change: "+0.0%".into(),
            active_users: 1,
            users_change: "+0.0%".into(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("totalRevenue").is_some());
        assert!(json.get("usersChange").is_some());
    }
}
