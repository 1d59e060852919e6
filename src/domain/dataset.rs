// Dataset domain model
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One raw document as returned by the data source, field order preserved.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Fields coerced to numbers during normalization.
pub const NUMERIC_FIELDS: [&str; 3] = ["TotalSpent", "TotalQuantity", "TotalRevenue"];

/// Field parsed into a calendar date-time during normalization.
pub const DATE_FIELD: &str = "Month";

/// Variants are declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DatasetName {
    TopCustomers,
    BestSellingProducts,
    BranchRevenueComparison,
    MonthlySalesTrends,
    SeasonalProductDemand,
    StockPlanning,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset: {0}")]
pub struct DatasetNameError(pub String);

impl DatasetName {
    /// Display order of the dashboard panels.
    pub const ALL: [DatasetName; 6] = [
        DatasetName::TopCustomers,
        DatasetName::BestSellingProducts,
        DatasetName::BranchRevenueComparison,
        DatasetName::MonthlySalesTrends,
        DatasetName::SeasonalProductDemand,
        DatasetName::StockPlanning,
    ];

    /// Collection name in the document database.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetName::TopCustomers => "TopCustomers",
            DatasetName::BestSellingProducts => "BestSellingProducts",
            DatasetName::BranchRevenueComparison => "BranchRevenueComparison",
            DatasetName::MonthlySalesTrends => "MonthlySalesTrends",
            DatasetName::SeasonalProductDemand => "SeasonalProductDemand",
            DatasetName::StockPlanning => "StockPlanning",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DatasetName::TopCustomers => "Top Customers",
            DatasetName::BestSellingProducts => "Best-Selling Products",
            DatasetName::BranchRevenueComparison => "Branch Revenue Comparison",
            DatasetName::MonthlySalesTrends => "Monthly Sales Trends",
            DatasetName::SeasonalProductDemand => "Seasonal Product Demand",
            DatasetName::StockPlanning => "Stock Planning by Branch",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DatasetName::TopCustomers => "👑",
            DatasetName::BestSellingProducts => "🔥",
            DatasetName::BranchRevenueComparison => "🏬",
            DatasetName::MonthlySalesTrends => "📈",
            DatasetName::SeasonalProductDemand => "🌸",
            DatasetName::StockPlanning => "📦",
        }
    }

    /// Zero-based position in the display order.
    pub fn position(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetName {
    type Err = DatasetNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| DatasetNameError(s.to_string()))
    }
}
