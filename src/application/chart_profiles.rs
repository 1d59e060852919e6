// Static chart profiles, one per dataset
use crate::domain::chart::{ChartKind, ChartProfile, ColorBinding, Palette};
use crate::domain::dataset::DatasetName;

static PROFILES: [(DatasetName, ChartProfile); 6] = [
    (
        DatasetName::TopCustomers,
        ChartProfile {
            kind: ChartKind::HorizontalBar,
            x: "TotalSpent",
            y: "CustomerName",
            color: Some(ColorBinding::Continuous("TotalSpent")),
            size: None,
            text: Some("TotalSpent"),
            hover_name: None,
            markers: false,
            palette: Palette::Inferno,
        },
    ),
    (
        DatasetName::BestSellingProducts,
        ChartProfile {
            kind: ChartKind::VerticalBar,
            x: "ProductName",
            y: "TotalQuantity",
            color: Some(ColorBinding::Discrete("ProductName")),
            size: None,
            text: Some("TotalQuantity"),
            hover_name: None,
            markers: false,
            palette: Palette::Bold,
        },
    ),
    (
        DatasetName::BranchRevenueComparison,
        ChartProfile {
            kind: ChartKind::VerticalBar,
            x: "BranchName",
            y: "TotalRevenue",
            color: Some(ColorBinding::Discrete("BranchName")),
            size: None,
            text: Some("TotalRevenue"),
            hover_name: None,
            markers: false,
            palette: Palette::Set1,
        },
    ),
    (
        DatasetName::MonthlySalesTrends,
        ChartProfile {
            kind: ChartKind::Line,
            x: "Month",
            y: "TotalRevenue",
            color: None,
            size: None,
            text: None,
            hover_name: None,
            markers: true,
            palette: Palette::Viridis,
        },
    ),
    (
        DatasetName::SeasonalProductDemand,
        ChartProfile {
            kind: ChartKind::Line,
            x: "Month",
            y: "TotalQuantity",
            color: Some(ColorBinding::Discrete("ProductName")),
            size: None,
            text: None,
            hover_name: None,
            markers: true,
            palette: Palette::Dark24,
        },
    ),
    (
        DatasetName::StockPlanning,
        ChartProfile {
            kind: ChartKind::Scatter,
            x: "BranchName",
            y: "TotalQuantity",
            color: Some(ColorBinding::Discrete("ProductName")),
            size: Some("TotalQuantity"),
            text: None,
            hover_name: Some("ProductName"),
            markers: true,
            palette: Palette::Set3,
        },
    ),
];

/// Profiles are stored in display order, so the dataset position indexes the table.
pub fn profile_for(dataset: DatasetName) -> &'static ChartProfile {
    &PROFILES[dataset.position()].1
}
