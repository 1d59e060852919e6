// Chart profile and chart specification domain models
use super::dataset::DatasetName;
use super::table::CellValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    HorizontalBar,
    VerticalBar,
    Line,
    Scatter,
}

/// Named color sequence used when drawing a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Inferno,
    Bold,
    Set1,
    Viridis,
    Dark24,
    Set3,
}

/// How a field drives the color of the marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBinding {
    /// Numeric field mapped onto a color scale.
    Continuous(&'static str),
    /// Categorical field, one color (and one series) per distinct value.
    Discrete(&'static str),
}

impl ColorBinding {
    pub fn field(&self) -> &'static str {
        match self {
            ColorBinding::Continuous(f) | ColorBinding::Discrete(f) => f,
        }
    }
}

/// Static chart shape for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartProfile {
    pub kind: ChartKind,
    pub x: &'static str,
    pub y: &'static str,
    pub color: Option<ColorBinding>,
    pub size: Option<&'static str>,
    pub text: Option<&'static str>,
    pub hover_name: Option<&'static str>,
    pub markers: bool,
    pub palette: Palette,
}

impl ChartProfile {
    /// Every column the profile reads, in binding order, without duplicates.
    pub fn required_fields(&self) -> Vec<&'static str> {
        let mut fields = vec![self.x, self.y];
        let optional = [
            self.color.map(|c| c.field()),
            self.size,
            self.text,
            self.hover_name,
        ];
        for field in optional.into_iter().flatten() {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }
}

/// A field name together with the column values it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundField {
    pub field: String,
    pub values: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundColor {
    Continuous(BoundField),
    Discrete(BoundField),
}

impl BoundColor {
    #[cfg(test)]
    pub fn field(&self) -> &BoundField {
        match self {
            BoundColor::Continuous(f) | BoundColor::Discrete(f) => f,
        }
    }
}

/// A chart profile bound to the values of a normalized table.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundChart {
    pub dataset: DatasetName,
    pub kind: ChartKind,
    pub x: BoundField,
    pub y: BoundField,
    pub color: Option<BoundColor>,
    pub size: Option<BoundField>,
    pub text: Option<BoundField>,
    pub hover_name: Option<BoundField>,
    pub markers: bool,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// The table had no rows; render a placeholder instead of a chart.
    Empty { dataset: DatasetName },
    Chart(BoundChart),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("{dataset}: chart field '{column}' is not a column of the table (columns: {available:?})")]
    MissingColumn {
        dataset: DatasetName,
        column: String,
        available: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_deduplicated() {
        let profile = ChartProfile {
            kind: ChartKind::Scatter,
            x: "BranchName",
            y: "TotalQuantity",
            color: Some(ColorBinding::Discrete("ProductName")),
            size: Some("TotalQuantity"),
            text: None,
            hover_name: Some("ProductName"),
            markers: true,
            palette: Palette::Set3,
        };

        assert_eq!(
            profile.required_fields(),
            vec!["BranchName", "TotalQuantity", "ProductName"]
        );
    }
}
