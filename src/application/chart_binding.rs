// Chart binding resolver - Binds a dataset's profile to its normalized table
use crate::application::chart_profiles::profile_for;
use crate::domain::chart::{BindingError, BoundChart, BoundColor, BoundField, ChartSpec, ColorBinding};
use crate::domain::dataset::DatasetName;
use crate::domain::table::NormalizedTable;

/// Resolve the chart for a dataset.
///
/// A table without rows resolves to [`ChartSpec::Empty`]. Otherwise every field the
/// profile names must be a column of the table.
pub fn resolve(dataset: DatasetName, table: &NormalizedTable) -> Result<ChartSpec, BindingError> {
    if table.is_empty() {
        return Ok(ChartSpec::Empty { dataset });
    }

    let profile = profile_for(dataset);
    if let Some(column) = profile
        .required_fields()
        .into_iter()
        .find(|field| !table.has_column(field))
    {
        return Err(BindingError::MissingColumn {
            dataset,
            column: column.to_string(),
            available: table.columns().to_vec(),
        });
    }

    let bind = |field: &'static str| bind_field(table, field);

    Ok(ChartSpec::Chart(BoundChart {
        dataset,
        kind: profile.kind,
        x: bind(profile.x),
        y: bind(profile.y),
        color: profile.color.map(|color| match color {
            ColorBinding::Continuous(field) => BoundColor::Continuous(bind(field)),
            ColorBinding::Discrete(field) => BoundColor::Discrete(bind(field)),
        }),
        size: profile.size.map(bind),
        text: profile.text.map(bind),
        hover_name: profile.hover_name.map(bind),
        markers: profile.markers,
        palette: profile.palette,
    }))
}

/// Column presence is checked by `resolve` before binding.
fn bind_field(table: &NormalizedTable, field: &str) -> BoundField {
    BoundField {
        field: field.to_string(),
        values: table.column_values(field).unwrap_or_default(),
    }
}
