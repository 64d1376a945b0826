use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::primitives::parse_hex_rgba;
use crate::core::{Series, SeriesKey, TimeAxis};
use crate::error::{ChartError, ChartResult};

/// Column type tag marking a drawable line series.
pub const LINE_COLUMN_TYPE: &str = "line";

/// Ordered arena of series keyed by their stable column id.
pub type SeriesArena = IndexMap<SeriesKey, Series>;

/// Raw chart descriptor as delivered by the data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub columns: Vec<Vec<Value>>,
    pub types: IndexMap<String, String>,
    #[serde(default)]
    pub names: IndexMap<String, String>,
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

impl ChartDescriptor {
    /// Parses the loader payload: a JSON array of descriptors.
    pub fn list_from_json_str(input: &str) -> ChartResult<Vec<Self>> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart descriptors: {e}"))
        })
    }
}

/// Validated chart data: one shared time axis plus the series drawn over it.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    time_axis: TimeAxis,
    series: SeriesArena,
}

impl DataSet {
    pub fn new(time_axis: TimeAxis, series: SeriesArena) -> Self {
        for line in series.values() {
            if line.len() != time_axis.len() {
                warn!(
                    series = %line.key(),
                    axis_len = time_axis.len(),
                    values_len = line.len(),
                    "series length differs from time axis"
                );
            }
        }
        Self { time_axis, series }
    }

    pub fn from_descriptor(descriptor: &ChartDescriptor) -> ChartResult<Self> {
        let mut axis: Option<TimeAxis> = None;
        let mut series = SeriesArena::new();

        for column in &descriptor.columns {
            let (id, samples) = split_column(column)?;
            let column_type = descriptor.types.get(id).ok_or_else(|| {
                ChartError::InvalidData(format!("column `{id}` has no type entry"))
            })?;

            if column_type == LINE_COLUMN_TYPE {
                let values = samples
                    .iter()
                    .enumerate()
                    .map(|(index, sample)| {
                        sample.as_f64().ok_or_else(|| {
                            ChartError::InvalidData(format!(
                                "column `{id}` sample {index} is not a number"
                            ))
                        })
                    })
                    .collect::<ChartResult<Vec<_>>>()?;
                let name = descriptor.names.get(id).map_or(id, String::as_str);
                let color = descriptor.colors.get(id).ok_or_else(|| {
                    ChartError::InvalidData(format!("column `{id}` has no color entry"))
                })?;
                parse_hex_rgba(color)?;

                let key = SeriesKey::new(id);
                let line = Series::new(key.clone(), name, color.clone(), values)?;
                if series.insert(key, line).is_some() {
                    return Err(ChartError::InvalidData(format!(
                        "column `{id}` appears more than once"
                    )));
                }
            } else {
                if axis.is_some() {
                    return Err(ChartError::InvalidData(
                        "exactly one time axis column is allowed".to_owned(),
                    ));
                }
                let timestamps = samples
                    .iter()
                    .enumerate()
                    .map(|(index, sample)| parse_timestamp(id, index, sample))
                    .collect::<ChartResult<Vec<_>>>()?;
                axis = Some(TimeAxis::new(timestamps)?);
            }
        }

        let time_axis = axis.ok_or_else(|| {
            ChartError::InvalidData("chart descriptor has no time axis column".to_owned())
        })?;
        debug!(
            samples = time_axis.len(),
            series = series.len(),
            "loaded chart descriptor"
        );
        Ok(Self::new(time_axis, series))
    }

    /// Parses the loader payload and validates every descriptor.
    pub fn list_from_json_str(input: &str) -> ChartResult<Vec<Self>> {
        ChartDescriptor::list_from_json_str(input)?
            .iter()
            .map(Self::from_descriptor)
            .collect()
    }

    #[must_use]
    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    #[must_use]
    pub fn series(&self) -> &SeriesArena {
        &self.series
    }

    #[must_use]
    pub fn into_parts(self) -> (TimeAxis, SeriesArena) {
        (self.time_axis, self.series)
    }
}

fn split_column(column: &[Value]) -> ChartResult<(&str, &[Value])> {
    let (head, samples) = column
        .split_first()
        .ok_or_else(|| ChartError::InvalidData("empty column".to_owned()))?;
    let id = head.as_str().ok_or_else(|| {
        ChartError::InvalidData("column must start with its string id".to_owned())
    })?;
    Ok((id, samples))
}

fn parse_timestamp(id: &str, index: usize, sample: &Value) -> ChartResult<i64> {
    if let Some(millis) = sample.as_i64() {
        return Ok(millis);
    }
    match sample.as_f64() {
        Some(millis) if millis.is_finite() => Ok(millis.round() as i64),
        _ => Err(ChartError::InvalidData(format!(
            "column `{id}` sample {index} is not a timestamp"
        ))),
    }
}
