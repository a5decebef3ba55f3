use serde::Serialize;
use std::collections::BTreeSet;

/// What happened to one repeat region during processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegionStatus {
    /// Row template duplicated once per element
    Expanded { rows: usize },
    /// No row template delimited; the whole region body was duplicated
    ExpandedWithoutRowTemplate { rows: usize },
    /// Bound to an empty sequence; region removed
    Empty,
    /// Missing or not a sequence; region removed
    NotAnArray,
    /// Start marker without a matching end marker; left in place
    Unterminated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOutcome {
    pub array_key: String,
    /// Item alias, unknown for unterminated markers
    pub alias: Option<String>,
    /// Byte offset of the start marker in the input template
    pub offset: usize,
    #[serde(flatten)]
    pub status: RegionStatus,
}

/// Diagnostics collected while processing one template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// Regions in document order
    pub regions: Vec<RegionOutcome>,
    /// Placeholder paths left verbatim in the output
    pub unresolved: BTreeSet<String>,
}

impl ProcessReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(
        &mut self,
        array_key: &str,
        alias: Option<&str>,
        offset: usize,
        status: RegionStatus,
    ) {
        self.regions.push(RegionOutcome {
            array_key: array_key.to_string(),
            alias: alias.map(str::to_string),
            offset,
            status,
        });
    }

    /// Total number of rows produced across all regions
    pub fn expanded_rows(&self) -> usize {
        self.regions
            .iter()
            .map(|region| match region.status {
                RegionStatus::Expanded { rows }
                | RegionStatus::ExpandedWithoutRowTemplate { rows } => rows,
                _ => 0,
            })
            .sum()
    }

    /// True when every placeholder resolved and every region expanded normally
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
            && self
                .regions
                .iter()
                .all(|region| matches!(region.status, RegionStatus::Expanded { .. }))
    }
}
