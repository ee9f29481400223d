//! Supply/demand chart images.
//!
//! The renderer answers with image bytes, or with a page containing the
//! literal `No Data Found` when the product has no chart.

use crate::query::RawResponse;

use serde::Serialize;

pub const NO_DATA_MARKER: &[u8] = b"No Data Found";

const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupplyDemandChart {
    NoData,
    Image {
        content_type: String,
        #[serde(skip)]
        bytes: Vec<u8>,
    },
}

impl SupplyDemandChart {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SupplyDemandChart::NoData)
    }
}

pub fn contains_no_data_marker(body: &[u8]) -> bool {
    body.windows(NO_DATA_MARKER.len())
        .any(|window| window == NO_DATA_MARKER)
}

/// Classify a renderer response; the marker check runs before the bytes
/// are trusted as an image.
pub fn decode_chart(response: RawResponse) -> SupplyDemandChart {
    if response.body.is_empty() || contains_no_data_marker(&response.body) {
        return SupplyDemandChart::NoData;
    }

    SupplyDemandChart::Image {
        content_type: response
            .content_type
            .filter(|value| value.starts_with("image/"))
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        bytes: response.body,
    }
}
