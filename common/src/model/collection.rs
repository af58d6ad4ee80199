//! Collection payloads exchanged between the dashboard and the server.
//!
//! The collection schema grew over time:
//!
//! 1. a minimal record (`uuid`, `id`, `title`, `description`, `connection`,
//!    `url`), with the extent and CRS fields living in a separate
//!    [`CollectionDetail`] shape;
//! 2. a single record with the extent flattened into top-level `bbox`,
//!    `spatial_extent_crs`, `interval` and `temporal_extent_trs` fields;
//! 3. the current [`Collection`], with a nested [`Extent`] and the selected
//!    date/time field.
//!
//! Only the current shape is written. [`LegacyCollection`] reads any of the
//! three and migrates it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CRS84: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";
pub const GREGORIAN_TRS: &str = "http://www.opengis.net/def/uri/ISO-8601/0/Gregorian";

fn default_crs() -> String {
    CRS84.to_string()
}

fn default_crs_list() -> Vec<String> {
    vec![default_crs()]
}

fn default_trs() -> String {
    GREGORIAN_TRS.to_string()
}

/// Spatial extent as a sequence of `[x, y]` coordinate pairs in `crs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialExtent {
    #[serde(default)]
    pub bbox: Vec<[f64; 2]>,
    #[serde(default = "default_crs")]
    pub crs: String,
}

/// Temporal extent as `[start, end]` pairs; `None` marks an open end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalExtent {
    #[serde(default)]
    pub interval: Vec<[Option<String>; 2]>,
    #[serde(default = "default_trs")]
    pub trs: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    #[serde(default)]
    pub spatial: Option<SpatialExtent>,
    #[serde(default)]
    pub temporal: Option<TemporalExtent>,
}

/// A geospatial dataset published by the features API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub uuid: Uuid,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Name of the [`Connection`](super::connection::Connection) the layer is read from.
    #[serde(default)]
    pub connection: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default = "default_crs_list")]
    pub crs: Vec<String>,
    #[serde(default = "default_crs")]
    pub storage_crs: String,
    #[serde(default)]
    pub storage_crs_coordinate_epoch: Option<f64>,
    #[serde(default)]
    pub date_time_fields: Vec<String>,
    #[serde(default)]
    pub selected_date_time_field: Option<String>,
}

impl Collection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::nil(),
            id: id.into(),
            title: title.into(),
            description: String::new(),
            connection: connection.into(),
            url: String::new(),
            license: None,
            extent: None,
            crs: default_crs_list(),
            storage_crs: default_crs(),
            storage_crs_coordinate_epoch: None,
            date_time_fields: Vec::new(),
            selected_date_time_field: None,
        }
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            uuid: self.uuid,
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            connection: self.connection.clone(),
            url: self.url.clone(),
        }
    }
}

/// The minimal collection record of the first schema version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(default)]
    pub uuid: Uuid,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub connection: String,
    #[serde(default)]
    pub url: String,
}

/// A [`CollectionSummary`] together with its extent, license and CRS metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub summary: CollectionSummary,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default = "default_crs_list")]
    pub crs: Vec<String>,
    #[serde(default = "default_crs")]
    pub storage_crs: String,
    #[serde(default)]
    pub storage_crs_coordinate_epoch: Option<f64>,
    #[serde(default)]
    pub date_time_fields: Vec<String>,
    #[serde(default)]
    pub selected_date_time_field: Option<String>,
}

impl From<CollectionDetail> for Collection {
    fn from(detail: CollectionDetail) -> Self {
        let CollectionSummary {
            uuid,
            id,
            title,
            description,
            connection,
            url,
        } = detail.summary;

        Collection {
            uuid,
            id,
            title,
            description,
            connection,
            url,
            license: detail.license,
            extent: detail.extent,
            crs: detail.crs,
            storage_crs: detail.storage_crs,
            storage_crs_coordinate_epoch: detail.storage_crs_coordinate_epoch,
            date_time_fields: detail.date_time_fields,
            selected_date_time_field: detail.selected_date_time_field,
        }
    }
}

impl From<Collection> for CollectionDetail {
    fn from(collection: Collection) -> Self {
        CollectionDetail {
            summary: collection.summary(),
            license: collection.license,
            extent: collection.extent,
            crs: collection.crs,
            storage_crs: collection.storage_crs,
            storage_crs_coordinate_epoch: collection.storage_crs_coordinate_epoch,
            date_time_fields: collection.date_time_fields,
            selected_date_time_field: collection.selected_date_time_field,
        }
    }
}

/// Reads a collection written by any schema version.
///
/// Every field outside `id` and `title` is optional. When no nested `extent`
/// is present the flattened extent fields are folded into one.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCollection {
    #[serde(default)]
    pub uuid: Uuid,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub connection: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "license_title")]
    pub license: Option<String>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default)]
    pub bbox: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub spatial_extent_crs: Option<String>,
    #[serde(default)]
    pub interval: Option<Vec<[Option<String>; 2]>>,
    #[serde(default)]
    pub temporal_extent_trs: Option<String>,
    #[serde(default)]
    pub crs: Option<Vec<String>>,
    #[serde(default)]
    pub storage_crs: Option<String>,
    #[serde(default)]
    pub storage_crs_coordinate_epoch: Option<f64>,
    #[serde(default)]
    pub date_time_fields: Option<Vec<String>>,
    #[serde(default)]
    pub selected_date_time_field: Option<String>,
}

impl LegacyCollection {
    fn flattened_extent(&mut self) -> Option<Extent> {
        let spatial = match (self.bbox.take(), self.spatial_extent_crs.take()) {
            (None, None) => None,
            (bbox, crs) => Some(SpatialExtent {
                bbox: bbox.unwrap_or_default(),
                crs: crs.unwrap_or_else(default_crs),
            }),
        };
        let temporal = match (self.interval.take(), self.temporal_extent_trs.take()) {
            (None, None) => None,
            (interval, trs) => Some(TemporalExtent {
                interval: interval.unwrap_or_default(),
                trs: trs.unwrap_or_else(default_trs),
            }),
        };

        if spatial.is_none() && temporal.is_none() {
            None
        } else {
            Some(Extent { spatial, temporal })
        }
    }
}

impl From<LegacyCollection> for Collection {
    fn from(mut legacy: LegacyCollection) -> Self {
        let extent = match legacy.extent.take() {
            Some(extent) => Some(extent),
            None => legacy.flattened_extent(),
        };

        Collection {
            uuid: legacy.uuid,
            id: legacy.id,
            title: legacy.title,
            description: legacy.description.unwrap_or_default(),
            connection: legacy.connection.unwrap_or_default(),
            url: legacy.url.unwrap_or_default(),
            license: legacy.license,
            extent,
            crs: legacy.crs.unwrap_or_else(default_crs_list),
            storage_crs: legacy.storage_crs.unwrap_or_else(default_crs),
            storage_crs_coordinate_epoch: legacy.storage_crs_coordinate_epoch,
            date_time_fields: legacy.date_time_fields.unwrap_or_default(),
            selected_date_time_field: legacy.selected_date_time_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn populated() -> Collection {
        Collection {
            uuid: Uuid::new_v4(),
            id: "rivers".into(),
            title: "Rivers".into(),
            description: "Major rivers".into(),
            connection: "gis".into(),
            url: "/features/collections/rivers".into(),
            license: Some("CC-BY-4.0".into()),
            extent: Some(Extent {
                spatial: Some(SpatialExtent {
                    bbox: vec![[5.87, 47.27], [15.04, 55.06]],
                    crs: CRS84.into(),
                }),
                temporal: Some(TemporalExtent {
                    interval: vec![[Some("2020-01-01T00:00:00Z".into()), None]],
                    trs: GREGORIAN_TRS.into(),
                }),
            }),
            crs: vec![CRS84.into(), "http://www.opengis.net/def/crs/EPSG/0/25832".into()],
            storage_crs: "http://www.opengis.net/def/crs/EPSG/0/25832".into(),
            storage_crs_coordinate_epoch: Some(2017.5),
            date_time_fields: vec!["created".into(), "updated".into()],
            selected_date_time_field: Some("updated".into()),
        }
    }

    #[test]
    fn canonical_collection_round_trips() {
        let collection = populated();
        let json = serde_json::to_string(&collection).unwrap();
        let parsed: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, collection);
    }

    #[test]
    fn open_interval_end_is_null() {
        let json = serde_json::to_value(populated()).unwrap();
        assert_eq!(
            json["extent"]["temporal"]["interval"],
            json!([["2020-01-01T00:00:00Z", null]])
        );
    }

    #[test]
    fn minimal_payload_gets_crs84_defaults() {
        let parsed: Collection =
            serde_json::from_value(json!({"id": "roads", "title": "Roads"})).unwrap();
        assert_eq!(parsed.crs, vec![CRS84.to_string()]);
        assert_eq!(parsed.storage_crs, CRS84);
        assert!(parsed.extent.is_none());
        assert!(parsed.uuid.is_nil());
    }

    #[test]
    fn detail_shape_serializes_like_canonical() {
        let collection = populated();
        let detail = CollectionDetail::from(collection.clone());

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            serde_json::to_value(&collection).unwrap()
        );
        assert_eq!(Collection::from(detail), collection);
    }

    #[test]
    fn flattened_extent_is_migrated() {
        let legacy: LegacyCollection = serde_json::from_value(json!({
            "id": "lakes",
            "title": "Lakes",
            "connection": "gis",
            "license_title": "CC0-1.0",
            "bbox": [[1.0, 2.0], [3.0, 4.0]],
            "spatial_extent_crs": "http://www.opengis.net/def/crs/EPSG/0/4326",
            "interval": [[null, "2024-12-31T00:00:00Z"]]
        }))
        .unwrap();

        let collection = Collection::from(legacy);
        let extent = collection.extent.unwrap();
        let spatial = extent.spatial.unwrap();
        assert_eq!(spatial.bbox, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(spatial.crs, "http://www.opengis.net/def/crs/EPSG/0/4326");

        let temporal = extent.temporal.unwrap();
        assert_eq!(temporal.trs, GREGORIAN_TRS);
        assert_eq!(temporal.interval[0][0], None);
        assert_eq!(collection.license.as_deref(), Some("CC0-1.0"));
    }

    #[test]
    fn nested_extent_wins_over_flattened_fields() {
        let legacy: LegacyCollection = serde_json::from_value(json!({
            "id": "lakes",
            "title": "Lakes",
            "extent": {"spatial": {"bbox": [[0.0, 0.0]]}},
            "bbox": [[9.0, 9.0]]
        }))
        .unwrap();

        let spatial = Collection::from(legacy).extent.unwrap().spatial.unwrap();
        assert_eq!(spatial.bbox, vec![[0.0, 0.0]]);
        assert_eq!(spatial.crs, CRS84);
    }

    #[test]
    fn minimal_version_migrates_without_extent() {
        let legacy: LegacyCollection = serde_json::from_value(json!({
            "id": "roads",
            "title": "Roads",
            "description": "All roads",
            "url": "/features/collections/roads"
        }))
        .unwrap();

        let collection = Collection::from(legacy);
        assert!(collection.extent.is_none());
        assert_eq!(collection.description, "All roads");
        assert!(collection.date_time_fields.is_empty());
    }
}
