use std::path::Path;

use ahash::AHashSet;
use anyhow::{Context, Result};
use geo::{BoundingRect, MultiPolygon};
use rstar::{RTree, AABB};
use shapefile::dbase::Record;

use crate::common;
use crate::error::TagError;
use crate::geom::{BoundingBox, ZoneId};

/// One polygon record of a zone shapefile, with its attributes kept for callers
/// that need more than the id (e.g. WALK100 on the TAZ layer).
#[derive(Debug, Clone)]
pub(crate) struct ZoneFeature {
    pub id: ZoneId,
    pub shape: MultiPolygon<f64>,
    pub record: Record,
}

/// Read every polygon of the shapefile at `path`, taking zone ids from `id_field`.
pub(crate) fn read_zone_features(path: &Path, id_field: &str) -> Result<Vec<ZoneFeature>> {
    common::read_shapefile(path)?
        .into_iter()
        .enumerate()
        .map(|(index, (shape, record))| {
            let id = ZoneId(common::integer_field(path, &record, index, id_field)?);
            let shape = common::shape_to_multipolygon(path, index, shape)?;
            Ok(ZoneFeature { id, shape, record })
        })
        .collect::<Result<Vec<_>, TagError>>()
        .with_context(|| format!("[geom::zones] Failed to load zone layer {}", path.display()))
}

/// A read-only layer of zone polygons with an R-tree over their bounding boxes.
/// Polygons may leave gaps; ids are unique within the layer.
#[derive(Debug, Clone)]
pub struct ZoneLayer {
    ids: Vec<ZoneId>,
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl ZoneLayer {
    /// Build a layer from `(id, polygon)` pairs, rejecting duplicate ids.
    /// `name` identifies the layer in error messages.
    pub fn new(name: &str, zones: Vec<(ZoneId, MultiPolygon<f64>)>) -> Result<Self, TagError> {
        let mut seen = AHashSet::with_capacity(zones.len());
        for (id, _) in &zones {
            if !seen.insert(*id) {
                return Err(TagError::DuplicateId {
                    layer: name.to_string(),
                    kind: "zone",
                    id: id.0.to_string(),
                });
            }
        }

        let (ids, shapes): (Vec<_>, Vec<_>) = zones.into_iter().unzip();

        // Empty polygons have no bounding box and can never match a point.
        let rtree = RTree::bulk_load(
            shapes.iter().enumerate()
                .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                .collect()
        );

        Ok(Self { ids, shapes, rtree })
    }

    /// Load a zone layer from a polygon shapefile, taking ids from `id_field`.
    pub fn from_shapefile(path: &Path, id_field: &str) -> Result<Self> {
        let features = read_zone_features(path, id_field)?;
        let layer = Self::new(
            &path.display().to_string(),
            features.into_iter().map(|f| (f.id, f.shape)).collect(),
        )?;
        Ok(layer)
    }

    /// Get the number of zones.
    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    /// Check if there are no zones.
    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Zone ids in layer order.
    #[inline] pub fn ids(&self) -> &[ZoneId] { &self.ids }

    /// Zone polygons in layer order.
    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Query the R-tree for zone bounding boxes intersecting the given envelope.
    #[inline]
    pub(super) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = &BoundingBox> {
        self.rtree.locate_in_envelope_intersecting(envelope)
    }
}
