use std::{fmt::Display, hash::Hash, path::Path};

use ahash::AHashSet;
use anyhow::{Context, Result};

use crate::{common, config::FieldNames, error::TagError, network::{Link, Node}};

/// Fail on the first id that occurs twice.
pub(crate) fn ensure_unique_ids<T: Display + Eq + Hash>(
    layer: &Path,
    kind: &'static str,
    ids: impl IntoIterator<Item = T>,
) -> Result<(), TagError> {
    let mut seen = AHashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(TagError::DuplicateId {
                layer: layer.display().to_string(),
                kind,
                id: id.to_string(),
            });
        }
        seen.insert(id);
    }
    Ok(())
}

/// Read the highway link layer. With `require_facility_type`, a layer without
/// the FT field is an error; otherwise FT is read when present.
pub(crate) fn read_links(path: &Path, fields: &FieldNames, require_facility_type: bool) -> Result<Vec<Link>> {
    let links = common::read_shapefile(path)?
        .into_iter()
        .enumerate()
        .map(|(index, (shape, record))| {
            let a = common::integer_field(path, &record, index, &fields.a)?;
            let b = common::integer_field(path, &record, index, &fields.b)?;
            let geometry = common::shape_to_multilinestring(path, index, shape)?;
            let facility_type = if require_facility_type {
                common::nullable_numeric_field(path, &record, index, &fields.facility_type)?
            } else {
                common::optional_numeric_field(&record, &fields.facility_type)
            };
            Ok(Link::new(a, b, geometry).with_facility_type(facility_type))
        })
        .collect::<Result<Vec<_>, TagError>>()
        .with_context(|| format!("[network] Failed to load link layer {}", path.display()))?;

    ensure_unique_ids(path, "link", links.iter().map(|link| link.id.as_str()))?;
    Ok(links)
}

/// Read the highway node layer.
pub(crate) fn read_nodes(path: &Path, fields: &FieldNames) -> Result<Vec<Node>> {
    let nodes = common::read_shapefile(path)?
        .into_iter()
        .enumerate()
        .map(|(index, (shape, record))| {
            let id = common::integer_field(path, &record, index, &fields.node)?;
            let geometry = common::shape_to_point(path, index, shape)?;
            Ok(Node::new(id, geometry))
        })
        .collect::<Result<Vec<_>, TagError>>()
        .with_context(|| format!("[network] Failed to load node layer {}", path.display()))?;

    ensure_unique_ids(path, "node", nodes.iter().map(|node| node.id))?;
    Ok(nodes)
}

/// Read only the `A_B` ids of a link layer (any geometry type is accepted).
pub(crate) fn read_link_ids(path: &Path, fields: &FieldNames) -> Result<AHashSet<String>> {
    common::read_shapefile(path)?
        .iter()
        .enumerate()
        .map(|(index, (_, record))| {
            let a = common::integer_field(path, record, index, &fields.a)?;
            let b = common::integer_field(path, record, index, &fields.b)?;
            Ok(Link::link_id(a, b))
        })
        .collect::<Result<AHashSet<_>, TagError>>()
        .with_context(|| format!("[network] Failed to load link ids from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;
    use shapefile::{Point as ShpPoint, Polyline};

    use super::*;

    #[test]
    fn duplicate_ids_are_reported() {
        let err = ensure_unique_ids(Path::new("nodes.shp"), "node", [1, 2, 1]).unwrap_err();
        assert!(matches!(err, TagError::DuplicateId { kind: "node", ref id, .. } if id == "1"));
        assert!(ensure_unique_ids(Path::new("nodes.shp"), "node", [1, 2, 3]).is_ok());
    }

    #[test]
    fn links_load_with_facility_type() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("links.shp");
        let df = DataFrame::new(vec![
            Column::new("A".into(), vec![1i64, 2]),
            Column::new("B".into(), vec![2i64, 1]),
            Column::new("FT".into(), vec![3i64, 12]),
        ]).unwrap();
        let shapes = vec![
            Polyline::new(vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(4.0, 0.0)]),
            Polyline::new(vec![ShpPoint::new(4.0, 0.0), ShpPoint::new(0.0, 0.0)]),
        ];
        common::write_shapefile(&path, &df, &shapes).unwrap();

        let links = read_links(&path, &FieldNames::default(), true).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].id, "2_1");
        assert_eq!(links[1].facility_type, Some(12.0));
        assert_eq!(links[0].length(), 4.0);

        let ids = read_link_ids(&path, &FieldNames::default()).unwrap();
        assert!(ids.contains("1_2") && ids.contains("2_1"));
    }

    #[test]
    fn duplicate_links_fail_the_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("links.shp");
        let df = DataFrame::new(vec![
            Column::new("A".into(), vec![5i64, 5]),
            Column::new("B".into(), vec![6i64, 6]),
        ]).unwrap();
        let line = Polyline::new(vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(1.0, 1.0)]);
        common::write_shapefile(&path, &df, &[line.clone(), line]).unwrap();

        let err = read_links(&path, &FieldNames::default(), false).unwrap_err();
        assert!(matches!(err.downcast_ref::<TagError>(), Some(TagError::DuplicateId { kind: "link", .. })));
    }

    #[test]
    fn facility_type_is_required_on_request() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("links.shp");
        let df = DataFrame::new(vec![
            Column::new("A".into(), vec![1i64]),
            Column::new("B".into(), vec![2i64]),
        ]).unwrap();
        let line = Polyline::new(vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(1.0, 1.0)]);
        common::write_shapefile(&path, &df, &[line]).unwrap();

        let links = read_links(&path, &FieldNames::default(), false).unwrap();
        assert_eq!(links[0].facility_type, None);

        let err = read_links(&path, &FieldNames::default(), true).unwrap_err();
        assert!(matches!(err.downcast_ref::<TagError>(),
            Some(TagError::MissingField { field, .. }) if field == "FT"));
    }

    #[test]
    fn nodes_must_be_points() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nodes.shp");
        let df = DataFrame::new(vec![Column::new("N".into(), vec![1i64])]).unwrap();
        let line = Polyline::new(vec![ShpPoint::new(0.0, 0.0), ShpPoint::new(1.0, 1.0)]);
        common::write_shapefile(&path, &df, &[line]).unwrap();

        let err = read_nodes(&path, &FieldNames::default()).unwrap_err();
        assert!(format!("{err:#}").contains("expected Point"));
    }
}
