//! Destination assignment.
//!
//! Writes a coerced value into a destination instance at a dotted
//! [`FieldPath`]. Intermediate records along the path are materialized on
//! first touch, so after a write every record between the root and the
//! written field exists.
//!
//! Rule sets are validated against the destination [`Shape`](crate::shape::Shape)
//! before conversion, which walks paths exactly as [`assign`] does. The
//! unknown-field errors raised here therefore only surface when the assigner is
//! called directly with an unchecked path.

use crate::{
    catalog::TypedValue,
    shape::{FieldPath, Reflect, ShapeError},
};

/// Assigns `value` to the field named by `path`, creating intermediate records.
pub fn assign(
    target: &mut dyn Reflect,
    path: &FieldPath,
    value: TypedValue,
) -> Result<(), ShapeError> {
    let mut current = target;
    for segment in path.parents() {
        let owner = current.type_name();
        let slot = current
            .slot_mut(segment)
            .ok_or_else(|| ShapeError::UnknownField {
                owner,
                field: segment.to_string(),
            })?;
        current = slot.materialize().ok_or_else(|| ShapeError::NotARecord {
            owner,
            field: segment.to_string(),
        })?;
    }

    let owner = current.type_name();
    let leaf = path.leaf();
    current
        .slot_mut(leaf)
        .ok_or_else(|| ShapeError::UnknownField {
            owner,
            field: leaf.to_string(),
        })?
        .assign(value)
}

/// Reads the value at `path` without materializing anything.
///
/// Returns `Ok(None)` when an intermediate record is absent or the field
/// holds a record rather than a value.
pub fn read(target: &dyn Reflect, path: &FieldPath) -> Result<Option<TypedValue>, ShapeError> {
    let mut current = target;
    for segment in path.parents() {
        let slot = current.slot(segment).ok_or_else(|| ShapeError::UnknownField {
            owner: current.type_name(),
            field: segment.to_string(),
        })?;
        match slot.as_reflect() {
            Some(nested) => current = nested,
            None if slot.read().is_some() => {
                return Err(ShapeError::NotARecord {
                    owner: current.type_name(),
                    field: segment.to_string(),
                });
            }
            None => return Ok(None),
        }
    }

    let leaf = path.leaf();
    let slot = current.slot(leaf).ok_or_else(|| ShapeError::UnknownField {
        owner: current.type_name(),
        field: leaf.to_string(),
    })?;
    Ok(slot.read())
}
