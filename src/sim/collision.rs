//! Collision detection between entities and entity groups
//!
//! Plain AABB tests with a full scan. Groups are tens of entities, and a
//! full scan keeps hit order identical to group iteration order, which the
//! bullet resolution depends on.

use super::entity::Entity;

/// Bounding-box overlap between two entities
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.aabb().overlaps(&b.aabb())
}

/// Indices of live entities in `group` overlapping `entity`, in group order
pub fn collide_one_vs_many(entity: &Entity, group: &[Entity]) -> Vec<usize> {
    let bounds = entity.aabb();
    group
        .iter()
        .enumerate()
        .filter(|(_, other)| other.is_alive() && bounds.overlaps(&other.aabb()))
        .map(|(i, _)| i)
        .collect()
}

/// True if `entity` overlaps any live entity in `group`
pub fn collides_with_any(entity: &Entity, group: &[Entity]) -> bool {
    let bounds = entity.aabb();
    group
        .iter()
        .any(|other| other.is_alive() && bounds.overlaps(&other.aabb()))
}

/// All overlapping `(index_in_a, index_in_b)` pairs of live entities
pub fn collide_groups(a: &[Entity], b: &[Entity]) -> Vec<(usize, usize)> {
    a.iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .flat_map(|(i, e)| {
            collide_one_vs_many(e, b)
                .into_iter()
                .map(move |j| (i, j))
        })
        .collect()
}
