use std::collections::HashMap;

use crate::interface::Interface;

/// Area equality tolerance for dedup bucketing (spec.md §4.8: "≤ 1e-4 Å²").
pub const AREA_EPS: f64 = 1e-4;

/// Equivalence classing by `(space_group, area, atom_count)` (spec.md
/// §4.8, C8). Buckets by the exact integer keys `(space_group, atom_count)`
/// then quantizes area to `AREA_EPS` (spec.md §9, "Floating-point equality
/// for dedup"), instead of mixing a float into an ordered-set comparator.
/// Exactly one representative survives per class, chosen deterministically
/// as the smallest-area member.
pub fn dedup_interfaces(interfaces: Vec<Interface>) -> Vec<Interface> {
    let mut groups: HashMap<(i32, usize, i64), Vec<Interface>> = HashMap::new();
    for iface in interfaces {
        let quantized_area = (iface.area() / AREA_EPS).round() as i64;
        let key = (iface.space_group, iface.num_atoms(), quantized_area);
        groups.entry(key).or_default().push(iface);
    }

    groups
        .into_values()
        .map(|mut group| {
            group.sort_by(|a, b| a.area().partial_cmp(&b.area()).unwrap());
            group.into_iter().next().unwrap()
        })
        .collect()
}
