//! Deterministic name hashing for frame colors.
//!
//! Each of the first few characters contributes `(code mod 10)` scaled by a
//! geometrically decaying weight, so names sharing a prefix land close
//! together and get similar colors.

use crate::utils::config::{HASH_DECAY, HASH_MAX_CHARS, HASH_MODULUS};

/// Map a frame name to a reproducible scalar in `[0, 1]`
///
/// **Public** - used by the color mapper
///
/// Characters are taken as UTF-16 code units. Only the first
/// `HASH_MAX_CHARS` units are considered; `None` and `""` map to `0`.
///
/// # Example
/// ```
/// use offcpu_flame::palette::name_hash;
///
/// assert_eq!(name_hash(None), 0.0);
/// assert_eq!(name_hash(Some("schedule")), name_hash(Some("schedul")));
/// ```
pub fn name_hash(name: Option<&str>) -> f64 {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return 0.0,
    };

    let max_unit = f64::from(HASH_MODULUS - 1);
    let mut hash = 0.0;
    let mut max_hash = 0.0;
    let mut weight = 1.0;

    for unit in name.encode_utf16().take(HASH_MAX_CHARS) {
        hash += weight * f64::from(u32::from(unit) % HASH_MODULUS);
        max_hash += weight * max_unit;
        weight *= HASH_DECAY;
    }

    if max_hash > 0.0 {
        hash / max_hash
    } else {
        hash
    }
}
