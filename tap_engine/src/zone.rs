//! Zone mapping — partition the playing surface into named horizontal bands.
//!
//! A [`ZoneLayout`] is a pure lookup table built once per surface width and
//! immutable thereafter.  Lookup is first-match-in-order, so a boundary pixel
//! shared by two adjacent zones resolves to the leftmost one.

// ════════════════════════════════════════════════════════════════════════════
// Zone
// ════════════════════════════════════════════════════════════════════════════

/// One named horizontal band of the playing surface.
///
/// Bounds are pixel coordinates, inclusive on both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub name: String,
    pub x_min: i32,
    pub x_max: i32,
}

impl Zone {
    /// True if `x` lies within this zone's inclusive bounds.
    pub fn contains(&self, x: i32) -> bool {
        self.x_min <= x && x <= self.x_max
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ZoneLayout
// ════════════════════════════════════════════════════════════════════════════

/// The ordered set of zones tiling a surface of a given pixel width.
///
/// Each of the `N` zones is `⌊width / N⌋` pixels wide, laid out left-to-right
/// in the order the names were given.  If `width` is not evenly divisible by
/// `N`, the remainder pixels at the extreme right belong to no zone.
#[derive(Clone, Debug)]
pub struct ZoneLayout {
    zones: Vec<Zone>,
    width: i32,
}

impl ZoneLayout {
    pub fn new(width: i32, names: &[String]) -> Self {
        let band = if names.is_empty() { 0 } else { width / names.len() as i32 };
        let zones = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let x_min = i as i32 * band;
                Zone {
                    name: name.clone(),
                    x_min,
                    x_max: x_min + band,
                }
            })
            .collect();
        ZoneLayout { zones, width }
    }

    /// The surface width this layout was built for.
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// First zone whose inclusive `[x_min, x_max]` range contains `x`.
    ///
    /// `None` means the finger is outside the playing surface; tap detection
    /// is suppressed for that finger this frame.
    pub fn find(&self, x: i32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.contains(x))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("zone{}", i)).collect()
    }

    #[test]
    fn even_split_preserves_order() {
        let layout = ZoneLayout::new(200, &["Kick".into(), "Snare".into()]);
        assert_eq!(layout.zones().len(), 2);
        assert_eq!(layout.zones()[0].name, "Kick");
        assert_eq!(layout.zones()[0].x_min, 0);
        assert_eq!(layout.zones()[0].x_max, 100);
        assert_eq!(layout.zones()[1].name, "Snare");
        assert_eq!(layout.zones()[1].x_min, 100);
        assert_eq!(layout.zones()[1].x_max, 200);
    }

    #[test]
    fn tiling_leaves_no_gaps() {
        // Every pixel left of the rounding remainder must land in some zone.
        for width in [1, 7, 100, 640, 1279, 1280] {
            for n in 1..=7 {
                let layout = ZoneLayout::new(width, &names(n));
                let covered = (width / n as i32) * n as i32;
                for x in 0..covered {
                    assert!(
                        layout.find(x).is_some(),
                        "gap at x={} (width={}, n={})",
                        x,
                        width,
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn shared_boundary_resolves_to_left_zone() {
        let layout = ZoneLayout::new(300, &names(3));
        // x=100 is both zone0.x_max and zone1.x_min; first match wins.
        assert_eq!(layout.find(100).unwrap().name, "zone0");
        assert_eq!(layout.find(101).unwrap().name, "zone1");
    }

    #[test]
    fn rounding_remainder_is_unmatched() {
        // 100 / 3 = 33 → zones end at x=99; 100..=? only x > 99 unmatched.
        let layout = ZoneLayout::new(100, &names(3));
        assert!(layout.find(99).is_some());
        assert!(layout.find(100).is_none());
    }

    #[test]
    fn out_of_surface_is_unmatched() {
        let layout = ZoneLayout::new(200, &names(2));
        assert!(layout.find(-1).is_none());
        assert!(layout.find(201).is_none());
    }

    #[test]
    fn empty_name_list_yields_no_zones() {
        let layout = ZoneLayout::new(200, &[]);
        assert!(layout.zones().is_empty());
        assert!(layout.find(50).is_none());
    }
}
