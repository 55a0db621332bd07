//! Drop-zone registry for hit-testing pointer positions against day columns
//! (grid views) and day cells (month view).
//!
//! Views re-register their rects every frame, so a query always reflects the
//! current scroll position and window size. Results are never cached.

use chrono::NaiveDate;
use egui::{Pos2, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKey {
    /// A day column in the day / week / work-week grid
    Column(NaiveDate),
    /// A day cell in the month grid
    Cell(NaiveDate),
}

impl ZoneKey {
    pub fn date(&self) -> NaiveDate {
        match self {
            ZoneKey::Column(date) | ZoneKey::Cell(date) => *date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub key: ZoneKey,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default)]
pub struct DropZoneRegistry {
    zones: Vec<DropZone>,
}

impl DropZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone, or update its rect in place if already registered.
    pub fn register(&mut self, key: ZoneKey, rect: Rect) {
        if let Some(zone) = self.zones.iter_mut().find(|zone| zone.key == key) {
            zone.rect = rect;
        } else {
            self.zones.push(DropZone { key, rect });
        }
    }

    pub fn unregister(&mut self, key: ZoneKey) {
        self.zones.retain(|zone| zone.key != key);
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    pub fn rect_for(&self, key: ZoneKey) -> Option<Rect> {
        self.zones
            .iter()
            .find(|zone| zone.key == key)
            .map(|zone| zone.rect)
    }

    /// First registered zone containing `pos`.
    pub fn resolve(&self, pos: Pos2) -> Option<DropZone> {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return None;
        }
        self.zones.iter().find(|zone| zone.rect.contains(pos)).copied()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn column(x: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, 0.0), Vec2::new(100.0, 500.0))
    }

    #[test]
    fn test_resolve_finds_containing_zone() {
        let mut zones = DropZoneRegistry::new();
        zones.register(ZoneKey::Column(date(10)), column(0.0));
        zones.register(ZoneKey::Column(date(11)), column(100.5));

        let hit = zones.resolve(Pos2::new(150.0, 20.0)).unwrap();
        assert_eq!(hit.key, ZoneKey::Column(date(11)));
        assert_eq!(hit.key.date(), date(11));
        assert!(zones.resolve(Pos2::new(250.0, 20.0)).is_none());
        assert!(zones.resolve(Pos2::new(50.0, -1.0)).is_none());
    }

    #[test]
    fn test_first_registered_zone_wins_on_overlap() {
        let mut zones = DropZoneRegistry::new();
        zones.register(ZoneKey::Cell(date(10)), column(0.0));
        zones.register(ZoneKey::Cell(date(11)), column(50.0));
        assert_eq!(
            zones.resolve(Pos2::new(75.0, 10.0)).map(|z| z.key),
            Some(ZoneKey::Cell(date(10)))
        );
    }

    #[test]
    fn test_reregister_updates_rect_after_scroll() {
        let mut zones = DropZoneRegistry::new();
        let key = ZoneKey::Column(date(10));
        zones.register(key, column(0.0));
        zones.register(key, column(0.0).translate(Vec2::new(0.0, -200.0)));

        assert_eq!(zones.len(), 1);
        assert!(zones.resolve(Pos2::new(50.0, 400.0)).is_none());
        assert_eq!(zones.rect_for(key).unwrap().top(), -200.0);

        zones.unregister(key);
        assert!(zones.is_empty());
    }
}
