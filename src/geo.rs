//! Surface coordinate primitives.
//!
//! The map is a flat raster: latitude runs along image height, longitude
//! along image width, both in raw pixel units.

/// A position on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A point in container (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: LatLng,
    pub max: LatLng,
}

impl Bounds {
    pub fn new(min: LatLng, max: LatLng) -> Self {
        Self { min, max }
    }

    /// Bounds spanning `[0, 0]` to `[height, width]`.
    pub fn from_origin(height: f64, width: f64) -> Self {
        Self::new(LatLng::new(0.0, 0.0), LatLng::new(height, width))
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lng + self.max.lng) / 2.0,
        )
    }

    /// True when `other` fits inside with room to spare on every edge.
    pub fn strictly_contains(&self, other: &Bounds) -> bool {
        self.min.lat < other.min.lat
            && self.min.lng < other.min.lng
            && self.max.lat > other.max.lat
            && self.max.lng > other.max.lng
    }
}
