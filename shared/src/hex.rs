use crate::coords::HexCoord;

/// Fraction of a field's nominal size that survives the overlap of adjacent
/// borders.
pub const HEX_SCALE: f64 = 1.0 - 4.0 / 104.0;

pub const DEFAULT_FIELD_SIZE: f64 = 200.0;

/// Pixel placement of hex fields on the map surface.
///
/// Columns advance by half a field width, rows by three quarters of a field
/// height; both are shrunk by [`HEX_SCALE`] so neighbouring borders coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub field_size: f64,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
        }
    }
}

impl HexLayout {
    pub const fn new(field_size: f64) -> Self {
        Self { field_size }
    }

    /// Horizontal pixel coordinate of grid column `x`. Fractional columns are
    /// valid; the trajectory overlay uses them for its half-field offsets.
    pub fn pixel_x(&self, x: f64) -> f64 {
        x * self.field_size * HEX_SCALE / 2.0
    }

    /// Vertical pixel coordinate of grid row `y`.
    pub fn pixel_y(&self, y: f64) -> f64 {
        y * self.field_size * 0.75 * HEX_SCALE
    }

    /// Top-left pixel placement of a hex field.
    pub fn origin_of(&self, coord: HexCoord) -> (f64, f64) {
        (
            self.pixel_x(f64::from(coord.x)),
            self.pixel_y(f64::from(coord.y)),
        )
    }

    /// Map translation that centers `coord` in a viewport of the given size,
    /// rounded to whole pixels for the pan handler.
    pub fn center_offset(
        &self,
        viewport_width: f64,
        viewport_height: f64,
        coord: HexCoord,
    ) -> (i32, i32) {
        let x = viewport_width / 2.0 - self.pixel_x(f64::from(coord.x)) - self.field_size / 2.0;
        let y = viewport_height / 2.0 - self.pixel_y(f64::from(coord.y)) - self.field_size / 2.0;
        (x.round() as i32, y.round() as i32)
    }
}
