/// Callback registry for map interaction events.
///
/// Clicks are gated by an armed flag: the pan handler arms it on press and
/// disarms it the moment the pointer starts dragging, so a completed drag
/// never doubles as a click.
#[derive(Default)]
pub struct MapEvents {
    hex_field_click: Vec<Box<dyn FnMut(i32, i32, Option<&str>)>>,
    clickable: bool,
}

impl MapEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for clicks on materialized, discovered cells.
    /// Handlers receive the grid coordinates and the sector URL, if the cell
    /// has one.
    pub fn on_hex_field_click(
        &mut self,
        handler: impl FnMut(i32, i32, Option<&str>) + 'static,
    ) {
        self.hex_field_click.push(Box::new(handler));
    }

    pub fn set_clickable(&mut self, clickable: bool) {
        self.clickable = clickable;
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    /// Fires every registered handler exactly once. Returns whether the click
    /// was delivered; it is suppressed while a drag gesture owns the pointer.
    pub fn emit_hex_field_click(&mut self, x: i32, y: i32, sector_url: Option<&str>) -> bool {
        if !self.clickable {
            return false;
        }
        for handler in &mut self.hex_field_click {
            handler(x, y, sector_url);
        }
        true
    }
}
