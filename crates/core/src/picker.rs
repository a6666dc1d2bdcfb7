//! Picker state: the shared color and its replicas on every input surface.
//!
//! `PickerState` is toolkit independent. The dialog feeds it one
//! [`PickerEvent`] per user edit and pushes [`PickerState::surfaces`] back
//! into its widgets whenever the returned [`Outcome`] reports an update.
//!
//! Edits come in two modes:
//! - live edits (slider drag, palette press) refresh every surface but leave
//!   the palette cursor where it is;
//! - committed edits (slider release, field commit) additionally move the
//!   cursor onto the palette pixel closest to the new color.

use log::{debug, trace};
use palette_picker_types::{Color, Position, Size};

use crate::constants::CROSSHAIR_ARM;
use crate::mapping;
use crate::palette::{PaletteImage, SearchMode};
use crate::validation::parse_channels;

/// Values shown by each input surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceValues {
    /// Red, green and blue slider positions
    pub sliders: [u8; 3],
    /// Red, green and blue numeric field texts
    pub channel_texts: [String; 3],
    /// Hex field text
    pub hex_text: String,
    /// Preview swatch fill
    pub preview: Color,
}

impl From<Color> for SurfaceValues {
    fn from(color: Color) -> Self {
        Self {
            sliders: color.channels(),
            channel_texts: color.channels().map(|c| c.to_string()),
            hex_text: color.to_hex(),
            preview: color,
        }
    }
}

/// A single-surface edit
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// Slider value changed while dragging
    SliderMoved([u8; 3]),
    /// Slider drag finished
    SliderReleased([u8; 3]),
    /// Numeric fields committed with Enter, Tab or focus leave
    ChannelTextsCommitted([String; 3]),
    /// Hex field committed
    HexCommitted(String),
    /// Primary button pressed or dragged over the palette display
    PalettePressed(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    Live,
    Committed,
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input was rejected, nothing changed
    Unchanged,
    /// Color and surfaces were refreshed
    Updated { cursor_moved: bool },
}

impl Outcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Outcome::Updated { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PickerState {
    color: Color,
    surfaces: SurfaceValues,
    palette: Option<PaletteImage>,
    display_size: Size,
    cursor: Option<Position>,
    search: SearchMode,
    /// A slider moved since the last committed edit or palette press
    slider_pending: bool,
}

impl PickerState {
    /// Create the state for a dialog opened with `initial` (white when `None`).
    ///
    /// The initial color is applied as a committed edit, so the cursor starts
    /// on the closest palette pixel.
    pub fn new(
        initial: Option<Color>,
        palette: Option<PaletteImage>,
        display_size: Size,
        search: SearchMode,
    ) -> Self {
        let color = initial.unwrap_or(Color::WHITE);
        let mut state = Self {
            color,
            surfaces: SurfaceValues::from(color),
            palette,
            display_size,
            cursor: None,
            search,
            slider_pending: false,
        };
        state.apply(color, EditMode::Committed);
        state
    }

    /// The currently selected color
    pub fn selected(&self) -> Color {
        self.color
    }

    pub fn surfaces(&self) -> &SurfaceValues {
        &self.surfaces
    }

    /// Crosshair position in display coordinates, if one has been placed
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Stroke color for the crosshair
    pub fn crosshair_color(&self) -> Color {
        self.color.inverse()
    }

    /// Horizontal and vertical crosshair segments around the cursor
    pub fn crosshair_lines(&self) -> Option<[(Position, Position); 2]> {
        let c = self.cursor?;
        Some([
            (
                Position::new(c.x - CROSSHAIR_ARM, c.y),
                Position::new(c.x + CROSSHAIR_ARM, c.y),
            ),
            (
                Position::new(c.x, c.y - CROSSHAIR_ARM),
                Position::new(c.x, c.y + CROSSHAIR_ARM),
            ),
        ])
    }

    /// Apply one user edit
    pub fn handle(&mut self, event: PickerEvent) -> Outcome {
        trace!("picker event {:?}", event);
        match event {
            PickerEvent::SliderMoved(channels) => {
                let outcome = self.apply(channels.into(), EditMode::Live);
                self.slider_pending = true;
                outcome
            }
            PickerEvent::SliderReleased(channels) => {
                let color = Color::from(channels);
                // Sliders that were never moved leave a clicked cursor alone
                if !self.slider_pending && color == self.color {
                    return Outcome::Unchanged;
                }
                self.apply(color, EditMode::Committed)
            }
            PickerEvent::ChannelTextsCommitted([r, g, b]) => {
                let channels = parse_channels(&r, &g, &b);
                self.apply(channels.into(), EditMode::Committed)
            }
            PickerEvent::HexCommitted(text) => match Color::from_hex(&text) {
                Ok(color) => self.apply(color, EditMode::Committed),
                Err(e) => {
                    debug!("Ignoring color code '{}': {}", text, e);
                    Outcome::Unchanged
                }
            },
            PickerEvent::PalettePressed(position) => self.pick_from_palette(position),
        }
    }

    /// Track a new palette display size. Returns true if the cursor moved.
    pub fn resize_display(&mut self, size: Size) -> bool {
        if size == self.display_size {
            return false;
        }
        let old = self.display_size;
        self.display_size = size;

        match self.cursor {
            Some(cursor) => {
                self.cursor = Some(mapping::rescale(cursor, old, size));
                true
            }
            None => false,
        }
    }

    fn pick_from_palette(&mut self, position: Position) -> Outcome {
        let Some(palette) = &self.palette else {
            return Outcome::Unchanged;
        };
        let Some(point) = mapping::pick_point(position, palette.size(), self.display_size) else {
            trace!("palette press at {:?} is outside the image", position);
            return Outcome::Unchanged;
        };
        let Some(color) = palette.pixel(point) else {
            return Outcome::Unchanged;
        };

        self.apply(color, EditMode::Live);
        self.cursor = Some(position);
        Outcome::Updated { cursor_moved: true }
    }

    fn apply(&mut self, color: Color, mode: EditMode) -> Outcome {
        self.slider_pending = false;
        self.color = color;
        self.surfaces = SurfaceValues::from(color);

        if mode == EditMode::Live {
            return Outcome::Updated {
                cursor_moved: false,
            };
        }

        let Some(palette) = &self.palette else {
            return Outcome::Updated {
                cursor_moved: false,
            };
        };
        let closest = palette.closest_point(color, self.search);
        self.cursor = Some(mapping::to_display(closest, palette.size(), self.display_size));
        debug!("{} committed, cursor on pixel {:?}", color, closest);

        Outcome::Updated { cursor_moved: true }
    }
}
