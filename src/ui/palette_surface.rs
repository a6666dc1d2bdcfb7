//! Conversion between palette bitmaps and cairo image surfaces.
//!
//! The palette is sampled from a [`PaletteImage`] and drawn from a cairo
//! surface built once from the same pixels, so what the user sees is
//! exactly what a click samples.

use anyhow::{bail, Context as _, Result};
use cairo::{Context, Filter, Format, ImageSurface};
use log::{info, warn};
use palette_picker_core::{Color, PaletteImage, PickerState, Size, CROSSHAIR_LINE_WIDTH};
use std::path::Path;

/// Load the palette from `path`, falling back to the generated spectrum
pub fn resolve_palette(path: Option<&Path>) -> PaletteImage {
    let Some(path) = path else {
        return PaletteImage::default();
    };

    match load_palette_png(path) {
        Ok(palette) => {
            let size = palette.size();
            info!("Loaded palette {} ({}x{})", path.display(), size.width, size.height);
            palette
        }
        Err(e) => {
            warn!("Failed to load palette '{}': {:#}", path.display(), e);
            PaletteImage::default()
        }
    }
}

/// Decode a PNG file into a palette bitmap
pub fn load_palette_png(path: &Path) -> Result<PaletteImage> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let surface = ImageSurface::create_from_png(&mut file)
        .with_context(|| format!("decoding {}", path.display()))?;
    surface_to_palette(surface)
}

/// Read the pixels of a cairo image surface, discarding alpha
pub fn surface_to_palette(mut surface: ImageSurface) -> Result<PaletteImage> {
    let format = surface.format();
    if format != Format::ARgb32 && format != Format::Rgb24 {
        bail!("unsupported pixel format {:?}", format);
    }

    surface.flush();
    let size = Size::new(surface.width(), surface.height());
    let stride = surface.stride() as usize;
    let premultiplied = format == Format::ARgb32;
    let data = surface.data()?;

    let mut pixels = Vec::with_capacity(size.area());
    for y in 0..size.height as usize {
        let row = &data[y * stride..];
        for x in 0..size.width as usize {
            let bytes = [row[x * 4], row[x * 4 + 1], row[x * 4 + 2], row[x * 4 + 3]];
            pixels.push(unpack_pixel(u32::from_ne_bytes(bytes), premultiplied));
        }
    }
    drop(data);

    Ok(PaletteImage::new(size, pixels)?)
}

/// Build an opaque cairo surface holding the palette pixels
pub fn palette_to_surface(palette: &PaletteImage) -> Result<ImageSurface> {
    let size = palette.size();
    let mut surface = ImageSurface::create(Format::Rgb24, size.width, size.height)?;
    let stride = surface.stride() as usize;

    {
        let mut data = surface.data()?;
        for (i, color) in palette.pixels().iter().enumerate() {
            let x = i % size.width as usize;
            let y = i / size.width as usize;
            let offset = y * stride + x * 4;
            data[offset..offset + 4].copy_from_slice(&pack_pixel(*color).to_ne_bytes());
        }
    }
    surface.mark_dirty();

    Ok(surface)
}

/// Draw the palette stretched over a `width` x `height` area
pub fn draw_palette(cr: &Context, surface: &ImageSurface, width: i32, height: i32) {
    if surface.width() <= 0 || surface.height() <= 0 {
        return;
    }

    let _ = cr.save();
    cr.scale(
        width as f64 / surface.width() as f64,
        height as f64 / surface.height() as f64,
    );
    if cr.set_source_surface(surface, 0.0, 0.0).is_ok() {
        cr.source().set_filter(Filter::Good);
        let _ = cr.paint();
    }
    let _ = cr.restore();
}

/// Draw the crosshair marker, if the state has one
pub fn draw_crosshair(cr: &Context, state: &PickerState) {
    let Some(lines) = state.crosshair_lines() else {
        return;
    };

    state.crosshair_color().apply_to_cairo(cr);
    cr.set_line_width(CROSSHAIR_LINE_WIDTH);
    for (start, end) in lines {
        cr.move_to(start.x, start.y);
        cr.line_to(end.x, end.y);
    }
    let _ = cr.stroke();
}

fn pack_pixel(color: Color) -> u32 {
    0xFF00_0000 | (color.r as u32) << 16 | (color.g as u32) << 8 | color.b as u32
}

fn unpack_pixel(pixel: u32, premultiplied: bool) -> Color {
    let alpha = (pixel >> 24) & 0xFF;
    let channel = |shift: u32| {
        let value = (pixel >> shift) & 0xFF;
        if premultiplied && alpha > 0 && alpha < 255 {
            (value * 255 / alpha).min(255) as u8
        } else {
            value as u8
        }
    };
    Color::new(channel(16), channel(8), channel(0))
}
