use crate::error::{ExtractError, Result};
use crate::image::RasterImage;
use crate::types::{ExtractedSprite, CELL_COUNT, GRID_DIM};

/// Lay 36 equally sized sprites out as a flat 6×6 sheet, without dividers or
/// headers, each at the slot of its `cell_index`.
pub fn compose_sprite_sheet(sprites: &[ExtractedSprite]) -> Result<RasterImage> {
    if sprites.len() != CELL_COUNT {
        return Err(ExtractError::ComposeMismatch(format!(
            "expected {CELL_COUNT} sprites, got {}",
            sprites.len()
        )));
    }
    let (w, h) = (sprites[0].pixels.w, sprites[0].pixels.h);
    let mut seen = [false; CELL_COUNT];
    for s in sprites {
        if (s.pixels.w, s.pixels.h) != (w, h) {
            return Err(ExtractError::ComposeMismatch(format!(
                "sprite {} is {}x{}, expected {w}x{h}",
                s.cell_index, s.pixels.w, s.pixels.h
            )));
        }
        match seen.get_mut(s.cell_index) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(ExtractError::ComposeMismatch(format!(
                    "duplicate cell index {}",
                    s.cell_index
                )))
            }
            None => {
                return Err(ExtractError::ComposeMismatch(format!(
                    "cell index {} out of range",
                    s.cell_index
                )))
            }
        }
    }

    let mut sheet = RasterImage::new(w * GRID_DIM, h * GRID_DIM);
    for s in sprites {
        let (row, col) = (s.cell_index / GRID_DIM, s.cell_index % GRID_DIM);
        sheet.blit(&s.pixels, col * w, row * h);
    }
    Ok(sheet)
}
