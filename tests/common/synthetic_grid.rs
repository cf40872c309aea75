use sprite_extractor::image::RasterImage;
use sprite_extractor::TemplateGeometry;

pub const BACKGROUND: [u8; 4] = [80, 200, 120, 255];
pub const DIVIDER: [u8; 4] = [0, 0, 0, 255];
pub const HEADER: [u8; 4] = [30, 30, 30, 255];
pub const SPECK: [u8; 4] = [250, 250, 40, 255];

/// Small template: 60x50 content, 8 px header, 2 px dividers (374x362).
pub fn small_geometry() -> TemplateGeometry {
    TemplateGeometry {
        cell_content_width: 60,
        cell_content_height: 50,
        header_height: 8,
        divider_thickness: 2,
    }
}

/// Production template (2822x2822).
pub fn production_geometry() -> TemplateGeometry {
    TemplateGeometry {
        cell_content_width: 468,
        cell_content_height: 450,
        header_height: 18,
        divider_thickness: 2,
    }
}

pub fn blob_color(index: usize) -> [u8; 4] {
    [220, 60 + 4 * index as u8, 60, 255]
}

#[derive(Clone, Copy, Debug)]
pub struct GridScene {
    pub geometry: TemplateGeometry,
    pub width: usize,
    pub height: usize,
    /// Add a 3x3 template-pixel speck in the upper-left of every cell.
    pub specks: bool,
}

impl GridScene {
    pub fn native(geometry: TemplateGeometry) -> Self {
        Self {
            width: template_width(&geometry),
            height: template_height(&geometry),
            geometry,
            specks: false,
        }
    }
}

pub fn template_width(g: &TemplateGeometry) -> usize {
    6 * (g.divider_thickness + g.cell_content_width) + g.divider_thickness
}

pub fn template_height(g: &TemplateGeometry) -> usize {
    6 * (g.divider_thickness + g.header_height + g.cell_content_height) + g.divider_thickness
}

enum Span {
    Divider,
    Header,
    Content { cell: usize, offset: usize },
}

fn classify(t: usize, divider: usize, header: usize, content: usize) -> Span {
    let pitch = divider + header + content;
    let (cell, off) = (t / pitch, t % pitch);
    if cell >= 6 || off < divider {
        Span::Divider
    } else if off < divider + header {
        Span::Header
    } else {
        Span::Content {
            cell,
            offset: off - divider - header,
        }
    }
}

/// Render the template at `width x height`, sampling template pixels with
/// `floor(x * template / output)` so non-native sizes stretch or shrink the
/// grid unevenly, like a model that drifted from the requested layout.
pub fn render_grid(scene: &GridScene) -> RasterImage {
    let g = &scene.geometry;
    let (tw, th) = (template_width(g), template_height(g));
    let (cw, ch) = (g.cell_content_width, g.cell_content_height);
    let mut img = RasterImage::new(scene.width, scene.height);
    for y in 0..scene.height {
        let ty = y * th / scene.height;
        let row = classify(ty, g.divider_thickness, g.header_height, ch);
        for x in 0..scene.width {
            let tx = x * tw / scene.width;
            let col = classify(tx, g.divider_thickness, 0, cw);
            let px = match (&row, &col) {
                (Span::Divider, _) | (_, Span::Divider) => DIVIDER,
                (Span::Header, _) => HEADER,
                (
                    Span::Content {
                        cell: r,
                        offset: cy,
                    },
                    Span::Content {
                        cell: c,
                        offset: cx,
                    },
                ) => cell_pixel(r * 6 + c, *cx, *cy, cw, ch, scene.specks),
                (_, Span::Header) => unreachable!("columns have no header"),
            };
            img.put(x, y, px);
        }
    }
    img
}

fn cell_pixel(index: usize, x: usize, y: usize, w: usize, h: usize, specks: bool) -> [u8; 4] {
    let dx = (x as f32 + 0.5 - w as f32 / 2.0) / (0.3 * w as f32);
    let dy = (y as f32 + 0.5 - h as f32 / 2.0) / (0.3 * h as f32);
    if dx * dx + dy * dy <= 1.0 {
        return blob_color(index);
    }
    let (sx, sy) = (w * 15 / 100, h * 15 / 100);
    if specks && (sx..sx + 3).contains(&x) && (sy..sy + 3).contains(&y) {
        return SPECK;
    }
    BACKGROUND
}
