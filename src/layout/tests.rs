use super::*;

const BG: [u8; 4] = [80, 200, 120, 255];
const LINE: [u8; 4] = [0, 0, 0, 255];
const HEADER: [u8; 4] = [30, 30, 30, 255];

fn geometry() -> TemplateGeometry {
    TemplateGeometry {
        cell_content_width: 60,
        cell_content_height: 50,
        header_height: 8,
        divider_thickness: 2,
    }
}

enum Part {
    Line,
    Header,
    Content,
}

fn classify(g: &TemplateGeometry, axis: Axis, t: usize) -> Part {
    let pitch = g.pitch(axis);
    if t >= GRID_DIM * pitch {
        return Part::Line;
    }
    let p = t % pitch;
    if p < g.divider_thickness {
        Part::Line
    } else if p < g.lead(axis) {
        Part::Header
    } else {
        Part::Content
    }
}

/// Template drawn at scale 1 with `margin_x` background columns on both sides.
fn render(g: &TemplateGeometry, margin_x: usize, rows: bool) -> RasterImage {
    let tw = g.extent(Axis::Columns);
    let th = g.extent(Axis::Rows);
    let mut img = RasterImage::filled(tw + 2 * margin_x, th, BG);
    for y in 0..th {
        for x in 0..tw {
            let px = match (classify(g, Axis::Columns, x), classify(g, Axis::Rows, y)) {
                (Part::Line, _) => LINE,
                (_, Part::Line) if rows => LINE,
                (_, Part::Header) if rows => HEADER,
                _ => BG,
            };
            img.put(x + margin_x, y, px);
        }
    }
    img
}

#[test]
fn expected_lines_follow_template_pitch() {
    let g = geometry();
    let cols = expected_lines(&g, Axis::Columns, g.extent(Axis::Columns));
    assert!((cols[0] - 0.5).abs() < 1e-4);
    assert!((cols[3] - 186.5).abs() < 1e-4);
    let rows = expected_lines(&g, Axis::Rows, 2 * g.extent(Axis::Rows));
    assert!((rows[1] - 121.5).abs() < 1e-3, "rows[1]={}", rows[1]);
}

#[test]
fn template_bands_include_header_on_rows() {
    let g = geometry();
    let rows = template_bands(&g, Axis::Rows, g.extent(Axis::Rows));
    assert_eq!(rows[0], Band::new(0, 9));
    assert_eq!(rows[2], Band::new(120, 129));
    assert_eq!(rows[6], Band::new(360, 361));
    let cols = template_bands(&g, Axis::Columns, g.extent(Axis::Columns));
    assert_eq!(cols[1], Band::new(62, 63));
}

#[test]
fn clean_grid_is_detected_on_both_axes() {
    let g = geometry();
    let img = render(&g, 0, true);
    let layout = GridLayout::resolve(&img, &g, &LayoutOptions::default()).expect("layout");
    assert!(matches!(layout.columns.source, AxisSource::Detected(_)));
    assert!(matches!(layout.rows.source, AxisSource::Detected(_)));
    for i in 0..GRID_DIM {
        assert_eq!(layout.columns.spans[i], Band::new(62 * i + 2, 62 * i + 61));
        assert_eq!(layout.rows.spans[i], Band::new(60 * i + 10, 60 * i + 59));
    }
    let rects = layout.cell_rects().expect("rects");
    assert_eq!(rects.len(), 36);
    assert_eq!(
        rects[7],
        CellRect {
            x: 62 + 2 + 3,
            y: 60 + 10 + 3,
            w: 54,
            h: 44
        }
    );
}

#[test]
fn detection_tracks_lines_that_drift_from_template() {
    let g = geometry();
    let img = render(&g, 3, true);
    let layout = GridLayout::resolve(&img, &g, &LayoutOptions::default()).expect("layout");
    assert!(matches!(layout.columns.source, AxisSource::Detected(_)));
    for i in 0..GRID_DIM {
        assert_eq!(layout.columns.spans[i], Band::new(3 + 62 * i + 2, 3 + 62 * i + 61));
    }
    let template = template_bands(&g, Axis::Columns, img.w);
    assert_ne!(layout.columns.lines[0], template[0]);
}

#[test]
fn uniform_image_falls_back_to_template() {
    let g = geometry();
    let img = RasterImage::filled(500, 480, [128, 128, 128, 255]);
    let layout = GridLayout::resolve(&img, &g, &LayoutOptions::default()).expect("layout");
    assert_eq!(layout.columns.source, AxisSource::Template);
    assert_eq!(layout.rows.source, AxisSource::Template);
    assert!(layout.columns.candidates.is_empty());

    let expected = GridLayout::template(&g, 500, 480, 3)
        .and_then(|t| t.cell_rects())
        .expect("template rects");
    assert_eq!(layout.cell_rects().expect("rects"), expected);
}

#[test]
fn axes_fall_back_independently() {
    let g = geometry();
    let img = render(&g, 0, false);
    let layout = GridLayout::resolve(&img, &g, &LayoutOptions::default()).expect("layout");
    assert!(matches!(layout.columns.source, AxisSource::Detected(_)));
    assert_eq!(layout.rows.source, AxisSource::Template);
    assert_eq!(layout.cell_rects().expect("rects").len(), 36);
}

#[test]
fn degenerate_inputs_are_errors() {
    let g = geometry();
    let empty = RasterImage::new(0, 0);
    assert!(matches!(
        GridLayout::resolve(&empty, &g, &LayoutOptions::default()),
        Err(ExtractError::GeometryDetectionFailure { .. })
    ));

    let tiny = RasterImage::filled(30, 30, [128, 128, 128, 255]);
    let opts = LayoutOptions {
        aa_inset: 3,
        ..Default::default()
    };
    let layout = GridLayout::resolve(&tiny, &g, &opts).expect("template still fits");
    assert!(matches!(
        layout.cell_rects(),
        Err(ExtractError::InvalidCellDimensions { cell: 0, .. })
    ));
}

#[test]
fn scoring_prefers_even_detected_lines() {
    let opts = LayoutOptions::default();
    let even: Vec<Band> = (0..7).map(|i| Band::new(62 * i, 62 * i + 1)).collect();
    let mut uneven = even.clone();
    uneven[3] = Band::new(170, 171);
    let all = vec![true; 7];

    let s_even = score_candidate(&even, &all, 2.0, &opts);
    let s_uneven = score_candidate(&uneven, &all, 2.0, &opts);
    assert!(s_even.spacing_cv < 1e-6);
    assert!(s_uneven.total > s_even.total);

    let mut partial = all.clone();
    partial[2] = false;
    let s_partial = score_candidate(&even, &partial, 2.0, &opts);
    assert!((s_partial.fallback_fraction - 1.0 / 7.0).abs() < 1e-6);
    assert!(s_partial.total > s_even.total);

    let wide: Vec<Band> = (0..7).map(|i| Band::new(62 * i, 62 * i + 20)).collect();
    let s_wide = score_candidate(&wide, &all, 2.0, &opts);
    assert!(s_wide.too_wide);
    assert!(s_wide.total >= opts.width_penalty);
}

#[test]
fn non_increasing_lines_have_infinite_cv() {
    let lines = vec![Band::new(10, 11), Band::new(5, 6), Band::new(20, 21)];
    assert!(spacing_cv(&lines).is_infinite());
}
