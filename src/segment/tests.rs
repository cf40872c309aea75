use super::*;

const BG: [u8; 4] = [80, 200, 120, 255];
const FG: [u8; 4] = [200, 40, 40, 255];

fn disc(w: usize, h: usize, r: f32, bg: [u8; 4], fg: [u8; 4]) -> RasterImage {
    let mut img = RasterImage::filled(w, h, bg);
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put(x, y, fg);
            }
        }
    }
    img
}

#[test]
fn seeds_cover_corners_and_midpoints() {
    let seeds = seed_positions(40, 30, 2);
    assert_eq!(seeds.len(), 8);
    assert!(seeds.contains(&(2, 2)));
    assert!(seeds.contains(&(37, 27)));
    assert!(seeds.contains(&(20, 2)));
    assert!(seeds.contains(&(2, 15)));
    assert_eq!(seed_positions(1, 1, 2), vec![(0, 0)]);
    assert!(seed_positions(0, 5, 2).is_empty());
}

#[test]
fn median_ignores_outliers() {
    let mut px = vec![[10, 20, 30, 255]; 8];
    px.push([255, 255, 255, 255]);
    assert_eq!(median_color(px), Rgb([10, 20, 30]));
}

#[test]
fn flat_background_around_disc() {
    let img = disc(48, 40, 10.0, BG, FG);
    let seg = segment_background(&img, &SegmentOptions::default());
    assert_eq!(seg.background, Some(Rgb([80, 200, 120])));
    assert!(seg.anchors.iter().all(|a| a.accepted));
    for i in 0..img.w * img.h {
        let is_bg = img.get_idx(i) == BG;
        assert_eq!(seg.mask.get(i), is_bg, "pixel {i}");
    }
    assert_eq!(seg.interior_filled, 0);
}

#[test]
fn anchored_fill_does_not_follow_a_gradient_into_foreground() {
    // grey ramp from 200 at the rim to 0 at the centre
    let (w, h) = (60usize, 60usize);
    let mut img = RasterImage::filled(w, h, [200, 200, 200, 255]);
    for y in 10..50 {
        for x in 10..50 {
            let d = (x as i32 - 30).abs().max((y as i32 - 30).abs()) as f32;
            let v = (200.0 * d / 20.0).round() as u8;
            img.put(x, y, [v, v, v, 255]);
        }
    }
    let seg = segment_background(&img, &SegmentOptions::default());
    assert!(!seg.mask.get_xy(30, 30));
    for y in 0..h {
        for x in 0..w {
            if img.get(x, y)[0] < 150 {
                assert!(!seg.mask.get_xy(x, y), "({x},{y}) drifted into foreground");
            }
        }
    }
    assert!(seg.mask.get_xy(0, 0));
}

#[test]
fn gradient_background_is_covered_by_several_anchors() {
    let (w, h) = (100usize, 40usize);
    let mut img = RasterImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let r = 60 + x as u8;
            img.put(x, y, [r, 100, 220, 255]);
        }
    }
    let seg = segment_background(&img, &SegmentOptions::default());
    assert_eq!(seg.mask.count(), w * h);
}

#[test]
fn seed_on_a_speck_is_rejected() {
    let mut img = disc(48, 40, 10.0, BG, FG);
    img.put(2, 2, [255, 0, 255, 255]);
    let seg = segment_background(&img, &SegmentOptions::default());
    let first = seg.anchors[0];
    assert_eq!((first.x, first.y), (2, 2));
    assert!(!first.accepted);
    assert_eq!(first.color, Rgb([80, 200, 120]));
    assert!(!seg.mask.get_xy(2, 2));
    assert!(seg.mask.get_xy(0, 0));
}

#[test]
fn enclosed_hole_is_reclaimed_by_interior_pass() {
    // ring: foreground annulus with a background-coloured hole inside
    let mut img = disc(60, 60, 20.0, BG, FG);
    let hole = disc(60, 60, 8.0, [0, 0, 0, 0], [82, 198, 121, 255]);
    for i in 0..60 * 60 {
        let px = hole.get_idx(i);
        if px[3] != 0 {
            img.put_idx(i, px);
        }
    }
    let seg = segment_background(&img, &SegmentOptions::default());
    assert!(seg.interior_filled > 0);
    assert!(seg.mask.get_xy(30, 30));
    assert!(!seg.mask.get_xy(30, 15));
}

#[test]
fn no_accepted_seed_leaves_mask_empty() {
    // 5x5: every seed collapses onto the centre pixel, which is foreground
    let mut img = RasterImage::filled(5, 5, BG);
    img.put(2, 2, FG);
    let seg = segment_background(&img, &SegmentOptions::default());
    assert_eq!(seg.anchors.len(), 1);
    assert!(!seg.anchors[0].accepted);
    assert_eq!(seg.background, None);
    assert_eq!(seg.mask.count(), 0);
}

#[test]
fn background_sample_is_bounded() {
    let img = RasterImage::filled(64, 64, BG);
    let mut mask = BitMask::new(64, 64);
    for i in 0..64 * 64 {
        mask.set(i);
    }
    assert_eq!(sample_background(&img, &mask, 10), Some(Rgb([80, 200, 120])));
    assert_eq!(sample_background(&img, &BitMask::new(64, 64), 10), None);
}

#[test]
fn whole_sheet_seeds_stay_inside_cells() {
    // two 20x16 cells framed by a 2 px black divider network
    let (w, h) = (46, 20);
    let mut img = RasterImage::filled(w, h, [0, 0, 0, 255]);
    for y in 2..18 {
        for x in (2..22).chain(24..44) {
            img.put(x, y, BG);
        }
    }
    img.put(10, 9, FG);
    let rects = [
        CellRect {
            x: 3,
            y: 3,
            w: 18,
            h: 14,
        },
        CellRect {
            x: 25,
            y: 3,
            w: 18,
            h: 14,
        },
    ];
    let seg = segment_cells(&img, &rects, &SegmentOptions::default());
    assert_eq!(seg.anchors.len(), 16);
    assert!(seg.anchors.iter().all(|a| a.accepted));
    assert_eq!(seg.background, Some(Rgb([80, 200, 120])));
    assert!(seg.mask.get_xy(2, 2));
    assert!(seg.mask.get_xy(43, 17));
    assert!(!seg.mask.get_xy(0, 0));
    assert!(!seg.mask.get_xy(22, 10));
    assert!(!seg.mask.get_xy(10, 9));
    assert_eq!(seg.mask.count(), 2 * 20 * 16 - 1);
}
