use super::*;

fn striped_columns(w: usize, h: usize, dark_cols: &[usize]) -> RasterImage {
    let mut img = RasterImage::filled(w, h, [200, 60, 60, 255]);
    for y in 0..h {
        for &x in dark_cols {
            img.put(x, y, [0, 0, 0, 255]);
        }
    }
    img
}

#[test]
fn triangle_filter_preserves_constant_signal() {
    let flat = Profile::new(vec![3.0; 8]);
    let out = flat.smoothed(&TRIANGLE_3TAP);
    assert!(out.values.iter().all(|v| (v - 3.0).abs() < 1e-6));
}

#[test]
fn triangle_filter_spreads_a_spike() {
    let spike = Profile::new(vec![0.0, 0.0, 4.0, 0.0, 0.0]);
    let out = spike.smoothed(&TRIANGLE_3TAP);
    assert_eq!(out.values, vec![0.0, 1.0, 2.0, 1.0, 0.0]);
}

#[test]
fn column_profiles_flag_dark_divider() {
    let img = striped_columns(20, 10, &[10]);
    let p = AxisProfiles::build(&img, Axis::Columns, &ProfileOptions::default());
    assert_eq!(p.brightness.len(), 20);
    let min_x = (0..20)
        .min_by(|&a, &b| p.brightness.get(a).total_cmp(&p.brightness.get(b)))
        .unwrap();
    assert_eq!(min_x, 10);
    assert!(p.darkness.get(10) > 0.4, "darkness {}", p.darkness.get(10));
    assert!(p.darkness.get(2) < 1e-6);
    assert!(p.saturation.get(10) < p.saturation.get(2));
}

#[test]
fn row_profiles_ignore_column_structure() {
    let img = striped_columns(20, 10, &[10]);
    let p = AxisProfiles::build(&img, Axis::Rows, &ProfileOptions::default());
    assert_eq!(p.brightness.len(), 10);
    let first = p.brightness.get(0);
    assert!(p.brightness.values.iter().all(|v| (v - first).abs() < 1e-3));
}

#[test]
fn median_and_deviation() {
    let p = Profile::new(vec![1.0, 5.0, 2.0, 4.0]);
    assert!((p.median() - 3.0).abs() < 1e-6);
    assert_eq!(p.deviation_from(3.0).values, vec![2.0, 2.0, 1.0, 1.0]);
}

#[test]
fn saturation_of_grey_and_black_is_zero() {
    assert_eq!(saturation(&[0, 0, 0, 255]), 0.0);
    assert_eq!(saturation(&[90, 90, 90, 255]), 0.0);
    assert!((saturation(&[200, 100, 0, 255]) - 1.0).abs() < 1e-6);
}
