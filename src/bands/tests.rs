use super::*;

fn profile(values: &[f32]) -> Profile {
    Profile::new(values.to_vec())
}

#[test]
fn window_is_clamped_to_profile() {
    assert_eq!(Window::around(1.0, 3, 10), Some(Window { lo: 0, hi: 4 }));
    assert_eq!(Window::around(9.4, 3, 10), Some(Window { lo: 6, hi: 9 }));
    assert_eq!(Window::around(40.0, 3, 10), None);
    assert_eq!(Window::around(2.0, 3, 0), None);
}

#[test]
fn valley_band_covers_run_below_threshold() {
    let p = profile(&[100.0, 100.0, 90.0, 20.0, 10.0, 30.0, 95.0, 100.0]);
    let band = find_valley_band(&p, 4.0, 2, 60.0).expect("valley present");
    assert_eq!(band, Band::new(3, 5));
}

#[test]
fn valley_band_absent_when_nothing_crosses() {
    let p = profile(&[100.0, 98.0, 97.0, 99.0, 100.0]);
    assert!(find_valley_band(&p, 2.0, 2, 60.0).is_none());
}

#[test]
fn peak_band_uses_local_threshold() {
    // shoulders at 0.3 are above a global 0.2 cut but below half the peak
    let p = profile(&[0.0, 0.3, 0.3, 0.9, 1.0, 0.3, 0.3, 0.0]);
    let band = find_peak_band(&p, 4.0, 2, 0.2, 0.5).expect("peak present");
    assert_eq!(band, Band::new(3, 4));
}

#[test]
fn peak_band_rejects_weak_peak() {
    let p = profile(&[0.01, 0.02, 0.03, 0.02]);
    assert!(find_peak_band(&p, 2.0, 2, 0.05, 0.5).is_none());
}

#[test]
fn dark_band_merges_line_and_header() {
    // line at 2..=3, text gap at 4, header 5..=8
    let p = profile(&[0.0, 0.1, 1.0, 1.0, 0.3, 0.9, 0.8, 0.9, 0.7, 0.1, 0.0]);
    let band = find_dark_band(&p, 2.5, 2, 0.5, 2).expect("dark band present");
    assert_eq!(band, Band::new(2, 8));
    let unmerged = find_dark_band(&p, 2.5, 2, 0.5, 0).expect("dark band present");
    assert_eq!(unmerged, Band::new(2, 3));
}

#[test]
fn runs_and_merge() {
    let p = profile(&[1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    let runs = find_runs(&p, |v| v > 0.5);
    assert_eq!(runs, vec![Band::new(0, 1), Band::new(3, 3), Band::new(7, 7)]);
    assert_eq!(
        merge_bands(&runs, 1),
        vec![Band::new(0, 3), Band::new(7, 7)]
    );
    assert_eq!(merge_bands(&runs, 3), vec![Band::new(0, 7)]);
}
