use sprite_extractor::config::slicer::{self, SlicerConfig};
use sprite_extractor::diagnostics::ExtractionReport;
use sprite_extractor::image::io::{load_rgba_image, save_rgba_png, write_json_file};
use sprite_extractor::layout::{AxisLayout, AxisSource};
use sprite_extractor::{compose_sprite_sheet, ExtractedSprite, SpriteExtractor};
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args();
    let program = args
        .next()
        .unwrap_or_else(|| "sprite_slicer".to_string());
    let config_path = match (args.next(), args.next()) {
        (Some(path), None) => path,
        _ => return Err(format!("Usage: {program} <config.json>")),
    };
    let config = slicer::load_config(Path::new(&config_path))?;

    let image = load_rgba_image(&config.input_path)?;
    let labels = config.resolved_labels();

    let extractor = SpriteExtractor::new(config.geometry, config.extraction.clone())
        .map_err(|e| format!("Invalid extraction config: {e}"))?;
    let output = extractor
        .extract_with_diagnostics(&image, &labels)
        .map_err(|e| format!("Extraction failed for {}: {e}", config.input_path.display()))?;

    print_text_summary(&output.report);
    save_outputs(&config, &output.sprites)?;

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &output.report)?;
        println!("\nJSON report written to {}", path.display());
    }

    Ok(())
}

fn save_outputs(config: &SlicerConfig, sprites: &[ExtractedSprite]) -> Result<(), String> {
    let dir = &config.output.dir;
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create output dir {}: {e}", dir.display()))?;
    for sprite in sprites {
        let name = format!("{:02}_{}.png", sprite.cell_index, sanitize(&sprite.label));
        save_rgba_png(&sprite.pixels, &dir.join(name))?;
    }
    println!("\n{} sprites written to {}", sprites.len(), dir.display());

    if config.output.compose_sheet {
        match compose_sprite_sheet(sprites) {
            Ok(sheet) => {
                let path = dir.join("sheet.png");
                save_rgba_png(&sheet, &path)?;
                println!("Composed sheet written to {}", path.display());
            }
            Err(err) => eprintln!("Skipping composed sheet: {err}"),
        }
    }
    Ok(())
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn print_text_summary(report: &ExtractionReport) {
    println!("Extraction summary");
    println!(
        "  input: {}x{} posterize_bits={:?} scope={:?}",
        report.input.width, report.input.height, report.input.posterize_bits, report.scope
    );
    print_axis(&report.layout.columns);
    print_axis(&report.layout.rows);

    println!("\nCells");
    for cell in &report.cells {
        let r = &cell.rect;
        print!(
            "  #{:02} {:<16} rect=({}, {}, {}x{}) opaque={}",
            cell.index, cell.label, r.x, r.y, r.w, r.h, cell.opaque_px
        );
        match &cell.stats {
            Some(stats) => println!(
                " seeds={} bg_edge={} bg_interior={} decontam={} islands_removed={}",
                stats.seeds_accepted,
                stats.edge_filled,
                stats.interior_filled,
                stats.matte.decontaminated,
                stats.islands.removed
            ),
            None => println!(),
        }
    }
    if let Some(stats) = &report.whole_image {
        println!(
            "  whole image: bg_edge={} bg_interior={} decontam={} islands_removed={}",
            stats.edge_filled,
            stats.interior_filled,
            stats.matte.decontaminated,
            stats.islands.removed
        );
    }

    let stages = report
        .timing
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect::<Vec<_>>()
        .join(" ");
    println!("\nTimings (ms): {stages} total={:.3}", report.timing.total_ms);
}

fn print_axis(axis: &AxisLayout) {
    let source = match axis.source {
        AxisSource::Detected(strategy) => format!("detected ({})", strategy.name()),
        AxisSource::Template => "template fallback".to_string(),
    };
    println!("\n{} ({source})", axis.axis);
    for cand in &axis.candidates {
        println!(
            "  {:<10} cv={:.4} fallback={:.2} width={:.1} total={:.4} accepted={}",
            cand.strategy.name(),
            cand.score.spacing_cv,
            cand.score.fallback_fraction,
            cand.score.mean_detected_width,
            cand.score.total,
            cand.accepted
        );
    }
    let spans = axis
        .spans
        .iter()
        .map(|b| format!("[{}..{}]", b.start, b.end))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  spans: {spans}");
}
