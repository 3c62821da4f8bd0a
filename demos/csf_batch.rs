//! CSF Batch Example
//!
//! Scores every image given on the command line and prints a results table.
//!
//! Run with: cargo run --example csf_batch -- <image>... [--json <report.json>] [--maps <dir>]

use std::{env, fs, path::PathBuf};

use shadow_factor::{
    ShadowFactorAnalyzer,
    batch::{file_name_of, has_supported_extension, score_batch},
    error::Result,
    report::{JsonReport, Presentation, ReportConfig, present},
};

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let mut images = Vec::new();
    let mut json_out: Option<PathBuf> = None;
    let mut maps_dir: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json_out = args.next().map(PathBuf::from),
            "--maps" => maps_dir = args.next().map(PathBuf::from),
            _ => images.push(PathBuf::from(arg)),
        }
    }

    for image in &images {
        if !has_supported_extension(image) {
            log::warn!("{} is not a PNG, JPEG, BMP or TIFF file", image.display());
        }
    }

    let report = score_batch(&images);

    for record in report.failures() {
        if let Some(notice) = record.notice() {
            eprintln!("{}", notice);
        }
    }

    match present(&report, &ReportConfig::default()) {
        Presentation::Table(table) => {
            println!("Shadow Factor Results");
            println!();
            println!("{}", table.render());
        }
        Presentation::Notice(notice) => println!("{}", notice),
    }

    if let Some(path) = json_out {
        let json = JsonReport::from(&report).to_json()?;
        fs::write(&path, json)?;
        println!("JSON report: {}", path.display());
    }

    if let Some(dir) = maps_dir {
        fs::create_dir_all(&dir)?;
        let analyzer = ShadowFactorAnalyzer::new();

        for record in report.records.iter().filter(|r| r.score().is_some()) {
            let result = analyzer.analyze_path(&record.path)?;
            let out = dir.join(format!("{}_darkness.png", file_name_of(&record.path)));
            result.save(&out)?;
            println!("Darkness map: {}", out.display());
        }
    }

    Ok(())
}
