use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use field_area::field::{CropType, FieldDraft};
use field_area::reference::Comparison;
use field_area::{read_polygon, svg, typst};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Field area in hectares from drawn boundaries")]
struct Cli {
    /// KML, GPX, GeoJSON or JSON files, or directories holding them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also report the WGS84 geodesic and UTM planar areas
    #[arg(long)]
    compare: bool,

    /// Write an SVG outline of the first ring
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write a Typst report covering every ring
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the field-creation body for the first ring under this name
    #[arg(long, requires = "crop")]
    field_name: Option<String>,

    #[arg(long, requires = "field_name")]
    crop: Option<CropType>,

    #[arg(long, requires = "field_name")]
    planting_date: Option<String>,

    #[arg(long, requires = "field_name")]
    notes: Option<String>,
}

#[derive(Serialize)]
struct Entry {
    source: String,
    index: usize,
    vertices: usize,
    winding: String,
    area_hectares: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<Comparison>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let rings = read_polygon::read_inputs(&args.paths).context("reading input")?;
    if rings.is_empty() {
        bail!("no polygon found");
    }
    log::info!("rings: {}", rings.len());

    if let Some(name) = &args.field_name {
        let (_, ring) = &rings[0];
        ring.info();
        let crop: CropType = args.crop.context("--field-name needs --crop")?;
        let mut draft = FieldDraft::new(name, crop, ring);
        if let Some(date) = &args.planting_date {
            draft = draft.with_planting_date(date);
        }
        if let Some(notes) = &args.notes {
            draft = draft.with_notes(notes);
        }
        log::info!("field: {}", draft);
        println!("{}", draft.to_json()?);
        return Ok(());
    }

    let mut entries = Vec::new();
    let mut report = Vec::new();
    for (i, (source, ring)) in rings.iter().enumerate() {
        ring.info();
        let comparison = if args.compare || args.report.is_some() {
            Some(Comparison::of(ring)?)
        } else {
            None
        };
        if let (Some(_), Some(c)) = (&args.report, &comparison) {
            report.push(typst::Data {
                name: source.clone(),
                vertices: ring.len(),
                comparison: c.clone(),
                svg: svg::SVG::of_ring(ring)?.map(|s| s.render()),
            });
        }
        entries.push(Entry {
            source: source.clone(),
            index: i,
            vertices: ring.len(),
            winding: ring.winding().to_string(),
            area_hectares: ring.area_hectares(),
            comparison: if args.compare { comparison } else { None },
        });
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for e in &entries {
                println!("{}: {:.4} ha", e.source, e.area_hectares);
                if let Some(c) = &e.comparison {
                    println!(
                        "  geodesic: {:.4} ha ({:+.3}%)",
                        c.geodesic,
                        100f64 * c.geodesic_deviation()
                    );
                    println!(
                        "    planar: {:.4} ha ({:+.3}%)",
                        c.planar,
                        100f64 * c.planar_deviation()
                    );
                }
            }
            if entries.len() > 1 {
                let total: f64 = entries.iter().map(|e| e.area_hectares).sum();
                println!("total: {:.4} ha", total);
            }
        }
    }

    if let Some(path) = &args.svg {
        match svg::SVG::of_ring(&rings[0].1)? {
            Some(svg) => std::fs::write(path, svg.render())
                .with_context(|| format!("writing {}", path.display()))?,
            None => log::warn!("{}: empty ring, no svg written", path.display()),
        }
    }
    if let Some(path) = &args.report {
        std::fs::write(path, typst::make_typst_document(&report))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
