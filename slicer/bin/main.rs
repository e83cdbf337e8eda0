use std::{
    fs::File,
    io::{stdout, BufReader, BufWriter, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::{anyhow, bail, Context, Result};
use args::Args;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

use common::{config::SliceConfig, progress::Progress};
use slicer::{
    format::{
        svg::{render, render_layers, SvgOptions},
        text, Format,
    },
    mesh::load_mesh,
    section::CrossSection,
    slicer::{layer_heights, slice_layers, slice_with, SliceOptions},
};

mod args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => SliceConfig::load_or_default(path),
        None => SliceConfig::default(),
    };
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    let options = SliceOptions::from(&config);
    options.validate()?;

    let ext = (args.mesh.extension())
        .context("Mesh path has no extension")?
        .to_string_lossy();
    let file = File::open(&args.mesh)
        .with_context(|| format!("Failed to open `{}`", args.mesh.display()))?;
    let mesh = load_mesh(BufReader::new(file), &ext)?;

    eprintln!(
        "Loaded `{}`. {{ face: {} }}",
        args.mesh.file_name().unwrap_or_default().to_string_lossy(),
        mesh.face_count()
    );

    let now = Instant::now();
    let sections = match args.layer_height {
        Some(layer_height) => {
            let (min, max) = mesh.bounds().context("Mesh has no faces")?;
            let heights = layer_heights(min.z, max.z, layer_height)?;

            // Slice on another thread so progress can be reported here.
            let progress = Progress::new();
            thread::scope(|s| {
                let handle = s.spawn(|| slice_layers(&mesh, &heights, &options, &progress));
                while !handle.is_finished() {
                    eprint!(
                        "\rLayer: {}/{} ({:.1}%)",
                        progress.completed(),
                        progress.total(),
                        progress.progress() * 100.0
                    );
                    thread::sleep(Duration::from_millis(50));
                }
                eprintln!("\rLayer: {0}/{0}", heights.len());

                handle.join().map_err(|_| anyhow!("Slicing thread panicked"))
            })?
        }
        None => vec![slice_with(&mesh, args.origin(), args.normal, &options)?],
    };

    let segments = sections.iter().map(|x| x.len()).sum::<usize>();
    let length = sections.iter().map(|x| x.perimeter()).sum::<f64>();
    eprintln!(
        "Sliced {} plane(s) into {} segments ({:.3} units long). Elapsed: {:.1}s",
        sections.len(),
        segments,
        length,
        now.elapsed().as_secs_f32()
    );

    write_output(&args, &config, &sections)
}

fn write_output(args: &Args, config: &SliceConfig, sections: &[CrossSection]) -> Result<()> {
    let Some(path) = &args.output else {
        let mut out = stdout().lock();
        write_text(sections, &mut out)?;
        return Ok(out.flush()?);
    };

    match Format::from_path(path) {
        Some(Format::Svg) => {
            let options = SvgOptions::from(&config.svg);
            let document = match sections {
                [section] => render(section, &options),
                sections => render_layers(sections, &options),
            };
            svg::save(path, &document)?;
        }
        Some(Format::Text) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_text(sections, &mut out)?;
            out.flush()?;
        }
        None => bail!("Unsupported output format `{}`", path.display()),
    }

    eprintln!("Saved cross-section to `{}`", path.display());
    Ok(())
}

fn write_text(sections: &[CrossSection], out: &mut impl Write) -> Result<()> {
    match sections {
        [section] => text::write(section, out)?,
        sections => text::write_layers(sections, out)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = filter::Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target("slicer", level)
        .with_target("mesh_format", level)
        .with_target("common", level);
    let format = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
