use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use lens_helper::catalog::Catalog;
use lens_helper::optics::{ConfusionFormula, ConfusionMode};
use lens_helper::{Camera, Report, Settings};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Confusion {
    Digital,
    Zeiss,
    Custom,
}

impl From<Confusion> for ConfusionMode {
    fn from(confusion: Confusion) -> Self {
        match confusion {
            Confusion::Digital => ConfusionMode::Derived(ConfusionFormula::Digital),
            Confusion::Zeiss => ConfusionMode::Derived(ConfusionFormula::Zeiss),
            Confusion::Custom => ConfusionMode::Custom,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Sensor and lens catalog, JSON or gzipped JSON
    #[clap(long, value_parser)]
    catalog: Option<PathBuf>,

    /// Settings to start from
    #[clap(long, value_parser, default_value_os_t = PathBuf::from("lens-helper.json"))]
    settings: PathBuf,

    /// Write the resulting settings back
    #[clap(long)]
    save: bool,

    /// Sensor name from the catalog
    #[clap(long, value_parser)]
    sensor: Option<String>,

    /// Lens name from the catalog
    #[clap(long, value_parser)]
    lens: Option<String>,

    /// Focal length in mm, overrides the lens
    #[clap(short, long, value_parser)]
    focal: Option<f64>,

    /// Aperture, snapped to the nearest third stop
    #[clap(short = 'n', long, value_parser)]
    f_number: Option<f64>,

    #[clap(short, long, value_enum)]
    confusion: Option<Confusion>,

    /// Custom circle of confusion in µm, selects the custom mode
    #[clap(long, value_parser)]
    custom_confusion: Option<f64>,

    /// Focus distance in m
    #[clap(short, long, value_parser)]
    distance: Option<f64>,

    /// Focus scale position, overrides the distance
    #[clap(short, long, value_parser)]
    position: Option<u32>,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,

    /// List the catalog and exit
    #[clap(long)]
    list: bool,
}

impl Cli {
    fn overlay(&self, settings: &mut Settings) {
        if let Some(sensor) = &self.sensor {
            settings.sensor = Some(sensor.clone());
        }
        if let Some(lens) = &self.lens {
            settings.lens = Some(lens.clone());
        }
        if let Some(focal) = self.focal {
            settings.lens = None;
            settings.focal_length_mm = Some(focal);
        }
        if let Some(f_number) = self.f_number {
            settings.f_number = f_number;
        }
        if let Some(custom_um) = self.custom_confusion {
            settings.custom_confusion_mm = custom_um / 1000.0;
            settings.confusion = ConfusionMode::Custom;
        }
        if let Some(confusion) = self.confusion {
            settings.confusion = confusion.into();
        }
        if let Some(distance) = self.distance {
            settings.focus_distance_m = distance;
        }
    }
}

fn list(catalog: &Catalog) -> Result<()> {
    println!("sensors:");
    for name in catalog.sensor_names() {
        let sensor = catalog.sensor(name)?;
        println!("  {name}: {} x {} mm", sensor.width_mm(), sensor.height_mm());
    }
    println!("lenses:");
    for name in catalog.lens_names() {
        println!("  {name}: {} mm", catalog.lens(name)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let catalog = match &args.catalog {
        Some(path) => lens_helper::load_catalog(path)?,
        None => Catalog::builtin(),
    };

    if args.list {
        return list(&catalog);
    }

    let mut settings = if args.settings.exists() {
        lens_helper::load(&args.settings)?
    } else {
        log::info!("{} not found, using defaults", args.settings.display());
        Settings::default()
    };
    args.overlay(&mut settings);

    let mut camera = Camera::new();
    settings.apply(&mut camera, &catalog)?;
    if let Some(position) = args.position {
        camera.set_focus_scale_position(position);
    }

    let report = Report::new(&camera);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    if args.save {
        let sensor = settings.sensor.as_deref();
        let saved = Settings::capture(&camera, sensor, settings.lens.as_deref());
        lens_helper::save(&args.settings, &saved)?;
    }

    Ok(())
}
