use anyhow::{bail, Context};
use std::env;
use std::path::PathBuf;
use tonguecam::{FrameSource, ImageFileSource, QualityValidator, ValidationConfig};

const USAGE: &str = "Usage: tonguecam-cli <validate <image> [--config <toml>] [--json] | default-config>";

fn main() -> anyhow::Result<()> {
    tonguecam::init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "validate" => cmd_validate(&args),
        "default-config" => cmd_default_config(),
        other => {
            eprintln!("Unknown command: {}\n{}", other, USAGE);
            std::process::exit(1);
        }
    }
}

/// Arguments of `validate <image> [--config <toml>] [--json]`
#[derive(Debug, PartialEq)]
struct ValidateArgs {
    image: PathBuf,
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_validate_args(args: &[String]) -> anyhow::Result<ValidateArgs> {
    let mut image = None;
    let mut config_path = None;
    let mut json = false;

    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = rest.next() else {
                    bail!("--config needs a path");
                };
                config_path = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("Unknown option: {}\n{}", flag, USAGE),
            other => {
                if image.is_some() {
                    bail!("Unexpected argument: {}\n{}", other, USAGE);
                }
                image = Some(PathBuf::from(other));
            }
        }
    }

    Ok(ValidateArgs {
        image: image.context("image path required")?,
        config_path,
        json,
    })
}

fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    let ValidateArgs {
        image,
        config_path,
        json,
    } = parse_validate_args(&args[2..])?;

    let config = ValidationConfig::load_layered(config_path.as_deref())
        .context("failed to load configuration")?;

    let frame = ImageFileSource::new(&image)
        .next_frame()
        .with_context(|| format!("failed to read {}", image.display()))?;

    let report = QualityValidator::new(config).validate_frame(&frame);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}x{}: {}", report.width, report.height, report.result);
        if let Some(exposure) = &report.exposure {
            println!("  brightness:         {:.2}", exposure.mean_brightness);
        }
        if let Some(blur) = &report.blur {
            println!("  laplacian variance: {:.2}", blur.laplacian_variance);
        }
        if let Some(color) = &report.color {
            println!("  candidate ratio:    {:.4}", color.candidate_ratio);
        }
        if let Some(shape) = &report.shape {
            println!(
                "  contours:           {} (largest {}, {} target-shaped)",
                shape.contour_count, shape.largest_contour, shape.target_shaped_contours
            );
        }
        if let Some(reason) = report.result.rejection_reason() {
            println!("{}", reason.message());
        }
    }

    if !report.result.is_accepted() {
        std::process::exit(2);
    }
    Ok(())
}

fn cmd_default_config() -> anyhow::Result<()> {
    print!("{}", ValidationConfig::default().to_toml()?);
    Ok(())
}
