use std::io::Write;

use anyhow::Context;

mod cli;
mod error;
mod mesh;
mod renderer;
mod ui;
mod viewer;

use cli::Parsed;
use mesh::BoundingBox;
use ui::ViewerSettings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,stlview=info"),
    )
    .init();

    let cli = match cli::parse_args(std::env::args_os()) {
        Parsed::Run(cli) => cli,
        Parsed::Info(text) => {
            print!("{text}");
            return Ok(());
        }
        Parsed::Usage(usage) => {
            println!("{usage}");
            std::process::exit(1);
        }
    };

    let mesh = mesh::load_stl(&cli.path)?;
    let bbox = BoundingBox::from_mesh(&mesh)
        .with_context(|| format!("no bounding box for {}", cli.path.display()))?;

    println!("Dimensions: {bbox}");
    std::io::stdout().flush()?;

    let file_name = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.path.display().to_string());
    let settings = ViewerSettings::default().with_title(format!("{file_name} - STL Viewer"));

    viewer::show(&mesh, &bbox, &file_name, &settings).context("viewer failed")?;
    Ok(())
}
