use anyhow::Context;
use clap::Parser;
use export::svg::SvgExporter;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::CurveModel;
use log::info;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use turbinecore::TurbineConfig;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod export;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Idealised wind turbine power curve generator")]
struct Args {
    /// Directory the SVG chart is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Load chart title, labels and size from YAML
    #[arg(long)]
    render_config: Option<PathBuf>,
    /// Keep serving the curve to the visualizer until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut render_config = if let Some(path) = args.render_config {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(output_dir) = args.output_dir {
        render_config = render_config.with_output_dir(output_dir);
    }

    let runner = Runner::new(TurbineConfig::default());
    let result = runner.execute()?;
    println!("Power curve -> {}", result.summary());

    let model = CurveModel::from_curve(&result.curve, result.turbine.rated_power, &render_config);

    let path = SvgExporter::new(render_config)
        .export(&result.curve)
        .context("exporting power curve chart")?;
    info!("chart exported to {}", path.display());

    if args.serve {
        let gui_bridge = GuiBridge::new();
        gui_bridge.publish(&model)?;
        gui_bridge.spawn(gui_bind_address());
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
