use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

mod runtime;
mod view;

use edgedrawer::cli::CliArgs;
use runtime::App;

fn main() -> Result<()> {
    edgedrawer::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config().map_err(|e| anyhow::anyhow!(e))?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(800, 600, startup);

    event_loop.run_app(&mut app)?;

    Ok(())
}
