use clap::Parser;

use model_peek::args::Args;
use model_peek::config::InspectConfig;
use model_peek::{logging, ModelInspector, TractInterpreter};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // No model given: nothing to do.
    let Some(model) = args.model.as_deref() else {
        return Ok(());
    };

    logging::init();

    let config = args.apply(InspectConfig::load(args.config.as_deref())?);
    tracing::debug!(?config, "resolved configuration");

    let inspector = ModelInspector::new(TractInterpreter::new(), config);
    let stdout = std::io::stdout();
    inspector.run(model, &mut stdout.lock())?;

    Ok(())
}
