use anyhow::Context;
use clap::Parser;
use paperslide::app;
use paperslide::cli::Args;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logger(verbose: bool) {
    let default = if verbose {
        "paperslide=debug"
    } else {
        "paperslide=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let request = args.into_request();
    let report = app::run(&request).with_context(|| match &request.deck {
        Some(deck) => format!("failed to append slide to deck {}", deck.display()),
        None => format!(
            "failed to write slide for '{}' under {}",
            request.content.title,
            request.outdir.display()
        ),
    })?;

    print!("{}", report);
    Ok(())
}
