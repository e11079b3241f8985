use std::{
    fs,
    io::{self, Write},
    path::Path,
    process,
    sync::Arc,
};

use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;
use wpkb::{
    application::{
        error::AppError,
        list::{ListRenderer, ListRendererConfig},
        shortcode::{ShortcodeRegistry, register_article_list},
    },
    config::{self, Command, ExpandArgs, RenderArgs},
    infra::{catalog::InMemoryCatalog, error::InfraError, telemetry},
};

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(
            error = %error,
            source = report.source,
            chain = ?report.messages,
            "application error"
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(
            error = %error,
            source = report.source,
            chain = ?report.messages,
            "application error"
        );
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let catalog = Arc::new(InMemoryCatalog::load(&settings.catalog.path)?);
    let renderer = ListRenderer::new(
        catalog.clone(),
        catalog,
        ListRendererConfig::from(&settings.list),
    );

    match cli_args.command {
        Command::Render(args) => run_render(&renderer, &args),
        Command::Expand(args) => run_expand(renderer, &args),
    }
}

fn run_render(renderer: &ListRenderer, args: &RenderArgs) -> Result<(), AppError> {
    let html = renderer.render(&args.to_options())?;
    write_stdout(&html)?;
    write_stdout("\n")?;
    Ok(())
}

fn run_expand(renderer: ListRenderer, args: &ExpandArgs) -> Result<(), AppError> {
    let document = read_document(&args.file)?;

    let mut registry = ShortcodeRegistry::new();
    register_article_list(&mut registry, renderer);
    info!(tags = ?registry.tags().collect::<Vec<_>>(), "shortcodes registered");

    let expanded = registry.expand(&document)?;
    write_stdout(&expanded)?;
    Ok(())
}

fn read_document(path: &Path) -> Result<String, InfraError> {
    if path == Path::new("-") {
        return Ok(io::read_to_string(io::stdin())?);
    }
    Ok(fs::read_to_string(path)?)
}

fn write_stdout(text: &str) -> Result<(), InfraError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
