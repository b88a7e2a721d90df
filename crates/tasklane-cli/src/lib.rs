pub mod api;
pub mod cli;
pub mod commands;
pub mod print;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    command = cli.command.name(),
    "starting tasklane CLI"
  );

  let cfg = cli::load_config(&cli)?;
  debug!(
    base_url = %cfg.api.base_url,
    locale = cfg.display.locale.tag(),
    "resolved client config"
  );

  let api = api::ReqwestTaskApi::new(
    &cfg.api.base_url
  )?;
  let printer = print::Printer::new();

  let runtime =
    tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context(
        "failed to build async runtime"
      )?;

  runtime.block_on(commands::dispatch(
    api,
    &cfg,
    &printer,
    cli.command
  ))
}
