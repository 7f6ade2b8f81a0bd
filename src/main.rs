use std::{
    io::{
        self,
        stdout,
        IsTerminal,
    },
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use nclean::{
    ClientOptions,
    DeleteOptions,
    NotionClient,
    SearchOptions,
    SweepOptions,
};

use crate::{
    args::Args,
    report::ConsoleReporter,
};

mod args;
mod prompt;
mod report;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let token = match args.token {
        Some(token) => token.trim().to_string(),
        None => prompt::read_token(&mut io::stdin().lock(), &mut stdout())?,
    };
    if token.is_empty() {
        anyhow::bail!("no auth token given");
    }

    if !args.yes && !args.dry_run {
        let confirmed = prompt::confirm_deletion(&mut io::stdin().lock(), &mut stdout())?;
        if !confirmed {
            log::debug!("Deletion has not been confirmed");
            return Ok(());
        }
    }

    let client = NotionClient::with_options(
        &token,
        ClientOptions {
            base_url: args.base_url,
            timeout: Duration::from_secs(args.timeout),
            max_retries: args.retries,
            default_space_id: args.default_space,
            ..Default::default()
        },
    )
    .context("failed to create client")?;

    let options = SweepOptions {
        delete: DeleteOptions {
            chunk_size: args.chunk_size,
            dry_run: args.dry_run,
        },
        search: SearchOptions {
            limit: args.limit,
            sort: args.sort.into(),
        },
        spaces: args.spaces,
        report_consumer: Box::new(ConsoleReporter::new(stdout(), stdout().is_terminal())),
    };

    let summary = nclean::sweep(&client, options).context("failed to clear trash")?;
    log::debug!(
        "Processed {} spaces, deleted {} pages, {} failed",
        summary.spaces,
        summary.deleted,
        summary.failed
    );

    println!();
    if args.dry_run {
        println!("Dry run finished, nothing has been deleted.");
    } else {
        println!("Successfully cleared all trash blocks.");
    }
    Ok(())
}
