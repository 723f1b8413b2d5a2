// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Curator CLI entrypoint.
//!
//! Runs the interactive dashboard against the configured backend. `--demo` starts an in-process
//! backend with seeded items on an ephemeral loopback port and points the dashboard at it.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use curator::api::{Backend, HttpBackend};
use curator::config::Config;
use curator::dashboard::Dashboard;
use curator::demo::{DemoServer, DemoStore};
use tracing::info;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--base-url <url>] [--page-size <n>] [--log-file <file>]\n  {program} --demo [--page-size <n>] [--log-file <file>]\n\n--config reads a JSON config file; flags override its values.\n--base-url overrides the backend URL (also settable via CURATOR_BASE_URL).\n--demo serves seeded items from a built-in backend and cannot be combined with --base-url.\n--log-file appends logs to a file (filter with CURATOR_LOG, default `info`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<PathBuf>,
    base_url: Option<String>,
    page_size: Option<usize>,
    log_file: Option<PathBuf>,
    demo: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--base-url" => {
                if options.base_url.is_some() {
                    return Err(());
                }
                options.base_url = Some(args.next().ok_or(())?);
            }
            "--page-size" => {
                if options.page_size.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let size: usize = raw.parse().map_err(|_| ())?;
                if size == 0 {
                    return Err(());
                }
                options.page_size = Some(size);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(PathBuf::from(args.next().ok_or(())?));
            }
            _ => return Err(()),
        }
    }

    if options.demo && options.base_url.is_some() {
        return Err(());
    }

    Ok(options)
}

fn load_config(options: &CliOptions) -> Result<Config, Box<dyn Error>> {
    let mut config = match options.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env();
    if let Some(base_url) = &options.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(page_size) = options.page_size {
        config.page_size = page_size;
    }
    if let Some(log_file) = &options.log_file {
        config.log_file = Some(log_file.clone());
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "curator".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut config = load_config(&options)?;
        curator::logging::init(config.log_file.as_deref())?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let demo = if options.demo {
                let server = DemoServer::spawn(DemoStore::seeded(), &config.endpoints).await?;
                config.base_url = server.base_url();
                Some(server)
            } else {
                None
            };
            info!(base_url = %config.base_url, page_size = config.page_size, "starting dashboard");

            let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_config(&config));
            let dashboard = Dashboard::new(config.page_size, config.expansion);
            let handle = tokio::runtime::Handle::current();

            let tui_join = tokio::task::spawn_blocking(move || {
                curator::tui::run(dashboard, backend, handle).map_err(|err| err.to_string())
            })
            .await;

            if let Some(server) = demo {
                server.shutdown().await;
            }

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("curator: {err}");
        std::process::exit(1);
    }
}
