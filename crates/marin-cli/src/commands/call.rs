//! `marin call`: deliver a method call as the host application would.

use std::path::Path;

use anyhow::Result;
use marin_config::Config;
use marin_dispatch::{CommandResponse, MethodCall};

use super::print_report;
use crate::pipeline::{build_dispatcher, command_channel};
use crate::theme::Theme;

/// Send `method` on `channel` and print the response.
pub(crate) fn run_call(
    config: &Config,
    channel: &str,
    method: &str,
    prefs: Option<&Path>,
    instances: &[i32],
) -> Result<()> {
    let dispatcher = build_dispatcher(config, prefs, instances)?;
    let commands = command_channel(config, dispatcher);

    let (response, report) = commands.handle_with_report(&MethodCall::new(channel, method));
    if let Some(report) = report {
        print_report(&report);
    }

    match response {
        CommandResponse::Success => println!("{}", Theme::success("success")),
        CommandResponse::NotImplemented => println!(
            "{}",
            Theme::warning(&format!("{channel}/{method}: not implemented"))
        ),
    }
    Ok(())
}
