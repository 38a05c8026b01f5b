//! skillswap config command

use clap::Args;
use console::style;

use crate::context::Context;

#[derive(Debug, Args)]
pub struct ConfigCommand {}

impl ConfigCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        if ctx.json {
            return ctx.print_json(&ctx.config);
        }

        match &ctx.config_path {
            Some(path) => println!("Configuration from {}", style(path.display()).cyan()),
            None => println!("Configuration {}", style("(defaults)").dim()),
        }
        let config = &ctx.config;
        println!("  default_duration_minutes: {}", config.default_duration_minutes);
        println!("  min_password_length:      {}", config.min_password_length);
        println!("  log_filter:               {}", config.log_filter);
        println!("  notifications.enabled:    {}", config.notifications.enabled);
        println!(
            "  notifications.reminder_lead_minutes: {}",
            config.notifications.reminder_lead_minutes
        );
        Ok(())
    }
}
