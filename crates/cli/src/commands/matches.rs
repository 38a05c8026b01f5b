//! skillswap matches command

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;

use crate::context::{describe_user_skill, Context};

#[derive(Debug, Args)]
pub struct MatchesCommand {
    /// Seed fixture (YAML)
    #[arg(short, long)]
    pub fixture: PathBuf,

    /// Username to find teachers for
    #[arg(short, long)]
    pub user: String,
}

#[derive(Serialize)]
struct MatchRow {
    username: String,
    skill: String,
    proficiency: String,
    years_of_experience: u8,
}

impl MatchesCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let market = ctx.seeded(&self.fixture)?;
        let user = market.user_by_username(&self.user)?;
        let matches = market.find_matches(user.id())?;

        if ctx.json {
            let mut rows = Vec::with_capacity(matches.len());
            for row in &matches {
                rows.push(MatchRow {
                    username: market.user(row.user())?.username().to_string(),
                    skill: market.skill(row.skill())?.name,
                    proficiency: row.proficiency().to_string(),
                    years_of_experience: row.years_of_experience(),
                });
            }
            return ctx.print_json(&rows);
        }

        if matches.is_empty() {
            println!("No one can teach what {} wants yet", style(&self.user).bold());
            return Ok(());
        }
        println!("Teachers for {}:", style(&self.user).bold());
        for row in &matches {
            println!("  {}", describe_user_skill(&market, row)?);
        }
        Ok(())
    }
}
