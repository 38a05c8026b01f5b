//! Wiring shared by every command

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use shared::{MarketplaceConfig, SeedFixture};
use skillswap_adapter::{
    InMemoryBookingRepository, InMemoryExchangeRequestRepository, InMemoryFeedbackRepository,
    InMemoryNotificationRepository, InMemoryOfferRepository, InMemoryRatingRepository,
    InMemorySessionRepository, InMemorySkillCatalog, InMemorySkillWantedRepository,
    InMemoryUserRepository, InMemoryUserSkillRepository,
};
use skillswap_domain::{Skill, UserSkill};
use skillswap_usecase::{Marketplace, Repositories};

/// The fixture `skillswap demo` runs against
pub const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.yaml");

pub struct Context {
    pub config: MarketplaceConfig,
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    /// Defaults apply when no file is given
    pub fn load(config_path: Option<&Path>, json: bool) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => MarketplaceConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => MarketplaceConfig::default(),
        };
        Ok(Self {
            config,
            config_path: config_path.map(Path::to_path_buf),
            json,
        })
    }

    /// A fresh marketplace over the in-memory store
    pub fn marketplace(&self) -> Marketplace {
        let repos = Repositories {
            users: Box::new(InMemoryUserRepository::new()),
            catalog: Box::new(InMemorySkillCatalog::new()),
            user_skills: Box::new(InMemoryUserSkillRepository::new()),
            skills_wanted: Box::new(InMemorySkillWantedRepository::new()),
            ratings: Box::new(InMemoryRatingRepository::new()),
            requests: Box::new(InMemoryExchangeRequestRepository::new()),
            sessions: Box::new(InMemorySessionRepository::new()),
            feedback: Box::new(InMemoryFeedbackRepository::new()),
            offers: Box::new(InMemoryOfferRepository::new()),
            bookings: Box::new(InMemoryBookingRepository::new()),
            notifications: Box::new(InMemoryNotificationRepository::new()),
        };
        Marketplace::new(repos, self.config.clone())
    }

    /// A marketplace seeded from a fixture file
    pub fn seeded(&self, fixture: &Path) -> anyhow::Result<Marketplace> {
        let fixture = SeedFixture::from_file(fixture)
            .with_context(|| format!("loading fixture from {}", fixture.display()))?;
        let mut market = self.marketplace();
        market.apply_fixture(&fixture)?;
        Ok(market)
    }

    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Look a skill up by name within the catalog
pub fn skill_named(market: &Marketplace, name: &str) -> anyhow::Result<Skill> {
    market
        .skills()?
        .into_iter()
        .find(|s| s.name == name)
        .with_context(|| format!("no skill named {name}"))
}

/// `username  Skill (level, N yrs)` for a teachable skill row
pub fn describe_user_skill(market: &Marketplace, row: &UserSkill) -> anyhow::Result<String> {
    let user = market.user(row.user())?;
    let skill = market.skill(row.skill())?;
    Ok(format!(
        "{:<10} {} ({}, {} yrs)",
        user.username(),
        skill.name,
        row.proficiency(),
        row.years_of_experience()
    ))
}
