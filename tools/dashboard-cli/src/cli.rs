//! # Command Line Interface
//!
//! Commands mirror the dashboard pages: league sync, player, roster,
//! matchup and league reports, trending players and trade comparison.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use player_cache::{CacheConfig, PlayerCache, PlayerSnapshot};
use scoring_engine::{
    AnalyticsService, MatchupAnalytics, PlayerAnalytics, RosterAnalytics, ScoringTables, TradeAnalysis,
    TradeSide,
};
use serde::Serialize;
use sleeper_client::{SleeperClient, SleeperConfig, SleeperLeague, SleeperRoster, SleeperUser, TrendKind};
use std::path::PathBuf;
use tracing::info;

/// Fantasy league dashboard for Sleeper
#[derive(Parser, Debug)]
#[command(name = "fantasy-dashboard")]
#[command(about = "Analytics for Sleeper fantasy football leagues")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Player directory snapshot to start from and save back to
    #[arg(long, global = true)]
    pub players_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a user and list their leagues and rosters
    Sync {
        username: String,
        /// Season year, defaults to the current year
        #[arg(long)]
        season: Option<String>,
    },
    /// Analyze a single player
    Player { player_id: String },
    /// Search the player directory by name
    Search {
        query: String,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Analyze one roster in a league
    Roster { league_id: String, roster_id: u32 },
    /// Analyze a week's matchups
    Matchups {
        league_id: String,
        /// Defaults to the current NFL week
        #[arg(long)]
        week: Option<u32>,
    },
    /// League summary
    League { league_id: String },
    /// Most added or dropped players
    Trending {
        #[arg(long, value_enum, default_value = "add")]
        kind: TrendArg,
        #[arg(long, default_value = "24")]
        lookback_hours: u32,
        #[arg(long, default_value = "25")]
        limit: u32,
    },
    /// Compare the value of two sides of a trade
    Trade {
        /// Player ids you give, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        give: Vec<String>,
        /// Player ids you get, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        get: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrendArg {
    Add,
    Drop,
}

impl From<TrendArg> for TrendKind {
    fn from(arg: TrendArg) -> Self {
        match arg {
            TrendArg::Add => TrendKind::Add,
            TrendArg::Drop => TrendKind::Drop,
        }
    }
}

#[derive(Serialize)]
struct SyncReport {
    user: SleeperUser,
    avatar_url: Option<String>,
    season: String,
    leagues: Vec<LeagueSync>,
}

#[derive(Serialize)]
struct LeagueSync {
    league: SleeperLeague,
    avatar_url: Option<String>,
    rosters: usize,
    my_player_ids: Vec<String>,
}

#[derive(Serialize)]
struct TrendingEntry {
    player_id: String,
    name: String,
    count: u32,
}

/// Display name of a roster's owner among the league users
pub fn owner_name(users: &[SleeperUser], owner_id: &str) -> String {
    users
        .iter()
        .find(|user| user.user_id == owner_id)
        .map(|user| user.label().to_string())
        .unwrap_or_else(|| "Unknown Owner".to_string())
}

/// The roster a user owns or co-owns
pub fn user_roster<'a>(rosters: &'a [SleeperRoster], user_id: &str) -> Option<&'a SleeperRoster> {
    rosters
        .iter()
        .find(|roster| roster.owner_id == user_id || roster.co_owners.iter().any(|id| id == user_id))
}

/// CLI handler
pub struct CliHandler {
    client: SleeperClient,
    service: AnalyticsService<SleeperClient>,
    json: bool,
    players_file: Option<PathBuf>,
}

impl CliHandler {
    /// Build the client and analytics service from the environment
    pub async fn new(json: bool, players_file: Option<PathBuf>) -> Result<Self> {
        let client = SleeperClient::new(SleeperConfig::from_env()?)?;

        let service = match &players_file {
            Some(path) if path.exists() => {
                let snapshot = PlayerSnapshot::load_from_file(path).await?;
                info!("Loaded {} players from {}", snapshot.len(), path.display());
                let cache = PlayerCache::with_snapshot(client.clone(), CacheConfig::from_env()?, snapshot);
                AnalyticsService::new(cache, ScoringTables::from_env()?)
            }
            _ => AnalyticsService::from_env(client.clone())?,
        };

        Ok(Self { client, service, json, players_file })
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Sync { username, season } => self.sync(&username, season).await?,
            Commands::Player { player_id } => self.show_player(&player_id).await?,
            Commands::Search { query, limit } => self.search(&query, limit).await?,
            Commands::Roster { league_id, roster_id } => self.show_roster(&league_id, roster_id).await?,
            Commands::Matchups { league_id, week } => self.show_matchups(&league_id, week).await?,
            Commands::League { league_id } => self.show_league(&league_id).await?,
            Commands::Trending { kind, lookback_hours, limit } => {
                self.show_trending(kind.into(), lookback_hours, limit).await?
            }
            Commands::Trade { give, get } => self.show_trade(&give, &get).await?,
        }

        self.save_players().await
    }

    async fn save_players(&self) -> Result<()> {
        let Some(path) = &self.players_file else { return Ok(()) };

        let snapshot = self.service.cache().snapshot().await;
        if snapshot.fetched_at().is_some() {
            snapshot.save_to_file(path).await?;
            info!("Saved {} players to {}", snapshot.len(), path.display());
        }
        Ok(())
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    async fn fetch_league(&self, league_id: &str) -> Result<SleeperLeague> {
        self.client
            .get_league(league_id)
            .await?
            .ok_or_else(|| anyhow!("League not found: {league_id}"))
    }

    async fn sync(&self, username: &str, season: Option<String>) -> Result<()> {
        let user = self
            .client
            .get_user(username)
            .await?
            .ok_or_else(|| anyhow!("User not found: {username}"))?;
        let season = season.unwrap_or_else(|| Utc::now().year().to_string());

        let mut leagues = Vec::new();
        for league in self.client.get_user_leagues(&user.user_id, &season).await? {
            let rosters = self.client.get_rosters(&league.league_id).await?;
            let my_player_ids = user_roster(&rosters, &user.user_id).map(|r| r.players.clone()).unwrap_or_default();
            leagues.push(LeagueSync {
                avatar_url: league.avatar.as_deref().map(|id| self.client.avatar_url(id)),
                rosters: rosters.len(),
                my_player_ids,
                league,
            });
        }

        let report = SyncReport {
            avatar_url: user.avatar.as_deref().map(|id| self.client.avatar_thumb_url(id)),
            user,
            season,
            leagues,
        };

        if self.json {
            return self.print_json(&report);
        }

        println!("👤 {} ({})", report.user.label().bold(), report.user.user_id);
        if let Some(url) = &report.avatar_url {
            println!("   avatar: {}", url.dimmed());
        }
        println!("{}", "=".repeat(50));
        println!("{} leagues in {}", report.leagues.len(), report.season);

        for entry in &report.leagues {
            println!(
                "\n🏈 {} [{}] - {} rosters, {}",
                entry.league.name.bold(),
                entry.league.league_id,
                entry.rosters,
                entry.league.status
            );
            if entry.my_player_ids.is_empty() {
                println!("   {}", "no roster for this user".yellow());
            } else {
                println!("   your players: {}", entry.my_player_ids.join(", "));
            }
        }

        Ok(())
    }

    async fn show_player(&self, player_id: &str) -> Result<()> {
        let analytics = self.service.require_player(player_id).await?;

        if self.json {
            return self.print_json(&analytics);
        }

        print_player(&analytics);
        Ok(())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<()> {
        self.service.cache().initialize_data().await;
        let snapshot = self.service.cache().snapshot().await;
        let matches: Vec<_> = snapshot.search_players(query).into_iter().take(limit).collect();

        if self.json {
            return self.print_json(&matches);
        }

        if matches.is_empty() {
            println!("No players match '{}'", query);
            return Ok(());
        }

        for player in matches {
            println!(
                "{:>8}  {:<28} {:<4} {}",
                player.player_id,
                player.display_name(),
                player.position,
                player.team
            );
        }
        Ok(())
    }

    async fn show_roster(&self, league_id: &str, roster_id: u32) -> Result<()> {
        let league = self.fetch_league(league_id).await?;
        let rosters = self.client.get_rosters(league_id).await?;
        let roster = rosters
            .iter()
            .find(|r| r.roster_id == roster_id)
            .ok_or_else(|| anyhow!("Roster {roster_id} not found in league {league_id}"))?;
        let users = self.client.get_league_users(league_id).await?;

        let analytics = self.service.analyze_roster(roster, &league, &owner_name(&users, &roster.owner_id)).await;

        if self.json {
            return self.print_json(&analytics);
        }

        print_roster(&analytics);
        Ok(())
    }

    async fn show_matchups(&self, league_id: &str, week: Option<u32>) -> Result<()> {
        let week = match week {
            Some(week) => week,
            None => {
                self.service.cache().initialize_data().await;
                self.service
                    .cache()
                    .nfl_state()
                    .await
                    .map(|state| state.week)
                    .ok_or_else(|| anyhow!("Current NFL week unavailable, pass --week"))?
            }
        };

        let matchups = self.client.get_matchups(league_id, week).await?;
        let analytics = self.service.analyze_matchup(&matchups, week).await;

        if self.json {
            return self.print_json(&analytics);
        }

        println!("🏟️  Week {} matchups", week);
        println!("{}", "=".repeat(50));
        if analytics.is_empty() {
            println!("No matchups found");
        }
        for matchup in &analytics {
            print_matchup(matchup);
        }
        Ok(())
    }

    async fn show_league(&self, league_id: &str) -> Result<()> {
        let league = self.fetch_league(league_id).await?;
        let analytics = self.service.analyze_league(&league).await;

        if self.json {
            return self.print_json(&analytics);
        }

        println!("📊 {} ({})", league.name.bold(), league.season);
        println!("{}", "=".repeat(50));
        println!("Competitiveness:    {}", analytics.competitiveness);
        println!("Parity score:       {}", analytics.parity_score);
        println!("Average experience: {:.1}", analytics.average_experience);
        println!("Most active traders: {}", analytics.most_active_traders.join(", "));
        println!("Most active on waivers: {}", analytics.waivers_most_active.join(", "));
        Ok(())
    }

    async fn show_trending(&self, kind: TrendKind, lookback_hours: u32, limit: u32) -> Result<()> {
        let trending = self.client.get_trending_players(kind, lookback_hours, limit).await?;

        self.service.cache().initialize_data().await;
        let snapshot = self.service.cache().snapshot().await;
        let entries: Vec<TrendingEntry> = trending
            .into_iter()
            .map(|t| TrendingEntry {
                name: snapshot.get(&t.player_id).map(|p| p.display_name()).unwrap_or_else(|| t.player_id.clone()),
                player_id: t.player_id,
                count: t.count,
            })
            .collect();

        if self.json {
            return self.print_json(&entries);
        }

        println!("📈 Trending ({}) over the last {} hours", kind, lookback_hours);
        println!("{}", "=".repeat(50));
        for (i, entry) in entries.iter().enumerate() {
            println!("{:>3}. {:<28} {:>7}", i + 1, entry.name, entry.count);
        }
        Ok(())
    }

    async fn show_trade(&self, give: &[String], get: &[String]) -> Result<()> {
        let analysis = self.service.analyze_trade(give, get).await;

        if self.json {
            return self.print_json(&analysis);
        }

        print_trade(&analysis);
        Ok(())
    }
}

fn print_player(p: &PlayerAnalytics) {
    println!("🏈 {} - {} {}", p.name.bold(), p.position, p.team);
    println!("{}", "=".repeat(50));
    println!("Age / experience:  {} / {} yrs", p.age, p.experience);
    println!("Projected points:  {:.0} ({:.1} per game)", p.projected_points, p.season_projection.average_points);
    println!("Consistency:       {:.2}", p.consistency_score);
    println!("Injury risk:       {}", risk_label(&p.injury_risk.to_string()));
    println!("Trend:             {}", p.trending_status);
    println!("Value score:       {}", p.value_score.to_string().bold());
    println!("Rank:              {}", p.overall_rank);
    println!("Bye week:          {}", p.bye_week);
}

fn print_roster(r: &RosterAnalytics) {
    println!("📋 Roster {} - {}", r.roster_id, r.owner_name.bold());
    println!("{}", "=".repeat(50));
    println!("Total value:      {}", r.total_value);
    println!("Projected points: {:.0}", r.projected_points);
    println!("Depth score:      {}", r.depth_score);
    println!("Injury risk:      {}", risk_label(&r.injury_risk.to_string()));
    println!(
        "Ages:             avg {:.1}, {} young, {} peak, {} veteran",
        r.age_analysis.average_age,
        r.age_analysis.young_players,
        r.age_analysis.peak_age_players,
        r.age_analysis.veteran_players
    );
    println!(
        "Playoff odds:     {}% (title {}%), power {}",
        r.playoff_odds, r.championship_odds, r.power_ranking
    );

    let by_position: Vec<String> = r.strength_by_position.iter().map(|(pos, v)| format!("{pos} {v}")).collect();
    println!("By position:      {}", by_position.join(", "));

    print_list("Strengths", &r.strengths, Color::Green);
    print_list("Weaknesses", &r.weaknesses, Color::Red);
    print_list("Trade targets", &r.trade_targets, Color::Cyan);
    print_list("Drop candidates", &r.drop_candidates, Color::Yellow);
    print_list("Start", &r.start_sit_recommendations.start, Color::Green);
    print_list("Sit", &r.start_sit_recommendations.sit, Color::Red);
    print_list("Flex", &r.start_sit_recommendations.flex, Color::Cyan);
}

fn print_matchup(m: &MatchupAnalytics) {
    println!(
        "\nMatchup {}: roster {} ({:.0}) vs roster {} ({:.0})",
        m.matchup_id, m.team1.roster_id, m.team1.projected_points, m.team2.roster_id, m.team2.projected_points
    );
    println!("   closeness {} / upset potential {}", m.closeness_rating, m.upset_potential);
    for team in [&m.team1, &m.team2] {
        println!("   roster {} key players: {}", team.roster_id, team.key_players.join(", "));
        print_list("   advantages", &team.advantages, Color::Green);
        print_list("   concerns", &team.concerns, Color::Red);
    }
}

fn print_trade(t: &TradeAnalysis) {
    println!("🔄 Trade analysis");
    println!("{}", "=".repeat(50));
    for (label, side, total) in [("Give", &t.side_a, t.side_a_total), ("Get", &t.side_b, t.side_b_total)] {
        let names: Vec<String> = side.iter().map(|p| format!("{} ({})", p.name, p.value_score)).collect();
        println!("{:<5} {:>4}  {}", label, total, names.join(", "));
    }

    let verdict = match t.favored {
        TradeSide::A => format!("You give up {} more value", t.value_difference).red(),
        TradeSide::B => format!("You gain {} value", -t.value_difference).green(),
        TradeSide::Even => "Even trade".normal(),
    };
    println!("{}", verdict.bold());
}

fn print_list(label: &str, items: &[String], color: Color) {
    if !items.is_empty() {
        println!("{}: {}", label, items.join(", ").color(color));
    }
}

fn risk_label(risk: &str) -> ColoredString {
    match risk {
        "High" => risk.red(),
        "Medium" => risk.yellow(),
        _ => risk.green(),
    }
}
