use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::feed::{Feed, FeedEvent};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::thread;
use std::time::Duration;

/// Handle the `watch` command: a polling tail over clock activity and the
/// audit trail. Runs until interrupted (or for `--polls` rounds in tests).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval, polls } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let mut feed = Feed::attach(&mut pool)?;

        info(format!(
            "Watching {} every {}s (Ctrl-C to stop)…",
            cfg.database, interval
        ));

        let mut round: u64 = 0;
        loop {
            thread::sleep(Duration::from_secs(*interval));

            for item in feed.poll(&mut pool)? {
                let color = match item.event {
                    FeedEvent::Insert if item.table == "time_entries" => GREEN,
                    FeedEvent::Update => YELLOW,
                    FeedEvent::Insert => CYAN,
                };
                println!(
                    "{}[{} #{}]{} {}",
                    color, item.table, item.row_id, RESET, item.summary
                );
            }

            round += 1;
            if let Some(max) = polls
                && round >= *max
            {
                break;
            }
        }
    }

    Ok(())
}
