use crate::output::print_json;
use anyhow::Context;
use shipwright_core::paths;
use shipwright_core::state::CycleState;
use shipwright_core::track::Track;
use std::path::Path;

pub fn run(env_file: &Path, data_dir: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let data_dir = super::resolve_data_dir(env_file, data_dir);
    let state =
        CycleState::load(&paths::state_path(&data_dir)).context("failed to load cycle state")?;

    if json {
        #[derive(serde::Serialize)]
        struct TrackLine {
            track: &'static str,
            last_index: i64,
            next_idea: &'static str,
        }

        #[derive(serde::Serialize)]
        struct StateOutput {
            last_run_date: Option<chrono::NaiveDate>,
            tracks: Vec<TrackLine>,
        }

        let tracks = Track::ALL
            .iter()
            .map(|track| {
                let cursor = state.cursor(track.name());
                TrackLine {
                    track: track.name(),
                    last_index: cursor,
                    next_idea: next_idea(*track, cursor),
                }
            })
            .collect();

        return print_json(&StateOutput {
            last_run_date: state.last_run_date,
            tracks,
        });
    }

    match state.last_run_date {
        Some(date) => println!("Last run: {date}"),
        None => println!("Last run: never"),
    }
    for track in Track::ALL {
        let cursor = state.cursor(track.name());
        println!(
            "{:<10} last index {:>2}, next idea: {}",
            track.name(),
            cursor,
            next_idea(track, cursor)
        );
    }
    Ok(())
}

fn next_idea(track: Track, cursor: i64) -> &'static str {
    let ideas = track.ideas();
    let next = ((cursor + 1) % ideas.len() as i64) as usize;
    ideas[next].title
}
