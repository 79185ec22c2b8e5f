use crate::output::print_json;
use shipwright_core::track::Track;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct TrackOutput {
            track: &'static str,
            ideas: &'static [shipwright_core::track::Idea],
        }

        let catalog: Vec<TrackOutput> = Track::ALL
            .iter()
            .map(|track| TrackOutput {
                track: track.name(),
                ideas: track.ideas(),
            })
            .collect();
        return print_json(&catalog);
    }

    for track in Track::ALL {
        println!("{}", track.name());
        for (index, idea) in track.ideas().iter().enumerate() {
            println!("  {index}. {} - {}", idea.title, idea.description);
        }
    }
    Ok(())
}
