//! The daily cycle controller.
//!
//! On each invocation: load state, short-circuit if today already ran,
//! otherwise process every track in fixed order (advance rotation, build,
//! publish, announce), pausing between non-final tracks, then stamp today's
//! date and persist state exactly once. A failure in one track never
//! prevents attempting the others and never rolls back that track's
//! rotation: the idea is consumed for the day regardless of outcome.

use crate::announce::{Announcement, Announcer};
use crate::artifact::ArtifactBuilder;
use crate::clock::Clock;
use crate::config::Settings;
use crate::error::Result;
use crate::generate::TextGenerator;
use crate::host::RepoHost;
use crate::logbook::Logbook;
use crate::paths;
use crate::publish::Publisher;
use crate::state::CycleState;
use crate::track::{Idea, Track};
use crate::vcs::{CommitIdentity, RemoteAuth, Vcs};
use std::time::Duration;

/// The external collaborators, injected so the whole cycle can run against
/// stubs in tests.
pub struct CycleDeps<'a> {
    pub generator: &'a dyn TextGenerator,
    pub host: &'a dyn RepoHost,
    pub announcer: &'a dyn Announcer,
    pub vcs: &'a dyn Vcs,
    pub clock: &'a dyn Clock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Today's cycle already happened; nothing was attempted.
    AlreadyRan,
    /// The per-track loop ran to the end. `failed` tracks were logged and
    /// skipped, not retried.
    Completed { published: usize, failed: usize },
}

pub struct CycleController<'a> {
    settings: &'a Settings,
    logbook: Logbook,
}

impl<'a> CycleController<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            logbook: Logbook::new(paths::log_path(&settings.data_dir)),
        }
    }

    pub async fn run(&self, deps: &CycleDeps<'_>) -> Result<CycleOutcome> {
        let state_path = paths::state_path(&self.settings.data_dir);
        let mut state = CycleState::load(&state_path)?;

        let today = deps.clock.now().date_naive();
        if state.last_run_date == Some(today) {
            self.note("Cycle already ran today; nothing to do.")?;
            return Ok(CycleOutcome::AlreadyRan);
        }

        let builder = ArtifactBuilder::new(deps.generator, &self.settings.completion_model);
        let publisher = Publisher::new(
            deps.host,
            deps.vcs,
            deps.clock,
            paths::scratch_dir(&self.settings.data_dir),
            CommitIdentity {
                name: self.settings.commit_name.clone(),
                email: self.settings.commit_email.clone(),
            },
            RemoteAuth {
                username: self.settings.forge_owner.clone(),
                token: self.settings.forge_token.clone(),
            },
        );

        let mut published = 0usize;
        let mut failed = 0usize;

        for (pos, track) in Track::ALL.iter().enumerate() {
            let ideas = track.ideas();
            // The rotation advances before the attempt and is never rolled
            // back: at most one shot per idea per day.
            let index = state.advance(track.name(), ideas.len());
            let idea = &ideas[index];

            match self.run_track(*track, idea, &builder, &publisher, deps).await {
                Ok(()) => published += 1,
                Err(e) => {
                    failed += 1;
                    self.note(&format!("ERROR processing {}: {e}", track.name()))?;
                }
            }

            if pos + 1 < Track::ALL.len() {
                self.note(&format!(
                    "[{}] Pausing {}s before next track.",
                    track.name(),
                    self.settings.pause_secs
                ))?;
                deps.clock
                    .pause(Duration::from_secs(self.settings.pause_secs))
                    .await;
            }
        }

        // The cycle counts as attempted even if every track failed; it will
        // not re-run today.
        state.last_run_date = Some(today);
        state.save(&state_path)?;
        self.note(&format!(
            "Daily cycle complete: {published} published, {failed} failed."
        ))?;

        Ok(CycleOutcome::Completed { published, failed })
    }

    async fn run_track(
        &self,
        track: Track,
        idea: &Idea,
        builder: &ArtifactBuilder<'_>,
        publisher: &Publisher<'_>,
        deps: &CycleDeps<'_>,
    ) -> Result<()> {
        self.note(&format!(
            "[{}] Generating project: {} - {}",
            track.name(),
            idea.title,
            idea.description
        ))?;
        let artifacts = builder.build(track, idea).await?;

        let repo_name = format!(
            "{}-{}",
            idea.slug(),
            time_suffix(deps.clock.now().timestamp_millis())
        );
        let description = format!("{} project: {}", track.name(), idea.description);
        let repo = publisher.publish(&repo_name, &description, &artifacts).await?;
        self.note(&format!(
            "[{}] Repository published: {}",
            track.name(),
            repo.web_url
        ))?;

        let post = announcement(&self.settings.board_channel, track, idea, &repo.web_url);
        let receipt = deps.announcer.announce(&post).await?;
        self.note(&format!(
            "[{}] Announced as post {}",
            track.name(),
            receipt.post_id
        ))?;
        Ok(())
    }

    /// Record a message in both the durable logbook and the tracing output.
    fn note(&self, message: &str) -> Result<()> {
        tracing::info!("{message}");
        self.logbook.append(message)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn announcement(channel: &str, track: Track, idea: &Idea, web_url: &str) -> Announcement {
    let title = format!("[{channel}] {}: {}", track.name(), idea.title);
    let body = format!(
        "## {}\n\n{}\n\n**Repository:** {}\n\nGenerated and published by the daily build \
         cycle. Feedback and contributions welcome!\n",
        idea.title, idea.description, web_url
    );
    Announcement { title, body }
}

/// Short base36 rendering of a millisecond timestamp, keeping repo names
/// unique across runs without a second identifier scheme.
fn time_suffix(millis: i64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut n = millis.unsigned_abs();
    let mut out = String::new();
    loop {
        out.insert(0, DIGITS[(n % 36) as usize] as char);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    if out.len() > 6 {
        out.split_off(out.len() - 6)
    } else {
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announce::PostReceipt;
    use crate::error::ShipwrightError;
    use crate::generate::GenerationRequest;
    use crate::host::{RemoteRepo, RepoSpec};
    use crate::state::CycleState;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // -- stub collaborators --------------------------------------------------

    #[derive(Default)]
    struct StubGenerator {
        calls: Mutex<Vec<String>>,
        fail_when_contains: Option<&'static str>,
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request.prompt.clone());
            if let Some(marker) = self.fail_when_contains {
                if request.prompt.contains(marker) {
                    return Err(ShipwrightError::GenerationFailed("stubbed outage".into()));
                }
            }
            Ok("generated content".to_string())
        }
    }

    #[derive(Default)]
    struct StubHost {
        created: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RepoHost for StubHost {
        async fn create_repository(&self, spec: &RepoSpec) -> Result<RemoteRepo> {
            self.created.lock().unwrap().push(spec.name.clone());
            Ok(RemoteRepo {
                web_url: format!("https://forge.example/builder/{}", spec.name),
                clone_url: format!("https://forge.example/builder/{}.git", spec.name),
            })
        }
    }

    #[derive(Default)]
    struct StubAnnouncer {
        posts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Announcer for StubAnnouncer {
        async fn announce(&self, post: &Announcement) -> Result<PostReceipt> {
            if self.fail {
                return Err(ShipwrightError::Announce("stubbed outage".into()));
            }
            self.posts.lock().unwrap().push(post.title.clone());
            Ok(PostReceipt {
                post_id: format!("p{}", self.posts.lock().unwrap().len()),
            })
        }
    }

    #[derive(Default)]
    struct NullVcs;

    impl Vcs for NullVcs {
        fn init_and_commit(&self, _: &Path, _: &str, _: &CommitIdentity) -> Result<()> {
            Ok(())
        }

        fn push(&self, _: &Path, _: &str, _: &RemoteAuth, _: &str) -> Result<()> {
            Ok(())
        }
    }

    struct TestClock {
        now: DateTime<Utc>,
        pauses: Mutex<Vec<Duration>>,
    }

    impl TestClock {
        fn new() -> Self {
            Self {
                now: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
                pauses: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.now
        }

        async fn pause(&self, duration: Duration) {
            self.pauses.lock().unwrap().push(duration);
        }
    }

    // -- fixture -------------------------------------------------------------

    struct Fixture {
        _dir: TempDir,
        settings: Settings,
        generator: StubGenerator,
        host: StubHost,
        announcer: StubAnnouncer,
        vcs: NullVcs,
        clock: TestClock,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let mut map = BTreeMap::new();
            map.insert("COMPLETION_API_KEY".to_string(), "ck".to_string());
            map.insert("FORGE_TOKEN".to_string(), "ft".to_string());
            map.insert("FORGE_OWNER".to_string(), "builder".to_string());
            map.insert("BOARD_API_KEY".to_string(), "bk".to_string());
            map.insert(
                "DATA_DIR".to_string(),
                dir.path().join("data").to_string_lossy().into_owned(),
            );
            let settings = Settings::from_map(map).unwrap();
            Self {
                _dir: dir,
                settings,
                generator: StubGenerator::default(),
                host: StubHost::default(),
                announcer: StubAnnouncer::default(),
                vcs: NullVcs,
                clock: TestClock::new(),
            }
        }

        fn deps(&self) -> CycleDeps<'_> {
            CycleDeps {
                generator: &self.generator,
                host: &self.host,
                announcer: &self.announcer,
                vcs: &self.vcs,
                clock: &self.clock,
            }
        }

        async fn run(&self) -> CycleOutcome {
            CycleController::new(&self.settings)
                .run(&self.deps())
                .await
                .unwrap()
        }

        fn state(&self) -> CycleState {
            CycleState::load(&paths::state_path(&self.settings.data_dir)).unwrap()
        }

        fn log_messages(&self) -> Vec<String> {
            Logbook::new(paths::log_path(&self.settings.data_dir))
                .entries()
                .unwrap()
                .into_iter()
                .map(|e| e.message)
                .collect()
        }
    }

    // -- scenarios -----------------------------------------------------------

    #[tokio::test]
    async fn full_run_publishes_every_track() {
        let fx = Fixture::new();
        let outcome = fx.run().await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                published: 3,
                failed: 0
            }
        );

        let state = fx.state();
        assert_eq!(state.last_run_date, fx.clock.now.date_naive().into());
        for track in Track::ALL {
            assert_eq!(state.cursor(track.name()), 0, "track {track}");
        }

        assert_eq!(fx.host.created.lock().unwrap().len(), 3);
        assert_eq!(fx.announcer.posts.lock().unwrap().len(), 3);

        let log = fx.log_messages();
        for track in Track::ALL {
            assert!(
                log.iter().any(|m| m.contains(&format!("[{}]", track.name()))),
                "no log entry for track {track}"
            );
        }
        assert!(log.iter().any(|m| m.contains("Daily cycle complete")));
    }

    #[tokio::test]
    async fn pause_happens_between_non_final_tracks_only() {
        let fx = Fixture::new();
        fx.run().await;

        let pauses = fx.clock.pauses.lock().unwrap();
        assert_eq!(pauses.len(), Track::ALL.len() - 1);
        assert!(pauses.iter().all(|d| *d == Duration::from_secs(1800)));
    }

    #[tokio::test]
    async fn second_run_same_day_is_a_no_op() {
        let fx = Fixture::new();
        fx.run().await;

        let calls_before = fx.generator.calls.lock().unwrap().len();
        let repos_before = fx.host.created.lock().unwrap().len();
        let log_before = fx.log_messages().len();

        let outcome = fx.run().await;
        assert_eq!(outcome, CycleOutcome::AlreadyRan);

        assert_eq!(fx.generator.calls.lock().unwrap().len(), calls_before);
        assert_eq!(fx.host.created.lock().unwrap().len(), repos_before);

        let log = fx.log_messages();
        assert_eq!(log.len(), log_before + 1);
        assert!(log.last().unwrap().contains("already ran today"));
    }

    #[tokio::test]
    async fn failing_track_advances_rotation_and_spares_the_others() {
        let mut fx = Fixture::new();
        // Poison generation for the Skill track only; its prompts carry the
        // selected idea's title.
        fx.generator.fail_when_contains = Some(Track::Skill.ideas()[0].title);

        let outcome = fx.run().await;
        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                published: 2,
                failed: 1
            }
        );

        let state = fx.state();
        assert_eq!(state.last_run_date, fx.clock.now.date_naive().into());
        // The failed track's rotation advanced exactly once anyway.
        for track in Track::ALL {
            assert_eq!(state.cursor(track.name()), 0, "track {track}");
        }

        // No repository was created for the failed track.
        let created = fx.host.created.lock().unwrap();
        assert_eq!(created.len(), 2);
        let skill_slug = Track::Skill.ideas()[0].slug();
        assert!(created.iter().all(|name| !name.starts_with(&skill_slug)));

        let log = fx.log_messages();
        assert!(log.iter().any(|m| m.contains("ERROR processing Skill")));
    }

    #[tokio::test]
    async fn announcement_failure_keeps_repo_and_continues() {
        let mut fx = Fixture::new();
        fx.announcer.fail = true;

        let outcome = fx.run().await;
        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                published: 0,
                failed: 3
            }
        );

        // Every repository was still created and pushed; only the
        // announcements failed, and the cycle still completed.
        assert_eq!(fx.host.created.lock().unwrap().len(), 3);
        assert_eq!(fx.state().last_run_date, fx.clock.now.date_naive().into());
    }

    #[tokio::test]
    async fn rotation_continues_across_days() {
        let mut fx = Fixture::new();
        fx.run().await;

        // Next calendar day: each track picks its second idea.
        fx.clock.now = Utc.with_ymd_and_hms(2026, 3, 15, 9, 0, 0).unwrap();
        fx.run().await;

        let state = fx.state();
        for track in Track::ALL {
            assert_eq!(state.cursor(track.name()), 1, "track {track}");
        }
    }

    #[test]
    fn time_suffix_is_base36_and_short() {
        assert_eq!(time_suffix(0), "0");
        assert_eq!(time_suffix(35), "z");
        assert_eq!(time_suffix(36), "10");
        let suffix = time_suffix(1_800_000_000_000);
        assert!(suffix.len() <= 6);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn announcement_carries_repo_url_and_channel() {
        let idea = &Track::Service.ideas()[0];
        let post = announcement("builds", Track::Service, idea, "https://forge.example/r");
        assert_eq!(post.title, "[builds] Service: LedgerLite");
        assert!(post.body.contains("https://forge.example/r"));
        assert!(post.body.contains(idea.description));
    }
}
