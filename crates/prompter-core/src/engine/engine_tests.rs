//! Tests for the playback engine
//!
//! Pacing tests run on paused tokio time so intervals are exact. Scroll tests
//! drive frames with explicit instants against a one-word-per-row layout.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::{sleep, sleep_until, Instant};

    use crate::config::PrompterConfig;
    use crate::engine::{Teleprompter, WordState};
    use crate::error::PrompterError;
    use crate::playback::SpeedStep;
    use crate::scroll::{ElementBounds, LayoutProbe};

    /// One word per row
    struct Rows {
        container: f64,
        words: usize,
    }

    impl LayoutProbe for Rows {
        fn container_height(&self) -> f64 {
            self.container
        }

        fn content_height(&self) -> f64 {
            self.words as f64
        }

        fn element_bounds(&self, index: usize) -> Option<ElementBounds> {
            (index < self.words).then_some(ElementBounds {
                top: index as f64,
                height: 1.0,
            })
        }
    }

    fn engine(text: &str, speed: f64) -> Teleprompter {
        let mut config = PrompterConfig::default().with_script(text);
        config.playback.speed = speed;
        Teleprompter::new(&config).expect("valid script")
    }

    fn numbered(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Sleep through every pacing deadline due within `duration`
    async fn play_for(engine: &mut Teleprompter, duration: Duration) -> Vec<usize> {
        let end = Instant::now() + duration;
        let mut visited = Vec::new();
        while let Some(deadline) = engine.next_tick() {
            if deadline.at > end {
                break;
            }
            sleep_until(deadline.at).await;
            if engine.on_tick(deadline, Instant::now()) {
                visited.push(engine.current_index());
            }
        }
        sleep_until(end).await;
        visited
    }

    /// Deliver every tick due by `now`, each at its scheduled time
    fn advance_to(engine: &mut Teleprompter, now: Instant) -> usize {
        let mut applied = 0;
        while let Some(deadline) = engine.next_tick() {
            if deadline.at > now || !engine.on_tick(deadline, deadline.at) {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Drive scroll frames for `duration`, returning the instant reached
    fn run_frames(
        engine: &mut Teleprompter,
        mut now: Instant,
        duration: Duration,
        probe: &dyn LayoutProbe,
    ) -> Instant {
        let end = now + duration;
        while now < end {
            let Some(request) = engine.next_frame(now) else {
                break;
            };
            now = request.due;
            engine.on_frame(request, now, probe);
        }
        now
    }

    #[test]
    fn test_missing_script_routes_to_entry() {
        let err = Teleprompter::new(&PrompterConfig::default()).err().unwrap();
        assert!(matches!(err, PrompterError::MissingScript));
        assert!(err.needs_script_entry());

        let config = PrompterConfig::default().with_script(" \n\t ");
        let err = Teleprompter::new(&config).err().unwrap();
        assert!(matches!(err, PrompterError::EmptyScript));
    }

    #[test]
    fn test_initial_state() {
        let engine = engine("the quick brown fox", 1.0);
        let snapshot = engine.snapshot();
        assert!(!snapshot.is_playing);
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.words.len(), 4);
        assert_eq!(snapshot.words[0], "the");
        assert!(snapshot.auto_scroll);
        assert!(!snapshot.is_editing);
        assert_eq!(engine.word_state(0), WordState::Current);
        assert_eq!(engine.word_state(1), WordState::Future);
    }

    #[tokio::test(start_paused = true)]
    async fn test_plays_to_end_and_pauses() {
        let mut engine = engine("the quick brown fox", 1.0);
        assert!(engine.toggle_play(Instant::now()));

        let visited = play_for(&mut engine, Duration::from_millis(1000)).await;
        assert_eq!(visited, vec![1, 2, 3]);
        assert_eq!(engine.current_index(), 3);
        assert!(!engine.is_playing());
        assert_eq!(engine.ticks(), 3);
        assert!(engine.next_tick().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_visits_every_word_in_order() {
        let mut engine = engine(&numbered(12), 2.0);
        engine.toggle_play(Instant::now());

        // 150ms per word at 2x
        let visited = play_for(&mut engine, Duration::from_secs(5)).await;
        assert_eq!(visited, (1..12).collect::<Vec<_>>());
        assert!(!engine.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_interval_follows_speed() {
        let mut engine = engine(&numbered(50), 0.5);
        engine.toggle_play(Instant::now());

        // 600ms per word at 0.5x
        let visited = play_for(&mut engine, Duration::from_millis(1799)).await;
        assert_eq!(visited, vec![1, 2]);
        assert!(engine.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_word_pauses_on_first_tick() {
        let mut engine = engine("hello", 1.0);
        engine.toggle_play(Instant::now());

        play_for(&mut engine, Duration::from_secs(1)).await;
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_playing());
        assert_eq!(engine.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_at_last_word_pauses_without_advancing() {
        let mut engine = engine("one two three", 1.0);
        assert!(engine.seek(2));
        engine.toggle_play(Instant::now());

        play_for(&mut engine, Duration::from_secs(1)).await;
        assert_eq!(engine.current_index(), 2);
        assert!(!engine.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_seek_during_playback_pauses() {
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(Instant::now());
        play_for(&mut engine, Duration::from_millis(700)).await;
        assert_eq!(engine.current_index(), 2);

        let pending = engine.next_tick().unwrap();
        assert!(engine.seek(0));
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_playing());

        // The tick scheduled before the seek must not land
        sleep_until(pending.at).await;
        assert!(!engine.on_tick(pending, Instant::now()));
        play_for(&mut engine, Duration::from_secs(2)).await;
        assert_eq!(engine.current_index(), 0);

        // Resuming continues from the sought word
        engine.toggle_play(Instant::now());
        assert_eq!(play_for(&mut engine, Duration::from_millis(300)).await, [1]);
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn test_seek_out_of_range_is_ignored() {
        let mut engine = engine("a b c", 1.0);
        assert!(engine.seek(1));
        let revision = engine.revision();

        assert!(!engine.seek(3));
        assert!(!engine.seek(usize::MAX));
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn test_stale_tick_after_pause_and_resume() {
        let start = Instant::now();
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(start);
        let stale = engine.next_tick().unwrap();

        engine.toggle_play(start);
        engine.toggle_play(start);
        assert!(!engine.on_tick(stale, stale.at));
        assert_eq!(engine.current_index(), 0);

        let fresh = engine.next_tick().unwrap();
        assert!(engine.on_tick(fresh, fresh.at));
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn test_resume_measures_from_resume_time() {
        let start = Instant::now();
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(start);
        engine.toggle_play(start + Duration::from_millis(250));

        let resumed = start + Duration::from_secs(10);
        engine.toggle_play(resumed);
        assert_eq!(
            engine.next_tick().unwrap().at,
            resumed + Duration::from_millis(300)
        );
        // Nothing is due immediately after a long pause
        assert_eq!(advance_to(&mut engine, resumed), 0);
    }

    #[test]
    fn test_speed_change_mid_interval() {
        let start = Instant::now();
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(start);

        assert!(engine.update_speed(2.0));
        assert!(engine.is_playing());
        assert_eq!(
            engine.next_tick().unwrap().at,
            start + Duration::from_millis(150)
        );
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut engine = engine("a b", 1.0);
        engine.update_speed(5.0);
        assert_eq!(engine.speed().value(), 2.0);
        engine.update_speed(0.1);
        assert_eq!(engine.speed().value(), 0.5);
        assert!(!engine.update_speed(f64::NAN));
        assert_eq!(engine.speed().value(), 0.5);
    }

    #[test]
    fn test_nudge_speed_steps_and_clamps() {
        let mut engine = engine("a b", 2.0);
        assert!(!engine.nudge_speed(SpeedStep::Faster));
        assert!(engine.nudge_speed(SpeedStep::Slower));
        assert_eq!(engine.speed().value(), 1.9);

        for _ in 0..30 {
            engine.nudge_speed(SpeedStep::Slower);
        }
        assert_eq!(engine.speed().value(), 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_up_mid_interval_advances_one_word() {
        let mut engine = engine(&numbered(10), 0.5);
        engine.toggle_play(Instant::now());
        sleep(Duration::from_millis(500)).await;

        // Three 150ms intervals already fit in the elapsed time
        assert!(engine.update_speed(2.0));
        let now = Instant::now();
        let mut fired = 0;
        while let Some(deadline) = engine.next_tick() {
            if deadline.at > now || !engine.on_tick(deadline, now) {
                break;
            }
            fired += 1;
        }
        assert_eq!(fired, 1);
        assert_eq!(engine.current_index(), 1);

        // Then the new cadence holds
        assert_eq!(play_for(&mut engine, Duration::from_millis(300)).await, [2, 3]);
    }

    #[test]
    fn test_restart_from_playing() {
        let start = Instant::now();
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(start);
        advance_to(&mut engine, start + Duration::from_millis(650));
        assert_eq!(engine.current_index(), 2);
        let pending = engine.next_tick().unwrap();

        engine.restart();
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_playing());
        assert!(!engine.on_tick(pending, pending.at));
    }

    #[test]
    fn test_restart_discards_edit_session() {
        let mut engine = engine("a b c", 1.0);
        engine.seek(2);
        engine.enter_edit();

        engine.restart();
        assert!(!engine.is_editing());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.words().len(), 3);
    }

    #[test]
    fn test_restart_eases_back_to_top() {
        let start = Instant::now();
        let probe = Rows {
            container: 10.0,
            words: 100,
        };
        let mut engine = engine(&numbered(100), 1.0);
        engine.mount(start);
        engine.seek(50);
        let now = run_frames(&mut engine, start, Duration::from_secs(1), &probe);
        assert_eq!(engine.scroll_offset(), 45.5);

        engine.restart();
        let request = engine.next_frame(now).unwrap();
        engine.on_frame(request, request.due, &probe);
        let first = engine.scroll_offset();
        assert!(first > 0.0 && first < 45.5, "eases instead of jumping");

        run_frames(&mut engine, request.due, Duration::from_secs(2), &probe);
        assert_eq!(engine.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_follows_playback() {
        let start = Instant::now();
        let probe = Rows {
            container: 10.0,
            words: 40,
        };
        let mut engine = engine(&numbered(40), 2.0);
        engine.mount(start);
        let now = run_frames(&mut engine, start, Duration::from_millis(200), &probe);
        assert_eq!(engine.scroll_offset(), 0.0);

        engine.seek(30);
        run_frames(&mut engine, now, Duration::from_secs(2), &probe);
        assert_eq!(engine.scroll_offset(), 25.5);
    }

    #[test]
    fn test_manual_scroll_requires_auto_scroll_off() {
        let probe = Rows {
            container: 10.0,
            words: 40,
        };
        let mut engine = engine(&numbered(40), 1.0);
        assert!(!engine.scroll_by(3.0, &probe));

        engine.toggle_auto_scroll();
        assert!(!engine.auto_scroll());
        assert!(engine.scroll_by(3.0, &probe));
        assert_eq!(engine.scroll_offset(), 3.0);
    }

    #[test]
    fn test_exit_runs_callback_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut engine = engine("a b c", 1.0).on_exit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let start = Instant::now();
        engine.mount(start);
        engine.toggle_play(start);
        let pending = engine.next_tick().unwrap();

        engine.exit();
        engine.exit();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(engine.is_exited());
        assert!(!engine.is_playing());
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.on_tick(pending, pending.at));
        assert!(engine.next_frame(start).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_changes_after_dispose() {
        let probe = Rows {
            container: 10.0,
            words: 10,
        };
        let start = Instant::now();
        let mut engine = engine(&numbered(10), 1.0);
        engine.mount(start);
        engine.toggle_play(start);
        let tick = engine.next_tick().unwrap();
        let frame = engine.next_frame(start).unwrap();

        engine.dispose();
        let revision = engine.revision();

        sleep_until(tick.at + Duration::from_secs(1)).await;
        let now = Instant::now();
        assert!(!engine.on_tick(tick, now));
        assert!(!engine.on_frame(frame, now, &probe));
        assert!(!engine.toggle_play(now));
        assert!(!engine.seek(3));
        assert!(engine.next_tick().is_none());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn test_edit_mode_pauses_and_blocks_playback() {
        let start = Instant::now();
        let mut engine = engine("one two three", 1.0);
        engine.toggle_play(start);
        let pending = engine.next_tick().unwrap();

        assert!(engine.enter_edit());
        assert!(engine.is_editing());
        assert!(!engine.is_playing());
        assert_eq!(engine.edit_session().unwrap().original(), "one two three");

        assert!(!engine.toggle_play(start));
        assert!(!engine.seek(1));
        assert!(!engine.on_tick(pending, pending.at));
        assert!(!engine.enter_edit());
    }

    #[test]
    fn test_commit_replaces_script() {
        let mut engine = engine("one two three", 1.0);
        engine.seek(2);
        engine.enter_edit();

        engine.commit_edit("alpha  beta\ngamma delta").unwrap();
        assert!(!engine.is_editing());
        assert!(!engine.is_playing());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.words(), ["alpha", "beta", "gamma", "delta"]);
        assert_eq!(engine.script().text(), "alpha  beta\ngamma delta");
    }

    #[test]
    fn test_commit_empty_keeps_session_open() {
        let mut engine = engine("one two three", 1.0);
        engine.seek(1);
        engine.enter_edit();

        let err = engine.commit_edit("   ").unwrap_err();
        assert!(matches!(err, PrompterError::EmptyScript));
        assert!(engine.is_editing());
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.words().len(), 3);
    }

    #[test]
    fn test_commit_draft() {
        let mut engine = engine("one two", 1.0);
        engine.enter_edit();
        engine.update_draft("three four five");
        assert!(engine.edit_session().unwrap().is_modified());

        engine.commit_draft().unwrap();
        assert_eq!(engine.words().len(), 3);
    }

    #[test]
    fn test_cancel_edit_keeps_script() {
        let mut engine = engine("one two three", 1.0);
        engine.seek(2);
        engine.enter_edit();
        engine.update_draft("something else");

        assert!(engine.cancel_edit(Instant::now()));
        assert!(!engine.is_editing());
        assert!(!engine.is_playing());
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.words(), ["one", "two", "three"]);
        assert!(!engine.cancel_edit(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_edit_resumes_interrupted_playback() {
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(Instant::now());
        play_for(&mut engine, Duration::from_millis(400)).await;
        assert_eq!(engine.current_index(), 1);
        let pending = engine.next_tick().unwrap();

        engine.enter_edit();
        sleep(Duration::from_secs(5)).await;
        let resumed = Instant::now();
        assert!(engine.cancel_edit(resumed));
        assert!(engine.is_playing());
        assert_eq!(engine.current_index(), 1);

        // The old schedule is gone; the new one starts at the cancel
        assert!(!engine.on_tick(pending, resumed));
        assert_eq!(
            engine.next_tick().unwrap().at,
            resumed + Duration::from_millis(300)
        );
        assert_eq!(play_for(&mut engine, Duration::from_millis(300)).await, [2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_from_before_edit_never_lands_on_new_script() {
        let mut engine = engine(&numbered(10), 1.0);
        engine.toggle_play(Instant::now());
        play_for(&mut engine, Duration::from_millis(700)).await;
        assert_eq!(engine.current_index(), 2);
        let pending = engine.next_tick().unwrap();

        engine.enter_edit();
        engine.commit_edit("a b").unwrap();

        sleep_until(pending.at).await;
        assert!(!engine.on_tick(pending, Instant::now()));
        assert_eq!(engine.current_index(), 0);
        assert!(!engine.is_playing());
        assert!(engine.next_tick().is_none());
    }

    #[test]
    fn test_discontinuities_cancel_pending_frame() {
        let probe = Rows {
            container: 10.0,
            words: 20,
        };
        let start = Instant::now();
        let mut engine = engine(&numbered(20), 1.0);
        engine.mount(start);

        let before_seek = engine.next_frame(start).unwrap();
        engine.seek(5);
        assert!(!engine.on_frame(before_seek, before_seek.due, &probe));

        let before_speed = engine.next_frame(start).unwrap();
        assert_ne!(before_speed.id, before_seek.id);
        engine.update_speed(1.5);
        assert!(!engine.on_frame(before_speed, before_speed.due, &probe));

        let before_restart = engine.next_frame(start).unwrap();
        engine.restart();
        assert!(!engine.on_frame(before_restart, before_restart.due, &probe));

        engine.enter_edit();
        let before_commit = engine.next_frame(start).unwrap();
        engine.commit_edit("x y z").unwrap();
        assert!(!engine.on_frame(before_commit, before_commit.due, &probe));

        // The loop is still mounted and serves a fresh request
        let fresh = engine.next_frame(start).unwrap();
        assert_ne!(fresh.id, before_commit.id);
    }

    #[test]
    fn test_commit_without_session_is_noop() {
        let mut engine = engine("one two", 1.0);
        engine.commit_edit("new words here").unwrap();
        assert_eq!(engine.words(), ["one", "two"]);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut engine = engine("a b c", 1.0);
        let r0 = engine.revision();
        engine.seek(1);
        let r1 = engine.revision();
        assert!(r1 > r0);
        engine.update_speed(engine.speed().value());
        assert_eq!(engine.revision(), r1);
    }
}
