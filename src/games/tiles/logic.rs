//! Game logic for the falling-tile modes: stepping, taps, scoring.

use super::types::*;
use rand::Rng;

/// What a simulation step observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Session is not playing; nothing moved.
    Idle,
    /// Tiles advanced; `spawned` is set when a new tile entered the queue.
    Advanced { spawned: bool },
    /// An untapped tile crossed the bottom edge.
    Missed(TileId),
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Ignored because the session is not playing.
    Ignored,
    Scored { lane: usize },
    GameOver(GameOverReason),
}

/// Fall speed for a given score and tick count.
///
/// Stepped by score thresholds, scaled by the compound growth factor, capped
/// at `max_speed`. Without the cap Rush's growth is unbounded in `ticks`; with
/// it, and `max_speed` bounded by `SPEED_LIMIT`, a tile moves less than
/// `TILE_HEIGHT` per reference frame.
pub fn compute_fall_speed(config: &TilesConfig, score: u64, ticks: u64) -> f64 {
    let steps = (score / config.score_threshold.max(1)) as f64;
    let stepped = config.base_speed + steps * config.speed_increment;
    let growth = config.speed_growth.powf(ticks as f64);
    (stepped * growth).min(config.max_speed)
}

/// Add `reward` to the score and re-derive the fall speed. The speed never
/// drops below its previous value.
pub fn award(session: &mut GameSession, config: &TilesConfig, reward: u64) {
    session.score += reward;
    let speed = compute_fall_speed(config, session.score, session.ticks);
    session.fall_speed = session.fall_speed.max(speed);
}

/// Reset `session` for a fresh play-through with exactly one tile queued.
pub fn start_session<R: Rng>(session: &mut GameSession, config: &TilesConfig, rng: &mut R) {
    *session = GameSession {
        phase: GamePhase::Playing,
        fall_speed: config.base_speed,
        ..Default::default()
    };
    let first = session.generate_tile(config.lane_count, rng);
    session.tiles.push(first);
    session.signals.push(GameSignal::PlayingChanged(true));
    log::debug!("session started, first tile in lane {}", session.tiles[0].lane);
}

/// Move the session into game over. Returns false if it was not playing.
pub fn end_session(session: &mut GameSession, reason: GameOverReason) -> bool {
    if !session.is_playing() {
        return false;
    }
    session.phase = GamePhase::GameOver;
    session.game_over_reason = Some(reason);
    session.signals.push(GameSignal::PlayingChanged(false));
    log::debug!("game over ({:?}) with score {}", reason, session.score);
    true
}

/// Advance the session by `dt_ms` milliseconds of wall-clock time.
///
/// Does not end the session on a miss; the caller decides how game over is
/// finalised so the high score can be persisted first.
pub fn simulate_step<R: Rng>(
    session: &mut GameSession,
    config: &TilesConfig,
    dt_ms: f64,
    rng: &mut R,
) -> StepOutcome {
    if !session.is_playing() {
        return StepOutcome::Idle;
    }

    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);
    session.ticks += 1;

    // 1. Advance every tile
    let distance = session.fall_speed * (dt_ms / REFERENCE_FRAME_MS);
    for tile in &mut session.tiles {
        tile.y += distance;
    }

    // 2. Spawn once the newest tile has fully entered
    let spawned = match session.newest_tile() {
        Some(newest) => newest.has_entered(),
        None => true,
    };
    if spawned {
        let tile = session.generate_tile(config.lane_count, rng);
        session.tiles.push(tile);
    }

    // 3. Miss: freeze the tile set as-is for the final frame
    if let Some(missed) = session
        .tiles
        .iter()
        .find(|t| !t.tapped && t.has_crossed_bottom())
    {
        return StepOutcome::Missed(missed.id);
    }

    // 4. Prune tiles that have fully left the screen
    session.tiles.retain(|t| !t.has_exited());

    tick_highlight(session, dt_ms);
    award(session, config, PASSIVE_REWARD);

    StepOutcome::Advanced { spawned }
}

/// Count down the tapped-lane highlight.
pub fn tick_highlight(session: &mut GameSession, dt_ms: f64) {
    if let Some((lane, remaining)) = session.active_lane {
        let remaining = remaining - dt_ms;
        session.active_lane = (remaining > 0.0).then_some((lane, remaining));
    }
}

/// Tap the tile with identity `id`.
///
/// Like `simulate_step`, this reports game over without finalising it.
pub fn handle_tap(session: &mut GameSession, config: &TilesConfig, id: TileId) -> TapOutcome {
    if !session.is_playing() {
        return TapOutcome::Ignored;
    }

    let lane = match session.tile_mut(id) {
        None => return TapOutcome::GameOver(GameOverReason::StaleTap(id)),
        Some(tile) if tile.tapped => {
            return TapOutcome::GameOver(GameOverReason::DoubleTap(id));
        }
        Some(tile) => {
            tile.tapped = true;
            tile.lane
        }
    };

    award(session, config, TAP_REWARD);
    session.active_lane = Some((lane, ACTIVE_HIGHLIGHT_MS));
    session.signals.push(GameSignal::Tap { lane });
    TapOutcome::Scored { lane }
}

/// Resolve a lane press to a tile and tap it. An empty lane is a wrong tap.
pub fn handle_lane_press(session: &mut GameSession, config: &TilesConfig, lane: usize) -> TapOutcome {
    if !session.is_playing() {
        return TapOutcome::Ignored;
    }
    match session.lane_target(lane) {
        Some(id) => handle_tap(session, config, id),
        None => TapOutcome::GameOver(GameOverReason::WrongLane(lane)),
    }
}

/// Build the renderer's read-only view.
pub fn snapshot(session: &GameSession, config: &TilesConfig, high_score: u64) -> Snapshot {
    Snapshot {
        tiles: session
            .tiles
            .iter()
            .map(|t| TileView {
                id: t.id,
                lane: t.lane,
                y: t.y,
                tapped: t.tapped,
            })
            .collect(),
        lane_count: config.lane_count,
        score: session.score,
        fall_speed: session.fall_speed,
        is_playing: session.is_playing(),
        is_game_over: session.is_game_over(),
        high_score,
        active_lane: session.active_lane.map(|(lane, _)| lane),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn playing_session(config: &TilesConfig) -> GameSession {
        let mut session = GameSession::default();
        start_session(&mut session, config, &mut create_test_rng());
        session
    }

    #[test]
    fn test_start_session_has_one_tile() {
        let config = TilesConfig::classic();
        let session = playing_session(&config);

        assert!(session.is_playing());
        assert_eq!(session.tiles.len(), 1);
        assert_eq!(session.score, 0);
        assert!((session.fall_speed - config.base_speed).abs() < f64::EPSILON);
        assert!((session.tiles[0].y + TILE_HEIGHT).abs() < f64::EPSILON);
        assert_eq!(session.signals, vec![GameSignal::PlayingChanged(true)]);
    }

    #[test]
    fn test_step_advances_by_speed_and_time() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();

        simulate_step(&mut session, &config, REFERENCE_FRAME_MS * 2.0, &mut rng);

        let expected = -TILE_HEIGHT + config.base_speed * 2.0;
        assert!((session.tiles[0].y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_step_clamps_long_frames() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();

        simulate_step(&mut session, &config, 10_000.0, &mut rng);

        let max_move = config.base_speed * (MAX_FRAME_MS / REFERENCE_FRAME_MS);
        assert!((session.tiles[0].y - (-TILE_HEIGHT + max_move)).abs() < 1e-9);
    }

    #[test]
    fn test_step_awards_passive_reward() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();

        for expected in 1..=10 {
            simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);
            assert_eq!(session.score, expected * PASSIVE_REWARD);
        }
    }

    #[test]
    fn test_no_spawn_until_newest_enters() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();

        let outcome = simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);

        assert_eq!(outcome, StepOutcome::Advanced { spawned: false });
        assert_eq!(session.tiles.len(), 1);
    }

    #[test]
    fn test_spawn_once_newest_enters() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();
        session.tiles[0].y = -0.01;

        let outcome = simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);

        assert_eq!(outcome, StepOutcome::Advanced { spawned: true });
        assert_eq!(session.tiles.len(), 2);
        assert!(session.tiles[1].id > session.tiles[0].id);
        assert!((session.tiles[1].y + TILE_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_untapped_tile_past_bottom_is_miss() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();
        session.tiles[0].y = VISIBLE_HEIGHT;
        let before = session.tiles.len();

        let outcome = simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);

        assert_eq!(outcome, StepOutcome::Missed(session.tiles[0].id));
        // Frozen: nothing pruned, no passive reward for the missing step
        assert!(session.tiles.len() >= before);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn test_miss_detected_regardless_of_other_tiles() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();
        session.tiles[0].y = VISIBLE_HEIGHT + 0.5;
        session.tiles[0].tapped = true;
        let extra = session.generate_tile(4, &mut rng);
        session.tiles.push(Tile {
            y: VISIBLE_HEIGHT - 0.01,
            ..extra
        });

        let outcome = simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);

        assert!(matches!(outcome, StepOutcome::Missed(id) if id == extra.id));
    }

    #[test]
    fn test_tapped_tiles_pruned_after_exit() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();
        session.tiles[0].y = VISIBLE_HEIGHT + TILE_HEIGHT;
        session.tiles[0].tapped = true;
        let gone = session.tiles[0].id;

        let outcome = simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng);

        assert_eq!(outcome, StepOutcome::Advanced { spawned: true });
        assert!(session.tile(gone).is_none());
        assert_eq!(session.tiles.len(), 1);
    }

    #[test]
    fn test_step_ignored_when_not_playing() {
        let config = TilesConfig::classic();
        let mut session = GameSession::default();
        let mut rng = create_test_rng();

        assert_eq!(
            simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng),
            StepOutcome::Idle
        );
        assert_eq!(session.ticks, 0);
    }

    #[test]
    fn test_tap_scores_and_marks_tile() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let id = session.tiles[0].id;
        let lane = session.tiles[0].lane;

        let outcome = handle_tap(&mut session, &config, id);

        assert_eq!(outcome, TapOutcome::Scored { lane });
        assert_eq!(session.score, TAP_REWARD);
        assert!(session.tiles[0].tapped);
        assert_eq!(session.active_lane.map(|(l, _)| l), Some(lane));
        assert_eq!(session.signals.last(), Some(&GameSignal::Tap { lane }));
    }

    #[test]
    fn test_double_tap_is_game_over() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let id = session.tiles[0].id;

        handle_tap(&mut session, &config, id);
        let outcome = handle_tap(&mut session, &config, id);

        assert_eq!(outcome, TapOutcome::GameOver(GameOverReason::DoubleTap(id)));
        assert_eq!(session.score, TAP_REWARD);
    }

    #[test]
    fn test_unknown_tile_is_game_over() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);

        let outcome = handle_tap(&mut session, &config, TileId(999));

        assert_eq!(
            outcome,
            TapOutcome::GameOver(GameOverReason::StaleTap(TileId(999)))
        );
    }

    #[test]
    fn test_tap_ignored_when_not_playing() {
        let config = TilesConfig::classic();
        let mut session = GameSession::default();

        assert_eq!(handle_tap(&mut session, &config, TileId(0)), TapOutcome::Ignored);
        assert_eq!(handle_lane_press(&mut session, &config, 0), TapOutcome::Ignored);
    }

    #[test]
    fn test_lane_press_on_empty_lane() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let empty_lane = (session.tiles[0].lane + 1) % config.lane_count;

        let outcome = handle_lane_press(&mut session, &config, empty_lane);

        assert_eq!(
            outcome,
            TapOutcome::GameOver(GameOverReason::WrongLane(empty_lane))
        );
    }

    #[test]
    fn test_lane_press_hits_tile() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let lane = session.tiles[0].lane;

        assert_eq!(
            handle_lane_press(&mut session, &config, lane),
            TapOutcome::Scored { lane }
        );
        // Only tapped tile left in the lane: second press is a double tap
        assert!(matches!(
            handle_lane_press(&mut session, &config, lane),
            TapOutcome::GameOver(GameOverReason::DoubleTap(_))
        ));
    }

    #[test]
    fn test_end_session_once() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        session.signals.clear();

        assert!(end_session(&mut session, GameOverReason::WrongLane(0)));
        assert!(!end_session(&mut session, GameOverReason::WrongLane(1)));

        assert!(session.is_game_over());
        assert_eq!(
            session.game_over_reason,
            Some(GameOverReason::WrongLane(0))
        );
        assert_eq!(session.signals, vec![GameSignal::PlayingChanged(false)]);
    }

    #[test]
    fn test_compute_fall_speed_steps() {
        let config = TilesConfig::classic();
        let base = config.base_speed;
        let inc = config.speed_increment;

        assert!((compute_fall_speed(&config, 0, 0) - base).abs() < 1e-12);
        assert!((compute_fall_speed(&config, 249, 0) - base).abs() < 1e-12);
        assert!((compute_fall_speed(&config, 250, 0) - (base + inc)).abs() < 1e-12);
        assert!((compute_fall_speed(&config, 760, 0) - (base + 3.0 * inc)).abs() < 1e-12);
        assert!((compute_fall_speed(&config, 1_000_000, 0) - config.max_speed).abs() < 1e-12);
    }

    #[test]
    fn test_compute_fall_speed_compound_growth() {
        let config = TilesConfig::rush();
        let flat = compute_fall_speed(&config, 10, 0);
        let grown = compute_fall_speed(&config, 10, 5_000);

        assert!(grown > flat);
        assert!(grown <= config.max_speed);
    }

    #[test]
    fn test_capped_speed_moves_less_than_a_tile_per_frame() {
        for config in [TilesConfig::classic(), TilesConfig::rush()] {
            let speed = compute_fall_speed(&config, u64::MAX / 2, 100_000_000);
            assert!(speed.is_finite());
            assert_eq!(speed, config.max_speed);
            assert!(speed < TILE_HEIGHT);
        }
    }

    #[test]
    fn test_fall_speed_never_decreases() {
        let config = TilesConfig::rush();
        let mut session = playing_session(&config);
        let mut rng = create_test_rng();
        let mut last = session.fall_speed;

        for _ in 0..2_000 {
            if let Some(id) = session.tiles.iter().find(|t| !t.tapped).map(|t| t.id) {
                handle_tap(&mut session, &config, id);
            }
            if let StepOutcome::Missed(_) =
                simulate_step(&mut session, &config, REFERENCE_FRAME_MS, &mut rng)
            {
                break;
            }
            assert!(session.fall_speed >= last);
            last = session.fall_speed;
        }
        assert!(last > config.base_speed);
    }

    #[test]
    fn test_highlight_clears_after_delay() {
        let config = TilesConfig::classic();
        let mut session = playing_session(&config);
        let id = session.tiles[0].id;
        handle_tap(&mut session, &config, id);

        tick_highlight(&mut session, ACTIVE_HIGHLIGHT_MS / 2.0);
        assert!(session.active_lane.is_some());

        tick_highlight(&mut session, ACTIVE_HIGHLIGHT_MS);
        assert!(session.active_lane.is_none());
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let config = TilesConfig::classic();
        let session = playing_session(&config);

        let snap = snapshot(&session, &config, 42);

        assert_eq!(snap.tiles.len(), 1);
        assert_eq!(snap.tiles[0].id, session.tiles[0].id);
        assert_eq!(snap.lane_count, 4);
        assert_eq!(snap.high_score, 42);
        assert!(snap.is_playing);
        assert!(!snap.is_game_over);
    }
}
