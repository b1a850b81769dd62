//! Falling-tile data structures.
//!
//! Positions are measured in game rows from the top edge of the visible
//! play area. A tile's `y` is the row of its top edge, so a freshly spawned
//! tile at `-TILE_HEIGHT` sits entirely above the screen.

pub use crate::games::GameSignal;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Height of the visible play area in game rows.
pub const VISIBLE_HEIGHT: f64 = 24.0;

/// Height of one tile in game rows.
pub const TILE_HEIGHT: f64 = 4.0;

/// Duration of one reference frame (60 FPS). Fall speed is expressed in rows
/// per reference frame.
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Upper bound for any configured speed, in rows per reference frame.
pub const SPEED_LIMIT: f64 = TILE_HEIGHT / 2.0;

/// Longest frame the simulation will integrate in one step.
pub const MAX_FRAME_MS: f64 = 100.0;

/// Score for every step survived without a miss.
pub const PASSIVE_REWARD: u64 = 1;

/// Score for every successful tap.
pub const TAP_REWARD: u64 = 10;

/// How long a tapped lane stays highlighted.
pub const ACTIVE_HIGHLIGHT_MS: f64 = 300.0;

/// Tuning for one falling-tile variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    pub lane_count: usize,
    /// Rows per reference frame at score 0.
    pub base_speed: f64,
    /// Added to the speed each time the score crosses another threshold.
    pub speed_increment: f64,
    pub score_threshold: u64,
    /// Per-tick multiplicative growth. 1.0 disables compound acceleration.
    pub speed_growth: f64,
    pub max_speed: f64,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl TilesConfig {
    pub const MAX_LANES: usize = 9;

    /// Gentle stepped difficulty.
    pub fn classic() -> Self {
        Self {
            lane_count: 4,
            base_speed: 0.10,
            speed_increment: 0.02,
            score_threshold: 250,
            speed_growth: 1.0,
            max_speed: 0.60,
        }
    }

    /// Faster start, tighter steps, and slow compound acceleration between them.
    pub fn rush() -> Self {
        Self {
            lane_count: 4,
            base_speed: 0.16,
            speed_increment: 0.03,
            score_threshold: 150,
            speed_growth: 1.00002,
            max_speed: 0.90,
        }
    }

    /// Clamp hand-edited values into a playable range.
    pub fn sanitized(mut self) -> Self {
        self.lane_count = self.lane_count.clamp(1, Self::MAX_LANES);
        if !(self.base_speed > 0.0) {
            self.base_speed = Self::classic().base_speed;
        }
        self.base_speed = self.base_speed.min(SPEED_LIMIT);
        if !(self.speed_increment >= 0.0) {
            self.speed_increment = 0.0;
        }
        self.score_threshold = self.score_threshold.max(1);
        if !(self.speed_growth >= 1.0) {
            self.speed_growth = 1.0;
        }
        if !(self.max_speed >= self.base_speed) {
            self.max_speed = self.base_speed;
        }
        self.max_speed = self.max_speed.min(SPEED_LIMIT);
        self
    }
}

/// Stable identity of a tile. Allocated from a per-session counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

/// A single falling tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub lane: usize,
    /// Row of the tile's top edge.
    pub y: f64,
    pub tapped: bool,
}

impl Tile {
    /// Whether any part of the tile is inside the play area.
    pub fn is_visible(&self) -> bool {
        self.y + TILE_HEIGHT > 0.0 && self.y < VISIBLE_HEIGHT
    }

    pub fn has_entered(&self) -> bool {
        self.y > 0.0
    }

    /// Past the bottom edge: a miss if still untapped.
    pub fn has_crossed_bottom(&self) -> bool {
        self.y > VISIBLE_HEIGHT
    }

    pub fn has_exited(&self) -> bool {
        self.y > VISIBLE_HEIGHT + TILE_HEIGHT
    }
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Playing,
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// An untapped tile fell past the bottom edge.
    Missed(TileId),
    /// A tile was tapped twice.
    DoubleTap(TileId),
    /// The tapped identity no longer exists.
    StaleTap(TileId),
    /// A lane key was pressed with no tile in that lane.
    WrongLane(usize),
    /// The player left the game while it was running.
    Quit,
}

/// All mutable state of one play-through.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    pub phase: GamePhase,
    pub tiles: Vec<Tile>,
    pub score: u64,
    pub fall_speed: f64,
    /// Simulation steps taken this session.
    pub ticks: u64,
    pub next_tile_id: u64,
    pub game_over_reason: Option<GameOverReason>,
    /// Lane flashed by the most recent tap and the time left on the flash.
    pub active_lane: Option<(usize, f64)>,
    pub signals: Vec<GameSignal>,
}

impl GameSession {
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    /// The most recently spawned tile (tiles are kept in spawn order).
    pub fn newest_tile(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    /// Create a tile in a uniformly random lane just above the play area.
    pub fn generate_tile<R: Rng>(&mut self, lane_count: usize, rng: &mut R) -> Tile {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        Tile {
            id,
            lane: rng.gen_range(0..lane_count.max(1)),
            y: -TILE_HEIGHT,
            tapped: false,
        }
    }

    /// The tile a press on `lane` should hit: the lowest untapped tile, or
    /// failing that the lowest tapped one.
    pub fn lane_target(&self, lane: usize) -> Option<TileId> {
        let lowest = |tapped: bool| {
            self.tiles
                .iter()
                .filter(|t| t.lane == lane && t.tapped == tapped)
                .max_by(|a, b| a.y.total_cmp(&b.y))
                .map(|t| t.id)
        };
        lowest(false).or_else(|| lowest(true))
    }
}

/// A tile as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileView {
    pub id: TileId,
    pub lane: usize,
    pub y: f64,
    pub tapped: bool,
}

/// Read-only view of a session after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tiles: Vec<TileView>,
    pub lane_count: usize,
    pub score: u64,
    pub fall_speed: f64,
    pub is_playing: bool,
    pub is_game_over: bool,
    pub high_score: u64,
    pub active_lane: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tile(id: u64, lane: usize, y: f64, tapped: bool) -> Tile {
        Tile {
            id: TileId(id),
            lane,
            y,
            tapped,
        }
    }

    #[test]
    fn test_generate_tile_starts_above_screen() {
        let mut session = GameSession::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let t = session.generate_tile(4, &mut rng);

        assert_eq!(t.id, TileId(0));
        assert!(t.lane < 4);
        assert!((t.y + TILE_HEIGHT).abs() < f64::EPSILON);
        assert!(!t.tapped);
        assert!(!t.is_visible());
    }

    #[test]
    fn test_generate_tile_ids_are_unique() {
        let mut session = GameSession::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let ids: Vec<TileId> = (0..50)
            .map(|_| session.generate_tile(4, &mut rng).id)
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_generate_tile_covers_all_lanes() {
        let mut session = GameSession::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut seen = [false; 4];

        for _ in 0..200 {
            seen[session.generate_tile(4, &mut rng).lane] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_tile_edges() {
        assert!(!tile(0, 0, 0.0, false).has_entered());
        assert!(tile(0, 0, 0.1, false).has_entered());
        assert!(!tile(0, 0, VISIBLE_HEIGHT, false).has_crossed_bottom());
        assert!(tile(0, 0, VISIBLE_HEIGHT + 0.1, false).has_crossed_bottom());
        assert!(!tile(0, 0, VISIBLE_HEIGHT + TILE_HEIGHT, true).has_exited());
        assert!(tile(0, 0, VISIBLE_HEIGHT + TILE_HEIGHT + 0.1, true).has_exited());
    }

    #[test]
    fn test_lane_target_prefers_lowest_untapped() {
        let session = GameSession {
            tiles: vec![
                tile(1, 2, 18.0, true),
                tile(2, 2, 10.0, false),
                tile(3, 2, 2.0, false),
                tile(4, 1, 12.0, false),
            ],
            ..Default::default()
        };

        assert_eq!(session.lane_target(2), Some(TileId(2)));
        assert_eq!(session.lane_target(1), Some(TileId(4)));
        assert_eq!(session.lane_target(0), None);
    }

    #[test]
    fn test_lane_target_falls_back_to_tapped() {
        let session = GameSession {
            tiles: vec![tile(1, 0, 18.0, true), tile(2, 0, 6.0, true)],
            ..Default::default()
        };

        assert_eq!(session.lane_target(0), Some(TileId(1)));
    }

    #[test]
    fn test_config_sanitized() {
        let cfg = TilesConfig {
            lane_count: 0,
            base_speed: -1.0,
            speed_increment: f64::NAN,
            score_threshold: 0,
            speed_growth: 0.5,
            max_speed: 0.0,
        }
        .sanitized();

        assert_eq!(cfg.lane_count, 1);
        assert!(cfg.base_speed > 0.0);
        assert_eq!(cfg.speed_increment, 0.0);
        assert_eq!(cfg.score_threshold, 1);
        assert_eq!(cfg.speed_growth, 1.0);
        assert!(cfg.max_speed >= cfg.base_speed);

        let wide = TilesConfig {
            lane_count: 40,
            ..TilesConfig::classic()
        }
        .sanitized();
        assert_eq!(wide.lane_count, TilesConfig::MAX_LANES);

        let fast = TilesConfig {
            base_speed: 9.0,
            max_speed: 50.0,
            ..TilesConfig::rush()
        }
        .sanitized();
        assert_eq!(fast.base_speed, SPEED_LIMIT);
        assert_eq!(fast.max_speed, SPEED_LIMIT);
    }

    #[test]
    fn test_presets_are_ordered() {
        let classic = TilesConfig::classic();
        let rush = TilesConfig::rush();
        assert!(rush.base_speed > classic.base_speed);
        assert!(rush.score_threshold < classic.score_threshold);
        assert_eq!(classic.clone().sanitized(), classic);
        assert_eq!(rush.clone().sanitized(), rush);
    }
}
