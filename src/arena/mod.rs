//! Match runner: pits two agents against each other.
//!
//! Agents always act on the canonical board (their pieces in the
//! leading plane block), so a single policy works for either seat. The
//! arena owns turn alternation, legality enforcement and the
//! win/loss/draw tally; it drives the engine exclusively through
//! `next_state`, never mutating a live board.

use crate::core::{Board, GameRng, Player};
use crate::nn::Evaluator;
use crate::rules::{GameEngine, GameOutcome};

/// A move-selecting agent.
///
/// `canonical` is the board from the agent's own perspective; the
/// returned action index must be legal on it.
pub trait Agent {
    /// Pick an action for the position.
    fn act(&mut self, engine: &GameEngine, canonical: &Board) -> usize;
}

/// Picks uniformly among the legal moves.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    /// Create a random agent with a deterministic seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, engine: &GameEngine, canonical: &Board) -> usize {
        let weights: Vec<f32> = engine
            .valid_moves(canonical, Player::First)
            .iter()
            .map(|&v| f32::from(v))
            .collect();
        self.rng
            .choose_weighted(&weights)
            .expect("agent asked to move in a position with no legal moves")
    }
}

/// Plays the evaluator's highest-probability legal move.
///
/// No search: a one-ply probe of the policy head, mostly useful as a
/// sanity opponent for trained models.
pub struct GreedyAgent<E> {
    evaluator: E,
}

impl<E: Evaluator> GreedyAgent<E> {
    /// Create a greedy agent over an evaluator.
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl<E: Evaluator> Agent for GreedyAgent<E> {
    fn act(&mut self, engine: &GameEngine, canonical: &Board) -> usize {
        let valids = engine.valid_moves(canonical, Player::First);
        let (policy, _value) = self.evaluator.evaluate(canonical);

        let mut best: Option<(usize, f32)> = None;
        for (action, (&legal, &p)) in valids.iter().zip(policy.iter()).enumerate() {
            if legal == 0 {
                continue;
            }
            if best.map_or(true, |(_, best_p)| p > best_p) {
                best = Some((action, p));
            }
        }
        best.map(|(action, _)| action)
            .expect("agent asked to move in a position with no legal moves")
    }
}

/// Win/loss/draw tally from the first agent's perspective.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl MatchStats {
    /// Total games played.
    #[must_use]
    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Draw | GameOutcome::InProgress => self.draws += 1,
        }
    }
}

/// Plays games between two agents.
pub struct Arena {
    engine: GameEngine,
    max_moves: usize,
    verbose: bool,
}

impl Arena {
    /// Create an arena for the given engine.
    #[must_use]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            max_moves: 512,
            verbose: false,
        }
    }

    /// Cap on moves per game; games hitting it score as draws.
    #[must_use]
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        assert!(max_moves > 0, "move cap must be positive");
        self.max_moves = max_moves;
        self
    }

    /// Print each position as the game unfolds.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The engine driving this arena.
    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Play one game; `first` moves first.
    ///
    /// The returned outcome is from `first`'s perspective.
    ///
    /// # Panics
    ///
    /// Panics if an agent returns an action the engine reports illegal.
    pub fn play_game(&self, first: &mut dyn Agent, second: &mut dyn Agent) -> GameOutcome {
        let mut board = self.engine.init_board();
        let mut player = Player::First;

        for _ in 0..self.max_moves {
            let result = self.engine.game_result(&board, player);
            if result.is_terminal() {
                if self.verbose {
                    println!("{board}");
                    println!("result for {player}: {result:?}");
                }
                return if player == Player::First {
                    result
                } else {
                    result.flipped()
                };
            }

            let canonical = self.engine.canonical_form(&board, player);
            let agent: &mut dyn Agent = match player {
                Player::First => &mut *first,
                Player::Second => &mut *second,
            };
            let action = agent.act(&self.engine, &canonical);
            assert_eq!(
                self.engine.valid_moves(&canonical, Player::First)[action],
                1,
                "{player} returned illegal action {action}"
            );

            let (next, next_player) = self.engine.next_state(&board, player, action);
            if self.verbose {
                println!("{board}");
            }
            board = next;
            player = next_player;
        }

        GameOutcome::Draw
    }

    /// Play a series, swapping which agent moves first halfway through.
    ///
    /// The tally is from `one`'s perspective regardless of seat.
    pub fn play_series(
        &self,
        one: &mut dyn Agent,
        two: &mut dyn Agent,
        games: usize,
    ) -> MatchStats {
        let mut stats = MatchStats::default();
        let half = games / 2;

        for _ in 0..half {
            stats.record(self.play_game(&mut *one, &mut *two));
        }
        for _ in half..games {
            stats.record(self.play_game(&mut *two, &mut *one).flipped());
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::nn::UniformEvaluator;

    fn arena() -> Arena {
        Arena::new(GameEngine::new(GameConfig::new(3, 2)))
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let engine = GameEngine::new(GameConfig::new(3, 2));
        let mut agent = RandomAgent::new(99);
        let board = engine.init_board();
        for _ in 0..16 {
            let action = agent.act(&engine, &board);
            assert_eq!(engine.valid_moves(&board, Player::First)[action], 1);
        }
    }

    #[test]
    fn test_greedy_agent_plays_legal_moves() {
        let engine = GameEngine::new(GameConfig::new(3, 2));
        let mut agent = GreedyAgent::new(UniformEvaluator::new(engine.config().action_size()));
        let board = engine.init_board();
        let action = agent.act(&engine, &board);
        assert_eq!(engine.valid_moves(&board, Player::First)[action], 1);
    }

    #[test]
    fn test_random_game_reaches_a_result() {
        let arena = arena();
        let mut a = RandomAgent::new(1);
        let mut b = RandomAgent::new(2);
        let outcome = arena.play_game(&mut a, &mut b);
        assert!(outcome.is_terminal());
    }

    #[test]
    fn test_series_tally_sums_to_game_count() {
        let arena = arena();
        let mut a = RandomAgent::new(10);
        let mut b = RandomAgent::new(20);
        let stats = arena.play_series(&mut a, &mut b, 9);
        assert_eq!(stats.games(), 9);
    }

    #[test]
    fn test_move_cap_forces_draw() {
        let arena = arena().with_max_moves(1);
        let mut a = RandomAgent::new(3);
        let mut b = RandomAgent::new(4);
        assert_eq!(arena.play_game(&mut a, &mut b), GameOutcome::Draw);
    }

    #[test]
    #[should_panic(expected = "move cap")]
    fn test_zero_move_cap_rejected() {
        let _ = arena().with_max_moves(0);
    }
}
