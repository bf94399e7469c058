pub mod game_players;
pub mod game_results;
pub mod game_rounds;
pub mod games;
pub mod player_round_stats;
pub mod round_hands;
pub mod round_scores;
pub mod round_tricks;
pub mod trick_plays;

pub use game_players::Entity as GamePlayers;
pub use game_players::Model as GamePlayer;
pub use game_results::Entity as GameResults;
pub use game_results::Model as GameResult;
pub use game_rounds::Entity as GameRounds;
pub use game_rounds::Model as GameRound;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use player_round_stats::Entity as PlayerRoundStats;
pub use player_round_stats::Model as PlayerRoundStat;
pub use round_hands::Entity as RoundHands;
pub use round_hands::Model as RoundHand;
pub use round_scores::Entity as RoundScores;
pub use round_scores::Model as RoundScore;
pub use round_tricks::Entity as RoundTricks;
pub use round_tricks::Model as RoundTrick;
pub use trick_plays::Entity as TrickPlays;
pub use trick_plays::Model as TrickPlay;
