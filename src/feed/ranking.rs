use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::database::score::Score;

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    #[serde(flatten)]
    pub score: Score,
    pub rank: u32,
}

/// Stable descending ranking with shared ranks for ties. Equal values share a
/// rank and the next distinct value takes the immediately following one, so
/// `[100, 100, 80]` ranks as `[1, 1, 2]`. The sort is stable, players who
/// tied keep their submission order.
pub fn rank_scores(mut scores: Vec<Score>) -> Vec<RankedScore> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));

    let mut previous_value = scores.first().map(|score| score.score).unwrap_or_default();
    let mut current_rank = 1;
    scores
        .into_iter()
        .map(|score| {
            if score.score < previous_value {
                current_rank += 1;
                previous_value = score.score;
            }
            RankedScore {
                score,
                rank: current_rank,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::database::score::Score;

    use super::rank_scores;

    fn score(value: i32, second: u32) -> Score {
        Score {
            id: Uuid::new_v4(),
            level_id: 1,
            player: Uuid::new_v4(),
            score: value,
            score_type: 1,
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, second).unwrap(),
        }
    }

    #[test]
    fn ties_share_a_rank_without_gaps() {
        let scores = vec![
            score(80, 0),
            score(100, 1),
            score(50, 2),
            score(80, 3),
            score(100, 4),
            score(80, 5),
        ];
        let ranked = rank_scores(scores);

        let values: Vec<i32> = ranked.iter().map(|entry| entry.score.score).collect();
        assert_eq!(values, vec![100, 100, 80, 80, 80, 50]);
        let ranks: Vec<u32> = ranked.iter().map(|entry| entry.rank).collect();
        assert_eq!(ranks, vec![1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn ranks_follow_descending_values() {
        let ranked = rank_scores(vec![score(10, 0), score(30, 1), score(20, 2)]);
        for pair in ranked.windows(2) {
            assert!(pair[0].score.score >= pair[1].score.score);
            assert!(pair[0].rank <= pair[1].rank);
        }
    }

    #[test]
    fn tied_players_keep_submission_order() {
        let first = score(80, 0);
        let second = score(80, 1);
        let first_id = first.id;
        let second_id = second.id;
        let ranked = rank_scores(vec![first, second]);

        assert_eq!(ranked[0].score.id, first_id);
        assert_eq!(ranked[1].score.id, second_id);
        assert_eq!(ranked[0].rank, ranked[1].rank);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank_scores(Vec::new()).is_empty());
    }

    #[test]
    fn single_score_gets_rank_one() {
        let ranked = rank_scores(vec![score(42, 0)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
    }
}
