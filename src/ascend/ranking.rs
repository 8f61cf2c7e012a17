use super::record::{EvaluationRecord, SKILL_COUNT};

pub fn average_score(scores: &[i32; SKILL_COUNT]) -> f64 {
    scores.iter().sum::<i32>() as f64 / SKILL_COUNT as f64
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 1 + number of other records in the same mode with a strictly higher
/// average. Totals are compared instead of means so equal averages always
/// tie exactly.
pub fn global_rank<'a, I>(subject: &EvaluationRecord, peers: I) -> i32
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let total = subject.total_score();
    let ahead = peers
        .into_iter()
        .filter(|peer| peer.gamemode == subject.gamemode && peer.player_id != subject.player_id)
        .filter(|peer| peer.total_score() > total)
        .count();
    1 + ahead as i32
}

/// Ranks for totals already sorted best first, using the same strict
/// greater-than rule as `global_rank`.
pub fn standings(sorted_totals: &[i32]) -> Vec<i32> {
    let mut ranks = Vec::with_capacity(sorted_totals.len());
    for (idx, total) in sorted_totals.iter().enumerate() {
        let rank = match idx {
            0 => 1,
            _ if sorted_totals[idx - 1] == *total => ranks[idx - 1],
            _ => idx as i32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascend::record::default_skill_names;
    use chrono::Utc;

    fn record(player_id: i64, gamemode: &str, scores: [i32; 4]) -> EvaluationRecord {
        let mut record = EvaluationRecord::new(
            player_id,
            gamemode,
            default_skill_names(),
            25,
            "Elite Squad",
            Utc::now().naive_utc(),
        );
        for (slot, score) in record.skills.iter_mut().zip(scores) {
            slot.set(i64::from(score), None);
        }
        record
    }

    #[test]
    fn test_average_is_unrounded_mean() {
        assert_eq!(average_score(&[80, 81, 80, 80]), 80.25);
        assert_eq!(round_one_decimal(80.25), 80.3);
    }

    #[test]
    fn test_rank_counts_only_strictly_better_peers() {
        let subject = record(1, "bedwars", [70, 70, 70, 70]);
        let peers = vec![
            record(2, "bedwars", [90, 90, 90, 90]),
            record(3, "bedwars", [70, 70, 70, 70]),
            record(4, "bedwars", [10, 10, 10, 10]),
            record(5, "skywars", [100, 100, 100, 100]),
            subject.clone(),
        ];

        assert_eq!(global_rank(&subject, &peers), 2);
        assert_eq!(global_rank(&peers[1], &peers), 2);
        assert_eq!(global_rank(&peers[0], &peers), 1);
        assert_eq!(global_rank(&peers[2], &peers), 4);
    }

    #[test]
    fn test_rank_alone_is_first() {
        let subject = record(1, "sumo", [25, 25, 25, 25]);
        assert_eq!(global_rank(&subject, std::iter::empty()), 1);
    }

    #[test]
    fn test_standings_share_rank_on_ties() {
        assert_eq!(standings(&[360, 300, 300, 280, 100]), vec![1, 2, 2, 4, 5]);
        assert!(standings(&[]).is_empty());
    }
}
