//! Competition ranking ("1224" ranking).
//!
//! Tied values share a rank and the next distinct value takes its 1-based
//! position in the sorted sequence, not the previous rank plus one.

/// Assigns competition ranks to marks already sorted in descending order.
///
/// Returns one rank per input value, in the same order. The caller is
/// responsible for the descending sort; equal neighbours share a rank.
pub fn competition_ranks(marks_desc: &[f64]) -> Vec<i32> {
    let mut ranks = Vec::with_capacity(marks_desc.len());
    for (position, &marks) in marks_desc.iter().enumerate() {
        if position > 0 && marks == marks_desc[position - 1] {
            ranks.push(ranks[position - 1]);
        } else {
            ranks.push(position as i32 + 1);
        }
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_rank_and_next_value_skips() {
        assert_eq!(
            competition_ranks(&[90.0, 90.0, 80.0, 70.0, 70.0]),
            vec![1, 1, 3, 4, 4]
        );
    }

    #[test]
    fn distinct_marks_rank_sequentially() {
        assert_eq!(competition_ranks(&[95.0, 82.0, 41.5]), vec![1, 2, 3]);
    }

    #[test]
    fn all_tied_all_first() {
        assert_eq!(competition_ranks(&[60.0, 60.0, 60.0]), vec![1, 1, 1]);
    }

    #[test]
    fn empty_input_empty_ranks() {
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn tie_in_the_middle() {
        assert_eq!(
            competition_ranks(&[88.0, 75.0, 75.0, 75.0, 60.0]),
            vec![1, 2, 2, 2, 5]
        );
    }
}
