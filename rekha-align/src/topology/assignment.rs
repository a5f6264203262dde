//! Minimum-cost perfect assignment (Hungarian method with potentials).

const UNREACHED: i64 = i64::MAX / 4;

/// Solve the square assignment problem for `cost`.
///
/// Returns the total cost and, for each row, the column it is assigned to.
/// Forbidden pairs should carry a cost larger than any feasible assignment
/// rather than an overflow-prone sentinel.
pub(crate) fn min_cost_assignment(cost: &[Vec<i64>]) -> (i64, Vec<usize>) {
    let n = cost.len();
    if n == 0 {
        return (0, Vec::new());
    }

    // 1-based potentials; column 0 is a virtual start column
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut col0 = 0;
        let mut min_slack = vec![UNREACHED; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[col0] = true;
            let r = owner[col0];
            let mut delta = UNREACHED;
            let mut col1 = 0;
            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let slack = cost[r - 1][col - 1] - u[r] - v[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }
            for col in 0..=n {
                if used[col] {
                    u[owner[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }
            col0 = col1;
            if owner[col0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let prev = way[col0];
            owner[col0] = owner[prev];
            col0 = prev;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut assigned = vec![0usize; n];
    let mut total = 0;
    for col in 1..=n {
        let row = owner[col];
        assigned[row - 1] = col - 1;
        total += cost[row - 1][col - 1];
    }
    (total, assigned)
}
