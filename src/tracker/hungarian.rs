//! Hungarian (Kuhn-Munkres) algorithm for the linear assignment problem.
//!
//! Shortest augmenting path formulation with row and column potentials,
//! O(n³) in the larger matrix dimension.

use ndarray::{Array2, ArrayView2};
use tracing::warn;

/// Costs above this magnitude are rescaled before solving so the potentials
/// cannot overflow.
const RESCALE_ABOVE: f64 = 1e100;

/// Solve the minimum-cost assignment for a dense, possibly rectangular,
/// cost matrix.
///
/// Returns one entry per row: the column assigned to that row, or `None` when
/// the row was left over (more rows than columns) or its only available
/// pairing had a non-finite cost. Each column appears at most once.
pub fn hungarian(cost: ArrayView2<f64>) -> Vec<Option<usize>> {
    let (num_rows, num_cols) = cost.dim();
    if num_rows == 0 || num_cols == 0 {
        return vec![None; num_rows];
    }

    let n = num_rows.max(num_cols);

    let max_abs = cost
        .iter()
        .filter(|c| c.is_finite())
        .fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let scale = if max_abs > RESCALE_ABOVE { max_abs.recip() } else { 1.0 };

    // Padded rows and columns are all-zero: every complete assignment uses
    // the same number of them. Non-finite entries cost more than any
    // assignment of real entries.
    let forbidden = (max_abs * scale + 1.0) * (n as f64 + 1.0);

    let mut padded = Array2::<f64>::zeros((n, n));
    for ((i, j), &c) in cost.indexed_iter() {
        padded[[i, j]] = if c.is_finite() { c * scale } else { forbidden };
    }

    // 1-based indexing; index 0 is the virtual source column.
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; n + 1];
    let mut col_owner = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    'rows: for row in 1..=n {
        col_owner[0] = row;
        let mut j0 = 0;
        let mut min_to = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = col_owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = padded[[i0 - 1, j - 1]] - u[i0] - v[j];
                if reduced < min_to[j] {
                    min_to[j] = reduced;
                    way[j] = j0;
                }
                if min_to[j] < delta {
                    delta = min_to[j];
                    j1 = j;
                }
            }

            if j1 == 0 || !delta.is_finite() {
                warn!(row, "no finite augmenting path, leaving remaining rows unassigned");
                break 'rows;
            }

            for j in 0..=n {
                if used[j] {
                    u[col_owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_to[j] -= delta;
                }
            }

            j0 = j1;
            if col_owner[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path.
        loop {
            let j1 = way[j0];
            col_owner[j0] = col_owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![None; num_rows];
    for j in 1..=n {
        let i = col_owner[j];
        if i == 0 || i > num_rows || j > num_cols {
            continue;
        }
        if cost[[i - 1, j - 1]].is_finite() {
            row_to_col[i - 1] = Some(j - 1);
        }
    }
    row_to_col
}
