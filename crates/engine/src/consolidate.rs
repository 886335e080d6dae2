//! Range consolidator: folds per-cell errors into contiguous vertical runs.
//!
//! Errors are grouped by (column, message). Because invalid-value messages
//! embed the offending value, only identical findings merge; empty-cell
//! findings in one column always share a message and collapse into runs.

use std::collections::HashMap;

use crate::model::{CellError, ErrorBlock};

struct Group {
    col: usize,
    message: String,
    rows: Vec<usize>,
}

/// Collapse `errors` into blocks of consecutive rows.
///
/// Blocks come out in first-encounter order of their (column, message)
/// group; within a group, runs are in ascending row order.
pub fn consolidate(errors: &[CellError]) -> Vec<ErrorBlock> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<(usize, String), usize> = HashMap::new();

    for error in errors {
        let key = (error.cell.col, error.message());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                groups.push(Group {
                    col: key.0,
                    message: key.1.clone(),
                    rows: Vec::new(),
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].rows.push(error.cell.row);
    }

    let mut blocks = Vec::new();
    for mut group in groups {
        group.rows.sort_unstable();
        group.rows.dedup();
        for (first_row, last_row) in runs(&group.rows) {
            blocks.push(ErrorBlock {
                col: group.col,
                first_row,
                last_row,
                message: group.message.clone(),
            });
        }
    }
    blocks
}

/// Maximal runs of consecutive integers in a sorted, deduplicated slice.
fn runs(rows: &[usize]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let Some((&head, tail)) = rows.split_first() else {
        return out;
    };

    let (mut start, mut prev) = (head, head);
    for &row in tail {
        if row == prev + 1 {
            prev = row;
            continue;
        }
        out.push((start, prev));
        start = row;
        prev = row;
    }
    out.push((start, prev));
    out
}
