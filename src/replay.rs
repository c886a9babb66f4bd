use bstr::ByteSlice;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::grid::Percolation;

/// A recorded sequence of site openings: the grid size followed by
/// `row col` pairs, whitespace separated. Lines starting with `#` are
/// comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub size: i64,
    pub sites: Vec<(i64, i64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub opened: usize,
    pub percolates: bool,
    /// 1-based position in the replay of the opening after which the
    /// grid first percolated.
    pub percolated_after: Option<usize>,
}

fn parse_int(token: &[u8], line: usize) -> Result<i64> {
    let text = token.to_str().map_err(|_| Error::Parse {
        line,
        message: "token is not valid UTF-8".to_string(),
    })?;
    text.parse::<i64>().map_err(|e| Error::Parse {
        line,
        message: format!("{:?} is not an integer: {}", text, e),
    })
}

pub fn parse(input: &[u8]) -> Result<Replay> {
    let mut size = None;
    let mut sites = Vec::new();
    let mut pending_row: Option<(i64, usize)> = None;
    let mut last_line = 1;

    for (ix, line) in input.lines().enumerate() {
        let line_no = ix + 1;
        last_line = line_no;
        let line = line.trim();
        if line.is_empty() || line.starts_with(b"#") {
            continue;
        }

        for token in line.fields() {
            let value = parse_int(token, line_no)?;
            if size.is_none() {
                size = Some(value);
            } else if let Some((row, _)) = pending_row.take() {
                sites.push((row, value));
            } else {
                pending_row = Some((value, line_no));
            }
        }
    }

    if let Some((row, line)) = pending_row {
        return Err(Error::Parse {
            line,
            message: format!("row {} has no column", row),
        });
    }

    let size = size.ok_or_else(|| Error::Parse {
        line: last_line,
        message: "missing grid size".to_string(),
    })?;

    Ok(Replay { size, sites })
}

impl Replay {
    /// Opens every recorded site, in order, on a fresh grid.
    pub fn run(&self) -> Result<Outcome> {
        let mut grid = Percolation::new(self.size)?;
        let mut percolated_after = None;

        for (ix, &(row, col)) in self.sites.iter().enumerate() {
            grid.open(row, col)?;
            if percolated_after.is_none() && grid.percolates() {
                debug!(step = ix + 1, row, col, "grid percolates");
                percolated_after = Some(ix + 1);
            }
        }

        let outcome = Outcome {
            opened: grid.number_of_open_sites(),
            percolates: percolated_after.is_some(),
            percolated_after,
        };

        info!(
            size = self.size,
            openings = self.sites.len(),
            opened = outcome.opened,
            percolates = outcome.percolates,
            "replay finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_and_pairs() {
        let replay = parse(b"3\n1 1\n2 1\n\n3 1\n").unwrap();
        assert_eq!(replay.size, 3);
        assert_eq!(replay.sites, vec![(1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn skips_comments_and_crlf() {
        let replay = parse(b"# a column\r\n2\r\n 1  2 \r\n# done\r\n").unwrap();
        assert_eq!(replay.size, 2);
        assert_eq!(replay.sites, vec![(1, 2)]);
    }

    #[test]
    fn pairs_may_span_lines() {
        let replay = parse(b"2 1\n1 2\n2").unwrap();
        assert_eq!(replay.sites, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn rejects_dangling_row() {
        match parse(b"3\n1 1\n2\n") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage() {
        match parse(b"3\n1 x\n") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse(b""), Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn missing_size_reports_last_line() {
        match parse(b"# nothing\n\n# still nothing\n") {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn run_reports_first_percolation() {
        let replay = parse(b"3\n1 1\n2 1\n3 1\n3 3\n1 1\n").unwrap();
        let outcome = replay.run().unwrap();
        assert_eq!(outcome.opened, 4);
        assert!(outcome.percolates);
        assert_eq!(outcome.percolated_after, Some(3));
    }

    #[test]
    fn run_surfaces_invalid_sites() {
        let replay = parse(b"2\n1 1\n3 1\n").unwrap();
        assert!(matches!(replay.run(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn run_rejects_bad_size() {
        let replay = parse(b"0\n").unwrap();
        assert!(matches!(replay.run(), Err(Error::InvalidArgument(_))));
    }
}
