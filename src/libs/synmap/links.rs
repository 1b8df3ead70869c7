use std::io::BufRead;
use std::str::FromStr;

use crate::libs::synmap::block::Strand;
use crate::libs::synmap::error::SynmapError;

/// One aligned interval pair as it arrives from the aligner.
///
/// Coordinates are 0-based, half-open. `strand` is the strand of the target
/// interval relative to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub q_name: String,
    pub q_start: u64,
    pub q_stop: u64,
    pub t_name: String,
    pub t_start: u64,
    pub t_stop: u64,
    pub score: f64,
    pub strand: Strand,
}

impl FromStr for Link {
    type Err = String;

    /// ```
    /// # use synder::libs::synmap::{Link, Strand};
    /// let link: Link = "chr1\t10\t20\tchrA\t110\t120\t5.5\t-".parse().unwrap();
    /// assert_eq!(link.q_name, "chr1");
    /// assert_eq!(link.t_stop, 120);
    /// assert_eq!(link.strand, Strand::Minus);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() < 8 {
            return Err(format!("expected 8 fields, found {}", fields.len()));
        }

        let coord = |i: usize| -> Result<u64, String> {
            fields[i]
                .parse::<u64>()
                .map_err(|e| format!("field {} ({:?}): {}", i + 1, fields[i], e))
        };

        let link = Link {
            q_name: fields[0].to_string(),
            q_start: coord(1)?,
            q_stop: coord(2)?,
            t_name: fields[3].to_string(),
            t_start: coord(4)?,
            t_stop: coord(5)?,
            score: fields[6]
                .parse::<f64>()
                .map_err(|e| format!("score ({:?}): {}", fields[6], e))?,
            strand: fields[7].parse::<Strand>().map_err(|e| e.to_string())?,
        };

        if link.q_start > link.q_stop || link.t_start > link.t_stop {
            return Err("start is greater than stop".to_string());
        }

        Ok(link)
    }
}

/// Reads a link table: one pair per line, blank lines and `#` comments skipped.
pub fn read_links<R: BufRead>(reader: R) -> Result<Vec<Link>, SynmapError> {
    let mut links = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let link = trimmed
            .parse::<Link>()
            .map_err(|message| SynmapError::Parse {
                line: i + 1,
                message,
            })?;
        links.push(link);
    }
    Ok(links)
}
