use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

/// One line per evaluation: `Step: <step> -- Mean reward: <mean>`
pub struct ResultsLog {
    path: PathBuf,
    file: File,
}

impl ResultsLog {
    /// Creates (or truncates) the results file, creating missing parent directories
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("unable to create results directory {}", dir.display()))?;
        }
        let file = File::create(path).with_context(|| format!("unable to create results file {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn append(
        &mut self,
        step: usize,
        mean_reward: f32,
        discovered_rooms: Option<&[u32]>,
    ) -> Result<()> {
        writeln!(self.file, "{}", format_line(step, mean_reward, discovered_rooms))?;
        self.file.flush()?;
        Ok(())
    }
}

pub fn format_line(
    step: usize,
    mean_reward: f32,
    discovered_rooms: Option<&[u32]>,
) -> String {
    match discovered_rooms {
        None => format!("Step: {} -- Mean reward: {:.2}", step, mean_reward),
        Some(rooms) => format!(
            "Step: {} -- Mean reward: {:.2} -- Num Rooms: {} -- Rooms: [{}]",
            step,
            mean_reward,
            rooms.len(),
            rooms.iter().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(250_000, 12.0, "Step: 250000 -- Mean reward: 12.00")]
    #[case(7, -3.456, "Step: 7 -- Mean reward: -3.46")]
    #[case(0, 0.0, "Step: 0 -- Mean reward: 0.00")]
    fn test_format_line(
        #[case] step: usize,
        #[case] mean_reward: f32,
        #[case] expected: &str,
    ) {
        assert_eq!(format_line(step, mean_reward, None), expected);
    }

    #[test]
    fn test_format_line_with_rooms() {
        assert_eq!(
            format_line(10, 1.5, Some(&[1, 4, 7])),
            "Step: 10 -- Mean reward: 1.50 -- Num Rooms: 3 -- Rooms: [1, 4, 7]"
        );
        assert_eq!(format_line(10, 1.5, Some(&[])), "Step: 10 -- Mean reward: 1.50 -- Num Rooms: 0 -- Rooms: []");
    }

    #[test]
    fn test_create_and_append() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("results/dqn/pong/pong_results.txt");
        let mut log = ResultsLog::create(&path)?;
        log.append(100, 2.0, None)?;
        log.append(200, 3.25, None)?;
        assert_eq!(
            fs::read_to_string(log.path())?,
            "Step: 100 -- Mean reward: 2.00\nStep: 200 -- Mean reward: 3.25\n"
        );

        // a new log starts from scratch
        let mut log = ResultsLog::create(&path)?;
        log.append(1, 0.0, None)?;
        assert_eq!(fs::read_to_string(&path)?, "Step: 1 -- Mean reward: 0.00\n");
        Ok(())
    }
}
