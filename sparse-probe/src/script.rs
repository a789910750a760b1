//! Probe scripts (TOML): a source size, a batch size and a list of steps.
//!
//! ```toml
//! total = 100
//! batch_size = 10
//!
//! [[steps]]
//! op = "read"
//! index = 47
//!
//! [[steps]]
//! op = "settle"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Read one index (may issue a load).
    Read { index: usize },
    /// Apply completions until nothing is in flight.
    Settle,
    /// Append items to the source.
    Push { count: usize },
    /// Shrink the source to `len` items.
    Truncate { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeScript {
    /// Initial number of items in the source.
    pub total: Option<usize>,
    /// Overrides the sparse array config when set.
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ProbeScript {
    /// Script equivalent to `--read` flags: each read followed by a settle.
    pub fn from_reads(reads: &[usize]) -> Self {
        let steps = reads
            .iter()
            .flat_map(|&index| [Step::Read { index }, Step::Settle])
            .collect();
        Self {
            total: None,
            batch_size: None,
            steps,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == Some(0) {
            bail!("batch_size must be > 0");
        }
        Ok(())
    }
}

pub fn load_script(path: &Path) -> Result<ProbeScript> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let script: ProbeScript =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    script
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_steps() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("probe.toml");
        fs::write(
            &path,
            r#"
total = 100
batch_size = 10

[[steps]]
op = "read"
index = 47

[[steps]]
op = "push"
count = 8

[[steps]]
op = "settle"

[[steps]]
op = "truncate"
len = 80
"#,
        )
        .expect("write");

        let script = load_script(&path).expect("load");
        assert_eq!(script.total, Some(100));
        assert_eq!(script.batch_size, Some(10));
        assert_eq!(
            script.steps,
            vec![
                Step::Read { index: 47 },
                Step::Push { count: 8 },
                Step::Settle,
                Step::Truncate { len: 80 },
            ]
        );
    }

    #[test]
    fn rejects_zero_batch_size() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("probe.toml");
        fs::write(&path, "batch_size = 0\n").expect("write");
        let err = load_script(&path).expect_err("invalid");
        assert!(format!("{:#}", err).contains("batch_size must be > 0"));
    }

    #[test]
    fn reads_expand_to_read_then_settle() {
        let script = ProbeScript::from_reads(&[3, 9]);
        assert_eq!(
            script.steps,
            vec![
                Step::Read { index: 3 },
                Step::Settle,
                Step::Read { index: 9 },
                Step::Settle,
            ]
        );
    }
}
