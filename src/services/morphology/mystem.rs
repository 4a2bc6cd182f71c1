//! Primary analyzer backed by an external `mystem` process.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::{Analysis, Candidate, MorphAnalyzer};
use crate::error::{AppError, Result};

/// Arguments: JSON output, copy the whole input, disambiguate, grammar info.
const MYSTEM_ARGS: [&str; 5] = ["--format", "json", "-c", "-d", "-i"];

#[derive(Debug, Deserialize)]
struct MystemUnit {
    text: String,
    #[serde(default)]
    analysis: Vec<MystemReading>,
}

#[derive(Debug, Deserialize)]
struct MystemReading {
    lex: String,
    #[serde(default)]
    gr: String,
}

impl From<MystemUnit> for Analysis {
    fn from(unit: MystemUnit) -> Self {
        Self {
            text: unit.text,
            candidates: unit
                .analysis
                .into_iter()
                .map(|reading| Candidate {
                    lemma: reading.lex,
                    tags: reading.gr,
                })
                .collect(),
        }
    }
}

/// Runs the `mystem` binary once per text.
#[derive(Debug, Clone)]
pub struct MystemAnalyzer {
    binary: PathBuf,
}

impl MystemAnalyzer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Parse mystem JSON output: one array of units per input line.
    pub fn parse_output(output: &str) -> Result<Vec<Analysis>> {
        let mut units = Vec::new();
        for line in output.lines().filter(|line| !line.trim().is_empty()) {
            let parsed: Vec<MystemUnit> = serde_json::from_str(line)?;
            units.extend(parsed.into_iter().map(Analysis::from));
        }
        Ok(units)
    }
}

impl MorphAnalyzer for MystemAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>> {
        let mut child = Command::new(&self.binary)
            .args(MYSTEM_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                AppError::analyzer(format!("cannot start {}: {e}", self.binary.display()))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::analyzer("mystem stdin unavailable"))?;
        let input = format!("{text}\n");
        // Feed stdin from a separate thread so a full stdout pipe cannot stall us.
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        writer
            .join()
            .map_err(|_| AppError::analyzer("mystem input thread panicked"))??;

        if !output.status.success() {
            return Err(AppError::analyzer(format!(
                "mystem exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output() {
        let output = concat!(
            r#"[{"analysis":[{"lex":"привет","gr":"S,муж,неод=им,ед"}],"text":"Привет"},"#,
            r#"{"text":" "},"#,
            r#"{"analysis":[{"lex":"мир","gr":"S,муж,неод=им,ед"},{"lex":"мир","gr":"S,муж,неод=вин,ед"}],"text":"мир"},"#,
            r#"{"analysis":[],"text":"Qwzx"},"#,
            r#"{"text":"\n"}]"#,
            "\n"
        );

        let units = MystemAnalyzer::parse_output(output).unwrap();
        assert_eq!(units.len(), 5);
        assert_eq!(units[0].best().unwrap().lemma, "привет");
        assert!(units[1].best().is_none());
        assert_eq!(units[2].candidates.len(), 2);
        assert_eq!(units[2].best().unwrap().tags, "S,муж,неод=им,ед");
        assert!(units[3].best().is_none());
    }

    #[test]
    fn test_parse_output_rejects_garbage() {
        assert!(matches!(
            MystemAnalyzer::parse_output("not json"),
            Err(AppError::Json(_))
        ));
    }

    #[test]
    fn test_missing_binary_is_analyzer_error() {
        let analyzer = MystemAnalyzer::new("/nonexistent/mystem-binary");
        assert!(matches!(
            analyzer.analyze("привет"),
            Err(AppError::Analyzer(_))
        ));
    }
}
