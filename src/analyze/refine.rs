//! Optional rephrasing of roadmap steps by an external text generator.
//!
//! A refiner may only reword steps. Its answer must keep the step count and
//! hold non-empty, distinct entries; anything else is discarded and the
//! rule-based steps are kept.

use crate::types::config::RefineConfig;
use std::collections::HashSet;
use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("failed to start refiner `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("refiner I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("refiner gave no answer within {0:?}")]
    Timeout(Duration),
    #[error("refiner exited with {0}")]
    Exit(ExitStatus),
    #[error("refiner output is not a JSON array of strings: {0}")]
    Malformed(String),
    #[error("refiner returned {actual} steps, expected {expected}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("refiner returned an empty step")]
    EmptyStep,
    #[error("refiner returned a duplicate step: {0}")]
    DuplicateStep(String),
}

pub trait Refiner {
    fn refine(&self, steps: &[String]) -> Result<Vec<String>, RefineError>;
}

/// Runs the refiner and returns its steps when they are well formed,
/// otherwise the original steps.
pub fn refine_or_keep(steps: Vec<String>, refiner: &dyn Refiner) -> Vec<String> {
    match refiner
        .refine(&steps)
        .and_then(|refined| check_shape(steps.len(), refined))
    {
        Ok(refined) => {
            tracing::debug!(steps = refined.len(), "roadmap refined");
            refined
        }
        Err(err) => {
            tracing::warn!(error = %err, "roadmap refinement failed, keeping rule-based steps");
            steps
        }
    }
}

fn check_shape(expected: usize, refined: Vec<String>) -> Result<Vec<String>, RefineError> {
    if refined.len() != expected {
        return Err(RefineError::CountMismatch {
            expected,
            actual: refined.len(),
        });
    }
    let mut seen = HashSet::new();
    let mut steps = Vec::with_capacity(expected);
    for step in refined {
        let step = step.trim().to_string();
        if step.is_empty() {
            return Err(RefineError::EmptyStep);
        }
        if !seen.insert(step.clone()) {
            return Err(RefineError::DuplicateStep(step));
        }
        steps.push(step);
    }
    Ok(steps)
}

/// Pipes a prompt to an external command and reads a JSON array of
/// strings back from its stdout.
#[derive(Debug, Clone)]
pub struct CommandRefiner {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRefiner {
    pub fn new(config: &RefineConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    fn prompt(steps: &[String]) -> String {
        let mut prompt = format!(
            "Rewrite each of the following repository improvement steps so it reads clearly and \
             concretely. Keep the meaning and order of every step and keep any figures. Reply \
             with only a JSON array of exactly {} strings.\n\n",
            steps.len()
        );
        for (index, step) in steps.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", index + 1, step));
        }
        prompt
    }

    fn run(&self, prompt: &str) -> Result<String, RefineError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| RefineError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let deadline = Instant::now() + self.timeout;

        // Prompt goes through stdin to stay clear of argument length limits.
        // Written from its own thread so a refiner that never reads cannot
        // hold us past the deadline.
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_owned();
            thread::spawn(move || match stdin.write_all(prompt.as_bytes()) {
                Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
                _ => Ok(()),
            })
        });

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "refiner stdout unavailable"))?;
        let reader = thread::spawn(move || {
            let mut output = String::new();
            stdout.read_to_string(&mut output).map(|_| output)
        });

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RefineError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "refiner writer panicked"))??;
        }
        let output = reader
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "refiner reader panicked"))??;
        if !status.success() {
            return Err(RefineError::Exit(status));
        }
        Ok(output)
    }
}

impl Refiner for CommandRefiner {
    fn refine(&self, steps: &[String]) -> Result<Vec<String>, RefineError> {
        tracing::debug!(command = %self.command, steps = steps.len(), "refining roadmap");
        let output = self.run(&Self::prompt(steps))?;
        parse_steps(&output)
    }
}

/// Takes the outermost `[...]` span so surrounding prose or code fences
/// are ignored.
fn parse_steps(output: &str) -> Result<Vec<String>, RefineError> {
    let span = match (output.find('['), output.rfind(']')) {
        (Some(start), Some(end)) if start < end => &output[start..=end],
        _ => return Err(RefineError::Malformed("no JSON array in output".to_string())),
    };
    serde_json::from_str(span).map_err(|err| RefineError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRefiner(Result<Vec<String>, ()>);

    impl Refiner for FixedRefiner {
        fn refine(&self, _steps: &[String]) -> Result<Vec<String>, RefineError> {
            self.0
                .clone()
                .map_err(|_| RefineError::Malformed("scripted failure".to_string()))
        }
    }

    fn steps() -> Vec<String> {
        vec!["Add tests.".to_string(), "Add CI.".to_string()]
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn well_formed_refinement_is_used() {
        let refiner = FixedRefiner(Ok(strings(&["  Write unit tests. ", "Run CI on every push."])));
        assert_eq!(
            refine_or_keep(steps(), &refiner),
            vec!["Write unit tests.", "Run CI on every push."]
        );
    }

    #[test]
    fn failures_and_bad_shapes_fall_back_to_rule_steps() {
        let cases = [
            FixedRefiner(Err(())),
            FixedRefiner(Ok(strings(&["Only one"]))),
            FixedRefiner(Ok(strings(&["Same", "Same"]))),
            FixedRefiner(Ok(strings(&["Fine", "   "]))),
        ];
        for refiner in &cases {
            assert_eq!(refine_or_keep(steps(), refiner), steps());
        }
    }

    #[test]
    fn parse_steps_ignores_surrounding_text() {
        let output = "Here you go:\n```json\n[\"One\", \"Two\"]\n```\n";
        assert_eq!(
            parse_steps(output).expect("array should parse"),
            vec!["One", "Two"]
        );
        assert!(matches!(
            parse_steps("no array here"),
            Err(RefineError::Malformed(_))
        ));
        assert!(matches!(
            parse_steps("[1, 2]"),
            Err(RefineError::Malformed(_))
        ));
    }

    #[test]
    fn prompt_lists_steps_in_order() {
        let prompt = CommandRefiner::prompt(&steps());
        assert!(prompt.contains("exactly 2 strings"));
        let first = prompt.find("1. Add tests.").expect("first step listed");
        let second = prompt.find("2. Add CI.").expect("second step listed");
        assert!(first < second);
    }

    fn shell_refiner(script: &str, timeout_secs: u64) -> CommandRefiner {
        CommandRefiner::new(&RefineConfig {
            enabled: true,
            command: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            timeout_secs,
        })
    }

    #[cfg(unix)]
    #[test]
    fn command_refiner_reads_json_from_stdout() {
        let refiner = shell_refiner(
            r#"cat > /dev/null; printf '%s' '["Write tests first.", "Gate merges on CI."]'"#,
            10,
        );
        let refined = refiner.refine(&steps()).expect("command should answer");
        assert_eq!(refined, vec!["Write tests first.", "Gate merges on CI."]);
    }

    #[cfg(unix)]
    #[test]
    fn command_refiner_reports_non_zero_exit() {
        let refiner = shell_refiner("cat > /dev/null; exit 3", 10);
        assert!(matches!(
            refiner.refine(&steps()),
            Err(RefineError::Exit(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_refiner_times_out() {
        let refiner = CommandRefiner {
            timeout: Duration::from_millis(100),
            ..shell_refiner("exec sleep 5", 1)
        };
        assert!(matches!(
            refiner.refine(&steps()),
            Err(RefineError::Timeout(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn refiner_that_never_reads_a_large_prompt_still_times_out() {
        let refiner = CommandRefiner {
            timeout: Duration::from_millis(200),
            ..shell_refiner("exec sleep 5", 1)
        };
        // Well past a pipe buffer, so a blocking write would stall.
        let many: Vec<String> = (0..4_000)
            .map(|index| format!("Step {index}: {}", "x".repeat(80)))
            .collect();
        let started = Instant::now();
        assert!(matches!(
            refiner.refine(&many),
            Err(RefineError::Timeout(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn missing_command_is_a_spawn_error() {
        let refiner = CommandRefiner::new(&RefineConfig {
            enabled: true,
            command: "repo-mirror-no-such-refiner".to_string(),
            args: Vec::new(),
            timeout_secs: 1,
        });
        let err = refiner.refine(&steps()).expect_err("spawn should fail");
        assert!(matches!(err, RefineError::Spawn { .. }));
        assert_eq!(refine_or_keep(steps(), &refiner), steps());
    }
}
