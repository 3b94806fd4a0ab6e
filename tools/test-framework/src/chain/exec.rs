use eyre::eyre;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::str;
use tracing::{debug, trace};

use crate::error::{handle_exec_error, handle_generic_error, Error};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    /**
       Some Cosmos SDK commands, such as `status` and `keys add --output json`
       on older SDK versions, print their structured output to stderr. This
       returns stdout if it has any content, and stderr otherwise.
    */
    pub fn structured_output(&self) -> &str {
        if self.stdout.trim().is_empty() {
            self.stderr.trim()
        } else {
            self.stdout.trim()
        }
    }
}

/**
   Anything that can run a command line inside the environment of a chain,
   such as a chain node running in a container.

   The first argument is the binary to run.
*/
pub trait CommandExecutor {
    fn exec(&self, args: &[&str]) -> Result<ExecOutput, Error>;
}

pub fn simple_exec(desc: &str, command_path: &str, args: &[&str]) -> Result<ExecOutput, Error> {
    debug!(
        "Executing command for {}: {} {}",
        desc,
        command_path,
        itertools::join(args, " ")
    );

    let output = Command::new(command_path)
        .args(args)
        .output()
        .map_err(handle_exec_error(command_path))?;

    handle_output(command_path, args, output)
}

/**
   Same as [`simple_exec`], but writes the given bytes to the stdin of the
   spawned command before waiting for it to exit.
*/
pub fn exec_with_stdin(
    desc: &str,
    command_path: &str,
    args: &[&str],
    stdin: &[u8],
) -> Result<ExecOutput, Error> {
    debug!(
        "Executing command for {} with {} bytes of input: {} {}",
        desc,
        stdin.len(),
        command_path,
        itertools::join(args, " ")
    );

    let mut child = Command::new(command_path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(handle_exec_error(command_path))?;

    {
        let mut child_stdin = child
            .stdin
            .take()
            .ok_or_else(|| eyre!("failed to open stdin of command {}", command_path))?;

        child_stdin.write_all(stdin)?;
    }

    let output = child.wait_with_output()?;

    handle_output(command_path, args, output)
}

fn handle_output(command_path: &str, args: &[&str], output: Output) -> Result<ExecOutput, Error> {
    if output.status.success() {
        let stdout = str::from_utf8(&output.stdout)
            .map_err(handle_generic_error)?
            .to_string();

        let stderr = str::from_utf8(&output.stderr)
            .map_err(handle_generic_error)?
            .to_string();

        trace!(
            "command executed successfully with stdout: {}, stderr: {}",
            stdout,
            stderr
        );

        Ok(ExecOutput { stdout, stderr })
    } else {
        let message = String::from_utf8_lossy(&output.stderr).to_string();

        Err(Error::command_failed(
            format!("{} {}", command_path, itertools::join(args, " ")),
            output.status.code(),
            message,
        ))
    }
}

/**
   A [`CommandExecutor`] that records the commands it is given and
   replies with canned outputs, for testing command construction and
   output parsing.
*/
#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{CommandExecutor, ExecOutput};
    use crate::error::Error;

    #[derive(Default)]
    pub struct RecordingExecutor {
        pub commands: RefCell<Vec<Vec<String>>>,
        pub outputs: RefCell<VecDeque<ExecOutput>>,
    }

    impl RecordingExecutor {
        pub fn with_stdout(outputs: &[&str]) -> Self {
            let executor = Self::default();
            for stdout in outputs {
                executor.outputs.borrow_mut().push_back(ExecOutput {
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                });
            }
            executor
        }

        pub fn push_output(&self, output: ExecOutput) {
            self.outputs.borrow_mut().push_back(output);
        }

        pub fn command(&self, index: usize) -> Vec<String> {
            self.commands.borrow()[index].clone()
        }
    }

    impl CommandExecutor for RecordingExecutor {
        fn exec(&self, args: &[&str]) -> Result<ExecOutput, Error> {
            self.commands
                .borrow_mut()
                .push(args.iter().map(|arg| arg.to_string()).collect());

            Ok(self.outputs.borrow_mut().pop_front().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_output_prefers_stdout() {
        let output = ExecOutput {
            stdout: "{\"a\":1}\n".to_string(),
            stderr: "gas estimate: 1000".to_string(),
        };

        assert_eq!(output.structured_output(), "{\"a\":1}");
    }

    #[test]
    fn structured_output_falls_back_to_stderr() {
        let output = ExecOutput {
            stdout: "  \n".to_string(),
            stderr: "{\"SyncInfo\":{}}\n".to_string(),
        };

        assert_eq!(output.structured_output(), "{\"SyncInfo\":{}}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_reports_status() {
        let res = simple_exec("test", "sh", &["-c", "echo oops >&2; exit 3"]);

        match res {
            Err(e) => match e.detail() {
                crate::error::ErrorDetail::CommandFailed(e) => {
                    assert_eq!(e.status, Some(3));
                    assert_eq!(e.stderr.trim(), "oops");
                }
                other => panic!("unexpected error: {other:?}"),
            },
            Ok(_) => panic!("expected command to fail"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdin_is_forwarded() -> Result<(), Error> {
        let output = exec_with_stdin("test", "cat", &[], b"hello")?;
        assert_eq!(output.stdout, "hello");
        Ok(())
    }

    #[test]
    fn missing_command_is_reported() {
        let res = simple_exec("test", "this-command-does-not-exist-anywhere", &[]);

        assert!(matches!(
            res.map_err(|e| e.into_detail()),
            Err(crate::error::ErrorDetail::CommandNotFound(_))
        ));
    }
}
