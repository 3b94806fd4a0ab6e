/*!
   Error type used for the tests.
*/

use core::convert::{From, Into};
use eyre::Report;
use flex_error::{define_error, TraceError};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};

define_error! {
    Error {
        Generic
            [ TraceError<Report> ]
            | _ | { "generic error" },

        Assertion
            { message: String }
            | e | { format_args!("assertion failure: {}", e.message) },

        Io
            [ TraceError<IoError> ]
            | _ | { "io error"},

        CommandNotFound
            { command: String }
            [ TraceError<IoError> ]
            | e | { format_args!("failed to execute command: {}. make sure it is available in $PATH", e.command) },

        CommandFailed
            {
                command: String,
                status: Option<i32>,
                stderr: String,
            }
            | e | {
                format_args!("command `{}` exited with error status {:?} and message: {}",
                    e.command, e.status, e.stderr)
            },

        TxFailed
            {
                code: i64,
                raw_log: String,
            }
            | e | { format_args!("transaction failed with code {}: {}", e.code, e.raw_log) },

        Parse
            { message: String }
            | e | { format_args!("failed to parse command output: {}", e.message) },

        Json
            [ TraceError<serde_json::Error> ]
            | _ | { "json error" },

        Retry
            {
                task_name: String,
                attempts: u16,
            }
            | e | {
                format_args!(
                    "Expected task to eventually succeeed, but failed after {} attempts: {}",
                    e.attempts,
                    e.task_name
                )
            },

        InvalidTopology
            { message: String }
            | e | { format_args!("invalid interchain topology: {}", e.message) },
    }
}

pub fn handle_generic_error(e: impl Into<Report>) -> Error {
    Error::generic(e.into())
}

pub fn handle_exec_error(command: &str) -> impl FnOnce(IoError) -> Error + '_ {
    |e| match e.kind() {
        IoErrorKind::NotFound => Error::command_not_found(command.to_string(), e),
        _ => Error::io(e),
    }
}

impl From<Report> for Error {
    fn from(e: Report) -> Self {
        Error::generic(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::json(e)
    }
}
