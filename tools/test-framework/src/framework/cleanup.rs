/*!
   Guards running cleanup tasks when a test exits, whether it succeeds
   or fails.
*/

use tracing::{debug, warn};

use crate::error::Error;

/**
   Runs the task when dropped. An error of the task is logged and does not
   fail the test, so that a failing cleanup never hides the error that
   made the test exit.

   Guards are dropped in the reverse order of their creation, so a guard
   must be created after the resources its task uses.
*/
pub struct Cleanup<Task>
where
    Task: FnOnce() -> Result<(), Error>,
{
    name: String,
    task: Option<Task>,
}

impl<Task> Cleanup<Task>
where
    Task: FnOnce() -> Result<(), Error>,
{
    pub fn new(name: &str, task: Task) -> Self {
        Self {
            name: name.to_string(),
            task: Some(task),
        }
    }

    /// Drop the guard without running its task.
    pub fn dismiss(mut self) {
        self.task = None;
    }
}

impl<Task> Drop for Cleanup<Task>
where
    Task: FnOnce() -> Result<(), Error>,
{
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("running cleanup task: {}", self.name);

            if let Err(e) = task() {
                warn!("an error occurred while running cleanup task {}: {}", self.name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    #[test]
    fn task_runs_on_drop() {
        let calls = Cell::new(0);

        {
            let _guard = Cleanup::new("count", || {
                calls.set(calls.get() + 1);
                Ok(())
            });
            assert_eq!(calls.get(), 0);
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn task_error_is_not_propagated() {
        let calls = Cell::new(0);

        drop(Cleanup::new("failing", || {
            calls.set(calls.get() + 1);
            Err(Error::assertion("stop failed".to_string()))
        }));

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dismissed_task_does_not_run() {
        let calls = Cell::new(0);

        Cleanup::new("dismissed", || {
            calls.set(calls.get() + 1);
            Ok(())
        })
        .dismiss();

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn guards_run_in_reverse_order() {
        let order = core::cell::RefCell::new(Vec::new());

        {
            let _first = Cleanup::new("first", || {
                order.borrow_mut().push("first");
                Ok(())
            });
            let _second = Cleanup::new("second", || {
                order.borrow_mut().push("second");
                Ok(())
            });
        }

        assert_eq!(*order.borrow(), vec!["second", "first"]);
    }
}
