//! Completion notifications for finished workflow commands
//!
//! Observers register on the [`crate::Workflow`] before dispatch and are
//! invoked synchronously, in registration order, once a `*-done` command
//! reaches its terminal state. They fire on success and on failure alike,
//! and receive the failure message when there is one.

/// Terminal notification for a finished workflow command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// `task-done` reached its terminal state
    TaskDone { error: Option<String> },
    /// `fix-done` reached its terminal state
    FixDone { error: Option<String> },
}

impl WorkflowEvent {
    /// Name of the command that finished
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskDone { .. } => "task-done",
            Self::FixDone { .. } => "fix-done",
        }
    }

    /// Failure message, if the command failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::TaskDone { error } | Self::FixDone { error } => error.as_deref(),
        }
    }
}

type Observer = Box<dyn Fn(&WorkflowEvent) + Send>;

/// Ordered list of completion observers
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Observer>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; observers fire in registration order
    pub fn subscribe(&mut self, observer: impl Fn(&WorkflowEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver an event to every observer, in order
    pub fn notify(&self, event: &WorkflowEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
