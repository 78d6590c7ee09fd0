//! The scripting-hook seam.
//!
//! External extension mechanisms (an embedded interpreter, say) plug
//! into the pipeline through a [`HookRegistry`]: filter hooks reject
//! raw input lines during ingestion, process hooks rewrite the final
//! table after the core stages have run. The registry is an explicit
//! value passed through the pipeline options, never process-wide
//! state.

use crate::tabdata::Tabdata;

/// Rejects or accepts one raw input line.
pub type FilterHook = Box<dyn Fn(&str) -> bool>;

/// Rewrites the table after the core pipeline; returns whether it
/// changed anything along with the (possibly new) table.
pub type ProcessHook = Box<dyn Fn(Tabdata) -> (bool, Tabdata)>;

/// Registered extension hooks.
#[derive(Default)]
pub struct HookRegistry {
    filters: Vec<FilterHook>,
    processors: Vec<ProcessHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter hook of shape `line -> bool`.
    pub fn register_filter(&mut self, hook: impl Fn(&str) -> bool + 'static) {
        self.filters.push(Box::new(hook));
    }

    /// Register a process hook of shape `Tabdata -> (changed, Tabdata)`.
    pub fn register_process(&mut self, hook: impl Fn(Tabdata) -> (bool, Tabdata) + 'static) {
        self.processors.push(Box::new(hook));
    }

    /// AND-combine all filter hooks; the first `false` rejects the
    /// line. With no hooks registered every line passes.
    pub fn keep_line(&self, line: &str) -> bool {
        self.filters.iter().all(|hook| hook(line))
    }

    /// Run process hooks in registration order, threading the table
    /// through each. Returns whether any hook reported a change.
    pub fn run_processors(&self, mut data: Tabdata) -> (bool, Tabdata) {
        let mut changed = false;
        for hook in &self.processors {
            let (hook_changed, next) = hook(data);
            changed |= hook_changed;
            data = next;
        }
        (changed, data)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.processors.is_empty()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("filters", &self.filters.len())
            .field("processors", &self.processors.len())
            .finish()
    }
}
