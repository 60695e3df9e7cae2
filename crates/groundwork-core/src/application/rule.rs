//! Rule composition: the unit of scaffolding work.
//!
//! A rule is a one-shot closure over the shared tree and context. Chains
//! run rules strictly in order; the first failure aborts the chain and the
//! caller discards the tree, so commit only ever sees a fully successful
//! run.

use tracing::debug;

use crate::domain::{Context, FileTree};
use crate::error::GroundworkResult;

/// What a rule produced.
pub enum Outcome {
    /// The rule did its work (possibly nothing).
    Applied,

    /// The rule resolved to another rule that must run next, in its
    /// place. A deferring rule must not touch the tree itself.
    Deferred(Rule),
}

/// A named, single-use scaffolding step.
pub struct Rule {
    name: String,
    run: Box<dyn FnOnce(&mut FileTree, &Context) -> GroundworkResult<Outcome>>,
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: FnOnce(&mut FileTree, &Context) -> GroundworkResult<Outcome> + 'static,
    {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    /// A rule that does nothing, for conditionally skipped steps.
    pub fn noop(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(Outcome::Applied))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the rule once, consuming it.
    pub fn apply(self, tree: &mut FileTree, ctx: &Context) -> GroundworkResult<Outcome> {
        debug!(rule = %self.name, "applying rule");
        (self.run)(tree, ctx)
    }

    /// Run rules in order against one shared tree and context.
    ///
    /// A `Deferred` outcome loops in place until the step settles on
    /// `Applied`. The first error short-circuits: later rules never run.
    /// Returns the names of the rules that applied, in execution order.
    pub fn chain(
        rules: Vec<Rule>,
        tree: &mut FileTree,
        ctx: &Context,
    ) -> GroundworkResult<Vec<String>> {
        let mut applied = Vec::with_capacity(rules.len());
        for rule in rules {
            let mut current = rule;
            loop {
                let name = current.name().to_string();
                match current.apply(tree, ctx)? {
                    Outcome::Applied => {
                        applied.push(name);
                        break;
                    }
                    Outcome::Deferred(next) => {
                        debug!(rule = %name, next = %next.name(), "rule deferred");
                        current = next;
                    }
                }
            }
        }
        Ok(applied)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}
