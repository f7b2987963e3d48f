use std::rc::Rc;

use tracing::trace;

use crate::interpreter::{
    eval::call_site::EvalMode,
    evaluator::environment::{EnvRef, Environment, ScopeKind},
};

/// Where a sub-program runs.
#[derive(Debug, Clone)]
pub enum ResolvedScope {
    /// The record of the direct eval call site.
    Caller(EnvRef),
    /// The global record.
    Global,
}

/// Chooses the scope for an eval in `mode` issued from `caller`.
#[must_use]
pub fn resolve(mode: EvalMode, caller: &EnvRef) -> ResolvedScope {
    let scope = match mode {
        EvalMode::Direct => ResolvedScope::Caller(Rc::clone(caller)),
        EvalMode::Indirect => ResolvedScope::Global,
    };
    trace!(?mode, "resolved eval scope");
    scope
}

impl ResolvedScope {
    /// The record the scope designates.
    #[must_use]
    pub fn record(&self, global: &EnvRef) -> EnvRef {
        match self {
            Self::Caller(env) => Rc::clone(env),
            Self::Global => Rc::clone(global),
        }
    }

    /// Builds the record a sub-program runs in.
    ///
    /// The sub-program gets a block record of its own for `let` and `const`.
    /// Its parent is the resolved record, so every binding visible there can
    /// be read and written, and `var` declarations reach the nearest function
    /// or global record above it.
    ///
    /// ## Example
    /// ```
    /// use evalon::interpreter::{
    ///     eval::scope::ResolvedScope,
    ///     evaluator::environment::{Environment, ScopeKind},
    ///     value::core::Value,
    /// };
    ///
    /// let global = Environment::new_global();
    /// let caller = Environment::new_child(&global, ScopeKind::Function);
    /// Environment::declare(&caller, "x", Value::Number(5.0), true);
    ///
    /// let direct = ResolvedScope::Caller(caller).sub_program_env(&global);
    /// assert_eq!(Environment::lookup(&direct, "x"), Some(Value::Number(5.0)));
    ///
    /// assert_eq!(direct.borrow().kind(), ScopeKind::Block);
    ///
    /// let indirect = ResolvedScope::Global.sub_program_env(&global);
    /// assert_eq!(Environment::lookup(&indirect, "x"), None);
    /// ```
    #[must_use]
    pub fn sub_program_env(&self, global: &EnvRef) -> EnvRef {
        Environment::new_child(&self.record(global), ScopeKind::Block)
    }
}
