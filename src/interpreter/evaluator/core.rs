use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{DeclarationKind, Expr, LogicalOperator, Position, Program, Statement},
    config::Config,
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            environment::{EnvRef, Environment, ScopeKind},
            function::builtin::install_globals,
        },
        parser::compile,
        value::{
            core::Value,
            function::Closure,
            object::{Object, ObjectKind},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Remaining stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each stack segment allocated once the red zone is reached.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// How a statement finished.
///
/// `Normal(None)` is the empty completion of declarations, empty statements
/// and empty blocks; it never replaces the value of an earlier statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Ran to its end, optionally producing a value.
    Normal(Option<Value>),
    /// `return` with the returned value.
    Return(Value),
    /// `break`, carrying the value produced so far.
    Break(Option<Value>),
    /// `continue`, carrying the value produced so far.
    Continue(Option<Value>),
}

impl Completion {
    /// Fills an empty value slot with `value`.
    #[must_use]
    pub fn update_empty(self, value: Option<Value>) -> Self {
        match self {
            Self::Normal(None) => Self::Normal(value),
            Self::Break(None) => Self::Break(value),
            Self::Continue(None) => Self::Continue(value),
            other => other,
        }
    }
}

/// Stores the runtime evaluation context.
///
/// A context owns the global environment record and the global object. It is
/// the single place where the global record is created and populated with the
/// host bindings; every program, function call and `eval` run through one
/// context shares that record.
///
/// ## Usage
///
/// `Context` is created once and reused for running programs. Bindings made by
/// one program are visible to the next.
///
/// ```
/// use evalon::{
///     config::Config,
///     interpreter::{evaluator::core::Context, value::core::Value},
/// };
///
/// let mut context = Context::new(Config::default());
/// context.run("var x = 40").unwrap();
/// assert_eq!(context.run("x + 2").unwrap(), Value::Number(42.0));
/// ```
pub struct Context {
    pub(crate) global:        EnvRef,
    pub(crate) global_object: Rc<Object>,
    pub(crate) config:        Config,
    pub(crate) call_depth:    usize,
}

impl Context {
    /// Creates a context with a freshly initialised global record.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let global = Environment::new_global();
        let global_object = Object::new(ObjectKind::Global(Rc::downgrade(&global)));
        install_globals(&global, &global_object);

        Self { global,
               global_object,
               config,
               call_depth: 0 }
    }

    /// The global environment record.
    #[must_use]
    pub const fn global(&self) -> &EnvRef {
        &self.global
    }

    /// The global object, also reachable as `global` and `globalThis`.
    #[must_use]
    pub const fn global_object(&self) -> &Rc<Object> {
        &self.global_object
    }

    /// The configuration this context was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Compiles and runs `source` as a top-level program.
    ///
    /// # Returns
    /// The completion value of the program, `undefined` when no statement
    /// produced a value.
    ///
    /// # Errors
    /// [`Error::Parse`] when the program does not compile, [`Error::Runtime`]
    /// when it raises an exception that nobody catches.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = compile(source)?;
        let global = Rc::clone(&self.global);
        Ok(self.run_program(&program, &global)?)
    }

    /// Runs a compiled program against `env`.
    ///
    /// Declarations are instantiated first: `var` names and function
    /// declarations go to the nearest function or global record of `env`,
    /// `let` and `const` are created in `env` itself as they execute.
    ///
    /// # Returns
    /// The completion value, `undefined` when none exists.
    pub fn run_program(&mut self, program: &Program, env: &EnvRef) -> EvalResult<Value> {
        Self::hoist_declarations(&program.statements, env);

        match self.exec_statements(&program.statements, env)? {
            Completion::Normal(Some(value)) => Ok(value),
            _ => Ok(Value::Undefined),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches on
    /// the expression variant.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The environment record the expression runs in.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr, env))
    }

    fn eval_inner(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => Self::lookup(name, *position, env),
            Expr::Unary { op, expr, .. } => self.eval_unary_op(*op, expr, env),
            Expr::Binary { left, op, right, .. } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Ok(Self::eval_binary(*op, &left, &right))
            },
            Expr::Logical { left, op, right, .. } => {
                let left = self.eval(left, env)?;
                let short_circuit = match op {
                    LogicalOperator::And => !left.to_boolean(),
                    LogicalOperator::Or => left.to_boolean(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval(right, env)
                }
            },
            Expr::Conditional { condition,
                                then_expr,
                                else_expr,
                                .. } => {
                if self.eval(condition, env)?.to_boolean() {
                    self.eval(then_expr, env)
                } else {
                    self.eval(else_expr, env)
                }
            },
            Expr::Assign { target,
                           op,
                           value,
                           position, } => self.eval_assignment(target, *op, value, *position, env),
            Expr::Update { target,
                           increment,
                           prefix,
                           position, } => {
                self.eval_update(target, *increment, *prefix, *position, env)
            },
            Expr::Call { callee,
                         arguments,
                         call_site,
                         position, } => {
                self.eval_call(callee, arguments, *call_site, *position, env)
            },
            Expr::New { callee,
                        arguments,
                        position, } => {
                let constructor = self.eval(callee, env)?;
                let args = self.eval_arguments(arguments, env)?;
                self.construct(&constructor, args, callee, *position)
            },
            Expr::Member { object,
                           property,
                           position, } => {
                let base = self.eval(object, env)?;
                Self::get_property(&base, property, *position)
            },
            Expr::Index { object,
                          index,
                          position, } => {
                let base = self.eval(object, env)?;
                let key = self.eval(index, env)?.to_display_string();
                Self::get_property(&base, &key, *position)
            },
            Expr::Function(def) => {
                Ok(Value::Function(Closure::new(Rc::clone(def), Rc::clone(env))))
            },
            Expr::Object { properties, .. } => {
                let mut map = HashMap::with_capacity(properties.len());
                for (key, value) in properties {
                    let value = self.eval(value, env)?;
                    map.insert(key.clone(), value);
                }
                Ok(Value::Object(Object::with_properties(map)))
            },
        }
    }

    /// Reads the binding `name` visible from `env`.
    ///
    /// # Errors
    /// `UnknownVariable` when no record in the chain binds `name`.
    pub fn lookup(name: &str, position: Position, env: &EnvRef) -> EvalResult<Value> {
        Environment::lookup(env, name).ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                                      position })
    }

    /// Evaluates argument expressions left to right.
    ///
    /// Evaluation stops at the first argument that raises an error; later
    /// arguments are never evaluated.
    pub fn eval_arguments(&mut self, arguments: &[Expr], env: &EnvRef) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument, env)?);
        }
        Ok(values)
    }

    /// Executes a statement list, producing the value of its last
    /// value-producing statement.
    ///
    /// Abrupt completions stop execution and are returned with the value
    /// produced so far filled in.
    pub fn exec_statements(&mut self,
                           statements: &[Statement],
                           env: &EnvRef)
                           -> EvalResult<Completion> {
        let mut last = None;

        for statement in statements {
            match self.exec_statement(statement, env)? {
                Completion::Normal(Some(value)) => last = Some(value),
                Completion::Normal(None) => {},
                abrupt => return Ok(abrupt.update_empty(last)),
            }
        }

        Ok(Completion::Normal(last))
    }

    /// Executes a single statement.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `env`: The environment record the statement runs in.
    ///
    /// # Returns
    /// How the statement completed.
    pub fn exec_statement(&mut self, statement: &Statement, env: &EnvRef) -> EvalResult<Completion> {
        match statement {
            Statement::Expression { expr, .. } => Ok(Completion::Normal(Some(self.eval(expr, env)?))),
            Statement::VariableDeclaration { kind,
                                             declarations,
                                             position, } => {
                for declarator in declarations {
                    let value = match &declarator.init {
                        Some(init) => Some(self.eval(init, env)?),
                        None => None,
                    };
                    match kind {
                        DeclarationKind::Var => {
                            if let Some(value) = value {
                                Environment::assign(env, &declarator.name, value, *position)?;
                            }
                        },
                        DeclarationKind::Let | DeclarationKind::Const => {
                            Environment::declare(env,
                                                 &declarator.name,
                                                 value.unwrap_or(Value::Undefined),
                                                 *kind == DeclarationKind::Let);
                        },
                    }
                }
                Ok(Completion::Normal(None))
            },
            Statement::FunctionDeclaration(_) | Statement::Empty { .. } => {
                Ok(Completion::Normal(None))
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Undefined,
                };
                Ok(Completion::Return(value))
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let completion = if self.eval(condition, env)?.to_boolean() {
                    self.exec_statement(then_branch, env)?
                } else if let Some(else_branch) = else_branch {
                    self.exec_statement(else_branch, env)?
                } else {
                    Completion::Normal(None)
                };
                Ok(completion.update_empty(Some(Value::Undefined)))
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body, env),
            Statement::For { init,
                             condition,
                             update,
                             body,
                             .. } => {
                self.exec_for(init.as_deref(), condition.as_ref(), update.as_ref(), body, env)
            },
            Statement::Block { statements, .. } => self.exec_block(statements, env),
            Statement::Break { .. } => Ok(Completion::Break(None)),
            Statement::Continue { .. } => Ok(Completion::Continue(None)),
            Statement::Throw { value, .. } => Err(RuntimeError::Thrown(self.eval(value, env)?)),
            Statement::Try { block,
                             handler,
                             finalizer,
                             .. } => self.exec_try(block, handler.as_ref(), finalizer.as_deref(), env),
        }
    }

    /// Runs `statements` in a fresh block record.
    pub(crate) fn exec_block(&mut self,
                             statements: &[Statement],
                             env: &EnvRef)
                             -> EvalResult<Completion> {
        if statements.is_empty() {
            return Ok(Completion::Normal(None));
        }
        let block_env = Environment::new_child(env, ScopeKind::Block);
        Self::instantiate_functions(statements, &block_env, &block_env);
        self.exec_statements(statements, &block_env)
    }

    /// Instantiates the declarations of a program or function body.
    ///
    /// Every `var` name, at any block depth but outside nested functions, is
    /// created as `undefined` in the nearest function or global record.
    /// Function declarations directly in `statements` are bound there too,
    /// closing over `env`.
    pub fn hoist_declarations(statements: &[Statement], env: &EnvRef) {
        let var_scope = Environment::variable_scope(env);

        let mut names = Vec::new();
        collect_var_names(statements, &mut names);
        trace!(vars = ?names, "hoisting declarations");
        for name in &names {
            Environment::declare_var(&var_scope, name);
        }

        Self::instantiate_functions(statements, &var_scope, env);
    }

    /// Binds each function declaration in `statements` in `target`, as a
    /// closure over `env`.
    fn instantiate_functions(statements: &[Statement], target: &EnvRef, env: &EnvRef) {
        for statement in statements {
            if let Statement::FunctionDeclaration(def) = statement
               && let Some(name) = &def.name
            {
                let closure = Closure::new(Rc::clone(def), Rc::clone(env));
                Environment::declare(target, name, Value::Function(closure), true);
            }
        }
    }

    /// Runs `f` one call level deeper.
    ///
    /// # Errors
    /// `CallStackExceeded` when the configured depth is already reached; `f`
    /// is not run in that case.
    pub(crate) fn with_call_depth<T>(&mut self,
                                     position: Position,
                                     f: impl FnOnce(&mut Self) -> EvalResult<T>)
                                     -> EvalResult<T> {
        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallStackExceeded { position });
        }
        self.call_depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || f(self));
        self.call_depth -= 1;
        result
    }
}

/// Collects the names declared with `var` in `statements`, descending into
/// nested statements but not into functions.
fn collect_var_names(statements: &[Statement], names: &mut Vec<String>) {
    for statement in statements {
        collect_var_names_in(statement, names);
    }
}

fn collect_var_names_in(statement: &Statement, names: &mut Vec<String>) {
    match statement {
        Statement::VariableDeclaration { kind: DeclarationKind::Var,
                                         declarations,
                                         .. } => {
            for declarator in declarations {
                if !names.contains(&declarator.name) {
                    names.push(declarator.name.clone());
                }
            }
        },
        Statement::If { then_branch,
                        else_branch,
                        .. } => {
            collect_var_names_in(then_branch, names);
            if let Some(else_branch) = else_branch {
                collect_var_names_in(else_branch, names);
            }
        },
        Statement::While { body, .. } => collect_var_names_in(body, names),
        Statement::For { init, body, .. } => {
            if let Some(init) = init {
                collect_var_names_in(init, names);
            }
            collect_var_names_in(body, names);
        },
        Statement::Block { statements, .. } => collect_var_names(statements, names),
        Statement::Try { block,
                         handler,
                         finalizer,
                         .. } => {
            collect_var_names(block, names);
            if let Some(handler) = handler {
                collect_var_names(&handler.body, names);
            }
            if let Some(finalizer) = finalizer {
                collect_var_names(finalizer, names);
            }
        },
        _ => {},
    }
}
