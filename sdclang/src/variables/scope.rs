//! Named build variables.
//!
//! A [`VariableScope`] holds constant strings and functions of the
//! evaluation context. Values may refer to other variables as `${Name}`;
//! [`VariableScope::expand`] substitutes those references.

use std::collections::HashMap;
use std::fmt;

use crate::config::environment::Environment;
use crate::error::{Error, Result};

/// A lazily evaluated variable body.
pub type VariableFn = Box<dyn Fn(&dyn Environment) -> Result<String> + Send + Sync>;

enum Variable {
    Static(String),
    Lazy(VariableFn),
}

/// A set of named build variables.
///
/// # Examples
///
/// ```
/// use sdclang::config::{Environment, MapEnvironment};
/// use sdclang::variables::VariableScope;
///
/// let mut scope = VariableScope::new();
/// scope.static_variable("Root", "prebuilts").unwrap();
/// scope
///     .variable_func("Wrapper", |ctx: &dyn Environment| {
///         Ok(ctx.var("CC_WRAPPER").unwrap_or_default())
///     })
///     .unwrap();
/// scope.static_variable("Bin", "${Root}/bin").unwrap();
///
/// let env = MapEnvironment::new().with("CC_WRAPPER", "ccache");
/// assert_eq!(scope.evaluate("Wrapper", &env).unwrap(), "ccache");
/// assert_eq!(scope.evaluate("Bin", &env).unwrap(), "${Root}/bin");
/// assert_eq!(scope.expand("${Wrapper} ${Bin}/clang", &env).unwrap(), "ccache prebuilts/bin/clang");
/// ```
#[derive(Default)]
pub struct VariableScope {
    order: Vec<String>,
    variables: HashMap<String, Variable>,
}

impl fmt::Debug for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableScope")
            .field("variables", &self.order)
            .finish()
    }
}

impl VariableScope {
    /// Create an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constant variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVariable`] if `name` is already registered.
    pub fn static_variable(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.insert(name, Variable::Static(value.into()))
    }

    /// Register a variable computed from the evaluation context each time it
    /// is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVariable`] if `name` is already registered.
    pub fn variable_func<F>(&mut self, name: &str, func: F) -> Result<()>
    where
        F: Fn(&dyn Environment) -> Result<String> + Send + Sync + 'static,
    {
        self.insert(name, Variable::Lazy(Box::new(func)))
    }

    fn insert(&mut self, name: &str, variable: Variable) -> Result<()> {
        if self.variables.contains_key(name) {
            return Err(Error::DuplicateVariable { name: name.into() });
        }
        self.order.push(name.to_string());
        self.variables.insert(name.to_string(), variable);
        Ok(())
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The raw value of `name`, without expanding references.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariable`] for an unregistered name, or
    /// whatever the variable's function returns.
    pub fn evaluate(&self, name: &str, ctx: &dyn Environment) -> Result<String> {
        match self.variables.get(name) {
            Some(Variable::Static(value)) => Ok(value.clone()),
            Some(Variable::Lazy(func)) => func(ctx),
            None => Err(Error::UnknownVariable { name: name.into() }),
        }
    }

    /// The value of `name` with every `${...}` reference expanded.
    ///
    /// # Errors
    ///
    /// As [`VariableScope::expand`].
    pub fn evaluate_expanded(&self, name: &str, ctx: &dyn Environment) -> Result<String> {
        let mut stack = vec![name.to_string()];
        let value = self.evaluate(name, ctx)?;
        self.expand_with(&value, ctx, &mut stack)
    }

    /// Substitute every `${Name}` reference in `template`, recursively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariable`] for a reference to an unregistered
    /// name, [`Error::VariableCycle`] if a variable refers back to itself, and
    /// a validation error for an unterminated `${`.
    pub fn expand(&self, template: &str, ctx: &dyn Environment) -> Result<String> {
        self.expand_with(template, ctx, &mut Vec::new())
    }

    fn expand_with(
        &self,
        template: &str,
        ctx: &dyn Environment,
        stack: &mut Vec<String>,
    ) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}').ok_or_else(|| Error::Validation {
                field: template.into(),
                message: "Unterminated variable reference".into(),
            })?;
            let name = &after[..end];

            if stack.iter().any(|seen| seen == name) {
                let mut chain = stack.clone();
                chain.push(name.to_string());
                return Err(Error::VariableCycle { chain });
            }

            stack.push(name.to_string());
            let value = self.evaluate(name, ctx)?;
            out.push_str(&self.expand_with(&value, ctx, stack)?);
            stack.pop();

            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Evaluate every variable in registration order.
    ///
    /// # Errors
    ///
    /// Stops at the first variable that fails to evaluate.
    pub fn evaluate_all(&self, ctx: &dyn Environment, expand: bool) -> Result<Vec<(String, String)>> {
        self.names()
            .map(|name| {
                let value = if expand {
                    self.evaluate_expanded(name, ctx)?
                } else {
                    self.evaluate(name, ctx)?
                };
                Ok((name.to_string(), value))
            })
            .collect()
    }
}
