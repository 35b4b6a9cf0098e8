//! Named diagram generators
//!
//! A [`PresetRegistry`] maps lowercase names to [`DiagramGenerator`]s. The
//! parser and the composition engine borrow a registry and only ever call
//! into it; it is filled once by the caller.

mod args;
pub(crate) mod builtin;
pub(crate) mod legacy;

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

pub use args::{PresetArg, coerce, parse_arguments};

use crate::errors::GeneratorError;
use crate::log;
use crate::model::Diagram;

/// Produces a diagram from an id and positional arguments
pub trait DiagramGenerator: Send + Sync {
    fn generate(&self, id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError>;
}

impl<F> DiagramGenerator for F
where
    F: Fn(&str, &[PresetArg]) -> Result<Diagram, GeneratorError> + Send + Sync,
{
    fn generate(&self, id: &str, args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
        self(id, args)
    }
}

static BUILTIN: LazyLock<PresetRegistry> = LazyLock::new(PresetRegistry::with_builtin);

/// Shared registry holding the built-in generators
pub fn builtin() -> &'static PresetRegistry {
    &BUILTIN
}

#[derive(Default)]
pub struct PresetRegistry {
    generators: HashMap<String, Box<dyn DiagramGenerator>>,
}

impl PresetRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `incline`, `hanging`, `pulley` and `beam`
    pub fn with_builtin() -> Self {
        Self::new()
            .with("incline", builtin::incline)
            .with("hanging", builtin::hanging)
            .with("pulley", builtin::pulley)
            .with("beam", builtin::beam)
    }

    /// Register a generator, replacing any previous one under that name
    pub fn register(&mut self, name: &str, generator: impl DiagramGenerator + 'static) {
        self.generators.insert(name.to_lowercase(), Box::new(generator));
    }

    pub fn with(mut self, name: &str, generator: impl DiagramGenerator + 'static) -> Self {
        self.register(name, generator);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn DiagramGenerator> {
        self.generators.get(&name.to_lowercase()).map(|g| g.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(&name.to_lowercase())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run the generator registered under `name`.
    ///
    /// Returns `None` when no generator has that name. A generator that
    /// panics is reported as [`GeneratorError::Panicked`].
    pub fn generate(
        &self,
        name: &str,
        id: &str,
        args: &[PresetArg],
    ) -> Option<Result<Diagram, GeneratorError>> {
        let generator = self.get(name)?;
        let result = panic::catch_unwind(AssertUnwindSafe(|| generator.generate(id, args)))
            .unwrap_or_else(|payload| Err(GeneratorError::Panicked(panic_message(payload.as_ref()))));
        if let Err(e) = &result {
            log::warn!(preset = name, error = %e, "generator failed");
        }
        Some(result)
    }
}

impl fmt::Debug for PresetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetRegistry").field("names", &self.names()).finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Numeric argument `index`, or `default` when absent
pub(crate) fn number_arg(args: &[PresetArg], index: usize, default: f64) -> Result<f64, GeneratorError> {
    match args.get(index) {
        None => Ok(default),
        Some(arg) => arg.as_f64().ok_or(GeneratorError::InvalidArgument {
            index,
            expected: "a number",
        }),
    }
}

/// Boolean argument `index`, or `default` when absent
pub(crate) fn bool_arg(args: &[PresetArg], index: usize, default: bool) -> Result<bool, GeneratorError> {
    match args.get(index) {
        None => Ok(default),
        Some(arg) => arg.as_bool().ok_or(GeneratorError::InvalidArgument {
            index,
            expected: "true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DiagramBuilder;

    fn dot(id: &str, _args: &[PresetArg]) -> Result<Diagram, GeneratorError> {
        Ok(DiagramBuilder::new(id).add_point("p", 1.0, 1.0, None).build())
    }

    #[test]
    fn names_are_case_insensitive() {
        let registry = PresetRegistry::new().with("Dot", dot);
        assert!(registry.contains("dot"));
        assert!(registry.contains("DOT"));
        assert_eq!(registry.names(), ["dot"]);
    }

    #[test]
    fn missing_generator_is_none() {
        assert!(PresetRegistry::new().generate("nothing", "id", &[]).is_none());
    }

    #[test]
    fn panicking_generator_is_caught() {
        let registry = PresetRegistry::new().with("boom", |_: &str, _: &[PresetArg]| -> Result<Diagram, GeneratorError> {
            panic!("kaboom")
        });
        let result = registry.generate("boom", "id", &[]);
        assert_eq!(result, Some(Err(GeneratorError::Panicked("kaboom".into()))));
    }

    #[test]
    fn builtin_names() {
        assert_eq!(PresetRegistry::with_builtin().names(), ["beam", "hanging", "incline", "pulley"]);
    }

    #[test]
    fn argument_helpers() {
        let args = [PresetArg::Number(3.0), PresetArg::Str("x".into())];
        assert_eq!(number_arg(&args, 0, 1.0), Ok(3.0));
        assert_eq!(number_arg(&args, 5, 1.0), Ok(1.0));
        assert!(number_arg(&args, 1, 1.0).is_err());
        assert!(bool_arg(&args, 0, false).is_err());
    }
}
