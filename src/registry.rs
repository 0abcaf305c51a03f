//! Type registry: maps a type expression to the validator that checks and
//! extracts a variable's value.

use crate::error::RegistryError;
use crate::types;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Validates a candidate path segment against a type expression.
///
/// Returns the extracted value on success. The extracted value may differ
/// from the candidate (e.g. a normalized form).
pub trait Validator: Send + Sync {
    fn validate(&self, type_expr: &str, candidate: &str) -> Option<String>;
}

impl<F> Validator for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn validate(&self, type_expr: &str, candidate: &str) -> Option<String> {
        self(type_expr, candidate)
    }
}

/// Validators keyed by the exact type expression they handle.
///
/// Cloning is cheap: validators are reference counted.
#[derive(Clone)]
pub struct TypeRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// A registry holding the built-in types (`string`, `int`, `date`, ...).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, validator) in types::BUILTINS {
            registry
                .validators
                .insert(name.to_string(), Arc::new(*validator));
        }
        registry
    }

    /// Adds a validator under `name`. A name can only be registered once;
    /// the existing validator is kept on conflict.
    pub fn register<V>(
        &mut self,
        name: impl Into<String>,
        validator: V,
    ) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        let name = name.into();
        if self.validators.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        tracing::debug!(type_expr = %name, "registered type");
        self.validators.insert(name, Arc::new(validator));
        Ok(())
    }

    pub fn get(&self, type_expr: &str) -> Option<&dyn Validator> {
        self.validators.get(type_expr).map(|v| v.as_ref())
    }

    pub fn contains(&self, type_expr: &str) -> bool {
        self.validators.contains_key(type_expr)
    }

    /// Registered type expressions, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}
