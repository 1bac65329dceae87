use crate::catalog;
use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::render::{page_render, BasePage, Fragment, PageRenderer};
use crate::state::ParameterState;
use crate::template::GeneratedCode;
use crate::validate::Validator;
use crate::Options;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Grouping used when listing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Creation,
    Method,
    Statistics,
    Arithmetic,
    Comparison,
    Universal,
    Custom,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Creation => "Array creation",
            Category::Method => "Array methods",
            Category::Statistics => "Statistics",
            Category::Arithmetic => "Arithmetic",
            Category::Comparison => "Comparison",
            Category::Universal => "Universal functions",
            Category::Custom => "Custom",
        }
    }
}

/// Everything needed to turn one kind of block into code
pub struct Operation {
    pub name: String,
    pub category: Category,
    pub validator: Box<dyn Validator>,
    pub generator: Box<dyn Generator>,
    pub renderer: Box<dyn PageRenderer>,
}

impl Operation {
    /// New operation with the shared page sections only
    pub fn new(
        name: impl Into<String>,
        category: Category,
        validator: impl Validator + 'static,
        generator: impl Generator + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            validator: Box::new(validator),
            generator: Box::new(generator),
            renderer: Box::new(BasePage),
        }
    }

    pub fn with_renderer(mut self, renderer: impl PageRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Validate, then generate. `None` when the state is rejected.
    pub fn generate(&self, state: &ParameterState) -> Option<GeneratedCode> {
        if self.validator.validate(state) {
            Some(self.generator.make_code(state))
        } else {
            None
        }
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Name-keyed table of operations, built once and shared by reference.
#[derive(Debug)]
pub struct Registry {
    operations: BTreeMap<String, Operation>,
    options: Options,
}

impl Registry {
    /// Empty registry
    pub fn new(options: Options) -> Self {
        Self {
            operations: BTreeMap::new(),
            options,
        }
    }

    /// Registry with every built-in numpy operation
    pub fn standard(options: Options) -> Self {
        let mut registry = Self::new(options);
        for operation in catalog::standard_operations(&registry.options) {
            let registered = registry.register(operation);
            debug_assert!(registered.is_ok(), "catalog entry registered twice: {registered:?}");
        }
        debug!(count = registry.len(), "built standard registry");
        registry
    }

    pub fn register(&mut self, operation: Operation) -> Result<()> {
        if self.operations.contains_key(&operation.name) {
            return Err(Error::DuplicateOperation(operation.name));
        }
        debug!(name = %operation.name, category = ?operation.category, "registered operation");
        self.operations.insert(operation.name.clone(), operation);
        Ok(())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&Operation> {
        self.get(name)
            .ok_or_else(|| Error::UnknownOperation(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Validate and generate code for `name`. `Ok(None)` when validation fails.
    pub fn generate(&self, name: &str, state: &ParameterState) -> Result<Option<GeneratedCode>> {
        let operation = self.lookup(name)?;
        let code = operation.generate(state);
        debug!(name, accepted = code.is_some(), "generated block code");
        Ok(code)
    }

    pub fn validate(&self, name: &str, state: &ParameterState) -> Result<bool> {
        Ok(self.lookup(name)?.validator.validate(state))
    }

    /// Render the option page of `name` under `target` (or the configured root)
    pub fn render(
        &self,
        name: &str,
        state: &ParameterState,
        target: Option<&str>,
        block_id: &str,
    ) -> Result<Fragment> {
        let operation = self.lookup(name)?;
        Ok(page_render(
            operation.renderer.as_ref(),
            state,
            target,
            &self.options,
            block_id,
        ))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard(Options::default())
    }
}
