//! Code generation for numpy blocks.
//!
//! A block's page captures a [`ParameterState`]. The [`Registry`] maps an
//! operation name to a [`Validator`], a [`Generator`] and a [`PageRenderer`];
//! validating and then generating turns the state into Python source, and
//! [`page_render`] describes the option page the block shows.
//!
//! ```
//! use numpy_blockgen::{ParameterState, Registry};
//!
//! let registry = Registry::default();
//! let state = ParameterState::new()
//!     .with_return_variable("y")
//!     .with_call_variable("x");
//! let code = registry.generate("copy", &state).unwrap().unwrap();
//! assert_eq!(code.as_str(), "y = x.copy()\n");
//! ```

pub mod block;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod generate;
pub mod registry;
pub mod render;
pub mod state;
pub mod syntax;
pub mod template;
pub mod validate;

pub use block::{Block, StateEvent};
pub use builder::StringBuilder;
pub use error::{Error, Result, SyntaxError};
pub use generate::{Arg, Generator};
pub use registry::{Category, Operation, Registry};
pub use render::{page_render, Fragment, PageRenderer, Stage};
pub use state::{ParamValue, ParameterState, UserOption};
pub use syntax::{check_python, SyntaxChecker};
pub use template::{CodeTemplate, GeneratedCode};
pub use validate::Validator;

use serde::Deserialize;

/// Configuration shared by every operation in a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name numpy is imported as in the target notebook (default: "np")
    pub numpy_alias: String,
    /// Page root used when rendering without an explicit target
    pub root_selector: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            numpy_alias: "np".to_string(),
            root_selector: ".np-block-page".to_string(),
        }
    }
}

/// On-disk form of one block: `{"operation": "zeros", "state": {...}}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockFile {
    pub operation: String,
    #[serde(default)]
    pub state: ParameterState,
}

impl BlockFile {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        serde_json::from_str(&source).map_err(|source| Error::InvalidBlock {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Generate code for a block file. `Ok(None)` when its state is rejected.
pub fn generate_block(registry: &Registry, block: &BlockFile) -> Result<Option<GeneratedCode>> {
    registry.generate(&block.operation, &block.state)
}
