use crate::error::Result;
use crate::registry::{Operation, Registry};
use crate::render::Fragment;
use crate::state::{ParamValue, ParameterState, UserOption};
use crate::template::GeneratedCode;
use tracing::trace;

/// A change captured from the block's page
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    SetReturnVariable(String),
    SetCallVariable(String),
    SetPrintReturn(bool),
    SetIndent(usize),
    SetParam(String, ParamValue),
    RemoveParam(String),
    SetDtype(String),
    SetPrefixCode(String),
    SetPostfixCode(String),
    AddUserOption,
    UpdateUserOptionKey(usize, String),
    UpdateUserOptionValue(usize, String),
    RemoveUserOption(usize),
    /// Plus button of an array editor: a `0` element, or a row of zeros
    AddArrayElement(String),
    /// Delete button of an array editor: the element (or row) at the index
    RemoveArrayElement(String, usize),
}

/// Controller for one code block: owns the state, borrows the registry.
#[derive(Debug)]
pub struct Block<'r> {
    registry: &'r Registry,
    operation: &'r Operation,
    id: String,
    state: ParameterState,
}

impl<'r> Block<'r> {
    pub fn new(registry: &'r Registry, operation: &str, id: impl Into<String>) -> Result<Self> {
        Self::with_state(registry, operation, id, ParameterState::default())
    }

    pub fn with_state(
        registry: &'r Registry,
        operation: &str,
        id: impl Into<String>,
        state: ParameterState,
    ) -> Result<Self> {
        let operation = registry.lookup(operation)?;
        Ok(Self {
            registry,
            operation,
            id: id.into(),
            state,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn operation(&self) -> &str {
        &self.operation.name
    }

    pub fn state(&self) -> &ParameterState {
        &self.state
    }

    pub fn apply(&mut self, event: StateEvent) {
        trace!(block = %self.id, ?event, "state event");
        let state = &mut self.state;
        match event {
            StateEvent::SetReturnVariable(name) => state.return_variable = Some(name),
            StateEvent::SetCallVariable(name) => state.call_variable = Some(name),
            StateEvent::SetPrintReturn(print) => state.is_return_variable = print,
            StateEvent::SetIndent(spaces) => state.indent_space_num = spaces,
            StateEvent::SetParam(name, value) => {
                state.params.insert(name, value);
            }
            StateEvent::RemoveParam(name) => {
                state.params.remove(&name);
            }
            StateEvent::SetDtype(dtype) => state.dtype = Some(dtype),
            StateEvent::SetPrefixCode(code) => state.prefix_code = code,
            StateEvent::SetPostfixCode(code) => state.postfix_code = code,
            StateEvent::AddUserOption => state.user_option_list.push(UserOption::default()),
            StateEvent::UpdateUserOptionKey(index, key) => {
                if let Some(option) = state.user_option_list.get_mut(index) {
                    option.option_key = key;
                }
            }
            StateEvent::UpdateUserOptionValue(index, value) => {
                if let Some(option) = state.user_option_list.get_mut(index) {
                    option.option_value = value;
                }
            }
            StateEvent::RemoveUserOption(index) => {
                if index < state.user_option_list.len() {
                    state.user_option_list.remove(index);
                }
            }
            StateEvent::AddArrayElement(param) => {
                let items = match state.params.remove(&param) {
                    Some(ParamValue::List(items)) => items,
                    Some(value) if !value.is_absent() => vec![value],
                    _ => Vec::new(),
                };
                state.params.insert(param, ParamValue::List(with_new_element(items)));
            }
            StateEvent::RemoveArrayElement(param, index) => {
                if let Some(ParamValue::List(items)) = state.params.get_mut(&param) {
                    if index < items.len() {
                        items.remove(index);
                    }
                }
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.operation.validator.validate(&self.state)
    }

    /// Code for the current state, or `None` while the state is rejected
    pub fn code(&self) -> Option<GeneratedCode> {
        self.operation.generate(&self.state)
    }

    pub fn render(&self, target: Option<&str>) -> Fragment {
        crate::render::page_render(
            self.operation.renderer.as_ref(),
            &self.state,
            target,
            self.registry.options(),
            &self.id,
        )
    }
}

/// Append what the plus button adds: a row as wide as the widest row for a
/// two-dimensional array, otherwise a single `0`
fn with_new_element(mut items: Vec<ParamValue>) -> Vec<ParamValue> {
    let width = items
        .iter()
        .filter_map(|item| match item {
            ParamValue::List(row) => Some(row.len()),
            _ => None,
        })
        .max();
    match width {
        Some(width) => items.push(ParamValue::from(vec!["0"; width.max(1)])),
        None => items.push(ParamValue::from("0")),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::render::Stage;

    #[test]
    fn test_unknown_operation() {
        let registry = Registry::default();
        assert!(matches!(Block::new(&registry, "fft", "b1"), Err(Error::UnknownOperation(_))));
    }

    #[test]
    fn test_events_drive_code() {
        let registry = Registry::default();
        let mut block = Block::new(&registry, "zeros", "b1").unwrap();
        block.apply(StateEvent::SetParam("shape".into(), ParamValue::from(vec![2i64, 2])));
        block.apply(StateEvent::SetReturnVariable("grid".into()));
        assert_eq!(block.code().unwrap().as_str(), "grid = np.zeros((2, 2))\n");

        block.apply(StateEvent::SetReturnVariable("def".into()));
        assert!(!block.is_valid());
        assert_eq!(block.code(), None);
    }

    #[test]
    fn test_user_option_lifecycle() {
        let registry = Registry::default();
        let mut block = Block::new(&registry, "ones", "b1").unwrap();
        block.apply(StateEvent::SetParam("shape".into(), ParamValue::from("3")));
        block.apply(StateEvent::AddUserOption);
        block.apply(StateEvent::AddUserOption);
        block.apply(StateEvent::UpdateUserOptionKey(0, "order".into()));
        block.apply(StateEvent::UpdateUserOptionValue(0, "'F'".into()));
        block.apply(StateEvent::UpdateUserOptionKey(7, "ignored".into()));
        assert_eq!(block.code().unwrap().as_str(), "np.ones(3, order='F')\n");

        block.apply(StateEvent::RemoveUserOption(0));
        block.apply(StateEvent::RemoveUserOption(5));
        assert_eq!(block.state().user_option_list.len(), 1);
        assert_eq!(block.code().unwrap().as_str(), "np.ones(3)\n");
    }

    #[test]
    fn test_render_uses_block_id() {
        let registry = Registry::default();
        let block = Block::new(&registry, "copy", "cell-9").unwrap();
        let fragment = block.render(None);
        let required = fragment.section(Stage::RequiredInputOutput).unwrap();
        assert!(required.markup.contains("id='np-block-call-input-cell-9'"));
        assert_eq!(fragment.root, registry.options().root_selector);
    }

    #[test]
    fn test_array_element_controls() {
        let registry = Registry::default();
        let mut block = Block::new(&registry, "array", "b1").unwrap();
        block.apply(StateEvent::SetReturnVariable("a".into()));
        block.apply(StateEvent::AddArrayElement("array".into()));
        block.apply(StateEvent::AddArrayElement("array".into()));
        block.apply(StateEvent::SetParam("array".into(), ParamValue::from(vec!["1", "2", "3"])));
        block.apply(StateEvent::RemoveArrayElement("array".into(), 1));
        block.apply(StateEvent::RemoveArrayElement("array".into(), 9));
        assert_eq!(block.code().unwrap().as_str(), "a = np.array([1, 3])\n");

        block.apply(StateEvent::SetParam(
            "array".into(),
            ParamValue::from(vec![vec![1i64, 2], vec![3, 4]]),
        ));
        block.apply(StateEvent::AddArrayElement("array".into()));
        assert_eq!(block.code().unwrap().as_str(), "a = np.array([[1, 2], [3, 4], [0, 0]])\n");
    }

    #[test]
    fn test_add_array_element_to_empty_param() {
        let registry = Registry::default();
        let mut block = Block::new(&registry, "array", "b1").unwrap();
        block.apply(StateEvent::AddArrayElement("array".into()));
        assert_eq!(block.state().param("array"), Some(&ParamValue::from(vec!["0"])));
    }
}
