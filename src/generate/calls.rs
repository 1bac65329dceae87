use super::{build_args, surround, Arg, Generator};
use crate::state::ParameterState;
use crate::template::{CodeTemplate, GeneratedCode};

/// `module.function(args)`, e.g. `np.zeros((2, 3))`
#[derive(Debug, Clone)]
pub struct ModuleCall {
    pub module: String,
    pub function: &'static str,
    pub args: &'static [Arg],
}

impl ModuleCall {
    pub fn new(module: impl Into<String>, function: &'static str, args: &'static [Arg]) -> Self {
        Self {
            module: module.into(),
            function,
            args,
        }
    }
}

impl Generator for ModuleCall {
    fn make_code(&self, state: &ParameterState) -> GeneratedCode {
        let template = CodeTemplate {
            indent_space_num: state.indent_space_num,
            return_var: state.return_var().map(str::to_string),
            call_var: Some(self.module.clone()),
            function_name: self.function.to_string(),
            param_str: build_args(self.args, state, &self.module),
            method_args: String::new(),
            is_print_return_var: state.is_return_variable,
        };
        surround(state, template.make_function_call())
    }
}

/// `receiver.method(args)` where the receiver is the block's call variable
#[derive(Debug, Clone)]
pub struct MethodCall {
    /// Module dtype arguments are looked up on
    pub numpy: String,
    pub method: &'static str,
    pub args: &'static [Arg],
}

impl MethodCall {
    pub fn new(numpy: impl Into<String>, method: &'static str, args: &'static [Arg]) -> Self {
        Self {
            numpy: numpy.into(),
            method,
            args,
        }
    }
}

impl Generator for MethodCall {
    fn make_code(&self, state: &ParameterState) -> GeneratedCode {
        let template = CodeTemplate {
            indent_space_num: state.indent_space_num,
            return_var: state.return_var().map(str::to_string),
            call_var: None,
            function_name: self.method.to_string(),
            param_str: state.call_var().unwrap_or_default().to_string(),
            method_args: build_args(self.args, state, &self.numpy),
            is_print_return_var: state.is_return_variable,
        };
        surround(state, template.make_instance_method_call())
    }
}

/// `np.array(<literal>)` built from the array editor's `array` parameter
#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub module: String,
}

impl ArrayLiteral {
    pub const PARAM: &'static str = "array";

    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }
}

impl Generator for ArrayLiteral {
    fn make_code(&self, state: &ParameterState) -> GeneratedCode {
        let template = CodeTemplate {
            indent_space_num: state.indent_space_num,
            return_var: state.return_var().map(str::to_string),
            call_var: Some(self.module.clone()),
            function_name: "array".to_string(),
            param_str: build_args(&[Arg::Positional(Self::PARAM), Arg::Dtype], state, &self.module),
            method_args: String::new(),
            is_print_return_var: state.is_return_variable,
        };
        surround(state, template.make_function_call())
    }
}
