use super::{markup, PageRenderer, RenderContext};
use crate::builder::StringBuilder;
use crate::generate::ArrayLiteral;

/// Entry of the dtype select. `value` is the bare numpy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtype {
    pub name: &'static str,
    pub value: &'static str,
}

pub const DTYPES: &[Dtype] = &[
    Dtype { name: "Select dtype", value: "" },
    Dtype { name: "int8", value: "int8" },
    Dtype { name: "int16", value: "int16" },
    Dtype { name: "int32", value: "int32" },
    Dtype { name: "int64", value: "int64" },
    Dtype { name: "uint8", value: "uint8" },
    Dtype { name: "float16", value: "float16" },
    Dtype { name: "float32", value: "float32" },
    Dtype { name: "float64", value: "float64" },
    Dtype { name: "complex64", value: "complex64" },
    Dtype { name: "complex128", value: "complex128" },
    Dtype { name: "bool", value: "bool_" },
    Dtype { name: "str", value: "str_" },
    Dtype { name: "object", value: "object_" },
];

/// Labeled text input bound to one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub param: &'static str,
    pub label: &'static str,
}

impl Input {
    pub const fn new(param: &'static str, label: &'static str) -> Self {
        Self { param, label }
    }
}

/// Page with only the shared sections
#[derive(Debug, Clone, Copy, Default)]
pub struct BasePage;

impl PageRenderer for BasePage {}

/// Page for an operation with a call variable and/or parameter inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationPage {
    pub call_variable: bool,
    pub inputs: &'static [Input],
    pub dtype: bool,
}

impl PageRenderer for OperationPage {
    fn render_required_input_output(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        if self.call_variable {
            markup::call_var_block(cx, sb);
        }
    }

    fn render_param_block(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::param_inputs(cx, sb, self.inputs);
        if self.dtype {
            markup::dtype_block(cx, sb);
        }
    }
}

/// Page for `np.array`: an element editor instead of free-form inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayEditorPage;

impl PageRenderer for ArrayEditorPage {
    fn render_param_block(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::array_editor(cx, sb, ArrayLiteral::PARAM);
        markup::dtype_block(cx, sb);
    }
}
