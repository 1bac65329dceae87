//! Built-in numpy operations.

use crate::generate::{Arg, ArrayLiteral, MethodCall, ModuleCall};
use crate::registry::{Category, Operation};
use crate::render::{ArrayEditorPage, Input, OperationPage};
use crate::validate::{AlwaysValid, CALL_AND_RETURN_VARIABLE, RETURN_VARIABLE};
use crate::Options;

const SHAPE_ARGS: &[Arg] = &[Arg::Shape("shape"), Arg::Dtype];
const FULL_ARGS: &[Arg] = &[Arg::Shape("shape"), Arg::Positional("fill_value"), Arg::Dtype];
const RANGE_ARGS: &[Arg] = &[
    Arg::Positional("start"),
    Arg::Positional("stop"),
    Arg::Positional("step"),
    Arg::Dtype,
];
const LINSPACE_ARGS: &[Arg] = &[
    Arg::Positional("start"),
    Arg::Positional("stop"),
    Arg::Positional("num"),
    Arg::Dtype,
];
const EYE_ARGS: &[Arg] = &[Arg::Positional("N"), Arg::Positional("M"), Arg::Positional("k"), Arg::Dtype];
const IDENTITY_ARGS: &[Arg] = &[Arg::Positional("n"), Arg::Dtype];

const REDUCE_ARGS: &[Arg] = &[Arg::CallVariable, Arg::Keyword("axis")];
const PERCENTILE_ARGS: &[Arg] = &[Arg::CallVariable, Arg::Positional("q"), Arg::Keyword("axis")];
const OPERAND_ARGS: &[Arg] = &[Arg::Positional("x1"), Arg::Positional("x2")];
const UNARY_ARGS: &[Arg] = &[Arg::CallVariable];

const SHAPE_INPUTS: &[Input] = &[Input::new("shape", "Shape")];
const FULL_INPUTS: &[Input] = &[Input::new("shape", "Shape"), Input::new("fill_value", "Fill Value")];
const RANGE_INPUTS: &[Input] = &[
    Input::new("start", "Start"),
    Input::new("stop", "Stop"),
    Input::new("step", "Step"),
];
const LINSPACE_INPUTS: &[Input] = &[
    Input::new("start", "Start"),
    Input::new("stop", "Stop"),
    Input::new("num", "Num"),
];
const EYE_INPUTS: &[Input] = &[Input::new("N", "Rows"), Input::new("M", "Columns"), Input::new("k", "Diagonal")];
const IDENTITY_INPUTS: &[Input] = &[Input::new("n", "Size")];
const RESHAPE_INPUTS: &[Input] = &[Input::new("newshape", "New Shape")];
const TRANSPOSE_INPUTS: &[Input] = &[Input::new("axes", "Axes")];
const AXIS_INPUTS: &[Input] = &[Input::new("axis", "Axis")];
const PERCENTILE_INPUTS: &[Input] = &[Input::new("q", "Percentile"), Input::new("axis", "Axis")];
const OPERAND_INPUTS: &[Input] = &[Input::new("x1", "Operand 1"), Input::new("x2", "Operand 2")];

const ARITHMETIC: &[&str] = &["add", "subtract", "multiply", "divide", "power", "mod"];
const COMPARISON: &[&str] = &["greater", "greater_equal", "less", "less_equal", "equal", "not_equal"];
const STATISTICS: &[&str] = &["mean", "median", "std", "var", "min", "max", "sum", "prod"];
const UNIVERSAL: &[&str] = &["abs", "sqrt", "exp", "log", "sin", "cos", "floor", "ceil"];

fn creation(options: &Options, name: &'static str, args: &'static [Arg], inputs: &'static [Input]) -> Operation {
    Operation::new(
        name,
        Category::Creation,
        RETURN_VARIABLE,
        ModuleCall::new(options.numpy_alias.as_str(), name, args),
    )
    .with_renderer(OperationPage {
        call_variable: false,
        inputs,
        dtype: true,
    })
}

fn method(options: &Options, name: &'static str, args: &'static [Arg], inputs: &'static [Input], dtype: bool) -> Operation {
    Operation::new(
        name,
        Category::Method,
        CALL_AND_RETURN_VARIABLE,
        MethodCall::new(options.numpy_alias.as_str(), name, args),
    )
    .with_renderer(OperationPage {
        call_variable: true,
        inputs,
        dtype,
    })
}

fn statistic(options: &Options, name: &'static str, args: &'static [Arg], inputs: &'static [Input]) -> Operation {
    Operation::new(
        name,
        Category::Statistics,
        CALL_AND_RETURN_VARIABLE,
        ModuleCall::new(options.numpy_alias.as_str(), name, args),
    )
    .with_renderer(OperationPage {
        call_variable: true,
        inputs,
        dtype: false,
    })
}

fn operand_page() -> OperationPage {
    OperationPage {
        call_variable: false,
        inputs: OPERAND_INPUTS,
        dtype: false,
    }
}

/// Every operation of the standard registry
pub fn standard_operations(options: &Options) -> Vec<Operation> {
    let np = options.numpy_alias.as_str();
    let mut operations = vec![
        Operation::new("array", Category::Creation, RETURN_VARIABLE, ArrayLiteral::new(np))
            .with_renderer(ArrayEditorPage),
        creation(options, "zeros", SHAPE_ARGS, SHAPE_INPUTS),
        creation(options, "ones", SHAPE_ARGS, SHAPE_INPUTS),
        creation(options, "empty", SHAPE_ARGS, SHAPE_INPUTS),
        creation(options, "full", FULL_ARGS, FULL_INPUTS),
        creation(options, "arange", RANGE_ARGS, RANGE_INPUTS),
        creation(options, "linspace", LINSPACE_ARGS, LINSPACE_INPUTS),
        creation(options, "eye", EYE_ARGS, EYE_INPUTS),
        creation(options, "identity", IDENTITY_ARGS, IDENTITY_INPUTS),
        method(options, "copy", &[], &[], false),
        method(options, "reshape", &[Arg::Shape("newshape")], RESHAPE_INPUTS, false),
        method(options, "transpose", &[Arg::Positional("axes")], TRANSPOSE_INPUTS, false),
        method(options, "flatten", &[], &[], false),
        method(options, "ravel", &[], &[], false),
        method(options, "astype", &[Arg::Dtype], &[], true),
        method(options, "tolist", &[], &[], false),
        statistic(options, "percentile", PERCENTILE_ARGS, PERCENTILE_INPUTS),
        // scipy owns the mode; any names are accepted here
        Operation::new(
            "mode",
            Category::Statistics,
            AlwaysValid,
            ModuleCall::new("scipy.stats", "mode", REDUCE_ARGS),
        )
        .with_renderer(OperationPage {
            call_variable: true,
            inputs: AXIS_INPUTS,
            dtype: false,
        }),
    ];

    operations.extend(
        STATISTICS
            .iter()
            .copied()
            .map(|name| statistic(options, name, REDUCE_ARGS, AXIS_INPUTS)),
    );

    operations.extend(ARITHMETIC.iter().copied().map(|name| {
        Operation::new(
            name,
            Category::Arithmetic,
            RETURN_VARIABLE,
            ModuleCall::new(np, name, OPERAND_ARGS),
        )
        .with_renderer(operand_page())
    }));

    operations.extend(COMPARISON.iter().copied().map(|name| {
        Operation::new(
            name,
            Category::Comparison,
            AlwaysValid,
            ModuleCall::new(np, name, OPERAND_ARGS),
        )
        .with_renderer(operand_page())
    }));

    operations.extend(UNIVERSAL.iter().copied().map(|name| {
        Operation::new(
            name,
            Category::Universal,
            CALL_AND_RETURN_VARIABLE,
            ModuleCall::new(np, name, UNARY_ARGS),
        )
        .with_renderer(OperationPage {
            call_variable: true,
            inputs: &[],
            dtype: false,
        })
    }));

    operations
}
