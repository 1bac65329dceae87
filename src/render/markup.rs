//! Markup for the page sections shared between block types.

use super::html::{escape, flag};
use super::pages::{Input, DTYPES};
use super::RenderContext;
use crate::builder::StringBuilder;
use crate::generate::{bare_dtype, qualify_dtype};
use crate::state::ParamValue;

/// Collapsible section title
fn section_header(sb: &mut StringBuilder, caption_id: &str, title: &str) {
    sb.append_line("<h4>");
    sb.append_format_line("<div class='{0} {1}'></div>", &[&"np-block-toggle", &"np-block-arrow-down"]);
    sb.append_format_line(
        "<span class='{0}' data-caption-id='{1}'>{2}</span>",
        &[&"np-block-caption", &caption_id, &title],
    );
    sb.append_line("</h4>");
}

fn code_box(
    cx: &RenderContext<'_>,
    sb: &mut StringBuilder,
    kind: &str,
    title: &str,
    content: &str,
) {
    sb.append_format_line(
        "<div class='{0} {1} {2}'>",
        &[&"np-block", &"np-block-code-box", &"np-block-minimize"],
    );
    section_header(sb, &format!("{}Code", kind), title);
    sb.append_format_line("<div id='{0}'>", &[&cx.element_id(&format!("np-block-{}", kind))]);
    sb.append_format_line(
        "<textarea class='{0} {1}' placeholder='{2}' rows='3' cols='60'>{3}</textarea>",
        &[
            &"np-block-textarea",
            &format!("np-block-{}-textarea", kind),
            &format!("{} code", kind),
            &escape(content),
        ],
    );
    sb.append_line("</div>");
    sb.append_line("</div>");
}

pub fn prefix_code_box(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    code_box(cx, sb, "prefix", "Prefix Code", &cx.state.prefix_code);
}

pub fn postfix_code_box(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    code_box(cx, sb, "postfix", "Postfix Code", &cx.state.postfix_code);
}

pub fn additional_options_header(_cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    sb.append_format_line(
        "<div class='{0} {1} {2}'>",
        &[&"np-block", &"np-block-options-view", &"np-block-minimize"],
    );
    section_header(sb, "additionalOptions", "Additional Options");
    sb.append_line("</div>");
}

/// Labeled text input in a two-column option row
fn input_row(sb: &mut StringBuilder, caption_id: &str, label: &str, class: &str, id: &str, value: &str) {
    sb.append_line("<tr>");
    sb.append_format_line(
        "<td style='width: 40%;'><label class='{0}' data-caption-id='{1}'>{2}</label></td>",
        &[&"np-block-caption", &caption_id, &label],
    );
    sb.append_format_line(
        "<td><input type='text' class='{0} {1}' id='{2}' placeholder='{3}' value='{4}'/></td>",
        &[&"np-block-input", &class, &id, &"input variable", &escape(value)],
    );
    sb.append_line("</tr>");
}

pub fn return_var_block(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    sb.append_format_line(
        "<div class='{0}' id='{1}'>",
        &[&"np-block-option", &cx.element_id("np-block-return")],
    );
    sb.append_line("<table style='width: 100%;'>");
    input_row(
        sb,
        "inputReturnVariable",
        "Input Return Variable",
        "np-block-return-input",
        &cx.element_id("np-block-return-input"),
        cx.state.return_variable.as_deref().unwrap_or_default(),
    );
    sb.append_line("<tr>");
    sb.append_format_line(
        "<td><label class='{0}' data-caption-id='{1}'>{2}</label></td>",
        &[&"np-block-caption", &"printReturnVariable", &"Print Return Variable"],
    );
    sb.append_format_line(
        "<td><input type='checkbox' class='{0}' id='{1}'{2}/></td>",
        &[
            &"np-block-print-return",
            &cx.element_id("np-block-print-return"),
            &flag("checked", cx.state.is_return_variable),
        ],
    );
    sb.append_line("</tr>");
    sb.append_line("</table>");
    sb.append_line("</div>");
}

pub fn call_var_block(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    sb.append_format_line(
        "<div class='{0}' id='{1}'>",
        &[&"np-block-option", &cx.element_id("np-block-call")],
    );
    sb.append_line("<table style='width: 100%;'>");
    input_row(
        sb,
        "inputCallVariable",
        "* Input Call Variable",
        "np-block-call-input",
        &cx.element_id("np-block-call-input"),
        cx.state.call_variable.as_deref().unwrap_or_default(),
    );
    sb.append_line("</table>");
    sb.append_line("</div>");
}

pub fn param_inputs(cx: &RenderContext<'_>, sb: &mut StringBuilder, inputs: &[Input]) {
    if inputs.is_empty() {
        return;
    }
    sb.append_format_line(
        "<div class='{0}' id='{1}'>",
        &[&"np-block-option", &cx.element_id("np-block-params")],
    );
    sb.append_line("<table style='width: 100%;'>");
    for input in inputs {
        input_row(
            sb,
            input.param,
            input.label,
            "np-block-param-input",
            &cx.element_id(&format!("np-block-param-{}", input.param)),
            &cx.state.param_text(input.param),
        );
    }
    sb.append_line("</table>");
    sb.append_line("</div>");
}

pub fn dtype_block(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    let selected = cx
        .state
        .dtype()
        .map(|dtype| bare_dtype(dtype, cx.numpy_alias))
        .unwrap_or_default();
    sb.append_format_line("<div class='{0}'>", &[&"np-block-option"]);
    sb.append_line("<table style='width: 100%;'>");
    sb.append_line("<tr>");
    sb.append_format_line(
        "<td style='width: 40%;'><label class='{0}' data-caption-id='{1}'>{2}</label></td>",
        &[&"np-block-caption", &"selectDtype", &"Select Dtype"],
    );
    sb.append_line("<td>");
    sb.append_format_line(
        "<select class='{0}' id='{1}'>",
        &[&"np-block-select-dtype", &cx.element_id("np-block-dtype")],
    );
    for dtype in DTYPES {
        let value = if dtype.value.is_empty() {
            String::new()
        } else {
            qualify_dtype(dtype.value, cx.numpy_alias)
        };
        sb.append_format_line(
            "<option value='{0}'{1}>{2}</option>",
            &[&escape(&value), &flag("selected", dtype.value == selected), &dtype.name],
        );
    }
    sb.append_line("</select>");
    sb.append_line("</td>");
    sb.append_line("</tr>");
    sb.append_line("</table>");
    sb.append_line("</div>");
}

/// Element editor for an array parameter.
///
/// A list of lists gets the row/column editor, anything else the
/// one-dimensional one. Both carry a delete button per element and a plus
/// button that appends an element (or a row).
pub fn array_editor(cx: &RenderContext<'_>, sb: &mut StringBuilder, param: &str) {
    let value = cx.state.param(param);
    let rows = match value {
        Some(ParamValue::List(items)) if items.iter().any(|i| matches!(i, ParamValue::List(_))) => {
            Some(items)
        }
        _ => None,
    };

    sb.append_format_line(
        "<div class='{0}' id='{1}' data-param='{2}'>",
        &[&"np-block-array-editor", &cx.element_id("np-block-array"), &escape(param)],
    );
    match rows {
        Some(rows) => two_array_editor(cx, sb, rows),
        None => {
            let elements: Vec<String> = match value {
                Some(ParamValue::List(items)) => items.iter().map(ParamValue::to_code).collect(),
                Some(other) => vec![other.to_code()],
                None => Vec::new(),
            };
            one_array_editor(cx, sb, &elements);
        }
    }
    sb.append_line("</div>");
}

/// `Caption : [input]` used by the array editor titles
fn size_input(sb: &mut StringBuilder, caption_id: &str, caption: &str, class: &str, id: &str, size: usize) {
    sb.append_format_line("<div class='{0}'>", &[&"np-block-array-size"]);
    sb.append_format_line(
        "<span class='{0}' data-caption-id='{1}'>{2}</span>",
        &[&"np-block-caption", &caption_id, &caption],
    );
    sb.append_format_line(
        "<input type='text' class='{0} {1}' id='{2}' value='{3}'/>",
        &[&"np-block-input", &class, &id, &size],
    );
    sb.append_line("</div>");
}

fn new_button(sb: &mut StringBuilder, class: &str) {
    sb.append_format_line(
        "<button class='{0} {1}' data-caption-id='{2}'>New</button>",
        &[&"np-block-func-btn", &class, &"new"],
    );
}

fn element_cell(sb: &mut StringBuilder, index: &str, value: &str) {
    sb.append_format_line("<div class='{0}' data-index='{1}'>", &[&"np-block-array-cell", &index]);
    sb.append_format_line("<div class='{0}'>{1}</div>", &[&"np-block-array-index", &index]);
    sb.append_format_line(
        "<input type='text' class='{0} {1}' data-index='{2}' value='{3}'/>",
        &[&"np-block-input", &"np-block-array-element", &index, &escape(value)],
    );
    sb.append_format_line(
        "<button class='{0} {1}' data-index='{2}'>x</button>",
        &[&"np-block-func-btn", &"np-block-array-delete", &index],
    );
    sb.append_line("</div>");
}

fn plus_button(sb: &mut StringBuilder, class: &str) {
    sb.append_format_line(
        "<button class='{0} {1}'><span data-caption-id='{2}'>+ Plus</span></button>",
        &[&"np-block-func-btn", &class, &"numpyPlus"],
    );
}

fn one_array_editor(cx: &RenderContext<'_>, sb: &mut StringBuilder, elements: &[String]) {
    sb.append_format_line("<div class='{0}'>", &[&"np-block-array-title"]);
    size_input(
        sb,
        "length",
        "Length :",
        "np-block-array-length",
        &cx.element_id("np-block-array-length"),
        elements.len(),
    );
    new_button(sb, "np-block-array-new");
    sb.append_line("</div>");

    sb.append_format_line("<div class='{0}'>", &[&"np-block-array-elements"]);
    for (index, element) in elements.iter().enumerate() {
        element_cell(sb, &index.to_string(), element);
    }
    sb.append_line("</div>");
    plus_button(sb, "np-block-array-plus");
}

fn two_array_editor(cx: &RenderContext<'_>, sb: &mut StringBuilder, rows: &[ParamValue]) {
    let cols = rows
        .iter()
        .map(|row| match row {
            ParamValue::List(items) => items.len(),
            _ => 1,
        })
        .max()
        .unwrap_or_default();

    sb.append_format_line("<div class='{0}'>", &[&"np-block-array-title"]);
    size_input(sb, "row", "Row :", "np-block-array-rows", &cx.element_id("np-block-array-rows"), rows.len());
    size_input(sb, "col", "Col :", "np-block-array-cols", &cx.element_id("np-block-array-cols"), cols);
    new_button(sb, "np-block-array-new");
    sb.append_line("</div>");

    for (r, row) in rows.iter().enumerate() {
        sb.append_format_line("<div class='{0}' data-row='{1}'>", &[&"np-block-array-row", &r]);
        match row {
            ParamValue::List(items) => {
                for (c, item) in items.iter().enumerate() {
                    element_cell(sb, &format!("{}-{}", r, c), &item.to_code());
                }
            }
            other => element_cell(sb, &format!("{}-0", r), &other.to_code()),
        }
        plus_button(sb, "np-block-array-col-plus");
        sb.append_line("</div>");
    }
    plus_button(sb, "np-block-array-row-plus");
}

pub fn user_option_panel(cx: &RenderContext<'_>, sb: &mut StringBuilder) {
    sb.append_format_line(
        "<div class='{0} {1} {2}'>",
        &[&"np-block", &"np-block-user-option", &"np-block-minimize"],
    );
    section_header(sb, "userOption", "User Option");
    sb.append_format_line("<div id='{0}'>", &[&cx.element_id("np-block-user-option")]);
    sb.append_format_line("<table class='{0}' style='width: 100%;'>", &[&"np-block-user-option-table"]);
    sb.append_line("<colgroup><col width='40%'/><col width='*'/><col width='10%'/></colgroup>");
    sb.append_line("<tr><th>Option Key</th><th>Option Value</th><th>X</th></tr>");
    for (index, option) in cx.state.user_option_list.iter().enumerate() {
        sb.append_format_line("<tr data-index='{0}'>", &[&index]);
        sb.append_format_line(
            "<td><input type='text' class='{0} {1}' value='{2}'/></td>",
            &[&"np-block-input", &"np-block-user-option-key", &escape(&option.option_key)],
        );
        sb.append_format_line(
            "<td><input type='text' class='{0} {1}' value='{2}'/></td>",
            &[&"np-block-input", &"np-block-user-option-value", &escape(&option.option_value)],
        );
        sb.append_format_line(
            "<td><input type='button' class='{0}' value='X'/></td>",
            &[&"np-block-user-option-delete"],
        );
        sb.append_line("</tr>");
    }
    sb.append_format_line(
        "<tr><td colspan='3'><input type='button' class='{0}' value='{1}'/></td></tr>",
        &[&"np-block-user-option-add", &"plus option"],
    );
    sb.append_line("</table>");
    sb.append_line("</div>");
    sb.append_line("</div>");
}
