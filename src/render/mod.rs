//! Option-page rendering for a block.
//!
//! A page is rendered in a fixed sequence of stages. Each stage is a hook on
//! [`PageRenderer`] that writes markup into its own buffer; [`page_render`]
//! owns the order, so a renderer can silence or replace a stage but never move
//! one. The result is a [`Fragment`] describing what goes where. Attaching it
//! to a live page is left to the host.

pub mod html;
pub mod markup;
mod pages;

pub use pages::{ArrayEditorPage, BasePage, Dtype, Input, OperationPage, DTYPES};

use crate::builder::StringBuilder;
use crate::state::ParameterState;
use crate::Options;
use serde::Serialize;

/// Rendering stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ResolveRoot,
    PrefixCode,
    RequiredInputOutput,
    ParamBlock,
    AdditionalOptions,
    ReturnVariable,
    UserOption,
    PostfixCode,
}

impl Stage {
    /// Every stage after the root has been resolved
    pub const RENDER_ORDER: [Stage; 7] = [
        Stage::PrefixCode,
        Stage::RequiredInputOutput,
        Stage::ParamBlock,
        Stage::AdditionalOptions,
        Stage::ReturnVariable,
        Stage::UserOption,
        Stage::PostfixCode,
    ];

    pub fn container(self) -> Container {
        match self {
            Stage::ResolveRoot | Stage::PrefixCode | Stage::UserOption | Stage::PostfixCode => {
                Container::Main
            }
            Stage::RequiredInputOutput => Container::Required,
            Stage::ParamBlock | Stage::AdditionalOptions | Stage::ReturnVariable => {
                Container::Option
            }
        }
    }
}

/// Area of the page a section is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    Main,
    Required,
    Option,
}

impl Container {
    pub fn selector(self, root: &str) -> String {
        match self {
            Container::Main => root.to_string(),
            Container::Required => format!("{} .np-block-required", root),
            Container::Option => format!("{} .np-block-options", root),
        }
    }
}

/// Markup produced by one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub stage: Stage,
    pub container: Container,
    pub selector: String,
    pub markup: String,
}

/// Result of rendering a block's page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub root: String,
    /// Every stage that ran, in order
    pub stages: Vec<Stage>,
    /// Non-empty stage output, in order
    pub sections: Vec<Section>,
}

impl Fragment {
    pub fn section(&self, stage: Stage) -> Option<&Section> {
        self.sections.iter().find(|s| s.stage == stage)
    }

    pub fn markup(&self) -> String {
        self.sections.iter().map(|s| s.markup.as_str()).collect()
    }
}

/// What a stage hook gets to look at
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub state: &'a ParameterState,
    pub root: &'a str,
    pub block_id: &'a str,
    /// Name numpy is imported as
    pub numpy_alias: &'a str,
}

impl RenderContext<'_> {
    /// Element id unique to this block, escaped for an attribute
    pub fn element_id(&self, name: &str) -> String {
        format!("{}-{}", name, html::escape(self.block_id))
    }
}

/// Stage hooks for one block type.
///
/// Hooks left alone use the shared markup; the required input/output and
/// parameter stages render nothing unless a page overrides them.
pub trait PageRenderer {
    fn render_prefix_code(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::prefix_code_box(cx, sb);
    }

    fn render_required_input_output(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}

    fn render_param_block(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}

    fn render_additional_option_container(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::additional_options_header(cx, sb);
    }

    fn render_return_var_block(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::return_var_block(cx, sb);
    }

    fn render_user_option(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::user_option_panel(cx, sb);
    }

    fn render_postfix_code(&self, cx: &RenderContext<'_>, sb: &mut StringBuilder) {
        markup::postfix_code_box(cx, sb);
    }
}

/// Run every stage of `renderer` in order and collect the output
pub fn page_render(
    renderer: &dyn PageRenderer,
    state: &ParameterState,
    target: Option<&str>,
    options: &Options,
    block_id: &str,
) -> Fragment {
    let root = target
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(options.root_selector.as_str())
        .to_string();

    let cx = RenderContext {
        state,
        root: &root,
        block_id,
        numpy_alias: &options.numpy_alias,
    };

    let mut stages = Vec::with_capacity(Stage::RENDER_ORDER.len() + 1);
    stages.push(Stage::ResolveRoot);
    let mut sections = Vec::new();

    for stage in Stage::RENDER_ORDER {
        let mut sb = StringBuilder::new();
        match stage {
            Stage::PrefixCode => renderer.render_prefix_code(&cx, &mut sb),
            Stage::RequiredInputOutput => renderer.render_required_input_output(&cx, &mut sb),
            Stage::ParamBlock => renderer.render_param_block(&cx, &mut sb),
            Stage::AdditionalOptions => renderer.render_additional_option_container(&cx, &mut sb),
            Stage::ReturnVariable => renderer.render_return_var_block(&cx, &mut sb),
            Stage::UserOption => renderer.render_user_option(&cx, &mut sb),
            Stage::PostfixCode => renderer.render_postfix_code(&cx, &mut sb),
            Stage::ResolveRoot => {}
        }
        stages.push(stage);

        if !sb.is_empty() {
            let container = stage.container();
            sections.push(Section {
                stage,
                container,
                selector: container.selector(&root),
                markup: sb.into_string(),
            });
        }
    }

    tracing::trace!(root = %root, sections = sections.len(), "rendered block page");

    Fragment {
        root,
        stages,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl PageRenderer for Silent {
        fn render_prefix_code(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
        fn render_additional_option_container(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
        fn render_return_var_block(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
        fn render_user_option(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
        fn render_postfix_code(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
    }

    /// Writes its stage name so the output order is visible
    struct Tagged;

    impl PageRenderer for Tagged {
        fn render_prefix_code(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("prefix;");
        }
        fn render_required_input_output(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("required;");
        }
        fn render_param_block(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("params;");
        }
        fn render_additional_option_container(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("additional;");
        }
        fn render_return_var_block(&self, _cx: &RenderContext<'_>, _sb: &mut StringBuilder) {}
        fn render_user_option(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("user;");
        }
        fn render_postfix_code(&self, _cx: &RenderContext<'_>, sb: &mut StringBuilder) {
            sb.append("postfix;");
        }
    }

    #[test]
    fn test_all_stages_run_in_order() {
        let fragment = page_render(&Silent, &ParameterState::new(), None, &Options::default(), "b0");
        assert_eq!(fragment.stages[0], Stage::ResolveRoot);
        assert_eq!(&fragment.stages[1..], &Stage::RENDER_ORDER);
        assert!(fragment.sections.is_empty());
    }

    #[test]
    fn test_silenced_stage_keeps_others_in_place() {
        let fragment = page_render(&Tagged, &ParameterState::new(), None, &Options::default(), "b0");
        assert_eq!(fragment.markup(), "prefix;required;params;additional;user;postfix;");
        assert_eq!(fragment.stages.len(), 8);
        assert!(fragment.section(Stage::ReturnVariable).is_none());
    }

    #[test]
    fn test_root_resolution() {
        let options = Options::default();
        let fragment = page_render(&BasePage, &ParameterState::new(), Some(" #cell-3 "), &options, "b0");
        assert_eq!(fragment.root, "#cell-3");

        let fragment = page_render(&BasePage, &ParameterState::new(), Some(""), &options, "b0");
        assert_eq!(fragment.root, options.root_selector);
    }

    #[test]
    fn test_sections_carry_containers() {
        let fragment = page_render(&Tagged, &ParameterState::new(), Some("#root"), &Options::default(), "b0");
        let required = fragment.section(Stage::RequiredInputOutput).unwrap();
        assert_eq!(required.container, Container::Required);
        assert_eq!(required.selector, "#root .np-block-required");
        let params = fragment.section(Stage::ParamBlock).unwrap();
        assert_eq!(params.selector, "#root .np-block-options");
        assert_eq!(fragment.section(Stage::PostfixCode).unwrap().selector, "#root");
    }
}
