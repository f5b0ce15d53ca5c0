//! 消息模板模块
//!
//! 基于Handlebars的构建消息渲染。模板只能引用 [`Build`] 的字段，
//! 引用未知字段会在渲染阶段报错。

use crate::error::RenderError;
use crate::notification::build::{Build, BUILD_FIELDS};
use handlebars::template::{HelperTemplate, Parameter, Template, TemplateElement};
use handlebars::{no_escape, Handlebars, Path};

const TEMPLATE_NAME: &str = "wechat";

/// 未配置模板时使用的默认消息内容
pub const DEFAULT_CONTENT_TEMPLATE: &str = r#"{{#if (eq status "success")}}✅{{else}}❌{{/if}} {{owner}}/{{name}} #{{number}} {{status}}
分支: {{branch}}
提交: {{commit}}
作者: {{author}}
信息: {{message}}
详情: {{link}}"#;

/// 已解析的Handlebars模板
///
/// 解析在构造时完成，渲染只读取内部注册表，可以在多个任务间共享。
pub struct HandlebarsTemplate {
    registry: Handlebars<'static>,
}

impl HandlebarsTemplate {
    /// 解析模板
    ///
    /// # 参数
    /// * `template` - 模板字符串
    ///
    /// # 返回
    /// * `Result<Self, RenderError>` - 语法错误时返回 `RenderError::Parse`，
    ///   引用了 [`Build`] 之外的字段时返回 `RenderError::Execute`
    pub fn new(template: &str) -> Result<Self, RenderError> {
        let compiled = Template::compile(template).map_err(|e| RenderError::Parse(e.to_string()))?;
        // 严格模式不检查 #if / #unless 等块助手的参数，这里统一检查
        check_template_fields(&compiled)?;

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_template(TEMPLATE_NAME, compiled);

        Ok(Self { registry })
    }

    /// 使用构建信息渲染模板
    ///
    /// # 参数
    /// * `build` - 构建快照
    ///
    /// # 返回
    /// * `Result<String, RenderError>` - 渲染结果，未做首尾空白裁剪
    pub fn render(&self, build: &Build) -> Result<String, RenderError> {
        self.registry
            .render(TEMPLATE_NAME, build)
            .map_err(|e| RenderError::Execute(e.to_string()))
    }
}

fn check_template_fields(template: &Template) -> Result<(), RenderError> {
    template.elements.iter().try_for_each(check_element_fields)
}

fn check_element_fields(element: &TemplateElement) -> Result<(), RenderError> {
    match element {
        TemplateElement::Expression(helper)
        | TemplateElement::HtmlExpression(helper)
        | TemplateElement::HelperBlock(helper) => check_helper_fields(helper),
        _ => Ok(()),
    }
}

fn check_helper_fields(helper: &HelperTemplate) -> Result<(), RenderError> {
    for param in helper.params.iter().chain(helper.hash.values()) {
        check_parameter_fields(param)?;
    }
    if let Some(block) = &helper.template {
        check_template_fields(block)?;
    }
    if let Some(inverse) = &helper.inverse {
        check_template_fields(inverse)?;
    }
    Ok(())
}

fn check_parameter_fields(param: &Parameter) -> Result<(), RenderError> {
    match param {
        Parameter::Path(Path::Relative((_, raw))) => check_field_path(raw),
        Parameter::Subexpression(subexpression) => check_element_fields(&subexpression.element),
        _ => Ok(()),
    }
}

/// 路径的根字段必须是构建字段，`this` 指向构建本身
fn check_field_path(raw: &str) -> Result<(), RenderError> {
    let mut rest = raw;
    while let Some(stripped) = ["../", "./", "this.", "this/", "@root."]
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = stripped;
    }

    let root = rest.split(['.', '/', '[']).next().unwrap_or(rest);
    if root.is_empty() || root == "this" || root == "." || BUILD_FIELDS.contains(&root) {
        Ok(())
    } else {
        Err(RenderError::Execute(format!("未知字段: {raw}")))
    }
}

/// 解析并渲染模板
pub fn render(template: &str, build: &Build) -> Result<String, RenderError> {
    HandlebarsTemplate::new(template)?.render(build)
}

/// 只检查模板语法
pub fn validate_template(template: &str) -> Result<(), RenderError> {
    HandlebarsTemplate::new(template).map(|_| ())
}
