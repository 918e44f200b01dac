use crate::reference::{Category, ResourceDescriptor};
use crate::resolver;
use html5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData};
use url::Url;

/// One row of the classification table: which attribute of which element
/// holds a reference, and what kind of resource it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRule {
    pub tag: &'static str,
    pub attribute: &'static str,
    pub category: Category,
}

const fn rule(tag: &'static str, attribute: &'static str, category: Category) -> ReferenceRule {
    ReferenceRule {
        tag,
        attribute,
        category,
    }
}

/// Elements whose references are rewritten, keyed by lowercase tag name
pub const REFERENCE_RULES: &[ReferenceRule] = &[
    rule("a", "href", Category::PageLink),
    rule("img", "src", Category::Image),
    rule("script", "src", Category::Script),
    rule("link", "href", Category::GenericResource),
    rule("xlink", "href", Category::GenericResource),
    rule("use", "href", Category::GenericResource),
    rule("iframe", "src", Category::GenericResource),
    rule("object", "data", Category::GenericResource),
    rule("embed", "src", Category::GenericResource),
    rule("span", "data-src", Category::GenericResource),
    rule("video", "src", Category::GenericResource),
    rule("audio", "src", Category::GenericResource),
];

/// Looks up the rule for an element, ignoring case
pub fn rule_for(tag: &str) -> Option<&'static ReferenceRule> {
    REFERENCE_RULES
        .iter()
        .find(|rule| rule.tag.eq_ignore_ascii_case(tag))
}

/// Rewrites the reference attributes of one element in place
///
/// Every attribute matching the element's rule (case-insensitively) is
/// resolved against `base` and replaced by its archive reference. Resources
/// to fetch are appended to `resources`; `mailto:` links are left alone and
/// links to other HTML pages are rewritten without being recorded.
pub fn classify_and_rewrite(
    tag: &str,
    attrs: &mut [Attribute],
    base: &Url,
    resources: &mut Vec<ResourceDescriptor>,
) {
    let Some(rule) = rule_for(tag) else {
        return;
    };

    for attr in attrs
        .iter_mut()
        .filter(|attr| (*attr.name.local).eq_ignore_ascii_case(rule.attribute))
    {
        let absolute_url = match resolver::resolve(base, &attr.value) {
            Ok(url) => url,
            Err(e) => {
                ::log::warn!("Skipping <{} {}>: {}", tag, rule.attribute, e);
                continue;
            }
        };

        if rule.category == Category::PageLink && absolute_url.scheme() == "mailto" {
            continue;
        }

        let descriptor = ResourceDescriptor::new(rule.category, absolute_url);
        attr.value = descriptor.rewritten_reference().into();

        if rule.category == Category::PageLink && descriptor.is_html_document() {
            ::log::trace!("Navigational link {}", descriptor.absolute_url);
            continue;
        }

        ::log::debug!("Found {} {}", descriptor.category, descriptor.absolute_url);
        resources.push(descriptor);
    }
}

/// Depth-first, pre-order walk rewriting every element of the tree
///
/// Discovered resources are appended to `resources` in visitation order,
/// duplicates included. Uses an explicit stack so nesting depth is bounded
/// only by memory.
pub fn walk(root: &Handle, base: &Url, resources: &mut Vec<ResourceDescriptor>) {
    let mut stack: Vec<Handle> = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if let NodeData::Element {
            ref name,
            ref attrs,
            ..
        } = node.data
        {
            classify_and_rewrite(&name.local, &mut attrs.borrow_mut(), base, resources);
        }

        // reversed so the first child is visited next
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
}
