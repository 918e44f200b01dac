pub mod html;
pub mod rewriter;


pub use html::Document;
pub use rewriter::{REFERENCE_RULES, ReferenceRule, classify_and_rewrite, rule_for, walk};
