//! Structural extent extraction from Rust source files.
//!
//! Produces three sets of line/column spans per file: function extents
//! (top-level free functions, impl methods and trait default methods),
//! block extents (`if`/`match`/`for`/`while`/`loop` expressions plus their
//! branch bodies, the units at which suppression can apply below
//! full-function granularity) and annotation extents (comments carrying
//! the suppression marker). The AST does not retain comments, so
//! annotations come from a separate text scan.

mod comment;

pub use comment::annotation_extents;

use std::path::Path;

use proc_macro2::LineColumn;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};

use crate::error::{CoverGuardError, Result};

/// Comment token that excludes a function or block from coverage accounting.
pub const SUPPRESSION_MARKER: &str = "coverage-ignore";

/// A line/column span locating a syntactic construct or comment.
///
/// Lines and columns are 1-based, matching the coverage profile's coordinate
/// system so positions are directly comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Extent {
    #[must_use]
    pub const fn start_pos(&self) -> (u32, u32) {
        (self.start_line, self.start_col)
    }

    #[must_use]
    pub const fn end_pos(&self) -> (u32, u32) {
        (self.end_line, self.end_col)
    }

    #[must_use]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    #[must_use]
    pub const fn line_span(&self) -> u32 {
        self.end_line - self.start_line
    }
}

/// Extents extracted from one source file.
#[derive(Debug, Clone, Default)]
pub struct FileExtents {
    pub functions: Vec<Extent>,
    pub blocks: Vec<Extent>,
    pub annotations: Vec<Extent>,
}

/// Parses a source file and extracts function, block and annotation extents.
///
/// # Errors
/// Returns an error when the file is not syntactically valid Rust.
pub fn extract(path: &Path, content: &str) -> Result<FileExtents> {
    let ast = syn::parse_file(content).map_err(|e| CoverGuardError::SourceParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut visitor = ExtentVisitor::default();
    visitor.visit_file(&ast);

    Ok(FileExtents {
        functions: visitor.functions,
        blocks: visitor.blocks,
        annotations: annotation_extents(content, SUPPRESSION_MARKER),
    })
}

#[derive(Default)]
struct ExtentVisitor {
    functions: Vec<Extent>,
    blocks: Vec<Extent>,
    fn_depth: u32,
}

impl ExtentVisitor {
    // A nested fn's blocks already lie within the enclosing function's
    // extent; recording the inner extent too would count its statements
    // twice.
    fn record_function(&mut self, extent: Extent) {
        if self.fn_depth == 0 {
            self.functions.push(extent);
        }
    }
}

impl<'ast> Visit<'ast> for ExtentVisitor {
    fn visit_item_fn(&mut self, item: &'ast syn::ItemFn) {
        self.record_function(span_extent(item.sig.span().start(), item.block.span().end()));
        self.fn_depth += 1;
        visit::visit_item_fn(self, item);
        self.fn_depth -= 1;
    }

    fn visit_impl_item_fn(&mut self, item: &'ast syn::ImplItemFn) {
        self.record_function(span_extent(item.sig.span().start(), item.block.span().end()));
        self.fn_depth += 1;
        visit::visit_impl_item_fn(self, item);
        self.fn_depth -= 1;
    }

    fn visit_trait_item_fn(&mut self, item: &'ast syn::TraitItemFn) {
        // Only default methods have a body to cover.
        if let Some(block) = &item.default {
            self.record_function(span_extent(item.sig.span().start(), block.span().end()));
        }
        self.fn_depth += 1;
        visit::visit_trait_item_fn(self, item);
        self.fn_depth -= 1;
    }

    fn visit_expr_if(&mut self, expr: &'ast syn::ExprIf) {
        // Branch bodies get their own extents so an annotation inside one
        // branch leaves the sibling branch counted.
        self.blocks.push(node_extent(expr));
        self.blocks.push(node_extent(&expr.then_branch));
        if let Some((_, else_branch)) = &expr.else_branch
            && let syn::Expr::Block(block) = &**else_branch
        {
            self.blocks.push(node_extent(block));
        }
        visit::visit_expr_if(self, expr);
    }

    fn visit_expr_match(&mut self, expr: &'ast syn::ExprMatch) {
        self.blocks.push(node_extent(expr));
        for arm in &expr.arms {
            if matches!(*arm.body, syn::Expr::Block(_)) {
                self.blocks.push(node_extent(&arm.body));
            }
        }
        visit::visit_expr_match(self, expr);
    }

    fn visit_expr_for_loop(&mut self, expr: &'ast syn::ExprForLoop) {
        self.blocks.push(node_extent(expr));
        visit::visit_expr_for_loop(self, expr);
    }

    fn visit_expr_while(&mut self, expr: &'ast syn::ExprWhile) {
        self.blocks.push(node_extent(expr));
        visit::visit_expr_while(self, expr);
    }

    fn visit_expr_loop(&mut self, expr: &'ast syn::ExprLoop) {
        self.blocks.push(node_extent(expr));
        visit::visit_expr_loop(self, expr);
    }
}

fn node_extent<T: Spanned>(node: &T) -> Extent {
    let span = node.span();
    span_extent(span.start(), span.end())
}

// proc-macro2 lines are 1-based but columns are 0-based; shift columns so
// extents share the profile's 1-based coordinate system.
#[allow(clippy::cast_possible_truncation)]
fn span_extent(start: LineColumn, end: LineColumn) -> Extent {
    Extent {
        start_line: start.line as u32,
        start_col: start.column as u32 + 1,
        end_line: end.line as u32,
        end_col: end.column as u32 + 1,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
