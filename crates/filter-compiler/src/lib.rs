pub mod cache;
pub mod compile;
pub mod document;
pub mod errors;
pub mod scope;
pub mod side;

pub use compile::{CompareOp, Compiler, FilterNode, FilterValue};
pub use document::{FilterDocument, materialize};
pub use errors::CompileError;
pub use scope::{RootKind, Scope};
pub use side::Side;

use serde_json::{Map, Value};
use tracing::debug;

/// A caller-side predicate: lambda source to compile, or an already
/// materialized filter document, which passes through unchanged.
pub enum Predicate<'a> {
    Source(&'a str),
    Document(FilterDocument),
}

pub fn compile(predicate: Predicate) -> Result<FilterDocument, CompileError> {
    match predicate {
        Predicate::Source(source) => compile_predicate(source),
        Predicate::Document(document) => Ok(document),
    }
}

/// Compile a predicate lambda with no captured values
pub fn compile_predicate(source: &str) -> Result<FilterDocument, CompileError> {
    compile_predicate_with_captures(source, &Map::new())
}

/// Compile a predicate lambda, resolving externally captured references
/// against `captures`. If the lambda declares a second parameter, that
/// name namespaces the captures.
pub fn compile_predicate_with_captures(
    source: &str,
    captures: &Map<String, Value>,
) -> Result<FilterDocument, CompileError> {
    debug!(source, "compiling predicate");

    let lambda = cache::parse_cached(source)?;
    let scope = Scope::root(lambda.parameter());
    let namespace = lambda.params.get(1).map(String::as_str);
    let compiler = Compiler::new(source, captures, namespace);

    let node = compiler.compile_body(&lambda.body, &scope)?;
    Ok(materialize(&node))
}
