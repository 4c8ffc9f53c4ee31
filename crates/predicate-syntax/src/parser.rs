use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/predicate.pest"]
pub struct PredicateParser;
