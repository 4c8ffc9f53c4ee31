use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a predicate lambda into a filter document
    Compile {
        #[arg(long, help = "Predicate lambda, e.g. \"a => a.email == 'hi'\"")]
        predicate: Option<String>,

        #[arg(long, help = "Read the predicate from this file instead")]
        file: Option<String>,

        #[arg(
            long,
            help = "Captured values as a JSON object, e.g. '{\"b\": 123}'"
        )]
        captures: Option<String>,

        #[arg(
            long,
            help = "If specified, writes the filter document to this file instead of stdout"
        )]
        output: Option<String>,

        #[arg(long, help = "Pretty-print the filter document")]
        pretty: bool,
    },
    /// Print the parsed predicate AST as JSON
    Ast {
        #[arg(long, help = "Predicate lambda")]
        predicate: Option<String>,

        #[arg(long, help = "Read the predicate from this file instead")]
        file: Option<String>,
    },
}
