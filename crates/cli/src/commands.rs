use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Check a filter document against a model's schema
    Validate {
        #[command(flatten)]
        target: FilterTarget,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Compile a filter document to a parameterised SQL WHERE fragment
    Compile {
        #[command(flatten)]
        target: FilterTarget,

        #[arg(long, default_value = "postgres", help = "postgres, mysql or sqlite")]
        dialect: String,

        /// Column for a field, as FIELD=COLUMN; may be repeated
        #[arg(long = "column", value_name = "FIELD=COLUMN")]
        columns: Vec<String>,

        #[arg(long, help = "Reject fields without an explicit --column mapping")]
        strict_columns: bool,

        #[arg(long, help = "Flatten groups and remove double negation first")]
        simplify: bool,
    },
    /// Print the filterable fields and operators of a model
    Describe {
        #[arg(long, help = "Schema configuration file path")]
        schema: String,

        #[arg(long, help = "Model name; all models when omitted")]
        model: Option<String>,
    },
    /// Print the canonical form of a filter document
    Fmt {
        #[command(flatten)]
        target: FilterTarget,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FilterTarget {
    #[arg(long, help = "Schema configuration file path")]
    pub schema: String,

    #[arg(long, help = "Model the filter applies to")]
    pub model: String,

    #[arg(long, help = "Filter document path, or '-' for stdin")]
    pub filter: String,
}
