pub mod codeplug_file;

pub use codeplug_file::CodeplugFile;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::core::OutputFormat;
    use crate::utils::error::ValidationError;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "opengd77")]
    #[command(about = "Convert a codeplug definition into OpenGD77 CPS CSV files")]
    pub struct CliConfig {
        /// Codeplug definition (TOML)
        #[arg(short, long, default_value = "codeplug.toml")]
        pub definition: String,

        #[arg(short, long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_enum, value_delimiter = ',', default_value = "csv")]
        pub formats: Vec<OutputFormat>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,

        /// Validate and project without writing any files
        #[arg(long)]
        pub dry_run: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<(), ValidationError> {
            for (field, value) in [("definition", &self.definition), ("output_path", &self.output_path)] {
                if value.trim().is_empty() {
                    return Err(ValidationError::Empty {
                        field: field.to_string(),
                    });
                }
            }
            if self.formats.is_empty() {
                return Err(ValidationError::Empty {
                    field: "formats".to_string(),
                });
            }
            Ok(())
        }
    }

}
