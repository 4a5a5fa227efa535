//! Command to validate a device configuration file.

use crate::error::CliError;
use crate::utils::{require_file, GlobalOptions};
use clap::Args;
use sdclang::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a device configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        let path = require_file(&self.config_path)?;

        // 2. Parse the file, reporting what resolution would silently skip
        let source = match ConfigLoader::load_document_strict(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        // 3. Check the default block requirements
        if let Err(e) = ConfigValidator::validate_document(&source.document) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration validation failed".to_string(),
            ));
        }

        // 4. The selected product block must decode; others only warn
        if let Some(product) = &global.product {
            match source.document.product_block(product) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    log::warn!("no block for product '{product}'; the default block applies");
                }
                Err(e) => {
                    eprintln!("Validation error: {e}");
                    return Err(CliError::SemanticFailure(
                        "Configuration validation failed".to_string(),
                    ));
                }
            }
        }

        let products = source.document.products();
        for product in &products {
            if let Err(e) = source.document.product_block(product) {
                log::warn!("{e}");
            }
        }
        if !products.is_empty() {
            log::info!("product blocks: {}", products.join(", "));
        }

        println!("Configuration is valid");
        Ok(())
    }
}
